use std::collections::BTreeMap;

/// Destination for loaded environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEnv {
    kind: TargetEnvKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TargetEnvKind {
    /// Apply entries to the current process environment.
    ///
    /// This writes through [`std::env::set_var`], which mutates global process
    /// state and is not thread-safe for concurrent environment access.
    Process,
    /// Apply entries to an in-memory map.
    Memory(BTreeMap<String, String>),
}

/// Read-only view of the process environment.
pub(crate) static PROCESS_READER: TargetEnv = TargetEnv {
    kind: TargetEnvKind::Process,
};

impl Default for TargetEnv {
    fn default() -> Self {
        Self::memory()
    }
}

impl TargetEnv {
    /// Create a process-environment target.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other threads concurrently read or write the
    /// process environment for the duration of operations that may mutate this
    /// target.
    pub unsafe fn process() -> Self {
        Self {
            kind: TargetEnvKind::Process,
        }
    }

    /// Create an empty in-memory target.
    pub fn memory() -> Self {
        Self::from_memory(BTreeMap::new())
    }

    /// Create an in-memory target from an existing map.
    pub fn from_memory(map: BTreeMap<String, String>) -> Self {
        Self {
            kind: TargetEnvKind::Memory(map),
        }
    }

    /// Snapshot the current process environment into an in-memory target.
    ///
    /// Variables whose name or value is not valid Unicode are converted lossily.
    pub fn snapshot() -> Self {
        let map = std::env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect();
        Self::from_memory(map)
    }

    pub fn is_process(&self) -> bool {
        matches!(self.kind, TargetEnvKind::Process)
    }

    pub fn as_memory(&self) -> Option<&BTreeMap<String, String>> {
        match &self.kind {
            TargetEnvKind::Memory(map) => Some(map),
            TargetEnvKind::Process => None,
        }
    }

    pub fn into_memory(self) -> Option<BTreeMap<String, String>> {
        match self.kind {
            TargetEnvKind::Memory(map) => Some(map),
            TargetEnvKind::Process => None,
        }
    }

    pub fn get_var(&self, key: &str) -> Option<String> {
        match &self.kind {
            TargetEnvKind::Process => {
                std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
            }
            TargetEnvKind::Memory(map) => map.get(key).cloned(),
        }
    }

    /// Whether `key` is set to a non-empty value.
    pub fn has_value(&self, key: &str) -> bool {
        self.get_var(key).is_some_and(|value| !value.is_empty())
    }

    pub(crate) fn set_var(&mut self, key: &str, value: &str) {
        match &mut self.kind {
            // SAFETY: `TargetEnv::process` is unsafe and its caller guarantees
            // exclusive access to the process environment.
            TargetEnvKind::Process => unsafe { std::env::set_var(key, value) },
            TargetEnvKind::Memory(map) => {
                map.insert(key.to_owned(), value.to_owned());
            }
        }
    }
}
