use std::path::{Path, PathBuf};

use crate::env::TargetEnv;
use crate::error::Error;
use crate::loader;
use crate::merge::EnvMap;
use crate::model::{Encoding, LoadReport};
use crate::probe::{DEFAULT_ENV_FILE, DEFAULT_PROBE_LEVELS, default_start_dir};

/// Directory probing settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub levels: usize,
    /// Directory the search starts from. `None` means the executable's
    /// directory.
    pub start_dir: Option<PathBuf>,
}

impl Probe {
    pub(crate) fn resolve_start_dir(&self) -> PathBuf {
        self.start_dir.clone().unwrap_or_else(default_start_dir)
    }
}

/// Settings for reading and loading env files.
///
/// Options are plain values: every `with_*` call returns a new value and
/// leaves other copies untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotEnvOptions {
    ignore_errors: bool,
    env_files: Vec<PathBuf>,
    encoding: Encoding,
    trim_values: bool,
    overwrite_existing: bool,
    probe: Option<Probe>,
}

impl Default for DotEnvOptions {
    fn default() -> Self {
        Self {
            ignore_errors: true,
            env_files: default_env_files(),
            encoding: Encoding::default(),
            trim_values: false,
            overwrite_existing: true,
            probe: None,
        }
    }
}

fn default_env_files() -> Vec<PathBuf> {
    vec![PathBuf::from(DEFAULT_ENV_FILE)]
}

impl DotEnvOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore_errors(&self) -> bool {
        self.ignore_errors
    }

    pub fn env_files(&self) -> &[PathBuf] {
        &self.env_files
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    pub fn trim_values(&self) -> bool {
        self.trim_values
    }

    pub fn overwrite_existing(&self) -> bool {
        self.overwrite_existing
    }

    pub fn probe(&self) -> Option<&Probe> {
        self.probe.as_ref()
    }

    /// Suppress blank-path and missing-file errors.
    pub fn with_ignore_errors(self, ignore_errors: bool) -> Self {
        Self {
            ignore_errors,
            ..self
        }
    }

    /// Files to read, in merge order. An empty list restores the default `.env`.
    pub fn with_env_files<I, P>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let env_files: Vec<PathBuf> = paths
            .into_iter()
            .map(|path| path.as_ref().to_path_buf())
            .collect();
        Self {
            env_files: if env_files.is_empty() {
                default_env_files()
            } else {
                env_files
            },
            ..self
        }
    }

    pub fn with_encoding(self, encoding: Encoding) -> Self {
        Self { encoding, ..self }
    }

    pub fn with_trim_values(self, trim_values: bool) -> Self {
        Self {
            trim_values,
            ..self
        }
    }

    /// Whether later values replace earlier ones, both across files and
    /// against variables already present in the target.
    pub fn with_overwrite_existing(self, overwrite_existing: bool) -> Self {
        Self {
            overwrite_existing,
            ..self
        }
    }

    /// Probe up to `levels` parent directories of the executable's directory
    /// instead of reading the file list.
    pub fn with_probe(self, levels: usize) -> Self {
        Self {
            probe: Some(Probe {
                levels,
                start_dir: None,
            }),
            ..self
        }
    }

    /// Probe starting from `start_dir` instead of reading the file list.
    pub fn with_probe_from(self, start_dir: impl AsRef<Path>, levels: usize) -> Self {
        Self {
            probe: Some(Probe {
                levels,
                start_dir: Some(start_dir.as_ref().to_path_buf()),
            }),
            ..self
        }
    }

    /// Probe the default number of levels from the executable's directory.
    pub fn with_default_probe(self) -> Self {
        self.with_probe(DEFAULT_PROBE_LEVELS)
    }

    pub fn without_probe(self) -> Self {
        Self {
            probe: None,
            ..self
        }
    }

    pub fn read(&self) -> Result<EnvMap, Error> {
        loader::read(self)
    }

    pub fn load_into(&self, target: &mut TargetEnv) -> Result<LoadReport, Error> {
        loader::load_into(self, target)
    }
}
