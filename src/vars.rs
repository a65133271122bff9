use std::str::FromStr;

use crate::env::{PROCESS_READER, TargetEnv};
use crate::error::VarError;

/// Typed lookups over an environment.
///
/// Empty values are treated as unset.
#[derive(Debug, Clone, Copy)]
pub struct EnvReader<'a> {
    target: &'a TargetEnv,
}

impl EnvReader<'static> {
    /// Read from the process environment.
    pub fn process() -> Self {
        Self {
            target: &PROCESS_READER,
        }
    }
}

impl Default for EnvReader<'static> {
    fn default() -> Self {
        Self::process()
    }
}

impl<'a> EnvReader<'a> {
    pub fn new(target: &'a TargetEnv) -> Self {
        Self { target }
    }

    pub fn has_value(&self, key: &str) -> bool {
        self.target.has_value(key)
    }

    pub fn string(&self, key: &str) -> Result<String, VarError> {
        self.try_string(key).ok_or_else(|| VarError::Missing {
            key: key.to_owned(),
        })
    }

    pub fn try_string(&self, key: &str) -> Option<String> {
        self.target.get_var(key).filter(|value| !value.is_empty())
    }

    pub fn int(&self, key: &str) -> Result<i64, VarError> {
        self.parse(key)
    }

    pub fn try_int(&self, key: &str) -> Option<i64> {
        self.int(key).ok()
    }

    pub fn float(&self, key: &str) -> Result<f64, VarError> {
        self.parse(key)
    }

    pub fn try_float(&self, key: &str) -> Option<f64> {
        self.float(key).ok()
    }

    /// Accepts `true`/`false` in any case, ignoring surrounding whitespace.
    pub fn bool(&self, key: &str) -> Result<bool, VarError> {
        let raw = self.string(key)?;
        let value = raw.trim();
        let parsed = if value.eq_ignore_ascii_case("true") {
            Some(true)
        } else if value.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        };
        parsed.ok_or_else(|| invalid(key, "bool", raw))
    }

    pub fn try_bool(&self, key: &str) -> Option<bool> {
        self.bool(key).ok()
    }

    /// Parse the value with [`FromStr`] after trimming surrounding whitespace.
    pub fn parse<T: FromStr>(&self, key: &str) -> Result<T, VarError> {
        let raw = self.string(key)?;
        raw.trim()
            .parse()
            .map_err(|_| invalid(key, std::any::type_name::<T>(), raw))
    }
}

fn invalid(key: &str, ty: &'static str, value: String) -> VarError {
    VarError::Invalid {
        key: key.to_owned(),
        ty,
        value,
    }
}
