use std::path::{Component, Path, PathBuf};

use crate::error::Error;

/// Conventional name of the env file.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Default number of parent directories searched when probing.
pub const DEFAULT_PROBE_LEVELS: usize = 4;

/// Search `start_dir` and up to `levels` of its ancestors for
/// [`DEFAULT_ENV_FILE`].
///
/// A relative `start_dir` is resolved against the current directory first.
/// Returns the first file found. When nothing is found, the error lists every
/// directory that was checked, unless `ignore_errors` is set.
pub fn probe(
    start_dir: impl AsRef<Path>,
    levels: usize,
    ignore_errors: bool,
) -> Result<Option<PathBuf>, Error> {
    let start_dir = absolute_dir(start_dir.as_ref())?;
    let mut searched = Vec::new();
    let mut dir = Some(start_dir.as_path());

    for _ in 0..=levels {
        let Some(current) = dir else {
            break;
        };

        searched.push(current.to_path_buf());
        let candidate = current.join(DEFAULT_ENV_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "probe found env file");
            return Ok(Some(candidate));
        }

        dir = current.parent();
    }

    tracing::debug!(levels, searched = searched.len(), "probe found no env file");
    if ignore_errors {
        return Ok(None);
    }

    Err(Error::ProbeNotFound {
        file_name: DEFAULT_ENV_FILE.to_owned(),
        levels,
        searched,
    })
}

fn absolute_dir(dir: &Path) -> Result<PathBuf, Error> {
    let dir = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    let mut normalized = PathBuf::new();
    for component in std::path::absolute(dir)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Where probing starts when no directory is configured: the directory of the
/// running executable, or the current directory if that is unknown.
pub fn default_start_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}
