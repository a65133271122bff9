use std::path::Path;

use crate::error::Error;
use crate::model::Encoding;
use crate::parser::split_lines;

/// Read the lines of an env file, decoded with `encoding`.
///
/// A blank path or a missing file yields an empty result when
/// `ignore_errors` is set, and an error otherwise. Other I/O failures are
/// always returned.
pub fn read_lines(
    path: impl AsRef<Path>,
    ignore_errors: bool,
    encoding: Encoding,
) -> Result<Vec<String>, Error> {
    let path = path.as_ref();

    if path.as_os_str().to_string_lossy().trim().is_empty() {
        if ignore_errors {
            tracing::debug!("ignoring blank env file path");
            return Ok(Vec::new());
        }
        return Err(Error::InvalidPath);
    }

    if !path.exists() {
        if ignore_errors {
            tracing::debug!(path = %path.display(), "env file not found, skipping");
            return Ok(Vec::new());
        }
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    let text = encoding.decode(&bytes);
    let lines = split_lines(&text)
        .into_iter()
        .map(str::to_owned)
        .collect::<Vec<_>>();

    tracing::debug!(
        path = %path.display(),
        encoding = encoding.name(),
        lines = lines.len(),
        "read env file"
    );
    Ok(lines)
}
