use std::path::PathBuf;

use crate::env::TargetEnv;
use crate::error::Error;
use crate::merge::{EnvMap, merge};
use crate::model::{Entry, LoadReport};
use crate::options::DotEnvOptions;
use crate::parser::parse_lines;
use crate::probe::probe;
use crate::source::read_lines;

/// Read `.env` from the current working directory with default options.
///
/// Nothing is written to the environment.
pub fn dotenv() -> Result<EnvMap, Error> {
    read(&DotEnvOptions::default())
}

/// Read and merge the configured env files without touching any environment.
pub fn read(options: &DotEnvOptions) -> Result<EnvMap, Error> {
    let (map, _) = collect(options)?;
    Ok(map)
}

/// Read the configured env files and write the result into `target`.
///
/// Without `overwrite_existing`, keys that already hold a non-empty value in
/// `target` are left alone.
pub fn load_into(options: &DotEnvOptions, target: &mut TargetEnv) -> Result<LoadReport, Error> {
    let (map, files_read) = collect(options)?;
    let mut report = LoadReport {
        files_read,
        ..LoadReport::default()
    };

    for (key, value) in map {
        if !options.overwrite_existing() && target.has_value(&key) {
            report.skipped_existing += 1;
            tracing::debug!(key = key.as_str(), "skipping existing key");
            continue;
        }

        target.set_var(&key, &value);
        report.loaded += 1;
    }

    Ok(report)
}

/// Read the configured env files into the process environment.
///
/// # Safety
///
/// Writes the process environment. The caller must ensure no other threads
/// read or write the environment while this runs.
pub unsafe fn load(options: &DotEnvOptions) -> Result<LoadReport, Error> {
    // SAFETY: forwarded to the caller.
    let mut target = unsafe { TargetEnv::process() };
    load_into(options, &mut target)
}

fn collect(options: &DotEnvOptions) -> Result<(EnvMap, usize), Error> {
    let paths = resolve_paths(options)?;
    let mut files = Vec::<Vec<Entry>>::with_capacity(paths.len());
    let mut files_read = 0usize;

    for path in &paths {
        let lines = read_lines(path, options.ignore_errors(), options.encoding())?;
        if path.is_file() {
            files_read += 1;
        }
        files.push(parse_lines(&lines, options.trim_values())?);
    }

    let map = merge(files, options.overwrite_existing());
    tracing::debug!(files_read, keys = map.len(), "read env files");
    Ok((map, files_read))
}

fn resolve_paths(options: &DotEnvOptions) -> Result<Vec<PathBuf>, Error> {
    let Some(settings) = options.probe() else {
        return Ok(options.env_files().to_vec());
    };

    let found = probe(
        settings.resolve_start_dir(),
        settings.levels,
        options.ignore_errors(),
    )?;
    Ok(found.into_iter().collect())
}
