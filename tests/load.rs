use std::collections::BTreeMap;
use std::path::Path;

use dotenvkit::{DotEnvOptions, Encoding, Error, ParseErrorKind, TargetEnv};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn read_returns_merged_values_in_file_order() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let first = dir.path().join(".env.base");
    let second = dir.path().join(".env.local");
    write_file(&first, "A=base\nB=base\n");
    write_file(&second, "B=local\nC=local\n");

    let vars = DotEnvOptions::new()
        .with_env_files([&first, &second])
        .read()
        .expect("read should succeed");

    assert_eq!(
        vars.iter().collect::<Vec<_>>(),
        vec![("A", "base"), ("B", "local"), ("C", "local")]
    );
}

#[test]
fn read_keeps_first_value_without_overwrite() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let first = dir.path().join("first.env");
    let second = dir.path().join("second.env");
    write_file(&first, "KEY=first\n");
    write_file(&second, "KEY=second\n");

    let vars = DotEnvOptions::new()
        .with_env_files([&first, &second])
        .with_overwrite_existing(false)
        .read()
        .expect("read should succeed");

    assert_eq!(vars.get("KEY"), Some("first"));
}

#[test]
fn read_trims_values_when_requested() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let file = dir.path().join(".env");
    write_file(&file, "  KEY  =  value  \n");

    let untrimmed = DotEnvOptions::new()
        .with_env_files([&file])
        .read()
        .expect("read should succeed");
    assert_eq!(untrimmed.get("KEY"), Some("  value  "));

    let trimmed = DotEnvOptions::new()
        .with_env_files([&file])
        .with_trim_values(true)
        .read()
        .expect("read should succeed");
    assert_eq!(trimmed.get("KEY"), Some("value"));
}

#[test]
fn missing_file_is_skipped_when_ignoring_errors() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let real = dir.path().join(".env.real");
    write_file(&real, "A=loaded\n");

    let vars = DotEnvOptions::new()
        .with_env_files([dir.path().join("missing.env"), real])
        .read()
        .expect("read should succeed");

    assert_eq!(vars.get("A"), Some("loaded"));
}

#[test]
fn missing_file_returns_not_found_error() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let missing = dir.path().join("missing.env");

    let err = DotEnvOptions::new()
        .with_env_files([&missing])
        .with_ignore_errors(false)
        .read()
        .expect_err("expected not found");

    match err {
        Error::NotFound { path } => assert_eq!(path, missing),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn blank_path_returns_invalid_path_error() {
    let err = DotEnvOptions::new()
        .with_env_files(["  "])
        .with_ignore_errors(false)
        .read()
        .expect_err("expected invalid path");

    assert!(matches!(err, Error::InvalidPath), "{err:?}");
}

#[test]
fn malformed_file_fails_even_when_ignoring_errors() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let file = dir.path().join(".env");
    write_file(&file, "A=ok\nSECRET=\"never closed\nB=2\n");

    let err = DotEnvOptions::new()
        .with_env_files([&file])
        .with_ignore_errors(true)
        .read()
        .expect_err("expected parse error");

    match err {
        Error::Parse(parse_err) => {
            assert_eq!(parse_err.key, "SECRET");
            assert_eq!(parse_err.line, 2);
            assert_eq!(parse_err.kind, ParseErrorKind::MissingClosingQuote);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn read_decodes_selected_encoding() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let file = dir.path().join(".env");
    std::fs::write(&file, b"CITY=Z\xfcrich\n").expect("failed to write test file");

    let vars = DotEnvOptions::new()
        .with_env_files([&file])
        .with_encoding(Encoding::windows_1252())
        .read()
        .expect("read should succeed");

    assert_eq!(vars.get("CITY"), Some("Zürich"));
}

#[test]
fn load_without_overwrite_skips_existing_values() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let file = dir.path().join(".env");
    write_file(&file, "A=from_file\nB=2\nEMPTY=filled\n");

    let mut target = TargetEnv::from_memory(BTreeMap::from([
        ("A".to_owned(), "existing".to_owned()),
        ("EMPTY".to_owned(), String::new()),
    ]));
    let report = DotEnvOptions::new()
        .with_env_files([&file])
        .with_overwrite_existing(false)
        .load_into(&mut target)
        .expect("load should succeed");

    assert_eq!(report.files_read, 1);
    assert_eq!(report.loaded, 2);
    assert_eq!(report.skipped_existing, 1);

    let map = target.as_memory().expect("memory target");
    assert_eq!(map.get("A").expect("A should exist"), "existing");
    assert_eq!(map.get("B").expect("B should exist"), "2");
    assert_eq!(map.get("EMPTY").expect("EMPTY should exist"), "filled");
}

#[test]
fn load_with_overwrite_replaces_values() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let file = dir.path().join(".env");
    write_file(&file, "A=from_file\n");

    let mut target =
        TargetEnv::from_memory(BTreeMap::from([("A".to_owned(), "existing".to_owned())]));
    let report = DotEnvOptions::new()
        .with_env_files([&file])
        .load_into(&mut target)
        .expect("load should succeed");

    assert_eq!(report.loaded, 1);
    assert_eq!(report.skipped_existing, 0);
    let map = target.as_memory().expect("memory target");
    assert_eq!(map.get("A").expect("A should exist"), "from_file");
}

#[test]
fn load_counts_only_files_that_exist() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let file = dir.path().join(".env");
    write_file(&file, "A=1\n");

    let mut target = TargetEnv::memory();
    let report = DotEnvOptions::new()
        .with_env_files([file, dir.path().join("missing.env")])
        .load_into(&mut target)
        .expect("load should succeed");

    assert_eq!(report.files_read, 1);
    assert_eq!(report.loaded, 1);
}

#[test]
fn probe_finds_parent_file() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let child = dir.path().join("parent").join("child");
    std::fs::create_dir_all(&child).expect("failed to create child dir");
    write_file(&dir.path().join("parent").join(".env"), "A=upward\n");

    let vars = DotEnvOptions::new()
        .with_env_files(["ignored.env"])
        .with_probe_from(&child, 1)
        .read()
        .expect("read should succeed");

    assert_eq!(vars.get("A"), Some("upward"));
}

#[test]
fn probe_miss_is_empty_or_error_by_policy() {
    let dir = TempDir::new().expect("failed to create temp dir");
    let child = dir.path().join("a").join("b");
    std::fs::create_dir_all(&child).expect("failed to create child dir");
    write_file(&dir.path().join(".env"), "A=too_far\n");

    let vars = DotEnvOptions::new()
        .with_probe_from(&child, 1)
        .read()
        .expect("read should succeed");
    assert!(vars.is_empty());

    let err = DotEnvOptions::new()
        .with_probe_from(&child, 1)
        .with_ignore_errors(false)
        .read()
        .expect_err("expected probe failure");
    match err {
        Error::ProbeNotFound { searched, .. } => {
            assert_eq!(searched, vec![child.clone(), dir.path().join("a")]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).expect("failed to write test file");
}
