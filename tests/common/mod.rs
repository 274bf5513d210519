//! Common test utilities for plang integration tests.
//!
//! Each test file is compiled as a separate crate, so not all helpers are
//! used in every file.
#![allow(dead_code)]

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

/// Path to the `plang` binary built by cargo for this test run.
pub fn plang_binary() -> String {
    env!("CARGO_BIN_EXE_plang").to_string()
}

fn write_source(source: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temp source file");
    file.write_all(source.as_bytes()).expect("failed to write temp source file");
    file
}

/// Runs `source` through the `plang` binary and returns the raw process
/// output (stdout, stderr, exit status).
pub fn run_source_raw(source: &str) -> Output {
    let file = write_source(source);
    Command::new(plang_binary())
        .arg(file.path())
        .output()
        .expect("failed to run plang binary")
}

/// Runs `source` and returns stdout as a string. Panics if the program did
/// not exit successfully.
pub fn run_source(source: &str) -> String {
    let output = run_source_raw(source);
    assert!(
        output.status.success(),
        "program failed (exit {:?}):\nstdout: {}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Runs `source` expecting a non-zero exit, returning (stdout, stderr).
pub fn run_source_expect_failure(source: &str) -> (String, String) {
    let output = run_source_raw(source);
    assert!(!output.status.success(), "expected failure but program exited successfully");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

/// Runs `source` with extra CLI args (e.g. `--max-loop-iterations`) and
/// returns (stdout, stderr, success).
pub fn run_source_with_args(source: &str, args: &[&str]) -> (String, String, bool) {
    let file = write_source(source);
    let output = Command::new(plang_binary())
        .args(args)
        .arg(file.path())
        .output()
        .expect("failed to run plang binary");
    (
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

/// Checks `source` with `--check` and returns whether it parsed cleanly.
pub fn check_source(source: &str) -> bool {
    let file = write_source(source);
    let status = Command::new(plang_binary())
        .arg("--check")
        .arg(file.path())
        .status()
        .expect("failed to run plang binary");
    status.success()
}

pub fn stdout_lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

pub fn source_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}
