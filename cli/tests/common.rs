//! # drushkit CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared helpers for the integration test files. Every test runs the
//! compiled `drushkit` binary inside its own temporary directory, with the
//! user configuration directory pointed into that directory and the
//! `DRUSHKIT_*` variables cleared, so the machine running the tests cannot
//! leak settings in.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A `drushkit` command that runs in `dir` with an isolated environment.
pub fn drushkit_cmd(dir: &Path) -> Command {
    let mut cmd =
        Command::cargo_bin("drushkit").expect("Failed to find drushkit binary for testing");
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    for var in ["DRUSHKIT_ROOT", "DRUSHKIT_WORKDIR", "DRUSHKIT_DRUSH", "DRUSHKIT_CONFIG"] {
        cmd.env_remove(var);
    }
    cmd
}

/// Same environment as [`drushkit_cmd`], as a plain process for tests that
/// need to signal it while it runs.
pub fn drushkit_process(dir: &Path) -> std::process::Command {
    let bin = assert_cmd::cargo::cargo_bin("drushkit");
    let mut cmd = std::process::Command::new(bin);
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir.join(".config"))
        .env_remove("RUST_LOG");
    for var in ["DRUSHKIT_ROOT", "DRUSHKIT_WORKDIR", "DRUSHKIT_DRUSH", "DRUSHKIT_CONFIG"] {
        cmd.env_remove(var);
    }
    cmd
}

/// A scratch job workspace. The `.git` directory stops the project
/// configuration search from walking above it.
pub fn workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::create_dir(dir.path().join(".git")).expect("Failed to create .git");
    dir
}

/// Writes `.drushkit.toml` into the workspace.
pub fn write_project_config(dir: &Path, content: &str) {
    fs::write(dir.join(".drushkit.toml"), content).expect("Failed to write .drushkit.toml");
}

/// Installs a stand-in for drush that records its arguments (one per line)
/// in `$FAKE_DRUSH_LOG`, prints a checkstyle document on stdout, a warning
/// on stderr, and exits with `$FAKE_DRUSH_EXIT` (default 0).
///
/// With `$FAKE_DRUSH_SLEEP` set it instead writes its pid to
/// `$FAKE_DRUSH_LOG.pid` and sleeps that many seconds.
#[cfg(unix)]
pub fn fake_drush(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let bin = dir.join("bin");
    fs::create_dir_all(&bin).expect("Failed to create bin dir");
    let path = bin.join("drush");
    fs::write(
        &path,
        r#"#!/bin/sh
printf '%s\n' "$@" > "$FAKE_DRUSH_LOG"
if [ -n "$FAKE_DRUSH_SLEEP" ]; then
    echo $$ > "$FAKE_DRUSH_LOG.pid.tmp"
    mv "$FAKE_DRUSH_LOG.pid.tmp" "$FAKE_DRUSH_LOG.pid"
    exec sleep "$FAKE_DRUSH_SLEEP"
fi
echo '<checkstyle version="5.0"></checkstyle>'
echo 'drush warning: noise on stderr' >&2
exit "${FAKE_DRUSH_EXIT:-0}"
"#,
    )
    .expect("Failed to write fake drush");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake drush executable");
    path
}

/// The arguments the fake drush received, program excluded.
pub fn recorded_args(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .expect("Fake drush did not run")
        .lines()
        .map(str::to_string)
        .collect()
}
