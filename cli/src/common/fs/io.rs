//! # drushkit Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//! Author: Christi Mahu
//!

//! ## Overview
//!
//! Small wrappers around `std::fs` used around drush calls:
//!
//! - **`ensure_dir_exists`**: creates an output directory (`mkdir -p`) before
//!   drush is asked to write results into it, and rejects a path that exists
//!   but is a file.
//! - **`read_file_to_string`**: reads a file with the path in the error context.
//!   Used by configuration loading.
//! - **`absolute_path`**: resolves a possibly relative path against a base
//!   directory. Drush runs with the working directory set to the job workspace,
//!   so `--xml=` and `--root=` values are made absolute first.
//!
//! ```rust
//! use crate::common::fs::io;
//! # fn run_example() -> crate::core::error::Result<()> {
//! let workspace = std::path::Path::new("/var/lib/ci/job-42");
//! let out = io::absolute_path(std::path::Path::new("build/tests"), workspace);
//! io::ensure_dir_exists(&out)?; // /var/lib/ci/job-42/build/tests
//! # Ok(())
//! # }
//! ```
//!
use crate::core::error::{DrushError, Result};
use anyhow::Context;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Ensures that a directory exists at the specified path, creating it and any
/// missing parents.
///
/// # Errors
///
/// Returns an `Err` if:
/// - The path exists but is not a directory.
/// - Creating the directory fails (e.g., due to permissions).
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(DrushError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Resolves `path` against `base` when it is relative, then removes `.` and
/// `..` components lexically. The filesystem is not consulted, so the path
/// does not have to exist yet.
pub fn absolute_path(path: &Path, base: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // Popping past the root is a no-op, like `cd /..`.
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
