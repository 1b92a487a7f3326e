//! # drushkit Drush Installation
//!
//! File: cli/src/common/drush/installation.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Which drush executable to run. The value comes from configuration (or
//! `--drush` / `DRUSHKIT_DRUSH`) and is handed to the invoker explicitly; there
//! is no process-wide default installation.
//!
//! `resolve` turns the configured value into a path:
//! - A value with a directory part (`/opt/drush/drush`, `vendor/bin/drush`)
//!   must point at an existing file.
//! - A bare name (`drush`) is looked up on `PATH` with the `which` crate.
//!
use crate::core::error::{DrushError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Executable name used when nothing is configured.
pub const DEFAULT_DRUSH_EXE: &str = "drush";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrushInstallation {
    exe: String,
}

impl Default for DrushInstallation {
    fn default() -> Self {
        Self::new(DEFAULT_DRUSH_EXE)
    }
}

impl DrushInstallation {
    pub fn new(exe: impl Into<String>) -> Self {
        Self { exe: exe.into() }
    }

    /// The configured value, unresolved.
    pub fn exe(&self) -> &str {
        &self.exe
    }

    /// Resolves the executable, relative paths against `base`.
    pub fn resolve(&self, base: &Path) -> Result<PathBuf> {
        if self.exe.trim().is_empty() {
            return Err(DrushError::Installation("drush executable is empty".to_string()).into());
        }

        let configured = Path::new(&self.exe);
        if configured.components().count() > 1 {
            let path = crate::common::fs::io::absolute_path(configured, base);
            if !path.is_file() {
                return Err(DrushError::Installation(format!(
                    "drush executable not found at {}",
                    path.display()
                ))
                .into());
            }
            debug!("Using drush at {}", path.display());
            return Ok(path);
        }

        let path = which::which(&self.exe).map_err(|e| {
            DrushError::Installation(format!("'{}' not found on PATH: {}", self.exe, e))
        })?;
        debug!("Resolved '{}' on PATH to {}", self.exe, path.display());
        Ok(path)
    }
}
