//! # drushkit Error Types
//!
//! File: cli/src/core/error.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This module defines the error types used throughout drushkit. Errors fall
//! into three groups that line up with how a drush call can go wrong:
//!
//! - **Launch / I/O**: drush could not be started, or the file its output is
//!   redirected to could not be created (`Launch`, `OutputFile`).
//! - **Interruption**: the wait for drush was cancelled (`Interrupted`).
//! - **Tool failure**: drush ran but exited non-zero (`NonZeroExit`). The
//!   invoker itself only reports this through `Invocation::succeeded()`; the
//!   command layer raises this error when the configuration asks for it.
//!
//! Everything else (configuration, installation lookup, filesystem checks)
//! has its own variant so callers can match on it.
//!
//! ## Architecture
//!
//! - `DrushError`: a `thiserror` enum with the specific error kinds.
//! - `Result<T>`: a type alias for `anyhow::Result<T>` so context can be added
//!   freely with `.context(...)` while still allowing `downcast_ref::<DrushError>()`.
//!
//! ## Examples
//!
//! ```rust
//! // Inspect the kind of failure behind an anyhow error
//! match invoker.make(manifest, dest).await {
//!     Ok(invocation) if invocation.succeeded() => println!("built"),
//!     Ok(invocation) => println!("drush exited with {:?}", invocation.exit_code()),
//!     Err(e) if matches!(e.downcast_ref::<DrushError>(), Some(DrushError::Interrupted { .. })) => {
//!         println!("cancelled");
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```
//!
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for drushkit.
#[derive(Error, Debug)]
pub enum DrushError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Drush installation error: {0}")]
    Installation(String),

    #[error("Failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Interrupted while waiting for: {command}")]
    Interrupted { command: String },

    #[error("Failed to open output file {path}: {source}")]
    OutputFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Drush exited with {code}: {command}")]
    NonZeroExit { command: String, code: String },
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let config_err = DrushError::Config("db_url must contain '://'".to_string());
        assert_eq!(
            config_err.to_string(),
            "Configuration error: db_url must contain '://'"
        );

        let interrupted = DrushError::Interrupted {
            command: "drush --yes make".into(),
        };
        assert_eq!(
            interrupted.to_string(),
            "Interrupted while waiting for: drush --yes make"
        );

        let exit = DrushError::NonZeroExit {
            command: "drush --yes pm-enable views".into(),
            code: "exit status 3".into(),
        };
        assert_eq!(
            exit.to_string(),
            "Drush exited with exit status 3: drush --yes pm-enable views"
        );
    }

    #[test]
    fn test_launch_error_keeps_source() {
        use std::error::Error as _;
        let err = DrushError::Launch {
            program: "drush".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().starts_with("Failed to launch 'drush'"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_downcast_from_anyhow() {
        let err: anyhow::Error = DrushError::Installation("drush not found".into()).into();
        assert!(matches!(
            err.downcast_ref::<DrushError>(),
            Some(DrushError::Installation(_))
        ));
    }
}
