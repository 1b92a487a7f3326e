//! # drushkit Drush Interface (`common::drush`)
//!
//! File: cli/src/common/drush/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Everything needed to call drush from a build job, without reimplementing
//! any of drush itself.
//!
//! ## Architecture
//!
//! - **`args`**: `ArgumentList`, the ordered argv built for each call.
//! - **`installation`**: `DrushInstallation`, the configured drush executable and its resolution.
//! - **`invoker`**: `Invoker`, one method per supported drush subcommand, plus
//!   `Invocation` (the result) and `TestSelection`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::drush::{DrushInstallation, Invoker};
//! use crate::common::process::ProcessLauncher;
//!
//! # async fn run_example() -> crate::core::error::Result<()> {
//! let workdir = std::env::current_dir()?;
//! let exe = DrushInstallation::default().resolve(&workdir)?;
//! let invoker = Invoker::new(exe.to_string_lossy(), "/var/www/site", &workdir, Box::new(ProcessLauncher));
//! let invocation = invoker.download(&["views", "ctools"], "").await?;
//! assert!(invocation.succeeded());
//! # Ok(())
//! # }
//! ```
//!

/// Argument list construction.
pub mod args;
/// Drush executable configuration and lookup.
pub mod installation;
/// The drush command façade.
pub mod invoker;

pub use installation::DrushInstallation;
pub use invoker::{Invocation, Invoker, TestSelection};
