//! # drushkit Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared building blocks used by the command handlers, kept apart from the
//! command-specific logic in `commands::` and the infrastructure in `core::`.
//!
//! - **`drush`**: the drush façade (`Invoker`), argument lists, and installation lookup.
//! - **`fs`**: directory creation, file reading, absolute path resolution.
//! - **`process`**: the execute primitive (`Launcher`, output sinks, error policy).
//!
//! ```rust
//! use crate::common::{drush, fs, process};
//! ```
//!

/// The drush command façade.
pub mod drush;
/// Filesystem helpers.
pub mod fs;
/// Launching child processes and waiting for them.
pub mod process;
