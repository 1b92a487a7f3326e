//! # drushkit Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! One module per drushkit subcommand, each mapping to a single drush call.
//! `main.rs` parses the arguments and calls the matching `handle_*` function.
//!
//! ## Architecture
//!
//! - Each subcommand module defines a Clap `Parser` struct for its own
//!   arguments and an async `handle_*` function.
//! - `context` holds what they share: the global flags (`GlobalArgs`) and the
//!   `JobContext` that loads configuration, builds the `Invoker`, and applies
//!   the exit code policy.
//!
//! ## Commands
//!
//! - `make`: `drush make`
//! - `site_install`: `drush site-install`
//! - `download`: `drush pm-download`
//! - `enable`: `drush pm-enable`
//! - `test_run`: `drush test-run`
//! - `coder_review`: `drush coder-review`
//!

/// `drushkit coder-review`: checkstyle review written to coder_review.xml.
pub mod coder_review;
/// Shared global options and job setup.
pub mod context;
/// `drushkit download`: download projects with pm-download.
pub mod download;
/// `drushkit enable`: enable extensions with pm-enable.
pub mod enable;
/// `drushkit make`: build a codebase from a make manifest.
pub mod make;
/// `drushkit site-install`: install the site against a database.
pub mod site_install;
/// `drushkit test-run`: run simpletest tests with XML results.
pub mod test_run;
