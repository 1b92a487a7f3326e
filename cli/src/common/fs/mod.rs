//! # drushkit Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Filesystem helpers used around drush calls: making output directories,
//! reading configuration files, and turning relative paths into absolute ones
//! against the job's working directory. Everything lives in the `io` submodule.
//!

/// Basic file I/O and path resolution (`ensure_dir_exists`, `read_file_to_string`, `absolute_path`).
pub mod io;
