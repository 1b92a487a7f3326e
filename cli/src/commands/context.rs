//! # drushkit Job Context
//!
//! File: cli/src/commands/context.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Shared setup for every subcommand: the global flags, the merged
//! configuration, and the `Invoker` built from both. Also decides whether a
//! finished drush call counts as a failed command.
//!
//! Resolution order for each setting is flag / env var, then configuration,
//! then default:
//!
//! | Setting | Flag | Env | Config | Default |
//! |---------|------|-----|--------|---------|
//! | working directory | `--workdir` | `DRUSHKIT_WORKDIR` | `site.workdir` | current directory |
//! | Drupal root | `--root` | `DRUSHKIT_ROOT` | `site.root` | working directory |
//! | drush | `--drush` | `DRUSHKIT_DRUSH` | `installation.drush_exe` | `drush` |
//!
//! Relative paths are resolved against the current directory (workdir) or the
//! working directory (root, output directories).
//!
use crate::common::drush::{DrushInstallation, Invocation, Invoker};
use crate::common::fs::io::{absolute_path, ensure_dir_exists};
use crate::common::process::{DryRunLauncher, Launcher, ProcessLauncher};
use crate::core::config::{self, Config};
use crate::core::error::{DrushError, Result};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Options accepted by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Drupal root passed to drush as --root.
    #[arg(long, global = true, env = "DRUSHKIT_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory drush runs in (the job workspace).
    #[arg(long, global = true, env = "DRUSHKIT_WORKDIR")]
    pub workdir: Option<PathBuf>,

    /// Drush executable: a name on PATH or a path.
    #[arg(long, global = true, env = "DRUSHKIT_DRUSH")]
    pub drush: Option<String>,

    /// Configuration file to use instead of searching for .drushkit.toml.
    #[arg(long, global = true, env = "DRUSHKIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print the drush command line instead of running it.
    #[arg(long, global = true)]
    pub dry_run: bool,
}

/// clap value parser for names passed to drush one by one (projects, test
/// cases, review categories). Blank names are rejected, as in configuration.
pub fn non_empty_name(value: &str) -> std::result::Result<String, String> {
    if value.trim().is_empty() {
        Err("names cannot be empty".to_string())
    } else {
        Ok(value.to_string())
    }
}

/// Everything a subcommand needs to run drush once.
pub struct JobContext {
    pub config: Config,
    pub invoker: Invoker,
    pub dry_run: bool,
}

impl JobContext {
    /// Loads configuration and builds the invoker.
    pub fn load(global: &GlobalArgs) -> Result<Self> {
        let config = config::load_config(global.config.as_deref())?;
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::from_config(global, config, &cwd)
    }

    fn from_config(global: &GlobalArgs, config: Config, cwd: &Path) -> Result<Self> {
        let workdir = global
            .workdir
            .clone()
            .or_else(|| config.site.workdir.as_ref().map(PathBuf::from))
            .map(|dir| absolute_path(&dir, cwd))
            .unwrap_or_else(|| cwd.to_path_buf());
        let root = global
            .root
            .clone()
            .or_else(|| config.site.root.as_ref().map(PathBuf::from))
            .map(|dir| absolute_path(&dir, &workdir))
            .unwrap_or_else(|| workdir.clone());

        let installation = DrushInstallation::new(
            global
                .drush
                .clone()
                .unwrap_or_else(|| config.installation.drush_exe.clone()),
        );
        let (exe, launcher): (PathBuf, Box<dyn Launcher>) = if global.dry_run {
            let exe = installation.resolve(&workdir).unwrap_or_else(|e| {
                debug!("Dry run with unresolved drush: {:#}", e);
                PathBuf::from(installation.exe())
            });
            (exe, Box::new(DryRunLauncher))
        } else {
            (installation.resolve(&workdir)?, Box::new(ProcessLauncher))
        };

        let invoker = Invoker::new(exe.to_string_lossy(), root, workdir, launcher);
        debug!(
            "drush={}, root={}, workdir={}",
            exe.display(),
            invoker.root().display(),
            invoker.workdir().display()
        );
        Ok(Self {
            invoker,
            config,
            dry_run: global.dry_run,
        })
    }

    /// Resolves an output directory against the working directory and creates
    /// it, except in a dry run.
    pub fn output_dir(&self, dir: &Path) -> Result<PathBuf> {
        let dir = absolute_path(dir, self.invoker.workdir());
        if !self.dry_run {
            ensure_dir_exists(&dir)?;
        }
        Ok(dir)
    }

    /// Turns a finished call into the command's result according to
    /// `invocation.fail_on_nonzero_exit`.
    pub fn finish(&self, invocation: Invocation) -> Result<()> {
        debug!("drush exit code: {:?}", invocation.exit_code());
        if invocation.succeeded() {
            info!("drush succeeded: {}", invocation.command);
            return Ok(());
        }
        if self.config.invocation.fail_on_nonzero_exit {
            return Err(DrushError::NonZeroExit {
                command: invocation.command.to_string(),
                code: invocation.outcome.to_string(),
            }
            .into());
        }
        warn!(
            "Ignoring drush {} (fail_on_nonzero_exit = false): {}",
            invocation.outcome, invocation.command
        );
        Ok(())
    }
}
