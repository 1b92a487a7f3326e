//! # drushkit Make Command
//!
//! File: cli/src/commands/make.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `drushkit make`, which assembles a site codebase from a drush
//! make manifest by running `drush make <manifest> <destination>`. Drush
//! output is streamed to the job log.
//!
//! ```bash
//! drushkit make build.make /var/www/site
//! drushkit --root /var/www/site make build.make /var/www/site
//! ```
//!
use super::context::{GlobalArgs, JobContext};
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

/// Arguments for the `make` subcommand.
#[derive(Parser, Debug)]
pub struct MakeArgs {
    /// The drush make manifest (makefile) to build from.
    #[arg(required = true)]
    manifest: String,

    /// Directory the codebase is built into.
    #[arg(required = true)]
    destination: String,
}

/// # Handle Make Command (`handle_make`)
///
/// Builds the invoker from the global options and configuration, runs
/// `drush make`, and applies the configured exit code policy.
pub async fn handle_make(args: MakeArgs, global: &GlobalArgs) -> Result<()> {
    info!(
        "Handling make command (manifest: {}, destination: {})",
        args.manifest, args.destination
    );
    let ctx = JobContext::load(global)?;
    let invocation = ctx
        .invoker
        .make(&args.manifest, &args.destination)
        .await?;
    ctx.finish(invocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_args_parsing() {
        let args = MakeArgs::try_parse_from(["make", "site.make", "build"]).unwrap();
        assert_eq!(args.manifest, "site.make");
        assert_eq!(args.destination, "build");
    }

    #[test]
    fn test_make_args_requires_destination() {
        assert!(MakeArgs::try_parse_from(["make", "site.make"]).is_err());
    }
}
