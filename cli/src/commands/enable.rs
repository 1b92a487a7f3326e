//! # drushkit Enable Command
//!
//! File: cli/src/commands/enable.rs
//! Author: Christi Mahu
//!
//! Implements `drushkit enable`: `drush pm-enable <extensions>`. The
//! extension list is one argument and reaches drush unchanged, so join names
//! the way drush expects (`views,ctools`).
//!
use super::context::{GlobalArgs, JobContext};
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct EnableArgs {
    /// Extensions to enable, as a single argument (e.g. "views,ctools").
    #[arg(required = true)]
    extensions: String,
}

pub async fn handle_enable(args: EnableArgs, global: &GlobalArgs) -> Result<()> {
    info!("Handling enable command for '{}'", args.extensions);
    let ctx = JobContext::load(global)?;
    let invocation = ctx.invoker.enable(&args.extensions).await?;
    ctx.finish(invocation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enable_args_parsing() {
        let args = EnableArgs::try_parse_from(["enable", "views,ctools"]).unwrap();
        assert_eq!(args.extensions, "views,ctools");
        assert!(EnableArgs::try_parse_from(["enable", "views", "ctools"]).is_err());
    }
}
