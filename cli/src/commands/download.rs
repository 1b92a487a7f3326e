//! # drushkit Download Command
//!
//! File: cli/src/commands/download.rs
//! Author: Christi Mahu
//!
//! Implements `drushkit download`: `drush pm-download <projects...>`, with
//! `--destination=<dir>` only when a destination is given. Without one drush
//! picks its default location under the site root.
//!
//! ```bash
//! drushkit download views ctools
//! drushkit download coder --destination sites/all/modules/contrib
//! ```
//!
use super::context::{non_empty_name, GlobalArgs, JobContext};
use crate::core::error::Result;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
pub struct DownloadArgs {
    /// Projects to download, in order.
    #[arg(required = true, num_args = 1.., value_parser = non_empty_name)]
    projects: Vec<String>,

    /// Where to put the projects. Empty means drush's default.
    #[arg(long, default_value = "")]
    destination: String,
}

pub async fn handle_download(args: DownloadArgs, global: &GlobalArgs) -> Result<()> {
    info!("Handling download command for {:?}", args.projects);
    let ctx = JobContext::load(global)?;
    let invocation = ctx
        .invoker
        .download(&args.projects, &args.destination)
        .await?;
    ctx.finish(invocation)
}
