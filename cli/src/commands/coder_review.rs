//! # drushkit Coder Review Command
//!
//! File: cli/src/commands/coder_review.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `drushkit coder-review`, a static analysis pass over Drupal
//! projects through `drush coder-review --checkstyle`. The checkstyle XML is
//! written to `<output-dir>/coder_review.xml` for a downstream checkstyle
//! publisher. Drush's stderr is dropped for this call so the file stays valid
//! XML, which also means nothing of the review shows up in the job log.
//!
//! A project named `comment` is silently left out: drush cannot tell it apart
//! from its own `--comment` option.
//!
//! ```bash
//! drushkit coder-review --reviews style,i18n views token
//! ```
//!
use super::context::{non_empty_name, GlobalArgs, JobContext};
use crate::common::drush::invoker::CODER_REVIEW_FILE;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
pub struct CoderReviewArgs {
    /// Directory for coder_review.xml. Overrides review.output_dir.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Comma-separated review categories (style, i18n, security, ...). Overrides review.reviews.
    #[arg(long, value_delimiter = ',', value_parser = non_empty_name)]
    reviews: Vec<String>,

    /// Projects to review. Overrides review.projects.
    #[arg(value_parser = non_empty_name)]
    projects: Vec<String>,
}

pub async fn handle_coder_review(args: CoderReviewArgs, global: &GlobalArgs) -> Result<()> {
    info!("Handling coder-review command...");
    let ctx = JobContext::load(global)?;

    let reviews = if args.reviews.is_empty() {
        ctx.config.review.reviews.clone()
    } else {
        args.reviews
    };
    let projects = if args.projects.is_empty() {
        ctx.config.review.projects.clone()
    } else {
        args.projects
    };
    if projects.is_empty() {
        warn!("No projects given; coder-review will use drush's default target.");
    }
    let output_dir = ctx.output_dir(
        &args
            .output_dir
            .unwrap_or_else(|| PathBuf::from(&ctx.config.review.output_dir)),
    )?;

    let invocation = ctx
        .invoker
        .coder_review(&output_dir, &reviews, &projects)
        .await?;
    if !ctx.dry_run {
        println!(
            "Coder review written to {}",
            output_dir.join(CODER_REVIEW_FILE).display()
        );
    }
    ctx.finish(invocation)
}
