//! # drushkit Test Run Command
//!
//! File: cli/src/commands/test_run.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Implements `drushkit test-run`, which runs simpletest tests through
//! `drush test-run` and asks for JUnit-style XML results in an output
//! directory. The results are left for the CI host to pick up; they are not
//! parsed here.
//!
//! ## Test selection
//!
//! 1. `--all` runs everything.
//! 2. Otherwise, if `--methods` or any test case names are given, exactly
//!    those are run.
//! 3. Otherwise the `[tests]` configuration decides, falling back to the
//!    built-in default (`--methods=testSettingsPage AggregatorConfigurationTestCase`).
//!
//! ```bash
//! drushkit test-run --uri http://localhost:8080
//! drushkit test-run --methods testLogin,testLogout UserLoginTestCase
//! drushkit test-run --all --output-dir build/junit
//! ```
//!
use super::context::{non_empty_name, GlobalArgs, JobContext};
use crate::common::drush::TestSelection;
use crate::core::error::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
pub struct TestRunArgs {
    /// Directory drush writes XML results to. Overrides tests.output_dir.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Site URI passed as --uri. Overrides site.uri.
    #[arg(long)]
    uri: Option<String>,

    /// Run all tests.
    #[arg(long, conflicts_with_all = ["methods", "cases"])]
    all: bool,

    /// Comma-separated test methods to restrict to.
    #[arg(long, value_delimiter = ',', value_parser = non_empty_name)]
    methods: Vec<String>,

    /// Test case classes to run.
    #[arg(value_parser = non_empty_name)]
    cases: Vec<String>,
}

impl TestRunArgs {
    /// The selection given on the command line, if any.
    fn selection(&self) -> Option<TestSelection> {
        if self.all {
            Some(TestSelection::All)
        } else if !self.methods.is_empty() || !self.cases.is_empty() {
            Some(TestSelection::Cases {
                methods: self.methods.clone(),
                cases: self.cases.clone(),
            })
        } else {
            None
        }
    }
}

pub async fn handle_test_run(args: TestRunArgs, global: &GlobalArgs) -> Result<()> {
    info!("Handling test-run command...");
    let ctx = JobContext::load(global)?;

    let selection = args
        .selection()
        .unwrap_or_else(|| ctx.config.tests.selection());
    let uri = args
        .uri
        .clone()
        .or_else(|| ctx.config.site.uri.clone())
        .unwrap_or_default();
    let output_dir = ctx.output_dir(
        &args
            .output_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(&ctx.config.tests.output_dir)),
    )?;

    let invocation = ctx.invoker.test_run(&output_dir, &uri, &selection).await?;
    if !ctx.dry_run {
        println!("Test results requested in {}", output_dir.display());
    }
    ctx.finish(invocation)
}
