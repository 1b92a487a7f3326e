//! # drushkit Main Entry Point
//!
//! File: cli/src/main.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! This file serves as the main entry point for the drushkit CLI, a thin
//! wrapper a CI build job calls to drive drush. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the matching command handler
//!
//! ## Examples
//!
//! ```bash
//! # Build, install and review a site from a CI job
//! drushkit --root build/drupal make site.make build/drupal
//! drushkit --root build/drupal site-install --db-url mysql://ci:ci@localhost/ci
//! drushkit --root build/drupal coder-review --reviews style,i18n views
//!
//! # Show what would run, with debug logging
//! drushkit -vv --dry-run test-run --all
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level (logs go to stderr, drush output to stdout)
//! 3. Route to the command handler, which runs exactly one drush call
//! 4. Report any error and exit with status 1
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // One module per drush subcommand
mod common; // Process execution, drush invocation, filesystem helpers
mod core; // Errors and configuration

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "drushkit",
    about = "Run drush build, install, test and review steps from a CI job",
    long_about = "Wraps drush for CI build jobs: assemble a codebase from a make file,\n\
                  install the site, download and enable projects, run tests with XML\n\
                  results, and write a checkstyle coder review.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[command(flatten)]
    global: commands::context::GlobalArgs,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// All available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a codebase from a drush make manifest.
    Make(commands::make::MakeArgs),
    /// Install the site against a database.
    SiteInstall(commands::site_install::SiteInstallArgs),
    /// Download projects.
    #[command(alias = "dl")]
    Download(commands::download::DownloadArgs),
    /// Enable extensions.
    #[command(alias = "en")]
    Enable(commands::enable::EnableArgs),
    /// Run tests and write XML results.
    TestRun(commands::test_run::TestRunArgs),
    /// Review code and write checkstyle XML.
    CoderReview(commands::coder_review::CoderReviewArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let global = &cli.global;
    let command_result = match cli.command {
        Commands::Make(args) => commands::make::handle_make(args, global).await,
        Commands::SiteInstall(args) => {
            commands::site_install::handle_site_install(args, global).await
        }
        Commands::Download(args) => commands::download::handle_download(args, global).await,
        Commands::Enable(args) => commands::enable::handle_enable(args, global).await,
        Commands::TestRun(args) => commands::test_run::handle_test_run(args, global).await,
        Commands::CoderReview(args) => {
            commands::coder_review::handle_coder_review(args, global).await
        }
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
