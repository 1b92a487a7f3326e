//! # drushkit Process Execution (`common::process`)
//!
//! File: cli/src/common/process.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The single execute primitive every drush operation funnels through. A
//! caller describes one child process with a [`LaunchRequest`]: the program,
//! its arguments, the working directory, where stdout goes ([`OutputSink`])
//! and what happens to stderr ([`ErrorPolicy`]). A [`Launcher`] starts it and
//! waits for it to exit.
//!
//! ## Architecture
//!
//! - **`Launcher`**: async trait so the invoker can be driven by a real process
//!   launcher in production and a recording launcher in tests.
//! - **`ProcessLauncher`**: spawns with `tokio::process::Command`. It listens
//!   for Ctrl-C from just before the spawn until the child exits; on
//!   interruption the child is killed and `DrushError::Interrupted` is
//!   returned. A redirect file is removed again if the spawn fails.
//! - **`DryRunLauncher`**: prints the command line instead of running it and
//!   reports a successful exit.
//! - **`ExitOutcome`**: the child's exit code (or `None` when killed by a
//!   signal). Completion is never an error at this level, whatever the code.
//!
//! The two output modes used by drush calls:
//!
//! | Mode | stdout | stderr |
//! |------|--------|--------|
//! | default | `OutputSink::Log` (our stdout, the job log) | `ErrorPolicy::Forward` |
//! | redirected | `OutputSink::File(path)` | `ErrorPolicy::Discard` |
//!
//! Stderr is discarded in redirected mode because the file must contain only
//! the tool's XML.
//!
use crate::core::error::{DrushError, Result};
use anyhow::Context;
use async_trait::async_trait;
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Destination for a child's standard output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Forward to the live job log (the invoking process's stdout).
    Log,
    /// Write exclusively to this file, truncating it first.
    File(PathBuf),
}

/// What happens to a child's standard error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    Forward,
    Discard,
}

/// Everything needed to start one child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
    pub sink: OutputSink,
    pub errors: ErrorPolicy,
}

impl LaunchRequest {
    /// Renders the program and arguments as a single shell-like line for logs
    /// and error messages.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(quote_arg)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Quotes an argument for display if it is empty or contains whitespace or quotes.
pub fn quote_arg(arg: &str) -> String {
    if arg.is_empty() || arg.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("'{}'", arg.replace('\'', r"'\''"))
    } else {
        arg.to_string()
    }
}

/// How a child process finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitOutcome {
    code: Option<i32>,
}

impl ExitOutcome {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {}", code),
            None => write!(f, "termination by signal"),
        }
    }
}

/// Starts a child process and waits for it to exit.
#[async_trait]
pub trait Launcher: Send + Sync {
    async fn launch(&self, request: &LaunchRequest) -> Result<ExitOutcome>;
}

/// Runs requests as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

#[async_trait]
impl Launcher for ProcessLauncher {
    async fn launch(&self, request: &LaunchRequest) -> Result<ExitOutcome> {
        let command_line = request.command_line();
        info!("Running: {}", command_line);
        debug!(
            "cwd={}, sink={:?}, errors={:?}",
            request.cwd.display(),
            request.sink,
            request.errors
        );

        let stdout = match &request.sink {
            OutputSink::Log => Stdio::inherit(),
            OutputSink::File(path) => {
                let file = std::fs::File::create(path).map_err(|source| DrushError::OutputFile {
                    path: path.clone(),
                    source,
                })?;
                Stdio::from(file)
            }
        };
        let stderr = match request.errors {
            ErrorPolicy::Forward => Stdio::inherit(),
            ErrorPolicy::Discard => Stdio::null(),
        };

        let interrupt = listen_for_interrupt();
        let mut child = Command::new(&request.program)
            .args(&request.args)
            .current_dir(&request.cwd)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr)
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| {
                if let OutputSink::File(path) = &request.sink {
                    discard_output_file(path);
                }
                DrushError::Launch {
                    program: request.program.clone(),
                    source,
                }
            })?;

        tokio::select! {
            status = child.wait() => {
                let status = status
                    .with_context(|| format!("Failed while waiting for '{}'", request.program))?;
                let outcome = ExitOutcome::from(status);
                debug!("'{}' finished with {}", request.program, outcome);
                Ok(outcome)
            }
            _ = interrupt => {
                warn!("Interrupted, killing: {}", command_line);
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill interrupted child: {}", e);
                }
                Err(DrushError::Interrupted { command: command_line }.into())
            }
        }
    }
}

/// Starts listening for Ctrl-C right away and resolves once it arrives.
/// Never resolves when the signal handler cannot be installed.
#[cfg(unix)]
fn listen_for_interrupt() -> impl Future<Output = ()> {
    use tokio::signal::unix::{signal, SignalKind};

    let listener = signal(SignalKind::interrupt());
    async move {
        match listener {
            Ok(mut sigint) => {
                sigint.recv().await;
            }
            Err(e) => {
                warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(not(unix))]
fn listen_for_interrupt() -> impl Future<Output = ()> {
    let listener = tokio::signal::windows::ctrl_c();
    async move {
        match listener {
            Ok(mut ctrl_c) => {
                ctrl_c.recv().await;
            }
            Err(e) => {
                warn!("Cannot listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }
}

/// Removes an output file that was created for a child that never started.
fn discard_output_file(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        debug!("Could not remove {}: {}", path.display(), e);
    }
}

/// Prints the command line instead of running it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunLauncher;

#[async_trait]
impl Launcher for DryRunLauncher {
    async fn launch(&self, request: &LaunchRequest) -> Result<ExitOutcome> {
        let command_line = request.command_line();
        info!("Dry run, not executing: {}", command_line);
        match &request.sink {
            OutputSink::Log => println!("{}", command_line),
            OutputSink::File(path) => println!("{} > {}", command_line, path.display()),
        }
        Ok(ExitOutcome::from_code(0))
    }
}
