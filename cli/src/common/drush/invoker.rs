//! # drushkit Drush Invoker
//!
//! File: cli/src/common/drush/invoker.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! The façade over drush. One [`Invoker`] is built per job from an explicit
//! executable, the site root, and the working directory. Each public method
//! turns one build or test intent into exactly one drush call:
//!
//! | Method | drush subcommand |
//! |--------|------------------|
//! | `make` | `make <manifest> <destination>` |
//! | `site_install` | `site-install <profile> --db-url=<url>` |
//! | `download` | `pm-download <projects...> [--destination=<dir>]` |
//! | `enable` | `pm-enable <extensions>` |
//! | `test_run` | `test-run [--uri=<uri>] <selection> --xml=<dir>` |
//! | `coder_review` | `coder-review --minor --ignores-pass --checkstyle --reviews=<list> <projects...>` |
//!
//! Every call starts with `<exe> --yes --nocolor --root=<root>`, runs in the
//! working directory, and waits until drush exits.
//!
//! ## Results
//!
//! A call that launches and finishes returns `Ok(Invocation)` whatever the exit
//! code; [`Invocation::succeeded`] tells the two apart. Launch failures and
//! interruption come back as errors (see `common::process`). Whether a non-zero
//! exit fails the job is decided by the caller.
//!
//! ## Output
//!
//! All calls forward stdout to the job log, except `coder_review`, which writes
//! stdout to `<output_dir>/coder_review.xml` and discards stderr so the file
//! holds nothing but checkstyle XML.
//!
use super::args::ArgumentList;
use crate::common::fs::io::absolute_path;
use crate::common::process::{ErrorPolicy, ExitOutcome, LaunchRequest, Launcher, OutputSink};
use crate::core::error::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File name coder-review output is written to, inside the output directory.
pub const CODER_REVIEW_FILE: &str = "coder_review.xml";

/// `drush coder-review comment` fails with "use --reviews or --comment", so a
/// project with this name is never passed through.
const AMBIGUOUS_REVIEW_PROJECT: &str = "comment";

/// Which tests `test_run` asks drush to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestSelection {
    /// `--all`
    All,
    /// `--methods=<m1,m2>` (omitted when empty) followed by each test case name.
    Cases {
        methods: Vec<String>,
        cases: Vec<String>,
    },
}

impl Default for TestSelection {
    fn default() -> Self {
        TestSelection::Cases {
            methods: vec!["testSettingsPage".to_string()],
            cases: vec!["AggregatorConfigurationTestCase".to_string()],
        }
    }
}

impl TestSelection {
    fn append_to(&self, args: &mut ArgumentList) {
        match self {
            TestSelection::All => {
                args.add("--all");
            }
            TestSelection::Cases { methods, cases } => {
                if !methods.is_empty() {
                    args.add_flag("--methods", methods.join(","));
                }
                args.add_all(cases.iter().cloned());
            }
        }
    }
}

/// One finished drush call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: ArgumentList,
    pub outcome: ExitOutcome,
}

impl Invocation {
    pub fn succeeded(&self) -> bool {
        self.outcome.success()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.outcome.code()
    }
}

/// Runs drush subcommands against one site root.
pub struct Invoker {
    exe: String,
    root: PathBuf,
    workdir: PathBuf,
    sink: OutputSink,
    errors: ErrorPolicy,
    launcher: Box<dyn Launcher>,
}

impl Invoker {
    /// `exe` should already be resolved (see `DrushInstallation::resolve`).
    pub fn new(
        exe: impl Into<String>,
        root: impl Into<PathBuf>,
        workdir: impl Into<PathBuf>,
        launcher: Box<dyn Launcher>,
    ) -> Self {
        Self {
            exe: exe.into(),
            root: root.into(),
            workdir: workdir.into(),
            sink: OutputSink::Log,
            errors: ErrorPolicy::Forward,
            launcher,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// `<exe> --yes --nocolor --root=<root>`
    fn base_args(&self) -> ArgumentList {
        let mut args = ArgumentList::new(self.exe.as_str());
        args.add("--yes")
            .add("--nocolor")
            .add_flag("--root", self.root.to_string_lossy());
        args
    }

    /// Runs with the invoker's default output: stdout to the job log.
    async fn execute(&self, args: ArgumentList) -> Result<Invocation> {
        let sink = self.sink.clone();
        self.execute_with(args, sink, self.errors).await
    }

    async fn execute_with(
        &self,
        args: ArgumentList,
        sink: OutputSink,
        errors: ErrorPolicy,
    ) -> Result<Invocation> {
        let request = LaunchRequest {
            program: args.program().to_string(),
            args: args.args().to_vec(),
            cwd: self.workdir.clone(),
            sink,
            errors,
        };
        let outcome = self.launcher.launch(&request).await?;
        if !outcome.success() {
            warn!("drush finished with {}: {}", outcome, args);
        }
        Ok(Invocation {
            command: args,
            outcome,
        })
    }

    /// Builds a codebase from a drush make manifest into `destination`.
    pub async fn make(&self, manifest: &str, destination: &str) -> Result<Invocation> {
        let mut args = self.base_args();
        args.add("make").add(manifest).add(destination);
        self.execute(args).await
    }

    /// Installs the site with `profile` against `db_url`. The URL is passed as is.
    pub async fn site_install(&self, db_url: &str, profile: &str) -> Result<Invocation> {
        let mut args = self.base_args();
        args.add("site-install").add(profile).add_flag("--db-url", db_url);
        self.execute(args).await
    }

    /// Downloads projects. An empty `destination` leaves drush's default location.
    pub async fn download<S: AsRef<str>>(
        &self,
        projects: &[S],
        destination: &str,
    ) -> Result<Invocation> {
        let mut args = self.base_args();
        args.add("pm-download")
            .add_all(projects.iter().map(|p| p.as_ref().to_string()));
        if !destination.is_empty() {
            args.add_flag("--destination", destination);
        }
        self.execute(args).await
    }

    /// Enables extensions. `extensions` is passed as a single argument, joined
    /// however drush expects (`"views,ctools"`).
    pub async fn enable(&self, extensions: &str) -> Result<Invocation> {
        let mut args = self.base_args();
        args.add("pm-enable").add(extensions);
        self.execute(args).await
    }

    /// Runs simpletest tests, asking for XML results in `output_dir`.
    /// `output_dir` is made absolute against the working directory.
    pub async fn test_run(
        &self,
        output_dir: &Path,
        uri: &str,
        selection: &TestSelection,
    ) -> Result<Invocation> {
        let mut args = self.base_args();
        args.add("test-run");
        if !uri.is_empty() {
            args.add_flag("--uri", uri);
        }
        selection.append_to(&mut args);
        let xml_dir = absolute_path(output_dir, &self.workdir);
        args.add_flag("--xml", xml_dir.to_string_lossy());
        self.execute(args).await
    }

    /// Reviews `projects` with coder, writing checkstyle XML to
    /// `<output_dir>/coder_review.xml`. The directory must exist.
    pub async fn coder_review<R, P>(
        &self,
        output_dir: &Path,
        reviews: &[R],
        projects: &[P],
    ) -> Result<Invocation>
    where
        R: AsRef<str>,
        P: AsRef<str>,
    {
        let mut args = self.base_args();
        args.add("coder-review")
            .add("--minor")
            .add("--ignores-pass")
            .add("--checkstyle");
        let reviews: Vec<&str> = reviews.iter().map(|r| r.as_ref()).collect();
        args.add_flag("--reviews", reviews.join(","));
        for project in projects {
            let project: &str = project.as_ref();
            if project == AMBIGUOUS_REVIEW_PROJECT {
                debug!("Skipping project '{}' for coder-review", project);
                continue;
            }
            args.add(project);
        }

        let output_file = absolute_path(output_dir, &self.workdir).join(CODER_REVIEW_FILE);
        self.execute_with(args, OutputSink::File(output_file), ErrorPolicy::Discard)
            .await
    }
}
