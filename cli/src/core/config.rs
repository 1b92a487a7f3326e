//! # drushkit Configuration System
//!
//! File: cli/src/core/config.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Loads, merges, and validates the settings a build job needs to drive
//! drush: which drush to run, the site root, database URL and install profile,
//! which tests to run, and what to review.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags / `DRUSHKIT_*` environment variables (applied by the command layer)
//! 2. An explicit `--config <file>`, or else `.drushkit.toml` in the current directory or
//!    an ancestor (the search stops at a directory containing `.git`)
//! 3. User-specific `<config dir>/drushkit/config.toml`
//! 4. Default values defined in the code
//!
//! Paths may use `~`, which is expanded after merging.
//!
//! ## Example file
//!
//! ```toml
//! [installation]
//! drush_exe = "vendor/bin/drush"
//!
//! [site]
//! root = "~/build/drupal"
//! db_url = "mysql://ci:ci@localhost/ci"
//! profile = "minimal"
//!
//! [tests]
//! output_dir = "build/tests"
//! cases = ["NodeTestCase"]
//!
//! [review]
//! reviews = ["style", "i18n"]
//! projects = ["views", "token"]
//!
//! [invocation]
//! fail_on_nonzero_exit = true
//! ```
//!
use crate::common::drush::installation::DEFAULT_DRUSH_EXE;
use crate::common::drush::TestSelection;
use crate::common::fs::io::read_file_to_string;
use crate::core::error::{DrushError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// The resolved configuration every command reads: file layers merged, then
/// defaults applied.
#[derive(Debug, Default, Clone)]
pub struct Config {
    pub installation: InstallationConfig,
    pub site: SiteConfig,
    pub tests: TestsConfig,
    pub review: ReviewConfig,
    pub invocation: InvocationConfig,
}

/// Where drush lives.
#[derive(Debug, Clone)]
pub struct InstallationConfig {
    /// Bare name looked up on PATH, or a path to the executable.
    pub drush_exe: String,
}

/// The Drupal site being built.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Drupal root passed as `--root`. Defaults to the working directory.
    pub root: Option<String>,
    /// Directory drush runs in. Defaults to the current directory.
    pub workdir: Option<String>,
    /// Database URL for `site-install`.
    pub db_url: Option<String>,
    /// Install profile for `site-install`.
    pub profile: String,
    /// Site URI for `test-run`.
    pub uri: Option<String>,
}

/// Test selection and result location for `test-run`.
#[derive(Debug, Clone)]
pub struct TestsConfig {
    pub output_dir: String,
    /// Run every test (`--all`); `methods` and `cases` are ignored.
    pub all: bool,
    pub methods: Option<Vec<String>>,
    pub cases: Option<Vec<String>>,
}

/// Coder review settings.
#[derive(Debug, Clone)]
pub struct ReviewConfig {
    pub output_dir: String,
    pub reviews: Vec<String>,
    pub projects: Vec<String>,
}

/// How drush results are judged.
#[derive(Debug, Clone)]
pub struct InvocationConfig {
    /// Treat a non-zero drush exit as a failed command. When false, any call
    /// that ran to completion counts as success.
    pub fail_on_nonzero_exit: bool,
}

impl Default for InstallationConfig {
    fn default() -> Self {
        Self {
            drush_exe: default_drush_exe(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: None,
            workdir: None,
            db_url: None,
            profile: default_profile(),
            uri: None,
        }
    }
}

impl Default for TestsConfig {
    fn default() -> Self {
        Self {
            output_dir: default_tests_output_dir(),
            all: false,
            methods: None,
            cases: None,
        }
    }
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            output_dir: default_review_output_dir(),
            reviews: default_reviews(),
            projects: Vec::new(),
        }
    }
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            fail_on_nonzero_exit: true,
        }
    }
}

impl TestsConfig {
    /// The configured selection. Unset methods and cases fall back to the
    /// built-in default selection as a whole.
    pub fn selection(&self) -> TestSelection {
        if self.all {
            return TestSelection::All;
        }
        match (&self.methods, &self.cases) {
            (None, None) => TestSelection::default(),
            (methods, cases) => TestSelection::Cases {
                methods: methods.clone().unwrap_or_default(),
                cases: cases.clone().unwrap_or_default(),
            },
        }
    }
}

/// One TOML file as written. Every key is optional so a layer can tell
/// "not set" apart from "set to the default value".
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    installation: InstallationFile,
    #[serde(default)]
    site: SiteFile,
    #[serde(default)]
    tests: TestsFile,
    #[serde(default)]
    review: ReviewFile,
    #[serde(default)]
    invocation: InvocationFile,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct InstallationFile {
    drush_exe: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct SiteFile {
    root: Option<String>,
    workdir: Option<String>,
    db_url: Option<String>,
    profile: Option<String>,
    uri: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct TestsFile {
    output_dir: Option<String>,
    all: Option<bool>,
    methods: Option<Vec<String>>,
    cases: Option<Vec<String>>,
}

impl TestsFile {
    fn has_selection(&self) -> bool {
        self.all.is_some() || self.methods.is_some() || self.cases.is_some()
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct ReviewFile {
    output_dir: Option<String>,
    reviews: Option<Vec<String>>,
    projects: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct InvocationFile {
    fail_on_nonzero_exit: Option<bool>,
}

impl From<ConfigFile> for Config {
    fn from(file: ConfigFile) -> Self {
        Config {
            installation: InstallationConfig {
                drush_exe: file
                    .installation
                    .drush_exe
                    .unwrap_or_else(default_drush_exe),
            },
            site: SiteConfig {
                root: file.site.root,
                workdir: file.site.workdir,
                db_url: file.site.db_url,
                profile: file.site.profile.unwrap_or_else(default_profile),
                uri: file.site.uri,
            },
            tests: TestsConfig {
                output_dir: file
                    .tests
                    .output_dir
                    .unwrap_or_else(default_tests_output_dir),
                all: file.tests.all.unwrap_or(false),
                methods: file.tests.methods,
                cases: file.tests.cases,
            },
            review: ReviewConfig {
                output_dir: file
                    .review
                    .output_dir
                    .unwrap_or_else(default_review_output_dir),
                reviews: file.review.reviews.unwrap_or_else(default_reviews),
                projects: file.review.projects.unwrap_or_default(),
            },
            invocation: InvocationConfig {
                fail_on_nonzero_exit: file.invocation.fail_on_nonzero_exit.unwrap_or(true),
            },
        }
    }
}

fn default_drush_exe() -> String {
    DEFAULT_DRUSH_EXE.to_string()
}
fn default_profile() -> String {
    "standard".to_string()
}
fn default_tests_output_dir() -> String {
    "build/tests".to_string()
}
fn default_review_output_dir() -> String {
    "build/review".to_string()
}
fn default_reviews() -> Vec<String> {
    vec!["style".to_string()]
}

const PROJECT_CONFIG_FILENAME: &str = ".drushkit.toml";

/// Loads the merged configuration. `explicit` replaces the project file search.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let user_config = load_user_config()?;
    let project_config = match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        None => load_project_config()?,
    };
    let mut merged_config = merge_configs(user_config.unwrap_or_default(), project_config);
    expand_config_paths(&mut merged_config).context("Failed to expand paths in configuration")?;
    validate_config(&merged_config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", merged_config);
    Ok(merged_config)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "drushkit", "drushkit") {
        let config_path = proj_dirs.config_dir().join("config.toml");
        if config_path.exists() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigFile>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    if let Some(project_config_path) = find_project_config_path(&current_dir) {
        info!(
            "Loading project configuration from: {}",
            project_config_path.display()
        );
        load_config_from_path(&project_config_path).map(Some)
    } else {
        debug!("No project configuration file (.drushkit.toml) found in current directory or ancestors.");
        Ok(None)
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = read_file_to_string(path)?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Every key the project file sets wins over the user file, then defaults
/// fill the rest. The test selection (`all`, `methods`, `cases`) is taken
/// from one file as a unit.
fn merge_configs(user: ConfigFile, project: Option<ConfigFile>) -> Config {
    let project = match project {
        Some(p) => p,
        None => return user.into(),
    };

    let output_dir = project
        .tests
        .output_dir
        .clone()
        .or_else(|| user.tests.output_dir.clone());
    let selection = if project.tests.has_selection() {
        project.tests
    } else {
        user.tests
    };
    let tests = TestsFile {
        output_dir,
        ..selection
    };

    ConfigFile {
        installation: InstallationFile {
            drush_exe: project.installation.drush_exe.or(user.installation.drush_exe),
        },
        site: SiteFile {
            root: project.site.root.or(user.site.root),
            workdir: project.site.workdir.or(user.site.workdir),
            db_url: project.site.db_url.or(user.site.db_url),
            profile: project.site.profile.or(user.site.profile),
            uri: project.site.uri.or(user.site.uri),
        },
        tests,
        review: ReviewFile {
            output_dir: project.review.output_dir.or(user.review.output_dir),
            reviews: project.review.reviews.or(user.review.reviews),
            projects: project.review.projects.or(user.review.projects),
        },
        invocation: InvocationFile {
            fail_on_nonzero_exit: project
                .invocation
                .fail_on_nonzero_exit
                .or(user.invocation.fail_on_nonzero_exit),
        },
    }
    .into()
}

fn expand_config_paths(config: &mut Config) -> Result<()> {
    debug!("Expanding paths in configuration...");
    let expand = |value: &str| shellexpand::tilde(value).into_owned();

    config.installation.drush_exe = expand(&config.installation.drush_exe);
    for value in [&mut config.site.root, &mut config.site.workdir]
        .into_iter()
        .flatten()
    {
        *value = expand(value);
    }
    config.tests.output_dir = expand(&config.tests.output_dir);
    config.review.output_dir = expand(&config.review.output_dir);
    Ok(())
}

fn validate_config(config: &Config) -> Result<()> {
    debug!("Validating final configuration...");
    if config.installation.drush_exe.trim().is_empty() {
        return Err(anyhow!(DrushError::Config(
            "installation.drush_exe cannot be empty.".to_string()
        )));
    }
    if let Some(db_url) = &config.site.db_url {
        if !db_url.contains("://") {
            return Err(anyhow!(DrushError::Config(format!(
                "Invalid database URL: '{}'. Expected <driver>://...",
                db_url
            ))));
        }
    }
    if config.site.profile.trim().is_empty() {
        return Err(anyhow!(DrushError::Config(
            "site.profile cannot be empty.".to_string()
        )));
    }
    for (name, dir) in [
        ("tests.output_dir", &config.tests.output_dir),
        ("review.output_dir", &config.review.output_dir),
    ] {
        if dir.trim().is_empty() {
            return Err(anyhow!(DrushError::Config(format!(
                "{} cannot be empty.",
                name
            ))));
        }
    }
    let named_lists = [
        ("tests.methods", config.tests.methods.as_deref().unwrap_or_default()),
        ("tests.cases", config.tests.cases.as_deref().unwrap_or_default()),
        ("review.reviews", config.review.reviews.as_slice()),
        ("review.projects", config.review.projects.as_slice()),
    ];
    for (name, values) in named_lists {
        if values.iter().any(|v| v.trim().is_empty()) {
            return Err(anyhow!(DrushError::Config(format!(
                "{} cannot contain empty names.",
                name
            ))));
        }
    }
    debug!("Configuration validation successful.");
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn parse(content: &str) -> ConfigFile {
        toml::from_str(content).expect("Failed to parse TOML")
    }

    #[test]
    fn test_deserialize_basic_toml() {
        let toml_content = r#"
            [installation]
            drush_exe = "vendor/bin/drush"

            [site]
            root = "~/drupal"
            db_url = "mysql://ci:ci@localhost/ci"

            [tests]
            cases = ["NodeTestCase"]

            [review]
            reviews = ["i18n", "style"]
            projects = ["views"]
        "#;

        let config = Config::from(parse(toml_content));

        assert_eq!(config.installation.drush_exe, "vendor/bin/drush");
        assert_eq!(config.site.root.as_deref(), Some("~/drupal")); // Not yet expanded
        assert_eq!(config.site.profile, "standard"); // Default
        assert_eq!(config.tests.output_dir, "build/tests");
        assert_eq!(config.review.reviews, vec!["i18n", "style"]);
        assert!(config.invocation.fail_on_nonzero_exit);
    }

    #[test]
    fn test_defaults_without_file() {
        let config = Config::default();
        assert_eq!(config.installation.drush_exe, "drush");
        assert_eq!(config.site.profile, "standard");
        assert_eq!(config.review.reviews, vec!["style"]);
        assert!(config.invocation.fail_on_nonzero_exit);
        assert_eq!(config.tests.selection(), TestSelection::default());

        let from_empty_file = Config::from(parse(""));
        assert_eq!(from_empty_file.installation.drush_exe, "drush");
        assert_eq!(from_empty_file.tests.output_dir, "build/tests");
        assert!(from_empty_file.invocation.fail_on_nonzero_exit);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result: std::result::Result<ConfigFile, _> =
            toml::from_str("[site]\ndocroot = \"/x\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_test_selection_from_config() {
        let mut tests = TestsConfig {
            cases: Some(vec!["NodeTestCase".into()]),
            ..Default::default()
        };
        assert_eq!(
            tests.selection(),
            TestSelection::Cases {
                methods: vec![],
                cases: vec!["NodeTestCase".into()]
            }
        );
        tests.all = true;
        assert_eq!(tests.selection(), TestSelection::All);
    }

    #[test]
    fn test_merge_project_over_user() {
        let user = parse(
            r#"
            [installation]
            drush_exe = "/opt/drush/drush"
            [site]
            db_url = "mysql://user@localhost/u"
            uri = "http://user.local"
            [review]
            projects = ["token"]
            "#,
        );
        let project = parse(
            r#"
            [site]
            db_url = "sqlite://project.db"
            profile = "minimal"
            [invocation]
            fail_on_nonzero_exit = false
            "#,
        );

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.installation.drush_exe, "/opt/drush/drush");
        assert_eq!(merged.site.db_url.as_deref(), Some("sqlite://project.db"));
        assert_eq!(merged.site.uri.as_deref(), Some("http://user.local"));
        assert_eq!(merged.site.profile, "minimal");
        assert_eq!(merged.review.projects, vec!["token"]);
        assert!(!merged.invocation.fail_on_nonzero_exit);
    }

    #[test]
    fn test_merge_project_default_values_still_override_user() {
        let user = parse(
            r#"
            [installation]
            drush_exe = "/opt/drush/drush"
            [site]
            profile = "minimal"
            [review]
            reviews = ["i18n"]
            "#,
        );
        let project = parse(
            r#"
            [installation]
            drush_exe = "drush"
            [site]
            profile = "standard"
            [review]
            reviews = ["style"]
            "#,
        );

        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.installation.drush_exe, "drush");
        assert_eq!(merged.site.profile, "standard");
        assert_eq!(merged.review.reviews, vec!["style"]);
    }

    #[test]
    fn test_merge_project_turns_off_user_all_tests() {
        let user = parse("[tests]\nall = true\n");
        let project = parse("[tests]\nall = false\ncases = [\"NodeTestCase\"]\n");

        let merged = merge_configs(user.clone(), Some(project));
        assert_eq!(
            merged.tests.selection(),
            TestSelection::Cases {
                methods: vec![],
                cases: vec!["NodeTestCase".into()]
            }
        );

        // Cases alone in the project file also replace the user's selection.
        let project = parse("[tests]\ncases = [\"NodeTestCase\"]\n");
        let merged = merge_configs(user.clone(), Some(project));
        assert!(!merged.tests.all);

        // A project without any selection keeps the user's.
        let project = parse("[tests]\noutput_dir = \"build/junit\"\n");
        let merged = merge_configs(user, Some(project));
        assert_eq!(merged.tests.selection(), TestSelection::All);
        assert_eq!(merged.tests.output_dir, "build/junit");
    }

    #[test]
    fn test_merge_project_restores_fail_on_nonzero_exit() {
        let user = parse("[invocation]\nfail_on_nonzero_exit = false\n");

        let project = parse("[invocation]\nfail_on_nonzero_exit = true\n");
        let merged = merge_configs(user.clone(), Some(project));
        assert!(merged.invocation.fail_on_nonzero_exit);

        let merged = merge_configs(user.clone(), Some(ConfigFile::default()));
        assert!(!merged.invocation.fail_on_nonzero_exit);

        let merged = merge_configs(user, None);
        assert!(!merged.invocation.fail_on_nonzero_exit);
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config {
            site: SiteConfig {
                root: Some("~/drupal".to_string()),
                ..Default::default()
            },
            review: ReviewConfig {
                output_dir: "/abs/review".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        expand_config_paths(&mut config).unwrap();

        let home_dir = dirs::home_dir().unwrap();
        let expected = home_dir.join("drupal").to_string_lossy().into_owned();
        assert_eq!(config.site.root, Some(expected));
        assert_eq!(config.review.output_dir, "/abs/review");
        assert_eq!(config.installation.drush_exe, "drush");
    }

    #[test]
    fn test_validate_config_valid() {
        let config = Config {
            site: SiteConfig {
                db_url: Some("mysql://ci:ci@localhost/ci".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_config_invalid_db_url() {
        let config = Config {
            site: SiteConfig {
                db_url: Some("localhost/ci".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Invalid database URL"));
    }

    #[test]
    fn test_validate_config_empty_review_name() {
        let config = Config {
            review: ReviewConfig {
                reviews: vec!["style".into(), " ".into()],
                ..Default::default()
            },
            ..Default::default()
        };
        let result = validate_config(&config);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("review.reviews cannot contain empty names"));
    }

    #[test]
    fn test_find_project_config_stops_at_git() {
        let temp_dir = tempdir().unwrap();
        let repo = temp_dir.path().join("repo");
        let nested = repo.join("sites/all");
        fs::create_dir_all(&nested).unwrap();
        fs::create_dir(repo.join(".git")).unwrap();

        // A config above the repository is not picked up.
        fs::write(temp_dir.path().join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(find_project_config_path(&nested), None);

        fs::write(repo.join(PROJECT_CONFIG_FILENAME), "").unwrap();
        assert_eq!(
            find_project_config_path(&nested),
            Some(repo.join(PROJECT_CONFIG_FILENAME))
        );
    }

    #[test]
    fn test_load_config_from_path() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("ci.toml");
        fs::write(&path, "[site]\nprofile = \"minimal\"\n").unwrap();
        assert_eq!(
            load_config_from_path(&path).unwrap().site.profile.as_deref(),
            Some("minimal")
        );

        fs::write(&path, "[site\n").unwrap();
        assert!(load_config_from_path(&path)
            .unwrap_err()
            .to_string()
            .contains("Failed to parse TOML"));
    }
}
