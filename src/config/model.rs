//! Config struct definition and default implementation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the project config file at the repository root.
pub const CONFIG_FILE_NAME: &str = "stencil.yaml";

/// Project description used to render managed files.
///
/// This struct represents the contents of `stencil.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Project identity
    // =========================================================================
    /// Name of the project / top-level module (required).
    pub modname: String,

    /// Importable package name. Defaults to `modname` with `-` replaced by `_`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_name: Option<String>,

    /// Repository name. Defaults to `modname`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_name: Option<String>,

    /// Name of the project on PyPI. Defaults to the repository name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pypi_name: Option<String>,

    /// Account that owns the repository.
    pub username: String,

    /// One-line description of the project.
    pub short_desc: String,

    /// Current release, used by the "commits since" shield.
    #[serde(default = "default_version")]
    pub version: String,

    // =========================================================================
    // Layout
    // =========================================================================
    /// Directory containing the package, relative to the repo root (empty for the root itself).
    pub source_dir: String,

    /// Directory containing the tests.
    #[serde(default = "default_tests_dir")]
    pub tests_dir: String,

    /// Directory containing the Sphinx documentation source.
    #[serde(default = "default_docs_dir")]
    pub docs_dir: String,

    // =========================================================================
    // Feature flags
    // =========================================================================
    /// Whether the project has a test suite.
    #[serde(default = "default_true")]
    pub enable_tests: bool,

    /// Whether the project has documentation.
    #[serde(default = "default_true")]
    pub enable_docs: bool,

    /// Whether the project uses pre-commit.
    #[serde(default = "default_true")]
    pub enable_pre_commit: bool,

    /// Whether the project is published on PyPI.
    #[serde(default = "default_true")]
    pub on_pypi: bool,

    /// Whether the project is published on Anaconda. Requires `conda_channels`.
    pub enable_conda: bool,

    /// Conda channels required to install the project.
    pub conda_channels: Vec<String>,

    // =========================================================================
    // Shields
    // =========================================================================
    /// Supported platforms: any of `Windows`, `macOS` and `Linux`.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,

    /// Travis CI site hosting the builds, `com` or `org`.
    #[serde(default = "default_travis_site")]
    pub travis_site: String,

    /// Whether to show Docker Hub shields.
    pub docker_shields: bool,

    /// Image name on Docker Hub. Defaults to the repository name in lowercase.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub docker_name: Option<String>,

    /// Suffix for the shield substitutions, for documents holding several
    /// shields blocks.
    pub unique_name: String,

    // =========================================================================
    // Lint settings
    // =========================================================================
    /// Extra codes appended to the autopep8 fix list.
    pub extra_lint_fix: Vec<String>,

    /// Extra codes appended to the flake8 warning list.
    pub extra_lint_warning: Vec<String>,

    // =========================================================================
    // Tool settings
    // =========================================================================
    /// Path of the NDJSON event log, relative to the repo root. Disabled when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_log: Option<String>,

    /// Additional template variables. Keys must not collide with built-in ones.
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            modname: String::new(),
            import_name: None,
            repo_name: None,
            pypi_name: None,
            username: String::new(),
            short_desc: String::new(),
            version: default_version(),
            source_dir: String::new(),
            tests_dir: default_tests_dir(),
            docs_dir: default_docs_dir(),
            enable_tests: default_true(),
            enable_docs: default_true(),
            enable_pre_commit: default_true(),
            on_pypi: default_true(),
            enable_conda: false,
            conda_channels: Vec::new(),
            platforms: default_platforms(),
            travis_site: default_travis_site(),
            docker_shields: false,
            docker_name: None,
            unique_name: String::new(),
            extra_lint_fix: Vec::new(),
            extra_lint_warning: Vec::new(),
            event_log: None,
            extra: BTreeMap::new(),
        }
    }
}

fn default_tests_dir() -> String {
    "tests".to_string()
}

fn default_docs_dir() -> String {
    "doc-source".to_string()
}

fn default_version() -> String {
    "0.0.0".to_string()
}

pub(crate) const PLATFORMS: &[&str] = &["Windows", "macOS", "Linux"];

fn default_platforms() -> Vec<String> {
    PLATFORMS.iter().map(|p| p.to_string()).collect()
}

fn default_travis_site() -> String {
    "com".to_string()
}

fn default_true() -> bool {
    true
}
