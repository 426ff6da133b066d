//! Config loading, validation, and conversion into a template context.

use super::model::{Config, PLATFORMS};
use crate::error::{Result, StencilError};
use crate::lint;
use crate::shields;
use crate::template::{Context, Value};
use chrono::{Datelike, Utc};
use std::path::Path;

/// Header line written into every managed file.
pub const MANAGED_MESSAGE: &str = "This file is managed by 'stencil'. Don't edit it directly.";

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the stencil.yaml file
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(StencilError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            StencilError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| StencilError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            StencilError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `modname` must be non-empty
    /// - `tests_dir` must be non-empty when `enable_tests` is set
    /// - `source_dir`, `tests_dir` and `docs_dir` must be relative
    /// - `enable_conda` requires at least one entry in `conda_channels`
    /// - `platforms` may only name `Windows`, `macOS` and `Linux`
    /// - `travis_site` is `com` or `org`
    pub fn validate(&self) -> Result<()> {
        if self.modname.trim().is_empty() {
            return Err(StencilError::UserError(
                "config validation failed: modname must be set".to_string(),
            ));
        }

        if self.enable_tests && self.tests_dir.trim().is_empty() {
            return Err(StencilError::UserError(
                "config validation failed: tests_dir must be set when enable_tests is true"
                    .to_string(),
            ));
        }

        for (field, dir) in [
            ("source_dir", &self.source_dir),
            ("tests_dir", &self.tests_dir),
            ("docs_dir", &self.docs_dir),
        ] {
            if dir.starts_with('/') || dir.starts_with('\\') {
                return Err(StencilError::UserError(format!(
                    "config validation failed: {} must be relative to the repository root (found '{}')",
                    field, dir
                )));
            }
        }

        if self.enable_conda && self.conda_channels.is_empty() {
            return Err(StencilError::UserError(
                "config validation failed: enable_conda requires a list of conda_channels"
                    .to_string(),
            ));
        }

        if let Some(platform) = self
            .platforms
            .iter()
            .find(|p| !PLATFORMS.contains(&p.as_str()))
        {
            return Err(StencilError::UserError(format!(
                "config validation failed: unknown platform '{}' (expected one of {})",
                platform,
                PLATFORMS.join(", ")
            )));
        }

        if !matches!(self.travis_site.as_str(), "com" | "org") {
            return Err(StencilError::UserError(format!(
                "config validation failed: travis_site must be 'com' or 'org' (found '{}')",
                self.travis_site
            )));
        }

        Ok(())
    }

    /// The importable package name.
    pub fn import_name(&self) -> String {
        self.import_name
            .clone()
            .unwrap_or_else(|| self.modname.replace('-', "_"))
    }

    /// The repository name.
    pub fn repo_name(&self) -> String {
        self.repo_name.clone().unwrap_or_else(|| self.modname.clone())
    }

    /// The PyPI distribution name.
    pub fn pypi_name(&self) -> String {
        self.pypi_name.clone().unwrap_or_else(|| self.repo_name())
    }

    /// The Docker Hub image name.
    pub fn docker_name(&self) -> String {
        self.docker_name
            .clone()
            .unwrap_or_else(|| self.repo_name().to_lowercase())
    }

    /// `unique_name` as a substitution suffix: empty, or starting with `_`.
    pub fn unique_suffix(&self) -> String {
        let name = self.unique_name.trim();
        if name.is_empty() || name.starts_with('_') {
            name.to_string()
        } else {
            format!("_{}", name)
        }
    }

    /// Path of the package directory relative to the repo root, using `/`.
    pub fn source_path(&self) -> String {
        let dir = self.source_dir.trim_end_matches('/');
        if dir.is_empty() {
            self.import_name()
        } else {
            format!("{}/{}", dir, self.import_name())
        }
    }

    /// Directories the lint script operates on, in order.
    pub fn lint_dirs(&self) -> Vec<String> {
        let mut dirs = vec![self.source_path()];
        if self.enable_tests {
            dirs.push(self.tests_dir.trim_end_matches('/').to_string());
        }
        dirs
    }

    /// Build the template context for this project.
    ///
    /// Every built-in key is always present; `extra` entries are added last
    /// and may not replace a built-in key.
    pub fn to_context(&self) -> Result<Context> {
        self.to_context_in(Utc::now().year())
    }

    /// [`Config::to_context`] with the "maintained" shield pinned to `year`.
    pub(crate) fn to_context_in(&self, year: i32) -> Result<Context> {
        let shields: Value = shields::shields(self, year)
            .into_iter()
            .map(|(name, shield)| (name, shield.to_string()))
            .collect();

        let mut ctx = Context::new()
            .with("managed_message", MANAGED_MESSAGE)
            .with("modname", &self.modname)
            .with("import_name", self.import_name())
            .with("repo_name", self.repo_name())
            .with("pypi_name", self.pypi_name())
            .with("username", &self.username)
            .with("short_desc", &self.short_desc)
            .with("version", &self.version)
            .with("source_dir", &self.source_dir)
            .with("source_path", self.source_path())
            .with("tests_dir", &self.tests_dir)
            .with("docs_dir", &self.docs_dir)
            .with("lint_dirs", self.lint_dirs())
            .with("enable_tests", self.enable_tests)
            .with("enable_docs", self.enable_docs)
            .with("enable_pre_commit", self.enable_pre_commit)
            .with("on_pypi", self.on_pypi)
            .with("enable_conda", self.enable_conda)
            .with("conda_channels", self.conda_channels.clone())
            .with("platforms", self.platforms.clone())
            .with("travis_site", &self.travis_site)
            .with("docker_shields", self.docker_shields)
            .with("docker_name", self.docker_name())
            .with("unique_name", self.unique_suffix())
            .with("shields", shields)
            .with(
                "lint_fix_list",
                lint::with_extras(lint::LINT_FIX_LIST, &self.extra_lint_fix),
            )
            .with(
                "lint_belligerent_list",
                lint::with_extras(lint::LINT_BELLIGERENT_LIST, &[]),
            )
            .with(
                "lint_warn_list",
                lint::with_extras(lint::LINT_WARN_LIST, &self.extra_lint_warning),
            )
            .with(
                "code_only_warning",
                lint::with_extras(lint::CODE_ONLY_WARNING, &[]),
            );

        for (key, value) in &self.extra {
            if ctx.contains(key) {
                return Err(StencilError::UserError(format!(
                    "config validation failed: extra variable '{}' would replace a built-in variable",
                    key
                )));
            }
            if value.is_null() {
                continue;
            }
            let value = Value::from_yaml(value.clone(), &format!("extra.{}", key))?;
            ctx.insert(key.clone(), value);
        }

        Ok(ctx)
    }
}
