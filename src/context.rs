//! Project root resolution for stencil.
//!
//! Commands that work on a project need to know where its `stencil.yaml`
//! lives. The root is either given explicitly with `--repo` or found by
//! walking up from the current working directory, so `stencil` can be invoked
//! from anywhere inside a project.

use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::{Result, StencilError};
use std::env;
use std::path::{Path, PathBuf};

/// Resolved paths for a stencil project.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Directory containing `stencil.yaml`.
    pub repo_root: PathBuf,

    /// Absolute path to `stencil.yaml`.
    pub config_path: PathBuf,
}

impl ProjectContext {
    /// Resolve the project from the current working directory.
    ///
    /// # Returns
    ///
    /// * `Ok(ProjectContext)` - The nearest enclosing project
    /// * `Err(StencilError::UserError)` - No `stencil.yaml` in the cwd or any parent
    pub fn resolve() -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            StencilError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        Self::resolve_from(&cwd)
    }

    /// Resolve the project by walking up from `start`.
    pub fn resolve_from<P: AsRef<Path>>(start: P) -> Result<Self> {
        let start = start.as_ref();

        start
            .ancestors()
            .find(|dir| dir.join(CONFIG_FILE_NAME).is_file())
            .map(Self::at)
            .ok_or_else(|| {
                StencilError::UserError(format!(
                    "no {} found in '{}' or any parent directory.\n\
                     Run stencil from inside a project or pass --repo.",
                    CONFIG_FILE_NAME,
                    start.display()
                ))
            })
    }

    /// Use `dir` as the project root; it must contain `stencil.yaml`.
    pub fn from_repo<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.join(CONFIG_FILE_NAME).is_file() {
            return Err(StencilError::UserError(format!(
                "'{}' does not contain a {}",
                dir.display(),
                CONFIG_FILE_NAME
            )));
        }
        Ok(Self::at(dir))
    }

    /// `from_repo` when a directory was given, otherwise `resolve`.
    pub fn locate(repo: Option<&Path>) -> Result<Self> {
        match repo {
            Some(dir) => Self::from_repo(dir),
            None => Self::resolve(),
        }
    }

    fn at(dir: &Path) -> Self {
        let repo_root = dir.to_path_buf();
        let config_path = repo_root.join(CONFIG_FILE_NAME);
        Self {
            repo_root,
            config_path,
        }
    }

    /// Load and validate the project's config.
    pub fn load_config(&self) -> Result<Config> {
        Config::load(&self.config_path)
    }

    /// Absolute path of the event log, if the config enables one.
    pub fn event_log_path(&self, config: &Config) -> Option<PathBuf> {
        config
            .event_log
            .as_deref()
            .filter(|path| !path.is_empty())
            .map(|path| self.repo_root.join(path))
    }
}
