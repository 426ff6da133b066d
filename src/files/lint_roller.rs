//! The `lint_roller.sh` script.
//!
//! The script runs autopep8 over the package and tests directories, first
//! with the ordinary fix list and then with the belligerent list at maximum
//! aggressiveness, and finishes with flake8. It refuses to touch a dirty git
//! working tree unless passed `-f`.

use super::render_builtin;
use crate::config::Config;
use crate::error::Result;
use crate::fs::{make_executable, write_clean};
use crate::template::Context;
use std::path::Path;

/// File name of the generated script, relative to the repo root.
pub const LINT_ROLLER_FILE: &str = "lint_roller.sh";

const LINT_ROLLER_TEMPLATE: &str = include_str!("templates/lint_roller.sh");

/// Render the script text for `context`.
pub fn render_lint_roller(context: &Context) -> Result<String> {
    render_builtin(LINT_ROLLER_FILE, LINT_ROLLER_TEMPLATE, context)
}

/// Write `lint_roller.sh` into `repo_root` and mark it executable.
///
/// Returns the paths written, relative to `repo_root`.
pub fn make_lint_roller(repo_root: &Path, config: &Config) -> Result<Vec<String>> {
    let context = config.to_context()?;
    let script = render_lint_roller(&context)?;

    let path = repo_root.join(LINT_ROLLER_FILE);
    write_clean(&path, &script)?;
    make_executable(&path)?;

    Ok(vec![LINT_ROLLER_FILE.to_string()])
}
