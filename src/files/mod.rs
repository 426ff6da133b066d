//! Built-in templates and the generators that render them.
//!
//! Each generator renders one of the templates under `templates/` against a
//! project's context. [`lint_roller`] writes a script; [`blocks`] produces
//! the reStructuredText regions that [`managed`] splices into existing
//! README and documentation files.

pub mod blocks;
pub mod lint_roller;
pub mod managed;

pub use blocks::{
    create_docs_install_block, create_docs_links_block, create_readme_install_block,
    create_shields_block, create_short_desc_block,
};
pub use lint_roller::{LINT_ROLLER_FILE, make_lint_roller, render_lint_roller};
pub use managed::{BlocksReport, replace_block, update_blocks};

use crate::error::{Result, StencilError};
use crate::template::{self, Context};

/// Render a built-in template, attributing failures to `name`.
fn render_builtin(name: &str, source: &str, context: &Context) -> Result<String> {
    template::render(source, context).map_err(|e| StencilError::template(name, e))
}
