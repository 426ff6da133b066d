//! reStructuredText blocks for the README and the documentation index.
//!
//! Every block starts with `.. start <name>` and ends with `.. end <name>`,
//! which is how [`super::managed`] finds them again on later runs.

use super::render_builtin;
use crate::error::Result;
use crate::template::Context;

const README_INSTALL_TEMPLATE: &str = include_str!("templates/readme_install.rst");
const DOCS_INSTALL_TEMPLATE: &str = include_str!("templates/docs_install.rst");
const SHORT_DESC_TEMPLATE: &str = include_str!("templates/short_desc.rst");
const DOCS_LINKS_TEMPLATE: &str = include_str!("templates/docs_links.rst");
const SHIELDS_TEMPLATE: &str = include_str!("templates/shields.rst");

/// Installation instructions for the README.
///
/// Projects that are not on PyPI get an empty `installation` region.
pub fn create_readme_install_block(context: &Context) -> Result<String> {
    render_builtin("readme_install.rst", README_INSTALL_TEMPLATE, context)
}

/// Installation directive for the documentation index.
pub fn create_docs_install_block(context: &Context) -> Result<String> {
    render_builtin("docs_install.rst", DOCS_INSTALL_TEMPLATE, context)
}

/// The project's one-line description in bold.
pub fn create_short_desc_block(context: &Context) -> Result<String> {
    render_builtin("short_desc.rst", SHORT_DESC_TEMPLATE, context)
}

/// Links to the function index, source code and repository.
pub fn create_docs_links_block(context: &Context) -> Result<String> {
    render_builtin("docs_links.rst", DOCS_LINKS_TEMPLATE, context)
}

/// Table of status badges, followed by the substitutions it uses.
///
/// A non-empty `unique_name` is appended to every substitution name and to
/// the start marker.
pub fn create_shields_block(context: &Context) -> Result<String> {
    render_builtin("shields.rst", SHIELDS_TEMPLATE, context)
}
