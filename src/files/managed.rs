//! Managed regions inside hand-written files.
//!
//! A region runs from a `.. start <name>` line to the matching `.. end <name>`
//! line. Rewriting replaces the whole region, markers included, with a freshly
//! rendered block and leaves the rest of the file untouched. Files without the
//! markers are left as they are.

use super::blocks::{
    create_docs_install_block, create_docs_links_block, create_readme_install_block,
    create_shields_block, create_short_desc_block,
};
use crate::config::Config;
use crate::error::{Result, StencilError};
use crate::fs::write_clean;
use regex::{NoExpand, Regex};
use std::path::Path;

/// Outcome of [`update_blocks`], with paths relative to the repo root.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BlocksReport {
    /// Files whose content changed and were rewritten.
    pub updated: Vec<String>,
    /// Files that exist but were already up to date.
    pub unchanged: Vec<String>,
    /// Files that do not exist.
    pub skipped: Vec<String>,
}

/// Replace the region called `name` in `text` with `block`.
///
/// Surrounding newlines of `block` are dropped so the region keeps its place
/// in the file. Returns the new text and whether the region was found.
pub fn replace_block(text: &str, name: &str, block: &str) -> Result<(String, bool)> {
    let escaped = regex::escape(name);
    let pattern = format!(r"(?s)\.\. start {escaped}\b.*?\.\. end {escaped}\b");
    let re = Regex::new(&pattern).map_err(|e| {
        StencilError::UserError(format!("invalid block name '{}': {}", name, e))
    })?;

    if !re.is_match(text) {
        return Ok((text.to_string(), false));
    }

    let replaced = re.replace_all(text, NoExpand(block.trim_matches('\n')));
    Ok((replaced.into_owned(), true))
}

/// Rewrite the managed regions of `README.rst` and, when docs are enabled,
/// `<docs_dir>/index.rst`.
pub fn update_blocks(repo_root: &Path, config: &Config) -> Result<BlocksReport> {
    let context = config.to_context()?;
    let short_desc = create_short_desc_block(&context)?;
    let shields = create_shields_block(&context)?;

    let mut targets = vec![(
        "README.rst".to_string(),
        vec![
            ("shields", shields.clone()),
            ("short_desc", short_desc.clone()),
            ("installation", create_readme_install_block(&context)?),
        ],
    )];

    if config.enable_docs {
        let docs_dir = config.docs_dir.trim_end_matches('/');
        let index = if docs_dir.is_empty() {
            "index.rst".to_string()
        } else {
            format!("{}/index.rst", docs_dir)
        };
        targets.push((
            index,
            vec![
                ("shields", shields),
                ("short_desc", short_desc),
                ("installation", create_docs_install_block(&context)?),
                ("links", create_docs_links_block(&context)?),
            ],
        ));
    }

    let mut report = BlocksReport::default();
    for (relative, blocks) in targets {
        let path = repo_root.join(&relative);
        if !path.is_file() {
            report.skipped.push(relative);
            continue;
        }

        let original = std::fs::read_to_string(&path).map_err(|e| {
            StencilError::UserError(format!("failed to read '{}': {}", path.display(), e))
        })?;

        let mut text = original.clone();
        for (name, block) in &blocks {
            (text, _) = replace_block(&text, name, block)?;
        }

        if text == original {
            report.unchanged.push(relative);
        } else {
            write_clean(&path, &text)?;
            report.updated.push(relative);
        }
    }

    Ok(report)
}
