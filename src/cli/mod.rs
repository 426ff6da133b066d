//! CLI argument parsing for stencil.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Stencil: strict template renderer and scaffolder.
///
/// Renders templates with `{{ }}` variables, `{% if %}` and `{% for %}`
/// blocks against a YAML/JSON context, and keeps a project's managed files
/// (lint_roller.sh, README and docs blocks) in sync with its stencil.yaml.
#[derive(Parser, Debug)]
#[command(name = "stencil")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for stencil.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a template file.
    ///
    /// Context files are merged left to right, then --set bindings are
    /// applied. Output goes to stdout unless --output is given.
    Render(RenderArgs),

    /// Write lint_roller.sh at the project root.
    LintRoller(RepoArgs),

    /// Rewrite the managed blocks in README.rst and the docs index.
    Blocks(RepoArgs),

    /// Print the project's template context as YAML.
    Context(RepoArgs),
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Template file to render.
    pub template: PathBuf,

    /// Context file (.yaml, .yml or .json). Repeatable; later files win.
    #[arg(short, long = "context", value_name = "FILE")]
    pub contexts: Vec<PathBuf>,

    /// Bind a string variable (KEY=VALUE). Repeatable; applied after context files.
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub sets: Vec<(String, String)>,

    /// Write the output to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Arguments shared by the project commands.
#[derive(Parser, Debug)]
pub struct RepoArgs {
    /// Project root containing stencil.yaml. Defaults to the nearest
    /// enclosing directory that has one.
    #[arg(long, value_name = "DIR")]
    pub repo: Option<PathBuf>,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

/// Parse a `KEY=VALUE` binding. The value may itself contain `=`.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing variable name in '{}'", raw));
    }

    Ok((key.to_string(), value.to_string()))
}
