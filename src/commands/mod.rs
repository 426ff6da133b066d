//! Command implementations for stencil.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations, one module per command.

mod blocks;
mod context_cmd;
mod lint_roller;
mod render;

use crate::cli::Command;
use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::events::{Event, append_event};

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Render(args) => render::cmd_render(args),
        Command::LintRoller(args) => lint_roller::cmd_lint_roller(args),
        Command::Blocks(args) => blocks::cmd_blocks(args),
        Command::Context(args) => context_cmd::cmd_context(args),
    }
}

/// Append `event` to the project's log, if it has one.
fn record_event(project: &ProjectContext, config: &Config, event: Event) -> Result<()> {
    match project.event_log_path(config) {
        Some(path) => append_event(&path, &event),
        None => Ok(()),
    }
}
