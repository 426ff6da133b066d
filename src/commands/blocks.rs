//! Implementation of the `stencil blocks` command.

use crate::cli::RepoArgs;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::events::{Event, EventAction, FileStatus};
use crate::files::update_blocks;

/// Execute the `stencil blocks` command.
pub fn cmd_blocks(args: RepoArgs) -> Result<()> {
    let project = ProjectContext::locate(args.repo.as_deref())?;
    let config = project.load_config()?;

    let report = update_blocks(&project.repo_root, &config)?;
    for file in &report.updated {
        println!("Updated   {}", file);
    }
    for file in &report.unchanged {
        println!("Unchanged {}", file);
    }
    for file in &report.skipped {
        println!("Skipped   {} (not found)", file);
    }

    let event = Event::new(EventAction::Blocks)
        .with_files(report.updated, FileStatus::Written)
        .with_files(report.unchanged, FileStatus::Unchanged)
        .with_files(report.skipped, FileStatus::Skipped);
    super::record_event(&project, &config, event)
}
