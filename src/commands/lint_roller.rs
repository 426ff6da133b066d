//! Implementation of the `stencil lint-roller` command.

use crate::cli::RepoArgs;
use crate::context::ProjectContext;
use crate::error::Result;
use crate::events::{Event, EventAction, FileStatus};
use crate::files::make_lint_roller;

/// Execute the `stencil lint-roller` command.
pub fn cmd_lint_roller(args: RepoArgs) -> Result<()> {
    let project = ProjectContext::locate(args.repo.as_deref())?;
    let config = project.load_config()?;

    let written = make_lint_roller(&project.repo_root, &config)?;
    for file in &written {
        println!("Wrote {}", project.repo_root.join(file).display());
    }

    let event = Event::new(EventAction::LintRoller).with_files(written, FileStatus::Written);
    super::record_event(&project, &config, event)
}
