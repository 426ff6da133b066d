//! Implementation of the `stencil context` command.

use crate::cli::RepoArgs;
use crate::context::ProjectContext;
use crate::error::{Result, StencilError};

/// Execute the `stencil context` command.
pub fn cmd_context(args: RepoArgs) -> Result<()> {
    print!("{}", context_yaml(&args)?);
    Ok(())
}

fn context_yaml(args: &RepoArgs) -> Result<String> {
    let project = ProjectContext::locate(args.repo.as_deref())?;
    let context = project.load_config()?.to_context()?;

    serde_yaml::to_string(&context).map_err(|e| {
        StencilError::UserError(format!("failed to serialize context to YAML: {}", e))
    })
}
