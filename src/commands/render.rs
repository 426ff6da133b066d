//! Implementation of the `stencil render` command.

use crate::cli::RenderArgs;
use crate::config::Config;
use crate::context::ProjectContext;
use crate::error::{Result, StencilError};
use crate::events::{Event, EventAction, FileStatus};
use crate::fs::atomic_write_file;
use crate::template::{Context, Template};
use std::path::Path;

/// Execute the `stencil render` command.
pub fn cmd_render(args: RenderArgs) -> Result<()> {
    let output = render_to_string(&args)?;

    match &args.output {
        Some(path) => {
            atomic_write_file(path, &output)?;
            println!("Wrote {}", path.display());

            match event_target(ProjectContext::resolve()) {
                EventTarget::Project(project, config) => {
                    let event = Event::new(EventAction::Render)
                        .with_template(args.template.display().to_string())
                        .with_file(path.display().to_string(), FileStatus::Written);
                    super::record_event(&project, &config, event)?;
                }
                EventTarget::Unloadable(project, err) => eprintln!(
                    "Warning: render not logged; config of the project at '{}' failed to load: {}",
                    project.repo_root.display(),
                    err
                ),
                EventTarget::Outside => {}
            }
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Where a render to a file is logged.
enum EventTarget {
    /// Not inside a project; renders outside projects are never logged.
    Outside,
    Project(ProjectContext, Config),
    /// Inside a project whose `stencil.yaml` does not load.
    Unloadable(ProjectContext, StencilError),
}

fn event_target(found: Result<ProjectContext>) -> EventTarget {
    let Ok(project) = found else {
        return EventTarget::Outside;
    };
    match project.load_config() {
        Ok(config) => EventTarget::Project(project, config),
        Err(err) => EventTarget::Unloadable(project, err),
    }
}

/// Load the context and template named by `args` and render.
pub(crate) fn render_to_string(args: &RenderArgs) -> Result<String> {
    let mut context = Context::new();
    for path in &args.contexts {
        context.merge(load_context_file(path)?);
    }
    for (key, value) in &args.sets {
        context.insert(key.clone(), value.clone());
    }

    let origin = args.template.display().to_string();
    let source = std::fs::read_to_string(&args.template).map_err(|e| {
        StencilError::UserError(format!("failed to read template '{}': {}", origin, e))
    })?;

    let template = Template::parse(source).map_err(|e| StencilError::template(&origin, e))?;
    template
        .render(&context)
        .map_err(|e| StencilError::template(&origin, e))
}

/// Parse a context file, choosing YAML or JSON by extension.
fn load_context_file(path: &Path) -> Result<Context> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        StencilError::UserError(format!(
            "failed to read context file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parsed = match extension.as_deref() {
        Some("yaml") | Some("yml") => Context::from_yaml_str(&text),
        Some("json") => Context::from_json_str(&text),
        _ => {
            return Err(StencilError::UserError(format!(
                "unsupported context file '{}': expected a .yaml, .yml or .json extension",
                path.display()
            )));
        }
    };

    parsed.map_err(|e| StencilError::UserError(format!("{}: {}", path.display(), e)))
}
