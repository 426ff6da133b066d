//! Append-only log of generated files.
//!
//! When `event_log` is set in `stencil.yaml`, every command that writes into
//! the project appends one JSON object per run to that file (NDJSON):
//!
//! ```text
//! {"ts":"2026-10-14T09:12:03Z","action":"blocks","actor":"octocat@box",
//!  "files":[{"path":"README.rst","status":"written"},
//!           {"path":"doc-source/index.rst","status":"skipped"}]}
//! ```
//!
//! `render` also records the template it rendered.
//!
//! ```no_run
//! use stencil::events::{Event, EventAction, FileStatus, append_event};
//! use std::path::Path;
//!
//! let event = Event::new(EventAction::LintRoller).with_file("lint_roller.sh", FileStatus::Written);
//! append_event(Path::new(".stencil/events.ndjson"), &event)?;
//! # Ok::<(), stencil::error::StencilError>(())
//! ```

use crate::error::{Result, StencilError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// The command that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    Render,
    LintRoller,
    Blocks,
}

impl EventAction {
    pub fn as_str(self) -> &'static str {
        match self {
            EventAction::Render => "render",
            EventAction::LintRoller => "lint_roller",
            EventAction::Blocks => "blocks",
        }
    }
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to one file during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// New content was written.
    Written,
    /// The file already had the generated content.
    Unchanged,
    /// The file did not exist, so nothing was generated into it.
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the repository root (or as given, for `render --output`).
    pub path: String,
    pub status: FileStatus,
}

/// One line of the event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    /// `user@HOST` of whoever ran the command.
    pub actor: String,
    /// Template source, for `render`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

impl Event {
    /// Create an event stamped with the current time and actor, touching no files yet.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: actor(),
            template: None,
            files: Vec::new(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    pub fn with_file(mut self, path: impl Into<String>, status: FileStatus) -> Self {
        self.files.push(FileRecord {
            path: path.into(),
            status,
        });
        self
    }

    /// Add every path in `paths` with the same status.
    pub fn with_files<I, S>(self, paths: I, status: FileStatus) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths
            .into_iter()
            .fold(self, |event, path| event.with_file(path, status))
    }

    /// Paths recorded with `status`, in order.
    pub fn files_with(&self, status: FileStatus) -> impl Iterator<Item = &str> {
        self.files
            .iter()
            .filter(move |f| f.status == status)
            .map(|f| f.path.as_str())
    }

    fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            StencilError::UserError(format!("failed to serialize {} event: {}", self.action, e))
        })
    }
}

fn actor() -> String {
    let user = ["USER", "USERNAME"]
        .iter()
        .find_map(|var| std::env::var(var).ok().filter(|v| !v.is_empty()))
        .unwrap_or_else(|| "unknown".to_string());
    let host = hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append `event` to the log at `path`.
///
/// The file and its parent directories are created on first use.
pub fn append_event(path: &Path, event: &Event) -> Result<()> {
    let line = event.to_ndjson_line()?;
    let log_error = |what: &str, e: std::io::Error| {
        StencilError::UserError(format!(
            "failed to {} event log '{}': {}",
            what,
            path.display(),
            e
        ))
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| log_error("create the directory of", e))?;
    }

    let mut log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| log_error("open", e))?;
    writeln!(log, "{}", line).map_err(|e| log_error("append to", e))
}
