//! Atomic file writes.
//!
//! Content is written to a sibling temporary file named `.{filename}.tmp`,
//! synced, and renamed over the target. Readers therefore see either the old
//! file or the complete new one. When the target already exists its
//! permissions are carried over, so a script that was executable stays so.
//!
//! The temporary file lives in the target's directory; the rename is only
//! atomic when both are on the same filesystem.

use crate::error::{Result, StencilError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, creating parent directories as needed.
///
/// # Example
///
/// ```no_run
/// use stencil::fs::atomic_write;
/// use std::path::Path;
///
/// atomic_write(Path::new("lint_roller.sh"), b"#!/bin/bash\n")?;
/// # Ok::<(), stencil::error::StencilError>(())
/// ```
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| {
            StencilError::UserError(format!(
                "failed to create parent directory '{}': {}",
                parent.display(),
                e
            ))
        })?;
    }

    let temp_path = temp_path_for(path)?;
    write_and_sync(&temp_path, content)?;

    if let Ok(meta) = fs::metadata(path) {
        // Best effort: a failure here only loses the old mode bits.
        let _ = fs::set_permissions(&temp_path, meta.permissions());
    }

    replace(&temp_path, path)
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

fn temp_path_for(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            StencilError::UserError(format!("invalid output path '{}'", target.display()))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    let mut file = File::create(path).map_err(|e| {
        StencilError::UserError(format!(
            "failed to create temporary file '{}': {}",
            path.display(),
            e
        ))
    })?;

    let written = file.write_all(content).and_then(|()| file.sync_all());
    if let Err(e) = written {
        let _ = fs::remove_file(path);
        return Err(StencilError::UserError(format!(
            "failed to write temporary file '{}': {}",
            path.display(),
            e
        )));
    }

    Ok(())
}

fn replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        StencilError::UserError(format!("failed to replace '{}': {}", target.display(), e))
    })?;

    // Persist the directory entry; this is a no-op where directories cannot be opened.
    if let Some(parent) = target.parent()
        && let Ok(dir) = File::open(parent)
    {
        let _ = dir.sync_all();
    }

    Ok(())
}
