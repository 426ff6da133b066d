//! The clean writer used for generated files.
//!
//! Generated text is normalised before it is written: trailing whitespace is
//! removed from every line, trailing blank lines are dropped, and the file
//! ends with exactly one newline. Line endings are written as `\n`.

use super::atomic::atomic_write_file;
use crate::error::{Result, StencilError};
use std::path::Path;

/// Normalise text for writing to disk.
pub fn clean_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 1);
    for line in text.lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }

    let kept = out.trim_end_matches('\n').len();
    out.truncate(kept);
    out.push('\n');
    out
}

/// Normalise `text` with [`clean_text`] and write it atomically to `path`.
pub fn write_clean<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    atomic_write_file(path, &clean_text(text))
}

/// Add execute permission for everyone who can read the file.
#[cfg(unix)]
pub fn make_executable<P: AsRef<Path>>(path: P) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let path = path.as_ref();
    let io_err = |e: std::io::Error| {
        StencilError::UserError(format!(
            "failed to mark '{}' executable: {}",
            path.display(),
            e
        ))
    };

    let mut perms = std::fs::metadata(path).map_err(io_err)?.permissions();
    let mode = perms.mode();
    perms.set_mode(mode | ((mode & 0o444) >> 2));
    std::fs::set_permissions(path, perms).map_err(io_err)
}

/// Execute bits do not exist on this platform; only checks that the file exists.
#[cfg(not(unix))]
pub fn make_executable<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    std::fs::metadata(path).map(|_| ()).map_err(|e| {
        StencilError::UserError(format!(
            "failed to mark '{}' executable: {}",
            path.display(),
            e
        ))
    })
}
