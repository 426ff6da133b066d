//! Filesystem utilities for stencil.
//!
//! Generated files are always written atomically so an interrupted run never
//! leaves a half-written script or README behind.

pub mod atomic;
mod clean;

pub use atomic::atomic_write;
pub use atomic::atomic_write_file;
pub use clean::{clean_text, make_executable, write_clean};
