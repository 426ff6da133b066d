//! Stencil: a strict template renderer and the scaffolder built on it.
//!
//! The [`template`] module is the engine and has no I/O of its own. The
//! remaining modules load a project's `stencil.yaml`, render the built-in
//! templates against it, and write the results.

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod files;
pub mod fs;
pub mod lint;
pub mod shields;
pub mod template;

#[cfg(test)]
mod test_support;
