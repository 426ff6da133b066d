//! Project configuration model for stencil.
//!
//! This module defines the `Config` struct that represents `stencil.yaml`,
//! the project description the built-in templates are rendered from.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;

#[cfg(test)]
mod tests;

pub use model::{CONFIG_FILE_NAME, Config};
