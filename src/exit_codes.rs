//! Exit code constants for the stencil CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, missing or invalid config, I/O failure)
//! - 2: Template failure (malformed template, undefined variable, type mismatch)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid configuration, or filesystem failure.
pub const USER_ERROR: i32 = 1;

/// Template failure: the template could not be parsed or rendered.
pub const TEMPLATE_FAILURE: i32 = 2;
