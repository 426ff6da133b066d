//! Error types for the stencil CLI.
//!
//! Uses thiserror for derive macros and provides user-actionable error messages.

use crate::exit_codes;
use crate::template::{ContextError, TemplateError};
use thiserror::Error;

/// Main error type for stencil operations.
#[derive(Error, Debug)]
pub enum StencilError {
    /// User provided invalid arguments, configuration, or the filesystem
    /// operation failed.
    #[error("{0}")]
    UserError(String),

    /// A template failed to parse or render.
    #[error("{origin}: {source}")]
    Template {
        /// The underlying template error.
        source: TemplateError,
        /// Which template failed (file path or built-in template name).
        origin: String,
    },
}

impl StencilError {
    /// Wrap a template error with the name of the template it came from.
    pub fn template(origin: impl Into<String>, source: TemplateError) -> Self {
        StencilError::Template {
            source,
            origin: origin.into(),
        }
    }

    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            StencilError::UserError(_) => exit_codes::USER_ERROR,
            StencilError::Template { .. } => exit_codes::TEMPLATE_FAILURE,
        }
    }
}

impl From<ContextError> for StencilError {
    fn from(err: ContextError) -> Self {
        StencilError::UserError(err.to_string())
    }
}

/// Result type alias for stencil operations.
pub type Result<T> = std::result::Result<T, StencilError>;
