//! Error types for template parsing and rendering.

use std::fmt;
use thiserror::Error;

/// A position inside a template source.
///
/// `offset` is a byte offset; `line` and `column` are 1-based, with the
/// column counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    /// Byte offset into the template source.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column (in characters).
    pub column: usize,
}

impl Location {
    /// Compute the location of a byte offset within `source`.
    ///
    /// Offsets past the end of the source are clamped to the end.
    pub fn at(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Error type for template parsing and rendering failures.
///
/// Every variant is fatal to the render call that produced it; no partial
/// output is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// Structural problem: unbalanced or misordered block tags, an unknown
    /// tag or filter, or an expression that cannot be parsed.
    #[error("malformed template at {location}: {message}")]
    Malformed {
        /// Human-readable description of the problem.
        message: String,
        /// Where the problem was detected.
        location: Location,
    },

    /// A referenced name or path component is missing from the context.
    #[error("undefined variable '{name}' at {location}")]
    UndefinedVariable {
        /// The dotted/indexed path up to and including the missing component.
        name: String,
        /// The position of the expression referencing it.
        location: Location,
    },

    /// A value had the wrong shape for how the template used it.
    #[error("type mismatch at {location}: {message}")]
    TypeMismatch {
        /// Description of the expected and found types.
        message: String,
        /// The position of the offending expression.
        location: Location,
    },
}

impl TemplateError {
    pub(crate) fn malformed(source: &str, offset: usize, message: impl Into<String>) -> Self {
        TemplateError::Malformed {
            message: message.into(),
            location: Location::at(source, offset),
        }
    }

    pub(crate) fn undefined(source: &str, offset: usize, name: impl Into<String>) -> Self {
        TemplateError::UndefinedVariable {
            name: name.into(),
            location: Location::at(source, offset),
        }
    }

    pub(crate) fn mismatch(source: &str, offset: usize, message: impl Into<String>) -> Self {
        TemplateError::TypeMismatch {
            message: message.into(),
            location: Location::at(source, offset),
        }
    }

    /// The location associated with this error.
    pub fn location(&self) -> Location {
        match self {
            TemplateError::Malformed { location, .. }
            | TemplateError::UndefinedVariable { location, .. }
            | TemplateError::TypeMismatch { location, .. } => *location,
        }
    }
}

/// Error type for building a [`Context`](super::Context) from external data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    /// The document could not be parsed at all.
    #[error("failed to parse context document: {0}")]
    Parse(String),

    /// The top level of the document was not a mapping.
    #[error("context document must be a mapping at the top level, found {0}")]
    NotAMapping(&'static str),

    /// A value cannot be represented as a context value.
    #[error("unsupported value at '{path}': {reason}")]
    Unsupported {
        /// Path to the offending value.
        path: String,
        /// Why it was rejected.
        reason: String,
    },
}
