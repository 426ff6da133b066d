//! Template engine for scripts and documents.
//!
//! Templates are plain text with two delimiter families:
//!
//! - `{{ expr }}` interpolates a value, optionally through filters
//!   (`{{ codes | join(",") }}`, `{{ name | default("demo") }}`)
//! - `{% if cond %}` / `{% else %}` / `{% endif %}` and
//!   `{% for item in seq %}` / `{% endfor %}` are block tags
//!
//! Everything outside the delimiters is copied byte for byte; whitespace
//! around tags is never trimmed, because generated shell scripts depend on
//! it. `{% raw %}...{% endraw %}` emits its body without interpreting it.
//!
//! # Error Handling
//!
//! Rendering is strict. Referencing a name that is not in the context is an
//! error unless a `default` filter supplies a value, conditions must be
//! booleans, and loops must iterate sequences. On any error no output is
//! produced.
//!
//! ```
//! use stencil::template::{render, Context};
//!
//! let ctx = Context::new().with("files", vec!["x", "y"]);
//! let out = render("{% for f in files %}run {{ f }}{% endfor %}", &ctx).unwrap();
//! assert_eq!(out, "run xrun y");
//! ```

mod ast;
mod context;
mod error;
mod eval;
mod expr;
mod filters;
mod lexer;
mod parser;
mod value;

#[cfg(test)]
mod tests;

pub use context::Context;
pub use error::{ContextError, Location, TemplateError};
pub use value::Value;

use ast::Segment;
use context::Scope;
use eval::Evaluator;
use std::str::FromStr;

/// A parsed template.
///
/// Parsing happens once; the same template can then be rendered any number
/// of times, including from several threads at once, against different
/// contexts.
#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parse template source.
    pub fn parse(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        let segments = parser::parse(&source)?;
        Ok(Self { source, segments })
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render against `context`.
    pub fn render(&self, context: &Context) -> Result<String, TemplateError> {
        let mut out = String::with_capacity(self.source.len());
        let scope = Scope::Root(context);
        Evaluator::new(&self.source).render_segments(&self.segments, &scope, &mut out)?;
        Ok(out)
    }
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Template::parse(s)
    }
}

/// Parse and render `template` in one step.
pub fn render(template: &str, context: &Context) -> Result<String, TemplateError> {
    Template::parse(template)?.render(context)
}
