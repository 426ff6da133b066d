//! Parsed template tree.
//!
//! Offsets are byte offsets into the template source and are converted to
//! a [`Location`](super::Location) only when an error is reported.

use std::fmt;

/// One unit of a parsed template.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Segment {
    /// Text emitted verbatim.
    Literal(String),
    /// `{{ expr | filter ... }}`
    Variable(Interpolation),
    /// `{% if cond %} ... {% else %} ... {% endif %}`
    Conditional {
        condition: Expr,
        then_branch: Vec<Segment>,
        else_branch: Option<Vec<Segment>>,
    },
    /// `{% for binding in iterable %} ... {% endfor %}`
    Loop {
        binding: String,
        iterable: Path,
        body: Vec<Segment>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Interpolation {
    pub expr: Expr,
    pub filters: Vec<FilterCall>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FilterCall {
    pub name: String,
    pub args: Vec<Expr>,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Expr {
    pub kind: ExprKind,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ExprKind {
    Path(Path),
    Str(String),
    Bool(bool),
    Not(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompareOp {
    Eq,
    Ne,
    In,
    NotIn,
}

/// A dotted/indexed reference such as `project.dirs[0]`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Path {
    pub root: String,
    pub accessors: Vec<Accessor>,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Accessor {
    /// `.name` or `["name"]`
    Key(String),
    /// `[0]` or `.0`
    Index(usize),
}

impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Accessor::Key(key) => write!(f, ".{}", key),
            Accessor::Index(index) => write!(f, "[{}]", index),
        }
    }
}

impl Path {
    /// Render the path up to (and including) the first `depth` accessors.
    pub(crate) fn display_prefix(&self, depth: usize) -> String {
        let mut out = self.root.clone();
        for accessor in self.accessors.iter().take(depth) {
            out.push_str(&accessor.to_string());
        }
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_prefix(self.accessors.len()))
    }
}
