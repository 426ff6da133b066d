//! Single-pass evaluation of a parsed template against a scope chain.

use super::ast::{Accessor, CompareOp, Expr, ExprKind, Interpolation, Path, Segment};
use super::context::Scope;
use super::error::TemplateError;
use super::filters;
use super::value::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

pub(crate) struct Evaluator<'t> {
    source: &'t str,
}

impl<'t> Evaluator<'t> {
    pub(crate) fn new(source: &'t str) -> Self {
        Self { source }
    }

    pub(crate) fn render_segments(
        &self,
        segments: &[Segment],
        scope: &Scope<'_>,
        out: &mut String,
    ) -> Result<(), TemplateError> {
        for segment in segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Variable(interpolation) => {
                    let value = self.interpolate(interpolation, scope)?;
                    match value.to_text() {
                        Some(text) => out.push_str(&text),
                        None => {
                            return Err(self.mismatch(
                                interpolation.expr.offset,
                                format!(
                                    "cannot interpolate a {} directly; use the `join` filter or index into it",
                                    value.type_name()
                                ),
                            ));
                        }
                    }
                }
                Segment::Conditional {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    if self.eval_bool(condition, scope)? {
                        self.render_segments(then_branch, scope, out)?;
                    } else if let Some(else_branch) = else_branch {
                        self.render_segments(else_branch, scope, out)?;
                    }
                }
                Segment::Loop {
                    binding,
                    iterable,
                    body,
                } => {
                    let target = self.resolve(iterable, scope)?;
                    let Some(items) = target.as_seq() else {
                        return Err(self.mismatch(
                            iterable.offset,
                            format!(
                                "`{}` is a {}, but `for` needs a sequence",
                                iterable,
                                target.type_name()
                            ),
                        ));
                    };
                    let count = items.len();
                    for (index, item) in items.iter().enumerate() {
                        let meta = loop_metadata(index, count);
                        let item_scope = Scope::Overlay {
                            name: binding,
                            value: item,
                            parent: scope,
                        };
                        let loop_scope = Scope::Overlay {
                            name: "loop",
                            value: &meta,
                            parent: &item_scope,
                        };
                        self.render_segments(body, &loop_scope, out)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn interpolate<'a>(
        &self,
        interpolation: &Interpolation,
        scope: &Scope<'a>,
    ) -> Result<Cow<'a, Value>, TemplateError> {
        // An undefined-variable error travels down the chain until a
        // `default` filter replaces it.
        let mut current: Result<Cow<'a, Value>, TemplateError> =
            self.eval(&interpolation.expr, scope);

        for filter in &interpolation.filters {
            current = match current {
                Err(err @ TemplateError::UndefinedVariable { .. }) => {
                    if filter.name == "default" {
                        self.eval(&filter.args[0], scope)
                    } else {
                        Err(err)
                    }
                }
                Err(err) => return Err(err),
                Ok(value) if filter.name == "default" => Ok(value),
                Ok(value) => {
                    let args = filter
                        .args
                        .iter()
                        .map(|arg| self.eval(arg, scope).map(Cow::into_owned))
                        .collect::<Result<Vec<_>, _>>()?;
                    filters::apply(&filter.name, &value, &args)
                        .map(Cow::Owned)
                        .map_err(|message| self.mismatch(filter.offset, message))
                }
            };
        }

        current
    }

    fn eval<'a>(&self, expr: &Expr, scope: &Scope<'a>) -> Result<Cow<'a, Value>, TemplateError> {
        match &expr.kind {
            ExprKind::Path(path) => self.resolve(path, scope).map(Cow::Borrowed),
            ExprKind::Str(s) => Ok(Cow::Owned(Value::String(s.clone()))),
            ExprKind::Bool(b) => Ok(Cow::Owned(Value::Bool(*b))),
            ExprKind::Not(inner) => Ok(Cow::Owned(Value::Bool(!self.eval_bool(inner, scope)?))),
            ExprKind::And(left, right) => {
                let result = self.eval_bool(left, scope)? && self.eval_bool(right, scope)?;
                Ok(Cow::Owned(Value::Bool(result)))
            }
            ExprKind::Or(left, right) => {
                let result = self.eval_bool(left, scope)? || self.eval_bool(right, scope)?;
                Ok(Cow::Owned(Value::Bool(result)))
            }
            ExprKind::Compare { op, left, right } => {
                let lhs = self.eval(left, scope)?;
                let rhs = self.eval(right, scope)?;
                let result = match op {
                    CompareOp::Eq => lhs == rhs,
                    CompareOp::Ne => lhs != rhs,
                    CompareOp::In => self.contains(&rhs, &lhs, right.offset)?,
                    CompareOp::NotIn => !self.contains(&rhs, &lhs, right.offset)?,
                };
                Ok(Cow::Owned(Value::Bool(result)))
            }
        }
    }

    fn eval_bool(&self, expr: &Expr, scope: &Scope<'_>) -> Result<bool, TemplateError> {
        let value = self.eval(expr, scope)?;
        value.as_bool().ok_or_else(|| {
            self.mismatch(
                expr.offset,
                format!("condition must be a boolean, found {}", value.type_name()),
            )
        })
    }

    fn contains(&self, haystack: &Value, needle: &Value, offset: usize) -> Result<bool, TemplateError> {
        match (haystack, needle) {
            (Value::Seq(items), _) => Ok(items.contains(needle)),
            (Value::String(s), Value::String(sub)) => Ok(s.contains(sub.as_str())),
            (Value::Map(map), Value::String(key)) => Ok(map.contains_key(key)),
            (Value::Bool(_), _) => Err(self.mismatch(
                offset,
                "`in` needs a sequence, string or mapping on the right, found boolean",
            )),
            (_, other) => Err(self.mismatch(
                offset,
                format!(
                    "`in` on a {} needs a string on the left, found {}",
                    haystack.type_name(),
                    other.type_name()
                ),
            )),
        }
    }

    fn resolve<'a>(&self, path: &Path, scope: &Scope<'a>) -> Result<&'a Value, TemplateError> {
        let mut current = scope
            .lookup(&path.root)
            .ok_or_else(|| TemplateError::undefined(self.source, path.offset, path.root.clone()))?;

        for (depth, accessor) in path.accessors.iter().enumerate() {
            let next = match (current, accessor) {
                (Value::Map(map), Accessor::Key(key)) => map.get(key),
                (Value::Map(map), Accessor::Index(index)) => map.get(&index.to_string()),
                (Value::Seq(items), Accessor::Index(index)) => items.get(*index),
                (Value::Seq(_), Accessor::Key(key)) => {
                    return Err(self.mismatch(
                        path.offset,
                        format!(
                            "`{}` is a sequence; cannot look up `{}` on it",
                            path.display_prefix(depth),
                            key
                        ),
                    ));
                }
                (scalar, _) => {
                    return Err(self.mismatch(
                        path.offset,
                        format!(
                            "`{}` is a {}; cannot access `{}` on it",
                            path.display_prefix(depth),
                            scalar.type_name(),
                            accessor
                        ),
                    ));
                }
            };
            current = next.ok_or_else(|| {
                TemplateError::undefined(self.source, path.offset, path.display_prefix(depth + 1))
            })?;
        }

        Ok(current)
    }

    fn mismatch(&self, offset: usize, message: impl Into<String>) -> TemplateError {
        TemplateError::mismatch(self.source, offset, message)
    }
}

fn loop_metadata(index: usize, count: usize) -> Value {
    let mut meta = BTreeMap::new();
    meta.insert("index".to_string(), Value::String((index + 1).to_string()));
    meta.insert("index0".to_string(), Value::String(index.to_string()));
    meta.insert("first".to_string(), Value::Bool(index == 0));
    meta.insert("last".to_string(), Value::Bool(index + 1 == count));
    Value::Map(meta)
}
