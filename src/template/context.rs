//! Rendering contexts.
//!
//! A [`Context`] is the read-only root of name bindings. During rendering,
//! loops push [`Scope`] overlays on top of it; an overlay shadows a single
//! name and is dropped at the end of its iteration, so the parent is never
//! modified.

use super::error::ContextError;
use super::value::Value;
use serde::Serialize;
use std::collections::BTreeMap;

/// Root variable bindings for a render call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Context {
    vars: BTreeMap<String, Value>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`Context::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a root binding.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Number of root bindings.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether the context has no bindings.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Iterate root bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Merge `other` into this context; bindings in `other` win.
    pub fn merge(&mut self, other: Context) {
        self.vars.extend(other.vars);
    }

    /// Parse a context from a YAML document whose top level is a mapping.
    ///
    /// An empty document yields an empty context.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ContextError> {
        let doc: serde_yaml::Value =
            serde_yaml::from_str(yaml).map_err(|e| ContextError::Parse(e.to_string()))?;
        match doc {
            serde_yaml::Value::Null => Ok(Self::new()),
            serde_yaml::Value::Mapping(map) => Ok(Self {
                vars: Value::entries_from_yaml(map, "")?,
            }),
            other => Err(ContextError::NotAMapping(yaml_type_name(&other))),
        }
    }

    /// Parse a context from a JSON document whose top level is an object.
    pub fn from_json_str(json: &str) -> Result<Self, ContextError> {
        let doc: serde_json::Value =
            serde_json::from_str(json).map_err(|e| ContextError::Parse(e.to_string()))?;
        match doc {
            serde_json::Value::Object(map) => Ok(Self {
                vars: Value::entries_from_json(map, "")?,
            }),
            other => Err(ContextError::NotAMapping(json_type_name(&other))),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn yaml_type_name(value: &serde_yaml::Value) -> &'static str {
    match value {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

/// A chain of name bindings consulted during evaluation.
pub(crate) enum Scope<'a> {
    Root(&'a Context),
    Overlay {
        name: &'a str,
        value: &'a Value,
        parent: &'a Scope<'a>,
    },
}

impl<'a> Scope<'a> {
    pub(crate) fn lookup(&self, name: &str) -> Option<&'a Value> {
        match *self {
            Scope::Root(ctx) => ctx.get(name),
            Scope::Overlay {
                name: bound,
                value,
                parent,
            } => {
                if bound == name {
                    Some(value)
                } else {
                    parent.lookup(name)
                }
            }
        }
    }
}
