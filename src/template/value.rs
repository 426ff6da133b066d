//! Context values.
//!
//! Values are a closed set of variants so that path resolution and type
//! errors are well defined: strings, booleans, ordered sequences and
//! string-keyed mappings.

use super::error::ContextError;
use serde::Serialize;
use std::collections::BTreeMap;

/// A value bound in a rendering context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A text value.
    String(String),
    /// A boolean flag.
    Bool(bool),
    /// An ordered sequence of values.
    Seq(Vec<Value>),
    /// A mapping from names to values, ordered by key.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Name of this value's variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "boolean",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
        }
    }

    /// Borrow the string content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The boolean content, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow the elements, if this is a sequence.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the entries, if this is a mapping.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// The text emitted when this value is interpolated.
    ///
    /// Only scalars have a text form; sequences and mappings return `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Seq(_) | Value::Map(_) => None,
        }
    }

    /// Convert a YAML value, reporting problems against `path`.
    ///
    /// Numbers become the text of the number YAML parsed, not of the source:
    /// `3.10` is the float 3.1 and becomes `"3.1"`. Versions must be quoted.
    /// `null` is only meaningful as a missing mapping entry (see
    /// [`Value::entries_from_yaml`]) and is rejected here.
    pub(crate) fn from_yaml(value: serde_yaml::Value, path: &str) -> Result<Self, ContextError> {
        match value {
            serde_yaml::Value::String(s) => Ok(Value::String(s)),
            serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_yaml::Value::Number(n) => Ok(Value::String(n.to_string())),
            serde_yaml::Value::Sequence(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Value::from_yaml(item, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Seq),
            serde_yaml::Value::Mapping(map) => Value::entries_from_yaml(map, path).map(Value::Map),
            serde_yaml::Value::Null => Err(ContextError::Unsupported {
                path: path.to_string(),
                reason: "null is not allowed here".to_string(),
            }),
            serde_yaml::Value::Tagged(tagged) => Err(ContextError::Unsupported {
                path: path.to_string(),
                reason: format!("tagged value '{}' is not supported", tagged.tag),
            }),
        }
    }

    /// Convert the entries of a YAML mapping, dropping `null` entries.
    pub(crate) fn entries_from_yaml(
        map: serde_yaml::Mapping,
        path: &str,
    ) -> Result<BTreeMap<String, Value>, ContextError> {
        let mut entries = BTreeMap::new();
        for (key, value) in map {
            let key = yaml_key(key, path)?;
            if value.is_null() {
                continue;
            }
            let child = join_path(path, &key);
            entries.insert(key, Value::from_yaml(value, &child)?);
        }
        Ok(entries)
    }

    /// Convert a JSON value, reporting problems against `path`.
    pub(crate) fn from_json(value: serde_json::Value, path: &str) -> Result<Self, ContextError> {
        match value {
            serde_json::Value::String(s) => Ok(Value::String(s)),
            serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
            serde_json::Value::Number(n) => Ok(Value::String(n.to_string())),
            serde_json::Value::Array(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, item)| Value::from_json(item, &format!("{}[{}]", path, i)))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Seq),
            serde_json::Value::Object(map) => Value::entries_from_json(map, path).map(Value::Map),
            serde_json::Value::Null => Err(ContextError::Unsupported {
                path: path.to_string(),
                reason: "null is not allowed here".to_string(),
            }),
        }
    }

    /// Convert the entries of a JSON object, dropping `null` entries.
    pub(crate) fn entries_from_json(
        map: serde_json::Map<String, serde_json::Value>,
        path: &str,
    ) -> Result<BTreeMap<String, Value>, ContextError> {
        let mut entries = BTreeMap::new();
        for (key, value) in map {
            if value.is_null() {
                continue;
            }
            let child = join_path(path, &key);
            entries.insert(key, Value::from_json(value, &child)?);
        }
        Ok(entries)
    }
}

fn join_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", parent, key)
    }
}

fn yaml_key(key: serde_yaml::Value, path: &str) -> Result<String, ContextError> {
    match key {
        serde_yaml::Value::String(s) => Ok(s),
        serde_yaml::Value::Bool(b) => Ok(b.to_string()),
        serde_yaml::Value::Number(n) => Ok(n.to_string()),
        other => Err(ContextError::Unsupported {
            path: if path.is_empty() {
                "<root>".to_string()
            } else {
                path.to_string()
            },
            reason: format!("mapping key must be a scalar, found {:?}", other),
        }),
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::String(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Self {
        Value::Seq(items.iter().cloned().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
