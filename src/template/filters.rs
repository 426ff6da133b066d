//! Built-in interpolation filters.
//!
//! | filter            | input    | result                                   |
//! |-------------------|----------|------------------------------------------|
//! | `default(v)`      | any      | `v` when the input is undefined          |
//! | `join(sep?)`      | sequence | scalars joined with `sep` (default `""`) |
//! | `upper`, `lower`  | string   | case-converted string                    |
//! | `trim`            | string   | surrounding whitespace removed           |
//! | `lstrip(chars?)`  | string   | leading `chars` (or whitespace) removed  |
//!
//! `default` is handled by the evaluator because it must observe undefined
//! values; everything else goes through [`apply`].

use super::value::Value;
use std::ops::RangeInclusive;

/// Number of arguments accepted by a filter, or `None` if it is unknown.
pub(crate) fn arity(name: &str) -> Option<RangeInclusive<usize>> {
    match name {
        "default" => Some(1..=1),
        "join" | "lstrip" => Some(0..=1),
        "upper" | "lower" | "trim" => Some(0..=0),
        _ => None,
    }
}

/// Apply a filter other than `default`.
///
/// Returns a type-mismatch message on failure; the caller attaches the
/// location.
pub(crate) fn apply(name: &str, input: &Value, args: &[Value]) -> Result<Value, String> {
    match name {
        "join" => {
            let sep = string_arg(name, args.first())?.unwrap_or("");
            let items = input.as_seq().ok_or_else(|| expected(name, "a sequence", input))?;
            let parts = items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item.to_text().ok_or_else(|| {
                        format!(
                            "filter `join` needs scalar elements, but element {} is a {}",
                            i,
                            item.type_name()
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::String(parts.join(sep)))
        }
        "upper" => string_input(name, input).map(|s| Value::String(s.to_uppercase())),
        "lower" => string_input(name, input).map(|s| Value::String(s.to_lowercase())),
        "trim" => string_input(name, input).map(|s| Value::String(s.trim().to_string())),
        "lstrip" => {
            let s = string_input(name, input)?;
            let stripped = match string_arg(name, args.first())? {
                Some(chars) => s.trim_start_matches(|c: char| chars.contains(c)),
                None => s.trim_start(),
            };
            Ok(Value::String(stripped.to_string()))
        }
        other => Err(format!("filter `{}` cannot be applied here", other)),
    }
}

fn string_input<'v>(name: &str, input: &'v Value) -> Result<&'v str, String> {
    input.as_str().ok_or_else(|| expected(name, "a string", input))
}

fn string_arg<'v>(name: &str, arg: Option<&'v Value>) -> Result<Option<&'v str>, String> {
    match arg {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(format!(
            "filter `{}` expects a string argument, found {}",
            name,
            other.type_name()
        )),
    }
}

fn expected(name: &str, what: &str, found: &Value) -> String {
    format!(
        "filter `{}` expects {}, found {}",
        name,
        what,
        found.type_name()
    )
}
