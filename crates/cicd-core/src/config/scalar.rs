//! Scalar coercion for option values
//!
//! YAML readily produces numbers and booleans where a string is meant
//! (`gitRepo: 2048`, `excludestages: [2023]`). Options and `envVars` values
//! accept any scalar and keep its textual form; lists and mappings are
//! rejected.

use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

/// Textual form of a scalar; `None` for lists and mappings
///
/// `null` becomes the empty string.
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
        _ => "a scalar",
    }
}

fn coerce<E: de::Error>(value: &Value) -> Result<String, E> {
    scalar_to_string(value)
        .ok_or_else(|| E::custom(format!("expected a scalar value, found {}", kind(value))))
}

/// `deserialize_with` helper for optional scalar fields
///
/// An explicit `null` leaves the field unset.
pub(crate) fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value) => coerce(&value).map(Some),
        None => Ok(None),
    }
}

/// `deserialize_with` helper for optional lists of scalars
pub(crate) fn optional_string_list<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Vec<Value>>::deserialize(deserializer)? {
        Some(values) => values
            .iter()
            .map(coerce::<D::Error>)
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        None => Ok(None),
    }
}
