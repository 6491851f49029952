//! Lenient serde helpers applied to every field of a paper record.
//!
//! Records are hand-written JSON, so any field may be missing, `null`, an
//! empty string, an empty array, or of an unexpected type. All of these
//! collapse to "absent" through a single rule ([`is_absent`]); numeric zero
//! and `false` stay present. None of these helpers ever return an error, so a
//! JSON object always deserializes into a [`Paper`](crate::record::Paper).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// The single absence rule: `null`, `""` and `[]` carry no value.
pub fn is_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// JavaScript-style truthiness, used for availability flags.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar as display text. Objects and arrays are not text.
pub fn value_to_text(value: &Value) -> Option<String> {
    if is_absent(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a number from a JSON number or a numeric string.
pub fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn raw<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Value, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.unwrap_or(Value::Null))
}

/// Optional text field.
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(value_to_text(&raw(deserializer)?))
}

/// Text field that defaults to the empty string when absent.
pub fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text(deserializer)?.unwrap_or_default())
}

/// Optional floating point field. Zero is a value.
pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(value_to_f64(&raw(deserializer)?))
}

/// Optional year. Only whole numbers in `i32` range count.
pub fn year<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    Ok(value_to_f64(&raw(deserializer)?)
        .filter(|f| f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
        .map(|f| f as i32))
}

/// Availability flag: absent means `false`.
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(truthy(&raw(deserializer)?))
}

/// Tri-state boolean: absent, yes or no.
pub fn opt_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    let value = raw(deserializer)?;
    if is_absent(&value) {
        Ok(None)
    } else {
        Ok(Some(truthy(&value)))
    }
}

/// List of display strings. Absent elements are dropped; an empty result is absent.
pub fn text_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Vec<String>>, D::Error> {
    let items: Vec<String> = match raw(deserializer)? {
        Value::Array(items) => items.iter().filter_map(value_to_text).collect(),
        _ => Vec::new(),
    };
    Ok(if items.is_empty() { None } else { Some(items) })
}

/// List of structured entries. Entries that fail to convert are dropped.
pub fn list<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items: Vec<T> = match raw(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(|v| !is_absent(v))
            .filter_map(|v| serde_json::from_value(v).ok())
            .collect(),
        _ => Vec::new(),
    };
    Ok(if items.is_empty() { None } else { Some(items) })
}

/// Nested object. Anything other than a JSON object yields the default.
pub fn object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match raw(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).unwrap_or_default()),
        _ => Ok(T::default()),
    }
}
