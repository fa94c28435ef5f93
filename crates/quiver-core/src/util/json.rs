//! JSON utility functions for working with serde_json::Value.
//!
//! Clients send flags and term values with whatever JSON type is handy
//! (`"true"`, `1`, `true`). These helpers coerce them the same way
//! everywhere in the pipeline.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coerces a JSON value to a boolean.
///
/// Booleans map to themselves, numbers are true when non-zero, strings
/// accept `1/t/T/TRUE/true/True` and `0/f/F/FALSE/false/False`. Anything
/// else is false.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use quiver_core::util::json::lenient_bool;
///
/// assert!(lenient_bool(&json!("true")));
/// assert!(lenient_bool(&json!(1)));
/// assert!(!lenient_bool(&json!(null)));
/// ```
#[must_use]
pub fn lenient_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(s.as_str(), "1" | "t" | "T" | "TRUE" | "true" | "True"),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

/// Coerces a JSON value to its string form.
///
/// Strings are returned without quotes, `null` becomes the empty string.
/// Floats use their shortest plain decimal form, so `2.0` becomes `"2"`.
/// Integers and booleans use their JSON text, containers their compact JSON.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use quiver_core::util::json::lenient_string;
///
/// assert_eq!(lenient_string(&json!("NY")), "NY");
/// assert_eq!(lenient_string(&json!(42)), "42");
/// assert_eq!(lenient_string(&json!(2.0)), "2");
/// assert_eq!(lenient_string(&json!(null)), "");
/// ```
#[must_use]
pub fn lenient_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        Value::Number(n) if n.is_f64() => n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string()),
        other => other.to_string(),
    }
}

/// Serde `deserialize_with` helper accepting any JSON scalar as a flag.
///
/// # Errors
///
/// Propagates the deserializer's error if the input is not valid JSON.
pub fn deserialize_lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_bool(&value))
}
