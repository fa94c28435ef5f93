//! Range filter builder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::numeric::{BoundSide, NumericKind};
use crate::error::{Error, Result};
use crate::schema::{FieldType, Space};
use crate::util::lenient_bool;

/// Numeric interval predicate with order-preserving encoded bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeFilter {
    /// Filtered field.
    pub field: String,
    /// Encoded lower bound (sentinel when the client gave none).
    pub lower_value: Vec<u8>,
    /// Encoded upper bound (sentinel when the client gave none).
    pub upper_value: Vec<u8>,
    /// Whether the lower bound itself matches.
    pub include_lower: bool,
    /// Whether the upper bound itself matches.
    pub include_upper: bool,
}

struct BoundKeys {
    explicit: &'static str,
    include_flag: &'static str,
    inclusive: &'static str,
    exclusive: &'static str,
}

const LOWER_KEYS: BoundKeys = BoundKeys {
    explicit: "from",
    include_flag: "include_lower",
    inclusive: "gte",
    exclusive: "gt",
};

const UPPER_KEYS: BoundKeys = BoundKeys {
    explicit: "to",
    include_flag: "include_upper",
    inclusive: "lte",
    exclusive: "lt",
};

/// Resolves one side of the range: `(value, inclusive)`.
///
/// `from`/`to` win over `gte`/`lte`, which win over `gt`/`lt`. Null values
/// count as absent. An absent bound is an inclusive sentinel.
fn resolve_bound<'a>(operators: &'a Map<String, Value>, keys: &BoundKeys) -> (Option<&'a Value>, bool) {
    let present = |key: &str| operators.get(key).filter(|v| !v.is_null());

    if let Some(value) = present(keys.explicit) {
        let inclusive = operators.get(keys.include_flag).is_some_and(lenient_bool);
        return (Some(value), inclusive);
    }
    if let Some(value) = present(keys.inclusive) {
        return (Some(value), true);
    }
    if let Some(value) = present(keys.exclusive) {
        return (Some(value), false);
    }
    (None, true)
}

/// Builds the range filters of one `{"range": {...}}` clause.
///
/// Each key of `clause` is a field name mapped to its operator object.
/// Filters come back in clause order.
///
/// # Errors
///
/// Returns the first schema, parse or encoding error met.
pub fn parse_range(clause: &Map<String, Value>, space: &Space) -> Result<Vec<RangeFilter>> {
    clause
        .iter()
        .map(|(field, operators)| build_range(field, operators, space))
        .collect()
}

fn build_range(field: &str, operators: &Value, space: &Space) -> Result<RangeFilter> {
    let descriptor = space
        .field(field)
        .ok_or_else(|| Error::FieldNotFound(field.to_string()))?;

    if descriptor.field_type == FieldType::String {
        return Err(Error::FieldTypeMismatch {
            field: field.to_string(),
            expected: "numeric (use a term filter for strings)",
            actual: descriptor.field_type.to_string(),
        });
    }

    if !descriptor.indexed {
        return Err(Error::FieldNotIndexed(field.to_string()));
    }

    // Null operators select the whole domain
    let empty = Map::new();
    let operators = match operators {
        Value::Object(map) => map,
        Value::Null => &empty,
        _ => {
            return Err(Error::MalformedInput(format!(
                "range operators for field '{field}' must be an object"
            )))
        }
    };

    let (lower, include_lower) = resolve_bound(operators, &LOWER_KEYS);
    let (upper, include_upper) = resolve_bound(operators, &UPPER_KEYS);

    let (lower_value, upper_value) = match NumericKind::for_field_type(descriptor.field_type) {
        Some(kind) => (
            kind.encode_bound(field, lower, BoundSide::Lower)?,
            kind.encode_bound(field, upper, BoundSide::Upper)?,
        ),
        None => (Vec::new(), Vec::new()),
    };

    if lower_value.is_empty() || upper_value.is_empty() {
        return Err(Error::MissingRangeBounds(field.to_string()));
    }

    Ok(RangeFilter {
        field: field.to_string(),
        lower_value,
        upper_value,
        include_lower,
        include_upper,
    })
}
