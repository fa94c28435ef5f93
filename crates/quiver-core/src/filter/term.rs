//! Term filter builder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::schema::{FieldType, Space};
use crate::util::lenient_string;

/// Byte placed between the values of a multi-value term.
///
/// Values are not escaped: a value that itself contains this byte splits
/// into two terms on the engine side.
pub const TERM_SEPARATOR: u8 = 0x01;

const OPERATOR_KEY: &str = "operator";

/// How the values of a term filter combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermMode {
    /// Every value must match.
    And,
    /// Any value may match.
    #[default]
    Or,
    /// No value may match.
    Not,
}

impl TermMode {
    /// Parses a case-insensitive operator name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOperatorValue`] for anything but
    /// `and`, `or` or `not`.
    pub fn parse(operator: &str) -> Result<Self> {
        match operator.to_lowercase().as_str() {
            "and" => Ok(Self::And),
            "or" => Ok(Self::Or),
            "not" => Ok(Self::Not),
            _ => Err(Error::UnknownOperatorValue(operator.to_string())),
        }
    }

    /// Wire value of the mode (`is_union`).
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::And => 0,
            Self::Or => 1,
            Self::Not => 2,
        }
    }

    /// Inverse of [`TermMode::as_i32`].
    #[must_use]
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::And),
            1 => Some(Self::Or),
            2 => Some(Self::Not),
            _ => None,
        }
    }
}

/// Equality or membership predicate over a string field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermFilter {
    /// Filtered field.
    pub field: String,
    /// Value bytes, multiple values joined by [`TERM_SEPARATOR`].
    pub value: Vec<u8>,
    /// Combination mode.
    pub mode: TermMode,
}

/// Builds the term filters of one `{"term": {...}}` clause.
///
/// # Errors
///
/// Returns the first operator or schema error met.
pub fn parse_term(clause: &Map<String, Value>, space: &Space) -> Result<Vec<TermFilter>> {
    let mode = match clause.get(OPERATOR_KEY) {
        Some(operator) => TermMode::parse(&lenient_string(operator))?,
        None => TermMode::default(),
    };

    clause
        .iter()
        .filter(|(key, _)| key.as_str() != OPERATOR_KEY)
        .map(|(field, value)| build_term(field, value, mode, space))
        .collect()
}

fn build_term(field: &str, value: &Value, mode: TermMode, space: &Space) -> Result<TermFilter> {
    let descriptor = space
        .field(field)
        .ok_or_else(|| Error::FieldNotFound(field.to_string()))?;

    if descriptor.field_type != FieldType::String {
        return Err(Error::FieldTypeMismatch {
            field: field.to_string(),
            expected: "STRING (use a range filter for numbers)",
            actual: descriptor.field_type.to_string(),
        });
    }

    if !descriptor.indexed {
        return Err(Error::FieldNotIndexed(field.to_string()));
    }

    Ok(TermFilter {
        field: field.to_string(),
        value: join_values(value),
        mode,
    })
}

fn join_values(value: &Value) -> Vec<u8> {
    match value {
        Value::Array(items) => {
            let mut joined = Vec::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    joined.push(TERM_SEPARATOR);
                }
                joined.extend_from_slice(lenient_string(item).as_bytes());
            }
            joined
        }
        scalar => lenient_string(scalar).into_bytes(),
    }
}
