//! Vector similarity clause normalization.
//!
//! A clause names a vector field and carries one or more concatenated
//! query vectors in `feature`. The normalizer resolves the acting index
//! type, checks the payload against the field dimension, derives the score
//! window and serializes the raw values:
//!
//! - float index types: little-endian IEEE-754 `f32`, `d = dimension`
//! - the binary index type: one byte per element, `d = dimension / 8`
//!
//! The number of vectors in the payload (`len / d`) is the clause's batch
//! count. The query parser cross-checks it across clauses.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::schema::Space;
use crate::util::json::deserialize_lenient_bool;

const DEFAULT_BOOST: f64 = 1.0;
const FORMAT_OPTIONS: [&str; 3] = ["normalization", "normal", "no"];

/// A normalized vector similarity query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorQuery {
    /// Vector field name.
    pub field: String,
    /// Serialized query vectors.
    pub value: Vec<u8>,
    /// Lowest accepted score.
    pub min_score: f64,
    /// Highest accepted score.
    pub max_score: f64,
    /// Score multiplier.
    pub boost: f64,
    /// Whether `boost` was requested explicitly.
    pub has_boost: bool,
    /// Index type the engine should search with.
    pub index_type: String,
}

impl VectorQuery {
    /// Decodes [`VectorQuery::value`] back to floats.
    ///
    /// Returns `None` for binary queries or a length that is not a
    /// multiple of four.
    #[must_use]
    pub fn float_values(&self, binary_index_type: &str) -> Option<Vec<f32>> {
        if self.index_type == binary_index_type || self.value.len() % 4 != 0 {
            return None;
        }
        Some(
            self.value
                .chunks_exact(4)
                .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        )
    }
}

/// Loose shape of one `vector` clause.
#[derive(Debug, Deserialize)]
struct VectorClause {
    #[serde(default)]
    field: String,
    #[serde(default)]
    feature: Value,
    #[serde(default)]
    symbol: String,
    value: Option<f64>,
    boost: Option<f64>,
    format: Option<String>,
    min_score: Option<f64>,
    max_score: Option<f64>,
    #[serde(default)]
    index_type: String,
    #[serde(default, deserialize_with = "deserialize_lenient_bool")]
    has_boost: bool,
}

/// Normalizes one `vector` clause against `space`.
///
/// `binary_index_type` names the index type whose features are packed
/// bytes. Returns the query and its batch count.
///
/// # Errors
///
/// - [`Error::MalformedInput`] if the clause shape or a feature element is invalid
/// - [`Error::FieldNotFound`] / [`Error::FieldTypeMismatch`] for a bad field
/// - [`Error::EmptyFeature`] if `feature` is missing or empty
/// - [`Error::DimensionMismatch`] if the payload is not a positive multiple of `d`
/// - [`Error::UnknownFormatOption`] / [`Error::UnknownSymbolOperator`]
pub fn parse_vector_query(
    clause: Value,
    space: &Space,
    binary_index_type: &str,
) -> Result<(VectorQuery, usize)> {
    parse_vector_query_in_batch(clause, space, binary_index_type, 0)
}

/// Same as [`parse_vector_query`], checked against the batch count of the
/// clauses already parsed (`0` before the first one).
///
/// The batch check runs right after the dimension check, ahead of the
/// format, score and element checks.
///
/// # Errors
///
/// See [`parse_vector_query`], plus [`Error::BatchSizeMismatch`] when the
/// clause's batch count differs from a non-zero `expected_batch`.
pub fn parse_vector_query_in_batch(
    clause: Value,
    space: &Space,
    binary_index_type: &str,
    expected_batch: usize,
) -> Result<(VectorQuery, usize)> {
    let clause: VectorClause = serde_json::from_value(clause)
        .map_err(|e| Error::MalformedInput(format!("invalid vector clause: {e}")))?;

    let descriptor = space
        .field(&clause.field)
        .ok_or_else(|| Error::FieldNotFound(clause.field.clone()))?;

    if !descriptor.is_vector() {
        return Err(Error::FieldTypeMismatch {
            field: clause.field.clone(),
            expected: "VECTOR",
            actual: descriptor.field_type.to_string(),
        });
    }

    let items = match &clause.feature {
        Value::Null => return Err(Error::EmptyFeature(clause.field.clone())),
        Value::Array(items) if items.is_empty() => {
            return Err(Error::EmptyFeature(clause.field.clone()))
        }
        Value::Array(items) => items,
        other => {
            return Err(Error::MalformedInput(format!(
                "feature of field '{}' must be an array, got {other}",
                clause.field
            )))
        }
    };

    let index_type = if clause.index_type.is_empty() {
        space.index_type().to_string()
    } else {
        clause.index_type.clone()
    };
    let binary = index_type == binary_index_type;

    let d = if binary {
        descriptor.dimension / 8
    } else {
        descriptor.dimension
    };
    if d == 0 || items.len() % d != 0 {
        return Err(Error::DimensionMismatch {
            field: clause.field.clone(),
            dimension: d,
            actual: items.len(),
        });
    }
    let batch = items.len() / d;
    if expected_batch != 0 && expected_batch != batch {
        return Err(Error::BatchSizeMismatch {
            field: clause.field,
            expected: expected_batch,
            actual: batch,
        });
    }

    let value = if binary {
        encode_binary(&clause.field, items)?
    } else {
        check_format(clause.format.as_deref())?;
        encode_float(&clause.field, items)?
    };

    let (min_score, max_score) = score_window(&clause)?;

    Ok((
        VectorQuery {
            field: clause.field,
            value,
            min_score,
            max_score,
            boost: clause.boost.unwrap_or(DEFAULT_BOOST),
            has_boost: clause.has_boost,
            index_type,
        },
        batch,
    ))
}

fn check_format(format: Option<&str>) -> Result<()> {
    match format {
        None | Some("") => Ok(()),
        Some(f) if FORMAT_OPTIONS.contains(&f) => Ok(()),
        Some(f) => Err(Error::UnknownFormatOption(f.to_string())),
    }
}

fn score_window(clause: &VectorClause) -> Result<(f64, f64)> {
    let mut min_score = clause.min_score.unwrap_or(-f64::MAX);
    let mut max_score = clause.max_score.unwrap_or(f64::MAX);

    if let Some(value) = clause.value {
        match clause.symbol.trim() {
            ">" | ">=" => min_score = value,
            "<" | "<=" => max_score = value,
            _ => return Err(Error::UnknownSymbolOperator(clause.symbol.clone())),
        }
    }
    Ok((min_score, max_score))
}

fn encode_float(field: &str, items: &[Value]) -> Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(items.len() * 4);
    for item in items {
        let v = item
            .as_f64()
            .map(|f| f as f32)
            .filter(|f| f.is_finite())
            .ok_or_else(|| {
                Error::MalformedInput(format!("feature of field '{field}' has non-float element {item}"))
            })?;
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    Ok(bytes)
}

fn encode_binary(field: &str, items: &[Value]) -> Result<Vec<u8>> {
    items
        .iter()
        .map(|item| {
            item.as_u64()
                .and_then(|n| u8::try_from(n).ok())
                .ok_or_else(|| {
                    Error::MalformedInput(format!(
                        "feature of field '{field}' has element {item} outside 0..=255"
                    ))
                })
        })
        .collect()
}
