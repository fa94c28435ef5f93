//! Scalar filtering for vector search.
//!
//! The `filter` section of a query is an array of single-key objects:
//!
//! ```json
//! [
//!     {"range": {"age": {"gte": 18, "lt": 65}}},
//!     {"term": {"operator": "or", "city": ["NY", "LA"]}}
//! ]
//! ```
//!
//! Each entry is decoded in two passes: first into an ordered map, then
//! dispatched on its key into a [`FilterClause`]. Range clauses become
//! [`RangeFilter`]s with order-preserving bounds, term clauses become
//! [`TermFilter`]s.

mod numeric;
mod range;
mod term;

#[cfg(test)]
mod numeric_tests;

pub use numeric::{BoundSide, NumericKind, OrderedBytes};
pub use range::{parse_range, RangeFilter};
pub use term::{parse_term, TermFilter, TermMode, TERM_SEPARATOR};

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::schema::Space;

/// One decoded entry of the `filter` array.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// `{"range": {field: {operators}}}`
    Range(Map<String, Value>),
    /// `{"term": {"operator"?, field: value | [values]}}`
    Term(Map<String, Value>),
}

impl FilterClause {
    /// Decodes one filter entry.
    ///
    /// Returns `Ok(None)` for entries that carry no clause: unknown keys or
    /// a `null` clause body. `range` is checked before `term`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the entry or the clause body is
    /// not a JSON object.
    pub fn from_value(entry: Value) -> Result<Option<Self>> {
        let mut map = match entry {
            Value::Object(map) => map,
            other => {
                return Err(Error::MalformedInput(format!(
                    "filter entry must be an object, got {other}"
                )))
            }
        };

        if let Some(body) = map.remove("range") {
            return Ok(clause_body("range", body)?.map(Self::Range));
        }
        if let Some(body) = map.remove("term") {
            return Ok(clause_body("term", body)?.map(Self::Term));
        }

        tracing::warn!(
            keys = ?map.keys().collect::<Vec<_>>(),
            "Skipping filter entry without range or term clause"
        );
        Ok(None)
    }

    /// Builds the filters this clause describes against `space`.
    ///
    /// # Errors
    ///
    /// Propagates the first error of the range or term builder.
    pub fn build(&self, space: &Space) -> Result<BuiltFilters> {
        match self {
            Self::Range(clause) => Ok(BuiltFilters::Range(parse_range(clause, space)?)),
            Self::Term(clause) => Ok(BuiltFilters::Term(parse_term(clause, space)?)),
        }
    }
}

/// Output of [`FilterClause::build`].
#[derive(Debug, Clone, PartialEq)]
pub enum BuiltFilters {
    /// Filters from a range clause.
    Range(Vec<RangeFilter>),
    /// Filters from a term clause.
    Term(Vec<TermFilter>),
}

fn clause_body(kind: &str, body: Value) -> Result<Option<Map<String, Value>>> {
    match body {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(Error::MalformedInput(format!(
            "{kind} clause must be an object, got {other}"
        ))),
    }
}
