//! Query body parsing.
//!
//! The body of a search request is a loose envelope with three optional
//! sections: `vector` (similarity clauses), `filter` (range and term
//! clauses) and `online_log_level`. An empty body, whitespace or `null`
//! matches everything.
//!
//! Parsing is all-or-nothing: the result is only produced once every
//! clause has been validated, so a failing body never leaves partial
//! state in the caller's request.

use serde::Deserialize;
use serde_json::Value;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::filter::{BuiltFilters, FilterClause, RangeFilter, TermFilter};
use crate::schema::Space;
use crate::vector_query::{parse_vector_query_in_batch, VectorQuery};

#[cfg(test)]
mod query_tests;

#[derive(Debug, Default, Deserialize)]
struct Envelope {
    vector: Option<Vec<Value>>,
    filter: Option<Vec<Value>>,
    online_log_level: Option<String>,
}

impl Envelope {
    fn from_slice(body: &[u8]) -> Result<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let envelope: Option<Self> = serde_json::from_slice(body)?;
        Ok(envelope.unwrap_or_default())
    }

    fn from_value(body: Value) -> Result<Self> {
        let envelope: Option<Self> = serde_json::from_value(body)?;
        Ok(envelope.unwrap_or_default())
    }
}

/// Everything the parser extracted from one query body.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    /// Number of query vectors per clause, 1 without vector clauses.
    pub batch_count: usize,
    /// Normalized vector clauses in body order.
    pub vector_queries: Vec<VectorQuery>,
    /// Range filters in body order.
    pub range_filters: Vec<RangeFilter>,
    /// Term filters in body order.
    pub term_filters: Vec<TermFilter>,
    /// Requested online log level, empty when absent.
    pub online_log_level: String,
    /// 1 when the body carries vector clauses, otherwise 0.
    pub multi_vector_rank: i32,
}

impl Default for ParsedQuery {
    fn default() -> Self {
        Self {
            batch_count: 1,
            vector_queries: Vec::new(),
            range_filters: Vec::new(),
            term_filters: Vec::new(),
            online_log_level: String::new(),
            multi_vector_rank: 0,
        }
    }
}

/// Filters extracted from the `filter` section alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFilters {
    /// Range filters in body order.
    pub range_filters: Vec<RangeFilter>,
    /// Term filters in body order.
    pub term_filters: Vec<TermFilter>,
    /// Requested online log level, empty when absent.
    pub online_log_level: String,
}

/// Parses a raw query body against `space`.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`](crate::Error::MalformedInput) if the body is not valid JSON of the
/// envelope shape, and otherwise the first error of any clause builder.
/// [`Error::BatchSizeMismatch`](crate::Error::BatchSizeMismatch) is returned when vector clauses disagree
/// on their batch count.
pub fn parse_query(body: &[u8], space: &Space, config: &SearchConfig) -> Result<ParsedQuery> {
    let envelope = Envelope::from_slice(body)?;
    parse_envelope(envelope, space, config)
}

/// Same as [`parse_query`] for a body that is already decoded.
///
/// # Errors
///
/// See [`parse_query`].
pub fn parse_query_value(body: Value, space: &Space, config: &SearchConfig) -> Result<ParsedQuery> {
    let envelope = Envelope::from_value(body)?;
    parse_envelope(envelope, space, config)
}

/// Parses only the `filter` section and log level of a body.
///
/// Any `vector` section is ignored.
///
/// # Errors
///
/// Returns the first error of the filter builders.
pub fn parse_filters(body: Value, space: &Space) -> Result<ParsedFilters> {
    let envelope = Envelope::from_value(body)?;
    let (range_filters, term_filters) = build_filters(envelope.filter.unwrap_or_default(), space)?;

    Ok(ParsedFilters {
        range_filters,
        term_filters,
        online_log_level: envelope.online_log_level.unwrap_or_default(),
    })
}

fn parse_envelope(envelope: Envelope, space: &Space, config: &SearchConfig) -> Result<ParsedQuery> {
    let vectors = envelope.vector.unwrap_or_default();
    let multi_vector_rank = i32::from(!vectors.is_empty());

    let mut batch_count = 0usize;
    let mut vector_queries = Vec::with_capacity(vectors.len());
    for clause in vectors {
        let (query, batch) =
            parse_vector_query_in_batch(clause, space, &config.binary_index_type, batch_count)?;
        batch_count = batch;
        vector_queries.push(query);
    }

    let (range_filters, term_filters) = build_filters(envelope.filter.unwrap_or_default(), space)?;

    let parsed = ParsedQuery {
        batch_count: batch_count.max(1),
        vector_queries,
        range_filters,
        term_filters,
        online_log_level: envelope.online_log_level.unwrap_or_default(),
        multi_vector_rank,
    };

    tracing::debug!(
        space = space.name(),
        batch_count = parsed.batch_count,
        vectors = parsed.vector_queries.len(),
        ranges = parsed.range_filters.len(),
        terms = parsed.term_filters.len(),
        "Parsed query body"
    );

    Ok(parsed)
}

fn build_filters(entries: Vec<Value>, space: &Space) -> Result<(Vec<RangeFilter>, Vec<TermFilter>)> {
    let mut ranges = Vec::new();
    let mut terms = Vec::new();

    for entry in entries {
        let Some(clause) = FilterClause::from_value(entry)? else {
            continue;
        };
        match clause.build(space)? {
            BuiltFilters::Range(filters) => ranges.extend(filters),
            BuiltFilters::Term(filters) => terms.extend(filters),
        }
    }

    Ok((ranges, terms))
}
