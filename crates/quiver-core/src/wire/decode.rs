//! Verifying reader for encoded `Request` buffers.

use serde::Serialize;

use super::tables;
use crate::error::{Error, Result};
use crate::filter::{RangeFilter, TermFilter, TermMode};

/// A `VectorQuery` table as read back from the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedVectorQuery {
    /// Vector field name.
    pub name: String,
    /// Serialized query vectors.
    pub value: Vec<u8>,
    /// Lowest accepted score.
    pub min_score: f64,
    /// Highest accepted score.
    pub max_score: f64,
    /// Index type.
    pub index_type: String,
}

/// A `Request` table as read back from the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedRequest {
    /// Batch count.
    pub req_num: i32,
    /// Results per query vector.
    pub topn: i32,
    /// Brute-force flag as written.
    pub brute_force_search: i32,
    /// Output fields.
    pub fields: Vec<String>,
    /// Vector clauses.
    pub vec_fields: Vec<DecodedVectorQuery>,
    /// Range filters.
    pub range_filters: Vec<RangeFilter>,
    /// Term filters.
    pub term_filters: Vec<TermFilter>,
    /// Index parameters as JSON text.
    pub index_params: String,
    /// Multi-vector ranking flag.
    pub multi_vector_rank: i32,
    /// Square-rooted L2 distances.
    pub l2sqrt: bool,
    /// Ranker as JSON text.
    pub ranker: String,
    /// Trace flag.
    pub trace: bool,
}

/// Verifies `bytes` and copies the `Request` table out of it.
///
/// # Errors
///
/// Returns [`Error::Wire`] if the buffer fails verification or a term
/// filter carries an unknown mode.
pub fn decode_request(bytes: &[u8]) -> Result<DecodedRequest> {
    let request = flatbuffers::root::<tables::Request>(bytes)?;

    let fields = request
        .fields()
        .map(|v| v.iter().map(str::to_string).collect())
        .unwrap_or_default();

    let vec_fields = request
        .vec_fields()
        .map(|v| {
            v.iter()
                .map(|q| DecodedVectorQuery {
                    name: q.name().unwrap_or_default().to_string(),
                    value: q.value().map(|b| b.bytes().to_vec()).unwrap_or_default(),
                    min_score: q.min_score(),
                    max_score: q.max_score(),
                    index_type: q.index_type().unwrap_or_default().to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    let range_filters = request
        .range_filters()
        .map(|v| {
            v.iter()
                .map(|r| RangeFilter {
                    field: r.field().unwrap_or_default().to_string(),
                    lower_value: r.lower_value().map(|b| b.bytes().to_vec()).unwrap_or_default(),
                    upper_value: r.upper_value().map(|b| b.bytes().to_vec()).unwrap_or_default(),
                    include_lower: r.include_lower(),
                    include_upper: r.include_upper(),
                })
                .collect()
        })
        .unwrap_or_default();

    let term_filters = match request.term_filters() {
        Some(v) => v
            .iter()
            .map(|t| {
                let mode = TermMode::from_i32(t.is_union())
                    .ok_or_else(|| Error::Wire(format!("unknown term filter mode {}", t.is_union())))?;
                Ok(TermFilter {
                    field: t.field().unwrap_or_default().to_string(),
                    value: t.value().map(|b| b.bytes().to_vec()).unwrap_or_default(),
                    mode,
                })
            })
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok(DecodedRequest {
        req_num: request.req_num(),
        topn: request.topn(),
        brute_force_search: request.brute_force_search(),
        fields,
        vec_fields,
        range_filters,
        term_filters,
        index_params: request.index_params().unwrap_or_default().to_string(),
        multi_vector_rank: request.multi_vector_rank(),
        l2sqrt: request.l2sqrt(),
        ranker: request.ranker().unwrap_or_default().to_string(),
        trace: request.trace(),
    })
}
