//! Request-level parameters and the canonical requests built from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter::{RangeFilter, TermFilter};
use crate::util::json::deserialize_lenient_bool;
use crate::vector_query::VectorQuery;

/// URL and routing parameters attached to a request.
pub type HeadParams = BTreeMap<String, String>;

/// Head parameter overriding the result size.
pub const HEAD_SIZE: &str = "size";
/// Head parameter restricting output to the ID field.
pub const HEAD_QUERY_ONLY_ID: &str = "queryOnlyId";
/// Head parameter selecting the replica balancing strategy.
pub const HEAD_LOAD_BALANCE: &str = "load_balance";
/// Head parameter carrying the routing key.
pub const HEAD_ROUTING: &str = "routing";
/// Head parameter carrying the result sort direction.
pub const HEAD_SORT: &str = "sort";

/// Parameters of a similarity search request.
///
/// Flags accept the loose JSON forms clients send (`true`, `1`, `"true"`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// Query body with `vector`, `filter` and `online_log_level` sections.
    pub query: Option<Value>,
    /// Requested number of results.
    pub size: Option<i32>,
    /// Output fields; empty or absent selects every scalar field.
    pub fields: Option<Vec<String>>,
    /// Also return vector fields.
    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub vector_value: bool,
    /// Skip the index and scan every vector.
    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub is_brute_search: bool,
    /// Per-request index parameters, overriding the space's.
    pub index_params: Option<Value>,
    /// Skip re-ranking.
    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub quick: bool,
    /// Return square-rooted L2 distances.
    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub l2_sqrt: bool,
    /// Replica balancing strategy.
    pub load_balance: String,
    /// Routing key.
    pub routing: String,
    /// Multi-vector ranker definition.
    pub ranker: Option<Value>,
    /// Ask the engine for a trace.
    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub trace: bool,
}

/// Parameters of a filter-only document query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    /// Query body; only its `filter` section and log level are used.
    pub query: Option<Value>,
    /// Output fields; empty or absent selects every scalar field.
    pub fields: Option<Vec<String>>,
    /// Also return vector fields.
    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub vector_value: bool,
    /// Maximum number of documents.
    pub limit: Option<i32>,
    /// Ask the engine for a trace.
    #[serde(deserialize_with = "deserialize_lenient_bool")]
    pub trace: bool,
}

/// A validated similarity search, ready for encoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalSearchRequest {
    /// Number of query vectors per vector clause.
    pub batch_count: i32,
    /// Number of results per query vector.
    pub topn: i32,
    /// Brute-force search requested.
    pub brute_force: bool,
    /// Normalized vector clauses.
    pub vector_queries: Vec<VectorQuery>,
    /// Numeric range filters.
    pub range_filters: Vec<RangeFilter>,
    /// String term filters.
    pub term_filters: Vec<TermFilter>,
    /// Output fields; the ID field appears exactly once.
    pub fields: Vec<String>,
    /// Index parameters as JSON text, empty when the space's apply.
    pub index_params: String,
    /// 1 when vector clauses are ranked together.
    pub multi_vector_rank: i32,
    /// Square-rooted L2 distances.
    pub l2_sqrt: bool,
    /// Ranker definition as JSON text.
    pub ranker: String,
    /// Head parameters including the derived `sort`.
    pub head_params: HeadParams,
    /// Re-ranking enabled.
    pub has_rank: bool,
    /// Vector fields requested in the output.
    pub is_vector_value: bool,
    /// Online log level from the query body.
    pub online_log_level: String,
    /// Trace requested.
    pub trace: bool,
    /// Client type, taken from the `load_balance` head parameter.
    pub client_type: String,
}

/// A validated filter-only document query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    /// Output fields; the ID field appears exactly once.
    pub fields: Vec<String>,
    /// Numeric range filters.
    pub range_filters: Vec<RangeFilter>,
    /// String term filters.
    pub term_filters: Vec<TermFilter>,
    /// Maximum number of documents.
    pub limit: i32,
    /// Trace requested.
    pub trace: bool,
    /// Online log level from the query body.
    pub online_log_level: String,
}
