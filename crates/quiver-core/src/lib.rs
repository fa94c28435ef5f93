//! # `Quiver` Core
//!
//! Query translation for a distributed vector search engine.
//!
//! `Quiver` takes the schema-less JSON search request a client sends,
//! validates it against the collection schema ("space") and produces the
//! binary `Request` table the search engine executes.
//!
//! ## Pipeline
//!
//! - **Query parser**: splits the body into vector, filter and control sections
//! - **Vector normalizer**: dimension and batch checks, score window, raw bytes
//! - **Range / term builders**: order-preserving bounds, joined term values
//! - **Assembler**: output fields, sort direction, sizes, head parameters
//! - **Wire encoder**: FlatBuffers `Request` table, children first
//!
//! ## Quick Start
//!
//! ```rust
//! use quiver_core::{decode_request, HeadParams, SearchCompiler, SearchConfig, SearchParams, Space, SpaceRegistry};
//! use serde_json::json;
//!
//! let space = Space::from_json(r#"{
//!     "name": "products",
//!     "fields": [
//!         {"name": "city", "type": "keyword", "index": {"type": "SCALAR"}},
//!         {"name": "age", "type": "integer", "index": {"type": "SCALAR"}},
//!         {"name": "embedding", "type": "vector", "dimension": 4}
//!     ],
//!     "index": {"type": "HNSW", "params": {"metric_type": "L2"}}
//! }"#)?;
//!
//! let registry = SpaceRegistry::new();
//! registry.register(space);
//! let compiler = SearchCompiler::new(registry, SearchConfig::default());
//!
//! let params: SearchParams = serde_json::from_value(json!({
//!     "query": {
//!         "vector": [{"field": "embedding", "feature": [0.1, 0.2, 0.3, 0.4]}],
//!         "filter": [{"range": {"age": {"gte": 18}}}]
//!     },
//!     "size": 10
//! }))?;
//!
//! let bytes = compiler.compile_search("products", params, HeadParams::new())?;
//! let decoded = decode_request(&bytes)?;
//! assert_eq!(decoded.topn, 10);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Bound and feature conversions are range-checked before casting.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::derive_partial_eq_without_eq)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::single_match_else)]
#![allow(clippy::manual_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::wildcard_imports)]
#![allow(clippy::missing_errors_doc)]

pub mod assembler;
pub mod compiler;
pub mod config;
pub mod error;
pub mod filter;
pub mod query;
pub mod request;
pub mod schema;
#[cfg(test)]
mod schema_tests;
#[cfg(test)]
mod test_support;
pub mod util;
pub mod vector_query;
#[cfg(test)]
mod vector_query_tests;
pub mod wire;

pub use assembler::{assemble_query, assemble_search};
pub use compiler::SearchCompiler;
pub use config::{ConfigError, LoggingConfig, QuiverConfig, SearchConfig};
pub use error::{Error, Result};
pub use filter::{FilterClause, RangeFilter, TermFilter, TermMode};
pub use query::{parse_filters, parse_query, parse_query_value, ParsedFilters, ParsedQuery};
pub use request::{CanonicalSearchRequest, HeadParams, QueryParams, QueryRequest, SearchParams};
pub use schema::{FieldDescriptor, FieldType, SchemaProvider, Space, SpaceRegistry};
pub use vector_query::{parse_vector_query, parse_vector_query_in_batch, VectorQuery};
pub use wire::{decode_request, encode_query_request, encode_search_request, DecodedRequest, Encodable};
