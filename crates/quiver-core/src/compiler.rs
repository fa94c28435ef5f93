//! One-call compilation from client request to wire bytes.

use std::sync::Arc;

use crate::assembler::{assemble_query, assemble_search};
use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::request::{CanonicalSearchRequest, HeadParams, QueryParams, QueryRequest, SearchParams};
use crate::schema::{SchemaProvider, Space};
use crate::wire::{encode_query_request, encode_search_request};

/// Binds a schema provider and search settings to the translation pipeline.
///
/// Each call takes one space snapshot and works on it alone, so a schema
/// replaced mid-request affects only later calls.
///
/// # Example
///
/// ```
/// use quiver_core::{SearchCompiler, SearchConfig, SearchParams, HeadParams, Space, SpaceRegistry};
/// use quiver_core::schema::{FieldDescriptor, FieldType};
///
/// let registry = SpaceRegistry::new();
/// registry.register(
///     Space::new("products").with_field(FieldDescriptor::scalar("city", FieldType::String, true)),
/// );
///
/// let compiler = SearchCompiler::new(registry, SearchConfig::default());
/// let bytes = compiler
///     .compile_search("products", SearchParams::default(), HeadParams::new())
///     .unwrap();
/// assert!(!bytes.is_empty());
/// ```
#[derive(Debug)]
pub struct SearchCompiler<P> {
    provider: P,
    config: SearchConfig,
}

impl<P: SchemaProvider> SearchCompiler<P> {
    /// Creates a compiler over `provider`.
    pub fn new(provider: P, config: SearchConfig) -> Self {
        Self { provider, config }
    }

    /// Returns the schema provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the search settings.
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Assembles a search request without encoding it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpaceNotFound`] for an unknown space, otherwise
    /// the first assembly error.
    pub fn prepare_search(
        &self,
        space: &str,
        params: SearchParams,
        head: HeadParams,
    ) -> Result<CanonicalSearchRequest> {
        let snapshot = self.snapshot(space)?;
        assemble_search(&snapshot, params, head, &self.config)
    }

    /// Assembles and encodes a search request.
    ///
    /// # Errors
    ///
    /// See [`SearchCompiler::prepare_search`].
    pub fn compile_search(&self, space: &str, params: SearchParams, head: HeadParams) -> Result<Vec<u8>> {
        let request = self.prepare_search(space, params, head)?;
        Ok(encode_search_request(&request))
    }

    /// Assembles a filter-only query without encoding it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SpaceNotFound`] for an unknown space, otherwise
    /// the first assembly error.
    pub fn prepare_query(&self, space: &str, params: QueryParams, head: &HeadParams) -> Result<QueryRequest> {
        let snapshot = self.snapshot(space)?;
        assemble_query(&snapshot, params, head, &self.config)
    }

    /// Assembles and encodes a filter-only query.
    ///
    /// # Errors
    ///
    /// See [`SearchCompiler::prepare_query`].
    pub fn compile_query(&self, space: &str, params: QueryParams, head: &HeadParams) -> Result<Vec<u8>> {
        let request = self.prepare_query(space, params, head)?;
        Ok(encode_query_request(&request))
    }

    fn snapshot(&self, space: &str) -> Result<Arc<Space>> {
        self.provider.space(space).ok_or_else(|| {
            tracing::warn!(space = %space, "Compile requested for unknown space");
            Error::SpaceNotFound(space.to_string())
        })
    }
}
