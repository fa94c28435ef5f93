//! Binary encoding of canonical requests.
//!
//! The engine consumes one FlatBuffers `Request` table per search. The
//! builder grows backwards, so every child (string, byte vector, nested
//! table, vector of tables) must be complete before its parent table is
//! started. [`Encodable`] splits each table into those two phases.
//!
//! `create_vector` prepends elements last to first, so readers see byte
//! and offset arrays in source order.

mod decode;
pub mod tables;


pub use decode::{decode_request, DecodedRequest, DecodedVectorQuery};

use flatbuffers::{FlatBufferBuilder, WIPOffset};

use crate::filter::{RangeFilter, TermFilter};
use crate::request::{CanonicalSearchRequest, QueryRequest};
use crate::vector_query::VectorQuery;

const INITIAL_CAPACITY: usize = 1024;

/// A value written as one table.
pub trait Encodable {
    /// Offsets and scalars produced by [`Encodable::encode_children`].
    type Children<'fbb>;
    /// Table type written by [`Encodable::write_table`].
    type Table<'fbb>;

    /// Writes every child object and returns their offsets.
    fn encode_children<'fbb>(&self, fbb: &mut FlatBufferBuilder<'fbb>) -> Self::Children<'fbb>;

    /// Writes the table itself from offsets of finished children.
    fn write_table<'fbb>(
        &self,
        fbb: &mut FlatBufferBuilder<'fbb>,
        children: Self::Children<'fbb>,
    ) -> WIPOffset<Self::Table<'fbb>>;

    /// Writes the children, then the table.
    fn encode<'fbb>(&self, fbb: &mut FlatBufferBuilder<'fbb>) -> WIPOffset<Self::Table<'fbb>> {
        let children = self.encode_children(fbb);
        self.write_table(fbb, children)
    }
}

impl Encodable for VectorQuery {
    type Children<'fbb> = tables::VectorQueryArgs<'fbb>;
    type Table<'fbb> = tables::VectorQuery<'fbb>;

    fn encode_children<'fbb>(&self, fbb: &mut FlatBufferBuilder<'fbb>) -> Self::Children<'fbb> {
        tables::VectorQueryArgs {
            name: Some(fbb.create_string(&self.field)),
            value: Some(fbb.create_vector(&self.value)),
            min_score: self.min_score,
            max_score: self.max_score,
            index_type: Some(fbb.create_string(&self.index_type)),
        }
    }

    fn write_table<'fbb>(
        &self,
        fbb: &mut FlatBufferBuilder<'fbb>,
        children: Self::Children<'fbb>,
    ) -> WIPOffset<Self::Table<'fbb>> {
        tables::VectorQuery::create(fbb, &children)
    }
}

impl Encodable for RangeFilter {
    type Children<'fbb> = tables::RangeFilterArgs<'fbb>;
    type Table<'fbb> = tables::RangeFilter<'fbb>;

    fn encode_children<'fbb>(&self, fbb: &mut FlatBufferBuilder<'fbb>) -> Self::Children<'fbb> {
        tables::RangeFilterArgs {
            field: Some(fbb.create_string(&self.field)),
            lower_value: Some(fbb.create_vector(&self.lower_value)),
            upper_value: Some(fbb.create_vector(&self.upper_value)),
            include_lower: self.include_lower,
            include_upper: self.include_upper,
        }
    }

    fn write_table<'fbb>(
        &self,
        fbb: &mut FlatBufferBuilder<'fbb>,
        children: Self::Children<'fbb>,
    ) -> WIPOffset<Self::Table<'fbb>> {
        tables::RangeFilter::create(fbb, &children)
    }
}

impl Encodable for TermFilter {
    type Children<'fbb> = tables::TermFilterArgs<'fbb>;
    type Table<'fbb> = tables::TermFilter<'fbb>;

    fn encode_children<'fbb>(&self, fbb: &mut FlatBufferBuilder<'fbb>) -> Self::Children<'fbb> {
        tables::TermFilterArgs {
            field: Some(fbb.create_string(&self.field)),
            value: Some(fbb.create_vector(&self.value)),
            is_union: self.mode.as_i32(),
        }
    }

    fn write_table<'fbb>(
        &self,
        fbb: &mut FlatBufferBuilder<'fbb>,
        children: Self::Children<'fbb>,
    ) -> WIPOffset<Self::Table<'fbb>> {
        tables::TermFilter::create(fbb, &children)
    }
}

impl Encodable for CanonicalSearchRequest {
    type Children<'fbb> = tables::RequestArgs<'fbb>;
    type Table<'fbb> = tables::Request<'fbb>;

    fn encode_children<'fbb>(&self, fbb: &mut FlatBufferBuilder<'fbb>) -> Self::Children<'fbb> {
        let fields = encode_strings(fbb, &self.fields);
        let vec_fields = encode_tables(fbb, &self.vector_queries);
        let range_filters = encode_tables(fbb, &self.range_filters);
        let term_filters = encode_tables(fbb, &self.term_filters);
        let index_params = fbb.create_string(&self.index_params);
        let ranker = fbb.create_string(&self.ranker);

        tables::RequestArgs {
            req_num: self.batch_count,
            topn: self.topn,
            brute_force_search: i32::from(self.brute_force),
            fields: Some(fields),
            vec_fields: Some(vec_fields),
            range_filters: Some(range_filters),
            term_filters: Some(term_filters),
            index_params: Some(index_params),
            multi_vector_rank: self.multi_vector_rank,
            l2sqrt: self.l2_sqrt,
            ranker: Some(ranker),
            trace: self.trace,
        }
    }

    fn write_table<'fbb>(
        &self,
        fbb: &mut FlatBufferBuilder<'fbb>,
        children: Self::Children<'fbb>,
    ) -> WIPOffset<Self::Table<'fbb>> {
        tables::Request::create(fbb, &children)
    }
}

impl Encodable for QueryRequest {
    type Children<'fbb> = tables::RequestArgs<'fbb>;
    type Table<'fbb> = tables::Request<'fbb>;

    fn encode_children<'fbb>(&self, fbb: &mut FlatBufferBuilder<'fbb>) -> Self::Children<'fbb> {
        let fields = encode_strings(fbb, &self.fields);
        let vec_fields = encode_tables::<VectorQuery>(fbb, &[]);
        let range_filters = encode_tables(fbb, &self.range_filters);
        let term_filters = encode_tables(fbb, &self.term_filters);
        let index_params = fbb.create_string("");
        let ranker = fbb.create_string("");

        tables::RequestArgs {
            req_num: 1,
            topn: self.limit,
            brute_force_search: 0,
            fields: Some(fields),
            vec_fields: Some(vec_fields),
            range_filters: Some(range_filters),
            term_filters: Some(term_filters),
            index_params: Some(index_params),
            multi_vector_rank: 0,
            l2sqrt: false,
            ranker: Some(ranker),
            trace: self.trace,
        }
    }

    fn write_table<'fbb>(
        &self,
        fbb: &mut FlatBufferBuilder<'fbb>,
        children: Self::Children<'fbb>,
    ) -> WIPOffset<Self::Table<'fbb>> {
        tables::Request::create(fbb, &children)
    }
}

fn encode_strings<'fbb>(
    fbb: &mut FlatBufferBuilder<'fbb>,
    values: &[String],
) -> WIPOffset<flatbuffers::Vector<'fbb, flatbuffers::ForwardsUOffset<&'fbb str>>> {
    let offsets: Vec<_> = values.iter().map(|v| fbb.create_string(v)).collect();
    fbb.create_vector(&offsets)
}

fn encode_tables<'fbb, T: Encodable>(
    fbb: &mut FlatBufferBuilder<'fbb>,
    items: &[T],
) -> WIPOffset<flatbuffers::Vector<'fbb, flatbuffers::ForwardsUOffset<T::Table<'fbb>>>> {
    let offsets: Vec<_> = items.iter().map(|item| item.encode(fbb)).collect();
    fbb.create_vector(&offsets)
}

fn finish<T: Encodable>(value: &T) -> Vec<u8> {
    let mut fbb = FlatBufferBuilder::with_capacity(INITIAL_CAPACITY);
    let root = value.encode(&mut fbb);
    fbb.finish(root, None);
    fbb.finished_data().to_vec()
}

/// Encodes a search request into a finished `Request` buffer.
#[must_use]
pub fn encode_search_request(request: &CanonicalSearchRequest) -> Vec<u8> {
    let bytes = finish(request);
    tracing::debug!(
        bytes = bytes.len(),
        vectors = request.vector_queries.len(),
        ranges = request.range_filters.len(),
        terms = request.term_filters.len(),
        "Encoded search request"
    );
    bytes
}

/// Encodes a filter-only query into a finished `Request` buffer.
///
/// Vector-related fields carry fixed defaults: one request, no brute
/// force, no vector clauses, empty index parameters and ranker.
#[must_use]
pub fn encode_query_request(request: &QueryRequest) -> Vec<u8> {
    let bytes = finish(request);
    tracing::debug!(bytes = bytes.len(), "Encoded query request");
    bytes
}
