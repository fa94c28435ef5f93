//! Fuzz target for the query body parser.
//!
//! Arbitrary bytes are fed as the request body against a fixed space. The
//! parser must return `Ok` or a client error, never panic, and a body it
//! accepts must encode and decode cleanly.

#![no_main]

use libfuzzer_sys::fuzz_target;
use quiver_core::schema::{FieldDescriptor, FieldType};
use quiver_core::{
    assemble_search, decode_request, encode_search_request, parse_query, HeadParams,
    SearchConfig, SearchParams, Space,
};

fn space() -> Space {
    Space::new("fuzz")
        .with_field(FieldDescriptor::scalar("city", FieldType::String, true))
        .with_field(FieldDescriptor::scalar("age", FieldType::Int, true))
        .with_field(FieldDescriptor::scalar("views", FieldType::Long, true))
        .with_field(FieldDescriptor::scalar("price", FieldType::Float, true))
        .with_field(FieldDescriptor::scalar("rating", FieldType::Double, true))
        .with_field(FieldDescriptor::vector("image", 4))
        .with_field(FieldDescriptor::vector("code", 16))
        .with_index("HNSW", serde_json::json!({"metric_type": "L2"}))
}

fuzz_target!(|data: &[u8]| {
    let space = space();
    let config = SearchConfig::default();

    if parse_query(data, &space, &config).is_err() {
        return;
    }

    // Accepted bodies go through the whole pipeline
    let Ok(body) = serde_json::from_slice(data) else {
        return;
    };
    let params = SearchParams {
        query: Some(body),
        ..SearchParams::default()
    };
    if let Ok(request) = assemble_search(&space, params, HeadParams::new(), &config) {
        let bytes = encode_search_request(&request);
        let decoded = decode_request(&bytes).expect("encoded request must decode");
        assert_eq!(decoded.req_num, request.batch_count);
        assert_eq!(decoded.range_filters, request.range_filters);
        assert_eq!(decoded.term_filters, request.term_filters);
    }
});
