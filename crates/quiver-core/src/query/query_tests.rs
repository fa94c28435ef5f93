//! Tests for the query body parser.

use serde_json::json;

use super::*;
use crate::error::Error;
use crate::filter::TermMode;
use crate::test_support::sample_space;

fn config() -> SearchConfig {
    SearchConfig::default()
}

// =========================================================================
// Empty bodies
// =========================================================================

#[test]
fn test_empty_body_matches_all() {
    let space = sample_space();

    for body in [&b""[..], b"   \n", b"null"] {
        let parsed = parse_query(body, &space, &config()).expect("parse");
        assert_eq!(parsed, ParsedQuery::default());
        assert_eq!(parsed.batch_count, 1);
        assert_eq!(parsed.multi_vector_rank, 0);
    }
}

#[test]
fn test_empty_sections_are_accepted() {
    let body = br#"{"vector": null, "filter": [], "online_log_level": "debug"}"#;

    let parsed = parse_query(body, &sample_space(), &config()).expect("parse");

    assert_eq!(parsed.batch_count, 1);
    assert_eq!(parsed.online_log_level, "debug");
}

#[test]
fn test_invalid_json_is_malformed() {
    let err = parse_query(b"{\"vector\": [", &sample_space(), &config()).unwrap_err();

    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn test_wrong_section_type_is_malformed() {
    let err = parse_query(br#"{"filter": {"range": {}}}"#, &sample_space(), &config()).unwrap_err();

    assert!(matches!(err, Error::MalformedInput(_)));
}

// =========================================================================
// Batch consistency
// =========================================================================

#[test]
fn test_consistent_batches_resolve_to_shared_count() {
    // Arrange: image has d=4, text has d=8
    let body = json!({
        "vector": [
            {"field": "image", "feature": (vec![0.5_f64; 12])},
            {"field": "text", "feature": (vec![0.5_f64; 24])}
        ]
    });

    // Act
    let parsed = parse_query_value(body, &sample_space(), &config()).expect("parse");

    // Assert
    assert_eq!(parsed.batch_count, 3);
    assert_eq!(parsed.vector_queries.len(), 2);
    assert_eq!(parsed.multi_vector_rank, 1);
}

#[test]
fn test_mismatched_batches_fail() {
    let body = json!({
        "vector": [
            {"field": "image", "feature": (vec![0.5_f64; 12])},
            {"field": "text", "feature": (vec![0.5_f64; 16])}
        ]
    });

    let err = parse_query_value(body, &sample_space(), &config()).unwrap_err();

    match err {
        Error::BatchSizeMismatch { field, expected, actual } => {
            assert_eq!(field, "text");
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_batch_mismatch_wins_over_bad_format() {
    let body = json!({
        "vector": [
            {"field": "image", "feature": (vec![0.5_f64; 12])},
            {"field": "text", "feature": (vec![0.5_f64; 16]), "format": "bogus"}
        ]
    });

    let err = parse_query_value(body, &sample_space(), &config()).unwrap_err();

    assert!(matches!(err, Error::BatchSizeMismatch { expected: 3, actual: 2, .. }));
}

#[test]
fn test_partial_vector_in_second_clause_is_dimension_mismatch() {
    let body = json!({
        "vector": [
            {"field": "image", "feature": (vec![0.5_f64; 12])},
            {"field": "text", "feature": (vec![0.5_f64; 20])}
        ]
    });

    let err = parse_query_value(body, &sample_space(), &config()).unwrap_err();

    assert!(matches!(err, Error::DimensionMismatch { .. }));
}

// =========================================================================
// Filters
// =========================================================================

#[test]
fn test_filters_are_collected_in_order() {
    let body = json!({
        "filter": [
            {"range": {"age": {"gte": 18}}},
            {"term": {"operator": "and", "city": ["NY", "LA"]}},
            {"range": {"views": {"lt": 100}}},
            {"exists": {"field": "city"}},
            {"term": null}
        ]
    });

    let parsed = parse_query_value(body, &sample_space(), &config()).expect("parse");

    let ranges: Vec<_> = parsed.range_filters.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(ranges, vec!["age", "views"]);
    assert_eq!(parsed.term_filters.len(), 1);
    assert_eq!(parsed.term_filters[0].mode, TermMode::And);
    assert_eq!(parsed.multi_vector_rank, 0);
}

#[test]
fn test_non_object_filter_entry_fails() {
    let body = json!({"filter": ["range"]});

    let err = parse_query_value(body, &sample_space(), &config()).unwrap_err();

    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn test_first_error_aborts_whole_body() {
    let body = json!({
        "vector": [{"field": "image", "feature": (vec![0.5_f64; 4])}],
        "filter": [{"range": {"missing": {"gte": 1}}}]
    });

    let err = parse_query_value(body, &sample_space(), &config()).unwrap_err();

    assert!(matches!(err, Error::FieldNotFound(ref f) if f == "missing"));
}

#[test]
fn test_binary_index_type_comes_from_config() {
    let mut config = config();
    config.binary_index_type = "IVFPQ".to_string();
    let body = json!({"vector": [{"field": "text", "feature": [7]}]});

    let parsed = parse_query_value(body, &sample_space(), &config).expect("parse");

    assert_eq!(parsed.vector_queries[0].value, vec![7]);
}

// =========================================================================
// parse_filters
// =========================================================================

#[test]
fn test_parse_filters_ignores_vectors() {
    let body = json!({
        "vector": [{"field": "ghost", "feature": [1.0]}],
        "filter": [{"term": {"city": "NY"}}],
        "online_log_level": "info"
    });

    let parsed = parse_filters(body, &sample_space()).expect("parse");

    assert_eq!(parsed.term_filters.len(), 1);
    assert!(parsed.range_filters.is_empty());
    assert_eq!(parsed.online_log_level, "info");
}

#[test]
fn test_parse_filters_null_body() {
    let parsed = parse_filters(serde_json::Value::Null, &sample_space()).expect("parse");

    assert_eq!(parsed, ParsedFilters::default());
}
