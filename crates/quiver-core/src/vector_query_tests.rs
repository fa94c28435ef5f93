//! Tests for vector clause normalization.

use serde_json::json;

use super::vector_query::*;
use crate::config::BINARY_INDEX_TYPE;
use crate::error::Error;
use crate::schema::{FieldDescriptor, FieldType, Space};
use crate::test_support::sample_space;

fn binary_space() -> Space {
    Space::new("codes")
        .with_field(FieldDescriptor::vector("code", 16))
        .with_field(FieldDescriptor::scalar("tag", FieldType::String, true))
        .with_index(BINARY_INDEX_TYPE, json!({"metric_type": "Hamming"}))
}

// =========================================================================
// Payload and batch
// =========================================================================

#[test]
fn test_float_feature_round_trips_bit_for_bit() {
    // Arrange
    let feature = [0.1f32, -2.5, 3.25, f32::MIN_POSITIVE];
    let clause = json!({"field": "image", "feature": feature});

    // Act
    let (query, batch) = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).expect("parse");

    // Assert
    assert_eq!(batch, 1);
    assert_eq!(query.value.len(), 16);
    let decoded = query.float_values(BINARY_INDEX_TYPE).expect("float query");
    for (got, want) in decoded.iter().zip(feature.iter()) {
        assert_eq!(got.to_bits(), want.to_bits());
    }
}

#[test]
fn test_float_feature_is_little_endian() {
    let clause = json!({"field": "image", "feature": [1.0, 0.0, 0.0, 0.0]});

    let (query, _) = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).expect("parse");

    assert_eq!(&query.value[..4], &1.0f32.to_le_bytes());
}

#[test]
fn test_batch_count_is_length_over_dimension() {
    let clause = json!({"field": "image", "feature": (vec![0.0_f64; 12])});

    let (_, batch) = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).expect("parse");

    assert_eq!(batch, 3);
}

#[test]
fn test_binary_index_packs_bytes() {
    let clause = json!({"field": "code", "feature": [1, 2, 255, 0]});

    let (query, batch) = parse_vector_query(clause, &binary_space(), BINARY_INDEX_TYPE).expect("parse");

    assert_eq!(batch, 2);
    assert_eq!(query.value, vec![1, 2, 255, 0]);
    assert_eq!(query.index_type, BINARY_INDEX_TYPE);
    assert_eq!(query.float_values(BINARY_INDEX_TYPE), None);
}

#[test]
fn test_binary_element_out_of_range_is_malformed() {
    let clause = json!({"field": "code", "feature": [1, 256]});

    let err = parse_vector_query(clause, &binary_space(), BINARY_INDEX_TYPE).unwrap_err();

    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn test_clause_index_type_overrides_space() {
    let clause = json!({"field": "code", "feature": (vec![0.5_f64; 16]), "index_type": "FLAT"});

    let (query, batch) = parse_vector_query(clause, &binary_space(), BINARY_INDEX_TYPE).expect("parse");

    assert_eq!(query.index_type, "FLAT");
    assert_eq!(batch, 1);
    assert_eq!(query.value.len(), 64);
}

// =========================================================================
// Score window and defaults
// =========================================================================

#[test]
fn test_defaults() {
    let clause = json!({"field": "image", "feature": (vec![0.0_f64; 4])});

    let (query, _) = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).expect("parse");

    assert_eq!(query.min_score, -f64::MAX);
    assert_eq!(query.max_score, f64::MAX);
    assert_eq!(query.boost, 1.0);
    assert!(!query.has_boost);
    assert_eq!(query.index_type, "IVFPQ");
}

#[test]
fn test_explicit_scores_and_boost() {
    let clause = json!({
        "field": "image", "feature": (vec![0.0_f64; 4]),
        "min_score": 0.2, "max_score": 0.9, "boost": 2.5, "has_boost": 1
    });

    let (query, _) = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).expect("parse");

    assert_eq!(query.min_score, 0.2);
    assert_eq!(query.max_score, 0.9);
    assert_eq!(query.boost, 2.5);
    assert!(query.has_boost);
}

#[test]
fn test_symbol_sets_min_or_max() {
    let space = sample_space();
    let ge = json!({"field": "image", "feature": (vec![0.0_f64; 4]), "symbol": " >= ", "value": 0.7});
    let lt = json!({"field": "image", "feature": (vec![0.0_f64; 4]), "symbol": "<", "value": 0.3, "min_score": 0.1});

    let (ge, _) = parse_vector_query(ge, &space, BINARY_INDEX_TYPE).expect("parse");
    let (lt, _) = parse_vector_query(lt, &space, BINARY_INDEX_TYPE).expect("parse");

    assert_eq!(ge.min_score, 0.7);
    assert_eq!(ge.max_score, f64::MAX);
    assert_eq!(lt.min_score, 0.1);
    assert_eq!(lt.max_score, 0.3);
}

#[test]
fn test_unknown_symbol_fails() {
    let clause = json!({"field": "image", "feature": (vec![0.0_f64; 4]), "symbol": "==", "value": 1.0});

    let err = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).unwrap_err();

    assert!(matches!(err, Error::UnknownSymbolOperator(ref s) if s == "=="));
}

#[test]
fn test_symbol_without_value_is_ignored() {
    let clause = json!({"field": "image", "feature": (vec![0.0_f64; 4]), "symbol": "=="});

    assert!(parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).is_ok());
}

#[test]
fn test_format_options() {
    let space = sample_space();
    for format in ["normalization", "normal", "no", ""] {
        let clause = json!({"field": "image", "feature": (vec![0.0_f64; 4]), "format": format});
        assert!(parse_vector_query(clause, &space, BINARY_INDEX_TYPE).is_ok(), "{format}");
    }

    let clause = json!({"field": "image", "feature": (vec![0.0_f64; 4]), "format": "l2"});
    let err = parse_vector_query(clause, &space, BINARY_INDEX_TYPE).unwrap_err();
    assert!(matches!(err, Error::UnknownFormatOption(ref f) if f == "l2"));
}

#[test]
fn test_format_not_checked_for_binary_index() {
    let clause = json!({"field": "code", "feature": [0, 0], "format": "whatever"});

    assert!(parse_vector_query(clause, &binary_space(), BINARY_INDEX_TYPE).is_ok());
}

// =========================================================================
// Errors
// =========================================================================

#[test]
fn test_unknown_field() {
    let clause = json!({"field": "ghost", "feature": (vec![0.0_f64; 4])});

    let err = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).unwrap_err();

    assert!(matches!(err, Error::FieldNotFound(ref f) if f == "ghost"));
}

#[test]
fn test_scalar_field_is_type_mismatch() {
    let clause = json!({"field": "age", "feature": (vec![0.0_f64; 4])});

    let err = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).unwrap_err();

    assert!(matches!(err, Error::FieldTypeMismatch { .. }));
}

#[test]
fn test_missing_or_empty_feature() {
    let space = sample_space();

    let missing = parse_vector_query(json!({"field": "image"}), &space, BINARY_INDEX_TYPE).unwrap_err();
    let empty = parse_vector_query(json!({"field": "image", "feature": []}), &space, BINARY_INDEX_TYPE).unwrap_err();

    assert!(matches!(missing, Error::EmptyFeature(_)));
    assert!(matches!(empty, Error::EmptyFeature(_)));
}

#[test]
fn test_partial_vector_is_dimension_mismatch() {
    let clause = json!({"field": "image", "feature": (vec![0.0_f64; 6])});

    let err = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).unwrap_err();

    match err {
        Error::DimensionMismatch { field, dimension, actual } => {
            assert_eq!(field, "image");
            assert_eq!(dimension, 4);
            assert_eq!(actual, 6);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_binary_dimension_below_eight_is_mismatch() {
    let space = Space::new("tiny")
        .with_field(FieldDescriptor::vector("v", 4))
        .with_index(BINARY_INDEX_TYPE, json!({}));

    let err = parse_vector_query(json!({"field": "v", "feature": [1]}), &space, BINARY_INDEX_TYPE).unwrap_err();

    assert!(matches!(err, Error::DimensionMismatch { dimension: 0, .. }));
}

#[test]
fn test_non_numeric_element_is_malformed() {
    let clause = json!({"field": "image", "feature": [0.0, "x", 0.0, 0.0]});

    let err = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).unwrap_err();

    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn test_feature_not_array_is_malformed() {
    let clause = json!({"field": "image", "feature": "0,0,0,0"});

    let err = parse_vector_query(clause, &sample_space(), BINARY_INDEX_TYPE).unwrap_err();

    assert!(matches!(err, Error::MalformedInput(_)));
}

// =========================================================================
// Running batch count
// =========================================================================

#[test]
fn test_matching_running_batch_is_accepted() {
    let clause = json!({"field": "image", "feature": (vec![0.0_f64; 8])});

    let (_, batch) = parse_vector_query_in_batch(clause, &sample_space(), BINARY_INDEX_TYPE, 2)
        .expect("parse");

    assert_eq!(batch, 2);
}

#[test]
fn test_batch_mismatch_reported_before_format() {
    // Arrange: wrong batch and an unknown format in the same clause
    let clause = json!({"field": "image", "feature": (vec![0.0_f64; 8]), "format": "l2"});

    // Act
    let err = parse_vector_query_in_batch(clause, &sample_space(), BINARY_INDEX_TYPE, 3).unwrap_err();

    // Assert
    match err {
        Error::BatchSizeMismatch { field, expected, actual } => {
            assert_eq!(field, "image");
            assert_eq!(expected, 3);
            assert_eq!(actual, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_dimension_mismatch_reported_before_batch() {
    let clause = json!({"field": "image", "feature": (vec![0.0_f64; 6])});

    let err = parse_vector_query_in_batch(clause, &sample_space(), BINARY_INDEX_TYPE, 3).unwrap_err();

    assert!(matches!(err, Error::DimensionMismatch { .. }));
}
