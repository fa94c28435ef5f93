//! Tests for `schema` module

use super::schema::*;
use serde_json::json;
use std::sync::Arc;

const SPACE_DOC: &str = r#"{
    "name": "ts_space",
    "fields": [
        {"name": "field_string", "type": "keyword"},
        {"name": "field_int", "type": "integer"},
        {"name": "field_float", "type": "float", "index": {"name": "field_float", "type": "SCALAR"}},
        {"name": "field_long", "type": "long", "indexed": true},
        {"name": "field_vector", "type": "vector", "dimension": 128}
    ],
    "index": {"type": "IVFPQ", "params": {"metric_type": "InnerProduct", "ncentroids": 2048}}
}"#;

#[test]
fn test_from_json_parses_field_types() {
    // Arrange & Act
    let space = Space::from_json(SPACE_DOC).expect("parse space");

    // Assert
    assert_eq!(space.name(), "ts_space");
    assert_eq!(
        space.field("field_string").map(|f| f.field_type),
        Some(FieldType::String)
    );
    assert_eq!(
        space.field("field_int").map(|f| f.field_type),
        Some(FieldType::Int)
    );
    assert_eq!(
        space.field("field_vector").map(|f| f.dimension),
        Some(128)
    );
}

#[test]
fn test_from_json_index_flag_follows_index_object() {
    let space = Space::from_json(SPACE_DOC).expect("parse space");

    assert!(!space.field("field_string").unwrap().indexed);
    assert!(!space.field("field_int").unwrap().indexed);
    assert!(space.field("field_float").unwrap().indexed);
    assert!(space.field("field_long").unwrap().indexed);
    assert!(space.field("field_vector").unwrap().indexed);
}

#[test]
fn test_from_json_keeps_declaration_order() {
    let space = Space::from_json(SPACE_DOC).expect("parse space");

    let names: Vec<&str> = space.fields().map(|f| f.name.as_str()).collect();

    assert_eq!(
        names,
        vec![
            "field_string",
            "field_int",
            "field_float",
            "field_long",
            "field_vector"
        ]
    );
}

#[test]
fn test_from_json_reads_space_index() {
    let space = Space::from_json(SPACE_DOC).expect("parse space");

    assert_eq!(space.index_type(), "IVFPQ");
    assert_eq!(space.index_params()["metric_type"], "InnerProduct");
}

#[test]
fn test_from_json_vector_without_dimension_fails() {
    let doc = r#"{"name": "s", "fields": [{"name": "v", "type": "vector"}]}"#;

    let err = Space::from_json(doc).unwrap_err();

    assert_eq!(err.code(), "QUIVER-001");
}

#[test]
fn test_from_json_unknown_type_fails() {
    let doc = r#"{"name": "s", "fields": [{"name": "g", "type": "geo_point"}]}"#;

    assert!(Space::from_json(doc).is_err());
}

#[test]
fn test_field_type_display_is_upper_case() {
    assert_eq!(FieldType::Int.to_string(), "INT");
    assert_eq!(FieldType::Vector.to_string(), "VECTOR");
}

#[test]
fn test_builder_replaces_field_with_same_name() {
    let space = Space::new("s")
        .with_field(FieldDescriptor::scalar("a", FieldType::Int, false))
        .with_field(FieldDescriptor::scalar("a", FieldType::Long, true));

    assert_eq!(space.fields().count(), 1);
    assert_eq!(space.field("a").unwrap().field_type, FieldType::Long);
}

// -------------------------------------------------------------------------
// Registry
// -------------------------------------------------------------------------

#[test]
fn test_registry_register_and_lookup() {
    // Arrange
    let registry = SpaceRegistry::new();

    // Act
    let previous = registry.register(Space::new("a"));

    // Assert
    assert!(previous.is_none());
    assert_eq!(registry.len(), 1);
    assert!(registry.space("a").is_some());
    assert!(registry.space("b").is_none());
}

#[test]
fn test_registry_snapshot_survives_replacement() {
    // Arrange
    let registry = SpaceRegistry::new();
    registry.register(
        Space::new("a").with_field(FieldDescriptor::scalar("x", FieldType::Int, true)),
    );
    let snapshot = registry.space("a").expect("snapshot");

    // Act
    let replaced = registry.register(
        Space::new("a").with_field(FieldDescriptor::scalar("y", FieldType::Int, true)),
    );

    // Assert
    assert!(replaced.is_some());
    assert!(snapshot.field("x").is_some());
    assert!(snapshot.field("y").is_none());
    let fresh = registry.space("a").expect("fresh");
    assert!(fresh.field("y").is_some());
    assert!(!Arc::ptr_eq(&snapshot, &fresh));
}

#[test]
fn test_registry_remove_and_names() {
    let registry = SpaceRegistry::new();
    registry.register(Space::new("b"));
    registry.register(Space::new("a"));

    assert_eq!(registry.names(), vec!["a".to_string(), "b".to_string()]);
    assert!(registry.remove("a").is_some());
    assert!(registry.remove("a").is_none());
    assert_eq!(registry.len(), 1);
    assert!(!registry.is_empty());
}

#[test]
fn test_with_index_sets_params() {
    let space = Space::new("s").with_index("HNSW", json!({"metric_type": "L2"}));

    assert_eq!(space.index_type(), "HNSW");
    assert_eq!(space.index_params()["metric_type"], "L2");
}
