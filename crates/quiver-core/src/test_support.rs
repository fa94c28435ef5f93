//! Shared fixtures for unit tests.

use serde_json::json;

use crate::schema::{FieldDescriptor, FieldType, Space};

/// A space covering every field kind the pipeline distinguishes.
pub(crate) fn sample_space() -> Space {
    Space::new("products")
        .with_field(FieldDescriptor::scalar("city", FieldType::String, true))
        .with_field(FieldDescriptor::scalar("title", FieldType::String, false))
        .with_field(FieldDescriptor::scalar("age", FieldType::Int, true))
        .with_field(FieldDescriptor::scalar("views", FieldType::Long, true))
        .with_field(FieldDescriptor::scalar("price", FieldType::Float, true))
        .with_field(FieldDescriptor::scalar("rating", FieldType::Double, true))
        .with_field(FieldDescriptor::scalar("stock", FieldType::Int, false))
        .with_field(FieldDescriptor::scalar("created", FieldType::Date, true))
        .with_field(FieldDescriptor::vector("image", 4))
        .with_field(FieldDescriptor::vector("text", 8))
        .with_index("IVFPQ", json!({"metric_type": "InnerProduct"}))
}
