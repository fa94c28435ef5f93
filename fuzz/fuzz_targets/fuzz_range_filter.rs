//! Fuzz target for range filter bounds.
//!
//! Builds structured range clauses from arbitrary bounds and checks that
//! every accepted clause yields fixed-width bounds for the field type.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quiver_core::filter::parse_range;
use quiver_core::schema::{FieldDescriptor, FieldType};
use quiver_core::Space;
use serde_json::{json, Map, Value};

#[derive(Debug, Arbitrary)]
enum Bound {
    Int(i64),
    Float(f64),
    Text(String),
    Null,
}

impl Bound {
    fn to_value(&self) -> Value {
        match self {
            Self::Int(v) => json!(v),
            Self::Float(v) => serde_json::Number::from_f64(*v).map_or(Value::Null, Value::Number),
            Self::Text(v) => json!(v),
            Self::Null => Value::Null,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct RangeInput {
    field: u8,
    gte: Option<Bound>,
    gt: Option<Bound>,
    lte: Option<Bound>,
    lt: Option<Bound>,
    from: Option<Bound>,
    to: Option<Bound>,
    include_lower: Option<bool>,
    include_upper: Option<bool>,
}

const FIELDS: [(&str, usize); 4] = [("age", 4), ("views", 8), ("price", 4), ("rating", 8)];

fuzz_target!(|input: RangeInput| {
    let space = Space::new("fuzz")
        .with_field(FieldDescriptor::scalar("age", FieldType::Int, true))
        .with_field(FieldDescriptor::scalar("views", FieldType::Long, true))
        .with_field(FieldDescriptor::scalar("price", FieldType::Float, true))
        .with_field(FieldDescriptor::scalar("rating", FieldType::Double, true));

    let (field, width) = FIELDS[usize::from(input.field) % FIELDS.len()];

    let mut operators = Map::new();
    for (key, bound) in [
        ("gte", &input.gte),
        ("gt", &input.gt),
        ("lte", &input.lte),
        ("lt", &input.lt),
        ("from", &input.from),
        ("to", &input.to),
    ] {
        if let Some(bound) = bound {
            operators.insert(key.to_string(), bound.to_value());
        }
    }
    if let Some(flag) = input.include_lower {
        operators.insert("include_lower".to_string(), json!(flag));
    }
    if let Some(flag) = input.include_upper {
        operators.insert("include_upper".to_string(), json!(flag));
    }

    let mut clause = Map::new();
    clause.insert(field.to_string(), Value::Object(operators));

    if let Ok(filters) = parse_range(&clause, &space) {
        for filter in filters {
            assert_eq!(filter.lower_value.len(), width);
            assert_eq!(filter.upper_value.len(), width);
        }
    }
});
