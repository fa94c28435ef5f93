//! Concurrent compilation against a registry that is being updated.
//!
//! Every space version written by the updater accepts the request the
//! readers send, so any failure means a reader saw a torn schema.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

use quiver_core::schema::{FieldDescriptor, FieldType};
use quiver_core::{decode_request, HeadParams, SearchCompiler, SearchConfig, SearchParams, Space, SpaceRegistry};
use serde_json::json;

fn space_version(version: u64) -> Space {
    let metric = if version % 2 == 0 { "L2" } else { "InnerProduct" };
    Space::new("live")
        .with_field(FieldDescriptor::scalar("city", FieldType::String, true))
        .with_field(FieldDescriptor::scalar("age", FieldType::Int, true))
        .with_field(FieldDescriptor::scalar(format!("extra_{version}"), FieldType::Long, false))
        .with_field(FieldDescriptor::vector("embedding", 4))
        .with_index("HNSW", json!({"metric_type": metric}))
}

fn request() -> SearchParams {
    serde_json::from_value(json!({
        "query": {
            "vector": [{"field": "embedding", "feature": (vec![0.25_f64; 8])}],
            "filter": [
                {"range": {"age": {"gte": 21}}},
                {"term": {"city": ["Oslo", "Lima"]}}
            ]
        },
        "fields": ["city", "age"]
    }))
    .expect("params")
}

fn run_stress(readers: usize, ops_per_reader: usize, updates: u64) {
    let registry = SpaceRegistry::new();
    registry.register(space_version(0));
    let compiler = Arc::new(SearchCompiler::new(registry, SearchConfig::default()));
    let compiled = Arc::new(AtomicU64::new(0));

    let mut handles = Vec::new();

    for _ in 0..readers {
        let compiler = Arc::clone(&compiler);
        let compiled = Arc::clone(&compiled);
        handles.push(thread::spawn(move || {
            for _ in 0..ops_per_reader {
                let bytes = compiler
                    .compile_search("live", request(), HeadParams::new())
                    .expect("valid request must compile");
                let decoded = decode_request(&bytes).expect("decode");
                assert_eq!(decoded.req_num, 2);
                assert_eq!(decoded.fields, vec!["city", "age", "_id"]);
                compiled.fetch_add(1, Ordering::Relaxed);
            }
        }));
    }

    let updater = {
        let compiler = Arc::clone(&compiler);
        thread::spawn(move || {
            for version in 1..=updates {
                compiler.provider().register(space_version(version));
                thread::yield_now();
            }
        })
    };

    for handle in handles {
        handle.join().expect("reader thread panicked");
    }
    updater.join().expect("updater thread panicked");

    assert_eq!(compiled.load(Ordering::Relaxed), (readers * ops_per_reader) as u64);
    assert_eq!(compiler.provider().len(), 1);
}

/// Smoke test: 4 readers × 50 compiles while 200 versions land
#[test]
fn test_stress_smoke() {
    run_stress(4, 50, 200);
}

/// Heavy stress (ignored for CI)
#[test]
#[ignore = "Heavy stress test, run manually"]
fn test_stress_heavy() {
    run_stress(32, 1_000, 10_000);
}
