//! Space schemas and the provider that hands them to the pipeline.
//!
//! A [`Space`] is a named collection with an ordered set of typed fields.
//! The pipeline never mutates a space: it reads from an `Arc<Space>`
//! snapshot obtained from a [`SchemaProvider`] once per request.

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{Error, Result};

/// Declared type of a space field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// 32-bit signed integer.
    #[serde(alias = "integer")]
    Int,
    /// 64-bit signed integer.
    Long,
    /// 32-bit float.
    Float,
    /// 64-bit float.
    Double,
    /// UTF-8 string, filterable with term filters.
    #[serde(alias = "keyword")]
    String,
    /// Timestamp. Stored by the engine but not range-filterable here.
    Date,
    /// Dense or bit-packed vector with a fixed dimension.
    Vector,
}

impl FieldType {
    /// Returns the canonical upper-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Int => "INT",
            Self::Long => "LONG",
            Self::Float => "FLOAT",
            Self::Double => "DOUBLE",
            Self::String => "STRING",
            Self::Date => "DATE",
            Self::Vector => "VECTOR",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema entry for one field of a space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name.
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Vector dimension; zero for scalar fields.
    #[serde(default)]
    pub dimension: usize,
    /// Whether the engine maintains a scalar index for the field.
    #[serde(default)]
    pub indexed: bool,
}

impl FieldDescriptor {
    /// Creates a scalar field descriptor.
    #[must_use]
    pub fn scalar(name: impl Into<String>, field_type: FieldType, indexed: bool) -> Self {
        Self {
            name: name.into(),
            field_type,
            dimension: 0,
            indexed,
        }
    }

    /// Creates a vector field descriptor.
    #[must_use]
    pub fn vector(name: impl Into<String>, dimension: usize) -> Self {
        Self {
            name: name.into(),
            field_type: FieldType::Vector,
            dimension,
            indexed: true,
        }
    }

    /// Returns true for vector fields.
    #[must_use]
    pub fn is_vector(&self) -> bool {
        self.field_type == FieldType::Vector
    }
}

/// Space-level vector index configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpaceIndex {
    /// Index type, e.g. `IVFPQ`, `HNSW` or `BINARYIVF`.
    #[serde(rename = "type", default)]
    pub index_type: String,
    /// Raw index parameters (`metric_type`, `nprobe`, ...).
    #[serde(default)]
    pub params: Value,
}

/// A named collection schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Space {
    name: String,
    fields: IndexMap<String, FieldDescriptor>,
    index: SpaceIndex,
}

impl Space {
    /// Creates an empty space.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
            index: SpaceIndex::default(),
        }
    }

    /// Adds (or replaces) a field, keeping declaration order.
    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    /// Sets the space index type and parameters.
    #[must_use]
    pub fn with_index(mut self, index_type: impl Into<String>, params: Value) -> Self {
        self.index = SpaceIndex {
            index_type: index_type.into(),
            params,
        };
        self
    }

    /// Parses a space definition document.
    ///
    /// Accepts the document clients send when creating a space:
    ///
    /// ```
    /// use quiver_core::schema::{FieldType, Space};
    ///
    /// let space = Space::from_json(r#"{
    ///     "name": "products",
    ///     "fields": [
    ///         {"name": "city", "type": "keyword", "index": {"type": "SCALAR"}},
    ///         {"name": "embedding", "type": "vector", "dimension": 4}
    ///     ],
    ///     "index": {"type": "IVFPQ", "params": {"metric_type": "L2"}}
    /// }"#).unwrap();
    ///
    /// assert_eq!(space.field("city").unwrap().field_type, FieldType::String);
    /// assert!(space.field("city").unwrap().indexed);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] if the document does not decode or
    /// declares a vector field without a dimension.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: SpaceDocument = serde_json::from_str(json)?;
        let mut space = Self::new(doc.name);

        for field in doc.fields {
            if field.field_type == FieldType::Vector && field.dimension == 0 {
                return Err(Error::MalformedInput(format!(
                    "vector field '{}' has no dimension",
                    field.name
                )));
            }
            let indexed = field.indexed.unwrap_or(field.index.is_some());
            space = space.with_field(FieldDescriptor {
                name: field.name,
                field_type: field.field_type,
                dimension: field.dimension,
                indexed: indexed || field.field_type == FieldType::Vector,
            });
        }

        if let Some(index) = doc.index {
            space.index = index;
        }

        Ok(space)
    }

    /// Returns the space name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.get(name)
    }

    /// Iterates fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.values()
    }

    /// Returns the default acting index type.
    #[must_use]
    pub fn index_type(&self) -> &str {
        &self.index.index_type
    }

    /// Returns the raw index parameters.
    #[must_use]
    pub fn index_params(&self) -> &Value {
        &self.index.params
    }
}

#[derive(Deserialize)]
struct SpaceDocument {
    name: String,
    #[serde(default)]
    fields: Vec<FieldDocument>,
    #[serde(default)]
    index: Option<SpaceIndex>,
}

#[derive(Deserialize)]
struct FieldDocument {
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    #[serde(default)]
    dimension: usize,
    #[serde(default)]
    index: Option<Value>,
    #[serde(default)]
    indexed: Option<bool>,
}

/// Source of immutable space snapshots.
///
/// Implementations must hand out snapshots that never change while a
/// request holds them; replacing a space installs a new `Arc`.
pub trait SchemaProvider: Send + Sync {
    /// Returns the current snapshot of the named space.
    fn space(&self, name: &str) -> Option<Arc<Space>>;
}

/// In-process [`SchemaProvider`] with copy-on-write replacement.
#[derive(Debug, Default)]
pub struct SpaceRegistry {
    spaces: RwLock<HashMap<String, Arc<Space>>>,
}

impl SpaceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a space, returning the snapshot it replaced.
    pub fn register(&self, space: Space) -> Option<Arc<Space>> {
        let name = space.name().to_string();
        let field_count = space.fields.len();
        let previous = self.spaces.write().insert(name.clone(), Arc::new(space));
        tracing::info!(
            space = %name,
            fields = field_count,
            replaced = previous.is_some(),
            "Space registered"
        );
        previous
    }

    /// Removes a space, returning its last snapshot.
    pub fn remove(&self, name: &str) -> Option<Arc<Space>> {
        let removed = self.spaces.write().remove(name);
        if removed.is_some() {
            tracing::info!(space = %name, "Space removed");
        }
        removed
    }

    /// Lists registered space names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.spaces.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered spaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spaces.read().len()
    }

    /// Returns true if no space is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spaces.read().is_empty()
    }
}

impl SchemaProvider for SpaceRegistry {
    fn space(&self, name: &str) -> Option<Arc<Space>> {
        self.spaces.read().get(name).cloned()
    }
}
