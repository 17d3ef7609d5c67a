//! Label-to-schema registry.
//!
//! The registry is the single source for resolving a node's label set to an
//! entity schema during reconstruction, and for walking related schemas
//! during traversal planning. It is built once at startup and immutable
//! afterwards; repositories hold it behind an `Arc`.

use std::collections::HashMap;

use crate::error::CoreError;
use crate::schema::{EntitySchema, GraphModel};

/// Immutable mapping from graph label to entity schema.
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    schemas: HashMap<&'static str, &'static EntitySchema>,
}

impl ModelRegistry {
    pub fn builder() -> ModelRegistryBuilder {
        ModelRegistryBuilder::default()
    }

    /// Direct lookup by label.
    pub fn get(&self, label: &str) -> Option<&'static EntitySchema> {
        self.schemas.get(label).copied()
    }

    /// Resolve a node's label set to a registered schema.
    ///
    /// Labels are checked in the node's own order; the first registered one
    /// wins. A node whose labels all miss the registry is a mapping failure,
    /// not a silent skip.
    pub fn resolve(&self, labels: &[String]) -> Result<&'static EntitySchema, CoreError> {
        labels
            .iter()
            .find_map(|label| self.get(label))
            .ok_or_else(|| CoreError::UnresolvedLabel {
                label: labels.join(":"),
            })
    }

    /// Number of registered labels.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Builder collecting registrations before the registry is frozen.
#[derive(Debug, Default)]
pub struct ModelRegistryBuilder {
    schemas: HashMap<&'static str, &'static EntitySchema>,
}

impl ModelRegistryBuilder {
    /// Register an entity type under its label.
    ///
    /// Registering the same label twice keeps the later schema.
    pub fn register<T: GraphModel>(mut self) -> Self {
        let schema = T::schema();
        if self.schemas.insert(T::LABEL, schema).is_some() {
            tracing::warn!(label = T::LABEL, "label re-registered, keeping latest schema");
        }
        self
    }

    pub fn build(self) -> ModelRegistry {
        ModelRegistry {
            schemas: self.schemas,
        }
    }
}
