//! worldforge-core: Shared foundation for the worldforge graph mapping layer.
//!
//! This crate provides the types used across all worldforge components:
//! - Entity schema descriptors and the [`GraphModel`] capability trait
//! - The [`ModelRegistry`] mapping graph labels to entity schemas
//! - Domain entity types (User, World, Continent, ...)
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod schema;

pub use config::GraphSettings;
pub use error::CoreError;
pub use registry::{ModelRegistry, ModelRegistryBuilder};
pub use schema::{
    Direction, EntitySchema, GraphModel, PropertyKind, RelationshipField, ScalarField,
};
