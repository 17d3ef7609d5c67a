//! Error types for graph operations.
//!
//! Every failure propagates upward to the immediate caller; there is no
//! internal retry and no partial-success state beyond the atomicity of the
//! enclosing transaction.

use thiserror::Error;
use worldforge_core::CoreError;

#[derive(Error, Debug)]
pub enum GraphError {
    /// Session or driver setup failed. Fatal to the call, never retried.
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    /// The server rejected the query text or a constraint was violated.
    /// Surfaced verbatim from the driver.
    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    /// A node's label set resolves to no registered schema, or a property's
    /// runtime type does not match the declared field.
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// A single-entity read matched zero rows.
    #[error("Node not found: {label} with {field} = {value}")]
    NotFound {
        label: String,
        field: String,
        value: String,
    },
}

impl From<CoreError> for GraphError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnresolvedLabel { .. } => GraphError::Mapping(err.to_string()),
            CoreError::Config(e) => GraphError::Connection(e.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
