//! Error types for worldforge-core.

use thiserror::Error;

/// Errors raised by the core crate itself. Graph operation errors live in
/// `worldforge-graph`.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Label not registered: {label}")]
    UnresolvedLabel { label: String },
}
