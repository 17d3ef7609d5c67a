//! Configuration for the worldforge graph layer.
//!
//! Settings are loaded from (in priority order):
//! 1. Environment variables (`WORLDFORGE_` prefix, `__` separator)
//! 2. Config file (`worldforge.toml`)
//! 3. Defaults

use serde::Deserialize;

use crate::error::CoreError;

/// Connection settings for the Neo4j server.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphSettings {
    /// Bolt URI of the server (default: "bolt://localhost:7687").
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Username for basic auth.
    #[serde(default = "default_user")]
    pub user: String,

    /// Password for basic auth.
    #[serde(default)]
    pub password: String,

    /// Connection pool size.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Rows fetched per pull from the server.
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: String::new(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl GraphSettings {
    /// Load settings from `<prefix>.toml` (if present) and the environment.
    ///
    /// Environment variables use the `WORLDFORGE_` prefix, e.g.
    /// `WORLDFORGE_URI`, `WORLDFORGE_PASSWORD`.
    pub fn load(prefix: &str) -> Result<Self, CoreError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(prefix).required(false))
            .add_source(config::Environment::with_prefix("WORLDFORGE").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}
