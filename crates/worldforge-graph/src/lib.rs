//! worldforge-graph — typed object-graph mapping over Neo4j.
//!
//! This crate is the single access point to the graph: it serializes
//! [`GraphModel`](worldforge_core::GraphModel) entities into Cypher
//! mutations and reconstructs arbitrarily deep nested entity graphs from
//! the flat rows a traversal query returns.
//!
//! ```no_run
//! use std::sync::Arc;
//! use worldforge_core::{models::{User, World}, GraphSettings, ModelRegistry};
//! use worldforge_graph::{Depth, GraphClient, PopulateOptions, Repository};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let registry = Arc::new(
//!     ModelRegistry::builder()
//!         .register::<User>()
//!         .register::<World>()
//!         .build(),
//! );
//! let client = GraphClient::connect(&GraphSettings::default()).await?;
//! let users: Repository<User> = Repository::new(client, registry);
//!
//! let user = users
//!     .find("userID", 7)
//!     .populate(PopulateOptions {
//!         depth: Depth::Hops(1),
//!         limit: None,
//!     })
//!     .await?;
//! println!("{} owns {} worlds", user.username, user.worlds.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod cypher;
pub mod error;
pub mod populate;
pub mod repository;
pub mod tree;

pub use client::GraphClient;
pub use cypher::CypherBuilder;
pub use error::{GraphError, Result};
pub use populate::{Depth, FindMany, FindOne, PopulateOptions};
pub use repository::{RelationSpec, Repository, ID_FIELD};
