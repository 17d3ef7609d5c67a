//! Populate engine: depth-bounded relationship traversal.
//!
//! `find`/`find_all` hand back deferred descriptors; nothing touches the
//! server until `populate` runs. Populate plans one query: a match on the
//! root plus one `OPTIONAL MATCH` segment per reachable relationship field,
//! executes it once, and delegates row shaping to tree reconstruction.

use neo4rs::BoltType;
use worldforge_core::{Direction, EntitySchema, GraphModel, ModelRegistry};

use crate::cypher::CypherBuilder;
use crate::error::{GraphError, Result};
use crate::repository::{root_match, Repository};
use crate::tree::{self, NodeForest, RawRecord};

/// How many relationship hops a populate traverses.
///
/// Unbounded is its own variant rather than a zero sentinel, so `Hops(0)`
/// genuinely means "read the root only".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Depth {
    /// Expand every declared relationship at every reachable level.
    Unbounded,
    /// Expand at most this many hops from the root.
    Hops(u32),
}

impl Default for Depth {
    fn default() -> Self {
        Depth::Unbounded
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PopulateOptions {
    pub depth: Depth,
    /// Caps the number of result rows, not the number of typed roots.
    pub limit: Option<u32>,
}

/// One planned `OPTIONAL MATCH` hop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TraversalSegment {
    pub parent_alias: String,
    pub alias: String,
    pub rel_type: &'static str,
    pub direction: Direction,
    pub target_label: &'static str,
}

impl TraversalSegment {
    pub fn clause(&self) -> String {
        match self.direction {
            Direction::Outgoing => format!(
                "({})-[:{}]->({}:{})",
                self.parent_alias, self.rel_type, self.alias, self.target_label
            ),
            Direction::Incoming => format!(
                "({})<-[:{}]-({}:{})",
                self.parent_alias, self.rel_type, self.alias, self.target_label
            ),
        }
    }
}

/// Walk the schema graph depth-first from the root, emitting one segment
/// per relationship field while remaining depth allows. Aliases are fresh
/// (`r0`, `r1`, ...) in emission order; that order is also the column order
/// reconstruction links by.
///
/// A label already expanded along the current path is not expanded again,
/// so self- and mutually-referential schemas terminate.
pub(crate) fn plan_traversals(
    registry: &ModelRegistry,
    root: &'static EntitySchema,
    depth: Depth,
) -> Result<Vec<TraversalSegment>> {
    let mut segments = Vec::new();
    let mut path = vec![root.label];
    expand(registry, root, "n", depth, &mut path, &mut segments)?;
    Ok(segments)
}

fn expand(
    registry: &ModelRegistry,
    schema: &'static EntitySchema,
    parent_alias: &str,
    depth: Depth,
    path: &mut Vec<&'static str>,
    segments: &mut Vec<TraversalSegment>,
) -> Result<()> {
    let next_depth = match depth {
        Depth::Hops(0) => return Ok(()),
        Depth::Hops(n) => Depth::Hops(n - 1),
        Depth::Unbounded => Depth::Unbounded,
    };

    for rel in schema.relationships {
        let target = registry.get(rel.target_label).ok_or_else(|| {
            GraphError::Mapping(format!(
                "relationship target label not registered: {}",
                rel.target_label
            ))
        })?;

        let alias = format!("r{}", segments.len());
        segments.push(TraversalSegment {
            parent_alias: parent_alias.to_string(),
            alias: alias.clone(),
            rel_type: rel.rel_type,
            direction: rel.direction,
            target_label: rel.target_label,
        });

        if path.contains(&rel.target_label) {
            continue;
        }
        path.push(rel.target_label);
        expand(registry, target, &alias, next_depth, path, segments)?;
        path.pop();
    }

    Ok(())
}

/// Deferred single-entity read. No I/O happens until [`populate`](Self::populate).
pub struct FindOne<'a, T: GraphModel> {
    repo: &'a Repository<T>,
    field: String,
    value: BoltType,
    display: String,
}

impl<'a, T: GraphModel> FindOne<'a, T> {
    pub(crate) fn new(repo: &'a Repository<T>, field: String, value: BoltType, display: String) -> Self {
        Self {
            repo,
            field,
            value,
            display,
        }
    }

    /// Execute the traversal and map exactly one typed root.
    pub async fn populate(self, options: PopulateOptions) -> Result<T> {
        let mut entities = fetch(self.repo, &self.field, self.value, options).await?;
        if entities.len() != 1 {
            return Err(GraphError::NotFound {
                label: T::LABEL.to_string(),
                field: self.field,
                value: self.display,
            });
        }
        Ok(entities.remove(0))
    }
}

/// Deferred multi-entity read; zero results is not an error.
pub struct FindMany<'a, T: GraphModel> {
    repo: &'a Repository<T>,
    field: String,
    value: BoltType,
}

impl<'a, T: GraphModel> FindMany<'a, T> {
    pub(crate) fn new(repo: &'a Repository<T>, field: String, value: BoltType) -> Self {
        Self { repo, field, value }
    }

    /// Execute the traversal and map every typed root.
    pub async fn populate(self, options: PopulateOptions) -> Result<Vec<T>> {
        fetch(self.repo, &self.field, self.value, options).await
    }
}

async fn fetch<T: GraphModel>(
    repo: &Repository<T>,
    field: &str,
    value: BoltType,
    options: PopulateOptions,
) -> Result<Vec<T>> {
    let registry = repo.registry();
    let segments = plan_traversals(registry, T::schema(), options.depth)?;

    let mut builder = CypherBuilder::new()
        .match_clause(root_match(T::LABEL, field))
        .param("value", value);
    for segment in &segments {
        builder = builder.optional_match(segment.clause());
    }

    let mut aliases = vec!["n".to_string()];
    aliases.extend(segments.iter().map(|s| s.alias.clone()));
    builder = builder.returning(aliases.join(", "));
    if let Some(limit) = options.limit {
        builder = builder.limit(limit);
    }

    let rows = repo.client().query_rows(builder.into_query()).await?;
    tracing::debug!(label = T::LABEL, rows = rows.len(), "populate fetched rows");

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        let mut values = Vec::with_capacity(aliases.len());
        for alias in &aliases {
            let node: Option<neo4rs::Node> = row
                .get(alias.as_str())
                .map_err(|e| GraphError::Mapping(format!("column {alias}: {e}")))?;
            values.push(match node {
                Some(node) => Some(tree::raw_node(&node, registry)?),
                None => None,
            });
        }
        records.push(RawRecord { values });
    }

    let forest = NodeForest::from_records(records, registry)?;
    tree::into_entities(&forest, registry)
}
