//! Generic entity operations: Create, Find, FindAll, Update, Delete.
//!
//! A [`Repository`] is an explicit mapper object parametrized by entity
//! shape, composed with (not embedded in) the entity type. It holds a
//! cheap-clone client and the shared registry; each operation issues its
//! queries through sessions scoped to that call.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use neo4rs::{BoltBoolean, BoltFloat, BoltInteger, BoltString, BoltType};
use serde_json::{Map, Value};

use worldforge_core::{Direction, GraphModel, ModelRegistry, PropertyKind, ScalarField};

use crate::client::GraphClient;
use crate::cypher::CypherBuilder;
use crate::error::{GraphError, Result};
use crate::populate::{FindMany, FindOne};
use crate::tree;

/// Field name designating the engine-assigned node identifier in
/// `find`/`find_all`/`delete` lookups. Matching switches from property
/// equality to `id(n)`.
pub const ID_FIELD: &str = "id";

/// The root `MATCH` body shared by reads and deletes.
pub(crate) fn root_match(label: &str, field: &str) -> String {
    if field == ID_FIELD {
        format!("(n:{label}) WHERE id(n) = $value")
    } else {
        format!("(n:{label} {{{field}: $value}})")
    }
}

/// One optional relationship attached during create or update: match or
/// create the related node by `field = value` under `label`, then create
/// the relationship.
#[derive(Debug, Clone)]
pub struct RelationSpec {
    pub field: String,
    pub value: BoltType,
    pub label: String,
    pub rel_type: String,
    pub direction: Direction,
}

impl RelationSpec {
    pub fn new(
        field: impl Into<String>,
        value: impl Into<BoltType>,
        label: impl Into<String>,
        rel_type: impl Into<String>,
        direction: Direction,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            label: label.into(),
            rel_type: rel_type.into(),
            direction,
        }
    }
}

/// Typed repository for one entity shape.
pub struct Repository<T: GraphModel> {
    client: GraphClient,
    registry: Arc<ModelRegistry>,
    _entity: PhantomData<fn() -> T>,
}

impl<T: GraphModel> Repository<T> {
    pub fn new(client: GraphClient, registry: Arc<ModelRegistry>) -> Self {
        Self {
            client,
            registry,
            _entity: PhantomData,
        }
    }

    pub(crate) fn client(&self) -> &GraphClient {
        &self.client
    }

    pub(crate) fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Create a node from the entity's scalar fields, optionally linking a
    /// related node in the same statement, and write the engine-assigned
    /// identifier back into the entity.
    pub async fn create(&self, entity: &mut T, relation: Option<RelationSpec>) -> Result<()> {
        let object = serialize(entity)?;
        let mut builder = CypherBuilder::new();

        let mut props = Vec::new();
        for scalar in T::schema().scalars {
            let Some(value) = object.get(scalar.field) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            props.push(format!("{p}: ${p}", p = scalar.property));
            builder = builder.param(scalar.property, json_to_bolt(value, scalar)?);
        }
        builder = builder.create(format!("(n:{} {{{}}})", T::LABEL, props.join(", ")));

        if let Some(rel) = &relation {
            builder = attach_relation(builder, rel);
        }
        builder = builder.returning("n");

        let row = self
            .client
            .query_one(builder.into_query())
            .await?
            .ok_or_else(|| {
                GraphError::Mapping(format!("CREATE returned no row for {}", T::LABEL))
            })?;
        let node: neo4rs::Node = row
            .get("n")
            .map_err(|e| GraphError::Mapping(format!("column n: {e}")))?;

        *entity = self.hydrate(&node)?;
        tracing::debug!(label = T::LABEL, "created node");
        Ok(())
    }

    /// Deferred single-entity lookup; execute with
    /// [`populate`](FindOne::populate).
    pub fn find(
        &self,
        field: impl Into<String>,
        value: impl Into<BoltType> + fmt::Debug,
    ) -> FindOne<'_, T> {
        let display = format!("{value:?}");
        FindOne::new(self, field.into(), value.into(), display)
    }

    /// Deferred multi-entity lookup; execute with
    /// [`populate`](FindMany::populate).
    pub fn find_all(
        &self,
        field: impl Into<String>,
        value: impl Into<BoltType> + fmt::Debug,
    ) -> FindMany<'_, T> {
        FindMany::new(self, field.into(), value.into())
    }

    /// Match by the entity's engine identifier and rewrite every scalar
    /// field, optionally attaching one relationship.
    ///
    /// Matching zero rows is not an error: the statement simply affects
    /// nothing. Callers that need existence guarantees must read first.
    pub async fn update(&self, entity: &T, relation: Option<RelationSpec>) -> Result<()> {
        let object = serialize(entity)?;
        let id = object.get("id").and_then(Value::as_i64).ok_or_else(|| {
            GraphError::Mapping(format!(
                "{} entity has no engine id; fetch it before updating",
                T::LABEL
            ))
        })?;

        let mut builder = CypherBuilder::new()
            .match_clause(format!("(n:{}) WHERE id(n) = $node_id", T::LABEL))
            .param("node_id", id);

        let mut assignments = Vec::new();
        for scalar in T::schema().scalars {
            let Some(value) = object.get(scalar.field) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            assignments.push(format!("n.{p} = ${p}", p = scalar.property));
            builder = builder.param(scalar.property, json_to_bolt(value, scalar)?);
        }
        builder = builder.set(assignments.join(", "));

        if let Some(rel) = &relation {
            builder = attach_relation(builder, rel);
        }

        self.client.run(builder.into_query()).await?;
        tracing::debug!(label = T::LABEL, node_id = id, "updated node");
        Ok(())
    }

    /// Delete the node matched by `field = value`.
    ///
    /// The node is read back first so the caller's entity keeps the
    /// pre-deletion state; a miss is `NotFound`. With `detach` the node's
    /// relationships are removed atomically with it; without, a node that
    /// still has relationships makes the engine reject the delete and that
    /// error is surfaced verbatim.
    pub async fn delete(
        &self,
        entity: &mut T,
        field: &str,
        value: impl Into<BoltType> + fmt::Debug,
        detach: bool,
    ) -> Result<()> {
        let display = format!("{value:?}");
        let value: BoltType = value.into();

        let read = CypherBuilder::new()
            .match_clause(root_match(T::LABEL, field))
            .param("value", value.clone())
            .returning("n");
        let row = self
            .client
            .query_one(read.into_query())
            .await?
            .ok_or_else(|| GraphError::NotFound {
                label: T::LABEL.to_string(),
                field: field.to_string(),
                value: display,
            })?;
        let node: neo4rs::Node = row
            .get("n")
            .map_err(|e| GraphError::Mapping(format!("column n: {e}")))?;
        *entity = self.hydrate(&node)?;

        let delete = CypherBuilder::new()
            .match_clause(root_match(T::LABEL, field))
            .param("value", value)
            .delete("n", detach);
        self.client.run(delete.into_query()).await?;
        tracing::debug!(label = T::LABEL, field, detach, "deleted node");
        Ok(())
    }

    /// Map a bare driver node (no children) into the entity type.
    fn hydrate(&self, node: &neo4rs::Node) -> Result<T> {
        let raw = tree::raw_node(node, &self.registry)?;
        let mut object = raw.properties;
        object.insert("id".to_string(), Value::from(raw.id));
        serde_json::from_value(Value::Object(object))
            .map_err(|e| GraphError::Mapping(format!("entity {}: {e}", T::LABEL)))
    }
}

fn attach_relation(builder: CypherBuilder, rel: &RelationSpec) -> CypherBuilder {
    let builder = builder
        .merge(format!("(m:{} {{{}: $related_value}})", rel.label, rel.field))
        .param("related_value", rel.value.clone());
    match rel.direction {
        Direction::Outgoing => builder.create(format!("(n)-[:{}]->(m)", rel.rel_type)),
        Direction::Incoming => builder.create(format!("(n)<-[:{}]-(m)", rel.rel_type)),
    }
}

fn serialize<T: GraphModel>(entity: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(entity) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(GraphError::Mapping(format!(
            "entity {} did not serialize to an object",
            T::LABEL
        ))),
        Err(e) => Err(GraphError::Mapping(e.to_string())),
    }
}

fn json_to_bolt(value: &Value, scalar: &ScalarField) -> Result<BoltType> {
    let converted = match (scalar.kind, value) {
        (PropertyKind::String, Value::String(s)) => Some(BoltType::String(BoltString::new(s))),
        (PropertyKind::Integer, Value::Number(n)) => {
            n.as_i64().map(|i| BoltType::Integer(BoltInteger::new(i)))
        }
        (PropertyKind::Float, Value::Number(n)) => {
            n.as_f64().map(|f| BoltType::Float(BoltFloat::new(f)))
        }
        (PropertyKind::Boolean, Value::Bool(b)) => Some(BoltType::Boolean(BoltBoolean::new(*b))),
        _ => None,
    };
    converted.ok_or_else(|| {
        GraphError::Mapping(format!(
            "property {:?}: expected {:?}, got {value}",
            scalar.property, scalar.kind
        ))
    })
}
