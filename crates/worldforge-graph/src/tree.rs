//! Node tree reconstruction.
//!
//! A traversal query returns flat, denormalized rows: one tuple of
//! node-or-null columns per matched path, with the same node repeated
//! across rows wherever optional matches fan out. This module rebuilds the
//! nested structure: deduplicate nodes by their engine-assigned identifier,
//! infer parent/child edges from column order, then map the resulting
//! forest onto registered entity schemas.

use std::collections::HashMap;

use serde_json::{Map, Value};

use worldforge_core::{GraphModel, ModelRegistry, PropertyKind, ScalarField};

use crate::error::{GraphError, Result};

/// A node value lifted out of one result column.
///
/// The identifier is engine-assigned and stable only within the producing
/// transaction; it is used purely as a deduplication key.
#[derive(Debug, Clone)]
pub struct RawNode {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: Map<String, Value>,
}

/// One result row: node-or-null values in declared column order.
#[derive(Debug, Default)]
pub struct RawRecord {
    pub values: Vec<Option<RawNode>>,
}

/// A deduplicated node with its discovered children, keyed by identifier.
/// Lives only for the duration of one read call.
#[derive(Debug)]
pub struct ReconstructedNode {
    pub id: i64,
    pub label: &'static str,
    pub properties: Map<String, Value>,
    children: Vec<i64>,
}

impl ReconstructedNode {
    pub fn children(&self) -> &[i64] {
        &self.children
    }
}

/// The deduplicated forest built from one result set.
#[derive(Debug, Default)]
pub struct NodeForest {
    order: Vec<i64>,
    nodes: HashMap<i64, ReconstructedNode>,
}

/// Convert a driver node into a [`RawNode`], reading properties
/// schema-first: the node's label set is resolved through the registry and
/// each registered scalar is read with its declared kind. A runtime type
/// mismatch is a mapping error; an absent property is simply skipped.
pub fn raw_node(node: &neo4rs::Node, registry: &ModelRegistry) -> Result<RawNode> {
    let labels: Vec<String> = node.labels().into_iter().map(str::to_string).collect();
    let schema = registry.resolve(&labels)?;

    let keys = node.keys();
    let mut properties = Map::new();
    for scalar in schema.scalars {
        if !keys.contains(&scalar.property) {
            continue;
        }
        properties.insert(scalar.property.to_string(), read_property(node, scalar)?);
    }

    Ok(RawNode {
        id: node.id(),
        labels,
        properties,
    })
}

fn read_property(node: &neo4rs::Node, scalar: &ScalarField) -> Result<Value> {
    let value = match scalar.kind {
        PropertyKind::String => node.get::<String>(scalar.property).map(Value::String),
        PropertyKind::Integer => node.get::<i64>(scalar.property).map(Value::from),
        PropertyKind::Float => node.get::<f64>(scalar.property).map(Value::from),
        PropertyKind::Boolean => node.get::<bool>(scalar.property).map(Value::Bool),
    };
    value.map_err(|e| {
        GraphError::Mapping(format!(
            "property {:?} is not a {:?}: {e}",
            scalar.property, scalar.kind
        ))
    })
}

impl NodeForest {
    /// Build the forest from raw records.
    ///
    /// Deduplication: every non-null value is keyed by identifier; the
    /// first sighting creates the node (with the identifier injected as the
    /// `"id"` property), later sightings reuse it, so one identifier ends
    /// up with the union of children discovered anywhere in the result set.
    ///
    /// Linking: within each record, in declared column order, each non-null
    /// node is the candidate parent of the next non-null node. Insertion is
    /// idempotent by identifier, so repeated rows from optional-match
    /// fan-out never duplicate children.
    pub fn from_records(records: Vec<RawRecord>, registry: &ModelRegistry) -> Result<Self> {
        let mut forest = NodeForest::default();

        for record in records {
            let mut parent: Option<i64> = None;
            for value in record.values {
                let Some(raw) = value else { continue };
                let id = raw.id;

                if !forest.nodes.contains_key(&id) {
                    let schema = registry.resolve(&raw.labels)?;
                    let mut properties = raw.properties;
                    properties.insert("id".to_string(), Value::from(id));
                    forest.order.push(id);
                    forest.nodes.insert(
                        id,
                        ReconstructedNode {
                            id,
                            label: schema.label,
                            properties,
                            children: Vec::new(),
                        },
                    );
                }

                if let Some(parent_id) = parent {
                    forest.add_child(parent_id, id);
                }
                parent = Some(id);
            }
        }

        Ok(forest)
    }

    fn add_child(&mut self, parent: i64, child: i64) {
        if parent == child {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&parent) {
            if !node.children.contains(&child) {
                node.children.push(child);
            }
        }
    }

    pub fn get(&self, id: i64) -> Option<&ReconstructedNode> {
        self.nodes.get(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Map every node carrying the requested root label into a JSON value
    /// tree, in first-discovery order.
    ///
    /// Scalars are copied from properties; each relationship field collects
    /// the children whose label equals its target label, mapped
    /// recursively. Absent scalars are left out and fall back to the
    /// entity's field defaults during deserialization.
    pub fn map_roots(&self, root_label: &str, registry: &ModelRegistry) -> Result<Vec<Value>> {
        let mut roots = Vec::new();
        for id in &self.order {
            let node = &self.nodes[id];
            if node.label != root_label {
                continue;
            }
            let mut path = Vec::new();
            roots.push(self.map_node(node, registry, &mut path)?);
        }
        Ok(roots)
    }

    fn map_node(
        &self,
        node: &ReconstructedNode,
        registry: &ModelRegistry,
        path: &mut Vec<i64>,
    ) -> Result<Value> {
        let schema = registry
            .get(node.label)
            .ok_or_else(|| GraphError::Mapping(format!("label not registered: {}", node.label)))?;

        path.push(node.id);
        let mut object = node.properties.clone();
        for rel in schema.relationships {
            let mut mapped = Vec::new();
            for child_id in &node.children {
                let child = &self.nodes[child_id];
                if child.label != rel.target_label {
                    continue;
                }
                // Cyclic linkage (a node reachable from itself) terminates
                // here instead of recursing forever.
                if path.contains(child_id) {
                    continue;
                }
                mapped.push(self.map_node(child, registry, path)?);
            }
            object.insert(rel.field.to_string(), Value::Array(mapped));
        }
        path.pop();

        Ok(Value::Object(object))
    }
}

/// Map the forest's roots of label `T::LABEL` into typed entities.
pub fn into_entities<T: GraphModel>(forest: &NodeForest, registry: &ModelRegistry) -> Result<Vec<T>> {
    forest
        .map_roots(T::LABEL, registry)?
        .into_iter()
        .map(|value| {
            serde_json::from_value(value)
                .map_err(|e| GraphError::Mapping(format!("entity {}: {e}", T::LABEL)))
        })
        .collect()
}
