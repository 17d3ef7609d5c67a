//! Entity schema descriptors.
//!
//! Each entity type that lives in the graph describes itself once, through a
//! static [`EntitySchema`] attached via the [`GraphModel`] trait. The schema
//! replaces per-call field inspection: query composition, parameter
//! extraction, and typed reconstruction are all driven from this descriptor.

use std::str::FromStr;

use serde::{de::DeserializeOwned, Serialize};

/// The runtime type a scalar graph property is read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    String,
    Integer,
    Float,
    Boolean,
}

/// Direction of a relationship, seen from the owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `(owner)-[:REL]->(target)`
    Outgoing,
    /// `(owner)<-[:REL]-(target)`
    Incoming,
}

impl Direction {
    /// The arrow form used by the relationship tag contract.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Outgoing => "->",
            Direction::Incoming => "<-",
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "->" => Ok(Direction::Outgoing),
            "<-" => Ok(Direction::Incoming),
            other => Err(format!("invalid relationship direction: {other:?}")),
        }
    }
}

/// A scalar property: graph property key paired with the entity field.
///
/// `field` is the serde name of the struct field; `property` is the key
/// stored on the graph node. They usually coincide.
#[derive(Debug, Clone, Copy)]
pub struct ScalarField {
    pub field: &'static str,
    pub property: &'static str,
    pub kind: PropertyKind,
}

/// A relationship-valued field: traversed during populate, filled with a
/// sequence of target entities during reconstruction.
///
/// Encodes the `"<relationship-type>,<direction>"` tag contract of the
/// entity definitions as a typed descriptor.
#[derive(Debug, Clone, Copy)]
pub struct RelationshipField {
    pub field: &'static str,
    pub rel_type: &'static str,
    pub direction: Direction,
    pub target_label: &'static str,
}

/// The full shape of one entity type: its label, scalar properties, and
/// relationship fields. Built once as a `static` per entity type.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub label: &'static str,
    pub scalars: &'static [ScalarField],
    pub relationships: &'static [RelationshipField],
}

impl EntitySchema {
    /// Look up a scalar by its graph property key.
    pub fn scalar(&self, property: &str) -> Option<&ScalarField> {
        self.scalars.iter().find(|s| s.property == property)
    }

    /// Look up a relationship by the entity field that holds it.
    pub fn relationship(&self, field: &str) -> Option<&RelationshipField> {
        self.relationships.iter().find(|r| r.field == field)
    }
}

/// Capability trait satisfied by every entity type stored in the graph.
///
/// Relationship fields are always sequences (`Vec<Target>`); a schema never
/// declares a single-valued relationship. The entity also carries an
/// `id: Option<i64>` field populated from the engine-assigned node
/// identifier — it is not a scalar property and never written to the graph.
pub trait GraphModel: Serialize + DeserializeOwned + Default + Send + Sync + 'static {
    /// The node label this entity is stored under.
    const LABEL: &'static str;

    /// The static schema descriptor for this entity type.
    fn schema() -> &'static EntitySchema;
}
