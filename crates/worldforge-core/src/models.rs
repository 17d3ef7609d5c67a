//! Domain entity types for the worldbuilding graph.
//!
//! Each entity derives its serde shape and attaches a static [`EntitySchema`]
//! through [`GraphModel`]. The `id` field holds the engine-assigned node
//! identifier; it is populated during reconstruction and never written as a
//! property. Relationship fields are always sequences.

use serde::{Deserialize, Serialize};

use crate::schema::{
    Direction, EntitySchema, GraphModel, PropertyKind, RelationshipField, ScalarField,
};

/// An account that owns worlds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    pub id: Option<i64>,
    pub username: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub worlds: Vec<World>,
}

static USER_SCHEMA: EntitySchema = EntitySchema {
    label: "User",
    scalars: &[
        ScalarField {
            field: "username",
            property: "username",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "userID",
            property: "userID",
            kind: PropertyKind::Integer,
        },
    ],
    relationships: &[RelationshipField {
        field: "worlds",
        rel_type: "OWNS",
        direction: Direction::Outgoing,
        target_label: "World",
    }],
};

impl GraphModel for User {
    const LABEL: &'static str = "User";

    fn schema() -> &'static EntitySchema {
        &USER_SCHEMA
    }
}

/// A top-level world, the root of the geography tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct World {
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub world_type: String,
    pub description: String,
    pub continents: Vec<Continent>,
    pub oceans: Vec<Ocean>,
}

static WORLD_SCHEMA: EntitySchema = EntitySchema {
    label: "World",
    scalars: &[
        ScalarField {
            field: "name",
            property: "name",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "type",
            property: "type",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "description",
            property: "description",
            kind: PropertyKind::String,
        },
    ],
    relationships: &[
        RelationshipField {
            field: "continents",
            rel_type: "HAS",
            direction: Direction::Outgoing,
            target_label: "Continent",
        },
        RelationshipField {
            field: "oceans",
            rel_type: "HAS",
            direction: Direction::Outgoing,
            target_label: "Ocean",
        },
    ],
};

impl GraphModel for World {
    const LABEL: &'static str = "World";

    fn schema() -> &'static EntitySchema {
        &WORLD_SCHEMA
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Continent {
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub continent_type: String,
    pub description: String,
    pub zones: Vec<Zone>,
}

static CONTINENT_SCHEMA: EntitySchema = EntitySchema {
    label: "Continent",
    scalars: &[
        ScalarField {
            field: "name",
            property: "name",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "type",
            property: "type",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "description",
            property: "description",
            kind: PropertyKind::String,
        },
    ],
    relationships: &[RelationshipField {
        field: "zones",
        rel_type: "HAS",
        direction: Direction::Outgoing,
        target_label: "Zone",
    }],
};

impl GraphModel for Continent {
    const LABEL: &'static str = "Continent";

    fn schema() -> &'static EntitySchema {
        &CONTINENT_SCHEMA
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ocean {
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
}

static OCEAN_SCHEMA: EntitySchema = EntitySchema {
    label: "Ocean",
    scalars: &[
        ScalarField {
            field: "name",
            property: "name",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "description",
            property: "description",
            kind: PropertyKind::String,
        },
    ],
    relationships: &[],
};

impl GraphModel for Ocean {
    const LABEL: &'static str = "Ocean";

    fn schema() -> &'static EntitySchema {
        &OCEAN_SCHEMA
    }
}

/// A region within a continent: holds named locations and cities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub zone_type: String,
    pub description: String,
    pub biome: String,
    pub locations: Vec<Location>,
    pub cities: Vec<City>,
}

static ZONE_SCHEMA: EntitySchema = EntitySchema {
    label: "Zone",
    scalars: &[
        ScalarField {
            field: "name",
            property: "name",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "type",
            property: "type",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "description",
            property: "description",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "biome",
            property: "biome",
            kind: PropertyKind::String,
        },
    ],
    relationships: &[
        RelationshipField {
            field: "locations",
            rel_type: "HAS",
            direction: Direction::Outgoing,
            target_label: "Location",
        },
        RelationshipField {
            field: "cities",
            rel_type: "HAS",
            direction: Direction::Outgoing,
            target_label: "City",
        },
    ],
};

impl GraphModel for Zone {
    const LABEL: &'static str = "Zone";

    fn schema() -> &'static EntitySchema {
        &ZONE_SCHEMA
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub location_type: String,
    pub description: String,
}

static LOCATION_SCHEMA: EntitySchema = EntitySchema {
    label: "Location",
    scalars: &[
        ScalarField {
            field: "name",
            property: "name",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "type",
            property: "type",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "description",
            property: "description",
            kind: PropertyKind::String,
        },
    ],
    relationships: &[],
};

impl GraphModel for Location {
    const LABEL: &'static str = "Location";

    fn schema() -> &'static EntitySchema {
        &LOCATION_SCHEMA
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    pub id: Option<i64>,
    pub name: String,
    #[serde(rename = "type")]
    pub city_type: String,
    pub description: String,
    pub capital: bool,
}

static CITY_SCHEMA: EntitySchema = EntitySchema {
    label: "City",
    scalars: &[
        ScalarField {
            field: "name",
            property: "name",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "type",
            property: "type",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "description",
            property: "description",
            kind: PropertyKind::String,
        },
        ScalarField {
            field: "capital",
            property: "capital",
            kind: PropertyKind::Boolean,
        },
    ],
    relationships: &[],
};

impl GraphModel for City {
    const LABEL: &'static str = "City";

    fn schema() -> &'static EntitySchema {
        &CITY_SCHEMA
    }
}
