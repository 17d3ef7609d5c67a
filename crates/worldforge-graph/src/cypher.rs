//! Fluent Cypher query builder.
//!
//! Accumulates clause fragments in call order plus named parameters;
//! `build` concatenates the fragments verbatim. The caller is responsible
//! for legal clause ordering. Scalar values always travel as named
//! parameters; labels and property keys are interpolated directly into the
//! query text — they are code-supplied, never end-user input, so this is an
//! accepted, closed injection surface.

use neo4rs::{query, BoltType, Query};

/// Builder for one parameterized Cypher statement.
#[derive(Debug, Default)]
pub struct CypherBuilder {
    fragments: Vec<String>,
    params: Vec<(String, BoltType)>,
}

impl CypherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a `MATCH` clause.
    pub fn match_clause(mut self, clause: impl AsRef<str>) -> Self {
        self.fragments.push(format!("MATCH {}", clause.as_ref()));
        self
    }

    /// Append an `OPTIONAL MATCH` clause.
    pub fn optional_match(mut self, clause: impl AsRef<str>) -> Self {
        self.fragments
            .push(format!("OPTIONAL MATCH {}", clause.as_ref()));
        self
    }

    /// Append a `CREATE` clause.
    pub fn create(mut self, clause: impl AsRef<str>) -> Self {
        self.fragments.push(format!("CREATE {}", clause.as_ref()));
        self
    }

    /// Append a `MERGE` clause.
    pub fn merge(mut self, clause: impl AsRef<str>) -> Self {
        self.fragments.push(format!("MERGE {}", clause.as_ref()));
        self
    }

    /// Append a `SET` clause.
    pub fn set(mut self, clause: impl AsRef<str>) -> Self {
        self.fragments.push(format!("SET {}", clause.as_ref()));
        self
    }

    /// Append a `WITH` clause.
    pub fn with(mut self, clause: impl AsRef<str>) -> Self {
        self.fragments.push(format!("WITH {}", clause.as_ref()));
        self
    }

    /// Append a `DELETE` (or `DETACH DELETE`) clause for the given target.
    pub fn delete(mut self, target: impl AsRef<str>, detach: bool) -> Self {
        let keyword = if detach { "DETACH DELETE" } else { "DELETE" };
        self.fragments
            .push(format!("{keyword} {}", target.as_ref()));
        self
    }

    /// Append a `RETURN` clause.
    pub fn returning(mut self, clause: impl AsRef<str>) -> Self {
        self.fragments.push(format!("RETURN {}", clause.as_ref()));
        self
    }

    /// Append a `LIMIT` clause.
    pub fn limit(mut self, limit: u32) -> Self {
        self.fragments.push(format!("LIMIT {limit}"));
        self
    }

    /// Add a named parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<BoltType>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Concatenate the fragments in call order and hand back the text with
    /// its parameters.
    pub fn build(self) -> (String, Vec<(String, BoltType)>) {
        (self.fragments.join(" "), self.params)
    }

    /// Build a ready-to-execute driver query.
    pub fn into_query(self) -> Query {
        let (text, params) = self.build();
        tracing::debug!(cypher = %text, "composed query");
        params
            .into_iter()
            .fold(query(&text), |q, (key, value)| q.param(&key, value))
    }
}
