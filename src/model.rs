//! ER model produced by the SQL parser.
//!
//! Field names serialize in camelCase because the diagram front-end reads
//! this JSON directly.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub tables: Vec<Table>,
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    /// Type text as written in the source, whitespace collapsed.
    #[serde(rename = "type")]
    pub typ: String,
    pub is_primary_key: bool,
    pub is_foreign_key: bool,
    pub is_nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key_ref: Option<ForeignKeyRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    pub table: String,
    pub column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_column: String,
    pub target_column: String,
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipKind {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl RelationshipKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OneToOne => "one-to-one",
            Self::OneToMany => "one-to-many",
            Self::ManyToMany => "many-to-many",
        }
    }
}

impl Column {
    /// Point this column at `table.column`. Keeps the FK flag and the
    /// reference in step.
    pub fn set_reference(&mut self, reference: ForeignKeyRef) {
        self.is_foreign_key = true;
        self.foreign_key_ref = Some(reference);
    }
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_primary_key)
    }
}

impl Relationship {
    /// Every foreign-key binding becomes an edge through here, so ids are
    /// built the same way whichever constraint declared it.
    pub fn one_to_many(
        source: &str,
        source_column: &str,
        target: &str,
        target_column: &str,
    ) -> Self {
        Self {
            id: format!("{source}_{source_column}_{target}_{target_column}"),
            source: source.to_string(),
            target: target.to_string(),
            source_column: source_column.to_string(),
            target_column: target_column.to_string(),
            kind: RelationshipKind::OneToMany,
        }
    }
}

impl Schema {
    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// True when no `CREATE TABLE` was recognised.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Drop relationships whose id was already seen, keeping the first.
    pub fn dedup_relationships(&mut self) {
        let mut seen = HashSet::new();
        self.relationships.retain(|r| seen.insert(r.id.clone()));
    }
}
