//! Constraints added by ALTER TABLE, held until every table is built.

use super::parser::AlterTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    ForeignKey,
    Unique,
}

impl ConstraintKind {
    /// Classify keyword text such as `PRIMARY  KEY`. Internal whitespace is
    /// folded to `_` before matching.
    pub fn from_keywords(text: &str) -> Option<Self> {
        let normalized = text
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
            .to_uppercase();
        match normalized.as_str() {
            "PRIMARY_KEY" => Some(Self::PrimaryKey),
            "FOREIGN_KEY" => Some(Self::ForeignKey),
            "UNIQUE" => Some(Self::Unique),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::PrimaryKey => "PRIMARY_KEY",
            Self::ForeignKey => "FOREIGN_KEY",
            Self::Unique => "UNIQUE",
        }
    }
}

/// One `ADD ...` clause waiting for its table.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingConstraint {
    pub table_name: String,
    pub kind: ConstraintKind,
    pub columns: Vec<String>,
    pub ref_table: Option<String>,
    pub ref_columns: Vec<String>,
}

/// Turn an ALTER TABLE statement into pending constraints, one per clause,
/// in source order.
pub fn collect(alter: AlterTable) -> Vec<PendingConstraint> {
    let table_name = alter.name;
    alter
        .clauses
        .into_iter()
        .map(|clause| {
            let (ref_table, ref_columns) = match clause.reference {
                Some((table, columns)) => (Some(table), columns),
                None => (None, Vec::new()),
            };
            PendingConstraint {
                table_name: table_name.clone(),
                kind: clause.kind,
                columns: clause.columns,
                ref_table,
                ref_columns,
            }
        })
        .collect()
}
