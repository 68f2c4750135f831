//! Builds a table from a parsed CREATE TABLE body.

use super::parser::{ColumnDef, CreateTable, ForeignKeyClause, TableElement};
use crate::model::{Column, ForeignKeyRef, Relationship, Table};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

/// Accumulates key information while a table body is walked, then
/// produces the columns in one go. A `PRIMARY KEY (...)` line after the
/// columns it names therefore marks them just like an inline one.
#[derive(Debug, Default)]
pub struct TableBuilder {
    name: String,
    columns: Vec<ColumnSeed>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeMap<String, ForeignKeyRef>,
    relationships: Vec<Relationship>,
}

#[derive(Debug)]
struct ColumnSeed {
    name: String,
    typ: String,
    nullable: bool,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn from_create(create: CreateTable) -> Self {
        let mut builder = Self::new(create.name);
        for element in create.elements {
            match element {
                TableElement::Column(def) => builder.add_column(def),
                TableElement::PrimaryKey(columns) => builder.add_primary_key(columns),
                TableElement::ForeignKey(fk) => builder.add_foreign_key(fk),
            }
        }
        builder
    }

    pub fn add_column(&mut self, def: ColumnDef) {
        if self.columns.iter().any(|c| c.name == def.name) {
            trace!(table = %self.name, column = %def.name, "duplicate column ignored");
            return;
        }

        if def.primary_key {
            self.primary_keys.insert(def.name.clone());
        }
        if let Some(reference) = def.references {
            // `REFERENCES t` with no column points at a same-named column
            let target_column = reference.column.unwrap_or_else(|| def.name.clone());
            self.bind(&def.name, &reference.table, &target_column);
        }

        self.columns.push(ColumnSeed {
            name: def.name,
            typ: def.typ,
            nullable: !def.not_null,
        });
    }

    pub fn add_primary_key(&mut self, columns: Vec<String>) {
        self.primary_keys.extend(columns);
    }

    pub fn add_foreign_key(&mut self, fk: ForeignKeyClause) {
        for (column, target_column) in column_pairs(&fk.columns, &fk.ref_columns) {
            self.bind(column, &fk.ref_table, target_column);
        }
    }

    /// Record `column -> table.target_column` and emit its relationship.
    fn bind(&mut self, column: &str, table: &str, target_column: &str) {
        self.foreign_keys.insert(
            column.to_string(),
            ForeignKeyRef {
                table: table.to_string(),
                column: target_column.to_string(),
            },
        );
        self.relationships
            .push(Relationship::one_to_many(&self.name, column, table, target_column));
    }

    /// Materialise the table and the relationships found in its body.
    pub fn build(self) -> (Table, Vec<Relationship>) {
        debug!(
            table = %self.name,
            pk = ?self.primary_keys,
            fk = ?self.foreign_keys.keys().collect::<Vec<_>>(),
            "built table"
        );

        let columns = self
            .columns
            .into_iter()
            .map(|seed| {
                let foreign_key_ref = self.foreign_keys.get(&seed.name).cloned();
                Column {
                    is_primary_key: self.primary_keys.contains(&seed.name),
                    is_foreign_key: foreign_key_ref.is_some(),
                    is_nullable: seed.nullable,
                    foreign_key_ref,
                    name: seed.name,
                    typ: seed.typ,
                }
            })
            .collect();

        let table = Table {
            name: self.name,
            columns,
        };
        (table, self.relationships)
    }
}

/// Pair each source column with its referenced column by position. A short
/// reference list falls back to its first entry, an empty one to the
/// source column's own name.
pub fn column_pairs<'c>(
    columns: &'c [String],
    ref_columns: &'c [String],
) -> impl Iterator<Item = (&'c str, &'c str)> {
    columns.iter().enumerate().map(move |(i, column)| {
        let target = ref_columns
            .get(i)
            .or_else(|| ref_columns.first())
            .unwrap_or(column);
        (column.as_str(), target.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::parser::Reference;

    fn def(name: &str) -> ColumnDef {
        ColumnDef {
            name: name.to_string(),
            typ: "INT".to_string(),
            primary_key: false,
            not_null: false,
            references: None,
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_later_primary_key_marks_earlier_columns() {
        let mut builder = TableBuilder::new("t");
        builder.add_column(def("a"));
        builder.add_column(def("b"));
        builder.add_primary_key(strings(&["a"]));

        let (table, rels) = builder.build();
        assert!(table.columns[0].is_primary_key);
        assert!(!table.columns[1].is_primary_key);
        assert!(rels.is_empty());
    }

    #[test]
    fn test_composite_foreign_key_fans_out() {
        let mut builder = TableBuilder::new("t");
        builder.add_column(def("a"));
        builder.add_column(def("b"));
        builder.add_foreign_key(ForeignKeyClause {
            columns: strings(&["a", "b"]),
            ref_table: "other".to_string(),
            ref_columns: strings(&["x", "y"]),
        });

        let (table, rels) = builder.build();
        let ids: Vec<&str> = rels.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["t_a_other_x", "t_b_other_y"]);
        assert_eq!(table.columns[1].foreign_key_ref.as_ref().unwrap().column, "y");
    }

    #[test]
    fn test_inline_reference_without_column() {
        let mut builder = TableBuilder::new("posts");
        builder.add_column(ColumnDef {
            references: Some(Reference {
                table: "users".to_string(),
                column: None,
            }),
            ..def("user_id")
        });

        let (table, rels) = builder.build();
        assert_eq!(
            table.columns[0].foreign_key_ref,
            Some(ForeignKeyRef {
                table: "users".to_string(),
                column: "user_id".to_string(),
            })
        );
        assert_eq!(rels[0].id, "posts_user_id_users_user_id");
    }

    #[test]
    fn test_duplicate_column_keeps_first() {
        let mut builder = TableBuilder::new("t");
        builder.add_column(def("a"));
        builder.add_column(ColumnDef {
            typ: "TEXT".to_string(),
            ..def("a")
        });

        let (table, _) = builder.build();
        assert_eq!(table.columns.len(), 1);
        assert_eq!(table.columns[0].typ, "INT");
    }

    #[test]
    fn test_column_pairs_fallbacks() {
        let cols = strings(&["a", "b"]);
        let short = strings(&["x"]);
        let pairs: Vec<_> = column_pairs(&cols, &short).collect();
        assert_eq!(pairs, [("a", "x"), ("b", "x")]);

        let pairs: Vec<_> = column_pairs(&cols, &[]).collect();
        assert_eq!(pairs, [("a", "a"), ("b", "b")]);
    }
}
