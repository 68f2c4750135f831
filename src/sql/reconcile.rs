//! Applies ALTER TABLE constraints once every table exists.

use super::builder::column_pairs;
use super::constraint::{ConstraintKind, PendingConstraint};
use crate::model::{ForeignKeyRef, Relationship, Table};
use tracing::debug;

/// Apply pending constraints in order. Constraints on tables or columns
/// that were never created are dropped: the input may be a partial schema.
pub fn apply(tables: &mut [Table], pending: Vec<PendingConstraint>, relationships: &mut Vec<Relationship>) {
    for constraint in pending {
        let Some(table) = tables.iter_mut().find(|t| t.name == constraint.table_name) else {
            debug!(
                table = %constraint.table_name,
                kind = constraint.kind.as_str(),
                "constraint on unknown table dropped"
            );
            continue;
        };

        match constraint.kind {
            ConstraintKind::PrimaryKey => {
                for name in &constraint.columns {
                    if let Some(column) = table.column_mut(name) {
                        column.is_primary_key = true;
                    }
                }
            }
            ConstraintKind::ForeignKey => {
                let Some(ref_table) = constraint.ref_table.as_deref() else {
                    continue;
                };
                for (name, target_column) in column_pairs(&constraint.columns, &constraint.ref_columns) {
                    let Some(column) = table.column_mut(name) else {
                        continue;
                    };
                    column.set_reference(ForeignKeyRef {
                        table: ref_table.to_string(),
                        column: target_column.to_string(),
                    });
                    relationships.push(Relationship::one_to_many(&table.name, name, ref_table, target_column));
                }
            }
            ConstraintKind::Unique => {}
        }
    }
}
