//! Markdown report: column tables, embedded Mermaid diagram, regenerated SQL.

use unicode_width::UnicodeWidthStr;

use super::{ddl, mermaid};
use crate::config::ExportOptions;
use crate::model::{Column, Schema};

const DEFAULT_TITLE: &str = "ER Diagram";
const CHECK: &str = "✓";

pub fn render(schema: &Schema, options: &ExportOptions) -> String {
    let title = options.title.as_deref().unwrap_or(DEFAULT_TITLE);
    let mut output = format!("# {title}\n\n## Tables\n");

    for table in &schema.tables {
        output.push_str(&format!("\n### {}\n\n", table.name));
        let rows: Vec<Vec<String>> = table.columns.iter().map(column_row).collect();
        output.push_str(&grid(
            &["Column", "Type", "PK", "FK", "Nullable", "References"],
            &rows,
        ));
    }

    if !schema.relationships.is_empty() {
        output.push_str("\n## Diagram\n\n```mermaid\n");
        output.push_str(&mermaid::render(schema, options.detail));
        output.push_str("```\n\n## Relationship details\n\n");

        let rows: Vec<Vec<String>> = schema
            .relationships
            .iter()
            .map(|r| {
                vec![
                    r.source.clone(),
                    r.source_column.clone(),
                    r.target.clone(),
                    r.target_column.clone(),
                    r.kind.as_str().to_string(),
                ]
            })
            .collect();
        output.push_str(&grid(
            &["Source table", "Source column", "Target table", "Target column", "Type"],
            &rows,
        ));
    }

    output.push_str("\n## SQL\n\n```sql\n");
    output.push_str(&ddl::render(schema));
    output.push_str("```\n");
    output
}

fn column_row(column: &Column) -> Vec<String> {
    let flag = |set: bool| (if set { CHECK } else { "" }).to_string();
    vec![
        column.name.clone(),
        column.typ.clone(),
        flag(column.is_primary_key),
        flag(column.is_foreign_key),
        flag(column.is_nullable),
        column
            .foreign_key_ref
            .as_ref()
            .map(|r| format!("{}.{}", r.table, r.column))
            .unwrap_or_default(),
    ]
}

/// Pipe table with cells padded to the widest display width per column,
/// so CJK names line up in a monospace editor.
fn grid(header: &[&str], rows: &[Vec<String>]) -> String {
    let escaped: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.replace('|', "\\|")).collect())
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.width().max(3)).collect();
    for row in &escaped {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.width());
        }
    }

    let mut output = grid_line(header.iter().copied(), &widths);
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    output.push_str(&format!("| {} |\n", rule.join(" | ")));
    for row in &escaped {
        output.push_str(&grid_line(row.iter().map(String::as_str), &widths));
    }
    output
}

fn grid_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &width)| format!("{cell}{}", " ".repeat(width.saturating_sub(cell.width()))))
        .collect();
    format!("| {} |\n", padded.join(" | "))
}
