//! Regenerate `CREATE TABLE` statements from the parsed model.

use crate::model::{Schema, Table};

pub fn render(schema: &Schema) -> String {
    schema
        .tables
        .iter()
        .map(create_table)
        .collect::<Vec<_>>()
        .join("\n")
}

fn create_table(table: &Table) -> String {
    let mut lines: Vec<String> = table
        .columns
        .iter()
        .map(|c| {
            let not_null = if c.is_nullable { "" } else { " NOT NULL" };
            format!("  {} {}{not_null}", quote(&c.name), c.typ)
        })
        .collect();

    let pk: Vec<String> = table.primary_key().map(|c| quote(&c.name)).collect();
    if !pk.is_empty() {
        lines.push(format!("  PRIMARY KEY ({})", pk.join(", ")));
    }

    for column in &table.columns {
        if let Some(r) = &column.foreign_key_ref {
            lines.push(format!(
                "  FOREIGN KEY ({}) REFERENCES {}({})",
                quote(&column.name),
                quote(&r.table),
                quote(&r.column)
            ));
        }
    }

    format!("CREATE TABLE {} (\n{}\n);\n", quote(&table.name), lines.join(",\n"))
}

/// Double-quote names that would not survive as bare identifiers.
fn quote(name: &str) -> String {
    let bare = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if bare {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}
