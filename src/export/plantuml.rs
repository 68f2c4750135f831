//! PlantUML IE-notation output.

use super::types::diagram_ident;
use crate::config::ExportOptions;
use crate::model::{Column, Schema};

pub fn render(schema: &Schema, options: &ExportOptions) -> String {
    let mut output = String::from("@startuml\n");
    if let Some(title) = &options.title {
        output.push_str(&format!("title {title}\n"));
    }
    output.push_str("hide circle\nskinparam linetype ortho\n");

    for table in &schema.tables {
        output.push('\n');
        output.push_str(&format!(
            "entity \"{}\" as {} {{\n",
            table.name.replace('"', "'"),
            diagram_ident(&table.name)
        ));

        let (keys, rest): (Vec<&Column>, Vec<&Column>) = table
            .columns
            .iter()
            .filter(|c| options.detail.includes(c.is_primary_key, c.is_foreign_key))
            .partition(|c| c.is_primary_key);

        for column in &keys {
            output.push_str(&attribute(column));
        }
        if !keys.is_empty() && !rest.is_empty() {
            output.push_str("  --\n");
        }
        for column in &rest {
            output.push_str(&attribute(column));
        }
        output.push_str("}\n");
    }

    if !schema.relationships.is_empty() {
        output.push('\n');
    }
    for rel in &schema.relationships {
        output.push_str(&format!(
            "{} ||--o{{ {} : {} -> {}\n",
            diagram_ident(&rel.target),
            diagram_ident(&rel.source),
            rel.source_column,
            rel.target_column
        ));
    }

    output.push_str("@enduml\n");
    output
}

/// `* name : type <<FK>>`; the star marks a mandatory (PK or NOT NULL) column.
fn attribute(column: &Column) -> String {
    let mandatory = if column.is_primary_key || !column.is_nullable {
        "* "
    } else {
        ""
    };
    let fk = if column.is_foreign_key { " <<FK>>" } else { "" };
    format!("  {mandatory}{} : {}{fk}\n", column.name, column.typ)
}
