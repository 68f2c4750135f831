//! Mermaid `erDiagram` output.

use super::types::{diagram_ident, diagram_type};
use crate::config::DetailLevel;
use crate::model::Schema;

/// Render the schema as a Mermaid ER diagram.
///
/// Relationships point from the referenced table (one) to the referencing
/// table (many).
pub fn render(schema: &Schema, detail: DetailLevel) -> String {
    let mut output = String::from("erDiagram\n");

    for table in &schema.tables {
        let name = diagram_ident(&table.name);
        let columns: Vec<_> = table
            .columns
            .iter()
            .filter(|c| detail.includes(c.is_primary_key, c.is_foreign_key))
            .collect();

        if columns.is_empty() {
            output.push_str(&format!("    {name}\n"));
            continue;
        }

        output.push_str(&format!("    {name} {{\n"));
        for column in columns {
            let keys = match (column.is_primary_key, column.is_foreign_key) {
                (true, true) => " PK, FK",
                (true, false) => " PK",
                (false, true) => " FK",
                (false, false) => "",
            };
            output.push_str(&format!(
                "        {} {}{}\n",
                diagram_type(&column.typ),
                diagram_ident(&column.name),
                keys
            ));
        }
        output.push_str("    }\n");
    }

    for rel in &schema.relationships {
        output.push_str(&format!(
            "    {} ||--o{{ {} : \"{} -> {}\"\n",
            diagram_ident(&rel.target),
            diagram_ident(&rel.source),
            rel.source_column.replace('"', "'"),
            rel.target_column.replace('"', "'"),
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::parse_sql;

    const SQL: &str = "
        CREATE TABLE users (id INT PRIMARY KEY, name VARCHAR(50) NOT NULL);
        CREATE TABLE posts (
            id INT PRIMARY KEY,
            user_id INT,
            FOREIGN KEY (user_id) REFERENCES users(id)
        );
    ";

    #[test]
    fn test_render_all() {
        let schema = parse_sql(SQL).unwrap();
        let out = render(&schema, DetailLevel::All);

        assert!(out.starts_with("erDiagram\n"));
        assert!(out.contains("    users {\n        INT id PK\n        VARCHAR name\n    }\n"));
        assert!(out.contains("        INT user_id FK\n"));
        assert!(out.ends_with("    users ||--o{ posts : \"user_id -> id\"\n"));
    }

    #[test]
    fn test_render_tables_only() {
        let schema = parse_sql(SQL).unwrap();
        let out = render(&schema, DetailLevel::Tables);

        assert!(out.contains("    users\n    posts\n"));
        assert!(!out.contains("INT"));
    }

    #[test]
    fn test_render_pk_fk_marker() {
        let schema =
            parse_sql("CREATE TABLE profile (user_id INT PRIMARY KEY REFERENCES users(id), bio TEXT);").unwrap();
        let out = render(&schema, DetailLevel::PkFk);

        assert!(out.contains("        INT user_id PK, FK\n"));
        assert!(!out.contains("bio"));
    }
}
