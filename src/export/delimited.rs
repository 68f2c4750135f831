//! Column listings as CSV or TSV, one section per table.

use crate::model::{Column, Schema};

const HEADER: [&str; 6] = ["Column", "Type", "Primary Key", "Foreign Key", "Nullable", "References"];
const CHECK: &str = "✓";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Tab,
}

impl Delimiter {
    fn separator(self) -> &'static str {
        match self {
            Self::Comma => ",",
            Self::Tab => "\t",
        }
    }

    /// Text cell: CSV always quotes and doubles embedded quotes, TSV
    /// flattens characters that would break the row.
    fn text(self, value: &str) -> String {
        match self {
            Self::Comma => format!("\"{}\"", value.replace('"', "\"\"")),
            Self::Tab => value.replace(['\t', '\n', '\r'], " "),
        }
    }
}

pub fn render(schema: &Schema, delimiter: Delimiter) -> String {
    let sep = delimiter.separator();
    let mut output = String::new();

    for (i, table) in schema.tables.iter().enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push_str(&format!("Table{sep}{}\n\n", delimiter.text(&table.name)));
        output.push_str(&HEADER.join(sep));
        output.push('\n');

        for column in &table.columns {
            output.push_str(&row(column, delimiter).join(sep));
            output.push('\n');
        }
    }

    output
}

fn row(column: &Column, delimiter: Delimiter) -> [String; 6] {
    let flag = |set: bool| if set { CHECK.to_string() } else { String::new() };
    let reference = column
        .foreign_key_ref
        .as_ref()
        .map(|r| format!("{}({})", r.table, r.column))
        .unwrap_or_default();

    [
        delimiter.text(&column.name),
        delimiter.text(&column.typ),
        flag(column.is_primary_key),
        flag(column.is_foreign_key),
        flag(column.is_nullable),
        delimiter.text(&reference),
    ]
}
