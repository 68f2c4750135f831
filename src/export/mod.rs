//! Renderers that turn a parsed [`Schema`] into text formats.

mod ddl;
mod delimited;
mod markdown;
mod mermaid;
mod plantuml;
mod types;

pub use types::{diagram_ident, diagram_type};

use crate::config::ExportOptions;
use crate::model::Schema;
use delimited::Delimiter;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Json,
    Markdown,
    Mermaid,
    PlantUml,
    Csv,
    Tsv,
    Sql,
}

impl Format {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "markdown" | "md" => Some(Self::Markdown),
            "mermaid" | "mmd" => Some(Self::Mermaid),
            "plantuml" | "puml" => Some(Self::PlantUml),
            "csv" => Some(Self::Csv),
            "tsv" => Some(Self::Tsv),
            "sql" => Some(Self::Sql),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn export(schema: &Schema, format: Format, options: &ExportOptions) -> Result<String, ExportError> {
    let text = match format {
        Format::Json => {
            let mut json = serde_json::to_string_pretty(schema)?;
            json.push('\n');
            json
        }
        Format::Markdown => markdown::render(schema, options),
        Format::Mermaid => mermaid::render(schema, options.detail),
        Format::PlantUml => plantuml::render(schema, options),
        Format::Csv => delimited::render(schema, Delimiter::Comma),
        Format::Tsv => delimited::render(schema, Delimiter::Tab),
        Format::Sql => ddl::render(schema),
    };
    Ok(text)
}
