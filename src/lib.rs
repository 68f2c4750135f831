pub mod config;
pub mod export;
pub mod model;
pub mod sql;

pub use sql::parse_sql;

use wasm_bindgen::prelude::*;

use config::{DetailLevel, ExportOptions, ParseOptions};
use export::Format;
use sql::Dialect;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn parse_with_dialect(source: &str, dialect: Option<&str>) -> Result<model::Schema, String> {
    let options = ParseOptions {
        dialect: dialect.and_then(Dialect::from_str).unwrap_or_default(),
        ..ParseOptions::default()
    };
    sql::parse_sql_with(source, &options).map_err(|e| e.to_string())
}

/// Parse SQL DDL and return the schema as JSON
#[wasm_bindgen(js_name = "parseSql")]
pub fn parse_sql_json(source: &str, dialect: Option<String>) -> Result<String, String> {
    let schema = parse_with_dialect(source, dialect.as_deref())?;
    serde_json::to_string(&schema).map_err(|e| e.to_string())
}

/// Parse SQL DDL and render it in one of the export formats
#[wasm_bindgen(js_name = "exportSchema")]
pub fn export_schema(source: &str, format: &str, detail: Option<String>) -> Result<String, String> {
    let format = Format::from_str(format).ok_or_else(|| format!("Unknown format: {format}"))?;
    let options = ExportOptions {
        detail: detail
            .as_deref()
            .and_then(DetailLevel::from_str)
            .unwrap_or(DetailLevel::All),
        title: None,
    };

    let schema = parse_with_dialect(source, None)?;
    export::export(&schema, format, &options).map_err(|e| e.to_string())
}
