use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use sqlerd::config::{DetailLevel, ExportOptions, ParseOptions};
use sqlerd::export::{self, Format};
use sqlerd::sql::{self, Dialect};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlerd")]
#[command(version)]
#[command(about = "Extract an ER model from SQL DDL", long_about = None)]
struct Cli {
    /// Input SQL files, joined in order (stdin if none)
    files: Vec<PathBuf>,

    /// Output format: json, markdown, mermaid, plantuml, csv, tsv, sql
    #[arg(short, long, default_value = "json")]
    format: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// SQL dialect: auto, generic, postgres, mysql, sqlserver
    #[arg(short, long, default_value = "generic")]
    dialect: String,

    /// Columns shown in diagrams: tables, pk, pk_fk, all
    #[arg(long, default_value = "all")]
    detail: String,

    /// Drop relationships declared more than once
    #[arg(long)]
    dedup: bool,

    /// Title for markdown and plantuml output
    #[arg(long)]
    title: Option<String>,

    /// Log level when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(io::stderr)
        .try_init()
        .ok();

    let format = Format::from_str(&cli.format).ok_or_else(|| anyhow!("Invalid format: {}", cli.format))?;
    let dialect =
        Dialect::from_str(&cli.dialect).ok_or_else(|| anyhow!("Invalid dialect: {}", cli.dialect))?;
    let detail =
        DetailLevel::from_str(&cli.detail).ok_or_else(|| anyhow!("Invalid detail level: {}", cli.detail))?;

    let input = read_input(&cli.files)?;
    let parse_options = ParseOptions {
        dialect,
        dedup_relationships: cli.dedup,
        ..ParseOptions::default()
    };

    let schema = match sql::parse_sql_with(&input, &parse_options) {
        Ok(schema) => schema,
        Err(e) => {
            error!(error = %e, "parse failed");
            bail!("failed to parse SQL: {e}");
        }
    };
    info!(
        tables = schema.tables.len(),
        relationships = schema.relationships.len(),
        "parsed schema"
    );

    let export_options = ExportOptions {
        detail,
        title: cli.title,
    };
    let text = export::export(&schema, format, &export_options)?;

    match &cli.output {
        Some(path) => fs::write(path, &text)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => print!("{text}"),
    }

    if schema.is_empty() {
        warn!("no CREATE TABLE statements found");
        process::exit(2);
    }
    Ok(())
}

fn read_input(files: &[PathBuf]) -> Result<String> {
    if files.is_empty() {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read stdin")?;
        return Ok(input);
    }

    let contents = files
        .iter()
        .map(|path| {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(contents.join("\n\n"))
}
