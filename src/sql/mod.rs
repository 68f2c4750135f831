//! SQL DDL to ER model conversion.
//!
//! The pipeline is: normalize -> tokenize -> parse statements -> collect
//! ALTER TABLE constraints -> build tables -> reconcile constraints.

mod builder;
mod constraint;
mod dialect;
mod lexer;
mod normalize;
mod parser;
mod reconcile;

pub use dialect::{Dialect, QuoteStyle};
pub use lexer::LexError;
pub use normalize::normalize;

use crate::config::ParseOptions;
use crate::model::Schema;
use builder::TableBuilder;
use lexer::Lexer;
use parser::Statement;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum SqlParseError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("Input is {len} bytes, over the {limit} byte limit")]
    InputTooLarge { len: usize, limit: usize },
}

/// Parse SQL DDL into a schema with default options.
pub fn parse_sql(input: &str) -> Result<Schema, SqlParseError> {
    parse_sql_with(input, &ParseOptions::default())
}

/// Parse SQL DDL into a schema.
///
/// Unrecognised statements and table elements are skipped. An error means
/// nothing was produced; a schema without tables is a successful parse.
pub fn parse_sql_with(input: &str, options: &ParseOptions) -> Result<Schema, SqlParseError> {
    if input.len() > options.max_input_bytes {
        return Err(SqlParseError::InputTooLarge {
            len: input.len(),
            limit: options.max_input_bytes,
        });
    }

    let text = normalize(input);
    let dialect = options.dialect.resolve(&text);
    let tokens = Lexer::new(&text, dialect).tokenize()?;
    debug!(?dialect, tokens = tokens.len(), "tokenized");

    let mut tables = Vec::new();
    let mut relationships = Vec::new();
    let mut pending = Vec::new();

    for statement in parser::parse_statements(&text, &tokens) {
        match statement {
            Statement::AlterTable(alter) => pending.extend(constraint::collect(alter)),
            Statement::CreateTable(create) => {
                let (table, found) = TableBuilder::from_create(create).build();
                tables.push(table);
                relationships.extend(found);
            }
        }
    }

    reconcile::apply(&mut tables, pending, &mut relationships);

    let mut schema = Schema {
        tables,
        relationships,
    };
    if options.dedup_relationships {
        schema.dedup_relationships();
    }
    debug!(
        tables = schema.tables.len(),
        relationships = schema.relationships.len(),
        "parsed schema"
    );
    Ok(schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_table() {
        let sql = r#"
            CREATE TABLE users (
                id INT PRIMARY KEY,
                email VARCHAR(255) NOT NULL UNIQUE
            );
        "#;

        let schema = parse_sql(sql).unwrap();
        assert_eq!(schema.tables.len(), 1);

        let users = &schema.tables[0];
        assert_eq!(users.name, "users");
        assert_eq!(users.columns.len(), 2);
        assert!(users.columns[0].is_primary_key);
        assert!(users.columns[0].is_nullable);
        assert_eq!(users.columns[1].typ, "VARCHAR(255)");
        assert!(!users.columns[1].is_nullable);
    }

    #[test]
    fn test_parse_with_foreign_key() {
        let sql = r#"
            CREATE TABLE users (id INT PRIMARY KEY);
            CREATE TABLE orders (
                id INT PRIMARY KEY,
                user_id INT REFERENCES users(id)
            );
        "#;

        let schema = parse_sql(sql).unwrap();
        assert_eq!(schema.tables.len(), 2);
        assert_eq!(schema.relationships.len(), 1);

        let rel = &schema.relationships[0];
        assert_eq!(rel.source, "orders");
        assert_eq!(rel.target, "users");
        assert_eq!(rel.id, "orders_user_id_users_id");
    }

    #[test]
    fn test_parse_mysql_dump() {
        let sql = "
            CREATE TABLE `users` (
              `id` INT NOT NULL AUTO_INCREMENT,
              `name` VARCHAR(255) DEFAULT NULL,
              PRIMARY KEY (`id`)
            ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;
        ";

        let schema = parse_sql(sql).unwrap();
        let users = &schema.tables[0];
        assert_eq!(users.columns.len(), 2);
        assert!(users.columns[0].is_primary_key);
        assert!(!users.columns[0].is_nullable);
        assert!(users.columns[1].is_nullable);
    }

    #[test]
    fn test_duplicate_relationships_preserved_by_default() {
        let sql = "
            CREATE TABLE posts (user_id INT REFERENCES users(id));
            ALTER TABLE posts ADD FOREIGN KEY (user_id) REFERENCES users(id);
        ";

        let schema = parse_sql(sql).unwrap();
        assert_eq!(schema.relationships.len(), 2);
        assert_eq!(schema.relationships[0].id, schema.relationships[1].id);

        let options = ParseOptions {
            dedup_relationships: true,
            ..ParseOptions::default()
        };
        let schema = parse_sql_with(sql, &options).unwrap();
        assert_eq!(schema.relationships.len(), 1);
    }

    #[test]
    fn test_input_limit() {
        let options = ParseOptions {
            max_input_bytes: 8,
            ..ParseOptions::default()
        };
        let err = parse_sql_with("CREATE TABLE t (id INT);", &options).unwrap_err();
        assert!(matches!(err, SqlParseError::InputTooLarge { len: 24, limit: 8 }));
    }

    #[test]
    fn test_lex_error_is_all_or_nothing() {
        let err = parse_sql("CREATE TABLE ok (id INT);\nCREATE TABLE bad (`id INT);").unwrap_err();
        assert!(matches!(err, SqlParseError::Lex(LexError::UnterminatedIdentifier { line: 2, .. })));
    }
}
