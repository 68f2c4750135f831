//! Recursive-descent parser for CREATE TABLE and ALTER TABLE statements.
//!
//! The parser only recognises the DDL needed for an ER model. Statements of
//! any other kind are skipped up to their `;`, and a table element that
//! matches no production is dropped rather than failing the whole parse.

use super::constraint::ConstraintKind;
use super::lexer::{Token, TokenKind};
use tracing::trace;

/// A statement the model cares about.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    CreateTable(CreateTable),
    AlterTable(AlterTable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    pub name: String,
    pub elements: Vec<TableElement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableElement {
    Column(ColumnDef),
    PrimaryKey(Vec<String>),
    ForeignKey(ForeignKeyClause),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    pub typ: String,
    pub primary_key: bool,
    pub not_null: bool,
    pub references: Option<Reference>,
}

/// `REFERENCES table [(column)]` attached to a single column.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    pub table: String,
    pub column: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyClause {
    pub columns: Vec<String>,
    pub ref_table: String,
    /// Empty when the REFERENCES clause names no columns.
    pub ref_columns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlterTable {
    pub name: String,
    pub clauses: Vec<AddClause>,
}

/// `ADD [CONSTRAINT name] PRIMARY KEY | FOREIGN KEY | UNIQUE (...)`
#[derive(Debug, Clone, PartialEq)]
pub struct AddClause {
    pub kind: ConstraintKind,
    pub columns: Vec<String>,
    pub reference: Option<(String, Vec<String>)>,
}

/// Words that can open a table-level element. All of them are also valid
/// column names, so `opens_constraint` looks further ahead before treating
/// the element as a constraint.
const ELEMENT_KEYWORDS: &[&str] = &[
    "PRIMARY", "FOREIGN", "UNIQUE", "CHECK", "KEY", "INDEX", "FULLTEXT", "SPATIAL", "LIKE",
    "EXCLUDE", "PERIOD",
];

/// Second words that only ever follow an element keyword:
/// `PRIMARY KEY`, `UNIQUE INDEX`, `PERIOD FOR`, `INDEX USING`...
const CONSTRAINT_FOLLOWERS: &[&str] = &["KEY", "INDEX", "FOR", "USING", "NULLS"];

/// Base type names, so `key TEXT` reads as a column and `KEY idx (a)` does not.
const TYPE_NAMES: &[&str] = &[
    "INT", "INTEGER", "SMALLINT", "BIGINT", "TINYINT", "MEDIUMINT", "SERIAL", "BIGSERIAL",
    "SMALLSERIAL", "DECIMAL", "NUMERIC", "REAL", "FLOAT", "DOUBLE", "MONEY", "BIT", "BOOLEAN",
    "BOOL", "CHAR", "CHARACTER", "VARCHAR", "NCHAR", "NVARCHAR", "TEXT", "TINYTEXT", "MEDIUMTEXT",
    "LONGTEXT", "NTEXT", "CITEXT", "BLOB", "BYTEA", "BINARY", "VARBINARY", "DATE", "TIME",
    "TIMESTAMP", "TIMESTAMPTZ", "DATETIME", "DATETIME2", "DATETIMEOFFSET", "INTERVAL", "YEAR",
    "UUID", "UNIQUEIDENTIFIER", "JSON", "JSONB", "XML", "ENUM", "INET", "CIDR",
];

/// Words that continue a type name: `DOUBLE PRECISION`, `INT UNSIGNED`...
const TYPE_CONTINUATIONS: &[&str] = &[
    "VARYING", "PRECISION", "UNSIGNED", "SIGNED", "ZEROFILL", "IDENTITY",
];

/// Parse every CREATE TABLE / ALTER TABLE statement out of a token stream.
///
/// `source` is the text the tokens were lexed from; type names are sliced
/// out of it so they keep their original spelling.
pub fn parse_statements(source: &str, tokens: &[Token]) -> Vec<Statement> {
    let mut cursor = Cursor::new(source, tokens);
    let mut statements = Vec::new();

    while !cursor.at_end() {
        if cursor.at_keyword("CREATE") {
            if let Some(create) = cursor.create_table() {
                statements.push(Statement::CreateTable(create));
            }
        } else if cursor.at_keyword("ALTER") {
            if let Some(alter) = cursor.alter_table() {
                statements.push(Statement::AlterTable(alter));
            }
        } else {
            cursor.skip_statement();
        }
    }

    statements
}

/// Token cursor. Productions for table elements and ALTER clauses run on a
/// cursor over just that element's tokens, so a production can never
/// consume past the comma that ends its element.
struct Cursor<'a> {
    source: &'a str,
    tokens: &'a [Token],
    pos: usize,
}

static EOF: TokenKind = TokenKind::Eof;

impl<'a> Cursor<'a> {
    fn new(source: &'a str, tokens: &'a [Token]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    fn current(&self) -> &'a TokenKind {
        self.tokens.get(self.pos).map_or(&EOF, |t| &t.kind)
    }

    fn peek_at(&self, offset: usize) -> &'a TokenKind {
        self.tokens.get(self.pos + offset).map_or(&EOF, |t| &t.kind)
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn at_end(&self) -> bool {
        matches!(self.current(), TokenKind::Eof)
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.current() == kind
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.at(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn is_keyword(kind: &TokenKind, keyword: &str) -> bool {
        matches!(kind, TokenKind::Word(w) if w.eq_ignore_ascii_case(keyword))
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        Self::is_keyword(self.current(), keyword)
    }

    fn at_keywords(&self, keywords: &[&str]) -> bool {
        keywords
            .iter()
            .enumerate()
            .all(|(i, k)| Self::is_keyword(self.peek_at(i), k))
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.at_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a keyword sequence only if all of it is present.
    fn eat_keywords(&mut self, keywords: &[&str]) -> bool {
        if self.at_keywords(keywords) {
            self.pos += keywords.len();
            true
        } else {
            false
        }
    }

    fn ident(&mut self) -> Option<String> {
        match self.current() {
            TokenKind::Word(name) | TokenKind::Quoted(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            _ => None,
        }
    }

    /// `[schema.]name`; only the last part is kept.
    fn qualified_name(&mut self) -> Option<String> {
        let mut name = self.ident()?;
        while self.at(&TokenKind::Dot) {
            self.advance();
            name = self.ident()?;
        }
        Some(name)
    }

    fn skip_statement(&mut self) {
        while !matches!(self.current(), TokenKind::Semicolon | TokenKind::Eof) {
            self.advance();
        }
        self.eat(&TokenKind::Semicolon);
    }

    /// Skip a balanced `( ... )` group; positioned on the `(`.
    fn skip_group(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.current() {
                TokenKind::LParen => depth += 1,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                TokenKind::Eof => return,
                _ => {}
            }
            self.advance();
            if depth == 0 {
                return;
            }
        }
    }

    /// Split the tokens up to the closing paren (or `;` for ALTER) into
    /// top-level comma separated slices. Leaves the cursor on the
    /// terminator.
    fn split_top_level(&mut self, stop_at_rparen: bool) -> Vec<&'a [Token]> {
        let mut items = Vec::new();
        let tokens = self.tokens;
        let mut depth = 0usize;
        let mut start = self.pos;

        loop {
            match self.current() {
                TokenKind::Eof | TokenKind::Semicolon => break,
                TokenKind::LParen => depth += 1,
                TokenKind::RParen if depth == 0 && stop_at_rparen => break,
                TokenKind::RParen => depth = depth.saturating_sub(1),
                TokenKind::Comma if depth == 0 => {
                    items.push(&tokens[start..self.pos]);
                    start = self.pos + 1;
                }
                _ => {}
            }
            self.advance();
        }

        let end = self.pos.min(tokens.len());
        items.push(&tokens[start.min(end)..end]);
        items.retain(|item| !item.is_empty());
        items
    }

    /// `(a, b DESC, c(10))` -> `[a, b, c]`. The first identifier of every
    /// item is the column name.
    fn column_list(&mut self) -> Option<Vec<String>> {
        if !self.at(&TokenKind::LParen) {
            return None;
        }
        self.advance();
        let items = self.split_top_level(true);
        self.eat(&TokenKind::RParen);

        let columns = items
            .into_iter()
            .filter_map(|item| Cursor::new(self.source, item).ident())
            .collect();
        Some(columns)
    }

    fn skip_referential_actions(&mut self) {
        while self.at_keyword("ON") {
            self.advance();
            if self.eat_keyword("DELETE") || self.eat_keyword("UPDATE") {
                let _ = self.eat_keyword("CASCADE")
                    || self.eat_keyword("RESTRICT")
                    || self.eat_keywords(&["SET", "NULL"])
                    || self.eat_keywords(&["SET", "DEFAULT"])
                    || self.eat_keywords(&["NO", "ACTION"]);
            }
        }
    }

    // ---- statements -------------------------------------------------------

    /// `CREATE [OR REPLACE] [GLOBAL|LOCAL] [TEMPORARY|TEMP|UNLOGGED] TABLE [IF NOT EXISTS] name (body) ...;`
    fn create_table(&mut self) -> Option<CreateTable> {
        self.advance(); // CREATE
        self.eat_keywords(&["OR", "REPLACE"]);
        let _ = self.eat_keyword("GLOBAL") || self.eat_keyword("LOCAL");
        let _ = self.eat_keyword("TEMPORARY") || self.eat_keyword("TEMP") || self.eat_keyword("UNLOGGED");

        if !self.eat_keyword("TABLE") {
            self.skip_statement();
            return None;
        }
        self.eat_keywords(&["IF", "NOT", "EXISTS"]);

        let Some(name) = self.qualified_name() else {
            self.skip_statement();
            return None;
        };

        if !self.eat(&TokenKind::LParen) {
            trace!(table = %name, "CREATE TABLE without column list skipped");
            self.skip_statement();
            return None;
        }

        let items = self.split_top_level(true);
        if !self.eat(&TokenKind::RParen) {
            trace!(table = %name, "unterminated CREATE TABLE body skipped");
            self.skip_statement();
            return None;
        }
        // Table options (ENGINE=..., WITH (...), ...)
        self.skip_statement();

        let elements = items
            .into_iter()
            .filter_map(|item| {
                let element = Cursor::new(self.source, item).table_element();
                if element.is_none() {
                    trace!(table = %name, element = %self.text_of(item), "element skipped");
                }
                element
            })
            .collect();

        Some(CreateTable { name, elements })
    }

    /// `ALTER TABLE [IF EXISTS] [ONLY] name action {, action} ;`
    fn alter_table(&mut self) -> Option<AlterTable> {
        self.advance(); // ALTER
        if !self.eat_keyword("TABLE") {
            self.skip_statement();
            return None;
        }
        self.eat_keywords(&["IF", "EXISTS"]);
        self.eat_keyword("ONLY");

        let Some(name) = self.qualified_name() else {
            self.skip_statement();
            return None;
        };

        let actions = self.split_top_level(false);
        self.skip_statement();

        let clauses = actions
            .into_iter()
            .filter_map(|action| Cursor::new(self.source, action).alter_add_clause())
            .collect();

        Some(AlterTable { name, clauses })
    }

    fn text_of(&self, tokens: &[Token]) -> &'a str {
        let source = self.source;
        match (tokens.first(), tokens.last()) {
            (Some(first), Some(last)) => &source[first.span.start..last.span.end],
            _ => "",
        }
    }

    // ---- table elements ---------------------------------------------------

    fn table_element(&mut self) -> Option<TableElement> {
        if self.at_keyword("CONSTRAINT") || self.opens_constraint() {
            self.table_constraint()
        } else {
            self.column_definition().map(TableElement::Column)
        }
    }

    /// An element keyword followed by a type name is a column (`key TEXT`,
    /// `period DATE`). Otherwise it is a constraint or index when the next
    /// word belongs to one, or when a name is followed by a column list
    /// (`KEY idx_name (a)`) or nothing at all (`LIKE other_table`).
    fn opens_constraint(&self) -> bool {
        if !ELEMENT_KEYWORDS.iter().any(|k| self.at_keyword(k)) {
            return false;
        }
        let TokenKind::Word(next) = self.peek_at(1) else {
            return true;
        };
        let is_one_of = |words: &[&str]| words.iter().any(|w| next.eq_ignore_ascii_case(w));
        if is_one_of(TYPE_NAMES) {
            return false;
        }
        if is_one_of(CONSTRAINT_FOLLOWERS) {
            return true;
        }
        match self.peek_at(2) {
            TokenKind::LParen | TokenKind::Eof => true,
            third => ["USING", "INCLUDING", "EXCLUDING"]
                .iter()
                .any(|k| Self::is_keyword(third, k)),
        }
    }

    /// Table-level PRIMARY KEY / FOREIGN KEY, optionally named. CHECK,
    /// UNIQUE, index definitions and the like yield `None`.
    fn table_constraint(&mut self) -> Option<TableElement> {
        if self.eat_keyword("CONSTRAINT") {
            self.ident()?;
        }

        if self.eat_keywords(&["PRIMARY", "KEY"]) {
            let _ = self.eat_keyword("CLUSTERED") || self.eat_keyword("NONCLUSTERED");
            return self.column_list().map(TableElement::PrimaryKey);
        }

        if self.eat_keywords(&["FOREIGN", "KEY"]) {
            return self.foreign_key_body().map(TableElement::ForeignKey);
        }

        None
    }

    /// After `FOREIGN KEY`: `[index_name] (cols) REFERENCES table [(cols)] [actions]`
    fn foreign_key_body(&mut self) -> Option<ForeignKeyClause> {
        if !self.at(&TokenKind::LParen) {
            // MySQL allows an index name here
            self.ident()?;
        }
        let columns = self.column_list()?;

        if !self.eat_keyword("REFERENCES") {
            return None;
        }
        let ref_table = self.qualified_name()?;
        let ref_columns = self.column_list().unwrap_or_default();
        self.eat_keywords(&["MATCH", "FULL"]);
        self.eat_keywords(&["MATCH", "SIMPLE"]);
        self.skip_referential_actions();

        Some(ForeignKeyClause {
            columns,
            ref_table,
            ref_columns,
        })
    }

    /// `name type [(args)] [WITH TIME ZONE] [[]] constraint*`
    fn column_definition(&mut self) -> Option<ColumnDef> {
        let name = self.ident()?;

        // A type name is always a bare word
        let TokenKind::Word(_) = self.current() else {
            return None;
        };
        let type_start = self.tokens[self.pos].span.start;
        let mut type_end = self.tokens[self.pos].span.end;
        self.advance();

        loop {
            if self.at(&TokenKind::LParen) {
                self.skip_group();
            } else if self.at(&TokenKind::LBracket) && self.peek_at(1) == &TokenKind::RBracket {
                self.pos += 2;
            } else if TYPE_CONTINUATIONS.iter().any(|k| self.at_keyword(k)) {
                self.advance();
            } else if !(self.eat_keywords(&["WITH", "TIME", "ZONE"])
                || self.eat_keywords(&["WITHOUT", "TIME", "ZONE"]))
            {
                break;
            }
            type_end = self.tokens[self.pos - 1].span.end;
        }

        let typ = collapse_whitespace(&self.source[type_start..type_end]);
        let mut column = ColumnDef {
            name,
            typ,
            primary_key: false,
            not_null: false,
            references: None,
        };

        // Column constraints. Parenthesised groups (CHECK, DEFAULT
        // expressions, GENERATED ... AS (...)) are skipped whole.
        while !self.at_end() {
            if self.eat_keywords(&["PRIMARY", "KEY"]) {
                column.primary_key = true;
            } else if self.eat_keywords(&["NOT", "NULL"]) {
                column.not_null = true;
            } else if self.eat_keyword("REFERENCES") {
                column.references = self.reference();
                self.skip_referential_actions();
            } else if self.at(&TokenKind::LParen) {
                self.skip_group();
            } else {
                self.advance();
            }
        }

        Some(column)
    }

    fn reference(&mut self) -> Option<Reference> {
        let table = self.qualified_name()?;
        let column = self
            .column_list()
            .and_then(|cols| cols.into_iter().next());
        Some(Reference { table, column })
    }

    // ---- ALTER TABLE ------------------------------------------------------

    /// `ADD [CONSTRAINT name] {PRIMARY KEY | FOREIGN KEY | UNIQUE} ...`
    fn alter_add_clause(&mut self) -> Option<AddClause> {
        if !self.eat_keyword("ADD") {
            return None;
        }
        if self.eat_keyword("CONSTRAINT") {
            self.ident()?;
        }

        let kind_len = if self.at_keywords(&["PRIMARY", "KEY"]) || self.at_keywords(&["FOREIGN", "KEY"]) {
            2
        } else if self.at_keyword("UNIQUE") {
            1
        } else {
            return None;
        };
        let words: Vec<&str> = self.tokens[self.pos..self.pos + kind_len]
            .iter()
            .filter_map(|t| match &t.kind {
                TokenKind::Word(w) => Some(w.as_str()),
                _ => None,
            })
            .collect();
        let kind = ConstraintKind::from_keywords(&words.join(" "))?;
        self.pos += kind_len;

        match kind {
            ConstraintKind::PrimaryKey => {
                let _ = self.eat_keyword("CLUSTERED") || self.eat_keyword("NONCLUSTERED");
                let columns = self.column_list()?;
                Some(AddClause {
                    kind,
                    columns,
                    reference: None,
                })
            }
            ConstraintKind::ForeignKey => {
                let fk = self.foreign_key_body()?;
                Some(AddClause {
                    kind,
                    columns: fk.columns,
                    reference: Some((fk.ref_table, fk.ref_columns)),
                })
            }
            ConstraintKind::Unique => {
                let _ = self.eat_keyword("KEY") || self.eat_keyword("INDEX");
                if !self.at(&TokenKind::LParen) {
                    self.ident()?;
                }
                let columns = self.column_list()?;
                Some(AddClause {
                    kind,
                    columns,
                    reference: None,
                })
            }
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::dialect::Dialect;
    use crate::sql::lexer::Lexer;

    fn parse(sql: &str) -> Vec<Statement> {
        let tokens = Lexer::new(sql, Dialect::Generic).tokenize().unwrap();
        parse_statements(sql, &tokens)
    }

    fn create(sql: &str) -> CreateTable {
        match parse(sql).into_iter().next() {
            Some(Statement::CreateTable(create)) => create,
            other => panic!("expected CREATE TABLE, got {other:?}"),
        }
    }

    fn column(element: &TableElement) -> &ColumnDef {
        match element {
            TableElement::Column(col) => col,
            other => panic!("expected column, got {other:?}"),
        }
    }

    #[test]
    fn test_column_definitions() {
        let table = create(
            "CREATE TABLE users (
                id INT PRIMARY KEY,
                email VARCHAR(255) NOT NULL UNIQUE,
                balance DECIMAL(10, 2) DEFAULT 0
            );",
        );
        assert_eq!(table.name, "users");
        assert_eq!(table.elements.len(), 3);

        let id = column(&table.elements[0]);
        assert_eq!(id.typ, "INT");
        assert!(id.primary_key);
        assert!(!id.not_null);

        let email = column(&table.elements[1]);
        assert_eq!(email.typ, "VARCHAR(255)");
        assert!(email.not_null);

        assert_eq!(column(&table.elements[2]).typ, "DECIMAL(10, 2)");
    }

    #[test]
    fn test_multi_word_types() {
        let table = create(
            "CREATE TABLE events (
                created_at TIMESTAMP WITH TIME ZONE NOT NULL,
                starts TIME   WITH TIME ZONE,
                ratio DOUBLE PRECISION,
                name CHARACTER VARYING(40),
                n INT UNSIGNED,
                tags TEXT[],
                seq INT IDENTITY(1,1)
            );",
        );
        let types: Vec<&str> = table.elements.iter().map(|e| column(e).typ.as_str()).collect();
        assert_eq!(
            types,
            [
                "TIMESTAMP WITH TIME ZONE",
                "TIME WITH TIME ZONE",
                "DOUBLE PRECISION",
                "CHARACTER VARYING(40)",
                "INT UNSIGNED",
                "TEXT[]",
                "INT IDENTITY(1,1)",
            ]
        );
    }

    #[test]
    fn test_not_null_inside_check_is_ignored() {
        let table = create("CREATE TABLE t (a INT CHECK (a IS NOT NULL), b TEXT DEFAULT 'NOT NULL');");
        assert!(!column(&table.elements[0]).not_null);
        assert!(!column(&table.elements[1]).not_null);
    }

    #[test]
    fn test_inline_reference() {
        let table = create(
            "CREATE TABLE posts (
                user_id INT REFERENCES public.users(id) ON DELETE CASCADE,
                org_id INT REFERENCES orgs
            );",
        );
        assert_eq!(
            column(&table.elements[0]).references,
            Some(Reference {
                table: "users".to_string(),
                column: Some("id".to_string()),
            })
        );
        assert_eq!(
            column(&table.elements[1]).references,
            Some(Reference {
                table: "orgs".to_string(),
                column: None,
            })
        );
    }

    #[test]
    fn test_table_constraints() {
        let table = create(
            "CREATE TABLE [dbo].[order_items] (
                [order_id] INT,
                [line] INT,
                CONSTRAINT pk_items PRIMARY KEY CLUSTERED ([order_id] ASC, [line] ASC),
                CONSTRAINT fk_order FOREIGN KEY (order_id) REFERENCES [dbo].[orders]([id]),
                CONSTRAINT ck_line CHECK (line > 0),
                UNIQUE (line),
                KEY idx_line (line)
            );",
        );
        assert_eq!(table.name, "order_items");
        assert_eq!(table.elements.len(), 4);
        assert_eq!(
            table.elements[2],
            TableElement::PrimaryKey(vec!["order_id".to_string(), "line".to_string()])
        );
        assert_eq!(
            table.elements[3],
            TableElement::ForeignKey(ForeignKeyClause {
                columns: vec!["order_id".to_string()],
                ref_table: "orders".to_string(),
                ref_columns: vec!["id".to_string()],
            })
        );
    }

    #[test]
    fn test_single_line_body() {
        let table = create(
            "CREATE TABLE posts (id INT PRIMARY KEY, user_id INT, FOREIGN KEY (user_id) REFERENCES users(id));",
        );
        assert_eq!(table.elements.len(), 3);
        assert!(matches!(table.elements[2], TableElement::ForeignKey(_)));
    }

    #[test]
    fn test_skips_other_statements() {
        let statements = parse(
            "CREATE INDEX idx ON users (email);
             INSERT INTO users VALUES (1, 'CREATE TABLE fake (x INT);');
             CREATE TABLE IF NOT EXISTS `app`.`users` (`id` INT);
             CREATE VIEW v AS SELECT 1;",
        );
        assert_eq!(statements.len(), 1);
        match &statements[0] {
            Statement::CreateTable(t) => assert_eq!(t.name, "users"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_keyword_named_columns() {
        let table = create(
            "CREATE TABLE settings (
                key TEXT PRIMARY KEY,
                index INT,
                period DATE,
                unique VARCHAR(10) NOT NULL,
                value TEXT
            );",
        );
        let names: Vec<&str> = table.elements.iter().map(|e| column(e).name.as_str()).collect();
        assert_eq!(names, ["key", "index", "period", "unique", "value"]);
        assert!(column(&table.elements[0]).primary_key);
        assert!(column(&table.elements[3]).not_null);
    }

    #[test]
    fn test_index_and_period_elements_are_skipped() {
        let table = create(
            "CREATE TABLE t (
                id INT,
                vf DATETIME2,
                vt DATETIME2,
                PERIOD FOR SYSTEM_TIME (vf, vt),
                KEY idx_vf (vf),
                INDEX idx_vt USING BTREE (vt),
                UNIQUE INDEX (id),
                FULLTEXT KEY ft (vf),
                CHECK (vf < vt),
                LIKE other_table
            );",
        );
        let names: Vec<&str> = table.elements.iter().map(|e| column(e).name.as_str()).collect();
        assert_eq!(names, ["id", "vf", "vt"]);
    }

    #[test]
    fn test_create_table_prefixes() {
        let statements = parse(
            "CREATE OR REPLACE TABLE a (id INT);
             CREATE GLOBAL TEMPORARY TABLE b (id INT);
             CREATE LOCAL TEMP TABLE c (id INT);
             CREATE UNLOGGED TABLE d (id INT);",
        );
        let names: Vec<&str> = statements
            .iter()
            .map(|s| match s {
                Statement::CreateTable(t) => t.name.as_str(),
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_unterminated_body_is_skipped() {
        assert!(parse("CREATE TABLE t (id INT").is_empty());
    }

    #[test]
    fn test_alter_table_clauses() {
        let statements = parse(
            "ALTER TABLE IF EXISTS ONLY public.orders
                ADD CONSTRAINT pk_orders PRIMARY KEY (id),
                ADD CONSTRAINT fk_customer FOREIGN KEY (customer_id) REFERENCES customers(id) ON DELETE SET NULL ON UPDATE NO ACTION,
                ADD UNIQUE KEY uq_code (code),
                ADD COLUMN note TEXT,
                DROP COLUMN legacy;",
        );
        let Statement::AlterTable(alter) = &statements[0] else {
            panic!("expected ALTER TABLE");
        };
        assert_eq!(alter.name, "orders");
        assert_eq!(alter.clauses.len(), 3);
        assert_eq!(alter.clauses[0].kind, ConstraintKind::PrimaryKey);
        assert_eq!(alter.clauses[1].kind, ConstraintKind::ForeignKey);
        assert_eq!(
            alter.clauses[1].reference,
            Some(("customers".to_string(), vec!["id".to_string()]))
        );
        assert_eq!(alter.clauses[2].kind, ConstraintKind::Unique);
        assert_eq!(alter.clauses[2].columns, vec!["code".to_string()]);
    }
}
