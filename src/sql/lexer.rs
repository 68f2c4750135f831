//! SQL lexer for tokenizing CREATE TABLE / ALTER TABLE statements.

use super::dialect::{Dialect, QuoteStyle};
use std::iter::Peekable;
use std::ops::Range;
use std::str::CharIndices;
use tracing::debug;

/// SQL token types.
///
/// Keywords are not tokens of their own: the parser matches bare words
/// case-insensitively, so a quoted `"key"` never reads as the keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Bare word: keyword or unquoted identifier
    Word(String),
    /// Identifier with its quoting removed
    Quoted(String),
    Str(String),
    Num(String),

    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Semicolon,
    Dot,

    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte range in the lexed text.
    pub span: Range<usize>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LexError {
    #[error("Unterminated quoted identifier starting at line {line}, column {column}")]
    UnterminatedIdentifier { line: usize, column: usize },
}

/// SQL lexer.
pub struct Lexer<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
    quotes: &'static [QuoteStyle],
    /// MySQL: `#` always opens a comment and `\` escapes inside strings.
    mysql: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, dialect: Dialect) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
            quotes: dialect.quote_styles(),
            mysql: dialect == Dialect::MySQL,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, c)| c)
    }

    /// Character after the one `peek` returns.
    fn peek_second(&self) -> Option<char> {
        let mut ahead = self.chars.clone();
        ahead.next();
        ahead.next().map(|(_, c)| c)
    }

    fn offset(&mut self) -> usize {
        self.chars.peek().map_or(self.input.len(), |&(i, _)| i)
    }

    fn quote_style(&self, c: char) -> Option<QuoteStyle> {
        self.quotes.iter().copied().find(|q| q.open() == c)
    }

    fn skip_line_comment(&mut self) {
        for (_, c) in self.chars.by_ref() {
            if c == '\n' {
                break;
            }
        }
    }

    fn skip_block_comment(&mut self) {
        // Positioned on '/', '*' follows
        self.chars.next();
        self.chars.next();
        while let Some((_, c)) = self.chars.next() {
            if c == '*' && self.peek() == Some('/') {
                self.chars.next();
                break;
            }
        }
    }

    fn read_while(&mut self, start: usize, keep: impl Fn(char) -> bool) -> &'a str {
        while let Some(c) = self.peek() {
            if !keep(c) {
                break;
            }
            self.chars.next();
        }
        let end = self.offset();
        let input = self.input;
        &input[start..end]
    }

    /// Scan to the closing delimiter, treating a doubled close as an escape.
    /// Returns the end offset just past the closing delimiter.
    fn scan_delimited(&mut self, close: char) -> Option<usize> {
        self.chars.next(); // opening delimiter
        while let Some((i, c)) = self.chars.next() {
            if c == close {
                if self.peek() == Some(close) {
                    self.chars.next();
                    continue;
                }
                return Some(i + c.len_utf8());
            }
        }
        None
    }

    fn read_quoted(&mut self, start: usize, style: QuoteStyle) -> Result<TokenKind, LexError> {
        let end = self.scan_delimited(style.close()).ok_or_else(|| {
            let (line, column) = position(self.input, start);
            LexError::UnterminatedIdentifier { line, column }
        })?;
        let raw = &self.input[start..end];
        Ok(TokenKind::Quoted(style.strip(raw).unwrap_or_else(|| raw.to_string())))
    }

    /// Read a `'...'` literal; `escapes` enables backslash escapes. A
    /// literal still open at end of input is cut before the next `;` or line
    /// break, so a stray apostrophe in a skipped statement cannot swallow
    /// the rest of the script.
    fn read_string(&mut self, start: usize, escapes: bool) -> TokenKind {
        let checkpoint = self.chars.clone();
        let mut value = String::new();
        self.chars.next(); // opening quote
        loop {
            match self.chars.next() {
                Some((_, '\'')) => {
                    if self.peek() == Some('\'') {
                        value.push('\'');
                        self.chars.next();
                    } else {
                        return TokenKind::Str(value);
                    }
                }
                Some((_, '\\')) if escapes => {
                    if let Some((_, escaped)) = self.chars.next() {
                        match escaped {
                            'n' => value.push('\n'),
                            't' => value.push('\t'),
                            'r' => value.push('\r'),
                            _ => value.push(escaped),
                        }
                    }
                }
                Some((_, c)) => value.push(c),
                None => break,
            }
        }

        let (line, column) = position(self.input, start);
        debug!(line, column, "unterminated string literal cut short");
        self.chars = checkpoint;
        self.chars.next();
        let text_start = self.offset();
        let text = self.read_while(text_start, |c| c != '\n' && c != ';');
        TokenKind::Str(text.to_string())
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.chars.next();
        kind
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let start = self.offset();
            let Some(c) = self.peek() else {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    span: start..start,
                });
            };

            // Array suffix `[]` even where brackets quote identifiers
            let is_array_suffix = c == '[' && self.peek_second() == Some(']');
            if let Some(style) = self.quote_style(c).filter(|_| !is_array_suffix) {
                let kind = self.read_quoted(start, style)?;
                let end = self.offset();
                return Ok(Token {
                    kind,
                    span: start..end,
                });
            }

            let kind = match c {
                c if c.is_whitespace() => {
                    self.chars.next();
                    continue;
                }
                '-' if self.peek_second() == Some('-') => {
                    self.skip_line_comment();
                    continue;
                }
                // T-SQL temp tables (`#temp`) outside MySQL
                '#' if self.mysql || self.peek_second().is_none_or(char::is_whitespace) => {
                    self.skip_line_comment();
                    continue;
                }
                '/' if self.peek_second() == Some('*') => {
                    self.skip_block_comment();
                    continue;
                }
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                ',' => self.single(TokenKind::Comma),
                ';' => self.single(TokenKind::Semicolon),
                '.' => self.single(TokenKind::Dot),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '\'' => self.read_string(start, self.mysql),
                c if c.is_ascii_digit() => {
                    let num = self.read_while(start, |c| c.is_ascii_digit() || c == '.');
                    TokenKind::Num(num.to_string())
                }
                c if c.is_alphabetic() || c == '_' || c == '#' => {
                    let hash = !self.mysql;
                    let word = self.read_while(start, |c| {
                        c.is_alphanumeric() || c == '_' || c == '$' || (hash && c == '#')
                    });
                    // PostgreSQL escape string `E'...'`
                    if word.eq_ignore_ascii_case("e") && self.peek() == Some('\'') {
                        self.read_string(start, true)
                    } else {
                        TokenKind::Word(word.to_string())
                    }
                }
                _ => {
                    // Operators and other punctuation carry no DDL structure
                    self.chars.next();
                    continue;
                }
            };

            let end = self.offset();
            return Ok(Token {
                kind,
                span: start..end,
            });
        }
    }

    /// Collect all tokens, ending with `Eof`.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// 1-based line and column of a byte offset.
fn position(input: &str, offset: usize) -> (usize, usize) {
    let before = &input[..offset];
    let line = before.matches('\n').count() + 1;
    let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
    (line, column)
}
