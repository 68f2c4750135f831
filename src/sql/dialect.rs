//! SQL dialect detection and identifier quoting.

/// SQL dialect variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Auto-detect from dump content
    Auto,
    /// Accept every quoting style
    #[default]
    Generic,
    /// PostgreSQL
    PostgreSQL,
    /// MySQL / MariaDB
    MySQL,
    /// SQL Server
    SqlServer,
}

/// Delimiters that turn arbitrary text into a single identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `name`
    Backtick,
    /// [name]
    Bracket,
    /// "name"
    Double,
}

impl QuoteStyle {
    pub fn open(self) -> char {
        match self {
            Self::Backtick => '`',
            Self::Bracket => '[',
            Self::Double => '"',
        }
    }

    pub fn close(self) -> char {
        match self {
            Self::Backtick => '`',
            Self::Bracket => ']',
            Self::Double => '"',
        }
    }

    /// Strip this style's delimiters from `text` if they enclose it.
    pub fn strip(self, text: &str) -> Option<String> {
        let inner = text.strip_prefix(self.open())?.strip_suffix(self.close())?;
        let doubled = format!("{0}{0}", self.close());
        Some(inner.replace(&doubled, &self.close().to_string()))
    }
}

impl Dialect {
    /// Parse dialect from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "generic" => Some(Self::Generic),
            "postgres" | "postgresql" => Some(Self::PostgreSQL),
            "mysql" | "mariadb" => Some(Self::MySQL),
            "sqlserver" | "mssql" | "tsql" => Some(Self::SqlServer),
            _ => None,
        }
    }

    /// Quote styles the lexer treats as identifier delimiters.
    pub fn quote_styles(self) -> &'static [QuoteStyle] {
        match self {
            Self::PostgreSQL => &[QuoteStyle::Double],
            Self::MySQL => &[QuoteStyle::Backtick, QuoteStyle::Double],
            Self::SqlServer => &[QuoteStyle::Bracket, QuoteStyle::Double],
            Self::Auto | Self::Generic => {
                &[QuoteStyle::Backtick, QuoteStyle::Bracket, QuoteStyle::Double]
            }
        }
    }

    /// Detect dialect from SQL content.
    pub fn detect(content: &str) -> Self {
        let lower = content.to_lowercase();

        // Check header comments
        if lower.contains("postgresql database dump")
            || lower.contains("pg_dump")
            || lower.contains("-- postgres")
        {
            return Self::PostgreSQL;
        }
        if lower.contains("mysql dump")
            || lower.contains("mysqldump")
            || lower.contains("-- mysql")
        {
            return Self::MySQL;
        }

        if lower.contains("serial")
            || lower.contains("timestamptz")
            || lower.contains("with time zone")
        {
            return Self::PostgreSQL;
        }
        if lower.contains("auto_increment")
            || lower.contains("engine=")
            || lower.contains("unsigned")
            || content.contains('`')
        {
            return Self::MySQL;
        }
        if lower.contains("[dbo]")
            || lower.contains("identity(")
            || lower.contains("nvarchar")
            || lower.contains("clustered")
        {
            return Self::SqlServer;
        }

        Self::Generic
    }

    /// Resolve Auto to a concrete dialect.
    pub fn resolve(self, content: &str) -> Self {
        match self {
            Self::Auto => Self::detect(content),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_postgres() {
        let sql = "-- PostgreSQL database dump\nCREATE TABLE users (id SERIAL);";
        assert_eq!(Dialect::detect(sql), Dialect::PostgreSQL);
    }

    #[test]
    fn test_detect_mysql() {
        let sql = "CREATE TABLE `users` (`id` INT AUTO_INCREMENT);";
        assert_eq!(Dialect::detect(sql), Dialect::MySQL);
    }

    #[test]
    fn test_detect_sqlserver() {
        let sql = "CREATE TABLE [dbo].[users] ([id] INT IDENTITY(1,1));";
        assert_eq!(Dialect::detect(sql), Dialect::SqlServer);
    }

    #[test]
    fn test_detect_generic() {
        let sql = "CREATE TABLE users (id INTEGER PRIMARY KEY);";
        assert_eq!(Dialect::detect(sql), Dialect::Generic);
    }

    #[test]
    fn test_strip_quotes() {
        assert_eq!(QuoteStyle::Backtick.strip("`user id`").as_deref(), Some("user id"));
        assert_eq!(QuoteStyle::Bracket.strip("[a]]b]").as_deref(), Some("a]b"));
        assert_eq!(QuoteStyle::Double.strip("\"a\"\"b\"").as_deref(), Some("a\"b"));
        assert_eq!(QuoteStyle::Double.strip("plain"), None);
    }

    #[test]
    fn test_quote_styles() {
        assert_eq!(Dialect::PostgreSQL.quote_styles(), &[QuoteStyle::Double]);
        assert!(Dialect::Generic.quote_styles().contains(&QuoteStyle::Bracket));
    }
}
