//! Parse and export settings.

use crate::sql::Dialect;

/// Upper bound on input size; keeps a runaway upload from tying up the parser.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub dialect: Dialect,
    /// Collapse relationships that share an id (same FK declared twice).
    pub dedup_relationships: bool,
    pub max_input_bytes: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            dedup_relationships: false,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

/// Which columns diagram exports show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailLevel {
    Tables,
    Pk,
    PkFk,
    #[default]
    All,
}

impl DetailLevel {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "tables" => Some(Self::Tables),
            "pk" => Some(Self::Pk),
            "pk_fk" => Some(Self::PkFk),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn includes(self, is_pk: bool, is_fk: bool) -> bool {
        match self {
            Self::Tables => false,
            Self::Pk => is_pk,
            Self::PkFk => is_pk || is_fk,
            Self::All => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub detail: DetailLevel,
    /// Document title for Markdown and PlantUML output.
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_from_str() {
        assert_eq!(DetailLevel::from_str("pk_fk"), Some(DetailLevel::PkFk));
        assert_eq!(DetailLevel::from_str("everything"), None);
    }

    #[test]
    fn test_detail_includes() {
        assert!(!DetailLevel::Tables.includes(true, true));
        assert!(DetailLevel::Pk.includes(true, false));
        assert!(!DetailLevel::Pk.includes(false, true));
        assert!(DetailLevel::PkFk.includes(false, true));
        assert!(DetailLevel::All.includes(false, false));
    }

    #[test]
    fn test_parse_defaults() {
        let options = ParseOptions::default();
        assert_eq!(options.dialect, Dialect::Generic);
        assert!(!options.dedup_relationships);
    }
}
