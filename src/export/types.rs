//! SQL type and name mapping for diagram syntaxes.
//!
//! Mermaid and PlantUML attribute types must be a single word, so raw SQL
//! type text is reduced to its base name.

/// Reduce raw SQL type text to one diagram-safe token.
///
/// `VARCHAR(255)` -> `VARCHAR`, `TIMESTAMP WITH TIME ZONE` ->
/// `TIMESTAMP_WITH_TIME_ZONE`, `TEXT[]` -> `TEXT[]`.
pub fn diagram_type(sql_type: &str) -> String {
    let mut base = String::with_capacity(sql_type.len());
    let mut depth = 0usize;
    for c in sql_type.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            c => base.push(c),
        }
    }

    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let token = diagram_ident(&joined);
    if token.is_empty() {
        "unknown".to_string()
    } else {
        token
    }
}

/// Replace characters diagram identifiers cannot carry with `_`.
pub fn diagram_ident(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '[' | ']') {
                c
            } else {
                '_'
            }
        })
        .collect()
}
