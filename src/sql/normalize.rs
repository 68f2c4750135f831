//! Input normalization ahead of tokenizing.

/// Convert line endings to `\n`, collapse runs of blank lines into a single
/// newline and trim the outer whitespace.
pub fn normalize(input: &str) -> String {
    let unified = input.replace("\r\n", "\n").replace('\r', "\n");

    let mut out = String::with_capacity(unified.len());
    for line in unified.split('\n').filter(|l| !l.trim().is_empty()) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(line);
    }

    out.trim().to_string()
}
