//! Line classification for multi-effect source files.

use crate::config::PreprocessorConfig;

/// Role of one source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// Opens a new effect; carries the trimmed effect name.
    Marker(&'a str),
    /// Include directive; carries the referenced key (possibly empty).
    Include(&'a str),
    /// Any other line, passed through verbatim.
    Source(&'a str),
}

/// Classify a line.
///
/// The marker must start at column 0 so that indented code such as `--i;`
/// is never mistaken for an effect boundary. A marker with nothing after it
/// is an ordinary line. Include directives may be indented.
pub(crate) fn classify<'a>(line: &'a str, config: &PreprocessorConfig) -> Line<'a> {
    if let Some(rest) = line.strip_prefix(config.marker()) {
        let name = rest.trim();
        if !name.is_empty() {
            return Line::Marker(name);
        }
    }

    if let Some(target) = parse_include_directive(line.trim_start(), config.include()) {
        return Line::Include(target);
    }

    Line::Source(line)
}

/// Parse an include directive, returning the referenced key.
///
/// Accepts a bare key as well as `"key"` and `<key>`.
fn parse_include_directive<'a>(line: &'a str, token: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(token)?;
    // `#includes` is not `#include`
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim();
    let target = if let Some(inner) = rest.strip_prefix('"') {
        inner.strip_suffix('"').unwrap_or(inner)
    } else if let Some(inner) = rest.strip_prefix('<') {
        inner.strip_suffix('>').unwrap_or(inner)
    } else {
        rest
    };
    Some(target.trim())
}
