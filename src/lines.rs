//! Line classification shared by the mapper, the restorer, and the engine.
//!
//! Key identity is decided in exactly one place: [`key_token`] splits on the
//! first `=` or `:` and trims the left-hand side. The engine parses
//! assignments with the same function, so a token captured from raw text
//! always lines up with the key the engine stores.

use once_cell::sync::Lazy;
use regex::Regex;

/// Reserved location token for comments that arrive before the first
/// section, or between a section header and its first key.
pub const HEADER: &str = "@@header";

static COMMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[#;]").expect("valid comment pattern"));
static SECTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\[(.+)\]\s*$").expect("valid section pattern"));

pub(crate) fn is_comment(line: &str) -> bool {
    COMMENT_PATTERN.is_match(line)
}

/// Blank lines count as comment-adjacent filler and travel with the block
/// that follows them.
pub(crate) fn is_comment_or_blank(line: &str) -> bool {
    line.trim().is_empty() || is_comment(line)
}

/// The name inside a `[section]` header line, if the line is one. Trimmed,
/// so `[ name ]` and the rendered `[name]` yield the same token everywhere.
pub(crate) fn section_name(line: &str) -> Option<&str> {
    SECTION_PATTERN
        .captures(line)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().trim())
}

/// The location token of a key/value line: left of the first `=` or `:`,
/// trimmed. A line with no delimiter falls back to the whole trimmed line;
/// the engine rejects such lines separately.
pub(crate) fn key_token(line: &str) -> &str {
    match line.find(['=', ':']) {
        Some(pos) => line[..pos].trim(),
        None => line.trim(),
    }
}

/// Splits an assignment line into trimmed key and value.
pub(crate) fn split_assignment(line: &str) -> Option<(&str, &str)> {
    line.find(['=', ':'])
        .map(|pos| (line[..pos].trim(), line[pos + 1..].trim()))
}
