//! Dependency list parsing.
//!
//! Turns a free-text dependency field (`"A, B"`) into an ordered list of
//! task ids. Parsing never fails: malformed text still yields a
//! best-effort list, and the defect itself is reported by validation via
//! [`syntax_defects`] so the message can name the task and its raw text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between dependency ids.
pub const SEPARATOR: char = ',';

/// Characters that are never valid in a dependency list.
const BRACKETS: [char; 6] = ['{', '}', '[', ']', '(', ')'];

/// Textual spellings of "no value" produced by tabular readers.
const NO_VALUE: [&str; 3] = ["nan", "none", "null"];

/// A syntax problem in raw dependency text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyntaxDefect {
    /// Contains `{}`, `[]` or `()`.
    BracketCharacters,
    /// Contains an empty element: `A,,B`, `,A` or `A,`.
    EmptyElement,
}

impl fmt::Display for SyntaxDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BracketCharacters => f.write_str("invalid characters"),
            Self::EmptyElement => f.write_str("empty elements"),
        }
    }
}

/// Whether the raw value means "no dependencies".
pub fn is_no_value(raw: Option<&str>) -> bool {
    match raw.map(str::trim) {
        None => true,
        Some(text) => {
            text.is_empty() || NO_VALUE.iter().any(|nv| text.eq_ignore_ascii_case(nv))
        }
    }
}

/// Parses a raw dependency field into trimmed, non-empty ids.
///
/// Order and duplicates are preserved as given.
///
/// # Examples
///
/// ```
/// use u_cpm::parser::parse_dependencies;
///
/// assert_eq!(parse_dependencies(Some(" 'A', B ,,")), vec!["A", "B"]);
/// assert!(parse_dependencies(Some("nan")).is_empty());
/// assert!(parse_dependencies(None).is_empty());
/// ```
pub fn parse_dependencies(raw: Option<&str>) -> Vec<String> {
    let Some(text) = raw.filter(|_| !is_no_value(raw)) else {
        return Vec::new();
    };

    text.split(SEPARATOR)
        .map(|token| token.trim_matches(|c: char| c.is_whitespace() || c == '"' || c == '\''))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Detects syntax defects in raw dependency text.
///
/// Returns an empty list for well-formed or absent values.
pub fn syntax_defects(raw: Option<&str>) -> Vec<SyntaxDefect> {
    let Some(text) = raw.filter(|_| !is_no_value(raw)) else {
        return Vec::new();
    };

    let mut defects = Vec::new();
    if text.contains(BRACKETS) {
        defects.push(SyntaxDefect::BracketCharacters);
    }
    if text.contains(SEPARATOR) && text.split(SEPARATOR).any(|token| token.trim().is_empty()) {
        defects.push(SyntaxDefect::EmptyElement);
    }
    defects
}
