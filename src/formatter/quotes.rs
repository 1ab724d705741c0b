//! String quoting for serialized scalars
//!
//! A string is quoted only when it would otherwise read back as a different
//! type: keywords, canonical numbers, the empty string, the empty-list
//! sentinel, or text already wrapped in quotes.

use crate::conversion::scalar::{canonical_number, is_quoted, EMPTY_LIST_SENTINEL};

/// Check if a string needs quoting to survive a re-parse
pub fn needs_quoting(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }

    let lower = value.to_ascii_lowercase();
    if lower == "true" || lower == "false" || lower == "null" {
        return true;
    }

    if canonical_number(value).is_some() {
        return true;
    }

    value == EMPTY_LIST_SENTINEL || is_quoted(value)
}

/// Wrap a string in double quotes, escaping quotes and backslashes
pub fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            _ => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}

/// Render a string scalar, quoting only when needed
pub fn format_string(value: &str) -> String {
    if needs_quoting(value) {
        quote_string(value)
    } else {
        value.to_string()
    }
}
