//! Scalar typing shared by the ZW -> JSON and JSON -> ZW directions
//!
//! Numbers use the canonical rendering of an ECMAScript `Number`: a string
//! is numeric only when parsing and re-rendering it gives the same text, so
//! `"007"`, `"1.50"` and `"1e5"` stay strings.

use serde_json::{Number, Value};

/// Scalar emitted for an empty array
pub const EMPTY_LIST_SENTINEL: &str = "[] # Empty list";

/// Largest integer an f64 holds exactly (2^53)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Render a finite number the way `Number.prototype.toString` does
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", value);
    }

    let formatted = format!("{:e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

/// The number `text` denotes, if `text` is its canonical rendering
pub fn canonical_number(text: &str) -> Option<f64> {
    let value = text.parse::<f64>().ok().filter(|v| v.is_finite())?;
    (format_number(value) == text).then_some(value)
}

/// JSON number for a parsed scalar, integral values as integers
pub fn number_value(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        return Value::from(value as i64);
    }
    Number::from_f64(value)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// Whether `text` is one quoted string: wrapped in `"` with every inner
/// quote escaped
pub fn is_quoted(text: &str) -> bool {
    if text.len() < 2 || !text.starts_with('"') || !text.ends_with('"') {
        return false;
    }
    let mut chars = text[1..text.len() - 1].chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => {
                // An escape with nothing after it escapes the closing quote
                if chars.next().is_none() {
                    return false;
                }
            }
            '"' => return false,
            _ => {}
        }
    }
    true
}

/// Strip surrounding quotes, undoing `\"` and `\\` escapes
pub fn unquote(text: &str) -> String {
    let inner = &text[1..text.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some(next @ ('"' | '\\')) => out.push(next),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

/// Infer the JSON value of a leaf scalar
pub fn typed_scalar(text: &str) -> Value {
    if text == EMPTY_LIST_SENTINEL {
        return Value::Array(Vec::new());
    }
    if is_quoted(text) {
        return Value::String(unquote(text));
    }

    let lower = text.to_ascii_lowercase();
    if lower == "true" {
        return Value::Bool(true);
    }
    if lower == "false" {
        return Value::Bool(false);
    }
    if let Some(number) = canonical_number(text) {
        return number_value(number);
    }
    if text == "null" {
        return Value::Null;
    }
    Value::String(text.to_string())
}
