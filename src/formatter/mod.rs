//! ZW formatting module: JSON values and parsed trees to ZW text

pub mod quotes;
pub mod tree;

use crate::conversion::scalar::{format_number, EMPTY_LIST_SENTINEL};
use crate::conversion::{ConversionResult, ZwConfig};
use crate::error::{FormattingError, FormattingResult};
use crate::parser::lines::INDENT_UNIT;
use crate::parser::node::is_valid_key;
use crate::parser::ZwParser;
use log::warn;
use serde_json::{Map, Value};

pub use tree::TreeWriter;

/// Root label for documents serialized from a JSON object
pub const OBJECT_ROOT: &str = "ZW-OBJECT";
/// Root label for documents serialized from a JSON array
pub const ARRAY_ROOT: &str = "ZW-ARRAY";
/// Root label for documents serialized from a JSON primitive
pub const VALUE_ROOT: &str = "ZW-VALUE";
/// Key holding a primitive or empty-array root value
pub const ROOT_VALUE_KEY: &str = "value";

pub(crate) fn indent(depth: usize) -> String {
    " ".repeat(depth * INDENT_UNIT)
}

/// Main ZW formatter
pub struct ZwFormatter {
    config: ZwConfig,
    lines: Vec<String>,
}

impl ZwFormatter {
    /// Create a new formatter with configuration
    pub fn new(config: ZwConfig) -> Self {
        Self {
            config,
            lines: Vec::new(),
        }
    }

    /// Format a JSON value as a ZW document
    pub fn format(&mut self, value: &Value) -> ConversionResult<String> {
        self.lines.clear();
        let root = self.root_label(value).to_string();
        self.lines.push(format!("{}{}", root, self.config.delimiter));

        match value {
            Value::Object(map) => self.write_object(map, 1)?,
            Value::Array(items) if !items.is_empty() => self.write_items(items, 1)?,
            other => self.write_entry(ROOT_VALUE_KEY, other, 1)?,
        }

        let output = self.lines.join("\n");
        if self.config.validate_output {
            self.validate_output(&output)?;
        }
        Ok(output)
    }

    fn root_label<'a>(&'a self, value: &Value) -> &'a str {
        match (&self.config.root_type, value) {
            (Some(label), _) => label.as_str(),
            (None, Value::Object(_)) => OBJECT_ROOT,
            (None, Value::Array(_)) => ARRAY_ROOT,
            (None, _) => VALUE_ROOT,
        }
    }

    /// The output must read back as a document
    fn validate_output(&self, output: &str) -> FormattingResult<()> {
        match ZwParser::new(&self.config.delimiter).parse(output) {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(FormattingError::invalid_structure(
                "serialized document is empty".to_string(),
            )),
            Err(e) => Err(FormattingError::invalid_structure(format!(
                "serialized document does not parse: {}",
                e
            ))),
        }
    }

    fn check_depth(&self, depth: usize) -> FormattingResult<()> {
        match self.config.max_depth {
            Some(max_depth) if depth > max_depth => {
                Err(FormattingError::DepthExceeded { max_depth })
            }
            _ => Ok(()),
        }
    }

    fn write_object(&mut self, map: &Map<String, Value>, depth: usize) -> FormattingResult<()> {
        for (key, value) in map {
            self.write_entry(key, value, depth)?;
        }
        Ok(())
    }

    /// Write `key: value`, or a `key:` header followed by nested content
    fn write_entry(&mut self, key: &str, value: &Value, depth: usize) -> FormattingResult<()> {
        self.check_depth(depth)?;
        if !is_valid_key(key) {
            warn!("key `{}` cannot be read back as a ZW key", key);
        }

        let pad = indent(depth);
        let delimiter = self.config.delimiter.clone();
        match value {
            Value::Object(map) => {
                self.lines.push(format!("{}{}{}", pad, key, delimiter));
                self.write_object(map, depth + 1)
            }
            Value::Array(items) if items.is_empty() => {
                self.lines
                    .push(format!("{}{}{} {}", pad, key, delimiter, EMPTY_LIST_SENTINEL));
                Ok(())
            }
            Value::Array(items) => {
                self.lines.push(format!("{}{}{}", pad, key, delimiter));
                self.write_items(items, depth + 1)
            }
            scalar => {
                let prefix = format!("{}{}{} ", pad, key, delimiter);
                self.push_scalar(prefix, &pad, scalar);
                Ok(())
            }
        }
    }

    /// Write array elements as `- ` lines
    fn write_items(&mut self, items: &[Value], depth: usize) -> FormattingResult<()> {
        self.check_depth(depth)?;
        let pad = indent(depth);
        let marker = format!("{}- ", pad);

        for item in items {
            match item {
                Value::Object(map) if map.is_empty() => {
                    warn!("empty object in a list is written as the text `{{}}`");
                    self.lines.push(format!("{}{{}}", marker));
                }
                Value::Object(map) => self.write_object_item(map, &marker, depth)?,
                Value::Array(inner) if inner.is_empty() => {
                    self.lines.push(format!("{}{}", marker, EMPTY_LIST_SENTINEL));
                }
                Value::Array(inner) => {
                    warn!("nested list is written as inline JSON text");
                    let inline = serde_json::to_string(inner)
                        .map_err(|e| FormattingError::invalid_structure(e.to_string()))?;
                    self.lines.push(format!("{}{}", marker, inline));
                }
                scalar => self.push_scalar(marker.clone(), &indent(depth + 1), scalar),
            }
        }
        Ok(())
    }

    /// First property after the dash, the rest aligned beneath it
    fn write_object_item(
        &mut self,
        map: &Map<String, Value>,
        marker: &str,
        depth: usize,
    ) -> FormattingResult<()> {
        let mut entries = map.iter();
        if let Some((key, value)) = entries.next() {
            let first_line = self.lines.len();
            self.write_entry(key, value, depth + 1)?;
            if let Some(line) = self.lines.get_mut(first_line) {
                line.replace_range(..marker.len(), marker);
            }
        }
        for (key, value) in entries {
            self.write_entry(key, value, depth + 1)?;
        }
        Ok(())
    }

    /// Push a scalar after `prefix`; extra lines of a multi-line string
    /// continue at `continuation`
    fn push_scalar(&mut self, prefix: String, continuation: &str, value: &Value) {
        let text = scalar_text(value);
        let mut parts = text.split('\n');
        let first = parts.next().unwrap_or_default();
        self.lines.push(format!("{}{}", prefix, first).trim_end().to_string());
        for part in parts {
            let trimmed = part.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                warn!("multi-line string has a blank or `#` line that will not read back");
            }
            self.lines.push(format!("{}{}", continuation, part));
        }
    }
}

/// Textual form of a JSON primitive
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.is_finite() => format_number(f),
            _ => n.to_string(),
        },
        Value::String(s) => quotes::format_string(s),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Convert a JSON value to ZW text with the given configuration
pub fn format_to_zw(value: &Value, config: &ZwConfig) -> ConversionResult<String> {
    let mut formatter = ZwFormatter::new(config.clone());
    formatter.format(value)
}
