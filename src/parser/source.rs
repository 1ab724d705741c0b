//! Input sources and JSON text parsing

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Source of text to convert
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    String(String),
    File(PathBuf),
    Directory(PathBuf),
    Stdin,
}

impl InputSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            InputSource::String(_) => "string input".to_string(),
            InputSource::File(path) => format!("file: {}", path.display()),
            InputSource::Directory(path) => format!("directory: {}", path.display()),
            InputSource::Stdin => "standard input".to_string(),
        }
    }

    /// Size of the source in bytes, when it can be known without reading it
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            InputSource::String(s) => Some(s.len() as u64),
            InputSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            InputSource::Directory(_) | InputSource::Stdin => None,
        }
    }

    /// Path of a file source, used to infer the conversion direction
    pub fn path(&self) -> Option<&Path> {
        match self {
            InputSource::File(path) | InputSource::Directory(path) => Some(path),
            _ => None,
        }
    }

    /// Read content as string
    pub fn read_content(&self) -> ConversionResult<String> {
        match self {
            InputSource::String(content) => Ok(content.clone()),
            InputSource::File(path) => std::fs::read_to_string(path).map_err(|e| {
                ConversionError::conversion(ConversionErrorKind::io(
                    format!("Failed to read file: {}", e),
                    Some(path.clone()),
                ))
            }),
            InputSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer).map_err(|e| {
                    ConversionError::conversion(ConversionErrorKind::io(
                        format!("Failed to read stdin: {}", e),
                        None,
                    ))
                })?;
                Ok(buffer)
            }
            InputSource::Directory(path) => Err(ConversionError::conversion(
                ConversionErrorKind::io(
                    "Cannot read directory as content".to_string(),
                    Some(path.clone()),
                ),
            )),
        }
    }
}

/// Parse JSON text, reporting the failing line and column
pub fn parse_json_text(content: &str) -> ConversionResult<Value> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(ConversionError::conversion(ConversionErrorKind::json_parse(
            "Empty JSON input".to_string(),
            None,
        )));
    }

    serde_json::from_str(trimmed).map_err(|e| {
        ConversionError::conversion(ConversionErrorKind::json_parse(
            e.to_string(),
            error_location(&e),
        ))
    })
}

/// Line and column of a serde_json error; `None` when serde reports no position
fn error_location(error: &serde_json::Error) -> Option<(usize, usize)> {
    match (error.line(), error.column()) {
        (0, _) => None,
        (line, column) => Some((line, column)),
    }
}

/// Whether `text` looks like a JSON object or array rather than a path or ZW
pub fn looks_like_json(text: &str) -> bool {
    let trimmed = text.trim();
    (trimmed.starts_with('{') && trimmed.ends_with('}'))
        || (trimmed.starts_with('[') && trimmed.ends_with(']'))
}
