//! Error types and handling infrastructure for ZW parsing and conversion

use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

/// Longest slice of an offending line kept in a [`ParseError`]
const PREVIEW_CHARS: usize = 50;

/// Core error kinds for the conversion process
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("JSON parse error: {message}")]
    JsonParse {
        message: String,
        location: Option<(usize, usize)>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: usize, limit: usize },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Conversion failed: {message}")]
    ConversionFailed { message: String },
}

impl ConversionErrorKind {
    pub fn json_parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::JsonParse { message, location }
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }

    pub fn failed(message: String) -> Self {
        Self::ConversionFailed { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error(transparent)]
    FormattingError(#[from] FormattingError),

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    pub fn formatting(message: String) -> Self {
        Self::FormattingError(FormattingError::invalid_structure(message))
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => match err.line_number {
                Some(line) => format!("ZW parse error at line {}: {}", line, err.message),
                None => format!("ZW parse error: {}", err.message),
            },
            Self::FormattingError(err) => format!("ZW formatting error: {}", err),
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::JsonParse {
                    message,
                    location: Some((line, col)),
                } => format!(
                    "JSON parse error at line {}, column {}: {}",
                    line, col, message
                ),
                ConversionErrorKind::InputTooLarge { size, limit } => {
                    format!("Input too large: {} bytes (limit: {} bytes)", size, limit)
                }
                _ => self.to_string(),
            },
            Self::Other(err) => format!("Unexpected error: {}", err),
        }
    }
}

/// Structural ZW parse error: the root declaration is missing or malformed.
///
/// Carries the offending line (truncated for display) so callers can surface
/// the problem without inspecting the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line_number: Option<usize>,
    pub line: Option<String>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line_number: None,
            line: None,
        }
    }

    pub fn at_line(mut self, line_number: usize, line: &str) -> Self {
        self.line_number = Some(line_number);
        self.line = Some(truncate_preview(line));
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(line) = self.line_number {
            write!(f, " at line {}", line)?;
        }
        if let Some(preview) = &self.line {
            write!(f, ": `{}`", preview)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

fn truncate_preview(line: &str) -> String {
    let trimmed = line.trim();
    if trimmed.chars().count() <= PREVIEW_CHARS {
        return trimmed.to_string();
    }
    let head: String = trimmed.chars().take(PREVIEW_CHARS).collect();
    format!("{}...", head)
}

/// ZW formatting errors
#[derive(Debug, thiserror::Error)]
pub enum FormattingError {
    #[error("Invalid ZW structure: {message}")]
    InvalidStructure { message: String },

    #[error("Nesting exceeds maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },
}

impl FormattingError {
    pub fn invalid_structure(message: String) -> Self {
        Self::InvalidStructure { message }
    }
}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

/// Convenience result type for formatting operations
pub type FormattingResult<T> = Result<T, FormattingError>;
