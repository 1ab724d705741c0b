//! Configuration options for ZW parsing and conversion

use crate::parser::node::{is_key_char, is_valid_key, DEFAULT_DELIMITER};

/// Conversion configuration options
#[derive(Debug, Clone, PartialEq)]
pub struct ZwConfig {
    /// Key/value separator used for parsing and serializing
    pub delimiter: String,
    /// Root type label for serialized documents; synthesized when absent
    pub root_type: Option<String>,
    /// Maximum nesting depth
    pub max_depth: Option<usize>,
    /// Re-parse serializer output and reject documents that do not parse
    pub validate_output: bool,
    /// Maximum input size in bytes
    pub size_limit: usize,
}

impl Default for ZwConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            root_type: None,
            max_depth: Some(1000),
            validate_output: true,
            size_limit: 100 * 1024 * 1024, // 100MB
        }
    }
}

impl ZwConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key/value delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the root type label
    pub fn with_root_type(mut self, root_type: Option<String>) -> Self {
        self.root_type = root_type;
        self
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable/disable output validation
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_output = validate;
        self
    }

    /// Set the input size limit
    pub fn with_size_limit(mut self, limit_bytes: usize) -> Self {
        self.size_limit = limit_bytes;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        let delimiter = self.delimiter.as_str();
        if delimiter.is_empty() {
            return Err("Delimiter must not be empty".to_string());
        }
        if delimiter.chars().any(char::is_whitespace) {
            return Err("Delimiter must not contain whitespace".to_string());
        }
        if delimiter.starts_with('-') || delimiter.starts_with('#') {
            return Err(format!(
                "Delimiter '{}' clashes with list markers or comments",
                delimiter
            ));
        }
        if delimiter.chars().any(is_key_char) {
            return Err(format!(
                "Delimiter '{}' must not contain key characters",
                delimiter
            ));
        }

        if let Some(root_type) = &self.root_type {
            if !is_valid_key(root_type) {
                return Err(format!(
                    "Root type '{}' must match [A-Za-z0-9_-]+",
                    root_type
                ));
            }
        }

        if self.max_depth == Some(0) {
            return Err("Max depth must be at least 1".to_string());
        }

        if self.size_limit < 1024 {
            return Err("Size limit must be at least 1KB".to_string());
        }

        Ok(())
    }
}
