//! ZW format converter
//!
//! Parses the indentation-based ZW text format into a node tree, converts
//! trees to JSON values and serializes JSON values back to ZW text.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod validation;

// Re-export commonly used types
pub use conversion::{
    convert_json_to_zw_string, convert_zw_to_json_object, node_to_json, parse_zw, prettify_zw,
    ConversionEngine, ConversionResult, Direction, ZwConfig,
};
pub use error::{ConversionError, ConversionErrorKind, ParseError};
pub use formatter::{TreeWriter, ZwFormatter};
pub use parser::{InputSource, ZwNode, ZwParser};
pub use validation::{validate_zw, ValidationReport, ZwValidator};

/// Convert a JSON value to ZW text with default configuration
pub fn to_zw(json: &serde_json::Value, root_type: Option<&str>) -> Result<String, ConversionError> {
    let config = ZwConfig::default().with_root_type(root_type.map(str::to_string));
    to_zw_with_config(json, &config)
}

/// Convert a JSON value to ZW text with custom configuration
pub fn to_zw_with_config(
    json: &serde_json::Value,
    config: &ZwConfig,
) -> Result<String, ConversionError> {
    config
        .validate()
        .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;
    formatter::format_to_zw(json, config)
}
