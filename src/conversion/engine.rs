//! Core conversion engine for ZW <-> JSON transformation

use crate::conversion::config::ZwConfig;
use crate::conversion::limits;
use crate::conversion::to_json::ZwJsonConverter;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind, ParseError, ParseResult};
use crate::formatter::{format_to_zw, TreeWriter};
use crate::parser::{parse_json_text, InputSource, ZwNode, ZwParser};
use log::{debug, warn};
use serde_json::Value;
use std::time::Instant;

/// Which way a document is converted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// JSON text to ZW text
    ToZw,
    /// ZW text to JSON text
    ToJson,
}

impl Direction {
    /// File extension of the output format
    pub fn output_extension(self) -> &'static str {
        match self {
            Direction::ToZw => "zw",
            Direction::ToJson => "json",
        }
    }

    /// File extension of the input format
    pub fn input_extension(self) -> &'static str {
        match self {
            Direction::ToZw => "json",
            Direction::ToJson => "zw",
        }
    }
}

/// Core conversion result
#[derive(Debug, Clone)]
pub struct ConvertedData {
    pub content: String,
    pub metadata: ConversionMetadata,
}

/// Metadata about the conversion process
#[derive(Debug, Clone)]
pub struct ConversionMetadata {
    pub direction: Direction,
    pub input_size: u64,
    pub output_size: u64,
    pub input_lines: usize,
    pub output_lines: usize,
    pub processing_time_ms: u64,
}

impl ConversionMetadata {
    fn measure(direction: Direction, input: &str, output: &str, started: Instant) -> Self {
        Self {
            direction,
            input_size: input.len() as u64,
            output_size: output.len() as u64,
            input_lines: input.lines().count(),
            output_lines: output.lines().count(),
            processing_time_ms: started.elapsed().as_millis() as u64,
        }
    }

    /// Output size relative to input size, in percent
    pub fn size_ratio(&self) -> f32 {
        if self.input_size == 0 {
            return 0.0;
        }
        (self.output_size as f32 / self.input_size as f32) * 100.0
    }
}

/// Main conversion engine
pub struct ConversionEngine {
    config: ZwConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ZwConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ZwConfig {
        &self.config
    }

    /// Convert text in the given direction
    pub fn convert(&self, text: &str, direction: Direction) -> ConversionResult<ConvertedData> {
        limits::check_text_size(text, &self.config)?;
        let started = Instant::now();

        let content = match direction {
            Direction::ToZw => self.json_to_zw(text)?,
            Direction::ToJson => self.zw_to_json(text)?,
        };

        let metadata = ConversionMetadata::measure(direction, text, &content, started);
        debug!(
            "converted {} bytes to {} bytes in {}ms",
            metadata.input_size, metadata.output_size, metadata.processing_time_ms
        );
        Ok(ConvertedData { content, metadata })
    }

    /// Convert the content of a source
    pub fn convert_from_source(
        &self,
        source: &InputSource,
        direction: Direction,
    ) -> ConversionResult<ConvertedData> {
        // Check source size before reading to avoid loading very large files
        limits::check_source_size_before_read(source, &self.config)?;
        let text = source.read_content()?;
        self.convert(&text, direction)
    }

    /// JSON text to ZW text
    pub fn json_to_zw(&self, json_text: &str) -> ConversionResult<String> {
        let value = parse_json_text(json_text)?;
        format_to_zw(&value, &self.config)
    }

    /// ZW text to pretty-printed JSON text
    pub fn zw_to_json(&self, zw_text: &str) -> ConversionResult<String> {
        let root = self.parse_document(zw_text)?;
        let value = ZwJsonConverter::new(self.config.max_depth)
            .convert(&root)
            .ok_or_else(|| {
                ConversionError::conversion(ConversionErrorKind::failed(format!(
                    "document `{}` cannot be represented as JSON",
                    root.key
                )))
            })?;

        serde_json::to_string_pretty(&value).map_err(|e| {
            ConversionError::conversion_with_source(
                ConversionErrorKind::failed("failed to serialize JSON output".to_string()),
                e.into(),
            )
        })
    }

    /// Re-indent a ZW document
    pub fn prettify(&self, zw_text: &str) -> ConversionResult<String> {
        limits::check_text_size(zw_text, &self.config)?;
        let root = self.parse_document(zw_text)?;
        Ok(TreeWriter::new().write(&root))
    }

    /// Parse a ZW document, treating an empty one as an error
    pub fn parse_document(&self, zw_text: &str) -> ConversionResult<ZwNode> {
        ZwParser::new(&self.config.delimiter)
            .parse(zw_text)?
            .ok_or_else(|| {
                ConversionError::conversion(ConversionErrorKind::failed(
                    "document is empty".to_string(),
                ))
            })
    }
}

/// Parse ZW text with the given delimiter.
///
/// A delimiter that `ZwConfig::validate` rejects is a parse error.
pub fn parse_zw(text: &str, delimiter: &str) -> ParseResult<Option<ZwNode>> {
    ZwConfig::new()
        .with_delimiter(delimiter)
        .validate()
        .map_err(ParseError::new)?;
    ZwParser::new(delimiter).parse(text)
}

/// Convert JSON text to ZW text.
///
/// Never fails: invalid JSON or an unusable root type yields a document made
/// of a single `# Error: ...` comment line.
pub fn convert_json_to_zw_string(json_text: &str, root_type: Option<&str>) -> String {
    let config = ZwConfig::new().with_root_type(root_type.map(str::to_string));
    if let Err(message) = config.validate() {
        return error_document(&message);
    }

    match ConversionEngine::new(config).json_to_zw(json_text) {
        Ok(zw) => zw,
        Err(e) => {
            warn!("JSON to ZW conversion failed: {}", e);
            error_document(&e.user_message())
        }
    }
}

fn error_document(message: &str) -> String {
    let single_line = message.lines().collect::<Vec<_>>().join(" ");
    format!("# Error: {}", single_line)
}

/// Convert ZW text to a JSON value; `None` on an empty, malformed or
/// unconvertible document
pub fn convert_zw_to_json_object(text: &str) -> Option<Value> {
    match ZwParser::default().parse(text) {
        Ok(Some(root)) => node_to_json(&root),
        Ok(None) => None,
        Err(e) => {
            debug!("ZW parse failed: {}", e);
            None
        }
    }
}

/// Convert a parsed tree to a JSON value
pub fn node_to_json(root: &ZwNode) -> Option<Value> {
    ZwJsonConverter::new(ZwConfig::default().max_depth).convert(root)
}

/// Re-indent ZW text; text that does not parse is returned unchanged
pub fn prettify_zw(text: &str) -> String {
    match ConversionEngine::new(ZwConfig::default()).prettify(text) {
        Ok(pretty) => pretty,
        Err(e) => {
            debug!("prettify skipped: {}", e);
            text.to_string()
        }
    }
}
