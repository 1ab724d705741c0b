use crate::conversion::config::ZwConfig;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind};
use crate::parser::InputSource;

/// Check the source size before attempting to read it.
/// This avoids loading very large files into memory if the configured
/// limit is smaller than the file.
pub fn check_source_size_before_read(
    source: &InputSource,
    config: &ZwConfig,
) -> ConversionResult<()> {
    match source.estimated_size() {
        Some(size) => check_size(size, config.size_limit),
        None => Ok(()),
    }
}

/// Check text that is already in memory, such as standard input
pub fn check_text_size(text: &str, config: &ZwConfig) -> ConversionResult<()> {
    check_size(text.len() as u64, config.size_limit)
}

fn check_size(size: u64, limit: usize) -> ConversionResult<()> {
    if size > limit as u64 {
        return Err(ConversionError::conversion(
            ConversionErrorKind::InputTooLarge {
                size: size as usize,
                limit,
            },
        ));
    }
    Ok(())
}
