//! Command-line interface module

use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::conversion::{ConversionResult, Direction, ZwConfig};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::parser::source::looks_like_json;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "zwconv")]
#[command(about = "Convert between the ZW indentation format and JSON")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Input source (JSON string, file, or directory)
    #[arg()]
    pub input: Option<String>,

    /// Output file or directory path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read input from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Output format (default: inferred from the input)
    #[arg(long, value_enum)]
    pub to: Option<Format>,

    /// Root type label for ZW output (default: ZW-OBJECT, ZW-ARRAY or ZW-VALUE)
    #[arg(long)]
    pub root_type: Option<String>,

    /// Key/value delimiter (default: ':')
    #[arg(long)]
    pub delimiter: Option<String>,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Only validate ZW or JSON input, don't convert
    #[arg(long)]
    pub validate_only: bool,

    /// Re-indent ZW input instead of converting it
    #[arg(long)]
    pub prettify: bool,

    /// Print the parsed ZW tree as JSON
    #[arg(long)]
    pub tree: bool,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,

    /// Continue converting other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,

    /// Maximum input size (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub max_size: Option<String>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Zw,
    Json,
}

impl From<Format> for Direction {
    fn from(format: Format) -> Self {
        match format {
            Format::Zw => Direction::ToZw,
            Format::Json => Direction::ToJson,
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub zw_config: ZwConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let zw_config = Self::create_zw_config(&args)?;

        Ok(Self { args, zw_config })
    }

    /// Create conversion configuration from CLI arguments
    fn create_zw_config(args: &Args) -> ConversionResult<ZwConfig> {
        let mut config = ZwConfig::new()
            .with_root_type(args.root_type.clone())
            .with_size_limit(parse_size_limit(&args.max_size)?);
        if let Some(delimiter) = &args.delimiter {
            config = config.with_delimiter(delimiter.as_str());
        }

        // Validate configuration
        config
            .validate()
            .map_err(|e| ConversionError::conversion(ConversionErrorKind::configuration(e)))?;

        Ok(config)
    }

    /// Check if we should continue on error
    pub fn continue_on_error(&self) -> bool {
        self.args.continue_on_error
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Conversion direction for a single input.
    ///
    /// `--to` wins; otherwise a `.json` path or JSON-looking text converts to
    /// ZW and everything else is treated as ZW.
    pub fn direction_for(&self, path: Option<&Path>, text: Option<&str>) -> Direction {
        if let Some(format) = self.args.to {
            return format.into();
        }
        let json_path = path
            .and_then(Path::extension)
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if json_path || text.is_some_and(looks_like_json) {
            Direction::ToZw
        } else {
            Direction::ToJson
        }
    }
}

/// Parse size limit string (e.g., "100MB", "1GB", "500KB")
pub fn parse_size_limit(limit: &Option<String>) -> ConversionResult<usize> {
    let Some(limit_str) = limit else {
        return Ok(ZwConfig::default().size_limit);
    };
    let limit_str = limit_str.trim().to_uppercase();
    let invalid = || {
        ConversionError::conversion(ConversionErrorKind::configuration(format!(
            "Invalid size limit: {}",
            limit_str
        )))
    };

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        (size, 1.0)
    } else {
        // Assume bytes
        (limit_str.as_str(), 1.0)
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as usize)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Create a progress bar for file processing; hidden in quiet mode
    pub fn create_progress_bar(total: u64, quiet: bool) -> indicatif::ProgressBar {
        if quiet {
            return indicatif::ProgressBar::hidden();
        }
        let pb = indicatif::ProgressBar::new(total);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            println!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }

    /// Show a warning message (if not in quiet mode)
    pub fn show_warning(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("⚠ {}", message);
        }
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    let message = error.user_message();
    CliUtils::show_error(&message);

    // Provide helpful suggestions
    match error {
        ConversionError::ParseError(_) => {
            eprintln!("\nTip: A ZW document must start with a bare root line such as `ZW-TYPE:`");
        }
        ConversionError::Conversion { kind, .. } => match kind {
            ConversionErrorKind::JsonParse { .. } => {
                eprintln!("\nTip: Use --validate-only to check input syntax before conversion");
            }
            ConversionErrorKind::InputTooLarge { .. } => {
                eprintln!("\nTip: Use --max-size to raise the input size limit");
            }
            _ => {}
        },
        _ => {}
    }

    // Show usage hint
    eprintln!("\nTry 'zwconv --help' for usage information.");
}
