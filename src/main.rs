use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use log::{debug, info};

use zwconv::cli::path_mapping::map_input_to_output;
use zwconv::cli::{handle_error, Args, CliConfig, CliUtils};
use zwconv::conversion::limits;
use zwconv::conversion::{ConversionEngine, ConvertedData, Direction};
use zwconv::error::ConversionError;
use zwconv::parser::directory::find_files;
use zwconv::parser::source::looks_like_json;
use zwconv::parser::{parse_json_text, InputSource};
use zwconv::validation::ZwValidator;

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(&args);

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            handle_error(&e);
            return ExitCode::from(2);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<ConversionError>() {
                Some(conversion) => handle_error(conversion),
                None => CliUtils::show_error(&format!("{:#}", e)),
            }
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` shows debug output and `--quiet`
/// only errors
fn init_logging(args: &Args) {
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(config: &CliConfig) -> Result<()> {
    let source = resolve_source(&config.args)?;
    debug!("reading {}", source.description());

    if let InputSource::Directory(dir) = &source {
        return process_directory(dir, config);
    }

    let engine = ConversionEngine::new(config.zw_config.clone());
    limits::check_source_size_before_read(&source, engine.config())?;
    let text = source.read_content()?;
    limits::check_text_size(&text, engine.config())?;
    let direction = config.direction_for(source.path(), Some(&text));
    let output = config.args.output.as_deref();

    if config.args.validate_only {
        validate_text(&text, direction, config)?;
        CliUtils::show_success(&format!("Valid {}", input_format(direction)), config.is_quiet());
        return Ok(());
    }

    if config.args.tree {
        if direction == Direction::ToZw {
            bail!("--tree requires ZW input");
        }
        let root = engine.parse_document(&text)?;
        let dump = serde_json::to_string_pretty(&root)?;
        return write_output(&dump, output, config.is_quiet());
    }

    if config.args.prettify {
        if direction == Direction::ToZw {
            bail!("--prettify requires ZW input");
        }
        let pretty = engine.prettify(&text)?;
        return write_output(&pretty, output, config.is_quiet());
    }

    let data = engine.convert(&text, direction)?;
    write_output(&data.content, output, config.is_quiet())?;
    if config.want_stats() {
        output_statistics(&data, config.is_quiet());
    }
    Ok(())
}

fn resolve_source(args: &Args) -> Result<InputSource> {
    if args.stdin {
        return Ok(InputSource::Stdin);
    }
    let input = args
        .input
        .as_ref()
        .ok_or_else(|| anyhow!("No input provided. Use --stdin or provide an input path"))?;

    // Check if input looks like JSON string (starts with { or [)
    if looks_like_json(input) {
        return Ok(InputSource::String(input.clone()));
    }
    let path = PathBuf::from(input);
    if path.is_file() {
        Ok(InputSource::File(path))
    } else if path.is_dir() {
        Ok(InputSource::Directory(path))
    } else {
        Err(anyhow!("Input path does not exist: {}", input))
    }
}

fn input_format(direction: Direction) -> &'static str {
    match direction {
        Direction::ToZw => "JSON",
        Direction::ToJson => "ZW",
    }
}

/// Check input syntax; ZW input is linted and its issues printed
fn validate_text(text: &str, direction: Direction, config: &CliConfig) -> Result<()> {
    match direction {
        Direction::ToZw => {
            parse_json_text(text)?;
            Ok(())
        }
        Direction::ToJson => {
            let report = ZwValidator::new(&config.zw_config.delimiter, false).validate(text);
            for issue in &report.issues {
                CliUtils::show_warning(&issue.to_string(), config.is_quiet());
            }
            if report.is_valid() {
                Ok(())
            } else {
                bail!("ZW document has {} error(s)", report.error_count())
            }
        }
    }
}

fn write_output(content: &str, output: Option<&Path>, quiet: bool) -> Result<()> {
    match output {
        Some(output_path) => {
            if let Some(parent) = output_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(output_path, format!("{}\n", content))
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            CliUtils::show_success(
                &format!("Converted to: {}", output_path.display()),
                quiet,
            );
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn output_statistics(data: &ConvertedData, quiet: bool) {
    if quiet {
        return;
    }
    let metadata = &data.metadata;

    eprintln!("\nConversion Statistics:");
    eprintln!(
        "Input: {} ({} lines)",
        CliUtils::format_file_size(metadata.input_size),
        metadata.input_lines
    );
    eprintln!(
        "Output: {} ({} lines)",
        CliUtils::format_file_size(metadata.output_size),
        metadata.output_lines
    );
    eprintln!("Size ratio: {:.1}%", metadata.size_ratio());
    eprintln!(
        "Processing time: {}",
        CliUtils::format_duration(Duration::from_millis(metadata.processing_time_ms))
    );
}

/// Files a directory run picks up, with the direction each is converted in
fn directory_inputs(dir: &Path, config: &CliConfig) -> Result<Vec<(PathBuf, Direction)>> {
    let directions = match config.args.to {
        Some(format) => vec![format.into()],
        None => vec![Direction::ToZw, Direction::ToJson],
    };

    let mut inputs = Vec::new();
    for direction in directions {
        let files = find_files(dir, config.args.recursive, direction.input_extension())
            .with_context(|| format!("Failed finding files in {}", dir.display()))?;
        inputs.extend(files.into_iter().map(|file| (file, direction)));
    }
    inputs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(inputs)
}

fn process_directory(input_dir: &Path, config: &CliConfig) -> Result<()> {
    let quiet = config.is_quiet();
    let inputs = directory_inputs(input_dir, config)?;
    if inputs.is_empty() {
        CliUtils::show_warning(
            &format!("No .json or .zw files found in {}", input_dir.display()),
            quiet,
        );
        return Ok(());
    }

    let output_dir = match (&config.args.output, config.args.validate_only) {
        (Some(dir), _) => Some(dir.as_path()),
        (None, true) => None,
        (None, false) => bail!("Output directory required for directory conversion"),
    };
    if let Some(dir) = output_dir {
        std::fs::create_dir_all(dir)?;
    }

    info!("found {} files in {}", inputs.len(), input_dir.display());
    let engine = ConversionEngine::new(config.zw_config.clone());
    let pb = CliUtils::create_progress_bar(inputs.len() as u64, quiet);
    let mut failures = 0usize;

    for (file, direction) in &inputs {
        let relative = file.strip_prefix(input_dir).unwrap_or(file);
        pb.set_message(relative.display().to_string());

        let result = match output_dir {
            Some(dir) if !config.args.validate_only => {
                let output_file =
                    map_input_to_output(input_dir, file, dir, direction.output_extension());
                convert_single_file(&engine, file, &output_file, *direction)
            }
            _ => std::fs::read_to_string(file)
                .map_err(anyhow::Error::from)
                .and_then(|text| validate_text(&text, *direction, config)),
        };

        if let Err(e) = result {
            failures += 1;
            pb.suspend(|| CliUtils::show_error(&format!("{}: {:#}", relative.display(), e)));
            if !config.continue_on_error() {
                pb.finish_and_clear();
                return Err(e.context(format!("Aborting at {}", relative.display())));
            }
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    let processed = inputs.len() - failures;
    let verb = if config.args.validate_only {
        "Validated"
    } else {
        "Converted"
    };
    CliUtils::show_success(&format!("{} {} files", verb, processed), quiet);
    if failures > 0 {
        CliUtils::show_warning(&format!("{} files failed", failures), quiet);
    }
    Ok(())
}

fn convert_single_file(
    engine: &ConversionEngine,
    input_path: &Path,
    output_path: &Path,
    direction: Direction,
) -> Result<()> {
    let source = InputSource::File(input_path.to_path_buf());
    let data = engine.convert_from_source(&source, direction)?;

    // Ensure output directory exists
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, format!("{}\n", data.content))?;
    debug!("{} -> {}", input_path.display(), output_path.display());
    Ok(())
}
