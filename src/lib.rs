//! Cliptally - clip duration reports from audio session exports.
//!
//! An audio-editing session export lists every clip placed on the timeline
//! with its start and end timecode. This crate totals how long each source
//! file is used, folding takes and variants of the same file together, and
//! writes the result as CSV, JSON, a plain-text table or PDF.
//!
//! The parsing engine lives in [`session`] and is usable on its own:
//!
//! ```
//! let report = cliptally::session::parse("1 2 Drums_Loop-03.wav 00:00:10:00 00:00:25:00");
//! assert_eq!(
//!     report.as_pairs(),
//!     vec![("Drums Loop", "00:00:15"), ("Total Duration", "00:00:15")]
//! );
//! ```

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod session;

use clap::{CommandFactory, Parser};
use cli::{Cli, Command, ConfigAction, ReportArgs};
use config::{Config, OutputFormat, config_file_path, load_config_file, save_config};
use pipeline::{
    InputSource, ProcessCheck, ProcessOptions, collect_inputs, output_dir_for, print_input,
    process_input, should_process,
};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

pub use error::{Error, Result};

/// Main entry point for cliptally CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.report.verbose, cli.report.quiet);

    if let Some(command) = cli.command {
        return handle_command(command, cli.config.as_deref());
    }

    if cli.inputs.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let config = config::load_config(cli.config.as_deref())?;
    report_inputs(&cli.inputs, &cli.report, &config)
}

/// Generate reports for the given inputs.
fn report_inputs(inputs: &[PathBuf], args: &ReportArgs, config: &Config) -> Result<()> {
    let formats = args
        .format
        .clone()
        .unwrap_or_else(|| config.defaults.formats.clone());
    let output_dir = args
        .output_dir
        .clone()
        .or_else(|| config.defaults.output_dir.clone());

    let options = ProcessOptions {
        formats,
        csv_bom: config.csv.bom && !args.no_csv_bom,
        report: config.report.clone(),
    };

    if args.stdout {
        return print_single_input(inputs, args, &options);
    }

    let sources = collect_inputs(inputs)?;
    if sources.is_empty() {
        return Err(Error::NoInputFiles);
    }

    info!("Found {} session export(s) to process", sources.len());

    let mut processed = 0;
    let mut skipped = 0;
    let mut errors = 0;
    let mut total_seconds: i64 = 0;

    for source in &sources {
        let source_output_dir = output_dir_for(source, output_dir.as_deref());

        if should_process(source, &source_output_dir, &options.formats, args.force)
            == ProcessCheck::SkipExists
        {
            info!("Skipping (output exists): {source}");
            skipped += 1;
            continue;
        }

        match process_input(source, &source_output_dir, &options) {
            Ok(result) => {
                processed += 1;
                total_seconds = total_seconds.saturating_add(result.report.summary().total_seconds);
            }
            Err(e) => {
                error!("Failed to process {source}: {e}");
                errors += 1;
                if args.fail_fast {
                    return Err(e);
                }
            }
        }
    }

    info!(
        "Processed {processed} file(s), skipped {skipped}, combined duration {}",
        session::format_duration(total_seconds)
    );

    if errors > 0 {
        warn!("{errors} file(s) had errors");
    }

    Ok(())
}

/// Print the report for exactly one input to stdout.
fn print_single_input(inputs: &[PathBuf], args: &ReportArgs, options: &ProcessOptions) -> Result<()> {
    if inputs.len() != 1 {
        return Err(Error::InvalidArguments {
            message: "--stdout requires exactly one input file".to_string(),
        });
    }
    if args.output_dir.is_some() {
        return Err(Error::InvalidArguments {
            message: "--stdout cannot be used with --output-dir".to_string(),
        });
    }

    // An explicit format list must name one format; otherwise print a table.
    let format = match args.format.as_deref() {
        None => OutputFormat::Table,
        Some([format]) => *format,
        Some(_) => {
            return Err(Error::InvalidArguments {
                message: "--stdout accepts exactly one --format".to_string(),
            });
        }
    };

    let source = if inputs[0].as_os_str() == constants::STDIN_PATH {
        InputSource::Stdin
    } else {
        InputSource::File(inputs[0].clone())
    };

    let stdout = std::io::stdout();
    print_input(&source, format, options, stdout.lock())?;
    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // Logs go to stderr so `--stdout` reports stay machine-readable.
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command, explicit_config: Option<&Path>) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action, explicit_config),
    }
}

fn handle_config_command(action: ConfigAction, explicit_config: Option<&Path>) -> Result<()> {
    let path = explicit_config.map_or_else(config_file_path, |p| Ok(p.to_path_buf()))?;

    match action {
        ConfigAction::Init => {
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                save_config(&Config::default(), &path)?;
                println!("Created configuration file: {}", path.display());
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_config_file(&path)?;
            let rendered =
                toml::to_string_pretty(&config).map_err(|e| Error::ConfigSerialize { source: e })?;
            print!("{rendered}");
            Ok(())
        }
        ConfigAction::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}
