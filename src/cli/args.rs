//! CLI argument definitions.

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Total clip durations per source file from audio session exports.
#[derive(Debug, Parser)]
#[command(name = "cliptally")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Session export files or directories to report on (`-` reads stdin).
    pub inputs: Vec<PathBuf>,

    /// Configuration file to use instead of the platform default.
    #[arg(long, global = true, env = "CLIPTALLY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Report options.
    #[command(flatten)]
    pub report: ReportArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for generating reports.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct ReportArgs {
    /// Output formats (comma-separated: csv,json,table,pdf).
    #[arg(short, long, value_delimiter = ',', env = "CLIPTALLY_FORMAT")]
    pub format: Option<Vec<OutputFormat>>,

    /// Output directory (default: same as input).
    #[arg(short, long, env = "CLIPTALLY_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the report to stdout instead of writing files (single input only).
    #[arg(long)]
    pub stdout: bool,

    /// Overwrite reports that already exist.
    #[arg(long)]
    pub force: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,

    /// Omit the UTF-8 byte order mark from CSV output.
    #[arg(long)]
    pub no_csv_bom: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
