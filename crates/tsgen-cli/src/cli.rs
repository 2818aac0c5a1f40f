//! Command line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tsgen",
    version,
    about = "Term sheet generator - fill document templates from spreadsheet data",
    long_about = "Fill placeholders in a document template with values taken from CSV, TSV or\n\
                  spreadsheet input, driven by a JSON mapping configuration.\n\n\
                  Every run ends with a replacement log and a reconciliation of the\n\
                  number of replaced values against the configured expectation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow input and resolved values in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate a document from a configuration file.
    Run(RunArgs),

    /// List the selectable configurations in a directory.
    Configs(ConfigsArgs),

    /// List the registered custom operations and formatters.
    Operations,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Path to the JSON configuration.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Show where each placeholder was replaced.
    #[arg(long = "show-locations")]
    pub show_locations: bool,

    /// Resolve, substitute and audit without writing the output document.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Write the audit and diagnostics as JSON.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

#[derive(Parser)]
pub struct ConfigsArgs {
    /// Directory holding configuration files.
    #[arg(value_name = "DIR", default_value = "config")]
    pub dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
