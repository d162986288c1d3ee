//! CLI argument definitions for the gridtree converter.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "gridtree",
    version,
    about = "Convert spreadsheet object definitions to an object-model export",
    long_about = "Convert spreadsheet object definitions to an object-model export.\n\n\
                  Each input sheet describes one root object: grouping rows open\n\
                  nested levels and the remaining rows declare attributes. All\n\
                  inputs accumulate into a single XML export document."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Convert definition sheets into an export document.
    Convert(ConvertArgs),

    /// Print the default sheet layout as JSON.
    Layout,
}

#[derive(Parser)]
pub struct ConvertArgs {
    /// Definition files, or directories to scan for them.
    ///
    /// Files inside a directory are processed in file-name order.
    #[arg(value_name = "INPUT", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Layout file describing where cells live (JSON, see `gridtree layout`).
    #[arg(long = "layout", value_name = "PATH")]
    pub layout: Option<PathBuf>,

    /// Output document path.
    #[arg(
        long = "output",
        short = 'o',
        value_name = "PATH",
        default_value = "model.xml"
    )]
    pub output: PathBuf,

    /// Keep going when a row or a whole source fails.
    ///
    /// By default, the first malformed row aborts the run without writing
    /// any output. With this flag, bad rows are skipped with a warning and
    /// failed sources are reported at the end; the exit code is still
    /// nonzero when anything was skipped at the source level.
    #[arg(long = "continue-on-errors", short = 'c')]
    pub continue_on_errors: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
