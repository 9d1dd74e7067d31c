//! CLI argument definitions for the CRF form tool.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "crf-form",
    version,
    about = "Dynamic CRF interpreter - inspect schemas and build submission payloads",
    long_about = "Interpret schema-driven clinical evaluation forms.\n\n\
                  Loads a versioned form schema JSON document, derives field keys and\n\
                  defaults, validates structure, and flattens filled form values into\n\
                  the submission wire payload."
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

    /// Allow form values (PHI) to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show sections, questions, and derived field keys of a schema.
    Inspect(SchemaArgs),

    /// Validate a schema's structural invariants.
    Validate(SchemaArgs),

    /// Print the derived default form values as JSON.
    Defaults(SchemaArgs),

    /// Flatten a filled form-values document into the submission payload.
    Payload(PayloadArgs),
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Path to the form schema JSON document.
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

#[derive(Parser)]
pub struct PayloadArgs {
    /// Path to the filled form-values JSON document.
    #[arg(value_name = "VALUES")]
    pub values: PathBuf,

    /// Write the payload here instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
