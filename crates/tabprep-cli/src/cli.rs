//! CLI argument definitions for tabprep.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabprep",
    version,
    about = "Standardize and obfuscate tabular data",
    long_about = "Standardize numeric CSV columns into z-scores (optionally within groups)\n\
                  and obfuscate tables by renaming columns and rescaling values by a key."
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

    /// Allow obfuscation key values to appear in logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Add z-score columns, globally or within groups.
    Standardize(StandardizeArgs),

    /// Rescale columns by a key and/or replace column names with a, b, c, ...
    Obfuscate(ObfuscateArgs),
}

#[derive(Parser)]
pub struct StandardizeArgs {
    /// Input CSV file with a header row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV file (default: write CSV to stdout).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// JSON plan with group_columns, drop_columns, standardize_columns and keep.
    ///
    /// Column flags given on the command line replace the matching plan field.
    #[arg(long = "plan", value_name = "FILE")]
    pub plan: Option<PathBuf>,

    /// Column whose values define a group (repeatable).
    #[arg(short = 'g', long = "group-by", value_name = "COLUMN")]
    pub group_by: Vec<String>,

    /// Column to standardize (repeatable).
    #[arg(short = 'c', long = "column", value_name = "COLUMN")]
    pub columns: Vec<String>,

    /// Column to remove from the output (repeatable).
    #[arg(short = 'd', long = "drop", value_name = "COLUMN")]
    pub drop: Vec<String>,

    /// Keep original columns next to their standardized versions.
    #[arg(long = "keep")]
    pub keep: bool,

    /// Read every input column as text and let standardization parse numbers.
    ///
    /// Unparseable values are then reported as errors instead of turning the
    /// whole column into text during type inference.
    #[arg(long = "as-text")]
    pub as_text: bool,
}

#[derive(Parser)]
pub struct ObfuscateArgs {
    /// Input CSV file with a header row.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV file (default: write CSV to stdout).
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// One-row CSV key: each column divides the same-named input column.
    #[arg(short = 'k', long = "key", value_name = "FILE")]
    pub key: Option<PathBuf>,

    /// Keep the original column names.
    #[arg(long = "no-rename")]
    pub no_rename: bool,
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
