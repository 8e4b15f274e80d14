//! CLI argument definitions for the warehouse pipeline.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "dwh",
    version,
    about = "Sales warehouse pipeline - load, cleanse, and model source extracts",
    long_about = "Load CRM and ERP extracts, cleanse them, and publish a star schema.\n\n\
                  Outputs dim_customers.csv, dim_products.csv, and fact_sales.csv.\n\
                  Every run replaces the previous output in full."
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

    /// Omit timestamps from pretty and compact log lines.
    #[arg(long = "no-log-timestamps", global = true)]
    pub no_log_timestamps: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the full pipeline over a source root.
    Run(RunArgs),

    /// List the source extracts the pipeline expects.
    Sources(SourcesArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory containing `source_crm/` and `source_erp/`.
    #[arg(value_name = "SOURCE_ROOT")]
    pub source_root: PathBuf,

    /// Output directory for published tables (default: <SOURCE_ROOT>/warehouse).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Reference date for date validation, as YYYY-MM-DD (default: today).
    #[arg(long = "as-of", value_name = "DATE")]
    pub as_of: Option<NaiveDate>,

    /// Read extracts concurrently.
    #[arg(long = "parallel-load")]
    pub parallel_load: bool,

    /// Stop loading at the first extract that fails.
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Build the star schema without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Parser)]
pub struct SourcesArgs {
    /// Resolve extract paths against this directory.
    #[arg(value_name = "SOURCE_ROOT", default_value = "datasets")]
    pub source_root: PathBuf,
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
