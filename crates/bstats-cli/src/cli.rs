//! CLI argument definitions for the bstats profiler.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bstats_model::{DEFAULT_SIGNIFICANCE_LEVEL, DEFAULT_TRIM_RATIO, TagOverlap};

#[derive(Parser)]
#[command(
    name = "bstats",
    version,
    about = "Profile the columns of a CSV dataset",
    long_about = "Profile the columns of a CSV dataset.\n\n\
                  Classifies columns as binary, categorical or continuous, flags apparent\n\
                  missing-value markers, and reports descriptive statistics with skewness\n\
                  and kurtosis tests for numeric columns."
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
}

#[derive(Subcommand)]
pub enum Command {
    /// Profile every column of a CSV file.
    Profile(ProfileArgs),

    /// List the text values treated as missing-value markers.
    Markers,
}

#[derive(Parser)]
pub struct ProfileArgs {
    /// Path to a CSV file with a header row.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Threshold under which a skewness or kurtosis p-value is significant.
    #[arg(long = "significance-level", default_value_t = DEFAULT_SIGNIFICANCE_LEVEL)]
    pub significance_level: f64,

    /// Fraction of observations cut from each end for the trimmed mean.
    #[arg(long = "trim-ratio", default_value_t = DEFAULT_TRIM_RATIO)]
    pub trim_ratio: f64,

    /// Print a random sample of N rows.
    #[arg(long = "sample", value_name = "N", allow_negative_numbers = true)]
    pub sample: Option<i64>,

    /// Scan whole columns for missing-value markers instead of the first cell.
    #[arg(long = "full-missing-scan")]
    pub full_missing_scan: bool,

    /// How to resolve columns that are both categorical and continuous.
    #[arg(long = "tag-overlap", value_enum, default_value = "keep")]
    pub tag_overlap: TagOverlapArg,

    /// Output format for the profile.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TagOverlapArg {
    Keep,
    PreferContinuous,
    PreferCategorical,
}

impl From<TagOverlapArg> for TagOverlap {
    fn from(value: TagOverlapArg) -> Self {
        match value {
            TagOverlapArg::Keep => TagOverlap::Keep,
            TagOverlapArg::PreferContinuous => TagOverlap::PreferContinuous,
            TagOverlapArg::PreferCategorical => TagOverlap::PreferCategorical,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
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
