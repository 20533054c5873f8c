//! CLI argument definitions for `estat`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "estat",
    version,
    about = "Reshape Eurostat wide TSV exports into long-form tables",
    long_about = "Reshape gzip-compressed Eurostat TSV exports into clean long-form tables.\n\n\
                  Splits the composite dimension key, unpivots the period columns and\n\
                  cleans flagged values according to a dataset profile."
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
    /// List the available dataset profiles.
    Profiles(ProfilesArgs),

    /// Load an export and reshape it with a profile.
    Run(RunArgs),
}

#[derive(Parser)]
pub struct ProfilesArgs {
    /// TOML catalog adding or overriding profiles.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

#[derive(Parser)]
pub struct RunArgs {
    /// Profile name (see `estat profiles`).
    #[arg(value_name = "PROFILE")]
    pub profile: String,

    /// Path or http(s) URL of the gzip-compressed TSV export.
    #[arg(value_name = "SOURCE")]
    pub source: String,

    /// TOML catalog adding or overriding profiles.
    #[arg(long = "catalog", value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Write the reshaped table to this file.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output file format.
    #[arg(long = "format", value_enum, default_value = "csv")]
    pub format: OutputFormatArg,

    /// Add ISO alpha-3 codes and drop aggregate or unmapped geo codes.
    #[arg(long = "iso3")]
    pub iso3: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Csv,
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
