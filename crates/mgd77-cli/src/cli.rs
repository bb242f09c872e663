//! CLI argument definitions for the `mgd77` tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "mgd77",
    version,
    about = "Read, convert, list and verify MGD77 marine geophysical cruises",
    long_about = "Read, convert, list and verify MGD77 marine geophysical cruises.\n\n\
                  Cruises are named by their 8-character NGDC id or by a path.\n\
                  Ids are resolved against the directories listed in\n\
                  $MGD77_HOME/mgd77_paths.txt, trying the MGD77, MGD77+, TBL and\n\
                  MGD77T formats in that order."
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

    /// Directory holding mgd77_paths.txt and carter.d (overrides $MGD77_HOME).
    #[arg(long = "home", value_name = "DIR", global = true)]
    pub home: Option<PathBuf>,

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
    /// Show the header of a cruise.
    Info(InfoArgs),

    /// Rewrite cruises in another format.
    Convert(ConvertArgs),

    /// List selected columns of a cruise, tab-separated.
    List(ListArgs),

    /// Check cruise headers against their navigation.
    Verify(VerifyArgs),

    /// Print the file each cruise resolves to.
    Path(PathArgs),
}

#[derive(Args)]
pub struct InfoArgs {
    #[arg(value_name = "CRUISE")]
    pub cruise: String,

    /// Print JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,

    /// Show the header as originally submitted.
    #[arg(long = "original")]
    pub original: bool,

    /// Header items to show, by number, name or unique name prefix.
    #[arg(long = "items", value_name = "ITEM", value_delimiter = ',')]
    pub items: Vec<String>,
}

#[derive(Args)]
pub struct ConvertArgs {
    #[arg(value_name = "CRUISE", required = true)]
    pub cruises: Vec<String>,

    /// Target format.
    #[arg(long = "to", value_enum)]
    pub to: FormatArg,

    /// Output directory (default: current directory).
    #[arg(long = "out", value_name = "DIR")]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(value_name = "CRUISE", required = true)]
    pub cruises: Vec<String>,

    /// Column selection, e.g. `time,lat,lon,depth>1000:+mag`.
    #[arg(short = 'F', long = "fields", value_name = "SPEC", default_value = "")]
    pub fields: String,

    /// Correction table applied to the listed columns.
    #[arg(long = "corrections", value_name = "FILE")]
    pub corrections: Option<PathBuf>,

    /// Interpolate times along the track for cruises without times.
    #[arg(long = "fake-times")]
    pub fake_times: bool,

    /// List derived fields as stored instead of recomputing them.
    #[arg(long = "no-adjust")]
    pub no_adjust: bool,

    /// Print a line of column names first.
    #[arg(long = "header")]
    pub header: bool,
}

#[derive(Args)]
pub struct VerifyArgs {
    #[arg(value_name = "CRUISE", required = true)]
    pub cruises: Vec<String>,

    /// Print reports as JSON.
    #[arg(long = "json")]
    pub json: bool,

    /// Count but do not print warnings.
    #[arg(long = "no-warnings")]
    pub no_warnings: bool,

    /// Verify the header as originally submitted.
    #[arg(long = "original")]
    pub original: bool,
}

#[derive(Args)]
pub struct PathArgs {
    #[arg(value_name = "CRUISE", required = true)]
    pub cruises: Vec<String>,
}

/// CLI file format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum FormatArg {
    /// Fixed-width MGD77.
    M77,
    /// Tab-delimited MGD77T.
    M77t,
    /// Tab-delimited table.
    Dat,
    /// MGD77+ netCDF.
    Nc,
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
