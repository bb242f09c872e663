//! Diagnostics for the `mgd77` command.
//!
//! Events go to stderr, or appended to a file with `--log-file`, so they
//! never mix with listings on stdout. Per level:
//!
//! - `error`: failures that abort a cruise
//! - `warn`: recovered problems (encoding overflows, unknown gravity
//!   formula, missing data-directory list)
//! - `info`: per-cruise summaries
//! - `debug`: path resolution and correction steps

use std::fs::{File, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::{self, writer::BoxMakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Crates of this workspace; everything else is held at `warn`.
const WORKSPACE_CRATES: [&str; 5] = ["mgd77", "mgd77_core", "mgd77_io", "mgd77_models", "mgd77_verify"];

/// How events are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogStyle {
    /// Multi-field lines, colored on a terminal.
    #[default]
    Pretty,
    /// One short line per event.
    Compact,
    /// One JSON object per event, with timestamps.
    Json,
}

/// Where events are written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LogDestination {
    #[default]
    Stderr,
    /// Appended to this file.
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LogSettings {
    /// Level for the workspace crates.
    pub level: LevelFilter,
    /// A set `RUST_LOG` replaces `level` entirely.
    pub honor_rust_log: bool,
    pub style: LogStyle,
    pub color: bool,
    pub destination: LogDestination,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: LevelFilter::WARN,
            honor_rust_log: true,
            style: LogStyle::default(),
            color: true,
            destination: LogDestination::default(),
        }
    }
}

/// Install the global subscriber. Call once, before any command runs.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(settings: &LogSettings) -> io::Result<()> {
    let writer = open_destination(&settings.destination)?;
    tracing_subscriber::registry()
        .with(event_layer(settings, writer))
        .with(event_filter(settings))
        .init();
    Ok(())
}

fn open_destination(destination: &LogDestination) -> io::Result<BoxMakeWriter> {
    Ok(match destination {
        LogDestination::Stderr => BoxMakeWriter::new(io::stderr),
        LogDestination::File(path) => {
            let file: File = OpenOptions::new().create(true).append(true).open(path)?;
            BoxMakeWriter::new(Mutex::new(file))
        }
    })
}

fn event_layer(settings: &LogSettings, writer: BoxMakeWriter) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = fmt::layer().with_writer(writer).with_target(false);
    match settings.style {
        LogStyle::Json => layer.json().boxed(),
        LogStyle::Compact => layer.compact().with_ansi(settings.color).without_time().boxed(),
        LogStyle::Pretty => layer.with_ansi(settings.color).without_time().boxed(),
    }
}

fn event_filter(settings: &LogSettings) -> EnvFilter {
    if settings.honor_rust_log
        && let Ok(filter) = EnvFilter::try_from_default_env()
    {
        return filter;
    }
    EnvFilter::new(directives(settings.level))
}

/// `warn` globally, `level` for the workspace crates.
fn directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    std::iter::once("warn".to_string())
        .chain(WORKSPACE_CRATES.iter().map(|krate| format!("{krate}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}
