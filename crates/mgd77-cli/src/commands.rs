//! Subcommand implementations. Each returns its result to `main`, which
//! decides what to print and the exit code.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use mgd77_core::params::select_item;
use mgd77_core::{Dataset, Header, ParamSet, Selection};
use mgd77_io::{Format, Mgd77Home, PathResolver, ReadOptions, Session, output_path, write_dataset};
use mgd77_models::{CorrectionTable, track};
use mgd77_verify::{HeaderVerifier, VerificationReport, Verbosity};
use tracing::{debug, info, info_span, warn};

use crate::listing::write_records;

/// Header of one cruise, as read for `info`.
#[derive(Debug)]
pub struct CruiseHeader {
    pub cruise: String,
    pub path: PathBuf,
    pub format: Format,
    pub header: Header,
    pub param_set: ParamSet,
    /// Indices of the requested header items; `None` lists all.
    pub items: Option<Vec<usize>>,
}

impl CruiseHeader {
    /// JSON document with the selected header items.
    #[must_use]
    pub fn to_json(&self) -> serde_json::Value {
        let params = self.header.params(self.param_set);
        let mut items = serde_json::Map::new();
        for (index, (name, value)) in params.iter().enumerate() {
            if self.items.as_ref().is_some_and(|w| !w.contains(&index)) {
                continue;
            }
            items.insert(name.to_string(), serde_json::Value::from(value));
        }
        serde_json::json!({
            "cruise": self.cruise,
            "path": self.path.display().to_string(),
            "format": self.format.name(),
            "n_records": self.header.n_records,
            "params": items,
        })
    }
}

fn open(home: &Mgd77Home, cruise: &str, options: ReadOptions) -> Result<Session> {
    Session::open(cruise, home, options).with_context(|| format!("open cruise {cruise}"))
}

fn resolved_format(session: &Session) -> Result<Format> {
    session
        .format()
        .with_context(|| format!("unknown format for {}", session.path().display()))
}

/// Read the header of `cruise`, optionally restricted to `items` (numbers,
/// names or unique name prefixes).
pub fn run_info(
    home: &Mgd77Home,
    cruise: &str,
    original: bool,
    items: &[String],
) -> Result<CruiseHeader> {
    let options = ReadOptions {
        original,
        ..ReadOptions::default()
    };
    let session = open(home, cruise, options)?;
    let header = session
        .read_header()
        .with_context(|| format!("read header of {}", session.path().display()))?;
    let items = if items.is_empty() {
        None
    } else {
        Some(
            items
                .iter()
                .map(|s| select_item(s))
                .collect::<mgd77_core::Result<Vec<_>>>()?,
        )
    };
    Ok(CruiseHeader {
        cruise: session.cruise(),
        path: session.path().to_path_buf(),
        format: resolved_format(&session)?,
        header,
        param_set: options.param_set(),
        items,
    })
}

/// Rewrite each cruise in `to`, into `out_dir` or the current directory.
/// Values are copied as stored: no adjustment and no stored corrections.
pub fn run_convert(
    home: &Mgd77Home,
    cruises: &[String],
    to: Format,
    out_dir: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let options = ReadOptions {
        use_corrections: false,
        adjust: false,
        ..ReadOptions::default()
    };
    let mut written = Vec::with_capacity(cruises.len());
    for cruise in cruises {
        let span = info_span!("convert", cruise = %cruise);
        let _guard = span.enter();
        let mut session = open(home, cruise, options)?;
        let from = resolved_format(&session)?;
        let target = output_path(&session.cruise(), to, out_dir);
        if same_file(session.path(), &target) {
            bail!("{} would overwrite itself", session.path().display());
        }
        let dataset = session
            .read_data(&Selection::default())
            .with_context(|| format!("read {}", session.path().display()))?;
        write_dataset(&dataset, &target, to, options.param_set(), options.use_corrections)
            .with_context(|| format!("write {}", target.display()))?;
        info!(%from, %to, path = %target.display(), "converted");
        written.push(target);
    }
    Ok(written)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Options for `list`.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Column selection string.
    pub columns: String,
    /// Correction table file applied after the derived-field corrector.
    pub corrections: Option<PathBuf>,
    /// Synthesize times along the track when the cruise has none.
    pub fake_times: bool,
    /// Leave derived fields as stored.
    pub no_adjust: bool,
    /// Print a `#`-prefixed line of column names first.
    pub with_names: bool,
}

/// Write the selected columns of `cruise` to `out`. Returns the number of
/// records written.
pub fn run_list<W: Write>(
    home: &Mgd77Home,
    cruise: &str,
    options: &ListOptions,
    out: &mut W,
) -> Result<usize> {
    let mut selection = Selection::parse(&options.columns)
        .with_context(|| format!("bad column selection \"{}\"", options.columns))?;
    let wanted = selection.columns.clone();
    if options.fake_times {
        for name in ["lon", "lat"] {
            if !selection.columns.iter().any(|c| c == name) {
                selection.columns.push(name.to_string());
            }
        }
    }

    let read = ReadOptions {
        adjust: !options.no_adjust,
        ..ReadOptions::default()
    };
    let mut session = open(home, cruise, read)?;
    if let Some(path) = &options.corrections {
        let name = session.cruise();
        let columns: Vec<&str> = wanted.iter().map(String::as_str).collect();
        let table = CorrectionTable::load(path, &[name.as_str()], &columns)
            .with_context(|| format!("load correction table {}", path.display()))?;
        session = session.with_corrections(table);
    }
    let mut dataset = session
        .read_data(&selection)
        .with_context(|| format!("read {}", session.path().display()))?;
    if options.fake_times {
        fill_fake_times(&mut dataset, read.param_set());
        dataset.select_columns(wanted.as_slice())?;
    }
    let n = write_records(out, &dataset, selection.time_format, options.with_names)?;
    debug!(cruise = %session.cruise(), n_records = n, "listed");
    Ok(n)
}

/// Replace an all-missing time column with times interpolated along the
/// track between the header's departure and arrival dates.
fn fill_fake_times(dataset: &mut Dataset, param_set: ParamSet) {
    let has_time = dataset
        .numeric("time")
        .is_some_and(|t| t.iter().any(|v| !v.is_nan()));
    if has_time {
        return;
    }
    let (Some(lon), Some(lat)) = (dataset.numeric("lon"), dataset.numeric("lat")) else {
        return;
    };
    let Some(times) = track::fake_times(dataset.header.params(param_set), lon, lat) else {
        warn!("header dates cannot bound the track; times left missing");
        return;
    };
    if let Some(slot) = dataset.numeric_mut("time") {
        *slot = times;
    }
}

/// Options for `verify`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VerifyOptions {
    /// Check the as-submitted header instead of the revised one.
    pub original: bool,
    pub verbosity: Verbosity,
    /// Draw a progress bar over several cruises.
    pub progress: bool,
}

/// Verify the header of each cruise against its navigation.
pub fn run_verify(
    home: &Mgd77Home,
    cruises: &[String],
    options: VerifyOptions,
) -> Result<Vec<VerificationReport>> {
    let read = ReadOptions {
        adjust: false,
        original: options.original,
        ..ReadOptions::default()
    };
    let selection = Selection::parse("time,lat,lon")?;
    let bar = if options.progress && cruises.len() > 1 {
        progress_bar(cruises.len() as u64)
    } else {
        ProgressBar::hidden()
    };

    let mut reports = Vec::with_capacity(cruises.len());
    for cruise in cruises {
        let mut session = open(home, cruise, read)?;
        // Only MGD77+ files carry a revised header.
        let param_set = if options.original || session.format() != Some(Format::Cdf) {
            ParamSet::Original
        } else {
            ParamSet::Revised
        };
        let dataset = session
            .read_data(&selection)
            .with_context(|| format!("read {}", session.path().display()))?;
        let report = HeaderVerifier::new(session.cruise())
            .with_verbosity(options.verbosity)
            .verify_dataset(&dataset, param_set)?;
        bar.set_message(report.ngdc_id.clone());
        bar.inc(1);
        reports.push(report);
    }
    bar.finish_and_clear();
    Ok(reports)
}

fn progress_bar(len: u64) -> ProgressBar {
    let bar = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);
    bar
}

/// Resolved file of each cruise.
pub fn run_path(home: &Mgd77Home, cruises: &[String]) -> Result<Vec<(PathBuf, Format)>> {
    let resolver = PathResolver::from_home(home)?;
    cruises
        .iter()
        .map(|c| {
            resolver
                .resolve(c)
                .with_context(|| format!("resolve cruise {c}"))
        })
        .collect()
}
