//! Per-file sessions: resolve a cruise, read its header and data, write it
//! back in any format.
//!
//! [`Format`] is matched in exactly two places, [`read_dataset`] and
//! [`write_dataset`]; every format module exposes plain functions.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use mgd77_core::codec::StorageKind;
use mgd77_core::{
    Adjust, ColumnInfo, ColumnValues, Dataset, Header, Mgd77Error, ParamSet, Result, Selection,
};
use mgd77_models::corrtable::{Aux, CorrectionTable, Variable};
use mgd77_models::{track, CarterTable};
use tracing::{debug, info};

use crate::cdf::{self, DecodeOptions};
use crate::correct;
use crate::format::{Format, FormatSet};
use crate::paths::{Mgd77Home, PathResolver};
use crate::prep::prepare_container;
use crate::{m77, m77t, tbl};

/// Options governing how a file is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Apply `corr_factor`/`corr_offset` of MGD77+ columns.
    pub use_corrections: bool,
    /// Apply MGD77+ bit flags as missing-value masks.
    pub use_flags: bool,
    /// Use the header parameters as originally submitted.
    pub original: bool,
    /// Recompute columns that carry an adjustment code.
    pub adjust: bool,
    /// Formats the resolver may pick.
    pub allowed: FormatSet,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            use_corrections: true,
            use_flags: true,
            original: false,
            adjust: true,
            allowed: FormatSet::all(),
        }
    }
}

impl ReadOptions {
    #[must_use]
    pub const fn param_set(&self) -> ParamSet {
        if self.original {
            ParamSet::Original
        } else {
            ParamSet::Revised
        }
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => Mgd77Error::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => Mgd77Error::Io(e),
    })
}

fn read_text(path: &Path) -> Result<String> {
    let bytes = read_bytes(path)?;
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned()))
}

/// Header of the file at `path` stored as `format`.
///
/// # Errors
///
/// I/O failures and the header errors of the format's reader.
pub fn read_header_as(path: &Path, format: Format) -> Result<Header> {
    match format {
        Format::M77 => m77::read_header(&read_text(path)?),
        Format::M77t => m77t::read_header(&read_text(path)?),
        Format::Tbl => tbl::read_header(&read_text(path)?),
        Format::Cdf => cdf::read_header(path),
    }
}

/// Every column and record of the file at `path` stored as `format`.
///
/// # Errors
///
/// I/O failures and the errors of the format's reader.
pub fn read_dataset(path: &Path, format: Format, options: &ReadOptions) -> Result<Dataset> {
    match format {
        Format::M77 => m77::read(&read_text(path)?),
        Format::M77t => m77t::read(&read_text(path)?),
        Format::Tbl => tbl::read(&read_text(path)?),
        Format::Cdf => cdf::read(
            path,
            DecodeOptions {
                use_corrections: options.use_corrections,
                use_flags: options.use_flags,
            },
        ),
    }
}

/// Write `dataset` to `path` as `format` using header parameter set
/// `params`. MGD77+ output is prepared first (see [`prepare_container`]).
///
/// # Errors
///
/// I/O failures and the errors of the format's writer.
pub fn write_dataset(
    dataset: &Dataset,
    path: &Path,
    format: Format,
    params: ParamSet,
    use_corrections: bool,
) -> Result<()> {
    let text_file = || -> Result<BufWriter<File>> { Ok(BufWriter::new(File::create(path)?)) };
    match format {
        Format::M77 => m77::write(text_file()?, dataset, params)?,
        Format::M77t => m77t::write(text_file()?, dataset, params)?,
        Format::Tbl => tbl::write(text_file()?, dataset, params)?,
        Format::Cdf => {
            let mut prepared = dataset.clone();
            prepare_container(&mut prepared)?;
            cdf::write(path, &prepared, &ngdc_id(path), use_corrections)?;
        }
    }
    info!(
        path = %path.display(),
        %format,
        n_records = dataset.n_records(),
        "wrote cruise"
    );
    Ok(())
}

/// Cruise identifier of a path: its file stem.
#[must_use]
pub fn ngdc_id(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File name for `cruise` in `format`, inside `dir` when given.
#[must_use]
pub fn output_path(cruise: &str, format: Format, dir: Option<&Path>) -> PathBuf {
    let name = format!("{}.{}", ngdc_id(Path::new(cruise)), format.suffix());
    dir.map_or_else(|| PathBuf::from(&name), |d| d.join(&name))
}

/// One open MGD77 file.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    format: Option<Format>,
    options: ReadOptions,
    home: Mgd77Home,
    carter: Option<CarterTable>,
    corrections: Option<CorrectionTable>,
}

impl Session {
    /// Resolve `cruise` against the data directories of `home`.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::FileNotFound`] and [`Mgd77Error::FormatDisallowed`] as
    /// for [`PathResolver::resolve`].
    pub fn open(cruise: &str, home: &Mgd77Home, options: ReadOptions) -> Result<Self> {
        let resolver = PathResolver::from_home(home)?.with_allowed(options.allowed);
        let (path, format) = resolver.resolve(cruise)?;
        Ok(Self {
            path,
            format: Some(format),
            options,
            home: home.clone(),
            carter: None,
            corrections: None,
        })
    }

    /// Session on a known path; the format follows the file suffix and
    /// stays unset for an unknown one.
    #[must_use]
    pub fn open_path(path: impl Into<PathBuf>, home: &Mgd77Home, options: ReadOptions) -> Self {
        let path = path.into();
        Self {
            format: Format::of_path(&path),
            path,
            options,
            home: home.clone(),
            carter: None,
            corrections: None,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn set_format(&mut self, format: Format) {
        self.format = Some(format);
    }

    #[must_use]
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// Cruise identifier (file stem).
    #[must_use]
    pub fn cruise(&self) -> String {
        ngdc_id(&self.path)
    }

    /// Correction table applied by [`Session::read_data`].
    #[must_use]
    pub fn with_corrections(mut self, table: CorrectionTable) -> Self {
        self.corrections = Some(table);
        self
    }

    fn require_format(&self) -> Result<Format> {
        self.format.ok_or(Mgd77Error::FormatNotSet)
    }

    fn load_carter(&mut self) -> Result<()> {
        if self.carter.is_none() {
            let path = self.home.carter_path();
            debug!(path = %path.display(), "loading Carter table");
            self.carter = Some(CarterTable::load(&path)?);
        }
        Ok(())
    }

    /// # Errors
    ///
    /// [`Mgd77Error::FormatNotSet`] for a session without format, otherwise
    /// as for [`read_header_as`].
    pub fn read_header(&self) -> Result<Header> {
        read_header_as(&self.path, self.require_format()?)
    }

    /// Read the columns and records `selection` asks for.
    ///
    /// The whole file is read, derived fields are recomputed, a correction
    /// table is applied, requested auxiliary columns (distance, azimuth,
    /// speed ...) are appended, records are filtered, and finally the output
    /// is reduced to the selected columns in selection order.
    ///
    /// # Errors
    ///
    /// Reader errors, [`Mgd77Error::NoSuchColumn`] for an unknown selected
    /// column, and correction errors from [`correct`].
    pub fn read_data(&mut self, selection: &Selection) -> Result<Dataset> {
        let format = self.require_format()?;
        let options = ReadOptions {
            use_flags: self.options.use_flags && selection.use_flags,
            ..self.options
        };
        let mut dataset = read_dataset(&self.path, format, &options)?;

        if self.needs_carter(&dataset, selection) {
            self.load_carter()?;
        }
        let carter = self.carter.as_ref();
        if self.options.adjust {
            let requested = correct::requested_adjustments(&dataset, selection.columns.as_slice());
            correct::adjust_derived_fields(&mut dataset, &requested, carter)?;
        }
        let cruise = self.cruise();
        if let Some(table) = &self.corrections {
            correct::apply_correction_table(&mut dataset, table, &cruise, carter)?;
        }
        add_aux_columns(&mut dataset, selection, &cruise, carter)?;

        if !selection.is_trivial() {
            let filter = selection.record_filter(&dataset)?;
            let dropped = filter.apply(&mut dataset);
            debug!(dropped, "record filter applied");
        }
        dataset.select_columns(selection.columns.as_slice())?;
        info!(
            cruise = %cruise,
            %format,
            n_records = dataset.n_records(),
            n_columns = dataset.order.len(),
            "read cruise"
        );
        Ok(dataset)
    }

    fn needs_carter(&self, dataset: &Dataset, selection: &Selection) -> bool {
        let depth = self.options.adjust
            && correct::requested_adjustments(dataset, selection.columns.as_slice())
                .contains(&Adjust::Depth);
        let in_table = self.corrections.as_ref().is_some_and(|t| {
            let cruise = self.cruise();
            t.for_cruise(&cruise).any(|(_, c)| {
                c.variables()
                    .any(|v| *v == Variable::Aux(Aux::Carter))
            })
        });
        let as_column = selection.columns.iter().any(|c| c == Aux::Carter.name());
        depth || in_table || as_column
    }

    /// Write `dataset` to this session's path in its format.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::FormatNotSet`] for a session without format, otherwise
    /// as for [`write_dataset`].
    pub fn write(&self, dataset: &Dataset) -> Result<()> {
        write_dataset(
            dataset,
            &self.path,
            self.require_format()?,
            self.options.param_set(),
            self.options.use_corrections,
        )
    }
}

/// Append selected auxiliary quantities that are not file columns.
fn add_aux_columns(
    dataset: &mut Dataset,
    selection: &Selection,
    cruise: &str,
    carter: Option<&CarterTable>,
) -> Result<()> {
    for name in &selection.columns {
        if dataset.header.catalog.resolve(name).is_some() {
            continue;
        }
        let Some(aux) = Aux::from_name(name) else {
            continue;
        };
        let values = if aux == Aux::Dist && selection.flat_earth {
            let lon = dataset.require_numeric("lon")?;
            let lat = dataset.require_numeric("lat")?;
            track::cumulative_distance(lon, lat, true)
                .into_iter()
                .map(|d| d / 1000.0)
                .collect()
        } else {
            correct::aux_column(dataset, aux, cruise, carter)?
        };
        dataset.add_column(ColumnInfo::new(name, StorageKind::Double), ColumnValues::Numeric(values))?;
        debug!(column = %name, "added auxiliary column");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path("01010047", Format::Cdf, None),
            PathBuf::from("01010047.nc")
        );
        assert_eq!(
            output_path("/data/01010047.mgd77", Format::M77t, Some(Path::new("out"))),
            PathBuf::from("out/01010047.m77t")
        );
    }

    #[test]
    fn test_session_without_format_refuses() {
        let home = Mgd77Home::new("/nonexistent");
        let session = Session::open_path("cruise.xyz", &home, ReadOptions::default());
        assert_eq!(session.format(), None);
        assert!(matches!(session.read_header(), Err(Mgd77Error::FormatNotSet)));
        let ds = Dataset::new(Header::default(), Vec::new());
        assert!(matches!(session.write(&ds), Err(Mgd77Error::FormatNotSet)));
    }

    #[test]
    fn test_param_set_choice() {
        let original = ReadOptions {
            original: true,
            ..ReadOptions::default()
        };
        assert_eq!(original.param_set(), ParamSet::Original);
        assert_eq!(ReadOptions::default().param_set(), ParamSet::Revised);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let home = Mgd77Home::new("/nonexistent");
        let session = Session::open_path("/nonexistent/x.mgd77", &home, ReadOptions::default());
        assert!(matches!(session.read_header(), Err(Mgd77Error::FileNotFound { .. })));
    }
}
