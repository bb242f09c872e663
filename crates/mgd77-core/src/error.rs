//! Error types shared by every MGD77 crate.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading, writing or correcting MGD77 data.
#[derive(Debug, Error)]
pub enum Mgd77Error {
    /// No file matched the cruise identifier.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A requested column is not present in the file.
    #[error("requested column {name} not in data set")]
    NoSuchColumn { name: String },

    /// First header line does not start with a header record type.
    #[error("no header record present")]
    NoHeaderRecord,

    /// Header ended before all records were read.
    #[error("failure to read header sequence {seq:02}")]
    HeaderTruncated { seq: usize },

    /// Header line carries the wrong sequence number.
    #[error("expected header sequence {expected:02} says it is {found}")]
    WrongHeaderSequence { expected: usize, found: String },

    /// Fixed-width data record has the wrong length.
    #[error("data record {record} has length {length}, expected {expected}")]
    WrongDataRecordLength {
        record: usize,
        length: usize,
        expected: usize,
    },

    /// Line is not a data record.
    #[error("record {record} is not a data record")]
    NoDataRecord { record: usize },

    /// A numeric field could not be parsed.
    #[error("record {record}: cannot parse {field} from '{text}'")]
    NumericParse {
        record: usize,
        field: &'static str,
        text: String,
    },

    /// Format selector not recognized.
    #[error("unknown MGD77 format: {name}")]
    UnknownFormat { name: String },

    /// Format known but disabled by configuration.
    #[error("format {format} is not allowed")]
    FormatDisallowed { format: &'static str },

    /// Output format not chosen before writing.
    #[error("output format not set")]
    FormatNotSet,

    /// A container file that is not MGD77+.
    #[error("{path} is not an MGD77+ file: {message}")]
    NotMgd77Plus { path: PathBuf, message: String },

    /// Bad binary container structure.
    #[error("invalid netCDF data: {message}")]
    InvalidContainer { message: String },

    /// Bad selection specification or other argument.
    #[error("bad argument: {message}")]
    BadArgument { message: String },

    /// Geomagnetic model date outside 1900-2015.
    #[error("date {date} is outside valid extrapolated range for IGRF (1900-2015)")]
    BadIgrfDate { date: f64 },

    /// Latitude outside [-90, 90].
    #[error("latitude {lat} out of range")]
    LatitudeOutOfRange { lat: f64 },

    /// Carter bin index out of range.
    #[error("Carter bin {bin} out of range")]
    CarterBinOutOfRange { bin: i64 },

    /// Carter zone out of range.
    #[error("Carter zone {zone} out of range")]
    CarterZoneOutOfRange { zone: i32 },

    /// Travel time outside what the Carter table covers.
    #[error("Carter travel time {twt} out of range")]
    CarterTwtOutOfRange { twt: f64 },

    /// Carter depth beyond the deepest table entry.
    #[error("Carter depth {depth} out of range")]
    CarterDepthOutOfRange { depth: f64 },

    /// Malformed Carter table file.
    #[error("invalid Carter table {path}: {message}")]
    CarterTable { path: PathBuf, message: String },

    /// Malformed correction table.
    #[error("correction table line {line}: {message}")]
    CorrectionTable { line: usize, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for MGD77 operations.
pub type Result<T> = std::result::Result<T, Mgd77Error>;

impl Mgd77Error {
    /// Create a bad argument error.
    pub fn bad_argument(message: impl Into<String>) -> Self {
        Self::BadArgument {
            message: message.into(),
        }
    }

    /// Create an invalid container error.
    pub fn invalid_container(message: impl Into<String>) -> Self {
        Self::InvalidContainer {
            message: message.into(),
        }
    }

    /// Create a not-MGD77+ error.
    pub fn not_mgd77plus(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::NotMgd77Plus {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a correction table error.
    pub fn correction_table(line: usize, message: impl Into<String>) -> Self {
        Self::CorrectionTable {
            line,
            message: message.into(),
        }
    }

    /// True for errors raised by a physical model lookup rather than file structure.
    #[must_use]
    pub fn is_model_domain(&self) -> bool {
        matches!(
            self,
            Self::BadIgrfDate { .. }
                | Self::LatitudeOutOfRange { .. }
                | Self::CarterBinOutOfRange { .. }
                | Self::CarterZoneOutOfRange { .. }
                | Self::CarterTwtOutOfRange { .. }
                | Self::CarterDepthOutOfRange { .. }
        )
    }
}
