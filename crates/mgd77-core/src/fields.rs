//! Static definitions of the canonical MGD77 data fields.
//!
//! The table merges two views of each field: its position in the
//! 120-character punch-card record, and its default storage rules in
//! MGD77+ containers.

use crate::codec::StorageKind;

/// Length of one fixed-width data record.
pub const RECORD_LENGTH: usize = 120;
/// Length of one fixed-width header record.
pub const HEADER_LENGTH: usize = 80;
/// Number of header records in an MGD77 file.
pub const N_HEADER_RECORDS: usize = 24;
/// Two-digit years below this pivot belong to the 21st century.
pub const OLDEST_YY: u32 = 39;

/// Fields in a punch-card data record.
pub const N_DATA_FIELDS: usize = 27;
/// Fields including time and the three MGD77T quality codes.
pub const N_DATA_EXTENDED: usize = 31;
/// Numeric fields at the front of the punch-card record.
pub const N_NUMBER_FIELDS: usize = 24;
/// Text fields (id, sln, sspn).
pub const N_STRING_FIELDS: usize = 3;

/// Maximum columns in one set.
pub const SET_COLS: usize = 32;
/// Number of column sets.
pub const N_SETS: usize = 2;

/// Fill text for missing string fields.
pub const ALL_NINES: &str = "9999999999";

pub const DRT: usize = 0;
pub const TZ: usize = 1;
pub const YEAR: usize = 2;
pub const MONTH: usize = 3;
pub const DAY: usize = 4;
pub const HOUR: usize = 5;
pub const MIN: usize = 6;
pub const LATITUDE: usize = 7;
pub const LONGITUDE: usize = 8;
pub const PTC: usize = 9;
pub const TWT: usize = 10;
pub const DEPTH: usize = 11;
pub const BCC: usize = 12;
pub const BTC: usize = 13;
pub const MTF1: usize = 14;
pub const MTF2: usize = 15;
pub const MAG: usize = 16;
pub const MSENS: usize = 17;
pub const DIUR: usize = 18;
pub const MSD: usize = 19;
pub const GOBS: usize = 20;
pub const EOT: usize = 21;
pub const FAA: usize = 22;
pub const NQC: usize = 23;
pub const ID: usize = 24;
pub const SLN: usize = 25;
pub const SSPN: usize = 26;
pub const TIME: usize = 27;
pub const BQC: usize = 28;
pub const MQC: usize = 29;
pub const GQC: usize = 30;

/// Presence bit for field `index`.
#[must_use]
pub const fn bit(index: usize) -> u32 {
    1 << index
}

/// year, month, day, hour and min all present.
pub const TIME_BITS: u32 = bit(YEAR) | bit(MONTH) | bit(DAY) | bit(HOUR) | bit(MIN);
/// Geophysical observations.
pub const GEOPHYSICAL_BITS: u32 =
    bit(TWT) | bit(DEPTH) | bit(MTF1) | bit(MTF2) | bit(MAG) | bit(GOBS) | bit(FAA);
/// Correction terms.
pub const CORRECTION_BITS: u32 = bit(DIUR) | bit(MSD) | bit(EOT);
/// Fields whose not-given text decodes to NaN rather than a number.
pub const FLOAT_BITS: u32 = GEOPHYSICAL_BITS | CORRECTION_BITS | TIME_BITS;
/// The three text fields.
pub const STRING_BITS: u32 = bit(ID) | bit(SLN) | bit(SSPN);

/// Static definition of one canonical field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDef {
    /// Short column name.
    pub abbrev: &'static str,
    /// Display name.
    pub name: &'static str,
    /// 1-based start column in the punch-card record (0 if not stored there).
    pub start: usize,
    /// Width in the punch-card record.
    pub length: usize,
    /// Print with an explicit sign.
    pub signed: bool,
    /// Multiply physical value by this to get the punch-card integer.
    pub factor: f64,
    /// Punch-card text meaning "not given".
    pub not_given: &'static str,
    /// Default MGD77+ storage type.
    pub storage: StorageKind,
    /// Characters per value for text fields, 0 for numbers.
    pub text_len: usize,
    /// Default MGD77+ scale factor.
    pub scale: f64,
    /// Default MGD77+ offset.
    pub offset: f64,
    /// Physical units.
    pub units: &'static str,
    /// Descriptive comment.
    pub comment: &'static str,
}

const QC_COMMENT: &str = "Good (1), Fair (2), (3) Poor, (4) Bad, Suspected Bad by .. (5) Contributor, (6) Data Center [Unspecified]";
const CODE_COMMENT: &str = "Observed (1), Interpolated (3), or Unspecified (9)";
const SEISMIC_COMMENT: &str = "For cross-referencing with seismic data";

#[allow(clippy::too_many_arguments)]
const fn def(
    abbrev: &'static str,
    name: &'static str,
    start: usize,
    length: usize,
    signed: bool,
    factor: f64,
    not_given: &'static str,
    storage: StorageKind,
    scale: f64,
    units: &'static str,
    comment: &'static str,
) -> FieldDef {
    FieldDef {
        abbrev,
        name,
        start,
        length,
        signed,
        factor,
        not_given,
        storage,
        text_len: 0,
        scale,
        offset: 0.0,
        units,
        comment,
    }
}

const fn text(abbrev: &'static str, name: &'static str, start: usize, length: usize, comment: &'static str) -> FieldDef {
    FieldDef {
        abbrev,
        name,
        start,
        length,
        signed: false,
        factor: 1.0,
        not_given: "",
        storage: StorageKind::Char,
        text_len: length,
        scale: 1.0,
        offset: 0.0,
        units: "",
        comment,
    }
}

/// Every canonical field, indexed by the constants above.
pub static FIELDS: [FieldDef; N_DATA_EXTENDED] = [
    def("drt", "Data Record Type", 1, 1, false, 1.0, "5", StorageKind::Byte, 1.0, "", "Normally 5"),
    def("tz", "Time Zone Corr", 10, 3, true, 1.0, "+99", StorageKind::Byte, 1.0, "hours", "-13 to +12 inclusive"),
    def("year", "Year", 13, 4, false, 1.0, "9999", StorageKind::Byte, 1.0, "year", "Year of the survey"),
    def("month", "Month", 17, 2, false, 1.0, "99", StorageKind::Byte, 1.0, "month", "1 to 12 inclusive"),
    def("day", "Day", 19, 2, false, 1.0, "99", StorageKind::Byte, 1.0, "day", "1 to 31 inclusive"),
    def("hour", "Hour", 21, 2, false, 1.0, "99", StorageKind::Byte, 1.0, "hour", "0 to 23 inclusive"),
    def("min", "Minutes", 23, 5, false, 1000.0, "99999", StorageKind::Int, 1.0e-3, "min", "Decimal minutes with 0.001 precision, 0 to 59.999"),
    def("lat", "Latitude", 28, 8, true, 100_000.0, "+9999999", StorageKind::Int, 1.0e-7, "degrees_north", "Negative south of Equator"),
    def("lon", "Longitude", 36, 9, true, 100_000.0, "+99999999", StorageKind::Int, 2.0e-7, "degrees_east", "Negative west of Greenwich"),
    def("ptc", "Position Type Code", 45, 1, false, 1.0, "9", StorageKind::Byte, 1.0, "", CODE_COMMENT),
    def("twt", "Two-Way Travel Time", 46, 6, false, 10_000.0, "999999", StorageKind::Int, 1.0e-8, "second", "Corrected for transducer depth, etc."),
    def("depth", "Corrected Depth", 52, 6, false, 10.0, "999999", StorageKind::Int, 1.0e-5, "meter", "Corrected for sound velocity variations (if known)"),
    def("bcc", "Bathymetric Correction Code", 58, 2, false, 1.0, "99", StorageKind::Byte, 1.0, "", "01-55 (= Matthew's zone), 59 (Matthew's zone unknown), 60 (Kuwahara), 61 (Wilson), 62 (Del Grosso) 63 (Carter), 88 (Other; see header), 98 (Unknown), or 99 (Unspecified)"),
    def("btc", "Bathymetric Type Code", 60, 1, false, 1.0, "9", StorageKind::Byte, 1.0, "", CODE_COMMENT),
    def("mtf1", "Magnetics Total Field 1", 61, 6, false, 10.0, "999999", StorageKind::Int, 1.0e-4, "gamma", "Leading sensor"),
    def("mtf2", "Magnetics Total Field 2", 67, 6, false, 10.0, "999999", StorageKind::Int, 1.0e-4, "gamma", "Trailing sensor"),
    def("mag", "Magnetics Residual Field", 73, 6, true, 10.0, "+99999", StorageKind::Short, 1.0e-1, "gamma", "Corrected for reference field (see header)"),
    def("msens", "Sensor For Residual Field", 79, 1, false, 1.0, "9", StorageKind::Byte, 1.0, "", "Magnetic sensor used: 1, 2, or Unspecified (9)"),
    def("diur", "Magnetics Diurnal Correction", 80, 5, true, 10.0, "+9999", StorageKind::Short, 1.0e-1, "gamma", "Already applied to data"),
    def("msd", "Depth Or Altitude Of Sensor", 85, 6, true, 1.0, "+99999", StorageKind::Short, 1.0, "meter", "Positive below sealevel"),
    FieldDef {
        offset: 980_000.0,
        ..def("gobs", "Observed Gravity", 91, 7, false, 10.0, "9999999", StorageKind::Int, 1.0e-5, "mGal", "Corrected for Eotvos, drift, and tares")
    },
    def("eot", "Eotvos Correction", 98, 6, true, 10.0, "+99999", StorageKind::Short, 1.0e-1, "mGal", "7.5 V cos (lat) sin (azim) + 0.0042 V*V"),
    def("faa", "Free-Air Anomaly", 104, 5, true, 10.0, "+9999", StorageKind::Short, 1.0e-1, "mGal", "Observed - theoretical"),
    def("nqc", "Navigation Quality Code", 120, 1, false, 1.0, "9", StorageKind::Byte, 1.0, "", "Suspected by (5) source agency, (6) NGDC, or no problems found (9)"),
    text("id", "Survey Identifier", 2, 8, "Identical to ID in header"),
    text("sln", "Seismic Line Number", 109, 5, SEISMIC_COMMENT),
    text("sspn", "Seismic Shot-Point Number", 114, 6, SEISMIC_COMMENT),
    def("time", "Time", 0, 0, false, 1.0, "", StorageKind::Double, 1.0, "seconds since 1970-01-01 00:00:00 0", "UTC time, subtract TZ to get ship local time"),
    def("bqc", "Bathymetry Quality Code", 0, 0, false, 1.0, "", StorageKind::Byte, 1.0, "", QC_COMMENT),
    def("mqc", "Magnetics Quality Code", 0, 0, false, 1.0, "", StorageKind::Byte, 1.0, "", QC_COMMENT),
    def("gqc", "Gravity Quality Code", 0, 0, false, 1.0, "", StorageKind::Byte, 1.0, "", QC_COMMENT),
];

/// Index of a canonical field by abbreviation.
#[must_use]
pub fn field_index(abbrev: &str) -> Option<usize> {
    FIELDS.iter().position(|f| f.abbrev == abbrev)
}

/// True if `abbrev` names a column of the legacy set.
///
/// The legacy set holds the 27 punch-card fields, the synthesized time
/// and the MGD77T quality codes; everything else is an extended column.
#[must_use]
pub fn is_legacy_abbrev(abbrev: &str) -> bool {
    field_index(abbrev).is_some()
}

/// Column order line written after the header of TBL files.
pub const TBL_COLUMN_HEADER: &str = "#rec\tTZ\tyear\tmonth\tday\thour\tmin\tlat\t\tlon\t\tptc\ttwt\tdepth\tbcc\tbtc\tmtf1\tmtf2\tmag\tmsens\tdiur\tmsd\tgobs\teot\tfaa\tnqc\tid\tsln\tsspn";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_table_is_aligned_with_indices() {
        assert_eq!(FIELDS[LATITUDE].abbrev, "lat");
        assert_eq!(FIELDS[GOBS].offset, 980_000.0);
        assert_eq!(FIELDS[ID].text_len, 8);
        assert_eq!(FIELDS[TIME].storage, StorageKind::Double);
        assert_eq!(field_index("gqc"), Some(GQC));
        assert_eq!(field_index("foo"), None);
    }

    #[test]
    fn test_punch_card_fields_cover_record() {
        let covered: usize = FIELDS[..N_DATA_FIELDS].iter().map(|f| f.length).sum();
        assert_eq!(covered, RECORD_LENGTH);
        for f in &FIELDS[..N_DATA_FIELDS] {
            assert!(f.start + f.length - 1 <= RECORD_LENGTH, "{}", f.abbrev);
            if f.text_len == 0 {
                assert_eq!(f.not_given.len(), f.length, "{}", f.abbrev);
            }
        }
    }

    #[test]
    fn test_bit_masks() {
        assert_eq!(TIME_BITS, 124);
        assert_eq!(GEOPHYSICAL_BITS, 5_360_640);
        assert_eq!(CORRECTION_BITS, 2_883_584);
    }
}
