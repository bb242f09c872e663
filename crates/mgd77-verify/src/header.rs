//! Header verification: every checked header item against its allowed
//! codes or ranges and against [`Meta`] recomputed from the data.
//!
//! Checks are grouped by the header record (sequence number) the item lives
//! in; the diagnostic code is `H<record>-<check>`.

use chrono::Datelike;
use tracing::debug;

use mgd77_core::fields::OLDEST_YY;
use mgd77_core::header::{TEN_BOX_COLS, TEN_BOX_ROWS};
use mgd77_core::params::item;
use mgd77_core::{Dataset, HeaderParams, Meta, Mgd77Error, ParamSet, Result};
use mgd77_models::reffield::{self, NAMED_FIELD_CODE};

use crate::diagnostic::{Diagnostic, Severity, VerificationReport, Verbosity};
use crate::meta::{compute_meta, quadrant_code};

/// The only data record layout MGD77 allows.
pub const FORMAT_DESCRIPTION: &str = "(I1,A8,I3,I4,3I2,F5.3,F8.5,F9.5,I1,F6.4,F6.1,I2,I1,3F6.1,I1,F5.1,F6.0,F7.1,F6.1,F5.1,A5,A6,I1)";

/// Highest magnetic reference field code accepted (future IGRF ids).
pub const LAST_REF_FIELD_CODE: i64 = 20;

/// Earliest acceptable survey or file-creation year.
const OLDEST_YEAR: i64 = 1900 + OLDEST_YY as i64;

const PARAMETER_NAMES: [&str; 5] = ["Bathy", "Magnetics", "Gravity", "3.5 kHz", "Seismics"];

/// Leading integer of `text` the way C `atoi` reads it; 0 when there is none.
fn atoi(text: &str) -> i64 {
    let t = text.trim_start();
    let (sign, digits) = match t.as_bytes().first() {
        Some(b'-') => (-1, &t[1..]),
        Some(b'+') => (1, &t[1..]),
        _ => (1, t),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    sign * digits[..end].parse::<i64>().unwrap_or(0)
}

/// Like [`atoi`] but anything other than blanks, signs and digits yields
/// -9999.
fn strict_atoi(text: &str) -> i64 {
    let body = text.trim_start_matches([' ', '-', '+']);
    if body.chars().all(|c| c.is_ascii_digit()) {
        atoi(text)
    } else {
        -9999
    }
}

/// True when a fixed-width field is filled entirely with zeros, nines or
/// question marks.
fn wrong_filler(value: &str, width: usize) -> bool {
    value.len() == width
        && [b'0', b'9', b'?']
            .iter()
            .any(|&fill| value.bytes().all(|b| b == fill))
}

/// Verifies cruise headers for one NGDC identifier.
#[derive(Debug, Clone)]
pub struct HeaderVerifier {
    ngdc_id: String,
    current_year: i64,
    verbosity: Verbosity,
}

impl HeaderVerifier {
    pub fn new(ngdc_id: impl Into<String>) -> Self {
        Self {
            ngdc_id: ngdc_id.into(),
            current_year: i64::from(chrono::Utc::now().year()),
            verbosity: Verbosity::default(),
        }
    }

    /// Latest acceptable creation/survey year (defaults to this year).
    #[must_use]
    pub fn with_current_year(mut self, year: i32) -> Self {
        self.current_year = i64::from(year);
        self
    }

    #[must_use]
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Compute the dataset's [`Meta`] and verify the chosen parameter set.
    pub fn verify_dataset(&self, dataset: &Dataset, which: ParamSet) -> Result<VerificationReport> {
        let meta = compute_meta(dataset)?;
        self.verify(dataset.header.params(which), &meta)
    }

    /// Verify `params` against static rules and the data-derived `meta`.
    ///
    /// `meta` must come from [`compute_meta`].
    pub fn verify(&self, params: &HeaderParams, meta: &Meta) -> Result<VerificationReport> {
        if !meta.verified {
            return Err(Mgd77Error::bad_argument(
                "header metadata must be computed from the data before verification",
            ));
        }
        let mut run = Run {
            p: params,
            meta,
            ngdc_id: &self.ngdc_id,
            current_year: self.current_year,
            verbosity: self.verbosity,
            report: VerificationReport::new(self.ngdc_id.clone()),
        };
        run.identification();
        run.platform();
        run.survey_dates();
        run.format();
        run.bounding_box();
        run.bathymetry();
        let ref_code = run.magnetics();
        run.reference_field_window(ref_code);
        run.gravity();
        run.base_stations();
        run.ten_degree_identifiers();
        debug!(
            cruise = %self.ngdc_id,
            warnings = run.report.warnings,
            errors = run.report.errors,
            "header verified"
        );
        Ok(run.report)
    }
}

struct Run<'a> {
    p: &'a HeaderParams,
    meta: &'a Meta,
    ngdc_id: &'a str,
    current_year: i64,
    verbosity: Verbosity,
    report: VerificationReport,
}

impl<'a> Run<'a> {
    fn push(&mut self, diagnostic: Diagnostic) {
        self.report.push(diagnostic, self.verbosity);
    }

    fn get(&self, index: usize) -> &'a str {
        self.p.get(index)
    }

    /// A numeric rate or distance that is out of range: an error when the
    /// field holds filler characters, otherwise a warning.
    fn range_check(&mut self, record: u8, check: u8, index: usize, width: usize, label: &str, bad: impl Fn(i64) -> bool) {
        let value = self.get(index);
        if value.is_empty() || !bad(strict_atoi(value)) {
            return;
        }
        let diagnostic = if wrong_filler(value, width) {
            Diagnostic::error(record, check, format!("Invalid {label}: ({value}) [{}]", " ".repeat(width))).certain()
        } else {
            Diagnostic::warning(record, check, format!("Invalid {label}: ({value}) [{value:>width$}]"))
        };
        self.push(diagnostic);
    }

    /// Sequence 01: record type, identifiers, parameter codes, creation date.
    fn identification(&mut self) {
        let record_type = self.get(item::RECORD_TYPE);
        if !matches!(record_type, "1" | "4") {
            self.push(Diagnostic::error(1, 1, format!("Invalid Record Type: ({record_type}) [4]")).certain());
        }
        if self.get(item::SURVEY_IDENTIFIER).is_empty() {
            self.push(Diagnostic::error(1, 2, "Survey Identifier missing: () [        ]"));
        }
        let acronym = self.get(item::FORMAT_ACRONYM);
        if !matches!(acronym, "MGD77" | "MGD77T") {
            self.push(Diagnostic::error(1, 3, format!("Invalid Format Acronym: ({acronym}) [MGD77]")).certain());
        }
        let number = self.get(item::DATA_CENTER_FILE_NUMBER);
        if number != self.ngdc_id {
            let message = format!("Invalid Data Center File Number: ({number}) [{}]", self.ngdc_id);
            self.push(Diagnostic::error(1, 4, message));
        }

        let codes: Vec<char> = self.get(item::PARAMETERS_SURVEYED_CODE).chars().collect();
        for (k, name) in PARAMETER_NAMES.iter().enumerate() {
            let code = codes.get(k).copied().unwrap_or(' ');
            if !matches!(code, ' ' | '0' | '1' | '3' | '5') {
                let message = format!("Invalid Parameter Survey Code ({name}): ({code}) [ ]");
                self.push(Diagnostic::error(1, 5 + k as u8, message));
            }
        }

        let year = self.get(item::FILE_CREATION_YEAR);
        if !year.is_empty() && !(OLDEST_YEAR..=self.current_year).contains(&atoi(year)) {
            self.push(Diagnostic::error(1, 10, format!("Invalid File Creation Year: ({year}) [    ]")));
        }
        let month = self.get(item::FILE_CREATION_MONTH);
        if !month.is_empty() && !(1..=12).contains(&atoi(month)) {
            self.push(Diagnostic::error(1, 11, format!("Invalid File Creation Month: ({month}) [  ]")));
        }
        let day = self.get(item::FILE_CREATION_DAY);
        if !day.is_empty() && !(1..=31).contains(&atoi(day)) {
            self.push(Diagnostic::error(1, 12, format!("Invalid File Creation Day: ({day}) [  ]")));
        }
    }

    /// Sequence 02.
    fn platform(&mut self) {
        let code = self.get(item::PLATFORM_TYPE_CODE);
        if !(code.len() == 1 && code.as_bytes()[0].is_ascii_digit()) {
            self.push(Diagnostic::error(2, 3, format!("Invalid Platform Type Code: ({code}) [0]")));
        }
    }

    /// Sequence 04: departure and arrival dates, also against the data.
    fn survey_dates(&mut self) {
        let checks = [
            (item::SURVEY_DEPARTURE_YEAR, 1, "Departure Year", self.meta.departure[0]),
            (item::SURVEY_DEPARTURE_MONTH, 2, "Departure Month", self.meta.departure[1]),
            (item::SURVEY_DEPARTURE_DAY, 3, "Departure Day", self.meta.departure[2]),
            (item::SURVEY_ARRIVAL_YEAR, 4, "Arrival Year", self.meta.arrival[0]),
            (item::SURVEY_ARRIVAL_MONTH, 5, "Arrival Month", self.meta.arrival[1]),
            (item::SURVEY_ARRIVAL_DAY, 6, "Arrival Day", self.meta.arrival[2]),
        ];
        for (index, check, label, derived) in checks {
            let value = self.get(index);
            if value.is_empty() {
                continue;
            }
            let (low, high, width) = match check {
                1 | 4 => (OLDEST_YEAR, self.current_year, 4),
                2 | 5 => (1, 12, 2),
                _ => (1, 31, 2),
            };
            let n = atoi(value);
            let derived = i64::from(derived);
            if (low..=high).contains(&n) && (derived == 0 || n == derived) {
                continue;
            }
            let expected = if derived == 0 {
                " ".repeat(width)
            } else {
                format!("{derived:0width$}")
            };
            let message = format!("Invalid Survey {label}: ({value}) [{expected}]");
            self.push(Diagnostic::error(4, check, message));
        }
    }

    /// Sequence 10: the data record format.
    fn format(&mut self) {
        let kind = self.get(item::FORMAT_TYPE);
        if kind != "A" {
            self.push(Diagnostic::error(10, 1, format!("Invalid Format Type: ({kind}) [A]")).certain());
        }
        let description = self.get(item::FORMAT_DESCRIPTION);
        if description.to_ascii_uppercase() != FORMAT_DESCRIPTION {
            let message = format!("Invalid Format Description: ({description}) [{FORMAT_DESCRIPTION}]");
            self.push(Diagnostic::error(10, 2, message).certain());
        }
    }

    /// Sequence 11: bounding box against the data extent.
    fn bounding_box(&mut self) {
        let north = self.bound(item::TOPMOST_LATITUDE, 2, "Topmost Latitude ", 90, self.meta.n, 2);
        let south = self.bound(item::BOTTOMMOST_LATITUDE, 3, "Bottommost Latitude", 90, self.meta.s, 2);
        if let (Some(s), Some(n)) = (south, north)
            && s > n
        {
            let message = format!("Bottommost Latitude {s} exceeds Topmost Latitude {n}");
            self.push(Diagnostic::error(11, 4, message));
        }
        self.bound(item::LEFTMOST_LONGITUDE, 5, "Leftmost Longitude", 180, self.meta.w, 3);
        self.bound(item::RIGHTMOST_LONGITUDE, 6, "Rightmost Longitude", 180, self.meta.e, 3);
    }

    fn bound(&mut self, index: usize, check: u8, label: &str, limit: i64, derived: f64, digits: usize) -> Option<i64> {
        let value = self.get(index);
        if value.is_empty() {
            return None;
        }
        let n = strict_atoi(value);
        let mismatch = !derived.is_nan() && n as f64 != derived;
        if !(-limit..=limit).contains(&n) || mismatch {
            let expected = if derived.is_nan() {
                String::new()
            } else {
                format!("{:+0w$}", derived as i64, w = digits + 1)
            };
            self.push(Diagnostic::error(11, check, format!("Invalid {label}: ({value}) [{expected}]")));
        }
        Some(n)
    }

    /// Sequence 12.
    fn bathymetry(&mut self) {
        self.range_check(12, 1, item::BATHYMETRY_DIGITIZING_RATE, 3, "Bathymetry Digitizing Rate", |i| {
            i <= 0 || i >= 300
        });

        // tenths of m/s
        let velocity = self.get(item::BATHYMETRY_ASSUMED_SOUND_VELOCITY);
        if !velocity.is_empty() {
            let i = atoi(velocity);
            if !(14_000..=15_500).contains(&i) {
                let filler = wrong_filler(velocity, 5);
                let severity = if filler { Severity::Error } else { Severity::Warning };
                let label = "Invalid Bathymetry Assumed Sound Velocity";
                let diagnostic = if i > 1400 && i < 1550 {
                    Diagnostic::new(severity, 12, 3, format!("{label}: ({velocity}) [{i}0]"))
                } else if i == 8000 {
                    Diagnostic::new(severity, 12, 3, format!("{label}: ({velocity}) [14630]"))
                } else if filler {
                    Diagnostic::new(severity, 12, 3, format!("{label}: ({velocity}) [     ]")).certain()
                } else {
                    Diagnostic::new(severity, 12, 3, format!("{label}: ({velocity}) [{velocity:>5}]"))
                };
                self.push(diagnostic);
            }
        }

        let datum = self.get(item::BATHYMETRY_DATUM_CODE);
        if !datum.is_empty() {
            let i = strict_atoi(datum);
            if !((0..=11).contains(&i) || i == 88) {
                let label = "Invalid Bathymetry Datum Code";
                self.push(if i == 99 {
                    Diagnostic::error(12, 4, format!("{label}: ({datum}) [  ]")).certain()
                } else {
                    Diagnostic::warning(12, 4, format!("{label}: ({datum}) [{datum:>2}]"))
                });
            }
        }
    }

    /// Sequence 13. Returns the reference field code when it is usable for
    /// the time window check.
    fn magnetics(&mut self) -> Option<i64> {
        self.range_check(13, 1, item::MAGNETICS_DIGITIZING_RATE, 3, "Magnetics Digitizing Rate", |i| {
            !(0..300).contains(&i)
        });
        self.range_check(13, 2, item::MAGNETICS_SAMPLING_RATE, 2, "Magnetics Sampling Rate", |i| {
            !(0..=60).contains(&i)
        });
        self.range_check(13, 3, item::MAGNETICS_SENSOR_TOW_DISTANCE, 4, "Magnetics Sensor Tow Distance", |i| i < 0);
        self.range_check(13, 4, item::MAGNETICS_SENSOR_DEPTH, 5, "Magnetics Sensor Depth", |i| i < 0);
        self.range_check(13, 5, item::MAGNETICS_SENSOR_SEPARATION, 3, "Magnetics Sensor Separation", |i| i < 0);

        let code_text = self.get(item::MAGNETICS_REF_FIELD_CODE);
        if code_text.is_empty() {
            return None;
        }
        let code = strict_atoi(code_text);
        if !((0..=LAST_REF_FIELD_CODE).contains(&code) || code == i64::from(NAMED_FIELD_CODE)) {
            let label = "Invalid Magnetics Reference Field Code";
            self.push(if code == 99 {
                Diagnostic::error(13, 6, format!("{label}: ({code_text}) [00]")).certain()
            } else {
                Diagnostic::warning(13, 6, format!("{label}: ({code_text}) [{code_text:>2}]"))
            });
            return None;
        }
        if code == i64::from(NAMED_FIELD_CODE) && self.get(item::MAGNETICS_REF_FIELD).is_empty() {
            self.push(Diagnostic::error(
                13,
                7,
                "Invalid Magnetics Ref Code == 88 but no Ref Field specified [00]",
            ));
        }
        Some(code)
    }

    /// Survey years must fall inside the reference field's validity window.
    fn reference_field_window(&mut self, code: Option<i64>) {
        let Some(code) = code else { return };
        let year = |derived: i32, index: usize| {
            if derived != 0 {
                i64::from(derived)
            } else {
                atoi(self.get(index))
            }
        };
        let first = year(self.meta.departure[0], item::SURVEY_DEPARTURE_YEAR);
        let last = year(self.meta.arrival[0], item::SURVEY_ARRIVAL_YEAR);
        if first == 0 || last == 0 {
            return;
        }

        let (model, start, end) = if code == i64::from(NAMED_FIELD_CODE) {
            let name = self.get(item::MAGNETICS_REF_FIELD);
            match reffield::named_igrf(name) {
                Some((start, end)) => (name.to_string(), i64::from(start), i64::from(end)),
                None => {
                    self.push(Diagnostic::warning(13, 9, format!("Unknown IGRF specified ({name})")).certain());
                    return;
                }
            }
        } else {
            let Some(field) = i32::try_from(code).ok().and_then(reffield::by_code) else {
                return;
            };
            (field.model.to_string(), i64::from(field.start), i64::from(field.end))
        };

        if first < start || last > end {
            let span = if first == last {
                first.to_string()
            } else {
                format!("{first}-{last}")
            };
            let message =
                format!("Survey year ({span}) outside magnetic reference field {model} time range ({start}-{end})");
            self.push(Diagnostic::warning(13, 10, message).certain());
        }
    }

    /// Sequence 14.
    fn gravity(&mut self) {
        self.range_check(14, 1, item::GRAVITY_DIGITIZING_RATE, 3, "Gravity Digitizing Rate", |i| {
            !(0..=300).contains(&i)
        });
        self.range_check(14, 2, item::GRAVITY_SAMPLING_RATE, 2, "Gravity Sampling Rate", |i| {
            !(0..=98).contains(&i)
        });

        let formula = self.get(item::GRAVITY_THEORETICAL_FORMULA_CODE);
        if let Some(c) = formula.chars().next()
            && !matches!(c, '1'..='4' | '8')
        {
            let label = "Invalid Gravity Theoretical Formula Code";
            self.push(if c == '9' {
                Diagnostic::error(14, 3, format!("{label}: ({c}) [ ]")).certain()
            } else {
                Diagnostic::error(14, 3, format!("{label}: ({c}) [{c}]"))
            });
        }

        let system = self.get(item::GRAVITY_REFERENCE_SYSTEM_CODE);
        if let Some(c) = system.chars().next()
            && !matches!(c, '1'..='3' | '9')
        {
            let message = format!("Invalid Gravity Reference System Code: ({c}) [{c}]");
            self.push(Diagnostic::error(14, 5, message));
        }
    }

    /// Sequence 15: base station values in tenths of mGal.
    fn base_stations(&mut self) {
        for (index, check, label) in [
            (item::GRAVITY_DEPARTURE_BASE_STATION, 1, "Departure"),
            (item::GRAVITY_ARRIVAL_BASE_STATION, 3, "Arrival"),
        ] {
            let value = self.get(index);
            if value.is_empty() {
                continue;
            }
            let i = atoi(value);
            if (9_700_000..=9_900_000).contains(&i) {
                continue;
            }
            let filler = wrong_filler(value, 7);
            let severity = if filler { Severity::Error } else { Severity::Warning };
            let text = format!("Invalid Gravity {label} Base Station Value: ({value})");
            let diagnostic = if i > 970_000 && i < 990_000 {
                // off by a factor of ten
                Diagnostic::new(severity, 15, check, format!("{text} [{i}0]"))
            } else if filler {
                Diagnostic::new(severity, 15, check, format!("{text} [       ]")).certain()
            } else {
                Diagnostic::new(severity, 15, check, format!("{text} [{value:>7}]"))
            };
            self.push(diagnostic);
        }
    }

    /// Sequence 16: declared ten-degree boxes against the boxes crossed.
    fn ten_degree_identifiers(&mut self) {
        let count_text = self.get(item::NUMBER_OF_TEN_DEGREE_IDENTIFIERS);
        let mut declared = 0;
        if !count_text.is_empty() {
            declared = atoi(count_text);
            if !(1..=30).contains(&declared) || declared != self.meta.n_ten_box as i64 {
                let message = format!(
                    "Invalid Number of Ten Degree Identifiers: ({count_text}) [{}]",
                    self.meta.n_ten_box
                );
                self.push(Diagnostic::error(16, 1, message));
            }
        }

        // +1 for crossed, -1 for declared; a perfect match leaves zeros
        let mut tally = [[0i32; TEN_BOX_COLS]; TEN_BOX_ROWS];
        for (row, cells) in self.meta.ten_box.iter().enumerate() {
            for (col, &crossed) in cells.iter().enumerate() {
                tally[row][col] = i32::from(crossed);
            }
        }

        let list = self.get(item::TEN_DEGREE_IDENTIFIER);
        let mut n_block = 0usize;
        for token in list.split(',').map(str::trim) {
            if token == "9999" {
                if declared != 0 && n_block as i64 != declared {
                    let message = format!("Invalid Number of Ten Degree Identifiers: ({n_block}) [{declared}]");
                    self.push(Diagnostic::error(16, 2, message));
                    declared = 0;
                }
                continue;
            }
            if token.is_empty() || token == "0" {
                continue;
            }
            n_block += 1;
            let bytes = token.as_bytes();
            let quadrant = bytes[0];
            let lat_band = bytes.get(1).copied().unwrap_or(b' ');
            let lon_band = token.get(2..).map_or(-9999, strict_atoi);

            let mut valid = true;
            if !matches!(quadrant, b'1' | b'3' | b'5' | b'7') {
                let message = format!("Invalid Ten Degree Identifier quadrant: ({token})");
                self.push(Diagnostic::error(16, 3, message).at_entry(n_block));
                valid = false;
            }
            if !lat_band.is_ascii_digit() {
                let message = format!("Invalid Ten Degree Identifier latitude: ({token})");
                self.push(Diagnostic::error(16, 4, message).at_entry(n_block));
                valid = false;
            }
            if !(0..=18).contains(&lon_band) {
                let message = format!("Invalid Ten Degree Identifier longitude: ({token})");
                self.push(Diagnostic::error(16, 5, message).at_entry(n_block));
                valid = false;
            }
            if !valid {
                continue;
            }
            let mut col = lon_band as usize;
            if matches!(quadrant, b'1' | b'3') {
                col += 19;
            }
            let mut row = usize::from(lat_band - b'0');
            if matches!(quadrant, b'1' | b'7') {
                row += 10;
            }
            tally[row][col] -= 1;
        }

        for (row, cells) in tally.iter().enumerate() {
            for (col, &count) in cells.iter().enumerate() {
                let code = quadrant_code(row, col);
                let message = match count {
                    0 => continue,
                    c if c > 0 => format!("Ten Degree Identifier {code} not marked in header but block was crossed"),
                    _ => format!("Ten Degree Identifier {code} marked in header but was not crossed"),
                };
                self.push(Diagnostic::warning(16, 6, message).certain());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atoi_variants() {
        assert_eq!(atoi("  42xyz"), 42);
        assert_eq!(atoi("-17"), -17);
        assert_eq!(atoi("abc"), 0);
        assert_eq!(strict_atoi("+05"), 5);
        assert_eq!(strict_atoi("-3"), -3);
        assert_eq!(strict_atoi("4a"), -9999);
        assert_eq!(strict_atoi(""), 0);
    }

    #[test]
    fn test_wrong_filler() {
        assert!(wrong_filler("999", 3));
        assert!(wrong_filler("0000000", 7));
        assert!(wrong_filler("??", 2));
        assert!(!wrong_filler("99", 3));
        assert!(!wrong_filler("909", 3));
    }
}
