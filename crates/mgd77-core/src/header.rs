//! Per-file header: parameters, derived metadata and the column catalog.

use serde::Serialize;

use crate::columns::Catalog;
use crate::params::HeaderParams;

/// Ten-degree box grid rows (latitude bands).
pub const TEN_BOX_ROWS: usize = 20;
/// Ten-degree box grid columns (longitude bands).
pub const TEN_BOX_COLS: usize = 38;

/// Which of the two header parameter sets to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParamSet {
    /// As originally submitted.
    Original,
    /// As revised after submission.
    Revised,
}

impl ParamSet {
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Original => 0,
            Self::Revised => 1,
        }
    }
}

/// Values derived from the data records themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meta {
    /// True once the fields below have been computed.
    pub verified: bool,
    /// Number of distinct ten-degree boxes visited.
    pub n_ten_box: usize,
    pub w: f64,
    pub e: f64,
    pub s: f64,
    pub n: f64,
    /// Departure year, month, day.
    pub departure: [i32; 3],
    /// Arrival year, month, day.
    pub arrival: [i32; 3],
    /// Visited ten-degree boxes, indexed `[lat band][lon band]`.
    #[serde(skip)]
    pub ten_box: [[bool; TEN_BOX_COLS]; TEN_BOX_ROWS],
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            verified: false,
            n_ten_box: 0,
            w: f64::NAN,
            e: f64::NAN,
            s: f64::NAN,
            n: f64::NAN,
            departure: [0; 3],
            arrival: [0; 3],
            ten_box: [[false; TEN_BOX_COLS]; TEN_BOX_ROWS],
        }
    }
}

/// Everything known about a file apart from its data values.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Header {
    /// Original and revised header parameters.
    pub params: [HeaderParams; 2],
    pub meta: Meta,
    /// Author of the last creation or modification.
    pub author: String,
    pub history: String,
    /// Encoded E77 error-check statement, if any.
    pub e77: Option<String>,
    pub n_records: usize,
    /// The file has no usable time column.
    pub no_time: bool,
    /// Precision depth recorder wrap period in seconds (0 = none).
    pub pdr_wrap: f64,
    pub catalog: Catalog,
}

impl Header {
    /// Header for a text-format file with `n_records` records.
    #[must_use]
    pub fn plain(params: HeaderParams, n_records: usize, with_quality_codes: bool) -> Self {
        Self {
            params: [params.clone(), params],
            n_records,
            catalog: Catalog::plain_mgd77(with_quality_codes),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn params(&self, which: ParamSet) -> &HeaderParams {
        &self.params[which.index()]
    }

    pub fn params_mut(&mut self, which: ParamSet) -> &mut HeaderParams {
        &mut self.params[which.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::item;

    #[test]
    fn test_plain_header_duplicates_params() {
        let mut params = HeaderParams::default();
        params.set(item::SURVEY_IDENTIFIER, "ABC");
        let mut header = Header::plain(params, 10, false);
        header
            .params_mut(ParamSet::Revised)
            .set(item::SURVEY_IDENTIFIER, "XYZ");
        assert_eq!(header.params(ParamSet::Original).get(item::SURVEY_IDENTIFIER), "ABC");
        assert_eq!(header.params(ParamSet::Revised).get(item::SURVEY_IDENTIFIER), "XYZ");
        assert_eq!(header.catalog.n_fields(), 23);
        assert!(!header.meta.verified);
    }
}
