//! Magnetic reference fields named by the MGD77 header code, with the years
//! each model is meant to cover.

use serde::Serialize;

/// Header code meaning "see the reference field name".
pub const NAMED_FIELD_CODE: i32 = 88;

/// One reference-field model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReferenceField {
    pub code: i32,
    pub model: &'static str,
    pub start: i32,
    pub end: i32,
}

impl ReferenceField {
    /// True when `year` lies within the model's validity range.
    #[must_use]
    pub fn covers(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

const fn field(code: i32, model: &'static str, start: i32, end: i32) -> ReferenceField {
    ReferenceField {
        code,
        model,
        start,
        end,
    }
}

/// Coded reference fields, indexed by code.
pub static REFERENCE_FIELDS: [ReferenceField; 18] = [
    field(0, "Unused", 0, 0),
    field(1, "AWC 70", 1965, 1975),
    field(2, "AWC 75", 1970, 1980),
    field(3, "IGRF-65", 1955, 1972),
    field(4, "IGRF-75", 1955, 1980),
    field(5, "GSFC-1266", 1960, 1968),
    field(6, "GSFC (POGO) 0674", 1960, 1973),
    field(7, "UK 75", 1955, 1980),
    field(8, "POGO 0368", 1960, 1968),
    field(9, "POGO 1068", 1960, 1968),
    field(10, "POGO 0869", 1960, 1968),
    field(11, "DGRF65", 1965, 1970),
    field(12, "DGRF70", 1970, 1975),
    field(13, "DGRF75", 1975, 1980),
    field(14, "DGRF80", 1980, 1985),
    field(15, "IGRF80", 1980, 1985),
    field(16, "IGRF85", 1985, 1990),
    field(17, "IGRF90", 1990, 1995),
];

/// Model for a header code in 1..=17.
#[must_use]
pub fn by_code(code: i32) -> Option<&'static ReferenceField> {
    usize::try_from(code)
        .ok()
        .filter(|&c| c > 0)
        .and_then(|c| REFERENCE_FIELDS.get(c))
}

/// Validity range of a named `IGRF-YY` or `IGRF-YYYY` model: the five years
/// ending at the model year. Two-digit years below 39 are in the 2000s.
#[must_use]
pub fn named_igrf(name: &str) -> Option<(i32, i32)> {
    let rest = name.trim().strip_prefix("IGRF")?;
    let rest = rest.strip_prefix(['-', ' ']).unwrap_or(rest);
    let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    let year: i32 = digits.parse().ok()?;
    let year = match year {
        y if y < 39 => 2000 + y,
        y if y < 100 => 1900 + y,
        y => y,
    };
    Some((year - 5, year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_index_table() {
        for (code, f) in REFERENCE_FIELDS.iter().enumerate() {
            assert_eq!(f.code as usize, code);
            assert!(f.start <= f.end);
        }
        assert_eq!(by_code(16).unwrap().model, "IGRF85");
        assert!(by_code(0).is_none());
        assert!(by_code(18).is_none());
        assert!(by_code(NAMED_FIELD_CODE).is_none());
    }

    #[test]
    fn test_named_models() {
        assert_eq!(named_igrf("IGRF-2005"), Some((2000, 2005)));
        assert_eq!(named_igrf("IGRF-95"), Some((1990, 1995)));
        assert_eq!(named_igrf("IGRF 10"), Some((2005, 2010)));
        assert_eq!(named_igrf("IGRF2000"), Some((1995, 2000)));
        assert_eq!(named_igrf("DGRF-85"), None);
        assert_eq!(named_igrf("IGRF-"), None);
    }

    #[test]
    fn test_covers() {
        let f = by_code(12).unwrap();
        assert!(f.covers(1970) && f.covers(1975));
        assert!(!f.covers(1976));
    }
}
