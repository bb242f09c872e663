//! One decoded data record of the punch-card layout.

use std::borrow::Cow;

use crate::fields::{self, N_DATA_EXTENDED, N_STRING_FIELDS, OLDEST_YY};

/// Numeric slots, text words, absolute time and presence bits of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRecord {
    /// Physical values indexed by field; the time slot holds absolute time.
    pub number: [f64; N_DATA_EXTENDED],
    /// id, sln, sspn.
    pub words: [String; N_STRING_FIELDS],
    /// Bit `i` set when field `i` was present.
    pub bit_pattern: u32,
}

impl Default for DataRecord {
    fn default() -> Self {
        Self {
            number: [f64::NAN; N_DATA_EXTENDED],
            words: Default::default(),
            bit_pattern: 0,
        }
    }
}

impl DataRecord {
    /// Absolute time, NaN when not available.
    #[must_use]
    pub fn time(&self) -> f64 {
        self.number[fields::TIME]
    }

    /// Text of string field `index` (id, sln or sspn).
    #[must_use]
    pub fn word(&self, index: usize) -> &str {
        index
            .checked_sub(fields::ID)
            .and_then(|k| self.words.get(k))
            .map_or("", String::as_str)
    }

    /// True when field `index` was present in the record.
    #[must_use]
    pub fn has(&self, index: usize) -> bool {
        self.bit_pattern & fields::bit(index) != 0
    }

    /// Fill the time slot from the calendar fields when all are present.
    pub fn compute_time(&mut self) {
        if self.bit_pattern & fields::TIME_BITS == fields::TIME_BITS {
            let n = &self.number;
            if let Some(t) = crate::time::record_time(
                n[fields::YEAR],
                n[fields::MONTH],
                n[fields::DAY],
                n[fields::HOUR],
                n[fields::MIN],
                n[fields::TZ],
            ) {
                self.number[fields::TIME] = t;
                self.bit_pattern |= fields::bit(fields::TIME);
                return;
            }
        }
        self.number[fields::TIME] = f64::NAN;
    }
}

/// Rewrite a legacy record-type '3' line into the current '5' layout.
///
/// The time-zone digits move two columns left and the freed columns get
/// the century of the two-digit year. Lines of any other type are
/// returned unchanged.
#[must_use]
pub fn upgrade_legacy_record(line: &str) -> Cow<'_, str> {
    let bytes = line.as_bytes();
    if bytes.first() != Some(&b'3') || bytes.len() < 27 {
        return Cow::Borrowed(line);
    }
    let mut out = bytes.to_vec();
    out[0] = b'5';
    out[10] = bytes[12];
    out[11] = bytes[13];

    let yy = std::str::from_utf8(&bytes[14..16])
        .ok()
        .and_then(|s| s.trim().parse::<u32>().ok());
    if let Some(yy) = yy {
        let century: &[u8; 2] = if yy == 99 && &bytes[16..27] == b"99999999999" {
            b"99"
        } else if yy < OLDEST_YY {
            b"20"
        } else {
            b"19"
        };
        out[12..14].copy_from_slice(century);
    }
    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}
