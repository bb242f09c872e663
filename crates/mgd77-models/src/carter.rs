//! Carter (1980) echo-sounding correction tables.
//!
//! Converts two-way travel time to sound-velocity-corrected depth using a
//! 1°×1° bin→zone map and per-zone correction tables at 100 m steps.

use std::fs;
use std::path::{Path, PathBuf};

use mgd77_core::{Mgd77Error, Result};
use tracing::debug;

/// Number of 1×1 degree bins.
pub const N_BINS: usize = 64_800;
/// Number of Carter zones.
pub const N_ZONES: usize = 85;
/// Number of zone offsets (one per zone plus the end marker).
pub const N_OFFSETS: usize = 86;
/// Number of correction entries across all zones.
pub const N_CORRECTIONS: usize = 5812;

/// Nominal depth at or below which no correction applies (m).
const SHALLOW_LIMIT: f64 = 100.0;

/// Loaded correction, offset and zone tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarterTable {
    correction: Vec<i16>,
    /// 1-based start of each zone within `correction`.
    offset: Vec<i16>,
    zone: Vec<i16>,
}

fn atoi(line: &str) -> Option<i64> {
    let s = line.trim_start();
    let end = s
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(s.len(), |(i, _)| i);
    s[..end].parse().ok()
}

struct TableReader<'a> {
    lines: std::str::Lines<'a>,
    path: &'a Path,
}

impl TableReader<'_> {
    fn error(&self, message: String) -> Mgd77Error {
        Mgd77Error::CarterTable {
            path: self.path.to_path_buf(),
            message,
        }
    }

    fn next_line(&mut self, what: &str) -> Result<&str> {
        let err = self.error(format!("unexpected end of file reading {what}"));
        self.lines.next().ok_or(err)
    }

    /// Skip `skip` lines, then read a count line that must equal `expected`.
    fn section(&mut self, skip: usize, expected: usize, what: &str) -> Result<Vec<i16>> {
        for _ in 0..skip {
            self.next_line(what)?;
        }
        let key = self.next_line(what)?;
        let key = atoi(key).unwrap_or(-1);
        if key != expected as i64 {
            return Err(self.error(format!("incorrect {what} key ({key}), should be {expected}")));
        }
        (0..expected)
            .map(|i| {
                let line = self.next_line(what)?;
                atoi(line)
                    .and_then(|v| i16::try_from(v).ok())
                    .ok_or_else(|| self.error(format!("could not read {what} # {i}")))
            })
            .collect()
    }
}

impl CarterTable {
    /// Parse the text of a `carter.d` file.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::CarterTable`] when a section is short or mislabeled.
    pub fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut reader = TableReader {
            lines: text.lines(),
            path,
        };
        let correction = reader.section(4, N_CORRECTIONS, "correction")?;
        let offset = reader.section(1, N_OFFSETS, "offset")?;
        let zone = reader.section(1, N_BINS, "zone")?;
        Ok(Self {
            correction,
            offset,
            zone,
        })
    }

    /// Load `carter.d` from `path`.
    ///
    /// # Errors
    ///
    /// File errors, or see [`CarterTable::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Mgd77Error::FileNotFound {
                path: PathBuf::from(path),
            },
            _ => Mgd77Error::Io(e),
        })?;
        debug!(path = %path.display(), "loading Carter tables");
        Self::parse(&text, path)
    }

    /// Build a table from already-decoded parts.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::BadArgument`] when an offset points outside `correction`.
    pub fn from_parts(correction: Vec<i16>, offset: Vec<i16>, zone: Vec<i16>) -> Result<Self> {
        if offset.len() < 2
            || offset
                .iter()
                .any(|&o| o < 1 || o as usize > correction.len() + 1)
        {
            return Err(Mgd77Error::bad_argument("Carter offsets do not fit the correction table"));
        }
        Ok(Self {
            correction,
            offset,
            zone,
        })
    }

    fn n_zones(&self) -> usize {
        self.offset.len() - 1
    }

    fn check_zone(&self, zone: i32) -> Result<usize> {
        match usize::try_from(zone) {
            Ok(z) if (1..=self.n_zones()).contains(&z) => Ok(z),
            _ => Err(Mgd77Error::CarterZoneOutOfRange { zone }),
        }
    }

    fn corr(&self, index: i64) -> Option<f64> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.correction.get(i))
            .map(|&v| f64::from(v))
    }

    /// Bin number of a position: 360 × (row from the south pole) + column.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::LatitudeOutOfRange`] outside [-90, 90];
    /// [`Mgd77Error::CarterBinOutOfRange`] for a non-finite longitude.
    pub fn bin_of(lon: f64, lat: f64) -> Result<usize> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Mgd77Error::LatitudeOutOfRange { lat });
        }
        if !lon.is_finite() {
            return Err(Mgd77Error::CarterBinOutOfRange { bin: -1 });
        }
        let lon = lon.rem_euclid(360.0);
        let row = ((lat + 90.0).floor() as usize).min(179);
        let col = (lon.floor() as usize).min(359);
        Ok(360 * row + col)
    }

    /// Zone of `bin`.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::CarterBinOutOfRange`] past the zone map.
    pub fn zone_of(&self, bin: usize) -> Result<i32> {
        self.zone
            .get(bin)
            .map(|&z| i32::from(z))
            .ok_or(Mgd77Error::CarterBinOutOfRange { bin: bin as i64 })
    }

    /// Corrected depth (m) for travel time `twt_ms` in `zone`.
    ///
    /// Nominal depths (0.75 m per ms, truncated to whole metres) up to
    /// 100 m are returned as is; deeper ones interpolate the zone's table.
    /// NaN in, NaN out.
    ///
    /// # Errors
    ///
    /// Zone out of range, negative travel time, or beyond the table.
    pub fn depth_from_twt(&self, zone: i32, twt_ms: f64) -> Result<f64> {
        if twt_ms.is_nan() {
            return Ok(f64::NAN);
        }
        let z = self.check_zone(zone)?;
        if twt_ms < 0.0 {
            return Err(Mgd77Error::CarterTwtOutOfRange { twt: twt_ms });
        }
        let nominal = (0.75 * twt_ms) as i64;
        if nominal as f64 <= SHALLOW_LIMIT {
            return Ok(nominal as f64);
        }

        let too_big = Mgd77Error::CarterTwtOutOfRange { twt: twt_ms };
        let low_hundred = nominal / 100;
        let i = i64::from(self.offset[z - 1]) + low_hundred - 1;
        let zone_end = i64::from(self.offset[z]);
        if i >= zone_end - 1 {
            return Err(too_big);
        }
        let part = nominal % 100;
        let here = self.corr(i).ok_or(Mgd77Error::CarterTwtOutOfRange { twt: twt_ms })?;
        if part == 0 {
            return Ok(here);
        }
        if i == zone_end - 2 {
            return Err(too_big);
        }
        let next = self.corr(i + 1).ok_or(too_big)?;
        Ok(here + 0.01 * part as f64 * (next - here))
    }

    /// Travel time (ms) for corrected depth `depth` in `zone`; the inverse
    /// of [`CarterTable::depth_from_twt`].
    ///
    /// # Errors
    ///
    /// Zone out of range, negative depth, or deeper than the table.
    pub fn twt_from_depth(&self, zone: i32, depth: f64) -> Result<f64> {
        if depth.is_nan() {
            return Ok(f64::NAN);
        }
        let z = self.check_zone(zone)?;
        if depth < 0.0 {
            return Err(Mgd77Error::CarterDepthOutOfRange { depth });
        }
        if depth <= SHALLOW_LIMIT {
            return Ok(1.33333 * depth);
        }

        let too_deep = Mgd77Error::CarterDepthOutOfRange { depth };
        let max = i64::from(self.offset[z]) - 2;
        let min = i64::from(self.offset[z - 1]) - 1;
        let deepest = self.corr(max).ok_or(Mgd77Error::CarterDepthOutOfRange { depth })?;
        if depth > deepest {
            return Err(too_deep);
        }
        if depth == deepest {
            return Ok(133.333 * (max - min) as f64);
        }

        let value = |g: i64| self.corr(g).unwrap_or(f64::NAN);
        let mut guess = ((depth / 100.0).round_ties_even() as i64 + min).min(max);
        while guess < max && value(guess) < depth {
            guess += 1;
        }
        while guess > min && value(guess) > depth {
            guess -= 1;
        }
        let here = value(guess);
        if depth == here {
            return Ok(133.333 * (guess - min) as f64);
        }
        let fraction = (depth - here) / (value(guess + 1) - here);
        Ok(133.333 * ((guess - min) as f64 + fraction))
    }

    /// Corrected depth at a position.
    ///
    /// # Errors
    ///
    /// See [`CarterTable::bin_of`] and [`CarterTable::depth_from_twt`].
    pub fn depth_at(&self, lon: f64, lat: f64, twt_ms: f64) -> Result<f64> {
        let zone = self.zone_of(Self::bin_of(lon, lat)?)?;
        self.depth_from_twt(zone, twt_ms)
    }

    /// Term to subtract from the uncorrected (1500 m/s) depth to get the
    /// corrected depth.
    ///
    /// # Errors
    ///
    /// See [`CarterTable::depth_at`].
    pub fn correction(&self, lon: f64, lat: f64, twt_ms: f64) -> Result<f64> {
        Ok(twt_ms * 0.75 - self.depth_at(lon, lat, twt_ms)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two zones: zone 1 covers the southern hemisphere, zone 2 the north.
    /// Each zone starts at 0 m; zone 1 steps 100 m (no correction) and
    /// zone 2 steps 102 m.
    fn small_table() -> CarterTable {
        let mut correction: Vec<i16> = (0..60).map(|k| k * 100).collect();
        correction.extend((0..60).map(|k| k * 102));
        let offset = vec![1, 61, 121];
        let zone = (0..N_BINS).map(|b| if b < N_BINS / 2 { 1 } else { 2 }).collect();
        CarterTable::from_parts(correction, offset, zone).unwrap()
    }

    #[test]
    fn test_bins() {
        assert_eq!(CarterTable::bin_of(0.5, -89.5).unwrap(), 0);
        assert_eq!(CarterTable::bin_of(-0.5, -89.5).unwrap(), 359);
        assert_eq!(CarterTable::bin_of(360.0, 0.0).unwrap(), 360 * 90);
        assert_eq!(CarterTable::bin_of(10.0, 90.0).unwrap(), 360 * 179 + 10);
        assert!(matches!(
            CarterTable::bin_of(0.0, 90.5),
            Err(Mgd77Error::LatitudeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_shallow_bypasses_table() {
        let t = small_table();
        for twt in [0.0, 10.0, 133.0, 133.4] {
            let d = t.depth_from_twt(2, twt).unwrap();
            assert_eq!(d, (0.75 * twt).trunc());
        }
        // nominal 100.95 m truncates to 100 m and stays off the table
        assert_eq!(t.depth_from_twt(2, 134.6).unwrap(), 100.0);
    }

    #[test]
    fn test_interpolates_between_entries() {
        let t = small_table();
        // nominal 150 m: halfway between 102 and 204
        let d = t.depth_from_twt(2, 200.0).unwrap();
        assert!((d - 153.0).abs() < 1e-9, "{d}");
        // nominal 150.75 m interpolates from 150 m
        let d = t.depth_from_twt(2, 201.0).unwrap();
        assert!((d - 153.0).abs() < 1e-9, "{d}");
        let d = t.depth_from_twt(2, 1400.0).unwrap();
        assert!((d - 1071.0).abs() < 1e-9, "{d}");
        let d = t.depth_from_twt(2, 1000.0 / 0.75).unwrap();
        assert!((d - 1020.0).abs() < 1e-9);
        let d = t.depth_from_twt(1, 1000.0 / 0.75).unwrap();
        assert!((d - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_domain_errors() {
        let t = small_table();
        assert!(matches!(t.depth_from_twt(0, 10.0), Err(Mgd77Error::CarterZoneOutOfRange { zone: 0 })));
        assert!(matches!(t.depth_from_twt(3, 10.0), Err(Mgd77Error::CarterZoneOutOfRange { zone: 3 })));
        assert!(matches!(t.depth_from_twt(1, -1.0), Err(Mgd77Error::CarterTwtOutOfRange { .. })));
        assert!(matches!(t.depth_from_twt(1, 20_000.0), Err(Mgd77Error::CarterTwtOutOfRange { .. })));
        assert!(t.depth_from_twt(1, f64::NAN).unwrap().is_nan());
    }

    #[test]
    fn test_inverse() {
        let t = small_table();
        assert!((t.twt_from_depth(2, 50.0).unwrap() - 66.6665).abs() < 1e-9);
        let twt = t.twt_from_depth(2, 1020.0).unwrap();
        assert!((twt - 133.333 * 10.0).abs() < 1e-6);
        let twt = t.twt_from_depth(2, 1071.0).unwrap();
        assert!((twt - 133.333 * 10.5).abs() < 1e-6);
        assert!(t.twt_from_depth(2, 1.0e6).is_err());
    }

    #[test]
    fn test_position_lookup_and_correction() {
        let t = small_table();
        let d = t.depth_at(10.0, 45.0, 1000.0 / 0.75).unwrap();
        assert!((d - 1020.0).abs() < 1e-9);
        let c = t.correction(10.0, 45.0, 1000.0 / 0.75).unwrap();
        assert!((c + 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_rejects_wrong_key() {
        let text = "a\nb\nc\nd\n12\n";
        let err = CarterTable::parse(text, Path::new("carter.d")).unwrap_err();
        assert!(err.to_string().contains("incorrect correction key (12)"));
    }
}
