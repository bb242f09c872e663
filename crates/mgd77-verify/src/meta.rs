//! Metadata derived from the data records: bounding box, cruise dates and
//! the visited ten-degree boxes.

use mgd77_core::header::{TEN_BOX_COLS, TEN_BOX_ROWS};
use mgd77_core::{Dataset, Meta, Result, time};

/// Grid cell of the ten-degree box holding `(lon, lat)`, as `(row, col)`.
///
/// Longitudes above 180 are folded into the western hemisphere first.
#[must_use]
pub fn ten_box_cell(lon: f64, lat: f64) -> Option<(usize, usize)> {
    if lon.is_nan() || lat.is_nan() {
        return None;
    }
    let lon = if lon > 180.0 { lon - 360.0 } else { lon };
    let mut col = (lon.abs() / 10.0).floor() as usize;
    let mut row = (lat.abs() / 10.0).floor() as usize;
    if lon >= 0.0 {
        col += 19;
    }
    if lat >= 0.0 {
        row += 10;
    }
    (row < TEN_BOX_ROWS && col < TEN_BOX_COLS).then_some((row, col))
}

/// MGD77 ten-degree identifier (`QLXX`) of a grid cell.
#[must_use]
pub fn quadrant_code(row: usize, col: usize) -> u32 {
    let (quadrant, lat_band) = if row <= 9 {
        (if col <= 18 { 5 } else { 3 }, row)
    } else {
        (if col <= 18 { 7 } else { 1 }, row - 10)
    };
    let lon_band = if col > 18 { col - 19 } else { col };
    quadrant * 1000 + (lat_band * 100 + lon_band) as u32
}

#[derive(Debug)]
struct Extent {
    east_min: f64,
    east_max: f64,
    west_min: f64,
    west_max: f64,
    south: f64,
    north: f64,
}

impl Extent {
    fn new() -> Self {
        Self {
            east_min: f64::INFINITY,
            east_max: f64::NEG_INFINITY,
            west_min: f64::INFINITY,
            west_max: f64::NEG_INFINITY,
            south: f64::INFINITY,
            north: f64::NEG_INFINITY,
        }
    }

    fn add(&mut self, lon: f64, lat: f64) {
        self.south = self.south.min(lat);
        self.north = self.north.max(lat);
        if lon >= 0.0 {
            self.east_min = self.east_min.min(lon);
            self.east_max = self.east_max.max(lon);
        } else {
            self.west_min = self.west_min.min(lon);
            self.west_max = self.west_max.max(lon);
        }
    }

    /// West and east bounds in whole degrees.
    fn west_east(&self) -> (f64, f64) {
        let has_east = self.east_min.is_finite();
        let has_west = self.west_min.is_finite();
        let (pmin, pmax) = (self.east_min.floor(), self.east_max.ceil());
        let (nmin, nmax) = (self.west_min.floor(), self.west_max.ceil());
        match (has_west, has_east) {
            (false, false) => (f64::NAN, f64::NAN),
            (true, false) => (nmin, nmax),
            (false, true) => (pmin, pmax),
            // crossed Greenwich
            _ if pmin - nmax < 90.0 => (nmin, pmax),
            // crossed the dateline
            _ => (pmin, nmax),
        }
    }
}

/// Compute [`Meta`] from the `lon`, `lat` and (optional) `time` columns.
///
/// Records with a missing position are ignored. Departure and arrival
/// dates come from the first and last record, and only when the first
/// record has a time.
pub fn compute_meta(dataset: &Dataset) -> Result<Meta> {
    let lon = dataset.require_numeric("lon")?;
    let lat = dataset.require_numeric("lat")?;
    let mut meta = Meta {
        verified: true,
        ..Meta::default()
    };

    let mut extent = Extent::new();
    for (&x, &y) in lon.iter().zip(lat) {
        let Some((row, col)) = ten_box_cell(x, y) else {
            continue;
        };
        meta.ten_box[row][col] = true;
        let x = if x > 180.0 { x - 360.0 } else { x };
        extent.add(x, y);
    }
    (meta.w, meta.e) = extent.west_east();
    if extent.south.is_finite() {
        meta.s = extent.south.floor();
        meta.n = extent.north.ceil();
    }

    if let Some(times) = dataset.numeric("time")
        && let (Some(&first), Some(&last)) = (times.first(), times.last())
        && let Some(departure) = time::split(first)
    {
        meta.departure = [departure.year, departure.month as i32, departure.day as i32];
        if let Some(arrival) = time::split(last) {
            meta.arrival = [arrival.year, arrival.month as i32, arrival.day as i32];
        }
    }

    meta.n_ten_box = meta.ten_box.iter().flatten().filter(|&&b| b).count();
    Ok(meta)
}
