//! Preparation of a dataset before it is written to an MGD77+ container.
//!
//! Longitudes are made continuous, a time column without information is
//! dropped, and every column is scanned once for constancy and range.

use mgd77_core::codec::constant_and_limits;
use mgd77_core::{ColumnValues, Dataset, Mgd77Error, Result};
use tracing::{debug, warn};

/// Kind of longitude discontinuity found along a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongitudeJump {
    None,
    /// Jump between values of opposite sign in the -180/180 range.
    Antimeridian,
    /// Jump between non-negative values in the 0/360 range.
    PrimeMeridian,
    Both,
}

/// Classify the adjacent-pair jumps larger than 180 degrees.
///
/// A slow drift through more than 360 degrees without a single large step
/// goes undetected.
#[must_use]
pub fn detect_longitude_jumps(lon: &[f64]) -> LongitudeJump {
    let mut antimeridian = false;
    let mut prime = false;
    for pair in lon.windows(2) {
        if (pair[1] - pair[0]).abs() > 180.0 {
            if pair[0].min(pair[1]) < 0.0 {
                antimeridian = true;
            } else {
                prime = true;
            }
        }
    }
    match (antimeridian, prime) {
        (true, true) => LongitudeJump::Both,
        (true, false) => LongitudeJump::Antimeridian,
        (false, true) => LongitudeJump::PrimeMeridian,
        (false, false) => LongitudeJump::None,
    }
}

/// Shift longitudes so the track has no jump.
///
/// Antimeridian tracks move to [0, 360), prime-meridian tracks to
/// (-180, 180]. A track showing both kinds of jump is left alone.
pub fn normalize_longitudes(lon: &mut [f64]) -> LongitudeJump {
    let jump = detect_longitude_jumps(lon);
    match jump {
        LongitudeJump::Antimeridian => {
            for x in lon.iter_mut().filter(|x| **x < 0.0) {
                *x += 360.0;
            }
        }
        LongitudeJump::PrimeMeridian => {
            for x in lon.iter_mut().filter(|x| **x > 180.0) {
                *x -= 360.0;
            }
        }
        LongitudeJump::Both => {
            warn!("longitude crossing both dateline and Greenwich; not adjusted");
        }
        LongitudeJump::None => {}
    }
    jump
}

/// True when every string equals its predecessor.
#[must_use]
pub fn texts_are_constant(values: &[String]) -> bool {
    values.windows(2).all(|pair| pair[0] == pair[1])
}

/// Constancy and range of a numeric column.
///
/// A column mixing missing and present values is never constant, so that
/// storing one value cannot lose the missing ones.
#[must_use]
pub fn numbers_are_constant(values: &[f64]) -> (bool, Option<(f64, f64)>) {
    let (constant, limits) = constant_and_limits(values);
    let mixed = limits.is_some() && values.iter().any(|v| v.is_nan());
    (constant && !mixed, limits)
}

/// Prepare `dataset` for writing as MGD77+.
///
/// Sets `no_time` (dropping a time column that holds no value at all),
/// normalizes longitudes, and records each output column's constancy and
/// range in the catalog. Time stays a per-record column even when every
/// record shares one timestamp.
///
/// # Errors
///
/// [`Mgd77Error::NoSuchColumn`] when the dataset has no longitude column.
pub fn prepare_container(dataset: &mut Dataset) -> Result<()> {
    let time_limits = dataset.numeric("time").map(|t| constant_and_limits(t).1);
    match time_limits {
        Some(Some(_)) => dataset.header.no_time = false,
        Some(None) => {
            debug!("time column is empty; writing without time");
            dataset.header.no_time = true;
            let keep: Vec<String> = dataset
                .column_names()
                .into_iter()
                .filter(|&name| name != "time")
                .map(str::to_string)
                .collect();
            dataset.select_columns(&keep)?;
        }
        None => dataset.header.no_time = true,
    }

    let lon = dataset
        .numeric_mut("lon")
        .ok_or_else(|| Mgd77Error::NoSuchColumn {
            name: "lon".to_string(),
        })?;
    let jump = normalize_longitudes(lon);
    if jump != LongitudeJump::None {
        debug!(?jump, "longitudes normalized");
    }

    for pos in 0..dataset.order.len() {
        let (constant, limits) = match &dataset.values[pos] {
            ColumnValues::Numeric(v) => numbers_are_constant(v),
            ColumnValues::Text(v) => (texts_are_constant(v), None),
        };
        if let Some(column) = dataset.header.catalog.get_mut(dataset.order[pos]) {
            column.constant = constant && column.abbrev != "time";
            column.limits = limits;
        }
    }
    Ok(())
}
