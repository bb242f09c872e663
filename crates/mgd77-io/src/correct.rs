//! Recomputation of derived fields and application of correction tables.
//!
//! Columns whose descriptor carries an [`Adjust`] code are rebuilt from the
//! raw observations: travel times are unwrapped, depth comes from the Carter
//! table, the magnetic anomaly from the IGRF and free-air anomalies from
//! theoretical gravity. Values missing before the recomputation stay missing.

use std::collections::BTreeMap;

use mgd77_core::params::item;
use mgd77_core::{time, Adjust, ColumnValues, Dataset, Mgd77Error, ParamSet, Result, SetId};
use mgd77_models::corrtable::{Aux, Correction, CorrectionTable, Variable};
use mgd77_models::{igrf, track, CarterTable, GravityFormula};
use tracing::{debug, warn};

/// Default weight of a record when a correction refers to `weight`.
const DEFAULT_WEIGHT: f64 = 1.0;
/// Record type assumed when the file has no `drt` column.
const DEFAULT_RECORD_TYPE: f64 = 5.0;

/// Undo precision depth recorder wraps in place.
///
/// A jump between consecutive present values larger than half of `wrap`
/// adds one `wrap` of the opposite sign to a running correction, which is
/// applied to every value from that record on. Returns the number of wraps.
pub fn unwrap_travel_times(twt: &mut [f64], wrap: f64) -> usize {
    let trigger = 0.5 * wrap;
    let mut correction = 0.0;
    let mut previous: Option<f64> = None;
    let mut n_wraps = 0;
    for value in twt.iter_mut() {
        if !value.is_nan() {
            if let Some(prev) = previous {
                let delta = *value - prev;
                if delta.abs() > trigger {
                    correction += wrap.copysign(-delta);
                    n_wraps += 1;
                }
            }
            previous = Some(*value);
        }
        *value += correction;
    }
    n_wraps
}

/// Adjustments asked for by the legacy columns named in `wanted`.
#[must_use]
pub fn requested_adjustments<S: AsRef<str>>(dataset: &Dataset, wanted: &[S]) -> Vec<Adjust> {
    let mut out = Vec::new();
    for (r, column) in dataset.header.catalog.iter() {
        if r.set != SetId::Legacy || column.adjust == Adjust::None {
            continue;
        }
        let asked = wanted.is_empty() || wanted.iter().any(|w| w.as_ref() == column.abbrev);
        if asked && !out.contains(&column.adjust) {
            out.push(column.adjust);
        }
    }
    out.sort_by_key(|a| a.code());
    out
}

fn adjusted_position(dataset: &Dataset, adjust: Adjust) -> Option<usize> {
    dataset.order.iter().position(|r| {
        r.set == SetId::Legacy
            && dataset
                .header
                .catalog
                .get(*r)
                .is_some_and(|c| c.adjust == adjust)
    })
}

fn numeric_or_nan(dataset: &Dataset, abbrev: &str) -> Vec<f64> {
    dataset
        .numeric(abbrev)
        .map_or_else(|| vec![f64::NAN; dataset.n_records()], <[f64]>::to_vec)
}

/// Leading and trailing magnetometer readings: sensor 2 leads only when
/// `msens` says so, sensor 1 otherwise.
fn sensor_readings(msens: f64, mtf1: f64, mtf2: f64) -> (f64, f64) {
    if msens.round() == 2.0 {
        (mtf2, mtf1)
    } else {
        (mtf1, mtf2)
    }
}

/// Overwrite every present value of column `pos` with `compute(record)`.
fn recompute(dataset: &mut Dataset, pos: usize, compute: impl Fn(usize) -> f64) -> usize {
    let Some(values) = dataset.values[pos].as_numeric_mut() else {
        return 0;
    };
    let mut n = 0;
    for (rec, value) in values.iter_mut().enumerate() {
        if value.is_nan() {
            continue;
        }
        *value = compute(rec);
        n += 1;
    }
    n
}

/// Rebuild the derived columns for every adjustment in `requested`.
///
/// Travel times are unwrapped first so a depth recomputation sees the
/// unwrapped values. A Carter lookup that fails for one record leaves NaN
/// there and the rest of the column is still computed.
///
/// # Errors
///
/// [`Mgd77Error::NoSuchColumn`] when an auxiliary column is missing and
/// [`Mgd77Error::BadArgument`] when depth is requested without `carter`.
pub fn adjust_derived_fields(
    dataset: &mut Dataset,
    requested: &[Adjust],
    carter: Option<&CarterTable>,
) -> Result<()> {
    for &adjust in requested {
        let Some(pos) = adjusted_position(dataset, adjust) else {
            continue;
        };
        match adjust {
            Adjust::None => {}
            Adjust::Twt => {
                let wrap = dataset.header.pdr_wrap;
                if wrap == 0.0 {
                    warn!("PDR wrap is 0; travel times are not unwrapped");
                    continue;
                }
                if let Some(twt) = dataset.values[pos].as_numeric_mut() {
                    let n_wraps = unwrap_travel_times(twt, wrap);
                    debug!(n_wraps, wrap, "unwrapped travel times");
                }
            }
            Adjust::Depth => {
                let carter = carter.ok_or_else(|| {
                    Mgd77Error::bad_argument("depth recomputation needs a Carter table")
                })?;
                let twt = dataset.require_numeric("twt")?.to_vec();
                let lon = dataset.require_numeric("lon")?.to_vec();
                let lat = dataset.require_numeric("lat")?.to_vec();
                let failed = std::cell::Cell::new(0usize);
                let n = recompute(dataset, pos, |rec| {
                    if lon[rec].is_nan() || lat[rec].is_nan() {
                        return f64::NAN;
                    }
                    carter
                        .depth_at(lon[rec], lat[rec], 1000.0 * twt[rec])
                        .unwrap_or_else(|_| {
                            failed.set(failed.get() + 1);
                            f64::NAN
                        })
                });
                let failed = failed.get();
                if failed > 0 {
                    warn!(column = "depth", count = failed, "Carter lookup failed for some records");
                }
                debug!(column = "depth", count = n, "recomputed depths");
            }
            Adjust::Mag => {
                let time = numeric_or_nan(dataset, "time");
                let lon = dataset.require_numeric("lon")?.to_vec();
                let lat = dataset.require_numeric("lat")?.to_vec();
                let mtf1 = dataset.require_numeric("mtf1")?.to_vec();
                let mtf2 = numeric_or_nan(dataset, "mtf2");
                let msens = numeric_or_nan(dataset, "msens");
                let n = recompute(dataset, pos, |rec| {
                    let (leading, trailing) = sensor_readings(msens[rec], mtf1[rec], mtf2[rec]);
                    let anomaly = igrf::magnetic_anomaly(time[rec], lon[rec], lat[rec], leading);
                    if anomaly.is_nan() {
                        igrf::magnetic_anomaly(time[rec], lon[rec], lat[rec], trailing)
                    } else {
                        anomaly
                    }
                });
                debug!(column = "mag", count = n, "recomputed magnetic anomalies");
            }
            Adjust::Faa | Adjust::FaaEot => {
                let lat = dataset.require_numeric("lat")?.to_vec();
                let gobs = dataset.require_numeric("gobs")?.to_vec();
                let eot = if adjust == Adjust::FaaEot {
                    Some(dataset.require_numeric("eot")?.to_vec())
                } else {
                    None
                };
                let n = recompute(dataset, pos, |rec| {
                    let observed = gobs[rec] + eot.as_ref().map_or(0.0, |e| e[rec]);
                    observed - GravityFormula::Iag1980.theoretical(0.0, lat[rec])
                });
                debug!(column = "faa", count = n, with_eotvos = eot.is_some(), "recomputed free-air anomalies");
            }
        }
    }
    Ok(())
}

fn gravity_formula(dataset: &Dataset) -> GravityFormula {
    let code = dataset
        .header
        .params(ParamSet::Revised)
        .get(item::GRAVITY_THEORETICAL_FORMULA_CODE)
        .trim()
        .parse()
        .ok()
        .and_then(GravityFormula::from_code);
    code.unwrap_or_else(|| {
        warn!("unrecognized theoretical gravity formula code; using IAG 1980");
        GravityFormula::Iag1980
    })
}

/// Values of auxiliary quantity `aux` for every record of `dataset`.
///
/// # Errors
///
/// [`Mgd77Error::BadArgument`] for `carter` without a Carter table.
pub fn aux_column(
    dataset: &Dataset,
    aux: Aux,
    cruise: &str,
    carter: Option<&CarterTable>,
) -> Result<Vec<f64>> {
    let n = dataset.n_records();
    let lon = numeric_or_nan(dataset, "lon");
    let lat = numeric_or_nan(dataset, "lat");
    let times = numeric_or_nan(dataset, "time");
    let calendar = |pick: fn(&time::Calendar) -> f64| -> Vec<f64> {
        times
            .iter()
            .map(|&t| time::split(t).map_or(f64::NAN, |cal| pick(&cal)))
            .collect()
    };

    let values = match aux {
        Aux::Dist => track::cumulative_distance(&lon, &lat, false)
            .into_iter()
            .map(|d| d / 1000.0)
            .collect(),
        Aux::Azim => track::azimuths(&lon, &lat),
        Aux::Vel => track::speeds(&track::cumulative_distance(&lon, &lat, false), &times),
        Aux::Year => calendar(|c| f64::from(c.year)),
        Aux::Month => calendar(|c| f64::from(c.month)),
        Aux::Day => calendar(|c| f64::from(c.day)),
        Aux::Hour => calendar(|c| f64::from(c.hour)),
        Aux::Min => calendar(|c| c.minute.floor()),
        Aux::Dmin => calendar(|c| c.minute),
        Aux::Sec => calendar(time::Calendar::second),
        Aux::Date => calendar(|c| c.yyyymmdd() as f64),
        Aux::Hhmm => calendar(time::Calendar::hhmm),
        Aux::Weight => vec![DEFAULT_WEIGHT; n],
        Aux::Drt => dataset
            .numeric("drt")
            .map_or_else(|| vec![DEFAULT_RECORD_TYPE; n], <[f64]>::to_vec),
        Aux::Igrf => (0..n)
            .map(|rec| {
                time::fractional_year(times[rec])
                    .and_then(|year| igrf::total_field(year, lon[rec], lat[rec]).ok())
                    .unwrap_or(f64::NAN)
            })
            .collect(),
        Aux::Carter => {
            let carter = carter.ok_or_else(|| {
                Mgd77Error::bad_argument("carter correction needs a Carter table")
            })?;
            let twt = numeric_or_nan(dataset, "twt");
            (0..n)
                .map(|rec| {
                    if lon[rec].is_nan() || lat[rec].is_nan() {
                        return f64::NAN;
                    }
                    carter
                        .correction(lon[rec], lat[rec], 1000.0 * twt[rec])
                        .map_or(f64::NAN, |c| -c)
                })
                .collect()
        }
        Aux::Ngrav => {
            let formula = gravity_formula(dataset);
            lon.iter()
                .zip(&lat)
                .map(|(&x, &y)| formula.theoretical(x, y))
                .collect()
        }
        Aux::Ngdcid => vec![cruise.trim().parse().unwrap_or(f64::NAN); n],
    };
    Ok(values)
}

/// Subtract the corrections `table` holds for `cruise` from the dataset's
/// columns. Every correction is evaluated on the uncorrected values.
/// Returns the number of columns corrected.
///
/// # Errors
///
/// As for [`aux_column`].
pub fn apply_correction_table(
    dataset: &mut Dataset,
    table: &CorrectionTable,
    cruise: &str,
    carter: Option<&CarterTable>,
) -> Result<usize> {
    let mut corrections: Vec<(String, Correction)> = table
        .for_cruise(cruise)
        .map(|(column, corr)| (column.to_string(), corr.clone()))
        .collect();
    if corrections.is_empty() || dataset.n_records() == 0 {
        return Ok(0);
    }

    let mut aux: BTreeMap<Aux, Vec<f64>> = BTreeMap::new();
    for (_, corr) in &corrections {
        for variable in corr.variables() {
            if let Variable::Aux(a) = variable {
                if !aux.contains_key(a) {
                    aux.insert(*a, aux_column(dataset, *a, cruise, carter)?);
                }
            }
        }
    }

    let value = |v: &Variable, rec: usize| -> f64 {
        match v {
            Variable::Column(name) => dataset
                .numeric(name)
                .and_then(|c| c.get(rec).copied())
                .unwrap_or(f64::NAN),
            Variable::Aux(a) => aux.get(a).and_then(|c| c.get(rec).copied()).unwrap_or(f64::NAN),
        }
    };

    let mut deltas: Vec<(usize, Vec<f64>)> = Vec::new();
    for (column, corr) in &mut corrections {
        let Some(pos) = dataset.position(column) else {
            debug!(cruise, column = column.as_str(), "corrected column not in data set");
            continue;
        };
        if matches!(dataset.values[pos], ColumnValues::Text(_)) {
            warn!(cruise, column = column.as_str(), "cannot correct a text column");
            continue;
        }
        corr.resolve_origins(|v| value(v, 0));
        let delta = (0..dataset.n_records())
            .map(|rec| corr.evaluate(|v| value(v, rec)))
            .collect();
        deltas.push((pos, delta));
    }

    let n_corrected = deltas.len();
    for (pos, delta) in deltas {
        if let Some(values) = dataset.values[pos].as_numeric_mut() {
            for (x, d) in values.iter_mut().zip(delta) {
                *x -= d;
            }
        }
    }
    debug!(cruise, columns = n_corrected, "applied correction table");
    Ok(n_corrected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mgd77_core::{Header, HeaderParams};
    use mgd77_models::carter::N_BINS;

    #[test]
    fn test_unwrap_single_wrap() {
        let mut twt = vec![100.0, 950.0, 1100.0];
        assert_eq!(unwrap_travel_times(&mut twt, 1000.0), 1);
        assert_eq!(twt, [100.0, -50.0, 100.0]);
    }

    #[test]
    fn test_unwrap_keeps_missing_values() {
        let mut twt = vec![900.0, f64::NAN, 50.0, 80.0];
        assert_eq!(unwrap_travel_times(&mut twt, 1000.0), 1);
        assert_eq!(twt[0], 900.0);
        assert!(twt[1].is_nan());
        assert_eq!(twt[2..], [1050.0, 1080.0]);
    }

    #[test]
    fn test_unwrap_small_steps_untouched() {
        let mut twt = vec![1.0, 1.2, 1.5, 1.1];
        assert_eq!(unwrap_travel_times(&mut twt, 1.0), 0);
        assert_eq!(twt, [1.0, 1.2, 1.5, 1.1]);
    }

    fn dataset(columns: &[(&str, Vec<f64>)]) -> Dataset {
        let n = columns.first().map_or(0, |(_, v)| v.len());
        let mut header = Header::plain(HeaderParams::default(), n, false);
        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        let order = header.catalog.order_columns(&names).unwrap();
        let mut ds = Dataset::new(header, order);
        ds.values = columns
            .iter()
            .map(|(_, v)| ColumnValues::Numeric(v.clone()))
            .collect();
        ds
    }

    fn set_adjust(ds: &mut Dataset, abbrev: &str, adjust: Adjust) {
        let r = ds.header.catalog.resolve(abbrev).unwrap();
        ds.header.catalog.get_mut(r).unwrap().adjust = adjust;
    }

    #[test]
    fn test_requested_adjustments_follow_selection() {
        let mut ds = dataset(&[("depth", vec![1.0]), ("faa", vec![1.0])]);
        set_adjust(&mut ds, "depth", Adjust::Depth);
        set_adjust(&mut ds, "faa", Adjust::FaaEot);
        assert_eq!(requested_adjustments(&ds, &["faa"]), [Adjust::FaaEot]);
        assert_eq!(
            requested_adjustments::<&str>(&ds, &[]),
            [Adjust::Depth, Adjust::FaaEot]
        );
    }

    #[test]
    fn test_free_air_anomaly_recomputed() {
        let mut ds = dataset(&[
            ("lat", vec![10.0, 20.0, 30.0]),
            ("gobs", vec![978_500.0, 978_600.0, 978_700.0]),
            ("eot", vec![5.0, 5.0, 5.0]),
            ("faa", vec![0.0, f64::NAN, 0.0]),
        ]);
        set_adjust(&mut ds, "faa", Adjust::FaaEot);
        adjust_derived_fields(&mut ds, &[Adjust::FaaEot], None).unwrap();
        let faa = ds.numeric("faa").unwrap();
        let expected = 978_505.0 - GravityFormula::Iag1980.theoretical(0.0, 10.0);
        assert!((faa[0] - expected).abs() < 1e-9);
        assert!(faa[1].is_nan());
        assert!(faa[2].is_finite());
    }

    #[test]
    fn test_magnetic_anomaly_recomputed() {
        let t = time::to_unix_seconds(2000, 6, 1, 0.0).unwrap();
        let mut ds = dataset(&[
            ("time", vec![t, t]),
            ("lat", vec![40.0, 40.0]),
            ("lon", vec![-30.0, -30.0]),
            ("mtf1", vec![45_000.0, 45_000.0]),
            ("mag", vec![0.0, f64::NAN]),
        ]);
        set_adjust(&mut ds, "mag", Adjust::Mag);
        adjust_derived_fields(&mut ds, &[Adjust::Mag], None).unwrap();
        let mag = ds.numeric("mag").unwrap();
        let year = time::fractional_year(t).unwrap();
        let expected = 45_000.0 - igrf::total_field(year, -30.0, 40.0).unwrap();
        assert!((mag[0] - expected).abs() < 1e-6);
        assert!(mag[1].is_nan());
    }

    #[test]
    fn test_magnetic_anomaly_follows_leading_sensor() {
        let t = time::to_unix_seconds(2000, 6, 1, 0.0).unwrap();
        let mut ds = dataset(&[
            ("time", vec![t; 3]),
            ("lat", vec![40.0; 3]),
            ("lon", vec![-30.0; 3]),
            ("mtf1", vec![45_000.0, f64::NAN, 45_000.0]),
            ("mtf2", vec![46_000.0, 46_000.0, 46_000.0]),
            ("msens", vec![2.0, 1.0, 9.0]),
            ("mag", vec![0.0; 3]),
        ]);
        set_adjust(&mut ds, "mag", Adjust::Mag);
        adjust_derived_fields(&mut ds, &[Adjust::Mag], None).unwrap();
        let year = time::fractional_year(t).unwrap();
        let reference = igrf::total_field(year, -30.0, 40.0).unwrap();
        let mag = ds.numeric("mag").unwrap();
        assert!((mag[0] - (46_000.0 - reference)).abs() < 1e-6);
        assert!((mag[1] - (46_000.0 - reference)).abs() < 1e-6);
        assert!((mag[2] - (45_000.0 - reference)).abs() < 1e-6);
    }

    fn carter() -> CarterTable {
        let mut correction: Vec<i16> = (0..60).map(|k| k * 100).collect();
        correction.extend((0..60).map(|k| k * 102));
        let zone = (0..N_BINS).map(|b| if b < N_BINS / 2 { 1 } else { 2 }).collect();
        CarterTable::from_parts(correction, vec![1, 61, 121], zone).unwrap()
    }

    #[test]
    fn test_depth_uses_unwrapped_travel_time() {
        let twt_s = 1.5;
        let mut ds = dataset(&[
            ("lat", vec![45.0, 45.0, 45.0]),
            ("lon", vec![10.0, 10.0, 10.0]),
            ("twt", vec![twt_s, twt_s + 2.0, twt_s]),
            ("depth", vec![0.0, 0.0, f64::NAN]),
        ]);
        ds.header.pdr_wrap = 2.0;
        set_adjust(&mut ds, "twt", Adjust::Twt);
        set_adjust(&mut ds, "depth", Adjust::Depth);
        let table = carter();
        adjust_derived_fields(&mut ds, &[Adjust::Twt, Adjust::Depth], Some(&table)).unwrap();
        let twt = ds.numeric("twt").unwrap();
        assert!((twt[1] - twt_s).abs() < 1e-9);
        let depth = ds.numeric("depth").unwrap();
        assert!((depth[0] - 1147.5).abs() < 1e-6);
        assert!((depth[1] - 1147.5).abs() < 1e-6);
        assert!(depth[2].is_nan());
    }

    #[test]
    fn test_depth_needs_carter_table() {
        let mut ds = dataset(&[
            ("lat", vec![1.0]),
            ("lon", vec![1.0]),
            ("twt", vec![1.0]),
            ("depth", vec![1.0]),
        ]);
        set_adjust(&mut ds, "depth", Adjust::Depth);
        assert!(matches!(
            adjust_derived_fields(&mut ds, &[Adjust::Depth], None),
            Err(Mgd77Error::BadArgument { .. })
        ));
    }

    #[test]
    fn test_zero_wrap_leaves_travel_times() {
        let mut ds = dataset(&[("twt", vec![0.1, 1.9])]);
        set_adjust(&mut ds, "twt", Adjust::Twt);
        adjust_derived_fields(&mut ds, &[Adjust::Twt], None).unwrap();
        assert_eq!(ds.numeric("twt").unwrap(), [0.1, 1.9]);
    }

    #[test]
    fn test_correction_table_subtracts_terms() {
        let mut ds = dataset(&[
            ("lat", vec![0.0, 0.0, 0.0]),
            ("lon", vec![0.0, 1.0, 2.0]),
            ("depth", vec![100.0, 200.0, 300.0]),
            ("mag", vec![10.0, 20.0, 30.0]),
        ]);
        let text = "TEST depth 5 1*((depth-T))\nTEST mag 0.5*((mag))\nOTHER depth 99\n";
        let table = CorrectionTable::parse(text, &["TEST"], &["depth", "mag"]).unwrap();
        assert_eq!(apply_correction_table(&mut ds, &table, "TEST", None).unwrap(), 2);
        assert_eq!(ds.numeric("depth").unwrap(), [95.0, 95.0, 95.0]);
        assert_eq!(ds.numeric("mag").unwrap(), [5.0, 10.0, 15.0]);
    }

    #[test]
    fn test_aux_columns() {
        let t0 = time::to_unix_seconds(1995, 3, 4, 3600.0 * 13.0 + 90.0).unwrap();
        let ds = dataset(&[
            ("time", vec![t0, t0 + 3600.0]),
            ("lat", vec![0.0, 0.0]),
            ("lon", vec![0.0, 1.0]),
        ]);
        let dist = aux_column(&ds, Aux::Dist, "01010047", None).unwrap();
        assert_eq!(dist[0], 0.0);
        assert!((dist[1] - 111.195).abs() < 0.01);
        let azim = aux_column(&ds, Aux::Azim, "x", None).unwrap();
        assert!((azim[1] - 90.0).abs() < 1e-9);
        assert_eq!(aux_column(&ds, Aux::Date, "x", None).unwrap()[0], 19_950_304.0);
        assert!((aux_column(&ds, Aux::Hhmm, "x", None).unwrap()[0] - 1301.5).abs() < 1e-9);
        assert_eq!(aux_column(&ds, Aux::Ngdcid, "01010047", None).unwrap(), [1_010_047.0; 2]);
        assert_eq!(aux_column(&ds, Aux::Drt, "x", None).unwrap(), [5.0, 5.0]);
        assert!(aux_column(&ds, Aux::Carter, "x", None).is_err());
    }
}
