//! International Geomagnetic Reference Field synthesis.
//!
//! Spherical-harmonic summation of the 11th-generation IGRF, valid from
//! 1900.0 to 2015.0. Epochs are five years apart and interpolated
//! linearly; after 2010.0 the secular variation is extrapolated.

use mgd77_core::time;
use mgd77_core::{Mgd77Error, Result};
use serde::Serialize;

use crate::igrf_coeffs::GH;

/// First year the model covers.
pub const FIRST_YEAR: f64 = 1900.0;
/// Last year the model covers (by extrapolation).
pub const LAST_YEAR: f64 = 2015.0;

const LAST_EPOCH: f64 = 2010.0;
const DEGREE_10_UNTIL: f64 = 1995.0;
/// Offset of the first 1995 coefficient.
const FIRST_1995: usize = 2280;
/// Offset of the first 2010 coefficient.
const FIRST_2010: usize = 2865;
/// Reference radius in km.
const EARTH_RADIUS: f64 = 6371.2;
/// WGS84 squared semi-axes in km².
const WGS84_A2: f64 = 40_680_631.6;
const WGS84_B2: f64 = 40_408_296.0;

/// Main field or its secular variation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Main,
    SecularVariation,
}

/// How the position is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coordinates {
    /// Height above the WGS84 spheroid in km.
    Geodetic,
    /// Distance from the Earth's center in km.
    Geocentric,
}

/// Synthesized field. Components in nT (nT/year for secular variation),
/// angles in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldComponents {
    /// Total intensity.
    pub f: f64,
    /// Horizontal intensity.
    pub h: f64,
    /// North component.
    pub x: f64,
    /// East component.
    pub y: f64,
    /// Vertical component, positive down.
    pub z: f64,
    pub declination: f64,
    pub inclination: f64,
}

struct Epoch {
    /// Offset of the earlier epoch's coefficients.
    base: usize,
    /// Maximum degree.
    degree: usize,
    /// Weight of the earlier epoch.
    tc: f64,
    /// Weight of the later epoch (or of the secular variation).
    t: f64,
}

fn epoch(kind: FieldKind, date: f64) -> Epoch {
    if date < LAST_EPOCH {
        let t = 0.2 * (date - FIRST_YEAR);
        let index = t.floor();
        let fraction = t - index;
        let (base, degree) = if date < DEGREE_10_UNTIL {
            (120 * index as usize, 10)
        } else {
            (195 * ((date - DEGREE_10_UNTIL) * 0.2) as usize + FIRST_1995, 13)
        };
        let (tc, t) = match kind {
            FieldKind::Main => (1.0 - fraction, fraction),
            FieldKind::SecularVariation => (-0.2, 0.2),
        };
        Epoch { base, degree, tc, t }
    } else {
        let (tc, t) = match kind {
            FieldKind::Main => (1.0, date - LAST_EPOCH),
            FieldKind::SecularVariation => (0.0, 1.0),
        };
        Epoch {
            base: FIRST_2010,
            degree: 13,
            tc,
            t,
        }
    }
}

/// Synthesize the field at `date` (decimal year), altitude `alt` (km),
/// east longitude and latitude in degrees.
///
/// # Errors
///
/// [`Mgd77Error::BadIgrfDate`] outside 1900-2015 and
/// [`Mgd77Error::LatitudeOutOfRange`] outside [-90, 90].
#[allow(clippy::many_single_char_names)]
pub fn synthesize(
    kind: FieldKind,
    date: f64,
    coordinates: Coordinates,
    alt: f64,
    lon: f64,
    lat: f64,
) -> Result<FieldComponents> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&date) {
        return Err(Mgd77Error::BadIgrfDate { date });
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(Mgd77Error::LatitudeOutOfRange { lat });
    }

    let Epoch { base, degree, tc, t } = epoch(kind, date);
    let nc = degree * (degree + 2);
    let kmx = (degree + 1) * (degree + 2) / 2;

    let (mut st, mut ct) = (90.0 - lat).to_radians().sin_cos();
    let mut sl = [0.0; 14];
    let mut cl = [0.0; 14];
    (sl[0], cl[0]) = lon.to_radians().sin_cos();

    let mut r = alt;
    let mut cd = 1.0;
    let mut sd = 0.0;
    if coordinates == Coordinates::Geodetic {
        let one = WGS84_A2 * st * st;
        let two = WGS84_B2 * ct * ct;
        let three = one + two;
        let rho = three.sqrt();
        r = (alt * (alt + rho * 2.0) + (WGS84_A2 * one + WGS84_B2 * two) / three).sqrt();
        cd = (alt + rho) / r;
        sd = (WGS84_A2 - WGS84_B2) / rho * ct * st / r;
        let old_ct = ct;
        ct = ct * cd - st * sd;
        st = st * cd + old_ct * sd;
    }
    let ratio = EARTH_RADIUS / r;
    let mut rr = ratio * ratio;

    // Schmidt quasi-normalized associated Legendre functions p and their
    // derivatives q, 1-based as in the recurrence.
    let mut p = [0.0; 106];
    let mut q = [0.0; 106];
    p[1] = 1.0;
    p[3] = st;
    q[1] = 0.0;
    q[3] = ct;

    let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
    let (mut l, mut m, mut n) = (1usize, 1usize, 0usize);
    let (mut fn_, mut gn) = (0.0, 0.0);
    let coeff = |index: usize| GH.get(index).copied().unwrap_or(0.0);

    for k in 2..=kmx {
        if n < m {
            m = 0;
            n += 1;
            rr *= ratio;
            fn_ = n as f64;
            gn = (n - 1) as f64;
        }
        let fm = m as f64;
        if k != 3 {
            if m == n {
                let one = (1.0 - 0.5 / fm).sqrt();
                let j = k - n - 1;
                p[k] = one * st * p[j];
                q[k] = one * (st * q[j] + ct * p[j]);
                cl[m - 1] = cl[m - 2] * cl[0] - sl[m - 2] * sl[0];
                sl[m - 1] = sl[m - 2] * cl[0] + cl[m - 2] * sl[0];
            } else {
                let gmm = (m * m) as f64;
                let one = (fn_ * fn_ - gmm).sqrt();
                let two = (gn * gn - gmm).sqrt() / one;
                let three = (fn_ + gn) / one;
                let i = k - n;
                let j = i - n + 1;
                p[k] = three * ct * p[i] - two * p[j];
                q[k] = three * (ct * q[i] - st * p[i]) - two * q[j];
            }
        }

        let lm = base + l;
        let one = (tc * coeff(lm - 1) + t * coeff(lm + nc - 1)) * rr;
        if m == 0 {
            x += one * q[k];
            z -= (fn_ + 1.0) * one * p[k];
            l += 1;
        } else {
            let two = (tc * coeff(lm) + t * coeff(lm + nc)) * rr;
            let three = one * cl[m - 1] + two * sl[m - 1];
            x += three * q[k];
            z -= (fn_ + 1.0) * three * p[k];
            if st == 0.0 {
                y += (one * sl[m - 1] - two * cl[m - 1]) * q[k] * ct;
            } else {
                y += (one * sl[m - 1] - two * cl[m - 1]) * fm * p[k] / st;
            }
            l += 2;
        }
        m += 1;
    }

    let old_x = x;
    x = x * cd + z * sd;
    z = z * cd - old_x * sd;
    let h = x.hypot(y);
    let f = h.hypot(z);
    Ok(FieldComponents {
        f,
        h,
        x,
        y,
        z,
        declination: y.atan2(x).to_degrees(),
        inclination: z.atan2(h).to_degrees(),
    })
}

/// Main-field total intensity at sea level.
///
/// # Errors
///
/// See [`synthesize`].
pub fn total_field(date: f64, lon: f64, lat: f64) -> Result<f64> {
    synthesize(FieldKind::Main, date, Coordinates::Geodetic, 0.0, lon, lat).map(|c| c.f)
}

/// Observed total field minus the IGRF at absolute time `time`.
///
/// NaN when any input is missing or the model rejects the date.
#[must_use]
pub fn magnetic_anomaly(time: f64, lon: f64, lat: f64, observed: f64) -> f64 {
    if time.is_nan() || lon.is_nan() || lat.is_nan() || observed.is_nan() {
        return f64::NAN;
    }
    time::fractional_year(time)
        .and_then(|year| total_field(year, lon, lat).ok())
        .map_or(f64::NAN, |igrf| observed - igrf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_outside_model_are_rejected() {
        for date in [1899.0, 2016.0, 1899.999] {
            let err = total_field(date, 0.0, 0.0).unwrap_err();
            assert!(matches!(err, Mgd77Error::BadIgrfDate { .. }), "{date}");
        }
        assert!(total_field(1900.0, 0.0, 0.0).is_ok());
        assert!(total_field(2015.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_latitude_checked() {
        assert!(matches!(
            total_field(2000.0, 0.0, 91.0),
            Err(Mgd77Error::LatitudeOutOfRange { .. })
        ));
    }

    #[test]
    fn test_field_magnitudes_are_plausible() {
        // Dipole-dominated: weakest near the equator, strongest near poles.
        let equator = total_field(2000.0, 0.0, 0.0).unwrap();
        let pole = total_field(2000.0, 0.0, -80.0).unwrap();
        assert!((20_000.0..45_000.0).contains(&equator), "{equator}");
        assert!((50_000.0..70_000.0).contains(&pole), "{pole}");
    }

    #[test]
    fn test_coefficients_match_published_epochs() {
        // g10, g11, h11 of the 1900, 1995 and 2010 models.
        assert_eq!(&GH[..3], &[-31543.0, -2298.0, 5922.0]);
        assert_eq!(GH[FIRST_1995], -29692.0);
        assert_eq!(&GH[FIRST_2010..FIRST_2010 + 3], &[-29496.5, -1585.9, 4945.1]);
    }

    #[test]
    fn test_reference_field_values() {
        // Geodetic, sea level: (date, lon, lat, F, Z).
        let cases = [
            (2000.0, 0.0, 0.0, 31_408.038, -14_827.761),
            (2005.0, 0.0, 0.0, 31_498.484, -15_052.678),
            (1985.0, -70.0, 40.0, 54_274.133, 50_407.988),
            (2000.5, -140.0, -30.0, 40_583.739, -29_462.877),
            (2012.0, 10.0, 60.0, 50_999.459, 48_706.592),
            (1990.0, 150.0, -60.0, 66_892.255, -66_579.538),
        ];
        for (date, lon, lat, f, z) in cases {
            let c = synthesize(FieldKind::Main, date, Coordinates::Geodetic, 0.0, lon, lat).unwrap();
            assert!((c.f - f).abs() < 1.0, "F at {date} ({lon}, {lat}): {}", c.f);
            assert!((c.z - z).abs() < 1.0, "Z at {date} ({lon}, {lat}): {}", c.z);
        }
    }

    #[test]
    fn test_components_are_consistent() {
        let c = synthesize(FieldKind::Main, 1985.5, Coordinates::Geodetic, 0.0, 240.0, 35.0).unwrap();
        assert!((c.h - c.x.hypot(c.y)).abs() < 1e-6);
        assert!((c.f - c.h.hypot(c.z)).abs() < 1e-6);
        assert!(c.z > 0.0, "northern hemisphere field points down");
        assert!(c.inclination > 0.0);
    }

    #[test]
    fn test_epoch_interpolation_is_continuous() {
        // Degrees 11-13 join the sum at 1995.
        let before = total_field(1994.9999, 30.0, 10.0).unwrap();
        let after = total_field(1995.0, 30.0, 10.0).unwrap();
        assert!((before - after).abs() < 100.0);
        let before = total_field(2009.9999, 30.0, 10.0).unwrap();
        let after = total_field(2010.0, 30.0, 10.0).unwrap();
        assert!((before - after).abs() < 1.0);
    }

    #[test]
    fn test_anomaly_propagates_missing() {
        assert!(magnetic_anomaly(f64::NAN, 0.0, 0.0, 40_000.0).is_nan());
        let t = time::to_unix_seconds(1990, 6, 1, 0.0).unwrap();
        let anomaly = magnetic_anomaly(t, 10.0, 10.0, 35_000.0);
        assert!(anomaly.is_finite());
        let t = time::to_unix_seconds(2020, 1, 1, 0.0).unwrap();
        assert!(magnetic_anomaly(t, 10.0, 10.0, 35_000.0).is_nan());
    }
}
