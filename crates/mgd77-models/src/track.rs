//! Along-track geometry: cumulative distance, course and speed.

use mgd77_core::HeaderParams;
use mgd77_core::params::item;
use mgd77_core::time;

/// Mean Earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_008.7714;

/// Unit distances are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Meter,
    Foot,
    Kilometer,
    StatuteMile,
    NauticalMile,
}

impl DistanceUnit {
    /// Unit for a one-letter code: `f`, `k`, `M`, `n`; anything else is meters.
    #[must_use]
    pub fn from_code(code: char) -> Self {
        match code {
            'f' => Self::Foot,
            'k' => Self::Kilometer,
            'M' => Self::StatuteMile,
            'n' => Self::NauticalMile,
            _ => Self::Meter,
        }
    }

    /// Length of one unit in meters.
    #[must_use]
    pub fn meters(self) -> f64 {
        match self {
            Self::Meter => 1.0,
            Self::Foot => 0.3048,
            Self::Kilometer => 1000.0,
            Self::StatuteMile => 1609.344,
            Self::NauticalMile => 1852.0,
        }
    }

    /// Convert `meters` into this unit.
    #[must_use]
    pub fn from_meters(self, meters: f64) -> f64 {
        meters / self.meters()
    }
}

fn delta_lon(lon0: f64, lon1: f64) -> f64 {
    let mut d = lon1 - lon0;
    if d > 180.0 {
        d -= 360.0;
    } else if d < -180.0 {
        d += 360.0;
    }
    d
}

/// Distance in meters between two points.
#[must_use]
pub fn distance(lon0: f64, lat0: f64, lon1: f64, lat1: f64, flat_earth: bool) -> f64 {
    if flat_earth {
        let dx = delta_lon(lon0, lon1) * (0.5 * (lat0 + lat1)).to_radians().cos();
        let dy = lat1 - lat0;
        dx.hypot(dy).to_radians() * EARTH_RADIUS_M
    } else {
        let (phi0, phi1) = (lat0.to_radians(), lat1.to_radians());
        let h = (0.5 * (phi1 - phi0)).sin().powi(2)
            + phi0.cos() * phi1.cos() * (0.5 * delta_lon(lon0, lon1).to_radians()).sin().powi(2);
        2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
    }
}

/// Cumulative distance in meters along the track. Missing positions add
/// nothing and carry the previous distance.
#[must_use]
pub fn cumulative_distance(lon: &[f64], lat: &[f64], flat_earth: bool) -> Vec<f64> {
    let mut out = Vec::with_capacity(lon.len());
    let mut total = 0.0;
    let mut last: Option<(f64, f64)> = None;
    for (&x, &y) in lon.iter().zip(lat) {
        if x.is_nan() || y.is_nan() {
            out.push(if last.is_some() { total } else { f64::NAN });
            continue;
        }
        if let Some((x0, y0)) = last {
            total += distance(x0, y0, x, y, flat_earth);
        }
        last = Some((x, y));
        out.push(total);
    }
    out
}

/// Initial bearing in degrees [0, 360) from point 0 to point 1.
#[must_use]
pub fn azimuth(lon0: f64, lat0: f64, lon1: f64, lat1: f64) -> f64 {
    let (phi0, phi1) = (lat0.to_radians(), lat1.to_radians());
    let dl = delta_lon(lon0, lon1).to_radians();
    let y = dl.sin() * phi1.cos();
    let x = phi0.cos() * phi1.sin() - phi0.sin() * phi1.cos() * dl.cos();
    y.atan2(x).to_degrees().rem_euclid(360.0)
}

/// Course at each record, from the previous point; the first record uses
/// the course towards the second.
#[must_use]
pub fn azimuths(lon: &[f64], lat: &[f64]) -> Vec<f64> {
    let n = lon.len().min(lat.len());
    let mut out: Vec<f64> = (1..n)
        .map(|i| azimuth(lon[i - 1], lat[i - 1], lon[i], lat[i]))
        .collect();
    match out.first().copied() {
        Some(first) => out.insert(0, first),
        None if n == 1 => out.push(f64::NAN),
        None => {}
    }
    out
}

/// Speed in m/s from cumulative distance (m) and time (s); the first record
/// copies the second.
#[must_use]
pub fn speeds(distance: &[f64], times: &[f64]) -> Vec<f64> {
    let n = distance.len().min(times.len());
    let mut out: Vec<f64> = (1..n)
        .map(|i| {
            let dt = times[i] - times[i - 1];
            if dt > 0.0 { (distance[i] - distance[i - 1]) / dt } else { f64::NAN }
        })
        .collect();
    match out.first().copied() {
        Some(first) => out.insert(0, first),
        None if n == 1 => out.push(f64::NAN),
        None => {}
    }
    out
}

fn header_number(params: &HeaderParams, index: usize) -> Option<i32> {
    params.get(index).trim().parse().ok()
}

/// Absolute times interpolated along cumulative flat-earth distance between
/// the header's departure and arrival dates, for cruises without times.
///
/// `None` when either year is missing, arrival is not after departure, or
/// the track has no length. Missing month or day defaults to 1.
#[must_use]
pub fn fake_times(params: &HeaderParams, lon: &[f64], lat: &[f64]) -> Option<Vec<f64>> {
    let date = |year, month, day| -> Option<f64> {
        let y = header_number(params, year).filter(|&y| y != 0)?;
        let m = header_number(params, month).and_then(|m| u32::try_from(m).ok()).unwrap_or(1);
        let d = header_number(params, day).and_then(|d| u32::try_from(d).ok()).unwrap_or(1);
        time::to_unix_seconds(y, m, d, 0.0)
    };
    let t0 = date(item::SURVEY_DEPARTURE_YEAR, item::SURVEY_DEPARTURE_MONTH, item::SURVEY_DEPARTURE_DAY)?;
    let t1 = date(item::SURVEY_ARRIVAL_YEAR, item::SURVEY_ARRIVAL_MONTH, item::SURVEY_ARRIVAL_DAY)?;
    if t1 <= t0 {
        return None;
    }
    let dist = cumulative_distance(lon, lat, true);
    let total = dist.last().copied().filter(|&d| d > 0.0)?;
    let slowness = (t1 - t0) / total;
    Some(dist.iter().map(|d| t0 + slowness * d).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units() {
        assert_eq!(DistanceUnit::from_code('k').meters(), 1000.0);
        assert_eq!(DistanceUnit::from_code('n').from_meters(3704.0), 2.0);
        assert_eq!(DistanceUnit::from_code('M'), DistanceUnit::StatuteMile);
        assert_eq!(DistanceUnit::from_code('f').meters(), 0.3048);
        assert_eq!(DistanceUnit::from_code('x'), DistanceUnit::Meter);
    }

    #[test]
    fn test_degree_along_equator() {
        let one_degree = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;
        assert!((distance(0.0, 0.0, 1.0, 0.0, false) - one_degree).abs() < 1e-6);
        assert!((distance(0.0, 0.0, 1.0, 0.0, true) - one_degree).abs() < 1e-6);
        assert!((distance(179.5, 0.0, -179.5, 0.0, false) - one_degree).abs() < 1e-6);
    }

    #[test]
    fn test_cumulative_distance_skips_missing() {
        let lon = [0.0, 1.0, f64::NAN, 2.0];
        let lat = [0.0, 0.0, 0.0, 0.0];
        let d = cumulative_distance(&lon, &lat, true);
        assert_eq!(d[0], 0.0);
        assert_eq!(d[1], d[2]);
        assert!((d[3] - 2.0 * d[1]).abs() < 1e-6);
    }

    #[test]
    fn test_azimuths_and_speeds() {
        let lon = [0.0, 0.0, 1.0];
        let lat = [0.0, 1.0, 1.0];
        let az = azimuths(&lon, &lat);
        assert_eq!(az.len(), 3);
        assert!(az[0].abs() < 1e-9 && az[1].abs() < 1e-9);
        assert!((az[2] - 90.0).abs() < 0.01);

        let v = speeds(&[0.0, 100.0, 300.0], &[0.0, 10.0, 20.0]);
        assert_eq!(v, [10.0, 10.0, 20.0]);
    }

    #[test]
    fn test_fake_times() {
        let mut params = HeaderParams::default();
        params.set(item::SURVEY_DEPARTURE_YEAR, "1990");
        params.set(item::SURVEY_ARRIVAL_YEAR, "1990");
        params.set(item::SURVEY_ARRIVAL_MONTH, "01");
        params.set(item::SURVEY_ARRIVAL_DAY, "03");
        let lon = [0.0, 1.0, 2.0];
        let lat = [0.0, 0.0, 0.0];
        let t = fake_times(&params, &lon, &lat).unwrap();
        let t0 = time::to_unix_seconds(1990, 1, 1, 0.0).unwrap();
        assert_eq!(t[0], t0);
        assert!((t[1] - (t0 + 86_400.0)).abs() < 1e-6);
        assert!((t[2] - (t0 + 2.0 * 86_400.0)).abs() < 1e-6);

        params.set(item::SURVEY_ARRIVAL_YEAR, "");
        assert!(fake_times(&params, &lon, &lat).is_none());
        params.set(item::SURVEY_ARRIVAL_YEAR, "1989");
        assert!(fake_times(&params, &lon, &lat).is_none());
    }
}
