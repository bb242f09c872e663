//! Properties of track geometry over random fixes.

use mgd77_models::track::{azimuth, cumulative_distance, distance};
use proptest::prelude::*;

fn fix() -> impl Strategy<Value = (f64, f64)> {
    (-180.0f64..180.0, -89.0f64..89.0)
}

proptest! {
    #[test]
    fn distance_is_symmetric((lon0, lat0) in fix(), (lon1, lat1) in fix(), flat in any::<bool>()) {
        let ab = distance(lon0, lat0, lon1, lat1, flat);
        let ba = distance(lon1, lat1, lon0, lat0, flat);
        prop_assert!(ab >= 0.0);
        prop_assert!((ab - ba).abs() <= 1e-6 * ab.max(1.0));
    }

    #[test]
    fn cumulative_distance_never_decreases(track in prop::collection::vec(fix(), 1..30)) {
        let (lon, lat): (Vec<f64>, Vec<f64>) = track.into_iter().unzip();
        let d = cumulative_distance(&lon, &lat, false);
        prop_assert_eq!(d.len(), lon.len());
        prop_assert_eq!(d[0], 0.0);
        prop_assert!(d.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn azimuth_stays_on_the_compass((lon0, lat0) in fix(), (lon1, lat1) in fix()) {
        let a = azimuth(lon0, lat0, lon1, lat1);
        prop_assert!((0.0..=360.0).contains(&a), "{}", a);
    }
}
