//! Theoretical (normal) gravity formulas referenced by MGD77 header code
//! and used for free-air anomaly recomputation.

use std::fmt;

use serde::Serialize;
use tracing::warn;

/// Reference formulas by their MGD77 header code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GravityFormula {
    /// Code 1: Heiskanen 1924.
    Heiskanen1924,
    /// Code 2: International 1930.
    International1930,
    /// Code 3: IAG System 1967.
    Iag1967,
    /// Code 4: IAG System 1980.
    Iag1980,
}

impl GravityFormula {
    /// All formulas in code order.
    pub const ALL: [Self; 4] = [
        Self::Heiskanen1924,
        Self::International1930,
        Self::Iag1967,
        Self::Iag1980,
    ];

    /// Formula for a header code.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Heiskanen1924),
            2 => Some(Self::International1930),
            3 => Some(Self::Iag1967),
            4 => Some(Self::Iag1980),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Heiskanen1924 => 1,
            Self::International1930 => 2,
            Self::Iag1967 => 3,
            Self::Iag1980 => 4,
        }
    }

    /// The formula written out, as reported by file information commands.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Heiskanen1924 => {
                "Heiskanen 1924 Formula:\n\tg = 978052 (1 + 0.005285 * sin^2(lat) - 7e-6 * sin^2(2*lat) + 27e-6 * cos^2(lat) * cos^2(lon-18))"
            }
            Self::International1930 => {
                "International 1930 Formula:\n\tg = 978049 (1 + 0.0052884 * sin^2(lat) - 0.0000059 * sin^2(2*lat))"
            }
            Self::Iag1967 => {
                "IAG 1967 Formula:\n\tg = 978031.846 (1 + 0.0053024 * sin^2(lat) - 0.0000058 * sin^2(2*lat))"
            }
            Self::Iag1980 => {
                "IAG 1980 Formula:\n\tg = 978032.67714 (1 + 0.00193185138639 * sin^2(lat)) / sqrt (1 - 0.00669437999013 * sin^2(lat))"
            }
        }
    }

    /// Normal gravity in mGal at a position in degrees.
    #[must_use]
    pub fn theoretical(self, lon: f64, lat: f64) -> f64 {
        let lat = lat.to_radians();
        let s2 = lat.sin().powi(2);
        let s2_2 = (2.0 * lat).sin().powi(2);
        match self {
            Self::Heiskanen1924 => {
                let c2 = lat.cos().powi(2);
                let cl2 = (lon - 18.0).to_radians().cos().powi(2);
                978_052.0 * (1.0 + 0.005_285 * s2 - 0.000_007_0 * s2_2 + 0.000_027 * c2 * cl2)
            }
            Self::International1930 => 978_049.0 * (1.0 + 0.005_288_4 * s2 - 0.000_005_9 * s2_2),
            Self::Iag1967 => 978_031.846 * (1.0 + 0.005_302_4 * s2 - 0.000_005_8 * s2_2),
            Self::Iag1980 => {
                978_032.677_14 * ((1.0 + 0.001_931_851_386_39 * s2) / (1.0 - 0.006_694_379_990_13 * s2).sqrt())
            }
        }
    }
}

impl fmt::Display for GravityFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Heiskanen1924 => "Heiskanen 1924",
            Self::International1930 => "International 1930",
            Self::Iag1967 => "IAG 1967",
            Self::Iag1980 => "IAG 1980",
        };
        f.write_str(name)
    }
}

/// Normal gravity by header code; NaN for an unrecognized code.
#[must_use]
pub fn theoretical_gravity(lon: f64, lat: f64, code: i32) -> f64 {
    GravityFormula::from_code(code).map_or_else(
        || {
            warn!(code, "unrecognized theoretical gravity formula code");
            f64::NAN
        },
        |formula| formula.theoretical(lon, lat),
    )
}
