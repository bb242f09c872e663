//! Scale/offset codec between physical values and narrow storage types.
//!
//! Physical values are always `f64`. On disk, numeric columns are stored as
//! signed bytes, shorts, ints, floats or doubles. Encoding applies
//! `(value - offset) / scale`, rounds to the nearest integer for integer
//! storage, and substitutes the storage sentinel for missing (NaN) values and
//! for anything that lands outside the representable range.

use serde::{Deserialize, Serialize};
use std::fmt;

/// On-disk storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StorageKind {
    /// Signed 8-bit integer.
    Byte,
    /// 8-bit character (text columns).
    Char,
    /// Signed 16-bit integer.
    Short,
    /// Signed 32-bit integer.
    Int,
    /// 32-bit IEEE float.
    Float,
    /// 64-bit IEEE float.
    Double,
}

/// Missing-value sentinel and valid range for a storage type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageLimits {
    /// Stored value that stands for "missing".
    pub sentinel: f64,
    /// Lowest encodable value.
    pub low: f64,
    /// Highest encodable value.
    pub high: f64,
}

const BYTE_LIMITS: StorageLimits = StorageLimits {
    sentinel: i8::MIN as f64,
    low: i8::MIN as f64,
    high: i8::MAX as f64,
};
const SHORT_LIMITS: StorageLimits = StorageLimits {
    sentinel: i16::MIN as f64,
    low: i16::MIN as f64,
    high: i16::MAX as f64,
};
const INT_LIMITS: StorageLimits = StorageLimits {
    sentinel: i32::MIN as f64,
    low: i32::MIN as f64,
    high: i32::MAX as f64,
};
const FLOAT_LIMITS: StorageLimits = StorageLimits {
    sentinel: f64::NAN,
    low: -f32::MAX as f64,
    high: f32::MAX as f64,
};
const DOUBLE_LIMITS: StorageLimits = StorageLimits {
    sentinel: f64::NAN,
    low: -f64::MAX,
    high: f64::MAX,
};

impl StorageKind {
    /// Sentinel and range for this storage type.
    #[must_use]
    pub const fn limits(self) -> StorageLimits {
        match self {
            Self::Byte | Self::Char => BYTE_LIMITS,
            Self::Short => SHORT_LIMITS,
            Self::Int => INT_LIMITS,
            Self::Float => FLOAT_LIMITS,
            Self::Double => DOUBLE_LIMITS,
        }
    }

    /// True for the integer storage types that require rounding.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Byte | Self::Char | Self::Short | Self::Int)
    }

    /// Size of one stored element in bytes.
    #[must_use]
    pub const fn size(self) -> usize {
        match self {
            Self::Byte | Self::Char => 1,
            Self::Short => 2,
            Self::Int | Self::Float => 4,
            Self::Double => 8,
        }
    }

    /// netCDF classic type code (`NC_BYTE` = 1 .. `NC_DOUBLE` = 6).
    #[must_use]
    pub const fn nc_type(self) -> u32 {
        match self {
            Self::Byte => 1,
            Self::Char => 2,
            Self::Short => 3,
            Self::Int => 4,
            Self::Float => 5,
            Self::Double => 6,
        }
    }

    /// Inverse of [`StorageKind::nc_type`].
    #[must_use]
    pub const fn from_nc_type(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Byte),
            2 => Some(Self::Char),
            3 => Some(Self::Short),
            4 => Some(Self::Int),
            5 => Some(Self::Float),
            6 => Some(Self::Double),
            _ => None,
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Byte => "byte",
            Self::Char => "char",
            Self::Short => "short",
            Self::Int => "int",
            Self::Float => "float",
            Self::Double => "double",
        };
        f.write_str(name)
    }
}

/// Outcome of encoding a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Encoded {
    /// Stored values (still held as `f64`, one per input).
    pub values: Vec<f64>,
    /// Number of finite inputs that fell outside the storage range.
    pub n_overflow: usize,
}

/// Encode physical values for storage.
///
/// NaN inputs become the sentinel. Finite values whose encoded form is
/// outside the storage range also become the sentinel and are counted.
#[must_use]
pub fn encode(values: &[f64], scale: f64, offset: f64, kind: StorageKind) -> Encoded {
    let limits = kind.limits();
    let round = kind.is_integer();
    let transform: Box<dyn Fn(f64) -> f64> = if scale == 1.0 && offset == 0.0 {
        Box::new(|x| x)
    } else if offset == 0.0 {
        let i_scale = 1.0 / scale;
        Box::new(move |x| x * i_scale)
    } else if scale == 1.0 {
        Box::new(move |x| x - offset)
    } else {
        let i_scale = 1.0 / scale;
        Box::new(move |x| (x - offset) * i_scale)
    };

    let mut n_overflow = 0;
    let values = values
        .iter()
        .map(|&x| {
            if x.is_nan() {
                return limits.sentinel;
            }
            let mut y = transform(x);
            if round {
                y = y.round_ties_even();
            }
            if y < limits.low || y > limits.high || y.is_nan() {
                n_overflow += 1;
                limits.sentinel
            } else {
                y
            }
        })
        .collect();
    Encoded { values, n_overflow }
}

/// Decode stored values in place.
///
/// A stored value equal to `sentinel` becomes NaN before any scaling is
/// applied. A NaN sentinel (float storage) needs no check.
pub fn decode(values: &mut [f64], scale: f64, offset: f64, sentinel: f64) {
    let check = !sentinel.is_nan();
    for x in values.iter_mut() {
        if check && *x == sentinel {
            *x = f64::NAN;
        } else if offset == 0.0 {
            if scale != 1.0 {
                *x *= scale;
            }
        } else if scale == 1.0 {
            *x += offset;
        } else {
            *x = *x * scale + offset;
        }
    }
}

/// Effective scale/offset once a correction factor/offset is folded in.
///
/// Stored values decode as `stored * scale + offset`; the corrected
/// physical value is `decoded * corr_factor + corr_offset`.
#[must_use]
pub fn corrected_scale_offset(
    scale: f64,
    offset: f64,
    corr_factor: f64,
    corr_offset: f64,
) -> (f64, f64) {
    (scale * corr_factor, offset * corr_factor + corr_offset)
}

/// Whether a column is constant across the file and its (min, max).
///
/// NaNs are skipped. All-NaN input is constant with no range.
#[must_use]
pub fn constant_and_limits(values: &[f64]) -> (bool, Option<(f64, f64)>) {
    let mut iter = values.iter().copied().filter(|v| !v.is_nan());
    let Some(first) = iter.next() else {
        return (true, None);
    };
    let (mut lo, mut hi, mut last) = (first, first, first);
    let mut constant = true;
    for v in iter {
        if v != last {
            constant = false;
        }
        lo = lo.min(v);
        hi = hi.max(v);
        last = v;
    }
    (constant, Some((lo, hi)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rounds_for_integers() {
        let out = encode(&[1.4, 2.5, -3.6], 1.0, 0.0, StorageKind::Int);
        assert_eq!(out.values, vec![1.0, 2.0, -4.0]);
        assert_eq!(out.n_overflow, 0);
    }

    #[test]
    fn test_float_storage_keeps_fraction() {
        let out = encode(&[1.25], 0.5, 0.0, StorageKind::Double);
        assert_eq!(out.values, vec![2.5]);
    }

    #[test]
    fn test_nan_becomes_sentinel_without_overflow() {
        let out = encode(&[f64::NAN], 0.1, 0.0, StorageKind::Short);
        assert_eq!(out.values, vec![f64::from(i16::MIN)]);
        assert_eq!(out.n_overflow, 0);
    }

    #[test]
    fn test_overflow_counted() {
        let out = encode(&[100.0, 12.8, -12.9], 0.1, 0.0, StorageKind::Byte);
        assert_eq!(out.values, vec![-128.0, -128.0, -128.0]);
        assert_eq!(out.n_overflow, 3);
    }

    #[test]
    fn test_offset_only() {
        let out = encode(&[980_010.0], 1.0, 980_000.0, StorageKind::Int);
        assert_eq!(out.values, vec![10.0]);
        let mut back = out.values.clone();
        decode(&mut back, 1.0, 980_000.0, StorageKind::Int.limits().sentinel);
        assert_eq!(back, vec![980_010.0]);
    }

    #[test]
    fn test_decode_sentinel_before_scaling() {
        let mut v = vec![f64::from(i32::MIN), 5.0];
        decode(&mut v, 1.0e-5, 980_000.0, f64::from(i32::MIN));
        assert!(v[0].is_nan());
        assert!((v[1] - 980_000.000_05).abs() < 1e-9);
    }

    #[test]
    fn test_corrected_scale_offset() {
        assert_eq!(corrected_scale_offset(0.1, 0.0, 1.0, 0.0), (0.1, 0.0));
        assert_eq!(corrected_scale_offset(2.0, 10.0, 3.0, 1.0), (6.0, 31.0));
    }

    #[test]
    fn test_constant_and_limits() {
        assert_eq!(constant_and_limits(&[f64::NAN, f64::NAN]), (true, None));
        assert_eq!(
            constant_and_limits(&[2.0, f64::NAN, 2.0]),
            (true, Some((2.0, 2.0)))
        );
        assert_eq!(
            constant_and_limits(&[3.0, 1.0, 2.0]),
            (false, Some((1.0, 3.0)))
        );
    }

    #[test]
    fn test_nc_type_codes() {
        for kind in [
            StorageKind::Byte,
            StorageKind::Char,
            StorageKind::Short,
            StorageKind::Int,
            StorageKind::Float,
            StorageKind::Double,
        ] {
            assert_eq!(StorageKind::from_nc_type(kind.nc_type()), Some(kind));
        }
        assert_eq!(StorageKind::from_nc_type(9), None);
    }
}
