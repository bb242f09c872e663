//! Column selection and per-record filtering.
//!
//! A selection string has the shape
//!
//! ```text
//! col1,col2,...,colA<op>value,colB<op>value,...[:+colX,-colY,...]
//! ```
//!
//! Plain names choose output columns in order; a name written entirely in
//! upper case must be non-missing for a record to pass. `<op>` is one of
//! `=`, `!=`, `<`, `<=`, `>`, `>=` or `|` (bitwise AND). At least one
//! constraint must hold, and every upper-case constraint must hold. After
//! the colon, `+col`/`-col` require the column's flag bit set or clear; an
//! empty list after the colon turns flag masking off.

use std::cmp::Ordering;

use serde::Serialize;
use tracing::warn;

use crate::columns::SetId;
use crate::dataset::{ColumnValues, Dataset};
use crate::error::{Mgd77Error, Result};
use crate::fields;

/// Relational test of a constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    /// Any bit of the limit set in the value.
    BitAnd,
}

impl Relation {
    /// Numeric test. NaN never passes an ordering test; `Eq` matches two
    /// NaNs and `Ne` matches when exactly one side is NaN.
    #[must_use]
    pub fn test_numeric(self, value: f64, limit: f64) -> bool {
        match self {
            Self::Eq => (value.is_nan() && limit.is_nan()) || value == limit,
            Self::Ne => match (value.is_nan(), limit.is_nan()) {
                (true, true) => false,
                (true, false) | (false, true) => true,
                (false, false) => value != limit,
            },
            Self::Lt => !value.is_nan() && value < limit,
            Self::Le => !value.is_nan() && value <= limit,
            Self::Gt => !value.is_nan() && value > limit,
            Self::Ge => !value.is_nan() && value >= limit,
            Self::BitAnd => {
                if value.is_nan() || limit.is_nan() {
                    return false;
                }
                (value.round_ties_even() as i64 as u32) & (limit.round_ties_even() as i64 as u32) != 0
            }
        }
    }

    /// Lexical test over the first `width` bytes; `None` for `BitAnd`.
    #[must_use]
    pub fn test_text(self, value: &str, limit: &str, width: usize) -> Option<bool> {
        let a = &value.as_bytes()[..value.len().min(width)];
        let b = &limit.as_bytes()[..limit.len().min(width)];
        let ord = a.cmp(b);
        Some(match self {
            Self::Eq => ord == Ordering::Equal,
            Self::Ne => ord != Ordering::Equal,
            Self::Lt => ord == Ordering::Less,
            Self::Le => ord != Ordering::Greater,
            Self::Gt => ord == Ordering::Greater,
            Self::Ge => ord != Ordering::Less,
            Self::BitAnd => return None,
        })
    }
}

/// A `name<op>value` test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    pub column: String,
    pub relation: Relation,
    /// Right-hand side as written; `NaN` is the missing value.
    pub limit: String,
    /// Must pass, rather than one-of-many.
    pub exact: bool,
}

/// Requirement on one column's flag bit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BitTest {
    pub column: String,
    /// True for `+col` (bit must be set).
    pub set: bool,
}

/// How the time column is presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TimeFormat {
    /// Calendar time (`time`, `atime`).
    #[default]
    Absolute,
    /// Seconds since the epoch (`rtime`).
    Relative,
    /// Decimal year (`ytime`).
    FractionalYear,
}

/// Parsed selection string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    /// Desired output columns, lower case, in order.
    pub columns: Vec<String>,
    /// Columns that must be non-missing.
    pub exact: Vec<String>,
    pub constraints: Vec<Constraint>,
    pub bit_tests: Vec<BitTest>,
    /// Apply stored flag bits as missing-value masks.
    pub use_flags: bool,
    pub time_format: TimeFormat,
    /// Flat-earth instead of great-circle distances (`fdist`).
    pub flat_earth: bool,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            columns: Vec::new(),
            exact: Vec::new(),
            constraints: Vec::new(),
            bit_tests: Vec::new(),
            use_flags: true,
            time_format: TimeFormat::Absolute,
            flat_earth: false,
        }
    }
}

fn split_operator(word: &str) -> Option<(&str, Relation, &str)> {
    let bytes = word.as_bytes();
    for (k, &c) in bytes.iter().enumerate() {
        let next = bytes.get(k + 1).copied();
        let relation = match c {
            b'>' if next == Some(b'=') => Relation::Ge,
            b'>' => Relation::Gt,
            b'<' if next == Some(b'=') => Relation::Le,
            b'<' => Relation::Lt,
            b'=' => Relation::Eq,
            b'|' => Relation::BitAnd,
            b'!' if next == Some(b'=') => Relation::Ne,
            _ => continue,
        };
        let value = word[k + 1..].trim_start_matches(['>', '<', '=', '!']);
        return Some((&word[..k], relation, value));
    }
    None
}

fn is_upper_case(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_uppercase()) && !word.chars().any(|c| c.is_ascii_lowercase())
}

impl Selection {
    /// Parse a selection string.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::BadArgument`] for a malformed bit test or an empty
    /// column name.
    pub fn parse(spec: &str) -> Result<Self> {
        Self::parse_with(spec, false)
    }

    /// Parse, treating every column as upper case when `all_exact` is set.
    ///
    /// # Errors
    ///
    /// See [`Selection::parse`].
    pub fn parse_with(spec: &str, all_exact: bool) -> Result<Self> {
        let mut selection = Self::default();
        if spec.is_empty() {
            return Ok(selection);
        }
        let (columns, bits) = match spec.split_once(':') {
            Some((c, b)) => (c, Some(b)),
            None => (spec, None),
        };

        for word in columns.split(',').filter(|w| !w.is_empty()) {
            let (name, op) = match split_operator(word) {
                Some((name, relation, value)) => (name, Some((relation, value))),
                None => (word, None),
            };
            if name.is_empty() {
                return Err(Mgd77Error::bad_argument(format!("missing column name in \"{word}\"")));
            }
            let exact = all_exact || is_upper_case(name);
            let mut name = name.to_ascii_lowercase();
            match name.as_str() {
                "atime" => name = "time".to_string(),
                "rtime" => {
                    name = "time".to_string();
                    selection.time_format = TimeFormat::Relative;
                }
                "ytime" => {
                    name = "time".to_string();
                    selection.time_format = TimeFormat::FractionalYear;
                }
                "fdist" => {
                    name = "dist".to_string();
                    selection.flat_earth = true;
                }
                "edist" => {
                    name = "dist".to_string();
                    selection.flat_earth = false;
                }
                _ => {}
            }

            if let Some((relation, value)) = op {
                selection.constraints.push(Constraint {
                    column: name,
                    relation,
                    limit: value.to_string(),
                    exact,
                });
            } else {
                if selection.columns.contains(&name) {
                    warn!(column = %name, "column given more than once");
                }
                if exact {
                    selection.exact.push(name.clone());
                }
                selection.columns.push(name);
            }
        }

        if let Some(bits) = bits {
            if bits.is_empty() {
                selection.use_flags = false;
            }
            for word in bits.split(',').filter(|w| !w.is_empty()) {
                let (set, column) = if let Some(rest) = word.strip_prefix('+') {
                    (true, rest)
                } else if let Some(rest) = word.strip_prefix('-') {
                    (false, rest)
                } else {
                    return Err(Mgd77Error::bad_argument(format!(
                        "bit test \"{word}\" is not in +<col> or -<col> format"
                    )));
                };
                selection.bit_tests.push(BitTest {
                    column: column.to_string(),
                    set,
                });
            }
        }
        Ok(selection)
    }

    /// True when no record can be rejected.
    #[must_use]
    pub fn is_trivial(&self) -> bool {
        self.exact.is_empty() && self.constraints.is_empty() && self.bit_tests.is_empty()
    }

    /// Resolve every test against the output columns of `dataset`.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::NoSuchColumn`] when a tested column is not in the
    /// output; [`Mgd77Error::BadArgument`] for `|` on a text column or a
    /// numeric column compared against something that is not a number.
    pub fn record_filter(&self, dataset: &Dataset) -> Result<RecordFilter> {
        let position = |name: &str| {
            dataset.position(name).ok_or_else(|| Mgd77Error::NoSuchColumn {
                name: name.to_string(),
            })
        };
        let exact = self
            .exact
            .iter()
            .map(|name| position(name))
            .collect::<Result<Vec<_>>>()?;

        let mut constraints = Vec::with_capacity(self.constraints.len());
        for c in &self.constraints {
            let pos = position(&c.column)?;
            let width = dataset.info(pos).map_or(0, |info| info.text_len);
            let limit = if width > 0 {
                if c.relation == Relation::BitAnd {
                    return Err(Mgd77Error::bad_argument(format!(
                        "bit test not allowed on text column {}",
                        c.column
                    )));
                }
                Limit::Text(c.limit.clone(), width)
            } else if c.limit == "NaN" {
                Limit::Numeric(f64::NAN)
            } else {
                let value = c.limit.trim().parse().map_err(|_| {
                    Mgd77Error::bad_argument(format!(
                        "constraint on {} has a non-numeric limit \"{}\"",
                        c.column, c.limit
                    ))
                })?;
                Limit::Numeric(value)
            };
            constraints.push(ResolvedConstraint {
                pos,
                relation: c.relation,
                limit,
                exact: c.exact,
            });
        }

        let bits = self
            .bit_tests
            .iter()
            .map(|b| {
                let r = dataset
                    .header
                    .catalog
                    .resolve(&b.column)
                    .ok_or_else(|| Mgd77Error::NoSuchColumn {
                        name: b.column.clone(),
                    })?;
                Ok(ResolvedBitTest {
                    set: r.set,
                    mask: fields::bit(r.item),
                    required: b.set,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(RecordFilter {
            exact,
            constraints,
            bits,
        })
    }
}

#[derive(Debug, Clone)]
enum Limit {
    Numeric(f64),
    Text(String, usize),
}

#[derive(Debug, Clone)]
struct ResolvedConstraint {
    pos: usize,
    relation: Relation,
    limit: Limit,
    exact: bool,
}

#[derive(Debug, Clone)]
struct ResolvedBitTest {
    set: SetId,
    mask: u32,
    required: bool,
}

/// Selection tests bound to the output positions of one dataset.
#[derive(Debug, Clone)]
pub struct RecordFilter {
    exact: Vec<usize>,
    constraints: Vec<ResolvedConstraint>,
    bits: Vec<ResolvedBitTest>,
}

impl RecordFilter {
    /// Decide whether record `rec` of `dataset` passes.
    #[must_use]
    pub fn passes(&self, dataset: &Dataset, rec: usize) -> bool {
        for &pos in &self.exact {
            let missing = match &dataset.values[pos] {
                ColumnValues::Numeric(v) => v.get(rec).is_none_or(|x| x.is_nan()),
                ColumnValues::Text(v) => v.get(rec).is_none_or(|s| s.trim().is_empty()),
            };
            if missing {
                return false;
            }
        }

        if !self.constraints.is_empty() {
            let mut n_passed = 0;
            for c in &self.constraints {
                let pass = match (&dataset.values[c.pos], &c.limit) {
                    (ColumnValues::Numeric(v), Limit::Numeric(limit)) => v
                        .get(rec)
                        .is_some_and(|x| c.relation.test_numeric(*x, *limit)),
                    (ColumnValues::Text(v), Limit::Text(limit, width)) => v
                        .get(rec)
                        .and_then(|s| c.relation.test_text(s, limit, *width))
                        .unwrap_or(false),
                    _ => false,
                };
                if pass {
                    n_passed += 1;
                } else if c.exact {
                    return false;
                }
            }
            if n_passed == 0 {
                return false;
            }
        }

        self.bits.iter().all(|b| {
            let flag = dataset.flags[b.set.index()]
                .as_ref()
                .and_then(|f| f.get(rec).copied())
                .unwrap_or(0);
            (flag & b.mask != 0) == b.required
        })
    }

    /// Drop every record of `dataset` that fails; returns how many were dropped.
    pub fn apply(&self, dataset: &mut Dataset) -> usize {
        let keep: Vec<bool> = (0..dataset.n_records()).map(|i| self.passes(dataset, i)).collect();
        let dropped = keep.iter().filter(|k| !**k).count();
        if dropped > 0 {
            dataset.retain(&keep);
        }
        dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Header;

    fn dataset(lat: Vec<f64>, depth: Vec<f64>) -> Dataset {
        let mut header = Header::plain(Default::default(), lat.len(), false);
        let order = header.catalog.order_columns(&["lat", "depth", "id"]).unwrap();
        let ids = vec!["AB12".to_string(); lat.len()];
        let mut ds = Dataset::new(header, order);
        ds.values = vec![
            ColumnValues::Numeric(lat),
            ColumnValues::Numeric(depth),
            ColumnValues::Text(ids),
        ];
        ds
    }

    #[test]
    fn test_parse_columns_constraints_and_bits() {
        let s = Selection::parse("LAT,lon,depth>=1000,ID=AB:+depth,-mag").unwrap();
        assert_eq!(s.columns, ["lat", "lon"]);
        assert_eq!(s.exact, ["lat"]);
        assert_eq!(s.constraints.len(), 2);
        assert_eq!(s.constraints[0].relation, Relation::Ge);
        assert_eq!(s.constraints[0].limit, "1000");
        assert!(!s.constraints[0].exact);
        assert!(s.constraints[1].exact);
        assert_eq!(s.constraints[1].column, "id");
        assert_eq!(s.bit_tests[1], BitTest { column: "mag".into(), set: false });
        assert!(s.use_flags);
    }

    #[test]
    fn test_parse_time_aliases_and_flag_switch() {
        let s = Selection::parse("rtime,fdist:").unwrap();
        assert_eq!(s.columns, ["time", "dist"]);
        assert_eq!(s.time_format, TimeFormat::Relative);
        assert!(s.flat_earth);
        assert!(!s.use_flags);
        assert!(Selection::parse("lat:depth").is_err());
    }

    #[test]
    fn test_exact_column_rejects_missing_latitude() {
        let ds = dataset(vec![f64::NAN, 12.0, 13.0], vec![4000.0, 4000.0, 500.0]);
        let mut selection = Selection::parse("depth>1000").unwrap();
        selection.exact.push("lat".into());
        let filter = selection.record_filter(&ds).unwrap();
        assert!(!filter.passes(&ds, 0));
        assert!(filter.passes(&ds, 1));
        assert!(!filter.passes(&ds, 2));
    }

    #[test]
    fn test_one_of_many_and_must_pass() {
        let ds = dataset(vec![10.0, 50.0], vec![100.0, 100.0]);
        let loose = Selection::parse("lat<20,depth>1000").unwrap().record_filter(&ds).unwrap();
        assert!(loose.passes(&ds, 0));
        assert!(!loose.passes(&ds, 1));
        let strict = Selection::parse("lat<20,DEPTH>1000").unwrap().record_filter(&ds).unwrap();
        assert!(!strict.passes(&ds, 0));
    }

    #[test]
    fn test_text_constraint_compares_bytes() {
        let ds = dataset(vec![1.0], vec![1.0]);
        let f = Selection::parse("id>=AB00").unwrap().record_filter(&ds).unwrap();
        assert!(f.passes(&ds, 0));
        let f = Selection::parse("id<AA").unwrap().record_filter(&ds).unwrap();
        assert!(!f.passes(&ds, 0));
        assert!(Selection::parse("id|1").unwrap().record_filter(&ds).is_err());
    }

    #[test]
    fn test_non_numeric_limit_is_rejected() {
        let ds = dataset(vec![1.0], vec![1.0]);
        let err = Selection::parse("depth>abc").unwrap().record_filter(&ds).unwrap_err();
        assert!(matches!(err, Mgd77Error::BadArgument { ref message } if message.contains("depth")));
        assert!(Selection::parse("depth>-12.5").unwrap().record_filter(&ds).is_ok());
    }

    #[test]
    fn test_apply_drops_failures() {
        let mut ds = dataset(vec![1.0, f64::NAN, 3.0], vec![1.0, 2.0, 3.0]);
        let f = Selection::parse("LAT").unwrap().record_filter(&ds).unwrap();
        assert_eq!(f.apply(&mut ds), 1);
        assert_eq!(ds.numeric("lat"), Some(&[1.0, 3.0][..]));
    }

    #[test]
    fn test_numeric_relations_with_nan() {
        assert!(Relation::Eq.test_numeric(f64::NAN, f64::NAN));
        assert!(!Relation::Ne.test_numeric(f64::NAN, f64::NAN));
        assert!(Relation::Ne.test_numeric(1.0, f64::NAN));
        assert!(!Relation::Lt.test_numeric(f64::NAN, 5.0));
        assert!(Relation::BitAnd.test_numeric(6.0, 2.0));
        assert!(!Relation::BitAnd.test_numeric(4.0, 2.0));
    }
}
