//! Ephemeral correction tables.
//!
//! A table line names a cruise, the column to correct, and the terms whose
//! sum is subtracted from that column:
//!
//! ```text
//! # cruise  column  terms
//! 01010008  depth   -4.2  0.5*cos(0.0174*(azim-T))  1e-3*((time-T))^2
//! ```
//!
//! Each term is a bare constant or `factor*OP(scale*(name[-origin]))[^power]`
//! with `OP` one of `cos`, `sin`, `exp` (degrees for the trigonometric ones)
//! or nothing for identity. An origin of `T` takes the value of the first
//! record of the cruise.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

use mgd77_core::{Mgd77Error, Result};
use tracing::{debug, warn};

/// Derived values a correction term may refer to besides file columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Aux {
    /// Cumulative distance along track (km).
    Dist,
    /// Course azimuth (degrees).
    Azim,
    /// Ship speed (m/s).
    Vel,
    Year,
    Month,
    Day,
    Hour,
    Min,
    /// Decimal minutes.
    Dmin,
    Sec,
    /// Date as YYYYMMDD.
    Date,
    /// Time as HHMM.mmm.
    Hhmm,
    Weight,
    /// Data record type.
    Drt,
    /// IGRF total field.
    Igrf,
    /// Carter correction to be added to the uncorrected depth.
    Carter,
    /// Theoretical gravity of the header's formula.
    Ngrav,
    /// NGDC identifier as a number.
    Ngdcid,
}

impl Aux {
    pub const ALL: [Self; 18] = [
        Self::Dist,
        Self::Azim,
        Self::Vel,
        Self::Year,
        Self::Month,
        Self::Day,
        Self::Hour,
        Self::Min,
        Self::Dmin,
        Self::Sec,
        Self::Date,
        Self::Hhmm,
        Self::Weight,
        Self::Drt,
        Self::Igrf,
        Self::Carter,
        Self::Ngrav,
        Self::Ngdcid,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Dist => "dist",
            Self::Azim => "azim",
            Self::Vel => "vel",
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Min => "min",
            Self::Dmin => "dmin",
            Self::Sec => "sec",
            Self::Date => "date",
            Self::Hhmm => "hhmm",
            Self::Weight => "weight",
            Self::Drt => "drt",
            Self::Igrf => "igrf",
            Self::Carter => "carter",
            Self::Ngrav => "ngrav",
            Self::Ngdcid => "ngdcid",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

impl fmt::Display for Aux {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a term's argument is taken from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variable {
    /// A data column, by abbreviation.
    Column(String),
    Aux(Aux),
}

impl Variable {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Column(name) => name,
            Self::Aux(aux) => aux.name(),
        }
    }
}

/// Basis function applied to the scaled argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Identity,
    /// Cosine of degrees.
    Cos,
    /// Sine of degrees.
    Sin,
    Exp,
}

impl Op {
    fn apply(self, x: f64) -> f64 {
        match self {
            Self::Identity => x,
            Self::Cos => x.to_radians().cos(),
            Self::Sin => x.to_radians().sin(),
            Self::Exp => x.exp(),
        }
    }
}

/// Value subtracted from the variable before scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Origin {
    Value(f64),
    /// Not known until the first record of the cruise is seen.
    FirstRecord,
}

/// One term of a correction.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Constant(f64),
    Function {
        op: Op,
        factor: f64,
        scale: f64,
        variable: Variable,
        origin: Origin,
        power: f64,
    },
}

impl Term {
    fn evaluate(&self, value: &impl Fn(&Variable) -> f64) -> f64 {
        match self {
            Self::Constant(c) => *c,
            Self::Function {
                op,
                factor,
                scale,
                variable,
                origin,
                power,
            } => {
                let origin = match origin {
                    Origin::Value(v) => *v,
                    Origin::FirstRecord => f64::NAN,
                };
                let basis = op.apply(scale * (value(variable) - origin));
                if *power == 1.0 {
                    factor * basis
                } else {
                    factor * basis.powf(*power)
                }
            }
        }
    }
}

/// The ordered terms correcting one column of one cruise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Correction {
    pub terms: Vec<Term>,
}

impl Correction {
    /// Sum of all terms for one record, given the record's variable values.
    #[must_use]
    pub fn evaluate(&self, value: impl Fn(&Variable) -> f64) -> f64 {
        self.terms.iter().map(|t| t.evaluate(&value)).sum()
    }

    /// Replace first-record origins with the first record's values.
    ///
    /// A missing first value becomes 0 with a warning.
    pub fn resolve_origins(&mut self, first: impl Fn(&Variable) -> f64) {
        for term in &mut self.terms {
            if let Term::Function {
                variable,
                origin: origin @ Origin::FirstRecord,
                ..
            } = term
            {
                let mut value = first(variable);
                if value.is_nan() {
                    warn!(variable = variable.name(), "first record value is NaN, origin set to 0");
                    value = 0.0;
                }
                *origin = Origin::Value(value);
            }
        }
    }

    /// True when any term still waits for a first-record origin.
    #[must_use]
    pub fn needs_origins(&self) -> bool {
        self.terms
            .iter()
            .any(|t| matches!(t, Term::Function { origin: Origin::FirstRecord, .. }))
    }

    /// Variables the terms read, in term order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.terms.iter().filter_map(|t| match t {
            Term::Function { variable, .. } => Some(variable),
            Term::Constant(_) => None,
        })
    }
}

/// Corrections of the cruises and columns of interest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrectionTable {
    entries: BTreeMap<(String, String), Correction>,
}

/// Leading numeric prefix of `s`, 0 when there is none.
fn atof(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut best = 0.0;
    while end < bytes.len() {
        end += 1;
        if let Some(Ok(v)) = s.get(..end).map(str::parse::<f64>) {
            best = v;
        } else if !matches!(bytes[end - 1], b'+' | b'-' | b'.' | b'e' | b'E' | b'0'..=b'9') {
            break;
        }
    }
    best
}

fn split_words(rest: &str) -> impl Iterator<Item = &str> {
    rest.split([' ', ',', '\t']).filter(|w| !w.is_empty())
}

fn parse_term(word: &str, columns: &[&str], line: usize) -> Result<Term> {
    let Some((factor, body)) = word.split_once('*') else {
        return Ok(Term::Constant(atof(word)));
    };
    let factor = atof(factor);
    let (op, body) = match body.as_bytes().first() {
        Some(b'c' | b'C') => (Op::Cos, body.get(3..).unwrap_or("")),
        Some(b's' | b'S') => (Op::Sin, body.get(3..).unwrap_or("")),
        Some(b'e' | b'E') => (Op::Exp, body.get(3..).unwrap_or("")),
        _ => (Op::Identity, body),
    };
    let body = body
        .strip_prefix('(')
        .ok_or_else(|| Mgd77Error::correction_table(line, "Expected 1st opening parenthesis"))?;
    let scale = if body.starts_with('(') { 1.0 } else { atof(body) };
    let (_, inner) = body
        .split_once('(')
        .ok_or_else(|| Mgd77Error::correction_table(line, "Expected 2nd opening parenthesis"))?;
    let close = inner.find(')').unwrap_or(inner.len());
    let (argument, tail) = inner.split_at(close);
    let (name, origin) = match argument.split_once('-') {
        Some((name, origin)) if origin.starts_with('T') => (name, Origin::FirstRecord),
        Some((name, origin)) => (name, Origin::Value(atof(origin))),
        None => (argument, Origin::Value(0.0)),
    };
    let variable = if columns.contains(&name) {
        Variable::Column(name.to_string())
    } else if let Some(aux) = Aux::from_name(name) {
        Variable::Aux(aux)
    } else {
        return Err(Mgd77Error::correction_table(
            line,
            format!("Column {name} not found - requested in the correction table"),
        ));
    };
    let power = tail.split_once('^').map_or(1.0, |(_, p)| atof(p));
    Ok(Term::Function {
        op,
        factor,
        scale,
        variable,
        origin,
        power,
    })
}

/// Split a table line into cruise, column and the term text.
fn split_line(text: &str) -> Option<(&str, &str, &str)> {
    let text = text.trim();
    if text.is_empty() || text.starts_with('#') {
        return None;
    }
    let (cruise, rest) = text.split_once(char::is_whitespace)?;
    let (column, rest) = rest.trim_start().split_once(char::is_whitespace)?;
    Some((cruise, column, rest.trim_start()))
}

impl CorrectionTable {
    /// Parse table text, keeping only `cruises` and `columns` of interest.
    ///
    /// Term names resolve against `columns` first and then the auxiliary
    /// names. Repeated lines for the same cruise and column append terms.
    ///
    /// # Errors
    ///
    /// [`Mgd77Error::CorrectionTable`] on a malformed term or unknown name.
    pub fn parse(text: &str, cruises: &[&str], columns: &[&str]) -> Result<Self> {
        let mut entries: BTreeMap<(String, String), Correction> = BTreeMap::new();
        for (index, raw) in text.lines().enumerate() {
            let Some((cruise, column, rest)) = split_line(raw) else {
                continue;
            };
            if !cruises.contains(&cruise) || !columns.contains(&column) {
                continue;
            }
            let terms = split_words(rest)
                .map(|word| parse_term(word, columns, index + 1))
                .collect::<Result<Vec<_>>>()?;
            entries
                .entry((cruise.to_string(), column.to_string()))
                .or_default()
                .terms
                .extend(terms);
        }
        debug!(n_corrections = entries.len(), "parsed correction table");
        Ok(Self { entries })
    }

    /// Read and parse a table file.
    ///
    /// # Errors
    ///
    /// File errors, or see [`CorrectionTable::parse`].
    pub fn load(path: impl AsRef<Path>, cruises: &[&str], columns: &[&str]) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::parse(&text, cruises, columns)
    }

    #[must_use]
    pub fn get(&self, cruise: &str, column: &str) -> Option<&Correction> {
        self.entries.get(&(cruise.to_string(), column.to_string()))
    }

    pub fn get_mut(&mut self, cruise: &str, column: &str) -> Option<&mut Correction> {
        self.entries.get_mut(&(cruise.to_string(), column.to_string()))
    }

    /// Corrections for one cruise, keyed by column.
    pub fn for_cruise<'a>(&'a self, cruise: &'a str) -> impl Iterator<Item = (&'a str, &'a Correction)> {
        self.entries
            .iter()
            .filter(move |((c, _), _)| c == cruise)
            .map(|((_, column), corr)| (column.as_str(), corr))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Every variable name referenced by table lines of the given cruises,
/// each once, in order of appearance.
#[must_use]
pub fn scan(text: &str, cruises: &[&str]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (cruise, _, rest) in text.lines().filter_map(split_line) {
        if !cruises.contains(&cruise) {
            continue;
        }
        for word in split_words(rest) {
            let Some(start) = word.rfind('(') else {
                continue;
            };
            let argument = &word[start + 1..];
            let end = argument.find(['-', ')']).unwrap_or(argument.len());
            let name = &argument[..end];
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
# test table
01010008 depth -4.2 0.5*cos(2*(azim-T)) 1e-3*((time-100))^2
01010008 mag 10*((mag))
01010008 faa 2.5
02020002 depth 1*((depth))
01010008 depth 3
";

    fn values(v: &Variable) -> f64 {
        match v.name() {
            "azim" => 45.0,
            "time" => 110.0,
            "mag" => 3.0,
            _ => f64::NAN,
        }
    }

    #[test]
    fn test_parse_filters_cruises_and_columns() {
        let table = CorrectionTable::parse(TABLE, &["01010008"], &["depth", "mag", "time"]).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.get("01010008", "faa").is_none());
        assert!(table.get("02020002", "depth").is_none());

        let depth = table.get("01010008", "depth").unwrap();
        assert_eq!(depth.terms.len(), 4);
        assert_eq!(depth.terms[0], Term::Constant(-4.2));
        assert_eq!(
            depth.terms[1],
            Term::Function {
                op: Op::Cos,
                factor: 0.5,
                scale: 2.0,
                variable: Variable::Aux(Aux::Azim),
                origin: Origin::FirstRecord,
                power: 1.0,
            }
        );
        assert!(depth.needs_origins());
    }

    #[test]
    fn test_evaluate_sums_terms() {
        let mut table = CorrectionTable::parse(TABLE, &["01010008"], &["depth", "mag", "time"]).unwrap();
        let depth = table.get_mut("01010008", "depth").unwrap();
        depth.resolve_origins(|v| if v.name() == "azim" { 0.0 } else { f64::NAN });
        assert!(!depth.needs_origins());
        // -4.2 + 0.5*cos(90°) + 1e-3*10^2 + 3
        let sum = depth.evaluate(values);
        assert!((sum - (-4.2 + 0.1 + 3.0)).abs() < 1e-12, "{sum}");

        let mag = table.get("01010008", "mag").unwrap();
        assert!((mag.evaluate(values) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_missing_first_value_gives_zero_origin() {
        let mut corr = Correction {
            terms: vec![Term::Function {
                op: Op::Identity,
                factor: 1.0,
                scale: 1.0,
                variable: Variable::Aux(Aux::Dist),
                origin: Origin::FirstRecord,
                power: 1.0,
            }],
        };
        corr.resolve_origins(|_| f64::NAN);
        assert_eq!(corr.evaluate(|_| 7.0), 7.0);
    }

    #[test]
    fn test_syntax_errors() {
        let err = CorrectionTable::parse("c1 depth 1*cos[x]", &["c1"], &["depth"]).unwrap_err();
        assert!(err.to_string().contains("Expected 1st opening parenthesis"));
        let err = CorrectionTable::parse("c1 depth 1*(2x)", &["c1"], &["depth"]).unwrap_err();
        assert!(err.to_string().contains("Expected 2nd opening parenthesis"));
        let err = CorrectionTable::parse("c1 depth 1*((bogus))", &["c1"], &["depth"]).unwrap_err();
        assert!(matches!(err, Mgd77Error::CorrectionTable { line: 1, .. }));
    }

    #[test]
    fn test_exp_sin_and_power() {
        let table = CorrectionTable::parse("c depth 2*exp(0.5*(dist-2))^2, 1*sin((azim))", &["c"], &["depth"])
            .unwrap();
        let corr = table.get("c", "depth").unwrap();
        let value = corr.evaluate(|v| match v {
            Variable::Aux(Aux::Dist) => 4.0,
            Variable::Aux(Aux::Azim) => 30.0,
            _ => f64::NAN,
        });
        let expected = 2.0 * 1f64.exp().powi(2) + 0.5;
        assert!((value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_scan_lists_names() {
        let names = scan(TABLE, &["01010008"]);
        assert_eq!(names, ["azim", "time", "mag"]);
    }

    #[test]
    fn test_atof_prefix() {
        assert_eq!(atof("0.01*(lat"), 0.01);
        assert_eq!(atof("-3e2)"), -300.0);
        assert_eq!(atof("x"), 0.0);
    }
}
