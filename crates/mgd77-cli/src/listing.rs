//! Tab-separated rendering of selected columns.

use std::io::Write;

use chrono::{DateTime, Utc};
use mgd77_core::selection::TimeFormat;
use mgd77_core::{ColumnValues, Dataset, time};

/// One numeric value as listed. Missing values print as `NaN`.
#[must_use]
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

/// Absolute time rendered per `format`.
#[must_use]
pub fn format_time(seconds: f64, format: TimeFormat) -> String {
    if !seconds.is_finite() {
        return "NaN".to_string();
    }
    match format {
        TimeFormat::Absolute => iso_time(seconds),
        TimeFormat::Relative => format_value(seconds),
        TimeFormat::FractionalYear => time::fractional_year(seconds)
            .map_or_else(|| "NaN".to_string(), |y| format!("{y:.8}")),
    }
}

fn iso_time(seconds: f64) -> String {
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9).round().min(999_999_999.0) as u32;
    DateTime::<Utc>::from_timestamp(whole as i64, nanos).map_or_else(
        || format_value(seconds),
        |t| t.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
    )
}

/// Write every record of `dataset` as one tab-separated line, with an
/// optional `#`-prefixed line of column names first. Returns the number of
/// records written.
///
/// # Errors
///
/// Write failures.
pub fn write_records<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    time_format: TimeFormat,
    with_names: bool,
) -> std::io::Result<usize> {
    let names = dataset.column_names();
    if with_names {
        writeln!(out, "#{}", names.join("\t"))?;
    }
    let n = dataset.n_records();
    let mut line = Vec::with_capacity(names.len());
    for rec in 0..n {
        line.clear();
        for (name, column) in names.iter().zip(&dataset.values) {
            let cell = match column {
                ColumnValues::Numeric(v) if *name == "time" => format_time(v[rec], time_format),
                ColumnValues::Numeric(v) => format_value(v[rec]),
                ColumnValues::Text(v) => v[rec].clone(),
            };
            line.push(cell);
        }
        writeln!(out, "{}", line.join("\t"))?;
    }
    Ok(n)
}
