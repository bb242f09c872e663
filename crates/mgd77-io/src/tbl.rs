//! Tab-delimited MGD77 tables.
//!
//! The 24 punch-card header records, a `#rec` column line, then one line
//! per record with the 27 punch-card fields in field order. Missing
//! numbers are written `NaN`; any value starting with `N` reads back as
//! missing. Missing text is all nines. The record type is the exception:
//! a row must start with `3` or `5` to read back, so a missing type is
//! written as `5`, the data-record type.

use std::io::{BufWriter, Write};

use mgd77_core::fields::{self, ALL_NINES, FIELDS, N_DATA_FIELDS, N_NUMBER_FIELDS, TBL_COLUMN_HEADER};
use mgd77_core::{DataRecord, Dataset, Header, Mgd77Error, ParamSet, Result};

use crate::m77::split_header;

/// Tab-separated reader over `text` that skips `#` lines.
pub(crate) fn tab_reader(text: &str) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .quoting(false)
        .flexible(true)
        .has_headers(false)
        .comment(Some(b'#'))
        .from_reader(text.as_bytes())
}

/// Tab-separated writer that never quotes.
pub(crate) fn tab_writer<W: Write>(writer: W) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .has_headers(false)
        .flexible(true)
        .from_writer(writer)
}

pub(crate) fn csv_error(e: csv::Error) -> Mgd77Error {
    Mgd77Error::Io(e.into())
}

pub(crate) fn is_missing_number(text: &str) -> bool {
    text.is_empty() || text.starts_with('N')
}

pub(crate) fn is_missing_text(text: &str) -> bool {
    text.is_empty() || text.bytes().all(|c| c == b'9')
}

/// Decode one table row; `record` is its 1-based number.
///
/// # Errors
///
/// [`Mgd77Error::WrongDataRecordLength`] for fewer than 27 fields,
/// [`Mgd77Error::NoDataRecord`] when the first field is not a record type
/// and [`Mgd77Error::NumericParse`] for an unreadable number.
pub fn parse_record(row: &csv::StringRecord, record: usize) -> Result<DataRecord> {
    if row.len() < N_DATA_FIELDS {
        return Err(Mgd77Error::WrongDataRecordLength {
            record,
            length: row.len(),
            expected: N_DATA_FIELDS,
        });
    }
    if !row[0].trim().starts_with(['3', '5']) {
        return Err(Mgd77Error::NoDataRecord { record });
    }
    let mut rec = DataRecord::default();
    for (i, def) in FIELDS[..N_NUMBER_FIELDS].iter().enumerate() {
        let text = row[i].trim();
        if is_missing_number(text) {
            continue;
        }
        let value: f64 = text.parse().map_err(|_| Mgd77Error::NumericParse {
            record,
            field: def.abbrev,
            text: text.to_string(),
        })?;
        if !value.is_nan() {
            rec.number[i] = value;
            rec.bit_pattern |= fields::bit(i);
        }
    }
    for (k, i) in (N_NUMBER_FIELDS..N_DATA_FIELDS).enumerate() {
        let text = row[i].trim();
        if !is_missing_text(text) {
            rec.words[k] = text.to_string();
            rec.bit_pattern |= fields::bit(i);
        }
    }
    rec.compute_time();
    Ok(rec)
}

fn format_record(rec: &DataRecord) -> Vec<String> {
    let mut out = Vec::with_capacity(N_DATA_FIELDS);
    for (i, &x) in rec.number[..N_NUMBER_FIELDS].iter().enumerate() {
        if x.is_nan() {
            out.push(if i == fields::DRT { "5".into() } else { "NaN".into() });
        } else {
            out.push(x.to_string());
        }
    }
    for i in N_NUMBER_FIELDS..N_DATA_FIELDS {
        let word = rec.word(i);
        out.push(if word.is_empty() {
            ALL_NINES[..FIELDS[i].length].to_string()
        } else {
            word.to_string()
        });
    }
    out
}

fn count_rows(body: &str) -> usize {
    body.lines()
        .filter(|l| !l.trim().is_empty() && !l.starts_with('#'))
        .count()
}

/// Header of a table file; the record count is the number of data lines.
///
/// # Errors
///
/// As for [`split_header`].
pub fn read_header(text: &str) -> Result<Header> {
    let (params, body) = split_header(text)?;
    Ok(Header::plain(params, count_rows(body), false))
}

/// Read a whole table file.
///
/// # Errors
///
/// Header errors as for [`split_header`], row errors as for
/// [`parse_record`].
pub fn read(text: &str) -> Result<Dataset> {
    let (params, body) = split_header(text)?;
    let mut records = Vec::with_capacity(count_rows(body));
    for row in tab_reader(body).records() {
        let row = row.map_err(csv_error)?;
        records.push(parse_record(&row, records.len() + 1)?);
    }
    let mut header = Header::plain(params, records.len(), false);
    let order = header.catalog.select_all();
    Ok(Dataset::from_records(header, order, &records))
}

/// Write `dataset` as a table with the header parameters of set `params`.
///
/// # Errors
///
/// I/O failures of `writer`.
pub fn write<W: Write>(writer: W, dataset: &Dataset, params: ParamSet) -> Result<()> {
    let mut w = BufWriter::new(writer);
    for line in dataset.header.params(params).encode_m77() {
        writeln!(w, "{line}")?;
    }
    writeln!(w, "{TBL_COLUMN_HEADER}")?;
    let mut rows = tab_writer(w);
    for i in 0..dataset.n_records() {
        rows.write_record(format_record(&dataset.record(i)))
            .map_err(csv_error)?;
    }
    rows.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::m77;
    use crate::m77::tests::{LINE, header_text};

    #[test]
    fn test_missing_markers() {
        assert!(is_missing_number("NaN"));
        assert!(is_missing_number("N"));
        assert!(!is_missing_number("-1.5"));
        assert!(is_missing_text("99999"));
        assert!(!is_missing_text("9A"));
    }

    #[test]
    fn test_row_errors() {
        let short = csv::StringRecord::from(vec!["5", "0"]);
        assert!(matches!(
            parse_record(&short, 4),
            Err(Mgd77Error::WrongDataRecordLength { record: 4, length: 2, .. })
        ));
        let mut fields = vec!["NaN"; N_DATA_FIELDS];
        fields[0] = "4";
        assert!(matches!(
            parse_record(&csv::StringRecord::from(fields.clone()), 1),
            Err(Mgd77Error::NoDataRecord { record: 1 })
        ));
        fields[0] = "5";
        fields[fields::LATITUDE] = "north";
        assert!(matches!(
            parse_record(&csv::StringRecord::from(fields), 1),
            Err(Mgd77Error::NumericParse { field: "lat", .. })
        ));
    }

    #[test]
    fn test_missing_record_type_written_as_data_record() {
        let mut rec = m77::parse_record(LINE, 1).unwrap();
        rec.number[fields::DRT] = f64::NAN;
        let row = format_record(&rec);
        assert_eq!(row[fields::DRT], "5");
        let back = parse_record(&csv::StringRecord::from(row), 1).unwrap();
        assert_eq!(back.number[fields::DRT], 5.0);
    }

    #[test]
    fn test_roundtrip_through_table() {
        let mut rec = m77::parse_record(LINE, 1).unwrap();
        rec.number[fields::DEPTH] = f64::NAN;
        rec.words[1].clear();
        let mut header = Header::plain(
            m77::split_header(&header_text()).unwrap().0,
            1,
            false,
        );
        let order = header.catalog.select_all();
        let ds = Dataset::from_records(header, order, &[rec]);

        let mut out = Vec::new();
        write(&mut out, &ds, ParamSet::Revised).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains(TBL_COLUMN_HEADER));
        assert!(text.contains("\tNaN\t"));
        assert!(text.contains("\t99999\t"));

        let back = read(&text).unwrap();
        assert_eq!(back.n_records(), 1);
        assert_eq!(back.numeric("lat").unwrap(), [45.12345]);
        assert!(back.numeric("depth").unwrap()[0].is_nan());
        assert_eq!(back.text("sln").unwrap()[0], "");
        assert_eq!(back.text("sspn").unwrap()[0], "SHOT01");
        assert_eq!(back.numeric("time"), ds.numeric("time"));
        assert_eq!(read_header(&text).unwrap().n_records, 1);
    }
}
