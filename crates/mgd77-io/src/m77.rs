//! Fixed-width MGD77 files.
//!
//! 24 header records of 80 characters, each ending in its two-digit
//! sequence number, followed by 120-character data records. Legacy
//! record-type `3` lines are rewritten to the current layout before any
//! field is decoded.

use std::io::{BufWriter, Write};

use mgd77_core::fields::{
    self, ALL_NINES, FIELDS, FLOAT_BITS, FieldDef, HEADER_LENGTH, N_DATA_FIELDS, N_HEADER_RECORDS,
    N_NUMBER_FIELDS, RECORD_LENGTH,
};
use mgd77_core::record::upgrade_legacy_record;
use mgd77_core::{DataRecord, Dataset, Header, HeaderParams, Mgd77Error, ParamSet, Result};
use tracing::warn;

/// Decode the 24 header records at the top of `text`, returning the
/// parameters and the text that follows them.
///
/// # Errors
///
/// [`Mgd77Error::NoHeaderRecord`] when the first line is not a header
/// record, [`Mgd77Error::HeaderTruncated`] when the text ends early and
/// [`Mgd77Error::WrongHeaderSequence`] when a line carries the wrong
/// sequence number.
pub fn split_header(text: &str) -> Result<(HeaderParams, &str)> {
    let mut records = Vec::with_capacity(N_HEADER_RECORDS);
    let mut consumed = 0;
    let mut lines = text.split_inclusive('\n');
    for seq in 1..=N_HEADER_RECORDS {
        let Some(raw) = lines.next() else {
            return Err(Mgd77Error::HeaderTruncated { seq });
        };
        consumed += raw.len();
        let line = raw.trim_end_matches(['\r', '\n']);
        if seq == 1 && !line.starts_with(['1', '4']) {
            return Err(Mgd77Error::NoHeaderRecord);
        }
        let found = line.get(HEADER_LENGTH - 2..HEADER_LENGTH).unwrap_or("").trim();
        if found.parse::<usize>().ok() != Some(seq) {
            return Err(Mgd77Error::WrongHeaderSequence {
                expected: seq,
                found: found.to_string(),
            });
        }
        records.push(line.to_string());
    }
    let params = HeaderParams::decode_m77(&records)?;
    Ok((params, &text[consumed..]))
}

/// Record count implied by the size of a fixed-width file.
#[must_use]
pub fn estimate_records(file_size: usize) -> usize {
    let header = N_HEADER_RECORDS * (HEADER_LENGTH + 1);
    let data = file_size.saturating_sub(header) as f64;
    (data / (RECORD_LENGTH + 1) as f64).round() as usize
}

fn field_text<'a>(bytes: &'a [u8], def: &FieldDef) -> std::borrow::Cow<'a, str> {
    String::from_utf8_lossy(&bytes[def.start - 1..def.start - 1 + def.length])
}

/// Decode one 120-character data record; `record` is its 1-based number.
///
/// Geophysical, correction and time fields equal to their not-given text
/// are missing, as is a `+99` time zone. Text fields of all nines are
/// missing.
///
/// # Errors
///
/// [`Mgd77Error::NoDataRecord`] when the line is not a type 3 or 5
/// record, [`Mgd77Error::WrongDataRecordLength`] for any other length and
/// [`Mgd77Error::NumericParse`] for a field that is not an integer.
pub fn parse_record(line: &str, record: usize) -> Result<DataRecord> {
    if !line.starts_with(['3', '5']) {
        return Err(Mgd77Error::NoDataRecord { record });
    }
    if line.len() != RECORD_LENGTH {
        return Err(Mgd77Error::WrongDataRecordLength {
            record,
            length: line.len(),
            expected: RECORD_LENGTH,
        });
    }
    let line = upgrade_legacy_record(line);
    let bytes = line.as_bytes();

    let mut rec = DataRecord::default();
    for (i, def) in FIELDS[..N_NUMBER_FIELDS].iter().enumerate() {
        let text = field_text(bytes, def);
        let may_be_missing = FLOAT_BITS & fields::bit(i) != 0 || i == fields::TZ;
        if may_be_missing && text == def.not_given {
            continue;
        }
        let value: i64 = text.trim().parse().map_err(|_| Mgd77Error::NumericParse {
            record,
            field: def.abbrev,
            text: text.to_string(),
        })?;
        rec.number[i] = value as f64 / def.factor;
        rec.bit_pattern |= fields::bit(i);
    }
    for (k, i) in (N_NUMBER_FIELDS..N_DATA_FIELDS).enumerate() {
        let text = field_text(bytes, &FIELDS[i]);
        if text.bytes().all(|c| c == b'9') {
            continue;
        }
        rec.words[k] = text.trim().to_string();
        rec.bit_pattern |= fields::bit(i);
    }
    rec.compute_time();
    Ok(rec)
}

/// Encode one record as a 120-character line.
///
/// Values that do not fit their field width are written as not given
/// and counted in `overflow`, indexed by field.
#[must_use]
pub fn format_record(rec: &DataRecord, overflow: &mut [usize; N_NUMBER_FIELDS]) -> String {
    let mut line = [b' '; RECORD_LENGTH];
    let mut put = |def: &FieldDef, text: &[u8]| {
        let at = def.start - 1;
        let n = text.len().min(def.length);
        line[at..at + n].copy_from_slice(&text[..n]);
    };

    for (i, def) in FIELDS[..N_NUMBER_FIELDS].iter().enumerate() {
        let x = rec.number[i];
        if x.is_nan() {
            put(def, def.not_given.as_bytes());
            continue;
        }
        let n = (x * def.factor).round_ties_even() as i64;
        let text = if def.signed {
            format!("{n:+0width$}", width = def.length)
        } else {
            format!("{n:0width$}", width = def.length)
        };
        if text.len() > def.length {
            overflow[i] += 1;
            put(def, def.not_given.as_bytes());
        } else {
            put(def, text.as_bytes());
        }
    }
    for i in N_NUMBER_FIELDS..N_DATA_FIELDS {
        let def = &FIELDS[i];
        let word = rec.word(i);
        if word.is_empty() {
            put(def, &ALL_NINES.as_bytes()[..def.length]);
        } else {
            put(def, word.as_bytes());
        }
    }
    String::from_utf8_lossy(&line).into_owned()
}

/// Log one warning per field that had values replaced on output.
pub(crate) fn report_overflow(overflow: &[usize; N_NUMBER_FIELDS]) {
    for (i, &count) in overflow.iter().enumerate() {
        if count > 0 {
            warn!(column = FIELDS[i].abbrev, count, "values too wide for the field written as not given");
        }
    }
}

/// Header of a fixed-width file; the record count is estimated from the
/// text length.
///
/// # Errors
///
/// As for [`split_header`].
pub fn read_header(text: &str) -> Result<Header> {
    let (params, _) = split_header(text)?;
    Ok(Header::plain(params, estimate_records(text.len()), false))
}

/// Read a whole fixed-width file. Blank lines are ignored.
///
/// # Errors
///
/// Header errors as for [`split_header`] and record errors as for
/// [`parse_record`].
pub fn read(text: &str) -> Result<Dataset> {
    let (params, body) = split_header(text)?;
    let mut records = Vec::with_capacity(estimate_records(text.len()));
    for line in body.lines() {
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        records.push(parse_record(line, records.len() + 1)?);
    }
    let mut header = Header::plain(params, records.len(), false);
    let order = header.catalog.select_all();
    Ok(Dataset::from_records(header, order, &records))
}

/// Write `dataset` with the header parameters of set `params`.
///
/// # Errors
///
/// I/O failures of `writer`.
pub fn write<W: Write>(writer: W, dataset: &Dataset, params: ParamSet) -> Result<()> {
    let mut w = BufWriter::new(writer);
    for line in dataset.header.params(params).encode_m77() {
        writeln!(w, "{line}")?;
    }
    let mut overflow = [0; N_NUMBER_FIELDS];
    for i in 0..dataset.n_records() {
        writeln!(w, "{}", format_record(&dataset.record(i), &mut overflow))?;
    }
    report_overflow(&overflow);
    w.flush()?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use mgd77_core::params::item;

    /// A current-format record with every field filled.
    pub(crate) const LINE: &str = "5TEST0001-05198506121230500+4512345-123456781012345000123401512345512346+001231+0012+000109801234+00123+0123ABCDESHOT011";

    pub(crate) fn header_text() -> String {
        let mut params = HeaderParams::default();
        params.set(item::RECORD_TYPE, "4");
        params.set(item::SURVEY_IDENTIFIER, "TEST0001");
        params.set(item::FORMAT_ACRONYM, "MGD77");
        let mut text = String::new();
        for line in params.encode_m77() {
            text.push_str(&line);
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_sample_line_is_well_formed() {
        assert_eq!(LINE.len(), RECORD_LENGTH);
    }

    #[test]
    fn test_parse_record_fields() {
        let rec = parse_record(LINE, 1).unwrap();
        assert_eq!(rec.word(fields::ID), "TEST0001");
        assert_eq!(rec.number[fields::TZ], -5.0);
        assert_eq!(rec.number[fields::YEAR], 1985.0);
        assert_eq!(rec.number[fields::MIN], 30.5);
        assert_eq!(rec.number[fields::LATITUDE], 45.12345);
        assert_eq!(rec.number[fields::LONGITUDE], -123.45678);
        assert_eq!(rec.number[fields::TWT], 1.2345);
        assert_eq!(rec.number[fields::DEPTH], 12.3);
        assert_eq!(rec.number[fields::GOBS], 980_123.4);
        assert_eq!(rec.number[fields::MAG], 12.3);
        assert_eq!(rec.word(fields::SLN), "ABCDE");
        assert_eq!(rec.word(fields::SSPN), "SHOT01");
        assert_eq!(rec.number[fields::NQC], 1.0);
        assert!(rec.has(fields::TIME));
    }

    #[test]
    fn test_not_given_fields_are_missing() {
        let mut line = LINE.to_string();
        line.replace_range(9..12, "+99");
        line.replace_range(51..57, "999999");
        line.replace_range(108..113, "99999");
        let rec = parse_record(&line, 1).unwrap();
        assert!(rec.number[fields::TZ].is_nan());
        assert!(rec.number[fields::DEPTH].is_nan());
        assert!(!rec.has(fields::DEPTH));
        assert_eq!(rec.word(fields::SLN), "");
        assert!(!rec.has(fields::SLN));
        // Unspecified codes are values, not gaps.
        line.replace_range(44..45, "9");
        assert_eq!(parse_record(&line, 1).unwrap().number[fields::PTC], 9.0);
    }

    #[test]
    fn test_record_errors() {
        assert!(matches!(
            parse_record(&LINE[..100], 7),
            Err(Mgd77Error::WrongDataRecordLength { record: 7, length: 100, .. })
        ));
        assert!(matches!(
            parse_record(&LINE.replacen('5', "4", 1), 2),
            Err(Mgd77Error::NoDataRecord { record: 2 })
        ));
        let mut bad = LINE.to_string();
        bad.replace_range(27..35, "+45x2345");
        assert!(matches!(
            parse_record(&bad, 3),
            Err(Mgd77Error::NumericParse { field: "lat", .. })
        ));
    }

    #[test]
    fn test_format_record_roundtrip() {
        let rec = parse_record(LINE, 1).unwrap();
        let mut overflow = [0; N_NUMBER_FIELDS];
        assert_eq!(format_record(&rec, &mut overflow), LINE);
        assert!(overflow.iter().all(|&n| n == 0));
    }

    #[test]
    fn test_format_record_overflow() {
        let mut rec = parse_record(LINE, 1).unwrap();
        rec.number[fields::DEPTH] = 123_456.0;
        let mut overflow = [0; N_NUMBER_FIELDS];
        let line = format_record(&rec, &mut overflow);
        assert_eq!(&line[51..57], "999999");
        assert_eq!(overflow[fields::DEPTH], 1);
    }

    #[test]
    fn test_wrong_sequence_rejected() {
        let mut text = header_text();
        let mut lines: Vec<String> = text.lines().map(str::to_string).collect();
        lines[12].replace_range(78..80, "14");
        text = lines.join("\n");
        let err = split_header(&text).unwrap_err();
        assert!(matches!(
            err,
            Mgd77Error::WrongHeaderSequence { expected: 13, ref found } if found == "14"
        ));
    }

    #[test]
    fn test_truncated_and_missing_header() {
        let text: String = header_text().lines().take(10).map(|l| format!("{l}\n")).collect();
        assert!(matches!(split_header(&text), Err(Mgd77Error::HeaderTruncated { seq: 11 })));
        assert!(matches!(split_header(LINE), Err(Mgd77Error::NoHeaderRecord)));
    }

    #[test]
    fn test_read_whole_file() {
        let text = format!("{}{LINE}\n\n", header_text());
        let ds = read(&text).unwrap();
        assert_eq!(ds.n_records(), 1);
        assert_eq!(ds.header.params(ParamSet::Revised).get(item::SURVEY_IDENTIFIER), "TEST0001");
        assert_eq!(ds.numeric("lat").unwrap(), [45.12345]);
        assert_eq!(read_header(&text).unwrap().n_records, 1);

        let mut out = Vec::new();
        write(&mut out, &ds, ParamSet::Revised).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}{LINE}\n", header_text()));
    }
}
