//! Tab-delimited MGD77T files.
//!
//! A header label line, the header value line, a column label line, then
//! one tab-separated line per record. Dates are packed `YYYYMMDD` and
//! times `HHMM.mmm`; an empty field is missing.

use std::io::{BufWriter, Write};

use mgd77_core::fields::{self, FIELDS};
use mgd77_core::params::m77t_label_line;
use mgd77_core::{DataRecord, Dataset, Header, HeaderParams, Mgd77Error, ParamSet, Result};

use crate::tbl::{csv_error, is_missing_number, tab_reader, tab_writer};

/// Record columns in line order, by canonical field index.
const COLUMNS: [Column; 26] = [
    Column::Word(fields::ID),
    Column::Number(fields::TZ),
    Column::Date,
    Column::Time,
    Column::Number(fields::LATITUDE),
    Column::Number(fields::LONGITUDE),
    Column::Number(fields::PTC),
    Column::Number(fields::NQC),
    Column::Number(fields::TWT),
    Column::Number(fields::DEPTH),
    Column::Number(fields::BCC),
    Column::Number(fields::BTC),
    Column::Number(fields::BQC),
    Column::Number(fields::MTF1),
    Column::Number(fields::MTF2),
    Column::Number(fields::MAG),
    Column::Number(fields::MSENS),
    Column::Number(fields::DIUR),
    Column::Number(fields::MSD),
    Column::Number(fields::MQC),
    Column::Number(fields::GOBS),
    Column::Number(fields::EOT),
    Column::Number(fields::FAA),
    Column::Number(fields::GQC),
    Column::Word(fields::SLN),
    Column::Word(fields::SSPN),
];

/// Column label line preceding the records.
pub const DATA_LABEL_LINE: &str = "SURVEY_ID\tTIMEZONE\tDATE\tTIME\tLAT\tLON\tPOS_TYPE\tNAV_QUALCO\tBAT_TTIME\tCORR_DEPTH\tBAT_CPCO\tBAT_TYPCO\tBAT_QUALCO\tMAG_TOT\tMAG_TOT2\tMAG_RES\tMAG_RESSEN\tMAG_DICORR\tMAG_SDEPTH\tMAG_QUALCO\tGRA_OBS\tEOTVOS\tFREEAIR\tGRA_QUALCO\tLINEID\tPOINTID";

#[derive(Debug, Clone, Copy)]
enum Column {
    Number(usize),
    Word(usize),
    Date,
    Time,
}

/// Digits after the decimal point for field `index`.
fn decimals(index: usize) -> usize {
    FIELDS[index].factor.log10().round().max(0.0) as usize
}

fn set(rec: &mut DataRecord, index: usize, value: f64) {
    rec.number[index] = value;
    rec.bit_pattern |= fields::bit(index);
}

fn parse_number(text: &str, record: usize, field: &'static str) -> Result<Option<f64>> {
    if is_missing_number(text) {
        return Ok(None);
    }
    text.parse::<f64>()
        .map(|v| (!v.is_nan()).then_some(v))
        .map_err(|_| Mgd77Error::NumericParse {
            record,
            field,
            text: text.to_string(),
        })
}

/// Decode one record row; `record` is its 1-based number.
///
/// # Errors
///
/// [`Mgd77Error::WrongDataRecordLength`] for fewer than 26 fields and
/// [`Mgd77Error::NumericParse`] for an unreadable number.
pub fn parse_record(row: &csv::StringRecord, record: usize) -> Result<DataRecord> {
    if row.len() < COLUMNS.len() {
        return Err(Mgd77Error::WrongDataRecordLength {
            record,
            length: row.len(),
            expected: COLUMNS.len(),
        });
    }
    let mut rec = DataRecord::default();
    set(&mut rec, fields::DRT, 5.0);
    for (column, text) in COLUMNS.iter().zip(row.iter()) {
        let text = text.trim();
        match *column {
            Column::Number(i) => {
                if let Some(v) = parse_number(text, record, FIELDS[i].abbrev)? {
                    set(&mut rec, i, v);
                }
            }
            Column::Word(i) => {
                if !text.is_empty() {
                    rec.words[i - fields::ID] = text.to_string();
                    rec.bit_pattern |= fields::bit(i);
                }
            }
            Column::Date => {
                if let Some(v) = parse_number(text, record, "date")? {
                    let date = v.round() as i64;
                    set(&mut rec, fields::YEAR, (date / 10_000) as f64);
                    set(&mut rec, fields::MONTH, (date / 100 % 100) as f64);
                    set(&mut rec, fields::DAY, (date % 100) as f64);
                }
            }
            Column::Time => {
                if let Some(v) = parse_number(text, record, "time")? {
                    let hour = (v / 100.0).floor();
                    set(&mut rec, fields::HOUR, hour);
                    set(&mut rec, fields::MIN, v - 100.0 * hour);
                }
            }
        }
    }
    rec.compute_time();
    Ok(rec)
}

/// Hour and minutes in thousandths, with minutes that round up to 60
/// carried into the hour. The last thousandth of a day stays in hour 23.
fn clock_reading(hour: f64, min: f64) -> (i64, i64) {
    let mut hour = hour as i64;
    let mut thousandths = (min * 1000.0).round() as i64;
    if thousandths >= 60_000 {
        if hour < 23 {
            hour += 1;
            thousandths -= 60_000;
        } else {
            thousandths = 59_999;
        }
    }
    (hour, thousandths)
}

fn format_record(rec: &DataRecord) -> Vec<String> {
    let n = &rec.number;
    COLUMNS
        .iter()
        .map(|column| match *column {
            Column::Number(i) if n[i].is_nan() => String::new(),
            Column::Number(i) => format!("{:.*}", decimals(i), n[i]),
            Column::Word(i) => rec.word(i).to_string(),
            Column::Date => {
                if [fields::YEAR, fields::MONTH, fields::DAY].iter().any(|&i| n[i].is_nan()) {
                    String::new()
                } else {
                    format!(
                        "{:04}{:02}{:02}",
                        n[fields::YEAR] as i64,
                        n[fields::MONTH] as i64,
                        n[fields::DAY] as i64
                    )
                }
            }
            Column::Time => {
                if n[fields::HOUR].is_nan() || n[fields::MIN].is_nan() {
                    String::new()
                } else {
                    let (hour, thousandths) = clock_reading(n[fields::HOUR], n[fields::MIN]);
                    format!("{hour:02}{:02}.{:03}", thousandths / 1000, thousandths % 1000)
                }
            }
        })
        .collect()
}

fn split_lines(text: &str) -> Result<(&str, &str)> {
    let mut parts = text.splitn(3, '\n');
    let labels = parts.next().unwrap_or("");
    let first_label = m77t_label_line();
    let first_label = first_label.split('\t').next().unwrap_or_default();
    if labels.split('\t').next() != Some(first_label) {
        return Err(Mgd77Error::NoHeaderRecord);
    }
    let Some(values) = parts.next() else {
        return Err(Mgd77Error::HeaderTruncated { seq: 2 });
    };
    Ok((values, parts.next().unwrap_or("")))
}

fn count_rows(body: &str) -> usize {
    body.lines()
        .filter(|l| !l.trim().is_empty() && !l.starts_with("SURVEY_ID"))
        .count()
}

fn strip_data_labels(body: &str) -> &str {
    if body.starts_with("SURVEY_ID") {
        body.split_once('\n').map_or("", |(_, rest)| rest)
    } else {
        body
    }
}

/// Header of an MGD77T file; the record count is the number of data lines.
///
/// # Errors
///
/// [`Mgd77Error::NoHeaderRecord`] when the first line is not the header
/// label line, [`Mgd77Error::HeaderTruncated`] when the value line is
/// absent.
pub fn read_header(text: &str) -> Result<Header> {
    let (values, body) = split_lines(text)?;
    Ok(Header::plain(
        HeaderParams::decode_m77t(values),
        count_rows(body),
        true,
    ))
}

/// Read a whole MGD77T file.
///
/// # Errors
///
/// Header errors as for [`read_header`], row errors as for
/// [`parse_record`].
pub fn read(text: &str) -> Result<Dataset> {
    let (values, body) = split_lines(text)?;
    let body = strip_data_labels(body);
    let mut records = Vec::with_capacity(count_rows(body));
    for row in tab_reader(body).records() {
        let row = row.map_err(csv_error)?;
        records.push(parse_record(&row, records.len() + 1)?);
    }
    let mut header = Header::plain(HeaderParams::decode_m77t(values), records.len(), true);
    let order = header.catalog.select_all();
    Ok(Dataset::from_records(header, order, &records))
}

/// Write `dataset` as MGD77T with the header parameters of set `params`.
///
/// # Errors
///
/// I/O failures of `writer`.
pub fn write<W: Write>(writer: W, dataset: &Dataset, params: ParamSet) -> Result<()> {
    let mut w = BufWriter::new(writer);
    writeln!(w, "{}", m77t_label_line())?;
    writeln!(w, "{}", dataset.header.params(params).encode_m77t())?;
    writeln!(w, "{DATA_LABEL_LINE}")?;
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
    use mgd77_core::params::item;

    fn row(fields: &[&str]) -> csv::StringRecord {
        csv::StringRecord::from(fields.to_vec())
    }

    const FULL: [&str; 26] = [
        "TEST0001", "-5", "19850612", "1230.500", "45.12345", "-123.45678", "1", "9", "1.2345",
        "12.3", "40", "1", "1", "51234.5", "51234.6", "12.3", "1", "1.2", "10", "2", "980123.4",
        "12.3", "12.3", "3", "ABCDE", "SHOT01",
    ];

    #[test]
    fn test_decimals_follow_field_factor() {
        assert_eq!(decimals(fields::LATITUDE), 5);
        assert_eq!(decimals(fields::TWT), 4);
        assert_eq!(decimals(fields::TZ), 0);
        assert_eq!(decimals(fields::GOBS), 1);
    }

    #[test]
    fn test_parse_full_record() {
        let rec = parse_record(&row(&FULL), 1).unwrap();
        assert_eq!(rec.number[fields::DRT], 5.0);
        assert_eq!(rec.number[fields::YEAR], 1985.0);
        assert_eq!(rec.number[fields::DAY], 12.0);
        assert_eq!(rec.number[fields::HOUR], 12.0);
        assert!((rec.number[fields::MIN] - 30.5).abs() < 1e-9);
        assert_eq!(rec.number[fields::BQC], 1.0);
        assert_eq!(rec.number[fields::GQC], 3.0);
        assert_eq!(rec.word(fields::SSPN), "SHOT01");
        assert!(rec.has(fields::TIME));

        assert_eq!(format_record(&rec), FULL);
    }

    #[test]
    fn test_minutes_rounding_to_sixty_carry_into_hour() {
        let mut rec = parse_record(&row(&FULL), 1).unwrap();
        rec.number[fields::HOUR] = 12.0;
        rec.number[fields::MIN] = 59.9996;
        assert_eq!(format_record(&rec)[3], "1300.000");
        rec.number[fields::MIN] = 59.9994;
        assert_eq!(format_record(&rec)[3], "1259.999");
        rec.number[fields::MIN] = 5.25;
        assert_eq!(format_record(&rec)[3], "1205.250");
        rec.number[fields::HOUR] = 23.0;
        rec.number[fields::MIN] = 59.9999;
        assert_eq!(format_record(&rec)[3], "2359.999");
    }

    #[test]
    fn test_empty_fields_are_missing() {
        let mut fields_in = FULL;
        fields_in[3] = "";
        fields_in[9] = "NaN";
        fields_in[12] = "";
        fields_in[24] = "";
        let rec = parse_record(&row(&fields_in), 1).unwrap();
        assert!(rec.number[fields::HOUR].is_nan());
        assert!(rec.time().is_nan());
        assert!(rec.number[fields::DEPTH].is_nan());
        assert!(!rec.has(fields::BQC));
        assert_eq!(rec.word(fields::SLN), "");
    }

    #[test]
    fn test_short_row_and_bad_number() {
        assert!(matches!(
            parse_record(&row(&FULL[..20]), 3),
            Err(Mgd77Error::WrongDataRecordLength { record: 3, length: 20, .. })
        ));
        let mut bad = FULL;
        bad[8] = "1.2.3";
        assert!(matches!(
            parse_record(&row(&bad), 1),
            Err(Mgd77Error::NumericParse { field: "twt", .. })
        ));
    }

    #[test]
    fn test_header_lines() {
        let mut params = HeaderParams::default();
        params.set(item::SURVEY_IDENTIFIER, "TEST0001");
        params.set(item::SURVEY_DEPARTURE_YEAR, "1985");
        params.set(item::SURVEY_DEPARTURE_MONTH, "06");
        params.set(item::SURVEY_DEPARTURE_DAY, "12");
        let text = format!(
            "{}\n{}\n{DATA_LABEL_LINE}\n{}\n",
            m77t_label_line(),
            params.encode_m77t(),
            FULL.join("\t")
        );
        let header = read_header(&text).unwrap();
        assert_eq!(header.n_records, 1);
        let p = header.params(ParamSet::Original);
        assert_eq!(p.get(item::SURVEY_IDENTIFIER), "TEST0001");
        assert_eq!(p.get(item::SURVEY_DEPARTURE_MONTH), "06");
        assert_eq!(header.catalog.n_fields(), 26);

        assert!(matches!(read_header(&FULL.join("\t")), Err(Mgd77Error::NoHeaderRecord)));
    }
}
