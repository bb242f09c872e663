//! Header verification of a small three-record cruise.

use mgd77_core::params::item;
use mgd77_core::{ColumnValues, Dataset, Header, HeaderParams, ParamSet, time};
use mgd77_verify::header::FORMAT_DESCRIPTION;
use mgd77_verify::{HeaderVerifier, Verbosity, compute_meta};

const CRUISE: &str = "01010047";

fn good_params() -> HeaderParams {
    let mut p = HeaderParams::default();
    for (index, value) in [
        (item::RECORD_TYPE, "4"),
        (item::SURVEY_IDENTIFIER, "TEST0001"),
        (item::FORMAT_ACRONYM, "MGD77"),
        (item::DATA_CENTER_FILE_NUMBER, CRUISE),
        (item::PARAMETERS_SURVEYED_CODE, "1131"),
        (item::FILE_CREATION_YEAR, "1990"),
        (item::FILE_CREATION_MONTH, "06"),
        (item::FILE_CREATION_DAY, "01"),
        (item::PLATFORM_TYPE_CODE, "1"),
        (item::SURVEY_DEPARTURE_YEAR, "1985"),
        (item::SURVEY_DEPARTURE_MONTH, "06"),
        (item::SURVEY_DEPARTURE_DAY, "12"),
        (item::SURVEY_ARRIVAL_YEAR, "1985"),
        (item::SURVEY_ARRIVAL_MONTH, "06"),
        (item::SURVEY_ARRIVAL_DAY, "14"),
        (item::FORMAT_TYPE, "A"),
        (item::FORMAT_DESCRIPTION, FORMAT_DESCRIPTION),
        (item::TOPMOST_LATITUDE, "+17"),
        (item::BOTTOMMOST_LATITUDE, "+15"),
        (item::LEFTMOST_LONGITUDE, "-146"),
        (item::RIGHTMOST_LONGITUDE, "-139"),
        (item::MAGNETICS_REF_FIELD_CODE, "16"),
        (item::NUMBER_OF_TEN_DEGREE_IDENTIFIERS, "2"),
        (item::TEN_DEGREE_IDENTIFIER, "7113,7114,9999"),
    ] {
        p.set(index, value);
    }
    p
}

/// Three fixes crossing two ten-degree boxes over three days in June 1985.
fn cruise(params: HeaderParams) -> Dataset {
    let mut header = Header::plain(params, 3, false);
    let order = header.catalog.order_columns(["time", "lat", "lon"].as_slice()).unwrap();
    let mut dataset = Dataset::new(header, order);
    let times = vec![
        time::to_unix_seconds(1985, 6, 12, 45_000.0).unwrap(),
        time::to_unix_seconds(1985, 6, 13, 3_600.0).unwrap(),
        time::to_unix_seconds(1985, 6, 14, 600.0).unwrap(),
    ];
    dataset.values = vec![
        ColumnValues::Numeric(times),
        ColumnValues::Numeric(vec![15.2, 15.9, 16.4]),
        ColumnValues::Numeric(vec![-145.5, -144.8, -139.5]),
    ];
    dataset
}

fn verifier() -> HeaderVerifier {
    HeaderVerifier::new(CRUISE).with_current_year(2024)
}

#[test]
fn meta_follows_the_track() {
    let meta = compute_meta(&cruise(good_params())).unwrap();
    assert!(meta.verified);
    assert_eq!((meta.w, meta.e, meta.s, meta.n), (-146.0, -139.0, 15.0, 17.0));
    assert_eq!(meta.departure, [1985, 6, 12]);
    assert_eq!(meta.arrival, [1985, 6, 14]);
    assert_eq!(meta.n_ten_box, 2);
}

#[test]
fn consistent_header_passes() {
    let report = verifier()
        .verify_dataset(&cruise(good_params()), ParamSet::Original)
        .unwrap();
    assert_eq!(report.total(), 0, "{}", report.render_text());
}

#[test]
fn inconsistent_header_is_reported() {
    let mut params = good_params();
    for (index, value) in [
        (item::FORMAT_ACRONYM, "MGD7X"),
        (item::DATA_CENTER_FILE_NUMBER, "01010048"),
        (item::PARAMETERS_SURVEYED_CODE, "1171"),
        (item::SURVEY_DEPARTURE_DAY, "11"),
        (item::TOPMOST_LATITUDE, "+18"),
        (item::BATHYMETRY_DIGITIZING_RATE, "999"),
        (item::MAGNETICS_SAMPLING_RATE, "75"),
        (item::MAGNETICS_REF_FIELD_CODE, "12"),
        (item::GRAVITY_DEPARTURE_BASE_STATION, "978031"),
        (item::TEN_DEGREE_IDENTIFIER, "7114,7115,9999"),
    ] {
        params.set(index, value);
    }
    let report = verifier()
        .verify_dataset(&cruise(params), ParamSet::Original)
        .unwrap();

    insta::assert_snapshot!(report.render_text().trim_end(), @r"
    Y-E-01010047-H01-03: Invalid Format Acronym: (MGD7X) [MGD77]
    ?-E-01010047-H01-04: Invalid Data Center File Number: (01010048) [01010047]
    ?-E-01010047-H01-07: Invalid Parameter Survey Code (Gravity): (7) [ ]
    ?-E-01010047-H04-03: Invalid Survey Departure Day: (11) [12]
    ?-E-01010047-H11-02: Invalid Topmost Latitude : (+18) [+17]
    Y-E-01010047-H12-01: Invalid Bathymetry Digitizing Rate: (999) [   ]
    ?-W-01010047-H13-02: Invalid Magnetics Sampling Rate: (75) [75]
    Y-W-01010047-H13-10: Survey year (1985) outside magnetic reference field DGRF70 time range (1970-1975)
    ?-W-01010047-H15-01: Invalid Gravity Departure Base Station Value: (978031) [9780310]
    Y-W-01010047-H16-06: Ten Degree Identifier 7113 not marked in header but block was crossed
    Y-W-01010047-H16-06: Ten Degree Identifier 7115 marked in header but was not crossed
    01010047: 5 warnings, 6 errors
    ");

    let json: serde_json::Value = serde_json::from_str(&report.render_json().unwrap()).unwrap();
    assert_eq!(json["errors"], 6);
    assert_eq!(json["diagnostics"][0]["severity"], "Error");

    let quiet = verifier()
        .with_verbosity(Verbosity {
            warnings: false,
            errors: true,
        })
        .verify_dataset(&cruise(good_params_with_bad_rate()), ParamSet::Original)
        .unwrap();
    assert_eq!(quiet.warnings, 1);
    assert!(quiet.diagnostics.is_empty());
}

fn good_params_with_bad_rate() -> HeaderParams {
    let mut params = good_params();
    params.set(item::MAGNETICS_SAMPLING_RATE, "75");
    params
}

#[test]
fn unverified_meta_is_rejected() {
    let params = good_params();
    assert!(verifier().verify(&params, &mgd77_core::Meta::default()).is_err());
}
