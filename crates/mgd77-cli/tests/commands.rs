//! Subcommands run against a small MGD77T cruise in a temporary home.

use std::fs;
use std::path::{Path, PathBuf};

use mgd77_cli::commands::{
    ListOptions, VerifyOptions, run_convert, run_info, run_list, run_path, run_verify,
};
use mgd77_core::HeaderParams;
use mgd77_core::params::{item, m77t_label_line};
use mgd77_io::m77t::DATA_LABEL_LINE;
use mgd77_io::{Format, Mgd77Home};
use tempfile::TempDir;

const RECORDS: [&str; 3] = [
    "TEST0001\t-5\t19850612\t1230.500\t45.12345\t-123.45678\t1\t9\t1.2345\t12.3\t40\t1\t1\t51234.5\t\t12.3\t1\t1.2\t10\t2\t980123.4\t12.3\t12.3\t3\tABCDE\tSHOT01",
    "TEST0001\t-5\t19850612\t1231.000\t45.2\t-123.45678\t1\t9\t1.2345\t\t40\t1\t1\t51234.5\t\t12.3\t1\t1.2\t10\t2\t980123.4\t12.3\t12.3\t3\tABCDE\tSHOT02",
    "TEST0001\t-5\t19850612\t1232.000\t\t-123.45678\t1\t9\t1.2345\t2000.5\t40\t1\t1\t51234.5\t\t12.3\t1\t1.2\t10\t2\t980123.4\t12.3\t12.3\t3\tABCDE\tSHOT03",
];

fn setup() -> (TempDir, Mgd77Home) {
    let dir = TempDir::new().unwrap();
    let mut params = HeaderParams::default();
    params.set(item::SURVEY_IDENTIFIER, "TEST0001");
    params.set(item::FORMAT_ACRONYM, "MGD77T");
    let text = format!(
        "{}\n{}\n{DATA_LABEL_LINE}\n{}\n",
        m77t_label_line(),
        params.encode_m77t(),
        RECORDS.join("\n"),
    );
    fs::write(dir.path().join("01010047.m77t"), text).unwrap();
    let home = Mgd77Home::new(dir.path());
    (dir, home)
}

fn listing(home: &Mgd77Home, cruise: &str, columns: &str) -> String {
    let options = ListOptions {
        columns: columns.to_string(),
        no_adjust: true,
        with_names: true,
        ..ListOptions::default()
    };
    let mut out = Vec::new();
    let n = run_list(home, cruise, &options, &mut out).unwrap();
    assert_eq!(n, 3);
    String::from_utf8(out).unwrap()
}

fn cruises(names: &[&str]) -> Vec<String> {
    names.iter().map(ToString::to_string).collect()
}

#[test]
fn path_resolves_through_the_home_directory() {
    let (dir, home) = setup();
    let paths = run_path(&home, &cruises(&["01010047"])).unwrap();
    assert_eq!(paths, [(dir.path().join("01010047.m77t"), Format::M77t)]);
    assert!(run_path(&home, &cruises(&["99999999"])).is_err());
}

#[test]
fn info_selects_header_items() {
    let (_dir, home) = setup();
    let items = cruises(&["survey_id", "3"]);
    let header = run_info(&home, "01010047", false, &items).unwrap();
    assert_eq!(header.format, Format::M77t);
    assert_eq!(header.items, Some(vec![item::SURVEY_IDENTIFIER, item::FORMAT_ACRONYM]));
    let json = header.to_json();
    assert_eq!(json["cruise"], "01010047");
    assert_eq!(json["format"], "MGD77T");
    assert_eq!(json["params"]["Survey_Identifier"], "TEST0001");
    assert_eq!(json["params"].as_object().unwrap().len(), 2);

    assert!(run_info(&home, "01010047", false, &cruises(&["no_such_item"])).is_err());
}

#[test]
fn list_prints_selected_columns() {
    let (_dir, home) = setup();
    insta::assert_snapshot!(listing(&home, "01010047", "time,lat,lon,depth"), @r"
    #time	lat	lon	depth
    1985-06-12T07:30:30	45.12345	-123.45678	12.3
    1985-06-12T07:31:00	45.2	-123.45678	NaN
    1985-06-12T07:32:00	NaN	-123.45678	2000.5
    ");
    let relative = listing(&home, "01010047", "rtime");
    assert_eq!(relative.lines().nth(1), Some("487409430"));
}

#[test]
fn convert_keeps_listed_values() {
    let (dir, home) = setup();
    let out = dir.path().join("out");
    fs::create_dir(&out).unwrap();
    let written = run_convert(&home, &cruises(&["01010047"]), Format::M77, Some(&out)).unwrap();
    assert_eq!(written, [out.join("01010047.mgd77")]);

    let copy = path_str(&written[0]);
    let columns = "time,lat,lon,depth";
    assert_eq!(listing(&home, &copy, columns), listing(&home, "01010047", columns));
}

#[test]
fn convert_refuses_to_overwrite_its_source() {
    let (dir, home) = setup();
    let err = run_convert(&home, &cruises(&["01010047"]), Format::M77t, Some(dir.path()))
        .unwrap_err();
    assert!(err.to_string().contains("overwrite"));
}

#[test]
fn verify_reports_header_errors() {
    let (_dir, home) = setup();
    let reports = run_verify(&home, &cruises(&["01010047"]), VerifyOptions::default()).unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].ngdc_id, "01010047");
    assert!(reports[0].has_errors());
    assert_eq!(reports[0].diagnostics.len(), reports[0].total());
}

fn path_str(path: &Path) -> String {
    PathBuf::from(path).to_string_lossy().into_owned()
}
