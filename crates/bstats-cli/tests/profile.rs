//! Integration tests for CSV profiling and report rendering.

use std::io::Write;
use std::path::PathBuf;

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use tempfile::NamedTempFile;

use bstats_cli::profile::{ProfileRequest, load_csv, profile_csv, profile_frame};
use bstats_cli::summary::{frame_table, overview_table, report_table};
use bstats_model::{EmptyReason, MissingScan, Outcome, ProfileOptions};

const SURVEY_CSV: &str = "\
flag,group,score,weight,note
0,a,10,1.5,?
1,b,20,2.25,x
1,c,30,3.0,y
0,a,40,4.5,z
0,b,50,5.25,x
1,c,60,6.0,y
0,a,70,7.5,z
1,b,80,8.75,x
";

fn write_csv(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write csv");
    file.flush().expect("flush csv");
    file
}

#[test]
fn loads_csv_with_inferred_types() {
    let file = write_csv(SURVEY_CSV);
    let df = load_csv(file.path()).expect("load");

    assert_eq!(df.height(), 8);
    assert_eq!(
        df.get_column_names_str(),
        vec!["flag", "group", "score", "weight", "note"]
    );
}

#[test]
fn missing_file_is_an_error() {
    let err = load_csv(&PathBuf::from("does/not/exist.csv")).expect_err("missing file");
    assert!(err.to_string().contains("exist.csv"));
}

#[test]
fn overview_of_survey_csv() {
    let file = write_csv(SURVEY_CSV);
    let report = profile_csv(file.path(), &ProfileRequest::default()).expect("profile");

    assert_eq!(report.rows, Outcome::Ok(8));
    insta::assert_json_snapshot!("survey_overview", report.columns);
}

#[test]
fn reports_cover_numeric_and_continuous_columns() {
    let file = write_csv(SURVEY_CSV);
    let report = profile_csv(file.path(), &ProfileRequest::default()).expect("profile");

    let describe = report.describe.ok().expect("describe");
    assert_eq!(describe.column_names(), vec!["flag", "score", "weight"]);
    let score = describe.get("score").expect("score row");
    assert_eq!(score.count, 8);
    assert!((score.mean - 45.0).abs() < 1e-12);
    assert_eq!(score.range, "(10.00 ~ 80.00)");

    let normality = report.normality.ok().expect("normality");
    assert_eq!(normality.column_names(), vec!["score", "weight"]);
    assert!(report.sample.is_none());
}

#[test]
fn full_scan_counts_markers_past_the_first_row() {
    let file = write_csv("id,comment\n1,fine\n2,?\n3,.\n");
    let request = ProfileRequest {
        options: ProfileOptions::default().with_missing_scan(MissingScan::FullColumn),
        sample_size: None,
    };
    let report = profile_csv(file.path(), &request).expect("profile");

    let comment = report
        .columns
        .iter()
        .find(|column| column.name == "comment")
        .expect("comment column");
    assert!(comment.has_missing_marker);
    assert_eq!(comment.missing_cells, 2);
}

#[test]
fn sample_request_is_carried_into_the_report() {
    let df = DataFrame::new(vec![
        Series::new("id".into(), &[1i64, 2, 3, 4, 5]).into_column(),
    ])
    .expect("frame");

    let request = ProfileRequest {
        sample_size: Some(2),
        ..ProfileRequest::default()
    };
    let report = profile_frame(PathBuf::from("memory"), &df, &request).expect("profile");
    let sample = report.sample.expect("requested").ok().expect("rows");
    assert_eq!(sample.height(), 2);

    let request = ProfileRequest {
        sample_size: Some(0),
        ..ProfileRequest::default()
    };
    let report = profile_frame(PathBuf::from("memory"), &df, &request).expect("profile");
    assert_eq!(
        report.sample.expect("requested").empty_reason(),
        Some(&EmptyReason::InvalidSampleSize(0))
    );
}

#[test]
fn invalid_options_are_reported_with_context() {
    let df = DataFrame::new(vec![Series::new("x".into(), &[1i64, 2]).into_column()])
        .expect("frame");
    let request = ProfileRequest {
        options: ProfileOptions::default().with_trim_ratio(0.9),
        sample_size: None,
    };
    let err = profile_frame(PathBuf::from("memory"), &df, &request).expect_err("bad ratio");
    assert!(format!("{err:#}").contains("trim ratio"));
}

#[test]
fn rendered_tables_contain_every_column() {
    let file = write_csv(SURVEY_CSV);
    let report = profile_csv(file.path(), &ProfileRequest::default()).expect("profile");

    let mut overview = overview_table(&report.columns);
    overview.force_no_tty();
    let rendered = overview.to_string();
    for name in ["flag", "group", "score", "weight", "note"] {
        assert!(rendered.contains(name), "missing {name} in\n{rendered}");
    }
    assert!(rendered.contains("categorical, continuous"));

    let skewness = report.skewness.ok().expect("skewness");
    let mut table = report_table(&skewness);
    table.force_no_tty();
    let rendered = table.to_string();
    assert!(rendered.contains("skew_test_z"));
    assert!(rendered.contains("weight"));
}

#[test]
fn frame_table_renders_cells() {
    let df = DataFrame::new(vec![
        Series::new("name".into(), &["ada", "lin"]).into_column(),
        Series::new("ok".into(), &[true, false]).into_column(),
    ])
    .expect("frame");
    let mut table = frame_table(&df);
    table.force_no_tty();
    let rendered = table.to_string();
    assert!(rendered.contains("ada"));
    assert!(rendered.contains("false"));
}
