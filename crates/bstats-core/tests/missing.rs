//! Tests for apparent missing-value detection.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};

use bstats_core::{
    Dataset, MISSING_VALUE_MARKERS, MissingValueDetector, count_missing_markers,
    has_apparent_missing_value,
};
use bstats_model::{EmptyReason, MissingScan, Outcome, ProfileOptions};

#[test]
fn every_marker_in_first_position_is_detected() {
    for marker in MISSING_VALUE_MARKERS {
        let series = Series::new("col".into(), &[marker, "value"]);
        assert!(
            has_apparent_missing_value(&series).expect("scan"),
            "marker {marker:?} should be detected"
        );
    }
}

#[test]
fn first_value_scan_only_inspects_the_first_cell() {
    let leading = Series::new("leading".into(), &[" ", "5", "7"]);
    let trailing = Series::new("trailing".into(), &["5", " ", "7"]);

    assert!(has_apparent_missing_value(&leading).expect("scan"));
    assert!(!has_apparent_missing_value(&trailing).expect("scan"));
}

#[test]
fn full_scan_finds_markers_anywhere() {
    let detector = MissingValueDetector::new(MissingScan::FullColumn);
    let trailing = Series::new("trailing".into(), &["5", " ", "7", "?"]);

    assert!(detector.detect(&trailing).expect("scan"));
    assert_eq!(count_missing_markers(&trailing).expect("count"), 2);
}

#[test]
fn nulls_and_nan_count_as_markers() {
    let ints = Series::new("ints".into(), &[None, Some(1i64), Some(2)]);
    let floats = Series::new("floats".into(), &[f64::NAN, 1.0, f64::NAN]);

    assert!(has_apparent_missing_value(&ints).expect("scan"));
    assert!(has_apparent_missing_value(&floats).expect("scan"));
    assert_eq!(count_missing_markers(&floats).expect("count"), 2);
}

#[test]
fn ordinary_text_is_not_a_marker() {
    let series = Series::new("words".into(), &["NA", "", "  ", "none"]);
    assert!(!has_apparent_missing_value(&series).expect("scan"));
    assert_eq!(count_missing_markers(&series).expect("count"), 0);
}

#[test]
fn dataset_lists_columns_per_scan_mode() {
    let df = DataFrame::new(vec![
        Series::new("leading".into(), &[" ", "5", "7"]).into_column(),
        Series::new("trailing".into(), &["5", " ", "7"]).into_column(),
        Series::new("clean".into(), &[1i64, 2, 3]).into_column(),
    ])
    .expect("frame");

    let first = Dataset::new(&df).expect("dataset");
    assert_eq!(
        first.columns_with_missing_values().expect("scan"),
        Outcome::Ok(vec!["leading".to_string()])
    );

    let options = ProfileOptions::default().with_missing_scan(MissingScan::FullColumn);
    let full = Dataset::with_options(&df, options).expect("dataset");
    assert_eq!(
        full.columns_with_missing_values().expect("scan"),
        Outcome::Ok(vec!["leading".to_string(), "trailing".to_string()])
    );
    assert_eq!(
        full.missing_value_counts().expect("counts"),
        vec![
            ("leading".to_string(), 1),
            ("trailing".to_string(), 1),
            ("clean".to_string(), 0),
        ]
    );
}

#[test]
fn clean_dataset_reports_no_missing_columns() {
    let df = DataFrame::new(vec![Series::new("clean".into(), &["a", "b"]).into_column()])
        .expect("frame");
    let dataset = Dataset::new(&df).expect("dataset");

    assert_eq!(
        dataset.columns_with_missing_values().expect("scan"),
        Outcome::Empty(EmptyReason::NoMissingValueColumns)
    );
}
