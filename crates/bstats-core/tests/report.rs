//! Tests for descriptive statistics and shape reports.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

use bstats_core::{Dataset, NumericSample, StatsReportBuilder, format_range, numeric};
use bstats_model::{EmptyReason, Outcome, ProfileError};

fn sample(name: &str, values: &[f64]) -> NumericSample {
    NumericSample::new(name, values.to_vec())
}

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}

#[test]
fn range_is_formatted_with_two_decimals() {
    let samples = [sample("x", &[3.0, 1.0, 7.0, 2.0])];
    let table = StatsReportBuilder::new(&samples)
        .range()
        .ok()
        .expect("range table");

    assert_eq!(table.get("x").map(String::as_str), Some("(1.00 ~ 7.00)"));
    assert_eq!(format_range(-0.126, 2.5), "(-0.13 ~ 2.50)");
}

#[test]
fn central_tendency_of_a_small_sample() {
    let samples = [sample("x", &[4.0, 1.0, 2.0, 2.0, 5.0, 4.0])];
    let builder = StatsReportBuilder::new(&samples);

    let mean = builder.mean().ok().expect("mean");
    let median = builder.median().ok().expect("median");
    let mode = builder.mode().ok().expect("mode");

    assert!(close(*mean.get("x").expect("row"), 3.0));
    assert!(close(*median.get("x").expect("row"), 3.0));
    // 2 and 4 tie; the lowest wins.
    assert!(close(*mode.get("x").expect("row"), 2.0));
}

#[test]
fn trimmed_mean_discards_both_tails() {
    let mut values: Vec<f64> = (1..=18).map(f64::from).collect();
    values.push(1000.0);
    values.push(-1000.0);
    let samples = [sample("x", &values)];

    let table = StatsReportBuilder::new(&samples)
        .trimmed_mean(0.05)
        .expect("valid ratio")
        .ok()
        .expect("table");
    assert!(close(*table.get("x").expect("row"), 9.5));
}

#[test]
fn trimmed_mean_rejects_out_of_range_ratio() {
    let samples = [sample("x", &[1.0, 2.0])];
    for ratio in [-0.1, 0.5, 0.75] {
        let err = StatsReportBuilder::new(&samples)
            .trimmed_mean(ratio)
            .expect_err("invalid ratio");
        assert!(matches!(err, ProfileError::InvalidTrimRatio(_)));
    }
}

#[test]
fn symmetric_sample_is_not_significantly_skewed() {
    let values: Vec<f64> = (1..=8).map(f64::from).collect();
    let samples = [sample("x", &values)];

    let table = StatsReportBuilder::new(&samples)
        .skewness_report(0.05)
        .expect("valid level")
        .ok()
        .expect("table");
    let row = table.get("x").expect("row");

    assert!(close(row.skewness.expect("defined"), 0.0));
    assert!(!row.is_significant);
}

#[test]
fn skew_test_matches_reference_values() {
    let values = [
        148.0, 154.0, 158.0, 160.0, 161.0, 162.0, 166.0, 170.0, 182.0, 195.0, 236.0,
    ];
    let test = numeric::skew_test(&sample("x", &values).values).expect("enough samples");

    assert!((test.statistic - 2.778_857_976_990_341_4).abs() < 1e-6);
    assert!((test.p_value - 0.005_455_036_974_740_19).abs() < 1e-6);
    assert!(test.is_significant(0.05));
    assert!(!test.is_significant(0.001));
}

#[test]
fn kurtosis_test_matches_reference_values() {
    let values: Vec<f64> = (0..20).map(f64::from).collect();
    let test = numeric::kurtosis_test(&sample("x", &values).values).expect("enough samples");

    assert!((test.statistic + 1.705_810_415_212_206_2).abs() < 1e-6);
    assert!((test.p_value - 0.088_043_383_325_283_54).abs() < 1e-6);
}

#[test]
fn shape_tests_need_minimum_samples() {
    let samples = [sample("short", &[1.0, 2.0, 4.0, 8.0])];
    let builder = StatsReportBuilder::new(&samples);

    let skew = builder.skewness_report(0.05).expect("level").ok().expect("table");
    let row = skew.get("short").expect("row");
    assert!(row.skewness.is_some());
    assert!(row.test.is_none());
    assert!(!row.is_significant);

    let kurtosis = builder.kurtosis_report(0.05).expect("level").ok().expect("table");
    assert!(kurtosis.get("short").expect("row").test.is_none());
}

#[test]
fn constant_column_has_undefined_shape() {
    let samples = [sample("flat", &[3.0; 12])];
    let table = StatsReportBuilder::new(&samples)
        .kurtosis_report(0.05)
        .expect("level")
        .ok()
        .expect("table");
    let row = table.get("flat").expect("row");

    assert!(row.excess_kurtosis.is_none());
    assert!(row.test.is_none());
}

#[test]
fn describe_lays_out_every_field() {
    let df = DataFrame::new(vec![
        Series::new("x".into(), &[1i64, 2, 3, 4]).into_column(),
        Series::new("label".into(), &["a", "b", "c", "d"]).into_column(),
    ])
    .expect("frame");
    let dataset = Dataset::new(&df).expect("dataset");
    let table = dataset.describe().expect("describe").ok().expect("table");

    assert_eq!(table.column_names(), vec!["x"]);
    let out = table.to_dataframe().expect("frame");
    assert_eq!(
        out.get_column_names_str(),
        vec!["column", "count", "mean", "trimmed_mean", "median", "mode", "min", "max", "range"]
    );
    assert_eq!(out.height(), 1);
}

#[test]
fn no_numeric_columns_is_empty() {
    let df = DataFrame::new(vec![Series::new("label".into(), &["a", "b"]).into_column()])
        .expect("frame");
    let dataset = Dataset::new(&df).expect("dataset");

    assert_eq!(
        dataset.mean().expect("mean").empty_reason(),
        Some(&EmptyReason::NoNumericColumns)
    );
    assert!(matches!(
        dataset.skewness_report(0.05).expect("level"),
        Outcome::Empty(EmptyReason::NoNumericColumns)
    ));
}

#[test]
fn invalid_significance_level_is_an_error() {
    let samples = [sample("x", &[1.0, 2.0, 3.0])];
    let err = StatsReportBuilder::new(&samples)
        .normality_report(1.5)
        .expect_err("level outside (0, 1)");
    assert!(matches!(err, ProfileError::InvalidSignificanceLevel(_)));
}

proptest! {
    #[test]
    fn trimmed_mean_at_zero_is_the_mean(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..64)) {
        let observed = sample("x", &values).values;
        let mean = numeric::mean(&observed).expect("non-empty");
        let trimmed = numeric::trimmed_mean(&observed, 0.0).expect("non-empty");
        prop_assert!((mean - trimmed).abs() <= 1e-9 * mean.abs().max(1.0));
    }

    #[test]
    fn mean_lies_between_min_and_max(values in prop::collection::vec(-1.0e6f64..1.0e6, 1..64)) {
        let observed = sample("x", &values).values;
        let mean = numeric::mean(&observed).expect("non-empty");
        let min = numeric::min(&observed).expect("non-empty");
        let max = numeric::max(&observed).expect("non-empty");
        let slack = 1e-9 * max.abs().max(min.abs()).max(1.0);
        prop_assert!(min - slack <= mean && mean <= max + slack);
    }

    #[test]
    fn median_and_mode_are_within_bounds(values in prop::collection::vec(-1000i32..1000, 1..64)) {
        let values: Vec<f64> = values.into_iter().map(f64::from).collect();
        let observed = sample("x", &values).values;
        let min = numeric::min(&observed).expect("non-empty");
        let max = numeric::max(&observed).expect("non-empty");
        let median = numeric::median(&observed).expect("non-empty");
        let mode = numeric::mode(&observed).expect("non-empty");
        prop_assert!(min <= median && median <= max);
        prop_assert!(values.contains(&mode));
    }
}
