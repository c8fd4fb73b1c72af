//! Statistical report tables for numeric columns.
//!
//! [`StatsReportBuilder`] turns a set of [`NumericSample`]s into report tables
//! keyed by column name. Samples without observations are left out of every
//! table; a table with no rows comes back as [`Outcome::Empty`].

use polars::prelude::{Float64Chunked, PolarsResult, Series};
use tracing::{debug, warn};

use bstats_common::{format_fixed, series_to_f64};
use bstats_model::{
    DescribeRow, EmptyReason, KurtosisRow, NormalityRow, Outcome, ReportTable, Result,
    SkewnessRow, validate_significance_level, validate_trim_ratio,
};

use crate::numeric::{self, RELIABLE_TEST_SAMPLES};

pub const MEAN_FIELDS: &[&str] = &["mean"];
pub const TRIMMED_MEAN_FIELDS: &[&str] = &["trimmed_mean"];
pub const MEDIAN_FIELDS: &[&str] = &["median"];
pub const MODE_FIELDS: &[&str] = &["mode"];
pub const MIN_FIELDS: &[&str] = &["min"];
pub const MAX_FIELDS: &[&str] = &["max"];
pub const RANGE_FIELDS: &[&str] = &["range"];

/// Formats a spread as `"(min ~ max)"` with two decimals.
pub fn format_range(min: f64, max: f64) -> String {
    format!("({} ~ {})", format_fixed(min, 2), format_fixed(max, 2))
}

/// Non-null observations of one numeric column.
#[derive(Debug, Clone)]
pub struct NumericSample {
    pub name: String,
    pub values: Float64Chunked,
}

impl NumericSample {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        let name = name.into();
        let values = Float64Chunked::from_vec(name.as_str().into(), values);
        Self { name, values }
    }

    /// Keeps the non-null, non-`NaN` values of a numeric series as `Float64`.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if the series cannot be cast to `Float64`.
    pub fn from_series(series: &Series) -> PolarsResult<Self> {
        Ok(Self {
            name: series.name().to_string(),
            values: series_to_f64(series)?,
        })
    }
}

/// Builds descriptive and shape reports over numeric samples.
#[derive(Debug, Clone, Copy)]
pub struct StatsReportBuilder<'a> {
    samples: &'a [NumericSample],
}

impl<'a> StatsReportBuilder<'a> {
    pub fn new(samples: &'a [NumericSample]) -> Self {
        Self { samples }
    }

    pub fn mean(&self) -> Outcome<ReportTable<f64>> {
        self.scalar_table(MEAN_FIELDS, numeric::mean)
    }

    /// # Errors
    ///
    /// Returns [`bstats_model::ProfileError::InvalidTrimRatio`] unless
    /// `0 <= ratio < 0.5`.
    pub fn trimmed_mean(&self, ratio: f64) -> Result<Outcome<ReportTable<f64>>> {
        let ratio = validate_trim_ratio(ratio)?;
        Ok(self.scalar_table(TRIMMED_MEAN_FIELDS, |values| {
            numeric::trimmed_mean(values, ratio)
        }))
    }

    pub fn median(&self) -> Outcome<ReportTable<f64>> {
        self.scalar_table(MEDIAN_FIELDS, numeric::median)
    }

    pub fn mode(&self) -> Outcome<ReportTable<f64>> {
        self.scalar_table(MODE_FIELDS, numeric::mode)
    }

    pub fn min(&self) -> Outcome<ReportTable<f64>> {
        self.scalar_table(MIN_FIELDS, numeric::min)
    }

    pub fn max(&self) -> Outcome<ReportTable<f64>> {
        self.scalar_table(MAX_FIELDS, numeric::max)
    }

    pub fn range(&self) -> Outcome<ReportTable<String>> {
        let mut table = ReportTable::new(RANGE_FIELDS);
        for sample in self.observed() {
            let values = &sample.values;
            if let (Some(min), Some(max)) = (numeric::min(values), numeric::max(values)) {
                table.push(sample.name.as_str(), format_range(min, max));
            }
        }
        finish(table, EmptyReason::NoNumericColumns)
    }

    /// Every descriptive statistic of each column in one table.
    ///
    /// # Errors
    ///
    /// Returns [`bstats_model::ProfileError::InvalidTrimRatio`] unless
    /// `0 <= trim_ratio < 0.5`.
    pub fn describe(&self, trim_ratio: f64) -> Result<Outcome<ReportTable<DescribeRow>>> {
        let trim_ratio = validate_trim_ratio(trim_ratio)?;
        let mut table = ReportTable::new(DescribeRow::FIELDS);
        for sample in self.observed() {
            if let Some(row) = describe_row(&sample.values, trim_ratio) {
                table.push(sample.name.as_str(), row);
            }
        }
        Ok(finish(table, EmptyReason::NoNumericColumns))
    }

    /// Skewness with the D'Agostino significance test.
    ///
    /// # Errors
    ///
    /// Returns [`bstats_model::ProfileError::InvalidSignificanceLevel`] unless
    /// `0 < significance_level < 1`.
    pub fn skewness_report(
        &self,
        significance_level: f64,
    ) -> Result<Outcome<ReportTable<SkewnessRow>>> {
        let level = validate_significance_level(significance_level)?;
        let mut table = ReportTable::new(SkewnessRow::FIELDS);
        for sample in self.observed() {
            table.push(sample.name.as_str(), skewness_row(sample, level));
        }
        Ok(finish(table, EmptyReason::NoNumericColumns))
    }

    /// Excess kurtosis with the Anscombe–Glynn significance test.
    ///
    /// # Errors
    ///
    /// Returns [`bstats_model::ProfileError::InvalidSignificanceLevel`] unless
    /// `0 < significance_level < 1`.
    pub fn kurtosis_report(
        &self,
        significance_level: f64,
    ) -> Result<Outcome<ReportTable<KurtosisRow>>> {
        let level = validate_significance_level(significance_level)?;
        let mut table = ReportTable::new(KurtosisRow::FIELDS);
        for sample in self.observed() {
            table.push(sample.name.as_str(), kurtosis_row(sample, level));
        }
        Ok(finish(table, EmptyReason::NoNumericColumns))
    }

    /// Combined skewness and tail-weight table.
    ///
    /// Callers pass only continuous columns; an empty result is reported as
    /// [`EmptyReason::NoContinuousColumns`].
    ///
    /// # Errors
    ///
    /// Returns [`bstats_model::ProfileError::InvalidSignificanceLevel`] unless
    /// `0 < significance_level < 1`.
    pub fn normality_report(
        &self,
        significance_level: f64,
    ) -> Result<Outcome<ReportTable<NormalityRow>>> {
        let level = validate_significance_level(significance_level)?;
        let mut table = ReportTable::new(NormalityRow::FIELDS);
        for sample in self.observed() {
            let skew = skewness_row(sample, level);
            let kurtosis = kurtosis_row(sample, level);
            table.push(
                sample.name.as_str(),
                NormalityRow {
                    skewness_values: skew.skewness,
                    skew_is_significant: skew.is_significant,
                    excess_kurtosis: kurtosis.excess_kurtosis,
                    tail_weight_is_significant: kurtosis.is_significant,
                },
            );
        }
        Ok(finish(table, EmptyReason::NoContinuousColumns))
    }

    fn observed(&self) -> impl Iterator<Item = &'a NumericSample> {
        self.samples.iter().filter(|sample| {
            if sample.values.is_empty() {
                debug!(column = sample.name.as_str(), "skipping column without observations");
                false
            } else {
                true
            }
        })
    }

    fn scalar_table(
        &self,
        fields: &'static [&'static str],
        statistic: impl Fn(&Float64Chunked) -> Option<f64>,
    ) -> Outcome<ReportTable<f64>> {
        let mut table = ReportTable::new(fields);
        for sample in self.observed() {
            if let Some(value) = statistic(&sample.values) {
                table.push(sample.name.as_str(), value);
            }
        }
        finish(table, EmptyReason::NoNumericColumns)
    }
}

fn describe_row(values: &Float64Chunked, trim_ratio: f64) -> Option<DescribeRow> {
    let min = numeric::min(values)?;
    let max = numeric::max(values)?;
    Some(DescribeRow {
        count: values.len(),
        mean: numeric::mean(values)?,
        trimmed_mean: numeric::trimmed_mean(values, trim_ratio)?,
        median: numeric::median(values)?,
        mode: numeric::mode(values)?,
        min,
        max,
        range: format_range(min, max),
    })
}

fn skewness_row(sample: &NumericSample, level: f64) -> SkewnessRow {
    let test = numeric::skew_test(&sample.values);
    if test.is_some() {
        warn_small_sample(sample, "skew");
    }
    SkewnessRow {
        skewness: numeric::skewness(&sample.values),
        test,
        is_significant: test.is_some_and(|t| t.is_significant(level)),
    }
}

fn kurtosis_row(sample: &NumericSample, level: f64) -> KurtosisRow {
    let test = numeric::kurtosis_test(&sample.values);
    if test.is_some() {
        warn_small_sample(sample, "kurtosis");
    }
    KurtosisRow {
        excess_kurtosis: numeric::excess_kurtosis(&sample.values),
        test,
        is_significant: test.is_some_and(|t| t.is_significant(level)),
    }
}

fn warn_small_sample(sample: &NumericSample, test: &str) {
    if sample.values.len() < RELIABLE_TEST_SAMPLES {
        warn!(
            column = sample.name.as_str(),
            observations = sample.values.len(),
            test,
            "shape test on fewer than {RELIABLE_TEST_SAMPLES} observations; p-value is unreliable"
        );
    }
}

fn finish<R>(table: ReportTable<R>, reason: EmptyReason) -> Outcome<ReportTable<R>> {
    Outcome::non_empty(table, ReportTable::is_empty, reason)
}
