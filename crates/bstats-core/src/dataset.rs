//! Dataset facade.
//!
//! [`Dataset`] borrows a Polars [`DataFrame`] read-only, tags every column
//! with an [`ElementType`] once, and applies the classifier, the missing-value
//! detector and the statistics builder uniformly across columns. Nothing is
//! cached between calls: every accessor recomputes from the borrowed frame.
//!
//! Accessors that may legitimately have nothing to return yield an
//! [`Outcome`]; `Err` is reserved for invalid arguments and Polars failures.

use polars::prelude::{DataFrame, IdxCa, IdxSize, Series};
use rand::Rng;
use tracing::{info, warn};

use bstats_model::{
    ColumnClassification, ColumnKind, ColumnTag, DescribeRow, ElementType, EmptyReason, KurtosisRow,
    NormalityRow, Outcome, ProfileOptions, ReportTable, Result, SkewnessRow,
};

use crate::classify::{ColumnClassifier, element_type_of};
use crate::missing::{MissingValueDetector, count_missing_markers};
use crate::report::{NumericSample, StatsReportBuilder};

/// Read-only profiling view over a borrowed table.
#[derive(Debug, Clone)]
pub struct Dataset<'a> {
    frame: &'a DataFrame,
    element_types: Vec<ElementType>,
    options: ProfileOptions,
}

impl<'a> Dataset<'a> {
    /// Wraps a frame with default [`ProfileOptions`].
    ///
    /// Only integer, float, string and boolean columns are profiled. Cast
    /// `Categorical`, `Enum`, temporal or nested columns to one of those
    /// dtypes before wrapping, e.g. `Date` to `String` or `Categorical`
    /// to `String`.
    ///
    /// # Errors
    ///
    /// Returns [`bstats_model::ProfileError::UnsupportedColumnType`] when a
    /// column's dtype is not integer, float, string or boolean.
    pub fn new(frame: &'a DataFrame) -> Result<Self> {
        Self::with_options(frame, ProfileOptions::default())
    }

    /// Wraps a frame with explicit options. Column dtypes are restricted as in
    /// [`Dataset::new`].
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported column dtypes or out-of-range options.
    pub fn with_options(frame: &'a DataFrame, options: ProfileOptions) -> Result<Self> {
        options.validate()?;
        let element_types = frame
            .get_columns()
            .iter()
            .map(|column| element_type_of(column.as_materialized_series()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            frame,
            element_types,
            options,
        })
    }

    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    /// Zero rows or zero columns; usually an upstream ingestion failure.
    pub fn is_degenerate(&self) -> bool {
        self.frame.height() == 0 || self.frame.width() == 0
    }

    pub fn row_count(&self) -> Outcome<usize> {
        self.structural(self.frame.height())
    }

    pub fn column_count(&self) -> Outcome<usize> {
        self.structural(self.frame.width())
    }

    /// The raw table, unless it is degenerate.
    pub fn values(&self) -> Outcome<&'a DataFrame> {
        self.structural(self.frame)
    }

    /// Element type of each column, in column order.
    pub fn element_types(&self) -> impl Iterator<Item = (&str, ElementType)> {
        self.series()
            .zip(self.element_types.iter().copied())
            .map(|(series, element_type)| (series.name().as_str(), element_type))
    }

    /// Uniform random sample of `n` distinct rows, without replacement.
    ///
    /// Sizes above the row count return every row in random order.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if the rows cannot be gathered.
    pub fn sample(&self, n: i64) -> Result<Outcome<DataFrame>> {
        self.sample_with_rng(n, &mut rand::thread_rng())
    }

    /// [`Dataset::sample`] with a caller-supplied random source.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if the rows cannot be gathered.
    pub fn sample_with_rng<R: Rng + ?Sized>(&self, n: i64, rng: &mut R) -> Result<Outcome<DataFrame>> {
        if n < 1 {
            return Ok(logged(Outcome::Empty(EmptyReason::InvalidSampleSize(n))));
        }
        if self.is_degenerate() {
            return Ok(degenerate());
        }
        let rows = self.frame.height();
        let requested = usize::try_from(n).unwrap_or(usize::MAX);
        if requested > rows {
            warn!(requested, rows, "sample size exceeds row count; returning every row");
        }
        let amount = requested.min(rows);
        let indices: Vec<IdxSize> = rand::seq::index::sample(rng, rows, amount)
            .into_iter()
            .map(|idx| idx as IdxSize)
            .collect();
        let idx = IdxCa::from_vec("idx".into(), indices);
        Ok(Outcome::Ok(self.frame.take(&idx)?))
    }

    pub fn column_names(&self) -> Outcome<Vec<String>> {
        if self.is_degenerate() {
            return degenerate();
        }
        let names = self.series().map(|series| series.name().to_string()).collect();
        logged(Outcome::non_empty(
            names,
            Vec::is_empty,
            EmptyReason::NoMatchingColumns(ColumnKind::Any),
        ))
    }

    /// Classification of every column, in column order.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if unique values cannot be counted.
    pub fn classifications(&self) -> Result<Vec<ColumnClassification>> {
        let classifier = ColumnClassifier::new(self.options.tag_overlap);
        self.series()
            .zip(self.element_types.iter().copied())
            .map(|(series, element_type)| classifier.classify(series, element_type))
            .collect()
    }

    /// # Errors
    ///
    /// Returns the Polars error if unique values cannot be counted.
    pub fn binary_columns(&self) -> Result<Outcome<Vec<String>>> {
        self.tagged(ColumnKind::Binary, |c| c.has(ColumnTag::Binary))
    }

    /// # Errors
    ///
    /// Returns the Polars error if unique values cannot be counted.
    pub fn non_binary_columns(&self) -> Result<Outcome<Vec<String>>> {
        self.tagged(ColumnKind::NonBinary, |c| !c.has(ColumnTag::Binary))
    }

    /// Columns tagged Continuous.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if unique values cannot be counted.
    pub fn numeric_columns(&self) -> Result<Outcome<Vec<String>>> {
        self.tagged(ColumnKind::Numeric, |c| c.has(ColumnTag::Continuous))
    }

    /// # Errors
    ///
    /// Returns the Polars error if unique values cannot be counted.
    pub fn categorical_columns(&self) -> Result<Outcome<Vec<String>>> {
        self.tagged(ColumnKind::Categorical, |c| c.has(ColumnTag::Categorical))
    }

    /// Columns flagged by the configured [`bstats_model::MissingScan`] mode.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if a column cannot be read.
    pub fn columns_with_missing_values(&self) -> Result<Outcome<Vec<String>>> {
        if self.is_degenerate() {
            return Ok(degenerate());
        }
        let detector = MissingValueDetector::new(self.options.missing_scan);
        let mut names = Vec::new();
        for series in self.series() {
            if detector.detect(series)? {
                names.push(series.name().to_string());
            }
        }
        Ok(logged(Outcome::non_empty(
            names,
            Vec::is_empty,
            EmptyReason::NoMissingValueColumns,
        )))
    }

    /// Missing-marker cell count of every column, scanning whole columns.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if a column cannot be read.
    pub fn missing_value_counts(&self) -> Result<Vec<(String, usize)>> {
        self.series()
            .map(|series| Ok((series.name().to_string(), count_missing_markers(series)?)))
            .collect()
    }

    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn mean(&self) -> Result<Outcome<ReportTable<f64>>> {
        self.numeric_report(|builder| Ok(builder.mean()))
    }

    /// # Errors
    ///
    /// Returns an error for ratios outside `[0, 0.5)` or unreadable columns.
    pub fn trimmed_mean(&self, ratio: f64) -> Result<Outcome<ReportTable<f64>>> {
        self.numeric_report(|builder| builder.trimmed_mean(ratio))
    }

    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn median(&self) -> Result<Outcome<ReportTable<f64>>> {
        self.numeric_report(|builder| Ok(builder.median()))
    }

    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn mode(&self) -> Result<Outcome<ReportTable<f64>>> {
        self.numeric_report(|builder| Ok(builder.mode()))
    }

    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn min(&self) -> Result<Outcome<ReportTable<f64>>> {
        self.numeric_report(|builder| Ok(builder.min()))
    }

    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn max(&self) -> Result<Outcome<ReportTable<f64>>> {
        self.numeric_report(|builder| Ok(builder.max()))
    }

    /// `"(min ~ max)"` per numeric column.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn range(&self) -> Result<Outcome<ReportTable<String>>> {
        self.numeric_report(|builder| Ok(builder.range()))
    }

    /// All descriptive statistics, trimmed at the configured ratio.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn describe(&self) -> Result<Outcome<ReportTable<DescribeRow>>> {
        self.numeric_report(|builder| builder.describe(self.options.trim_ratio))
    }

    /// # Errors
    ///
    /// Returns an error for levels outside `(0, 1)` or unreadable columns.
    pub fn skewness_report(&self, significance_level: f64) -> Result<Outcome<ReportTable<SkewnessRow>>> {
        self.numeric_report(|builder| builder.skewness_report(significance_level))
    }

    /// # Errors
    ///
    /// Returns an error for levels outside `(0, 1)` or unreadable columns.
    pub fn kurtosis_report(&self, significance_level: f64) -> Result<Outcome<ReportTable<KurtosisRow>>> {
        self.numeric_report(|builder| builder.kurtosis_report(significance_level))
    }

    /// Skewness and tail weight of the Continuous-tagged columns only.
    ///
    /// # Errors
    ///
    /// Returns an error for levels outside `(0, 1)` or unreadable columns.
    pub fn normality_report(&self, significance_level: f64) -> Result<Outcome<ReportTable<NormalityRow>>> {
        if self.is_degenerate() {
            return Ok(degenerate());
        }
        let continuous: Vec<String> = self
            .classifications()?
            .into_iter()
            .filter(|c| c.has(ColumnTag::Continuous))
            .map(|c| c.name)
            .collect();
        let samples = self
            .series()
            .filter(|series| continuous.iter().any(|name| name == series.name().as_str()))
            .map(NumericSample::from_series)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(logged(
            StatsReportBuilder::new(&samples).normality_report(significance_level)?,
        ))
    }

    /// [`Dataset::trimmed_mean`] at the configured ratio.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn trimmed_mean_default(&self) -> Result<Outcome<ReportTable<f64>>> {
        self.trimmed_mean(self.options.trim_ratio)
    }

    /// [`Dataset::skewness_report`] at the configured significance level.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn skewness_report_default(&self) -> Result<Outcome<ReportTable<SkewnessRow>>> {
        self.skewness_report(self.options.significance_level)
    }

    /// [`Dataset::kurtosis_report`] at the configured significance level.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn kurtosis_report_default(&self) -> Result<Outcome<ReportTable<KurtosisRow>>> {
        self.kurtosis_report(self.options.significance_level)
    }

    /// [`Dataset::normality_report`] at the configured significance level.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if a numeric column cannot be read.
    pub fn normality_report_default(&self) -> Result<Outcome<ReportTable<NormalityRow>>> {
        self.normality_report(self.options.significance_level)
    }

    fn series(&self) -> impl Iterator<Item = &'a Series> {
        self.frame
            .get_columns()
            .iter()
            .map(|column| column.as_materialized_series())
    }

    /// Observations of every integer or float column.
    fn numeric_samples(&self) -> Result<Vec<NumericSample>> {
        let samples = self
            .series()
            .zip(self.element_types.iter())
            .filter(|(_, element_type)| element_type.is_numeric())
            .map(|(series, _)| NumericSample::from_series(series))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(samples)
    }

    fn tagged(
        &self,
        kind: ColumnKind,
        predicate: impl Fn(&ColumnClassification) -> bool,
    ) -> Result<Outcome<Vec<String>>> {
        if self.is_degenerate() {
            return Ok(degenerate());
        }
        let names: Vec<String> = self
            .classifications()?
            .into_iter()
            .filter(|c| predicate(c))
            .map(|c| c.name)
            .collect();
        Ok(logged(Outcome::non_empty(
            names,
            Vec::is_empty,
            EmptyReason::NoMatchingColumns(kind),
        )))
    }

    /// Runs a statistics report over the numeric columns of a non-degenerate table.
    fn numeric_report<R>(
        &self,
        build: impl FnOnce(StatsReportBuilder<'_>) -> Result<Outcome<R>>,
    ) -> Result<Outcome<R>> {
        if self.is_degenerate() {
            return Ok(degenerate());
        }
        let samples = self.numeric_samples()?;
        Ok(logged(build(StatsReportBuilder::new(&samples))?))
    }

    fn structural<T>(&self, value: T) -> Outcome<T> {
        if self.is_degenerate() {
            degenerate()
        } else {
            Outcome::Ok(value)
        }
    }
}

fn degenerate<T>() -> Outcome<T> {
    logged(Outcome::Empty(EmptyReason::Degenerate))
}

/// Logs the reason of an empty outcome and passes it through.
fn logged<T>(outcome: Outcome<T>) -> Outcome<T> {
    match outcome.empty_reason() {
        Some(reason @ (EmptyReason::Degenerate | EmptyReason::InvalidSampleSize(_))) => {
            warn!(%reason, "nothing to report");
        }
        Some(reason) => info!(%reason, "nothing to report"),
        None => {}
    }
    outcome
}
