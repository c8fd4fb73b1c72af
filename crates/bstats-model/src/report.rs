//! Report tables produced by the statistics builder.
//!
//! A [`ReportTable`] holds one row per profiled column, in dataset order,
//! keyed by column name. Tables are built once and never mutated after the
//! builder hands them out.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};
use serde::{Deserialize, Serialize};

/// A single cell of a report row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric statistic; `None` when undefined for the column.
    Float(Option<f64>),
    Count(usize),
    Flag(bool),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Float(v) => *v,
            FieldValue::Count(v) => Some(*v as f64),
            _ => None,
        }
    }

    fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(v) => Some(*v),
            _ => None,
        }
    }

    fn as_count(&self) -> Option<u64> {
        match self {
            FieldValue::Count(v) => Some(*v as u64),
            _ => None,
        }
    }

    fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

/// A row type that can be laid out as named fields.
pub trait ReportRow {
    /// Cell values, in the order of the table's field names.
    fn values(&self) -> Vec<FieldValue>;
}

impl ReportRow for f64 {
    fn values(&self) -> Vec<FieldValue> {
        vec![FieldValue::Float(Some(*self))]
    }
}

impl ReportRow for String {
    fn values(&self) -> Vec<FieldValue> {
        vec![FieldValue::Text(self.clone())]
    }
}

/// Test statistic and two-sided p-value of a shape test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeTest {
    /// Standard-normal z score.
    pub statistic: f64,
    pub p_value: f64,
}

impl ShapeTest {
    /// `p_value < significance_level`.
    pub fn is_significant(&self, significance_level: f64) -> bool {
        self.p_value < significance_level
    }
}

/// Skewness and its significance test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkewnessRow {
    pub skewness: Option<f64>,
    pub test: Option<ShapeTest>,
    pub is_significant: bool,
}

impl SkewnessRow {
    pub const FIELDS: &'static [&'static str] =
        &["skewness", "skew_test_z", "p_value", "is_significant"];
}

impl ReportRow for SkewnessRow {
    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Float(self.skewness),
            FieldValue::Float(self.test.map(|t| t.statistic)),
            FieldValue::Float(self.test.map(|t| t.p_value)),
            FieldValue::Flag(self.is_significant),
        ]
    }
}

/// Excess kurtosis and its significance test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KurtosisRow {
    pub excess_kurtosis: Option<f64>,
    pub test: Option<ShapeTest>,
    pub is_significant: bool,
}

impl KurtosisRow {
    pub const FIELDS: &'static [&'static str] = &[
        "excess_kurtosis",
        "kurtosis_test_z",
        "p_value",
        "is_significant",
    ];
}

impl ReportRow for KurtosisRow {
    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Float(self.excess_kurtosis),
            FieldValue::Float(self.test.map(|t| t.statistic)),
            FieldValue::Float(self.test.map(|t| t.p_value)),
            FieldValue::Flag(self.is_significant),
        ]
    }
}

/// Combined skewness/tail-weight summary for continuous columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalityRow {
    pub skewness_values: Option<f64>,
    pub skew_is_significant: bool,
    pub excess_kurtosis: Option<f64>,
    pub tail_weight_is_significant: bool,
}

impl NormalityRow {
    pub const FIELDS: &'static [&'static str] = &[
        "skewness_values",
        "skew_is_significant",
        "excess_kurtosis",
        "tail_weight_is_significant",
    ];
}

impl ReportRow for NormalityRow {
    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Float(self.skewness_values),
            FieldValue::Flag(self.skew_is_significant),
            FieldValue::Float(self.excess_kurtosis),
            FieldValue::Flag(self.tail_weight_is_significant),
        ]
    }
}

/// All descriptive statistics of one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescribeRow {
    /// Non-null observations.
    pub count: usize,
    pub mean: f64,
    pub trimmed_mean: f64,
    pub median: f64,
    pub mode: f64,
    pub min: f64,
    pub max: f64,
    /// `"(min ~ max)"` with two decimals.
    pub range: String,
}

impl DescribeRow {
    pub const FIELDS: &'static [&'static str] = &[
        "count",
        "mean",
        "trimmed_mean",
        "median",
        "mode",
        "min",
        "max",
        "range",
    ];
}

impl ReportRow for DescribeRow {
    fn values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Count(self.count),
            FieldValue::Float(Some(self.mean)),
            FieldValue::Float(Some(self.trimmed_mean)),
            FieldValue::Float(Some(self.median)),
            FieldValue::Float(Some(self.mode)),
            FieldValue::Float(Some(self.min)),
            FieldValue::Float(Some(self.max)),
            FieldValue::Text(self.range.clone()),
        ]
    }
}

/// One row of a report table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry<R> {
    pub column: String,
    pub value: R,
}

/// Table of per-column results, indexed by column name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable<R> {
    fields: &'static [&'static str],
    entries: Vec<ReportEntry<R>>,
}

impl<R> ReportTable<R> {
    pub fn new(fields: &'static [&'static str]) -> Self {
        Self {
            fields,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, column: impl Into<String>, value: R) {
        self.entries.push(ReportEntry {
            column: column.into(),
            value,
        });
    }

    /// Field labels, excluding the leading `column` key.
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub fn get(&self, column: &str) -> Option<&R> {
        self.entries
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| &entry.value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.column.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.entries
            .iter()
            .map(|entry| (entry.column.as_str(), &entry.value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R: ReportRow> ReportTable<R> {
    /// Column names paired with the cell values of each row.
    pub fn rows(&self) -> Vec<(String, Vec<FieldValue>)> {
        self.entries
            .iter()
            .map(|entry| (entry.column.clone(), entry.value.values()))
            .collect()
    }

    /// Lays the table out as a Polars frame: a `column` key followed by one
    /// column per field.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if the frame cannot be assembled.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut columns = Vec::with_capacity(self.fields.len() + 1);
        columns.push(Series::new("column".into(), self.column_names()).into_column());
        let rows: Vec<Vec<FieldValue>> = self
            .entries
            .iter()
            .map(|entry| entry.value.values())
            .collect();
        for (idx, field) in self.fields.iter().enumerate() {
            let cells: Vec<FieldValue> = rows
                .iter()
                .map(|row| row.get(idx).cloned().unwrap_or(FieldValue::Float(None)))
                .collect();
            columns.push(field_series(field, &cells).into_column());
        }
        DataFrame::new(columns)
    }
}

fn field_series(name: &str, cells: &[FieldValue]) -> Series {
    match cells.first() {
        Some(FieldValue::Flag(_)) => {
            let values: Vec<Option<bool>> = cells.iter().map(FieldValue::as_flag).collect();
            Series::new(name.into(), values)
        }
        Some(FieldValue::Count(_)) => {
            let values: Vec<Option<u64>> = cells.iter().map(FieldValue::as_count).collect();
            Series::new(name.into(), values)
        }
        Some(FieldValue::Text(_)) => {
            let values: Vec<Option<&str>> = cells.iter().map(FieldValue::as_text).collect();
            Series::new(name.into(), values)
        }
        _ => {
            let values: Vec<Option<f64>> = cells.iter().map(FieldValue::as_f64).collect();
            Series::new(name.into(), values)
        }
    }
}
