//! Profiling engine for tabular datasets.
//!
//! Classifies columns as binary, categorical or continuous, detects apparent
//! missing-value markers, and builds descriptive statistics and
//! normality-oriented shape tests over the numeric columns of a Polars
//! [`DataFrame`](polars::prelude::DataFrame).

pub mod classify;
pub mod dataset;
pub mod missing;
pub mod numeric;
pub mod report;

pub use classify::{
    ColumnClassifier, MAX_CATEGORICAL_UNIQUES, element_type_of, is_binary, is_categorical,
    is_continuous,
};
pub use dataset::Dataset;
pub use missing::{
    MISSING_VALUE_MARKERS, MissingValueDetector, count_missing_markers,
    has_apparent_missing_value, is_missing_marker, is_missing_text,
};
pub use report::{NumericSample, StatsReportBuilder, format_range};
