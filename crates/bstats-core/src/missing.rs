//! Detection of apparent missing-value markers.
//!
//! A cell is a missing marker when it is null, a float `NaN`, or a string
//! exactly equal to one of [`MISSING_VALUE_MARKERS`]. Numbers and booleans are
//! never markers.
//!
//! In the default [`MissingScan::FirstValue`] mode a column is flagged only
//! when its first cell is a marker: `[" ", "5", "7"]` is flagged,
//! `["5", " ", "7"]` is not. [`MissingScan::FullColumn`] flags a column when
//! any cell is a marker.

use polars::prelude::{AnyValue, DataType, PolarsResult, Series};

use bstats_common::is_null_like;
use bstats_model::MissingScan;

/// Placeholder strings treated as missing values, besides null and `NaN`.
pub const MISSING_VALUE_MARKERS: [&str; 9] = [" ", "\"\"", "''", "()", "[]", "{}", "?", "*", "."];

pub fn is_missing_text(value: &str) -> bool {
    MISSING_VALUE_MARKERS.contains(&value)
}

pub fn is_missing_marker(value: &AnyValue<'_>) -> bool {
    if is_null_like(value) {
        return true;
    }
    match value {
        AnyValue::String(s) => is_missing_text(s),
        AnyValue::StringOwned(s) => is_missing_text(s.as_str()),
        _ => false,
    }
}

/// Whether the first cell of the column is a missing marker.
///
/// Only the first cell is examined; an empty column is never flagged.
///
/// # Errors
///
/// Returns the Polars error if the first value cannot be read.
pub fn has_apparent_missing_value(series: &Series) -> PolarsResult<bool> {
    if series.is_empty() {
        return Ok(false);
    }
    Ok(is_missing_marker(&series.get(0)?))
}

/// Counts every marker cell in the column.
///
/// # Errors
///
/// Returns the Polars error if the column cannot be read as its dtype.
pub fn count_missing_markers(series: &Series) -> PolarsResult<usize> {
    match series.dtype() {
        DataType::String => Ok(series
            .str()?
            .into_iter()
            .filter(|value| value.is_none_or(is_missing_text))
            .count()),
        DataType::Float32 | DataType::Float64 => {
            let casted = series.cast(&DataType::Float64)?;
            Ok(casted
                .f64()?
                .into_iter()
                .filter(|value| value.is_none_or(f64::is_nan))
                .count())
        }
        _ => Ok(series.null_count()),
    }
}

/// Flags columns according to a [`MissingScan`] mode.
#[derive(Debug, Clone, Copy, Default)]
pub struct MissingValueDetector {
    scan: MissingScan,
}

impl MissingValueDetector {
    pub fn new(scan: MissingScan) -> Self {
        Self { scan }
    }

    /// # Errors
    ///
    /// Returns the Polars error if the column cannot be read.
    pub fn detect(&self, series: &Series) -> PolarsResult<bool> {
        match self.scan {
            MissingScan::FirstValue => has_apparent_missing_value(series),
            MissingScan::FullColumn => Ok(count_missing_markers(series)? > 0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::NamedFrom;

    #[test]
    fn test_marker_set() {
        for marker in MISSING_VALUE_MARKERS {
            assert!(is_missing_marker(&AnyValue::String(marker)), "{marker:?}");
        }
        assert!(is_missing_marker(&AnyValue::Null));
        assert!(is_missing_marker(&AnyValue::Float64(f64::NAN)));
        assert!(!is_missing_marker(&AnyValue::String("")));
        assert!(!is_missing_marker(&AnyValue::String("NA")));
        assert!(!is_missing_marker(&AnyValue::String("  ")));
        assert!(!is_missing_marker(&AnyValue::Int64(0)));
        assert!(!is_missing_marker(&AnyValue::Boolean(false)));
    }

    #[test]
    fn test_count_missing_markers() {
        let text = Series::new("t".into(), &[Some("a"), Some("?"), None, Some(".")]);
        assert_eq!(count_missing_markers(&text).unwrap(), 3);

        let floats = Series::new("f".into(), &[Some(1.0), Some(f64::NAN), None]);
        assert_eq!(count_missing_markers(&floats).unwrap(), 2);

        let ints = Series::new("i".into(), &[Some(1i32), None, Some(3)]);
        assert_eq!(count_missing_markers(&ints).unwrap(), 1);
    }

    #[test]
    fn test_empty_column_is_not_flagged() {
        let empty = Series::new("e".into(), Vec::<i64>::new());
        assert!(!has_apparent_missing_value(&empty).unwrap());
        assert!(!MissingValueDetector::new(MissingScan::FullColumn)
            .detect(&empty)
            .unwrap());
    }
}
