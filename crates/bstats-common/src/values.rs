//! Polars AnyValue utility functions.
//!
//! This module provides helper functions for working with Polars `AnyValue`
//! and `Series` values, including null detection, numeric extraction and
//! display formatting.

use polars::prelude::{AnyValue, ChunkFilter, DataType, Float64Chunked, PolarsResult, Series};

/// Returns true for values the profiler treats as null: `Null` and float `NaN`.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use bstats_common::is_null_like;
///
/// assert!(is_null_like(&AnyValue::Null));
/// assert!(is_null_like(&AnyValue::Float64(f64::NAN)));
/// assert!(!is_null_like(&AnyValue::Int64(0)));
/// ```
pub fn is_null_like(value: &AnyValue<'_>) -> bool {
    match value {
        AnyValue::Null => true,
        AnyValue::Float32(v) => v.is_nan(),
        AnyValue::Float64(v) => v.is_nan(),
        _ => false,
    }
}

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null` and formats floats without
/// unnecessary trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use bstats_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Formats a floating-point number as a string without trailing zeros.
///
/// # Examples
///
/// ```
/// use bstats_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.5), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// ```
pub fn format_numeric(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() || trimmed == "-" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Formats a number with a fixed count of decimal places.
///
/// # Examples
///
/// ```
/// use bstats_common::format_fixed;
///
/// assert_eq!(format_fixed(1.0, 2), "1.00");
/// assert_eq!(format_fixed(7.456, 2), "7.46");
/// ```
pub fn format_fixed(v: f64, decimals: usize) -> String {
    format!("{v:.decimals$}")
}

/// Casts a numeric series to `Float64` and keeps only its observations,
/// dropping nulls and `NaN`.
///
/// # Errors
///
/// Returns the Polars error when the series cannot be cast to `Float64`.
pub fn series_to_f64(series: &Series) -> PolarsResult<Float64Chunked> {
    let casted = series.cast(&DataType::Float64)?;
    let values = casted.f64()?.drop_nulls();
    values.filter(&values.is_not_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::NamedFrom;

    #[test]
    fn test_is_null_like() {
        assert!(is_null_like(&AnyValue::Null));
        assert!(is_null_like(&AnyValue::Float32(f32::NAN)));
        assert!(!is_null_like(&AnyValue::String(" ")));
        assert!(!is_null_like(&AnyValue::Boolean(false)));
    }

    #[test]
    fn test_any_to_string_floats() {
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(1.0)), "1");
        assert_eq!(any_to_string(AnyValue::Float64(10.0)), "10");
    }

    #[test]
    fn test_any_to_string_boolean() {
        assert_eq!(any_to_string(AnyValue::Boolean(true)), "true");
        assert_eq!(any_to_string(AnyValue::Boolean(false)), "false");
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(-0.25), "-0.25");
        assert_eq!(format_numeric(0.0), "0");
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(3.0, 2), "3.00");
        assert_eq!(format_fixed(-1.005, 1), "-1.0");
    }

    #[test]
    fn test_series_to_f64_drops_nulls_and_nan() {
        let series = Series::new("x".into(), &[Some(1.0), None, Some(f64::NAN), Some(4.0)]);
        let observed = series_to_f64(&series).unwrap();
        assert_eq!(observed.null_count(), 0);
        assert_eq!(observed.into_no_null_iter().collect::<Vec<_>>(), vec![1.0, 4.0]);

        let ints = Series::new("n".into(), &[Some(3i64), None, Some(-2)]);
        let observed = series_to_f64(&ints).unwrap();
        assert_eq!(observed.into_no_null_iter().collect::<Vec<_>>(), vec![3.0, -2.0]);
    }
}
