//! Non-fatal profiling outcomes.
//!
//! Profiling never aborts because a statistic is inapplicable. Accessors
//! return [`Outcome::Empty`] with a reason instead, so callers can branch on
//! "nothing to report" without treating it as an error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Column list an accessor was asked to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Any,
    Binary,
    NonBinary,
    Numeric,
    Categorical,
}

impl ColumnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKind::Any => "any",
            ColumnKind::Binary => "binary",
            ColumnKind::NonBinary => "non-binary",
            ColumnKind::Numeric => "numerical",
            ColumnKind::Categorical => "categorical",
        }
    }
}

/// Why an accessor had nothing to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", content = "value", rename_all = "snake_case")]
pub enum EmptyReason {
    /// The table has zero rows or zero columns.
    Degenerate,
    /// `sample` was called with a size below one.
    InvalidSampleSize(i64),
    /// No column satisfied the requested classification.
    NoMatchingColumns(ColumnKind),
    /// No column carries an apparent missing-value marker.
    NoMissingValueColumns,
    /// No numeric column had observations to summarize.
    NoNumericColumns,
    /// No continuous column had observations to test.
    NoContinuousColumns,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::Degenerate => {
                write!(f, "data not read properly: table has no rows or no columns")
            }
            EmptyReason::InvalidSampleSize(n) => {
                write!(f, "sample size must be an integer >= 1, got {n}")
            }
            EmptyReason::NoMatchingColumns(ColumnKind::Any) => write!(f, "table has no columns"),
            EmptyReason::NoMatchingColumns(kind) => write!(f, "no {} column", kind.as_str()),
            EmptyReason::NoMissingValueColumns => {
                write!(f, "no columns with obvious missing values")
            }
            EmptyReason::NoNumericColumns => write!(f, "no numeric columns to report on"),
            EmptyReason::NoContinuousColumns => write!(f, "no continuous columns to report on"),
        }
    }
}

/// Result of a profiling accessor: a value, or an explained empty result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum Outcome<T> {
    Ok(T),
    Empty(EmptyReason),
}

impl<T> Outcome<T> {
    /// `Ok` unless `value` is empty by the given predicate.
    pub fn non_empty(value: T, is_empty: impl FnOnce(&T) -> bool, reason: EmptyReason) -> Self {
        if is_empty(&value) {
            Outcome::Empty(reason)
        } else {
            Outcome::Ok(value)
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Outcome::Empty(_))
    }

    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Ok(value) => Some(value),
            Outcome::Empty(_) => None,
        }
    }

    pub fn empty_reason(&self) -> Option<&EmptyReason> {
        match self {
            Outcome::Ok(_) => None,
            Outcome::Empty(reason) => Some(reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Ok(value) => Outcome::Ok(f(value)),
            Outcome::Empty(reason) => Outcome::Empty(reason),
        }
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.ok().unwrap_or_default()
    }
}

impl<T> From<Outcome<T>> for Option<T> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        let outcome = Outcome::non_empty(
            Vec::<String>::new(),
            Vec::is_empty,
            EmptyReason::NoMatchingColumns(ColumnKind::Binary),
        );
        assert!(outcome.is_empty());
        assert_eq!(
            outcome.empty_reason().map(ToString::to_string).as_deref(),
            Some("no binary column")
        );

        let outcome = Outcome::non_empty(vec![1], Vec::is_empty, EmptyReason::Degenerate);
        assert_eq!(outcome.ok(), Some(vec![1]));
    }

    #[test]
    fn test_map_keeps_reason() {
        let outcome: Outcome<usize> = Outcome::Empty(EmptyReason::InvalidSampleSize(0));
        let mapped = outcome.map(|n| n * 2);
        assert_eq!(mapped, Outcome::Empty(EmptyReason::InvalidSampleSize(0)));
        assert_eq!(
            EmptyReason::InvalidSampleSize(-3).to_string(),
            "sample size must be an integer >= 1, got -3"
        );
    }
}
