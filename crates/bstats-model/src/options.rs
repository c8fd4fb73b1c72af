//! Configuration options for profiling.

use serde::{Deserialize, Serialize};

use crate::error::{ProfileError, Result};

/// Default threshold for hypothesis-test significance flags.
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Default fraction cut from each end of the sample for the trimmed mean.
pub const DEFAULT_TRIM_RATIO: f64 = 0.05;

/// How much of a column the missing-value detector inspects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingScan {
    /// Judge the column by its first cell only.
    ///
    /// A column is flagged when it is led by a missing marker; markers further
    /// down are not seen.
    #[default]
    FirstValue,
    /// Flag the column when any cell is a missing marker.
    FullColumn,
}

/// What to do when a column is tagged both Categorical and Continuous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagOverlap {
    /// Keep both tags.
    #[default]
    Keep,
    /// Drop Categorical from overlapping columns.
    PreferContinuous,
    /// Drop Continuous from overlapping columns.
    PreferCategorical,
}

/// Options controlling profiling behavior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileOptions {
    /// Threshold applied to every hypothesis-test flag (`p < level`).
    pub significance_level: f64,

    /// Fraction cut from each end of the sorted sample for the trimmed mean.
    pub trim_ratio: f64,

    /// Missing-value scan mode.
    pub missing_scan: MissingScan,

    /// Categorical/Continuous overlap policy.
    pub tag_overlap: TagOverlap,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self {
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
            trim_ratio: DEFAULT_TRIM_RATIO,
            missing_scan: MissingScan::default(),
            tag_overlap: TagOverlap::default(),
        }
    }
}

impl ProfileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_significance_level(mut self, level: f64) -> Self {
        self.significance_level = level;
        self
    }

    #[must_use]
    pub fn with_trim_ratio(mut self, ratio: f64) -> Self {
        self.trim_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_missing_scan(mut self, scan: MissingScan) -> Self {
        self.missing_scan = scan;
        self
    }

    #[must_use]
    pub fn with_tag_overlap(mut self, policy: TagOverlap) -> Self {
        self.tag_overlap = policy;
        self
    }

    /// Checks both numeric options.
    ///
    /// # Errors
    ///
    /// Returns the first option found out of range.
    pub fn validate(&self) -> Result<()> {
        validate_significance_level(self.significance_level)?;
        validate_trim_ratio(self.trim_ratio)?;
        Ok(())
    }
}

/// Significance levels must lie strictly between 0 and 1.
pub fn validate_significance_level(level: f64) -> Result<f64> {
    if level > 0.0 && level < 1.0 {
        Ok(level)
    } else {
        Err(ProfileError::InvalidSignificanceLevel(level))
    }
}

/// Trim ratios must lie in `[0, 0.5)`; at 0.5 nothing would be left to average.
pub fn validate_trim_ratio(ratio: f64) -> Result<f64> {
    if (0.0..0.5).contains(&ratio) {
        Ok(ratio)
    } else {
        Err(ProfileError::InvalidTrimRatio(ratio))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ProfileOptions::default();
        assert_eq!(options.significance_level, 0.05);
        assert_eq!(options.trim_ratio, 0.05);
        assert_eq!(options.missing_scan, MissingScan::FirstValue);
        assert_eq!(options.tag_overlap, TagOverlap::Keep);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_validation_bounds() {
        assert!(validate_trim_ratio(0.0).is_ok());
        assert!(validate_trim_ratio(0.49).is_ok());
        assert!(validate_trim_ratio(0.5).is_err());
        assert!(validate_trim_ratio(-0.1).is_err());
        assert!(validate_trim_ratio(f64::NAN).is_err());

        assert!(validate_significance_level(0.01).is_ok());
        assert!(validate_significance_level(0.0).is_err());
        assert!(validate_significance_level(1.0).is_err());
    }

    #[test]
    fn test_partial_deserialize_uses_defaults() {
        let options: ProfileOptions =
            serde_json::from_str(r#"{"trim_ratio": 0.1, "missing_scan": "full_column"}"#)
                .expect("deserialize options");
        assert_eq!(options.trim_ratio, 0.1);
        assert_eq!(options.significance_level, 0.05);
        assert_eq!(options.missing_scan, MissingScan::FullColumn);
    }
}
