//! Column classification from unique-value counts.
//!
//! Three independent predicates decide the tags of a column:
//!
//! - **Binary**: exactly two distinct non-null values.
//! - **Categorical**: more than two and at most [`MAX_CATEGORICAL_UNIQUES`]
//!   distinct values, with a text or integer element type.
//! - **Continuous**: more than two distinct values with an integer or float
//!   element type.
//!
//! The predicates are not a decision tree. An integer column with a handful
//! of distinct values is both Categorical and Continuous unless the
//! configured [`TagOverlap`] policy says otherwise.

use polars::prelude::Series;
use tracing::debug;

use bstats_model::{
    ColumnClassification, ColumnTag, ColumnTags, ElementType, ProfileError, Result, TagOverlap,
};

use crate::numeric::unique_count;

/// Upper bound (inclusive) on distinct values for the categorical tag.
pub const MAX_CATEGORICAL_UNIQUES: usize = 30;

pub fn is_binary(unique_count: usize) -> bool {
    unique_count == 2
}

pub fn is_categorical(unique_count: usize, element_type: ElementType) -> bool {
    unique_count > 2
        && unique_count <= MAX_CATEGORICAL_UNIQUES
        && element_type.is_categorical_eligible()
}

pub fn is_continuous(unique_count: usize, element_type: ElementType) -> bool {
    unique_count > 2 && element_type.is_numeric()
}

/// Applies the recognition predicates to single columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnClassifier {
    overlap: TagOverlap,
}

impl ColumnClassifier {
    pub fn new(overlap: TagOverlap) -> Self {
        Self { overlap }
    }

    /// Tags for a column with `unique_count` distinct values.
    pub fn tags(&self, unique_count: usize, element_type: ElementType) -> ColumnTags {
        let mut tags = ColumnTags::from_flags(
            is_binary(unique_count),
            is_categorical(unique_count, element_type),
            is_continuous(unique_count, element_type),
        );
        if tags.is_ambiguous() {
            match self.overlap {
                TagOverlap::Keep => {}
                TagOverlap::PreferContinuous => tags.remove(ColumnTag::Categorical),
                TagOverlap::PreferCategorical => tags.remove(ColumnTag::Continuous),
            }
        }
        tags
    }

    /// Classifies a series whose element type is already known.
    ///
    /// # Errors
    ///
    /// Returns the Polars error if unique values cannot be counted.
    pub fn classify(&self, series: &Series, element_type: ElementType) -> Result<ColumnClassification> {
        let unique_count = unique_count(series)?;
        let tags = self.tags(unique_count, element_type);
        debug!(
            column = series.name().as_str(),
            %element_type,
            unique_count,
            %tags,
            "classified column"
        );
        Ok(ColumnClassification {
            name: series.name().to_string(),
            element_type,
            unique_count,
            tags,
        })
    }

    /// Classifies a series, deriving the element type from its dtype.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::UnsupportedColumnType`] for dtypes outside the
    /// integer/float/text/boolean set.
    pub fn classify_series(&self, series: &Series) -> Result<ColumnClassification> {
        let element_type = element_type_of(series)?;
        self.classify(series, element_type)
    }
}

/// Element type of a series.
///
/// # Errors
///
/// Returns [`ProfileError::UnsupportedColumnType`] when the dtype has no
/// element-type counterpart.
pub fn element_type_of(series: &Series) -> Result<ElementType> {
    ElementType::from_dtype(series.dtype()).ok_or_else(|| ProfileError::UnsupportedColumnType {
        column: series.name().to_string(),
        dtype: series.dtype().clone(),
    })
}
