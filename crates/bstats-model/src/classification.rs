//! Column classification tags.
//!
//! Tags are independent: a column may be Binary, Categorical and Continuous
//! in any combination the predicates allow, and an empty tag set means the
//! column is unclassified. Small-cardinality integer columns routinely carry
//! both Categorical and Continuous.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::element::ElementType;

/// A single classification label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnTag {
    /// Exactly two distinct non-null values.
    Binary,
    /// A small number of distinct text or integer values.
    Categorical,
    /// More than two distinct numeric values.
    Continuous,
}

impl ColumnTag {
    pub const ALL: [ColumnTag; 3] = [
        ColumnTag::Binary,
        ColumnTag::Categorical,
        ColumnTag::Continuous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnTag::Binary => "binary",
            ColumnTag::Categorical => "categorical",
            ColumnTag::Continuous => "continuous",
        }
    }
}

impl fmt::Display for ColumnTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Set of zero or more [`ColumnTag`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTags {
    binary: bool,
    categorical: bool,
    continuous: bool,
}

impl ColumnTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tag set from the three predicate results.
    pub fn from_flags(binary: bool, categorical: bool, continuous: bool) -> Self {
        Self {
            binary,
            categorical,
            continuous,
        }
    }

    pub fn insert(&mut self, tag: ColumnTag) {
        *self.slot(tag) = true;
    }

    pub fn remove(&mut self, tag: ColumnTag) {
        *self.slot(tag) = false;
    }

    pub fn contains(&self, tag: ColumnTag) -> bool {
        match tag {
            ColumnTag::Binary => self.binary,
            ColumnTag::Categorical => self.categorical,
            ColumnTag::Continuous => self.continuous,
        }
    }

    /// No predicate matched.
    pub fn is_unclassified(&self) -> bool {
        !(self.binary || self.categorical || self.continuous)
    }

    /// Carries both Categorical and Continuous.
    pub fn is_ambiguous(&self) -> bool {
        self.categorical && self.continuous
    }

    pub fn iter(&self) -> impl Iterator<Item = ColumnTag> + '_ {
        ColumnTag::ALL
            .into_iter()
            .filter(move |tag| self.contains(*tag))
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.is_unclassified()
    }

    fn slot(&mut self, tag: ColumnTag) -> &mut bool {
        match tag {
            ColumnTag::Binary => &mut self.binary,
            ColumnTag::Categorical => &mut self.categorical,
            ColumnTag::Continuous => &mut self.continuous,
        }
    }
}

impl fmt::Display for ColumnTags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unclassified() {
            return write!(f, "unclassified");
        }
        let labels: Vec<&str> = self.iter().map(|tag| tag.as_str()).collect();
        write!(f, "{}", labels.join(", "))
    }
}

/// Classification of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnClassification {
    pub name: String,
    pub element_type: ElementType,
    /// Distinct non-null values.
    pub unique_count: usize,
    pub tags: ColumnTags,
}

impl ColumnClassification {
    pub fn has(&self, tag: ColumnTag) -> bool {
        self.tags.contains(tag)
    }
}
