//! Semantic element types carried by each column.
//!
//! The element type is decided once, from the Polars dtype, when a dataset is
//! wrapped. Classification predicates branch on this closed set instead of
//! inspecting individual values.

use polars::prelude::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// Signed or unsigned integers.
    Integer,
    /// `Float32` / `Float64`.
    Float,
    /// UTF-8 strings.
    Text,
    /// Booleans.
    Boolean,
}

impl ElementType {
    /// Maps a Polars dtype to an element type, `None` for unsupported dtypes.
    pub fn from_dtype(dtype: &DataType) -> Option<Self> {
        match dtype {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => Some(ElementType::Integer),
            DataType::Float32 | DataType::Float64 => Some(ElementType::Float),
            DataType::String => Some(ElementType::Text),
            DataType::Boolean => Some(ElementType::Boolean),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Integer => "integer",
            ElementType::Float => "float",
            ElementType::Text => "text",
            ElementType::Boolean => "boolean",
        }
    }

    /// Integer or float: eligible for descriptive statistics.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ElementType::Integer | ElementType::Float)
    }

    /// Text or integer: eligible for the categorical tag.
    pub fn is_categorical_eligible(&self) -> bool {
        matches!(self, ElementType::Text | ElementType::Integer)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
