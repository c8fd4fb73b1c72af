use polars::prelude::{DataType, PolarsError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("column '{column}' has unsupported type {dtype}")]
    UnsupportedColumnType { column: String, dtype: DataType },
    #[error("trim ratio must be in [0, 0.5), got {0}")]
    InvalidTrimRatio(f64),
    #[error("significance level must be in (0, 1), got {0}")]
    InvalidSignificanceLevel(f64),
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, ProfileError>;
