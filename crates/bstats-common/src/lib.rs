//! Shared utilities for bstats crates.
//!
//! This crate provides the Polars `AnyValue` and `Series` helpers used by the
//! profiling engine and the CLI.

pub mod values;

// Re-export commonly used functions at crate root for convenience
pub use values::{any_to_string, format_fixed, format_numeric, is_null_like, series_to_f64};
