//! Data model for the bstats column profiler.
//!
//! Element types, classification tags, non-fatal outcomes, report tables and
//! profiling options shared by the engine and the CLI.

pub mod classification;
pub mod element;
pub mod error;
pub mod options;
pub mod outcome;
pub mod report;

pub use classification::{ColumnClassification, ColumnTag, ColumnTags};
pub use element::ElementType;
pub use error::{ProfileError, Result};
pub use options::{
    DEFAULT_SIGNIFICANCE_LEVEL, DEFAULT_TRIM_RATIO, MissingScan, ProfileOptions, TagOverlap,
    validate_significance_level, validate_trim_ratio,
};
pub use outcome::{ColumnKind, EmptyReason, Outcome};
pub use report::{
    DescribeRow, FieldValue, KurtosisRow, NormalityRow, ReportEntry, ReportRow, ReportTable,
    ShapeTest, SkewnessRow,
};
