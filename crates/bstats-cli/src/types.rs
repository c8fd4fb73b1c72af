use std::path::PathBuf;

use polars::prelude::DataFrame;
use serde::Serialize;

use bstats_model::{
    ColumnTag, DescribeRow, ElementType, KurtosisRow, NormalityRow, Outcome, ReportTable,
    SkewnessRow,
};

/// Everything `bstats profile` prints for one file.
#[derive(Debug, Serialize)]
pub struct ProfileReport {
    pub source: PathBuf,
    pub rows: Outcome<usize>,
    pub columns: Vec<ColumnOverview>,
    pub describe: Outcome<ReportTable<DescribeRow>>,
    pub skewness: Outcome<ReportTable<SkewnessRow>>,
    pub kurtosis: Outcome<ReportTable<KurtosisRow>>,
    pub normality: Outcome<ReportTable<NormalityRow>>,
    #[serde(skip)]
    pub sample: Option<Outcome<DataFrame>>,
}

/// Classification and missing-value summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnOverview {
    pub name: String,
    pub element_type: ElementType,
    pub unique_count: usize,
    pub tags: Vec<ColumnTag>,
    pub has_missing_marker: bool,
    pub missing_cells: usize,
}
