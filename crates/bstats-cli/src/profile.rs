//! Loading a CSV file and profiling it into a [`ProfileReport`].

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::{debug, info, info_span};

use bstats_core::Dataset;
use bstats_model::ProfileOptions;

use crate::types::{ColumnOverview, ProfileReport};

/// Rows scanned to infer column dtypes.
const INFER_SCHEMA_ROWS: usize = 100;

/// What to profile and how.
#[derive(Debug, Clone, Default)]
pub struct ProfileRequest {
    pub options: ProfileOptions,
    /// Rows to sample, when a sample was asked for.
    pub sample_size: Option<i64>,
}

/// Reads a CSV file with a header row.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or parsed.
pub fn load_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("open {}", path.display()))?
        .finish()
        .with_context(|| format!("parse {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded csv"
    );
    Ok(df)
}

/// Loads and profiles a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or a column cannot be profiled.
pub fn profile_csv(path: &Path, request: &ProfileRequest) -> Result<ProfileReport> {
    let span = info_span!("profile", path = %path.display());
    let _guard = span.enter();
    let df = load_csv(path)?;
    profile_frame(path.to_path_buf(), &df, request)
}

/// Profiles an in-memory frame.
///
/// # Errors
///
/// Returns an error for unsupported column types, invalid options, or Polars
/// read failures.
pub fn profile_frame(
    source: PathBuf,
    df: &DataFrame,
    request: &ProfileRequest,
) -> Result<ProfileReport> {
    let dataset = Dataset::with_options(df, request.options).context("build dataset")?;
    let columns = column_overview(&dataset)?;
    debug!(columns = columns.len(), "classified columns");

    let describe = dataset.describe().context("describe numeric columns")?;
    let skewness = dataset
        .skewness_report_default()
        .context("skewness report")?;
    let kurtosis = dataset
        .kurtosis_report_default()
        .context("kurtosis report")?;
    let normality = dataset
        .normality_report_default()
        .context("normality report")?;
    let sample = match request.sample_size {
        Some(n) => Some(dataset.sample(n).context("sample rows")?),
        None => None,
    };

    Ok(ProfileReport {
        source,
        rows: dataset.row_count(),
        columns,
        describe,
        skewness,
        kurtosis,
        normality,
        sample,
    })
}

fn column_overview(dataset: &Dataset<'_>) -> Result<Vec<ColumnOverview>> {
    let flagged = dataset
        .columns_with_missing_values()
        .context("scan for missing values")?
        .unwrap_or_default();
    let counts = dataset
        .missing_value_counts()
        .context("count missing values")?;
    let classifications = dataset.classifications().context("classify columns")?;

    Ok(classifications
        .into_iter()
        .zip(counts)
        .map(|(classification, (_, missing_cells))| ColumnOverview {
            has_missing_marker: flagged.contains(&classification.name),
            tags: classification.tags.iter().collect(),
            element_type: classification.element_type,
            unique_count: classification.unique_count,
            missing_cells,
            name: classification.name,
        })
        .collect())
}
