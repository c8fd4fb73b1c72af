//! Numeric primitives over the non-null observations of a column.
//!
//! Every function takes the `Float64` observations of a column (nulls and `NaN`
//! already removed, see [`series_to_f64`]) and returns `None` when the quantity
//! is undefined for the sample, e.g. the mean of an empty column or the
//! skewness of a constant one. Location and extremes come from Polars
//! aggregations; the moment kernels below are computed directly.
//!
//! Skewness and kurtosis are the biased (population) moment estimators. The
//! shape tests are D'Agostino's skewness test and the Anscombe–Glynn kurtosis
//! test, both reduced to a standard-normal z score with a two-sided p-value.

use polars::prelude::{
    ChunkAgg, ChunkQuantile, ChunkSort, DataType, Float64Chunked, IntoSeries, PolarsResult,
    Series,
};
use statrs::distribution::{ContinuousCDF, Normal};

use bstats_common::series_to_f64;
use bstats_model::ShapeTest;

/// Smallest sample the skewness test accepts.
pub const SKEW_TEST_MIN_SAMPLES: usize = 8;

/// Smallest sample the kurtosis test accepts.
pub const KURTOSIS_TEST_MIN_SAMPLES: usize = 5;

/// Below this size the normal approximation behind both tests is poor.
pub const RELIABLE_TEST_SAMPLES: usize = 20;

/// Counts distinct non-null values. Float `NaN` counts as null.
///
/// # Errors
///
/// Returns the Polars error if the series cannot be inspected.
pub fn unique_count(series: &Series) -> PolarsResult<usize> {
    match series.dtype() {
        DataType::Float32 | DataType::Float64 => series_to_f64(series)?.into_series().n_unique(),
        _ => series.drop_nulls().n_unique(),
    }
}

pub fn mean(values: &Float64Chunked) -> Option<f64> {
    values.mean()
}

/// Mean after cutting `floor(ratio * n)` observations from each end.
///
/// Returns `None` when nothing is left to average.
pub fn trimmed_mean(values: &Float64Chunked, ratio: f64) -> Option<f64> {
    let n = values.len();
    let cut = (ratio * n as f64).floor() as usize;
    if cut * 2 >= n {
        return None;
    }
    values.sort(false).slice(cut as i64, n - 2 * cut).mean()
}

pub fn median(values: &Float64Chunked) -> Option<f64> {
    values.median()
}

/// Most frequent value; the lowest one wins a tie.
pub fn mode(values: &Float64Chunked) -> Option<f64> {
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for value in values.sort(false).into_no_null_iter() {
        match runs.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => runs.push((value, 1)),
        }
    }
    runs.into_iter()
        .fold(None, |best: Option<(f64, usize)>, (value, count)| match best {
            Some((_, top)) if top >= count => best,
            _ => Some((value, count)),
        })
        .map(|(value, _)| value)
}

pub fn min(values: &Float64Chunked) -> Option<f64> {
    ChunkAgg::min(values)
}

pub fn max(values: &Float64Chunked) -> Option<f64> {
    ChunkAgg::max(values)
}

/// Third standardized moment, `m3 / m2^1.5`.
pub fn skewness(values: &Float64Chunked) -> Option<f64> {
    let moments = Moments::of(values)?;
    Some(moments.m3 / moments.m2.powf(1.5))
}

/// Fourth standardized moment minus 3, `m4 / m2^2 - 3`.
pub fn excess_kurtosis(values: &Float64Chunked) -> Option<f64> {
    let moments = Moments::of(values)?;
    Some(moments.m4 / (moments.m2 * moments.m2) - 3.0)
}

/// D'Agostino test of the null hypothesis that the population skewness is 0.
///
/// Requires at least [`SKEW_TEST_MIN_SAMPLES`] observations and a
/// non-constant sample.
pub fn skew_test(values: &Float64Chunked) -> Option<ShapeTest> {
    if values.len() < SKEW_TEST_MIN_SAMPLES {
        return None;
    }
    let b2 = skewness(values)?;
    let n = values.len() as f64;
    let y = b2 * (((n + 1.0) * (n + 3.0)) / (6.0 * (n - 2.0))).sqrt();
    let beta2 = (3.0 * (n * n + 27.0 * n - 70.0) * (n + 1.0) * (n + 3.0))
        / ((n - 2.0) * (n + 5.0) * (n + 7.0) * (n + 9.0));
    let w2 = -1.0 + (2.0 * (beta2 - 1.0)).sqrt();
    let delta = 1.0 / (0.5 * w2.ln()).sqrt();
    let alpha = (2.0 / (w2 - 1.0)).sqrt();
    let ratio = y / alpha;
    let z = delta * (ratio + (ratio * ratio + 1.0).sqrt()).ln();
    two_sided(z)
}

/// Anscombe–Glynn test of the null hypothesis that the population has
/// normal tails (excess kurtosis 0).
///
/// Requires at least [`KURTOSIS_TEST_MIN_SAMPLES`] observations and a
/// non-constant sample.
pub fn kurtosis_test(values: &Float64Chunked) -> Option<ShapeTest> {
    if values.len() < KURTOSIS_TEST_MIN_SAMPLES {
        return None;
    }
    let b2 = excess_kurtosis(values)? + 3.0;
    let n = values.len() as f64;
    let expected = 3.0 * (n - 1.0) / (n + 1.0);
    let variance =
        24.0 * n * (n - 2.0) * (n - 3.0) / ((n + 1.0) * (n + 1.0) * (n + 3.0) * (n + 5.0));
    let x = (b2 - expected) / variance.sqrt();
    let sqrt_beta1 = 6.0 * (n * n - 5.0 * n + 2.0) / ((n + 7.0) * (n + 9.0))
        * ((6.0 * (n + 3.0) * (n + 5.0)) / (n * (n - 2.0) * (n - 3.0))).sqrt();
    let a = 6.0
        + 8.0 / sqrt_beta1 * (2.0 / sqrt_beta1 + (1.0 + 4.0 / (sqrt_beta1 * sqrt_beta1)).sqrt());
    let term1 = 1.0 - 2.0 / (9.0 * a);
    let denom = 1.0 + x * (2.0 / (a - 4.0)).sqrt();
    if denom == 0.0 {
        return None;
    }
    let term2 = denom.signum() * ((1.0 - 2.0 / a) / denom.abs()).cbrt();
    let z = (term1 - term2) / (2.0 / (9.0 * a)).sqrt();
    two_sided(z)
}

fn two_sided(z: f64) -> Option<ShapeTest> {
    if !z.is_finite() {
        return None;
    }
    let p_value = 2.0 * Normal::standard().sf(z.abs());
    Some(ShapeTest {
        statistic: z,
        p_value,
    })
}

/// Central moments of a sample.
struct Moments {
    m2: f64,
    m3: f64,
    m4: f64,
}

impl Moments {
    /// `None` for empty or (numerically) constant samples.
    fn of(values: &Float64Chunked) -> Option<Self> {
        let mean = values.mean()?;
        let n = values.len() as f64;
        let (mut m2, mut m3, mut m4) = (0.0, 0.0, 0.0);
        for value in values.into_no_null_iter() {
            let d = value - mean;
            let d2 = d * d;
            m2 += d2;
            m3 += d2 * d;
            m4 += d2 * d2;
        }
        let m2 = m2 / n;
        if m2 <= (f64::EPSILON * mean).powi(2) {
            return None;
        }
        Some(Self {
            m2,
            m3: m3 / n,
            m4: m4 / n,
        })
    }
}
