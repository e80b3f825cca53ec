//! Statistical functions backing the summarizer.

use crate::error::Result;
use crate::types::ColumnStats;
use polars::prelude::*;

/// Sample standard deviation (n-1 denominator).
pub(crate) fn calculate_std(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    if n <= 1.0 {
        return 0.0;
    }

    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Percentile of an ascending-sorted slice, interpolating linearly between
/// the two nearest ranks.
pub(crate) fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }

    let weight = pos - lower as f64;
    sorted[lower] * (1.0 - weight) + sorted[upper] * weight
}

/// Descriptive statistics for one numeric series, ignoring nulls.
pub(crate) fn column_stats(series: &Series) -> Result<ColumnStats> {
    let non_null = series.drop_nulls();
    let float_series = non_null.cast(&DataType::Float64)?;
    let mut values: Vec<f64> = float_series.f64()?.into_no_null_iter().collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let count = values.len();
    if count == 0 {
        return Ok(ColumnStats {
            name: series.name().to_string(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            median: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        });
    }

    let mean = values.iter().sum::<f64>() / count as f64;

    Ok(ColumnStats {
        name: series.name().to_string(),
        count,
        mean,
        std: calculate_std(&values),
        min: values[0],
        q25: percentile_sorted(&values, 0.25),
        median: percentile_sorted(&values, 0.5),
        q75: percentile_sorted(&values, 0.75),
        max: values[count - 1],
    })
}

/// Pearson correlation coefficient between two numeric series.
///
/// Rows where either side is null are skipped pairwise. Returns NaN for
/// degenerate inputs (fewer than two paired observations, or zero variance
/// on either side).
pub(crate) fn pearson(a: &Series, b: &Series) -> Result<f64> {
    let a_float = a.cast(&DataType::Float64)?;
    let b_float = b.cast(&DataType::Float64)?;
    let a_ca = a_float.f64()?;
    let b_ca = b_float.f64()?;

    let pairs: Vec<(f64, f64)> = a_ca
        .into_iter()
        .zip(b_ca.into_iter())
        .filter_map(|(x, y)| match (x, y) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => None,
        })
        .collect();

    if pairs.len() < 2 {
        return Ok(f64::NAN);
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return Ok(f64::NAN);
    }

    Ok(cov / (var_x * var_y).sqrt())
}
