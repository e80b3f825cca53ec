//! Shared result types produced by the summarizer and consumed by the
//! reporting layer.

use serde::{Deserialize, Serialize};

/// Five-number-plus-mean summary of one numeric column.
///
/// `std` is the sample standard deviation (n-1 denominator); percentiles use
/// linear interpolation between the two nearest ranks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnStats {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Pairwise Pearson correlation matrix over the numeric columns.
///
/// Row/column order matches `columns`; the diagonal is 1.0 and entries for
/// degenerate pairs (fewer than two paired observations, or zero variance)
/// are NaN.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Number of numeric columns in the matrix.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// True when no numeric column was available.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Correlation between columns `i` and `j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Scalar facts derived from the cleaned table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetFacts {
    /// Number of distinct values in the country column.
    pub country_count: usize,
    /// Smallest observation year.
    pub year_min: i64,
    /// Largest observation year.
    pub year_max: i64,
    /// Mean adult literacy rate across all rows.
    pub mean_literacy: f64,
    /// Mean government education spending across all rows.
    pub mean_spending: f64,
}

/// One entry of the latest-year literacy ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryLiteracy {
    pub country: String,
    pub literacy_pct: f64,
}

/// One observation of a single-country literacy time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i64,
    pub literacy_pct: f64,
}

/// Everything the summarizer derives from the cleaned table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Per-numeric-column descriptive statistics.
    pub column_stats: Vec<ColumnStats>,
    /// Numeric-only correlation matrix.
    pub correlation: CorrelationMatrix,
    /// Derived scalar facts.
    pub facts: DatasetFacts,
    /// Year the ranking below refers to; `None` when the table is empty.
    pub latest_year: Option<i64>,
    /// Top countries by literacy rate in the latest year, descending.
    pub top_by_latest_year: Vec<CountryLiteracy>,
    /// Country whose trend series was extracted.
    pub trend_country: String,
    /// Year-ascending literacy series for `trend_country`; may be empty.
    pub country_trend: Vec<TrendPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_matrix_access() {
        let matrix = CorrelationMatrix {
            columns: vec!["a".to_string(), "b".to_string()],
            values: vec![vec![1.0, 0.5], vec![0.5, 1.0]],
        };

        assert_eq!(matrix.len(), 2);
        assert!(!matrix.is_empty());
        assert_eq!(matrix.get(0, 1), 0.5);
        assert_eq!(matrix.get(1, 0), 0.5);
    }

    #[test]
    fn test_empty_correlation_matrix() {
        let matrix = CorrelationMatrix {
            columns: vec![],
            values: vec![],
        };
        assert!(matrix.is_empty());
        assert_eq!(matrix.len(), 0);
    }
}
