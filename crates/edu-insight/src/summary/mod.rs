//! Descriptive statistics and derived views over the cleaned table.
//!
//! Everything here is a pure read: the summarizer never mutates the table it
//! is given, and every derived view is an owned copy of the relevant values.

pub(crate) mod statistics;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::schema::{COL_COUNTRY, COL_LITERACY, COL_SPENDING, COL_YEAR};
use crate::types::{
    ColumnStats, CorrelationMatrix, CountryLiteracy, DatasetFacts, DatasetSummary, TrendPoint,
};
use crate::utils::is_numeric_dtype;
use polars::prelude::*;
use std::cmp::Ordering;
use tracing::debug;

/// Computes descriptive statistics and derived views from the cleaned table.
pub struct Summarizer;

impl Summarizer {
    /// Summarize the cleaned table.
    pub fn summarize(df: &DataFrame, config: &AnalysisConfig) -> Result<DatasetSummary> {
        let column_stats = Self::describe(df)?;
        let correlation = Self::correlation_matrix(df)?;
        let facts = Self::derived_facts(df)?;
        let (latest_year, top_by_latest_year) =
            Self::top_by_latest_year(df, config.top_countries)?;
        let country_trend = Self::country_trend(df, &config.trend_country)?;

        if country_trend.is_empty() {
            debug!("No rows for country '{}'", config.trend_country);
        }

        Ok(DatasetSummary {
            column_stats,
            correlation,
            facts,
            latest_year,
            top_by_latest_year,
            trend_country: config.trend_country.clone(),
            country_trend,
        })
    }

    /// Numeric columns of the table, in original column order.
    fn numeric_columns(df: &DataFrame) -> Vec<&Series> {
        df.get_columns()
            .iter()
            .map(|col| col.as_materialized_series())
            .filter(|series| is_numeric_dtype(series.dtype()))
            .collect()
    }

    /// Five-number-plus-mean summary of every numeric column.
    pub fn describe(df: &DataFrame) -> Result<Vec<ColumnStats>> {
        Self::numeric_columns(df)
            .into_iter()
            .map(statistics::column_stats)
            .collect()
    }

    /// Pairwise Pearson correlation matrix over the numeric columns.
    ///
    /// The matrix is symmetric with 1.0 on the diagonal; non-numeric columns
    /// are excluded entirely.
    pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
        let numeric = Self::numeric_columns(df);
        let n = numeric.len();

        let columns: Vec<String> = numeric.iter().map(|s| s.name().to_string()).collect();
        let mut values = vec![vec![0.0f64; n]; n];

        for i in 0..n {
            values[i][i] = 1.0;
            for j in (i + 1)..n {
                let r = statistics::pearson(numeric[i], numeric[j])?;
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Ok(CorrelationMatrix { columns, values })
    }

    /// Scalar facts over the whole table.
    fn derived_facts(df: &DataFrame) -> Result<DatasetFacts> {
        let country_count = df
            .column(COL_COUNTRY)?
            .as_materialized_series()
            .n_unique()?;

        let year_ca = df.column(COL_YEAR)?.as_materialized_series().i64()?;
        let year_min = year_ca.min().unwrap_or(0);
        let year_max = year_ca.max().unwrap_or(0);

        let mean_literacy = df
            .column(COL_LITERACY)?
            .as_materialized_series()
            .cast(&DataType::Float64)?
            .mean()
            .unwrap_or(f64::NAN);
        let mean_spending = df
            .column(COL_SPENDING)?
            .as_materialized_series()
            .cast(&DataType::Float64)?
            .mean()
            .unwrap_or(f64::NAN);

        Ok(DatasetFacts {
            country_count,
            year_min,
            year_max,
            mean_literacy,
            mean_spending,
        })
    }

    /// Rows of the maximum year, ranked descending by literacy rate and cut
    /// to the top `n`. Ties keep their original relative order.
    fn top_by_latest_year(
        df: &DataFrame,
        n: usize,
    ) -> Result<(Option<i64>, Vec<CountryLiteracy>)> {
        let year_ca = df.column(COL_YEAR)?.as_materialized_series().i64()?;
        let Some(latest) = year_ca.max() else {
            return Ok((None, Vec::new()));
        };

        let country_ca = df.column(COL_COUNTRY)?.as_materialized_series().str()?;
        let literacy = df
            .column(COL_LITERACY)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let literacy_ca = literacy.f64()?;

        let mut entries = Vec::new();
        for i in 0..df.height() {
            if year_ca.get(i) != Some(latest) {
                continue;
            }
            if let (Some(country), Some(rate)) = (country_ca.get(i), literacy_ca.get(i)) {
                entries.push(CountryLiteracy {
                    country: country.to_string(),
                    literacy_pct: rate,
                });
            }
        }

        // Stable sort keeps first-seen order among equal rates.
        entries.sort_by(|a, b| {
            b.literacy_pct
                .partial_cmp(&a.literacy_pct)
                .unwrap_or(Ordering::Equal)
        });
        entries.truncate(n);

        Ok((Some(latest), entries))
    }

    /// Year-ascending literacy series for one country; empty when the
    /// country does not occur.
    fn country_trend(df: &DataFrame, country: &str) -> Result<Vec<TrendPoint>> {
        let country_ca = df.column(COL_COUNTRY)?.as_materialized_series().str()?;
        let year_ca = df.column(COL_YEAR)?.as_materialized_series().i64()?;
        let literacy = df
            .column(COL_LITERACY)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let literacy_ca = literacy.f64()?;

        let mut points = Vec::new();
        for i in 0..df.height() {
            if country_ca.get(i) != Some(country) {
                continue;
            }
            if let (Some(year), Some(rate)) = (year_ca.get(i), literacy_ca.get(i)) {
                points.push(TrendPoint {
                    year,
                    literacy_pct: rate,
                });
            }
        }

        points.sort_by_key(|p| p.year);
        Ok(points)
    }

    /// Non-null values of one column as `f64`, in row order.
    pub fn column_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
        let series = df
            .column(column)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        Ok(series.f64()?.into_iter().flatten().collect())
    }

    /// (x, y) pairs of two columns, keeping only rows where both are present.
    pub fn paired_values(df: &DataFrame, x: &str, y: &str) -> Result<Vec<(f64, f64)>> {
        let x_series = df
            .column(x)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let y_series = df
            .column(y)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;

        Ok(x_series
            .f64()?
            .into_iter()
            .zip(y_series.f64()?.into_iter())
            .filter_map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => Some((a, b)),
                _ => None,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cleaned_frame() -> DataFrame {
        df![
            COL_COUNTRY => ["Nigeria", "Nigeria", "Ghana", "Kenya", "Benin", "Ghana"],
            COL_YEAR => [2019i64, 2021, 2021, 2021, 2021, 2019],
            COL_LITERACY => [59.0f64, 62.0, 79.9, 81.5, 42.4, 76.6],
            COL_SPENDING => [Some(4.5f64), Some(4.7), Some(3.9), None, Some(3.0), Some(4.0)],
        ]
        .unwrap()
    }

    #[test]
    fn test_describe_covers_numeric_columns_only() {
        let stats = Summarizer::describe(&cleaned_frame()).unwrap();
        let names: Vec<&str> = stats.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![COL_YEAR, COL_LITERACY, COL_SPENDING]);

        let spending = &stats[2];
        assert_eq!(spending.count, 5); // one null skipped
    }

    #[test]
    fn test_correlation_matrix_symmetry_and_diagonal() {
        let matrix = Summarizer::correlation_matrix(&cleaned_frame()).unwrap();
        let n = matrix.len();
        assert_eq!(n, 3);

        for i in 0..n {
            assert!((matrix.get(i, i) - 1.0).abs() < 1e-12);
            for j in 0..n {
                let forward = matrix.get(i, j);
                let backward = matrix.get(j, i);
                assert!(
                    (forward - backward).abs() < 1e-12
                        || (forward.is_nan() && backward.is_nan())
                );
            }
        }
    }

    #[test]
    fn test_correlation_matrix_single_numeric_column() {
        let df = df![
            "country" => ["Nigeria", "Ghana"],
            "lit_rate_adult_pct" => [62.0f64, 79.0],
        ]
        .unwrap();

        let matrix = Summarizer::correlation_matrix(&df).unwrap();
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.get(0, 0), 1.0);
    }

    #[test]
    fn test_derived_facts() {
        let facts = Summarizer::derived_facts(&cleaned_frame()).unwrap();
        assert_eq!(facts.country_count, 4);
        assert_eq!(facts.year_min, 2019);
        assert_eq!(facts.year_max, 2021);
        assert!((facts.mean_literacy - 66.9).abs() < 1e-9);
        assert!((facts.mean_spending - 4.02).abs() < 1e-9);
    }

    #[test]
    fn test_top_by_latest_year_ordering() {
        let (latest, top) = Summarizer::top_by_latest_year(&cleaned_frame(), 10).unwrap();
        assert_eq!(latest, Some(2021));

        let countries: Vec<&str> = top.iter().map(|e| e.country.as_str()).collect();
        // 2021 rows only, descending by literacy.
        assert_eq!(countries, vec!["Kenya", "Ghana", "Nigeria", "Benin"]);
    }

    #[test]
    fn test_top_by_latest_year_respects_limit_and_bound() {
        let (_, top) = Summarizer::top_by_latest_year(&cleaned_frame(), 2).unwrap();
        assert_eq!(top.len(), 2);

        // No excluded latest-year row may beat an included one.
        let min_included = top
            .iter()
            .map(|e| e.literacy_pct)
            .fold(f64::INFINITY, f64::min);
        assert!(min_included >= 62.0);
    }

    #[test]
    fn test_top_by_latest_year_stable_on_ties() {
        let df = df![
            COL_COUNTRY => ["Aland", "Bria", "Cusco"],
            COL_YEAR => [2021i64, 2021, 2021],
            COL_LITERACY => [80.0f64, 90.0, 80.0],
            COL_SPENDING => [1.0f64, 2.0, 3.0],
        ]
        .unwrap();

        let (_, top) = Summarizer::top_by_latest_year(&df, 10).unwrap();
        let countries: Vec<&str> = top.iter().map(|e| e.country.as_str()).collect();
        // The tied pair keeps original relative order.
        assert_eq!(countries, vec!["Bria", "Aland", "Cusco"]);
    }

    #[test]
    fn test_country_trend_sorted_by_year() {
        let trend = Summarizer::country_trend(&cleaned_frame(), "Nigeria").unwrap();
        assert_eq!(
            trend,
            vec![
                TrendPoint {
                    year: 2019,
                    literacy_pct: 59.0
                },
                TrendPoint {
                    year: 2021,
                    literacy_pct: 62.0
                },
            ]
        );
    }

    #[test]
    fn test_country_trend_absent_country_is_empty() {
        let trend = Summarizer::country_trend(&cleaned_frame(), "Atlantis").unwrap();
        assert!(trend.is_empty());
    }

    #[test]
    fn test_paired_values_skip_incomplete_rows() {
        let pairs =
            Summarizer::paired_values(&cleaned_frame(), COL_SPENDING, COL_LITERACY).unwrap();
        assert_eq!(pairs.len(), 5); // Kenya row has no spending value
        assert!(pairs.contains(&(4.5, 59.0)));
    }
}
