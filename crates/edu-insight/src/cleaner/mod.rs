//! Data cleaning for the record table.
//!
//! The cleaner applies three steps, in order:
//! 1. Removing exact duplicate rows (first occurrence wins, order preserved)
//! 2. Dropping rows with a missing value in a schema-required column
//! 3. Coercing schema-declared integer columns to `Int64`
//!
//! It also persists the cleaned table as the CSV artifact of the run.

mod coerce;

use crate::error::Result;
use crate::schema::TableSchema;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info};

/// The cleaned table plus an account of what was done to produce it.
#[derive(Debug)]
pub struct CleaningOutcome {
    pub table: DataFrame,
    /// Human-readable log of cleaning actions, in execution order.
    pub actions: Vec<String>,
    pub duplicates_removed: usize,
    pub rows_dropped_missing: usize,
}

/// Data cleaner for the record table.
#[derive(Debug)]
pub struct DataCleaner;

impl DataCleaner {
    /// Clean `df` according to `schema`.
    ///
    /// For identical input this is deterministic: row content and row order
    /// of the result never vary between runs, and cleaning an already-clean
    /// table is a no-op.
    pub fn clean(&self, df: DataFrame, schema: &TableSchema) -> Result<CleaningOutcome> {
        let mut actions = Vec::new();
        let mut df = df;

        info!("Cleaning dataset...");

        // 1. Remove duplicate rows, keeping the first occurrence in place
        let before_duplicates = df.height();
        df = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
        let duplicates_removed = before_duplicates - df.height();

        if duplicates_removed > 0 {
            let pct = (duplicates_removed as f64 / before_duplicates as f64) * 100.0;
            actions.push(format!(
                "Removed {} duplicate rows ({:.1}%)",
                duplicates_removed, pct
            ));
            debug!("Removed {} duplicate rows", duplicates_removed);
        } else {
            actions.push("No duplicate rows found".to_string());
        }

        // 2. Drop rows missing a required value
        let mut rows_dropped_missing = 0;
        for col_name in schema.required_value_columns() {
            let before_rows = df.height();
            let mask = df
                .column(col_name)?
                .as_materialized_series()
                .is_not_null();
            df = df.filter(&mask)?;
            let dropped = before_rows - df.height();
            rows_dropped_missing += dropped;

            if dropped > 0 {
                actions.push(format!(
                    "Dropped {} rows with missing '{}'",
                    dropped, col_name
                ));
                debug!("Dropped {} rows with missing '{}'", dropped, col_name);
            } else {
                actions.push(format!("No rows with missing '{}'", col_name));
            }
        }

        // 3. Coerce declared integer columns
        for col_name in schema.integer_columns() {
            let series = df.column(col_name)?.as_materialized_series().clone();
            let already_int64 = series.dtype() == &DataType::Int64;
            let coerced = coerce::coerce_to_integer(&series)?;
            df.replace(col_name, coerced)?;

            if !already_int64 {
                actions.push(format!("Coerced '{}' to Int64", col_name));
                debug!("Coerced '{}' to Int64", col_name);
            }
        }

        info!(
            "Cleaning complete: {} duplicates removed, {} rows dropped for missing values",
            duplicates_removed, rows_dropped_missing
        );

        Ok(CleaningOutcome {
            table: df,
            actions,
            duplicates_removed,
            rows_dropped_missing,
        })
    }

    /// Write the cleaned table to `path` as a comma-separated CSV with a
    /// header row and no index column, overwriting any existing file.
    pub fn write_cleaned(df: &mut DataFrame, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(b',')
            .finish(df)?;

        info!("Cleaned dataset saved: {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{COL_LITERACY, COL_YEAR};

    fn scenario_frame() -> DataFrame {
        // 5 rows: rows 0/1 are exact duplicates, row 3 lacks the literacy
        // value, years arrive as strings.
        df![
            "country" => ["Nigeria", "Nigeria", "Ghana", "Kenya", "Benin"],
            "year" => ["2019", "2019", "2020", "2020", "2021"],
            "lit_rate_adult_pct" => [Some(62.0f64), Some(62.0), Some(79.0), None, Some(42.4)],
            "gov_exp_pct_gdp" => [Some(4.5f64), Some(4.5), None, Some(5.3), Some(3.0)],
        ]
        .unwrap()
    }

    #[test]
    fn test_clean_scenario_five_rows() {
        let outcome = DataCleaner
            .clean(scenario_frame(), &TableSchema::education())
            .unwrap();

        assert_eq!(outcome.table.height(), 3);
        assert_eq!(outcome.duplicates_removed, 1);
        assert_eq!(outcome.rows_dropped_missing, 1);

        let years: Vec<i64> = outcome
            .table
            .column(COL_YEAR)
            .unwrap()
            .as_materialized_series()
            .i64()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(years, vec![2019, 2020, 2021]);

        let countries: Vec<&str> = outcome
            .table
            .column("country")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(countries, vec!["Nigeria", "Ghana", "Benin"]);
    }

    #[test]
    fn test_clean_is_idempotent() {
        let schema = TableSchema::education();
        let first = DataCleaner.clean(scenario_frame(), &schema).unwrap();
        let second = DataCleaner.clean(first.table.clone(), &schema).unwrap();

        assert_eq!(second.duplicates_removed, 0);
        assert_eq!(second.rows_dropped_missing, 0);
        assert!(first.table.equals_missing(&second.table));
    }

    #[test]
    fn test_duplicate_kept_at_first_position() {
        let df = df![
            "country" => ["Ghana", "Nigeria", "Ghana", "Ghana"],
            "year" => [2020i64, 2019, 2020, 2020],
            "lit_rate_adult_pct" => [79.0f64, 62.0, 79.0, 79.0],
            "gov_exp_pct_gdp" => [3.9f64, 4.5, 3.9, 3.9],
        ]
        .unwrap();

        let outcome = DataCleaner.clean(df, &TableSchema::education()).unwrap();
        assert_eq!(outcome.table.height(), 2);
        assert_eq!(outcome.duplicates_removed, 2);

        let countries: Vec<&str> = outcome
            .table
            .column("country")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .into_no_null_iter()
            .collect();
        // The triplicate survives at its first position.
        assert_eq!(countries, vec!["Ghana", "Nigeria"]);
    }

    #[test]
    fn test_only_missing_literacy_rows_are_dropped() {
        let df = df![
            "country" => ["Nigeria", "Ghana", "Kenya"],
            "year" => [2019i64, 2020, 2021],
            "lit_rate_adult_pct" => [Some(62.0f64), None, Some(81.5)],
            "gov_exp_pct_gdp" => [Option::<f64>::None, Some(3.9), None],
        ]
        .unwrap();

        let outcome = DataCleaner.clean(df, &TableSchema::education()).unwrap();

        // Rows missing only spending survive; the missing-literacy row does not.
        assert_eq!(outcome.table.height(), 2);
        assert_eq!(
            outcome
                .table
                .column(COL_LITERACY)
                .unwrap()
                .null_count(),
            0
        );
        assert_eq!(
            outcome.table.column("gov_exp_pct_gdp").unwrap().null_count(),
            2
        );
    }

    #[test]
    fn test_non_numeric_year_is_fatal() {
        let df = df![
            "country" => ["Nigeria", "Ghana"],
            "year" => ["2019", "unknown"],
            "lit_rate_adult_pct" => [62.0f64, 79.0],
            "gov_exp_pct_gdp" => [4.5f64, 3.9],
        ]
        .unwrap();

        let err = DataCleaner
            .clean(df, &TableSchema::education())
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::AnalysisError::TypeCoercion { .. }
        ));
    }

    #[test]
    fn test_write_cleaned_overwrites_without_index() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cleaned.csv");
        std::fs::write(&path, "stale").unwrap();

        let mut df = df![
            "country" => ["Nigeria"],
            "year" => [2019i64],
            "lit_rate_adult_pct" => [62.0f64],
            "gov_exp_pct_gdp" => [4.5f64],
        ]
        .unwrap();

        DataCleaner::write_cleaned(&mut df, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "country,year,lit_rate_adult_pct,gov_exp_pct_gdp"
        );
        assert_eq!(lines.next().unwrap(), "Nigeria,2019,62.0,4.5");
    }
}
