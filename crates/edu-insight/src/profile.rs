//! Structural profiling of the record table.
//!
//! Produces the schema/type report and per-column missing-value counts that
//! the console output shows before and after cleaning.

use crate::error::Result;
use crate::utils::dtype_label;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Shape and per-column structure of a table at one point in the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProfile {
    /// (rows, columns)
    pub shape: (usize, usize),
    pub columns: Vec<ColumnBrief>,
}

/// Dtype and null accounting for one column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnBrief {
    pub name: String,
    pub dtype: String,
    pub non_null: usize,
    pub null_count: usize,
}

impl TableProfile {
    /// Total missing values across all columns.
    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.null_count).sum()
    }
}

/// Profiles table structure without mutating it.
pub struct TableProfiler;

impl TableProfiler {
    /// Capture shape, dtypes and null counts of every column.
    pub fn profile(df: &DataFrame) -> Result<TableProfile> {
        let mut columns = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            let null_count = series.null_count();
            columns.push(ColumnBrief {
                name: series.name().to_string(),
                dtype: dtype_label(series.dtype()),
                non_null: series.len() - null_count,
                null_count,
            });
        }

        Ok(TableProfile {
            shape: (df.height(), df.width()),
            columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_counts_nulls() {
        let df = df![
            "country" => ["Nigeria", "Ghana", "Kenya"],
            "lit_rate_adult_pct" => [Some(62.0f64), None, Some(81.5)],
        ]
        .unwrap();

        let profile = TableProfiler::profile(&df).unwrap();
        assert_eq!(profile.shape, (3, 2));

        let literacy = &profile.columns[1];
        assert_eq!(literacy.name, "lit_rate_adult_pct");
        assert_eq!(literacy.null_count, 1);
        assert_eq!(literacy.non_null, 2);
        assert_eq!(profile.total_missing(), 1);
    }

    #[test]
    fn test_profile_reports_dtypes() {
        let df = df![
            "year" => [2019i64, 2020],
            "country" => ["Nigeria", "Ghana"],
        ]
        .unwrap();

        let profile = TableProfiler::profile(&df).unwrap();
        assert_eq!(profile.columns[0].dtype, "Int64");
        assert_eq!(profile.columns[1].dtype, "String");
    }
}
