//! Declared column schema for the education dataset.
//!
//! The loader validates the CSV header against this schema up front, and the
//! cleaner consults it for required-value filtering and integer coercion,
//! so type expectations live in one place instead of being re-inferred
//! per stage.

use crate::error::{AnalysisError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Column name of the country identifier.
pub const COL_COUNTRY: &str = "country";
/// Column name of the observation year.
pub const COL_YEAR: &str = "year";
/// Column name of the adult literacy rate (percent).
pub const COL_LITERACY: &str = "lit_rate_adult_pct";
/// Column name of government education expenditure (percent of GDP).
pub const COL_SPENDING: &str = "gov_exp_pct_gdp";

/// Semantic type a column is expected to carry after cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    /// Free-form text identifier.
    Text,
    /// Whole-number value; coerced to `Int64` by the cleaner.
    Integer,
    /// Floating-point measurement; missing values allowed unless required.
    Float,
}

/// Declaration of a single expected column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub semantic: SemanticType,
    /// Rows with a null value in a required column are discarded by the cleaner.
    pub required: bool,
}

impl ColumnSpec {
    fn new(name: &str, semantic: SemanticType, required: bool) -> Self {
        Self {
            name: name.to_string(),
            semantic,
            required,
        }
    }
}

/// The declared schema of the record table.
///
/// Every declared column must be present in the CSV header; extra columns in
/// the input are kept and participate in numeric summaries generically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    columns: Vec<ColumnSpec>,
}

impl TableSchema {
    /// Schema of the world education dataset.
    pub fn education() -> Self {
        Self {
            columns: vec![
                ColumnSpec::new(COL_COUNTRY, SemanticType::Text, false),
                ColumnSpec::new(COL_YEAR, SemanticType::Integer, false),
                ColumnSpec::new(COL_LITERACY, SemanticType::Float, true),
                ColumnSpec::new(COL_SPENDING, SemanticType::Float, false),
            ],
        }
    }

    /// All declared columns.
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Columns whose rows must carry a non-null value after cleaning.
    pub fn required_value_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.required)
            .map(|c| c.name.as_str())
    }

    /// Columns the cleaner coerces to an integer representation.
    pub fn integer_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.semantic == SemanticType::Integer)
            .map(|c| c.name.as_str())
    }

    /// Validate that the loaded header contains every declared column.
    pub fn validate_header(&self, df: &DataFrame) -> Result<()> {
        let header: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        for spec in &self.columns {
            if !header.contains(&spec.name.as_str()) {
                return Err(AnalysisError::MissingColumn(spec.name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_education_schema_declares_four_columns() {
        let schema = TableSchema::education();
        assert_eq!(schema.columns().len(), 4);

        let required: Vec<&str> = schema.required_value_columns().collect();
        assert_eq!(required, vec![COL_LITERACY]);

        let integers: Vec<&str> = schema.integer_columns().collect();
        assert_eq!(integers, vec![COL_YEAR]);
    }

    #[test]
    fn test_validate_header_accepts_complete_frame() {
        let df = df![
            COL_COUNTRY => ["Nigeria"],
            COL_YEAR => [2019i64],
            COL_LITERACY => [62.0f64],
            COL_SPENDING => [4.5f64],
        ]
        .unwrap();

        assert!(TableSchema::education().validate_header(&df).is_ok());
    }

    #[test]
    fn test_validate_header_accepts_extra_columns() {
        let df = df![
            COL_COUNTRY => ["Nigeria"],
            COL_YEAR => [2019i64],
            COL_LITERACY => [62.0f64],
            COL_SPENDING => [4.5f64],
            "pupil_teacher_ratio" => [37.5f64],
        ]
        .unwrap();

        assert!(TableSchema::education().validate_header(&df).is_ok());
    }

    #[test]
    fn test_validate_header_rejects_missing_column() {
        let df = df![
            COL_COUNTRY => ["Nigeria"],
            COL_YEAR => [2019i64],
        ]
        .unwrap();

        let err = TableSchema::education().validate_header(&df).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn(name) if name == COL_LITERACY));
    }
}
