//! CSV loading for the record table.

use crate::error::{AnalysisError, Result};
use crate::schema::TableSchema;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// Number of leading rows polars inspects when inferring column types.
const INFER_SCHEMA_ROWS: usize = 100;

/// Loads the record table from a CSV file.
pub struct CsvLoader;

impl CsvLoader {
    /// Read the CSV at `path` and validate its header against `schema`.
    ///
    /// Numeric columns come back as numeric dtypes via schema inference on
    /// the leading rows; everything else stays `String`. The whole file is
    /// materialized in memory.
    pub fn load(path: &Path, schema: &TableSchema) -> Result<DataFrame> {
        if !path.exists() {
            return Err(AnalysisError::InputNotFound(path.to_path_buf()));
        }

        let df = CsvReadOptions::default()
            .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
            .with_has_header(true)
            .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| AnalysisError::Parse(e.to_string()))?
            .finish()
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;

        schema.validate_header(&df)?;

        info!(
            "Loaded {} rows x {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );

        Ok(df)
    }
}
