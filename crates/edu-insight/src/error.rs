//! Custom error types for the analysis pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Every fatal
//! condition surfaces to the caller through [`AnalysisError`]; the only
//! tolerated non-error is an empty derived view, which callers express as an
//! empty collection rather than an `Err`.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the analysis pipeline.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Input CSV path does not exist.
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Input header is missing a column the schema declares.
    #[error("required column '{0}' missing from CSV header")]
    MissingColumn(String),

    /// Input content is not well-formed CSV.
    #[error("failed to parse CSV input: {0}")]
    Parse(String),

    /// A column value could not be coerced to its declared type.
    #[error("failed to coerce column '{column}' to {target_type}: {reason}")]
    TypeCoercion {
        column: String,
        target_type: String,
        reason: String,
    },

    /// Invalid configuration provided.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Chart artifact could not be rendered.
    #[error("failed to render chart '{chart}': {reason}")]
    Chart { chart: String, reason: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<AnalysisError>,
    },
}

impl AnalysisError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        AnalysisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build a chart-rendering error from any displayable backend failure.
    pub fn chart(chart: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        AnalysisError::Chart {
            chart: chart.into(),
            reason: reason.to_string(),
        }
    }

    /// Build a type-coercion error for a column.
    pub fn coercion(
        column: impl Into<String>,
        target_type: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        AnalysisError::TypeCoercion {
            column: column.into(),
            target_type: target_type.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| AnalysisError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_context_preserves_source() {
        let error = AnalysisError::MissingColumn("year".to_string()).with_context("while loading");
        assert!(error.to_string().contains("while loading"));
        assert!(error.to_string().contains("year"));
    }

    #[test]
    fn test_coercion_message() {
        let error = AnalysisError::coercion("year", "integer", "value 'abc' is not numeric");
        let message = error.to_string();
        assert!(message.contains("year"));
        assert!(message.contains("integer"));
        assert!(message.contains("abc"));
    }

    #[test]
    fn test_input_not_found_displays_path() {
        let error = AnalysisError::InputNotFound(PathBuf::from("/missing/data.csv"));
        assert!(error.to_string().contains("/missing/data.csv"));
    }

    #[test]
    fn test_polars_result_context() {
        let result: std::result::Result<(), polars::error::PolarsError> = Err(
            polars::error::PolarsError::ComputeError("boom".to_string().into()),
        );
        let error = result.context("during summary").unwrap_err();
        assert!(error.to_string().contains("during summary"));
    }
}
