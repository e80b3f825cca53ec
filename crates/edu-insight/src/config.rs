//! Configuration types for the analysis pipeline.
//!
//! This module provides configuration options using the builder pattern.
//! Input and artifact locations that the original workflow hard-coded are
//! explicit, validated values here.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default input location of the world education dataset.
pub const DEFAULT_INPUT: &str = "data/world-education-data.csv";
/// File name of the cleaned table written next to the chart artifacts.
pub const CLEANED_DATA_FILE: &str = "cleaned_world_education_data.csv";
/// Country whose literacy trend is rendered as a dedicated chart.
pub const DEFAULT_TREND_COUNTRY: &str = "Nigeria";

/// Configuration for the analysis pipeline.
///
/// Use [`AnalysisConfig::builder()`] to create a configuration with a
/// fluent API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Path of the input CSV file.
    pub input_path: PathBuf,

    /// Directory where the cleaned CSV and chart images are written.
    /// Default: "." (the working directory)
    pub output_dir: PathBuf,

    /// File name of the cleaned-table CSV artifact.
    pub cleaned_data_name: String,

    /// Country rendered as a single-country literacy trend.
    /// Default: "Nigeria"
    pub trend_country: String,

    /// Number of countries in the latest-year ranking.
    /// Default: 10
    pub top_countries: usize,

    /// Number of histogram bins for the literacy distribution chart.
    /// Default: 30
    pub histogram_bins: usize,

    /// Number of rows shown in the dataset preview.
    /// Default: 5
    pub preview_rows: usize,

    /// Whether to persist the cleaned table as a CSV artifact.
    /// Default: true
    pub write_cleaned_data: bool,

    /// Whether to render chart artifacts.
    /// Default: true
    pub render_charts: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            cleaned_data_name: CLEANED_DATA_FILE.to_string(),
            trend_country: DEFAULT_TREND_COUNTRY.to_string(),
            top_countries: 10,
            histogram_bins: 30,
            preview_rows: 5,
            write_cleaned_data: true,
            render_charts: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_countries == 0 {
            return Err(ConfigValidationError::InvalidCount {
                field: "top_countries".to_string(),
                value: self.top_countries,
            });
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidCount {
                field: "histogram_bins".to_string(),
                value: self.histogram_bins,
            });
        }

        if self.trend_country.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTrendCountry);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid value for '{field}': {value} (must be at least 1)")]
    InvalidCount { field: String, value: usize },

    #[error("Trend country must not be empty")]
    EmptyTrendCountry,
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    cleaned_data_name: Option<String>,
    trend_country: Option<String>,
    top_countries: Option<usize>,
    histogram_bins: Option<usize>,
    preview_rows: Option<usize>,
    write_cleaned_data: Option<bool>,
    render_charts: Option<bool>,
}

impl AnalysisConfigBuilder {
    /// Set the path of the input CSV file.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Set the directory where all artifacts are written.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the file name of the cleaned-table CSV artifact.
    pub fn cleaned_data_name(mut self, name: impl Into<String>) -> Self {
        self.cleaned_data_name = Some(name.into());
        self
    }

    /// Set the country used for the single-country trend chart.
    pub fn trend_country(mut self, country: impl Into<String>) -> Self {
        self.trend_country = Some(country.into());
        self
    }

    /// Set the number of countries in the latest-year ranking.
    pub fn top_countries(mut self, n: usize) -> Self {
        self.top_countries = Some(n);
        self
    }

    /// Set the number of bins for the literacy histogram.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the number of rows shown in the dataset preview.
    pub fn preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = Some(rows);
        self
    }

    /// Enable or disable writing the cleaned CSV artifact.
    pub fn write_cleaned_data(mut self, write: bool) -> Self {
        self.write_cleaned_data = Some(write);
        self
    }

    /// Enable or disable chart rendering.
    pub fn render_charts(mut self, render: bool) -> Self {
        self.render_charts = Some(render);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let defaults = AnalysisConfig::default();
        let config = AnalysisConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            cleaned_data_name: self.cleaned_data_name.unwrap_or(defaults.cleaned_data_name),
            trend_country: self.trend_country.unwrap_or(defaults.trend_country),
            top_countries: self.top_countries.unwrap_or(defaults.top_countries),
            histogram_bins: self.histogram_bins.unwrap_or(defaults.histogram_bins),
            preview_rows: self.preview_rows.unwrap_or(defaults.preview_rows),
            write_cleaned_data: self
                .write_cleaned_data
                .unwrap_or(defaults.write_cleaned_data),
            render_charts: self.render_charts.unwrap_or(defaults.render_charts),
        };

        config.validate()?;
        Ok(config)
    }
}
