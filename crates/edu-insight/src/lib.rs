//! Education Data Analysis Pipeline Library
//!
//! An exploratory-analysis pipeline for country-level literacy and
//! education-spending data, built with Rust and Polars.
//!
//! # Overview
//!
//! The pipeline runs four strictly sequential stages over one CSV table:
//!
//! - **Loading**: CSV ingestion with header validation against a declared
//!   schema
//! - **Cleaning**: duplicate removal, required-field filtering, integer
//!   coercion of the year column, and persistence of the cleaned table
//! - **Summarizing**: per-column descriptive statistics, a Pearson
//!   correlation matrix, and derived views (latest-year ranking, country
//!   trend)
//! - **Reporting**: chart artifacts rendered with plotters plus a structured
//!   report that a console renderer or JSON consumer reads
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use edu_insight::{AnalysisConfig, AnalysisPipeline, ReportRenderer};
//!
//! let config = AnalysisConfig::builder()
//!     .input_path("data/world-education-data.csv")
//!     .output_dir("out")
//!     .build()?;
//!
//! let report = AnalysisPipeline::builder()
//!     .config(config)
//!     .build()?
//!     .run()?;
//!
//! ReportRenderer::render_console(&report);
//! println!("{} artifacts written", report.artifacts.len());
//! ```

pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod profile;
pub mod report;
pub mod schema;
pub mod summary;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{CleaningOutcome, DataCleaner};
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{AnalysisError, Result as AnalysisResult, ResultExt};
pub use loader::CsvLoader;
pub use pipeline::{AnalysisPipeline, AnalysisPipelineBuilder};
pub use profile::{ColumnBrief, TableProfile, TableProfiler};
pub use report::charts::ChartRenderer;
pub use report::{AnalysisReport, Artifact, ArtifactKind, ReportRenderer};
pub use schema::{SemanticType, TableSchema};
pub use summary::Summarizer;
pub use types::{
    ColumnStats, CorrelationMatrix, CountryLiteracy, DatasetFacts, DatasetSummary, TrendPoint,
};
