//! The analysis pipeline: load, clean, summarize, report.
//!
//! Control flow is strictly sequential. The cleaner is the only stage that
//! mutates the table; everything after it reads the cleaned table and
//! derives owned views.

use crate::cleaner::DataCleaner;
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::loader::CsvLoader;
use crate::profile::TableProfiler;
use crate::report::charts::ChartRenderer;
use crate::report::{AnalysisReport, Artifact, ArtifactKind, OBSERVATIONS};
use crate::schema::{COL_LITERACY, COL_SPENDING, TableSchema};
use crate::summary::Summarizer;
use crate::types::DatasetSummary;
use chrono::Local;
use polars::prelude::DataFrame;
use std::fs;
use std::time::Instant;
use tracing::{debug, info};

/// The full analysis pipeline.
///
/// # Example
///
/// ```rust,ignore
/// use edu_insight::{AnalysisConfig, AnalysisPipeline, ReportRenderer};
///
/// let pipeline = AnalysisPipeline::builder()
///     .config(AnalysisConfig::builder().input_path("data.csv").build()?)
///     .build()?;
///
/// let report = pipeline.run()?;
/// ReportRenderer::render_console(&report);
/// ```
#[derive(Debug)]
pub struct AnalysisPipeline {
    config: AnalysisConfig,
    cleaner: DataCleaner,
}

// The pipeline owns no shared state and can move to a worker thread.
static_assertions::assert_impl_all!(AnalysisPipeline: Send);

impl AnalysisPipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> AnalysisPipelineBuilder {
        AnalysisPipelineBuilder::default()
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run all stages to completion and return the structured report.
    ///
    /// Any fatal condition propagates immediately; nothing is caught or
    /// retried. The only tolerated empty result is the single-country trend
    /// series, whose chart is skipped rather than raised.
    pub fn run(&self) -> Result<AnalysisReport> {
        let start_time = Instant::now();
        let schema = TableSchema::education();

        info!("Starting analysis pipeline...");

        let df = CsvLoader::load(&self.config.input_path, &schema)?;
        let preview = format!("{}", df.head(Some(self.config.preview_rows)));
        let profile_before = TableProfiler::profile(&df)?;

        let outcome = self.cleaner.clean(df, &schema)?;
        let mut cleaned = outcome.table;
        let profile_after = TableProfiler::profile(&cleaned)?;

        let mut artifacts = Vec::new();
        if self.config.write_cleaned_data {
            fs::create_dir_all(&self.config.output_dir)?;
            let path = self.config.output_dir.join(&self.config.cleaned_data_name);
            DataCleaner::write_cleaned(&mut cleaned, &path)?;
            artifacts.push(Artifact {
                kind: ArtifactKind::CleanedData,
                path: path.display().to_string(),
            });
        }

        let summary = Summarizer::summarize(&cleaned, &self.config)?;

        if self.config.render_charts {
            self.render_charts(&cleaned, &summary, &mut artifacts)?;
        }

        info!(
            "Analysis pipeline finished in {}ms",
            start_time.elapsed().as_millis()
        );

        Ok(AnalysisReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: self.config.input_path.display().to_string(),
            preview,
            profile_before,
            profile_after,
            cleaning_actions: outcome.actions,
            summary,
            observations: OBSERVATIONS.iter().map(|s| s.to_string()).collect(),
            artifacts,
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    /// Render the chart artifacts from the cleaned table and derived views.
    fn render_charts(
        &self,
        cleaned: &DataFrame,
        summary: &DatasetSummary,
        artifacts: &mut Vec<Artifact>,
    ) -> Result<()> {
        fs::create_dir_all(&self.config.output_dir)?;
        let renderer = ChartRenderer::new(self.config.output_dir.clone());

        let literacy = Summarizer::column_values(cleaned, COL_LITERACY)?;
        let path = renderer.histogram(&literacy, self.config.histogram_bins)?;
        artifacts.push(Artifact {
            kind: ArtifactKind::Histogram,
            path: path.display().to_string(),
        });

        let pairs = Summarizer::paired_values(cleaned, COL_SPENDING, COL_LITERACY)?;
        let path = renderer.scatter(&pairs)?;
        artifacts.push(Artifact {
            kind: ArtifactKind::Scatter,
            path: path.display().to_string(),
        });

        let path = renderer.heatmap(&summary.correlation)?;
        artifacts.push(Artifact {
            kind: ArtifactKind::Heatmap,
            path: path.display().to_string(),
        });

        if summary.country_trend.is_empty() {
            // Empty derived view is a data condition, not an error.
            debug!(
                "Skipping trend chart: no rows for country '{}'",
                summary.trend_country
            );
        } else {
            let path = renderer.trend(&summary.trend_country, &summary.country_trend)?;
            artifacts.push(Artifact {
                kind: ArtifactKind::Trend,
                path: path.display().to_string(),
            });
        }

        if let Some(latest_year) = summary.latest_year
            && !summary.top_by_latest_year.is_empty()
        {
            let path = renderer.top_countries(latest_year, &summary.top_by_latest_year)?;
            artifacts.push(Artifact {
                kind: ArtifactKind::TopCountries,
                path: path.display().to_string(),
            });
        }

        Ok(())
    }
}

/// Builder for [`AnalysisPipeline`].
#[derive(Debug, Default)]
pub struct AnalysisPipelineBuilder {
    config: Option<AnalysisConfig>,
}

impl AnalysisPipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the pipeline, validating the configuration.
    pub fn build(self) -> Result<AnalysisPipeline> {
        let config = self.config.unwrap_or_default();
        config
            .validate()
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;

        Ok(AnalysisPipeline {
            config,
            cleaner: DataCleaner,
        })
    }
}
