//! Structured analysis report and its console rendering.
//!
//! The pipeline produces an [`AnalysisReport`] value; rendering to stdout is
//! a separate step that only reads the report, so callers can just as well
//! serialize it to JSON or inspect it programmatically.

pub mod charts;

use crate::error::Result;
use crate::profile::TableProfile;
use crate::types::{ColumnStats, DatasetSummary};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fixed observational statements printed at the end of a run.
///
/// These are narrative text, not conclusions computed from the current
/// correlation values.
pub const OBSERVATIONS: [&str; 3] = [
    "Countries with higher education spending tend to have better literacy rates.",
    "Literacy rates have generally improved over time in most regions.",
    "Some developing countries still show low literacy despite reasonable spending, suggesting other social factors play a role.",
];

/// What kind of output file an artifact is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    CleanedData,
    Histogram,
    Scatter,
    Heatmap,
    Trend,
    TopCountries,
}

/// One file written during the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub kind: ArtifactKind,
    pub path: String,
}

/// Everything a run produced, in one serializable value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Timestamp when the report was generated.
    pub generated_at: String,
    /// Path of the input file.
    pub input_file: String,
    /// Formatted head of the raw table.
    pub preview: String,
    /// Table structure before cleaning.
    pub profile_before: TableProfile,
    /// Table structure after cleaning.
    pub profile_after: TableProfile,
    /// Human-readable log of cleaning actions.
    pub cleaning_actions: Vec<String>,
    /// Descriptive statistics and derived views.
    pub summary: DatasetSummary,
    /// Fixed observational statements.
    pub observations: Vec<String>,
    /// Files written during the run.
    pub artifacts: Vec<Artifact>,
    /// Total execution time in milliseconds.
    pub duration_ms: u64,
}

impl AnalysisReport {
    /// Write the report as pretty-printed JSON to `<dir>/<stem>_report.json`,
    /// overwriting any existing file.
    pub fn write_json(&self, dir: &Path, stem: &str) -> Result<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}_report.json", stem));

        let mut file = File::create(&path)?;
        file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;

        info!("Report written to: {}", path.display());
        Ok(path)
    }
}

/// Renders an [`AnalysisReport`] as human-readable console text.
pub struct ReportRenderer;

impl ReportRenderer {
    /// Print the full report to stdout.
    ///
    /// This is intentionally `println!`-based user-facing output, separate
    /// from the `tracing` logs.
    pub fn render_console(report: &AnalysisReport) {
        println!("Dataset loaded successfully!");
        println!();
        println!("{}", report.preview);

        println!();
        println!("Checking dataset information...");
        println!();
        Self::render_profile(&report.profile_before);

        println!();
        println!("Checking for missing values...");
        println!();
        for column in &report.profile_before.columns {
            println!("{:<24} {:>8}", column.name, column.null_count);
        }

        println!();
        println!("After cleaning:");
        println!();
        Self::render_profile(&report.profile_after);
        for action in &report.cleaning_actions {
            println!("  - {}", action);
        }

        println!();
        println!("Summary statistics:");
        println!();
        Self::render_stats(&report.summary.column_stats);

        let facts = &report.summary.facts;
        println!();
        println!("Quick Insights:");
        println!("- Number of countries: {}", facts.country_count);
        println!("- Years covered: {} to {}", facts.year_min, facts.year_max);
        println!(
            "- Average global literacy rate: {:.2}%",
            facts.mean_literacy
        );
        println!(
            "- Average government spending on education: {:.2}% of GDP",
            facts.mean_spending
        );

        println!();
        println!("Possible Observations:");
        for observation in &report.observations {
            println!("- {}", observation);
        }

        println!();
        println!("Artifacts written:");
        for artifact in &report.artifacts {
            println!("  - {}", artifact.path);
        }

        println!();
        println!("All visualizations and cleaned data have been saved in your current directory.");
        println!("Project completed successfully!");
    }

    /// Schema/type report of one table state.
    fn render_profile(profile: &TableProfile) {
        println!(
            "Table: {} rows x {} columns",
            profile.shape.0, profile.shape.1
        );
        println!("{:<24} {:<12} {:>10}", "Column", "Dtype", "Non-Null");
        println!("{}", "-".repeat(48));
        for column in &profile.columns {
            println!(
                "{:<24} {:<12} {:>10}",
                column.name, column.dtype, column.non_null
            );
        }
    }

    /// Descriptive statistics, one row per numeric column.
    fn render_stats(stats: &[ColumnStats]) {
        println!(
            "{:<22} {:>7} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
            "Column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"
        );
        println!("{}", "-".repeat(106));
        for s in stats {
            println!(
                "{:<22} {:>7} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
                s.name, s.count, s.mean, s.std, s.min, s.q25, s.median, s.q75, s.max
            );
        }
    }
}
