//! CLI entry point for the education analysis pipeline.

use anyhow::{anyhow, Result};
use clap::Parser;
use edu_insight::config::DEFAULT_INPUT;
use edu_insight::{AnalysisConfig, AnalysisPipeline, ReportRenderer};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Exploratory analysis of world literacy and education spending",
    long_about = "Loads a CSV of country-level literacy and education-spending\n\
                  statistics, cleans it, computes descriptive statistics, and\n\
                  writes a cleaned CSV plus a fixed set of chart images.\n\n\
                  EXAMPLES:\n  \
                  # Default run against the bundled dataset path\n  \
                  edu-insight\n\n  \
                  # Custom input and output directory\n  \
                  edu-insight -i data.csv -o results/\n\n  \
                  # Machine-readable report\n  \
                  edu-insight -i data.csv --json"
)]
struct Args {
    /// Path to the CSV file to analyze
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    input: String,

    /// Output directory for the cleaned CSV and chart images
    #[arg(short, long, default_value = ".")]
    output: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Suppress progress output (only show warnings and errors)
    #[arg(short, long)]
    quiet: bool,

    /// Output the structured report as JSON to stdout
    ///
    /// Disables all progress logs; only the JSON report is written.
    /// Useful for piping to other tools: `... --json | jq .summary.facts`
    #[arg(long)]
    json: bool,

    /// Skip chart rendering (cleaned CSV and console report only)
    #[arg(long)]
    no_charts: bool,

    /// Write the structured report to the output directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long)]
    emit_report: bool,
}

/// Extract the file stem (name without extension) from a path.
fn extract_file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output")
        .to_string()
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    let config = AnalysisConfig::builder()
        .input_path(&args.input)
        .output_dir(&args.output)
        .render_charts(!args.no_charts)
        .build()
        .map_err(|e| anyhow!("invalid configuration: {}", e))?;

    let pipeline = AnalysisPipeline::builder().config(config).build()?;
    let report = pipeline.run()?;

    if args.emit_report {
        let stem = extract_file_stem(&args.input);
        report.write_json(Path::new(&args.output), &stem)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        ReportRenderer::render_console(&report);
    }

    Ok(())
}
