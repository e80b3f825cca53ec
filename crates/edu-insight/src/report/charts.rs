//! Chart artifact rendering with plotters.
//!
//! Every chart draws on its own freshly created backend, so no drawing state
//! carries over between artifacts, and each file is overwritten in full on
//! every run.

use crate::error::{AnalysisError, Result};
use crate::summary::statistics::calculate_std;
use crate::types::{CorrelationMatrix, CountryLiteracy, TrendPoint};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::PathBuf;
use tracing::info;

/// File name of the literacy distribution histogram.
pub const HISTOGRAM_FILE: &str = "literacy_distribution.png";
/// File name of the spending-vs-literacy scatter plot.
pub const SCATTER_FILE: &str = "literacy_vs_spending.png";
/// File name of the correlation heatmap.
pub const HEATMAP_FILE: &str = "correlation_heatmap.png";
/// File name of the latest-year top-countries bar chart.
pub const TOP_COUNTRIES_FILE: &str = "top10_literacy.png";

/// Pixel size of every chart; 10x6 inches at 100 dpi.
const CHART_SIZE: (u32, u32) = (1000, 600);

/// File name of the single-country trend chart.
pub fn trend_file(country: &str) -> String {
    format!("literacy_trend_{}.png", country.to_lowercase())
}

/// Renders the chart artifacts into an output directory.
pub struct ChartRenderer {
    out_dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    /// Histogram of literacy rates with a Gaussian density overlay scaled to
    /// the count axis.
    pub fn histogram(&self, values: &[f64], bins: usize) -> Result<PathBuf> {
        let path = self.out_dir.join(HISTOGRAM_FILE);
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| AnalysisError::chart(HISTOGRAM_FILE, e))?;

        let (lo, hi) = value_bounds(values, (0.0, 100.0));
        let span = hi - lo;
        let bin_width = span / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = (((v - lo) / bin_width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        let y_max = (counts.iter().copied().max().unwrap_or(0) as f64 * 1.1).max(1.0);

        let mut chart = ChartBuilder::on(&root)
            .caption("Distribution of Adult Literacy Rates", ("sans-serif", 24))
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(lo..hi, 0f64..y_max)
            .map_err(|e| AnalysisError::chart(HISTOGRAM_FILE, e))?;

        chart
            .configure_mesh()
            .x_desc("Adult Literacy Rate (%)")
            .y_desc("Number of Countries")
            .draw()
            .map_err(|e| AnalysisError::chart(HISTOGRAM_FILE, e))?;

        chart
            .draw_series(counts.iter().enumerate().map(|(i, &count)| {
                let x0 = lo + i as f64 * bin_width;
                let x1 = x0 + bin_width;
                Rectangle::new([(x0, 0.0), (x1, count as f64)], BLUE.mix(0.5).filled())
            }))
            .map_err(|e| AnalysisError::chart(HISTOGRAM_FILE, e))?;

        if values.len() > 1 {
            let curve = density_curve(values, lo, hi, bin_width);
            chart
                .draw_series(LineSeries::new(curve, RED.stroke_width(2)))
                .map_err(|e| AnalysisError::chart(HISTOGRAM_FILE, e))?;
        }

        root.present()
            .map_err(|e| AnalysisError::chart(HISTOGRAM_FILE, e))?;
        info!("Chart saved: {}", path.display());
        Ok(path.clone())
    }

    /// Scatter plot of education spending (x) against literacy rate (y).
    pub fn scatter(&self, points: &[(f64, f64)]) -> Result<PathBuf> {
        let path = self.out_dir.join(SCATTER_FILE);
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| AnalysisError::chart(SCATTER_FILE, e))?;

        let xs: Vec<f64> = points.iter().map(|&(x, _)| x).collect();
        let ys: Vec<f64> = points.iter().map(|&(_, y)| y).collect();
        let (x_lo, x_hi) = padded_bounds(&xs, (0.0, 10.0));
        let (y_lo, y_hi) = padded_bounds(&ys, (0.0, 100.0));

        let mut chart = ChartBuilder::on(&root)
            .caption(
                "Government Spending vs Adult Literacy Rate",
                ("sans-serif", 24),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)
            .map_err(|e| AnalysisError::chart(SCATTER_FILE, e))?;

        chart
            .configure_mesh()
            .x_desc("Education Expenditure (% of GDP)")
            .y_desc("Adult Literacy Rate (%)")
            .draw()
            .map_err(|e| AnalysisError::chart(SCATTER_FILE, e))?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|&(x, y)| Circle::new((x, y), 3, BLUE.mix(0.6).filled())),
            )
            .map_err(|e| AnalysisError::chart(SCATTER_FILE, e))?;

        root.present()
            .map_err(|e| AnalysisError::chart(SCATTER_FILE, e))?;
        info!("Chart saved: {}", path.display());
        Ok(path.clone())
    }

    /// Annotated heatmap of the numeric correlation matrix.
    pub fn heatmap(&self, corr: &CorrelationMatrix) -> Result<PathBuf> {
        let path = self.out_dir.join(HEATMAP_FILE);
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| AnalysisError::chart(HEATMAP_FILE, e))?;

        let n = corr.len();
        if n == 0 {
            root.present()
                .map_err(|e| AnalysisError::chart(HEATMAP_FILE, e))?;
            return Ok(path.clone());
        }

        let extent = n as f64;
        // The negative band on both axes holds the column/row labels.
        let mut chart = ChartBuilder::on(&root)
            .caption("Correlation Heatmap of Key Variables", ("sans-serif", 24))
            .margin(15)
            .build_cartesian_2d(-1.6f64..extent, -0.9f64..extent)
            .map_err(|e| AnalysisError::chart(HEATMAP_FILE, e))?;

        // Cells: row 0 of the matrix at the top.
        chart
            .draw_series((0..n).flat_map(|i| (0..n).map(move |j| (i, j))).map(
                |(i, j)| {
                    let y0 = (n - 1 - i) as f64;
                    Rectangle::new(
                        [(j as f64, y0), (j as f64 + 1.0, y0 + 1.0)],
                        diverging_color(corr.get(i, j)).filled(),
                    )
                },
            ))
            .map_err(|e| AnalysisError::chart(HEATMAP_FILE, e))?;

        let cell_style = ("sans-serif", 15)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart
            .draw_series((0..n).flat_map(|i| (0..n).map(move |j| (i, j))).map(
                |(i, j)| {
                    let y = (n - 1 - i) as f64 + 0.5;
                    Text::new(
                        format!("{:.2}", corr.get(i, j)),
                        (j as f64 + 0.5, y),
                        cell_style.clone(),
                    )
                },
            ))
            .map_err(|e| AnalysisError::chart(HEATMAP_FILE, e))?;

        // Column labels below, row labels to the left.
        let bottom_style = ("sans-serif", 14)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        chart
            .draw_series(corr.columns.iter().enumerate().map(|(j, name)| {
                Text::new(name.clone(), (j as f64 + 0.5, -0.1), bottom_style.clone())
            }))
            .map_err(|e| AnalysisError::chart(HEATMAP_FILE, e))?;

        let left_style = ("sans-serif", 14)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        chart
            .draw_series(corr.columns.iter().enumerate().map(|(i, name)| {
                let y = (n - 1 - i) as f64 + 0.5;
                Text::new(name.clone(), (-0.05, y), left_style.clone())
            }))
            .map_err(|e| AnalysisError::chart(HEATMAP_FILE, e))?;

        root.present()
            .map_err(|e| AnalysisError::chart(HEATMAP_FILE, e))?;
        info!("Chart saved: {}", path.display());
        Ok(path.clone())
    }

    /// Line-with-markers literacy trend for one country.
    ///
    /// Callers skip this artifact entirely when the series is empty.
    pub fn trend(&self, country: &str, points: &[TrendPoint]) -> Result<PathBuf> {
        let file = trend_file(country);
        let path = self.out_dir.join(&file);
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(|e| AnalysisError::chart(file.as_str(), e))?;

        let year_lo = points.iter().map(|p| p.year).min().unwrap_or(0) as i32 - 1;
        let year_hi = points.iter().map(|p| p.year).max().unwrap_or(0) as i32 + 1;
        let rates: Vec<f64> = points.iter().map(|p| p.literacy_pct).collect();
        let (rate_lo, rate_hi) = padded_bounds(&rates, (0.0, 100.0));

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Literacy Rate Trend in {}", country),
                ("sans-serif", 24),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(year_lo..year_hi, rate_lo..rate_hi)
            .map_err(|e| AnalysisError::chart(file.as_str(), e))?;

        chart
            .configure_mesh()
            .x_desc("Year")
            .y_desc("Literacy Rate (%)")
            .x_label_formatter(&|year| format!("{}", year))
            .draw()
            .map_err(|e| AnalysisError::chart(file.as_str(), e))?;

        chart
            .draw_series(LineSeries::new(
                points.iter().map(|p| (p.year as i32, p.literacy_pct)),
                BLUE.stroke_width(2),
            ))
            .map_err(|e| AnalysisError::chart(file.as_str(), e))?;

        chart
            .draw_series(
                points
                    .iter()
                    .map(|p| Circle::new((p.year as i32, p.literacy_pct), 4, BLUE.filled())),
            )
            .map_err(|e| AnalysisError::chart(file.as_str(), e))?;

        root.present().map_err(|e| AnalysisError::chart(file.as_str(), e))?;
        info!("Chart saved: {}", path.display());
        Ok(path.clone())
    }

    /// Horizontal bar chart of the latest-year literacy ranking, best country
    /// at the top.
    pub fn top_countries(&self, year: i64, entries: &[CountryLiteracy]) -> Result<PathBuf> {
        let path = self.out_dir.join(TOP_COUNTRIES_FILE);
        let root = BitMapBackend::new(&path, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE)
            .map_err(|e| AnalysisError::chart(TOP_COUNTRIES_FILE, e))?;

        let n = entries.len();
        let x_max = entries
            .iter()
            .map(|e| e.literacy_pct)
            .fold(0.0f64, f64::max)
            .max(1.0)
            * 1.05;
        // The negative band holds the country labels.
        let label_span = x_max * 0.3;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("Top 10 Countries by Literacy Rate ({})", year),
                ("sans-serif", 24),
            )
            .margin(10)
            .x_label_area_size(40)
            .build_cartesian_2d(-label_span..x_max, 0f64..(n as f64).max(1.0))
            .map_err(|e| AnalysisError::chart(TOP_COUNTRIES_FILE, e))?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .y_labels(0)
            .x_desc("Adult Literacy Rate (%)")
            .x_label_formatter(&|x| {
                if *x < 0.0 {
                    String::new()
                } else {
                    format!("{:.0}", x)
                }
            })
            .draw()
            .map_err(|e| AnalysisError::chart(TOP_COUNTRIES_FILE, e))?;

        chart
            .draw_series(entries.iter().enumerate().map(|(i, entry)| {
                let y0 = (n - 1 - i) as f64;
                Rectangle::new(
                    [(0.0, y0 + 0.15), (entry.literacy_pct, y0 + 0.85)],
                    rank_green(i, n).filled(),
                )
            }))
            .map_err(|e| AnalysisError::chart(TOP_COUNTRIES_FILE, e))?;

        let label_style = ("sans-serif", 14)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        chart
            .draw_series(entries.iter().enumerate().map(|(i, entry)| {
                let y = (n - 1 - i) as f64 + 0.5;
                Text::new(entry.country.clone(), (-x_max * 0.01, y), label_style.clone())
            }))
            .map_err(|e| AnalysisError::chart(TOP_COUNTRIES_FILE, e))?;

        root.present()
            .map_err(|e| AnalysisError::chart(TOP_COUNTRIES_FILE, e))?;
        info!("Chart saved: {}", path.display());
        Ok(path.clone())
    }
}

/// Min/max of a value slice, or `fallback` when it is empty or degenerate.
fn value_bounds(values: &[f64], fallback: (f64, f64)) -> (f64, f64) {
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return fallback;
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    (lo, hi)
}

/// Like [`value_bounds`] with a 5% margin on both sides.
fn padded_bounds(values: &[f64], fallback: (f64, f64)) -> (f64, f64) {
    let (lo, hi) = value_bounds(values, fallback);
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Gaussian kernel density estimate scaled to the histogram's count axis.
fn density_curve(values: &[f64], lo: f64, hi: f64, bin_width: f64) -> Vec<(f64, f64)> {
    const SAMPLES: usize = 200;

    let n = values.len() as f64;
    // Scott's rule, with the bin width as a floor for constant data.
    let bandwidth = (calculate_std(values) * n.powf(-0.2)).max(bin_width * 0.5);

    (0..=SAMPLES)
        .map(|s| {
            let x = lo + (hi - lo) * s as f64 / SAMPLES as f64;
            let density: f64 = values
                .iter()
                .map(|v| {
                    let z = (x - v) / bandwidth;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());
            (x, density * n * bin_width)
        })
        .collect()
}

/// Diverging blue-white-red color ramp for correlation values.
fn diverging_color(value: f64) -> RGBColor {
    if value.is_nan() {
        return RGBColor(220, 220, 220);
    }

    let t = value.clamp(-1.0, 1.0);
    let (target, weight) = if t >= 0.0 {
        (RGBColor(178, 24, 43), t)
    } else {
        (RGBColor(33, 102, 172), -t)
    };

    let blend = |to: u8| (255.0 + (to as f64 - 255.0) * weight).round() as u8;
    RGBColor(blend(target.0), blend(target.1), blend(target.2))
}

/// Green ramp from dark (rank 0) to light (last rank).
fn rank_green(rank: usize, total: usize) -> RGBColor {
    let t = if total <= 1 {
        0.0
    } else {
        rank as f64 / (total - 1) as f64
    };

    let lerp = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
    RGBColor(lerp(0, 199), lerp(109, 233), lerp(44, 192))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_file_lowercases_country() {
        assert_eq!(trend_file("Nigeria"), "literacy_trend_nigeria.png");
    }

    #[test]
    fn test_value_bounds() {
        assert_eq!(value_bounds(&[2.0, 8.0, 5.0], (0.0, 1.0)), (2.0, 8.0));
        assert_eq!(value_bounds(&[], (0.0, 1.0)), (0.0, 1.0));
        assert_eq!(value_bounds(&[3.0], (0.0, 1.0)), (2.5, 3.5));
    }

    #[test]
    fn test_diverging_color_endpoints() {
        assert_eq!(diverging_color(0.0), RGBColor(255, 255, 255));
        assert_eq!(diverging_color(1.0), RGBColor(178, 24, 43));
        assert_eq!(diverging_color(-1.0), RGBColor(33, 102, 172));
        assert_eq!(diverging_color(f64::NAN), RGBColor(220, 220, 220));
    }

    #[test]
    fn test_density_curve_mass_roughly_matches_counts() {
        let values = vec![50.0, 52.0, 48.0, 51.0, 49.0, 50.5];
        let curve = density_curve(&values, 45.0, 55.0, 1.0);

        // The scaled density peaks near the data center and stays positive.
        let peak = curve.iter().map(|&(_, y)| y).fold(0.0f64, f64::max);
        assert!(peak > 0.5);
        assert!(curve.iter().all(|&(_, y)| y >= 0.0));
    }

    #[test]
    fn test_histogram_renders_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());

        let values: Vec<f64> = (0..100).map(|i| 40.0 + (i % 50) as f64).collect();
        let path = renderer.histogram(&values, 30).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_heatmap_renders_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());

        let corr = CorrelationMatrix {
            columns: vec!["year".into(), "lit".into()],
            values: vec![vec![1.0, 0.4], vec![0.4, 1.0]],
        };
        let path = renderer.heatmap(&corr).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_top_countries_renders_file() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());

        let entries = vec![
            CountryLiteracy {
                country: "Kenya".into(),
                literacy_pct: 81.5,
            },
            CountryLiteracy {
                country: "Ghana".into(),
                literacy_pct: 79.9,
            },
        ];
        let path = renderer.top_countries(2021, &entries).unwrap();
        assert!(path.exists());
    }
}
