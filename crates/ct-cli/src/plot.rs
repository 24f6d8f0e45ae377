//! Chart rendering
//!
//! Draws the raw monthly series with both fitted trend lines to an SVG
//! file. Slope, p-value and ρ are embedded in the legend and title so
//! the chart stands alone without the text report.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use ct_core::{AnalysisConfig, ExtractedSeries, GriddedSeries};
use ct_models::TrendFit;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Render the series and both trend lines to `path`
pub fn render(
    path: &Path,
    config: &AnalysisConfig,
    grid: &GriddedSeries,
    series: &ExtractedSeries,
    ols: &TrendFit,
    gls: &TrendFit,
    rho: f64,
) -> Result<()> {
    let years = series.years();
    let first_year = *years.first().context("series is empty")?;
    let last_year = *years.last().context("series is empty")?;

    let (y_min, y_max) = value_range(series, ols, gls);
    let (cell_lat, cell_lon) = grid.nearest_cell(config.latitude, config.longitude);

    let month_name = MONTH_NAMES[config.month as usize - 1];
    let title = format!(
        "{} {} at ({:.5}, {:.5}), {}-{} | rho = {:.3}",
        month_name,
        grid.variable(),
        cell_lat,
        cell_lon,
        config.start_year,
        config.end_year,
        rho
    );

    let root = SVGBackend::new(path, (960, 540)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 20))
        .margin(12)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(first_year..last_year, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Temperature (K)")
        .draw()?;

    let observed: Vec<(i32, f64)> = years
        .iter()
        .copied()
        .zip(series.values().iter().copied())
        .collect();

    chart
        .draw_series(LineSeries::new(observed.clone(), BLUE.stroke_width(1)))?
        .label(format!("{month_name} temperature"))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], BLUE));
    chart.draw_series(
        observed
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
    )?;

    for (fit, color, label) in [(ols, RED, "OLS Trend"), (gls, GREEN, "GLS-AR(1) Trend")] {
        let points: Vec<(i32, f64)> = years
            .iter()
            .copied()
            .zip(fit.fitted_values.iter().copied())
            .collect();

        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(format!(
                "{label} ({:.3} K/yr, p={:.3})",
                fit.slope(),
                fit.slope_p_value()
            ))
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 16, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.85))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

/// Padded y-range covering the observations and both trend lines
fn value_range(series: &ExtractedSeries, ols: &TrendFit, gls: &TrendFit) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for &v in series
        .values()
        .iter()
        .chain(ols.fitted_values.iter())
        .chain(gls.fitted_values.iter())
    {
        min = min.min(v);
        max = max.max(v);
    }

    let pad = ((max - min) * 0.05).max(0.5);
    (min - pad, max + pad)
}
