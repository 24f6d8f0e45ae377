//! ClimTrend command line
//!
//! Drives the analysis pipeline end to end: load the gridded dataset,
//! extract the configured monthly series at the nearest grid cell, fit
//! the OLS baseline, estimate the residual autocorrelation, refit under
//! AR(1) errors, then print the comparison and render the chart.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{error, info};

use ct_core::{AnalysisConfig, GriddedSeries};
use ct_models::acf::lag1_autocorrelation;
use ct_models::lm::{gls, ols};
use ct_models::TrendComparison;

mod plot;

#[derive(Parser, Debug)]
#[command(
    name = "climtrend",
    version,
    about = "Monthly temperature trend analysis: OLS vs GLS with AR(1) errors"
)]
struct Args {
    /// Path to the gridded NetCDF dataset
    dataset: PathBuf,

    /// Variable to analyse
    #[arg(long, default_value = "tas")]
    variable: String,

    /// Target latitude in degrees north
    #[arg(long, default_value_t = -0.84245, allow_hyphen_values = true)]
    latitude: f64,

    /// Target longitude in degrees east
    #[arg(long, default_value_t = 9.40272, allow_hyphen_values = true)]
    longitude: f64,

    /// Calendar month to extract (1-12)
    #[arg(long, default_value_t = 4)]
    month: u32,

    /// First year of the analysis window (inclusive)
    #[arg(long, default_value_t = 1990)]
    start_year: i32,

    /// Last year of the analysis window (inclusive)
    #[arg(long, default_value_t = 2050)]
    end_year: i32,

    /// Output path for the rendered chart
    #[arg(long, default_value = "trend.svg")]
    chart: PathBuf,

    /// Compute and print results without rendering a chart
    #[arg(long)]
    no_chart: bool,
}

impl Args {
    fn to_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            path: self.dataset.clone(),
            variable: self.variable.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
            month: self.month,
            start_year: self.start_year,
            end_year: self.end_year,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = args.to_config();
    config.validate()?;

    let grid = GriddedSeries::open(&config.path, &config.variable)?;
    let series = grid.extract(&config)?;
    info!(
        "extracted {} observations for month {} in {}..={}",
        series.len(),
        config.month,
        config.start_year,
        config.end_year
    );

    let ols_fit = ols::fit(&series)?;
    let rho = lag1_autocorrelation(ols_fit.residuals.view())?;
    let gls_fit = gls::fit(&series, rho)?;

    let comparison = TrendComparison::new(&ols_fit, &gls_fit, rho);
    println!("\n{comparison}");

    if !args.no_chart {
        // Results are already printed; a failed render is reported, not fatal.
        match plot::render(&args.chart, &config, &grid, &series, &ols_fit, &gls_fit, rho) {
            Ok(()) => info!("chart written to {}", args.chart.display()),
            Err(e) => error!("chart rendering failed: {e:#}"),
        }
    }

    Ok(())
}
