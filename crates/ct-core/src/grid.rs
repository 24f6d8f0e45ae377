//! Gridded dataset loading and spatial selection
//!
//! Loads one scalar variable keyed by (time, latitude, longitude) from a
//! NetCDF file into memory, then extracts the annual series for the grid
//! cell nearest a target coordinate. Selection matches the conventional
//! `sel(..., method="nearest")` semantics: independent per-axis nearest
//! match, no interpolation.

use std::path::Path;

use log::{debug, info};
use ndarray::{Array1, Array3, ArrayView1, Ix3};

use crate::config::AnalysisConfig;
use crate::error::{DataError, Result};
use crate::series::ExtractedSeries;
use crate::time::CfTime;

/// Candidate names for the latitude axis
const LAT_NAMES: [&str; 2] = ["lat", "latitude"];
/// Candidate names for the longitude axis
const LON_NAMES: [&str; 2] = ["lon", "longitude"];
/// Candidate names for the time axis
const TIME_NAMES: [&str; 1] = ["time"];

/// In-memory gridded scalar field
///
/// Immutable after loading: coordinate axes plus a (time, lat, lon)
/// value cube, with the time axis decoded to (year, month) pairs.
#[derive(Debug, Clone)]
pub struct GriddedSeries {
    variable: String,
    times: Vec<(i32, u32)>,
    lats: Array1<f64>,
    lons: Array1<f64>,
    values: Array3<f64>,
}

impl GriddedSeries {
    /// Load a variable and its coordinate axes from a NetCDF file
    pub fn open(path: &Path, variable: &str) -> Result<Self> {
        let file = netcdf::open(path).map_err(|source| DataError::Open {
            path: path.display().to_string(),
            source,
        })?;

        let lats = read_axis(&file, &LAT_NAMES)?;
        let lons = read_axis(&file, &LON_NAMES)?;
        let times = read_time_axis(&file)?;

        let var = file
            .variable(variable)
            .ok_or_else(|| DataError::VariableNotFound(variable.to_string()))?;

        let raw = var
            .get::<f64, _>(..)
            .map_err(|source| DataError::Read {
                name: variable.to_string(),
                source,
            })?;

        let expected = vec![times.len(), lats.len(), lons.len()];
        let actual = raw.shape().to_vec();
        let values = raw
            .into_dimensionality::<Ix3>()
            .ok()
            .filter(|cube| cube.shape() == expected.as_slice())
            .ok_or_else(|| DataError::UnexpectedShape {
                name: variable.to_string(),
                expected,
                actual,
            })?;

        info!(
            "loaded '{}' from {}: {} timesteps on a {}x{} grid",
            variable,
            path.display(),
            times.len(),
            lats.len(),
            lons.len()
        );

        Self::from_parts(variable, times, lats, lons, values)
    }

    /// Build a gridded series from in-memory parts
    ///
    /// Axis lengths must match the value cube's shape, and the spatial
    /// axes must be non-empty — a zero-length axis has no nearest cell.
    pub fn from_parts(
        variable: impl Into<String>,
        times: Vec<(i32, u32)>,
        lats: Array1<f64>,
        lons: Array1<f64>,
        values: Array3<f64>,
    ) -> Result<Self> {
        let variable = variable.into();

        if lats.is_empty() {
            return Err(DataError::EmptyAxis("lat".to_string()));
        }
        if lons.is_empty() {
            return Err(DataError::EmptyAxis("lon".to_string()));
        }

        let expected = vec![times.len(), lats.len(), lons.len()];
        if values.shape() != expected.as_slice() {
            return Err(DataError::UnexpectedShape {
                name: variable,
                expected,
                actual: values.shape().to_vec(),
            });
        }

        Ok(Self {
            variable,
            times,
            lats,
            lons,
            values,
        })
    }

    /// Name of the loaded variable
    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// Grid coordinates of the cell nearest the target
    pub fn nearest_cell(&self, latitude: f64, longitude: f64) -> (f64, f64) {
        let (i, j) = self.nearest_indices(latitude, longitude);
        (self.lats[i], self.lons[j])
    }

    /// Extract the configured month/year-range series at the nearest cell
    ///
    /// Fails loudly with `DataError::EmptySelection` when the filters
    /// leave no observations, rather than handing a degenerate series to
    /// the estimators.
    pub fn extract(&self, config: &AnalysisConfig) -> Result<ExtractedSeries> {
        let (i, j) = self.nearest_indices(config.latitude, config.longitude);
        debug!(
            "nearest cell to ({}, {}) is ({}, {})",
            config.latitude, config.longitude, self.lats[i], self.lons[j]
        );

        let pairs: Vec<(i32, f64)> = self
            .times
            .iter()
            .enumerate()
            .filter(|(_, &(year, month))| {
                month == config.month && (config.start_year..=config.end_year).contains(&year)
            })
            .map(|(t, &(year, _))| (year, self.values[(t, i, j)]))
            .collect();

        if pairs.is_empty() {
            return Err(DataError::EmptySelection {
                month: config.month,
                start: config.start_year,
                end: config.end_year,
            });
        }

        ExtractedSeries::new(pairs)
    }

    fn nearest_indices(&self, latitude: f64, longitude: f64) -> (usize, usize) {
        let lon = normalize_longitude(self.lons.view(), longitude);
        (
            nearest_index(self.lats.view(), latitude),
            nearest_index(self.lons.view(), lon),
        )
    }
}

/// Index of the axis value closest to the target
///
/// Ties resolve to the lower index, so repeated selection with the same
/// target always lands on the same cell.
pub fn nearest_index(axis: ArrayView1<f64>, target: f64) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;

    for (idx, &coord) in axis.iter().enumerate() {
        let distance = (coord - target).abs();
        if distance < best_distance {
            best = idx;
            best_distance = distance;
        }
    }

    best
}

/// Map a target longitude onto the grid's convention
///
/// Grids stored on [0, 360) cannot match a negative target directly;
/// shift such targets by +360 (and the reverse for [-180, 180) grids
/// given targets above 180).
fn normalize_longitude(axis: ArrayView1<f64>, target: f64) -> f64 {
    let max = axis.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = axis.iter().copied().fold(f64::INFINITY, f64::min);

    if target < 0.0 && max > 180.0 {
        target + 360.0
    } else if target > 180.0 && min < 0.0 {
        target - 360.0
    } else {
        target
    }
}

fn read_axis(file: &netcdf::File, names: &[&str]) -> Result<Array1<f64>> {
    let var = find_variable(file, names)?;

    let raw = var
        .get::<f64, _>(..)
        .map_err(|source| DataError::Read {
            name: var.name().to_string(),
            source,
        })?;

    raw.into_dimensionality::<ndarray::Ix1>()
        .map_err(|_| DataError::AxisShape(var.name().to_string()))
}

fn read_time_axis(file: &netcdf::File) -> Result<Vec<(i32, u32)>> {
    let var = find_variable(file, &TIME_NAMES)?;
    let name = var.name().to_string();

    let units = attr_string(&var, "units")?.ok_or_else(|| {
        DataError::TimeDecode(format!("time axis '{name}' has no units attribute"))
    })?;
    let calendar = attr_string(&var, "calendar")?;

    let decoder = CfTime::parse(&units, calendar.as_deref())?;

    let raw = var.get::<f64, _>(..).map_err(|source| DataError::Read {
        name: name.clone(),
        source,
    })?;

    raw.iter().map(|&v| decoder.decode(v)).collect()
}

fn find_variable<'f>(file: &'f netcdf::File, names: &[&str]) -> Result<netcdf::Variable<'f>> {
    names
        .iter()
        .find_map(|name| file.variable(name))
        .ok_or_else(|| DataError::AxisNotFound(names.join("/")))
}

fn attr_string(var: &netcdf::Variable, name: &str) -> Result<Option<String>> {
    match var.attribute(name) {
        None => Ok(None),
        Some(attr) => match attr.value().map_err(|source| DataError::Read {
            name: format!("{}:{name}", var.name()),
            source,
        })? {
            netcdf::AttributeValue::Str(s) => Ok(Some(s)),
            other => Err(DataError::TimeDecode(format!(
                "attribute '{name}' is not a string: {other:?}"
            ))),
        },
    }
}
