//! Synthetic pressure fields with a single Gaussian low.
//!
//! Used by the demo cache builder and the integration tests. Fields are a
//! deterministic function of the month, so repeated runs are identical.

use std::f64::consts::PI;

use chrono::{Datelike, NaiveDate};
use ndarray::Array2;

use crate::domain::{
    LandSeaMask, LatLonGrid, LonConvention, PressureUnit, SlpField, SlpStack, normalize_lon,
};
use crate::error::Result;
use crate::utils::TimeUtils;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyntheticConfig {
    pub first_year: i32,
    pub n_years: u32,
    /// Grid spacing in degrees on both axes
    pub resolution: f64,
    /// Background pressure (hPa)
    pub background: f64,
    /// Depth of the low below the background (hPa)
    pub depth: f64,
    /// e-folding radius of the low (degrees)
    pub radius: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            first_year: 1979,
            n_years: 2,
            resolution: 1.25,
            background: 1000.0,
            depth: 25.0,
            radius: 10.0,
        }
    }
}

/// Southern-ocean grid from 50S to 90S on the [-180, 180) convention, so the
/// ASL sector straddles the dateline.
pub fn southern_grid(resolution: f64) -> Result<LatLonGrid> {
    let n_lat = (40.0 / resolution).floor() as usize + 1;
    let n_lon = (360.0 / resolution).round() as usize;
    LatLonGrid::regular(-50.0, -resolution, n_lat, -180.0, resolution, n_lon)
}

/// Centre of the synthetic low for a month: drifts east in winter and west in
/// summer across the Amundsen and Bellingshausen seas.
pub fn low_centre(month: u32) -> (f64, f64) {
    let phase = 2.0 * PI * (month as f64 - 1.0) / 12.0;
    let lon = 240.0 + 25.0 * phase.sin();
    let lat = -69.0 + 2.5 * phase.cos();
    (lon, lat)
}

/// Monthly mean sea-level pressure in Pa, first of each month.
pub fn monthly_stack(config: &SyntheticConfig) -> Result<SlpStack> {
    let grid = southern_grid(config.resolution)?;
    let fields = (0..config.n_years as i32)
        .flat_map(|y| (1..=12u32).map(move |m| (config.first_year + y, m)))
        .filter_map(|(year, month)| NaiveDate::from_ymd_opt(year, month, 1))
        .map(|date| {
            let values = low_field(&grid, config, date.month()).mapv(|hpa| hpa * 100.0);
            SlpField::new(TimeUtils::start_of_day(date), values)
        })
        .collect();
    SlpStack::new(grid, PressureUnit::Pa, fields)
}

fn low_field(grid: &LatLonGrid, config: &SyntheticConfig, month: u32) -> Array2<f64> {
    let (centre_lon, centre_lat) = low_centre(month);
    Array2::from_shape_fn(grid.shape(), |(i, j)| {
        let lat = grid.lats[i];
        // Shortest signed longitude difference, scaled by latitude
        let dlon = (grid.lons[j] - centre_lon + 180.0).rem_euclid(360.0) - 180.0;
        let dx = dlon * lat.to_radians().cos();
        let dy = lat - centre_lat;
        let r2 = (dx * dx + dy * dy) / (config.radius * config.radius);
        config.background - config.depth * (-r2).exp()
    })
}

/// Rough Antarctic land fraction: the continent south of 75S and the
/// peninsula west of 60W reaching up to 63S.
pub fn antarctic_mask(grid: &LatLonGrid) -> Result<LandSeaMask> {
    let land = Array2::from_shape_fn(grid.shape(), |(i, j)| {
        let lat = grid.lats[i];
        let lon = normalize_lon(grid.lons[j], LonConvention::Positive);
        let continent = lat <= -75.0;
        let peninsula = (290.0..=300.0).contains(&lon) && lat <= -63.0;
        if continent || peninsula { 1.0 } else { 0.0 }
    });
    LandSeaMask::new(grid.clone(), land)
}
