//! Restricts pressure fields to the search sector.
//!
//! The row/column selection depends only on the grid and the sector, so it is
//! computed once per run and applied to every timestep. Selected columns are
//! ordered eastwards from the sector's western edge, and their longitudes are
//! unwrapped so they increase without a jump across the dateline or the
//! 0/360 meridian. That keeps the sub-array contiguous for neighbour lookups.

use chrono::NaiveDateTime;
use itertools::Itertools;
use ndarray::{Array2, Axis};

use crate::config::{DETECTION, PRINT_SECTOR_SELECTION};
use crate::domain::{LandSeaMask, LatLonGrid, LonConvention, Sector, SlpField, normalize_lon};
use crate::error::{AsliError, Result};

/// Grid rows and columns falling inside a sector.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorSelection {
    /// Grid row indices, in grid order
    pub rows: Vec<usize>,
    /// Grid column indices, ordered eastwards from the western edge
    pub cols: Vec<usize>,
    pub lats: Vec<f64>,
    /// Unwrapped longitudes, increasing eastwards (may exceed 180 or 360)
    pub lons: Vec<f64>,
    pub lon_convention: LonConvention,
    /// Columns cover the whole circle, so the first and last are neighbours
    pub wraps_lon: bool,
}

/// Pressure values of one timestep restricted to a sector.
#[derive(Debug, Clone)]
pub struct SectorField<'a> {
    pub selection: &'a SectorSelection,
    pub time: NaiveDateTime,
    pub values: Array2<f64>,
}

impl SectorSelection {
    pub fn new(grid: &LatLonGrid, sector: &Sector) -> Result<Self> {
        sector.validate()?;

        let rows: Vec<usize> = grid
            .lats
            .iter()
            .positions(|&lat| sector.contains_lat(lat))
            .collect();

        let west = sector.west;
        let (cols, offsets): (Vec<usize>, Vec<f64>) = grid
            .lons
            .iter()
            .enumerate()
            .filter(|&(_, &lon)| sector.contains_lon(lon))
            .map(|(j, &lon)| (j, sector.lon_offset(lon)))
            .sorted_by(|a, b| a.1.total_cmp(&b.1))
            // A repeated wrap-around column (0 and 360) is the same cell
            .dedup_by(|a, b| (b.1 - a.1).abs() <= DETECTION.bounds_tolerance_deg)
            .unzip();

        if rows.is_empty() || cols.is_empty() {
            return Err(AsliError::Configuration(format!(
                "sector {} does not intersect the grid (lat {:?}..{:?}, lon {:?}..{:?}; {} rows, {} columns selected)",
                sector,
                grid.lats.first(),
                grid.lats.last(),
                grid.lons.first(),
                grid.lons.last(),
                rows.len(),
                cols.len()
            )));
        }

        let lats = rows.iter().map(|&i| grid.lats[i]).collect();
        let lons: Vec<f64> = offsets.iter().map(|offset| west + offset).collect();
        let wraps_lon = sector.lon_span() >= 360.0 && closes_circle(&lons);
        let selection = SectorSelection {
            rows,
            cols,
            lats,
            lons,
            lon_convention: grid.lon_convention(),
            wraps_lon,
        };

        if PRINT_SECTOR_SELECTION {
            log::info!(
                "Sector {} selects {} rows x {} columns (crosses seam: {})",
                sector,
                selection.rows.len(),
                selection.cols.len(),
                sector.crosses_seam(selection.lon_convention)
            );
        }

        Ok(selection)
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.cols.len())
    }

    /// Sub-array of a full-grid array, in selection order.
    pub fn extract<T: Clone>(&self, values: &Array2<T>) -> Array2<T> {
        values.select(Axis(0), &self.rows).select(Axis(1), &self.cols)
    }

    pub fn extract_field<'a>(&'a self, field: &SlpField) -> SectorField<'a> {
        SectorField {
            selection: self,
            time: field.time,
            values: self.extract(&field.values),
        }
    }

    /// Ocean flags of the mask restricted to the sector.
    pub fn extract_ocean(&self, mask: &LandSeaMask) -> Array2<bool> {
        self.extract(&mask.ocean_flags())
    }

    /// Full-grid (row, col) of a sector-local index.
    #[inline]
    pub fn grid_index(&self, local: (usize, usize)) -> (usize, usize) {
        (self.rows[local.0], self.cols[local.1])
    }

    /// Longitude in the grid's own convention.
    pub fn output_lon(&self, unwrapped_lon: f64) -> f64 {
        normalize_lon(unwrapped_lon, self.lon_convention)
    }

    /// True if the local index lies on the outer edge of the sector sub-array.
    /// A selection wrapping the whole circle has no longitude edge.
    pub fn is_on_edge(&self, local: (usize, usize)) -> bool {
        let (n_rows, n_cols) = self.shape();
        let lat_edge = local.0 == 0 || local.0 + 1 == n_rows;
        let lon_edge = !self.wraps_lon && (local.1 == 0 || local.1 + 1 == n_cols);
        lat_edge || lon_edge
    }

    /// West and east neighbour columns of `col` with the signed half distance
    /// between them in degrees. `None` on a longitude edge.
    pub fn lon_neighbours(&self, col: usize) -> Option<(usize, usize, f64)> {
        let n_cols = self.cols.len();
        if self.wraps_lon && n_cols >= 3 {
            let west = (col + n_cols - 1) % n_cols;
            let east = (col + 1) % n_cols;
            let west_lon = if col == 0 { self.lons[west] - 360.0 } else { self.lons[west] };
            let east_lon = if east == 0 { self.lons[east] + 360.0 } else { self.lons[east] };
            return Some((west, east, 0.5 * (east_lon - west_lon)));
        }
        if col == 0 || col + 1 >= n_cols {
            return None;
        }
        Some((col - 1, col + 1, 0.5 * (self.lons[col + 1] - self.lons[col - 1])))
    }
}

/// True when the gap from the last unwrapped longitude back round to the first
/// is no wider than the typical column spacing.
fn closes_circle(lons: &[f64]) -> bool {
    let (Some(&first), Some(&last)) = (lons.first(), lons.last()) else {
        return false;
    };
    if lons.len() < 3 {
        return false;
    }
    let mean_step = (last - first) / (lons.len() - 1) as f64;
    first + 360.0 - last <= 1.5 * mean_step
}

/// Restrict one field to a sector. Convenience wrapper for single-timestep use.
pub fn extract_sector(
    grid: &LatLonGrid,
    field: &SlpField,
    sector: &Sector,
) -> Result<(SectorSelection, Array2<f64>)> {
    let selection = SectorSelection::new(grid, sector)?;
    let values = selection.extract(&field.values);
    Ok((selection, values))
}
