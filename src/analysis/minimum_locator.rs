//! Sector minimum search with sub-grid refinement.
//!
//! The discrete minimum is the first smallest valid cell in row-major order
//! (latitude-major, then longitude). Its position is then refined with one
//! parabolic fit per axis through the minimum and its two neighbours. When the
//! minimum sits on the edge of the sector sub-array there is no neighbour on
//! one side, so the cell centre is kept and the result is marked as
//! boundary-limited.

use serde::{Deserialize, Serialize};

use crate::analysis::grid_mask::MaskedSector;
use crate::config::PRINT_REFINEMENT_OFFSETS;
use crate::error::{AsliError, Result};
use crate::utils::{first_argmin, parabolic_vertex_offset};

/// How the low centre is placed within its grid cell.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Debug,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    strum_macros::Display,
    clap::ValueEnum,
)]
pub enum RefinementMethod {
    /// Independent 1-D quadratic fit along latitude and longitude
    #[default]
    Quadratic,
    /// Grid-cell centre of the minimum, no refinement
    GridCell,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatedMinimum {
    pub value: f64,
    /// (row, col) inside the sector sub-array
    pub local_index: (usize, usize),
    /// Longitude in the grid's convention
    pub lon: f64,
    pub lat: f64,
    pub boundary_limited: bool,
}

pub fn locate_minimum(masked: &MaskedSector, method: RefinementMethod) -> Result<LocatedMinimum> {
    let (_, n_cols) = masked.values.dim();

    let (flat_indices, values): (Vec<usize>, Vec<f64>) = masked
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(k, &v)| (k, v))
        .unzip();

    let Some(best) = first_argmin(&values) else {
        return Err(AsliError::InsufficientData {
            time: masked.time,
            reason: "no valid minimum in sector".to_string(),
        });
    };

    let flat = flat_indices[best];
    let local_index = (flat / n_cols, flat % n_cols);
    let value = values[best];

    let selection = masked.selection;
    let (row, col) = local_index;
    let boundary_limited = selection.is_on_edge(local_index);

    let mut lat = selection.lats[row];
    let mut lon = selection.lons[col];

    if !boundary_limited && method == RefinementMethod::Quadratic {
        if let Some(offset) = axis_offset(masked, (row - 1, col), (row, col), (row + 1, col)) {
            lat += offset * half_spacing(&selection.lats, row);
        }
        if let Some((west, east, half_width)) = selection.lon_neighbours(col) {
            if let Some(offset) = axis_offset(masked, (row, west), (row, col), (row, east)) {
                lon += offset * half_width;
            }
        }
        if PRINT_REFINEMENT_OFFSETS {
            log::info!(
                "{}: minimum at cell ({}, {}) refined to lat {:.3}, lon {:.3}",
                masked.time,
                row,
                col,
                lat,
                lon
            );
        }
    }

    Ok(LocatedMinimum {
        value,
        local_index,
        lon: selection.output_lon(lon),
        lat,
        boundary_limited,
    })
}

/// Parabolic vertex offset along one axis, in cells. `None` when a neighbour is
/// masked or the samples are flat.
fn axis_offset(
    masked: &MaskedSector,
    before: (usize, usize),
    centre: (usize, usize),
    after: (usize, usize),
) -> Option<f64> {
    let f_minus = masked.values[[before.0, before.1]];
    let f_centre = masked.values[[centre.0, centre.1]];
    let f_plus = masked.values[[after.0, after.1]];
    if !f_minus.is_finite() || !f_plus.is_finite() {
        return None;
    }
    parabolic_vertex_offset(f_minus, f_centre, f_plus)
}

/// Signed half distance between the neighbours of `idx`. Sign follows the
/// coordinate direction, so descending latitude arrays work unchanged.
#[inline]
fn half_spacing(coords: &[f64], idx: usize) -> f64 {
    0.5 * (coords[idx + 1] - coords[idx - 1])
}
