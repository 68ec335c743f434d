use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::config::DETECTION;
use crate::domain::LatLonGrid;
use crate::error::{AsliError, Result};

/// Static land-sea mask on the pressure grid.
///
/// Holds the land fraction per cell (ERA5 `lsm` style, 0 = open ocean,
/// 1 = land). A cell is valid ocean when its fraction is below `threshold`;
/// NaN fractions count as land.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LandSeaMask {
    pub grid: LatLonGrid,
    pub land_fraction: Array2<f64>,
    pub threshold: f64,
}

impl LandSeaMask {
    pub fn new(grid: LatLonGrid, land_fraction: Array2<f64>) -> Result<Self> {
        let mask = LandSeaMask {
            grid,
            land_fraction,
            threshold: DETECTION.mask_threshold,
        };
        mask.validate()?;
        Ok(mask)
    }

    /// Boolean mask, `true` meaning ocean.
    pub fn from_ocean_flags(grid: LatLonGrid, ocean: &Array2<bool>) -> Result<Self> {
        Self::new(grid, ocean.mapv(|is_ocean| if is_ocean { 0.0 } else { 1.0 }))
    }

    pub fn all_ocean(grid: LatLonGrid) -> Self {
        let land_fraction = Array2::zeros(grid.shape());
        LandSeaMask {
            grid,
            land_fraction,
            threshold: DETECTION.mask_threshold,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.land_fraction.dim() != self.grid.shape() {
            return Err(AsliError::GridMismatch(format!(
                "land-sea mask values have shape {:?}, mask grid has shape {:?}",
                self.land_fraction.dim(),
                self.grid.shape()
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn is_ocean(&self, row: usize, col: usize) -> bool {
        let fraction = self.land_fraction[[row, col]];
        fraction.is_finite() && fraction < self.threshold
    }

    pub fn ocean_flags(&self) -> Array2<bool> {
        let threshold = self.threshold;
        self.land_fraction
            .mapv(|fraction| fraction.is_finite() && fraction < threshold)
    }

    pub fn ocean_cell_count(&self) -> usize {
        self.ocean_flags().iter().filter(|&&ocean| ocean).count()
    }
}
