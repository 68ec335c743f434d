use serde::{Deserialize, Serialize};

use crate::error::{AsliError, Result};
use crate::utils::is_strictly_monotonic;

/// Longitude convention used by a grid's coordinate array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display)]
pub enum LonConvention {
    /// [-180, 180)
    Signed,
    /// [0, 360)
    Positive,
}

/// Map a longitude into `convention`.
pub fn normalize_lon(lon: f64, convention: LonConvention) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    match convention {
        LonConvention::Positive => wrapped,
        LonConvention::Signed if wrapped >= 180.0 => wrapped - 360.0,
        LonConvention::Signed => wrapped,
    }
}

/// Rectangular latitude-longitude grid shared by every field of a run.
///
/// Values on the grid are stored row-major: one row per latitude.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LatLonGrid {
    pub lats: Vec<f64>,
    pub lons: Vec<f64>,
}

impl LatLonGrid {
    pub fn new(lats: Vec<f64>, lons: Vec<f64>) -> Result<Self> {
        let grid = LatLonGrid { lats, lons };
        grid.validate()?;
        Ok(grid)
    }

    /// Regular grid from start/step/count per axis. Steps may be negative.
    pub fn regular(
        lat_start: f64,
        lat_step: f64,
        n_lat: usize,
        lon_start: f64,
        lon_step: f64,
        n_lon: usize,
    ) -> Result<Self> {
        let lats = (0..n_lat).map(|i| lat_start + i as f64 * lat_step).collect();
        let lons = (0..n_lon).map(|j| lon_start + j as f64 * lon_step).collect();
        Self::new(lats, lons)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lats.is_empty() || self.lons.is_empty() {
            return Err(AsliError::Configuration(format!(
                "grid has an empty axis ({} lats, {} lons)",
                self.lats.len(),
                self.lons.len()
            )));
        }
        if !is_strictly_monotonic(&self.lats) {
            return Err(AsliError::Configuration(
                "latitude coordinates are not strictly monotonic".to_string(),
            ));
        }
        if !is_strictly_monotonic(&self.lons) {
            return Err(AsliError::Configuration(
                "longitude coordinates are not strictly monotonic".to_string(),
            ));
        }
        if self.lats.iter().any(|lat| lat.abs() > 90.0) {
            return Err(AsliError::Configuration(
                "latitude coordinates outside [-90, 90]".to_string(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.lats.len(), self.lons.len())
    }

    pub fn lon_convention(&self) -> LonConvention {
        if self.lons.iter().any(|&lon| lon < 0.0) {
            LonConvention::Signed
        } else {
            LonConvention::Positive
        }
    }

    /// Exact comparison against another grid; `what` names the other grid in the error.
    pub fn check_matches(&self, other: &LatLonGrid, what: &str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(AsliError::GridMismatch(format!(
                "{} grid has shape {:?}, pressure grid has shape {:?}",
                what,
                other.shape(),
                self.shape()
            )));
        }
        if let Some(i) = first_difference(&self.lats, &other.lats) {
            return Err(AsliError::GridMismatch(format!(
                "{} latitude[{}] = {} differs from pressure latitude {}",
                what, i, other.lats[i], self.lats[i]
            )));
        }
        if let Some(j) = first_difference(&self.lons, &other.lons) {
            return Err(AsliError::GridMismatch(format!(
                "{} longitude[{}] = {} differs from pressure longitude {}",
                what, j, other.lons[j], self.lons[j]
            )));
        }
        Ok(())
    }
}

fn first_difference(a: &[f64], b: &[f64]) -> Option<usize> {
    a.iter().zip(b.iter()).position(|(x, y)| x.to_bits() != y.to_bits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lon() {
        assert_eq!(normalize_lon(190.0, LonConvention::Signed), -170.0);
        assert_eq!(normalize_lon(-170.0, LonConvention::Positive), 190.0);
        assert_eq!(normalize_lon(180.0, LonConvention::Signed), -180.0);
        assert_eq!(normalize_lon(360.0, LonConvention::Positive), 0.0);
        assert_eq!(normalize_lon(298.0, LonConvention::Positive), 298.0);
    }

    #[test]
    fn test_rejects_non_monotonic() {
        let err = LatLonGrid::new(vec![-60.0, -70.0, -65.0], vec![0.0, 1.0]).unwrap_err();
        assert!(matches!(err, AsliError::Configuration(_)));
    }

    #[test]
    fn test_check_matches() {
        let a = LatLonGrid::regular(-60.0, -1.0, 5, 170.0, 1.0, 5).unwrap();
        let b = LatLonGrid::regular(-60.0, -1.0, 5, 170.5, 1.0, 5).unwrap();
        let c = LatLonGrid::regular(-60.0, -1.0, 4, 170.0, 1.0, 5).unwrap();
        assert!(a.check_matches(&a.clone(), "mask").is_ok());
        assert!(matches!(
            a.check_matches(&b, "mask"),
            Err(AsliError::GridMismatch(_))
        ));
        assert!(matches!(
            a.check_matches(&c, "mask"),
            Err(AsliError::GridMismatch(_))
        ));
    }

    #[test]
    fn test_lon_convention() {
        let signed = LatLonGrid::regular(0.0, 1.0, 2, -180.0, 90.0, 4).unwrap();
        let positive = LatLonGrid::regular(0.0, 1.0, 2, 0.0, 90.0, 4).unwrap();
        assert_eq!(signed.lon_convention(), LonConvention::Signed);
        assert_eq!(positive.lon_convention(), LonConvention::Positive);
    }
}
