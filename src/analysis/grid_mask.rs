use chrono::NaiveDateTime;
use ndarray::{Array2, Zip};

use crate::analysis::sector_extractor::{SectorField, SectorSelection};
use crate::error::{AsliError, Result};

/// Sector field with land and missing cells set to NaN.
#[derive(Debug, Clone)]
pub struct MaskedSector<'a> {
    pub selection: &'a SectorSelection,
    pub time: NaiveDateTime,
    pub values: Array2<f64>,
    pub valid_count: usize,
}

impl MaskedSector<'_> {
    /// Valid values in row-major order.
    pub fn valid_values(&self) -> Vec<f64> {
        self.values.iter().copied().filter(|v| v.is_finite()).collect()
    }

    #[inline]
    pub fn is_valid(&self, row: usize, col: usize) -> bool {
        self.values[[row, col]].is_finite()
    }
}

/// Excludes land cells from a sector field.
///
/// `ocean` is the sector-restricted ocean flag array. Land becomes NaN rather
/// than zero so later minimum and mean computations skip it. Returns
/// `InsufficientData` when no valid cell remains.
pub fn apply_mask<'a>(field: SectorField<'a>, ocean: &Array2<bool>) -> Result<MaskedSector<'a>> {
    if field.values.dim() != ocean.dim() {
        return Err(AsliError::GridMismatch(format!(
            "sector mask has shape {:?}, sector field has shape {:?}",
            ocean.dim(),
            field.values.dim()
        )));
    }

    let values = Zip::from(&field.values)
        .and(ocean)
        .map_collect(|&v, &is_ocean| if is_ocean && v.is_finite() { v } else { f64::NAN });
    let valid_count = values.iter().filter(|v| v.is_finite()).count();

    if valid_count == 0 {
        let land_cells = ocean.iter().filter(|&&is_ocean| !is_ocean).count();
        return Err(AsliError::InsufficientData {
            time: field.time,
            reason: format!(
                "no valid ocean cells in sector ({} cells, {} land)",
                ocean.len(),
                land_cells
            ),
        });
    }

    Ok(MaskedSector {
        selection: field.selection,
        time: field.time,
        values,
        valid_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LatLonGrid, LandSeaMask, Sector, SlpField};
    use chrono::NaiveDate;
    use ndarray::array;

    fn setup() -> (LatLonGrid, Sector, SlpField) {
        let grid = LatLonGrid::regular(-60.0, -1.0, 2, 170.0, 1.0, 2).unwrap();
        let sector = Sector::new(170.0, 171.0, -61.0, -60.0).unwrap();
        let time = NaiveDate::from_ymd_opt(2000, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let field = SlpField::new(time, array![[990.0, 995.0], [f64::NAN, 1000.0]]);
        (grid, sector, field)
    }

    #[test]
    fn test_land_becomes_nan() {
        let (grid, sector, field) = setup();
        let mask = LandSeaMask::from_ocean_flags(grid.clone(), &array![[false, true], [true, true]])
            .unwrap();
        let selection = SectorSelection::new(&grid, &sector).unwrap();
        let ocean = selection.extract_ocean(&mask);

        let masked = apply_mask(selection.extract_field(&field), &ocean).unwrap();
        assert!(masked.values[[0, 0]].is_nan());
        assert!(masked.values[[1, 0]].is_nan()); // missing input stays missing
        assert_eq!(masked.valid_count, 2);
        assert_eq!(masked.valid_values(), vec![995.0, 1000.0]);
        assert!(masked.is_valid(0, 1));
    }

    #[test]
    fn test_all_land_is_insufficient_data() {
        let (grid, sector, field) = setup();
        let mask = LandSeaMask::new(grid.clone(), Array2::ones((2, 2))).unwrap();
        let selection = SectorSelection::new(&grid, &sector).unwrap();
        let ocean = selection.extract_ocean(&mask);

        let err = apply_mask(selection.extract_field(&field), &ocean).unwrap_err();
        assert!(matches!(err, AsliError::InsufficientData { time, .. } if time == field.time));
        assert!(!err.is_fatal());
    }
}
