use itertools::Itertools;
use statrs::statistics::Statistics;

use crate::analysis::grid_mask::MaskedSector;
use crate::error::{AsliError, Result};

/// Sector-mean pressure and the relative central pressure of the low.
///
/// The relative index (minimum minus sector mean) separates the depth of the
/// low from basin-wide pressure shifts (Hosking et al. 2013).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelativeIndex {
    pub sector_mean: f64,
    pub relative_central_pressure: f64,
}

/// Arithmetic mean of every valid cell in the masked sector.
pub fn sector_mean(masked: &MaskedSector) -> Result<f64> {
    if masked.valid_count == 0 {
        return Err(AsliError::InsufficientData {
            time: masked.time,
            reason: "no valid cells for sector mean".to_string(),
        });
    }
    // Summed in ascending order so the mean depends only on the values present,
    // not on where they sit in the sector
    let sorted = masked.valid_values().into_iter().sorted_by(f64::total_cmp);
    Ok(sorted.mean())
}

pub fn relative_index(masked: &MaskedSector, minimum: f64) -> Result<RelativeIndex> {
    let sector_mean = sector_mean(masked)?;
    Ok(RelativeIndex {
        sector_mean,
        relative_central_pressure: minimum - sector_mean,
    })
}
