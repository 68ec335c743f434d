use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::analysis::{LocatedMinimum, RelativeIndex};

/// Outcome of detection for one timestep
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, strum_macros::Display,
)]
pub enum DetectionStatus {
    /// Minimum found and refined
    Detected,
    /// Minimum on the sector edge, reported at the grid-cell centre
    BoundaryLimited,
    /// No valid ocean cell in the sector; values are NaN
    InsufficientData,
}

/// One row of the index: position and strength of the low at one timestep.
///
/// Serialized field names follow the published ASLI columns so the rows can
/// go straight into a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    pub time: NaiveDateTime,
    pub lon: f64,
    pub lat: f64,
    /// Actual central pressure (sector minimum)
    #[serde(rename = "ActCenPres")]
    pub act_cen_pres: f64,
    /// Sector-mean pressure
    #[serde(rename = "SectorPres")]
    pub sector_pres: f64,
    /// Relative central pressure, `act_cen_pres - sector_pres`
    #[serde(rename = "RelCenPres")]
    pub rel_cen_pres: f64,
    pub status: DetectionStatus,
    /// (row, col) of the minimum cell in the full grid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_index: Option<(usize, usize)>,
}

impl DetectionResult {
    pub fn detected(
        time: NaiveDateTime,
        minimum: &LocatedMinimum,
        index: &RelativeIndex,
        grid_index: (usize, usize),
    ) -> Self {
        let status = if minimum.boundary_limited {
            DetectionStatus::BoundaryLimited
        } else {
            DetectionStatus::Detected
        };
        Self {
            time,
            lon: minimum.lon,
            lat: minimum.lat,
            act_cen_pres: minimum.value,
            sector_pres: index.sector_mean,
            rel_cen_pres: index.relative_central_pressure,
            status,
            grid_index: Some(grid_index),
        }
    }

    /// Flagged row for a timestep without valid data. Keeps the timestamp so the
    /// series has one row per period.
    pub fn missing(time: NaiveDateTime) -> Self {
        Self {
            time,
            lon: f64::NAN,
            lat: f64::NAN,
            act_cen_pres: f64::NAN,
            sector_pres: f64::NAN,
            rel_cen_pres: f64::NAN,
            status: DetectionStatus::InsufficientData,
            grid_index: None,
        }
    }

    /// True unless the row is flagged as missing data.
    pub fn is_valid(&self) -> bool {
        self.status != DetectionStatus::InsufficientData
    }

    pub fn is_boundary_limited(&self) -> bool {
        self.status == DetectionStatus::BoundaryLimited
    }

    /// Bitwise equality, treating NaN payloads as equal.
    pub fn bit_eq(&self, other: &DetectionResult) -> bool {
        let bits = |r: &DetectionResult| {
            [r.lon, r.lat, r.act_cen_pres, r.sector_pres, r.rel_cen_pres].map(f64::to_bits)
        };
        self.time == other.time
            && self.status == other.status
            && self.grid_index == other.grid_index
            && bits(self) == bits(other)
    }
}
