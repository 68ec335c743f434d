//! Detection defaults

use crate::analysis::RefinementMethod;

/// The Master Detection Configuration
pub struct DetectionConfig {
    // Land fraction at or above which a cell counts as land (ERA5 `lsm` is fractional)
    pub mask_threshold: f64,
    pub refinement: RefinementMethod,
    // Degrees added around the sector when describing a data request or plot extent
    pub request_border_deg: f64,
    // Tolerance when testing coordinates against sector bounds
    pub bounds_tolerance_deg: f64,
}

pub const DETECTION: DetectionConfig = DetectionConfig {
    mask_threshold: 0.5,
    refinement: RefinementMethod::Quadratic,
    request_border_deg: 8.0,
    bounds_tolerance_deg: 1e-9,
};
