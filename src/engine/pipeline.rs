//! Builds the ASL time series from a stack of pressure fields.
//!
//! Every timestep is independent: it only reads its own field plus the shared
//! sector selection and ocean flags, which are computed once up front. Fields
//! are therefore processed with a rayon parallel iterator and no locking.
//! Setup problems (invalid sector, mask or field geometry) abort before any
//! timestep runs; a timestep without valid ocean cells becomes a flagged row.

use ndarray::Array2;
use rayon::prelude::*;

use crate::analysis::{
    RefinementMethod, SectorSelection, apply_mask, locate_minimum, relative_index,
};
use crate::config::{DETECTION, PRINT_TIMESTEP_DETECTIONS};
use crate::domain::{LandSeaMask, Sector, SlpField, SlpStack};
use crate::error::{AsliError, Result};
use crate::models::{AslTimeSeries, DetectionResult, SeriesHeader};
use crate::utils::TimeUtils;

/// Run options passed explicitly to each calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationOptions {
    pub refinement: RefinementMethod,
    /// Worker threads. `None` uses rayon's global pool.
    pub n_jobs: Option<usize>,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            refinement: DETECTION.refinement,
            n_jobs: None,
        }
    }
}

/// Calculate the ASL index with default options.
pub fn calculate(sector: &Sector, mask: &LandSeaMask, stack: &SlpStack) -> Result<AslTimeSeries> {
    calculate_with(sector, mask, stack, &CalculationOptions::default())
}

pub fn calculate_with(
    sector: &Sector,
    mask: &LandSeaMask,
    stack: &SlpStack,
    options: &CalculationOptions,
) -> Result<AslTimeSeries> {
    let start_time = std::time::Instant::now();

    // --- Step 1: Fatal setup checks ---
    sector.validate()?;
    stack.validate()?;
    mask.validate()?;
    stack.grid.check_matches(&mask.grid, "land-sea mask")?;

    let selection = SectorSelection::new(&stack.grid, sector)?;
    let ocean = selection.extract_ocean(mask);
    let ocean_cells = ocean.iter().filter(|&&o| o).count();
    if ocean_cells == 0 {
        log::warn!(
            "Sector {} contains no ocean cells; every timestep will be flagged",
            sector
        );
    }

    log::info!(
        "Calculating ASL index for {} timesteps: sector {} ({} x {} cells, {} ocean), refinement {}",
        stack.len(),
        sector,
        selection.rows.len(),
        selection.cols.len(),
        ocean_cells,
        options.refinement
    );

    // --- Step 2: Per-timestep detection ---
    let run = || -> Result<Vec<DetectionResult>> {
        stack
            .fields
            .par_iter()
            .map(|field| detect_or_flag(&selection, &ocean, field, options.refinement))
            .collect()
    };

    let results = match options.n_jobs {
        None => run()?,
        Some(0) => {
            return Err(AsliError::Configuration(
                "number of jobs must be at least 1".to_string(),
            ));
        }
        Some(n_jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n_jobs)
                .build()
                .map_err(|e| {
                    AsliError::Configuration(format!("failed to build worker pool: {}", e))
                })?;
            pool.install(run)?
        }
    };

    // --- Step 3: Assemble the ordered series ---
    let series = AslTimeSeries::new(
        SeriesHeader::new(*sector, options.refinement, stack.unit),
        results,
    );

    log::info!(
        "ASL index done: {} rows ({} flagged, {} boundary-limited) in {:?}",
        series.len(),
        series.flagged_count(),
        series.boundary_limited_count(),
        start_time.elapsed()
    );

    Ok(series)
}

/// Runs detection for one field, turning missing data into a flagged row.
fn detect_or_flag(
    selection: &SectorSelection,
    ocean: &Array2<bool>,
    field: &SlpField,
    method: RefinementMethod,
) -> Result<DetectionResult> {
    match detect_timestep(selection, ocean, field, method) {
        Ok(result) => Ok(result),
        Err(AsliError::InsufficientData { time, reason }) => {
            log::warn!("No ASL detected for {}: {}", TimeUtils::date_label(&time), reason);
            Ok(DetectionResult::missing(time))
        }
        Err(e) => Err(e),
    }
}

/// Detection for a single timestep: extract, mask, locate, index.
pub fn detect_timestep(
    selection: &SectorSelection,
    ocean: &Array2<bool>,
    field: &SlpField,
    method: RefinementMethod,
) -> Result<DetectionResult> {
    let sector_field = selection.extract_field(field);
    let masked = apply_mask(sector_field, ocean)?;
    let minimum = locate_minimum(&masked, method)?;
    let index = relative_index(&masked, minimum.value)?;

    let result = DetectionResult::detected(
        field.time,
        &minimum,
        &index,
        selection.grid_index(minimum.local_index),
    );

    if PRINT_TIMESTEP_DETECTIONS {
        log::info!(
            "{}: {} at ({:.2}, {:.2}) ActCenPres {:.2} SectorPres {:.2} RelCenPres {:.2}",
            TimeUtils::date_label(&result.time),
            result.status,
            result.lon,
            result.lat,
            result.act_cen_pres,
            result.sector_pres,
            result.rel_cen_pres
        );
    } else if result.is_boundary_limited() {
        log::debug!(
            "{}: minimum on sector edge, refinement skipped",
            TimeUtils::date_label(&result.time)
        );
    }

    Ok(result)
}
