//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so runs
//! over decades of monthly fields stay quiet.

/// Emit one line per detected timestep (position, pressures, status).
pub const PRINT_TIMESTEP_DETECTIONS: bool = false;

/// Emit the sector column/row selection computed for a run.
pub const PRINT_SECTOR_SELECTION: bool = false;

/// Emit per-axis sub-grid refinement offsets.
pub const PRINT_REFINEMENT_OFFSETS: bool = false;

/// Emit cache file load/save details.
pub const PRINT_SERDE: bool = false;
