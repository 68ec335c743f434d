// Per-timestep detection stages, applied in order:
// sector extraction -> land masking -> minimum search -> relative index
pub mod grid_mask;
pub mod minimum_locator;
pub mod relative_index;
pub mod season;
pub mod sector_extractor;

// Re-export commonly used types
pub use grid_mask::{MaskedSector, apply_mask};
pub use minimum_locator::{LocatedMinimum, RefinementMethod, locate_minimum};
pub use relative_index::{RelativeIndex, relative_index, sector_mean};
pub use season::{Season, seasonal_means};
pub use sector_extractor::{SectorField, SectorSelection, extract_sector};
