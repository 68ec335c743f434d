//! Configuration module for the ASL index calculation.

pub mod detection;

mod debug; // Private, flags are re-exported below
pub use debug::{
    PRINT_REFINEMENT_OFFSETS, PRINT_SECTOR_SELECTION, PRINT_SERDE, PRINT_TIMESTEP_DETECTIONS,
};

pub mod persistence;
pub mod region;
pub mod version;

// Re-export commonly used items
pub use detection::{DETECTION, DetectionConfig};
pub use persistence::{
    CACHE_VERSION, DATA_PATH, MASK_FILENAME_WITHOUT_EXT, STACK_FILENAME_WITHOUT_EXT,
    mask_cache_filename, stack_cache_filename,
};
pub use region::{ASL_EAST, ASL_NORTH, ASL_REGION, ASL_SOUTH, ASL_WEST};
pub use version::{CALCULATION_VERSION, SOFTWARE_VERSION};
