// Input caches, series output and synthetic demo data
pub mod cache_file;
pub mod series_file;
pub mod synthetic;

// Re-export commonly used types
pub use cache_file::{CacheFile, MaskFile, StackFile};
pub use series_file::{SeriesDocument, load_series_json, save_series_json};
pub use synthetic::{SyntheticConfig, antarctic_mask, monthly_stack, southern_grid};
