//! File persistence and serialization configuration

/// Directory path for storing converted pressure stacks and masks
pub const DATA_PATH: &str = "data";

/// Base filenames for cache files (without extension)
pub const STACK_FILENAME_WITHOUT_EXT: &str = "msl_stack";
pub const MASK_FILENAME_WITHOUT_EXT: &str = "lsm";

/// Current version of the cache serialization format
pub const CACHE_VERSION: f64 = 1.0;

/// Generate the cache filename for a stack or mask
/// Example: "msl_stack_monthly_v1.bin" or "lsm_v1.bin"
pub fn stack_cache_filename(label: &str) -> String {
    format!(
        "{}_{}_v{}.bin",
        STACK_FILENAME_WITHOUT_EXT, label, CACHE_VERSION
    )
}

pub fn mask_cache_filename() -> String {
    format!("{}_v{}.bin", MASK_FILENAME_WITHOUT_EXT, CACHE_VERSION)
}
