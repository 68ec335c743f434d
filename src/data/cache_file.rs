use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{
    CACHE_VERSION, DATA_PATH, PRINT_SERDE, mask_cache_filename, stack_cache_filename,
};
use crate::domain::{LandSeaMask, SlpStack};

/// Serialized cache wrapper for pre-converted input data.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CacheFile<T> {
    pub version: f64,
    pub timestamp_ms: i64,
    pub data: T,
}

/// Pressure stack converted from the reanalysis download.
pub type StackFile = CacheFile<SlpStack>;
/// Land-sea mask on the same grid as the stack.
pub type MaskFile = CacheFile<LandSeaMask>;

impl<T> CacheFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(data: T) -> Self {
        Self {
            version: CACHE_VERSION,
            timestamp_ms: Utc::now().timestamp_millis(),
            data,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open cache file: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let cache: Self = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize cache: {:?}", path))?;
        if cache.version != CACHE_VERSION {
            bail!(
                "Cache {:?} has format version {}, expected {}",
                path,
                cache.version,
                CACHE_VERSION
            );
        }
        if PRINT_SERDE {
            log::info!(
                "Loaded cache {:?} (v{}, written at {} ms)",
                path,
                cache.version,
                cache.timestamp_ms
            );
        }
        Ok(cache)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize cache to: {}", path.display()))
    }
}

impl StackFile {
    pub fn default_cache_path(label: &str) -> PathBuf {
        PathBuf::from(DATA_PATH).join(stack_cache_filename(label))
    }
}

impl MaskFile {
    pub fn default_cache_path() -> PathBuf {
        PathBuf::from(DATA_PATH).join(mask_cache_filename())
    }
}
