use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::AslTimeSeries;

/// JSON document written for downstream CSV/plotting tools.
/// Missing values (flagged rows) serialize as `null`.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SeriesDocument {
    pub generated_at: String,
    pub series: AslTimeSeries,
}

impl SeriesDocument {
    pub fn new(series: AslTimeSeries) -> Self {
        Self {
            generated_at: Utc::now().to_rfc3339(),
            series,
        }
    }
}

pub fn save_series_json(path: &Path, series: &AslTimeSeries) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
    }
    let file = File::create(path).context(format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &SeriesDocument::new(series.clone()))
        .context(format!("Failed to write series to: {}", path.display()))
}

pub fn load_series_json(path: &Path) -> Result<serde_json::Value> {
    let file = File::open(path).context(format!("Failed to open series file: {:?}", path))?;
    serde_json::from_reader(BufReader::new(file))
        .context(format!("Failed to parse series file: {:?}", path))
}
