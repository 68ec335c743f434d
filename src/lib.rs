#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod utils;

// The calculation pipeline
pub mod engine;

// Re-export commonly used types
pub use analysis::RefinementMethod;
pub use domain::{LandSeaMask, LatLonGrid, PressureUnit, Sector, SlpField, SlpStack};
pub use engine::{CalculationOptions, calculate, calculate_with};
pub use error::{AsliError, Result};
pub use models::{AslTimeSeries, DetectionResult, DetectionStatus};

// CLI argument parsing
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Amundsen Sea Low index calculation", long_about = None)]
pub struct Cli {
    /// Monthly mean sea-level pressure stack (bincode cache)
    #[arg(long)]
    pub stack: Option<PathBuf>,

    /// Land-sea mask on the same grid (bincode cache)
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Where to write the JSON series
    #[arg(short, long, default_value = "asli.json")]
    pub output: PathBuf,

    /// Sub-grid placement of the low centre
    #[arg(long, value_enum, default_value_t = RefinementMethod::Quadratic)]
    pub refinement: RefinementMethod,

    /// Worker threads (defaults to one per core)
    #[arg(short = 'j', long)]
    pub jobs: Option<usize>,

    /// Override the ASL sector: WEST EAST SOUTH NORTH in degrees
    #[arg(
        long,
        num_args = 4,
        value_names = ["WEST", "EAST", "SOUTH", "NORTH"],
        allow_negative_numbers = true
    )]
    pub sector: Option<Vec<f64>>,

    /// Average months into seasons (MAM, JJA, SON, DJF) before detection
    #[arg(long, default_value_t = false)]
    pub season: bool,

    /// Fall back to synthetic demo fields when no cache is found
    #[arg(long, default_value_t = false)]
    pub demo: bool,
}

impl Cli {
    /// Sector from `--sector`, or the standard ASL region.
    pub fn sector(&self) -> Result<Sector> {
        match self.sector.as_deref() {
            Some(&[west, east, south, north]) => Sector::new(west, east, south, north),
            Some(other) => Err(AsliError::Configuration(format!(
                "--sector takes 4 values, got {}",
                other.len()
            ))),
            None => Ok(config::ASL_REGION),
        }
    }

    pub fn options(&self) -> CalculationOptions {
        CalculationOptions {
            refinement: self.refinement,
            n_jobs: self.jobs,
        }
    }
}
