// Output records of the index calculation

pub mod detection;
pub mod timeseries;

// Re-export key types for convenience
pub use detection::{DetectionResult, DetectionStatus};
pub use timeseries::{AslTimeSeries, SeriesHeader};
