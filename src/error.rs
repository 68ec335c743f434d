use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors raised by the detection pipeline.
///
/// `Configuration` and `GridMismatch` describe a broken setup and abort a run
/// before any timestep is processed. `InsufficientData` belongs to a single
/// timestep and is turned into a flagged row by the series builder.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AsliError {
    /// Invalid sector bounds, or a sector that does not intersect the grid
    #[error("configuration error: {0}")]
    Configuration(String),
    /// Land-sea mask or field geometry does not match the pressure grid
    #[error("grid mismatch: {0}")]
    GridMismatch(String),
    /// No valid ocean cell left in the sector for one timestep
    #[error("insufficient data at {time}: {reason}")]
    InsufficientData { time: NaiveDateTime, reason: String },
}

impl AsliError {
    /// True for errors that must stop a multi-timestep calculation.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AsliError::InsufficientData { .. })
    }
}

pub type Result<T> = std::result::Result<T, AsliError>;
