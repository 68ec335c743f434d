pub mod pipeline;

// Re-export key components
pub use pipeline::{CalculationOptions, calculate, calculate_with, detect_timestep};
