// Domain types and value objects
pub mod field;
pub mod grid;
pub mod mask;
pub mod sector;

// Re-export commonly used types
pub use field::{PressureUnit, SlpField, SlpStack};
pub use grid::{LatLonGrid, LonConvention, normalize_lon};
pub use mask::LandSeaMask;
pub use sector::Sector;
