//! Geographic bounds of the Amundsen Sea sector

use crate::domain::Sector;

/// Bounds of the Amundsen Sea region (degrees east / degrees north).
pub const ASL_WEST: f64 = 170.0;
pub const ASL_EAST: f64 = 298.0;
pub const ASL_SOUTH: f64 = -80.0;
pub const ASL_NORTH: f64 = -60.0;

pub const ASL_REGION: Sector = Sector {
    west: ASL_WEST,
    east: ASL_EAST,
    south: ASL_SOUTH,
    north: ASL_NORTH,
};
