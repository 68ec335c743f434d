//! Geographic search region for the low
//!
//! Longitudes may be written in either the [-180, 180] or [0, 360] convention.
//! The box runs eastwards from `west` to `east`, so `west = 170, east = -170`
//! is a 20 degree sector straddling the dateline, while `west = 170, east = 298`
//! is the 128 degree Amundsen Sea box.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::DETECTION;
use crate::domain::{LonConvention, normalize_lon};
use crate::error::{AsliError, Result};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl Default for Sector {
    fn default() -> Self {
        crate::config::ASL_REGION
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "W:{} E:{} S:{} N:{}",
            self.west, self.east, self.south, self.north
        )
    }
}

impl Sector {
    pub fn new(west: f64, east: f64, south: f64, north: f64) -> Result<Self> {
        let sector = Sector {
            west,
            east,
            south,
            north,
        };
        sector.validate()?;
        Ok(sector)
    }

    pub fn validate(&self) -> Result<()> {
        let bounds = [self.west, self.east, self.south, self.north];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(AsliError::Configuration(format!(
                "sector {} has non-finite bounds",
                self
            )));
        }
        if self.south < -90.0 || self.north > 90.0 {
            return Err(AsliError::Configuration(format!(
                "sector {} latitudes outside [-90, 90]",
                self
            )));
        }
        if self.south >= self.north {
            return Err(AsliError::Configuration(format!(
                "sector {} has south >= north",
                self
            )));
        }
        if self.lon_span() == 0.0 {
            return Err(AsliError::Configuration(format!(
                "sector {} has zero longitude width",
                self
            )));
        }
        Ok(())
    }

    /// Eastward extent in degrees, in (0, 360]. Zero for a degenerate sector.
    pub fn lon_span(&self) -> f64 {
        let raw = self.east - self.west;
        if raw.abs() >= 360.0 {
            360.0
        } else {
            raw.rem_euclid(360.0)
        }
    }

    /// Eastward distance of `lon` from the western edge, in [0, 360).
    /// Longitudes a hair west of the edge count as on it.
    pub fn lon_offset(&self, lon: f64) -> f64 {
        let tol = DETECTION.bounds_tolerance_deg;
        let offset = (lon - self.west).rem_euclid(360.0);
        if 360.0 - offset <= tol { 0.0 } else { offset }
    }

    pub fn contains_lon(&self, lon: f64) -> bool {
        lon.is_finite() && self.lon_offset(lon) <= self.lon_span() + DETECTION.bounds_tolerance_deg
    }

    pub fn contains_lat(&self, lat: f64) -> bool {
        let tol = DETECTION.bounds_tolerance_deg;
        lat >= self.south - tol && lat <= self.north + tol
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.contains_lon(lon) && self.contains_lat(lat)
    }

    /// True when the box crosses the 0/360 meridian (for [0, 360] grids) or the
    /// dateline (for [-180, 180] grids), i.e. where the coordinate array jumps.
    pub fn crosses_seam(&self, convention: LonConvention) -> bool {
        if self.lon_span() >= 360.0 {
            return true;
        }
        let upper = match convention {
            LonConvention::Signed => 180.0,
            LonConvention::Positive => 360.0,
        };
        normalize_lon(self.west, convention) + self.lon_span() > upper
    }

    /// Box grown by `border` degrees on every side, latitudes clamped to the poles.
    /// Used to describe the data-request or plotting area around the sector.
    pub fn expanded(&self, border: f64) -> Sector {
        let south = (self.south - border).max(-90.0);
        let north = (self.north + border).min(90.0);
        if self.lon_span() + 2.0 * border >= 360.0 {
            return Sector {
                west: self.west - border,
                east: self.west - border + 360.0,
                south,
                north,
            };
        }
        Sector {
            west: self.west - border,
            east: self.east + border,
            south,
            north,
        }
    }

    /// The default request area: the sector plus the configured border.
    pub fn request_area(&self) -> Sector {
        self.expanded(DETECTION.request_border_deg)
    }
}
