use chrono::NaiveDateTime;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::domain::LatLonGrid;
use crate::error::{AsliError, Result};

/// Unit of the pressure values in a stack. One unit applies to a whole run.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize, strum_macros::Display,
)]
pub enum PressureUnit {
    #[default]
    #[strum(to_string = "Pa")]
    Pa,
    #[strum(to_string = "hPa")]
    HPa,
}

/// One timestep of sea-level pressure, shaped `(n_lat, n_lon)` on the stack's grid.
/// NaN marks missing data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SlpField {
    pub time: NaiveDateTime,
    pub values: Array2<f64>,
}

impl SlpField {
    pub fn new(time: NaiveDateTime, values: Array2<f64>) -> Self {
        Self { time, values }
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        self.values.dim()
    }
}

/// Time-indexed pressure fields sharing one coordinate grid.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SlpStack {
    pub grid: LatLonGrid,
    pub unit: PressureUnit,
    pub fields: Vec<SlpField>,
}

impl SlpStack {
    pub fn new(grid: LatLonGrid, unit: PressureUnit, fields: Vec<SlpField>) -> Result<Self> {
        let stack = SlpStack { grid, unit, fields };
        stack.validate()?;
        Ok(stack)
    }

    /// Checks the grid and that every field is shaped like it.
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        let expected = self.grid.shape();
        if let Some(field) = self.fields.iter().find(|f| f.shape() != expected) {
            return Err(AsliError::GridMismatch(format!(
                "field at {} has shape {:?}, grid has shape {:?}",
                field.time,
                field.shape(),
                expected
            )));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn times(&self) -> Vec<NaiveDateTime> {
        self.fields.iter().map(|f| f.time).collect()
    }

    /// Copy of the stack with values in hPa.
    pub fn to_hpa(&self) -> SlpStack {
        match self.unit {
            PressureUnit::HPa => self.clone(),
            PressureUnit::Pa => SlpStack {
                grid: self.grid.clone(),
                unit: PressureUnit::HPa,
                fields: self
                    .fields
                    .iter()
                    .map(|f| SlpField::new(f.time, f.values.mapv(|v| v / 100.0)))
                    .collect(),
            },
        }
    }
}
