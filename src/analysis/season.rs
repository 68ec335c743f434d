//! Seasonal aggregation of monthly pressure fields.
//!
//! Seasons are the meteorological quarters starting in March: MAM, JJA, SON
//! and DJF, where December belongs to the DJF season that ends in the
//! following February. Each seasonal field is the cell-wise mean of the
//! monthly fields that fall in it (NaN cells skipped) and is stamped with the
//! first day of the season.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use crate::domain::{SlpField, SlpStack};
use crate::utils::TimeUtils;

#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    strum_macros::EnumIter,
    strum_macros::Display,
)]
#[allow(clippy::upper_case_acronyms)]
pub enum Season {
    MAM,
    JJA,
    SON,
    DJF,
}

impl Season {
    pub fn of_month(month: u32) -> Season {
        match month {
            3..=5 => Season::MAM,
            6..=8 => Season::JJA,
            9..=11 => Season::SON,
            _ => Season::DJF,
        }
    }

    pub fn start_month(&self) -> u32 {
        match self {
            Season::MAM => 3,
            Season::JJA => 6,
            Season::SON => 9,
            Season::DJF => 12,
        }
    }

    /// First day of the season containing `date`.
    pub fn start_of(date: NaiveDate) -> Option<NaiveDate> {
        let season = Season::of_month(date.month());
        let year = if date.month() < 3 {
            date.year() - 1
        } else {
            date.year()
        };
        NaiveDate::from_ymd_opt(year, season.start_month(), 1)
    }
}

/// Seasonal mean fields of a monthly stack, ordered by season start.
pub fn seasonal_means(stack: &SlpStack) -> SlpStack {
    let mut groups: BTreeMap<NaiveDate, Vec<&SlpField>> = BTreeMap::new();
    for field in &stack.fields {
        match Season::start_of(field.time.date()) {
            Some(start) => groups.entry(start).or_default().push(field),
            None => log::warn!("Skipping field at {}: no season start date", field.time),
        }
    }

    let fields = groups
        .into_iter()
        .map(|(start, members)| {
            SlpField::new(TimeUtils::start_of_day(start), nan_mean(&members, stack.grid.shape()))
        })
        .collect::<Vec<_>>();

    log::info!(
        "Aggregated {} monthly fields into {} seasonal fields",
        stack.len(),
        fields.len()
    );

    SlpStack {
        grid: stack.grid.clone(),
        unit: stack.unit,
        fields,
    }
}

fn nan_mean(members: &[&SlpField], shape: (usize, usize)) -> Array2<f64> {
    let mut sum = Array2::<f64>::zeros(shape);
    let mut count = Array2::<u32>::zeros(shape);
    for field in members {
        Zip::from(&mut sum)
            .and(&mut count)
            .and(&field.values)
            .for_each(|s, c, &v| {
                if v.is_finite() {
                    *s += v;
                    *c += 1;
                }
            });
    }
    Zip::from(&sum)
        .and(&count)
        .map_collect(|&s, &c| if c > 0 { s / c as f64 } else { f64::NAN })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LatLonGrid, PressureUnit};
    use chrono::NaiveDateTime;
    use ndarray::array;

    fn month(year: i32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, m, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_season_start() {
        let d = |y, m| NaiveDate::from_ymd_opt(y, m, 15).unwrap();
        let s = |y, m| NaiveDate::from_ymd_opt(y, m, 1);
        assert_eq!(Season::start_of(d(1980, 1)), s(1979, 12));
        assert_eq!(Season::start_of(d(1980, 2)), s(1979, 12));
        assert_eq!(Season::start_of(d(1980, 3)), s(1980, 3));
        assert_eq!(Season::start_of(d(1980, 8)), s(1980, 6));
        assert_eq!(Season::start_of(d(1980, 11)), s(1980, 9));
        assert_eq!(Season::start_of(d(1980, 12)), s(1980, 12));
        assert_eq!(Season::of_month(12), Season::DJF);
    }

    #[test]
    fn test_seasonal_means() {
        let grid = LatLonGrid::regular(-60.0, -1.0, 1, 170.0, 1.0, 2).unwrap();
        let fields = vec![
            SlpField::new(month(1980, 1), Array2::from_elem((1, 2), 990.0)),
            SlpField::new(month(1980, 2), Array2::from_elem((1, 2), 1000.0)),
            SlpField::new(month(1980, 3), Array2::from_elem((1, 2), 980.0)),
            SlpField::new(month(1980, 4), array![[990.0, f64::NAN]]),
            SlpField::new(month(1980, 5), array![[1000.0, f64::NAN]]),
        ];
        let stack = SlpStack::new(grid, PressureUnit::HPa, fields).unwrap();

        let seasonal = seasonal_means(&stack);
        assert_eq!(seasonal.len(), 2);
        assert_eq!(seasonal.fields[0].time, month(1979, 12));
        assert_eq!(seasonal.fields[0].values[[0, 0]], 995.0);
        assert_eq!(seasonal.fields[1].time, month(1980, 3));
        assert_eq!(seasonal.fields[1].values[[0, 0]], 990.0);
        assert_eq!(seasonal.fields[1].values[[0, 1]], 980.0);
        assert_eq!(seasonal.unit, PressureUnit::HPa);
    }
}
