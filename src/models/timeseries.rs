use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::analysis::RefinementMethod;
use crate::config::{CALCULATION_VERSION, SOFTWARE_VERSION};
use crate::domain::{PressureUnit, Sector};
use crate::models::detection::DetectionResult;
use crate::utils::TimeUtils;

/// Settings a series was calculated with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SeriesHeader {
    pub software_version: String,
    pub calculation_version: String,
    pub sector: Sector,
    pub refinement: RefinementMethod,
    pub pressure_unit: PressureUnit,
}

impl SeriesHeader {
    pub fn new(sector: Sector, refinement: RefinementMethod, pressure_unit: PressureUnit) -> Self {
        Self {
            software_version: SOFTWARE_VERSION.to_string(),
            calculation_version: CALCULATION_VERSION.to_string(),
            sector,
            refinement,
            pressure_unit,
        }
    }
}

/// The ASL index: one detection row per timestep, sorted by time.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AslTimeSeries {
    pub header: SeriesHeader,
    results: Vec<DetectionResult>,
}

impl AslTimeSeries {
    /// Builds the series, ordering rows by time. Rows with equal timestamps
    /// keep their input order.
    pub fn new(header: SeriesHeader, mut results: Vec<DetectionResult>) -> Self {
        results.sort_by(|a, b| a.time.cmp(&b.time));
        Self { header, results }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// All rows, one per timestep, in a stable named-field layout.
    pub fn rows(&self) -> &[DetectionResult] {
        &self.results
    }

    pub fn iter(&self) -> impl Iterator<Item = &DetectionResult> {
        self.results.iter()
    }

    pub fn valid(&self) -> impl Iterator<Item = &DetectionResult> {
        self.results.iter().filter(|r| r.is_valid())
    }

    pub fn flagged_count(&self) -> usize {
        self.results.iter().filter(|r| !r.is_valid()).count()
    }

    pub fn boundary_limited_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_boundary_limited()).count()
    }

    pub fn times(&self) -> Vec<NaiveDateTime> {
        self.results.iter().map(|r| r.time).collect()
    }

    /// Rows of one calendar year, e.g. for a 12-panel monthly plot.
    pub fn for_year(&self, year: i32) -> Vec<&DetectionResult> {
        self.results
            .iter()
            .filter(|r| TimeUtils::year_of(&r.time) == year)
            .collect()
    }

    /// Bitwise equality of header and every row.
    pub fn bit_eq(&self, other: &AslTimeSeries) -> bool {
        self.header == other.header
            && self.results.len() == other.results.len()
            && self
                .results
                .iter()
                .zip(other.results.iter())
                .all(|(a, b)| a.bit_eq(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn month(year: i32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, m, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_rows_sorted_and_year_filter() {
        let header = SeriesHeader::new(
            Sector::default(),
            RefinementMethod::Quadratic,
            PressureUnit::HPa,
        );
        let rows = vec![
            DetectionResult::missing(month(1981, 2)),
            DetectionResult::missing(month(1980, 12)),
            DetectionResult::missing(month(1981, 1)),
        ];
        let series = AslTimeSeries::new(header, rows);
        assert_eq!(
            series.times(),
            vec![month(1980, 12), month(1981, 1), month(1981, 2)]
        );
        assert_eq!(series.for_year(1981).len(), 2);
        assert_eq!(series.flagged_count(), 3);
        assert_eq!(series.valid().count(), 0);
        assert_eq!(series.header.calculation_version, "3.20210820");
    }
}
