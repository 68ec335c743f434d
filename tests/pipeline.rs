use chrono::{Datelike, NaiveDate, NaiveDateTime};
use ndarray::Array2;

use asli::analysis::{SectorSelection, seasonal_means};
use asli::config::ASL_REGION;
use asli::data::synthetic::{SyntheticConfig, antarctic_mask, low_centre, monthly_stack};
use asli::data::{MaskFile, StackFile};
use asli::domain::{LandSeaMask, LatLonGrid, PressureUnit, Sector, SlpField, SlpStack};
use asli::{CalculationOptions, DetectionStatus, RefinementMethod, calculate, calculate_with};

fn month(year: i32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, m, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// 1 degree grid, 60S..70S, on the [-180, 180) convention
fn dateline_grid() -> LatLonGrid {
    LatLonGrid::regular(-60.0, -1.0, 11, -180.0, 1.0, 360).unwrap()
}

/// Background of 1000 hPa with a symmetric low at (row, col)
fn field_with_low(grid: &LatLonGrid, time: NaiveDateTime, row: usize, col: usize) -> SlpField {
    let mut values = Array2::from_elem(grid.shape(), 1000.0);
    values[[row, col]] = 985.0;
    values[[row - 1, col]] = 990.0;
    values[[row + 1, col]] = 990.0;
    values[[row, col - 1]] = 990.0;
    values[[row, col + 1]] = 990.0;
    SlpField::new(time, values)
}

#[test]
fn test_synthetic_asl_tracks_low_centre() {
    let config = SyntheticConfig::default();
    let stack = monthly_stack(&config).unwrap();
    let mask = antarctic_mask(&stack.grid).unwrap();
    let stack = stack.to_hpa();

    let series = calculate(&ASL_REGION, &mask, &stack).unwrap();
    assert_eq!(series.len(), 24);
    assert_eq!(series.flagged_count(), 0);

    for row in series.rows() {
        let (centre_lon, centre_lat) = low_centre(row.time.month());
        // Signed output convention: 240E is reported as -120
        let expected_lon = centre_lon - 360.0;
        assert_eq!(row.status, DetectionStatus::Detected);
        assert!((row.lon - expected_lon).abs() <= config.resolution, "{:?}", row);
        assert!((row.lat - centre_lat).abs() <= config.resolution, "{:?}", row);
        assert!(row.act_cen_pres < 976.0);
        assert!(row.rel_cen_pres < 0.0);
        assert_eq!(row.rel_cen_pres, row.act_cen_pres - row.sector_pres);
    }

    assert_eq!(series.for_year(1980).len(), 12);
    assert_eq!(series.header.sector, ASL_REGION);
    assert_eq!(series.header.pressure_unit, PressureUnit::HPa);
}

#[test]
fn test_sector_straddling_dateline() {
    let grid = dateline_grid();
    let sector = Sector::new(170.0, -170.0, -70.0, -60.0).unwrap();

    let selection = SectorSelection::new(&grid, &sector).unwrap();
    assert_eq!(selection.cols.len(), 21);
    assert_eq!(selection.lons.first(), Some(&170.0));
    assert_eq!(selection.lons.last(), Some(&190.0));
    assert!(selection.lons.windows(2).all(|w| w[1] > w[0]));

    // Column 5 is 175W, column 352 is 172E
    let stack = SlpStack::new(
        grid.clone(),
        PressureUnit::HPa,
        vec![
            field_with_low(&grid, month(2001, 1), 5, 5),
            field_with_low(&grid, month(2001, 2), 5, 352),
        ],
    )
    .unwrap();

    let series = calculate(&sector, &LandSeaMask::all_ocean(grid), &stack).unwrap();
    let rows = series.rows();

    assert_eq!(rows[0].status, DetectionStatus::Detected);
    assert_eq!(rows[0].lon, -175.0);
    assert_eq!(rows[0].lat, -65.0);
    assert_eq!(rows[0].grid_index, Some((5, 5)));

    assert_eq!(rows[1].lon, 172.0);
    assert_eq!(rows[1].grid_index, Some((5, 352)));

    // Both fields have the same cell values, so the sector means agree
    assert_eq!(rows[0].sector_pres, rows[1].sector_pres);
}

#[test]
fn test_sector_straddling_greenwich() {
    // 1 degree grid on the [0, 360) convention
    let grid = LatLonGrid::regular(-60.0, -1.0, 11, 0.0, 1.0, 360).unwrap();
    let sector = Sector::new(350.0, 10.0, -70.0, -60.0).unwrap();

    let selection = SectorSelection::new(&grid, &sector).unwrap();
    let expected_cols: Vec<usize> = (350..360).chain(0..=10).collect();
    assert_eq!(selection.cols, expected_cols);
    assert_eq!(selection.lons.first(), Some(&350.0));
    assert_eq!(selection.lons.last(), Some(&370.0));

    // Low centred at 359.9E, nearest node is 0E
    let values = Array2::from_shape_fn(grid.shape(), |(i, j)| {
        let d = (grid.lons[j] - 359.9 + 540.0).rem_euclid(360.0) - 180.0;
        980.0 + (i as f64 - 5.0).powi(2) + d * d
    });
    let stack = SlpStack::new(
        grid.clone(),
        PressureUnit::HPa,
        vec![SlpField::new(month(2001, 1), values)],
    )
    .unwrap();

    let series = calculate(&sector, &LandSeaMask::all_ocean(grid), &stack).unwrap();
    let row = &series.rows()[0];
    assert_eq!(row.status, DetectionStatus::Detected);
    assert_eq!(row.grid_index, Some((5, 0)));
    assert_eq!(row.lat, -65.0);
    assert!((row.lon - 359.9).abs() < 1e-9, "{:?}", row);
}

#[test]
fn test_repeated_wrap_column_counted_once() {
    // lons 0..=360, the last column repeats the first
    let grid = LatLonGrid::regular(-60.0, -1.0, 3, 0.0, 1.0, 361).unwrap();
    let sector = Sector::new(359.0, 1.0, -62.0, -60.0).unwrap();
    let mut values = Array2::from_elem(grid.shape(), 1000.0);
    values[[1, 0]] = 970.0;
    values[[1, 360]] = 970.0;
    let stack = SlpStack::new(
        grid.clone(),
        PressureUnit::HPa,
        vec![SlpField::new(month(2001, 1), values)],
    )
    .unwrap();

    let series = calculate(&sector, &LandSeaMask::all_ocean(grid), &stack).unwrap();
    let row = &series.rows()[0];
    assert_eq!(row.status, DetectionStatus::Detected);
    assert_eq!(row.lon, 0.0);
    assert_eq!(row.grid_index, Some((1, 0)));
    // 9 distinct cells: eight at 1000 and one at 970
    assert!((row.sector_pres - 8970.0 / 9.0).abs() < 1e-9, "{:?}", row);
}

#[test]
fn test_full_circle_sector_refines_at_first_column() {
    let grid = dateline_grid();
    let sector = Sector::new(-180.0, 180.0, -70.0, -60.0).unwrap();
    // Low centred at 179.8E, nearest node is -180
    let values = Array2::from_shape_fn(grid.shape(), |(i, j)| {
        let d = (grid.lons[j] - 179.8 + 540.0).rem_euclid(360.0) - 180.0;
        980.0 + (i as f64 - 5.0).powi(2) + d * d
    });
    let stack = SlpStack::new(
        grid.clone(),
        PressureUnit::HPa,
        vec![SlpField::new(month(2001, 1), values)],
    )
    .unwrap();

    let series = calculate(&sector, &LandSeaMask::all_ocean(grid), &stack).unwrap();
    let row = &series.rows()[0];
    assert_eq!(row.status, DetectionStatus::Detected);
    assert_eq!(row.grid_index, Some((5, 0)));
    assert!((row.lon - 179.8).abs() < 1e-9, "{:?}", row);
    assert_eq!(series.boundary_limited_count(), 0);
}

#[test]
fn test_minimum_on_sector_edge_is_boundary_limited() {
    let grid = dateline_grid();
    let sector = Sector::new(170.0, -170.0, -70.0, -61.0).unwrap();
    let mut values = Array2::from_elem(grid.shape(), 1000.0);
    // Row 1 is 61S, the northern edge of the sector
    values[[1, 355]] = 980.0;
    values[[2, 355]] = 985.0;
    values[[1, 354]] = 990.0;
    let stack = SlpStack::new(
        grid.clone(),
        PressureUnit::HPa,
        vec![SlpField::new(month(2001, 1), values)],
    )
    .unwrap();

    let series = calculate(&sector, &LandSeaMask::all_ocean(grid), &stack).unwrap();
    let row = &series.rows()[0];
    assert_eq!(row.status, DetectionStatus::BoundaryLimited);
    assert_eq!(row.lat, -61.0);
    assert_eq!(row.lon, 175.0);
    assert_eq!(row.act_cen_pres, 980.0);
    assert_eq!(series.boundary_limited_count(), 1);
}

#[test]
fn test_seasonal_run() {
    let stack = monthly_stack(&SyntheticConfig::default()).unwrap();
    let mask = antarctic_mask(&stack.grid).unwrap();
    let seasonal = seasonal_means(&stack.to_hpa());

    // DJF 1978/79 through DJF 1980/81
    assert_eq!(seasonal.len(), 9);
    assert_eq!(seasonal.fields[0].time, month(1978, 12));

    let options = CalculationOptions {
        refinement: RefinementMethod::GridCell,
        n_jobs: Some(2),
    };
    let series = calculate_with(&ASL_REGION, &mask, &seasonal, &options).unwrap();
    assert_eq!(series.len(), 9);
    assert!(series.iter().all(|r| r.is_valid()));
    assert_eq!(series.header.refinement, RefinementMethod::GridCell);
}

#[test]
fn test_cached_inputs_give_identical_series() {
    let dir = tempfile::tempdir().unwrap();
    let stack_path = dir.path().join("stack.bin");
    let mask_path = dir.path().join("mask.bin");

    let config = SyntheticConfig {
        n_years: 1,
        ..Default::default()
    };
    let stack = monthly_stack(&config).unwrap().to_hpa();
    let mask = antarctic_mask(&stack.grid).unwrap();
    StackFile::new(stack.clone()).save_to_path(&stack_path).unwrap();
    MaskFile::new(mask.clone()).save_to_path(&mask_path).unwrap();

    let loaded_stack = StackFile::load_from_path(&stack_path).unwrap().data;
    let loaded_mask = MaskFile::load_from_path(&mask_path).unwrap().data;

    let direct = calculate(&ASL_REGION, &mask, &stack).unwrap();
    let cached = calculate(&ASL_REGION, &loaded_mask, &loaded_stack).unwrap();
    assert!(direct.bit_eq(&cached));
}
