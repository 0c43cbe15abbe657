//! Land filter: decides whether a cell is worth querying.

use crate::grid;
use crate::land::RegionTest;
use crate::models::{Cell, TestCoordinate};

/// Result of checking one cell against the land reference.
#[derive(Debug, Clone, PartialEq)]
pub struct LandCheck {
    pub is_land: bool,
    /// All candidate samples of the cell, whether or not the scan stopped early.
    pub test_coordinates: Vec<TestCoordinate>,
    /// Index of the sample that matched, if any.
    pub matched: Option<usize>,
}

/// Index of the first coordinate inside the region. Stops at the first hit,
/// so land touching only a later sample is still found but land touching
/// none of them is missed.
pub fn first_on_land<R>(region: &R, coords: &[TestCoordinate]) -> Option<usize>
where
    R: RegionTest + ?Sized,
{
    for (idx, coord) in coords.iter().enumerate() {
        if region.contains(coord.lon, coord.lat) {
            return Some(idx);
        }
    }
    None
}

/// Generate the samples for `cell` and check them against `region`.
pub fn check_cell<R>(region: &R, cell: &Cell) -> LandCheck
where
    R: RegionTest + ?Sized,
{
    let test_coordinates = grid::test_coordinates(cell);
    let matched = first_on_land(region, &test_coordinates);
    LandCheck {
        is_land: matched.is_some(),
        test_coordinates,
        matched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as Counter;

    #[test]
    fn stops_at_first_match() {
        let calls = Counter::new(0usize);
        // Only the second sample (lon+0.25, lat+0.5) is on land.
        let region = |lon: f64, lat: f64| {
            calls.set(calls.get() + 1);
            lon == 0.25 && lat == 0.5
        };

        let check = check_cell(&region, &Cell::new(0, 0));
        assert!(check.is_land);
        assert_eq!(check.matched, Some(1));
        assert_eq!(calls.get(), 2);
        assert_eq!(check.test_coordinates.len(), grid::SAMPLES_PER_CELL);
    }

    #[test]
    fn reports_all_samples_when_last_one_matches() {
        let region = |lon: f64, lat: f64| lon == 0.75 && lat == 0.75;
        let check = check_cell(&region, &Cell::new(0, 0));
        assert_eq!(check.matched, Some(8));
        assert_eq!(check.test_coordinates, grid::test_coordinates(&Cell::new(0, 0)));
    }

    #[test]
    fn all_water_is_not_land() {
        let calls = Counter::new(0usize);
        let region = |_lon: f64, _lat: f64| {
            calls.set(calls.get() + 1);
            false
        };

        let check = check_cell(&region, &Cell::new(-3, 7));
        assert!(!check.is_land);
        assert_eq!(check.matched, None);
        assert_eq!(calls.get(), grid::SAMPLES_PER_CELL);
    }

    #[test]
    fn land_between_samples_is_missed() {
        // Land sliver along the cell's western edge, west of every sample.
        let region = |lon: f64, _lat: f64| lon < 0.1;
        assert!(!check_cell(&region, &Cell::new(0, 0)).is_land);
    }
}
