//! Cell enumeration and per-cell sample generation.

use crate::models::{BoundingBox, Cell, TestCoordinate};

/// Offsets from a cell's lower-left corner, in degrees. Quarter steps 1..=3,
/// so no sample lands on a cell edge.
pub const SAMPLE_OFFSETS: [f64; 3] = [0.25, 0.5, 0.75];

/// Samples generated per cell.
pub const SAMPLES_PER_CELL: usize = SAMPLE_OFFSETS.len() * SAMPLE_OFFSETS.len();

/// Every whole-degree cell in the box, longitude outer, latitude inner.
pub fn cells(bbox: &BoundingBox) -> impl Iterator<Item = Cell> {
    let (south, north) = (bbox.south(), bbox.north());
    (bbox.west()..bbox.east()).flat_map(move |lon| (south..north).map(move |lat| Cell::new(lon, lat)))
}

/// The 3×3 interior sample grid of a cell, longitude offset outer.
pub fn test_coordinates(cell: &Cell) -> Vec<TestCoordinate> {
    let lon = f64::from(cell.lon);
    let lat = f64::from(cell.lat);
    let mut coords = Vec::with_capacity(SAMPLES_PER_CELL);
    for x_offset in SAMPLE_OFFSETS {
        for y_offset in SAMPLE_OFFSETS {
            coords.push(TestCoordinate::new(lon + x_offset, lat + y_offset));
        }
    }
    coords
}
