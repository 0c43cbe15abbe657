//! Maps an elevation reading to a report category.

use crate::models::{Cell, CellCategory, ClassifiedCell, ElevationResult, TestCoordinate};

/// Category for a reading. Zero is suspicious because services commonly
/// return it for missing data.
pub fn classify(result: ElevationResult) -> CellCategory {
    match result {
        ElevationResult::Failure => CellCategory::Error,
        ElevationResult::Elevation(value) if value == 0.0 => CellCategory::PossibleError,
        ElevationResult::Elevation(_) => CellCategory::Success,
    }
}

/// Attach the verdict and tile name to a queried cell.
pub fn classify_cell(
    cell: Cell,
    result: ElevationResult,
    test_coordinates: Vec<TestCoordinate>,
) -> ClassifiedCell {
    ClassifiedCell {
        cell,
        result,
        category: classify(result),
        test_coordinates,
        hgt_filename: cell.hgt_filename(),
    }
}
