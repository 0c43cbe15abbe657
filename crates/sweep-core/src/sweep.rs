//! Sweep runner: walks the grid, filters land, queries, classifies, reports.

use crate::classify::classify_cell;
use crate::error::ReportError;
use crate::filter::check_cell;
use crate::grid;
use crate::land::RegionTest;
use crate::models::{BoundingBox, CellCategory, ElevationResult, TestCoordinate};
use crate::report::StatusWriter;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anything that can turn a batch of sample points into one elevation.
///
/// Called once per land cell with all of the cell's samples. Implementations
/// absorb their own failures into [`ElevationResult::Failure`].
pub trait ElevationSource {
    fn elevation(&mut self, coords: &[TestCoordinate]) -> ElevationResult;
}

impl<E> ElevationSource for &mut E
where
    E: ElevationSource + ?Sized,
{
    fn elevation(&mut self, coords: &[TestCoordinate]) -> ElevationResult {
        (**self).elevation(coords)
    }
}

/// Counters for a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub cells_visited: usize,
    pub cells_skipped: usize,
    pub cells_queried: usize,
    pub success: usize,
    pub possible_error: usize,
    pub error: usize,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunSummary {
    fn start() -> Self {
        Self {
            cells_visited: 0,
            cells_skipped: 0,
            cells_queried: 0,
            success: 0,
            possible_error: 0,
            error: 0,
            started_at: Utc::now(),
            finished_at: Utc::now(),
        }
    }

    fn record(&mut self, category: CellCategory) {
        self.cells_queried += 1;
        match category {
            CellCategory::Success => self.success += 1,
            CellCategory::PossibleError => self.possible_error += 1,
            CellCategory::Error => self.error += 1,
        }
    }
}

/// Run a full sweep over `bbox`.
///
/// Cells are processed strictly one after another. Only report write failures
/// abort the run; per-cell query failures end up as error features.
pub fn run_sweep<R, E>(
    bbox: &BoundingBox,
    region: &R,
    mut source: E,
    mut writer: StatusWriter,
) -> Result<RunSummary, ReportError>
where
    R: RegionTest + ?Sized,
    E: ElevationSource,
{
    let mut summary = RunSummary::start();
    tracing::info!(
        "Sweeping {} ({} cells), report at {}",
        bbox,
        bbox.cell_count(),
        writer.path().display()
    );

    for cell in grid::cells(bbox) {
        summary.cells_visited += 1;

        let check = check_cell(region, &cell);
        if !check.is_land {
            summary.cells_skipped += 1;
            tracing::debug!("No points on land, {}", cell);
            continue;
        }

        let result = source.elevation(&check.test_coordinates);
        tracing::debug!("{} response: {}", cell, result.report_value());

        let classified = classify_cell(cell, result, check.test_coordinates);
        match classified.category {
            CellCategory::Error => tracing::info!("fail {}", cell),
            CellCategory::PossibleError => tracing::info!("maybe fail {}", cell),
            CellCategory::Success => {}
        }
        summary.record(classified.category);

        if writer.push(&classified)? {
            tracing::info!(
                "Progress: {}/{} cells visited, {} features written",
                summary.cells_visited,
                bbox.cell_count(),
                writer.len()
            );
        }
    }

    let written = writer.finish()?;
    summary.finished_at = Utc::now();
    tracing::info!(
        "Sweep finished: {} visited, {} skipped, {} written ({} ok, {} maybe, {} failed)",
        summary.cells_visited,
        summary.cells_skipped,
        written,
        summary.success,
        summary.possible_error,
        summary.error
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cell, FAILURE_SENTINEL};
    use crate::report::StatusCollection;

    /// Records every batch and answers with a fixed result.
    struct Recording {
        calls: Vec<Vec<TestCoordinate>>,
        answer: ElevationResult,
    }

    impl ElevationSource for Recording {
        fn elevation(&mut self, coords: &[TestCoordinate]) -> ElevationResult {
            self.calls.push(coords.to_vec());
            self.answer
        }
    }

    fn recording(answer: ElevationResult) -> Recording {
        Recording {
            calls: Vec::new(),
            answer,
        }
    }

    fn unit_square_land(lon: f64, lat: f64) -> bool {
        (0.0..1.0).contains(&lon) && (0.0..1.0).contains(&lat)
    }

    fn read(path: &std::path::Path) -> StatusCollection {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn only_land_cells_are_queried() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.geojson");
        let bbox = BoundingBox::new(-1, -1, 1, 1).unwrap();
        let mut source = recording(ElevationResult::Elevation(120.0));

        let summary = run_sweep(
            &bbox,
            &unit_square_land,
            &mut source,
            StatusWriter::new(&path, 100),
        )
        .unwrap();

        assert_eq!(source.calls.len(), 1);
        assert_eq!(source.calls[0], grid::test_coordinates(&Cell::new(0, 0)));
        assert_eq!(summary.cells_visited, 4);
        assert_eq!(summary.cells_skipped, 3);
        assert_eq!(summary.cells_queried, 1);
        assert_eq!(summary.success, 1);

        let report = read(&path);
        assert_eq!(report.features.len(), 1);
        assert_eq!(report.features[0].properties.hgt, "N00E000.hgt");
        assert_eq!(report.features[0].geometry.coordinates[0][0], [0, 0]);
    }

    #[test]
    fn failed_queries_become_error_features() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.geojson");
        let bbox = BoundingBox::new(0, 0, 1, 1).unwrap();
        let mut source = recording(ElevationResult::Failure);

        let summary = run_sweep(&bbox, &unit_square_land, &mut source, StatusWriter::new(&path, 100))
            .unwrap();
        assert_eq!(summary.error, 1);

        let report = read(&path);
        assert_eq!(report.features[0].properties.result, FAILURE_SENTINEL);
        assert_eq!(report.features[0].properties.fill, "#FF0000");
    }

    #[test]
    fn water_only_sweep_writes_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.geojson");
        let bbox = BoundingBox::new(10, 10, 13, 12).unwrap();
        let mut source = recording(ElevationResult::Elevation(1.0));

        let summary = run_sweep(
            &bbox,
            &|_lon: f64, _lat: f64| false,
            &mut source,
            StatusWriter::new(&path, 100),
        )
        .unwrap();

        assert!(source.calls.is_empty());
        assert_eq!(summary.cells_skipped, 6);
        assert!(read(&path).features.is_empty());
    }

    #[test]
    fn flush_cadence_tracks_processed_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.geojson");
        let path_for_source = path.clone();
        let bbox = BoundingBox::new(0, 0, 5, 50).unwrap();

        // Before each query, the report holds the last multiple of the flush
        // interval below the number of cells already processed.
        struct Checking {
            path: std::path::PathBuf,
            seen: usize,
        }
        impl ElevationSource for Checking {
            fn elevation(&mut self, _coords: &[TestCoordinate]) -> ElevationResult {
                let expected = (self.seen / 100) * 100;
                let on_disk = if self.path.exists() {
                    read(&self.path).features.len()
                } else {
                    0
                };
                assert_eq!(on_disk, expected, "after {} cells", self.seen);
                self.seen += 1;
                ElevationResult::Elevation(self.seen as f64)
            }
        }

        let source = Checking {
            path: path_for_source,
            seen: 0,
        };
        let summary = run_sweep(&bbox, &|_lon: f64, _lat: f64| true, source, StatusWriter::new(&path, 100))
            .unwrap();
        assert_eq!(summary.cells_queried, 250);

        let report = read(&path);
        assert_eq!(report.features.len(), 250);
        let results: Vec<f64> = report.features.iter().map(|f| f.properties.result).collect();
        let expected: Vec<f64> = (1..=250).map(|n| n as f64).collect();
        assert_eq!(results, expected);
    }
}
