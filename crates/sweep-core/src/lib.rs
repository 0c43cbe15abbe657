//! Sweep Core - grid sampling, land filtering, classification and reporting
//! for validating a remote elevation service.

pub mod classify;
pub mod config;
pub mod error;
pub mod filter;
pub mod grid;
pub mod land;
pub mod models;
pub mod report;
pub mod sweep;

pub use classify::{classify, classify_cell};
pub use config::{SweepConfig, Verbosity};
pub use error::{ConfigError, LandError, ReportError};
pub use filter::{check_cell, first_on_land, LandCheck};
pub use grid::{cells, test_coordinates, SAMPLES_PER_CELL, SAMPLE_OFFSETS};
pub use land::{LandPolygon, RegionTest};
pub use models::{
    BoundingBox, Cell, CellCategory, ClassifiedCell, ElevationResult, TestCoordinate,
    FAILURE_SENTINEL,
};
pub use report::{StatusCollection, StatusFeature, StatusWriter, DEFAULT_FLUSH_EVERY};
pub use sweep::{run_sweep, ElevationSource, RunSummary};
