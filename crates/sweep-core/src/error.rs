//! Error types for the sweep pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Invalid run configuration. Always fatal, raised before any cell is visited.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The bounds string did not split into exactly four parts.
    #[error("Bounds must have 4 components, got {0}")]
    BoundsComponentCount(usize),

    /// A bounds component is not an integer.
    #[error("Bounds component {index} is not an integer: {value:?}")]
    BoundsComponentParse {
        /// 1-based component position (W,S,E,N).
        index: usize,
        /// Raw text of the component.
        value: String,
    },

    /// A bounds component lies outside its axis range.
    #[error("Bounds component {index} ({value}) out of range {min} to {max}")]
    BoundsOutOfRange {
        /// 1-based component position (W,S,E,N).
        index: usize,
        value: i32,
        min: i32,
        max: i32,
    },

    /// West edge is not strictly west of the east edge.
    #[error("West bound ({west}) must be less than east bound ({east})")]
    EmptyLongitudeSpan { west: i32, east: i32 },

    /// South edge is not strictly south of the north edge.
    #[error("South bound ({south}) must be less than north bound ({north})")]
    EmptyLatitudeSpan { south: i32, north: i32 },

    /// The service endpoint is blank.
    #[error("Elevation service endpoint is empty")]
    EmptyEndpoint,

    /// The flush interval must be positive.
    #[error("Flush interval must be at least 1")]
    ZeroFlushInterval,
}

/// Failure to build the land reference.
#[derive(Debug, Error)]
pub enum LandError {
    /// The land file could not be read.
    #[error("Failed to read land file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The land file is not valid GeoJSON.
    #[error("Invalid land GeoJSON: {0}")]
    Parse(#[from] geojson::Error),

    /// The land file holds no feature with a geometry.
    #[error("Land file contains no geometry")]
    MissingGeometry,

    /// The first geometry is not areal.
    #[error("Unsupported land geometry type: {0}")]
    UnsupportedGeometry(String),

    /// The geometry has no ring with at least three vertices.
    #[error("Land geometry has no usable rings")]
    EmptyGeometry,
}

/// Failure to persist the report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
