//! Run configuration handed to the sweep by its caller.

use crate::error::ConfigError;
use crate::models::BoundingBox;
use crate::report::DEFAULT_FLUSH_EVERY;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How much the run logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    /// Errors only
    Quiet,
    /// Progress and suspicious cells
    #[default]
    Normal,
    /// Every skipped cell, request and response
    Debug,
}

impl Verbosity {
    /// Pick from the two mutually exclusive CLI switches. Debug wins.
    pub fn from_flags(debug: bool, quiet: bool) -> Self {
        if debug {
            Self::Debug
        } else if quiet {
            Self::Quiet
        } else {
            Self::Normal
        }
    }

    /// Base `tracing` level name for this verbosity.
    pub fn level(&self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "info",
            Self::Debug => "debug",
        }
    }
}

/// Everything a sweep needs to run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub bbox: BoundingBox,
    /// Elevation service URL; requests are POSTed here.
    pub endpoint: String,
    /// Report destination, overwritten on every flush.
    pub output_path: PathBuf,
    /// GeoJSON file holding the land polygon.
    pub land_path: PathBuf,
    /// Per-request timeout in seconds.
    pub request_timeout_s: u64,
    /// Cells between report flushes.
    pub flush_every: usize,
    pub verbosity: Verbosity,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            bbox: BoundingBox::default(),
            endpoint: String::new(),
            output_path: PathBuf::from("status.geojson"),
            land_path: PathBuf::from("ne_10m_land.geojson"),
            request_timeout_s: 30,
            flush_every: DEFAULT_FLUSH_EVERY,
            verbosity: Verbosity::Normal,
        }
    }
}

impl SweepConfig {
    /// Check fields that the bounding box type does not already guarantee.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if self.flush_every == 0 {
            return Err(ConfigError::ZeroFlushInterval);
        }
        Ok(())
    }
}
