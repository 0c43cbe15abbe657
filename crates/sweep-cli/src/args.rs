//! Command line arguments.

use clap::Parser;
use std::path::PathBuf;
use sweep_core::{BoundingBox, ConfigError, SweepConfig, Verbosity, DEFAULT_FLUSH_EVERY};

/// Sweep a bounding box and check an elevation service cell by cell
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Elevation service URL, e.g. http://example.com/geojson/
    pub endpoint: String,

    /// BBOX to test, in W,S,E,N format
    #[arg(short, long, default_value = "-180,-80,180,80", allow_hyphen_values = true)]
    pub bounds: String,

    /// Output file
    #[arg(short, long, default_value = "status.geojson")]
    pub output: PathBuf,

    /// GeoJSON file whose first feature is the land polygon
    #[arg(short, long, default_value = "ne_10m_land.geojson")]
    pub land: PathBuf,

    /// Turn on debug logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub debug: bool,

    /// Turn off all logging except errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Rewrite the report after this many cells
    #[arg(long, default_value_t = DEFAULT_FLUSH_EVERY)]
    pub flush_every: usize,
}

impl Args {
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.debug, self.quiet)
    }

    /// Validate and convert into a run configuration.
    pub fn into_config(self) -> Result<SweepConfig, ConfigError> {
        let bbox: BoundingBox = self.bounds.parse()?;
        let config = SweepConfig {
            bbox,
            endpoint: self.endpoint.trim().to_string(),
            output_path: self.output,
            land_path: self.land,
            request_timeout_s: self.timeout.max(1),
            flush_every: self.flush_every,
            verbosity: Verbosity::from_flags(self.debug, self.quiet),
        };
        config.validate()?;
        Ok(config)
    }
}
