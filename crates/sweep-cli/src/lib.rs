//! Sweep CLI - wiring for the `elevation-sweep` binary.

pub mod args;
pub mod logging;

use anyhow::{Context, Result};
use std::time::Duration;
use sweep_client::ElevationClient;
use sweep_core::{run_sweep, LandPolygon, RunSummary, StatusWriter, SweepConfig};

pub use args::Args;

/// Load the land reference, connect to the service and run the sweep.
pub fn run(config: &SweepConfig) -> Result<RunSummary> {
    config.validate()?;

    let land = LandPolygon::from_geojson_file(&config.land_path)
        .with_context(|| format!("Failed to load land polygon from {}", config.land_path.display()))?;
    tracing::info!("Loaded land polygon ({} edges)", land.edge_count());

    let client = ElevationClient::new(
        &config.endpoint,
        Duration::from_secs(config.request_timeout_s),
    )?;
    tracing::info!("Testing elevation service at {}", client.endpoint());

    let writer = StatusWriter::new(&config.output_path, config.flush_every);
    let summary = run_sweep(&config.bbox, &land, client, writer)?;
    Ok(summary)
}
