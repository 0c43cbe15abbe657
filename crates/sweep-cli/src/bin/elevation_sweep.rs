//! Sweep a bounding box against an elevation service and write a GeoJSON
//! status report.

use clap::Parser;
use std::process::ExitCode;
use sweep_cli::{logging, run, Args};

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = logging::init(args.verbosity()) {
        eprintln!("Failed to initialize logging: {err:#}");
        return ExitCode::FAILURE;
    }

    let config = match args.into_config() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    match run(&config) {
        Ok(summary) => {
            if summary.error > 0 {
                tracing::info!("{} cells failed, see {}", summary.error, config.output_path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}
