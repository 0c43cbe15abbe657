//! Sweep Client - elevation service client
//!
//! Sends a cell's sample points to the service under test and checks the
//! reply against the expected LineString contract.

pub mod client;
pub mod error;
pub mod wire;

pub use client::ElevationClient;
pub use error::{ClientError, QueryError};
pub use wire::{max_elevation, LineStringFeature};
