//! Blocking HTTP client for the elevation service.

use crate::error::{ClientError, QueryError};
use crate::wire::{max_elevation, LineStringFeature};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use std::time::Duration;
use sweep_core::{ElevationResult, ElevationSource, TestCoordinate};

/// Client for one elevation service endpoint.
///
/// The underlying connection pool is created once and reused for every cell.
/// There are no retries: a failed query is reported once and the caller moves
/// on.
pub struct ElevationClient {
    client: Client,
    endpoint: Url,
}

impl ElevationClient {
    /// Create a client with its own connection pool.
    ///
    /// # Arguments
    /// * `endpoint` - Service URL that accepts LineString features
    /// * `timeout` - Upper bound for a whole request/response round trip
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(endpoint, client)
    }

    /// Wrap an existing HTTP client.
    pub fn with_client(endpoint: &str, client: Client) -> Result<Self, ClientError> {
        let endpoint = Url::parse(endpoint.trim()).map_err(|err| ClientError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        })?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Query the service and return the highest elevation among `coords`.
    pub fn try_elevation(&self, coords: &[TestCoordinate]) -> Result<f64, QueryError> {
        let first = coords.first().ok_or(QueryError::EmptyRequest)?;

        let body = serde_json::to_string(&LineStringFeature::new(coords))?;
        tracing::debug!("requesting {}", body);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = response.status();
        let text = response.text()?;
        tracing::debug!("response {}", text);

        if status != StatusCode::OK {
            tracing::error!(
                "{},{} status code: {}",
                first.lon.floor(),
                first.lat.floor(),
                status.as_u16()
            );
            return Err(QueryError::Status(status.as_u16()));
        }

        max_elevation(&text, coords.len()).map_err(|err| {
            tracing::error!("Unexpected response format ({}): {}", err, text);
            err
        })
    }

    /// Like [`try_elevation`](Self::try_elevation) but folds every failure,
    /// transport errors included, into [`ElevationResult::Failure`].
    pub fn query(&self, coords: &[TestCoordinate]) -> ElevationResult {
        match self.try_elevation(coords) {
            Ok(value) => ElevationResult::from_reading(value),
            Err(QueryError::Transport(err)) => {
                tracing::error!("Elevation request to {} failed: {}", self.endpoint, err);
                ElevationResult::Failure
            }
            Err(err) => {
                tracing::debug!("Elevation query rejected: {}", err);
                ElevationResult::Failure
            }
        }
    }
}

impl ElevationSource for ElevationClient {
    fn elevation(&mut self, coords: &[TestCoordinate]) -> ElevationResult {
        self.query(coords)
    }
}
