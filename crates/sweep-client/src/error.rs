//! Error types for the elevation client.

use thiserror::Error;

/// Client construction failure.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid elevation service endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Failed to create HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Why a single query produced no usable elevation.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("No coordinates to query")]
    EmptyRequest,

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// Connection refused, timeout, reset, or an unreadable body.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status code {0}")]
    Status(u16),

    #[error("Response is not valid JSON of the expected shape: {0}")]
    MalformedBody(String),

    #[error("Response has no geometry")]
    MissingGeometry,

    #[error("Response geometry has no coordinates")]
    MissingCoordinates,

    #[error("Response has {actual} coordinates, expected {expected}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("Response coordinate {index} has {len} components, expected 3")]
    NotTriple { index: usize, len: usize },
}

impl QueryError {
    /// Whether the reply arrived but broke the response contract.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::MalformedBody(_)
                | Self::MissingGeometry
                | Self::MissingCoordinates
                | Self::CountMismatch { .. }
                | Self::NotTriple { .. }
        )
    }
}
