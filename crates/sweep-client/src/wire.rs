//! Wire format of the elevation service and reply validation.

use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use sweep_core::TestCoordinate;

/// Request body: a LineString feature through all sample points.
#[derive(Debug, Serialize)]
pub struct LineStringFeature {
    #[serde(rename = "type")]
    kind: &'static str,
    geometry: LineStringGeometry,
}

#[derive(Debug, Serialize)]
struct LineStringGeometry {
    #[serde(rename = "type")]
    kind: &'static str,
    coordinates: Vec<[f64; 2]>,
}

impl LineStringFeature {
    pub fn new(coords: &[TestCoordinate]) -> Self {
        Self {
            kind: "Feature",
            geometry: LineStringGeometry {
                kind: "LineString",
                coordinates: coords.iter().map(TestCoordinate::as_pair).collect(),
            },
        }
    }
}

/// Reply body. Only the parts that are validated are modelled.
#[derive(Debug, Deserialize)]
struct ElevationResponse {
    #[serde(default)]
    geometry: Option<ResponseGeometry>,
}

#[derive(Debug, Deserialize)]
struct ResponseGeometry {
    #[serde(default)]
    coordinates: Option<Vec<Vec<f64>>>,
}

/// Validate a successful reply and reduce it to the highest elevation.
///
/// The reply must carry exactly `expected` coordinates, each a
/// `[lon, lat, elevation]` triple.
pub fn max_elevation(body: &str, expected: usize) -> Result<f64, QueryError> {
    let response: ElevationResponse =
        serde_json::from_str(body).map_err(|err| QueryError::MalformedBody(err.to_string()))?;

    let coordinates = response
        .geometry
        .ok_or(QueryError::MissingGeometry)?
        .coordinates
        .filter(|coords| !coords.is_empty())
        .ok_or(QueryError::MissingCoordinates)?;

    if coordinates.len() != expected {
        return Err(QueryError::CountMismatch {
            expected,
            actual: coordinates.len(),
        });
    }

    let mut max = f64::NEG_INFINITY;
    for (index, coord) in coordinates.iter().enumerate() {
        if coord.len() != 3 {
            return Err(QueryError::NotTriple {
                index,
                len: coord.len(),
            });
        }
        max = max.max(coord[2]);
    }
    Ok(max)
}
