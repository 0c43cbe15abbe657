//! Core data models for the elevation sweep.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Marker value reported when no usable elevation was obtained.
pub const FAILURE_SENTINEL: f64 = -9999.0;

/// Geographic area to sweep, in whole degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    west: i32,
    south: i32,
    east: i32,
    north: i32,
}

impl BoundingBox {
    /// Build a validated bounding box.
    ///
    /// Components are checked in W,S,E,N order so the first offending one is
    /// reported, then the spans are checked for being non-empty.
    pub fn new(west: i32, south: i32, east: i32, north: i32) -> Result<Self, ConfigError> {
        let components = [west, south, east, north];
        for (idx, value) in components.into_iter().enumerate() {
            let limit = if idx % 2 == 0 { 180 } else { 90 };
            if value < -limit || value > limit {
                return Err(ConfigError::BoundsOutOfRange {
                    index: idx + 1,
                    value,
                    min: -limit,
                    max: limit,
                });
            }
        }

        if west >= east {
            return Err(ConfigError::EmptyLongitudeSpan { west, east });
        }
        if south >= north {
            return Err(ConfigError::EmptyLatitudeSpan { south, north });
        }

        Ok(Self {
            west,
            south,
            east,
            north,
        })
    }

    pub fn west(&self) -> i32 {
        self.west
    }

    pub fn south(&self) -> i32 {
        self.south
    }

    pub fn east(&self) -> i32 {
        self.east
    }

    pub fn north(&self) -> i32 {
        self.north
    }

    /// Number of whole-degree cells inside the box.
    pub fn cell_count(&self) -> usize {
        let cols = (self.east - self.west) as usize;
        let rows = (self.north - self.south) as usize;
        cols * rows
    }
}

impl Default for BoundingBox {
    /// Everything between 80°S and 80°N.
    fn default() -> Self {
        Self {
            west: -180,
            south: -80,
            east: 180,
            north: 80,
        }
    }
}

impl FromStr for BoundingBox {
    type Err = ConfigError;

    /// Parse `W,S,E,N`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 4 {
            return Err(ConfigError::BoundsComponentCount(parts.len()));
        }

        let mut values = [0i32; 4];
        for (idx, part) in parts.iter().enumerate() {
            values[idx] = part
                .trim()
                .parse()
                .map_err(|_| ConfigError::BoundsComponentParse {
                    index: idx + 1,
                    value: part.to_string(),
                })?;
        }

        Self::new(values[0], values[1], values[2], values[3])
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.west, self.south, self.east, self.north)
    }
}

/// A 1°×1° square identified by its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub lon: i32,
    pub lat: i32,
}

impl Cell {
    pub fn new(lon: i32, lat: i32) -> Self {
        Self { lon, lat }
    }

    /// SRTM-style tile name for this cell, e.g. `N47W123.hgt`.
    ///
    /// Latitude zero is the northern tile `N00`, longitude zero is `E000`.
    pub fn hgt_filename(&self) -> String {
        format!(
            "{}{:02}{}{:03}.hgt",
            if self.lat >= 0 { 'N' } else { 'S' },
            self.lat.unsigned_abs(),
            if self.lon < 0 { 'W' } else { 'E' },
            self.lon.unsigned_abs()
        )
    }

    /// Closed outline of the cell, counter-clockwise from the lower-left corner
    /// going north first.
    pub fn ring(&self) -> [[i32; 2]; 5] {
        let (lon, lat) = (self.lon, self.lat);
        [
            [lon, lat],
            [lon, lat + 1],
            [lon + 1, lat + 1],
            [lon + 1, lat],
            [lon, lat],
        ]
    }

    /// Whether a point falls inside `[lon, lon+1) × [lat, lat+1)`.
    pub fn contains(&self, coord: &TestCoordinate) -> bool {
        let lon = f64::from(self.lon);
        let lat = f64::from(self.lat);
        coord.lon >= lon && coord.lon < lon + 1.0 && coord.lat >= lat && coord.lat < lat + 1.0
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

/// A sample point inside a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestCoordinate {
    pub lon: f64,
    pub lat: f64,
}

impl TestCoordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn as_pair(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

impl fmt::Display for TestCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lon, self.lat)
    }
}

/// Outcome of one elevation query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElevationResult {
    /// Highest elevation among the sampled points.
    Elevation(f64),
    /// The query failed or the reply broke the contract.
    Failure,
}

impl ElevationResult {
    /// Wrap a reading from the service. A reading equal to the sentinel is
    /// indistinguishable from a failure and is treated as one.
    pub fn from_reading(value: f64) -> Self {
        if value == FAILURE_SENTINEL || !value.is_finite() {
            Self::Failure
        } else {
            Self::Elevation(value)
        }
    }

    /// Number written to the report's `result` property.
    pub fn report_value(&self) -> f64 {
        match self {
            Self::Elevation(value) => *value,
            Self::Failure => FAILURE_SENTINEL,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }
}

/// Verdict for a queried cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellCategory {
    Success,
    /// Zero elevation: genuine sea level or an unset default.
    PossibleError,
    Error,
}

pub const SUCCESS_COLOR: &str = "#8FD933";
pub const POSSIBLE_ERROR_COLOR: &str = "#FF9300";
pub const ERROR_COLOR: &str = "#FF0000";

impl CellCategory {
    /// Fill color used for this category in the report.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Success => SUCCESS_COLOR,
            Self::PossibleError => POSSIBLE_ERROR_COLOR,
            Self::Error => ERROR_COLOR,
        }
    }
}

impl fmt::Display for CellCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Success => "success",
            Self::PossibleError => "possible error",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

/// A queried cell with its verdict, ready to be written to the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCell {
    pub cell: Cell,
    pub result: ElevationResult,
    pub category: CellCategory,
    pub test_coordinates: Vec<TestCoordinate>,
    pub hgt_filename: String,
}

impl ClassifiedCell {
    pub fn color(&self) -> &'static str {
        self.category.color()
    }
}
