//! Status report: one styled polygon feature per queried cell, persisted
//! incrementally as a GeoJSON FeatureCollection.

use crate::error::ReportError;
use crate::models::ClassifiedCell;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Cells between periodic flushes.
pub const DEFAULT_FLUSH_EVERY: usize = 100;

const FILL_OPACITY: f64 = 0.5;
const STROKE_COLOR: &str = "#000000";
const STROKE_WIDTH: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCollection {
    #[serde(rename = "type")]
    pub kind: String,
    pub features: Vec<StatusFeature>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusFeature {
    #[serde(rename = "type")]
    pub kind: String,
    pub properties: StatusProperties,
    pub geometry: CellGeometry,
}

/// Styling keys follow the simplestyle convention understood by common
/// GeoJSON viewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusProperties {
    pub result: f64,
    pub hgt: String,
    pub points: String,
    #[serde(rename = "fill-opacity")]
    pub fill_opacity: f64,
    pub fill: String,
    pub stroke: String,
    #[serde(rename = "stroke-width")]
    pub stroke_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [[[i32; 2]; 5]; 1],
}

impl From<&ClassifiedCell> for StatusFeature {
    fn from(classified: &ClassifiedCell) -> Self {
        let points = classified
            .test_coordinates
            .iter()
            .map(|coord| coord.to_string())
            .collect::<Vec<_>>()
            .join(";");

        Self {
            kind: "Feature".to_string(),
            properties: StatusProperties {
                result: classified.result.report_value(),
                hgt: classified.hgt_filename.clone(),
                points,
                fill_opacity: FILL_OPACITY,
                fill: classified.color().to_string(),
                stroke: STROKE_COLOR.to_string(),
                stroke_width: STROKE_WIDTH,
            },
            geometry: CellGeometry {
                kind: "Polygon".to_string(),
                coordinates: [classified.cell.ring()],
            },
        }
    }
}

/// Serialize a feature list as a 4-space indented FeatureCollection.
pub fn render_collection(features: &[StatusFeature]) -> Result<Vec<u8>, ReportError> {
    #[derive(Serialize)]
    struct Borrowed<'a> {
        #[serde(rename = "type")]
        kind: &'static str,
        features: &'a [StatusFeature],
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    Borrowed {
        kind: "FeatureCollection",
        features,
    }
    .serialize(&mut serializer)?;
    Ok(buf)
}

/// Accumulates features and rewrites the whole report at a fixed cadence.
///
/// Every write goes to a sibling temporary file that is then renamed over the
/// target, so the report on disk is always a complete document.
#[derive(Debug)]
pub struct StatusWriter {
    path: PathBuf,
    flush_every: usize,
    features: Vec<StatusFeature>,
    flushes: usize,
}

impl StatusWriter {
    pub fn new(path: impl Into<PathBuf>, flush_every: usize) -> Self {
        Self {
            path: path.into(),
            flush_every: flush_every.max(1),
            features: Vec::new(),
            flushes: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Number of completed writes.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Append a cell. Returns true if this append triggered a flush.
    pub fn push(&mut self, classified: &ClassifiedCell) -> Result<bool, ReportError> {
        self.features.push(StatusFeature::from(classified));
        if self.features.len() % self.flush_every == 0 {
            self.flush()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Write everything accumulated so far, replacing the previous report.
    pub fn flush(&mut self) -> Result<(), ReportError> {
        let bytes = render_collection(&self.features)?;
        let tmp_path = temp_path(&self.path);
        fs::write(&tmp_path, &bytes).map_err(|source| ReportError::Io {
            path: tmp_path.clone(),
            source,
        })?;
        fs::rename(&tmp_path, &self.path).map_err(|source| ReportError::Io {
            path: self.path.clone(),
            source,
        })?;
        self.flushes += 1;
        tracing::debug!(
            "Wrote {} features to {}",
            self.features.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Final unconditional flush. Returns the number of features written.
    pub fn finish(mut self) -> Result<usize, ReportError> {
        self.flush()?;
        Ok(self.features.len())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_cell;
    use crate::grid;
    use crate::models::{Cell, ElevationResult, FAILURE_SENTINEL};
    use serde_json::Value;

    fn classified(lon: i32, lat: i32, result: ElevationResult) -> ClassifiedCell {
        let cell = Cell::new(lon, lat);
        classify_cell(cell, result, grid::test_coordinates(&cell))
    }

    fn read_collection(path: &Path) -> StatusCollection {
        let text = fs::read_to_string(path).expect("read report");
        serde_json::from_str(&text).expect("parse report")
    }

    #[test]
    fn feature_properties_match_report_format() {
        let feature = StatusFeature::from(&classified(-1, 0, ElevationResult::Elevation(0.0)));
        let value = serde_json::to_value(&feature).unwrap();

        assert_eq!(value["type"], "Feature");
        assert_eq!(value["properties"]["result"], 0.0);
        assert_eq!(value["properties"]["hgt"], "N00W001.hgt");
        assert_eq!(value["properties"]["fill"], "#FF9300");
        assert_eq!(value["properties"]["fill-opacity"], 0.5);
        assert_eq!(value["properties"]["stroke"], "#000000");
        assert_eq!(value["properties"]["stroke-width"], 1);
        assert_eq!(value["geometry"]["type"], "Polygon");
        assert_eq!(
            value["geometry"]["coordinates"],
            serde_json::json!([[[-1, 0], [-1, 1], [0, 1], [0, 0], [-1, 0]]])
        );

        let points = value["properties"]["points"].as_str().unwrap();
        assert!(points.starts_with("-0.75,0.25;-0.75,0.5;-0.75,0.75;-0.5,0.25;"));
        assert_eq!(points.split(';').count(), 9);
    }

    #[test]
    fn failure_writes_sentinel() {
        let feature = StatusFeature::from(&classified(3, 3, ElevationResult::Failure));
        assert_eq!(feature.properties.result, FAILURE_SENTINEL);
        assert_eq!(feature.properties.fill, "#FF0000");
    }

    #[test]
    fn rendered_collection_is_indented() {
        let bytes = render_collection(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("{\n    \"type\": \"FeatureCollection\""));
        let value: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["features"], serde_json::json!([]));
    }

    #[test]
    fn flushes_every_interval() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.geojson");
        let mut writer = StatusWriter::new(&path, 3);

        assert!(!writer.push(&classified(0, 0, ElevationResult::Elevation(1.0))).unwrap());
        assert!(!writer.push(&classified(0, 1, ElevationResult::Elevation(2.0))).unwrap());
        assert!(!path.exists());

        assert!(writer.push(&classified(0, 2, ElevationResult::Elevation(3.0))).unwrap());
        assert_eq!(read_collection(&path).features.len(), 3);

        assert!(!writer.push(&classified(0, 3, ElevationResult::Failure)).unwrap());
        assert_eq!(read_collection(&path).features.len(), 3);
        assert_eq!(writer.flushes(), 1);

        assert_eq!(writer.finish().unwrap(), 4);
        let collection = read_collection(&path);
        assert_eq!(collection.kind, "FeatureCollection");
        let results: Vec<f64> = collection
            .features
            .iter()
            .map(|feature| feature.properties.result)
            .collect();
        assert_eq!(results, vec![1.0, 2.0, 3.0, FAILURE_SENTINEL]);
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn finish_writes_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.geojson");
        let writer = StatusWriter::new(&path, DEFAULT_FLUSH_EVERY);
        assert!(writer.is_empty());
        assert_eq!(writer.finish().unwrap(), 0);
        assert!(read_collection(&path).features.is_empty());
    }

    #[test]
    fn overwrites_previous_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("status.geojson");
        fs::write(&path, "stale content that is much longer than the new report").unwrap();

        let mut writer = StatusWriter::new(&path, 1);
        writer.push(&classified(5, 5, ElevationResult::Elevation(7.0))).unwrap();
        assert_eq!(read_collection(&path).features.len(), 1);
    }

    #[test]
    fn write_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("status.geojson");
        let writer = StatusWriter::new(&path, 1);
        assert!(matches!(writer.finish(), Err(ReportError::Io { .. })));
    }
}
