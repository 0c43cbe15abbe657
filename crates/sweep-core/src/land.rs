//! Land reference: a prepared land-mass polygon with a point containment test.

use crate::error::LandError;
use geojson::GeoJson;
use rstar::{RTree, RTreeObject, AABB};
use std::path::Path;

/// Point-in-region capability.
///
/// Implementors must be read-only: the same point always gives the same answer
/// regardless of query order.
pub trait RegionTest {
    fn contains(&self, lon: f64, lat: f64) -> bool;
}

impl<F> RegionTest for F
where
    F: Fn(f64, f64) -> bool,
{
    fn contains(&self, lon: f64, lat: f64) -> bool {
        self(lon, lat)
    }
}

/// One ring edge, indexed by its bounding box.
#[derive(Debug, Clone)]
struct Edge {
    start: [f64; 2],
    end: [f64; 2],
}

impl RTreeObject for Edge {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.start, self.end)
    }
}

/// Land polygon prepared for repeated containment queries.
///
/// All ring edges (outer rings and holes, of every part) go into one R-tree.
/// A query casts a ray east from the point and counts crossings among the
/// edges whose envelope meets the ray; an odd count means inside.
pub struct LandPolygon {
    edges: RTree<Edge>,
    min: [f64; 2],
    max: [f64; 2],
}

impl LandPolygon {
    /// Build from rings of `[lon, lat]` vertices. Rings may be open or closed.
    pub fn from_rings<I, R>(rings: I) -> Result<Self, LandError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[[f64; 2]]>,
    {
        let mut edges = Vec::new();
        let mut min = [f64::INFINITY, f64::INFINITY];
        let mut max = [f64::NEG_INFINITY, f64::NEG_INFINITY];

        for ring in rings {
            let ring = ring.as_ref();
            if ring.len() < 3 {
                continue;
            }
            for (idx, vertex) in ring.iter().enumerate() {
                let next = ring[(idx + 1) % ring.len()];
                if *vertex == next {
                    continue;
                }
                min = [min[0].min(vertex[0]), min[1].min(vertex[1])];
                max = [max[0].max(vertex[0]), max[1].max(vertex[1])];
                edges.push(Edge {
                    start: *vertex,
                    end: next,
                });
            }
        }

        if edges.is_empty() {
            return Err(LandError::EmptyGeometry);
        }

        tracing::debug!("Prepared land polygon with {} edges", edges.len());

        Ok(Self {
            edges: RTree::bulk_load(edges),
            min,
            max,
        })
    }

    /// Parse GeoJSON text and prepare the geometry of its first feature.
    pub fn from_geojson_str(text: &str) -> Result<Self, LandError> {
        let geojson: GeoJson = text.parse()?;
        let geometry = match geojson {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .next()
                .and_then(|feature| feature.geometry),
            GeoJson::Feature(feature) => feature.geometry,
            GeoJson::Geometry(geometry) => Some(geometry),
        }
        .ok_or(LandError::MissingGeometry)?;

        let polygons = match geometry.value {
            geojson::Value::Polygon(polygon) => vec![polygon],
            geojson::Value::MultiPolygon(polygons) => polygons,
            other => return Err(LandError::UnsupportedGeometry(type_name(&other).to_string())),
        };

        let rings: Vec<Vec<[f64; 2]>> = polygons
            .iter()
            .flatten()
            .map(|ring| {
                ring.iter()
                    .filter_map(|position| match (position.first(), position.get(1)) {
                        (Some(lon), Some(lat)) => Some([*lon, *lat]),
                        _ => None,
                    })
                    .collect()
            })
            .collect();

        Self::from_rings(rings)
    }

    /// Read and prepare a GeoJSON land file.
    pub fn from_geojson_file(path: impl AsRef<Path>) -> Result<Self, LandError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LandError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_geojson_str(&text)
    }

    pub fn edge_count(&self) -> usize {
        self.edges.size()
    }

    /// Even-odd containment. Points on an edge may go either way.
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        if !lon.is_finite() || !lat.is_finite() {
            return false;
        }
        if lon < self.min[0] || lon > self.max[0] || lat < self.min[1] || lat > self.max[1] {
            return false;
        }

        let ray = AABB::from_corners([lon, lat], [self.max[0], lat]);
        let mut inside = false;
        for edge in self.edges.locate_in_envelope_intersecting(&ray) {
            let [xi, yi] = edge.start;
            let [xj, yj] = edge.end;
            if ((yi > lat) != (yj > lat)) && (lon < (xj - xi) * (lat - yi) / (yj - yi) + xi) {
                inside = !inside;
            }
        }
        inside
    }
}

impl std::fmt::Debug for LandPolygon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LandPolygon")
            .field("edges", &self.edges.size())
            .field("min", &self.min)
            .field("max", &self.max)
            .finish()
    }
}

fn type_name(value: &geojson::Value) -> &'static str {
    match value {
        geojson::Value::Point(_) => "Point",
        geojson::Value::MultiPoint(_) => "MultiPoint",
        geojson::Value::LineString(_) => "LineString",
        geojson::Value::MultiLineString(_) => "MultiLineString",
        geojson::Value::Polygon(_) => "Polygon",
        geojson::Value::MultiPolygon(_) => "MultiPolygon",
        geojson::Value::GeometryCollection(_) => "GeometryCollection",
    }
}

impl RegionTest for LandPolygon {
    fn contains(&self, lon: f64, lat: f64) -> bool {
        self.contains_point(lon, lat)
    }
}
