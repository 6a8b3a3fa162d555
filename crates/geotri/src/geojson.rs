//! GeoJSON input and output types.
//!
//! Input is deliberately loose: any FeatureCollection, Feature, or bare geometry
//! parses, and callers pick out what they need (`first_feature`, `polygons`).
//! Output is the fixed triangle FeatureCollection shape consumed by viewers.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{TriError, TriResult};
use crate::winding::{Point, Triangle};

/// `[lon, lat]` or `[lon, lat, alt]` in degrees / metres.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
    pub alt: f64,
}

impl Position {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat, alt: 0.0 }
    }
    #[inline]
    pub fn xy(&self) -> Point {
        [self.lon, self.lat]
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(v: Vec<f64>) -> Result<Self, Self::Error> {
        match v.as_slice() {
            [lon, lat] => Ok(Self::new(*lon, *lat)),
            [lon, lat, alt, ..] => Ok(Self {
                lon: *lon,
                lat: *lat,
                alt: *alt,
            }),
            _ => Err(format!("position needs at least 2 numbers, got {}", v.len())),
        }
    }
}

/// Closed sequence of positions (first equals last in well-formed input).
pub type Ring = Vec<Position>;

/// Exterior ring followed by hole rings.
pub type PolygonCoords = Vec<Ring>;

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Position },
    MultiPoint { coordinates: Vec<Position> },
    LineString { coordinates: Vec<Position> },
    MultiLineString { coordinates: Vec<Ring> },
    Polygon { coordinates: PolygonCoords },
    MultiPolygon { coordinates: Vec<PolygonCoords> },
    GeometryCollection { geometries: Vec<Geometry> },
}

impl Geometry {
    /// Push every polygon contained in this geometry, in document order.
    fn collect_polygons<'a>(&'a self, out: &mut Vec<&'a PolygonCoords>) {
        match self {
            Geometry::Polygon { coordinates } => out.push(coordinates),
            Geometry::MultiPolygon { coordinates } => out.extend(coordinates.iter()),
            Geometry::GeometryCollection { geometries } => {
                for g in geometries {
                    g.collect_polygons(out);
                }
            }
            _ => {}
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Value,
}

#[derive(Clone, Debug, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

/// Any top-level GeoJSON object.
#[derive(Clone, Debug)]
pub enum Document {
    FeatureCollection(FeatureCollection),
    Feature(Feature),
    Geometry(Geometry),
}

impl Document {
    /// Read and parse a GeoJSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> TriResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TriError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// Dispatch on the `type` member; anything not a feature must be a geometry.
    pub fn from_value(value: Value) -> TriResult<Self> {
        let kind = value.get("type").and_then(Value::as_str).map(str::to_owned);
        let doc = match kind.as_deref() {
            Some("FeatureCollection") => Self::FeatureCollection(serde_json::from_value(value)?),
            Some("Feature") => Self::Feature(serde_json::from_value(value)?),
            _ => Self::Geometry(serde_json::from_value(value)?),
        };
        Ok(doc)
    }

    /// First feature of a collection; a lone Feature is its own first feature.
    pub fn first_feature(&self) -> Option<&Feature> {
        match self {
            Document::FeatureCollection(fc) => fc.features.first(),
            Document::Feature(f) => Some(f),
            Document::Geometry(_) => None,
        }
    }

    /// All polygons in document order, multi-geometries flattened.
    pub fn polygons(&self) -> Vec<&PolygonCoords> {
        let mut out = Vec::new();
        match self {
            Document::FeatureCollection(fc) => {
                for g in fc.features.iter().filter_map(|f| f.geometry.as_ref()) {
                    g.collect_polygons(&mut out);
                }
            }
            Document::Feature(f) => {
                if let Some(g) = &f.geometry {
                    g.collect_polygons(&mut out);
                }
            }
            Document::Geometry(g) => g.collect_polygons(&mut out),
        }
        out
    }
}

impl FromStr for Document {
    type Err = TriError;

    fn from_str(s: &str) -> TriResult<Self> {
        let value: Value = serde_json::from_str(s)?;
        Self::from_value(value)
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename = "Polygon")]
pub struct TriangleGeometry {
    pub coordinates: [[Point; 4]; 1],
}

/// One output triangle as a GeoJSON Feature with an empty property bag.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct TriangleFeature {
    pub properties: Map<String, Value>,
    pub geometry: TriangleGeometry,
}

impl From<&Triangle> for TriangleFeature {
    fn from(t: &Triangle) -> Self {
        Self {
            properties: Map::new(),
            geometry: TriangleGeometry {
                coordinates: [t.ring()],
            },
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct TriangleCollection {
    pub features: Vec<TriangleFeature>,
}

impl TriangleCollection {
    pub fn from_triangles(triangles: &[Triangle]) -> Self {
        Self {
            features: triangles.iter().map(TriangleFeature::from).collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Two-space indented JSON, as written to disk.
    pub fn to_pretty_json(&self) -> TriResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whitespace-free JSON, for embedding in a URL.
    pub fn to_compact_json(&self) -> TriResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
