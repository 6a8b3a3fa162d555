//! Triangulation backends.
//!
//! Two adapters share one capability, `Triangulate`:
//! - `FlatMesh` (`earcut`): first ring of the first feature, raw lon/lat, no holes.
//! - `Geographic` (`cesium`): first polygon with holes, flattened through a WGS84
//!   tangent plane, triangulated there, and mapped back to degrees.
//!
//! `Method` selects one at runtime and dispatches statically.

mod flat;
mod geographic;

use std::fmt;
use std::str::FromStr;

pub use flat::FlatMesh;
pub use geographic::{Geographic, PolygonMesh};

use crate::error::{TriError, TriResult};
use crate::geojson::Document;
use crate::winding::Triangle;

/// Polygon in, counter-clockwise triangles out.
pub trait Triangulate {
    fn triangulate(&self, doc: &Document) -> TriResult<Vec<Triangle>>;
}

/// Backend selector, as named on the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    Earcut,
    #[default]
    Cesium,
}

impl Method {
    pub const ALL: [Method; 2] = [Method::Earcut, Method::Cesium];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Earcut => "earcut",
            Method::Cesium => "cesium",
        }
    }

    /// Run the selected adapter with its default settings.
    pub fn triangulate(&self, doc: &Document) -> TriResult<Vec<Triangle>> {
        match self {
            Method::Earcut => FlatMesh.triangulate(doc),
            Method::Cesium => Geographic::default().triangulate(doc),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = TriError;

    fn from_str(s: &str) -> TriResult<Self> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| TriError::unknown_method(s))
    }
}

/// Run `earcutr` on flat 2D coordinates.
fn earcut_2d(coords: &[f64], hole_starts: &[usize]) -> TriResult<Vec<usize>> {
    earcutr::earcut(coords, hole_starts, 2).map_err(|e| TriError::triangulation(format!("{e:?}")))
}

#[cfg(test)]
mod tests;
