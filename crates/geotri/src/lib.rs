//! Polygon triangulation glue for GeoJSON inputs.
//!
//! Pipeline
//! - `geojson`: parse the input document and serialize the triangle collection.
//! - `backend`: pick one of two triangulation adapters (`Method`) and run it.
//! - `winding`: re-orient every emitted triangle counter-clockwise.
//! - `ellipsoid`: WGS84 conversions used by the geographic adapter.
//!
//! The triangulation itself is earcut (`earcutr`); this crate only reshapes
//! coordinates on the way in and out.

pub mod backend;
pub mod ellipsoid;
pub mod error;
pub mod geojson;
pub mod winding;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use backend::{FlatMesh, Geographic, Method, Triangulate};
pub use error::{TriError, TriResult};
pub use geojson::{Document, TriangleCollection};
pub use winding::{signed_area2, Point, Triangle};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::backend::{FlatMesh, Geographic, Method, Triangulate};
    pub use crate::ellipsoid::{Cartographic, Ellipsoid, TangentPlane};
    pub use crate::error::{TriError, TriResult};
    pub use crate::geojson::{Document, Feature, Geometry, Position, TriangleCollection};
    pub use crate::winding::{signed_area2, triangles_from_indices, Point, Triangle};
}
