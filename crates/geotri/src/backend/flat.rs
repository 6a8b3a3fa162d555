use super::{earcut_2d, Triangulate};
use crate::error::{TriError, TriResult};
use crate::geojson::{Document, Geometry};
use crate::winding::{triangles_from_indices, Triangle};

/// Plain earcut over the exterior ring of the first feature.
///
/// Holes are ignored and coordinates are used as given (no projection).
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatMesh;

impl Triangulate for FlatMesh {
    fn triangulate(&self, doc: &Document) -> TriResult<Vec<Triangle>> {
        let feature = doc
            .first_feature()
            .ok_or_else(|| TriError::missing_polygon("document has no features"))?;
        let ring = match &feature.geometry {
            Some(Geometry::Polygon { coordinates }) => coordinates
                .first()
                .ok_or_else(|| TriError::missing_polygon("polygon has no rings"))?,
            _ => {
                return Err(TriError::missing_polygon(
                    "first feature is not a Polygon",
                ))
            }
        };

        let vertices: Vec<f64> = ring.iter().flat_map(|p| [p.lon, p.lat]).collect();
        let indices = earcut_2d(&vertices, &[])?;
        tracing::debug!(
            vertices = ring.len(),
            indices = indices.len(),
            "earcut"
        );
        triangles_from_indices(&indices, |i| {
            Some([*vertices.get(2 * i)?, *vertices.get(2 * i + 1)?])
        })
    }
}
