use nalgebra::{Vector2, Vector3};

use super::{earcut_2d, Triangulate};
use crate::ellipsoid::{Cartographic, Ellipsoid, TangentPlane};
use crate::error::{TriError, TriResult};
use crate::geojson::{Document, PolygonCoords, Ring};
use crate::winding::{triangles_from_indices, Point, Triangle};

/// Earcut on the WGS84 tangent plane, with holes.
///
/// Positions keep their altitude (per-position height) while triangulating; the
/// output is projected back to `[lon, lat]` degrees.
#[derive(Clone, Copy, Debug)]
pub struct Geographic {
    pub ellipsoid: Ellipsoid,
    /// Relative tolerance for dropping repeated positions within a ring.
    pub dedup_eps: f64,
}

impl Default for Geographic {
    fn default() -> Self {
        Self {
            ellipsoid: Ellipsoid::wgs84(),
            dedup_eps: 1e-10,
        }
    }
}

/// Cartesian positions plus a triangle index buffer into them.
#[derive(Clone, Debug, Default)]
pub struct PolygonMesh {
    pub positions: Vec<Vector3<f64>>,
    pub indices: Vec<usize>,
}

impl Geographic {
    /// Triangulate one polygon hierarchy into earth-centred positions and indices.
    pub fn mesh(&self, polygon: &PolygonCoords) -> TriResult<PolygonMesh> {
        let (outer, holes) = polygon
            .split_first()
            .ok_or_else(|| TriError::missing_polygon("polygon has no rings"))?;

        let mut positions = self.ring_to_cartesian(outer);
        if positions.len() < 3 {
            return Err(TriError::degenerate(format!(
                "outer ring has {} distinct positions",
                positions.len()
            )));
        }
        let plane = TangentPlane::from_points(&self.ellipsoid, &positions)
            .ok_or_else(|| TriError::degenerate("no tangent plane for outer ring"))?;
        let mut flat = plane
            .project_points(&positions)
            .ok_or_else(|| TriError::degenerate("outer ring does not project onto tangent plane"))?;
        ensure_ccw(&mut positions, &mut flat);

        let mut hole_starts = Vec::with_capacity(holes.len());
        for (k, hole) in holes.iter().enumerate() {
            let mut hole_positions = self.ring_to_cartesian(hole);
            if hole_positions.len() < 3 {
                tracing::debug!(hole = k, "skipping hole with fewer than 3 positions");
                continue;
            }
            let Some(mut hole_flat) = plane.project_points(&hole_positions) else {
                tracing::debug!(hole = k, "skipping hole that does not project");
                continue;
            };
            ensure_ccw(&mut hole_positions, &mut hole_flat);
            hole_starts.push(positions.len());
            positions.extend(hole_positions);
            flat.extend(hole_flat);
        }

        let coords: Vec<f64> = flat.iter().flat_map(|p| [p.x, p.y]).collect();
        let mut indices = earcut_2d(&coords, &hole_starts)?;
        if indices.len() < 3 {
            // Keep a (possibly degenerate) triangle rather than an empty mesh.
            indices = vec![0, 1, 2];
        }
        tracing::debug!(
            positions = positions.len(),
            holes = hole_starts.len(),
            indices = indices.len(),
            "geographic"
        );
        Ok(PolygonMesh { positions, indices })
    }

    /// Degrees/metres to cartesian, with repeated positions (including the closing one) removed.
    fn ring_to_cartesian(&self, ring: &Ring) -> Vec<Vector3<f64>> {
        let mut out: Vec<Vector3<f64>> = ring
            .iter()
            .map(|p| {
                self.ellipsoid
                    .cartographic_to_cartesian(&Cartographic::from_degrees(p.lon, p.lat, p.alt))
            })
            .collect();
        let eps = self.dedup_eps;
        out.dedup_by(|b, a| approx_eq(a, b, eps));
        if out.len() > 1 && approx_eq(&out[0], &out[out.len() - 1], eps) {
            out.pop();
        }
        out
    }
}

impl Triangulate for Geographic {
    fn triangulate(&self, doc: &Document) -> TriResult<Vec<Triangle>> {
        let polygon = doc
            .polygons()
            .into_iter()
            .next()
            .ok_or_else(|| TriError::missing_polygon("document has no Polygon geometry"))?;
        let mesh = self.mesh(polygon)?;
        let lonlat: Vec<Point> = mesh
            .positions
            .iter()
            .map(|p| {
                self.ellipsoid
                    .cartesian_to_cartographic(p)
                    .map(|c| c.to_degrees())
                    .ok_or_else(|| TriError::degenerate("position at the ellipsoid centre"))
            })
            .collect::<TriResult<_>>()?;
        triangles_from_indices(&mesh.indices, |i| lonlat.get(i).copied())
    }
}

/// Component-wise equality within a relative (and equally sized absolute) tolerance.
fn approx_eq(a: &Vector3<f64>, b: &Vector3<f64>, eps: f64) -> bool {
    a.iter().zip(b.iter()).all(|(&x, &y)| {
        let diff = (x - y).abs();
        diff <= eps || diff <= eps * x.abs().max(y.abs())
    })
}

/// Twice the shoelace area of a closed-implicit ring.
fn ring_area2(ring: &[Vector2<f64>]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

/// Reverse both views of a ring unless it is counter-clockwise in the plane.
fn ensure_ccw(positions: &mut [Vector3<f64>], flat: &mut [Vector2<f64>]) {
    if ring_area2(flat) <= 0.0 {
        positions.reverse();
        flat.reverse();
    }
}
