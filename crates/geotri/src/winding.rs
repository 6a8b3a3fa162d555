//! Triangle winding normalization.
//!
//! Every triangle leaving a backend goes through `Triangle::ccw`, which swaps the
//! second and third vertices when the cross product is negative. Zero-area
//! triangles are kept as-is; nothing is filtered here.

use crate::error::{TriError, TriResult};

/// 2D point `[x, y]` (longitude, latitude for geographic data).
pub type Point = [f64; 2];

/// Twice the signed area of `(p0, p1, p2)`.
/// Positive for counter-clockwise, negative for clockwise, zero when collinear.
#[inline]
pub fn signed_area2(p0: Point, p1: Point, p2: Point) -> f64 {
    (p1[0] - p0[0]) * (p2[1] - p0[1]) - (p1[1] - p0[1]) * (p2[0] - p0[0])
}

/// Triangle with counter-clockwise (or degenerate) vertex order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub vertices: [Point; 3],
}

impl Triangle {
    /// Orient `(p0, p1, p2)` counter-clockwise; clockwise input becomes `(p0, p2, p1)`.
    #[inline]
    pub fn ccw(p0: Point, p1: Point, p2: Point) -> Self {
        let vertices = if signed_area2(p0, p1, p2) < 0.0 {
            [p0, p2, p1]
        } else {
            [p0, p1, p2]
        };
        Self { vertices }
    }

    #[inline]
    pub fn signed_area2(&self) -> f64 {
        let [a, b, c] = self.vertices;
        signed_area2(a, b, c)
    }

    /// Closed ring `[p0, p1, p2, p0]`.
    #[inline]
    pub fn ring(&self) -> [Point; 4] {
        let [a, b, c] = self.vertices;
        [a, b, c, a]
    }
}

/// Build normalized triangles from an index buffer, three indices at a time.
///
/// `vertex_of` maps an index to its point; `None` marks an out-of-range index.
pub fn triangles_from_indices<F>(indices: &[usize], mut vertex_of: F) -> TriResult<Vec<Triangle>>
where
    F: FnMut(usize) -> Option<Point>,
{
    if indices.len() % 3 != 0 {
        return Err(TriError::bad_indices(format!(
            "{} indices is not a whole number of triangles",
            indices.len()
        )));
    }
    let mut lookup = |i: usize| {
        vertex_of(i).ok_or_else(|| TriError::bad_indices(format!("index {i} out of range")))
    };
    indices
        .chunks_exact(3)
        .map(|tri| -> TriResult<Triangle> {
            Ok(Triangle::ccw(lookup(tri[0])?, lookup(tri[1])?, lookup(tri[2])?))
        })
        .collect()
}
