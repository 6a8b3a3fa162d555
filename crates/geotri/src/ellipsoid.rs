//! Reference ellipsoid and tangent plane.
//!
//! - `Ellipsoid`: geodetic <-> earth-centred cartesian conversions (WGS84 by default).
//! - `TangentPlane`: local east/north plane used to flatten a polygon before earcut.
//!
//! Angles are radians inside this module; degrees only appear at the GeoJSON edge.

use nalgebra::{Vector2, Vector3};

/// Newton iteration stops once the ellipsoid equation residual is below this.
const SURFACE_EPS: f64 = 1e-12;
/// Squared-norm threshold (in radii units) under which a point counts as the centre.
const CENTER_TOLERANCE_SQUARED: f64 = 0.1;
const MAX_SURFACE_ITERATIONS: usize = 64;
/// Ray/plane denominators below this are treated as parallel.
const PARALLEL_EPS: f64 = 1e-15;

/// Geodetic coordinate: longitude and latitude in radians, height in metres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cartographic {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}

impl Cartographic {
    pub fn from_degrees(lon: f64, lat: f64, height: f64) -> Self {
        Self {
            longitude: lon.to_radians(),
            latitude: lat.to_radians(),
            height,
        }
    }

    /// `[lon, lat]` in degrees.
    pub fn to_degrees(&self) -> [f64; 2] {
        [self.longitude.to_degrees(), self.latitude.to_degrees()]
    }
}

/// Triaxial ellipsoid centred at the origin.
#[derive(Clone, Copy, Debug)]
pub struct Ellipsoid {
    radii_squared: Vector3<f64>,
    one_over_radii: Vector3<f64>,
    one_over_radii_squared: Vector3<f64>,
}

impl Ellipsoid {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        let radii = Vector3::new(x, y, z);
        Self {
            radii_squared: radii.component_mul(&radii),
            one_over_radii: radii.map(|r| 1.0 / r),
            one_over_radii_squared: radii.map(|r| 1.0 / (r * r)),
        }
    }

    /// WGS84 semi-axes in metres.
    pub fn wgs84() -> Self {
        Self::new(6378137.0, 6378137.0, 6356752.314_245_179_3)
    }

    /// Unit normal of the surface at a point already on (or near) the surface.
    #[inline]
    pub fn geodetic_surface_normal(&self, p: &Vector3<f64>) -> Vector3<f64> {
        p.component_mul(&self.one_over_radii_squared).normalize()
    }

    /// Unit normal for a geodetic latitude/longitude.
    pub fn geodetic_surface_normal_cartographic(&self, c: &Cartographic) -> Vector3<f64> {
        let cos_lat = c.latitude.cos();
        Vector3::new(
            cos_lat * c.longitude.cos(),
            cos_lat * c.longitude.sin(),
            c.latitude.sin(),
        )
        .normalize()
    }

    pub fn cartographic_to_cartesian(&self, c: &Cartographic) -> Vector3<f64> {
        let n = self.geodetic_surface_normal_cartographic(c);
        let k = self.radii_squared.component_mul(&n);
        let gamma = n.dot(&k).sqrt();
        k / gamma + n * c.height
    }

    /// Point on the surface along the geodetic normal through `p`.
    ///
    /// `None` when `p` sits at the centre and no direction is defined.
    pub fn scale_to_geodetic_surface(&self, p: &Vector3<f64>) -> Option<Vector3<f64>> {
        let scaled = p.component_mul(&self.one_over_radii);
        let sq = scaled.component_mul(&scaled);
        let squared_norm = sq.sum();
        let ratio = (1.0 / squared_norm).sqrt();
        let intersection = p * ratio;
        if squared_norm < CENTER_TOLERANCE_SQUARED {
            return ratio.is_finite().then_some(intersection);
        }

        let inv_sq = self.one_over_radii_squared;
        let gradient = intersection.component_mul(&inv_sq) * 2.0;
        let mut lambda = ((1.0 - ratio) * p.norm()) / (0.5 * gradient.norm());
        let mut correction = 0.0;
        let mut mult = Vector3::repeat(1.0);
        for _ in 0..MAX_SURFACE_ITERATIONS {
            lambda -= correction;
            mult = inv_sq.map(|w| 1.0 / (1.0 + lambda * w));
            let mult2 = mult.component_mul(&mult);
            let mult3 = mult2.component_mul(&mult);
            let func = sq.dot(&mult2) - 1.0;
            if func.abs() <= SURFACE_EPS {
                break;
            }
            let denominator = sq.component_mul(&mult3).dot(&inv_sq);
            correction = func / (-2.0 * denominator);
        }
        Some(p.component_mul(&mult))
    }

    /// Inverse of `cartographic_to_cartesian`; `None` at the centre.
    pub fn cartesian_to_cartographic(&self, p: &Vector3<f64>) -> Option<Cartographic> {
        let surface = self.scale_to_geodetic_surface(p)?;
        let n = self.geodetic_surface_normal(&surface);
        let h = p - surface;
        Some(Cartographic {
            longitude: n.y.atan2(n.x),
            latitude: n.z.asin(),
            height: h.dot(p).signum() * h.norm(),
        })
    }

    /// East, north, up unit vectors at a surface point.
    pub fn east_north_up(&self, origin: &Vector3<f64>) -> [Vector3<f64>; 3] {
        let up = self.geodetic_surface_normal(origin);
        let east = if origin.x.abs() < 1e-14 && origin.y.abs() < 1e-14 {
            // Poles: longitude is undefined, pick the +y meridian.
            Vector3::new(0.0, 1.0, 0.0)
        } else {
            Vector3::new(-origin.y, origin.x, 0.0).normalize()
        };
        let north = up.cross(&east);
        [east, north, up]
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::wgs84()
    }
}

/// Plane tangent to the ellipsoid, with east/north in-plane axes.
#[derive(Clone, Copy, Debug)]
pub struct TangentPlane {
    pub origin: Vector3<f64>,
    pub x_axis: Vector3<f64>,
    pub y_axis: Vector3<f64>,
    pub normal: Vector3<f64>,
}

impl TangentPlane {
    /// Plane at the surface point below `origin`.
    pub fn new(ellipsoid: &Ellipsoid, origin: &Vector3<f64>) -> Option<Self> {
        let origin = ellipsoid.scale_to_geodetic_surface(origin)?;
        let [x_axis, y_axis, normal] = ellipsoid.east_north_up(&origin);
        Some(Self {
            origin,
            x_axis,
            y_axis,
            normal,
        })
    }

    /// Plane at the centre of the axis-aligned bounding box of `points`.
    pub fn from_points(ellipsoid: &Ellipsoid, points: &[Vector3<f64>]) -> Option<Self> {
        let first = points.first()?;
        let (lo, hi) = points
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.inf(p), hi.sup(p)));
        Self::new(ellipsoid, &((lo + hi) * 0.5))
    }

    /// Project `p` onto the plane along the ray through the earth centre.
    ///
    /// Tries the outward direction first, then the inward one; `None` if the ray is
    /// parallel to the plane both ways.
    pub fn project_point(&self, p: &Vector3<f64>) -> Option<Vector2<f64>> {
        let dir = p.normalize();
        let hit = self
            .ray_intersection(p, &dir)
            .or_else(|| self.ray_intersection(p, &-dir))?;
        let v = hit - self.origin;
        Some(Vector2::new(self.x_axis.dot(&v), self.y_axis.dot(&v)))
    }

    /// Project every point; fails as a whole if any single point fails.
    pub fn project_points(&self, points: &[Vector3<f64>]) -> Option<Vec<Vector2<f64>>> {
        points.iter().map(|p| self.project_point(p)).collect()
    }

    fn ray_intersection(&self, start: &Vector3<f64>, dir: &Vector3<f64>) -> Option<Vector3<f64>> {
        let denominator = self.normal.dot(dir);
        if denominator.abs() < PARALLEL_EPS {
            return None;
        }
        let t = self.normal.dot(&(self.origin - start)) / denominator;
        (t >= 0.0).then(|| start + dir * t)
    }
}
