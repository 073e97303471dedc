//! Infinite plane primitive.

use crate::error::GeometryResult;
use lumen_math::util::{align_zero, is_zero};
use lumen_math::{Point3, Ray, Vector3};

/// An infinite plane through a reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    point: Point3,
    normal: Vector3,
}

impl Plane {
    /// Create a plane from a point on it and a normal (normalized on construction).
    pub fn new(point: Point3, normal: Vector3) -> Self {
        Self {
            point,
            normal: normal.normalized(),
        }
    }

    /// Create the plane through three points.
    ///
    /// The normal is `(p2 - p1) x (p3 - p1)`, normalized. Fails if two points
    /// coincide or all three are collinear.
    pub fn from_points(p1: Point3, p2: Point3, p3: Point3) -> GeometryResult<Self> {
        let a = p2.subtract(&p1)?;
        let b = p3.subtract(&p1)?;
        let normal = a.cross(&b)?;
        Ok(Self::new(p1, normal))
    }

    /// The reference point.
    pub fn point(&self) -> Point3 {
        self.point
    }

    /// The unit normal.
    pub fn normal(&self) -> Vector3 {
        self.normal
    }

    /// The normal is the same everywhere on a plane.
    pub fn normal_at(&self, _point: &Point3) -> Option<Vector3> {
        Some(self.normal)
    }

    /// Intersect the ray with the plane.
    ///
    /// Misses when the ray is parallel to the plane, lies in it, starts at the
    /// reference point, or the plane is behind the origin.
    pub fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        let to_plane = self.point.subtract(&ray.origin()).ok()?;

        let numerator = align_zero(self.normal.dot(&to_plane));
        if is_zero(numerator) {
            return None;
        }
        let denominator = align_zero(self.normal.dot(&ray.direction()));
        if is_zero(denominator) {
            return None;
        }

        let t = align_zero(numerator / denominator);
        if t <= 0.0 || align_zero(t - max_distance) > 0.0 {
            return None;
        }
        Some(vec![ray.point_at(t)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeometryError;
    use lumen_math::MathError;

    fn vec3(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z).unwrap()
    }

    /// The plane z = 0, built from three points in it.
    fn xy_plane() -> Plane {
        Plane::from_points(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
            Point3::new(1.0, 2.0, 0.0),
        )
        .unwrap()
    }

    fn hits(plane: &Plane, origin: Point3, dir: Vector3) -> Option<Vec<Point3>> {
        plane.find_intersections(&Ray::new(origin, dir), f64::INFINITY)
    }

    #[test]
    fn test_from_points_normal() {
        let plane = Plane::from_points(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
        .unwrap();
        let sqrt3 = 1.0 / 3f64.sqrt();
        let n = plane.normal();

        assert!((n.length() - 1.0).abs() < 1e-12);
        // Either orientation is a valid normal
        let expected = vec3(sqrt3, sqrt3, sqrt3);
        assert!(n == expected || n == -expected);
        assert_eq!(plane.normal_at(&Point3::new(1.0, 0.0, 0.0)), Some(n));
    }

    #[test]
    fn test_degenerate_points_rejected() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let q = Point3::new(2.0, 2.0, 3.0);

        // Coincident points
        assert_eq!(
            Plane::from_points(p, p, q),
            Err(GeometryError::Degenerate(MathError::ZeroVector))
        );
        // Collinear points
        assert!(Plane::from_points(p, q, Point3::new(3.0, 2.0, 3.0)).is_err());
    }

    #[test]
    fn test_ray_crosses_plane() {
        let plane = xy_plane();
        let result = hits(&plane, Point3::new(0.0, 1.0, -1.0), vec3(0.0, 1.0, 1.0));
        assert_eq!(result.map(|v| v.len()), Some(1));
    }

    #[test]
    fn test_ray_away_from_plane() {
        let plane = xy_plane();
        assert_eq!(hits(&plane, Point3::new(0.0, 1.0, -1.0), vec3(0.0, 1.0, -1.0)), None);
    }

    #[test]
    fn test_parallel_rays_miss() {
        let plane = xy_plane();
        // Outside the plane
        assert_eq!(hits(&plane, Point3::new(0.0, 1.0, 1.0), vec3(0.0, 1.0, 0.0)), None);
        // Inside the plane
        assert_eq!(hits(&plane, Point3::new(0.0, 1.0, 0.0), vec3(1.0, 1.0, 0.0)), None);
        assert_eq!(hits(&plane, Point3::new(5.0, 5.0, 0.0), vec3(1.0, 1.0, 0.0)), None);
    }

    #[test]
    fn test_orthogonal_rays() {
        let plane = xy_plane();
        let n = vec3(0.0, 0.0, 1.0);

        // Before the plane
        assert_eq!(
            hits(&plane, Point3::new(0.0, 1.0, -1.0), n),
            Some(vec![Point3::new(0.0, 1.0, 0.0)])
        );
        // In the plane
        assert_eq!(hits(&plane, Point3::new(0.0, 2.0, 0.0), n), None);
        // After the plane
        assert_eq!(hits(&plane, Point3::new(0.0, 1.0, 1.0), n), None);
    }

    #[test]
    fn test_ray_from_reference_point() {
        let plane = xy_plane();
        assert_eq!(hits(&plane, Point3::new(0.0, 1.0, 0.0), vec3(0.0, 1.0, 1.0)), None);
    }

    #[test]
    fn test_max_distance() {
        let plane = Plane::new(Point3::new(0.0, 0.0, -2.0), vec3(0.0, 0.0, 1.0));
        let ray = Ray::new(Point3::ZERO, vec3(0.0, 0.0, -1.0));

        assert_eq!(plane.find_intersections(&ray, 1.0), None);
        assert_eq!(
            plane.find_intersections(&ray, 2.0),
            Some(vec![Point3::new(0.0, 0.0, -2.0)])
        );
    }
}
