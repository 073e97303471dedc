//! Sphere primitive for ray tracing.

use crate::error::{GeometryError, GeometryResult};
use lumen_math::util::align_zero;
use lumen_math::{Point3, Ray, Vector3};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Point3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Point3, radius: f64) -> GeometryResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { center, radius })
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Outward unit normal at a point on the surface.
    pub fn normal_at(&self, point: &Point3) -> Option<Vector3> {
        point.subtract(&self.center).ok().map(|v| v.normalized())
    }

    /// Intersect the ray with the sphere surface.
    ///
    /// Projects the origin-to-center vector onto the ray to find the closest
    /// approach, then steps back and forth along the ray by the half chord.
    /// Hits are returned in increasing ray parameter. Tangent rays miss.
    pub fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        let u = match self.center.subtract(&ray.origin()) {
            Ok(u) => u,
            // Ray starts at the center: the surface is exactly one radius away
            Err(_) => {
                return (align_zero(self.radius - max_distance) <= 0.0)
                    .then(|| vec![ray.point_at(self.radius)]);
            }
        };

        let tm = align_zero(ray.direction().dot(&u));
        let d = align_zero((u.length_squared() - tm * tm).max(0.0).sqrt());
        if align_zero(d - self.radius) >= 0.0 {
            return None;
        }

        let th = (self.radius * self.radius - d * d).sqrt();
        let points: Vec<Point3> = [align_zero(tm - th), align_zero(tm + th)]
            .into_iter()
            .filter(|&t| t > 0.0 && align_zero(t - max_distance) <= 0.0)
            .map(|t| ray.point_at(t))
            .collect();

        (!points.is_empty()).then_some(points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn vec3(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z).unwrap()
    }

    fn ray(origin: (f64, f64, f64), dir: (f64, f64, f64)) -> Ray {
        Ray::new(Point3::new(origin.0, origin.1, origin.2), vec3(dir.0, dir.1, dir.2))
    }

    fn hits(sphere: &Sphere, ray: &Ray) -> Option<Vec<Point3>> {
        sphere.find_intersections(ray, f64::INFINITY)
    }

    #[test]
    fn test_invalid_radius() {
        assert_eq!(
            Sphere::new(Point3::ZERO, 0.0),
            Err(GeometryError::InvalidRadius(0.0))
        );
        assert!(Sphere::new(Point3::ZERO, -1.0).is_err());
        assert_eq!(
            Sphere::new(Point3::ZERO, f64::INFINITY),
            Err(GeometryError::InvalidRadius(f64::INFINITY))
        );
        assert!(Sphere::new(Point3::ZERO, f64::NAN).is_err());
        assert!(Sphere::new(Point3::new(0.0, 0.0, 1.0), 2.5).is_ok());
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = Sphere::new(Point3::ZERO, 1.0).unwrap();
        let n = sphere.normal_at(&Point3::new(0.0, 0.0, 1.0)).unwrap();
        assert_eq!(n, vec3(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_ray_misses() {
        let sphere = Sphere::new(Point3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        assert_eq!(hits(&sphere, &ray((-1.0, 0.0, 0.0), (1.0, 1.0, 0.0))), None);
    }

    #[test]
    fn test_ray_crosses_sphere() {
        let sphere = Sphere::new(Point3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        let result = hits(&sphere, &ray((-1.0, 0.0, 0.0), (3.0, 1.0, 0.0))).unwrap();

        assert_eq!(result.len(), 2);
        assert_abs_diff_eq!(
            result[0],
            Point3::new(0.0651530771650466, 0.355051025721682, 0.0),
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            result[1],
            Point3::new(1.53484692283495, 0.844948974278318, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_ray_starts_inside() {
        let sphere = Sphere::new(Point3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        let result = hits(&sphere, &ray((0.5, 0.5, 0.0), (3.0, 1.0, 0.0))).unwrap();

        assert_eq!(result.len(), 1);
        assert_abs_diff_eq!(
            result[0],
            Point3::new(1.53484692283495, 0.844948974278318, 0.0),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_ray_starts_after_sphere() {
        let sphere = Sphere::new(Point3::ZERO, 2.0).unwrap();
        assert_eq!(hits(&sphere, &ray((3.0, 3.0, 3.0), (5.0, 5.0, 5.0))), None);
    }

    #[test]
    fn test_ray_starts_on_surface() {
        // Heading inside: only the far side counts
        let sphere = Sphere::new(Point3::new(1.0, 0.0, 0.0), 1.0).unwrap();
        let result = hits(&sphere, &ray((1.0, -1.0, 0.0), (1.0, 1.0, 0.0))).unwrap();
        assert_eq!(result.len(), 1);
        assert_abs_diff_eq!(result[0], Point3::new(2.0, 0.0, 0.0), epsilon = 1e-9);

        // Heading outside
        let sphere = Sphere::new(Point3::ZERO, 2.0).unwrap();
        assert_eq!(hits(&sphere, &ray((0.0, 0.0, 2.0), (3.0, 3.0, 3.0))), None);
    }

    #[test]
    fn test_ray_through_center() {
        let sphere = Sphere::new(Point3::ZERO, 2.0).unwrap();

        // Starts before the sphere
        let result = hits(&sphere, &ray((3.0, 0.0, 0.0), (-3.0, 0.0, 0.0))).unwrap();
        assert_eq!(result, vec![Point3::new(2.0, 0.0, 0.0), Point3::new(-2.0, 0.0, 0.0)]);

        // Starts on the surface, going in
        let result = hits(&sphere, &ray((2.0, 0.0, 0.0), (-5.0, 0.0, 0.0))).unwrap();
        assert_eq!(result, vec![Point3::new(-2.0, 0.0, 0.0)]);

        // Starts inside
        let result = hits(&sphere, &ray((1.0, 0.0, 0.0), (-5.0, 0.0, 0.0))).unwrap();
        assert_eq!(result, vec![Point3::new(-2.0, 0.0, 0.0)]);

        // Starts at the center
        let result = hits(&sphere, &ray((0.0, 0.0, 0.0), (-5.0, 0.0, 0.0))).unwrap();
        assert_eq!(result, vec![Point3::new(-2.0, 0.0, 0.0)]);

        // Starts on the surface, going out
        assert_eq!(hits(&sphere, &ray((2.0, 0.0, 0.0), (1.0, 0.0, 0.0))), None);

        // Starts after the sphere
        assert_eq!(hits(&sphere, &ray((3.0, 0.0, 0.0), (1.0, 0.0, 0.0))), None);
    }

    #[test]
    fn test_tangent_rays_miss() {
        let sphere = Sphere::new(Point3::ZERO, 2.0).unwrap();

        // Before, at and after the tangent point
        assert_eq!(hits(&sphere, &ray((2.0, 0.0, -3.0), (0.0, 0.0, 6.0))), None);
        assert_eq!(hits(&sphere, &ray((2.0, 0.0, 0.0), (0.0, 0.0, 3.0))), None);
        assert_eq!(hits(&sphere, &ray((2.0, 0.0, 3.0), (0.0, 0.0, 2.0))), None);
    }

    #[test]
    fn test_orthogonal_to_center_line_misses() {
        let sphere = Sphere::new(Point3::ZERO, 2.0).unwrap();
        assert_eq!(hits(&sphere, &ray((0.0, 0.0, 3.0), (2.0, 0.0, 0.0))), None);
    }

    #[test]
    fn test_max_distance_cuts_far_hits() {
        let sphere = Sphere::new(Point3::ZERO, 2.0).unwrap();
        let r = ray((3.0, 0.0, 0.0), (-1.0, 0.0, 0.0));

        assert_eq!(sphere.find_intersections(&r, 3.0).map(|v| v.len()), Some(1));
        assert_eq!(sphere.find_intersections(&r, 0.5), None);

        // From the center only the radius matters
        let from_center = ray((0.0, 0.0, 0.0), (0.0, 1.0, 0.0));
        assert_eq!(sphere.find_intersections(&from_center, 1.0), None);
        assert_eq!(
            sphere.find_intersections(&from_center, 2.0),
            Some(vec![Point3::new(0.0, 2.0, 0.0)])
        );
    }
}
