use rand::Rng;

use crate::util::align_zero;
use crate::{Point3, Vector3};

/// Distance a secondary ray's origin is pushed off the surface it leaves.
pub const DELTA: f64 = 0.1;

/// A ray in 3D space with an origin and a unit direction.
///
/// Rays are used for raytracing - they represent a half-line starting at
/// `origin` and traveling along `direction`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    pub fn new(origin: Point3, direction: Vector3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    /// Create a ray leaving a surface.
    ///
    /// The origin is moved by [`DELTA`] along `normal`, toward the side the
    /// ray travels to, so the ray cannot hit the surface it starts on.
    pub fn with_normal(point: Point3, direction: Vector3, normal: &Vector3) -> Self {
        let delta = if direction.dot(normal) >= 0.0 { DELTA } else { -DELTA };
        let origin = Point3::from(point.as_dvec3() + normal.as_dvec3() * delta);
        Self::new(origin, direction)
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vector3 {
        self.direction
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    pub fn point_at(&self, t: f64) -> Point3 {
        Point3::from(self.origin.as_dvec3() + self.direction.as_dvec3() * t)
    }

    /// Pick the item whose point lies nearest to the ray origin.
    ///
    /// On ties the earliest item wins.
    pub fn find_closest<T, I, F>(&self, items: I, point_of: F) -> Option<T>
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> Point3,
    {
        let mut closest = None;
        let mut min_distance = f64::MAX;

        for item in items {
            let distance = point_of(&item).distance_squared(&self.origin);
            if distance < min_distance {
                min_distance = distance;
                closest = Some(item);
            }
        }

        closest
    }

    /// Find the point nearest to the ray origin.
    pub fn find_closest_point(&self, points: &[Point3]) -> Option<Point3> {
        self.find_closest(points.iter().copied(), |p| *p)
    }

    /// Build a bundle of rays scattered around this one.
    ///
    /// The bundle always starts with this ray. The remaining `count - 1`
    /// rays aim at random points on a disc of `radius`, centered `distance`
    /// along the ray and perpendicular to it. Rays that end up on the other
    /// side of the surface with `normal` are dropped, so the bundle may hold
    /// fewer than `count` rays.
    pub fn beam_of_rays<R: Rng + ?Sized>(
        &self,
        normal: &Vector3,
        distance: f64,
        radius: f64,
        count: usize,
        rng: &mut R,
    ) -> Vec<Ray> {
        if count <= 1 {
            return vec![*self];
        }

        let (w, v) = self.direction.orthonormal_pair();
        let center = self.point_at(distance).as_dvec3();
        let normal_dot = align_zero(normal.dot(&self.direction));

        let mut beam = Vec::with_capacity(count);
        beam.push(*self);

        for _ in 1..count {
            let (x, y) = random_in_unit_disk(rng);
            let target = Point3::from(
                center + w.as_dvec3() * (x * radius) + v.as_dvec3() * (y * radius),
            );
            let Ok(direction) = target.subtract(&self.origin) else {
                continue;
            };
            if normal_dot * align_zero(normal.dot(&direction)) > 0.0 {
                beam.push(Ray::new(self.origin, direction));
            }
        }

        beam
    }
}

/// Sample a random point in the unit disk.
fn random_in_unit_disk<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    loop {
        let x: f64 = rng.gen_range(-1.0..1.0);
        let y: f64 = rng.gen_range(-1.0..1.0);
        if x * x + y * y < 1.0 {
            return (x, y);
        }
    }
}
