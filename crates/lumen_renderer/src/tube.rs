//! Infinite tubes and finite cylinders around an axis ray.
//!
//! Only normals are provided. Ray intersection with the curved surface is not
//! implemented, so both shapes never report hits.

use crate::error::{GeometryError, GeometryResult};
use lumen_math::util::{align_zero, is_zero};
use lumen_math::{Point3, Ray, Vector3};

/// An infinite tube of constant radius around an axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tube {
    axis: Ray,
    radius: f64,
}

impl Tube {
    pub fn new(axis: Ray, radius: f64) -> GeometryResult<Self> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(GeometryError::InvalidRadius(radius));
        }
        Ok(Self { axis, radius })
    }

    pub fn axis(&self) -> &Ray {
        &self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Radial unit normal: from the point's projection on the axis to the point.
    pub fn normal_at(&self, point: &Point3) -> Option<Vector3> {
        let t = point
            .subtract(&self.axis.origin())
            .map_or(0.0, |v| self.axis.direction().dot(&v));
        self.radial_normal(point, t)
    }

    fn radial_normal(&self, point: &Point3, t: f64) -> Option<Vector3> {
        let foot = if is_zero(t) {
            self.axis.origin()
        } else {
            self.axis.point_at(t)
        };
        point.subtract(&foot).ok().map(|v| v.normalized())
    }

    pub fn find_intersections(&self, _ray: &Ray, _max_distance: f64) -> Option<Vec<Point3>> {
        None
    }
}

/// A tube cut to `height` along its axis, starting at the axis origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cylinder {
    tube: Tube,
    height: f64,
}

impl Cylinder {
    pub fn new(axis: Ray, radius: f64, height: f64) -> GeometryResult<Self> {
        if !height.is_finite() || height <= 0.0 {
            return Err(GeometryError::InvalidHeight(height));
        }
        Ok(Self {
            tube: Tube::new(axis, radius)?,
            height,
        })
    }

    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Axis direction on either cap plane, radial normal elsewhere.
    pub fn normal_at(&self, point: &Point3) -> Option<Vector3> {
        let axis = self.tube.axis();
        let Ok(v) = point.subtract(&axis.origin()) else {
            return Some(axis.direction());
        };

        let t = align_zero(axis.direction().dot(&v));
        if is_zero(t) || is_zero(t - self.height) {
            return Some(axis.direction());
        }
        self.tube.radial_normal(point, t)
    }

    pub fn find_intersections(&self, _ray: &Ray, _max_distance: f64) -> Option<Vec<Point3>> {
        None
    }
}
