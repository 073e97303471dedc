//! Points in 3D space.

use std::fmt;
use std::ops::Add;

use approx::{AbsDiffEq, RelativeEq};
use glam::DVec3;

use crate::error::MathResult;
use crate::Vector3;

/// A location in 3D space.
///
/// Unlike [`Vector3`], a point may sit anywhere, including the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point3(DVec3);

impl Point3 {
    /// The origin. Its main job is as the sentinel a [`Vector3`] may never equal.
    pub const ZERO: Point3 = Point3(DVec3::ZERO);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self(DVec3::new(x, y, z))
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn z(&self) -> f64 {
        self.0.z
    }

    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    /// The vector from `other` to `self`. Fails when the points coincide.
    pub fn subtract(&self, other: &Point3) -> MathResult<Vector3> {
        Vector3::from_dvec3(self.0 - other.0)
    }

    #[inline]
    pub fn distance_squared(&self, other: &Point3) -> f64 {
        self.0.distance_squared(other.0)
    }

    #[inline]
    pub fn distance(&self, other: &Point3) -> f64 {
        self.0.distance(other.0)
    }
}

impl Add<Vector3> for Point3 {
    type Output = Point3;

    fn add(self, rhs: Vector3) -> Self::Output {
        Point3(self.0 + rhs.as_dvec3())
    }
}

impl From<DVec3> for Point3 {
    fn from(v: DVec3) -> Self {
        Point3(v)
    }
}

impl fmt::Display for Point3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.0.x, self.0.y, self.0.z)
    }
}

impl AbsDiffEq for Point3 {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.0.x.abs_diff_eq(&other.0.x, epsilon)
            && self.0.y.abs_diff_eq(&other.0.y, epsilon)
            && self.0.z.abs_diff_eq(&other.0.z, epsilon)
    }
}

impl RelativeEq for Point3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.0.x.relative_eq(&other.0.x, epsilon, max_relative)
            && self.0.y.relative_eq(&other.0.y, epsilon, max_relative)
            && self.0.z.relative_eq(&other.0.z, epsilon, max_relative)
    }
}
