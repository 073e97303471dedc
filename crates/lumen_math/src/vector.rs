//! Direction vectors that can never be zero.

use std::fmt;
use std::ops::Neg;

use approx::{AbsDiffEq, RelativeEq};
use glam::DVec3;

use crate::error::{MathError, MathResult};
use crate::util::is_zero;

/// A non-zero vector in 3D space.
///
/// Every operation that could collapse the result to the zero vector
/// returns a [`MathResult`], so a `Vector3` in hand is always usable as a
/// direction.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector3(DVec3);

impl Vector3 {
    /// Create a vector from its components.
    pub fn new(x: f64, y: f64, z: f64) -> MathResult<Self> {
        Self::from_dvec3(DVec3::new(x, y, z))
    }

    /// Wrap a glam vector, rejecting the zero vector.
    pub fn from_dvec3(v: DVec3) -> MathResult<Self> {
        if is_zero(v.x) && is_zero(v.y) && is_zero(v.z) {
            return Err(MathError::ZeroVector);
        }
        Ok(Self(v))
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

    /// The underlying glam vector.
    #[inline]
    pub fn as_dvec3(&self) -> DVec3 {
        self.0
    }

    pub fn add(&self, other: &Vector3) -> MathResult<Vector3> {
        Self::from_dvec3(self.0 + other.0)
    }

    pub fn subtract(&self, other: &Vector3) -> MathResult<Vector3> {
        Self::from_dvec3(self.0 - other.0)
    }

    /// Multiply by a scalar. Fails for a zero (or near-zero) factor.
    pub fn scale(&self, factor: f64) -> MathResult<Vector3> {
        Self::from_dvec3(self.0 * factor)
    }

    #[inline]
    pub fn dot(&self, other: &Vector3) -> f64 {
        self.0.dot(other.0)
    }

    /// Cross product. Fails for parallel operands.
    pub fn cross(&self, other: &Vector3) -> MathResult<Vector3> {
        Self::from_dvec3(self.0.cross(other.0))
    }

    #[inline]
    pub fn length_squared(&self) -> f64 {
        self.0.length_squared()
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.0.length()
    }

    /// Normalize in place.
    pub fn normalize(&mut self) -> &mut Self {
        self.0 /= self.0.length();
        self
    }

    /// Return a unit-length copy.
    pub fn normalized(&self) -> Vector3 {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Two unit vectors that together with this vector's direction form an
    /// orthonormal basis.
    pub fn orthonormal_pair(&self) -> (Vector3, Vector3) {
        let (a, b) = self.normalized().0.any_orthonormal_pair();
        (Self(a), Self(b))
    }
}

impl Neg for Vector3 {
    type Output = Vector3;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl From<Vector3> for DVec3 {
    fn from(v: Vector3) -> Self {
        v.0
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}, {}, {}>", self.0.x, self.0.y, self.0.z)
    }
}

impl AbsDiffEq for Vector3 {
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

impl RelativeEq for Vector3 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.0.x.relative_eq(&other.0.x, epsilon, max_relative)
            && self.0.y.relative_eq(&other.0.y, epsilon, max_relative)
            && self.0.z.relative_eq(&other.0.z, epsilon, max_relative)
    }
}
