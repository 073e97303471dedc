//! Pinhole camera with a view plane for primary ray generation.

use crate::error::{CameraError, CameraResult};
use lumen_math::util::is_zero;
use lumen_math::{Point3, Ray, Vector3};

/// Pinhole camera looking through a rectangular view plane.
///
/// The view plane sits `distance` along `forward` and spans `width` by
/// `height` world units. It is divided into the pixel grid only when a ray is
/// requested, so one camera can serve any resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    origin: Point3,
    forward: Vector3,
    up: Vector3,
    right: Vector3,

    // View plane (unset until configured)
    width: f64,
    height: f64,
    distance: f64,
}

impl Camera {
    /// Create a camera at `origin` looking along `to`, with `up` orthogonal to `to`.
    ///
    /// Both vectors are normalized. `right` is derived as `to x up`.
    pub fn new(origin: Point3, to: Vector3, up: Vector3) -> CameraResult<Self> {
        if !is_zero(to.dot(&up)) {
            return Err(CameraError::NotOrthogonal);
        }

        let forward = to.normalized();
        let up = up.normalized();
        let right = forward.cross(&up)?.normalized();

        Ok(Self {
            origin,
            forward,
            up,
            right,
            width: 0.0,
            height: 0.0,
            distance: 0.0,
        })
    }

    /// Set the view plane size in world units.
    pub fn with_view_plane_size(mut self, width: f64, height: f64) -> CameraResult<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(CameraError::NonPositiveViewPlane { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(self)
    }

    /// Set the distance from the camera origin to the view plane.
    pub fn with_distance(mut self, distance: f64) -> CameraResult<Self> {
        if is_zero(distance) {
            return Err(CameraError::ZeroDistance);
        }
        self.distance = distance;
        Ok(self)
    }

    pub fn origin(&self) -> Point3 {
        self.origin
    }

    pub fn forward(&self) -> Vector3 {
        self.forward
    }

    pub fn up(&self) -> Vector3 {
        self.up
    }

    pub fn right(&self) -> Vector3 {
        self.right
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Check the camera can cast rays for an `nx` by `ny` image.
    pub fn validate(&self, nx: u32, ny: u32) -> CameraResult<()> {
        if is_zero(self.distance) {
            return Err(CameraError::ZeroDistance);
        }
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(CameraError::ViewPlaneNotSet);
        }
        if nx == 0 || ny == 0 {
            return Err(CameraError::InvalidResolution { nx, ny });
        }
        Ok(())
    }

    /// Build the ray from the camera origin through the center of pixel
    /// (`col`, `row`) of an `nx` by `ny` grid laid over the view plane.
    ///
    /// Row 0 is the top of the image.
    pub fn construct_ray_through_pixel(
        &self,
        nx: u32,
        ny: u32,
        col: u32,
        row: u32,
    ) -> CameraResult<Ray> {
        self.validate(nx, ny)?;

        let center = self.origin + self.forward.scale(self.distance)?;

        let rx = self.width / nx as f64;
        let ry = self.height / ny as f64;
        let xj = (col as f64 - (nx as f64 - 1.0) / 2.0) * rx;
        let yi = -(row as f64 - (ny as f64 - 1.0) / 2.0) * ry;

        let mut pixel = center;
        if !is_zero(xj) {
            pixel = pixel + self.right.scale(xj)?;
        }
        if !is_zero(yi) {
            pixel = pixel + self.up.scale(yi)?;
        }

        Ok(Ray::new(self.origin, pixel.subtract(&self.origin)?))
    }
}
