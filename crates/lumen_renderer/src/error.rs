//! Error types for scene construction and rendering.
//!
//! Construction and configuration problems surface here. Numerical dead ends
//! during tracing (parallel rays, on-edge hits, zero-length derived vectors)
//! are not errors: they show up as `None` from the intersection and normal
//! queries.

use lumen_math::MathError;
use thiserror::Error;

/// Errors that can occur while building geometry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("radius must be positive, got {0}")]
    InvalidRadius(f64),

    #[error("cylinder height must be positive, got {0}")]
    InvalidHeight(f64),

    #[error("a polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("all vertices of a polygon must lie in the same plane")]
    NonPlanar,

    #[error("polygon vertices must be ordered and the polygon must be convex")]
    NonConvex,

    #[error("degenerate geometry: {0}")]
    Degenerate(#[from] MathError),
}

/// Errors that can occur while configuring the camera or casting rays from it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("camera up and forward vectors must be orthogonal")]
    NotOrthogonal,

    #[error("view plane size must be positive, got {width}x{height}")]
    NonPositiveViewPlane { width: f64, height: f64 },

    #[error("view plane distance cannot be zero")]
    ZeroDistance,

    #[error("view plane size has not been set")]
    ViewPlaneNotSet,

    #[error("resolution must be at least 1x1, got {nx}x{ny}")]
    InvalidResolution { nx: u32, ny: u32 },

    #[error("degenerate camera geometry: {0}")]
    Degenerate(#[from] MathError),
}

/// Errors that can occur while configuring the ray tracer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TracerError {
    #[error("glossy sampling needs at least one ray")]
    InvalidRayCount,

    #[error("glossy sampling distance cannot be negative, got {0}")]
    NegativeDistance(f64),

    #[error("glossy sampling radius cannot be negative, got {0}")]
    NegativeRadius(f64),
}

/// Errors that can occur when starting a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("render is missing a camera")]
    MissingCamera,

    #[error("render is missing a ray tracer")]
    MissingRayTracer,

    #[error("render is missing a pixel sink")]
    MissingPixelSink,

    #[error("camera error: {0}")]
    Camera(#[from] CameraError),

    #[error("failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type GeometryResult<T> = Result<T, GeometryError>;
pub type CameraResult<T> = Result<T, CameraError>;
pub type RenderResult<T> = Result<T, RenderError>;
