//! Lumen Renderer - CPU Whitted-style ray tracing
//!
//! Casts one primary ray per pixel through a pinhole camera and shades hits
//! with Phong lighting, transparency-aware shadows and recursive reflection
//! and refraction. Images render on the calling thread or on a worker pool.

mod camera;
mod cursor;
mod error;
mod geometry;
mod image_buffer;
mod intersectable;
mod light;
mod material;
mod plane;
mod polygon;
mod renderer;
mod scene;
mod sphere;
mod tracer;
mod tube;

pub use camera::Camera;
pub use cursor::{Pixel, PixelCursor};
pub use error::{
    CameraError, CameraResult, GeometryError, GeometryResult, RenderError, RenderResult,
    TracerError,
};
pub use geometry::{Geometry, Shape};
pub use image_buffer::{color_to_rgba, ImageBuffer, PixelSink};
pub use intersectable::{GeoPoint, Geometries, Intersectable};
pub use light::{AmbientLight, DirectionalLight, Light, LightSource, PointLight, SpotLight};
pub use material::{Color, Material};
pub use plane::Plane;
pub use polygon::{Polygon, Triangle};
pub use renderer::{
    resolve_thread_count, Execution, LogProgress, ProgressObserver, Renderer, SPARE_THREADS,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use tracer::{
    BasicRayTracer, GlossySampling, RayTracer, TracerSettings, INITIAL_K, MAX_CALC_COLOR_LEVEL,
    MIN_CALC_COLOR_K,
};
pub use tube::{Cylinder, Tube};

/// Re-export the math types the public API is written in
pub use lumen_math::{Point3, Ray, Vector3};
