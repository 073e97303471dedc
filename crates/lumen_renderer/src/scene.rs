//! Scene description read by the ray tracer.

use crate::intersectable::{Geometries, Intersectable};
use crate::light::{AmbientLight, Light};
use crate::material::Color;

/// Everything the tracer needs to shade a ray.
///
/// The tracer only reads a scene. Build it up front, then share it behind an
/// `Arc`.
pub struct Scene {
    /// Scene name, used in log output
    pub name: String,

    /// Color returned for primary rays that hit nothing
    pub background: Color,

    /// Added once to every visible hit
    pub ambient_light: AmbientLight,

    /// All intersectable objects
    pub geometries: Geometries,

    /// Lights contributing direct illumination
    pub lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene with a black background and no ambient light.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            background: Color::ZERO,
            ambient_light: AmbientLight::default(),
            geometries: Geometries::new(),
            lights: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn with_ambient_light(mut self, ambient_light: AmbientLight) -> Self {
        self.ambient_light = ambient_light;
        self
    }

    pub fn with_geometries(mut self, geometries: Geometries) -> Self {
        self.geometries = geometries;
        self
    }

    /// Add one object to the scene's geometry.
    pub fn with_geometry(mut self, geometry: impl Intersectable + 'static) -> Self {
        self.geometries.add(geometry);
        self
    }

    pub fn with_lights(mut self, lights: Vec<Light>) -> Self {
        self.lights = lights;
        self
    }

    /// Add one light.
    pub fn with_light(mut self, light: impl Into<Light>) -> Self {
        self.lights.push(light.into());
        self
    }

    /// Get light count.
    pub fn light_count(&self) -> usize {
        self.lights.len()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::light::PointLight;
    use crate::sphere::Sphere;
    use lumen_math::Point3;

    #[test]
    fn test_empty_scene() {
        let scene = Scene::new("empty");

        assert_eq!(scene.name, "empty");
        assert_eq!(scene.background, Color::ZERO);
        assert_eq!(scene.ambient_light.intensity(), Color::ZERO);
        assert!(scene.geometries.is_empty());
        assert_eq!(scene.light_count(), 0);
    }

    #[test]
    fn test_scene_builders() {
        let scene = Scene::new("builders")
            .with_background(Color::new(0.1, 0.2, 0.3))
            .with_ambient_light(AmbientLight::new(Color::ONE, 0.1))
            .with_geometry(Geometry::new(Sphere::new(Point3::ZERO, 1.0).unwrap()))
            .with_light(PointLight::new(Color::ONE, Point3::new(0.0, 5.0, 0.0)));

        assert_eq!(scene.background, Color::new(0.1, 0.2, 0.3));
        assert_eq!(scene.geometries.len(), 1);
        assert_eq!(scene.light_count(), 1);
        assert!(matches!(scene.lights[0], Light::Point(_)));
    }
}
