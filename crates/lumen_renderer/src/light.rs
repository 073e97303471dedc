//! Light sources.

use crate::material::Color;
use lumen_math::{Point3, Vector3};

/// Trait for light sources the shader can query at a surface point.
pub trait LightSource: Send + Sync {
    /// Light arriving at `point`, attenuation included.
    fn intensity(&self, point: &Point3) -> Color;

    /// Unit direction from the light toward `point`. `None` when the light has
    /// no direction, or `point` sits on the light itself.
    fn direction(&self, point: &Point3) -> Option<Vector3>;

    /// Distance from the light to `point`. Infinite for lights without a position.
    fn distance(&self, point: &Point3) -> f64;
}

/// Uniform light added once to every visible hit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AmbientLight {
    intensity: Color,
}

impl AmbientLight {
    /// Ambient light of `color` scaled by the ambient coefficient `ka`.
    pub fn new(color: Color, ka: f64) -> Self {
        Self {
            intensity: color * ka,
        }
    }

    pub fn intensity(&self) -> Color {
        self.intensity
    }
}

impl LightSource for AmbientLight {
    fn intensity(&self, _point: &Point3) -> Color {
        self.intensity
    }

    fn direction(&self, _point: &Point3) -> Option<Vector3> {
        None
    }

    fn distance(&self, _point: &Point3) -> f64 {
        f64::INFINITY
    }
}

/// Light from infinitely far away along a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    intensity: Color,
    direction: Vector3,
}

impl DirectionalLight {
    pub fn new(intensity: Color, direction: Vector3) -> Self {
        Self {
            intensity,
            direction: direction.normalized(),
        }
    }
}

impl LightSource for DirectionalLight {
    fn intensity(&self, _point: &Point3) -> Color {
        self.intensity
    }

    fn direction(&self, _point: &Point3) -> Option<Vector3> {
        Some(self.direction)
    }

    fn distance(&self, _point: &Point3) -> f64 {
        f64::INFINITY
    }
}

/// Omnidirectional light at a position, attenuated by `1 / (kc + kl·d + kq·d²)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    intensity: Color,
    position: Point3,
    kc: f64,
    kl: f64,
    kq: f64,
}

impl PointLight {
    /// Create a point light with no distance falloff.
    pub fn new(intensity: Color, position: Point3) -> Self {
        Self {
            intensity,
            position,
            kc: 1.0,
            kl: 0.0,
            kq: 0.0,
        }
    }

    /// Set the constant, linear and quadratic attenuation factors.
    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> Self {
        self.kc = kc;
        self.kl = kl;
        self.kq = kq;
        self
    }

    pub fn position(&self) -> Point3 {
        self.position
    }
}

impl LightSource for PointLight {
    fn intensity(&self, point: &Point3) -> Color {
        let d = self.position.distance(point);
        self.intensity / (self.kc + self.kl * d + self.kq * d * d)
    }

    fn direction(&self, point: &Point3) -> Option<Vector3> {
        point.subtract(&self.position).ok().map(|v| v.normalized())
    }

    fn distance(&self, point: &Point3) -> f64 {
        self.position.distance(point)
    }
}

/// A point light that only shines into the half-space its axis faces,
/// scaled by the cosine to that axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    point: PointLight,
    axis: Vector3,
}

impl SpotLight {
    pub fn new(intensity: Color, position: Point3, axis: Vector3) -> Self {
        Self {
            point: PointLight::new(intensity, position),
            axis: axis.normalized(),
        }
    }

    pub fn with_attenuation(mut self, kc: f64, kl: f64, kq: f64) -> Self {
        self.point = self.point.with_attenuation(kc, kl, kq);
        self
    }
}

impl LightSource for SpotLight {
    fn intensity(&self, point: &Point3) -> Color {
        let Some(l) = self.point.direction(point) else {
            return Color::ZERO;
        };
        let cos = self.axis.dot(&l);
        if cos < 0.0 {
            return Color::ZERO;
        }
        self.point.intensity(point) * cos
    }

    fn direction(&self, point: &Point3) -> Option<Vector3> {
        self.point.direction(point)
    }

    fn distance(&self, point: &Point3) -> f64 {
        self.point.distance(point)
    }
}

/// The closed set of scene lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient(AmbientLight),
    Directional(DirectionalLight),
    Point(PointLight),
    Spot(SpotLight),
}

impl Light {
    fn source(&self) -> &dyn LightSource {
        match self {
            Light::Ambient(l) => l,
            Light::Directional(l) => l,
            Light::Point(l) => l,
            Light::Spot(l) => l,
        }
    }
}

impl LightSource for Light {
    fn intensity(&self, point: &Point3) -> Color {
        self.source().intensity(point)
    }

    fn direction(&self, point: &Point3) -> Option<Vector3> {
        self.source().direction(point)
    }

    fn distance(&self, point: &Point3) -> f64 {
        self.source().distance(point)
    }
}

impl From<AmbientLight> for Light {
    fn from(light: AmbientLight) -> Self {
        Light::Ambient(light)
    }
}

impl From<DirectionalLight> for Light {
    fn from(light: DirectionalLight) -> Self {
        Light::Directional(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<SpotLight> for Light {
    fn from(light: SpotLight) -> Self {
        Light::Spot(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn vec3(x: f64, y: f64, z: f64) -> Vector3 {
        Vector3::new(x, y, z).unwrap()
    }

    #[test]
    fn test_ambient_scaled_by_ka() {
        let ambient = AmbientLight::new(Color::new(0.5, 1.0, 0.2), 0.5);
        assert_eq!(ambient.intensity(), Color::new(0.25, 0.5, 0.1));
        assert_eq!(AmbientLight::default().intensity(), Color::ZERO);

        let light = Light::from(ambient);
        assert_eq!(light.direction(&Point3::ZERO), None);
        assert_eq!(light.distance(&Point3::ZERO), f64::INFINITY);
    }

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Color::ONE, vec3(0.0, -2.0, 0.0));
        let p = Point3::new(10.0, 3.0, -7.0);

        assert_eq!(light.direction(&p), Some(vec3(0.0, -1.0, 0.0)));
        assert_eq!(light.intensity(&p), Color::ONE);
        assert_eq!(light.distance(&p), f64::INFINITY);
    }

    #[test]
    fn test_point_light_attenuation() {
        let light = PointLight::new(Color::splat(12.0), Point3::new(0.0, 2.0, 0.0))
            .with_attenuation(1.0, 0.5, 0.25);
        let p = Point3::ZERO;

        // d = 2: 1 + 1 + 1
        assert_abs_diff_eq!(light.intensity(&p), Color::splat(4.0), epsilon = 1e-12);
        assert_eq!(light.distance(&p), 2.0);
        assert_eq!(light.direction(&p), Some(vec3(0.0, -1.0, 0.0)));

        // No falloff by default
        let plain = PointLight::new(Color::ONE, Point3::new(0.0, 2.0, 0.0));
        assert_eq!(plain.intensity(&Point3::new(0.0, -100.0, 0.0)), Color::ONE);
    }

    #[test]
    fn test_point_light_at_its_own_position() {
        let light = PointLight::new(Color::ONE, Point3::new(1.0, 1.0, 1.0));
        assert_eq!(light.direction(&Point3::new(1.0, 1.0, 1.0)), None);
    }

    #[test]
    fn test_spot_light_cone() {
        let light = SpotLight::new(Color::ONE, Point3::new(0.0, 0.0, 1.0), vec3(0.0, 0.0, -1.0));

        // Straight along the axis
        assert_abs_diff_eq!(light.intensity(&Point3::ZERO), Color::ONE, epsilon = 1e-12);

        // 60 degrees off the axis
        let off_axis = Point3::new(3f64.sqrt(), 0.0, 0.0);
        assert_abs_diff_eq!(light.intensity(&off_axis), Color::splat(0.5), epsilon = 1e-12);

        // Behind the light
        assert_eq!(light.intensity(&Point3::new(0.0, 0.0, 2.0)), Color::ZERO);
    }

    #[test]
    fn test_light_enum_dispatch() {
        let spot: Light = SpotLight::new(Color::ONE, Point3::ZERO, vec3(1.0, 0.0, 0.0))
            .with_attenuation(2.0, 0.0, 0.0)
            .into();
        let p = Point3::new(4.0, 0.0, 0.0);

        assert_abs_diff_eq!(spot.intensity(&p), Color::splat(0.5), epsilon = 1e-12);
        assert_eq!(spot.distance(&p), 4.0);
        assert_eq!(spot.direction(&p), Some(vec3(1.0, 0.0, 0.0)));
    }
}
