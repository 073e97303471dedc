//! Surface material coefficients for Phong shading.

use lumen_math::DVec3;

/// Color type alias (linear RGB, unbounded).
///
/// Colors only ever get added and scaled; clamping to a displayable range
/// happens when converting to bytes.
pub type Color = DVec3;

/// Phong material with reflection and transparency factors.
///
/// `kr` and `kt` attenuate reflected and transmitted light independently;
/// they are not required to sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Material {
    /// Diffuse coefficient
    pub kd: f64,
    /// Specular coefficient
    pub ks: f64,
    /// Specular exponent
    pub shininess: i32,
    /// Reflectivity: 1 is a perfect mirror, 0 a matte surface
    pub kr: f64,
    /// Transparency: 1 is fully translucent, 0 opaque
    pub kt: f64,
}

impl Material {
    /// Create an opaque, non-reflective material.
    pub fn new(kd: f64, ks: f64, shininess: i32) -> Self {
        Self {
            kd,
            ks,
            shininess,
            kr: 0.0,
            kt: 0.0,
        }
    }

    /// Set reflectivity, clamped to [0, 1].
    pub fn with_reflection(mut self, kr: f64) -> Self {
        self.kr = kr.clamp(0.0, 1.0);
        self
    }

    /// Set transparency, clamped to [0, 1].
    pub fn with_transparency(mut self, kt: f64) -> Self {
        self.kt = kt.clamp(0.0, 1.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_zero() {
        let m = Material::default();
        assert_eq!(m, Material::new(0.0, 0.0, 0));
    }

    #[test]
    fn test_coefficients_clamped() {
        let m = Material::new(0.5, 0.5, 30)
            .with_reflection(1.5)
            .with_transparency(-0.2);
        assert_eq!(m.kr, 1.0);
        assert_eq!(m.kt, 0.0);
        assert_eq!(m.shininess, 30);
    }
}
