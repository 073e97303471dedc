//! Whitted-style recursive ray tracer.
//!
//! Each hit is shaded with its emission plus Phong diffuse and specular terms
//! from every light that reaches it. Shadows are softened by the transparency
//! of occluders. Reflection and refraction recurse until the depth limit or
//! until the accumulated attenuation drops below a threshold. Reflected and
//! refracted rays can be spread into a small jittered bundle for glossy and
//! diffuse-transparent surfaces.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::TracerError;
use crate::intersectable::{GeoPoint, Intersectable};
use crate::light::{Light, LightSource};
use crate::material::Color;
use crate::scene::Scene;
use lumen_math::util::align_zero;
use lumen_math::{Point3, Ray, Vector3};

/// Default recursion depth for reflected and refracted rays.
pub const MAX_CALC_COLOR_LEVEL: u32 = 10;

/// Contributions attenuated below this factor are not traced.
pub const MIN_CALC_COLOR_K: f64 = 0.001;

/// Attenuation of a primary ray.
pub const INITIAL_K: f64 = 1.0;

/// Trait for anything that turns a ray into a color.
pub trait RayTracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray) -> Color;
}

/// Parameters for spreading secondary rays into a bundle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlossySampling {
    ray_count: usize,
    distance: f64,
    radius: f64,
}

impl GlossySampling {
    /// `ray_count` rays aimed at a disc of `radius`, `distance` along the
    /// ideal secondary ray. One ray disables jittering.
    pub fn new(ray_count: usize, distance: f64, radius: f64) -> Result<Self, TracerError> {
        if ray_count == 0 {
            return Err(TracerError::InvalidRayCount);
        }
        if distance < 0.0 {
            return Err(TracerError::NegativeDistance(distance));
        }
        if radius < 0.0 {
            return Err(TracerError::NegativeRadius(radius));
        }
        Ok(Self {
            ray_count,
            distance,
            radius,
        })
    }

    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Tracer configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TracerSettings {
    /// Maximum number of shading levels along a ray path
    pub max_level: u32,

    /// Minimum accumulated attenuation worth tracing
    pub min_k: f64,

    /// Bundle secondary rays when set
    pub glossy: Option<GlossySampling>,

    /// Seed for the bundle jitter. Unseeded tracers draw from thread-local entropy.
    pub seed: Option<u64>,
}

impl Default for TracerSettings {
    fn default() -> Self {
        Self {
            max_level: MAX_CALC_COLOR_LEVEL,
            min_k: MIN_CALC_COLOR_K,
            glossy: None,
            seed: None,
        }
    }
}

/// The recursive Phong ray tracer.
pub struct BasicRayTracer {
    scene: Arc<Scene>,
    settings: TracerSettings,
}

impl BasicRayTracer {
    pub fn new(scene: Arc<Scene>) -> Self {
        log::debug!(
            "Tracing scene '{}': {} geometries, {} lights",
            scene.name,
            scene.geometries.len(),
            scene.light_count()
        );
        Self {
            scene,
            settings: TracerSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: TracerSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.settings.max_level = max_level;
        self
    }

    pub fn with_glossy(mut self, glossy: GlossySampling) -> Self {
        self.settings.glossy = Some(glossy);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.settings.seed = Some(seed);
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn settings(&self) -> &TracerSettings {
        &self.settings
    }

    fn trace_with(&self, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        match self.find_closest_intersection(ray) {
            Some(hit) => {
                self.calc_color(&hit, ray, self.settings.max_level, INITIAL_K, rng)
                    + self.scene.ambient_light.intensity()
            }
            None => self.scene.background,
        }
    }

    fn find_closest_intersection(&self, ray: &Ray) -> Option<GeoPoint<'_>> {
        let hits = self.scene.geometries.find_geo_intersections(ray)?;
        ray.find_closest(hits, |gp| gp.point)
    }

    fn calc_color(
        &self,
        hit: &GeoPoint<'_>,
        ray: &Ray,
        level: u32,
        k: f64,
        rng: &mut dyn RngCore,
    ) -> Color {
        let color = hit.geometry.emission() + self.calc_local_effects(hit, ray, k);
        if level <= 1 {
            return color;
        }
        color + self.calc_global_effects(hit, ray, level, k, rng)
    }

    /// Diffuse and specular light from every light that reaches the hit.
    fn calc_local_effects(&self, hit: &GeoPoint<'_>, ray: &Ray, k: f64) -> Color {
        let Some(n) = hit.geometry.normal(&hit.point) else {
            return Color::ZERO;
        };
        let v = ray.direction();
        let nv = align_zero(n.dot(&v));
        if nv == 0.0 {
            return Color::ZERO;
        }

        let material = hit.geometry.material();
        let mut color = Color::ZERO;

        for light in &self.scene.lights {
            let Some(l) = light.direction(&hit.point) else {
                continue;
            };
            let nl = align_zero(n.dot(&l));
            // Light and viewer must be on the same side of the surface
            if nl * nv <= 0.0 {
                continue;
            }

            let ktr = self.transparency(light, &l, &n, hit);
            if ktr * k <= self.settings.min_k {
                continue;
            }

            let intensity = light.intensity(&hit.point) * ktr;
            color += diffuse(material.kd, nl, intensity)
                + specular(material.ks, material.shininess, &l, &n, &v, nl, intensity);
        }

        color
    }

    /// Fraction of a light's energy that reaches the hit past any occluders.
    fn transparency(&self, light: &Light, l: &Vector3, n: &Vector3, hit: &GeoPoint<'_>) -> f64 {
        let shadow_ray = Ray::with_normal(hit.point, -*l, n);
        let light_distance = light.distance(&hit.point);

        let Some(occluders) = self
            .scene
            .geometries
            .find_geo_intersections_within(&shadow_ray, light.distance(&shadow_ray.origin()))
        else {
            return 1.0;
        };

        let mut ktr = 1.0;
        for occluder in occluders {
            if align_zero(occluder.point.distance(&hit.point) - light_distance) <= 0.0 {
                ktr *= occluder.geometry.material().kt;
                if ktr < self.settings.min_k {
                    return 0.0;
                }
            }
        }
        ktr
    }

    fn calc_global_effects(
        &self,
        hit: &GeoPoint<'_>,
        ray: &Ray,
        level: u32,
        k: f64,
        rng: &mut dyn RngCore,
    ) -> Color {
        let Some(n) = hit.geometry.normal(&hit.point) else {
            return Color::ZERO;
        };
        let material = hit.geometry.material();
        let mut color = Color::ZERO;

        let kkr = k * material.kr;
        if kkr > self.settings.min_k {
            if let Some(reflected) = reflected_ray(&n, hit.point, ray) {
                color += self.calc_secondary(&reflected, &n, level, kkr, material.kr, rng);
            }
        }

        let kkt = k * material.kt;
        if kkt > self.settings.min_k {
            let refracted = refracted_ray(&n, hit.point, ray);
            color += self.calc_secondary(&refracted, &n, level, kkt, material.kt, rng);
        }

        color
    }

    /// Trace a secondary ray, or the bundle around it, and average the result.
    ///
    /// Rays that escape the scene contribute nothing.
    fn calc_secondary(
        &self,
        ray: &Ray,
        n: &Vector3,
        level: u32,
        kk: f64,
        kx: f64,
        rng: &mut dyn RngCore,
    ) -> Color {
        let rays = match &self.settings.glossy {
            Some(glossy) => {
                ray.beam_of_rays(n, glossy.distance, glossy.radius, glossy.ray_count, &mut *rng)
            }
            None => vec![*ray],
        };

        let mut sum = Color::ZERO;
        for secondary in &rays {
            if let Some(hit) = self.find_closest_intersection(secondary) {
                sum += self.calc_color(&hit, secondary, level - 1, kk, rng) * kx;
            }
        }
        sum / rays.len() as f64
    }
}

impl RayTracer for BasicRayTracer {
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.settings.seed {
            Some(seed) => self.trace_with(ray, &mut StdRng::seed_from_u64(ray_seed(seed, ray))),
            None => self.trace_with(ray, &mut rand::thread_rng()),
        }
    }
}

/// Per-ray seed, so a seeded render does not depend on which thread traced
/// which pixel. Mixed with splitmix64 so the value is stable across builds.
fn ray_seed(seed: u64, ray: &Ray) -> u64 {
    let origin = ray.origin();
    let direction = ray.direction();
    [
        origin.x(),
        origin.y(),
        origin.z(),
        direction.x(),
        direction.y(),
        direction.z(),
    ]
    .iter()
    .fold(splitmix64(seed), |h, c| splitmix64(h ^ c.to_bits()))
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn diffuse(kd: f64, nl: f64, intensity: Color) -> Color {
    intensity * (kd * nl.abs())
}

fn specular(
    ks: f64,
    shininess: i32,
    l: &Vector3,
    n: &Vector3,
    v: &Vector3,
    nl: f64,
    intensity: Color,
) -> Color {
    let r = l.as_dvec3() - n.as_dvec3() * (2.0 * nl);
    let minus_vr = (-v.as_dvec3().dot(r)).max(0.0);
    intensity * (ks * minus_vr.powi(shininess))
}

/// Mirror direction `v - 2(v·n)n`. `None` when the ray grazes the surface.
fn reflected_ray(n: &Vector3, point: Point3, ray: &Ray) -> Option<Ray> {
    let v = ray.direction();
    let vn = align_zero(v.dot(n));
    if vn == 0.0 {
        return None;
    }
    let r = v.subtract(&n.scale(2.0 * vn).ok()?).ok()?;
    Some(Ray::with_normal(point, r, n))
}

/// Transmitted ray: the incoming direction, continued past the surface.
fn refracted_ray(n: &Vector3, point: Point3, ray: &Ray) -> Ray {
    Ray::with_normal(point, ray.direction(), n)
}
