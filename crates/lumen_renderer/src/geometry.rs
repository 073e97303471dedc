//! Renderable geometry: a shape with emission and material.

use crate::intersectable::{GeoPoint, Intersectable};
use crate::material::{Color, Material};
use crate::plane::Plane;
use crate::polygon::{Polygon, Triangle};
use crate::sphere::Sphere;
use crate::tube::{Cylinder, Tube};
use lumen_math::{Point3, Ray, Vector3};

/// The closed set of supported shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
    Plane(Plane),
    Polygon(Polygon),
    Triangle(Triangle),
    Tube(Tube),
    Cylinder(Cylinder),
}

impl Shape {
    /// Unit surface normal at a point on the shape.
    pub fn normal_at(&self, point: &Point3) -> Option<Vector3> {
        match self {
            Shape::Sphere(s) => s.normal_at(point),
            Shape::Plane(s) => s.normal_at(point),
            Shape::Polygon(s) => s.normal_at(point),
            Shape::Triangle(s) => s.normal_at(point),
            Shape::Tube(s) => s.normal_at(point),
            Shape::Cylinder(s) => s.normal_at(point),
        }
    }

    /// Hit points along the ray up to `max_distance`.
    pub fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        match self {
            Shape::Sphere(s) => s.find_intersections(ray, max_distance),
            Shape::Plane(s) => s.find_intersections(ray, max_distance),
            Shape::Polygon(s) => s.find_intersections(ray, max_distance),
            Shape::Triangle(s) => s.find_intersections(ray, max_distance),
            Shape::Tube(s) => s.find_intersections(ray, max_distance),
            Shape::Cylinder(s) => s.find_intersections(ray, max_distance),
        }
    }
}

macro_rules! impl_shape_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Shape {
                fn from(shape: $variant) -> Self {
                    Shape::$variant(shape)
                }
            }
        )*
    };
}

impl_shape_from!(Sphere, Plane, Polygon, Triangle, Tube, Cylinder);

/// A shape placed in a scene, with its own emission and material.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    shape: Shape,
    emission: Color,
    material: Material,
}

impl Geometry {
    /// Create a black, non-emissive geometry with the default material.
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            shape: shape.into(),
            emission: Color::ZERO,
            material: Material::default(),
        }
    }

    pub fn with_emission(mut self, emission: Color) -> Self {
        self.emission = emission;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn emission(&self) -> Color {
        self.emission
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Unit surface normal at a point on this geometry.
    pub fn normal(&self, point: &Point3) -> Option<Vector3> {
        self.shape.normal_at(point)
    }
}

impl Intersectable for Geometry {
    fn find_geo_intersections_within(
        &self,
        ray: &Ray,
        max_distance: f64,
    ) -> Option<Vec<GeoPoint<'_>>> {
        let points = self.shape.find_intersections(ray, max_distance)?;
        Some(points.into_iter().map(|p| GeoPoint::new(self, p)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_geometry_defaults() {
        let geometry = Geometry::new(Sphere::new(Point3::ZERO, 1.0).unwrap());

        assert_eq!(geometry.emission(), Color::ZERO);
        assert_eq!(*geometry.material(), Material::default());
        assert!(matches!(geometry.shape(), Shape::Sphere(_)));
    }

    #[test]
    fn test_builders() {
        let material = Material::new(0.5, 0.5, 100).with_reflection(0.3);
        let geometry = Geometry::new(Sphere::new(Point3::ZERO, 1.0).unwrap())
            .with_emission(Color::new(0.2, 0.1, 0.0))
            .with_material(material);

        assert_eq!(geometry.emission(), Color::new(0.2, 0.1, 0.0));
        assert_eq!(geometry.material().kr, 0.3);
    }

    #[test]
    fn test_hits_reference_owner() {
        let geometry = Geometry::new(Sphere::new(Point3::new(0.0, 0.0, -3.0), 1.0).unwrap());
        let ray = Ray::new(Point3::ZERO, Vector3::new(0.0, 0.0, -1.0).unwrap());
        let hits = geometry.find_geo_intersections(&ray).unwrap();

        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|gp| std::ptr::eq(gp.geometry, &geometry)));
        assert_abs_diff_eq!(hits[0].point, Point3::new(0.0, 0.0, -2.0), epsilon = 1e-12);

        let normal = geometry.normal(&hits[0].point).unwrap();
        assert_abs_diff_eq!(normal, Vector3::new(0.0, 0.0, 1.0).unwrap(), epsilon = 1e-12);
    }
}
