//! Intersectable trait, intersection records and the geometry aggregate.

use std::ptr;

use crate::geometry::Geometry;
use lumen_math::{Point3, Ray};

/// A ray hit: the point and the geometry it lies on.
///
/// The geometry is borrowed, never copied, so the tracer reads the material
/// and emission of the exact object that was hit.
#[derive(Debug, Clone, Copy)]
pub struct GeoPoint<'a> {
    pub geometry: &'a Geometry,
    pub point: Point3,
}

impl<'a> GeoPoint<'a> {
    pub fn new(geometry: &'a Geometry, point: Point3) -> Self {
        Self { geometry, point }
    }
}

/// Two hits are equal when they are on the same geometry object at the same point.
impl PartialEq for GeoPoint<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.geometry, other.geometry) && self.point == other.point
    }
}

/// Trait for anything a ray can be intersected with.
pub trait Intersectable: Send + Sync {
    /// All hits no farther than `max_distance` along the ray, or `None`.
    fn find_geo_intersections_within(&self, ray: &Ray, max_distance: f64)
        -> Option<Vec<GeoPoint<'_>>>;

    /// All hits along the ray, or `None`.
    fn find_geo_intersections(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        self.find_geo_intersections_within(ray, f64::INFINITY)
    }

    /// Hit points without their geometry.
    fn find_intersections(&self, ray: &Ray) -> Option<Vec<Point3>> {
        self.find_geo_intersections(ray)
            .map(|hits| hits.into_iter().map(|gp| gp.point).collect())
    }
}

/// An ordered collection of intersectables. Collections nest.
pub struct Geometries {
    members: Vec<Box<dyn Intersectable>>,
}

impl Geometries {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
        }
    }

    /// Add a member. Members are queried in insertion order.
    pub fn add(&mut self, member: impl Intersectable + 'static) {
        self.members.push(Box::new(member));
    }

    /// Builder form of [`Geometries::add`].
    pub fn with(mut self, member: impl Intersectable + 'static) -> Self {
        self.add(member);
        self
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Intersectable> {
        self.members.iter().map(|m| m.as_ref())
    }
}

impl Default for Geometries {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<Geometry> for Geometries {
    fn from_iter<I: IntoIterator<Item = Geometry>>(iter: I) -> Self {
        let mut geometries = Self::new();
        for geometry in iter {
            geometries.add(geometry);
        }
        geometries
    }
}

impl Intersectable for Geometries {
    /// Concatenation of every member's hits, unsorted.
    fn find_geo_intersections_within(
        &self,
        ray: &Ray,
        max_distance: f64,
    ) -> Option<Vec<GeoPoint<'_>>> {
        let mut result: Option<Vec<GeoPoint<'_>>> = None;

        for member in &self.members {
            if let Some(hits) = member.find_geo_intersections_within(ray, max_distance) {
                result.get_or_insert_with(Vec::new).extend(hits);
            }
        }

        result
    }
}
