//! Convex planar polygons and triangles.

use crate::error::{GeometryError, GeometryResult};
use crate::plane::Plane;
use lumen_math::util::{align_zero, is_zero};
use lumen_math::{Point3, Ray, Vector3};

/// A convex polygon with ordered, coplanar vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point3>,
    plane: Plane,
}

impl Polygon {
    /// Create a polygon from vertices ordered along its edge path.
    ///
    /// Rejects fewer than 3 vertices, vertices off the plane of the first
    /// three, and orderings that are not convex. Consecutive duplicate or
    /// collinear vertices are reported as degenerate.
    pub fn new(vertices: Vec<Point3>) -> GeometryResult<Self> {
        if vertices.len() < 3 {
            return Err(GeometryError::TooFewVertices(vertices.len()));
        }

        let plane = Plane::from_points(vertices[0], vertices[1], vertices[2])?;
        if vertices.len() > 3 {
            check_convex(&vertices, &plane.normal())?;
        }

        Ok(Self { vertices, plane })
    }

    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    pub fn plane(&self) -> &Plane {
        &self.plane
    }

    pub fn normal_at(&self, _point: &Point3) -> Option<Vector3> {
        Some(self.plane.normal())
    }

    /// Intersect the ray with the polygon interior.
    ///
    /// After hitting the plane, the hit must lie strictly inside every edge:
    /// the ray direction has to fall on the same side of each side-plane
    /// spanned by the ray origin and an edge. Hits on an edge or vertex miss.
    pub fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        let points = self.plane.find_intersections(ray, max_distance)?;

        let origin = ray.origin();
        let direction = ray.direction();
        let spokes = self
            .vertices
            .iter()
            .map(|v| v.subtract(&origin))
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        let mut positive = None;
        for (i, spoke) in spokes.iter().enumerate() {
            let next = &spokes[(i + 1) % spokes.len()];
            let side = spoke.cross(next).ok()?.normalized();
            let sign = align_zero(direction.dot(&side));
            if sign == 0.0 {
                return None;
            }
            match positive {
                None => positive = Some(sign > 0.0),
                Some(p) if p != (sign > 0.0) => return None,
                Some(_) => {}
            }
        }

        Some(points)
    }
}

/// Walk the edges and check every vertex is in the plane and every turn goes
/// the same way around the normal.
fn check_convex(vertices: &[Point3], normal: &Vector3) -> GeometryResult<()> {
    let last = vertices.len() - 1;
    let mut edge1 = vertices[last].subtract(&vertices[last - 1])?;
    let mut edge2 = vertices[0].subtract(&vertices[last])?;
    let positive = edge1.cross(&edge2)?.dot(normal) > 0.0;

    for i in 1..vertices.len() {
        if !is_zero(vertices[i].subtract(&vertices[0])?.dot(normal)) {
            return Err(GeometryError::NonPlanar);
        }
        edge1 = edge2;
        edge2 = vertices[i].subtract(&vertices[i - 1])?;
        if positive != (edge1.cross(&edge2)?.dot(normal) > 0.0) {
            return Err(GeometryError::NonConvex);
        }
    }
    Ok(())
}

/// A triangle: the three-vertex polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    polygon: Polygon,
}

impl Triangle {
    pub fn new(a: Point3, b: Point3, c: Point3) -> GeometryResult<Self> {
        Ok(Self {
            polygon: Polygon::new(vec![a, b, c])?,
        })
    }

    pub fn vertices(&self) -> &[Point3] {
        self.polygon.vertices()
    }

    pub fn plane(&self) -> &Plane {
        self.polygon.plane()
    }

    pub fn normal_at(&self, point: &Point3) -> Option<Vector3> {
        self.polygon.normal_at(point)
    }

    pub fn find_intersections(&self, ray: &Ray, max_distance: f64) -> Option<Vec<Point3>> {
        self.polygon.find_intersections(ray, max_distance)
    }
}
