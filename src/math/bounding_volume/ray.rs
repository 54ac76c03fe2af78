use std::fmt;

use glam::{Mat4, Vec3};

use super::{EPSILON, Transformable};

#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
/// A half-line starting at `origin`. The direction is not required to be unit length, distances
/// returned by the intersection methods are in multiples of `direction`.
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Returns the point at `distance` units along the ray
    pub fn point(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }

    /// Intersects the ray with the triangle `v0, v1, v2` (Möller–Trumbore, "Fast, Minimum Storage
    /// Ray-Triangle Intersection"). Both faces are hit, there is no back-face culling.
    ///
    /// The returned distance is not clamped, a triangle behind the origin yields a negative
    /// value. Triangles nearly parallel to the ray, or degenerate ones, are reported as misses.
    pub fn triangle_intersection(&self, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
        let e1 = v1 - v0;
        let e2 = v2 - v0;

        let p = self.direction.cross(e2);
        let det = e1.dot(p);

        if det > -EPSILON && det < EPSILON {
            return None;
        }

        let t = self.origin - v0;
        let inv_det = 1.0 / det;

        let u = t.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = t.cross(e1);

        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        Some(e2.dot(q) * inv_det)
    }

    /// Intersects the ray with the plane through `plane_origin` with `plane_normal`.
    ///
    /// Only an exactly zero denominator counts as parallel. The distance may be negative.
    pub fn plane_intersection(&self, plane_origin: Vec3, plane_normal: Vec3) -> Option<f32> {
        let denominator = plane_normal.dot(self.direction);

        if denominator == 0.0 {
            return None;
        }

        Some(plane_normal.dot(plane_origin - self.origin) / denominator)
    }
}

impl Transformable for Ray {
    /// The origin is transformed as a point, the direction by the upper 3x3 block only and is
    /// not renormalized. Under non-uniform scale the direction length changes, so distances
    /// measured before and after the transform are not comparable.
    fn transformed(&self, transform: &Mat4) -> Self {
        Self {
            origin: (*transform * self.origin.extend(1.0)).truncate(),
            direction: transform.transform_vector3(self.direction),
        }
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.origin, self.direction)
    }
}
