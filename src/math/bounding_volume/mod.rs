mod aabb;
mod frustum;
pub mod geometry;
pub mod intersection;
mod plane;
mod ray;
mod sphere;
mod space;

pub use aabb::*;
pub use frustum::*;
pub use plane::*;
pub use ray::*;
pub use sphere::*;
pub use space::*;

use glam::Vec3;

/// Near-zero threshold used for determinant, length and parallelism checks
pub const EPSILON: f32 = f32::EPSILON;

/// A sphere root must be strictly greater than this to count as a hit. Rejects hits at (or
/// numerically very close to) the ray origin.
pub const SPHERE_HIT_EPSILON: f32 = 4.37114e-05;

/// Result of intersecting a ray with a volume.
///
/// `count` is the number of distances present. For boxes `min` and `max` are both set on a hit
/// (and equal when the ray only grazes the box). For spheres each root is reported only if it
/// passed [`SPHERE_HIT_EPSILON`], so a ray starting inside a sphere yields `count == 1` with
/// only `max` set.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RayIntersection {
    pub count: u8,
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl RayIntersection {
    pub const MISS: Self = Self { count: 0, min: None, max: None };

    pub(crate) fn from_roots(min: Option<f32>, max: Option<f32>) -> Self {
        let count = min.is_some() as u8 + max.is_some() as u8;
        Self { count, min, max }
    }

    pub fn is_hit(&self) -> bool {
        self.count > 0
    }

    /// Smallest reported distance
    pub fn nearest(&self) -> Option<f32> {
        self.min.or(self.max)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
/// A bounding volume of either kind, used where a caller stores per-object bounds without caring
/// which shape they are.
pub enum BoundingVolume {
    Sphere(Sphere),
    AABB(AABB),
    #[default]
    None,
}

impl BoundingVolume {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn new_sphere(center: Vec3, radius: f32) -> Self {
        Self::Sphere(Sphere::new(center, radius))
    }

    pub fn new_aabb(min: Vec3, max: Vec3) -> Self {
        Self::AABB(AABB::new(min, max))
    }

    /// Checks if two bounding volumes intersect. [`BoundingVolume::None`] never intersects.
    pub fn intersects(&self, other: &Self) -> bool {
        use intersection::*;

        match (self, other) {
            (Self::Sphere(s1), Self::Sphere(s2)) => sphere_sphere(s1, s2),
            (Self::AABB(a1), Self::AABB(a2)) => aabb_aabb(a1, a2),

            (Self::Sphere(s), Self::AABB(a)) |
            (Self::AABB(a), Self::Sphere(s)) => aabb_sphere(a, s),

            (Self::None, _) |
            (_, Self::None) => false,
        }
    }

    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        match self {
            Self::Sphere(sphere) => sphere.intersects_ray(ray),
            Self::AABB(aabb) => aabb.intersects_ray(ray),
            Self::None => false,
        }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        match self {
            Self::Sphere(sphere) => sphere.contains_point(point),
            Self::AABB(aabb) => aabb.contains_point(point),
            Self::None => false,
        }
    }
}
