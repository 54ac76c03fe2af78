use std::fmt;

use glam::{Mat3, Mat4, Vec3};

use super::{intersection, Ray, RayIntersection, Sphere, Transformable};

#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
/// Axis-aligned bounding box stored as a center and non-negative half-widths. `min` and `max`
/// are derived.
pub struct AABB {
    center: Vec3,
    extents: Vec3,
}

impl AABB {
    /// Creates a box from two opposite corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        let mut aabb = Self::default();
        aabb.set(min, max);
        aabb
    }

    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self { center, extents: extents.abs() }
    }

    /// Smallest box containing every point. Empty input gives the default (zero) box.
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some((first, rest)) = points.split_first() else {
            return Self::default();
        };

        let mut aabb = Self::new(*first, *first);
        for &point in rest {
            aabb.include_point(point);
        }
        aabb
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn extents(&self) -> Vec3 {
        self.extents
    }

    pub fn size(&self) -> Vec3 {
        self.extents * 2.0
    }

    /// The corner with the smallest x, y and z coordinates
    pub fn min(&self) -> Vec3 {
        self.center - self.extents
    }

    /// The corner with the largest x, y and z coordinates
    pub fn max(&self) -> Vec3 {
        self.center + self.extents
    }

    /// Redefines the box by two opposite corners. Corners swapped on any axis give the same box.
    pub fn set(&mut self, min: Vec3, max: Vec3) {
        self.center = (min + max) * 0.5;
        self.extents = (max - self.center).abs();
    }

    /// Grows the box so that it contains `point`
    pub fn include_point(&mut self, point: Vec3) {
        let min = self.min().min(point);
        let max = self.max().max(point);
        self.set(min, max);
    }

    /// Grows the box so that it contains `other`
    pub fn include_aabb(&mut self, other: &AABB) {
        let min = self.min().min(other.min());
        let max = self.max().max(other.max());
        self.set(min, max);
    }

    /// Boundary points are contained
    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).abs().cmple(self.extents).all()
    }

    pub fn intersects_aabb(&self, other: &AABB) -> bool {
        intersection::aabb_aabb(self, other)
    }

    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        intersection::aabb_sphere(self, sphere)
    }

    /// Rays with a (near) zero direction never intersect, even when the origin is inside the box
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        self.intersect_ray(ray).is_hit()
    }

    /// Slab intersection. Returns 2 distances when the ray crosses the box, 1 when it only
    /// touches an edge or corner. Distances can be negative when the origin is past or inside
    /// the box.
    pub fn intersect_ray(&self, ray: &Ray) -> RayIntersection {
        intersection::aabb_ray(self, ray)
    }

    /// Projects the box onto the line through the origin along `normal`, returning the
    /// `(min, max)` interval in units of `normal`.
    pub fn project(&self, normal: Vec3) -> (f32, f32) {
        let p = normal.dot(self.center);
        let d = normal.abs().dot(self.extents);
        (p - d, p + d)
    }

    /// The corner lying furthest against `normal`
    pub fn negative_vertex(&self, normal: Vec3) -> Vec3 {
        let size = self.size();
        let mut result = self.min();

        if normal.x < 0.0 {
            result.x += size.x;
        }
        if normal.y < 0.0 {
            result.y += size.y;
        }
        if normal.z < 0.0 {
            result.z += size.z;
        }

        result
    }

    /// The corner lying furthest along `normal`
    pub fn positive_vertex(&self, normal: Vec3) -> Vec3 {
        let size = self.size();
        let mut result = self.min();

        if normal.x > 0.0 {
            result.x += size.x;
        }
        if normal.y > 0.0 {
            result.y += size.y;
        }
        if normal.z > 0.0 {
            result.z += size.z;
        }

        result
    }

    /// Distance from `point` to the nearest of a fixed set of 12 samples: the 8 corners and the
    /// midpoints of the 4 edges parallel to the y axis. This is an approximation, a point close
    /// to the middle of a horizontal edge or a face measures further than it really is.
    pub fn distance_to_nearest_edge(&self, point: Vec3) -> f32 {
        let min = self.min();
        let max = self.max();
        let mid_y = self.center.y;

        let samples = [
            min,
            max,
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, mid_y, max.z),
            Vec3::new(min.x, mid_y, min.z),
            Vec3::new(max.x, mid_y, min.z),
            Vec3::new(max.x, mid_y, max.z),
        ];

        samples
            .iter()
            .map(|sample| point.distance_squared(*sample))
            .fold(f32::INFINITY, f32::min)
            .sqrt()
    }

    /// The 8 corners, min first and max last
    pub fn corners(&self) -> [Vec3; 8] {
        let min = self.min();
        let max = self.max();
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, max.y, max.z),
            Vec3::new(max.x, max.y, max.z),
        ]
    }
}

impl Transformable for AABB {
    /// Conservative re-fit: each extent axis is pushed through the 3x3 block and the absolute
    /// values summed. Over-approximates under rotation and is not exact under shear.
    fn transformed(&self, transform: &Mat4) -> Self {
        let m = Mat3::from_mat4(*transform);
        let x = m * Vec3::new(self.extents.x, 0.0, 0.0);
        let y = m * Vec3::new(0.0, self.extents.y, 0.0);
        let z = m * Vec3::new(0.0, 0.0, self.extents.z);

        Self {
            center: (*transform * self.center.extend(1.0)).truncate(),
            extents: x.abs() + y.abs() + z.abs(),
        }
    }
}

impl fmt::Display for AABB {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.min(), self.max())
    }
}
