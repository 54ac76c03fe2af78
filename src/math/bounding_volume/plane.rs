use std::fmt;

use glam::{Vec3, Vec4};

use super::{EPSILON, Ray};
use crate::error::{Degeneracy, GeometryError, Result};

#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
/// A plane satisfying `dot(normal, X) + distance == 0`. The normal is unit length for every
/// constructed plane, only the default plane has a zero normal.
pub struct Plane {
    normal: Vec3,
    distance: f32,
}

impl Plane {
    /// Creates a plane from a normal and its distance term. The normal is normalized, the
    /// distance is kept as given.
    pub fn new(normal: Vec3, distance: f32) -> Result<Self> {
        if normal.length_squared() == 0.0 {
            return Err(GeometryError::invalid(Degeneracy::ZeroNormal));
        }

        Ok(Self { normal: normal.normalize(), distance })
    }

    /// Creates a plane with `normal` passing through `point`
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Result<Self> {
        if normal.length_squared() == 0.0 {
            return Err(GeometryError::invalid(Degeneracy::ZeroNormal));
        }

        let normal = normal.normalize();
        Ok(Self { normal, distance: -normal.dot(point) })
    }

    /// Creates a plane from three points in 3D space. The normal faces the side from which
    /// `a, b, c` appear counter-clockwise.
    pub fn from_points(a: Vec3, b: Vec3, c: Vec3) -> Result<Self> {
        let normal = (b - a).cross(c - a);

        if normal.length_squared() == 0.0 {
            return Err(GeometryError::invalid(Degeneracy::CollinearPoints));
        }

        let normal = normal.normalize();
        Ok(Self { normal, distance: -normal.dot(a) })
    }

    /// Creates a plane from the coefficients `(a, b, c, d)` of `ax + by + cz + d = 0`, scaling
    /// all four so the normal is unit length.
    pub fn from_coefficients(abcd: Vec4) -> Result<Self> {
        let normal = abcd.truncate();
        let length_squared = normal.length_squared();

        if length_squared == 0.0 {
            return Err(GeometryError::invalid(Degeneracy::ZeroCoefficients));
        }

        Ok(Self {
            normal: normal.normalize(),
            distance: abcd.w / length_squared.sqrt(),
        })
    }

    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// The point of the plane closest to the origin
    pub fn point(&self) -> Vec3 {
        self.normal * -self.distance
    }

    /// Signed distance from the plane to `point`, positive on the side the normal faces
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Are two points on the same side of the plane? Points lying exactly on the plane count as
    /// being behind it.
    pub fn same_side(&self, p0: Vec3, p1: Vec3) -> bool {
        let d0 = self.distance_to_point(p0);
        let d1 = self.distance_to_point(p1);

        (d0 > 0.0 && d1 > 0.0) || (d0 <= 0.0 && d1 <= 0.0)
    }

    /// Intersects a ray with the plane and returns the distance along the ray. Rays parallel to
    /// the plane and hits behind the origin are misses.
    pub fn ray_cast(&self, ray: &Ray) -> Option<f32> {
        let vdot = ray.direction.dot(self.normal);

        if vdot.abs() < EPSILON {
            return None;
        }

        let ndot = -ray.origin.dot(self.normal) - self.distance;
        let enter = ndot / vdot;

        (enter > 0.0).then_some(enter)
    }

    /// Adds `dot(normal, translation)` to the distance term, which shifts the plane by
    /// `-translation` along its normal
    pub fn translate(&mut self, translation: Vec3) {
        self.distance += self.normal.dot(translation);
    }

    pub fn translated(&self, translation: Vec3) -> Self {
        let mut plane = *self;
        plane.translate(translation);
        plane
    }

    /// Makes the plane face the opposite direction
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.distance = -self.distance;
    }

    pub fn flipped(&self) -> Self {
        Self { normal: -self.normal, distance: -self.distance }
    }

    /// Mirrors `point` across the plane
    pub fn reflect_point(&self, point: Vec3) -> Vec3 {
        self.normal * self.distance_to_point(point) * -2.0 + point
    }

    /// Reflects `vector` about the plane normal
    pub fn reflect_vector(&self, vector: Vec3) -> Vec3 {
        self.normal * self.normal.dot(vector) * 2.0 - vector
    }

    /// Projects `point` onto the plane
    pub fn closest_point(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance_to_point(point)
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.normal, self.distance)
    }
}
