//! Defines helper functions for intersection checking between 2 different bounding volume
//! types

use super::*;

pub fn sphere_sphere(s1: &Sphere, s2: &Sphere) -> bool {
    let distance_squared = (s1.center - s2.center).length_squared();
    let radius_sum = s1.radius + s2.radius;
    distance_squared <= radius_sum * radius_sum
}

/// Accumulates the squared distance from the sphere center to the box on every axis where the
/// center lies outside `[min, max]`
pub fn aabb_sphere(aabb: &AABB, sphere: &Sphere) -> bool {
    let center = sphere.center.to_array();
    let min = aabb.min().to_array();
    let max = aabb.max().to_array();

    let mut distance_squared = 0.0;
    for axis in 0..3 {
        let d = if center[axis] < min[axis] {
            center[axis] - min[axis]
        } else if center[axis] > max[axis] {
            center[axis] - max[axis]
        } else {
            continue;
        };
        distance_squared += d * d;
    }

    distance_squared <= sphere.radius * sphere.radius
}

pub fn aabb_aabb(a1: &AABB, a2: &AABB) -> bool {
    (a2.center() - a1.center()).abs().cmple(a2.extents() + a1.extents()).all()
}

/// Slab method. An axis the ray runs parallel to is not divided by: the ray stays in that slab
/// when the origin lies within `[min, max]` (boundaries included) and misses otherwise.
pub fn aabb_ray(aabb: &AABB, ray: &Ray) -> RayIntersection {
    if ray.direction.length_squared() < EPSILON {
        return RayIntersection::MISS;
    }

    let origin = ray.origin.to_array();
    let direction = ray.direction.to_array();
    let min = aabb.min().to_array();
    let max = aabb.max().to_array();

    let mut fmin = f32::NEG_INFINITY;
    let mut fmax = f32::INFINITY;
    for axis in 0..3 {
        if direction[axis] == 0.0 {
            if origin[axis] < min[axis] || origin[axis] > max[axis] {
                return RayIntersection::MISS;
            }
            continue;
        }

        let t1 = (min[axis] - origin[axis]) / direction[axis];
        let t2 = (max[axis] - origin[axis]) / direction[axis];
        fmin = fmin.max(t1.min(t2));
        fmax = fmax.min(t1.max(t2));
    }

    if fmax > fmin {
        RayIntersection { count: 2, min: Some(fmin), max: Some(fmax) }
    } else if fmax == fmin {
        RayIntersection { count: 1, min: Some(fmin), max: Some(fmax) }
    } else {
        RayIntersection::MISS
    }
}

/// Both roots of `|origin + t * direction - center|² = radius²`, nearer first. `None` when the
/// discriminant is negative. A zero direction yields NaN roots, which every threshold rejects.
pub fn sphere_ray_roots(sphere: &Sphere, ray: &Ray) -> Option<(f32, f32)> {
    let temp = ray.origin - sphere.center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * temp.dot(ray.direction);
    let c = temp.dot(temp) - sphere.radius * sphere.radius;
    let disc = b * b - 4.0 * a * c;

    if disc < 0.0 {
        return None;
    }

    let e = disc.sqrt();
    let denominator = 2.0 * a;
    Some(((-b - e) / denominator, (-b + e) / denominator))
}

pub fn frustum_sphere(frustum: &Frustum, sphere: &Sphere) -> bool {
    for plane in &frustum.planes {
        if plane.distance_to_point(sphere.center) < -sphere.radius {
            return false; // Sphere is outside the frustum
        }
    }
    true // Sphere is inside or intersecting the frustum
}

/// Only the positive vertex is tested against each plane. Boxes near the frustum's edges and
/// corners can be reported as intersecting while lying fully outside.
pub fn frustum_aabb(frustum: &Frustum, aabb: &AABB) -> bool {
    for plane in &frustum.planes {
        let p = aabb.positive_vertex(plane.normal());
        if plane.distance_to_point(p) < 0.0 {
            return false; // AABB is outside the frustum
        }
    }
    true // AABB is inside or intersecting the frustum
}
