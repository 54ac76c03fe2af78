use std::fmt;

use glam::{Mat4, Vec3, Vec4};

use super::{intersection, Ray, RayIntersection, SPHERE_HIT_EPSILON, Transformable, AABB};

#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    pub fn diameter(&self) -> f32 {
        self.radius * 2.0
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        aabb.intersects_sphere(self)
    }

    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        self.intersect_ray_nearest(ray).is_some()
    }

    /// Distance to the nearest hit in front of the ray origin, falling back to the far root when
    /// the near one is behind (or too close to) the origin.
    pub fn intersect_ray_nearest(&self, ray: &Ray) -> Option<f32> {
        let (near, far) = intersection::sphere_ray_roots(self, ray)?;

        [near, far].into_iter().find(|t| *t > SPHERE_HIT_EPSILON)
    }

    /// Both hit distances. A root is reported only if it is greater than
    /// [`SPHERE_HIT_EPSILON`], so `count` is 1 for a ray starting inside the sphere.
    pub fn intersect_ray(&self, ray: &Ray) -> RayIntersection {
        let Some((near, far)) = intersection::sphere_ray_roots(self, ray) else {
            return RayIntersection::MISS;
        };

        RayIntersection::from_roots(
            (near > SPHERE_HIT_EPSILON).then_some(near),
            (far > SPHERE_HIT_EPSILON).then_some(far),
        )
    }

    /// The point of nearest intersection if the ray properly crosses the sphere. Otherwise
    /// (including a ray that only touches the surface) the point on the surface closest to the
    /// ray's supporting line.
    pub fn closest_point(&self, ray: &Ray) -> Vec3 {
        let diff = ray.origin - self.center;
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * diff.dot(ray.direction);
        let c = diff.dot(diff) - self.radius * self.radius;
        let disc = b * b - 4.0 * a * c;

        if disc > 0.0 {
            let e = disc.sqrt();
            let denominator = 2.0 * a;

            let hit = [(-b - e) / denominator, (-b + e) / denominator]
                .into_iter()
                .find(|t| *t > SPHERE_HIT_EPSILON);
            if let Some(t) = hit {
                return ray.point(t);
            }
        }

        let direction = ray.direction.normalize_or_zero();
        let on_ray = ray.origin + direction * (-diff).dot(direction);
        self.center + (on_ray - self.center).normalize_or_zero() * self.radius
    }

    /// Approximate bounding sphere: centered on the middle of the points' axis-aligned bounds,
    /// with the radius reaching the furthest point. Not the minimal enclosing sphere. Empty
    /// input gives the default (zero) sphere.
    pub fn bounding_sphere(points: &[Vec3]) -> Self {
        let Some(&first) = points.first() else {
            return Self::default();
        };

        let (min, max) = points
            .iter()
            .fold((first, first), |(min, max), &point| (min.min(point), max.max(point)));

        let center = (min + max) * 0.5;
        let max_distance = points
            .iter()
            .map(|point| center.distance_squared(*point))
            .fold(0.0, f32::max);

        Self { center, radius: max_distance.sqrt() }
    }
}

impl Transformable for Sphere {
    /// Only correct for rotation, translation and uniform scale. The radius is scaled by the
    /// length of the transformed x axis.
    fn transformed(&self, transform: &Mat4) -> Self {
        Self {
            center: (*transform * self.center.extend(1.0)).truncate(),
            radius: (*transform * Vec4::new(self.radius, 0.0, 0.0, 0.0)).length(),
        }
    }
}

impl fmt::Display for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.center, self.radius)
    }
}
