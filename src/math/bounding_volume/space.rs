use glam::Mat4;

/// Re-expressing a volume in another coordinate space, e.g. local to world space with a model
/// matrix. Only the by-value form is required.
pub trait Transformable: Sized {
    /// Returns the volume converted by `transform`
    fn transformed(&self, transform: &Mat4) -> Self;

    /// Converts the volume in place
    fn transform(&mut self, transform: &Mat4) {
        *self = self.transformed(transform);
    }
}

impl Transformable for super::BoundingVolume {
    fn transformed(&self, transform: &Mat4) -> Self {
        match self {
            Self::Sphere(sphere) => Self::Sphere(sphere.transformed(transform)),
            Self::AABB(aabb) => Self::AABB(aabb.transformed(transform)),
            Self::None => Self::None,
        }
    }
}
