use glam::{Mat4, Vec2, Vec3};

use super::{Frustum, Ray, Rect, Transform};
use crate::error::Result;

/// Camera projection. Matrices use OpenGL clip conventions (depth in `[-1, 1]`), which is what
/// [`Frustum::from_matrix`] expects.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    Perspective(PerspectiveProjection),
    Orthographic(OrthographicProjection),
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerspectiveProjection {
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect_ratio: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrthographicProjection {
    pub area: Rect,
    pub scale: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for PerspectiveProjection {
    fn default() -> Self {
        Self {
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            aspect_ratio: 1.0,
        }
    }
}

impl Default for OrthographicProjection {
    fn default() -> Self {
        Self {
            area: Rect::new_min_max(-400., -300., 400., 300.),
            scale: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Projection {
    pub fn perspective() -> Self {
        Self::Perspective(PerspectiveProjection::default())
    }

    pub fn orthographic() -> Self {
        Self::Orthographic(OrthographicProjection::default())
    }

    pub fn matrix(&self) -> Mat4 {
        match self {
            Projection::Perspective(p) => {
                Mat4::perspective_rh_gl(p.fov.to_radians(), p.aspect_ratio, p.near, p.far)
            }
            Projection::Orthographic(o) => {
                let min = o.area.min * o.scale;
                let max = o.area.max * o.scale;
                Mat4::orthographic_rh_gl(min.x, max.x, min.y, max.y, o.near, o.far)
            }
        }
    }

    /// Projection times the inverse of the camera's transform
    pub fn view_projection(&self, transform: &Transform) -> Mat4 {
        let view = transform.as_matrix().inverse();
        self.matrix() * view
    }

    /// World space view frustum of a camera placed at `transform`
    pub fn frustum(&self, transform: &Transform) -> Result<Frustum> {
        Frustum::from_matrix(&self.view_projection(transform))
    }

    /// World space picking ray through `screen_point`, given in pixels from the top left corner
    /// of a viewport of `viewport_size` pixels. The direction is unit length. Perspective rays
    /// start at the camera, orthographic ones on the near plane.
    pub fn screen_point_to_ray(&self, transform: &Transform, screen_point: Vec2, viewport_size: Vec2) -> Ray {
        let ndc = Vec2::new(
            2.0 * screen_point.x / viewport_size.x - 1.0,
            1.0 - 2.0 * screen_point.y / viewport_size.y,
        );

        let inverse = self.view_projection(transform).inverse();
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, -1.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));

        let origin = match self {
            Projection::Perspective(_) => transform.translation,
            Projection::Orthographic(_) => near,
        };

        Ray::new(origin, (far - near).normalize_or_zero())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use glam::Quat;
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::math::Sphere;

    #[test]
    fn perspective_frustum_follows_camera() {
        let projection = Projection::perspective();
        let transform = Transform::new().with_translation(Vec3::new(0.0, 0.0, 10.0));
        let frustum = projection.frustum(&transform).unwrap();

        assert!(frustum.contains_point(Vec3::ZERO));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 20.0)));
        assert!(!frustum.intersects_sphere(&Sphere::new(Vec3::new(0.0, 0.0, -100.0), 1.0)));
    }

    #[test]
    fn rotated_camera_looks_elsewhere() {
        let projection = Projection::perspective();
        // turning left makes the camera look down -x
        let transform = Transform::new().with_rotation(Quat::from_rotation_y(FRAC_PI_2));
        let frustum = projection.frustum(&transform).unwrap();

        assert!(frustum.contains_point(Vec3::new(-5.0, 0.0, 0.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -5.0)));
    }

    #[test]
    fn orthographic_frustum_is_a_box() {
        let projection = Projection::Orthographic(OrthographicProjection {
            area: Rect::new_min_max(-2.0, -1.0, 2.0, 1.0),
            scale: 1.0,
            near: 0.0,
            far: 10.0,
        });
        let frustum = projection.frustum(&Transform::new()).unwrap();

        assert!(frustum.contains_point(Vec3::new(1.9, 0.9, -9.9)));
        assert!(!frustum.contains_point(Vec3::new(2.1, 0.0, -5.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -10.5)));
    }

    #[test]
    fn center_of_screen_ray() {
        let projection = Projection::perspective();
        let transform = Transform::new().with_translation(Vec3::new(1.0, 2.0, 3.0));
        let ray = projection.screen_point_to_ray(&transform, Vec2::new(400.0, 300.0), Vec2::new(800.0, 600.0));

        assert_eq!(ray.origin, Vec3::new(1.0, 2.0, 3.0));
        assert_abs_diff_eq!(ray.direction, Vec3::NEG_Z, epsilon = 1e-4);
    }

    #[test]
    fn picking_hits_object_under_cursor() {
        let projection = Projection::perspective();
        let transform = Transform::new().with_translation(Vec3::new(0.0, 0.0, 10.0));
        let target = Sphere::new(Vec3::ZERO, 0.5);

        let hit = projection.screen_point_to_ray(&transform, Vec2::new(50.0, 50.0), Vec2::new(100.0, 100.0));
        assert!(target.intersects_ray(&hit));

        let corner = projection.screen_point_to_ray(&transform, Vec2::ZERO, Vec2::new(100.0, 100.0));
        assert!(!target.intersects_ray(&corner));
        assert!(corner.direction.x < 0.0 && corner.direction.y > 0.0);
    }

    #[test]
    fn orthographic_rays_are_parallel() {
        let projection = Projection::orthographic();
        let viewport = Vec2::new(800.0, 600.0);

        let a = projection.screen_point_to_ray(&Transform::new(), Vec2::new(0.0, 0.0), viewport);
        let b = projection.screen_point_to_ray(&Transform::new(), Vec2::new(800.0, 600.0), viewport);

        assert_abs_diff_eq!(a.direction, Vec3::NEG_Z, epsilon = 1e-5);
        assert_abs_diff_eq!(b.direction, Vec3::NEG_Z, epsilon = 1e-5);
        assert_abs_diff_eq!(a.origin.truncate(), Vec2::new(-400.0, 300.0), epsilon = 1e-2);
    }
}
