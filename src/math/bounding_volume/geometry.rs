//! Free-standing geometric constructions on planes

use glam::Vec3;

use super::Plane;

/// The point shared by three planes.
///
/// The normals must be linearly independent. When two planes are parallel, or all three share
/// a line, the result is infinite or NaN.
pub fn intersection_point(a: &Plane, b: &Plane, c: &Plane) -> Vec3 {
    let bc = b.normal().cross(c.normal());
    let ca = c.normal().cross(a.normal());
    let ab = a.normal().cross(b.normal());

    let f = -a.normal().dot(bc);

    (bc * a.distance() + ca * b.distance() + ab * c.distance()) / f
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn axis_planes_meet_at_offsets() {
        let x = Plane::from_normal_and_point(Vec3::X, Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let y = Plane::from_normal_and_point(Vec3::Y, Vec3::new(0.0, -2.0, 0.0)).unwrap();
        let z = Plane::from_normal_and_point(Vec3::NEG_Z, Vec3::new(0.0, 0.0, 3.0)).unwrap();

        assert_abs_diff_eq!(intersection_point(&x, &y, &z), Vec3::new(1.0, -2.0, 3.0));
    }

    #[test]
    fn oblique_planes() {
        let point = Vec3::new(0.5, 1.5, -2.0);
        let a = Plane::from_normal_and_point(Vec3::new(1.0, 1.0, 0.0), point).unwrap();
        let b = Plane::from_normal_and_point(Vec3::new(0.0, 1.0, 1.0), point).unwrap();
        let c = Plane::from_normal_and_point(Vec3::new(1.0, 0.0, 1.0), point).unwrap();

        assert_abs_diff_eq!(intersection_point(&a, &b, &c), point, epsilon = 1e-5);
    }

    #[test]
    fn parallel_planes_are_not_finite() {
        let a = Plane::new(Vec3::Y, 0.0).unwrap();
        let b = Plane::new(Vec3::Y, 1.0).unwrap();
        let c = Plane::new(Vec3::X, 0.0).unwrap();

        assert!(!intersection_point(&a, &b, &c).is_finite());
    }
}
