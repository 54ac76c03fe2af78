use std::ops::{Index, IndexMut};

use glam::{Mat4, Vec3};

use super::{geometry, intersection, BoundingVolume, Plane, Sphere, AABB};
use crate::error::Result;

/// Names of the six frustum planes, in storage order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FrustumSection {
    Top,
    Bottom,
    Left,
    Right,
    Near,
    Far,
}

impl FrustumSection {
    pub const ALL: [FrustumSection; 6] = [
        FrustumSection::Top,
        FrustumSection::Bottom,
        FrustumSection::Left,
        FrustumSection::Right,
        FrustumSection::Near,
        FrustumSection::Far,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            FrustumSection::Top => 0,
            FrustumSection::Bottom => 1,
            FrustumSection::Left => 2,
            FrustumSection::Right => 3,
            FrustumSection::Near => 4,
            FrustumSection::Far => 5,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
/// A view frustum as six planes whose normals all point inwards, so a point is inside when its
/// signed distance to every plane is non-negative.
///
/// The space the planes live in is the caller's choice: extracting from a projection matrix
/// gives eye space, from view * projection world space, from model * view * projection model
/// space.
pub struct Frustum {
    pub(crate) planes: [Plane; 6],
}

impl Frustum {
    /// Creates a frustum from the corners of the near and far portals
    #[allow(clippy::too_many_arguments)]
    pub fn from_corners(
        ntl: Vec3, ntr: Vec3, nbl: Vec3, nbr: Vec3,
        ftl: Vec3, ftr: Vec3, fbl: Vec3, fbr: Vec3,
    ) -> Result<Self> {
        let mut frustum = Self::default();
        frustum.set_corners(ntl, ntr, nbl, nbr, ftl, ftr, fbl, fbr)?;
        Ok(frustum)
    }

    /// Creates a frustum from a (projection) matrix using OpenGL clip conventions, depth in
    /// `[-1, 1]`. To create a world space frustum, pass a view-projection matrix.
    pub fn from_matrix(matrix: &Mat4) -> Result<Self> {
        let mut frustum = Self::default();
        frustum.set_matrix(matrix)?;
        Ok(frustum)
    }

    /// Redefines the planes from portal corners. The point triples are wound so every normal
    /// faces into the frustum. On error the frustum is left unchanged.
    #[allow(clippy::too_many_arguments)]
    pub fn set_corners(
        &mut self,
        ntl: Vec3, ntr: Vec3, nbl: Vec3, nbr: Vec3,
        ftl: Vec3, ftr: Vec3, fbl: Vec3, fbr: Vec3,
    ) -> Result<()> {
        self.planes = [
            Plane::from_points(ntr, ntl, ftl)?,
            Plane::from_points(nbl, nbr, fbr)?,
            Plane::from_points(ntl, nbl, fbl)?,
            Plane::from_points(nbr, ntr, fbr)?,
            Plane::from_points(ntl, ntr, nbr)?,
            Plane::from_points(ftr, ftl, fbl)?,
        ];
        Ok(())
    }

    /// Redefines the planes from a matrix (Gribb and Hartmann, "Fast Extraction of Viewing
    /// Frustum Planes from the World-View-Projection Matrix"). Each plane is the last row plus
    /// or minus one of the first three. On error the frustum is left unchanged.
    pub fn set_matrix(&mut self, matrix: &Mat4) -> Result<()> {
        let x = matrix.row(0);
        let y = matrix.row(1);
        let z = matrix.row(2);
        let w = matrix.row(3);

        self.planes = [
            Plane::from_coefficients(w - y)?,
            Plane::from_coefficients(w + y)?,
            Plane::from_coefficients(w + x)?,
            Plane::from_coefficients(w - x)?,
            Plane::from_coefficients(w + z)?,
            Plane::from_coefficients(w - z)?,
        ];

        log::trace!(
            "extracted frustum planes: near {}, far {}",
            self[FrustumSection::Near],
            self[FrustumSection::Far]
        );
        Ok(())
    }

    pub fn planes(&self) -> &[Plane; 6] {
        &self.planes
    }

    /// The 8 corners recovered by intersecting adjacent planes, in the order `ntl, ntr, nbl,
    /// nbr, ftl, ftr, fbl, fbr`. Meaningless for frustums with parallel adjacent planes.
    pub fn corners(&self) -> [Vec3; 8] {
        use FrustumSection::*;

        let corner = |a: FrustumSection, b: FrustumSection, c: FrustumSection| {
            geometry::intersection_point(&self[a], &self[b], &self[c])
        };
        [
            corner(Near, Top, Left),
            corner(Near, Top, Right),
            corner(Near, Bottom, Left),
            corner(Near, Bottom, Right),
            corner(Far, Top, Left),
            corner(Far, Top, Right),
            corner(Far, Bottom, Left),
            corner(Far, Bottom, Right),
        ]
    }

    /// Returns true if the point is on the inner side of (or on) every plane
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Returns true if the sphere is fully inside the frustum. See also
    /// [`Frustum::intersects_sphere`].
    pub fn contains_sphere(&self, sphere: &Sphere) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(sphere.center) >= sphere.radius)
    }

    /// Returns true if the box is fully inside the frustum. See also
    /// [`Frustum::intersects_aabb`].
    pub fn contains_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| {
            plane.distance_to_point(aabb.positive_vertex(plane.normal())) >= 0.0
                && plane.distance_to_point(aabb.negative_vertex(plane.normal())) >= 0.0
        })
    }

    /// Box given by its center and full size
    pub fn contains_box(&self, center: Vec3, size: Vec3) -> bool {
        let half_size = size * 0.5;
        self.contains_aabb(&AABB::new(center - half_size, center + half_size))
    }

    pub fn contains_volume(&self, volume: &BoundingVolume) -> bool {
        match volume {
            BoundingVolume::Sphere(sphere) => self.contains_sphere(sphere),
            BoundingVolume::AABB(aabb) => self.contains_aabb(aabb),
            BoundingVolume::None => false,
        }
    }

    /// Same test as [`Frustum::contains_point`]
    pub fn intersects_point(&self, point: Vec3) -> bool {
        self.contains_point(point)
    }

    /// Returns true if the sphere is fully or partially inside the frustum. Conservative near
    /// the frustum's edges and corners.
    pub fn intersects_sphere(&self, sphere: &Sphere) -> bool {
        intersection::frustum_sphere(self, sphere)
    }

    /// Returns true if the box is fully or partially inside the frustum. Cheaper and more
    /// conservative than [`Frustum::contains_aabb`], only the positive vertex is tested.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        intersection::frustum_aabb(self, aabb)
    }

    /// Box given by its center and full size
    pub fn intersects_box(&self, center: Vec3, size: Vec3) -> bool {
        let half_size = size * 0.5;
        self.intersects_aabb(&AABB::new(center - half_size, center + half_size))
    }

    /// Checks if a bounding volume intersects with the frustum
    pub fn intersects_volume(&self, volume: &BoundingVolume) -> bool {
        match volume {
            BoundingVolume::Sphere(sphere) => self.intersects_sphere(sphere),
            BoundingVolume::AABB(aabb) => self.intersects_aabb(aabb),
            BoundingVolume::None => false,
        }
    }
}

impl Index<FrustumSection> for Frustum {
    type Output = Plane;

    fn index(&self, section: FrustumSection) -> &Self::Output {
        &self.planes[section.index()]
    }
}

impl IndexMut<FrustumSection> for Frustum {
    fn index_mut(&mut self, section: FrustumSection) -> &mut Self::Output {
        &mut self.planes[section.index()]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::error::Degeneracy;

    // near plane at z = -1 with half size 1, far plane at z = -10 with half size 10
    fn corners() -> [Vec3; 8] {
        [
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-10.0, 10.0, -10.0),
            Vec3::new(10.0, 10.0, -10.0),
            Vec3::new(-10.0, -10.0, -10.0),
            Vec3::new(10.0, -10.0, -10.0),
        ]
    }

    fn from_corners() -> Frustum {
        let [ntl, ntr, nbl, nbr, ftl, ftr, fbl, fbr] = corners();
        Frustum::from_corners(ntl, ntr, nbl, nbr, ftl, ftr, fbl, fbr).unwrap()
    }

    fn from_projection() -> Frustum {
        Frustum::from_matrix(&Mat4::perspective_rh_gl(FRAC_PI_2, 1.0, 1.0, 10.0)).unwrap()
    }

    #[test]
    fn section_indices_round_trip() {
        for (i, section) in FrustumSection::ALL.iter().enumerate() {
            assert_eq!(section.index(), i);
            assert_eq!(FrustumSection::from_index(i), Some(*section));
        }
        assert_eq!(FrustumSection::from_index(6), None);
    }

    #[test]
    fn corner_planes_face_inwards() {
        let frustum = from_corners();
        let inside = Vec3::new(0.0, 0.0, -5.0);

        for section in FrustumSection::ALL {
            assert!(frustum[section].distance_to_point(inside) > 0.0, "{section:?}");
        }
        assert_abs_diff_eq!(frustum[FrustumSection::Near].normal(), Vec3::NEG_Z);
        assert_abs_diff_eq!(frustum[FrustumSection::Far].normal(), Vec3::Z);
    }

    #[test]
    fn corners_and_matrix_agree() {
        let a = from_corners();
        let b = from_projection();

        for section in FrustumSection::ALL {
            assert_abs_diff_eq!(a[section].normal(), b[section].normal(), epsilon = 1e-5);
            assert_abs_diff_eq!(a[section].distance(), b[section].distance(), epsilon = 1e-4);
        }
    }

    #[test]
    fn corners_are_recovered() {
        let frustum = from_corners();
        for (expected, actual) in corners().iter().zip(frustum.corners()) {
            assert_abs_diff_eq!(*expected, actual, epsilon = 1e-4);
        }
    }

    #[test]
    fn degenerate_corners_fail() {
        let p = Vec3::ZERO;
        let error = Frustum::from_corners(p, p, p, p, p, p, p, p).unwrap_err();
        assert_eq!(error.reason(), Degeneracy::CollinearPoints);

        let error = Frustum::from_matrix(&Mat4::ZERO).unwrap_err();
        assert_eq!(error.reason(), Degeneracy::ZeroCoefficients);
    }

    #[test]
    fn failed_set_leaves_frustum_unchanged() {
        let mut frustum = from_projection();
        let before = frustum;
        assert!(frustum.set_matrix(&Mat4::ZERO).is_err());
        assert_eq!(frustum, before);
    }

    #[test]
    fn point_queries() {
        let frustum = from_projection();
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -5.0)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -0.5)));
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, -11.0)));
        assert!(!frustum.contains_point(Vec3::new(100.0, 0.0, -5.0)));
        assert!(frustum.intersects_point(Vec3::new(4.0, -4.0, -5.0)));
        assert!(!frustum.intersects_point(Vec3::new(6.0, 0.0, -5.0)));
    }

    #[test]
    fn sphere_queries() {
        let frustum = from_projection();

        let inside = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);
        assert!(frustum.contains_sphere(&inside));
        assert!(frustum.intersects_sphere(&inside));

        let straddling = Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0);
        assert!(!frustum.contains_sphere(&straddling));
        assert!(frustum.intersects_sphere(&straddling));

        let outside = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        assert!(!frustum.contains_sphere(&outside));
        assert!(!frustum.intersects_sphere(&outside));
    }

    #[test]
    fn aabb_queries() {
        let frustum = from_projection();

        let inside = AABB::from_center_extents(Vec3::new(0.0, 0.0, -5.0), Vec3::ONE);
        assert!(frustum.contains_aabb(&inside));
        assert!(frustum.intersects_aabb(&inside));
        assert!(frustum.contains_box(Vec3::new(0.0, 0.0, -5.0), Vec3::splat(2.0)));

        let straddling = AABB::from_center_extents(Vec3::new(0.0, 0.0, -1.0), Vec3::splat(0.5));
        assert!(!frustum.contains_aabb(&straddling));
        assert!(frustum.intersects_aabb(&straddling));
        assert!(frustum.intersects_box(Vec3::new(0.0, 0.0, -1.0), Vec3::ONE));

        let behind = AABB::from_center_extents(Vec3::new(0.0, 0.0, 5.0), Vec3::ONE);
        assert!(!frustum.contains_aabb(&behind));
        assert!(!frustum.intersects_aabb(&behind));
    }

    #[test]
    fn aabb_corner_region_false_positive() {
        let frustum = from_projection();
        // beyond the right and far planes at once, but each plane alone is satisfied
        let aabb = AABB::from_center_extents(Vec3::new(12.0, 0.0, -11.0), Vec3::splat(1.5));

        assert!(frustum.corners().iter().all(|c| !aabb.contains_point(*c)));
        assert!(frustum.intersects_aabb(&aabb));
        assert!(!frustum.contains_aabb(&aabb));
    }

    #[test]
    fn volume_dispatch() {
        let frustum = from_projection();
        assert!(frustum.intersects_volume(&BoundingVolume::new_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0)));
        assert!(frustum.contains_volume(&BoundingVolume::new_aabb(Vec3::new(-1.0, -1.0, -6.0), Vec3::new(1.0, 1.0, -4.0))));
        assert!(!frustum.intersects_volume(&BoundingVolume::None));
        assert!(!frustum.contains_volume(&BoundingVolume::None));
    }

    #[test]
    fn index_mut_replaces_plane() {
        let mut frustum = from_projection();
        frustum[FrustumSection::Far] = Plane::new(Vec3::Z, 20.0).unwrap();
        assert!(frustum.contains_point(Vec3::new(0.0, 0.0, -15.0)));
    }

    #[test]
    fn packs_into_bytes() {
        assert_eq!(bytemuck::bytes_of(&from_projection()).len(), 6 * 16);
    }
}
