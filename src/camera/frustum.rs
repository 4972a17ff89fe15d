//! View frustum for culling
//!
//! Extracts frustum planes from the view-projection matrix and provides
//! intersection tests for points, spheres and axis-aligned boxes.

use glam::{Mat4, Vec3, Vec4};

use crate::scene::bounds::{Aabb, BoundingSphere};

/// A plane in 3D space, represented as (normal.x, normal.y, normal.z, distance)
/// where the plane equation is: ax + by + cz + d = 0
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Unit normal pointing into the positive half-space.
    pub normal: Vec3,
    /// Signed distance from origin (`n · p + d = 0`).
    pub distance: f32,
}

impl Plane {
    /// Create a plane from coefficients and normalize it
    pub fn from_coefficients(a: f32, b: f32, c: f32, d: f32) -> Self {
        let len = (a * a + b * b + c * c).sqrt();
        if len > 0.0 {
            Self {
                normal: Vec3::new(a / len, b / len, c / len),
                distance: d / len,
            }
        } else {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        }
    }

    fn from_row(row: Vec4) -> Self {
        Self::from_coefficients(row.x, row.y, row.z, row.w)
    }

    /// Signed distance from point to plane (positive = in front, negative =
    /// behind)
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Signed distance of the box corner farthest along the normal.
    #[inline]
    fn distance_to_positive_vertex(&self, aabb: &Aabb) -> f32 {
        let p = Vec3::select(
            self.normal.cmpge(Vec3::ZERO),
            aabb.max,
            aabb.min,
        );
        self.distance_to_point(p)
    }
}

/// View frustum consisting of 6 planes
#[derive(Debug, Clone, PartialEq)]
pub struct Frustum {
    /// Six clipping planes: left, right, bottom, top, near, far.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    /// Uses the Gribb/Hartmann method for plane extraction.
    /// Planes point inward (positive half-space is inside the frustum).
    pub fn from_view_projection(vp: Mat4) -> Self {
        // glam stores column-major, so rows are gathered across columns
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        // Right-handed projection with [0,1] depth range: the near plane is
        // row2 alone.
        Self {
            planes: [
                Plane::from_row(row3 + row0),
                Plane::from_row(row3 - row0),
                Plane::from_row(row3 + row1),
                Plane::from_row(row3 - row1),
                Plane::from_row(row2),
                Plane::from_row(row3 - row2),
            ],
        }
    }

    /// Test if a point is inside the frustum
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Test if a sphere intersects or is inside the frustum
    #[inline]
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        self.planes.iter().all(|plane| {
            plane.distance_to_point(sphere.center) >= -sphere.radius
        })
    }

    /// Test if a box intersects or is inside the frustum.
    ///
    /// A box is rejected only when it lies entirely in the outside
    /// half-space of at least one plane.
    #[inline]
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_positive_vertex(aabb) >= 0.0)
    }

    /// Test if a box is completely inside the frustum (not just
    /// intersecting)
    pub fn contains_aabb(&self, aabb: &Aabb) -> bool {
        aabb.corners()
            .iter()
            .all(|&corner| self.contains_point(corner))
    }
}

#[cfg(test)]
mod tests {
    use glam::Mat4;

    use super::*;

    fn frustum_at(eye: Vec3) -> Frustum {
        let proj = Mat4::perspective_rh(45.0_f32.to_radians(), 1.0, 1.0, 500.0);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        Frustum::from_view_projection(proj * view)
    }

    #[test]
    fn test_frustum_contains_origin() {
        let frustum = frustum_at(Vec3::new(0.0, 0.0, 10.0));

        // Origin should be inside the frustum
        assert!(frustum.contains_point(Vec3::ZERO));

        // Point behind the camera should be outside
        assert!(!frustum.contains_point(Vec3::new(0.0, 0.0, 20.0)));
    }

    #[test]
    fn test_sphere_intersection() {
        let frustum = frustum_at(Vec3::new(0.0, 0.0, 10.0));

        assert!(frustum.intersects_sphere(&BoundingSphere::new(Vec3::ZERO, 1.0)));

        // Sphere behind the camera that doesn't reach the frustum
        assert!(!frustum
            .intersects_sphere(&BoundingSphere::new(Vec3::new(0.0, 0.0, 50.0), 1.0)));
    }

    #[test]
    fn point_box_beyond_far_plane_is_culled() {
        let eye = Vec3::new(0.0, 10.0, 100.0);
        let frustum = frustum_at(eye);
        let forward = (Vec3::ZERO - eye).normalize();
        let beyond = eye + forward * 600.0;
        assert!(!frustum.intersects_aabb(&Aabb::new(beyond, beyond)));
    }

    #[test]
    fn box_around_eye_is_visible() {
        let eye = Vec3::new(0.0, 10.0, 100.0);
        let frustum = frustum_at(eye);
        let half = Vec3::splat(2.0);
        assert!(frustum.intersects_aabb(&Aabb::new(eye - half, eye + half)));
    }

    #[test]
    fn box_straddling_plane_is_visible() {
        let frustum = frustum_at(Vec3::new(0.0, 0.0, 100.0));
        // The left plane passes near x = -41 at the origin depth.
        let aabb = Aabb::new(Vec3::new(-60.0, -1.0, -1.0), Vec3::new(-30.0, 1.0, 1.0));
        assert!(frustum.intersects_aabb(&aabb));
        assert!(!frustum.contains_aabb(&aabb));
    }

    #[test]
    fn box_outside_side_plane_is_culled() {
        let frustum = frustum_at(Vec3::new(0.0, 0.0, 100.0));
        let aabb = Aabb::new(Vec3::new(-90.0, -1.0, -1.0), Vec3::new(-70.0, 1.0, 1.0));
        assert!(!frustum.intersects_aabb(&aabb));
    }

    #[test]
    fn small_box_at_target_is_fully_contained() {
        let frustum = frustum_at(Vec3::new(0.0, 0.0, 100.0));
        let aabb = Aabb::new(Vec3::splat(-5.0), Vec3::splat(5.0));
        assert!(frustum.contains_aabb(&aabb));
    }
}
