//! View frustum planes and ray casting
//!
//! Extracts frustum planes from the view-projection matrix and provides the
//! plane/ray intersection the framing solver is built on.

use glam::{Mat4, Vec3, Vec4};

/// Rays whose direction is this close to parallel with a plane never hit it.
const PARALLEL_EPSILON: f32 = 1e-6;

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

    /// Plane with the given (normalized) normal passing through `point`.
    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Self {
        let normal = normal.normalize_or_zero();
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Signed distance from point to plane (positive = in front, negative =
    /// behind)
    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// The same plane moved rigidly by `offset`.
    #[must_use]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            normal: self.normal,
            distance: self.distance - self.normal.dot(offset),
        }
    }

    /// Signed parameter along `direction` at which the line through `origin`
    /// meets the plane. `None` when the line is parallel to the plane.
    #[inline]
    pub fn intersect_line(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let along = direction.dot(self.normal);
        if along.abs() < PARALLEL_EPSILON {
            return None;
        }
        Some(-self.distance_to_point(origin) / along)
    }

    /// Distance along `direction` at which a ray starting at `origin` hits
    /// the plane. Only hits strictly in front of the origin count.
    #[inline]
    pub fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        self.intersect_line(origin, direction)
            .filter(|&enter| enter > 0.0)
    }
}

/// View frustum consisting of 6 planes
#[derive(Debug, Clone)]
pub struct Frustum {
    /// Six clipping planes: left, right, bottom, top, near, far.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    /// Uses the Gribb/Hartmann method for plane extraction.
    /// Planes point inward (positive half-space is inside the frustum).
    pub fn from_view_projection(vp: Mat4) -> Self {
        // glam stores column-major, the method works on rows
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        // For right-handed system with [0,1] depth range
        let left = row3 + row0;
        let right = row3 - row0;
        let bottom = row3 + row1;
        let top = row3 - row1;
        let near = row2;
        let far = row3 - row2;

        Self {
            planes: [
                plane_from_row(left),
                plane_from_row(right),
                plane_from_row(bottom),
                plane_from_row(top),
                plane_from_row(near),
                plane_from_row(far),
            ],
        }
    }

    /// The four side planes (left, right, bottom, top).
    pub fn side_planes(&self) -> [Plane; 4] {
        [self.planes[0], self.planes[1], self.planes[2], self.planes[3]]
    }

    /// Test if a point is inside the frustum
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance_to_point(point) >= 0.0)
    }

    /// Test if a point is inside the four side planes, allowing `tolerance`
    /// of slack. Near and far are ignored.
    #[inline]
    pub fn sides_contain_point(&self, point: Vec3, tolerance: f32) -> bool {
        self.side_planes()
            .iter()
            .all(|plane| plane.distance_to_point(point) >= -tolerance)
    }
}

fn plane_from_row(row: Vec4) -> Plane {
    Plane::from_coefficients(row.x, row.y, row.z, row.w)
}
