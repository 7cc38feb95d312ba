//! Constraint planes the solver measures targets against.
//!
//! Positioning uses the four inward-facing frustum side planes for
//! perspective cameras, or a single forward-facing plane through the eye for
//! orthographic ones (an orthographic camera has no side walls to retreat
//! past). Sizing uses two plane pairs through the framed position.

use glam::Vec3;

use crate::camera::{CameraPose, Plane, Projection};

/// Right/left and up/down plane pairs used to measure orthographic extent.
#[derive(Debug, Clone, Copy)]
pub struct SizingPlanes {
    /// Planes with normals `+right` and `-right`.
    pub horizontal: [Plane; 2],
    /// Planes with normals `+up` and `-up`.
    pub vertical: [Plane; 2],
}

/// Perspective side planes measured at `origin`, moved to follow the eye
/// to `pose.position`.
pub fn perspective_planes(
    side_planes: [Plane; 4],
    origin: Vec3,
    pose: &CameraPose,
) -> Vec<Plane> {
    let offset = pose.position - origin;
    side_planes
        .iter()
        .map(|plane| plane.translated(offset))
        .collect()
}

/// Plane through the eye facing along the view direction.
pub fn forward_plane(pose: &CameraPose) -> Plane {
    Plane::from_normal_and_point(pose.forward, pose.position)
}

/// Planes the eye must retreat past so every target ends up in view.
///
/// `side_planes` are the camera's frustum side planes as measured at
/// `origin`; they are only used for perspective projections.
pub fn positioning_planes(
    projection: Projection,
    side_planes: [Plane; 4],
    origin: Vec3,
    pose: &CameraPose,
) -> Vec<Plane> {
    match projection {
        Projection::Perspective { .. } => {
            perspective_planes(side_planes, origin, pose)
        }
        Projection::Orthographic { .. } => vec![forward_plane(pose)],
    }
}

/// Plane pairs through `target` aligned with the pose's right and up axes.
pub fn sizing_planes(pose: &CameraPose, target: Vec3) -> SizingPlanes {
    SizingPlanes {
        horizontal: [
            Plane::from_normal_and_point(pose.right, target),
            Plane::from_normal_and_point(-pose.right, target),
        ],
        vertical: [
            Plane::from_normal_and_point(pose.up, target),
            Plane::from_normal_and_point(-pose.up, target),
        ],
    }
}
