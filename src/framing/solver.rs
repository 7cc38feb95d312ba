//! Framing geometry.
//!
//! Pure functions over poses, planes and bounding corners, independent of
//! any concrete camera or scene type. [`solve`] chains them:
//!
//! 1. optionally center the eye on the targets within the view plane,
//! 2. retreat along the view direction until every corner is inside the
//!    constraint planes ([`solve_position`]),
//! 3. retreat further if any corner would sit inside the near clip plane
//!    ([`avoid_too_close`]),
//! 4. for orthographic cameras, grow the view size to cover the targets
//!    ([`solve_size`]),
//! 5. measure the far clip distance needed to keep every corner rendered
//!    ([`far_clip_distance`]).

use glam::Vec3;

use super::bounds::BoundingCorners;
use super::constraints::{self, SizingPlanes};
use crate::camera::{CameraPose, Plane, Projection};

/// Solver tuning that does not come from the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Center the eye on the targets before retreating.
    pub center_on_targets: bool,
    /// Extra retreat distance for orthographic cameras, applied only when
    /// the camera has to move at all.
    pub orthographic_margin: f32,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            center_on_targets: true,
            orthographic_margin: 1.0,
        }
    }
}

/// Everything the solver needs to know about the camera and targets.
#[derive(Debug, Clone, Copy)]
pub struct FramingRequest<'a> {
    /// Camera pose at the time of the request.
    pub pose: CameraPose,
    /// Camera projection (orthographic size is the starting size).
    pub projection: Projection,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Near clip distance.
    pub near_clip: f32,
    /// Frustum side planes at `pose.position` (perspective only).
    pub side_planes: [Plane; 4],
    /// Corners of every target.
    pub targets: &'a [BoundingCorners],
    /// Tuning.
    pub settings: SolverSettings,
}

/// Result of a framing computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingSolution {
    /// Eye position that frames every target.
    pub position: Vec3,
    /// Orthographic half-height, `None` for perspective cameras.
    pub size: Option<f32>,
    /// Distance from `position` to the farthest corner.
    pub far_clip: f32,
}

fn all_corners(targets: &[BoundingCorners]) -> impl Iterator<Item = Vec3> + '_ {
    targets.iter().flat_map(|corners| corners.iter().copied())
}

/// Largest positive distance along `direction` from any corner to any plane.
///
/// Corners whose ray never hits a plane do not constrain the result; zero
/// means nothing was hit.
pub fn max_distance_along(
    targets: &[BoundingCorners],
    planes: &[Plane],
    direction: Vec3,
) -> f32 {
    all_corners(targets)
        .flat_map(|corner| {
            planes
                .iter()
                .filter_map(move |plane| plane.raycast(corner, direction))
        })
        .fold(0.0, f32::max)
}

/// Largest positive distance from any corner to any plane, casting each ray
/// against the plane's own normal (i.e. how far a corner pokes out of it).
pub fn max_distance_outside(
    targets: &[BoundingCorners],
    planes: &[Plane],
) -> f32 {
    all_corners(targets)
        .flat_map(|corner| {
            planes
                .iter()
                .filter_map(move |plane| plane.raycast(corner, -plane.normal))
        })
        .fold(0.0, f32::max)
}

/// Eye position moved within its view plane to the middle of the targets'
/// projected extent. Depth along the view direction is unchanged.
pub fn center_on_targets(
    pose: &CameraPose,
    targets: &[BoundingCorners],
) -> Vec3 {
    let mut extent: Option<(f32, f32, f32, f32)> = None;
    for corner in all_corners(targets) {
        let local = pose.to_local(corner);
        extent = Some(match extent {
            None => (local.x, local.x, local.y, local.y),
            Some((min_x, max_x, min_y, max_y)) => (
                min_x.min(local.x),
                max_x.max(local.x),
                min_y.min(local.y),
                max_y.max(local.y),
            ),
        });
    }
    match extent {
        Some((min_x, max_x, min_y, max_y)) => {
            pose.position
                + pose.right * ((min_x + max_x) * 0.5)
                + pose.up * ((min_y + max_y) * 0.5)
        }
        None => pose.position,
    }
}

/// Position that puts every corner inside `planes` by stepping backward
/// along the view direction.
///
/// Each corner casts a ray along `+forward`; the farthest hit is how far the
/// eye must retreat. With `margin`, a non-zero retreat is extended by that
/// amount.
pub fn solve_position(
    pose: &CameraPose,
    planes: &[Plane],
    targets: &[BoundingCorners],
    margin: Option<f32>,
) -> Vec3 {
    let mut retreat = max_distance_along(targets, planes, pose.forward);
    if retreat == 0.0 {
        return pose.position;
    }
    if let Some(margin) = margin {
        retreat += margin;
    }
    log::debug!("framing retreat {retreat:.3}");
    pose.position - pose.forward * retreat
}

/// Push `candidate` further back so no corner is closer than `near_clip`
/// along the view direction.
pub fn avoid_too_close(
    pose: &CameraPose,
    candidate: Vec3,
    targets: &[BoundingCorners],
    near_clip: f32,
) -> Vec3 {
    let plane = constraints::forward_plane(&pose.at(candidate));
    let nearest = all_corners(targets)
        .filter_map(|corner| plane.intersect_line(corner, -pose.forward))
        .reduce(f32::min);
    match nearest {
        Some(nearest) if nearest < near_clip => {
            log::debug!(
                "nearest corner {nearest:.3} inside near clip {near_clip:.3}"
            );
            candidate - pose.forward * (near_clip - nearest)
        }
        _ => candidate,
    }
}

/// Orthographic half-height that covers every corner around `target`.
///
/// Returns `size` unchanged when the targets already fit inside the
/// `size * aspect` by `size` slab; otherwise the wider of the two measured
/// extents decides, keeping the aspect ratio.
pub fn solve_size(
    pose: &CameraPose,
    target: Vec3,
    targets: &[BoundingCorners],
    size: f32,
    aspect: f32,
) -> f32 {
    let SizingPlanes {
        horizontal,
        vertical,
    } = constraints::sizing_planes(pose, target);
    let dist_max_x = max_distance_outside(targets, &horizontal);
    let dist_max_y = max_distance_outside(targets, &vertical);

    if dist_max_x < size * aspect && dist_max_y < size {
        return size;
    }
    // Absolute half-width over aspect, not relative to the current size.
    let needed = (dist_max_x / aspect).max(dist_max_y);
    log::debug!("orthographic size {size:.3} -> {needed:.3}");
    needed
}

/// Distance from `position` to the farthest corner.
pub fn far_clip_distance(position: Vec3, targets: &[BoundingCorners]) -> f32 {
    all_corners(targets)
        .map(|corner| corner.distance(position))
        .fold(0.0, f32::max)
}

/// Full framing computation.
pub fn solve(request: &FramingRequest<'_>) -> FramingSolution {
    let origin = request.pose.position;
    let pose = if request.settings.center_on_targets {
        request.pose.at(center_on_targets(&request.pose, request.targets))
    } else {
        request.pose
    };

    let planes = constraints::positioning_planes(
        request.projection,
        request.side_planes,
        origin,
        &pose,
    );
    let margin = request
        .projection
        .is_orthographic()
        .then_some(request.settings.orthographic_margin);
    let candidate = solve_position(&pose, &planes, request.targets, margin);
    let position =
        avoid_too_close(&pose, candidate, request.targets, request.near_clip);

    let size = request.projection.orthographic_size().map(|size| {
        solve_size(&pose, position, request.targets, size, request.aspect)
    });

    FramingSolution {
        position,
        size,
        far_clip: far_clip_distance(position, request.targets),
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;
    use crate::camera::{Camera, CameraRig};
    use crate::framing::bounds::Aabb;

    const TOLERANCE: f32 = 1e-3;

    fn perspective_camera(position: Vec3) -> Camera {
        Camera {
            position,
            orientation: Quat::IDENTITY,
            projection: Projection::Perspective { fovy: 60.0 },
            aspect: 1.5,
            znear: 0.3,
            zfar: 1000.0,
        }
    }

    fn orthographic_camera(position: Vec3, size: f32) -> Camera {
        Camera {
            projection: Projection::Orthographic { size },
            ..perspective_camera(position)
        }
    }

    fn request<'a>(
        camera: &Camera,
        targets: &'a [BoundingCorners],
        settings: SolverSettings,
    ) -> FramingRequest<'a> {
        FramingRequest {
            pose: camera.pose(),
            projection: camera.projection,
            aspect: camera.aspect,
            near_clip: camera.znear,
            side_planes: camera.frustum_planes(),
            targets,
            settings,
        }
    }

    fn eye_at(position: Vec3) -> CameraPose {
        CameraPose::from_orientation(position, Quat::IDENTITY)
    }

    fn cube(center: Vec3, half: f32) -> BoundingCorners {
        Aabb::from_center_half_extents(center, Vec3::splat(half)).corners()
    }

    fn scattered_targets() -> Vec<BoundingCorners> {
        vec![
            cube(Vec3::new(-8.0, 2.0, -3.0), 1.0),
            cube(Vec3::new(6.0, -4.0, 1.0), 2.0),
            cube(Vec3::new(1.0, 7.0, -10.0), 0.5),
        ]
    }

    #[test]
    fn centered_target_far_enough_does_not_move() {
        let camera = perspective_camera(Vec3::new(0.0, 0.0, 10.0));
        let targets = [cube(Vec3::ZERO, 1.0)];
        let solution =
            solve(&request(&camera, &targets, SolverSettings::default()));
        assert_eq!(solution.position, camera.position);
        assert_eq!(solution.size, None);
    }

    #[test]
    fn no_hits_means_no_retreat() {
        let camera = perspective_camera(Vec3::new(0.0, 0.0, 10.0));
        let targets = [cube(Vec3::ZERO, 1.0)];
        let planes = camera.frustum_planes();
        assert_eq!(
            max_distance_along(&targets, &planes, camera.pose().forward),
            0.0
        );
    }

    #[test]
    fn perspective_solution_contains_all_corners() {
        let targets = scattered_targets();
        let cameras = [
            perspective_camera(Vec3::new(0.0, 0.0, 5.0)),
            Camera::looking_at(
                Vec3::new(7.0, 5.0, 9.0),
                Vec3::new(-2.0, 0.0, -1.0),
                Vec3::Y,
                Projection::Perspective { fovy: 60.0 },
            ),
        ];
        for camera in &cameras {
            for settings in [
                SolverSettings::default(),
                SolverSettings {
                    center_on_targets: false,
                    ..SolverSettings::default()
                },
            ] {
                let solution = solve(&request(camera, &targets, settings));
                let mut framed = camera.clone();
                framed.position = solution.position;
                framed.zfar = solution.far_clip + 1.0;
                let frustum = framed.frustum();
                let pose = framed.pose();
                for corner in targets.iter().flatten() {
                    assert!(
                        frustum.sides_contain_point(*corner, TOLERANCE),
                        "{corner} outside frustum from {}",
                        solution.position
                    );
                    assert!(
                        pose.to_local(*corner).z >= camera.znear - TOLERANCE
                    );
                }
            }
        }
    }

    #[test]
    fn perspective_solution_respects_near_clip() {
        // Target straddles the eye, so the near plane decides.
        let camera = perspective_camera(Vec3::new(0.0, 0.0, 0.5));
        let targets = [cube(Vec3::ZERO, 1.0)];
        let solution =
            solve(&request(&camera, &targets, SolverSettings::default()));
        let pose = camera.pose().at(solution.position);
        for corner in targets.iter().flatten() {
            assert!(pose.to_local(*corner).z >= camera.znear - TOLERANCE);
        }
    }

    #[test]
    fn retreat_is_along_negative_forward() {
        let camera = perspective_camera(Vec3::new(0.0, 0.0, 2.0));
        let targets = [cube(Vec3::ZERO, 3.0)];
        let settings = SolverSettings {
            center_on_targets: false,
            ..SolverSettings::default()
        };
        let solution = solve(&request(&camera, &targets, settings));
        assert!(solution.position.z > camera.position.z);
        assert_eq!(solution.position.x, 0.0);
        assert_eq!(solution.position.y, 0.0);
    }

    #[test]
    fn avoid_too_close_pushes_back_by_deficit() {
        let pose = eye_at(Vec3::new(0.0, 0.0, 2.0));
        let targets = [cube(Vec3::ZERO, 1.0)];
        // Nearest face is at z = 1, one unit ahead of the eye.
        let moved = avoid_too_close(&pose, pose.position, &targets, 3.0);
        assert!((moved - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5);
        // Already far enough: untouched.
        let kept = avoid_too_close(&pose, pose.position, &targets, 0.5);
        assert_eq!(kept, pose.position);
    }

    #[test]
    fn avoid_too_close_handles_corners_behind_candidate() {
        let pose = eye_at(Vec3::ZERO);
        let targets = [cube(Vec3::new(0.0, 0.0, 2.0), 0.5)];
        let moved = avoid_too_close(&pose, pose.position, &targets, 0.3);
        for corner in targets.iter().flatten() {
            assert!(pose.at(moved).to_local(*corner).z >= 0.3 - 1e-5);
        }
    }

    #[test]
    fn orthographic_adds_margin_when_retreating() {
        let camera = orthographic_camera(Vec3::ZERO, 10.0);
        let targets = [cube(Vec3::new(0.0, 0.0, 4.0), 1.0)];
        let settings = SolverSettings {
            center_on_targets: false,
            orthographic_margin: 1.0,
        };
        let solution = solve(&request(&camera, &targets, settings));
        // Farthest corner is 5 behind the eye, plus the unit margin.
        assert!((solution.position - Vec3::new(0.0, 0.0, 6.0)).length() < 1e-5);
    }

    #[test]
    fn orthographic_without_retreat_skips_margin() {
        let camera = orthographic_camera(Vec3::new(0.0, 0.0, 10.0), 10.0);
        let targets = [cube(Vec3::ZERO, 1.0)];
        let solution =
            solve(&request(&camera, &targets, SolverSettings::default()));
        assert_eq!(solution.position, camera.position);
        assert_eq!(solution.size, Some(10.0));
    }

    #[test]
    fn orthographic_size_unchanged_when_targets_fit() {
        let pose = eye_at(Vec3::new(0.0, 0.0, 10.0));
        let targets = [cube(Vec3::ZERO, 1.0)];
        assert_eq!(solve_size(&pose, pose.position, &targets, 5.0, 1.5), 5.0);
    }

    #[test]
    fn orthographic_size_grows_to_wider_extent() {
        let pose = eye_at(Vec3::new(0.0, 0.0, 10.0));
        let wide = [Aabb::new(
            Vec3::new(-6.0, -1.0, -1.0),
            Vec3::new(6.0, 1.0, 1.0),
        )
        .corners()];
        // Half-width 6 over aspect 2 needs a half-height of 3.
        let size = solve_size(&pose, pose.position, &wide, 2.0, 2.0);
        assert!((size - 3.0).abs() < 1e-5);

        let tall = [Aabb::new(
            Vec3::new(-1.0, -4.0, -1.0),
            Vec3::new(1.0, 4.0, 1.0),
        )
        .corners()];
        let size = solve_size(&pose, pose.position, &tall, 2.0, 2.0);
        assert!((size - 4.0).abs() < 1e-5);
    }

    #[test]
    fn orthographic_solution_contains_all_corners() {
        let targets = scattered_targets();
        let cameras = [
            orthographic_camera(Vec3::new(0.0, 0.0, 3.0), 2.0),
            Camera::looking_at(
                Vec3::new(7.0, 5.0, 9.0),
                Vec3::new(-2.0, 0.0, -1.0),
                Vec3::Y,
                Projection::Orthographic { size: 2.0 },
            ),
        ];
        for camera in &cameras {
            for settings in [
                SolverSettings::default(),
                SolverSettings {
                    center_on_targets: false,
                    ..SolverSettings::default()
                },
            ] {
                let solution = solve(&request(camera, &targets, settings));
                let size = solution.size.unwrap();
                assert!(size >= 2.0);
                let pose = camera.pose().at(solution.position);
                for corner in targets.iter().flatten() {
                    let local = pose.to_local(*corner);
                    assert!(local.x.abs() <= size * camera.aspect + TOLERANCE);
                    assert!(local.y.abs() <= size + TOLERANCE);
                    assert!(local.z >= camera.znear - TOLERANCE);
                }
            }
        }
    }

    #[test]
    fn centering_moves_within_view_plane() {
        let pose = eye_at(Vec3::new(0.0, 0.0, 20.0));
        let targets = [cube(Vec3::new(4.0, -2.0, 0.0), 1.0)];
        let centered = center_on_targets(&pose, &targets);
        assert!((centered - Vec3::new(4.0, -2.0, 20.0)).length() < 1e-5);
        assert_eq!(center_on_targets(&pose, &[]), pose.position);
    }

    #[test]
    fn far_clip_reaches_farthest_corner() {
        let targets = [cube(Vec3::new(0.0, 0.0, -10.0), 1.0)];
        let far = far_clip_distance(Vec3::ZERO, &targets);
        let expected = Vec3::new(1.0, 1.0, -11.0).length();
        assert!((far - expected).abs() < 1e-5);
        assert_eq!(far_clip_distance(Vec3::ZERO, &[]), 0.0);
    }

    #[test]
    fn degenerate_target_still_frames() {
        let camera = perspective_camera(Vec3::ZERO);
        let p = Vec3::new(0.0, 0.0, 3.0);
        let targets = [Aabb::new(p, p).corners()];
        let solution =
            solve(&request(&camera, &targets, SolverSettings::default()));
        let pose = camera.pose().at(solution.position);
        assert!(pose.to_local(p).z >= camera.znear - TOLERANCE);
    }
}
