//! Framing session: one in-flight camera move.
//!
//! The session captures the start pose when a move is initialized, asks the
//! solver for the framed pose, then interpolates between the two on every
//! tick. Time is always passed in by the caller (seconds from a monotonic
//! [`Clock`](crate::clock::Clock)), so paused time can be subtracted out.
//!
//! ```text
//! Idle/Done --init_move--> Moving --stop--> Paused --resume--> Moving
//!                            |                                   |
//!                            +----- tick reaches t >= 1 -----> Done
//! any state --reset--> Idle
//! ```

use glam::Vec3;

use super::bounds::{self, BoundingCorners, Framable};
use super::solver::{self, FramingRequest, SolverSettings};
use crate::animation::EasingFunction;
use crate::camera::CameraRig;
use crate::error::FramingError;
use crate::options::FramingOptions;

/// Lifecycle of a framing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FramingState {
    /// Nothing started, or reset.
    #[default]
    Idle,
    /// Interpolating toward the framed pose.
    Moving,
    /// Interpolation suspended; elapsed time does not count.
    Paused,
    /// Reached the framed pose.
    Done,
}

/// A target captured when the move was initialized.
#[derive(Debug, Clone)]
pub struct FramedTarget {
    /// Name used in diagnostics.
    pub label: String,
    /// World-space bounding corners at init time.
    pub corners: BoundingCorners,
}

/// Start and end of the camera move, fixed at init time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FramingPlan {
    /// Eye position when the move started.
    pub init_position: Vec3,
    /// Framed eye position.
    pub target_position: Vec3,
    /// Orthographic size when the move started.
    pub init_size: Option<f32>,
    /// Framed orthographic size.
    pub target_size: Option<f32>,
    /// Far clip distance applied at init.
    pub far_clip: f32,
}

/// Owns one framing operation at a time.
#[derive(Debug, Clone)]
pub struct FramingSession {
    state: FramingState,
    targets: Vec<FramedTarget>,
    plan: Option<FramingPlan>,
    /// Time the move started, shifted forward by every pause.
    start_time: Option<f64>,
    /// Time the current pause began.
    pause_time: Option<f64>,
    /// Move duration in seconds.
    duration: f64,
    easing: EasingFunction,
    settings: SolverSettings,
}

impl Default for FramingSession {
    fn default() -> Self {
        Self::new(&FramingOptions::default())
    }
}

impl FramingSession {
    /// Idle session configured from `options`.
    pub fn new(options: &FramingOptions) -> Self {
        Self {
            state: FramingState::Idle,
            targets: Vec::new(),
            plan: None,
            start_time: None,
            pause_time: None,
            duration: f64::from(options.duration_secs),
            easing: options.easing,
            settings: options.solver_settings(),
        }
    }

    /// Change the move duration. Takes effect on the next tick.
    pub fn set_duration(&mut self, secs: f64) {
        self.duration = secs;
    }

    /// Move duration in seconds.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Current lifecycle state.
    pub fn state(&self) -> FramingState {
        self.state
    }

    /// Whether the camera is currently being interpolated.
    pub fn in_progress(&self) -> bool {
        self.state == FramingState::Moving
    }

    /// Start and end poses of the last initialized move.
    pub fn plan(&self) -> Option<&FramingPlan> {
        self.plan.as_ref()
    }

    /// Targets captured by the last initialized move.
    pub fn targets(&self) -> &[FramedTarget] {
        &self.targets
    }

    /// Start time of the move, shifted by any pauses already applied.
    pub fn start_time(&self) -> Option<f64> {
        self.start_time
    }

    /// Time the current pause began, if paused.
    pub fn pause_time(&self) -> Option<f64> {
        self.pause_time
    }

    /// Compute the framed pose for `targets` and begin moving toward it.
    ///
    /// Rejected (with a warning, leaving every field untouched) if a move is
    /// already moving or paused, if there is no camera, or if no target has
    /// a bounding volume. Targets without extent are skipped.
    pub fn init_move<C, T>(
        &mut self,
        camera: Option<&mut C>,
        targets: &[T],
        now: f64,
    ) -> Result<(), FramingError>
    where
        C: CameraRig + ?Sized,
        T: Framable,
    {
        if matches!(self.state, FramingState::Moving | FramingState::Paused) {
            log::warn!("Camera already moving");
            return Err(FramingError::AlreadyActive(self.state));
        }
        let Some(camera) = camera else {
            log::warn!("Framing needs a camera to work");
            return Err(FramingError::MissingCamera);
        };

        let framed: Vec<FramedTarget> = targets
            .iter()
            .filter_map(|target| match bounds::extract(target) {
                Ok(corners) => Some(FramedTarget {
                    label: target.label(),
                    corners,
                }),
                Err(e) => {
                    log::warn!("Skipping framing target: {e}");
                    None
                }
            })
            .collect();
        if framed.is_empty() {
            log::warn!("Framing needs targets to focus");
            return Err(FramingError::NoTargets);
        }

        let corners: Vec<BoundingCorners> =
            framed.iter().map(|target| target.corners).collect();
        let pose = camera.pose();
        let projection = camera.projection();
        let solution = solver::solve(&FramingRequest {
            pose,
            projection,
            aspect: camera.aspect_ratio(),
            near_clip: camera.near_clip(),
            side_planes: camera.frustum_planes(),
            targets: &corners,
            settings: self.settings,
        });
        camera.set_far_clip(solution.far_clip);

        self.plan = Some(FramingPlan {
            init_position: pose.position,
            target_position: solution.position,
            init_size: projection.orthographic_size(),
            target_size: solution.size,
            far_clip: solution.far_clip,
        });
        self.targets = framed;
        self.start_time = Some(now);
        self.pause_time = None;
        self.state = FramingState::Moving;

        log::info!(
            "Framing {} target(s) over {:.2}s: {} -> {}",
            self.targets.len(),
            self.duration,
            pose.position,
            solution.position
        );
        Ok(())
    }

    /// Interpolation parameter at `now`, ignoring paused time. Not clamped.
    pub fn progress(&self, now: f64) -> f32 {
        let Some(start) = self.start_time else {
            return 0.0;
        };
        // A pause not yet folded into `start_time` still counts as paused.
        let paused = self.pause_time.map_or(0.0, |p| (now - p).max(0.0));
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - start - paused) / self.duration) as f32
    }

    /// Advance the move to `now` and write the interpolated pose to
    /// `camera`. No-op unless moving.
    pub fn tick<C: CameraRig + ?Sized>(&mut self, camera: &mut C, now: f64) {
        if self.state != FramingState::Moving {
            return;
        }
        let Some(plan) = self.plan else {
            return;
        };
        if let (Some(paused_at), Some(start)) =
            (self.pause_time.take(), self.start_time.as_mut())
        {
            *start += now - paused_at;
            log::debug!("Framing resumed after {:.3}s", now - paused_at);
        }

        let t = self.progress(now);
        if t >= 1.0 {
            camera.set_position(plan.target_position);
            if let Some(size) = plan.target_size {
                camera.set_orthographic_size(size);
            }
            self.state = FramingState::Done;
            log::info!("Framing complete at {}", plan.target_position);
            return;
        }

        let eased = self.easing.evaluate(t);
        camera.set_position(
            plan.init_position.lerp(plan.target_position, eased),
        );
        if let (Some(from), Some(to)) = (plan.init_size, plan.target_size) {
            camera.set_orthographic_size(from + (to - from) * eased);
        }
    }

    /// Pause the move at `now`. No-op unless moving.
    pub fn stop(&mut self, now: f64) {
        if self.state != FramingState::Moving {
            return;
        }
        self.pause_time = Some(now);
        self.state = FramingState::Paused;
        log::debug!("Framing paused at {now:.3}");
    }

    /// Resume a paused move. The paused time is subtracted on the next tick.
    pub fn resume(&mut self) {
        if self.state == FramingState::Paused {
            self.state = FramingState::Moving;
        }
    }

    /// Cancel any move and put the camera back where the last move started.
    pub fn reset<C: CameraRig + ?Sized>(&mut self, camera: &mut C) {
        if let Some(plan) = &self.plan {
            camera.set_position(plan.init_position);
            if let Some(size) = plan.init_size {
                camera.set_orthographic_size(size);
            }
        }
        self.pause_time = None;
        self.start_time = None;
        if self.state != FramingState::Idle {
            log::info!("Framing reset");
        }
        self.state = FramingState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;
    use crate::camera::{Camera, Projection};
    use crate::framing::bounds::Aabb;

    struct NoBounds;

    impl Framable for NoBounds {
        fn world_bounds(&self) -> Option<Aabb> {
            None
        }
    }

    fn options() -> FramingOptions {
        FramingOptions {
            duration_secs: 4.0,
            ..FramingOptions::default()
        }
    }

    fn camera(projection: Projection) -> Camera {
        Camera {
            position: Vec3::new(0.0, 0.0, 2.0),
            orientation: Quat::IDENTITY,
            projection,
            aspect: 1.5,
            znear: 0.3,
            zfar: 1000.0,
        }
    }

    fn perspective() -> Camera {
        camera(Projection::Perspective { fovy: 60.0 })
    }

    fn targets() -> Vec<Aabb> {
        vec![
            Aabb::from_center_half_extents(
                Vec3::new(-3.0, 0.0, 0.0),
                Vec3::ONE,
            ),
            Aabb::from_center_half_extents(
                Vec3::new(3.0, 1.0, -2.0),
                Vec3::ONE,
            ),
        ]
    }

    fn started(cam: &mut Camera) -> FramingSession {
        let mut session = FramingSession::new(&options());
        session.init_move(Some(cam), &targets(), 0.0).unwrap();
        session
    }

    #[test]
    fn init_move_starts_moving() {
        let mut cam = perspective();
        let session = started(&mut cam);
        assert_eq!(session.state(), FramingState::Moving);
        assert!(session.in_progress());
        assert_eq!(session.start_time(), Some(0.0));
        assert_eq!(session.targets().len(), 2);
        let plan = session.plan().unwrap();
        assert_eq!(plan.init_position, Vec3::new(0.0, 0.0, 2.0));
        assert_ne!(plan.target_position, plan.init_position);
        assert_eq!(plan.init_size, None);
        // Init sets far clip but does not move the camera yet.
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(cam.zfar, plan.far_clip);
    }

    #[test]
    fn missing_camera_is_rejected() {
        let mut session = FramingSession::new(&options());
        let err = session
            .init_move::<Camera, _>(None, &targets(), 0.0)
            .unwrap_err();
        assert!(matches!(err, FramingError::MissingCamera));
        assert_eq!(session.state(), FramingState::Idle);
        assert!(session.plan().is_none());
    }

    #[test]
    fn empty_targets_are_rejected() {
        let mut cam = perspective();
        let mut session = FramingSession::new(&options());
        let none: [Aabb; 0] = [];
        let err = session.init_move(Some(&mut cam), &none, 0.0).unwrap_err();
        assert!(matches!(err, FramingError::NoTargets));
        assert_eq!(session.state(), FramingState::Idle);
    }

    #[test]
    fn targets_without_extent_are_skipped() {
        let mut cam = perspective();
        let mut session = FramingSession::new(&options());
        let err = session
            .init_move(Some(&mut cam), &[NoBounds, NoBounds], 0.0)
            .unwrap_err();
        assert!(matches!(err, FramingError::NoTargets));

        let boxes = targets();
        let mixed: Vec<&dyn Framable> = vec![&NoBounds, &boxes[0]];
        session.init_move(Some(&mut cam), &mixed, 0.0).unwrap();
        assert_eq!(session.targets().len(), 1);
    }

    #[test]
    fn concurrent_start_leaves_session_untouched() {
        let mut cam = perspective();
        let mut session = started(&mut cam);
        session.tick(&mut cam, 1.0);
        let plan = *session.plan().unwrap();

        let other = [Aabb::from_center_half_extents(
            Vec3::new(50.0, 0.0, 0.0),
            Vec3::ONE,
        )];
        let err = session.init_move(Some(&mut cam), &other, 2.0).unwrap_err();
        assert!(matches!(
            err,
            FramingError::AlreadyActive(FramingState::Moving)
        ));
        assert_eq!(*session.plan().unwrap(), plan);
        assert_eq!(session.start_time(), Some(0.0));
        assert_eq!(session.state(), FramingState::Moving);

        session.stop(2.0);
        assert!(session.init_move(Some(&mut cam), &other, 3.0).is_err());
        assert_eq!(session.state(), FramingState::Paused);
    }

    #[test]
    fn tick_interpolates_linearly_and_finishes() {
        let mut cam = perspective();
        let mut session = started(&mut cam);
        let plan = *session.plan().unwrap();

        session.tick(&mut cam, 1.0);
        let quarter = plan.init_position.lerp(plan.target_position, 0.25);
        assert!((cam.position - quarter).length() < 1e-5);
        assert_eq!(session.state(), FramingState::Moving);

        session.tick(&mut cam, 4.0);
        assert_eq!(cam.position, plan.target_position);
        assert_eq!(session.state(), FramingState::Done);
        assert!(!session.in_progress());

        // Done sessions ignore further ticks.
        cam.position = Vec3::ZERO;
        session.tick(&mut cam, 5.0);
        assert_eq!(cam.position, Vec3::ZERO);
    }

    #[test]
    fn overshooting_tick_lands_on_target() {
        let mut cam = perspective();
        let mut session = started(&mut cam);
        session.tick(&mut cam, 9.0);
        assert_eq!(cam.position, session.plan().unwrap().target_position);
        assert_eq!(session.state(), FramingState::Done);
    }

    #[test]
    fn pause_time_does_not_advance_progress() {
        let mut cam = perspective();
        let mut paused = started(&mut cam);
        paused.tick(&mut cam, 1.0);
        paused.stop(1.0);
        assert_eq!(paused.state(), FramingState::Paused);

        // Ticks while paused do nothing.
        let before = cam.position;
        paused.tick(&mut cam, 2.0);
        assert_eq!(cam.position, before);
        assert!((paused.progress(2.5) - 0.25).abs() < 1e-6);

        paused.resume();
        paused.tick(&mut cam, 3.5);
        assert!((paused.progress(3.5) - 0.25).abs() < 1e-6);
        let resumed_position = cam.position;

        let mut other_cam = perspective();
        let mut uninterrupted = started(&mut other_cam);
        uninterrupted.tick(&mut other_cam, 1.0);
        assert!((resumed_position - other_cam.position).length() < 1e-5);

        // Later progress keeps the shifted start.
        paused.tick(&mut cam, 4.5);
        assert!((paused.progress(4.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stop_twice_keeps_first_pause() {
        let mut cam = perspective();
        let mut session = started(&mut cam);
        session.stop(1.0);
        session.stop(2.0);
        assert_eq!(session.pause_time(), Some(1.0));
        session.resume();
        session.tick(&mut cam, 3.0);
        assert!((session.progress(3.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn stop_and_resume_are_noops_when_idle() {
        let mut session = FramingSession::new(&options());
        session.stop(1.0);
        assert_eq!(session.state(), FramingState::Idle);
        assert_eq!(session.pause_time(), None);
        session.resume();
        assert_eq!(session.state(), FramingState::Idle);
    }

    #[test]
    fn reset_restores_start_pose_and_is_idempotent() {
        let mut cam = camera(Projection::Orthographic { size: 1.0 });
        let mut session = started(&mut cam);
        session.tick(&mut cam, 2.0);
        assert_ne!(cam.position, Vec3::new(0.0, 0.0, 2.0));

        session.reset(&mut cam);
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(cam.projection, Projection::Orthographic { size: 1.0 });
        assert_eq!(session.state(), FramingState::Idle);
        assert_eq!(session.start_time(), None);

        let snapshot = cam.clone();
        session.reset(&mut cam);
        assert_eq!(cam, snapshot);
        assert_eq!(session.state(), FramingState::Idle);
    }

    #[test]
    fn reset_while_paused_cancels() {
        let mut cam = perspective();
        let mut session = started(&mut cam);
        session.tick(&mut cam, 1.0);
        session.stop(1.0);
        session.reset(&mut cam);
        assert_eq!(session.state(), FramingState::Idle);
        assert_eq!(session.pause_time(), None);
        // A new move can start right away.
        session.init_move(Some(&mut cam), &targets(), 5.0).unwrap();
        assert_eq!(session.start_time(), Some(5.0));
    }

    #[test]
    fn done_session_can_start_again() {
        let mut cam = perspective();
        let mut session = started(&mut cam);
        session.tick(&mut cam, 4.0);
        assert_eq!(session.state(), FramingState::Done);
        session.init_move(Some(&mut cam), &targets(), 10.0).unwrap();
        assert_eq!(session.state(), FramingState::Moving);
        assert_eq!(session.targets().len(), 2);
    }

    #[test]
    fn orthographic_size_is_interpolated() {
        let mut cam = camera(Projection::Orthographic { size: 1.0 });
        let mut session = started(&mut cam);
        let plan = *session.plan().unwrap();
        let (from, to) = (plan.init_size.unwrap(), plan.target_size.unwrap());
        assert!(to > from);

        session.tick(&mut cam, 2.0);
        let half = cam.orthographic_size().unwrap();
        assert!((half - (from + to) * 0.5).abs() < 1e-5);

        session.tick(&mut cam, 4.0);
        assert_eq!(cam.orthographic_size(), Some(to));
    }

    #[test]
    fn zero_duration_completes_on_first_tick() {
        let mut cam = perspective();
        let mut session = started(&mut cam);
        session.set_duration(0.0);
        session.tick(&mut cam, 0.0);
        assert_eq!(session.state(), FramingState::Done);
        assert_eq!(cam.position, session.plan().unwrap().target_position);
    }
}
