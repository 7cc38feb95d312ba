use crate::camera::CameraRig;
use crate::clock::{Clock, SystemClock};
use crate::error::FramingError;
use crate::options::FramingOptions;
use crate::scene::TargetSource;

use super::bounds::Framable;
use super::session::{FramingSession, FramingState};

/// Owns a camera, its framing targets and one [`FramingSession`].
///
/// UI buttons call [`start`](Self::start), [`pause`](Self::pause),
/// [`resume`](Self::resume) and [`reset`](Self::reset); the frame loop calls
/// [`tick`](Self::tick) once per frame. Time comes from the controller's
/// [`Clock`].
pub struct FramingController<C, T, K = SystemClock>
where
    C: CameraRig,
    T: Framable,
    K: Clock,
{
    camera: C,
    targets: Vec<T>,
    session: FramingSession,
    clock: K,
    duration_secs: f32,
}

impl<C: CameraRig, T: Framable, K: Clock> FramingController<C, T, K> {
    /// Controller over `camera` framing `targets`.
    pub fn new(
        camera: C,
        targets: Vec<T>,
        options: &FramingOptions,
        clock: K,
    ) -> Self {
        Self {
            camera,
            targets,
            session: FramingSession::new(options),
            clock,
            duration_secs: options.duration_secs,
        }
    }

    /// Controller whose targets are the objects in `source` carrying
    /// `options.target_tag`, captured once now.
    pub fn from_source<S>(
        camera: C,
        source: &S,
        options: &FramingOptions,
        clock: K,
    ) -> Self
    where
        S: TargetSource<Target = T>,
    {
        let targets = source.find_targets(&options.target_tag);
        log::debug!(
            "{} object(s) tagged '{}'",
            targets.len(),
            options.target_tag
        );
        Self::new(camera, targets, options, clock)
    }

    /// Frame the targets from the camera's current pose.
    ///
    /// Rejected while a move is active or when no target has bounds; the
    /// session is left untouched in that case.
    pub fn start(&mut self) -> Result<(), FramingError> {
        let previous = self.session.duration();
        self.session.set_duration(f64::from(self.duration_secs));
        let result = self.session.init_move(
            Some(&mut self.camera),
            &self.targets,
            self.clock.now(),
        );
        if result.is_err() {
            self.session.set_duration(previous);
        }
        result
    }

    /// Pause the move.
    pub fn pause(&mut self) {
        self.session.stop(self.clock.now());
    }

    /// Resume a paused move.
    pub fn resume(&mut self) {
        self.session.resume();
    }

    /// Cancel the move and return the camera to where it started.
    pub fn reset(&mut self) {
        self.session.reset(&mut self.camera);
    }

    /// Advance the move. Call once per frame.
    pub fn tick(&mut self) {
        if self.session.in_progress() {
            self.session.tick(&mut self.camera, self.clock.now());
        }
    }

    /// Whether the camera is moving (not paused, not done).
    pub fn is_in_progress(&self) -> bool {
        self.session.in_progress()
    }

    /// Current session state.
    pub fn state(&self) -> FramingState {
        self.session.state()
    }

    /// Interpolation progress of the current move, `0.0..=1.0`.
    pub fn progress(&self) -> f32 {
        self.session.progress(self.clock.now()).clamp(0.0, 1.0)
    }

    /// Change the duration used by the next [`start`](Self::start).
    pub fn set_duration(&mut self, secs: f32) {
        self.duration_secs = secs;
    }

    /// Replace the targets used by the next [`start`](Self::start).
    pub fn set_targets(&mut self, targets: Vec<T>) {
        self.targets = targets;
    }

    /// Targets used by [`start`](Self::start).
    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    /// The driven camera.
    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Mutable camera access. Moving the camera while a move is in
    /// progress is overwritten on the next tick.
    pub fn camera_mut(&mut self) -> &mut C {
        &mut self.camera
    }

    /// The underlying session.
    pub fn session(&self) -> &FramingSession {
        &self.session
    }

    /// The time source.
    pub fn clock(&self) -> &K {
        &self.clock
    }
}
