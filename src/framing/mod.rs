//! Auto-framing: fit a camera to a set of targets and animate the move.
//!
//! Data flows one way: the [`FramingController`] asks its
//! [`FramingSession`] to initialize a move; the session extracts target
//! corners ([`bounds`]), builds constraint planes ([`constraints`]) and runs
//! the [`solver`], then interpolates the camera toward the result on each
//! tick.

/// Bounding volumes of framing targets.
pub mod bounds;
/// Constraint planes for positioning and sizing.
pub mod constraints;
/// Façade driven by UI code and the frame loop.
pub mod controller;
/// Framing move state machine.
pub mod session;
/// Framing geometry.
pub mod solver;

pub use bounds::{Aabb, BoundingCorners, Framable};
pub use controller::FramingController;
pub use session::{FramedTarget, FramingPlan, FramingSession, FramingState};
pub use solver::{FramingRequest, FramingSolution, SolverSettings};
