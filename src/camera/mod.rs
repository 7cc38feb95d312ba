//! Camera model the framing system drives.
//!
//! Provides a perspective/orthographic camera, its pose basis, the
//! [`CameraRig`] trait engines implement, and view frustum planes.

/// Core camera struct, pose and projection types.
pub mod core;
/// View frustum extraction and plane ray casting.
pub mod frustum;

pub use self::core::{Camera, CameraPose, CameraRig, Projection};
pub use self::frustum::{Frustum, Plane};
