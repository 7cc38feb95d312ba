//! Animation helpers for camera transitions.

pub mod easing;

pub use easing::EasingFunction;
