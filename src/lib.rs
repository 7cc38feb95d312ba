// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
// Tests assert on known-good fixtures.
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Camera auto-framing for 3D scenes.
//!
//! Given a camera and a set of target objects, autoframe computes a camera
//! position (and, for orthographic cameras, a zoom size) that keeps every
//! target inside the view volume and beyond the near clip plane, tightens
//! the far clip plane around the targets, then animates the camera to that
//! pose over a fixed duration with pause / resume / reset controls.
//!
//! # Key entry points
//!
//! - [`framing::FramingController`] - the façade UI code drives (start,
//!   pause, resume, reset, and a per-frame `tick`)
//! - [`framing::FramingSession`] - the underlying state machine
//! - [`framing::solver`] - pure geometry: position, near-clip correction,
//!   orthographic size and far clip distance
//! - [`options::Options`] - TOML-backed configuration
//!
//! # Architecture
//!
//! Everything is single-threaded and tick-driven. An external scheduler
//! calls [`framing::FramingController::tick`] once per frame; the session
//! reads the time from a [`clock::Clock`] and writes the interpolated pose
//! back through the [`camera::CameraRig`] trait. The solver never sees a
//! concrete camera or scene type, only poses, planes and corner lists.

pub mod animation;
pub mod camera;
pub mod clock;
pub mod error;
pub mod framing;
pub mod options;
pub mod scene;
