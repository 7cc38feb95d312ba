//! Headless auto-framing demo.
//!
//! Builds a small scene of tagged boxes, frames them from an arbitrary
//! starting pose, pauses and resumes midway, then resets. Progress is
//! reported through `log` (set `RUST_LOG=info` or `debug`).
//!
//! Usage: `autoframe [options.toml]`

use std::path::Path;

use autoframe::{
    camera::Camera,
    clock::{Clock, ManualClock},
    error::FramingError,
    framing::{Aabb, FramingController, FramingState},
    options::Options,
    scene::{Scene, SceneObject},
};
use glam::Vec3;

const FRAME_SECS: f64 = 1.0 / 60.0;

fn demo_scene(tag: &str) -> Scene {
    let mut scene = Scene::new();
    let _ = scene.add(
        "crate",
        tag,
        Some(Aabb::from_center_half_extents(
            Vec3::new(-4.0, 0.5, 1.0),
            Vec3::splat(0.5),
        )),
    );
    let _ = scene.add(
        "barrel",
        tag,
        Some(Aabb::from_center_half_extents(
            Vec3::new(3.0, 1.0, -6.0),
            Vec3::new(0.6, 1.0, 0.6),
        )),
    );
    let _ = scene.add(
        "tower",
        tag,
        Some(Aabb::new(Vec3::new(8.0, 0.0, -2.0), Vec3::new(9.0, 6.0, -1.0))),
    );
    let _ = scene.add("terrain", "ground", None);
    scene
}

type DemoController = FramingController<Camera, SceneObject, ManualClock>;

fn run_frames(ctrl: &mut DemoController, frames: u32) {
    for _ in 0..frames {
        ctrl.clock().advance(FRAME_SECS);
        ctrl.tick();
    }
    log::info!(
        "t={:.2}s state={:?} progress={:.2} eye={}",
        ctrl.clock().now(),
        ctrl.state(),
        ctrl.progress(),
        ctrl.camera().pose().position
    );
}

fn main() -> Result<(), FramingError> {
    env_logger::init();

    let options = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading options from {path}");
            Options::load(Path::new(&path))?
        }
        None => Options::default(),
    };

    let scene = demo_scene(&options.framing.target_tag);
    let camera = options
        .camera
        .build_camera(Vec3::new(0.0, 2.0, 4.0), Vec3::new(0.0, 1.0, 0.0));

    let mut ctrl = FramingController::from_source(
        camera,
        &scene,
        &options.framing,
        ManualClock::default(),
    );
    ctrl.start()?;

    let total_frames = (f64::from(options.framing.duration_secs)
        / FRAME_SECS)
        .ceil() as u32;
    run_frames(&mut ctrl, total_frames / 2);

    ctrl.pause();
    run_frames(&mut ctrl, 60);
    ctrl.resume();

    while ctrl.state() == FramingState::Moving {
        run_frames(&mut ctrl, 30);
    }
    log::info!("Far clip set to {:.2}", ctrl.camera().zfar);

    ctrl.reset();
    log::info!("Reset, eye back at {}", ctrl.camera().pose().position);
    Ok(())
}
