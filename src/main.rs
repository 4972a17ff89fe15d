//! Headless walk through the gallery.
//!
//! Builds every scene against a recording backend, plays a short scripted
//! input sequence in each, and logs what was drawn. Pass a TOML options
//! file as the first argument to override defaults.

use std::path::Path;

use shade_gallery::engine::GalleryEngine;
use shade_gallery::gpu::{DrawKind, HeadlessBackend};
use shade_gallery::input::{InputEvent, MouseButton};
use shade_gallery::options::Options;

const FRAME_DT: f32 = 1.0 / 60.0;
const FRAMES_PER_SCENE: usize = 120;

fn load_options() -> Options {
    let Some(path) = std::env::args().nth(1) else {
        return Options::default();
    };
    match Options::load(Path::new(&path)) {
        Ok(options) => options,
        Err(e) => {
            log::error!("Failed to load options from {path}: {e}");
            std::process::exit(1);
        }
    }
}

/// Orbit a little with the right button and give the models a spin.
fn script(frame: usize) -> Vec<InputEvent> {
    match frame {
        10 => vec![
            InputEvent::CursorMoved { x: 640.0, y: 360.0 },
            InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: true,
            },
        ],
        11..=30 => vec![InputEvent::CursorMoved {
            x: 640.0 + (frame - 10) as f32 * 4.0,
            y: 360.0,
        }],
        31 => vec![
            InputEvent::Scroll { delta: 240.0 },
            InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: false,
            },
        ],
        40 => vec![InputEvent::Scroll { delta: 120.0 }],
        _ => Vec::new(),
    }
}

fn main() {
    env_logger::init();

    let options = load_options();
    let mut backend = HeadlessBackend::new(options.window.width, options.window.height);
    let mut engine = match GalleryEngine::with_procedural_assets(&mut backend, &options) {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("Failed to build gallery: {e}");
            std::process::exit(1);
        }
    };

    for _ in 0..engine.scene_titles().len() {
        let title = engine.title().unwrap_or("?");
        let mut meshes = 0usize;
        let mut full_screen = 0usize;
        for frame in 0..FRAMES_PER_SCENE {
            for event in script(frame) {
                engine.handle_event(event);
            }
            engine.frame(&mut backend, FRAME_DT);
            for call in backend.take_calls() {
                match call.kind {
                    DrawKind::FullScreen { .. } => full_screen += 1,
                    _ => meshes += 1,
                }
            }
        }

        let camera = engine.registry().camera();
        log::info!(
            "{title}: {meshes} geometry draws, {full_screen} full-screen passes, \
             camera distance {:.1}",
            camera.distance()
        );
        if let Some(stats) = engine.cull_stats() {
            log::info!("{title}: culled {} of {}", stats.culled, stats.total);
        }

        engine.handle_event(InputEvent::Key {
            code: "Space".to_owned(),
            pressed: true,
        });
        engine.handle_event(InputEvent::Key {
            code: "Space".to_owned(),
            pressed: false,
        });
    }

    engine.handle_event(InputEvent::Key {
        code: "Escape".to_owned(),
        pressed: true,
    });
    if engine.exit_requested() {
        log::info!("Done, back on {}", engine.title().unwrap_or("?"));
    }
}
