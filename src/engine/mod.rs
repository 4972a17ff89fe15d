//! The gallery engine: scene registry, input and frame timing behind one
//! command-driven facade.
//!
//! A host owns a [`GraphicsBackend`] and a `GalleryEngine`. Each frame it
//! forwards window events through [`GalleryEngine::handle_event`], then
//! calls [`GalleryEngine::frame`] with the elapsed seconds.

pub mod command;
mod construction;

pub use command::GalleryCommand;
pub use construction::{build_camera, build_scenes, GalleryAssets};
use glam::Vec3;

use crate::error::GalleryError;
use crate::gpu::GraphicsBackend;
use crate::input::{InputEvent, InputProcessor};
use crate::options::Options;
use crate::scene::{CullStats, SceneKind, SceneRegistry};
use crate::util::frame_timing::FrameTiming;

/// Radians per second of held rotate key.
const KEY_ROTATE_SPEED: f32 = 0.05;

/// Registry, input processor and FPS counter driven by commands.
#[derive(Debug)]
pub struct GalleryEngine {
    registry: SceneRegistry,
    input: InputProcessor,
    timing: FrameTiming,
    exit_requested: bool,
}

impl GalleryEngine {
    /// Build every demo scene from `assets` and activate the first.
    #[must_use]
    pub fn new(
        backend: &mut dyn GraphicsBackend,
        assets: &GalleryAssets,
        options: &Options,
    ) -> Self {
        let mut registry = SceneRegistry::new(build_camera(options), options);
        for scene in build_scenes(backend, assets, options) {
            registry.add_scene(scene);
        }
        registry.camera_mut().sync_orbit_to_camera();
        log::info!("Gallery ready: {} scenes", registry.len());

        Self {
            registry,
            input: InputProcessor::with_key_bindings(options.keybindings.clone()),
            timing: FrameTiming::new(),
            exit_requested: false,
        }
    }

    /// [`new`](Self::new) with generated stand-in assets.
    ///
    /// # Errors
    ///
    /// Propagates mesh generation errors.
    pub fn with_procedural_assets(
        backend: &mut dyn GraphicsBackend,
        options: &Options,
    ) -> Result<Self, GalleryError> {
        let assets = GalleryAssets::procedural(options)?;
        Ok(Self::new(backend, &assets, options))
    }

    // -- Commands --

    /// Carry out one command.
    pub fn execute(&mut self, command: GalleryCommand) {
        match command {
            GalleryCommand::OrbitCamera { delta } => {
                self.registry.camera_mut().orbit(delta.x, delta.y);
            }
            GalleryCommand::ZoomCamera { delta } => {
                self.registry.camera_mut().orbit_zoom(delta);
            }
            GalleryCommand::SyncOrbit => self.registry.camera_mut().sync_orbit_to_camera(),
            GalleryCommand::ResetView => {
                self.registry.camera_mut().reset();
                if let Some(scene) = self.registry.active_scene_mut() {
                    scene.reset_models();
                }
            }
            GalleryCommand::NextScene => self.registry.load_adjacent(false),
            GalleryCommand::PreviousScene => self.registry.load_adjacent(true),
            GalleryCommand::SelectScene { index } => self.registry.load_scene(index),
            GalleryCommand::NudgeModels { delta } => self.nudge_models(delta.x, delta.y),
            GalleryCommand::SpinModels { angle } => self.spin_models(angle),
            GalleryCommand::Exit => {
                log::info!("Exit requested");
                self.exit_requested = true;
            }
        }

        if command.changes_scene() {
            self.registry.camera_mut().sync_orbit_to_camera();
        }
    }

    /// Route a window event through the input processor and execute the
    /// resulting command, if any.
    pub fn handle_event(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            self.execute(command);
        }
    }

    fn nudge_models(&mut self, x: f32, y: f32) {
        let Some(scene) = self.registry.active_scene_mut() else {
            return;
        };
        let slide = matches!(scene.kind(), SceneKind::Culling(_));
        for model in scene.models_mut() {
            let transform = model.transform_mut();
            if slide {
                transform.translate(Vec3::new(x, y, 0.0));
            } else if x != 0.0 {
                transform.rotate_y(-KEY_ROTATE_SPEED * x);
            }
        }
    }

    fn spin_models(&mut self, angle: f32) {
        if let Some(scene) = self.registry.active_scene_mut() {
            for model in scene.models_mut() {
                model.transform_mut().rotate_y(angle);
            }
        }
    }

    // -- Frame --

    /// Advance by `dt` seconds: held-key and inertia commands, then scene
    /// animation.
    pub fn update(&mut self, dt: f32) {
        for command in self.input.frame(dt) {
            self.execute(command);
        }
        self.registry.update(dt);
    }

    /// Draw the active scene and count the frame.
    pub fn render(&mut self, backend: &mut dyn GraphicsBackend) {
        self.registry.draw(backend);
        let _ = self.timing.end_frame();
    }

    /// [`update`](Self::update) then [`render`](Self::render).
    pub fn frame(&mut self, backend: &mut dyn GraphicsBackend, dt: f32) {
        self.update(dt);
        self.render(backend);
    }

    // -- Queries --

    /// Whether an [`Exit`](GalleryCommand::Exit) command has run.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Frames counted in the last full second.
    #[must_use]
    pub fn fps(&self) -> u32 {
        self.timing.fps()
    }

    /// Culled/total counters of the culling scene while it is active.
    #[must_use]
    pub fn cull_stats(&self) -> Option<CullStats> {
        self.registry.cull_stats()
    }

    /// Scene list for the selector.
    #[must_use]
    pub fn scene_titles(&self) -> Vec<&'static str> {
        self.registry.scene_titles()
    }

    /// Index of the active scene.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.registry.active_index()
    }

    /// Title of the active scene.
    #[must_use]
    pub fn title(&self) -> Option<&'static str> {
        self.registry.title()
    }

    /// Read access to the registry.
    #[must_use]
    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    /// Mutable access to the registry.
    pub fn registry_mut(&mut self) -> &mut SceneRegistry {
        &mut self.registry
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::gpu::HeadlessBackend;
    use crate::scene::SceneId;

    fn engine() -> (GalleryEngine, HeadlessBackend) {
        let mut backend = HeadlessBackend::new(1280, 720);
        let engine =
            GalleryEngine::with_procedural_assets(&mut backend, &Options::default()).unwrap();
        (engine, backend)
    }

    fn select(engine: &mut GalleryEngine, id: SceneId) {
        let index = engine
            .registry()
            .scene_titles()
            .iter()
            .position(|t| *t == id.title())
            .unwrap();
        engine.execute(GalleryCommand::SelectScene { index });
    }

    #[test]
    fn starts_on_terrain() {
        let (engine, _) = engine();
        assert_eq!(engine.active_index(), Some(0));
        assert_eq!(engine.title(), Some(SceneId::Terrain.title()));
        assert_eq!(engine.scene_titles().len(), 13);
    }

    #[test]
    fn scene_change_resyncs_orbit() {
        let (mut engine, _) = engine();
        engine.execute(GalleryCommand::NextScene);
        let camera = engine.registry().camera();
        assert!((camera.distance() - camera.eye().length()).abs() < 1e-3);
        assert_eq!(engine.active_index(), Some(1));

        engine.execute(GalleryCommand::PreviousScene);
        engine.execute(GalleryCommand::PreviousScene);
        assert_eq!(engine.active_index(), Some(12));
    }

    #[test]
    fn zoom_moves_camera_closer() {
        let (mut engine, _) = engine();
        select(&mut engine, SceneId::Lambert);
        let before = engine.registry().camera().distance();
        engine.execute(GalleryCommand::ZoomCamera { delta: 120.0 });
        let after = engine.registry().camera().distance();
        assert!((before - after - 1.2).abs() < 1e-3);
    }

    #[test]
    fn reset_view_restores_models() {
        let (mut engine, _) = engine();
        select(&mut engine, SceneId::Phong);
        engine.execute(GalleryCommand::SpinModels { angle: 1.0 });
        let model = &engine.registry().active_scene().unwrap().models()[0];
        assert!((model.transform().rotation().y - 1.0).abs() < 1e-6);

        engine.execute(GalleryCommand::ResetView);
        let model = &engine.registry().active_scene().unwrap().models()[0];
        assert_eq!(model.transform().rotation(), Vec3::ZERO);
    }

    #[test]
    fn nudge_rotates_outside_culling_scene() {
        let (mut engine, _) = engine();
        select(&mut engine, SceneId::Normals);
        engine.execute(GalleryCommand::NudgeModels {
            delta: Vec2::new(-1.0, 1.0),
        });
        let transform = engine.registry().active_scene().unwrap().models()[0].transform();
        assert!((transform.rotation().y - KEY_ROTATE_SPEED).abs() < 1e-6);
        assert_eq!(transform.position(), Vec3::ZERO);
    }

    #[test]
    fn nudge_slides_in_culling_scene() {
        let (mut engine, _) = engine();
        select(&mut engine, SceneId::Culling);
        let before = engine.registry().active_scene().unwrap().models()[0]
            .transform()
            .position();
        engine.execute(GalleryCommand::NudgeModels {
            delta: Vec2::new(-1.0, 2.0),
        });
        let after = engine.registry().active_scene().unwrap().models()[0]
            .transform()
            .position();
        assert_eq!(after - before, Vec3::new(-1.0, 2.0, 0.0));
    }

    #[test]
    fn culling_frame_reports_stats() {
        let (mut engine, mut backend) = engine();
        select(&mut engine, SceneId::Culling);
        assert!(engine.cull_stats().is_some());
        engine.frame(&mut backend, 0.016);
        let stats = engine.cull_stats().unwrap();
        assert_eq!(stats.total, 9);
        assert!(stats.culled <= stats.total);
    }

    #[test]
    fn escape_key_requests_exit() {
        let (mut engine, _) = engine();
        engine.handle_event(InputEvent::Key {
            code: "Escape".to_owned(),
            pressed: true,
        });
        assert!(engine.exit_requested());
    }

    #[test]
    fn every_scene_renders() {
        let (mut engine, mut backend) = engine();
        for _ in 0..engine.scene_titles().len() {
            engine.frame(&mut backend, 0.016);
            assert!(!backend.take_calls().is_empty(), "{:?}", engine.title());
            engine.execute(GalleryCommand::NextScene);
        }
        assert_eq!(engine.active_index(), Some(0));
    }
}
