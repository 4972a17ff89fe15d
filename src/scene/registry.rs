//! Ordered scene list with cyclic navigation and frame orchestration.

use super::bounds::BoundingVolumeCache;
use super::culling::{CullStats, FrustumCuller};
use super::definition::{DrawContext, SceneDefinition, SceneKind};
use crate::camera::{Frustum, OrbitCamera};
use crate::gpu::{
    DebugDraw, GraphicsBackend, GraphicsState, ParamValue, RenderTarget,
    RenderTargetId,
};
use crate::options::Options;

/// Lifecycle of the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryState {
    /// No scene added yet.
    #[default]
    Uninitialized,
    /// The scene at this index is active.
    SceneActive(usize),
}

/// Owns the scenes, the camera and the per-frame culling machinery.
#[derive(Debug)]
pub struct SceneRegistry {
    scenes: Vec<SceneDefinition>,
    state: RegistryState,
    camera: OrbitCamera,
    frustum: Frustum,
    culler: FrustumCuller,
    cache: BoundingVolumeCache,
    debug: DebugDraw,
    capture: Option<RenderTargetId>,
    clear_color: [f32; 4],
    show_bounds: bool,
    log_cull_stats: bool,
    last_stats: CullStats,
}

impl SceneRegistry {
    /// Empty registry driving `camera`.
    #[must_use]
    pub fn new(camera: OrbitCamera, options: &Options) -> Self {
        let frustum = camera.frustum();
        Self {
            scenes: Vec::new(),
            state: RegistryState::Uninitialized,
            culler: FrustumCuller::new(frustum.clone()),
            frustum,
            camera,
            cache: BoundingVolumeCache::new(),
            debug: DebugDraw::new(),
            capture: None,
            clear_color: options.post_processing.clear_color,
            show_bounds: options.debug.show_bounding_boxes,
            log_cull_stats: options.debug.log_cull_stats,
            last_stats: CullStats::default(),
        }
    }

    // -- Navigation --

    /// Append a scene. The first scene added becomes active.
    pub fn add_scene(&mut self, scene: SceneDefinition) {
        self.scenes.push(scene);
        if self.scenes.len() == 1 {
            self.load_scene(0);
        }
    }

    /// Activate the scene at `index`: reset its models and move the camera
    /// to its eye. Out-of-range indices are ignored.
    pub fn load_scene(&mut self, index: usize) {
        let Some(scene) = self.scenes.get_mut(index) else {
            log::debug!("load_scene({index}) ignored: {} scenes", self.scenes.len());
            return;
        };
        scene.reset_models();
        self.camera.set_eye(scene.eye(), true);
        self.cache.invalidate_scene(index);
        self.state = RegistryState::SceneActive(index);
        log::info!("Loaded scene {index}: {}", scene.title());
    }

    /// Activate the next (or, with `reverse`, previous) scene, wrapping at
    /// either end. Does nothing with fewer than two scenes.
    pub fn load_adjacent(&mut self, reverse: bool) {
        let count = self.scenes.len();
        if count < 2 {
            return;
        }
        let Some(current) = self.active_index() else {
            return;
        };
        let next = if reverse {
            (current + count - 1) % count
        } else {
            (current + 1) % count
        };
        self.load_scene(next);
    }

    // -- Frame --

    /// Refresh the camera and frustum, then advance the active scene.
    pub fn update(&mut self, dt: f32) {
        self.camera.update();
        self.frustum = self.camera.frustum();
        let eye = self.camera.eye();
        if let Some(scene) = self.active_scene_mut() {
            let _ = scene
                .effect_mut()
                .try_set_parameter("CameraPosition", ParamValue::Vec3(eye));
            scene.update(dt);
        }
    }

    /// Draw the active scene, through its post-process if it has one, and
    /// leave the backend in the default state.
    ///
    /// The back buffer is cleared and the state reset even with no scene
    /// active, since a host overlay may have drawn into it.
    pub fn draw(&mut self, backend: &mut dyn GraphicsBackend) {
        backend.set_render_target(RenderTarget::BackBuffer);
        backend.clear(self.clear_color);
        if let RegistryState::SceneActive(index) = self.state {
            self.draw_scene(backend, index);
        }
        backend.set_state(GraphicsState::default());
    }

    fn draw_scene(&mut self, backend: &mut dyn GraphicsBackend, index: usize) {
        let (width, height) = backend.viewport_size();
        let view = self.camera.view();
        let projection = self.camera.projection();
        let scene = &mut self.scenes[index];

        let capture = if scene.post_process().is_some() {
            let target = *self
                .capture
                .get_or_insert_with(|| backend.create_render_target(width, height));
            backend.set_render_target(RenderTarget::Offscreen(target));
            backend.clear(self.clear_color);
            Some(target)
        } else {
            None
        };

        self.culler.begin_pass(self.frustum.clone());
        let mut ctx = DrawContext {
            backend: &mut *backend,
            culler: &mut self.culler,
            cache: &mut self.cache,
            debug: &mut self.debug,
            scene: index,
            view,
            projection,
            show_bounds: self.show_bounds,
        };
        scene.draw_models(&mut ctx);
        self.last_stats = self.culler.stats();

        if self.log_cull_stats && matches!(scene.kind(), SceneKind::Culling(_)) {
            log::debug!(
                "culled {} / {}",
                self.last_stats.culled,
                self.last_stats.total
            );
        }

        if let (Some(source), Some(post)) = (capture, scene.post_process_mut()) {
            backend.set_render_target(RenderTarget::BackBuffer);
            post.apply(backend, source, self.clear_color);
        }
    }

    // -- Accessors --

    /// Lifecycle state.
    #[must_use]
    pub fn state(&self) -> RegistryState {
        self.state
    }

    /// Index of the active scene.
    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        match self.state {
            RegistryState::Uninitialized => None,
            RegistryState::SceneActive(i) => Some(i),
        }
    }

    /// Active scene.
    #[must_use]
    pub fn active_scene(&self) -> Option<&SceneDefinition> {
        self.active_index().and_then(|i| self.scenes.get(i))
    }

    /// Mutable active scene.
    pub fn active_scene_mut(&mut self) -> Option<&mut SceneDefinition> {
        let index = self.active_index()?;
        self.scenes.get_mut(index)
    }

    /// Title of the active scene.
    #[must_use]
    pub fn title(&self) -> Option<&'static str> {
        self.active_scene().map(SceneDefinition::title)
    }

    /// Titles of every scene, in order.
    #[must_use]
    pub fn scene_titles(&self) -> Vec<&'static str> {
        self.scenes.iter().map(SceneDefinition::title).collect()
    }

    /// Number of scenes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether no scene has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// Orbit camera.
    #[must_use]
    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    /// Mutable orbit camera.
    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    /// Frustum refreshed by the last [`update`](Self::update).
    #[must_use]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Counters of the last draw, for scenes that show them.
    #[must_use]
    pub fn cull_stats(&self) -> Option<CullStats> {
        match self.active_scene()?.kind() {
            SceneKind::Culling(_) => Some(self.last_stats),
            _ => None,
        }
    }

    /// Bounding-volume cache.
    #[must_use]
    pub fn bounds_cache(&self) -> &BoundingVolumeCache {
        &self.cache
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use glam::Vec3;

    use super::*;
    use crate::gpu::{DrawKind, HeadlessBackend, ParameterBag, RasterizerState};
    use crate::options::{CameraOptions, CullingOptions};
    use crate::postprocess::{Filter, PostProcess};
    use crate::scene::bounds::Aabb;
    use crate::scene::definition::SceneId;
    use crate::scene::hedgerow::Hedgerow;
    use crate::scene::mesh::{Mesh, MeshPart};
    use crate::scene::model::{CullMode, Model, Transform};

    fn registry() -> SceneRegistry {
        let camera = OrbitCamera::new(
            Vec3::new(0.0, 10.0, 100.0),
            Vec3::ZERO,
            16.0 / 9.0,
            &CameraOptions::default(),
        );
        SceneRegistry::new(camera, &Options::default())
    }

    fn effect() -> Box<ParameterBag> {
        Box::new(
            ParameterBag::new("Phong")
                .with("CameraPosition", ParamValue::Vec3(Vec3::ZERO))
                .with("World", ParamValue::Matrix(glam::Mat4::IDENTITY)),
        )
    }

    fn cube() -> Arc<Mesh> {
        let corners: Vec<[f32; 3]> = Aabb::new(Vec3::splat(-1.0), Vec3::ONE)
            .corners()
            .iter()
            .map(|c| c.to_array())
            .collect();
        Arc::new(Mesh::new(
            "cube",
            vec![MeshPart::from_vertices(&corners, Vec::new()).unwrap()],
        ))
    }

    fn scene(id: SceneId, eye: Vec3) -> SceneDefinition {
        SceneDefinition::new(id, effect(), vec![Model::new(cube(), Transform::default())])
            .with_eye(eye)
    }

    fn three_scenes() -> SceneRegistry {
        let mut reg = registry();
        reg.add_scene(scene(SceneId::Lambert, Vec3::new(0.0, 0.0, 50.0)));
        reg.add_scene(scene(SceneId::Phong, Vec3::new(0.0, 0.0, 60.0)));
        reg.add_scene(scene(SceneId::Normals, Vec3::new(0.0, 0.0, 70.0)));
        reg
    }

    #[test]
    fn empty_registry_is_inert() {
        let mut reg = registry();
        assert_eq!(reg.state(), RegistryState::Uninitialized);
        reg.load_adjacent(false);
        reg.load_scene(0);
        reg.update(0.016);
        let mut backend = HeadlessBackend::new(64, 64);
        reg.draw(&mut backend);
        assert!(backend.calls().is_empty());
        assert!(reg.title().is_none());
        assert!(reg.cull_stats().is_none());
    }

    #[test]
    fn empty_registry_still_resets_state() {
        let mut reg = registry();
        let mut backend = HeadlessBackend::new(64, 64);
        backend.set_state(GraphicsState {
            rasterizer: RasterizerState::CullNone,
            ..GraphicsState::default()
        });
        reg.draw(&mut backend);
        assert_eq!(backend.state(), GraphicsState::default());
        assert_eq!(backend.clears(), &[RenderTarget::BackBuffer]);
    }

    #[test]
    fn first_scene_becomes_active() {
        let mut reg = registry();
        reg.add_scene(scene(SceneId::Lambert, Vec3::new(0.0, 0.0, 50.0)));
        assert_eq!(reg.state(), RegistryState::SceneActive(0));
        assert_eq!(reg.camera().eye(), Vec3::new(0.0, 0.0, 50.0));
        assert_eq!(reg.camera().default_eye(), Vec3::new(0.0, 0.0, 50.0));
        reg.add_scene(scene(SceneId::Phong, Vec3::ONE));
        assert_eq!(reg.active_index(), Some(0));
    }

    #[test]
    fn adjacent_navigation_wraps() {
        let mut reg = three_scenes();
        reg.load_adjacent(false);
        assert_eq!(reg.active_index(), Some(1));
        reg.load_adjacent(false);
        assert_eq!(reg.active_index(), Some(2));
        reg.load_adjacent(false);
        assert_eq!(reg.active_index(), Some(0));
        reg.load_adjacent(true);
        assert_eq!(reg.active_index(), Some(2));
        assert_eq!(reg.title(), Some("Normals"));
    }

    #[test]
    fn full_cycle_returns_to_start() {
        let mut reg = three_scenes();
        reg.load_scene(1);
        for _ in 0..reg.len() {
            reg.load_adjacent(false);
        }
        assert_eq!(reg.active_index(), Some(1));
    }

    #[test]
    fn single_scene_ignores_adjacent() {
        let mut reg = registry();
        reg.add_scene(scene(SceneId::Lambert, Vec3::Z * 50.0));
        reg.load_adjacent(true);
        assert_eq!(reg.active_index(), Some(0));
    }

    #[test]
    fn out_of_range_load_is_ignored() {
        let mut reg = three_scenes();
        reg.load_scene(1);
        reg.load_scene(3);
        assert_eq!(reg.active_index(), Some(1));
    }

    #[test]
    fn load_resets_models() {
        let mut reg = three_scenes();
        reg.active_scene_mut().unwrap().models_mut()[0]
            .transform_mut()
            .translate(Vec3::X * 5.0);
        reg.load_adjacent(false);
        reg.load_adjacent(true);
        let model = &reg.active_scene().unwrap().models()[0];
        assert_eq!(model.transform().position(), Vec3::ZERO);
    }

    #[test]
    fn update_publishes_camera_position() {
        let mut reg = three_scenes();
        reg.update(0.016);
        let eye = reg.camera().eye();
        let value = reg
            .active_scene()
            .unwrap()
            .effect()
            .parameter("CameraPosition")
            .cloned();
        assert_eq!(value, Some(ParamValue::Vec3(eye)));
    }

    #[test]
    fn draw_without_post_process_hits_back_buffer() {
        let mut reg = three_scenes();
        reg.update(0.016);
        let mut backend = HeadlessBackend::new(1280, 720);
        backend.set_state(GraphicsState {
            rasterizer: RasterizerState::CullNone,
            ..GraphicsState::default()
        });
        reg.draw(&mut backend);
        assert_eq!(backend.calls().len(), 1);
        assert_eq!(backend.calls()[0].target, RenderTarget::BackBuffer);
        assert_eq!(backend.targets_created(), 0);
        assert_eq!(backend.state(), GraphicsState::default());
    }

    #[test]
    fn post_process_draws_through_capture() {
        let mut reg = registry();
        let monochrome = PostProcess::Filter(Filter::new(Box::new(ParameterBag::new("Monochrome"))));
        reg.add_scene(
            scene(SceneId::Monochrome, Vec3::Z * 100.0).with_post_process(monochrome),
        );
        reg.update(0.016);
        let mut backend = HeadlessBackend::new(1280, 720);
        reg.draw(&mut backend);
        reg.draw(&mut backend);

        // Capture is created once and reused.
        assert_eq!(backend.targets_created(), 1);
        let calls = backend.calls();
        assert!(matches!(calls[0].target, RenderTarget::Offscreen(_)));
        assert!(matches!(calls[0].kind, DrawKind::Mesh { .. }));
        assert_eq!(calls[1].target, RenderTarget::BackBuffer);
        assert!(matches!(calls[1].kind, DrawKind::FullScreen { .. }));
        assert_eq!(backend.render_target(), RenderTarget::BackBuffer);
    }

    #[test]
    fn culling_scene_reports_stats_and_boxes() {
        let mut reg = registry();
        let models = (0..9)
            .map(|_| {
                Model::new(cube(), Transform::scaled(0.5)).with_cull_mode(CullMode::BoundingBox)
            })
            .collect();
        let row = Hedgerow::new(&CullingOptions {
            total_width: 2000.0,
            ..CullingOptions::default()
        });
        reg.add_scene(
            SceneDefinition::new(SceneId::Culling, effect(), models)
                .with_kind(SceneKind::Culling(row)),
        );
        reg.update(0.0);
        let mut backend = HeadlessBackend::new(1280, 720);
        reg.draw(&mut backend);

        let stats = reg.cull_stats().unwrap();
        assert_eq!(stats.total, 9);
        assert!(stats.culled > 0);
        assert!(stats.culled < 9);
        let lines = backend
            .calls()
            .iter()
            .filter(|c| matches!(c.kind, DrawKind::Lines { segments: 12 }))
            .count();
        assert_eq!(lines, 9);
        let meshes = backend
            .calls()
            .iter()
            .filter(|c| matches!(c.kind, DrawKind::Mesh { .. }))
            .count();
        assert_eq!(meshes, stats.visible());
    }

    #[test]
    fn scene_titles_in_order() {
        let reg = three_scenes();
        assert_eq!(
            reg.scene_titles(),
            vec!["Lambertian Shader", "Blinn-Phong Shader", "Normals"]
        );
        assert!(reg.cull_stats().is_none());
    }
}
