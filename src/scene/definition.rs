//! Scene definitions: what a scene shows and how it animates.

use glam::{Mat4, Vec3};

use super::bounds::{BoundingVolumeCache, ModelKey};
use super::culling::FrustumCuller;
use super::hedgerow::Hedgerow;
use super::model::Model;
use super::terrain::Terrain;
use crate::gpu::shader::colors;
use crate::gpu::{DebugDraw, Effect, GraphicsBackend, ParamValue};
use crate::postprocess::PostProcess;

/// Eye used by scenes that do not pick their own.
pub const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 0.0, 100.0);

/// Projector position used when the effect does not declare one.
pub const DEFAULT_PROJECTOR_POSITION: Vec3 = Vec3::new(0.0, 20.0, 30.0);

/// Rotate `(0, 0, distance)` about X, then Y, then Z (angles in degrees).
#[must_use]
pub fn eye_transform(distance: f32, x_deg: f32, y_deg: f32, z_deg: f32) -> Vec3 {
    let rotation = Mat4::from_rotation_z(z_deg.to_radians())
        * Mat4::from_rotation_y(y_deg.to_radians())
        * Mat4::from_rotation_x(x_deg.to_radians());
    rotation.transform_point3(Vec3::new(0.0, 0.0, distance))
}

// ---------------------------------------------------------------------------
// SceneId
// ---------------------------------------------------------------------------

/// Identity of a demo scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    /// Height-map terrain with scan line.
    Terrain,
    /// Lambertian diffuse.
    Lambert,
    /// Blinn-Phong specular.
    Phong,
    /// Normals as colour.
    Normals,
    /// Procedural checkerboard.
    Checkered,
    /// Textured surface.
    Texture,
    /// Cook-Torrance BRDF.
    CookTorrance,
    /// Spotlight cone.
    Spotlight,
    /// Three coloured lights.
    Multilight,
    /// Frustum-culling hedgerow.
    Culling,
    /// Projective texturing.
    Projection,
    /// Monochrome post-process.
    Monochrome,
    /// Gaussian blur post-process.
    GaussianBlur,
}

impl SceneId {
    /// Display title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Terrain => "Height Map Terrain",
            Self::Lambert => "Lambertian Shader",
            Self::Phong => "Blinn-Phong Shader",
            Self::Normals => "Normals",
            Self::Checkered => "Procedural Checkers",
            Self::Texture => "Texture",
            Self::CookTorrance => "Cook-Torrance BRDF",
            Self::Spotlight => "Spotlight",
            Self::Multilight => "Multi-Light",
            Self::Culling => "Hedgerow",
            Self::Projection => "Projective Texture",
            Self::Monochrome => "Monochrome Filter",
            Self::GaussianBlur => "Gaussian Blur Filter",
        }
    }
}

// ---------------------------------------------------------------------------
// SceneClock
// ---------------------------------------------------------------------------

/// Accumulated scene time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneClock {
    elapsed: f32,
}

impl SceneClock {
    /// Seconds accumulated.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Add `dt`; a clock that stops being finite starts over at zero.
    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        if !self.elapsed.is_finite() {
            self.elapsed = 0.0;
        }
    }

    /// Start over once a full `period` has passed.
    pub fn wrap(&mut self, period: f32) {
        if self.elapsed >= period {
            self.elapsed = 0.0;
        }
        self.elapsed = self.elapsed.max(0.0);
    }

    /// Back to zero.
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

// ---------------------------------------------------------------------------
// Projector
// ---------------------------------------------------------------------------

/// Perspective projector feeding `ProjectorViewProjection`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    /// Point the projector aims at.
    pub target: Vec3,
}

impl Projector {
    /// Narrow spot aimed just above the origin.
    pub const NARROW: Self = Self {
        fov_deg: 20.0,
        target: Vec3::new(0.0, 10.0, 0.0),
    };

    /// Wide projector aimed at the origin.
    pub const WIDE: Self = Self {
        fov_deg: 100.0,
        target: Vec3::ZERO,
    };

    /// `projection * view * model_world` for a projector at `position`.
    #[must_use]
    pub fn view_projection(&self, position: Vec3, model_world: Mat4) -> Mat4 {
        let projection =
            Mat4::perspective_rh(self.fov_deg.to_radians(), 1.0, 1.0, 100.0);
        let view = Mat4::look_at_rh(position, self.target, Vec3::Y);
        projection * view * model_world
    }
}

// ---------------------------------------------------------------------------
// SceneKind
// ---------------------------------------------------------------------------

/// Per-kind animation and draw behaviour.
#[derive(Debug, Clone, Default)]
pub enum SceneKind {
    /// Static models.
    #[default]
    Standard,
    /// Oscillating row with bounding boxes shown.
    Culling(Hedgerow),
    /// Models spin with time under a wide projector.
    Projection,
    /// Scan-line terrain drawn for the scene's mesh-less model.
    Terrain(Box<Terrain>),
}

/// Everything a scene needs to draw its models in one pass.
pub struct DrawContext<'a> {
    /// Target device.
    pub backend: &'a mut dyn GraphicsBackend,
    /// Frustum test for this pass.
    pub culler: &'a mut FrustumCuller,
    /// World-box cache.
    pub cache: &'a mut BoundingVolumeCache,
    /// Wireframe overlay.
    pub debug: &'a mut DebugDraw,
    /// Registry index of the scene being drawn.
    pub scene: usize,
    /// Camera view.
    pub view: Mat4,
    /// Camera projection.
    pub projection: Mat4,
    /// Whether culling scenes draw their tested boxes.
    pub show_bounds: bool,
}

// ---------------------------------------------------------------------------
// SceneDefinition
// ---------------------------------------------------------------------------

/// One entry in the scene registry.
pub struct SceneDefinition {
    id: SceneId,
    models: Vec<Model>,
    effect: Box<dyn Effect>,
    eye: Vec3,
    post_process: Option<PostProcess>,
    kind: SceneKind,
    clock: SceneClock,
}

impl std::fmt::Debug for SceneDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneDefinition")
            .field("id", &self.id)
            .field("models", &self.models.len())
            .field("effect", &self.effect.name())
            .field("eye", &self.eye)
            .field("post_process", &self.post_process.is_some())
            .finish_non_exhaustive()
    }
}

impl SceneDefinition {
    /// Standard scene at [`DEFAULT_EYE`].
    pub fn new(id: SceneId, effect: Box<dyn Effect>, models: Vec<Model>) -> Self {
        Self {
            id,
            models,
            effect,
            eye: DEFAULT_EYE,
            post_process: None,
            kind: SceneKind::Standard,
            clock: SceneClock::default(),
        }
    }

    /// Set the eye placed by a scene load.
    #[must_use]
    pub fn with_eye(mut self, eye: Vec3) -> Self {
        self.eye = eye;
        self
    }

    /// Render through a full-screen post-process.
    #[must_use]
    pub fn with_post_process(mut self, post_process: PostProcess) -> Self {
        self.post_process = Some(post_process);
        self
    }

    /// Set the animation/draw kind.
    #[must_use]
    pub fn with_kind(mut self, kind: SceneKind) -> Self {
        self.kind = kind;
        self
    }

    /// Scene identity.
    #[must_use]
    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &'static str {
        self.id.title()
    }

    /// Eye placed by a scene load.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    /// Models in draw order.
    #[must_use]
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Mutable models.
    pub fn models_mut(&mut self) -> &mut [Model] {
        &mut self.models
    }

    /// Shader effect.
    #[must_use]
    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    /// Mutable shader effect.
    pub fn effect_mut(&mut self) -> &mut dyn Effect {
        self.effect.as_mut()
    }

    /// Post-process, if any.
    #[must_use]
    pub fn post_process(&self) -> Option<&PostProcess> {
        self.post_process.as_ref()
    }

    /// Mutable post-process, if any.
    pub fn post_process_mut(&mut self) -> Option<&mut PostProcess> {
        self.post_process.as_mut()
    }

    /// Animation kind.
    #[must_use]
    pub fn kind(&self) -> &SceneKind {
        &self.kind
    }

    /// Scene time.
    #[must_use]
    pub fn clock(&self) -> SceneClock {
        self.clock
    }

    /// Restore every model's transform.
    pub fn reset_models(&mut self) {
        for model in &mut self.models {
            model.reset();
        }
    }

    /// Advance the clock and run the per-kind animation.
    pub fn update(&mut self, dt: f32) {
        self.clock.advance(dt);

        match &mut self.kind {
            SceneKind::Standard => {}
            SceneKind::Culling(row) => {
                self.clock.wrap(row.period());
                row.layout(self.clock.elapsed(), &mut self.models);
            }
            SceneKind::Projection => {
                let t = self.clock.elapsed();
                let _ = self.effect.try_set_parameter("Time", ParamValue::Float(t));
                for model in &mut self.models {
                    model.transform_mut().set_rotation_y(t);
                }
            }
            SceneKind::Terrain(terrain) => terrain.advance(&mut self.clock),
        }

        self.update_projector();
    }

    /// Refresh `ProjectorViewProjection` if the effect declares it.
    pub fn update_projector(&mut self) {
        if !self.effect.has_parameter("ProjectorViewProjection") {
            return;
        }
        let projector = match self.kind {
            SceneKind::Projection => Projector::WIDE,
            _ => Projector::NARROW,
        };
        let position = self
            .effect
            .parameter("ProjectorPosition")
            .and_then(ParamValue::as_vec3)
            .unwrap_or(DEFAULT_PROJECTOR_POSITION);
        let world = self
            .models
            .first()
            .map_or(Mat4::IDENTITY, |m| m.transform().world());
        let _ = self.effect.try_set_parameter(
            "ProjectorViewProjection",
            ParamValue::Matrix(projector.view_projection(position, world)),
        );
    }

    /// Draw every model that passes the cull test.
    pub fn draw_models(&mut self, ctx: &mut DrawContext<'_>) {
        let effect = self.effect.as_mut();
        let show_boxes = ctx.show_bounds && matches!(self.kind, SceneKind::Culling(_));
        if show_boxes {
            ctx.debug.begin(ctx.view, ctx.projection);
        }

        for (index, model) in self.models.iter().enumerate() {
            let key = ModelKey {
                scene: ctx.scene,
                model: index,
            };
            let result = ctx.culler.test(ctx.cache, key, model);
            if result.visible {
                match (&self.kind, model.mesh()) {
                    (SceneKind::Terrain(terrain), None) => terrain.draw(
                        ctx.backend,
                        effect,
                        model.transform().world(),
                        ctx.view,
                        ctx.projection,
                    ),
                    _ => model.draw(ctx.backend, effect, ctx.view, ctx.projection),
                }
            }
            if show_boxes {
                if let Some(aabb) = result.tested_box {
                    ctx.debug.draw_box(ctx.backend, &aabb, colors::WHITE);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::ParameterBag;
    use crate::options::CullingOptions;
    use crate::scene::model::Transform;

    fn bag() -> Box<dyn Effect> {
        Box::new(
            ParameterBag::new("Projective")
                .with("ProjectorViewProjection", ParamValue::Matrix(Mat4::IDENTITY))
                .with("ProjectorPosition", ParamValue::Vec3(Vec3::new(0.0, 0.0, 40.0)))
                .with("Time", ParamValue::Float(0.0)),
        )
    }

    #[test]
    fn eye_transform_tilts_about_x() {
        let eye = eye_transform(100.0, -20.0, 0.0, 0.0);
        assert!((eye.length() - 100.0).abs() < 1e-3);
        // Negative X rotation lifts +Z toward +Y.
        assert!(eye.y > 0.0);
        assert!((eye.y - 100.0 * 20.0_f32.to_radians().sin()).abs() < 1e-3);
    }

    #[test]
    fn clock_restarts_when_not_finite() {
        let mut clock = SceneClock::default();
        clock.advance(1.5);
        assert_eq!(clock.elapsed(), 1.5);
        clock.advance(f32::INFINITY);
        assert_eq!(clock.elapsed(), 0.0);
        clock.advance(f32::NAN);
        assert_eq!(clock.elapsed(), 0.0);
    }

    #[test]
    fn clock_wraps_at_period() {
        let mut clock = SceneClock::default();
        clock.advance(2.0);
        clock.wrap(2.0);
        assert_eq!(clock.elapsed(), 0.0);
        clock.advance(1.0);
        clock.wrap(2.0);
        assert_eq!(clock.elapsed(), 1.0);
    }

    #[test]
    fn projection_scene_spins_models_and_sets_time() {
        let models = vec![Model::custom("teapot", Transform::default())];
        let mut scene = SceneDefinition::new(SceneId::Projection, bag(), models)
            .with_kind(SceneKind::Projection);
        scene.update(0.25);
        assert_eq!(scene.models()[0].transform().rotation().y, 0.25);
        assert_eq!(scene.effect().parameter("Time"), Some(&ParamValue::Float(0.25)));

        let expected = Projector::WIDE.view_projection(
            Vec3::new(0.0, 0.0, 40.0),
            scene.models()[0].transform().world(),
        );
        assert_eq!(
            scene.effect().parameter("ProjectorViewProjection"),
            Some(&ParamValue::Matrix(expected))
        );
    }

    #[test]
    fn standard_scene_uses_narrow_projector_and_default_position() {
        let effect = Box::new(
            ParameterBag::new("Custom")
                .with("ProjectorViewProjection", ParamValue::Matrix(Mat4::IDENTITY)),
        );
        let mut scene = SceneDefinition::new(SceneId::Lambert, effect, Vec::new());
        scene.update(0.1);
        let expected = Projector::NARROW.view_projection(DEFAULT_PROJECTOR_POSITION, Mat4::IDENTITY);
        assert_eq!(
            scene.effect().parameter("ProjectorViewProjection"),
            Some(&ParamValue::Matrix(expected))
        );
    }

    #[test]
    fn culling_scene_lays_out_row() {
        let models: Vec<Model> = (0..3)
            .map(|i| Model::custom(format!("head{i}"), Transform::default()))
            .collect();
        let effect = Box::new(ParameterBag::new("Normals"));
        let mut scene = SceneDefinition::new(SceneId::Culling, effect, models)
            .with_kind(SceneKind::Culling(Hedgerow::new(&CullingOptions::default())));
        scene.update(0.0);
        let xs: Vec<f32> = scene
            .models()
            .iter()
            .map(|m| m.transform().position().x)
            .collect();
        assert!(xs[0] < 0.0 && xs[1].abs() < 1e-4 && xs[2] > 0.0);
    }

    #[test]
    fn default_eye_is_on_z() {
        let scene = SceneDefinition::new(SceneId::Normals, bag(), Vec::new());
        assert_eq!(scene.eye(), DEFAULT_EYE);
        assert_eq!(scene.title(), "Normals");
    }
}
