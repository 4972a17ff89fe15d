//! Models: a shared mesh placed by a resettable transform.

use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::{EulerRot, Mat4, Vec3};

use super::bounds::BoundingSphere;
use super::mesh::Mesh;
use crate::gpu::{Effect, GraphicsBackend, ParamValue};

// ---------------------------------------------------------------------------
// Transform
// ---------------------------------------------------------------------------

static NEXT_REVISION: AtomicU64 = AtomicU64::new(1);

fn next_revision() -> u64 {
    NEXT_REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Derived matrices of a [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformMatrices {
    /// Uniform scale.
    pub scale: Mat4,
    /// Yaw (Y), then pitch (X), then roll (Z).
    pub rotation: Mat4,
    /// Translation.
    pub translation: Mat4,
    /// `translation * rotation * scale`.
    pub world: Mat4,
}

impl TransformMatrices {
    fn compute(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        let scale = Mat4::from_scale(Vec3::splat(scale));
        let rotation =
            Mat4::from_euler(EulerRot::YXZ, rotation.y, rotation.x, rotation.z);
        let translation = Mat4::from_translation(position);
        Self {
            scale,
            rotation,
            translation,
            world: translation * rotation * scale,
        }
    }
}

/// Position, Euler rotation and uniform scale, with remembered defaults.
///
/// Matrices are cached and rebuilt lazily on the first read after a
/// mutation. Every mutation also draws a fresh process-wide
/// [`revision`](Self::revision) so caches derived from the world matrix can
/// tell when they are stale, even across replaced transforms.
#[derive(Debug, Clone)]
pub struct Transform {
    position: Vec3,
    rotation: Vec3,
    scale: f32,
    default_position: Vec3,
    default_rotation: Vec3,
    default_scale: f32,
    revision: u64,
    dirty: Cell<bool>,
    cached: Cell<TransformMatrices>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, 1.0)
    }
}

impl Transform {
    /// Transform whose current values are also its defaults. `rotation`
    /// holds pitch (x), yaw (y) and roll (z) in radians.
    #[must_use]
    pub fn new(position: Vec3, rotation: Vec3, scale: f32) -> Self {
        Self {
            position,
            rotation,
            scale,
            default_position: position,
            default_rotation: rotation,
            default_scale: scale,
            revision: next_revision(),
            dirty: Cell::new(false),
            cached: Cell::new(TransformMatrices::compute(position, rotation, scale)),
        }
    }

    /// Identity rotation and scale at `position`.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::ZERO, 1.0)
    }

    /// Uniformly scaled at the origin.
    #[must_use]
    pub fn scaled(scale: f32) -> Self {
        Self::new(Vec3::ZERO, Vec3::ZERO, scale)
    }

    fn touch(&mut self) {
        self.revision = next_revision();
        self.dirty.set(true);
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current Euler rotation (x = pitch, y = yaw, z = roll).
    #[must_use]
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    /// Current uniform scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Process-unique stamp of the current state; changes on every
    /// mutation.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Move to `position`.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.touch();
    }

    /// Move by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
        self.touch();
    }

    /// Replace the Euler rotation.
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
        self.touch();
    }

    /// Replace the yaw only.
    pub fn set_rotation_y(&mut self, yaw: f32) {
        self.rotation.y = yaw;
        self.touch();
    }

    /// Add to the yaw.
    pub fn rotate_y(&mut self, angle: f32) {
        self.rotation.y += angle;
        self.touch();
    }

    /// Replace the uniform scale.
    pub fn set_scale(&mut self, scale: f32) {
        self.scale = scale;
        self.touch();
    }

    /// Restore the construction-time values.
    pub fn reset(&mut self) {
        self.position = self.default_position;
        self.rotation = self.default_rotation;
        self.scale = self.default_scale;
        self.touch();
    }

    /// Derived matrices, rebuilt if anything changed since the last read.
    #[must_use]
    pub fn matrices(&self) -> TransformMatrices {
        if self.dirty.get() {
            self.cached.set(TransformMatrices::compute(
                self.position,
                self.rotation,
                self.scale,
            ));
            self.dirty.set(false);
        }
        self.cached.get()
    }

    /// World matrix.
    #[must_use]
    pub fn world(&self) -> Mat4 {
        self.matrices().world
    }
}

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Which bounding volume the culler tests a model with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    /// Always drawn.
    #[default]
    Never,
    /// Merged mesh sphere re-centred on the model position.
    BoundingSphere,
    /// World-space AABB from the bounding-volume cache.
    BoundingBox,
}

/// A placed mesh. Models without a mesh are custom geometry drawn by their
/// scene (the terrain) and are never culled.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    mesh: Option<Arc<Mesh>>,
    transform: Transform,
    cull_mode: CullMode,
}

impl Model {
    /// Model drawing `mesh`.
    #[must_use]
    pub fn new(mesh: Arc<Mesh>, transform: Transform) -> Self {
        Self {
            name: mesh.name().to_owned(),
            mesh: Some(mesh),
            transform,
            cull_mode: CullMode::Never,
        }
    }

    /// Model with no mesh geometry.
    pub fn custom(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            mesh: None,
            transform,
            cull_mode: CullMode::Never,
        }
    }

    /// Set the cull mode.
    #[must_use]
    pub fn with_cull_mode(mut self, cull_mode: CullMode) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mesh geometry, if any.
    #[must_use]
    pub fn mesh(&self) -> Option<&Arc<Mesh>> {
        self.mesh.as_ref()
    }

    /// Placement.
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Mutable placement.
    pub fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    /// Culling strategy.
    #[must_use]
    pub fn cull_mode(&self) -> CullMode {
        self.cull_mode
    }

    /// Restore the transform defaults.
    pub fn reset(&mut self) {
        self.transform.reset();
    }

    /// Mesh sphere moved to the model position with its radius scaled.
    #[must_use]
    pub fn world_sphere(&self) -> Option<BoundingSphere> {
        let sphere = self.mesh.as_ref()?.bounding_sphere()?;
        Some(BoundingSphere::new(
            self.transform.position(),
            sphere.radius * self.transform.scale().abs(),
        ))
    }

    /// Feed the transforms to `effect` and draw the mesh.
    ///
    /// Sets `World`, `WVP`, `WorldIT`, `View` and `Projection` where the
    /// effect declares them.
    pub fn draw(
        &self,
        backend: &mut dyn GraphicsBackend,
        effect: &mut dyn Effect,
        view: Mat4,
        projection: Mat4,
    ) {
        let Some(mesh) = self.mesh.as_deref() else {
            return;
        };
        set_transform_parameters(effect, self.transform.world(), view, projection);
        backend.draw_mesh(mesh, effect);
    }
}

/// Set the per-draw matrices on `effect`.
pub fn set_transform_parameters(
    effect: &mut dyn Effect,
    world: Mat4,
    view: Mat4,
    projection: Mat4,
) {
    let _ = effect.try_set_parameter("World", ParamValue::Matrix(world));
    let _ = effect.try_set_parameter(
        "WVP",
        ParamValue::Matrix(projection * view * world),
    );
    let _ = effect.try_set_parameter(
        "WorldIT",
        ParamValue::Matrix(world.inverse().transpose()),
    );
    let _ = effect.try_set_parameter("View", ParamValue::Matrix(view));
    let _ = effect.try_set_parameter("Projection", ParamValue::Matrix(projection));
}
