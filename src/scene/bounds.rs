//! Bounding volumes and the per-model world-box cache.
//!
//! Local boxes are computed once per mesh from raw vertex positions and kept
//! for the lifetime of the cache. World boxes are derived from a local box and
//! the owning model's world matrix, and are tagged with the transform
//! revision they were computed from so a moved model is never tested
//! against a stale box.

use glam::{Mat4, Vec3};
use rustc_hash::FxHashMap;

use super::mesh::{Mesh, MeshId};
use super::model::Model;

// ---------------------------------------------------------------------------
// Aabb
// ---------------------------------------------------------------------------

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box from two corners; the corners are reordered per axis if needed.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Smallest box enclosing every point, or `None` for no points.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |acc, p| Self {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }))
    }

    /// Smallest box enclosing both boxes.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half the size along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// The eight corners: the +Z face first (top-left, top-right,
    /// bottom-right, bottom-left), then the -Z face in the same order.
    #[must_use]
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, lo.y, lo.z),
        ]
    }

    /// Axis-aligned box around the eight transformed corners.
    ///
    /// Rotated boxes grow: the result encloses the rotated box, it does not
    /// fit it.
    #[must_use]
    pub fn transformed(&self, matrix: Mat4) -> Self {
        let corners = self.corners().map(|c| matrix.transform_point3(c));
        let mut out = Self::new(corners[0], corners[0]);
        for c in &corners[1..] {
            out.min = out.min.min(*c);
            out.max = out.max.max(*c);
        }
        out
    }

    /// Whether the point lies inside or on the box.
    #[must_use]
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

// ---------------------------------------------------------------------------
// BoundingSphere
// ---------------------------------------------------------------------------

/// Bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Center point.
    pub center: Vec3,
    /// Radius.
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere from center and radius.
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere enclosing both spheres.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        let offset = other.center - self.center;
        let distance = offset.length();
        if distance + other.radius <= self.radius {
            return *self;
        }
        if distance + self.radius <= other.radius {
            return *other;
        }
        let radius = (distance + self.radius + other.radius) * 0.5;
        let center = self.center + offset * ((radius - self.radius) / distance);
        Self { center, radius }
    }
}

// ---------------------------------------------------------------------------
// BoundingVolumeCache
// ---------------------------------------------------------------------------

/// Identity of a model inside the registry: scene index and model index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelKey {
    /// Index of the owning scene.
    pub scene: usize,
    /// Index of the model within the scene's model list.
    pub model: usize,
}

#[derive(Debug, Clone, Copy)]
struct WorldEntry {
    mesh: MeshId,
    revision: u64,
    aabb: Option<Aabb>,
}

/// Caches local boxes per mesh and world boxes per model.
#[derive(Debug, Default)]
pub struct BoundingVolumeCache {
    local: FxHashMap<MeshId, Option<Aabb>>,
    world: FxHashMap<ModelKey, WorldEntry>,
    local_computations: usize,
    world_computations: usize,
}

impl BoundingVolumeCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Local-space box of a mesh, computed from its vertices on first use.
    /// `None` when the mesh has no vertices.
    pub fn local_box(&mut self, mesh: &Mesh) -> Option<Aabb> {
        if let Some(cached) = self.local.get(&mesh.id()) {
            return *cached;
        }
        let aabb = Aabb::from_points(mesh.positions());
        self.local_computations += 1;
        if aabb.is_none() {
            log::debug!("mesh '{}' has no vertices; no bounding box", mesh.name());
        }
        let _ = self.local.insert(mesh.id(), aabb);
        aabb
    }

    /// World-space box of a model, recomputed only if the model's mesh or
    /// transform changed since the cached value was built. `None` for
    /// models without mesh geometry.
    pub fn world_box(&mut self, key: ModelKey, model: &Model) -> Option<Aabb> {
        let mesh = model.mesh()?;
        let revision = model.transform().revision();
        if let Some(entry) = self.world.get(&key) {
            if entry.mesh == mesh.id() && entry.revision == revision {
                return entry.aabb;
            }
        }
        let world = model.transform().world();
        let aabb = self.local_box(mesh).map(|local| local.transformed(world));
        self.world_computations += 1;
        let _ = self.world.insert(
            key,
            WorldEntry {
                mesh: mesh.id(),
                revision,
                aabb,
            },
        );
        aabb
    }

    /// Drop the cached world box of one model.
    pub fn invalidate(&mut self, key: ModelKey) {
        let _ = self.world.remove(&key);
    }

    /// Drop the cached world boxes of every model in a scene.
    pub fn invalidate_scene(&mut self, scene: usize) {
        self.world.retain(|key, _| key.scene != scene);
    }

    /// Number of local boxes computed so far.
    #[must_use]
    pub fn local_computations(&self) -> usize {
        self.local_computations
    }

    /// Number of world boxes computed so far.
    #[must_use]
    pub fn world_computations(&self) -> usize {
        self.world_computations
    }
}
