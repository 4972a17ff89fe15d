//! Per-pass frustum culling of a scene's models.

use super::bounds::{Aabb, BoundingVolumeCache, ModelKey};
use super::model::{CullMode, Model};
use crate::camera::Frustum;

/// Counters for one draw pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CullStats {
    /// Models considered.
    pub total: usize,
    /// Models rejected by the frustum test.
    pub culled: usize,
}

impl CullStats {
    /// Models that passed.
    #[must_use]
    pub fn visible(&self) -> usize {
        self.total - self.culled
    }
}

/// Outcome of testing one model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullResult {
    /// Whether the model should be drawn.
    pub visible: bool,
    /// World box the decision was made on, for the debug overlay.
    pub tested_box: Option<Aabb>,
}

impl CullResult {
    const ALWAYS: Self = Self {
        visible: true,
        tested_box: None,
    };
}

/// Tests models against the camera frustum and keeps pass counters.
#[derive(Debug, Clone)]
pub struct FrustumCuller {
    frustum: Frustum,
    stats: CullStats,
}

impl FrustumCuller {
    /// Culler for `frustum`.
    #[must_use]
    pub fn new(frustum: Frustum) -> Self {
        Self {
            frustum,
            stats: CullStats::default(),
        }
    }

    /// Start a pass: adopt the frame's frustum and zero the counters.
    pub fn begin_pass(&mut self, frustum: Frustum) {
        self.frustum = frustum;
        self.stats = CullStats::default();
    }

    /// Counters of the current pass.
    #[must_use]
    pub fn stats(&self) -> CullStats {
        self.stats
    }

    /// Frustum of the current pass.
    #[must_use]
    pub fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    /// Decide whether to draw a model and count the decision.
    ///
    /// Models without geometry, or whose mesh has no vertices, are always
    /// drawn.
    pub fn test(
        &mut self,
        cache: &mut BoundingVolumeCache,
        key: ModelKey,
        model: &Model,
    ) -> CullResult {
        let result = match model.cull_mode() {
            CullMode::Never => CullResult::ALWAYS,
            CullMode::BoundingSphere => match model.world_sphere() {
                Some(sphere) => CullResult {
                    visible: self.frustum.intersects_sphere(&sphere),
                    tested_box: None,
                },
                None => CullResult::ALWAYS,
            },
            CullMode::BoundingBox => match cache.world_box(key, model) {
                Some(aabb) => CullResult {
                    visible: self.frustum.intersects_aabb(&aabb),
                    tested_box: Some(aabb),
                },
                None => CullResult::ALWAYS,
            },
        };

        self.stats.total += 1;
        if !result.visible {
            self.stats.culled += 1;
        }
        result
    }

    /// Run a full pass over `models` and return the visibility of each.
    pub fn classify(
        &mut self,
        cache: &mut BoundingVolumeCache,
        scene: usize,
        models: &[Model],
    ) -> Vec<bool> {
        self.stats = CullStats::default();
        models
            .iter()
            .enumerate()
            .map(|(model, m)| self.test(cache, ModelKey { scene, model }, m).visible)
            .collect()
    }
}
