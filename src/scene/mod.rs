//! Scenes: flat model lists, their bounding volumes, culling and the
//! registry that switches between them.
//!
//! Each [`SceneDefinition`] pairs a model list with one effect and an
//! optional post-process. The [`SceneRegistry`] owns every scene plus the
//! camera, and per frame refreshes the frustum, culls the active scene's
//! models against cached world-space boxes, and draws the survivors.

pub mod bounds;
pub mod culling;
pub mod definition;
pub mod hedgerow;
pub mod mesh;
pub mod model;
pub mod primitives;
pub mod registry;
pub mod terrain;

pub use bounds::{Aabb, BoundingSphere, BoundingVolumeCache, ModelKey};
pub use culling::{CullResult, CullStats, FrustumCuller};
pub use definition::{
    eye_transform, Projector, SceneClock, SceneDefinition, SceneId, SceneKind,
};
pub use hedgerow::Hedgerow;
pub use mesh::{Mesh, MeshId, MeshPart};
pub use model::{CullMode, Model, Transform, TransformMatrices};
pub use registry::{RegistryState, SceneRegistry};
pub use terrain::{HeightMap, ScanDirection, Terrain, TerrainVertex};
