//! Mesh geometry as raw vertex bytes plus indices.
//!
//! Vertex layouts differ per mesh (position-only, position+normal,
//! position+normal+uv, ...). The only thing every layout shares is a
//! leading `[f32; 3]` position, which is all bounding-volume readback needs.

use std::mem::size_of;
use std::sync::atomic::{AtomicU64, Ordering};

use bytemuck::Pod;
use glam::Vec3;

use super::bounds::BoundingSphere;
use crate::error::GalleryError;

const POSITION_BYTES: usize = size_of::<[f32; 3]>();

static NEXT_MESH_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique mesh identity, used to key per-mesh caches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u64);

impl MeshId {
    fn next() -> Self {
        Self(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One vertex/index buffer pair of a mesh.
#[derive(Debug, Clone)]
pub struct MeshPart {
    vertex_data: Vec<u8>,
    stride: usize,
    indices: Vec<u32>,
}

impl MeshPart {
    /// Wrap raw vertex bytes with the given per-vertex stride.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::VertexLayout`] if the stride cannot hold a
    /// position or the byte count is not a whole number of vertices.
    pub fn new(
        vertex_data: Vec<u8>,
        stride: usize,
        indices: Vec<u32>,
    ) -> Result<Self, GalleryError> {
        if stride < POSITION_BYTES || vertex_data.len() % stride != 0 {
            return Err(GalleryError::VertexLayout {
                stride,
                len: vertex_data.len(),
            });
        }
        Ok(Self {
            vertex_data,
            stride,
            indices,
        })
    }

    /// Build from typed vertices whose layout starts with a position.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::VertexLayout`] if `V` is smaller than a
    /// position.
    pub fn from_vertices<V: Pod>(
        vertices: &[V],
        indices: Vec<u32>,
    ) -> Result<Self, GalleryError> {
        Self::new(
            bytemuck::cast_slice(vertices).to_vec(),
            size_of::<V>(),
            indices,
        )
    }

    /// Raw vertex bytes.
    #[must_use]
    pub fn vertex_data(&self) -> &[u8] {
        &self.vertex_data
    }

    /// Bytes per vertex.
    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Triangle-list indices.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertex_data.len() / self.stride
    }

    /// Vertex positions read from the first 12 bytes of each vertex.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertex_data.chunks_exact(self.stride).map(|vertex| {
            let p: [f32; 3] = bytemuck::pod_read_unaligned(&vertex[..POSITION_BYTES]);
            Vec3::from_array(p)
        })
    }
}

/// A named collection of mesh parts, shared between models via `Arc`.
#[derive(Debug)]
pub struct Mesh {
    id: MeshId,
    name: String,
    parts: Vec<MeshPart>,
}

impl Mesh {
    /// Create a mesh with a fresh id.
    pub fn new(name: impl Into<String>, parts: Vec<MeshPart>) -> Self {
        Self {
            id: MeshId::next(),
            name: name.into(),
            parts,
        }
    }

    /// Cache identity.
    #[must_use]
    pub fn id(&self) -> MeshId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Mesh parts in draw order.
    #[must_use]
    pub fn parts(&self) -> &[MeshPart] {
        &self.parts
    }

    /// Positions across every part.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.parts.iter().flat_map(MeshPart::positions)
    }

    /// Per-part bounding spheres merged into one, in local space.
    ///
    /// Each part's sphere is centred on its centroid with the farthest
    /// vertex as radius. `None` for a mesh without vertices.
    #[must_use]
    pub fn bounding_sphere(&self) -> Option<BoundingSphere> {
        self.parts
            .iter()
            .filter_map(|part| {
                let count = part.vertex_count();
                if count == 0 {
                    return None;
                }
                let centroid = part.positions().sum::<Vec3>() / count as f32;
                let radius = part
                    .positions()
                    .map(|p| p.distance(centroid))
                    .fold(0.0_f32, f32::max);
                Some(BoundingSphere::new(centroid, radius))
            })
            .reduce(|acc, s| acc.merged(&s))
    }
}
