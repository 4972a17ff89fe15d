//! Wireframe bounding-box overlay.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use super::backend::GraphicsBackend;
use super::effect::{Effect, ParamValue, ParameterBag};
use crate::scene::bounds::Aabb;

/// Twelve box edges over [`Aabb::corners`] order: front face, back face,
/// then the four connecting edges.
pub const BOX_EDGE_INDICES: [u16; 24] = [
    0, 1, 1, 2, 2, 3, 3, 0, //
    4, 5, 5, 6, 6, 7, 7, 4, //
    0, 4, 1, 5, 2, 6, 3, 7,
];

/// Position + RGBA colour line vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGBA colour.
    pub color: [f32; 4],
}

/// Long-lived line-drawing context: one vertex scratch buffer and one
/// vertex-colour effect reused for every box of every frame.
#[derive(Debug)]
pub struct DebugDraw {
    vertices: [LineVertex; 8],
    effect: ParameterBag,
}

impl Default for DebugDraw {
    fn default() -> Self {
        Self::new()
    }
}

impl DebugDraw {
    /// Create the context.
    #[must_use]
    pub fn new() -> Self {
        let effect = ParameterBag::new("BasicEffect")
            .with("World", ParamValue::Matrix(Mat4::IDENTITY))
            .with("View", ParamValue::Matrix(Mat4::IDENTITY))
            .with("Projection", ParamValue::Matrix(Mat4::IDENTITY))
            .with("VertexColorEnabled", ParamValue::Bool(true));
        Self {
            vertices: [LineVertex::zeroed(); 8],
            effect,
        }
    }

    /// Set the camera matrices used for subsequent boxes.
    pub fn begin(&mut self, view: Mat4, projection: Mat4) {
        let _ = self
            .effect
            .try_set_parameter("View", ParamValue::Matrix(view));
        let _ = self
            .effect
            .try_set_parameter("Projection", ParamValue::Matrix(projection));
    }

    /// Draw the twelve edges of a world-space box.
    pub fn draw_box(&mut self, backend: &mut dyn GraphicsBackend, aabb: &Aabb, color: Vec3) {
        let rgba = color.extend(1.0).to_array();
        for (slot, corner) in self.vertices.iter_mut().zip(aabb.corners()) {
            *slot = LineVertex {
                position: corner.to_array(),
                color: rgba,
            };
        }
        backend.draw_lines(&self.vertices, &BOX_EDGE_INDICES, &self.effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_corner_has_three_edges() {
        let mut degree = [0; 8];
        for &i in &BOX_EDGE_INDICES {
            degree[i as usize] += 1;
        }
        assert_eq!(degree, [3; 8]);
    }
}
