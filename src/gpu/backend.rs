//! The graphics device as seen by the scene core.
//!
//! Everything that touches real GPU resources sits behind
//! [`GraphicsBackend`]. The core drives it with explicit state and render
//! target switches, the same sequence an immediate-mode device expects.

use super::debug_draw::LineVertex;
use super::effect::Effect;
use crate::scene::mesh::Mesh;

/// Handle to an offscreen colour target created by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderTargetId(pub u32);

/// Handle to a texture owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Where draws land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderTarget {
    /// The swapchain image.
    #[default]
    BackBuffer,
    /// An offscreen target created with
    /// [`GraphicsBackend::create_render_target`].
    Offscreen(RenderTargetId),
}

/// Colour blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendState {
    /// No blending.
    #[default]
    Opaque,
    /// Premultiplied alpha.
    AlphaBlend,
}

/// Depth testing and writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthState {
    /// Test and write.
    #[default]
    Default,
    /// Test only.
    DepthRead,
    /// Neither.
    None,
}

/// Triangle culling and fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterizerState {
    /// Cull counter-clockwise triangles.
    #[default]
    CullCounterClockwise,
    /// Cull clockwise triangles.
    CullClockwise,
    /// Draw both faces.
    CullNone,
}

/// Texture sampling for slot 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SamplerState {
    /// Bilinear, wrapping.
    #[default]
    LinearWrap,
    /// Bilinear, clamped.
    LinearClamp,
    /// Nearest, clamped.
    PointClamp,
}

/// Fixed-function state applied to subsequent draws.
///
/// The default value is the state every frame starts from and the state the
/// registry restores after drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphicsState {
    /// Colour blending.
    pub blend: BlendState,
    /// Depth testing.
    pub depth: DepthState,
    /// Face culling.
    pub rasterizer: RasterizerState,
    /// Sampler for slot 0.
    pub sampler: SamplerState,
}

/// Rendering device abstraction.
pub trait GraphicsBackend {
    /// Back-buffer size in pixels.
    fn viewport_size(&self) -> (u32, u32);

    /// Create an offscreen colour target with a depth buffer.
    fn create_render_target(&mut self, width: u32, height: u32) -> RenderTargetId;

    /// Redirect subsequent draws.
    fn set_render_target(&mut self, target: RenderTarget);

    /// Clear the bound target's colour (and depth) buffers.
    fn clear(&mut self, color: [f32; 4]);

    /// Currently applied fixed-function state.
    fn state(&self) -> GraphicsState;

    /// Apply fixed-function state.
    fn set_state(&mut self, state: GraphicsState);

    /// Draw every part of a mesh with the given effect.
    fn draw_mesh(&mut self, mesh: &Mesh, effect: &dyn Effect);

    /// Draw an indexed triangle list from raw vertex bytes.
    fn draw_vertices(
        &mut self,
        vertex_data: &[u8],
        stride: usize,
        indices: &[u32],
        effect: &dyn Effect,
    );

    /// Draw an indexed line list.
    fn draw_lines(&mut self, vertices: &[LineVertex], indices: &[u16], effect: &dyn Effect);

    /// Draw a screen-filling quad sampling `source` through `effect`.
    fn draw_full_screen(&mut self, source: RenderTargetId, effect: &dyn Effect);
}
