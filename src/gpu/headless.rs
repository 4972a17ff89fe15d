//! Backend that records draw calls instead of issuing them.
//!
//! Used by the demo binary when no window is available and by tests that
//! assert on what a frame would have drawn.

use glam::Mat4;

use super::backend::{
    GraphicsBackend, GraphicsState, RenderTarget, RenderTargetId,
};
use super::debug_draw::LineVertex;
use super::effect::{Effect, ParamValue};
use crate::scene::mesh::Mesh;

/// What a recorded draw was.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawKind {
    /// [`GraphicsBackend::draw_mesh`].
    Mesh {
        /// Mesh display name.
        name: String,
        /// Value of the effect's `World` parameter at draw time.
        world: Option<Mat4>,
    },
    /// [`GraphicsBackend::draw_vertices`].
    Vertices {
        /// Vertex count.
        vertices: usize,
        /// Index count.
        indices: usize,
    },
    /// [`GraphicsBackend::draw_lines`].
    Lines {
        /// Number of line segments.
        segments: usize,
    },
    /// [`GraphicsBackend::draw_full_screen`].
    FullScreen {
        /// Sampled target.
        source: RenderTargetId,
        /// Value of the effect's `Weights` parameter at draw time.
        weights: Option<ParamValue>,
        /// Value of the effect's `Offsets` parameter at draw time.
        offsets: Option<ParamValue>,
    },
}

/// One recorded draw.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Kind-specific payload.
    pub kind: DrawKind,
    /// Effect name.
    pub effect: String,
    /// Bound target.
    pub target: RenderTarget,
    /// Fixed-function state.
    pub state: GraphicsState,
}

/// Recording [`GraphicsBackend`].
#[derive(Debug)]
pub struct HeadlessBackend {
    width: u32,
    height: u32,
    target: RenderTarget,
    state: GraphicsState,
    targets_created: u32,
    clears: Vec<RenderTarget>,
    calls: Vec<DrawCall>,
}

impl HeadlessBackend {
    /// Backend with the given back-buffer size.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            target: RenderTarget::BackBuffer,
            state: GraphicsState::default(),
            targets_created: 0,
            clears: Vec::new(),
            calls: Vec::new(),
        }
    }

    /// Draw calls recorded since the last [`take_calls`](Self::take_calls).
    #[must_use]
    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Drain recorded draw calls and clears.
    pub fn take_calls(&mut self) -> Vec<DrawCall> {
        self.clears.clear();
        std::mem::take(&mut self.calls)
    }

    /// Targets cleared since the last [`take_calls`](Self::take_calls).
    #[must_use]
    pub fn clears(&self) -> &[RenderTarget] {
        &self.clears
    }

    /// Number of offscreen targets created so far.
    #[must_use]
    pub fn targets_created(&self) -> u32 {
        self.targets_created
    }

    /// Currently bound target.
    #[must_use]
    pub fn render_target(&self) -> RenderTarget {
        self.target
    }

    fn record(&mut self, kind: DrawKind, effect: &dyn Effect) {
        self.calls.push(DrawCall {
            kind,
            effect: effect.name().to_owned(),
            target: self.target,
            state: self.state,
        });
    }
}

impl GraphicsBackend for HeadlessBackend {
    fn viewport_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn create_render_target(&mut self, width: u32, height: u32) -> RenderTargetId {
        let id = RenderTargetId(self.targets_created);
        self.targets_created += 1;
        log::debug!("headless: render target {} ({width}x{height})", id.0);
        id
    }

    fn set_render_target(&mut self, target: RenderTarget) {
        self.target = target;
    }

    fn clear(&mut self, _color: [f32; 4]) {
        self.clears.push(self.target);
    }

    fn state(&self) -> GraphicsState {
        self.state
    }

    fn set_state(&mut self, state: GraphicsState) {
        self.state = state;
    }

    fn draw_mesh(&mut self, mesh: &Mesh, effect: &dyn Effect) {
        let world = effect.parameter("World").and_then(ParamValue::as_matrix);
        self.record(
            DrawKind::Mesh {
                name: mesh.name().to_owned(),
                world,
            },
            effect,
        );
    }

    fn draw_vertices(
        &mut self,
        vertex_data: &[u8],
        stride: usize,
        indices: &[u32],
        effect: &dyn Effect,
    ) {
        let vertices = if stride == 0 { 0 } else { vertex_data.len() / stride };
        self.record(
            DrawKind::Vertices {
                vertices,
                indices: indices.len(),
            },
            effect,
        );
    }

    fn draw_lines(&mut self, _vertices: &[LineVertex], indices: &[u16], effect: &dyn Effect) {
        self.record(
            DrawKind::Lines {
                segments: indices.len() / 2,
            },
            effect,
        );
    }

    fn draw_full_screen(&mut self, source: RenderTargetId, effect: &dyn Effect) {
        self.record(
            DrawKind::FullScreen {
                source,
                weights: effect.parameter("Weights").cloned(),
                offsets: effect.parameter("Offsets").cloned(),
            },
            effect,
        );
    }
}
