//! Graphics device boundary.
//!
//! The scene core never touches GPU resources directly. It drives a
//! [`GraphicsBackend`] and feeds named parameters to [`Effect`]s; the
//! headless backend records what would have been drawn.

/// Device trait, render targets, and fixed-function state.
pub mod backend;
/// Wireframe bounding-box overlay.
pub mod debug_draw;
/// Effect trait and the in-memory parameter bag.
pub mod effect;
/// Recording backend for tests and windowless runs.
pub mod headless;
/// Materials and per-technique shader presets.
pub mod shader;

pub use backend::{
    BlendState, DepthState, GraphicsBackend, GraphicsState, RasterizerState,
    RenderTarget, RenderTargetId, SamplerState, TextureId,
};
pub use debug_draw::DebugDraw;
pub use effect::{Effect, ParamValue, ParameterBag};
pub use headless::{DrawCall, DrawKind, HeadlessBackend};
pub use shader::{Material, ShaderPreset};
