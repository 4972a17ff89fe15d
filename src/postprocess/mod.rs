//! Full-screen post-process passes.
//!
//! A scene with a post-process draws into the registry's capture target;
//! the pass then samples that capture into the back buffer.

mod filter;
pub mod gaussian;

pub use filter::{Filter, FULL_SCREEN_STATE};
pub use gaussian::{GaussianBlur, GaussianKernel};

use crate::gpu::{GraphicsBackend, RenderTargetId};

/// Post-process attached to a scene.
#[derive(Debug)]
pub enum PostProcess {
    /// Single pass, e.g. monochrome.
    Filter(Filter),
    /// Horizontal then vertical blur.
    GaussianBlur(GaussianBlur),
}

impl PostProcess {
    /// Resolve `source` into the back buffer.
    pub fn apply(
        &mut self,
        backend: &mut dyn GraphicsBackend,
        source: RenderTargetId,
        clear_color: [f32; 4],
    ) {
        match self {
            Self::Filter(filter) => filter.draw(backend, source, clear_color),
            Self::GaussianBlur(blur) => blur.apply(backend, source, clear_color),
        }
    }
}
