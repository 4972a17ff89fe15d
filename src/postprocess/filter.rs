use crate::gpu::{
    BlendState, DepthState, Effect, GraphicsBackend, GraphicsState,
    RasterizerState, RenderTargetId, SamplerState,
};

/// State for full-screen passes: opaque, no depth, clamped sampling.
pub const FULL_SCREEN_STATE: GraphicsState = GraphicsState {
    blend: BlendState::Opaque,
    depth: DepthState::None,
    rasterizer: RasterizerState::CullCounterClockwise,
    sampler: SamplerState::LinearClamp,
};

/// Single full-screen pass sampling a captured frame through an effect.
pub struct Filter {
    effect: Box<dyn Effect>,
}

impl std::fmt::Debug for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter")
            .field("effect", &self.effect.name())
            .finish()
    }
}

impl Filter {
    /// Filter drawing through `effect`.
    #[must_use]
    pub fn new(effect: Box<dyn Effect>) -> Self {
        Self { effect }
    }

    /// Filter effect.
    #[must_use]
    pub fn effect(&self) -> &dyn Effect {
        self.effect.as_ref()
    }

    /// Mutable filter effect.
    pub fn effect_mut(&mut self) -> &mut dyn Effect {
        self.effect.as_mut()
    }

    /// Clear the bound target and draw `source` across it.
    pub fn draw(
        &self,
        backend: &mut dyn GraphicsBackend,
        source: RenderTargetId,
        clear_color: [f32; 4],
    ) {
        backend.clear(clear_color);
        backend.set_state(FULL_SCREEN_STATE);
        backend.draw_full_screen(source, self.effect.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::{DrawKind, HeadlessBackend, ParameterBag, RenderTarget};

    #[test]
    fn draws_into_bound_target() {
        let mut backend = HeadlessBackend::new(8, 8);
        let source = backend.create_render_target(8, 8);
        let filter = Filter::new(Box::new(ParameterBag::new("Monochrome")));
        filter.draw(&mut backend, source, [0.0, 0.0, 0.0, 1.0]);

        assert_eq!(backend.clears(), &[RenderTarget::BackBuffer]);
        let call = &backend.calls()[0];
        assert_eq!(call.effect, "Monochrome");
        assert_eq!(call.state, FULL_SCREEN_STATE);
        assert!(matches!(call.kind, DrawKind::FullScreen { source: s, .. } if s == source));
    }
}
