//! Separable Gaussian blur.
//!
//! One kernel per axis: a centre tap plus mirrored pairs of taps placed
//! between texels (offset `2i + 1.5`) so bilinear filtering folds two texels
//! into each sample. The frame is blurred horizontally into a capture
//! target, then vertically back into the back buffer.

use std::f32::consts::PI;

use glam::Vec2;

use super::filter::Filter;
use crate::gpu::{
    Effect, GraphicsBackend, ParamValue, RenderTarget, RenderTargetId,
};

/// Widest sigma a kernel is built for; larger values are clamped.
pub const MAX_SIGMA: f32 = 64.0;

/// Weights and texel offsets for one blur axis.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    sigma: f32,
    weights: Vec<f32>,
    offsets: Vec<Vec2>,
}

impl GaussianKernel {
    /// Build a normalized kernel along `texel` (one texel step on the blur
    /// axis, zero on the other).
    ///
    /// The tap count is the smallest odd number at least `3 * sigma`. A
    /// sigma that is not positive and finite yields the identity kernel;
    /// one above [`MAX_SIGMA`] is clamped to it.
    #[must_use]
    pub fn build(texel: Vec2, sigma: f32) -> Self {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Self {
                sigma,
                weights: vec![1.0],
                offsets: vec![Vec2::ZERO],
            };
        }
        let sigma = sigma.min(MAX_SIGMA);

        let mut len = ((3.0 * sigma).ceil() as usize).max(1);
        if len % 2 == 0 {
            len += 1;
        }

        let mut weights = vec![0.0; len];
        let mut offsets = vec![Vec2::ZERO; len];
        weights[0] = gaussian(0.0, sigma);
        let mut total = weights[0];

        for i in 0..len / 2 {
            let weight = gaussian((i + 1) as f32, sigma);
            let offset = texel * (i as f32 * 2.0 + 1.5);
            weights[i * 2 + 1] = weight;
            weights[i * 2 + 2] = weight;
            offsets[i * 2 + 1] = offset;
            offsets[i * 2 + 2] = -offset;
            total += weight * 2.0;
        }

        for w in &mut weights {
            *w /= total;
        }

        Self {
            sigma,
            weights,
            offsets,
        }
    }

    /// Standard deviation the kernel was built for.
    #[must_use]
    pub fn sigma(&self) -> f32 {
        self.sigma
    }

    /// Tap weights: centre first, then `+`/`-` pairs.
    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Tap offsets in texture coordinates, matching [`weights`](Self::weights).
    #[must_use]
    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }

    /// Number of taps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always false; a kernel has at least the centre tap.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    fn bind(&self, effect: &mut dyn Effect) {
        let _ = effect
            .try_set_parameter("Offsets", ParamValue::Vec2Array(self.offsets.clone()));
        let _ = effect
            .try_set_parameter("Weights", ParamValue::FloatArray(self.weights.clone()));
    }
}

/// Normal distribution density at `x`.
fn gaussian(x: f32, sigma: f32) -> f32 {
    let sigma2 = sigma * sigma;
    (1.0 / (2.0 * PI * sigma2).sqrt()) * (-(x * x) / (2.0 * sigma2)).exp()
}

/// Two-pass blur driver owning its intermediate target.
#[derive(Debug)]
pub struct GaussianBlur {
    filter: Filter,
    horizontal: GaussianKernel,
    vertical: GaussianKernel,
    capture: RenderTargetId,
}

impl GaussianBlur {
    /// Build both kernels for the backend's viewport and create the
    /// intermediate target.
    pub fn new(
        backend: &mut dyn GraphicsBackend,
        effect: Box<dyn Effect>,
        sigma: f32,
    ) -> Self {
        let (width, height) = backend.viewport_size();
        let texel = Vec2::new(1.0 / width.max(1) as f32, 1.0 / height.max(1) as f32);
        let horizontal = GaussianKernel::build(Vec2::new(texel.x, 0.0), sigma);
        let vertical = GaussianKernel::build(Vec2::new(0.0, texel.y), sigma);
        let capture = backend.create_render_target(width, height);
        log::debug!(
            "gaussian blur: sigma {sigma}, {} taps, {width}x{height}",
            horizontal.len()
        );
        Self {
            filter: Filter::new(effect),
            horizontal,
            vertical,
            capture,
        }
    }

    /// Horizontal-pass kernel.
    #[must_use]
    pub fn horizontal(&self) -> &GaussianKernel {
        &self.horizontal
    }

    /// Vertical-pass kernel.
    #[must_use]
    pub fn vertical(&self) -> &GaussianKernel {
        &self.vertical
    }

    /// Intermediate target between the passes.
    #[must_use]
    pub fn capture(&self) -> RenderTargetId {
        self.capture
    }

    /// Blur `source` into the back buffer.
    pub fn apply(
        &mut self,
        backend: &mut dyn GraphicsBackend,
        source: RenderTargetId,
        clear_color: [f32; 4],
    ) {
        self.horizontal.bind(self.filter.effect_mut());
        backend.set_render_target(RenderTarget::Offscreen(self.capture));
        self.filter.draw(backend, source, clear_color);
        backend.set_render_target(RenderTarget::BackBuffer);

        self.vertical.bind(self.filter.effect_mut());
        self.filter.draw(backend, self.capture, clear_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gpu::{DrawKind, HeadlessBackend, ParameterBag};

    const TEXEL: Vec2 = Vec2::new(1.0 / 1280.0, 0.0);

    #[test]
    fn sigma_two_has_seven_taps() {
        let k = GaussianKernel::build(TEXEL, 2.0);
        assert_eq!(k.len(), 7);
        let center = k.weights()[0];
        assert!(k.weights()[1..].iter().all(|&w| w < center));
    }

    #[test]
    fn weights_sum_to_one() {
        for sigma in [0.3, 0.5, 1.0, 1.7, 2.0, 3.3, 8.0] {
            let k = GaussianKernel::build(TEXEL, sigma);
            let sum: f32 = k.weights().iter().sum();
            assert!((sum - 1.0).abs() < 1e-5, "sigma {sigma}: {sum}");
            assert_eq!(k.len() % 2, 1);
            assert!(k.len() as f32 >= 3.0 * sigma);
        }
    }

    #[test]
    fn taps_are_mirrored() {
        let k = GaussianKernel::build(TEXEL, 2.5);
        assert_eq!(k.offsets()[0], Vec2::ZERO);
        for pair in 0..k.len() / 2 {
            let (a, b) = (pair * 2 + 1, pair * 2 + 2);
            assert_eq!(k.weights()[a], k.weights()[b]);
            assert_eq!(k.offsets()[a], -k.offsets()[b]);
            assert!((k.offsets()[a].x - TEXEL.x * (pair as f32 * 2.0 + 1.5)).abs() < 1e-9);
        }
    }

    #[test]
    fn huge_sigma_is_clamped() {
        let k = GaussianKernel::build(TEXEL, 1e12);
        assert_eq!(k.sigma(), MAX_SIGMA);
        assert_eq!(k.len(), 193);
        let sum: f32 = k.weights().iter().sum();
        assert!((sum - 1.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_sigma_is_identity() {
        for sigma in [0.0, -1.0, f32::NAN] {
            let k = GaussianKernel::build(TEXEL, sigma);
            assert_eq!(k.weights(), &[1.0]);
            assert_eq!(k.offsets(), &[Vec2::ZERO]);
        }
    }

    #[test]
    fn tiny_sigma_keeps_finite_weights() {
        let k = GaussianKernel::build(TEXEL, 0.01);
        assert_eq!(k.len(), 1);
        assert_eq!(k.weights(), &[1.0]);
    }

    #[test]
    fn two_passes_route_through_capture() {
        let mut backend = HeadlessBackend::new(1280, 720);
        let source = backend.create_render_target(1280, 720);
        let effect = ParameterBag::new("GaussianBlur")
            .with("Offsets", ParamValue::Vec2Array(Vec::new()))
            .with("Weights", ParamValue::FloatArray(Vec::new()));
        let mut blur = GaussianBlur::new(&mut backend, Box::new(effect), 2.0);
        blur.apply(&mut backend, source, [0.0; 4]);

        let calls = backend.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].target, RenderTarget::Offscreen(blur.capture()));
        assert_eq!(calls[1].target, RenderTarget::BackBuffer);
        match (&calls[0].kind, &calls[1].kind) {
            (
                DrawKind::FullScreen { source: s0, offsets: Some(ParamValue::Vec2Array(h)), .. },
                DrawKind::FullScreen { source: s1, offsets: Some(ParamValue::Vec2Array(v)), .. },
            ) => {
                assert_eq!(*s0, source);
                assert_eq!(*s1, blur.capture());
                assert!(h.iter().all(|o| o.y == 0.0));
                assert!(v.iter().all(|o| o.x == 0.0));
                assert_eq!(h.len(), 7);
            }
            other => panic!("unexpected draws: {other:?}"),
        }
    }
}
