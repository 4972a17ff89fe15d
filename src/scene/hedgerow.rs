//! Oscillating row of models for the frustum-culling scene.
//!
//! The row breathes: the gap between neighbours grows and shrinks with a
//! sine of the scene clock, pushing the outer models in and out of view.

use std::f32::consts::TAU;

use glam::Vec3;

use super::model::Model;
use crate::options::CullingOptions;

/// Row layout parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hedgerow {
    base_width: f32,
    amplitude: f32,
    frequency: f32,
}

impl Hedgerow {
    /// Layout from options.
    #[must_use]
    pub fn new(options: &CullingOptions) -> Self {
        Self {
            base_width: options.total_width,
            amplitude: options.amplitude,
            frequency: options.frequency,
        }
    }

    /// Seconds per oscillation; the scene clock wraps at this value.
    #[must_use]
    pub fn period(&self) -> f32 {
        if self.frequency > 0.0 {
            1.0 / self.frequency
        } else {
            f32::INFINITY
        }
    }

    /// Row width at `elapsed` seconds for `count` models.
    #[must_use]
    pub fn width(&self, elapsed: f32, count: usize) -> f32 {
        let gaps = count.saturating_sub(1) as f32;
        let oscillate = (elapsed * TAU * self.frequency).sin();
        self.base_width + self.amplitude * (0.5 + 0.5 * oscillate) * gaps
    }

    /// Spread `models` evenly along X, centred on the origin.
    ///
    /// Rows of fewer than two models keep their positions.
    pub fn layout(&self, elapsed: f32, models: &mut [Model]) {
        let count = models.len();
        if count < 2 {
            return;
        }
        let width = self.width(elapsed, count);
        let spacing = width / (count - 1) as f32;
        let start = -width / 2.0;
        for (i, model) in models.iter_mut().enumerate() {
            model
                .transform_mut()
                .set_position(Vec3::new(start + i as f32 * spacing, 0.0, 0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::model::Transform;

    fn models(n: usize) -> Vec<Model> {
        (0..n)
            .map(|i| Model::custom(format!("m{i}"), Transform::at(Vec3::new(i as f32, 3.0, 0.0))))
            .collect()
    }

    #[test]
    fn rest_width_at_zero_time() {
        let row = Hedgerow::new(&CullingOptions::default());
        // sin(0) = 0: half the amplitude per gap.
        assert!((row.width(0.0, 9) - (160.0 + 15.0 * 8.0)).abs() < 1e-4);
        assert!((row.period() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn layout_is_symmetric() {
        let row = Hedgerow::new(&CullingOptions::default());
        let mut ms = models(9);
        row.layout(0.3, &mut ms);
        let first = ms[0].transform().position().x;
        let last = ms[8].transform().position().x;
        assert!((first + last).abs() < 1e-3);
        assert!(ms[4].transform().position().x.abs() < 1e-3);
        assert!((last - first - row.width(0.3, 9)).abs() < 1e-3);
    }

    #[test]
    fn single_model_is_left_alone() {
        let row = Hedgerow::new(&CullingOptions::default());
        let mut ms = models(1);
        row.layout(0.7, &mut ms);
        let p = ms[0].transform().position();
        assert!(p.is_finite());
        assert_eq!(p, Vec3::new(0.0, 3.0, 0.0));
    }
}
