//! Height-map terrain with an animated scan line.
//!
//! The grid is built once from 8-bit height samples. Every frame the
//! vertex colours are recomputed in parallel: a height-based colour ramp
//! with a red band sweeping across the terrain along one of six
//! directions, switching direction after each sweep.

use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use rayon::prelude::*;

use super::definition::SceneClock;
use super::model::set_transform_parameters;
use crate::error::GalleryError;
use crate::gpu::{Effect, GraphicsBackend, GraphicsState, RasterizerState};
use crate::options::TerrainOptions;

/// Height → colour ramp, highest stop first.
const COLOR_STOPS: [(f32, [u8; 3]); 5] = [
    (1.0, [255, 255, 255]),
    (0.8, [120, 220, 120]),
    (0.6, [34, 139, 34]),
    (0.4, [210, 180, 60]),
    (0.0, [30, 60, 180]),
];

const SCAN_COLOR: [u8; 3] = [255, 0, 0];

const MIN_RANGE: f32 = 1e-5;

// ---------------------------------------------------------------------------
// HeightMap
// ---------------------------------------------------------------------------

/// Row-major 8-bit height samples, `width` along X and `depth` along Z.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeightMap {
    width: usize,
    depth: usize,
    samples: Vec<u8>,
}

impl HeightMap {
    /// Wrap luminance samples.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::HeightMap`] if either side is shorter than 2
    /// or the sample count does not match.
    pub fn new(width: usize, depth: usize, samples: Vec<u8>) -> Result<Self, GalleryError> {
        if width < 2 || depth < 2 {
            return Err(GalleryError::HeightMap(format!(
                "need at least 2x2 samples, got {width}x{depth}"
            )));
        }
        if samples.len() != width * depth {
            return Err(GalleryError::HeightMap(format!(
                "{width}x{depth} map needs {} samples, got {}",
                width * depth,
                samples.len()
            )));
        }
        Ok(Self {
            width,
            depth,
            samples,
        })
    }

    /// Rolling hills generated from a few sine octaves, `resolution` samples
    /// per side (at least 2).
    #[must_use]
    pub fn procedural(resolution: usize) -> Self {
        let n = resolution.max(2);
        let samples = (0..n * n)
            .map(|i| {
                let x = (i % n) as f32;
                let z = (i / n) as f32;
                let h = 0.5
                    + 0.25 * (x * 0.07).sin() * (z * 0.05).cos()
                    + 0.2 * ((x + z) * 0.03).sin()
                    + 0.05 * (x * 0.31).cos() * (z * 0.27).sin();
                (h.clamp(0.0, 1.0) * 255.0) as u8
            })
            .collect();
        Self {
            width: n,
            depth: n,
            samples,
        }
    }

    /// Samples along X.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Samples along Z.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Sample at grid cell (`x`, `z`).
    #[must_use]
    pub fn sample(&self, x: usize, z: usize) -> u8 {
        self.samples[x + z * self.width]
    }
}

// ---------------------------------------------------------------------------
// Vertex & scan direction
// ---------------------------------------------------------------------------

/// Lit, vertex-coloured terrain vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    /// Grid position with scaled height.
    pub position: [f32; 3],
    /// Smoothed face normal.
    pub normal: [f32; 3],
    /// RGBA colour.
    pub color: [u8; 4],
}

/// Axis and sense of the scan-line sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanDirection {
    /// High to low.
    #[default]
    TopToBottom,
    /// Low to high.
    BottomToTop,
    /// -X to +X.
    LeftToRight,
    /// +X to -X.
    RightToLeft,
    /// -Z to +Z.
    BackToFront,
    /// +Z to -Z.
    FrontToBack,
}

impl ScanDirection {
    /// The direction that follows this one.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::TopToBottom => Self::BottomToTop,
            Self::BottomToTop => Self::LeftToRight,
            Self::LeftToRight => Self::RightToLeft,
            Self::RightToLeft => Self::BackToFront,
            Self::BackToFront => Self::FrontToBack,
            Self::FrontToBack => Self::TopToBottom,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Self::TopToBottom | Self::BottomToTop)
    }

    /// Distance of a normalized position from the scan line at `phase`.
    fn distance(self, normalized: Vec3, phase: f32) -> f32 {
        match self {
            Self::TopToBottom => (normalized.y - (1.0 - phase)).abs(),
            Self::BottomToTop => (normalized.y - phase).abs(),
            Self::LeftToRight => (normalized.x - phase).abs(),
            Self::RightToLeft => (normalized.x - (1.0 - phase)).abs(),
            Self::BackToFront => (normalized.z - phase).abs(),
            Self::FrontToBack => (normalized.z - (1.0 - phase)).abs(),
        }
    }
}

// ---------------------------------------------------------------------------
// Terrain
// ---------------------------------------------------------------------------

/// Terrain mesh plus scan-line animation state.
#[derive(Debug, Clone)]
pub struct Terrain {
    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
    min: Vec3,
    range: Vec3,
    direction: ScanDirection,
    phase: f32,
    scan_duration: f32,
    vertical_width: f32,
    horizontal_width: f32,
}

impl Terrain {
    /// Build the grid, normals and initial colours.
    #[must_use]
    pub fn from_height_map(map: &HeightMap, options: &TerrainOptions) -> Self {
        let (w, d) = (map.width(), map.depth());
        let half = (w / 2) as f32;

        let mut positions = Vec::with_capacity(w * d);
        for z in 0..d {
            for x in 0..w {
                let h = f32::from(map.sample(x, z)) * options.vertical_scale;
                positions.push(Vec3::new(-half + x as f32, h, -half + z as f32));
            }
        }

        let mut indices = Vec::with_capacity((w - 1) * (d - 1) * 6);
        for x in 0..w - 1 {
            for z in 0..d - 1 {
                let tl = (x + z * w) as u32;
                let tr = (x + 1 + z * w) as u32;
                let bl = (x + (z + 1) * w) as u32;
                let br = (x + 1 + (z + 1) * w) as u32;
                indices.extend_from_slice(&[tl, tr, br, br, bl, tl]);
            }
        }

        let mut normals = vec![Vec3::ZERO; positions.len()];
        for tri in indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let n = (positions[a] - positions[c]).cross(positions[a] - positions[b]);
            normals[a] += n;
            normals[b] += n;
            normals[c] += n;
        }

        let vertices: Vec<TerrainVertex> = positions
            .iter()
            .zip(&normals)
            .map(|(p, n)| TerrainVertex {
                position: p.to_array(),
                normal: n.normalize_or(Vec3::Y).to_array(),
                color: [255; 4],
            })
            .collect();

        let (min, max) = positions
            .iter()
            .fold((Vec3::splat(f32::MAX), Vec3::splat(f32::MIN)), |(lo, hi), p| {
                (lo.min(*p), hi.max(*p))
            });

        let mut terrain = Self {
            vertices,
            indices,
            min,
            range: (max - min).max(Vec3::splat(MIN_RANGE)),
            direction: ScanDirection::default(),
            phase: 0.0,
            scan_duration: options.scan_duration.max(f32::EPSILON),
            vertical_width: options.vertical_scan_width,
            horizontal_width: options.horizontal_scan_width,
        };
        terrain.recolor();
        log::debug!(
            "terrain: {}x{} grid, {} triangles",
            w,
            d,
            terrain.indices.len() / 3
        );
        terrain
    }

    /// Vertices with their current colours.
    #[must_use]
    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// Triangle-list indices.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Current sweep direction.
    #[must_use]
    pub fn direction(&self) -> ScanDirection {
        self.direction
    }

    /// Sweep progress in `[0, 1)`.
    #[must_use]
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Position mapped into the grid's bounds, each axis in `[0, 1]`.
    #[must_use]
    pub fn normalized_position(&self, position: Vec3) -> Vec3 {
        (position - self.min) / self.range
    }

    /// Move the scan line to the clock's time and recolour.
    ///
    /// Completing a sweep restarts the clock and turns to the next
    /// direction.
    pub fn advance(&mut self, clock: &mut SceneClock) {
        self.phase = clock.elapsed() / self.scan_duration;
        if self.phase >= 1.0 {
            self.phase = 0.0;
            clock.reset();
            self.direction = self.direction.next();
        }
        self.recolor();
    }

    /// Recompute every vertex colour for the current scan state.
    pub fn recolor(&mut self) {
        let (min, range) = (self.min, self.range);
        let (direction, phase) = (self.direction, self.phase);
        let width = if direction.is_vertical() {
            self.vertical_width
        } else {
            self.horizontal_width
        };

        self.vertices.par_iter_mut().for_each(|vertex| {
            let normalized = (Vec3::from_array(vertex.position) - min) / range;
            let base = ramp_color(normalized.y);
            let distance = direction.distance(normalized, phase);
            let intensity = (1.0 - distance / width).clamp(0.0, 1.0).sqrt();
            let [r, g, b] = blend(base, SCAN_COLOR, intensity);
            vertex.color = [r, g, b, 255];
        });
    }

    /// Draw with both faces visible, restoring the previous state after.
    pub fn draw(
        &self,
        backend: &mut dyn GraphicsBackend,
        effect: &mut dyn Effect,
        world: Mat4,
        view: Mat4,
        projection: Mat4,
    ) {
        set_transform_parameters(effect, world, view, projection);
        let previous = backend.state();
        if previous.rasterizer != RasterizerState::CullNone {
            backend.set_state(GraphicsState {
                rasterizer: RasterizerState::CullNone,
                ..previous
            });
        }
        backend.draw_vertices(
            bytemuck::cast_slice(&self.vertices),
            size_of::<TerrainVertex>(),
            &self.indices,
            effect,
        );
        backend.set_state(previous);
    }
}

/// Linear blend between the two stops bracketing `height`, clamped to the
/// end stops outside `[0, 1]`.
fn ramp_color(height: f32) -> [u8; 3] {
    for pair in COLOR_STOPS.windows(2) {
        let (h1, c1) = pair[0];
        let (h2, c2) = pair[1];
        if height <= h1 && height >= h2 {
            let t = (height - h2) / (h1 - h2);
            return [0, 1, 2].map(|i| {
                (f32::from(c1[i]) * t + f32::from(c2[i]) * (1.0 - t)) as u8
            });
        }
    }
    if height > COLOR_STOPS[0].0 {
        COLOR_STOPS[0].1
    } else {
        COLOR_STOPS[COLOR_STOPS.len() - 1].1
    }
}

fn blend(base: [u8; 3], over: [u8; 3], amount: f32) -> [u8; 3] {
    [0, 1, 2].map(|i| {
        (f32::from(base[i]) * (1.0 - amount) + f32::from(over[i]) * amount)
            .clamp(0.0, 255.0) as u8
    })
}
