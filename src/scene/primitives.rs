//! Procedural stand-in meshes for the demo scenes.

use std::f32::consts::{PI, TAU};
use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

use super::mesh::{Mesh, MeshPart};
use crate::error::GalleryError;

/// Position, normal and texture coordinate.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

impl MeshVertex {
    fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }
}

fn finish(
    name: &str,
    vertices: &[MeshVertex],
    indices: Vec<u32>,
) -> Result<Arc<Mesh>, GalleryError> {
    let part = MeshPart::from_vertices(vertices, indices)?;
    Ok(Arc::new(Mesh::new(name, vec![part])))
}

/// Axis-aligned cube from -1 to 1 with per-face normals.
///
/// # Errors
///
/// Propagates vertex layout errors from [`MeshPart::from_vertices`].
pub fn cube(name: &str) -> Result<Arc<Mesh>, GalleryError> {
    let faces = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for normal in faces {
        let u = if normal.y.abs() > 0.5 { Vec3::X } else { Vec3::Y };
        let side = normal.cross(u);
        let up = side.cross(normal);
        let base = vertices.len() as u32;
        for (s, t) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = normal + side * s + up * t;
            let uv = Vec2::new((s + 1.0) * 0.5, (t + 1.0) * 0.5);
            vertices.push(MeshVertex::new(p, normal, uv));
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }
    finish(name, &vertices, indices)
}

/// Latitude/longitude sphere of the given radius.
///
/// # Errors
///
/// Propagates vertex layout errors from [`MeshPart::from_vertices`].
pub fn uv_sphere(
    name: &str,
    radius: f32,
    rings: u32,
    segments: u32,
) -> Result<Arc<Mesh>, GalleryError> {
    let rings = rings.max(2);
    let segments = segments.max(3);
    let mut vertices = Vec::with_capacity(((rings + 1) * (segments + 1)) as usize);
    for r in 0..=rings {
        let v = r as f32 / rings as f32;
        let theta = v * PI;
        for s in 0..=segments {
            let u = s as f32 / segments as f32;
            let phi = u * TAU;
            let normal = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
            vertices.push(MeshVertex::new(normal * radius, normal, Vec2::new(u, v)));
        }
    }
    let stride = segments + 1;
    let mut indices = Vec::with_capacity((rings * segments * 6) as usize);
    for r in 0..rings {
        for s in 0..segments {
            let a = r * stride + s;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    finish(name, &vertices, indices)
}

/// Torus around the Y axis.
///
/// # Errors
///
/// Propagates vertex layout errors from [`MeshPart::from_vertices`].
pub fn torus(
    name: &str,
    major_radius: f32,
    minor_radius: f32,
    segments: u32,
    sides: u32,
) -> Result<Arc<Mesh>, GalleryError> {
    let segments = segments.max(3);
    let sides = sides.max(3);
    let mut vertices = Vec::with_capacity(((segments + 1) * (sides + 1)) as usize);
    for i in 0..=segments {
        let u = i as f32 / segments as f32;
        let around = u * TAU;
        let ring_center = Vec3::new(around.cos(), 0.0, around.sin()) * major_radius;
        for j in 0..=sides {
            let v = j as f32 / sides as f32;
            let tube = v * TAU;
            let normal = Vec3::new(
                tube.cos() * around.cos(),
                tube.sin(),
                tube.cos() * around.sin(),
            );
            vertices.push(MeshVertex::new(
                ring_center + normal * minor_radius,
                normal,
                Vec2::new(u, v),
            ));
        }
    }
    let stride = sides + 1;
    let mut indices = Vec::with_capacity((segments * sides * 6) as usize);
    for i in 0..segments {
        for j in 0..sides {
            let a = i * stride + j;
            let b = a + stride;
            indices.extend_from_slice(&[a, a + 1, b, b, a + 1, b + 1]);
        }
    }
    finish(name, &vertices, indices)
}
