//! Camera system for 3D scene viewing.
//!
//! Provides an orbit camera parameterized by yaw, pitch and distance around
//! the origin, and the view frustum used for culling.

/// View frustum extraction and intersection tests.
pub mod frustum;
/// Orbit camera with eye/target state and spherical orbit parameters.
pub mod orbit;

pub use frustum::{Frustum, Plane};
pub use orbit::OrbitCamera;
