//! The gallery's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a key press, a mouse
//! gesture, the scene selector or a programmatic call, is represented as a
//! `GalleryCommand`. Consumers construct commands and pass them to
//! [`GalleryEngine::execute`](super::GalleryEngine::execute).

use glam::Vec2;

/// A single action the engine can carry out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GalleryCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the camera by `delta` pixels of mouse movement.
    OrbitCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Move the camera along its orbit radius (positive = closer).
    ZoomCamera {
        /// Scroll amount.
        delta: f32,
    },

    /// Re-derive yaw, pitch and distance from the current eye.
    SyncOrbit,

    /// Restore the default camera and reset every model of the active
    /// scene.
    ResetView,

    // ── Scenes ──────────────────────────────────────────────────────
    /// Advance to the next scene, wrapping at the end.
    NextScene,

    /// Go back one scene, wrapping at the start.
    PreviousScene,

    /// Jump straight to a scene, as the scene selector does.
    SelectScene {
        /// Position in the registry.
        index: usize,
    },

    // ── Models ──────────────────────────────────────────────────────
    /// Held-key movement scaled by frame time. `x` spins the models (or
    /// slides them in the culling scene); `y` raises or lowers them in the
    /// culling scene.
    NudgeModels {
        /// Signed axis input times seconds.
        delta: Vec2,
    },

    /// Rotate every model of the active scene about Y.
    SpinModels {
        /// Radians.
        angle: f32,
    },

    // ── Host ────────────────────────────────────────────────────────
    /// Ask the host loop to close.
    Exit,
}

impl GalleryCommand {
    /// Whether the command changes the active scene.
    #[must_use]
    pub fn changes_scene(&self) -> bool {
        matches!(
            self,
            Self::NextScene | Self::PreviousScene | Self::SelectScene { .. }
        )
    }
}
