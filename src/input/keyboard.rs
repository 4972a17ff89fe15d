use serde::{Deserialize, Serialize};

/// Gallery actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// next_scene = "Space"
/// reset_view = "KeyR"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Restore the camera and every model of the active scene.
    ResetView,
    /// Advance to the next scene; with Shift held, go back one.
    NextScene,
    /// Held: spin models counter-clockwise, or slide them left in the
    /// culling scene.
    RotateLeft,
    /// Held: spin models clockwise, or slide them right in the culling
    /// scene.
    RotateRight,
    /// Held: raise models (culling scene only).
    MoveUp,
    /// Held: lower models (culling scene only).
    MoveDown,
    /// Ask the host to close the window.
    Exit,
}

impl KeyAction {
    /// Whether the action repeats every frame while its key is held.
    #[must_use]
    pub fn is_continuous(self) -> bool {
        matches!(
            self,
            Self::RotateLeft | Self::RotateRight | Self::MoveUp | Self::MoveDown
        )
    }
}
