//! Converts raw platform events into gallery commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! the orbit grab, held keys, modifier keys, model spin inertia) and the
//! key-binding map. It is the only thing that sits between raw window
//! events and the engine's [`execute`](crate::engine::GalleryEngine::execute)
//! method.

use glam::Vec2;
use rustc_hash::FxHashSet;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use crate::engine::command::GalleryCommand;
use crate::options::KeybindingOptions;

/// Scroll units to spin velocity (radians per second).
const SPIN_SENSITIVITY: f32 = 0.005;
/// Fraction of spin velocity kept each frame.
const SPIN_DAMPING: f32 = 0.9;
/// Below this the spin has settled.
const SPIN_EPSILON: f32 = 1e-4;

/// Converts raw window events into [`GalleryCommand`]s.
///
/// Discrete actions (scene change, reset, exit) and mouse gestures come
/// out of [`handle_event`](Self::handle_event); held keys and scroll
/// inertia are sampled once per frame by [`frame`](Self::frame).
///
/// # Usage
///
/// ```ignore
/// for event in pending_events {
///     if let Some(cmd) = processor.handle_event(event) {
///         engine.execute(cmd);
///     }
/// }
/// for cmd in processor.frame(dt) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug)]
pub struct InputProcessor {
    /// Last cursor position, if any has been reported.
    cursor: Option<Vec2>,
    /// Whether the right button currently holds the orbit grab.
    orbiting: bool,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    /// Actions whose keys are down.
    held: FxHashSet<KeyAction>,
    /// Model spin from scrolling, decays every frame.
    spin_velocity: f32,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            cursor: None,
            orbiting: false,
            shift_pressed: false,
            held: FxHashSet::default(),
            spin_velocity: 0.0,
            key_bindings,
        }
    }

    /// Whether the right button is orbiting the camera.
    #[must_use]
    pub fn orbiting(&self) -> bool {
        self.orbiting
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Current model spin velocity in radians per second.
    #[must_use]
    pub fn spin_velocity(&self) -> f32 {
        self.spin_velocity
    }

    /// Read-only access to the key bindings.
    #[must_use]
    pub fn key_bindings(&self) -> &KeybindingOptions {
        &self.key_bindings
    }

    /// Forget held keys and the orbit grab, e.g. when the window loses
    /// focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.orbiting = false;
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<GalleryCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(Vec2::new(x, y)),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => self.handle_scroll(delta),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
            InputEvent::Key { code, pressed } => self.handle_key(&code, pressed),
        }
    }

    /// Commands produced by held keys and spin inertia for a frame of
    /// `dt` seconds.
    pub fn frame(&mut self, dt: f32) -> Vec<GalleryCommand> {
        let mut commands = Vec::new();

        let axis = |neg: KeyAction, pos: KeyAction| {
            f32::from(u8::from(self.held.contains(&pos)))
                - f32::from(u8::from(self.held.contains(&neg)))
        };
        let direction = Vec2::new(
            axis(KeyAction::RotateLeft, KeyAction::RotateRight),
            axis(KeyAction::MoveDown, KeyAction::MoveUp),
        );
        if direction != Vec2::ZERO {
            commands.push(GalleryCommand::NudgeModels {
                delta: direction * dt,
            });
        }

        if self.spin_velocity.abs() > SPIN_EPSILON {
            commands.push(GalleryCommand::SpinModels {
                angle: self.spin_velocity * dt,
            });
            self.spin_velocity *= SPIN_DAMPING;
        } else {
            self.spin_velocity = 0.0;
        }

        commands
    }

    fn handle_cursor_moved(&mut self, position: Vec2) -> Option<GalleryCommand> {
        let previous = self.cursor.replace(position);
        if !self.orbiting {
            return None;
        }
        let delta = position - previous?;
        (delta != Vec2::ZERO).then_some(GalleryCommand::OrbitCamera { delta })
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<GalleryCommand> {
        if button != MouseButton::Right {
            return None;
        }
        let engaged = pressed && !self.orbiting;
        self.orbiting = pressed;
        engaged.then_some(GalleryCommand::SyncOrbit)
    }

    fn handle_scroll(&mut self, delta: f32) -> Option<GalleryCommand> {
        if delta == 0.0 {
            return None;
        }
        if self.orbiting {
            return Some(GalleryCommand::ZoomCamera { delta });
        }
        self.spin_velocity += delta * SPIN_SENSITIVITY;
        None
    }

    fn handle_key(&mut self, code: &str, pressed: bool) -> Option<GalleryCommand> {
        let action = self.key_bindings.lookup(code)?;
        if !pressed {
            let _ = self.held.remove(&action);
            return None;
        }
        // Auto-repeat arrives as repeated presses; only the first counts.
        if !self.held.insert(action) || action.is_continuous() {
            return None;
        }
        match action {
            KeyAction::ResetView => Some(GalleryCommand::ResetView),
            KeyAction::NextScene if self.shift_pressed => Some(GalleryCommand::PreviousScene),
            KeyAction::NextScene => Some(GalleryCommand::NextScene),
            KeyAction::Exit => Some(GalleryCommand::Exit),
            KeyAction::RotateLeft
            | KeyAction::RotateRight
            | KeyAction::MoveUp
            | KeyAction::MoveDown => None,
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: &str, pressed: bool) -> InputEvent {
        InputEvent::Key {
            code: code.to_owned(),
            pressed,
        }
    }

    fn right(pressed: bool) -> InputEvent {
        InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed,
        }
    }

    #[test]
    fn space_cycles_and_shift_reverses() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(key("Space", true)), Some(GalleryCommand::NextScene));
        let _ = input.handle_event(key("Space", false));

        let _ = input.handle_event(InputEvent::ModifiersChanged { shift: true });
        assert_eq!(
            input.handle_event(key("Space", true)),
            Some(GalleryCommand::PreviousScene)
        );
    }

    #[test]
    fn key_repeat_fires_once() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(key("KeyR", true)), Some(GalleryCommand::ResetView));
        assert_eq!(input.handle_event(key("KeyR", true)), None);
        let _ = input.handle_event(key("KeyR", false));
        assert_eq!(input.handle_event(key("KeyR", true)), Some(GalleryCommand::ResetView));
    }

    #[test]
    fn escape_requests_exit_and_unbound_keys_are_ignored() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(key("Escape", true)), Some(GalleryCommand::Exit));
        assert_eq!(input.handle_event(key("KeyZ", true)), None);
    }

    #[test]
    fn right_drag_orbits() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(InputEvent::CursorMoved { x: 10.0, y: 10.0 }), None);
        assert_eq!(input.handle_event(right(true)), Some(GalleryCommand::SyncOrbit));
        assert_eq!(
            input.handle_event(InputEvent::CursorMoved { x: 14.0, y: 7.0 }),
            Some(GalleryCommand::OrbitCamera {
                delta: Vec2::new(4.0, -3.0)
            })
        );
        let _ = input.handle_event(right(false));
        assert!(!input.orbiting());
        assert_eq!(input.handle_event(InputEvent::CursorMoved { x: 30.0, y: 30.0 }), None);
    }

    #[test]
    fn left_button_does_not_orbit() {
        let mut input = InputProcessor::new();
        let left = InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        };
        assert_eq!(input.handle_event(left), None);
        assert!(!input.orbiting());
    }

    #[test]
    fn scroll_zooms_only_while_orbiting() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(right(true));
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: 120.0 }),
            Some(GalleryCommand::ZoomCamera { delta: 120.0 })
        );
        assert_eq!(input.spin_velocity(), 0.0);
    }

    #[test]
    fn scroll_spin_decays() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(InputEvent::Scroll { delta: 120.0 }), None);
        assert!((input.spin_velocity() - 0.6).abs() < 1e-6);

        match input.frame(0.5).as_slice() {
            [GalleryCommand::SpinModels { angle }] => assert!((angle - 0.3).abs() < 1e-6),
            other => panic!("unexpected commands: {other:?}"),
        }
        assert!((input.spin_velocity() - 0.54).abs() < 1e-6);

        for _ in 0..200 {
            let _ = input.frame(0.016);
        }
        assert_eq!(input.spin_velocity(), 0.0);
        assert!(input.frame(0.016).is_empty());
    }

    #[test]
    fn held_keys_nudge_every_frame() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(key("KeyA", true)), None);
        assert_eq!(input.handle_event(key("KeyW", true)), None);
        for _ in 0..3 {
            assert_eq!(
                input.frame(0.5),
                vec![GalleryCommand::NudgeModels {
                    delta: Vec2::new(-0.5, 0.5)
                }]
            );
        }
        let _ = input.handle_event(key("KeyA", false));
        let _ = input.handle_event(key("KeyW", false));
        assert!(input.frame(0.5).is_empty());
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(key("KeyA", true));
        let _ = input.handle_event(key("KeyD", true));
        assert!(input.frame(0.5).is_empty());
    }
}
