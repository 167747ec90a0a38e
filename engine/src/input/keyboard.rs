//! Keyboard Input Module
//!
//! Tracks held keys and turns them into a [`ControlState`] through
//! [`KeyBindings`]. Decoupled from any windowing system: the host translates
//! its own key events into [`KeyCode`] before calling
//! [`KeyboardControls::handle_key`].

use std::collections::HashSet;

use super::bindings::{ControlAction, KeyBindings};
use super::control::{ControlSource, ControlState};

/// Generic key codes, independent of windowing system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    E,
    Space,

    // Arrow keys
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
}

/// Keyboard-backed [`ControlSource`].
#[derive(Debug, Clone, Default)]
pub struct KeyboardControls {
    bindings: KeyBindings,
    pressed: HashSet<KeyCode>,
}

impl KeyboardControls {
    /// Create keyboard controls using the default key map.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bindings(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            pressed: HashSet::new(),
        }
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut KeyBindings {
        &mut self.bindings
    }

    /// Update held-key state from a press/release event.
    ///
    /// Returns `true` if the key is bound to an intent, `false` otherwise.
    /// Repeated press events for a held key are harmless. A release always
    /// clears the key, even if it was unbound while held.
    pub fn handle_key(&mut self, key: KeyCode, pressed: bool) -> bool {
        let bound = self.bindings.get_action(key).is_some();
        if !pressed {
            self.pressed.remove(&key);
        } else if bound {
            self.pressed.insert(key);
        }
        bound
    }

    /// Release every key (e.g. on window focus loss).
    pub fn reset(&mut self) {
        self.pressed.clear();
    }

    /// Build the snapshot for the currently held keys.
    pub fn snapshot(&self) -> ControlState {
        let held = |action| self.bindings.is_action_pressed(action, &self.pressed);
        ControlState {
            forward: held(ControlAction::MoveForward),
            backward: held(ControlAction::MoveBack),
            leftward: held(ControlAction::MoveLeft),
            rightward: held(ControlAction::MoveRight),
            jump: held(ControlAction::Jump),
            interact: held(ControlAction::Interact),
        }
    }
}

impl ControlSource for KeyboardControls {
    fn control_state(&mut self) -> ControlState {
        self.snapshot()
    }
}
