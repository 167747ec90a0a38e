//! Input Bindings Module
//!
//! Maps physical keys to the logical intents of a [`ControlState`](super::ControlState).
//! An intent may be bound to several keys (W and ArrowUp both move forward);
//! a key drives at most one intent.

use std::collections::{HashMap, HashSet};

use super::KeyCode;

/// Logical intents that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Move forward (default: W, ArrowUp)
    MoveForward,
    /// Move backward (default: S, ArrowDown)
    MoveBack,
    /// Move left (default: A, ArrowLeft)
    MoveLeft,
    /// Move right (default: D, ArrowRight)
    MoveRight,
    /// Jump (default: Space)
    Jump,
    /// Enter the selected portal (default: E)
    Interact,
}

/// Maps physical keys to logical intents, supporting remapping.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to logical intent
    key_to_action: HashMap<KeyCode, ControlAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create bindings with the default key map.
    ///
    /// Default bindings:
    /// - W / ArrowUp = MoveForward
    /// - S / ArrowDown = MoveBack
    /// - A / ArrowLeft = MoveLeft
    /// - D / ArrowRight = MoveRight
    /// - Space = Jump
    /// - E = Interact
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, ControlAction::MoveForward);
        bindings.bind(KeyCode::ArrowUp, ControlAction::MoveForward);
        bindings.bind(KeyCode::S, ControlAction::MoveBack);
        bindings.bind(KeyCode::ArrowDown, ControlAction::MoveBack);
        bindings.bind(KeyCode::A, ControlAction::MoveLeft);
        bindings.bind(KeyCode::ArrowLeft, ControlAction::MoveLeft);
        bindings.bind(KeyCode::D, ControlAction::MoveRight);
        bindings.bind(KeyCode::ArrowRight, ControlAction::MoveRight);
        bindings.bind(KeyCode::Space, ControlAction::Jump);
        bindings.bind(KeyCode::E, ControlAction::Interact);

        bindings
    }

    /// Bindings with no keys mapped.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
        }
    }

    /// Bind a physical key to a logical intent.
    ///
    /// If the key was previously bound to another intent, that binding is replaced.
    /// Other keys bound to the same intent are kept.
    pub fn bind(&mut self, key: KeyCode, action: ControlAction) {
        self.key_to_action.insert(key, action);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        self.key_to_action.remove(&key);
    }

    /// Remove every key bound to a specific intent.
    pub fn unbind_action(&mut self, action: ControlAction) {
        self.key_to_action.retain(|_, bound| *bound != action);
    }

    /// Get the intent bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<ControlAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Get every key bound to an intent.
    pub fn keys_for(&self, action: ControlAction) -> Vec<KeyCode> {
        self.key_to_action
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Check if an intent is held, given the set of pressed keys.
    pub fn is_action_pressed(&self, action: ControlAction, pressed_keys: &HashSet<KeyCode>) -> bool {
        pressed_keys
            .iter()
            .any(|key| self.get_action(*key) == Some(action))
    }
}
