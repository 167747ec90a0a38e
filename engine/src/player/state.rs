//! Locomotion state
//!
//! The single discrete movement category the avatar is in each frame. It is
//! derived from scratch every frame so it can never be stale or ambiguous.

use serde::{Deserialize, Serialize};

use crate::input::ControlState;

/// Discrete movement category of the avatar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocomotionState {
    #[default]
    Idle,
    Walk,
    Run,
    /// Jumping or otherwise airborne
    Jump,
    StrafeLeft,
    StrafeRight,
}

impl LocomotionState {
    pub const ALL: [LocomotionState; 6] = [
        LocomotionState::Idle,
        LocomotionState::Walk,
        LocomotionState::Run,
        LocomotionState::Jump,
        LocomotionState::StrafeLeft,
        LocomotionState::StrafeRight,
    ];

    /// Derive the state for a frame.
    ///
    /// Priority, highest first: airborne, jump triggered this frame, pure left
    /// strafe, pure right strafe, run (forward held), walk (any other
    /// directional combination), idle.
    pub fn derive(grounded: bool, jump_triggered: bool, controls: &ControlState) -> Self {
        let longitudinal = controls.forward || controls.backward;

        if !grounded || jump_triggered {
            Self::Jump
        } else if controls.leftward && !controls.rightward && !longitudinal {
            Self::StrafeLeft
        } else if controls.rightward && !controls.leftward && !longitudinal {
            Self::StrafeRight
        } else if controls.forward {
            Self::Run
        } else if controls.any_directional() {
            Self::Walk
        } else {
            Self::Idle
        }
    }

    pub fn is_airborne(self) -> bool {
        self == Self::Jump
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk => "walk",
            Self::Run => "run",
            Self::Jump => "jump",
            Self::StrafeLeft => "strafe_left",
            Self::StrafeRight => "strafe_right",
        }
    }
}

impl std::fmt::Display for LocomotionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
