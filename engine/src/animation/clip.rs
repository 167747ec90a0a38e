//! Clip handles and the collaborator interfaces the selector drives.

use serde::{Deserialize, Serialize};

use crate::player::LocomotionState;

/// A loaded animation clip, identified by name.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipHandle {
    /// Cache-assigned identifier, unique per loaded clip
    pub id: u32,
    pub name: String,
    /// Length of one cycle in seconds
    pub duration: f32,
}

impl ClipHandle {
    pub fn new(id: u32, name: impl Into<String>, duration: f32) -> Self {
        Self {
            id,
            name: name.into(),
            duration,
        }
    }
}

/// Whether a clip repeats or plays a single time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopMode {
    Loop,
    Once,
}

/// Read-only clip lookup. Never blocks: a clip that is still loading or failed
/// to load is simply `None`.
pub trait ClipSource {
    fn get_clip(&mut self, name: &str) -> Option<ClipHandle>;
}

/// Playback backend that actually blends skeletal poses.
pub trait ClipMixer {
    /// Fade `outgoing` (if any) out and `incoming` in, both over `blend_seconds`.
    fn play_crossfade(
        &mut self,
        outgoing: Option<&ClipHandle>,
        incoming: &ClipHandle,
        blend_seconds: f32,
        mode: LoopMode,
    );

    /// Fade `outgoing` to silence over `blend_seconds`.
    fn fade_out(&mut self, outgoing: &ClipHandle, blend_seconds: f32);
}

/// Clip name per locomotion state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipNames {
    pub idle: String,
    pub walk: String,
    pub run: String,
    pub jump: String,
    pub strafe_left: String,
    pub strafe_right: String,
}

impl Default for ClipNames {
    fn default() -> Self {
        Self {
            idle: "idle".to_string(),
            walk: "walking".to_string(),
            run: "running".to_string(),
            jump: "jump".to_string(),
            strafe_left: "leftStrafe".to_string(),
            strafe_right: "rightStrafe".to_string(),
        }
    }
}

impl ClipNames {
    pub fn name_for(&self, state: LocomotionState) -> &str {
        match state {
            LocomotionState::Idle => &self.idle,
            LocomotionState::Walk => &self.walk,
            LocomotionState::Run => &self.run,
            LocomotionState::Jump => &self.jump,
            LocomotionState::StrafeLeft => &self.strafe_left,
            LocomotionState::StrafeRight => &self.strafe_right,
        }
    }

    /// Every distinct clip name, idle first.
    pub fn all(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::with_capacity(LocomotionState::ALL.len());
        for state in LocomotionState::ALL {
            let name = self.name_for(state);
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}

/// Jump/airborne plays once; every other locomotion clip loops.
pub fn loop_mode_for(state: LocomotionState) -> LoopMode {
    match state {
        LocomotionState::Jump => LoopMode::Once,
        _ => LoopMode::Loop,
    }
}
