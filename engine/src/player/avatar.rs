//! The player-controlled avatar.

use glam::Vec3;

use super::state::LocomotionState;

/// Player-controlled entity.
///
/// Created once per session and repositioned, never recreated, when the
/// active area changes. `position` is the center of the body; the feet are
/// `half_height` below it (see [`LocomotionConfig`](super::LocomotionConfig)).
#[derive(Debug, Clone, PartialEq)]
pub struct Avatar {
    /// World-space center of the body
    pub position: Vec3,
    /// Yaw in radians; 0 faces -Z, positive turns toward +X
    pub facing_angle: f32,
    /// Vertical velocity in m/s (positive = upward)
    pub vertical_velocity: f32,
    /// Resting on a detected surface with non-positive vertical velocity
    pub grounded: bool,
    pub locomotion_state: LocomotionState,
    /// Where the avatar entered the current area; used for fall recovery
    pub spawn_point: Vec3,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::spawned_at(Vec3::ZERO, 0.0)
    }
}

impl Avatar {
    /// New avatar at a spawn point. It is airborne until the first ground probe.
    pub fn spawned_at(position: Vec3, facing_angle: f32) -> Self {
        Self {
            position,
            facing_angle,
            vertical_velocity: 0.0,
            grounded: false,
            locomotion_state: LocomotionState::Idle,
            spawn_point: position,
        }
    }

    /// Unit vector the avatar faces on the ground plane.
    pub fn forward(&self) -> Vec3 {
        super::forward_from_yaw(self.facing_angle)
    }
}
