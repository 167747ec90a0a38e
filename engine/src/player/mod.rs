//! Player Module
//!
//! Provides the avatar and its locomotion.
//!
//! # Components
//!
//! - [`Avatar`] - Position, facing, vertical motion and grounded state
//! - [`LocomotionController`] - Per-frame integration of intents, gravity and jumps
//!   - Camera-relative or tank-style steering ([`MovementMode`])
//!   - Downward ground probe with step-up and fall-through-world recovery
//! - [`LocomotionState`] - The single movement category derived each frame

pub mod avatar;
pub mod locomotion_controller;
pub mod state;

pub use avatar::Avatar;
pub use locomotion_controller::{
    LocomotionConfig, LocomotionController, LocomotionFrame, MovementMode,
    forward_from_yaw, right_from_yaw, yaw_from_direction,
    RUN_SPEED, BACKWARD_MULTIPLIER, TURN_RATE, GRAVITY, JUMP_VELOCITY, HALF_HEIGHT, WORLD_FLOOR,
};
pub use state::LocomotionState;
