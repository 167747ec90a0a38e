//! Camera Module
//!
//! Follow camera and camera transform math for the engine.
//! This module is window-system agnostic - it only deals with camera state and math.

pub mod follow;
pub mod transform;

pub use follow::{CameraOffsetSpace, FollowCamera, FollowCameraConfig};
pub use transform::{CameraTransform, ease_in_out};
