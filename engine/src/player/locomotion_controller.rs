//! Locomotion Controller
//!
//! Turns the per-frame [`ControlState`] and the elapsed frame time into the
//! avatar's next position, facing, vertical velocity, grounded flag and
//! [`LocomotionState`].
//!
//! # Physics Model
//!
//! - Run speed: 5.0 m/s (backward at 0.5x)
//! - Tank turn rate: 2.5 rad/s
//! - Gravity: 30.0 m/s^2
//! - Jump launch velocity: 10.0 m/s
//! - Frame time capped at 0.1 s
//!
//! # Movement Modes
//!
//! - **Camera-relative (default)**: intents are rotated by the camera yaw and
//!   the avatar turns to face where it moves.
//! - **Tank**: left/right rotate the avatar in place, forward/back translate
//!   along its facing.
//!
//! # Usage
//!
//! ```rust,ignore
//! use portal_city_engine::player::{Avatar, LocomotionController};
//! use portal_city_engine::physics::FlatGround;
//!
//! let controller = LocomotionController::default();
//! let mut avatar = Avatar::spawned_at(spawn, 0.0);
//!
//! // Each frame:
//! let frame = controller.update(&mut avatar, &controls, dt, camera_yaw, &ground);
//! ```

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::avatar::Avatar;
use super::state::LocomotionState;
use crate::input::ControlState;
use crate::physics::GroundProbe;

/// Run speed in meters per second
pub const RUN_SPEED: f32 = 5.0;

/// Speed multiplier applied while moving backward
pub const BACKWARD_MULTIPLIER: f32 = 0.5;

/// Tank-mode turn rate in radians per second
pub const TURN_RATE: f32 = 2.5;

/// Gravity acceleration in meters per second squared
pub const GRAVITY: f32 = 30.0;

/// Jump launch velocity in meters per second
pub const JUMP_VELOCITY: f32 = 10.0;

/// Half of the avatar's 1.8 m body height
pub const HALF_HEIGHT: f32 = 0.9;

/// Below this height the avatar is considered to have fallen out of the world
pub const WORLD_FLOOR: f32 = -50.0;

/// How avatar-relative intents are turned into world-space motion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementMode {
    /// Left/right rotate the avatar; forward/back move along its facing
    Tank,
    /// Intents are relative to the camera heading on the ground plane
    #[default]
    CameraRelative,
}

/// Tunables for [`LocomotionController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocomotionConfig {
    /// Full movement speed (m/s)
    pub run_speed: f32,
    /// Multiplier on `run_speed` while backing up
    pub backward_multiplier: f32,
    /// Tank-mode turn rate (rad/s)
    pub turn_rate: f32,
    /// Downward acceleration (m/s^2)
    pub gravity: f32,
    /// Vertical velocity set by a jump (m/s)
    pub jump_velocity: f32,
    /// Distance from body center to feet (m)
    pub half_height: f32,
    /// Feet within this distance of a surface count as resting on it (m)
    pub ground_tolerance: f32,
    /// Probe origin height above the feet; also the tallest step that can be climbed (m)
    pub probe_lift: f32,
    /// Upper bound on the simulated frame time (s)
    pub max_frame_dt: f32,
    /// Fall-through-world threshold (m)
    pub world_floor: f32,
    /// Height the avatar is dropped back in from after falling out of the world (m)
    pub respawn_height: f32,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            run_speed: RUN_SPEED,
            backward_multiplier: BACKWARD_MULTIPLIER,
            turn_rate: TURN_RATE,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            half_height: HALF_HEIGHT,
            ground_tolerance: 0.1,
            probe_lift: 0.5,
            max_frame_dt: 0.1,
            world_floor: WORLD_FLOOR,
            respawn_height: 5.0,
        }
    }
}

/// What happened during one [`LocomotionController::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionFrame {
    /// A jump was launched this frame
    pub jumped: bool,
    /// Touched down this frame after being airborne
    pub landed: bool,
    /// The avatar fell below the world floor and was put back
    pub respawned: bool,
    /// World-space displacement applied this frame
    pub displacement: Vec3,
}

impl LocomotionFrame {
    /// Whether the avatar changed position this frame.
    pub fn moved(&self) -> bool {
        self.displacement.length_squared() > 0.0
    }
}

/// Unit forward vector on the ground plane for a yaw angle.
///
/// Yaw 0 looks toward -Z; positive yaw turns toward +X.
pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.sin(), 0.0, -yaw.cos())
}

/// Unit right vector on the ground plane for a yaw angle.
pub fn right_from_yaw(yaw: f32) -> Vec3 {
    // forward x Y for forward = (sin, 0, -cos)
    Vec3::new(yaw.cos(), 0.0, yaw.sin())
}

/// Yaw angle of a ground-plane direction. Inverse of [`forward_from_yaw`].
pub fn yaw_from_direction(direction: Vec3) -> f32 {
    direction.x.atan2(-direction.z)
}

/// Stateless locomotion integrator; all mutable state lives on the [`Avatar`].
#[derive(Debug, Clone, Default)]
pub struct LocomotionController {
    config: LocomotionConfig,
    mode: MovementMode,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig, mode: MovementMode) -> Self {
        Self { config, mode }
    }

    pub fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    pub fn mode(&self) -> MovementMode {
        self.mode
    }

    /// Put the avatar at `point` with no vertical motion, e.g. on entering an area.
    pub fn respawn(&self, avatar: &mut Avatar, point: Vec3) {
        avatar.position = point;
        avatar.spawn_point = point;
        avatar.vertical_velocity = 0.0;
        avatar.grounded = false;
        avatar.locomotion_state = LocomotionState::Idle;
    }

    /// Advance the avatar by one frame.
    ///
    /// # Arguments
    /// * `avatar` - Avatar to mutate
    /// * `controls` - This frame's control snapshot
    /// * `dt` - Frame time in seconds (capped at `max_frame_dt`)
    /// * `camera_yaw` - Camera heading, used in camera-relative mode only
    /// * `ground` - Downward probe against the active area's geometry
    pub fn update(
        &self,
        avatar: &mut Avatar,
        controls: &ControlState,
        dt: f32,
        camera_yaw: f32,
        ground: &dyn GroundProbe,
    ) -> LocomotionFrame {
        let dt = dt.clamp(0.0, self.config.max_frame_dt);
        let mut frame = LocomotionFrame::default();

        if avatar.position.y < self.config.world_floor {
            self.recover_from_fall(avatar);
            frame.respawned = true;
            return frame;
        }

        let start = avatar.position;
        let was_grounded = avatar.grounded;

        self.step_horizontal(avatar, controls, dt, camera_yaw);

        if controls.jump && avatar.grounded {
            avatar.vertical_velocity = self.config.jump_velocity;
            avatar.grounded = false;
            frame.jumped = true;
        }

        self.step_vertical(avatar, dt, ground);

        frame.landed = !was_grounded && avatar.grounded;
        frame.displacement = avatar.position - start;
        avatar.locomotion_state = LocomotionState::derive(avatar.grounded, frame.jumped, controls);
        frame
    }

    fn step_horizontal(&self, avatar: &mut Avatar, controls: &ControlState, dt: f32, camera_yaw: f32) {
        let forward_axis = controls.forward_axis() as f32;
        let right_axis = controls.right_axis() as f32;
        let speed = if forward_axis < 0.0 {
            self.config.run_speed * self.config.backward_multiplier
        } else {
            self.config.run_speed
        };

        match self.mode {
            MovementMode::CameraRelative => {
                let intent = Vec2::new(right_axis, forward_axis).normalize_or_zero();
                if intent == Vec2::ZERO {
                    return;
                }
                let direction = forward_from_yaw(camera_yaw) * intent.y
                    + right_from_yaw(camera_yaw) * intent.x;
                avatar.position += direction * speed * dt;

                // Backpedaling keeps the current facing
                if right_axis != 0.0 || forward_axis > 0.0 {
                    avatar.facing_angle = yaw_from_direction(direction);
                }
            }
            MovementMode::Tank => {
                avatar.facing_angle += right_axis * self.config.turn_rate * dt;
                if forward_axis != 0.0 {
                    avatar.position += avatar.forward() * forward_axis * speed * dt;
                }
            }
        }
    }

    fn step_vertical(&self, avatar: &mut Avatar, dt: f32, ground: &dyn GroundProbe) {
        let half = self.config.half_height;
        let feet_before = avatar.position.y - half;

        if avatar.vertical_velocity <= 0.0 && self.try_land(avatar, feet_before, ground) {
            return;
        }

        avatar.vertical_velocity -= self.config.gravity * dt;
        avatar.position.y += avatar.vertical_velocity * dt;
        avatar.grounded = false;

        if avatar.vertical_velocity <= 0.0 {
            // Probe from the higher of the two feet positions so a fast fall cannot skip a surface
            self.try_land(avatar, feet_before.max(avatar.position.y - half), ground);
        }
    }

    /// Snap onto the surface below `probe_feet` if the feet are within tolerance of it.
    fn try_land(&self, avatar: &mut Avatar, probe_feet: f32, ground: &dyn GroundProbe) -> bool {
        let origin = Vec3::new(
            avatar.position.x,
            probe_feet + self.config.probe_lift,
            avatar.position.z,
        );
        let Some(surface) = ground.cast_down(origin) else {
            return false;
        };

        let feet = avatar.position.y - self.config.half_height;
        if feet - surface > self.config.ground_tolerance {
            return false;
        }

        avatar.position.y = surface + self.config.half_height;
        avatar.vertical_velocity = 0.0;
        avatar.grounded = true;
        true
    }

    fn recover_from_fall(&self, avatar: &mut Avatar) {
        log::warn!(
            "avatar fell below world floor ({:.1} < {:.1}), respawning above ({:.1}, {:.1})",
            avatar.position.y,
            self.config.world_floor,
            avatar.spawn_point.x,
            avatar.spawn_point.z
        );
        avatar.position = Vec3::new(
            avatar.spawn_point.x,
            self.config.respawn_height,
            avatar.spawn_point.z,
        );
        avatar.vertical_velocity = 0.0;
        avatar.grounded = false;
        avatar.locomotion_state = LocomotionState::Jump;
    }
}
