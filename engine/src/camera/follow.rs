//! Follow Camera
//!
//! Third-person camera trailing the avatar at a fixed offset (height above,
//! distance behind) with exponential smoothing. The offset is expressed either
//! in avatar-local space (it swings around with the avatar's facing) or in
//! world/orbit space (its heading is driven by pointer drag and ignores the
//! avatar's facing).
//!
//! Smoothing is a constant per-frame lerp factor, tuned for a steady frame
//! rate. Set `reference_fps` to scale the factor by the real frame time
//! instead.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::transform::CameraTransform;
use crate::player::{Avatar, forward_from_yaw};

/// Frame in which the camera offset is expressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraOffsetSpace {
    /// Offset rotates with the avatar's facing
    Local,
    /// Offset heading is an independent orbit angle
    #[default]
    World,
}

/// Follow camera configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowCameraConfig {
    pub offset_space: CameraOffsetSpace,
    /// Height above the avatar center (m)
    pub height: f32,
    /// Horizontal distance behind the avatar (m)
    pub distance: f32,
    /// Look-at point height above the avatar center (m)
    pub look_height: f32,
    /// Per-frame lerp factor toward the ideal position, in (0, 1]
    pub smoothing: f32,
    /// Frame rate `smoothing` was tuned for; `None` applies it per frame as-is
    pub reference_fps: Option<f32>,
    /// Orbit zoom limits (m)
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for FollowCameraConfig {
    fn default() -> Self {
        Self {
            offset_space: CameraOffsetSpace::World,
            height: 3.0,
            distance: 5.0,
            look_height: 0.9,
            smoothing: 0.1,
            reference_fps: None,
            min_distance: 3.0,
            max_distance: 15.0,
        }
    }
}

impl FollowCameraConfig {
    /// Clamp an orbit distance to the zoom limits. Never panics; if the limits
    /// are inverted the upper one wins.
    pub fn clamp_distance(&self, distance: f32) -> f32 {
        distance.max(self.min_distance).min(self.max_distance)
    }
}

/// Smoothed third-person follow camera.
#[derive(Debug, Clone)]
pub struct FollowCamera {
    config: FollowCameraConfig,
    position: Vec3,
    look_target: Vec3,
    /// Orbit heading for world-space offsets (radians)
    orbit_yaw: f32,
    /// Orbit distance for world-space offsets (m)
    orbit_distance: f32,
    /// False until the first update or snap
    placed: bool,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(FollowCameraConfig::default())
    }
}

impl FollowCamera {
    pub fn new(config: FollowCameraConfig) -> Self {
        let orbit_distance = config.clamp_distance(config.distance);
        Self {
            config,
            position: Vec3::ZERO,
            look_target: Vec3::ZERO,
            orbit_yaw: 0.0,
            orbit_distance,
            placed: false,
        }
    }

    pub fn config(&self) -> &FollowCameraConfig {
        &self.config
    }

    pub fn offset_space(&self) -> CameraOffsetSpace {
        self.config.offset_space
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    pub fn orbit_yaw(&self) -> f32 {
        self.orbit_yaw
    }

    pub fn orbit_distance(&self) -> f32 {
        self.orbit_distance
    }

    /// Rotate the orbit heading (pointer drag). Only affects world-space offsets.
    pub fn orbit(&mut self, delta_yaw: f32) {
        self.orbit_yaw = (self.orbit_yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
    }

    /// Change the orbit distance (scroll), clamped to the configured limits.
    pub fn zoom(&mut self, delta: f32) {
        self.orbit_distance = self.config.clamp_distance(self.orbit_distance + delta);
    }

    /// Heading used to place the camera behind the avatar.
    fn offset_yaw(&self, avatar: &Avatar) -> f32 {
        match self.config.offset_space {
            CameraOffsetSpace::Local => avatar.facing_angle,
            CameraOffsetSpace::World => self.orbit_yaw,
        }
    }

    fn offset_distance(&self) -> f32 {
        match self.config.offset_space {
            CameraOffsetSpace::Local => self.config.distance,
            CameraOffsetSpace::World => self.orbit_distance,
        }
    }

    /// Where the camera would sit with no smoothing.
    pub fn ideal_position(&self, avatar: &Avatar) -> Vec3 {
        avatar.position + Vec3::Y * self.config.height
            - forward_from_yaw(self.offset_yaw(avatar)) * self.offset_distance()
    }

    /// Point the camera looks at (approximate head height).
    pub fn target_for(&self, avatar: &Avatar) -> Vec3 {
        avatar.position + Vec3::Y * self.config.look_height
    }

    /// Lerp factor for this frame.
    pub fn smoothing_factor(&self, dt: f32) -> f32 {
        let base = self.config.smoothing.clamp(f32::EPSILON, 1.0);
        match self.config.reference_fps {
            Some(fps) if fps > 0.0 => 1.0 - (1.0 - base).powf(dt.max(0.0) * fps),
            _ => base,
        }
    }

    /// Advance one frame and return the new camera transform.
    ///
    /// The first call places the camera directly at its ideal position.
    pub fn update(&mut self, avatar: &Avatar, dt: f32) -> CameraTransform {
        if !self.placed {
            return self.snap_to(avatar);
        }
        let factor = self.smoothing_factor(dt);
        self.position = self.position.lerp(self.ideal_position(avatar), factor);
        self.look_target = self.target_for(avatar);
        self.transform()
    }

    /// Jump straight to the ideal position (area change, teleport).
    pub fn snap_to(&mut self, avatar: &Avatar) -> CameraTransform {
        self.position = self.ideal_position(avatar);
        self.look_target = self.target_for(avatar);
        self.placed = true;
        self.transform()
    }

    /// Current camera transform.
    pub fn transform(&self) -> CameraTransform {
        CameraTransform::looking_at(self.position, self.look_target)
    }

    /// Ground-plane heading of the camera, used for camera-relative movement.
    pub fn yaw(&self) -> f32 {
        if !self.placed {
            return self.orbit_yaw;
        }
        self.transform().ground_yaw().unwrap_or(self.orbit_yaw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_default_config() {
        let config = FollowCameraConfig::default();
        assert_eq!(config.height, 3.0);
        assert_eq!(config.distance, 5.0);
        assert_eq!(config.smoothing, 0.1);
        assert_eq!(config.offset_space, CameraOffsetSpace::World);
    }

    #[test]
    fn test_first_update_snaps() {
        let mut camera = FollowCamera::default();
        let avatar = Avatar::default();

        camera.update(&avatar, 0.016);

        assert_eq!(camera.position(), Vec3::new(0.0, 3.0, 5.0));
        assert_eq!(camera.look_target(), Vec3::new(0.0, 0.9, 0.0));
    }

    #[test]
    fn test_smoothing_moves_ten_percent() {
        let mut camera = FollowCamera::default();
        let mut avatar = Avatar::default();
        camera.update(&avatar, 0.016);

        avatar.position.x = 10.0;
        camera.update(&avatar, 0.016);

        assert!((camera.position().x - 1.0).abs() < 1e-5);
        // Look target is not smoothed
        assert_eq!(camera.look_target().x, 10.0);
    }

    #[test]
    fn test_smoothing_ignores_dt_without_reference_fps() {
        let camera = FollowCamera::default();
        assert_eq!(camera.smoothing_factor(0.001), camera.smoothing_factor(0.5));
    }

    #[test]
    fn test_reference_fps_scales_factor() {
        let camera = FollowCamera::new(FollowCameraConfig {
            reference_fps: Some(60.0),
            ..Default::default()
        });
        assert!((camera.smoothing_factor(1.0 / 60.0) - 0.1).abs() < 1e-5);
        // Two 60 Hz frames worth of catch-up in one 30 Hz frame
        assert!((camera.smoothing_factor(1.0 / 30.0) - 0.19).abs() < 1e-4);
    }

    #[test]
    fn test_local_offset_rotates_with_avatar() {
        let mut camera = FollowCamera::new(FollowCameraConfig {
            offset_space: CameraOffsetSpace::Local,
            ..Default::default()
        });
        let mut avatar = Avatar::default();
        avatar.facing_angle = FRAC_PI_2;

        camera.snap_to(&avatar);

        // Facing +X puts the camera on -X
        assert!((camera.position() - Vec3::new(-5.0, 3.0, 0.0)).length() < 1e-5);
        assert!((camera.yaw() - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_world_offset_ignores_facing() {
        let mut camera = FollowCamera::default();
        let mut avatar = Avatar::default();
        avatar.facing_angle = 2.0;

        camera.snap_to(&avatar);

        assert_eq!(camera.position(), Vec3::new(0.0, 3.0, 5.0));
        assert!(camera.yaw().abs() < 1e-5);
    }

    #[test]
    fn test_orbit_and_zoom() {
        let mut camera = FollowCamera::default();
        let avatar = Avatar::default();

        camera.orbit(FRAC_PI_2);
        camera.zoom(100.0);
        camera.snap_to(&avatar);
        assert_eq!(camera.orbit_distance(), 15.0);
        assert!((camera.position() - Vec3::new(-15.0, 3.0, 0.0)).length() < 1e-4);

        camera.zoom(-100.0);
        assert_eq!(camera.orbit_distance(), 3.0);
    }

    #[test]
    fn test_inverted_distance_limits_do_not_panic() {
        let config = FollowCameraConfig {
            min_distance: 10.0,
            max_distance: 5.0,
            ..Default::default()
        };
        let mut camera = FollowCamera::new(config);
        // Upper limit wins when the limits are inverted
        assert_eq!(camera.orbit_distance(), 5.0);

        camera.zoom(-100.0);
        assert_eq!(camera.orbit_distance(), 5.0);
    }

    #[test]
    fn test_transform_looks_at_avatar_head() {
        let mut camera = FollowCamera::default();
        let avatar = Avatar::spawned_at(Vec3::new(4.0, 1.0, -2.0), 0.0);

        let transform = camera.update(&avatar, 0.016);

        let expected = (camera.look_target() - transform.position).normalize();
        assert!((transform.forward() - expected).length() < 1e-5);
    }
}
