//! Camera transforms and interpolation helpers.

use glam::{Mat3, Quat, Vec3};

use crate::player::yaw_from_direction;

/// Camera position plus orientation. The camera looks down its local -Z with +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransform {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl CameraTransform {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Camera at `position` oriented toward `target` with world +Y as up.
    ///
    /// A target on top of the position keeps the identity orientation; a
    /// target straight above or below uses +X as the right axis.
    pub fn looking_at(position: Vec3, target: Vec3) -> Self {
        let to_target = target - position;
        if to_target.length_squared() < 1e-10 {
            return Self::new(position, Quat::IDENTITY);
        }
        let forward = to_target.normalize();
        let right = forward.cross(Vec3::Y).try_normalize().unwrap_or(Vec3::X);
        let up = right.cross(forward);
        let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
        Self::new(position, rotation)
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Heading of the view direction projected onto the ground plane.
    ///
    /// Returns `None` when looking straight up or down.
    pub fn ground_yaw(&self) -> Option<f32> {
        let forward = self.forward();
        let flat = Vec3::new(forward.x, 0.0, forward.z);
        (flat.length_squared() > 1e-8).then(|| yaw_from_direction(flat))
    }

    /// Linear position / spherical orientation blend toward `other`.
    pub fn interpolate(&self, other: &CameraTransform, t: f32) -> CameraTransform {
        CameraTransform {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.slerp(other.rotation, t),
        }
    }
}

/// Smooth ease-in-out curve over `[0, 1]`.
pub fn ease_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_looking_at_points_forward() {
        let camera = CameraTransform::looking_at(Vec3::new(0.0, 3.0, 5.0), Vec3::new(0.0, 0.9, 0.0));
        let expected = (Vec3::new(0.0, 0.9, 0.0) - Vec3::new(0.0, 3.0, 5.0)).normalize();
        assert!((camera.forward() - expected).length() < 1e-5);
        // No roll: camera right stays horizontal
        let right = camera.rotation * Vec3::X;
        assert!(right.y.abs() < 1e-5);
    }

    #[test]
    fn test_looking_at_degenerate_targets() {
        let same = CameraTransform::looking_at(Vec3::ONE, Vec3::ONE);
        assert_eq!(same.rotation, Quat::IDENTITY);

        let down = CameraTransform::looking_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO);
        assert!((down.forward() - Vec3::NEG_Y).length() < 1e-5);
        assert!(down.ground_yaw().is_none());
    }

    #[test]
    fn test_ground_yaw() {
        let camera = CameraTransform::looking_at(Vec3::ZERO, Vec3::new(1.0, -0.5, 0.0));
        let yaw = camera.ground_yaw().unwrap_or(f32::NAN);
        assert!((yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_ease_in_out_shape() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(0.5), 0.5);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!(ease_in_out(0.25) < 0.25);
        assert!(ease_in_out(0.75) > 0.75);
        assert_eq!(ease_in_out(2.0), 1.0);
    }

    #[test]
    fn test_interpolate_endpoints_and_midpoint() {
        let a = CameraTransform::looking_at(Vec3::ZERO, Vec3::NEG_Z);
        let b = CameraTransform::looking_at(Vec3::new(10.0, 0.0, 0.0), Vec3::new(11.0, 0.0, 0.0));

        assert_eq!(a.interpolate(&b, 0.0).position, a.position);
        assert_eq!(a.interpolate(&b, 1.0).position, b.position);

        let mid = a.interpolate(&b, 0.5);
        assert_eq!(mid.position, Vec3::new(5.0, 0.0, 0.0));
        let yaw = mid.ground_yaw().unwrap_or(f32::NAN);
        assert!((yaw - std::f32::consts::FRAC_PI_4).abs() < 1e-4);
    }
}
