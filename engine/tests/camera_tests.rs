//! Camera Tests - Follow Behaviour and Transform Interpolation
//!
//! Tests the follow camera against a moving avatar and the easing/interpolation
//! helpers used by portal transitions.

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;
use portal_city_engine::camera::{
    CameraOffsetSpace, CameraTransform, FollowCamera, FollowCameraConfig, ease_in_out,
};
use portal_city_engine::input::ControlState;
use portal_city_engine::physics::FlatGround;
use portal_city_engine::player::{Avatar, HALF_HEIGHT, LocomotionConfig, LocomotionController, MovementMode};

const DT: f32 = 1.0 / 60.0;

fn floor() -> FlatGround {
    FlatGround::infinite(-HALF_HEIGHT)
}

// ============================================================================
// Follow camera with locomotion
// ============================================================================

#[test]
fn test_camera_lags_then_converges() {
    let controller = LocomotionController::new(LocomotionConfig::default(), MovementMode::CameraRelative);
    let mut camera = FollowCamera::default();
    let mut avatar = Avatar::default();
    let ground = floor();
    camera.update(&avatar, DT);

    for _ in 0..60 {
        controller.update(&mut avatar, &ControlState::new().with_forward(), DT, camera.yaw(), &ground);
        camera.update(&avatar, DT);
    }
    let lag = camera.position().distance(camera.ideal_position(&avatar));
    assert!(lag > 0.5, "camera should trail a running avatar, lag {lag}");

    for _ in 0..120 {
        controller.update(&mut avatar, &ControlState::new(), DT, camera.yaw(), &ground);
        camera.update(&avatar, DT);
    }
    let lag = camera.position().distance(camera.ideal_position(&avatar));
    assert!(lag < 0.01, "camera should settle, lag {lag}");
}

#[test]
fn test_camera_always_looks_at_head_height() {
    let controller = LocomotionController::new(LocomotionConfig::default(), MovementMode::CameraRelative);
    let mut camera = FollowCamera::default();
    let mut avatar = Avatar::default();
    let ground = floor();
    let controls = ControlState::new().with_forward().with_leftward();

    for _ in 0..90 {
        controller.update(&mut avatar, &controls, DT, camera.yaw(), &ground);
        let transform = camera.update(&avatar, DT);
        let head = avatar.position + Vec3::Y * camera.config().look_height;
        let expected = (head - transform.position).normalize();
        assert!((transform.forward() - expected).length() < 1e-4);
    }
}

#[test]
fn test_orbit_redirects_camera_relative_movement() {
    let controller = LocomotionController::new(LocomotionConfig::default(), MovementMode::CameraRelative);
    let mut camera = FollowCamera::default();
    let mut avatar = Avatar::default();

    camera.orbit(FRAC_PI_2);
    camera.snap_to(&avatar);
    assert!((camera.yaw() - FRAC_PI_2).abs() < 1e-4);

    let frame = controller.update(&mut avatar, &ControlState::new().with_forward(), 0.1, camera.yaw(), &floor());

    assert!((frame.displacement - Vec3::new(0.5, 0.0, 0.0)).length() < 1e-3);
}

#[test]
fn test_local_offset_swings_with_tank_turn() {
    let controller = LocomotionController::new(LocomotionConfig::default(), MovementMode::Tank);
    let mut camera = FollowCamera::new(FollowCameraConfig {
        offset_space: CameraOffsetSpace::Local,
        smoothing: 1.0,
        ..Default::default()
    });
    let mut avatar = Avatar::default();

    // Half a turn at 2.5 rad/s
    let frames = (std::f32::consts::PI / 2.5 / DT).round() as usize;
    for _ in 0..frames {
        controller.update(&mut avatar, &ControlState::new().with_rightward(), DT, camera.yaw(), &floor());
        camera.update(&avatar, DT);
    }

    // Avatar now faces roughly +Z, so the camera sits on the -Z side
    assert!(camera.position().z < -4.9, "camera at {}", camera.position());
    assert!(avatar.position.length() < 1e-4);
}

// ============================================================================
// Interpolation helpers
// ============================================================================

#[test]
fn test_ease_in_out_is_symmetric_and_monotonic() {
    let mut previous = 0.0;
    for i in 0..=100 {
        let t = i as f32 / 100.0;
        let eased = ease_in_out(t);
        assert!((eased + ease_in_out(1.0 - t) - 1.0).abs() < 1e-5);
        assert!(eased >= previous);
        previous = eased;
    }
}

#[test]
fn test_interpolation_approaches_target_monotonically() {
    let source = CameraTransform::looking_at(Vec3::new(0.0, 3.0, 5.0), Vec3::new(0.0, 0.9, 0.0));
    let target = CameraTransform::looking_at(Vec3::new(10.0, 1.0, 10.0), Vec3::new(10.0, 1.0, 5.0));

    let mut previous = f32::MAX;
    for i in 0..=20 {
        let eased = ease_in_out(i as f32 / 20.0);
        let camera = source.interpolate(&target, eased);
        let remaining = camera.position.distance(target.position);
        assert!(remaining <= previous + 1e-5);
        assert!((camera.rotation.length() - 1.0).abs() < 1e-4);
        previous = remaining;
    }
    assert!(previous < 1e-5);
}
