//! Camera Tests - Mouse Look, Pitch Clamping and Orbit
//!
//! Tests for the orbit camera rigs and the quaternion pitch clamp.

use build_royale_engine::camera::{
    CameraConfig, OrbitCamera, OrbitMode, clamp_rotation_around_x_axis,
};
use build_royale_engine::input::{InputAction, InputSnapshot};
use build_royale_engine::player::flat_forward;
use glam::{Quat, Vec3};
use proptest::prelude::*;

const DT: f32 = 1.0 / 60.0;

fn child_config() -> CameraConfig {
    CameraConfig {
        mode: OrbitMode::Child,
        ..CameraConfig::default()
    }
}

fn mouse(dx: f32, dy: f32) -> InputSnapshot {
    InputSnapshot::new().with_mouse(dx, dy)
}

// ============================================================================
// Pitch clamping
// ============================================================================

#[test]
fn test_pitch_bounds_adversarial_independent() {
    let mut camera = OrbitCamera::new(CameraConfig::default(), Quat::IDENTITY, 1.8);
    let deltas = [1.0e4, -1.0e4, 45.0, 45.0, 45.0, -89.9, 1.0e9, -3.0e7, 0.5];
    for dy in deltas {
        let pose = camera.look(DT, &mouse(0.0, dy), Vec3::ZERO);
        assert!((-90.0..=90.0).contains(&pose.pitch_degrees), "pitch {}", pose.pitch_degrees);
        assert_eq!(camera.look_state().cumulative_pitch, pose.pitch_degrees);
    }
}

#[test]
fn test_pitch_bounds_adversarial_child() {
    let mut camera = OrbitCamera::new(child_config(), Quat::IDENTITY, 1.8);
    let deltas = [1.0e4, -1.0e4, 30.0, 30.0, 30.0, 30.0, -200.0, 89.0, -1.0e6];
    for dy in deltas {
        let pose = camera.look(DT, &mouse(0.0, dy), Vec3::ZERO);
        assert!(
            pose.pitch_degrees >= -90.0 - 1e-3 && pose.pitch_degrees <= 90.0 + 1e-3,
            "pitch {}",
            pose.pitch_degrees
        );
        assert!(pose.orientation.is_normalized());
    }
}

#[test]
fn test_custom_clamp_range() {
    let config = CameraConfig {
        pitch_min: -30.0,
        pitch_max: 45.0,
        ..CameraConfig::default()
    };
    let mut camera = OrbitCamera::new(config, Quat::IDENTITY, 1.8);
    let pose = camera.look(DT, &mouse(0.0, -500.0), Vec3::ZERO);
    assert_eq!(pose.pitch_degrees, 45.0);
    let pose = camera.look(DT, &mouse(0.0, 500.0), Vec3::ZERO);
    assert_eq!(pose.pitch_degrees, -30.0);
}

#[test]
fn test_clamp_matches_pure_pitch() {
    for degrees in [-80.0f32, -45.0, -10.0, 0.0, 10.0, 45.0, 80.0] {
        let q = Quat::from_rotation_x(degrees.to_radians());
        let (clamped, angle) = clamp_rotation_around_x_axis(q, -90.0, 90.0);
        assert!((angle - degrees).abs() < 1e-3, "angle {} vs {}", angle, degrees);
        assert!(clamped.abs_diff_eq(q, 1e-5));
    }
}

#[test]
fn test_smoothing_still_clamps_accumulator() {
    let config = CameraConfig {
        smooth: true,
        ..CameraConfig::default()
    };
    let mut camera = OrbitCamera::new(config, Quat::IDENTITY, 1.8);
    for _ in 0..20 {
        let pose = camera.look(DT, &mouse(0.0, -1.0e3), Vec3::ZERO);
        assert!(pose.pitch_degrees <= 90.0);
    }
    assert_eq!(camera.look_state().cumulative_pitch, 90.0);
}

// ============================================================================
// Yaw
// ============================================================================

#[test]
fn test_mouse_x_accumulates_yaw() {
    let mut camera = OrbitCamera::new(CameraConfig::default(), Quat::IDENTITY, 1.8);
    for _ in 0..3 {
        camera.look(DT, &mouse(15.0, 0.0), Vec3::ZERO);
    }
    // 3 * 15 * 2 = 90 degrees
    assert!(flat_forward(camera.character_rotation()).abs_diff_eq(Vec3::X, 1e-4));
}

#[test]
fn test_smoothed_yaw_trails_target() {
    let config = CameraConfig {
        smooth: true,
        ..CameraConfig::default()
    };
    let mut camera = OrbitCamera::new(config, Quat::IDENTITY, 1.8);
    camera.look(DT, &mouse(45.0, 0.0), Vec3::ZERO);
    let applied = flat_forward(camera.character_rotation());
    let target = flat_forward(camera.look_state().character_yaw);
    assert!(target.abs_diff_eq(Vec3::X, 1e-4));
    assert!(applied.x > 0.0 && applied.x < 0.99);
}

#[test]
fn test_set_character_yaw_overrides() {
    let mut camera = OrbitCamera::new(CameraConfig::default(), Quat::IDENTITY, 1.8);
    let yaw = Quat::from_rotation_y(180f32.to_radians());
    camera.set_character_yaw(yaw);
    let pose = camera.look(DT, &InputSnapshot::new(), Vec3::ZERO);
    assert!(pose.forward().abs_diff_eq(Vec3::NEG_Z, 1e-4));
    // Behind a character facing -Z is +Z
    assert!(pose.position.z > 1.9);
}

// ============================================================================
// Orbit
// ============================================================================

#[test]
fn test_foot_angle_raises_pivot() {
    let mut camera = OrbitCamera::new(CameraConfig::default(), Quat::IDENTITY, 1.8);
    // pitch input 40 * 2 = 80 degrees upward, 15 past the foot angle
    camera.look(DT, &mouse(0.0, 40.0), Vec3::ZERO);
    assert_eq!(camera.look_state().cumulative_pitch, -80.0);
    let pivot = camera.orbit_pivot(Vec3::ZERO);
    let expected = 0.9 + 15.0 / 65.0;
    assert!((pivot.y - expected).abs() < 1e-5, "pivot {} expected {}", pivot.y, expected);
}

#[test]
fn test_no_raise_above_foot_angle() {
    let mut camera = OrbitCamera::new(CameraConfig::default(), Quat::IDENTITY, 1.8);
    camera.look(DT, &mouse(0.0, 20.0), Vec3::ZERO);
    assert_eq!(camera.orbit_pivot(Vec3::ZERO).y, 0.9);
}

#[test]
fn test_orbit_keeps_distance_to_pivot() {
    let mut camera = OrbitCamera::new(CameraConfig::default(), Quat::IDENTITY, 1.8);
    let rest = camera.look(DT, &InputSnapshot::new(), Vec3::ZERO);
    let pivot = camera.orbit_pivot(Vec3::ZERO);
    let rest_distance = rest.position.distance(pivot);

    let pose = camera.look(DT, &mouse(0.0, -15.0), Vec3::ZERO);
    assert_eq!(pose.pitch_degrees, 30.0);
    assert!((pose.position.distance(pivot) - rest_distance).abs() < 1e-4);
    // Looking down moves the camera up
    assert!(pose.position.y > rest.position.y);
    assert!(pose.forward().y < 0.0);
}

// ============================================================================
// Cursor lock
// ============================================================================

#[test]
fn test_cursor_lock_cycle() {
    let mut camera = OrbitCamera::new(CameraConfig::default(), Quat::IDENTITY, 1.8);
    assert!(camera.cursor().is_locked());

    camera.look(DT, &InputSnapshot::new().with_released(InputAction::Escape), Vec3::ZERO);
    assert!(!camera.cursor().is_locked());

    camera.look(DT, &InputSnapshot::new().with_released(InputAction::PrimaryClick), Vec3::ZERO);
    assert!(camera.cursor().is_locked());
}

#[test]
fn test_cursor_lock_disabled() {
    let config = CameraConfig {
        lock_cursor: false,
        ..CameraConfig::default()
    };
    let mut camera = OrbitCamera::new(config, Quat::IDENTITY, 1.8);
    camera.look(DT, &InputSnapshot::new().with_released(InputAction::PrimaryClick), Vec3::ZERO);
    assert!(!camera.cursor().is_locked());
}

proptest! {
    #[test]
    fn prop_pitch_never_leaves_range(
        deltas in prop::collection::vec(-1.0e5f32..1.0e5, 1..64),
        child in any::<bool>(),
    ) {
        let config = if child { child_config() } else { CameraConfig::default() };
        let mut camera = OrbitCamera::new(config, Quat::IDENTITY, 1.8);
        for dy in deltas {
            let pose = camera.look(DT, &mouse(0.0, dy), Vec3::ZERO);
            prop_assert!(pose.pitch_degrees >= -90.0 - 1e-3);
            prop_assert!(pose.pitch_degrees <= 90.0 + 1e-3);
        }
    }
}
