// Orbit controls: auto-rotation, damping and limits.

use funnel_core::orbit::OrbitControls;
use funnel_core::CameraPose;
use std::f32::consts::TAU;

fn radius(pose: &CameraPose) -> f32 {
    (pose.eye - pose.target).length()
}

#[test]
fn auto_rotate_keeps_distance_and_height() {
    let mut orbit = OrbitControls::default();
    let mut pose = CameraPose::default();
    let r0 = radius(&pose);
    let y0 = pose.eye.y;
    for _ in 0..120 {
        assert!(orbit.update(&mut pose, 1.0 / 60.0));
    }
    assert!((radius(&pose) - r0).abs() < 1e-3);
    assert!((pose.eye.y - y0).abs() < 1e-3);
    assert_eq!(pose.target, CameraPose::default().target);
    assert_ne!(pose.eye, CameraPose::default().eye);
}

#[test]
fn auto_rotate_speed_matches_revolutions_per_minute() {
    let orbit = OrbitControls::default();
    // speed 0.5 => half a turn per minute
    let one_minute = orbit.auto_rotate_angle(60.0);
    assert!((one_minute - TAU * 0.5).abs() < 1e-4);
    assert_eq!(orbit.auto_rotate_angle(-1.0), 0.0);
}

#[test]
fn idle_without_auto_rotate() {
    let mut orbit = OrbitControls::new(false);
    let mut pose = CameraPose::default();
    assert!(!orbit.update(&mut pose, 1.0 / 60.0));
    assert!((pose.eye - CameraPose::default().eye).length() < 1e-4);
}

#[test]
fn drag_motion_decays() {
    let mut orbit = OrbitControls::new(false);
    let mut pose = CameraPose::default();
    orbit.rotate(0.5, 0.0);
    assert!(!orbit.is_settled());
    let mut last = pose.eye;
    let mut steps = Vec::new();
    for _ in 0..30 {
        orbit.update(&mut pose, 1.0 / 60.0);
        steps.push((pose.eye - last).length());
        last = pose.eye;
    }
    for pair in steps.windows(2) {
        assert!(pair[1] < pair[0]);
    }
    for _ in 0..1000 {
        orbit.update(&mut pose, 1.0 / 60.0);
    }
    assert!(orbit.is_settled());
}

#[test]
fn polar_angle_is_clamped_above_floor() {
    let mut orbit = OrbitControls::new(false);
    let mut pose = CameraPose::default();
    for _ in 0..200 {
        orbit.rotate(0.0, -1.0);
        orbit.update(&mut pose, 1.0 / 60.0);
    }
    let offset = pose.eye - pose.target;
    let phi = (offset.y / offset.length()).acos();
    assert!(phi <= orbit.max_polar + 1e-4);
    assert!(pose.eye.y > pose.target.y);
}

#[test]
fn dolly_respects_distance_limits() {
    let mut orbit = OrbitControls::new(false);
    let mut pose = CameraPose::default();
    for _ in 0..100 {
        orbit.dolly(0.5);
        orbit.update(&mut pose, 1.0 / 60.0);
    }
    assert!((radius(&pose) - orbit.min_distance).abs() < 1e-3);
    for _ in 0..100 {
        orbit.dolly(2.0);
        orbit.update(&mut pose, 1.0 / 60.0);
    }
    assert!((radius(&pose) - orbit.max_distance).abs() < 1e-3);

    // invalid factors are ignored
    orbit.dolly(0.0);
    orbit.dolly(f32::NAN);
    assert!(orbit.is_settled());
}

#[test]
fn cancel_drops_pending_motion() {
    let mut orbit = OrbitControls::default();
    orbit.rotate(1.0, 1.0);
    orbit.dolly(0.5);
    orbit.cancel();
    assert!(orbit.is_settled());
}

#[test]
fn new_keeps_default_tuning() {
    let orbit = OrbitControls::new(false);
    let defaults = OrbitControls::default();
    assert!(!orbit.auto_rotate);
    assert!(orbit.is_settled());
    assert_eq!(orbit.damping, defaults.damping);
    assert_eq!(orbit.min_distance, defaults.min_distance);
    assert_eq!(orbit.max_polar, defaults.max_polar);
    assert!(OrbitControls::new(true).auto_rotate);
}
