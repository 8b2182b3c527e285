// Host-side tests for pure input functions.
// The web crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod input {
    include!("../src/input.rs");
}

use constants::{DRAG_THRESHOLD_PX, WHEEL_ZOOM_STEP};
use funnel_core::{Command, ViewMode};
use glam::Vec2;
use input::*;

#[test]
fn ndc_corners_and_center() {
    let w = 800.0;
    let h = 600.0;
    assert_eq!(client_to_ndc(0.0, 0.0, w, h), Some(Vec2::new(-1.0, 1.0)));
    assert_eq!(client_to_ndc(w, h, w, h), Some(Vec2::new(1.0, -1.0)));
    assert_eq!(client_to_ndc(400.0, 300.0, w, h), Some(Vec2::ZERO));
}

#[test]
fn ndc_rejects_empty_canvas() {
    assert_eq!(client_to_ndc(10.0, 10.0, 0.0, 600.0), None);
    assert_eq!(client_to_ndc(10.0, 10.0, 800.0, 0.0), None);
}

#[test]
fn short_press_is_a_click() {
    let mut p = PointerTracker::default();
    assert!(!p.is_down());
    p.press(Vec2::new(100.0, 100.0));
    assert!(p.is_down());
    p.moved(Vec2::new(101.0, 100.0));
    assert!(!p.is_dragging());
    assert!(p.release(Vec2::new(101.0, 101.0)));
    assert!(!p.is_down());
}

#[test]
fn long_travel_is_a_drag() {
    let mut p = PointerTracker::default();
    p.press(Vec2::ZERO);
    let delta = p.moved(Vec2::new(DRAG_THRESHOLD_PX * 3.0, 0.0));
    assert_eq!(delta, Some(Vec2::new(DRAG_THRESHOLD_PX * 3.0, 0.0)));
    assert!(p.is_dragging());
    // coming back to the start still counts as a drag
    assert!(!p.release(Vec2::ZERO));
}

#[test]
fn moves_without_press_report_nothing() {
    let mut p = PointerTracker::default();
    assert_eq!(p.moved(Vec2::new(5.0, 5.0)), None);
    assert!(!p.release(Vec2::new(5.0, 5.0)));
    p.press(Vec2::ZERO);
    assert!(p.cancel());
    assert!(!p.is_down());
    assert!(!p.cancel());
}

#[test]
fn cancelled_press_stops_dragging() {
    let mut p = PointerTracker::default();
    p.press(Vec2::new(10.0, 10.0));
    p.moved(Vec2::new(40.0, 10.0));
    assert!(p.is_dragging());
    assert!(p.cancel());

    // later hover moves are plain moves again
    assert_eq!(p.moved(Vec2::new(80.0, 10.0)), None);
    assert!(!p.is_down());
    assert!(!p.is_dragging());
    assert!(!p.release(Vec2::new(80.0, 10.0)));
}

#[test]
fn cancel_after_release_reports_nothing_held() {
    let mut p = PointerTracker::default();
    p.press(Vec2::ZERO);
    assert!(p.release(Vec2::ZERO));
    assert!(!p.cancel());
}

#[test]
fn orbit_angles_scale_with_canvas_height() {
    let (az, polar) = orbit_angles(Vec2::new(300.0, 0.0), 600.0);
    assert!((az - std::f32::consts::PI).abs() < 1e-5);
    assert_eq!(polar, 0.0);
    let (_, polar) = orbit_angles(Vec2::new(0.0, 10.0), 0.0);
    assert!(polar.is_finite());
}

#[test]
fn wheel_direction_maps_to_dolly() {
    assert_eq!(zoom_scale_for_wheel(-120.0), Some(WHEEL_ZOOM_STEP));
    assert_eq!(zoom_scale_for_wheel(120.0), Some(1.0 / WHEEL_ZOOM_STEP));
    assert_eq!(zoom_scale_for_wheel(0.0), None);
}

#[test]
fn keys_map_to_commands() {
    let cases = [
        ("1", Command::SetMode(ViewMode::Pyramid)),
        ("2", Command::SetMode(ViewMode::Exploded)),
        ("3", Command::SetMode(ViewMode::Flow)),
        ("r", Command::ResetView),
        ("R", Command::ResetView),
        (" ", Command::ToggleAutoRotate),
        ("f", Command::FocusSelected),
    ];
    for (key, command) in cases {
        assert_eq!(action_for_key(key), Some(KeyAction::Dispatch(command)), "{key:?}");
    }
    assert_eq!(action_for_key("h"), Some(KeyAction::ToggleInfoPanel));
    assert_eq!(action_for_key("x"), None);
    assert_eq!(action_for_key("Enter"), None);
}
