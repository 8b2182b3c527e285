use crate::constants::{DRAG_THRESHOLD_PX, ORBIT_RADIANS_PER_PX, WHEEL_ZOOM_STEP};
use funnel_core::{Command, ViewMode};
use glam::Vec2;

/// Press/move/release bookkeeping that tells orbit drags apart from clicks.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerTracker {
    pressed_at: Option<Vec2>,
    last: Vec2,
    travel: f32,
}

impl PointerTracker {
    pub fn press(&mut self, pos: Vec2) {
        self.pressed_at = Some(pos);
        self.last = pos;
        self.travel = 0.0;
    }

    pub fn is_down(&self) -> bool {
        self.pressed_at.is_some()
    }

    /// True once the pointer has travelled far enough to count as a drag.
    pub fn is_dragging(&self) -> bool {
        self.is_down() && self.travel > DRAG_THRESHOLD_PX
    }

    /// Record a move; returns the delta since the last event while a button is held.
    pub fn moved(&mut self, pos: Vec2) -> Option<Vec2> {
        self.pressed_at?;
        let delta = pos - self.last;
        self.last = pos;
        self.travel += delta.length();
        Some(delta)
    }

    /// Release the button; true when the gesture was a click rather than a drag.
    pub fn release(&mut self, pos: Vec2) -> bool {
        if self.pressed_at.is_none() {
            return false;
        }
        self.moved(pos);
        let click = self.travel <= DRAG_THRESHOLD_PX;
        self.pressed_at = None;
        self.travel = 0.0;
        click
    }

    /// Abandon the gesture without a click, e.g. when the browser cancels it.
    /// Returns true when a button was held.
    pub fn cancel(&mut self) -> bool {
        let was_down = self.pressed_at.take().is_some();
        self.travel = 0.0;
        was_down
    }
}

/// Map a position in CSS pixels relative to the canvas' top-left corner to
/// normalized device coordinates (x right, y up). `None` for a zero-sized canvas.
#[inline]
pub fn client_to_ndc(x_css: f32, y_css: f32, width_css: f32, height_css: f32) -> Option<Vec2> {
    if width_css <= 0.0 || height_css <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (x_css / width_css) * 2.0 - 1.0,
        -(y_css / height_css) * 2.0 + 1.0,
    ))
}

/// Orbit angles for a drag of `delta_px`; a drag across the full canvas
/// height is one full turn.
#[inline]
pub fn orbit_angles(delta_px: Vec2, height_css: f32) -> (f32, f32) {
    let h = height_css.max(1.0);
    (
        ORBIT_RADIANS_PER_PX * delta_px.x / h,
        ORBIT_RADIANS_PER_PX * delta_px.y / h,
    )
}

/// Dolly factor for a wheel event: scrolling down moves the eye away.
#[inline]
pub fn zoom_scale_for_wheel(delta_y: f64) -> Option<f32> {
    if delta_y > 0.0 {
        Some(1.0 / WHEEL_ZOOM_STEP)
    } else if delta_y < 0.0 {
        Some(WHEEL_ZOOM_STEP)
    } else {
        None
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    Dispatch(Command),
    ToggleInfoPanel,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    let command = match key {
        "1" => Command::SetMode(ViewMode::Pyramid),
        "2" => Command::SetMode(ViewMode::Exploded),
        "3" => Command::SetMode(ViewMode::Flow),
        "r" | "R" => Command::ResetView,
        " " => Command::ToggleAutoRotate,
        "f" | "F" => Command::FocusSelected,
        "h" | "H" => return Some(KeyAction::ToggleInfoPanel),
        _ => return None,
    };
    Some(KeyAction::Dispatch(command))
}
