//! Target geometry for the three view modes and the transitions toward it.
//!
//! The engine never jumps: every mode switch, focus and reset starts a tween
//! from whatever the tier or camera currently shows, so calling it again
//! mid-flight simply retargets from the live value.

use crate::constants::{
    EXPLODED_SPACING, EXPLODED_TOP_Y, FLOW_HEIGHT, FLOW_RADIUS, FOCUS_OFFSET_XZ, FOCUS_OFFSET_Y,
    HIGHLIGHT_FADE_SEC, PYRAMID_HEIGHT, TIER_YAW, TRANSITION_SEC,
};
use crate::state::{CameraPose, SceneState, Transform};
use crate::tween::{step, Easing, Tween};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, TAU};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ViewMode {
    #[default]
    Pyramid,
    Exploded,
    Flow,
}

impl ViewMode {
    pub const ALL: [ViewMode; 3] = [ViewMode::Pyramid, ViewMode::Exploded, ViewMode::Flow];

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Pyramid => "pyramid",
            ViewMode::Exploded => "exploded",
            ViewMode::Flow => "flow",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown view mode `{0}`")]
pub struct UnknownViewMode(pub String);

impl FromStr for ViewMode {
    type Err = UnknownViewMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pyramid" => Ok(ViewMode::Pyramid),
            "exploded" => Ok(ViewMode::Exploded),
            "flow" => Ok(ViewMode::Flow),
            _ => Err(UnknownViewMode(s.to_string())),
        }
    }
}

/// Center height of tier `index` when stacked: apex at the top, base at the bottom.
pub fn pyramid_height(index: usize, count: usize) -> f32 {
    let level = PYRAMID_HEIGHT / count.max(1) as f32;
    PYRAMID_HEIGHT / 2.0 - index as f32 * level - level / 2.0
}

pub fn exploded_height(index: usize) -> f32 {
    EXPLODED_TOP_Y - index as f32 * EXPLODED_SPACING
}

/// Angle of tier `index` around the flow circle; tier 0 sits at angle 0.
pub fn flow_angle(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    TAU * index as f32 / count as f32
}

pub fn target_transform(mode: ViewMode, index: usize, count: usize) -> Transform {
    match mode {
        ViewMode::Pyramid => Transform {
            position: Vec3::new(0.0, pyramid_height(index, count), 0.0),
            rotation: Vec3::new(0.0, TIER_YAW, 0.0),
        },
        ViewMode::Exploded => Transform {
            position: Vec3::new(0.0, exploded_height(index), 0.0),
            rotation: Vec3::new(0.0, TIER_YAW, 0.0),
        },
        ViewMode::Flow => {
            let theta = flow_angle(index, count);
            Transform {
                position: Vec3::new(
                    FLOW_RADIUS * theta.cos(),
                    FLOW_HEIGHT,
                    FLOW_RADIUS * theta.sin(),
                ),
                rotation: Vec3::new(0.0, -theta + FRAC_PI_2 + FRAC_PI_4, 0.0),
            }
        }
    }
}

/// Camera framing for a tier whose center sits at height `tier_y`.
pub fn focus_pose(tier_y: f32) -> CameraPose {
    CameraPose {
        eye: Vec3::new(FOCUS_OFFSET_XZ, tier_y + FOCUS_OFFSET_Y, FOCUS_OFFSET_XZ),
        target: Vec3::new(0.0, tier_y, 0.0),
    }
}

pub struct LayoutEngine {
    mode: ViewMode,
    tier_tweens: Vec<Option<Tween<Transform>>>,
    emphasis_tweens: Vec<Option<Tween<f32>>>,
    camera_tween: Option<Tween<CameraPose>>,
}

impl LayoutEngine {
    pub fn new(tier_count: usize) -> Self {
        Self {
            mode: ViewMode::Pyramid,
            tier_tweens: vec![None; tier_count],
            emphasis_tweens: vec![None; tier_count],
            camera_tween: None,
        }
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn is_animating(&self) -> bool {
        self.is_camera_animating() || self.is_layout_animating()
    }

    pub fn is_layout_animating(&self) -> bool {
        self.tier_tweens.iter().any(Option::is_some)
    }

    pub fn is_camera_animating(&self) -> bool {
        self.camera_tween.is_some()
    }

    /// Final pose of the running camera transition, if any.
    pub fn camera_destination(&self) -> Option<CameraPose> {
        self.camera_tween.as_ref().map(Tween::end)
    }

    pub fn set_mode(&mut self, scene: &mut SceneState, mode: ViewMode) {
        let n = scene.tiers.len();
        self.ensure_slots(n);
        for (i, tier) in scene.tiers.iter().enumerate() {
            let target = target_transform(mode, i, n);
            self.tier_tweens[i] = Some(Tween::new(
                tier.transform,
                target,
                TRANSITION_SEC,
                Easing::EaseInOutCubic,
            ));
        }
        if self.mode != mode {
            log::debug!("[layout] mode {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Frame tier `index` at its current height. Unknown indices are ignored.
    pub fn focus_on_tier(&mut self, scene: &mut SceneState, index: usize) {
        let Some(tier) = scene.tiers.get(index) else {
            log::warn!("[layout] focus on missing tier {}", index);
            return;
        };
        let destination = focus_pose(tier.transform.position.y);
        log::debug!(
            "[layout] focus tier {} eye=({:.2},{:.2},{:.2})",
            index,
            destination.eye.x,
            destination.eye.y,
            destination.eye.z
        );
        self.move_camera(scene, destination);
    }

    pub fn reset_view(&mut self, scene: &mut SceneState) {
        log::debug!("[layout] reset view");
        self.move_camera(scene, CameraPose::default());
        self.set_mode(scene, ViewMode::Pyramid);
    }

    fn move_camera(&mut self, scene: &SceneState, destination: CameraPose) {
        self.camera_tween = Some(Tween::new(
            scene.camera.pose(),
            destination,
            TRANSITION_SEC,
            Easing::EaseInOutCubic,
        ));
    }

    /// Mark `index` highlighted (or not) and fade its emphasis toward 1 (or 0).
    pub fn set_highlight(&mut self, scene: &mut SceneState, index: usize, on: bool) {
        self.ensure_slots(scene.tiers.len());
        let Some(tier) = scene.tiers.get_mut(index) else {
            return;
        };
        tier.highlighted = on;
        let goal = if on { 1.0 } else { 0.0 };
        self.emphasis_tweens[index] = Some(Tween::new(
            tier.emphasis,
            goal,
            HIGHLIGHT_FADE_SEC,
            Easing::EaseOutQuad,
        ));
    }

    /// Advance every running transition by `dt` seconds. Returns true when a
    /// tier transform or the camera moved.
    pub fn tick(&mut self, scene: &mut SceneState, dt: f32) -> bool {
        self.ensure_slots(scene.tiers.len());
        let mut moved = false;
        for (tier, slot) in scene.tiers.iter_mut().zip(self.tier_tweens.iter_mut()) {
            if let Some(t) = step(slot, dt) {
                tier.transform = t;
                moved = true;
            }
        }
        for (tier, slot) in scene.tiers.iter_mut().zip(self.emphasis_tweens.iter_mut()) {
            if let Some(e) = step(slot, dt) {
                tier.emphasis = e.clamp(0.0, 1.0);
            }
        }
        if let Some(pose) = step(&mut self.camera_tween, dt) {
            scene.camera.set_pose(pose);
            moved = true;
        }
        moved
    }

    fn ensure_slots(&mut self, n: usize) {
        if self.tier_tweens.len() != n {
            self.tier_tweens.resize(n, None);
            self.emphasis_tweens.resize(n, None);
        }
    }
}
