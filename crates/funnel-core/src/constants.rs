use glam::Vec3;
use std::f32::consts::{FRAC_PI_4, PI};

// Shared layout/camera tuning constants used by the core and the web frontend.

// Pyramid layout
pub const PYRAMID_HEIGHT: f32 = 6.0; // total stacked height of all tiers
pub const PYRAMID_BASE_SIZE: f32 = 4.0; // bottom radius of the widest tier

// Exploded layout
pub const EXPLODED_TOP_Y: f32 = 4.0; // height of tier 0
pub const EXPLODED_SPACING: f32 = 2.0; // vertical gap between consecutive tiers

// Flow layout
pub const FLOW_RADIUS: f32 = 5.0;
pub const FLOW_HEIGHT: f32 = 2.0;

// Corner alignment of the four-sided tier solids about the vertical axis
pub const TIER_YAW: f32 = FRAC_PI_4;

// Transitions (seconds)
pub const TRANSITION_SEC: f32 = 1.5;
pub const HIGHLIGHT_FADE_SEC: f32 = 0.3;

// Camera
pub const DEFAULT_CAMERA_EYE: Vec3 = Vec3::new(8.0, 6.0, 8.0);
pub const DEFAULT_CAMERA_TARGET: Vec3 = Vec3::new(0.0, 2.0, 0.0);
pub const FOCUS_OFFSET_XZ: f32 = 6.0; // horizontal offset of the eye when framing a tier
pub const FOCUS_OFFSET_Y: f32 = 3.0; // eye height above the framed tier
pub const CAMERA_FOVY_DEG: f32 = 50.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.05; // fraction of pending rotation applied per tick
pub const AUTO_ROTATE_SPEED: f32 = 0.5; // 1.0 = one revolution per minute
pub const ORBIT_MIN_DISTANCE: f32 = 5.0;
pub const ORBIT_MAX_DISTANCE: f32 = 20.0;
pub const ORBIT_MIN_POLAR: f32 = 0.01;
pub const ORBIT_MAX_POLAR: f32 = PI * 0.48; // keep the eye just above the floor

// Tier emphasis mapping
pub const TIER_OPACITY_IDLE: f32 = 0.2;
pub const TIER_OPACITY_HIGHLIGHT: f32 = 0.4;
pub const TIER_EMISSIVE_HIGHLIGHT: f32 = 0.1;

// Placeholder shown in the info panel while nothing is picked
pub const PLACEHOLDER_TITLE: &str = "Select Level";
