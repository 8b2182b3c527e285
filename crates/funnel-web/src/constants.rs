// Front-end tuning constants: DOM hooks, scene dressing and input feel.
//
// Layout and camera numbers shared with picking live in
// `funnel_core::constants`; everything here only affects the browser side.

// DOM hooks
pub const CANVAS_ID: &str = "funnel-canvas";
pub const CONTROLS_ID: &str = "controls";
pub const STAGE_TITLE_ID: &str = "stage-title";
pub const STAGE_DESCRIPTION_ID: &str = "stage-description";
pub const STAGE_METRICS_ID: &str = "stage-metrics";
pub const STAGE_NUMBER_SELECTOR: &str = "#controls .stage-number";
pub const ROTATE_TOGGLE_ID: &str = "rotate-toggle";
pub const RESET_VIEW_ID: &str = "reset-view";
pub const FOCUS_SELECTED_ID: &str = "focus-selected";
pub const VIEW_BUTTON_SELECTOR: &str = ".view-options button[data-view]";
pub const VIEW_DATA_ATTR: &str = "data-view";
pub const ACTIVE_CLASS: &str = "active";
pub const HIDDEN_CLASS: &str = "hidden";

// Clear color (#0a0a0a)
pub const CLEAR_COLOR: [f64; 4] = [0.039, 0.039, 0.039, 1.0];

// Floor and grid
pub const FLOOR_Y: f32 = -0.5;
pub const FLOOR_SIZE: f32 = 20.0;
pub const FLOOR_COLOR: [f32; 3] = [0.067, 0.067, 0.067];
pub const FLOOR_OPACITY: f32 = 0.8;
pub const GRID_DIVISIONS: usize = 20;
pub const GRID_Y: f32 = -0.49; // just above the floor to avoid z-fighting
pub const GRID_COLOR: [f32; 3] = [0.2, 0.2, 0.2];

// Tier styling
pub const TIER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const EDGE_OPACITY: f32 = 0.1;

// Lighting (directional key, fill and rim)
pub const AMBIENT_LIGHT: f32 = 0.3;
pub const KEY_LIGHT_DIR: [f32; 3] = [5.0, 10.0, 5.0];
pub const KEY_LIGHT_INTENSITY: f32 = 0.8;
pub const FILL_LIGHT_DIR: [f32; 3] = [-5.0, 5.0, -5.0];
pub const FILL_LIGHT_INTENSITY: f32 = 0.3;
pub const RIM_LIGHT_DIR: [f32; 3] = [0.0, 10.0, -10.0];
pub const RIM_LIGHT_INTENSITY: f32 = 0.5;

// Input feel
pub const DRAG_THRESHOLD_PX: f32 = 4.0; // travel below this still counts as a click
pub const ORBIT_RADIANS_PER_PX: f32 = std::f32::consts::TAU; // scaled by 1/canvas height
pub const WHEEL_ZOOM_STEP: f32 = 0.95;

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after tab switches
