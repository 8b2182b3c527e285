//! Top-level orchestration: commands in, scene updates and info payloads out.

use crate::funnel::Funnel;
use crate::layout::{LayoutEngine, ViewMode};
use crate::orbit::OrbitControls;
use crate::picker;
use crate::selection::{InfoSurface, SelectionPresenter};
use crate::state::{SceneState, ViewState};
use glam::Vec2;

/// User intents delivered by the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    SetMode(ViewMode),
    ToggleAutoRotate,
    ResetView,
    FocusSelected,
    /// Pointer position in normalized device coordinates.
    PointerMove { ndc: Vec2 },
    PointerLeave,
    PointerClick,
    /// Orbit drag in radians.
    Orbit { azimuth: f32, polar: f32 },
    /// Dolly factor; below 1 zooms in.
    Zoom { scale: f32 },
    Resize { width: u32, height: u32 },
}

pub struct ViewController {
    funnel: Funnel,
    scene: SceneState,
    layout: LayoutEngine,
    selection: SelectionPresenter,
    orbit: OrbitControls,
    state: ViewState,
    pointer: Option<Vec2>,
    pointer_dirty: bool,
}

impl ViewController {
    pub fn new(funnel: Funnel, aspect: f32) -> Self {
        let scene = SceneState::new(&funnel, aspect);
        let layout = LayoutEngine::new(scene.tiers.len());
        let state = ViewState::default();
        let orbit = OrbitControls::new(state.auto_rotate);
        Self {
            funnel,
            scene,
            layout,
            selection: SelectionPresenter::new(),
            orbit,
            state,
            pointer: None,
            pointer_dirty: false,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn scene(&self) -> &SceneState {
        &self.scene
    }

    pub fn funnel(&self) -> &Funnel {
        &self.funnel
    }

    pub fn layout(&self) -> &LayoutEngine {
        &self.layout
    }

    pub fn orbit(&self) -> &OrbitControls {
        &self.orbit
    }

    /// Push the current selection to `surface` (used once at startup).
    pub fn present(&self, surface: &mut dyn InfoSurface) {
        surface.show(&self.selection.payload(&self.funnel));
        surface.set_hovering(self.state.selected_index.is_some());
    }

    pub fn dispatch(&mut self, command: Command, surface: &mut dyn InfoSurface) {
        match command {
            Command::SetMode(mode) => {
                self.state.mode = mode;
                self.layout.set_mode(&mut self.scene, mode);
            }
            Command::ToggleAutoRotate => {
                self.state.auto_rotate = !self.state.auto_rotate;
                self.orbit.auto_rotate = self.state.auto_rotate;
                log::debug!("[view] auto-rotate={}", self.state.auto_rotate);
            }
            Command::ResetView => {
                self.orbit.cancel();
                self.layout.reset_view(&mut self.scene);
                self.state.mode = ViewMode::Pyramid;
            }
            Command::FocusSelected | Command::PointerClick => {
                if let Some(i) = self.state.selected_index {
                    self.focus_on_tier(i);
                }
            }
            Command::PointerMove { ndc } => {
                self.pointer = Some(ndc);
                self.pointer_dirty = true;
                self.refresh_pick(surface);
            }
            Command::PointerLeave => {
                self.pointer = None;
                self.pointer_dirty = false;
                self.apply_pick(None, surface);
            }
            Command::Orbit { azimuth, polar } => {
                if !self.layout.is_camera_animating() {
                    self.orbit.rotate(azimuth, polar);
                }
            }
            Command::Zoom { scale } => {
                if !self.layout.is_camera_animating() {
                    self.orbit.dolly(scale);
                }
            }
            Command::Resize { width, height } => {
                self.scene.camera.set_viewport(width, height);
            }
        }
        self.state.camera_pose = self.scene.camera.pose();
    }

    pub fn focus_on_tier(&mut self, index: usize) {
        self.orbit.cancel();
        self.layout.focus_on_tier(&mut self.scene, index);
    }

    /// One frame: advance transitions, orbit the camera when no camera
    /// transition owns it, then re-pick if the pointer or the scene moved.
    pub fn tick(&mut self, dt: f32, surface: &mut dyn InfoSurface) {
        let camera_was_animating = self.layout.is_camera_animating();
        let mut moved = self.layout.tick(&mut self.scene, dt);
        if !camera_was_animating {
            let mut pose = self.scene.camera.pose();
            if self.orbit.update(&mut pose, dt) {
                self.scene.camera.set_pose(pose);
                moved = true;
            }
        }
        self.state.camera_pose = self.scene.camera.pose();
        if self.pointer.is_some() && (moved || self.pointer_dirty) {
            self.refresh_pick(surface);
        }
    }

    fn refresh_pick(&mut self, surface: &mut dyn InfoSurface) {
        self.pointer_dirty = false;
        let hit = self
            .pointer
            .and_then(|ndc| picker::pick(ndc, &self.scene.camera, &self.scene.tiers));
        self.apply_pick(hit, surface);
    }

    fn apply_pick(&mut self, index: Option<usize>, surface: &mut dyn InfoSurface) {
        let index = match index {
            Some(i) if i >= self.funnel.len() => {
                log::warn!("[view] pick index {} out of range", i);
                None
            }
            other => other,
        };
        let Some(update) = self.selection.on_pick(index, &self.funnel) else {
            return;
        };
        if let Some(i) = update.highlight.cleared {
            self.layout.set_highlight(&mut self.scene, i, false);
        }
        if let Some(i) = update.highlight.set {
            self.layout.set_highlight(&mut self.scene, i, true);
        }
        self.state.selected_index = self.selection.selected();
        log::debug!("[view] selected={:?}", self.state.selected_index);
        surface.show(&update.payload);
        surface.set_hovering(self.state.selected_index.is_some());
    }
}
