//! Scene-side state types shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs. The web frontend
//! reads them each frame to build camera matrices and per-tier instance data.

use crate::constants::{
    CAMERA_FOVY_DEG, CAMERA_ZFAR, CAMERA_ZNEAR, DEFAULT_CAMERA_EYE, DEFAULT_CAMERA_TARGET,
    TIER_EMISSIVE_HIGHLIGHT, TIER_OPACITY_HIGHLIGHT, TIER_OPACITY_IDLE,
};
use crate::funnel::Funnel;
use crate::geometry::{TierMesh, TierShape};
use crate::layout::{target_transform, ViewMode};
use crate::tween::Lerp;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Camera position plus look-at target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: DEFAULT_CAMERA_EYE,
            target: DEFAULT_CAMERA_TARGET,
        }
    }
}

impl Lerp for CameraPose {
    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            eye: self.eye.lerp(other.eye, t),
            target: self.target.lerp(other.target, t),
        }
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(pose: CameraPose, aspect: f32) -> Self {
        Self {
            eye: pose.eye,
            target: pose.target,
            up: Vec3::Y,
            aspect: sanitize_aspect(aspect),
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye,
            target: self.target,
        }
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.eye = pose.eye;
        self.target = pose.target;
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = sanitize_aspect(width as f32 / height.max(1) as f32);
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

fn sanitize_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}

/// World placement of a tier: position plus XYZ Euler rotation in radians.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }

    /// Largest per-component distance to `other`, for both position and rotation.
    pub fn max_abs_diff(&self, other: &Transform) -> f32 {
        (self.position - other.position)
            .abs()
            .max_element()
            .max((self.rotation - other.rotation).abs().max_element())
    }
}

impl Lerp for Transform {
    fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            rotation: self.rotation.lerp(other.rotation, t),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TierVisual {
    stage: usize,
    shape: TierShape,
    mesh: TierMesh,
    pub transform: Transform,
    pub highlighted: bool,
    /// Highlight fade amount in \[0, 1\]; animated by the layout engine.
    pub emphasis: f32,
}

impl TierVisual {
    pub fn new(stage: usize, count: usize, transform: Transform) -> Self {
        let shape = TierShape::for_tier(stage, count);
        Self {
            stage,
            shape,
            mesh: shape.build_mesh(),
            transform,
            highlighted: false,
            emphasis: 0.0,
        }
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn shape(&self) -> &TierShape {
        &self.shape
    }

    pub fn mesh(&self) -> &TierMesh {
        &self.mesh
    }

    pub fn opacity(&self) -> f32 {
        Lerp::lerp(TIER_OPACITY_IDLE, TIER_OPACITY_HIGHLIGHT, self.emphasis)
    }

    pub fn emissive(&self) -> f32 {
        TIER_EMISSIVE_HIGHLIGHT * self.emphasis
    }
}

/// Everything the renderer and picker read: tiers plus camera.
#[derive(Clone, Debug)]
pub struct SceneState {
    pub tiers: Vec<TierVisual>,
    pub camera: Camera,
}

impl SceneState {
    /// Tiers start at their pyramid placement, camera at the default pose.
    pub fn new(funnel: &Funnel, aspect: f32) -> Self {
        let n = funnel.len();
        let tiers = (0..n)
            .map(|i| TierVisual::new(i, n, target_transform(ViewMode::Pyramid, i, n)))
            .collect();
        Self {
            tiers,
            camera: Camera::new(CameraPose::default(), aspect),
        }
    }

    pub fn highlighted_count(&self) -> usize {
        self.tiers.iter().filter(|t| t.highlighted).count()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub auto_rotate: bool,
    pub selected_index: Option<usize>,
    pub camera_pose: CameraPose,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            mode: ViewMode::Pyramid,
            auto_rotate: true,
            selected_index: None,
            camera_pose: CameraPose::default(),
        }
    }
}
