//! Damped orbiting of the camera eye around its look-at target.

use crate::constants::{
    AUTO_ROTATE_SPEED, ORBIT_DAMPING, ORBIT_MAX_DISTANCE, ORBIT_MAX_POLAR, ORBIT_MIN_DISTANCE,
    ORBIT_MIN_POLAR,
};
use crate::state::CameraPose;
use glam::Vec3;
use std::f32::consts::TAU;

const SETTLE_EPSILON: f32 = 1e-5;

#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub damping: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar: f32,
    pub max_polar: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            auto_rotate_speed: AUTO_ROTATE_SPEED,
            damping: ORBIT_DAMPING,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            min_polar: ORBIT_MIN_POLAR,
            max_polar: ORBIT_MAX_POLAR,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_scale: 1.0,
        }
    }
}

impl OrbitControls {
    pub fn new(auto_rotate: bool) -> Self {
        Self {
            auto_rotate,
            ..Self::default()
        }
    }

    /// Queue a user rotation in radians, signed like a pointer drag: positive
    /// values follow a rightward / downward drag.
    pub fn rotate(&mut self, azimuth: f32, polar: f32) {
        self.pending_azimuth -= azimuth;
        self.pending_polar -= polar;
    }

    /// Queue a dolly; `scale < 1` moves the eye closer.
    pub fn dolly(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.pending_scale *= scale;
        }
    }

    /// Drop any queued user motion.
    pub fn cancel(&mut self) {
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_scale = 1.0;
    }

    pub fn is_settled(&self) -> bool {
        self.pending_azimuth.abs() < SETTLE_EPSILON
            && self.pending_polar.abs() < SETTLE_EPSILON
            && (self.pending_scale - 1.0).abs() < SETTLE_EPSILON
    }

    pub fn auto_rotate_angle(&self, dt: f32) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed * dt.max(0.0)
    }

    /// Apply auto-rotation, damped user motion and the distance/polar limits.
    /// Returns true when the eye moved.
    pub fn update(&mut self, pose: &mut CameraPose, dt: f32) -> bool {
        if !self.auto_rotate && self.is_settled() {
            return false;
        }
        let offset = pose.eye - pose.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        if self.auto_rotate {
            theta -= self.auto_rotate_angle(dt);
        }
        theta += self.pending_azimuth * self.damping;
        phi += self.pending_polar * self.damping;
        phi = phi.clamp(self.min_polar, self.max_polar);
        let radius = (radius * self.pending_scale).clamp(self.min_distance, self.max_distance);

        self.pending_azimuth *= 1.0 - self.damping;
        self.pending_polar *= 1.0 - self.damping;
        self.pending_scale = 1.0;
        if self.is_settled() {
            self.cancel();
        }

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        let eye = pose.target + new_offset;
        let moved = (eye - pose.eye).length_squared() > SETTLE_EPSILON * SETTLE_EPSILON;
        pose.eye = eye;
        moved
    }
}
