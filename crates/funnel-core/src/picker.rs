//! Pointer picking: which tier, if any, sits under a normalized pointer position.

use crate::state::{Camera, TierVisual};
use glam::{Vec2, Vec3, Vec4};
use smallvec::SmallVec;
use std::cmp::Ordering;

const RAY_EPSILON: f32 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierHit {
    pub index: usize,
    pub distance: f32,
    pub point: Vec3,
}

/// Compute a world-space ray from the camera eye through `ndc` (x right, y up,
/// both in \[-1, 1\]).
pub fn ray_from_ndc(ndc: Vec2, camera: &Camera) -> Ray {
    let inv = camera.view_projection().inverse();
    let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
    let p1: Vec3 = p_far.truncate() / p_far.w;
    Ray {
        origin: camera.eye,
        dir: (p1 - camera.eye).normalize_or_zero(),
    }
}

#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t = -b - sq;
    if t >= 0.0 {
        return Some(t);
    }
    // Origin inside the sphere: report the exit point.
    let t = -b + sq;
    (t >= 0.0).then_some(t)
}

/// Two-sided Möller–Trumbore ray/triangle test.
#[inline]
pub fn ray_triangle(ray: &Ray, tri: &[Vec3; 3]) -> Option<f32> {
    let e1 = tri[1] - tri[0];
    let e2 = tri[2] - tri[0];
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < RAY_EPSILON {
        return None;
    }
    let inv_det = 1.0 / det;
    let s = ray.origin - tri[0];
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = s.cross(e1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    (t > RAY_EPSILON).then_some(t)
}

/// Nearest hit of `ray` against a single tier's solid, if any.
pub fn intersect_tier(ray: &Ray, tier: &TierVisual) -> Option<f32> {
    let center = tier.transform.position;
    ray_sphere(ray.origin, ray.dir, center, tier.shape().bounding_radius())?;
    let model = tier.transform.matrix();
    tier.mesh()
        .triangles()
        .filter_map(|tri| {
            let world = tri.map(|p| model.transform_point3(p));
            ray_triangle(ray, &world)
        })
        .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
}

/// Every tier the ray passes through, nearest first. Equal distances keep
/// scan order, so the lower tier index wins a tie.
pub fn intersect_all(ray: &Ray, tiers: &[TierVisual]) -> SmallVec<[TierHit; 8]> {
    let mut hits: SmallVec<[TierHit; 8]> = tiers
        .iter()
        .enumerate()
        .filter_map(|(i, tier)| {
            intersect_tier(ray, tier).map(|t| TierHit {
                index: i,
                distance: t,
                point: ray.at(t),
            })
        })
        .collect();
    hits.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
    });
    hits
}

/// Index of the nearest tier under `ndc`, or `None` when the pointer misses
/// every tier. Reads state only.
pub fn pick(ndc: Vec2, camera: &Camera, tiers: &[TierVisual]) -> Option<usize> {
    if tiers.is_empty() {
        return None;
    }
    let ray = ray_from_ndc(ndc, camera);
    intersect_all(&ray, tiers).first().map(|h| h.index)
}
