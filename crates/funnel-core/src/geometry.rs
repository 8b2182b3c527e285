//! Tier solids: four-sided frustums stacked into the funnel pyramid.
//!
//! Each tier is a cylinder with four radial segments whose corners are turned
//! 45° so the flat faces line up with the world axes. Vertices are local to
//! the tier (centered on the origin, spanning `-height/2..height/2` in Y); the
//! layout transform places them in the world.

use crate::constants::{PYRAMID_BASE_SIZE, PYRAMID_HEIGHT};
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

const RADIAL_SEGMENTS: usize = 4;
const DEGENERATE_RADIUS: f32 = 1e-5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TierShape {
    pub top_radius: f32,
    pub bottom_radius: f32,
    pub height: f32,
}

impl TierShape {
    /// Shape of tier `index` out of `count`. Tier 0 is the widest.
    pub fn for_tier(index: usize, count: usize) -> Self {
        let n = count.max(1) as f32;
        let i = index as f32;
        Self {
            top_radius: PYRAMID_BASE_SIZE * ((n - i - 1.0) / n).max(0.0),
            bottom_radius: PYRAMID_BASE_SIZE * ((n - i) / n).max(0.0),
            height: PYRAMID_HEIGHT / n,
        }
    }

    /// Radius of a sphere around the local origin that encloses the solid.
    pub fn bounding_radius(&self) -> f32 {
        let r = self.top_radius.max(self.bottom_radius);
        (r * r + 0.25 * self.height * self.height).sqrt()
    }

    fn ring(&self, radius: f32, y: f32) -> [Vec3; RADIAL_SEGMENTS] {
        std::array::from_fn(|k| {
            let theta = k as f32 * FRAC_PI_2 + FRAC_PI_4;
            Vec3::new(radius * theta.sin(), y, radius * theta.cos())
        })
    }

    pub fn build_mesh(&self) -> TierMesh {
        let half = 0.5 * self.height;
        let top = self.ring(self.top_radius, half);
        let bottom = self.ring(self.bottom_radius, -half);
        let mut mesh = TierMesh::default();

        for k in 0..RADIAL_SEGMENTS {
            let k1 = (k + 1) % RADIAL_SEGMENTS;
            let quad = [bottom[k], bottom[k1], top[k1], top[k]];
            let mut normal = (quad[1] - quad[0]).cross(quad[3] - quad[0]);
            if normal.length_squared() <= f32::EPSILON {
                // Collapsed apex edge; fall back to the other diagonal pair.
                normal = (quad[2] - quad[1]).cross(quad[3] - quad[0]);
            }
            let mut normal = normal.normalize_or_zero();
            let outward = (quad[0] + quad[1]) * Vec3::new(1.0, 0.0, 1.0);
            if normal.dot(outward) < 0.0 {
                normal = -normal;
            }
            mesh.push_quad(quad, normal);
        }
        if self.top_radius > DEGENERATE_RADIUS {
            mesh.push_quad([top[0], top[1], top[2], top[3]], Vec3::Y);
        }
        if self.bottom_radius > DEGENERATE_RADIUS {
            mesh.push_quad([bottom[3], bottom[2], bottom[1], bottom[0]], Vec3::NEG_Y);
        }

        for k in 0..RADIAL_SEGMENTS {
            let k1 = (k + 1) % RADIAL_SEGMENTS;
            if self.top_radius > DEGENERATE_RADIUS {
                mesh.edges.push([top[k], top[k1]]);
            }
            if self.bottom_radius > DEGENERATE_RADIUS {
                mesh.edges.push([bottom[k], bottom[k1]]);
            }
            mesh.edges.push([bottom[k], top[k]]);
        }
        mesh
    }
}

/// Flat-shaded triangle soup plus the crease edges drawn as a wireframe.
#[derive(Clone, Debug, Default)]
pub struct TierMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub edges: Vec<[Vec3; 2]>,
}

impl TierMesh {
    fn push_quad(&mut self, quad: [Vec3; 4], normal: Vec3) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&quad);
        self.normals.extend_from_slice(&[normal; 4]);
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| {
            [
                self.positions[t[0] as usize],
                self.positions[t[1] as usize],
                self.positions[t[2] as usize],
            ]
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_tier_has_no_top_cap() {
        let mesh = TierShape::for_tier(4, 5).build_mesh();
        // four sides + bottom cap, two triangles each
        assert_eq!(mesh.triangle_count(), 10);
        assert_eq!(mesh.edges.len(), 8);
    }

    #[test]
    fn side_normals_point_away_from_axis() {
        let mesh = TierShape::for_tier(1, 5).build_mesh();
        for (p, n) in mesh.positions.iter().zip(&mesh.normals).take(16) {
            let radial = Vec3::new(p.x, 0.0, p.z);
            assert!(n.dot(radial) > 0.0);
        }
    }
}
