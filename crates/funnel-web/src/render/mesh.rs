use crate::constants::{FLOOR_SIZE, FLOOR_Y, GRID_DIVISIONS, GRID_Y};
use funnel_core::geometry::TierMesh;
use glam::Vec3;
use std::cmp::Ordering;
use std::ops::Range;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Vertex {
    pub(crate) position: [f32; 3],
    pub(crate) normal: [f32; 3],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }
}

/// Every static vertex the scene draws, in one buffer. Tier vertices stay in
/// tier-local space; the per-instance model matrix places them.
#[derive(Default, Debug)]
pub(crate) struct SceneMesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) floor: Range<u32>,
    pub(crate) grid: Range<u32>,
    pub(crate) tier_faces: Vec<Range<u32>>,
    pub(crate) tier_edges: Vec<Range<u32>>,
}

impl SceneMesh {
    fn push(&mut self, verts: impl IntoIterator<Item = Vertex>) -> Range<u32> {
        let start = self.vertices.len() as u32;
        self.vertices.extend(verts);
        start..self.vertices.len() as u32
    }
}

pub(crate) fn build_scene_mesh<'m>(tiers: impl IntoIterator<Item = &'m TierMesh>) -> SceneMesh {
    let mut scene = SceneMesh::default();
    scene.floor = scene.push(floor_quad());
    scene.grid = scene.push(grid_lines());
    for mesh in tiers {
        let faces = mesh
            .indices
            .iter()
            .map(|&i| Vertex::new(mesh.positions[i as usize], mesh.normals[i as usize]))
            .collect::<Vec<_>>();
        let faces = scene.push(faces);
        let edges = scene.push(
            mesh.edges
                .iter()
                .flat_map(|[a, b]| [Vertex::new(*a, Vec3::ZERO), Vertex::new(*b, Vec3::ZERO)]),
        );
        scene.tier_faces.push(faces);
        scene.tier_edges.push(edges);
    }
    scene
}

fn floor_quad() -> [Vertex; 6] {
    let h = FLOOR_SIZE / 2.0;
    let corner = |x: f32, z: f32| Vertex::new(Vec3::new(x, FLOOR_Y, z), Vec3::Y);
    [
        corner(-h, -h),
        corner(-h, h),
        corner(h, h),
        corner(-h, -h),
        corner(h, h),
        corner(h, -h),
    ]
}

/// Line-list vertices for a square grid centered on the origin.
fn grid_lines() -> Vec<Vertex> {
    let h = FLOOR_SIZE / 2.0;
    let step = FLOOR_SIZE / GRID_DIVISIONS as f32;
    let mut out = Vec::with_capacity((GRID_DIVISIONS + 1) * 4);
    for k in 0..=GRID_DIVISIONS {
        let t = -h + k as f32 * step;
        out.push(Vertex::new(Vec3::new(t, GRID_Y, -h), Vec3::ZERO));
        out.push(Vertex::new(Vec3::new(t, GRID_Y, h), Vec3::ZERO));
        out.push(Vertex::new(Vec3::new(-h, GRID_Y, t), Vec3::ZERO));
        out.push(Vertex::new(Vec3::new(h, GRID_Y, t), Vec3::ZERO));
    }
    out
}

/// Draw order for translucent solids: farthest from the eye first.
pub(crate) fn back_to_front(eye: Vec3, centers: &[Vec3]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..centers.len()).collect();
    order.sort_by(|&a, &b| {
        let da = centers[a].distance_squared(eye);
        let db = centers[b].distance_squared(eye);
        db.partial_cmp(&da).unwrap_or(Ordering::Equal)
    });
    order
}
