use crate::constants::{
    AMBIENT_LIGHT, CLEAR_COLOR, EDGE_OPACITY, FILL_LIGHT_DIR, FILL_LIGHT_INTENSITY, FLOOR_COLOR,
    FLOOR_OPACITY, GRID_COLOR, KEY_LIGHT_DIR, KEY_LIGHT_INTENSITY, RIM_LIGHT_DIR,
    RIM_LIGHT_INTENSITY, TIER_COLOR,
};
use funnel_core::SceneState;
use glam::{Mat4, Vec3};
use web_sys as web;

mod helpers;
pub(crate) mod mesh;

use helpers::PipelineSpec;
use mesh::SceneMesh;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    key_light: [f32; 4],
    fill_light: [f32; 4],
    rim_light: [f32; 4],
    ambient: [f32; 4],
}

/// Per-draw instance data: model matrix columns, rgba and emissive.
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstanceRaw {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

impl InstanceRaw {
    fn new(model: Mat4, rgb: [f32; 3], alpha: f32, emissive: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [rgb[0], rgb[1], rgb[2], alpha],
            params: [emissive, 0.0, 0.0, 0.0],
        }
    }
}

fn light(dir: [f32; 3], intensity: f32) -> [f32; 4] {
    let d = Vec3::from_array(dir).normalize_or_zero();
    [d.x, d.y, d.z, intensity]
}

// Instance slots: floor, grid, then one glass and one edge entry per tier.
const FLOOR_SLOT: u32 = 0;
const GRID_SLOT: u32 = 1;
const FIRST_TIER_SLOT: u32 = 2;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    floor_pipeline: wgpu::RenderPipeline,
    glass_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    instance_buffer: wgpu::Buffer,
    mesh: SceneMesh,
    instances: Vec<InstanceRaw>,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement, scene: &SceneState) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let (_, depth_view) = helpers::create_depth_texture(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(SCENE_WGSL.into()),
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });

        let floor_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            PipelineSpec {
                label: "floor_pipeline",
                topology: wgpu::PrimitiveTopology::TriangleList,
                frag_entry: "fs_lit",
                depth_write: true,
            },
        );
        // Translucent glass is depth tested but never occludes what lies behind it.
        let glass_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            PipelineSpec {
                label: "glass_pipeline",
                topology: wgpu::PrimitiveTopology::TriangleList,
                frag_entry: "fs_lit",
                depth_write: false,
            },
        );
        let line_pipeline = helpers::make_scene_pipeline(
            &device,
            &layout,
            &shader,
            format,
            PipelineSpec {
                label: "line_pipeline",
                topology: wgpu::PrimitiveTopology::LineList,
                frag_entry: "fs_flat",
                depth_write: false,
            },
        );

        let mesh = mesh::build_scene_mesh(scene.tiers.iter().map(|t| t.mesh()));
        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_vertices"),
            size: (std::mem::size_of_val(mesh.vertices.as_slice()) as wgpu::BufferAddress).max(16),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&vertex_buffer, 0, bytemuck::cast_slice(&mesh.vertices));
        let slots = FIRST_TIER_SLOT as usize + 2 * scene.tiers.len();
        let instance_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("instances"),
            size: (slots * std::mem::size_of::<InstanceRaw>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        log::info!(
            "[gpu] {}x{} format={:?} vertices={} tiers={}",
            width,
            height,
            format,
            mesh.vertices.len(),
            scene.tiers.len()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            floor_pipeline,
            glass_pipeline,
            line_pipeline,
            globals_buffer,
            globals_bind_group,
            vertex_buffer,
            instance_buffer,
            mesh,
            instances: Vec::with_capacity(slots),
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: CLEAR_COLOR[3],
            },
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.reconfigure();
        }
    }

    /// Re-apply the surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.config.width = self.width;
        self.config.height = self.height;
        self.surface.configure(&self.device, &self.config);
        let (_, depth_view) = helpers::create_depth_texture(&self.device, self.width, self.height);
        self.depth_view = depth_view;
    }

    fn write_globals(&self, scene: &SceneState) {
        let eye = scene.camera.eye;
        let globals = Globals {
            view_proj: scene.camera.view_projection().to_cols_array_2d(),
            eye: [eye.x, eye.y, eye.z, 1.0],
            key_light: light(KEY_LIGHT_DIR, KEY_LIGHT_INTENSITY),
            fill_light: light(FILL_LIGHT_DIR, FILL_LIGHT_INTENSITY),
            rim_light: light(RIM_LIGHT_DIR, RIM_LIGHT_INTENSITY),
            ambient: [AMBIENT_LIGHT, 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    /// Fill instance slots; tier glass and edge slots follow `order`.
    fn write_instances(&mut self, scene: &SceneState, order: &[usize]) {
        self.instances.clear();
        self.instances.push(InstanceRaw::new(
            Mat4::IDENTITY,
            FLOOR_COLOR,
            FLOOR_OPACITY,
            0.0,
        ));
        self.instances
            .push(InstanceRaw::new(Mat4::IDENTITY, GRID_COLOR, 1.0, 0.0));
        for &i in order {
            let tier = &scene.tiers[i];
            self.instances.push(InstanceRaw::new(
                tier.transform.matrix(),
                TIER_COLOR,
                tier.opacity(),
                tier.emissive(),
            ));
        }
        for &i in order {
            let tier = &scene.tiers[i];
            self.instances.push(InstanceRaw::new(
                tier.transform.matrix(),
                TIER_COLOR,
                EDGE_OPACITY,
                0.0,
            ));
        }
        self.queue.write_buffer(
            &self.instance_buffer,
            0,
            bytemuck::cast_slice(&self.instances),
        );
    }

    pub fn render(&mut self, scene: &SceneState) -> Result<(), wgpu::SurfaceError> {
        let n = scene.tiers.len().min(self.mesh.tier_faces.len());
        let centers: Vec<Vec3> = scene.tiers[..n]
            .iter()
            .map(|t| t.transform.position)
            .collect();
        let order = mesh::back_to_front(scene.camera.eye, &centers);
        self.write_globals(scene);
        self.write_instances(scene, &order);

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));

            rpass.set_pipeline(&self.floor_pipeline);
            rpass.draw(self.mesh.floor.clone(), FLOOR_SLOT..FLOOR_SLOT + 1);

            rpass.set_pipeline(&self.line_pipeline);
            rpass.draw(self.mesh.grid.clone(), GRID_SLOT..GRID_SLOT + 1);

            rpass.set_pipeline(&self.glass_pipeline);
            for (k, &i) in order.iter().enumerate() {
                let slot = FIRST_TIER_SLOT + k as u32;
                rpass.draw(self.mesh.tier_faces[i].clone(), slot..slot + 1);
            }

            rpass.set_pipeline(&self.line_pipeline);
            for (k, &i) in order.iter().enumerate() {
                let slot = FIRST_TIER_SLOT + (n + k) as u32;
                rpass.draw(self.mesh.tier_edges[i].clone(), slot..slot + 1);
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
