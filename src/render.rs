use crate::constants::CLEAR_COLOR;
use artifact_core::constants::{MODEL_COLOR, RING_SEGMENTS};
use artifact_core::geometry::{model_matrix, AnnulusTemplate};
use artifact_core::{Camera, FrameOutput, MeshAsset};
use glam::Mat4;
use web_sys as web;
use wgpu::util::DeviceExt;

mod bands;
mod helpers;
use bands::{band_instances, instance_layout, template_layout, BandInstance};
use helpers::{create_depth_view, make_scene_pipeline, uniform_layout_entry, PipelineSpec};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct Globals {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    mesh_color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct MeshVertex {
    position: [f32; 3],
    normal: [f32; 3],
}

const MESH_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

struct MeshBuffers {
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    model: Mat4,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    mesh_pipeline: wgpu::RenderPipeline,
    band_pipeline: wgpu::RenderPipeline,

    mesh: Option<MeshBuffers>,
    template_vertices: wgpu::Buffer,
    template_indices: wgpu::Buffer,
    template_index_count: u32,
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: &'a web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

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
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
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
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(artifact_core::SCENE_WGSL.into()),
        });
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[uniform_layout_entry(0)],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });

        let mesh_buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRS,
        }];
        let mesh_pipeline = make_scene_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineSpec {
                label: "mesh_pipeline",
                vs_entry: "vs_mesh",
                fs_entry: "fs_mesh",
                buffers: &mesh_buffers,
                blend: None,
                depth_write: true,
                cull_mode: None,
            },
        );
        let band_buffers = [template_layout(), instance_layout()];
        let band_pipeline = make_scene_pipeline(
            &device,
            &pipeline_layout,
            &shader,
            format,
            PipelineSpec {
                label: "band_pipeline",
                vs_entry: "vs_band",
                fs_entry: "fs_band",
                buffers: &band_buffers,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                depth_write: false,
                cull_mode: None,
            },
        );

        let template = AnnulusTemplate::new(RING_SEGMENTS);
        let template_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("annulus_vertices"),
            contents: bytemuck::cast_slice(&template.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let template_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("annulus_indices"),
            contents: bytemuck::cast_slice(&template.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let instance_capacity = 32;
        let instance_buffer = create_instance_buffer(&device, instance_capacity);

        log::info!(
            "[gpu] ready {}x{} format={:?} annulus_tris={}",
            width,
            height,
            format,
            template.triangle_count()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            globals_buffer,
            globals_bind_group,
            mesh_pipeline,
            band_pipeline,
            mesh: None,
            template_vertices,
            template_indices,
            template_index_count: template.indices.len() as u32,
            instance_buffer,
            instance_capacity,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
        })
    }

    /// Upload the artifact mesh with its fitted scale.
    pub fn set_mesh(&mut self, mesh: &MeshAsset, scale: f32) {
        let vertices: Vec<MeshVertex> = mesh
            .positions()
            .iter()
            .zip(mesh.normals())
            .map(|(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect();
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("mesh_vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        self.mesh = Some(MeshBuffers {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            model: model_matrix(scale),
        });
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

    pub fn reconfigure(&mut self) {
        self.config.width = self.width.max(1);
        self.config.height = self.height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, self.config.width, self.config.height);
    }

    pub fn render(&mut self, camera: &Camera, out: &FrameOutput) -> Result<(), wgpu::SurfaceError> {
        let model = self.mesh.as_ref().map_or(Mat4::IDENTITY, |m| m.model);
        let globals = Globals {
            view_proj: camera.view_proj().to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            camera_pos: camera.eye.extend(1.0).to_array(),
            mesh_color: [MODEL_COLOR[0], MODEL_COLOR[1], MODEL_COLOR[2], 1.0],
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let instances = band_instances(out);
        if instances.len() > self.instance_capacity {
            self.instance_capacity = instances.len().next_power_of_two();
            self.instance_buffer = create_instance_buffer(&self.device, self.instance_capacity);
        }
        self.queue
            .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&instances));

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

            if let Some(mesh) = &self.mesh {
                rpass.set_pipeline(&self.mesh_pipeline);
                rpass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                rpass.draw(0..mesh.vertex_count, 0..1);
            }

            rpass.set_pipeline(&self.band_pipeline);
            rpass.set_vertex_buffer(0, self.template_vertices.slice(..));
            rpass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            rpass.set_index_buffer(self.template_indices.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..self.template_index_count, 0, 0..instances.len() as u32);
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("band_instances"),
        size: (capacity * std::mem::size_of::<BandInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}
