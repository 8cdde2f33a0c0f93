//! Renderer: wgpu init + depth + the two scene passes (canyon, ship).
//! wgpu = 26.x, winit = 0.30.x

use std::num::NonZeroU64;
use std::sync::Arc;

use anyhow::{Context, Result};
use bytemuck::{Pod, Zeroable};
use wgpu::{
    util::DeviceExt,
    Backends, BindGroup, BindGroupLayoutDescriptor, BindGroupLayoutEntry,
    BindingType, BlendState, Buffer, BufferBindingType, BufferUsages, ColorTargetState,
    ColorWrites, CommandEncoderDescriptor, Device, DeviceDescriptor, Extent3d, Features,
    FragmentState, Instance, InstanceDescriptor, Limits, LoadOp, Operations, PipelineLayout,
    PipelineLayoutDescriptor, PowerPreference, PresentMode, Queue, RenderPassColorAttachment,
    RenderPassDescriptor, RenderPipeline, RenderPipelineDescriptor, ShaderModule,
    ShaderModuleDescriptor, ShaderSource, ShaderStages, StoreOp, Surface, SurfaceConfiguration,
    SurfaceError, TextureDescriptor, TextureDimension, TextureFormat, TextureUsages, TextureView,
    TextureViewDescriptor, VertexBufferLayout, VertexState, VertexStepMode,
};
use winit::{dpi::PhysicalSize, window::Window};

use corelib::state::SimContext;
use corelib::variant::SceneVariant;
use scene::{canyon, ship, MeshData, VertexLayout};

pub mod passes;

use passes::{scene_passes, DepthMode, PassDesc};

/// Canyon vertex: position only.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PosVertex {
    pub pos: [f32; 3],
}
impl PosVertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<PosVertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3],
    };
}

/// Hull vertex: position + per-face normal.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PosNormalVertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}
impl PosNormalVertex {
    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: std::mem::size_of::<PosNormalVertex>() as u64,
        step_mode: VertexStepMode::Vertex,
        attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3],
    };
}

/// Per-frame uniforms, shared by every pipeline (16-byte aligned to match
/// the WGSL `Globals` block).
#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct Globals {
    time: f32,
    aspect: f32,
    pointer: [f32; 2],
    ship_pos: [f32; 3],
    _pad0: f32,
    ship_rot: [f32; 3],
    _pad1: f32,
    gains: [f32; 4],
}

const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

/// One entry of the ordered pass list: pipeline + geometry.
struct DrawPass {
    desc: PassDesc,
    pipeline: RenderPipeline,
    vertex_buf: Buffer,
    vertex_count: u32,
}

pub struct GpuState {
    // Surface
    surface: Surface<'static>,
    surface_config: SurfaceConfiguration,

    // Device/queue
    device: Device,
    queue: Queue,

    // Uniforms
    globals_bg: BindGroup,
    globals_buf: Buffer,

    // Ordered scene passes (canyon, then ship)
    passes: Vec<DrawPass>,

    // Depth
    depth_view: TextureView,

    // Size cache
    width: u32,
    height: u32,
}

impl GpuState {
    /// Create GPU state bound to an Arc<Window>. Any failure here is a
    /// fatal startup condition; the frame loop must not start.
    pub async fn new(
        window: Arc<Window>,
        backends: Backends,
        variant: SceneVariant,
    ) -> Result<Self> {
        let PhysicalSize { width, height } = window.inner_size();
        let width = width.max(1);
        let height = height.max(1);

        // Instance & surface
        let instance = Instance::new(&InstanceDescriptor {
            backends,
            ..Default::default()
        });
        let surface: Surface<'static> = instance
            .create_surface(window.clone())
            .context("create_surface failed")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("No suitable GPU adapter")?;
        log::info!("Adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Kanjon3D Device"),
                required_features: Features::empty(),
                required_limits: Limits::downlevel_webgl2_defaults()
                    .using_resolution(adapter.limits()),
                memory_hints: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("request_device failed")?;

        // Surface format (prefer sRGB)
        let caps = surface.get_capabilities(&adapter);
        let surface_format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);

        // Configure surface
        let surface_config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        // Depth texture
        let depth_view = create_depth_view(&device, &surface_config);

        // ==== Globals BGL/BG ====
        let globals_bgl = device.create_bind_group_layout(&BindGroupLayoutDescriptor {
            label: Some("Globals BGL"),
            entries: &[BindGroupLayoutEntry {
                binding: 0,
                visibility: ShaderStages::VERTEX_FRAGMENT,
                ty: BindingType::Buffer {
                    ty: BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(
                        NonZeroU64::new(std::mem::size_of::<Globals>() as u64).unwrap(),
                    ),
                },
                count: None,
            }],
        });

        let globals_init = Globals::zeroed();
        let globals_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Globals UBO"),
            contents: bytemuck::bytes_of(&globals_init),
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Globals BG"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("Scene PipelineLayout"),
            bind_group_layouts: &[&globals_bgl],
            push_constant_ranges: &[],
        });

        // ==== Shaders ====
        let canyon_shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Canyon WGSL"),
            source: ShaderSource::Wgsl(include_str!("shaders/canyon.wgsl").into()),
        });
        let ship_shader = device.create_shader_module(ShaderModuleDescriptor {
            label: Some("Ship WGSL"),
            source: ShaderSource::Wgsl(
                if variant.has_flight_dynamics() {
                    include_str!("shaders/ship_flight.wgsl")
                } else {
                    include_str!("shaders/ship_fixed.wgsl")
                }
                .into(),
            ),
        });

        // ==== Geometry ====
        let canyon_mesh = canyon::build(canyon::SEGMENTS, canyon::LENGTH, canyon::WIDTH)?;
        let ship_mesh = if variant.has_flight_dynamics() {
            ship::build_hull()
        } else {
            ship::build_wedge()
        };
        let (canyon_vb, canyon_count) = upload_mesh(&device, "Canyon VB", &canyon_mesh)?;
        let (ship_vb, ship_count) = upload_mesh(&device, "Ship VB", &ship_mesh)?;

        // ==== Pipelines, one per scene pass ====
        let [canyon_pass, ship_pass] = scene_passes();
        let ship_vertex_layout = match ship_mesh.layout() {
            VertexLayout::Pos => PosVertex::LAYOUT,
            VertexLayout::PosNormal => PosNormalVertex::LAYOUT,
        };
        let passes = vec![
            DrawPass {
                desc: canyon_pass,
                pipeline: build_pipeline(
                    &device,
                    "Canyon Pipeline",
                    &pipeline_layout,
                    &canyon_shader,
                    PosVertex::LAYOUT,
                    surface_format,
                    canyon_pass.depth,
                ),
                vertex_buf: canyon_vb,
                vertex_count: canyon_count,
            },
            DrawPass {
                desc: ship_pass,
                pipeline: build_pipeline(
                    &device,
                    "Ship Pipeline",
                    &pipeline_layout,
                    &ship_shader,
                    ship_vertex_layout,
                    surface_format,
                    ship_pass.depth,
                ),
                vertex_buf: ship_vb,
                vertex_count: ship_count,
            },
        ];

        log::info!(
            "Renderer ready: variant={:?}, canyon={} verts, ship={} verts",
            variant,
            canyon_count,
            ship_count
        );

        Ok(Self {
            surface,
            surface_config,
            device,
            queue,
            globals_bg,
            globals_buf,
            passes,
            depth_view,
            width,
            height,
        })
    }

    /// Resize: reconfigure surface & recreate depth view.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width.max(1);
        self.height = height.max(1);
        self.surface_config.width = self.width;
        self.surface_config.height = self.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = create_depth_view(&self.device, &self.surface_config);
    }

    /// Render one frame: upload uniforms, clear, run the pass list in
    /// order.
    pub fn render(&mut self, ctx: &SimContext) -> Result<(), SurfaceError> {
        let globals = Globals {
            time: ctx.clock.time,
            aspect: self.width as f32 / self.height as f32,
            pointer: ctx.pointer.eased.to_array(),
            ship_pos: ctx.ship.position.to_array(),
            _pad0: 0.0,
            ship_rot: ctx.ship.rotation.to_array(),
            _pad1: 0.0,
            gains: ctx.variant.gains().to_array(),
        };
        self.queue
            .write_buffer(&self.globals_buf, 0, bytemuck::bytes_of(&globals));

        let frame = self.surface.get_current_texture()?;
        let view = frame.texture.create_view(&Default::default());

        let mut encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("SceneEncoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("ScenePass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(wgpu::Color {
                            r: 0.02,
                            g: 0.02,
                            b: 0.04,
                            a: 1.0,
                        }),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            for pass in &self.passes {
                rpass.set_pipeline(&pass.pipeline);
                rpass.set_bind_group(0, &self.globals_bg, &[]);
                rpass.set_vertex_buffer(0, pass.vertex_buf.slice(..));
                rpass.draw(0..pass.vertex_count, 0..1);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    pub fn is_surface_lost(err: &SurfaceError) -> bool {
        matches!(err, SurfaceError::Lost | SurfaceError::Outdated)
    }

    pub fn recreate_surface(&mut self) {
        self.resize(self.width, self.height);
    }

    /// Draw order and depth modes of the active pass list.
    pub fn pass_descs(&self) -> Vec<PassDesc> {
        self.passes.iter().map(|p| p.desc).collect()
    }
}

/// Upload a flat triangle-list float stream as a vertex buffer.
fn upload_mesh(device: &Device, label: &str, mesh: &MeshData) -> Result<(Buffer, u32)> {
    anyhow::ensure!(
        mesh.is_valid(),
        "mesh '{label}' has a malformed float stream ({} floats, layout {:?})",
        mesh.floats().len(),
        mesh.layout()
    );
    let buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(mesh.floats()),
        usage: BufferUsages::VERTEX,
    });
    Ok((buf, mesh.vertex_count() as u32))
}

fn build_pipeline(
    device: &Device,
    label: &str,
    layout: &PipelineLayout,
    shader: &ShaderModule,
    vertex_layout: VertexBufferLayout<'static>,
    format: TextureFormat,
    depth: DepthMode,
) -> RenderPipeline {
    device.create_render_pipeline(&RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(ColorTargetState {
                format,
                blend: Some(BlendState::REPLACE),
                write_mask: ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            // Wall winding is authored for the inside view; no culling.
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(depth.depth_stencil(DEPTH_FORMAT)),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

/// Create a depth texture view matching the surface config.
fn create_depth_view(device: &Device, sc: &SurfaceConfiguration) -> TextureView {
    let tex = device.create_texture(&TextureDescriptor {
        label: Some("DepthTex"),
        size: Extent3d {
            width: sc.width.max(1),
            height: sc.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn globals_block_matches_wgsl_layout() {
        // Field offsets must line up with the std140-style WGSL struct.
        assert_eq!(std::mem::size_of::<Globals>(), 64);
        assert_eq!(std::mem::offset_of!(Globals, pointer), 8);
        assert_eq!(std::mem::offset_of!(Globals, ship_pos), 16);
        assert_eq!(std::mem::offset_of!(Globals, ship_rot), 32);
        assert_eq!(std::mem::offset_of!(Globals, gains), 48);
    }

    #[test]
    fn vertex_strides_match_mesh_layouts() {
        assert_eq!(
            PosVertex::LAYOUT.array_stride as usize,
            VertexLayout::Pos.floats_per_vertex() * 4
        );
        assert_eq!(
            PosNormalVertex::LAYOUT.array_stride as usize,
            VertexLayout::PosNormal.floats_per_vertex() * 4
        );
    }
}
