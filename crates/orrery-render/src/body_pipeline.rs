//! Instanced pipelines for every sphere in the scene.
//!
//! One shader, three pipeline variants that differ only in blending and
//! depth writes. Back faces are not culled: the ring is a flattened sphere
//! and must show both sides.

use std::num::NonZeroU64;

use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use orrery_scene::{DrawCommand, RenderPassKind};
use wgpu::util::DeviceExt;

use crate::buffer::BodyVertex;
use crate::depth::DepthBuffer;

/// Library name of the body shader.
pub const BODY_SHADER_NAME: &str = "body";

/// Embedded WGSL for [`BodyPipeline`].
pub const BODY_SHADER_SOURCE: &str = include_str!("shaders/body.wgsl");

/// Per-frame values shared by every draw.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GlobalsUniform {
    pub view_proj: [[f32; 4]; 4],
    /// Scene time in seconds.
    pub time: f32,
    pub _padding: [f32; 3],
}

static_assertions::assert_eq_size!(GlobalsUniform, [u8; 80]);

impl GlobalsUniform {
    pub fn new(view_proj: Mat4, time: f32) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            time,
            _padding: [0.0; 3],
        }
    }
}

/// Per-instance vertex data, one per [`DrawCommand`].
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// [`SurfaceKind`](orrery_scene::SurfaceKind) selector.
    pub surface: u32,
    pub _padding: [u32; 3],
}

static_assertions::assert_eq_size!(BodyInstance, [u8; 160]);

impl BodyInstance {
    const ATTRIBUTES: [wgpu::VertexAttribute; 10] = wgpu::vertex_attr_array![
        2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
        6 => Float32x4, 7 => Float32x4, 8 => Float32x4, 9 => Float32x4,
        10 => Float32x4,
        11 => Uint32,
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyInstance>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    pub fn from_command(command: &DrawCommand) -> Self {
        Self {
            model: command.model.to_cols_array_2d(),
            normal_matrix: command.normal_matrix().to_cols_array_2d(),
            color: command.color.to_array(),
            surface: command.surface.shader_id(),
            _padding: [0; 3],
        }
    }
}

/// Uniform buffer and bind group for [`GlobalsUniform`].
pub struct GlobalsBinding {
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
}

impl GlobalsBinding {
    pub fn new(device: &wgpu::Device, layout: &wgpu::BindGroupLayout) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals-uniform"),
            contents: bytemuck::bytes_of(&GlobalsUniform::new(Mat4::IDENTITY, 0.0)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals-bind-group"),
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });
        Self { buffer, bind_group }
    }

    pub fn update(&self, queue: &wgpu::Queue, uniform: &GlobalsUniform) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(uniform));
    }
}

/// The three body pipelines and their shared globals layout (group 0).
pub struct BodyPipeline {
    pub globals_layout: wgpu::BindGroupLayout,
    opaque: wgpu::RenderPipeline,
    translucent: wgpu::RenderPipeline,
    glow: wgpu::RenderPipeline,
}

impl BodyPipeline {
    pub fn new(
        device: &wgpu::Device,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let globals_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals-bind-group-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(
                        std::mem::size_of::<GlobalsUniform>() as u64
                    ),
                },
                count: None,
            }],
        });

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("body-pipeline-layout"),
            bind_group_layouts: &[&globals_layout],
            immediate_size: 0,
        });

        let build = |pass: RenderPassKind| {
            let (label, blend, depth_write) = variant(pass);
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[BodyVertex::layout(), BodyInstance::layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: Some(DepthBuffer::stencil_state(depth_write)),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                multiview_mask: None,
                cache: None,
            })
        };

        Self {
            opaque: build(RenderPassKind::Opaque),
            translucent: build(RenderPassKind::Translucent),
            glow: build(RenderPassKind::Glow),
            globals_layout,
        }
    }

    pub fn pipeline(&self, pass: RenderPassKind) -> &wgpu::RenderPipeline {
        match pass {
            RenderPassKind::Opaque => &self.opaque,
            RenderPassKind::Translucent => &self.translucent,
            RenderPassKind::Glow => &self.glow,
        }
    }
}

/// Label, blend state and depth-write flag for a pass.
fn variant(pass: RenderPassKind) -> (&'static str, Option<wgpu::BlendState>, bool) {
    match pass {
        RenderPassKind::Opaque => ("body-opaque-pipeline", None, true),
        RenderPassKind::Translucent => (
            "body-translucent-pipeline",
            Some(wgpu::BlendState::ALPHA_BLENDING),
            true,
        ),
        RenderPassKind::Glow => (
            "body-glow-pipeline",
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        ),
    }
}
