//! Lit render pipeline
//!
//! Draws ranges of a static vertex buffer with per-object model matrices and
//! a shared set of frame uniforms (camera, projection, one point light).

use wgpu::util::DeviceExt;

use super::shader::{compile_shader, create_pipeline_checked, ShaderReport};
use super::types::{DrawRange, FrameUniforms, ModelUniforms, Vertex};

/// Depth buffer format used by the pipeline
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Uniform buffer and bind group for one drawn object
struct ModelSlot {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

/// Render pipeline for lit, vertex-colored geometry
pub struct LitPipeline {
    /// The render pipeline
    pipeline: wgpu::RenderPipeline,
    /// Frame uniform buffer (group 0)
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    /// One slot per object (group 1)
    model_slots: Vec<ModelSlot>,
    /// Depth texture
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
    /// Compiler output for the shader pair
    shader_report: ShaderReport,
    linked: bool,
}

impl LitPipeline {
    /// Create the pipeline with `object_count` model slots
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        object_count: usize,
    ) -> Self {
        let frame_layout = uniform_layout(device, "Frame Bind Group Layout");
        let model_layout = uniform_layout(device, "Model Bind Group Layout");

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Lit Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &model_layout],
            push_constant_ranges: &[],
        });

        let (shader, shader_report) =
            compile_shader(device, "Lit", include_str!("../shaders/lit.wgsl"));

        let (pipeline, linked) = create_pipeline_checked(
            device,
            &wgpu::RenderPipelineDescriptor {
                label: Some("Lit Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Vertex::buffer_layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[Some(wgpu::ColorTargetState {
                        format: surface_format,
                        blend: Some(wgpu::BlendState::REPLACE),
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Face windings in the scene data are mixed
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            },
        );

        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::bytes_of(&FrameUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let model_slots = (0..object_count)
            .map(|i| {
                let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("Model Uniform Buffer {}", i)),
                    contents: bytemuck::bytes_of(&ModelUniforms::default()),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });
                let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&format!("Model Bind Group {}", i)),
                    layout: &model_layout,
                    entries: &[wgpu::BindGroupEntry {
                        binding: 0,
                        resource: buffer.as_entire_binding(),
                    }],
                });
                ModelSlot { buffer, bind_group }
            })
            .collect();

        Self {
            pipeline,
            frame_buffer,
            frame_bind_group,
            model_slots,
            depth_texture: None,
            depth_size: (0, 0),
            shader_report,
            linked,
        }
    }

    /// Compiler output for the shader pair
    pub fn shader_report(&self) -> &ShaderReport {
        &self.shader_report
    }

    /// Whether the pipeline linked without validation errors
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Number of per-object uniform slots
    pub fn slot_count(&self) -> usize {
        self.model_slots.len()
    }

    /// Update frame uniforms
    pub fn update_frame(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Update the uniforms of one object slot
    ///
    /// Out-of-range slots are ignored with a warning.
    pub fn update_model(&self, queue: &wgpu::Queue, slot: usize, uniforms: &ModelUniforms) {
        match self.model_slots.get(slot) {
            Some(s) => queue.write_buffer(&s.buffer, 0, bytemuck::bytes_of(uniforms)),
            None => log::warn!(
                "Model slot {} out of range ({} slots)",
                slot,
                self.model_slots.len()
            ),
        }
    }

    /// Ensure depth texture exists and is the right size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let (width, height) = (width.max(1), height.max(1));
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });

            self.depth_texture =
                Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
        }
    }

    /// Record the render pass
    ///
    /// `draws[i]` is drawn with model slot `i`. Draws without a slot are skipped.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        vertex_buffer: &wgpu::Buffer,
        draws: &[DrawRange],
        clear_color: wgpu::Color,
    ) {
        let Some(depth_view) = self.depth_texture.as_ref() else {
            log::warn!("Depth texture not created, skipping frame");
            return;
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Lit Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));

        for (slot, range) in self.model_slots.iter().zip(draws) {
            render_pass.set_bind_group(1, &slot.bind_group, &[]);
            render_pass.draw(range.vertices(), 0..1);
        }
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
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
    })
}
