//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - The lit pipeline and the static tetrahedra mesh
//! - Per-frame matrix and light uniforms

use std::sync::Arc;
use winit::window::Window;
use tetra_math::mat4::{self, Mat4};
use tetra_render::{
    context::RenderContext,
    FrameUniforms, LitPipeline, ModelUniforms, StaticMesh,
};
use crate::scene::{tetrahedra, Camera, Light, Scene};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// GPU context could not be created
    Context(String),
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Context(msg) => write!(f, "GPU context error: {}", msg),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<tetra_render::ContextError> for RenderError {
    fn from(e: tetra_render::ContextError) -> Self {
        RenderError::Context(e.to_string())
    }
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: LitPipeline,
    mesh: StaticMesh,
}

impl RenderSystem {
    /// Create render system for a window and upload the scene geometry
    pub fn new(window: Arc<Window>, vsync: bool, scene: &Scene) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;

        let mut pipeline = LitPipeline::new(
            &context.device,
            context.view_format,
            scene.objects.len(),
        );
        if !pipeline.shader_report().is_ok() || !pipeline.is_linked() {
            log::error!("Continuing with an unusable pipeline; frames will be blank");
        }
        log::debug!("{} model slots for {} objects", pipeline.slot_count(), scene.objects.len());

        // Ensure depth texture exists
        pipeline.ensure_depth_texture(
            &context.device,
            context.config.width,
            context.config.height,
        );

        let mesh = StaticMesh::upload(&context.device, "Tetrahedra Vertex Buffer", &tetrahedra::VERTICES);
        if let Some(last) = scene.objects.iter().map(|o| o.range.vertices().end).max() {
            if last > mesh.vertex_count() {
                log::warn!("Scene draws up to vertex {} but the mesh has {}", last, mesh.vertex_count());
            }
        }

        Ok(Self {
            context,
            pipeline,
            mesh,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.pipeline.ensure_depth_texture(
            &self.context.device,
            self.context.config.width,
            self.context.config.height,
        );
    }

    /// Reconfigure the surface after it was lost or outdated
    pub fn recover_surface(&mut self) {
        self.context.reconfigure();
    }

    /// Render a single frame at time `t` seconds
    pub fn render_frame(&mut self, scene: &Scene, t: f32) -> Result<(), RenderError> {
        // Camera and light are re-sent every frame
        let frame = frame_uniforms(&scene.camera, &scene.light, self.context.aspect_ratio());
        self.pipeline.update_frame(&self.context.queue, &frame);

        // Each object gets its own uniform slot so both draws see their own matrix
        for (slot, model) in scene.model_matrices(t).into_iter().enumerate() {
            self.pipeline
                .update_model(&self.context.queue, slot, &ModelUniforms::from_model(model));
        }

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output.texture.create_view(&wgpu::TextureViewDescriptor {
            format: Some(self.context.view_format),
            ..Default::default()
        });

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = &scene.clear_color;
        self.pipeline.render(
            &mut encoder,
            &view,
            self.mesh.buffer(),
            &scene.draw_ranges(),
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }
}

/// Projection for a camera, already remapped to wgpu's depth range
pub fn projection_matrix(camera: &Camera, aspect: f32) -> Mat4 {
    mat4::mul(
        mat4::OPENGL_TO_WGPU,
        mat4::perspective(camera.fov_y, aspect, camera.near, camera.far),
    )
}

/// Frame uniforms for the given camera, light and aspect ratio
pub fn frame_uniforms(camera: &Camera, light: &Light, aspect: f32) -> FrameUniforms {
    FrameUniforms {
        view_matrix: mat4::view_from_eye(camera.eye),
        projection_matrix: projection_matrix(camera, aspect),
        light_position: light.position,
        ambient_strength: light.ambient_strength,
        view_position: camera.eye,
        specular_strength: light.specular_strength,
        shininess: light.shininess,
        _padding: [0.0; 3],
    }
}
