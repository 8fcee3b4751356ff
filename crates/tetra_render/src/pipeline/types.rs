//! GPU-compatible data types for the lit pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use tetra_math::mat4::{self, Mat4};

/// An interleaved vertex: position, color, normal
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position
    pub position: [f32; 3],
    /// RGB color
    pub color: [f32; 3],
    /// Surface normal (not required to be unit length)
    pub normal: [f32; 3],
}

impl Vertex {
    pub const fn new(position: [f32; 3], color: [f32; 3], normal: [f32; 3]) -> Self {
        Self {
            position,
            color,
            normal,
        }
    }

    /// Vertex buffer layout matching `lit.wgsl` locations 0..=2
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x3
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Per-frame uniforms shared by every draw
/// Layout: 176 bytes total (must match lit.wgsl FrameUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    /// View matrix (64 bytes)
    pub view_matrix: Mat4,
    /// Projection matrix, already in wgpu depth range (64 bytes)
    pub projection_matrix: Mat4,
    /// World-space light position + ambient strength (16 bytes)
    pub light_position: [f32; 3],
    pub ambient_strength: f32,
    /// World-space eye position + specular strength (16 bytes)
    pub view_position: [f32; 3],
    pub specular_strength: f32,
    /// Specular exponent + padding (16 bytes)
    pub shininess: f32,
    pub _padding: [f32; 3],
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self {
            view_matrix: mat4::IDENTITY,
            projection_matrix: mat4::IDENTITY,
            light_position: [0.0, 3.0, 2.0],
            ambient_strength: 0.3,
            view_position: [0.0, 1.0, 20.0],
            specular_strength: 0.5,
            shininess: 32.0,
            _padding: [0.0; 3],
        }
    }
}

/// Per-object uniforms
/// Layout: 128 bytes total (must match lit.wgsl ModelUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ModelUniforms {
    /// Object-to-world transform
    pub model_matrix: Mat4,
    /// Inverse-transpose of the model's 3x3 block, padded to 4x4
    pub normal_matrix: Mat4,
}

impl ModelUniforms {
    /// Build uniforms for a model matrix, deriving its normal matrix.
    ///
    /// A singular model falls back to its linear part so shading degrades
    /// instead of producing NaNs.
    pub fn from_model(model_matrix: Mat4) -> Self {
        let normal_matrix = mat4::normal_matrix(model_matrix).unwrap_or_else(|| {
            log::warn!("Singular model matrix, using its linear part for normals");
            mat4::linear_part(model_matrix)
        });
        Self {
            model_matrix,
            normal_matrix,
        }
    }
}

impl Default for ModelUniforms {
    fn default() -> Self {
        Self {
            model_matrix: mat4::IDENTITY,
            normal_matrix: mat4::IDENTITY,
        }
    }
}

/// A contiguous range of vertices drawn as a triangle list
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawRange {
    pub first: u32,
    pub count: u32,
}

impl DrawRange {
    pub const fn new(first: u32, count: u32) -> Self {
        Self { first, count }
    }

    /// Vertex range for `RenderPass::draw`
    pub fn vertices(&self) -> std::ops::Range<u32> {
        self.first..self.first + self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn test_vertex_size() {
        // 9 floats = 36 bytes
        assert_eq!(size_of::<Vertex>(), 36);
    }

    #[test]
    fn test_vertex_layout_offsets() {
        let layout = Vertex::buffer_layout();
        assert_eq!(layout.array_stride, 36);
        let offsets: Vec<_> = layout.attributes.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 12, 24]);
        let locations: Vec<_> = layout.attributes.iter().map(|a| a.shader_location).collect();
        assert_eq!(locations, vec![0, 1, 2]);
    }

    #[test]
    fn test_frame_uniforms_size() {
        // 2 matrices (128) + 3 vec4-sized rows (48) = 176 bytes
        assert_eq!(size_of::<FrameUniforms>(), 176);
        assert_eq!(size_of::<FrameUniforms>() % 16, 0);
    }

    #[test]
    fn test_model_uniforms_size() {
        assert_eq!(size_of::<ModelUniforms>(), 128);
    }

    #[test]
    fn test_alignment() {
        assert_eq!(std::mem::align_of::<Vertex>(), 4);
        assert_eq!(std::mem::align_of::<FrameUniforms>(), 4);
        assert_eq!(std::mem::align_of::<ModelUniforms>(), 4);
    }

    #[test]
    fn test_model_uniforms_normal_matrix() {
        let model = mat4::mul(mat4::translation(0.0, 0.0, -5.0), mat4::rotation_y(0.5));
        let uniforms = ModelUniforms::from_model(model);
        assert_eq!(uniforms.model_matrix, model);
        // Rigid transform: normal matrix is the rotation
        let rot = mat4::rotation_y(0.5);
        for c in 0..4 {
            for r in 0..4 {
                assert!((uniforms.normal_matrix[c][r] - rot[c][r]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_model_uniforms_singular_fallback() {
        let mut model = mat4::IDENTITY;
        model[0][0] = 0.0;
        let uniforms = ModelUniforms::from_model(model);
        assert_eq!(uniforms.normal_matrix[0][0], 0.0);
        assert_eq!(uniforms.normal_matrix[1][1], 1.0);
    }

    #[test]
    fn test_draw_range_vertices() {
        let range = DrawRange::new(12, 12);
        assert_eq!(range.vertices(), 12..24);
    }
}
