//! Static vertex buffers

use wgpu::util::DeviceExt;

use crate::pipeline::Vertex;

/// A vertex buffer uploaded once and never modified
pub struct StaticMesh {
    buffer: wgpu::Buffer,
    vertex_count: u32,
}

impl StaticMesh {
    /// Upload `vertices` to a new `VERTEX` buffer
    pub fn upload(device: &wgpu::Device, label: &str, vertices: &[Vertex]) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        log::info!("Uploaded {} vertices ({} bytes)", vertices.len(), std::mem::size_of_val(vertices));

        Self {
            buffer,
            vertex_count: vertices.len() as u32,
        }
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }
}
