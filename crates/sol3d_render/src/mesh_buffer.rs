//! Meshes uploaded to the GPU

use wgpu::util::DeviceExt;

use sol3d_core::Mesh;

use crate::pipeline::GpuVertex;

/// A vertex buffer holding one non-indexed triangle list
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub vertex_count: u32,
}

impl GpuMesh {
    /// Upload a CPU mesh
    pub fn new(device: &wgpu::Device, mesh: &Mesh, label: &str) -> Self {
        let vertices = vertices_for(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
        }
    }
}

/// Convert mesh vertices to the GPU layout
pub fn vertices_for(mesh: &Mesh) -> Vec<GpuVertex> {
    mesh.vertices.iter().map(GpuVertex::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_for_cube() {
        let mesh = Mesh::cube(2.0);
        let vertices = vertices_for(&mesh);
        assert_eq!(vertices.len(), 36);
        assert_eq!(vertices[0].position, mesh.vertices[0].position.to_array());
        assert_eq!(vertices[0].uv, mesh.vertices[0].uv);
    }
}
