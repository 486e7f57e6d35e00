//! Mesh data and GPU buffers
//!
//! [`MeshData`] is the CPU-side description; [`GpuMesh`] is the uploaded
//! form. A mesh may carry an index buffer or not - the renderer issues an
//! indexed or non-indexed draw accordingly.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

/// A mesh vertex: position and texture coordinates
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub const fn new(position: [f32; 3], uv: [f32; 2]) -> Self {
        Self { position, uv }
    }

    /// Vertex buffer layout matching the mesh shader's inputs
    pub fn buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// CPU-side mesh description
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    /// Triangle indices; `None` for non-indexed meshes
    pub indices: Option<Vec<u32>>,
}

impl MeshData {
    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of indices (0 for non-indexed meshes)
    #[inline]
    pub fn index_count(&self) -> usize {
        self.indices.as_ref().map_or(0, |i| i.len())
    }
}

/// A mesh uploaded to GPU buffers
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,
    vertex_count: u32,
    index_count: u32,
}

impl GpuMesh {
    /// Upload mesh data into GPU buffers
    pub fn upload(device: &wgpu::Device, data: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Mesh Vertex Buffer"),
            contents: bytemuck::cast_slice(&data.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = data.indices.as_ref().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Index Buffer"),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        Self {
            vertex_buffer,
            index_buffer,
            vertex_count: data.vertex_count() as u32,
            index_count: data.index_count() as u32,
        }
    }

    /// Vertex buffer for binding
    pub fn vertex_buffer(&self) -> &wgpu::Buffer {
        &self.vertex_buffer
    }

    /// Index buffer, if the mesh is indexed
    pub fn index_buffer(&self) -> Option<&wgpu::Buffer> {
        self.index_buffer.as_ref()
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Number of indices
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_stride() {
        let layout = Vertex::buffer_layout();
        assert_eq!(layout.array_stride, std::mem::size_of::<Vertex>() as u64);
        assert_eq!(layout.attributes.len(), 2);
    }

    #[test]
    fn test_mesh_data_counts() {
        let data = MeshData {
            vertices: vec![Vertex::new([0.0; 3], [0.0; 2]); 3],
            indices: None,
        };
        assert_eq!(data.vertex_count(), 3);
        assert_eq!(data.index_count(), 0);

        let indexed = MeshData {
            vertices: vec![Vertex::new([0.0; 3], [0.0; 2]); 4],
            indices: Some(vec![0, 1, 2, 2, 3, 0]),
        };
        assert_eq!(indexed.vertex_count(), 4);
        assert_eq!(indexed.index_count(), 6);
    }
}
