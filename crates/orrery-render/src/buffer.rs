//! Vertex, index and instance buffers.

use std::marker::PhantomData;

use bytemuck::{Pod, Zeroable};
use orrery_mesh::MeshBuffers;
use wgpu::util::DeviceExt;

/// Indexed geometry resident on the GPU.
pub struct MeshBuffer {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    pub index_format: wgpu::IndexFormat,
}

impl MeshBuffer {
    /// Bind to vertex slot 0 and the index slot.
    pub fn bind(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), self.index_format);
    }

    /// Draw every index once per instance in `instances`.
    pub fn draw_instanced(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        instances: std::ops::Range<u32>,
    ) {
        render_pass.draw_indexed(0..self.index_count, 0, instances);
    }
}

/// Index data in either width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexData {
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl IndexData {
    /// The mesh's indices, narrowed to 16 bits when every value fits.
    pub fn from_mesh(buffers: &MeshBuffers) -> Self {
        if buffers.fits_u16() {
            IndexData::U16(buffers.indices.iter().map(|&i| i as u16).collect())
        } else {
            IndexData::U32(buffers.indices.clone())
        }
    }

    pub fn format(&self) -> wgpu::IndexFormat {
        match self {
            IndexData::U16(_) => wgpu::IndexFormat::Uint16,
            IndexData::U32(_) => wgpu::IndexFormat::Uint32,
        }
    }

    pub fn count(&self) -> u32 {
        match self {
            IndexData::U16(data) => data.len() as u32,
            IndexData::U32(data) => data.len() as u32,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            IndexData::U16(data) => bytemuck::cast_slice(data),
            IndexData::U32(data) => bytemuck::cast_slice(data),
        }
    }
}

/// Per-vertex data of a unit icosphere.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

static_assertions::assert_eq_size!(BodyVertex, [f32; 6]);

impl BodyVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<BodyVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Interleave the flat position and normal arrays.
    pub fn interleave(buffers: &MeshBuffers) -> Vec<BodyVertex> {
        buffers
            .position
            .chunks_exact(MeshBuffers::COMPONENTS)
            .zip(buffers.normal.chunks_exact(MeshBuffers::COMPONENTS))
            .map(|(p, n)| BodyVertex {
                position: [p[0], p[1], p[2]],
                normal: [n[0], n[1], n[2]],
            })
            .collect()
    }
}

/// Creates GPU buffers from CPU data.
pub struct BufferAllocator<'a> {
    device: &'a wgpu::Device,
}

impl<'a> BufferAllocator<'a> {
    pub fn new(device: &'a wgpu::Device) -> Self {
        Self { device }
    }

    /// Upload a generated mesh, using 16-bit indices when possible.
    pub fn create_mesh(&self, label: &str, buffers: &MeshBuffers) -> MeshBuffer {
        let vertices = BodyVertex::interleave(buffers);
        let indices = IndexData::from_mesh(buffers);
        log::debug!(
            "Uploading mesh '{label}': {} vertices, {} triangles ({:?})",
            vertices.len(),
            buffers.triangle_count(),
            indices.format()
        );

        MeshBuffer {
            vertex_buffer: self.create_buffer(
                &format!("{label}-vertices"),
                bytemuck::cast_slice(&vertices),
                wgpu::BufferUsages::VERTEX,
            ),
            index_buffer: self.create_buffer(
                &format!("{label}-indices"),
                indices.as_bytes(),
                wgpu::BufferUsages::INDEX,
            ),
            index_count: indices.count(),
            index_format: indices.format(),
        }
    }

    fn create_buffer(
        &self,
        label: &str,
        contents: &[u8],
        usage: wgpu::BufferUsages,
    ) -> wgpu::Buffer {
        self.device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents,
                usage,
            })
    }
}

/// Growable vertex buffer of per-instance records, rewritten every frame.
pub struct InstanceBuffer<T: Pod> {
    buffer: wgpu::Buffer,
    capacity: usize,
    len: usize,
    label: &'static str,
    _marker: PhantomData<T>,
}

impl<T: Pod> InstanceBuffer<T> {
    pub fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buffer: Self::allocate(device, label, capacity),
            capacity,
            len: 0,
            label,
            _marker: PhantomData,
        }
    }

    fn allocate(device: &wgpu::Device, label: &str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: (capacity * std::mem::size_of::<T>()) as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Replace the contents, reallocating if `data` does not fit.
    pub fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) {
        if data.len() > self.capacity {
            self.capacity = grown_capacity(self.capacity, data.len());
            log::debug!("Growing instance buffer '{}' to {}", self.label, self.capacity);
            self.buffer = Self::allocate(device, self.label, self.capacity);
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        self.len = data.len();
    }

    pub fn slice(&self) -> wgpu::BufferSlice<'_> {
        self.buffer.slice(..)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Next power of two that holds `needed`, never shrinking.
fn grown_capacity(current: usize, needed: usize) -> usize {
    needed.next_power_of_two().max(current)
}
