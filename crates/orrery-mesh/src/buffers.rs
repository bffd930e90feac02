//! Flattened attribute arrays handed to the rendering layer.

/// Three parallel flat arrays describing a triangle mesh.
///
/// `position` and `normal` hold three floats per vertex; `indices` holds three
/// vertex indices per triangle, in winding order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshBuffers {
    pub position: Vec<f32>,
    pub normal: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    /// Components per vertex attribute.
    pub const COMPONENTS: usize = 3;

    pub fn vertex_count(&self) -> usize {
        self.position.len() / Self::COMPONENTS
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Largest index referenced by the index list, if any.
    pub fn max_index(&self) -> Option<u32> {
        self.indices.iter().copied().max()
    }

    /// Whether every index fits in a 16-bit index buffer.
    pub fn fits_u16(&self) -> bool {
        self.max_index().is_none_or(|max| max <= u32::from(u16::MAX))
    }
}
