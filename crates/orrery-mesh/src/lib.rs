//! Procedural sphere meshes for the orrery.
//!
//! The only generator here is the icosphere: a regular icosahedron whose faces
//! are recursively split 1-to-4, with every new vertex pushed back onto the
//! unit sphere. Shared edges are resolved through a midpoint cache so adjacent
//! triangles reference the same vertex and the mesh stays manifold.

mod buffers;
mod error;
mod icosphere;

pub use buffers::MeshBuffers;
pub use error::MeshError;
pub use icosphere::{
    ICOSAHEDRON_FACES, IcosphereBuilder, IcosphereMesh, MAX_SUBDIVISION_LEVEL, SubdivisionLevel,
    expected_face_count, expected_vertex_count, generate, icosahedron_vertices,
};
