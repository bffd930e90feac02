//! wgpu plumbing for the orrery: device and surface, depth, passes, mesh and
//! instance buffers, shader loading, draw batching and the body pipeline.

pub mod batching;
pub mod body_pipeline;
pub mod buffer;
pub mod depth;
pub mod gpu;
pub mod pass;
pub mod shader;
pub mod surface;

pub use batching::{DrawBatch, DrawGroup};
pub use body_pipeline::{
    BODY_SHADER_NAME, BODY_SHADER_SOURCE, BodyInstance, BodyPipeline, GlobalsBinding,
    GlobalsUniform,
};
pub use buffer::{BodyVertex, BufferAllocator, IndexData, InstanceBuffer, MeshBuffer};
pub use depth::DepthBuffer;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder};
pub use shader::{ShaderError, ShaderLibrary};
pub use surface::{PhysicalSize, SurfaceWrapper};

/// Headless device for GPU tests in this and dependent crates.
#[doc(hidden)]
pub mod test_support;
