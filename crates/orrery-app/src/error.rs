//! Errors that end the application.

use orrery_render::{RenderContextError, ShaderError};
use orrery_scene::SceneError;

/// Fatal application error, reported by [`run`](crate::run).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("GPU initialization failed: {0}")]
    RenderContext(#[from] RenderContextError),

    #[error(transparent)]
    Shader(#[from] ShaderError),

    #[error("GPU out of memory")]
    OutOfMemory,

    #[error(transparent)]
    Scene(#[from] SceneError),
}
