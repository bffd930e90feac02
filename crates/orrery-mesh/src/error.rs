//! Mesh generation error types.

/// Errors produced when requesting a generated mesh.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MeshError {
    /// The subdivision level is negative or above the supported maximum.
    #[error("invalid subdivision level {level}: expected an integer in 0..={max}")]
    InvalidArgument { level: i64, max: u32 },
}
