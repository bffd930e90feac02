use orrery_mesh::MeshError;

/// Errors raised while assembling a [`SolarSystem`](crate::SolarSystem).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// A body's table level plus the configured detail bias is out of range.
    #[error("invalid mesh detail for {body}: {source}")]
    Mesh {
        body: &'static str,
        #[source]
        source: MeshError,
    },
}
