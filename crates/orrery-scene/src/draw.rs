use glam::{Mat4, Vec4};
use orrery_mesh::SubdivisionLevel;

use crate::surface::SurfaceKind;

/// GPU state a draw needs, in the order passes are recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderPassKind {
    /// Depth write, no blending.
    Opaque,
    /// Alpha blended with depth write.
    Translucent,
    /// Alpha blended without depth write.
    Glow,
}

/// One instance of a unit icosphere to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Which shared icosphere mesh to bind.
    pub mesh: SubdivisionLevel,
    pub model: Mat4,
    pub color: Vec4,
    pub surface: SurfaceKind,
    pub pass: RenderPassKind,
}

impl DrawCommand {
    /// Inverse-transpose of the model matrix, for transforming normals.
    pub fn normal_matrix(&self) -> Mat4 {
        self.model.inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_pass_order() {
        assert!(RenderPassKind::Opaque < RenderPassKind::Translucent);
        assert!(RenderPassKind::Translucent < RenderPassKind::Glow);
    }

    #[test]
    fn test_normal_matrix_keeps_normals_perpendicular() {
        let cmd = DrawCommand {
            mesh: SubdivisionLevel::ZERO,
            model: Mat4::from_scale(Vec3::new(4.0, 0.05, 4.0)),
            color: Vec4::ONE,
            surface: SurfaceKind::Ring,
            pass: RenderPassKind::Translucent,
        };
        // Tangent and normal of the unit sphere at a 45° point in the XY plane.
        let p = Vec3::new(1.0, 1.0, 0.0).normalize();
        let tangent = Vec3::new(-1.0, 1.0, 0.0);
        let t = cmd.model.transform_vector3(tangent);
        let n = cmd.normal_matrix().transform_vector3(p);
        assert!(t.dot(n).abs() < 1e-4);
    }
}
