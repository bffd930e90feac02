//! Look-at fly camera.

use glam::{Mat4, Vec3};
use orrery_config::CameraConfig;

/// A camera that translates freely while always looking at a fixed target.
#[derive(Debug, Clone, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
    /// Units per second along each movement axis.
    pub speed: f32,
}

impl FlyCamera {
    pub fn from_config(config: &CameraConfig, aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::from_array(config.position),
            target: Vec3::from_array(config.target),
            fov_y: config.fov_y_degrees.to_radians(),
            aspect_ratio,
            near: config.near,
            far: config.far,
            speed: config.speed,
        }
    }

    /// Move along world axes. Each component of `axis` is in `[-1, 1]`.
    pub fn translate(&mut self, axis: Vec3, dt: f32) {
        self.position += axis * self.speed * dt;
    }

    /// Update the aspect ratio; a zero-height (minimized) surface is ignored.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.target - self.position;
        // Looking straight up or down makes +Y degenerate as the up vector.
        let up = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }

    /// Reverse-Z perspective: near maps to depth 1, far to depth 0.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.far, self.near)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
