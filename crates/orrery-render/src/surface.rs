//! Window size tracking that never reports a zero-sized surface.

/// Minimum surface dimension; wgpu rejects zero-sized surfaces.
pub const MIN_SURFACE_DIMENSION: u32 = 1;

/// Physical pixel dimensions of a surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub width: u32,
    pub height: u32,
}

impl PhysicalSize {
    pub fn aspect_ratio(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Tracks physical size and scale factor across resize and DPI events.
///
/// A minimized window (0×0 on most platforms) is clamped to 1×1 and flagged
/// so the caller can skip rendering until a real size arrives.
#[derive(Debug)]
pub struct SurfaceWrapper {
    size: PhysicalSize,
    scale_factor: f64,
    minimized: bool,
}

impl SurfaceWrapper {
    pub fn new(physical_width: u32, physical_height: u32, scale_factor: f64) -> Self {
        Self {
            size: clamp(physical_width, physical_height),
            scale_factor,
            minimized: physical_width == 0 || physical_height == 0,
        }
    }

    /// Returns the new size if it changed.
    pub fn handle_resize(
        &mut self,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<PhysicalSize> {
        self.minimized = physical_width == 0 || physical_height == 0;
        let size = clamp(physical_width, physical_height);
        if size == self.size {
            return None;
        }
        self.size = size;
        Some(size)
    }

    pub fn handle_scale_factor_changed(
        &mut self,
        scale_factor: f64,
        physical_width: u32,
        physical_height: u32,
    ) -> Option<PhysicalSize> {
        self.scale_factor = scale_factor;
        self.handle_resize(physical_width, physical_height)
    }

    pub fn physical_size(&self) -> PhysicalSize {
        self.size
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Whether the last reported size had a zero dimension.
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }
}

fn clamp(width: u32, height: u32) -> PhysicalSize {
    PhysicalSize {
        width: width.max(MIN_SURFACE_DIMENSION),
        height: height.max(MIN_SURFACE_DIMENSION),
    }
}
