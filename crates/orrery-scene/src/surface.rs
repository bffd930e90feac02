/// Which procedural surface the fragment shader paints on a sphere.
///
/// The discriminant is the selector the WGSL surface library switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum SurfaceKind {
    /// Background star with a position-phased twinkle.
    Star = 0,
    Sun = 1,
    /// Thick, slowly drifting cloud deck.
    Venus = 2,
    /// Land and water with specular oceans, moving clouds and a blue rim.
    Earth = 3,
    /// Turbulent horizontal bands in the body's color.
    Banded = 4,
    /// Grooved, dusty, semi-transparent ring.
    Ring = 5,
    /// Noise-displaced glow shell around the sun.
    Corona = 6,
    Mars = 7,
    /// Rocky crater noise, shared by moons and asteroids.
    Cratered = 8,
    /// Soft gas with an atmospheric rim.
    IceGiant = 9,
}

impl SurfaceKind {
    /// Selector value uploaded per instance.
    pub const fn shader_id(self) -> u32 {
        self as u32
    }
}
