//! The fixed table of celestial bodies.

use glam::Vec4;

use crate::surface::SurfaceKind;

/// An extra sphere drawn relative to its parent's orbit frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Small cratered satellite on a fast orbit.
    Moon,
    /// Blended glow shell, drawn without depth writes.
    Corona,
    /// Flattened, tilted, blended sphere.
    Ring,
}

impl Attachment {
    /// Subdivision level of the attachment's own mesh.
    pub const fn level(self) -> u32 {
        match self {
            Attachment::Moon => 2,
            Attachment::Corona => 4,
            Attachment::Ring => 3,
        }
    }

    pub const fn surface(self) -> SurfaceKind {
        match self {
            Attachment::Moon => SurfaceKind::Cratered,
            Attachment::Corona => SurfaceKind::Corona,
            Attachment::Ring => SurfaceKind::Ring,
        }
    }

    pub const fn color(self) -> Vec4 {
        match self {
            Attachment::Moon => Vec4::new(0.8, 0.8, 0.8, 1.0),
            Attachment::Corona => Vec4::ONE,
            Attachment::Ring => Vec4::new(0.8, 0.7, 0.5, 1.0),
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Attachment::Moon => "Moon",
            Attachment::Corona => "Corona",
            Attachment::Ring => "Ring",
        }
    }
}

/// A sun or planet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub name: &'static str,
    /// Uniform scale applied to the unit icosphere.
    pub radius: f32,
    pub color: Vec4,
    /// Icosphere subdivision level before any detail bias.
    pub level: u32,
    /// Distance from the origin; zero for the sun.
    pub orbit_radius: f32,
    /// Orbital angular speed in radians per second.
    pub orbit_speed: f32,
    pub surface: SurfaceKind,
    pub attachment: Option<Attachment>,
}

const fn body(
    name: &'static str,
    radius: f32,
    color: [f32; 3],
    level: u32,
    orbit_radius: f32,
    orbit_speed: f32,
    surface: SurfaceKind,
) -> Body {
    Body {
        name,
        radius,
        color: Vec4::new(color[0], color[1], color[2], 1.0),
        level,
        orbit_radius,
        orbit_speed,
        surface,
        attachment: None,
    }
}

const fn with(body: Body, attachment: Attachment) -> Body {
    Body {
        attachment: Some(attachment),
        ..body
    }
}

/// The sun followed by the planets in order of distance.
pub const BODIES: [Body; 9] = [
    with(
        body("Sun", 7.0, [1.0, 0.8, 0.0], 4, 0.0, 0.0, SurfaceKind::Sun),
        Attachment::Corona,
    ),
    body("Mercury", 0.9, [0.7, 0.7, 0.7], 2, 12.0, 1.5, SurfaceKind::Cratered),
    body("Venus", 1.3, [0.9, 0.8, 0.6], 3, 18.0, 1.1, SurfaceKind::Venus),
    with(
        body("Earth", 1.5, [0.2, 0.5, 1.0], 3, 24.0, 0.8, SurfaceKind::Earth),
        Attachment::Moon,
    ),
    body("Mars", 1.1, [0.9, 0.3, 0.2], 3, 32.0, 0.6, SurfaceKind::Mars),
    body("Jupiter", 4.5, [0.8, 0.7, 0.5], 4, 55.0, 0.4, SurfaceKind::Banded),
    with(
        body("Saturn", 3.8, [0.8, 0.7, 0.4], 4, 75.0, 0.3, SurfaceKind::Banded),
        Attachment::Ring,
    ),
    body("Uranus", 2.5, [0.5, 0.8, 0.9], 4, 90.0, 0.2, SurfaceKind::IceGiant),
    body("Neptune", 2.4, [0.2, 0.3, 0.8], 4, 105.0, 0.15, SurfaceKind::IceGiant),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order() {
        let names: Vec<_> = BODIES.iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            [
                "Sun", "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus",
                "Neptune"
            ]
        );
    }

    #[test]
    fn test_orbits_strictly_increase() {
        for pair in BODIES.windows(2) {
            assert!(pair[0].orbit_radius < pair[1].orbit_radius);
        }
    }

    #[test]
    fn test_only_sun_is_stationary() {
        assert_eq!(BODIES[0].orbit_speed, 0.0);
        assert_eq!(BODIES[0].orbit_radius, 0.0);
        assert!(BODIES[1..].iter().all(|b| b.orbit_speed > 0.0));
    }

    #[test]
    fn test_attachments() {
        let attached: Vec<_> = BODIES
            .iter()
            .filter_map(|b| b.attachment.map(|a| (b.name, a)))
            .collect();
        assert_eq!(
            attached,
            [
                ("Sun", Attachment::Corona),
                ("Earth", Attachment::Moon),
                ("Saturn", Attachment::Ring),
            ]
        );
    }
}
