//! Seeded asteroid belt between Mars and Jupiter.

use std::f32::consts::TAU;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::starfield::centered;

/// Keeps the belt independent of the starfield drawn from the same seed.
const BELT_SEED_SALT: u64 = 0xA57E_401D;

pub const BELT_INNER_RADIUS: f32 = 40.0;
pub const BELT_WIDTH: f32 = 10.0;
/// Total vertical spread, centred on the orbital plane.
pub const BELT_THICKNESS: f32 = 8.0;
/// Spin rates are drawn from `[-MAX_SPIN, MAX_SPIN)`.
pub const MAX_SPIN: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asteroid {
    /// Starting angle around the sun.
    pub angle: f32,
    /// Distance from the sun in the orbital plane.
    pub radius: f32,
    /// Offset above or below the orbital plane.
    pub height: f32,
    pub size: f32,
    pub orbit_speed: f32,
    pub spin_x: f32,
    pub spin_z: f32,
}

impl Asteroid {
    /// Position at time zero.
    pub fn position(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.radius,
            self.height,
            self.angle.sin() * self.radius,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidBelt {
    asteroids: Vec<Asteroid>,
}

impl AsteroidBelt {
    pub fn generate(seed: u64, count: u32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed ^ BELT_SEED_SALT);
        let asteroids = (0..count)
            .map(|_| Asteroid {
                angle: rng.random::<f32>() * TAU,
                radius: BELT_INNER_RADIUS + rng.random::<f32>() * BELT_WIDTH,
                height: centered(&mut rng) * BELT_THICKNESS,
                size: 0.1 + rng.random::<f32>() * 0.3,
                orbit_speed: 0.05 + rng.random::<f32>() * 0.1,
                spin_x: centered(&mut rng) * 2.0 * MAX_SPIN,
                spin_z: centered(&mut rng) * 2.0 * MAX_SPIN,
            })
            .collect();
        Self { asteroids }
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }
}
