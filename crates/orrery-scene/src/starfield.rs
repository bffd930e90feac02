//! Seeded background starfield.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Side length of the cube the stars are scattered in, centred on the origin.
pub const STARFIELD_EXTENT: f32 = 800.0;
pub const MIN_STAR_SIZE: f32 = 0.15;
pub const STAR_SIZE_RANGE: f32 = 0.25;

/// A single background star, drawn as a tiny level-0 icosphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub position: Vec3,
    /// Uniform scale in `[0.15, 0.40)`.
    pub size: f32,
}

/// Deterministic star catalog for a seed.
#[derive(Debug, Clone, PartialEq)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn generate(seed: u64, count: u32) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let stars = (0..count)
            .map(|_| {
                let position = Vec3::new(
                    centered(&mut rng) * STARFIELD_EXTENT,
                    centered(&mut rng) * STARFIELD_EXTENT,
                    centered(&mut rng) * STARFIELD_EXTENT,
                );
                let size = MIN_STAR_SIZE + rng.random::<f32>() * STAR_SIZE_RANGE;
                Star { position, size }
            })
            .collect();
        Self { stars }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}

/// Uniform sample in `[-0.5, 0.5)`.
pub(crate) fn centered(rng: &mut ChaCha8Rng) -> f32 {
    rng.random::<f32>() - 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_matches_request() {
        assert_eq!(Starfield::generate(1, 3500).len(), 3500);
        assert!(Starfield::generate(1, 0).is_empty());
    }

    #[test]
    fn test_deterministic_for_seed() {
        assert_eq!(Starfield::generate(42, 200), Starfield::generate(42, 200));
    }

    #[test]
    fn test_different_seeds_differ() {
        assert_ne!(Starfield::generate(1, 50), Starfield::generate(2, 50));
    }

    #[test]
    fn test_stars_within_bounds() {
        let half = STARFIELD_EXTENT / 2.0;
        for star in Starfield::generate(7, 2000).stars() {
            assert!(star.position.abs().max_element() <= half);
            assert!(star.size >= MIN_STAR_SIZE);
            assert!(star.size <= MIN_STAR_SIZE + STAR_SIZE_RANGE);
        }
    }
}
