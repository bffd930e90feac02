//! Model matrices for everything in the scene.
//!
//! Matrices compose right to left onto the unit icosphere, so the last factor
//! (usually the scale) is applied first.

use std::f32::consts::FRAC_PI_4;

use glam::{Mat4, Vec3};

use crate::asteroids::Asteroid;
use crate::body::Body;
use crate::starfield::Star;

/// Spin rate shared by every body, radians per second.
pub const BODY_SPIN_SPEED: f32 = 0.5;
pub const MOON_ORBIT_SPEED: f32 = 2.5;
pub const MOON_DISTANCE: f32 = 3.0;
pub const MOON_SCALE: f32 = 0.4;
pub const CORONA_SCALE: f32 = 1.2;
pub const RING_TILT: f32 = FRAC_PI_4;
/// Ring radius relative to the parent body.
pub const RING_SPREAD: f32 = 2.0;
pub const RING_THICKNESS: f32 = 0.05;

/// Frame that places a body on its circular orbit in the XZ plane.
pub fn orbit_matrix(time: f32, orbit_speed: f32, orbit_radius: f32) -> Mat4 {
    Mat4::from_rotation_y(time * orbit_speed)
        * Mat4::from_translation(Vec3::new(orbit_radius, 0.0, 0.0))
}

fn body_orbit(body: &Body, time: f32) -> Mat4 {
    orbit_matrix(time, body.orbit_speed, body.orbit_radius)
}

pub fn body_model(body: &Body, time: f32) -> Mat4 {
    body_orbit(body, time)
        * Mat4::from_rotation_y(time * BODY_SPIN_SPEED)
        * Mat4::from_scale(Vec3::splat(body.radius))
}

/// Moon circling `parent`, independent of the parent's own spin.
pub fn moon_model(parent: &Body, time: f32) -> Mat4 {
    body_orbit(parent, time)
        * Mat4::from_rotation_y(time * MOON_ORBIT_SPEED)
        * Mat4::from_translation(Vec3::new(MOON_DISTANCE, 0.0, 0.0))
        * Mat4::from_scale(Vec3::splat(MOON_SCALE))
}

pub fn corona_model(parent: &Body, time: f32) -> Mat4 {
    body_orbit(parent, time) * Mat4::from_scale(Vec3::splat(parent.radius * CORONA_SCALE))
}

pub fn ring_model(parent: &Body, time: f32) -> Mat4 {
    let spread = parent.radius * RING_SPREAD;
    body_orbit(parent, time)
        * Mat4::from_rotation_x(RING_TILT)
        * Mat4::from_scale(Vec3::new(spread, RING_THICKNESS, spread))
}

pub fn star_model(star: &Star) -> Mat4 {
    Mat4::from_scale_rotation_translation(
        Vec3::splat(star.size),
        glam::Quat::IDENTITY,
        star.position,
    )
}

/// Belt orbit around the sun plus a tumbling spin about X then Z.
pub fn asteroid_model(asteroid: &Asteroid, time: f32) -> Mat4 {
    Mat4::from_rotation_y(time * asteroid.orbit_speed)
        * Mat4::from_translation(asteroid.position())
        * Mat4::from_rotation_x(time * asteroid.spin_x)
        * Mat4::from_rotation_z(time * asteroid.spin_z)
        * Mat4::from_scale(Vec3::splat(asteroid.size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BODIES;

    const EPS: f32 = 1e-3;

    fn origin_of(m: Mat4) -> Vec3 {
        m.transform_point3(Vec3::ZERO)
    }

    #[test]
    fn test_orbit_stays_on_circle() {
        for body in &BODIES {
            for step in 0..50 {
                let t = step as f32 * 0.37;
                let center = origin_of(body_model(body, t));
                assert!(
                    (center.length() - body.orbit_radius).abs() < EPS,
                    "{} at t={t}: {center}",
                    body.name
                );
                assert!(center.y.abs() < EPS);
            }
        }
    }

    #[test]
    fn test_sun_does_not_move() {
        let sun = &BODIES[0];
        for t in [0.0, 1.0, 100.0] {
            assert!(origin_of(body_model(sun, t)).length() < EPS);
        }
    }

    #[test]
    fn test_orbit_starts_on_positive_x() {
        let earth = &BODIES[3];
        let center = origin_of(body_model(earth, 0.0));
        assert!((center - Vec3::new(24.0, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_body_scale_is_radius() {
        let jupiter = &BODIES[5];
        let m = body_model(jupiter, 3.0);
        let surface = m.transform_point3(Vec3::X);
        assert!(((surface - origin_of(m)).length() - jupiter.radius).abs() < EPS);
    }

    #[test]
    fn test_moon_follows_parent() {
        let earth = &BODIES[3];
        for t in [0.0, 0.5, 2.0, 10.0] {
            let parent = origin_of(body_model(earth, t));
            let moon = moon_model(earth, t);
            let distance = origin_of(moon).distance(parent);
            assert!((distance - MOON_DISTANCE).abs() < EPS, "t={t}");
            let radius = (moon.transform_point3(Vec3::Y) - origin_of(moon)).length();
            assert!((radius - MOON_SCALE).abs() < EPS);
        }
    }

    #[test]
    fn test_corona_wraps_sun() {
        let sun = &BODIES[0];
        let m = corona_model(sun, 4.0);
        let radius = m.transform_point3(Vec3::Z).length();
        assert!((radius - sun.radius * CORONA_SCALE).abs() < EPS);
    }

    #[test]
    fn test_ring_is_flat_and_tilted() {
        let saturn = &BODIES[6];
        let m = ring_model(saturn, 0.0);
        let center = origin_of(m);
        // Local Y (the thin axis) tilted π/4 about X.
        let thin = m.transform_point3(Vec3::Y) - center;
        assert!((thin.length() - RING_THICKNESS).abs() < EPS);
        let expected = Vec3::new(0.0, RING_TILT.cos(), RING_TILT.sin()) * RING_THICKNESS;
        assert!((thin - expected).length() < EPS);
        let wide = m.transform_point3(Vec3::X) - center;
        assert!((wide.length() - saturn.radius * RING_SPREAD).abs() < EPS);
    }

    #[test]
    fn test_star_model_translates_and_scales() {
        let star = Star {
            position: Vec3::new(10.0, -20.0, 30.0),
            size: 0.25,
        };
        let m = star_model(&star);
        assert!((origin_of(m) - star.position).length() < EPS);
        assert!(((m.transform_point3(Vec3::X) - star.position).length() - 0.25).abs() < EPS);
    }

    #[test]
    fn test_asteroid_keeps_belt_distance() {
        let asteroid = Asteroid {
            angle: 1.0,
            radius: 45.0,
            height: 2.0,
            size: 0.3,
            orbit_speed: 0.1,
            spin_x: 1.5,
            spin_z: -0.5,
        };
        for t in [0.0, 7.0, 33.0] {
            let center = origin_of(asteroid_model(&asteroid, t));
            let planar = Vec3::new(center.x, 0.0, center.z).length();
            assert!((planar - 45.0).abs() < EPS);
            assert!((center.y - 2.0).abs() < EPS);
        }
    }
}
