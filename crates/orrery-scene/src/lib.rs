//! The solar system model: what is drawn, where, and with which surface.
//!
//! Everything here is CPU-side and deterministic. [`SolarSystem::draw_list`]
//! turns a scene time into the list of instanced draws the renderer consumes.

mod asteroids;
mod body;
mod camera;
mod draw;
mod error;
mod orbit;
mod starfield;
mod surface;
mod system;

pub use asteroids::{Asteroid, AsteroidBelt};
pub use body::{Attachment, BODIES, Body};
pub use camera::FlyCamera;
pub use draw::{DrawCommand, RenderPassKind};
pub use error::SceneError;
pub use orbit::{
    asteroid_model, body_model, corona_model, moon_model, orbit_matrix, ring_model, star_model,
};
pub use starfield::{Star, Starfield};
pub use surface::SurfaceKind;
pub use system::SolarSystem;
