//! The assembled solar system and its per-frame draw list.

use std::collections::BTreeSet;

use glam::Vec4;
use orrery_config::SceneConfig;
use orrery_mesh::SubdivisionLevel;
use tracing::{info, instrument};

use crate::asteroids::AsteroidBelt;
use crate::body::{Attachment, BODIES, Body};
use crate::draw::{DrawCommand, RenderPassKind};
use crate::error::SceneError;
use crate::orbit;
use crate::starfield::Starfield;
use crate::surface::SurfaceKind;

const STAR_COLOR: Vec4 = Vec4::ONE;
const ASTEROID_COLOR: Vec4 = Vec4::new(0.6, 0.5, 0.4, 1.0);

/// A body from the table with its detail bias resolved.
#[derive(Debug, Clone, Copy)]
struct PlacedBody {
    body: &'static Body,
    mesh: SubdivisionLevel,
    attachment: Option<(Attachment, SubdivisionLevel)>,
}

/// Sun, planets, attachments, background stars and the asteroid belt.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    bodies: Vec<PlacedBody>,
    starfield: Starfield,
    belt: AsteroidBelt,
}

impl SolarSystem {
    /// Build the scene. Stars and asteroids always use the bare icosahedron;
    /// `detail_bias` only shifts the levels of bodies and their attachments.
    #[instrument(skip_all, fields(seed = config.seed))]
    pub fn new(config: &SceneConfig) -> Result<Self, SceneError> {
        let bias = config.detail_bias;
        let bodies = BODIES
            .iter()
            .map(|body| {
                let mesh = biased_level(body.name, body.level, bias)?;
                let attachment = body
                    .attachment
                    .map(|a| biased_level(a.name(), a.level(), bias).map(|level| (a, level)))
                    .transpose()?;
                Ok(PlacedBody {
                    body,
                    mesh,
                    attachment,
                })
            })
            .collect::<Result<Vec<_>, SceneError>>()?;

        let starfield = Starfield::generate(config.seed, config.star_count);
        let belt = AsteroidBelt::generate(config.seed, config.asteroid_count);

        info!(
            bodies = bodies.len(),
            stars = starfield.len(),
            asteroids = belt.len(),
            detail_bias = bias,
            "Solar system assembled"
        );

        Ok(Self {
            bodies,
            starfield,
            belt,
        })
    }

    pub fn starfield(&self) -> &Starfield {
        &self.starfield
    }

    pub fn belt(&self) -> &AsteroidBelt {
        &self.belt
    }

    /// Every distinct icosphere level the draw list can reference.
    pub fn mesh_levels(&self) -> BTreeSet<SubdivisionLevel> {
        let mut levels: BTreeSet<_> = self
            .bodies
            .iter()
            .flat_map(|p| std::iter::once(p.mesh).chain(p.attachment.map(|(_, level)| level)))
            .collect();
        if !self.starfield.is_empty() || !self.belt.is_empty() {
            levels.insert(SubdivisionLevel::ZERO);
        }
        levels
    }

    /// Number of commands [`draw_list`](Self::draw_list) returns.
    pub fn draw_count(&self) -> usize {
        let attachments = self.bodies.iter().filter(|p| p.attachment.is_some()).count();
        self.starfield.len() + self.bodies.len() + attachments + self.belt.len()
    }

    /// Stars, then each body followed by its attachment, then asteroids.
    pub fn draw_list(&self, time: f32) -> Vec<DrawCommand> {
        let mut commands = Vec::with_capacity(self.draw_count());

        commands.extend(self.starfield.stars().iter().map(|star| DrawCommand {
            mesh: SubdivisionLevel::ZERO,
            model: orbit::star_model(star),
            color: STAR_COLOR,
            surface: SurfaceKind::Star,
            pass: RenderPassKind::Opaque,
        }));

        for placed in &self.bodies {
            let body = placed.body;
            commands.push(DrawCommand {
                mesh: placed.mesh,
                model: orbit::body_model(body, time),
                color: body.color,
                surface: body.surface,
                pass: RenderPassKind::Opaque,
            });

            if let Some((attachment, mesh)) = placed.attachment {
                let (model, pass) = match attachment {
                    Attachment::Moon => (orbit::moon_model(body, time), RenderPassKind::Opaque),
                    Attachment::Corona => (orbit::corona_model(body, time), RenderPassKind::Glow),
                    Attachment::Ring => {
                        (orbit::ring_model(body, time), RenderPassKind::Translucent)
                    }
                };
                commands.push(DrawCommand {
                    mesh,
                    model,
                    color: attachment.color(),
                    surface: attachment.surface(),
                    pass,
                });
            }
        }

        commands.extend(self.belt.asteroids().iter().map(|asteroid| DrawCommand {
            mesh: SubdivisionLevel::ZERO,
            model: orbit::asteroid_model(asteroid, time),
            color: ASTEROID_COLOR,
            surface: SurfaceKind::Cratered,
            pass: RenderPassKind::Opaque,
        }));

        commands
    }
}

fn biased_level(name: &'static str, level: u32, bias: i32) -> Result<SubdivisionLevel, SceneError> {
    SubdivisionLevel::try_from(i64::from(level) + i64::from(bias))
        .map_err(|source| SceneError::Mesh { body: name, source })
}
