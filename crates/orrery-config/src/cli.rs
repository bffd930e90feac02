//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Animated solar system renderer")]
pub struct CliArgs {
    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Start in fullscreen.
    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Seed for the starfield and asteroid belt.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of background stars.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Number of asteroids.
    #[arg(long)]
    pub asteroids: Option<u32>,

    /// Animation speed multiplier.
    #[arg(long)]
    pub time_scale: Option<f64>,

    /// Added to every body's subdivision level (may be negative).
    #[arg(long, allow_hyphen_values = true)]
    pub detail_bias: Option<i32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(seed) = args.seed {
            self.scene.seed = seed;
        }
        if let Some(stars) = args.stars {
            self.scene.star_count = stars;
        }
        if let Some(asteroids) = args.asteroids {
            self.scene.asteroid_count = asteroids;
        }
        if let Some(scale) = args.time_scale {
            self.scene.time_scale = scale;
        }
        if let Some(bias) = args.detail_bias {
            self.scene.detail_bias = bias;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
