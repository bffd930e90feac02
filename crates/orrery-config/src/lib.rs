//! Configuration system for the orrery.
//!
//! Runtime settings persist to disk as a RON file. Command-line flags
//! override individual values after loading, and unknown or missing fields
//! are tolerated so older config files keep working.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CONFIG_FILE_NAME, CameraConfig, Config, DebugConfig, RenderConfig, SceneConfig, WindowConfig,
};
pub use error::ConfigError;
