//! The orrery binary.

use std::process::ExitCode;

use clap::Parser;
use orrery_app::{PlatformDirs, PlatformError};
use orrery_config::{CliArgs, Config};
use tracing::{error, info, warn};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Logging is not up yet, so directory failures go to stderr.
    let dirs = match platform_dirs(&args) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to initialize platform directories: {e}");
            return ExitCode::FAILURE;
        }
    };

    let (mut config, load_error) = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    if let Some(e) = load_error {
        warn!("Failed to load config: {e}, using defaults");
    }
    info!(
        config_dir = %dirs.config_dir.display(),
        seed = config.scene.seed,
        "Starting orrery"
    );

    match orrery_app::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn platform_dirs(args: &CliArgs) -> Result<PlatformDirs, PlatformError> {
    let dirs = match &args.config {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };
    dirs.create_dirs()?;
    Ok(dirs)
}
