//! Tracing subscriber setup for the orrery.
//!
//! Console output always; a JSON file log in debug builds. `RUST_LOG` takes
//! precedence over `debug.log_level` from the config.

use std::fs::File;
use std::path::Path;

use orrery_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// File name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "orrery.log";

/// GPU stack crates are chatty at `info`.
const GPU_DIRECTIVES: &str = "wgpu=warn,naga=warn";

/// Build the filter directive string from an optional config.
///
/// A bare level such as `"debug"` gets the GPU quieting directives appended;
/// anything containing explicit directives is used verbatim.
pub fn filter_directives(config: Option<&Config>) -> String {
    let level = config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or("info");

    if level.contains(',') || level.contains('=') {
        level.to_string()
    } else {
        format!("{level},{GPU_DIRECTIVES}")
    }
}

/// The filter used when neither `RUST_LOG` nor a config is present.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(filter_directives(None))
}

/// Install the global tracing subscriber.
///
/// `log_dir` is only used when `debug_build` is set; failure to create the
/// directory or file silently falls back to console-only logging.
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && let Some(log_file) = open_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}

fn open_log_file(log_dir: &Path) -> Option<File> {
    std::fs::create_dir_all(log_dir).ok()?;
    File::create(log_dir.join(LOG_FILE_NAME)).ok()
}
