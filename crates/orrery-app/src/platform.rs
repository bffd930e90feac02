//! Platform directory resolution.
//!
//! Config, data, cache and log directories follow OS conventions (XDG on
//! Linux, Known Folders on Windows, Library on macOS) via the `dirs` crate.

use std::io;
use std::path::{Path, PathBuf};

/// Application folder name under each OS base directory.
pub const APP_NAME: &str = "orrery";

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// OS-specific directories used by orrery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformDirs {
    /// Holds `config.ron`.
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
    /// Shader overrides and other disposable files.
    pub cache_dir: PathBuf,
    /// Holds `orrery.log` in debug builds.
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve the OS directories without creating them.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::NoConfigDir`] if the OS does not expose a
    /// configuration directory.
    pub fn resolve() -> Result<Self, PlatformError> {
        let app_config = dirs::config_dir()
            .ok_or(PlatformError::NoConfigDir)?
            .join(APP_NAME);

        let data_dir = dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| app_config.join("data"));
        let cache_dir = dirs::cache_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| app_config.join("cache"));

        Ok(Self {
            config_dir: app_config.join("config"),
            data_dir,
            cache_dir,
            log_dir: app_config.join("logs"),
        })
    }

    /// Directories for an explicit `--config <dir>`: the config lives in
    /// `dir` itself and everything else goes beside it.
    pub fn from_config_dir(dir: &Path) -> Self {
        Self {
            config_dir: dir.to_path_buf(),
            data_dir: dir.join("data"),
            cache_dir: dir.join("cache"),
            log_dir: dir.join("logs"),
        }
    }

    /// Directories rooted under `root`, laid out like [`resolve`](Self::resolve).
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            data_dir: app_dir.join("data"),
            cache_dir: app_dir.join("cache"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Create every directory on disk.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Io`] if any directory cannot be created.
    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        for dir in [
            &self.config_dir,
            &self.data_dir,
            &self.cache_dir,
            &self.log_dir,
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_root_layout() {
        let root = Path::new("/tmp/orrery-test");
        let dirs = PlatformDirs::resolve_with_root(root);
        assert_eq!(dirs.config_dir, root.join("orrery/config"));
        assert_eq!(dirs.data_dir, root.join("orrery/data"));
        assert_eq!(dirs.cache_dir, root.join("orrery/cache"));
        assert_eq!(dirs.log_dir, root.join("orrery/logs"));
    }

    #[test]
    fn test_from_config_dir_keeps_config_in_place() {
        let dirs = PlatformDirs::from_config_dir(Path::new("settings"));
        assert_eq!(dirs.config_dir, PathBuf::from("settings"));
        assert_eq!(dirs.log_dir, PathBuf::from("settings/logs"));
    }

    #[test]
    fn test_create_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(tmp.path());
        dirs.create_dirs().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.data_dir.is_dir());
        assert!(dirs.cache_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_create_dirs_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::from_config_dir(tmp.path());
        dirs.create_dirs().unwrap();
        dirs.create_dirs().unwrap();
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_create_dirs_fails_under_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("not-a-dir");
        std::fs::write(&file, "x").unwrap();
        let dirs = PlatformDirs::from_config_dir(&file);
        assert!(matches!(dirs.create_dirs(), Err(PlatformError::Io(_))));
    }

    #[test]
    fn test_resolve_uses_app_name() {
        // Headless CI may have no config dir; only check the layout when it resolves.
        if let Ok(dirs) = PlatformDirs::resolve() {
            assert!(dirs.config_dir.ends_with("orrery/config"));
            assert!(dirs.log_dir.ends_with("orrery/logs"));
        }
    }
}
