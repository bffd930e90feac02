//! WGSL module loading and caching.
//!
//! Shaders are embedded in the binary. When a shader directory is configured,
//! a file named `<name>.wgsl` there takes precedence and can be hot-reloaded.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("shader file not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read shader file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("shader '{name}' not found in library")]
    NotLoaded { name: String },

    #[error("no shader directory configured for file-based loading")]
    NoShaderDir,
}

/// Named cache of compiled shader modules.
#[derive(Default)]
pub struct ShaderLibrary {
    modules: HashMap<String, Arc<wgpu::ShaderModule>>,
    shader_dir: Option<PathBuf>,
}

impl ShaderLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for `<name>.wgsl` overrides in `dir`.
    pub fn with_shader_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.shader_dir = Some(dir.into());
        self
    }

    pub fn shader_dir(&self) -> Option<&PathBuf> {
        self.shader_dir.as_ref()
    }

    /// Compile `source` and cache it under `name`, replacing any previous module.
    pub fn load_from_source(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        source: &str,
    ) -> Arc<wgpu::ShaderModule> {
        debug!("Compiling shader '{name}'");
        let module = Arc::new(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(name),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        }));

        if self.modules.insert(name.to_string(), module.clone()).is_some() {
            info!("Replaced shader '{name}'");
        } else {
            info!("Loaded shader '{name}'");
        }
        module
    }

    /// Compile `<shader_dir>/<name>.wgsl`.
    pub fn load_from_file(
        &mut self,
        device: &wgpu::Device,
        name: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        let path = self.file_path(name)?;
        if !path.exists() {
            return Err(ShaderError::FileNotFound { path });
        }
        let source =
            std::fs::read_to_string(&path).map_err(|source| ShaderError::Io { path, source })?;
        Ok(self.load_from_source(device, name, &source))
    }

    /// Prefer the on-disk override if there is one, else compile `embedded`.
    pub fn load(
        &mut self,
        device: &wgpu::Device,
        name: &str,
        embedded: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        match self.load_from_file(device, name) {
            Ok(module) => Ok(module),
            Err(ShaderError::NoShaderDir | ShaderError::FileNotFound { .. }) => {
                Ok(self.load_from_source(device, name, embedded))
            }
            Err(err) => Err(err),
        }
    }

    /// Recompile `name` from its file in the shader directory.
    pub fn reload(
        &mut self,
        device: &wgpu::Device,
        name: &str,
    ) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        info!("Reloading shader '{name}'");
        self.load_from_file(device, name)
    }

    pub fn get(&self, name: &str) -> Result<Arc<wgpu::ShaderModule>, ShaderError> {
        self.modules
            .get(name)
            .cloned()
            .ok_or_else(|| ShaderError::NotLoaded {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn file_path(&self, name: &str) -> Result<PathBuf, ShaderError> {
        let dir = self.shader_dir.as_ref().ok_or(ShaderError::NoShaderDir)?;
        Ok(dir.join(format!("{name}.wgsl")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_test_device;

    const VALID_SHADER: &str = r#"
        @vertex
        fn vs_main(@builtin(vertex_index) idx: u32) -> @builtin(position) vec4<f32> {
            return vec4<f32>(0.0, 0.0, 0.0, 1.0);
        }

        @fragment
        fn fs_main() -> @location(0) vec4<f32> {
            return vec4<f32>(1.0, 0.0, 0.0, 1.0);
        }
    "#;

    #[test]
    fn test_library_starts_empty() {
        let library = ShaderLibrary::new();
        assert!(library.is_empty());
        assert!(matches!(
            library.get("body"),
            Err(ShaderError::NotLoaded { .. })
        ));
    }

    #[test]
    fn test_file_path_requires_dir() {
        let library = ShaderLibrary::new();
        assert!(matches!(
            library.file_path("body"),
            Err(ShaderError::NoShaderDir)
        ));
        let library = ShaderLibrary::new().with_shader_dir("shaders");
        assert_eq!(
            library.file_path("body").unwrap(),
            PathBuf::from("shaders").join("body.wgsl")
        );
    }

    #[test]
    fn test_cache_returns_same_module() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let mut library = ShaderLibrary::new();
        library.load_from_source(&device, "shared", VALID_SHADER);
        let a = library.get("shared").unwrap();
        let b = library.get("shared").unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_load_falls_back_to_embedded() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let mut library = ShaderLibrary::new().with_shader_dir(dir.path());
        library.load(&device, "missing", VALID_SHADER).unwrap();
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_reload_replaces_module_from_file() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("disk.wgsl"), VALID_SHADER).unwrap();
        let mut library = ShaderLibrary::new().with_shader_dir(dir.path());

        let original = library.load(&device, "disk", "").unwrap();
        let reloaded = library.reload(&device, "disk").unwrap();
        assert!(!Arc::ptr_eq(&original, &reloaded));
        assert_eq!(library.len(), 1);
    }

    #[test]
    fn test_reload_missing_file_errors() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let mut library = ShaderLibrary::new().with_shader_dir(dir.path());
        assert!(matches!(
            library.reload(&device, "nope"),
            Err(ShaderError::FileNotFound { .. })
        ));
    }
}
