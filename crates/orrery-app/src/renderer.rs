//! Draws a [`SolarSystem`] frame with instanced icosphere meshes.

use std::collections::BTreeMap;

use glam::Mat4;
use orrery_config::RenderConfig;
use orrery_mesh::{IcosphereMesh, SubdivisionLevel};
use orrery_render::{
    BODY_SHADER_NAME, BODY_SHADER_SOURCE, BodyInstance, BodyPipeline, BufferAllocator, DepthBuffer,
    DrawBatch, FrameEncoder, GlobalsBinding, GlobalsUniform, InstanceBuffer, MeshBuffer,
    RenderContext, RenderPassBuilder, ShaderLibrary, SurfaceError,
};
use orrery_scene::{RenderPassKind, SolarSystem};
use tracing::{debug, info, warn};

use crate::error::AppError;

/// One shared icosphere per subdivision level in use.
pub type MeshLibrary = BTreeMap<SubdivisionLevel, MeshBuffer>;

/// GPU resources for drawing the solar system.
pub struct SceneRenderer {
    meshes: MeshLibrary,
    shaders: ShaderLibrary,
    pipeline: BodyPipeline,
    globals: GlobalsBinding,
    instances: InstanceBuffer<BodyInstance>,
    batch: DrawBatch,
    depth: DepthBuffer,
    clear_color: wgpu::Color,
}

impl SceneRenderer {
    /// Upload every mesh `system` needs and build the body pipelines.
    pub fn new(
        gpu: &RenderContext,
        system: &SolarSystem,
        config: &RenderConfig,
    ) -> Result<Self, AppError> {
        let device = &gpu.device;
        let meshes = build_mesh_library(device, system.mesh_levels());

        let mut shaders = ShaderLibrary::new();
        if let Some(dir) = &config.shader_dir {
            shaders = shaders.with_shader_dir(dir.clone());
        }
        let shader = shaders.load(device, BODY_SHADER_NAME, BODY_SHADER_SOURCE)?;
        let pipeline = BodyPipeline::new(device, &shader, gpu.surface_format);
        let globals = GlobalsBinding::new(device, &pipeline.globals_layout);

        let draw_count = system.draw_count();
        let instances = InstanceBuffer::new(device, "body-instances", draw_count);
        let (width, height) = gpu.size();
        let depth = DepthBuffer::new(device, width, height);

        info!(
            "Scene renderer ready: {} meshes, {} instances",
            meshes.len(),
            draw_count
        );

        Ok(Self {
            meshes,
            shaders,
            pipeline,
            globals,
            instances,
            batch: DrawBatch::with_capacity(draw_count),
            depth,
            clear_color: clear_color(config),
        })
    }

    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.depth.resize(device, width, height);
    }

    /// Recompile the body shader from the shader directory and rebuild the
    /// pipelines. Keeps the current pipelines on failure.
    pub fn reload_shaders(&mut self, gpu: &RenderContext) {
        match self.shaders.reload(&gpu.device, BODY_SHADER_NAME) {
            Ok(shader) => {
                self.pipeline = BodyPipeline::new(&gpu.device, &shader, gpu.surface_format);
                self.globals = GlobalsBinding::new(&gpu.device, &self.pipeline.globals_layout);
                info!("Body shader reloaded");
            }
            Err(e) => warn!("Shader reload failed: {e}"),
        }
    }

    /// Render the system at `scene_time` and present.
    pub fn render(
        &mut self,
        gpu: &RenderContext,
        system: &SolarSystem,
        view_proj: Mat4,
        scene_time: f32,
    ) -> Result<(), SurfaceError> {
        self.batch.clear();
        self.batch.extend(system.draw_list(scene_time));
        self.batch.sort();
        self.instances
            .write(&gpu.device, &gpu.queue, &self.batch.instances());
        self.globals
            .update(&gpu.queue, &GlobalsUniform::new(view_proj, scene_time));

        let surface_texture = gpu.get_current_texture()?;
        let mut frame = FrameEncoder::new(&gpu.device, &gpu.queue, surface_texture);
        let builder = RenderPassBuilder::new()
            .label("scene-pass")
            .clear_color(self.clear_color)
            .depth(self.depth.view.clone(), DepthBuffer::CLEAR_VALUE);
        {
            let mut pass = frame.begin_render_pass(&builder);
            pass.set_bind_group(0, &self.globals.bind_group, &[]);
            if !self.instances.is_empty() {
                pass.set_vertex_buffer(1, self.instances.slice());
            }

            let mut bound: Option<RenderPassKind> = None;
            for group in self.batch.groups() {
                let Some(mesh) = self.meshes.get(&group.mesh) else {
                    debug!("No mesh uploaded for level {}", group.mesh);
                    continue;
                };
                if bound != Some(group.pass) {
                    pass.set_pipeline(self.pipeline.pipeline(group.pass));
                    bound = Some(group.pass);
                }
                mesh.bind(&mut pass);
                mesh.draw_instanced(&mut pass, group.instances);
            }
        }
        frame.submit();
        Ok(())
    }
}

/// Generate and upload one icosphere per level.
pub fn build_mesh_library(
    device: &wgpu::Device,
    levels: impl IntoIterator<Item = SubdivisionLevel>,
) -> MeshLibrary {
    let allocator = BufferAllocator::new(device);
    levels
        .into_iter()
        .map(|level| {
            let buffers = IcosphereMesh::generate(level).to_buffers();
            let mesh = allocator.create_mesh(&format!("icosphere-l{level}"), &buffers);
            (level, mesh)
        })
        .collect()
}

fn clear_color(config: &RenderConfig) -> wgpu::Color {
    let [r, g, b, a] = config.clear_color;
    wgpu::Color { r, g, b, a }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_render::test_support::create_test_device;

    #[test]
    fn test_clear_color_from_config() {
        let config = RenderConfig {
            clear_color: [0.1, 0.2, 0.3, 1.0],
            shader_dir: None,
        };
        let color = clear_color(&config);
        assert_eq!((color.r, color.g, color.b, color.a), (0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn test_default_clear_color_is_black() {
        assert_eq!(clear_color(&RenderConfig::default()), wgpu::Color::BLACK);
    }

    #[test]
    fn test_mesh_library_covers_every_level() {
        let Some((device, _queue)) = create_test_device() else {
            return;
        };
        let system = SolarSystem::new(&orrery_config::SceneConfig::default()).unwrap();
        let levels = system.mesh_levels();
        let library = build_mesh_library(&device, levels.iter().copied());

        assert_eq!(library.len(), levels.len());
        for (level, mesh) in &library {
            let faces = IcosphereMesh::generate(*level).face_count() as u32;
            assert_eq!(mesh.index_count, faces * 3, "level {level}");
        }
    }
}
