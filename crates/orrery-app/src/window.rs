//! Window creation and event handling via winit.
//!
//! [`AppState`] implements winit's [`ApplicationHandler`]: it owns the window,
//! the GPU context and the scene renderer, and drives the fixed-timestep loop
//! from `RedrawRequested`.

use std::sync::Arc;

use orrery_config::Config;
use orrery_render::{
    PhysicalSize, RenderContext, SurfaceError, SurfaceWrapper, init_render_context_blocking,
};
use orrery_scene::{FlyCamera, SolarSystem};
use tracing::{info, instrument, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Fullscreen, Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::game_loop::{FpsCounter, GameLoop};
use crate::input::{Hotkey, KeyboardState};
use crate::renderer::SceneRenderer;

/// Window attributes for the configured size, title and fullscreen mode.
pub fn window_attributes_from_config(config: &Config) -> WindowAttributes {
    let attrs = WindowAttributes::default()
        .with_title(config.window.title.clone())
        .with_inner_size(winit::dpi::LogicalSize::new(
            f64::from(config.window.width),
            f64::from(config.window.height),
        ));
    if config.window.fullscreen {
        attrs.with_fullscreen(Some(Fullscreen::Borderless(None)))
    } else {
        attrs
    }
}

/// Application state handed to the winit event loop.
pub struct AppState {
    config: Config,
    system: SolarSystem,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    renderer: Option<SceneRenderer>,
    surface_wrapper: SurfaceWrapper,
    camera: FlyCamera,
    keyboard: KeyboardState,
    game_loop: GameLoop,
    fps: FpsCounter,
    fatal: Option<AppError>,
}

impl AppState {
    pub fn new(config: Config, system: SolarSystem) -> Self {
        let width = config.window.width;
        let height = config.window.height;
        let surface_wrapper = SurfaceWrapper::new(width, height, 1.0);
        let camera = FlyCamera::from_config(
            &config.camera,
            surface_wrapper.physical_size().aspect_ratio(),
        );
        let game_loop = GameLoop::new(config.scene.time_scale);

        Self {
            config,
            system,
            window: None,
            gpu: None,
            renderer: None,
            surface_wrapper,
            camera,
            keyboard: KeyboardState::new(),
            game_loop,
            fps: FpsCounter::default(),
            fatal: None,
        }
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    pub fn physical_size(&self) -> PhysicalSize {
        self.surface_wrapper.physical_size()
    }

    /// The error that stopped the event loop, if any.
    pub fn take_fatal_error(&mut self) -> Option<AppError> {
        self.fatal.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        self.fatal = Some(err);
        event_loop.exit();
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attrs = window_attributes_from_config(&self.config);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let inner_size = window.inner_size();
        let scale_factor = window.scale_factor();
        self.surface_wrapper =
            SurfaceWrapper::new(inner_size.width, inner_size.height, scale_factor);
        info!(
            "Surface initialized: {}x{} (scale: {:.2})",
            inner_size.width, inner_size.height, scale_factor
        );

        let gpu = init_render_context_blocking(window.clone(), self.config.window.vsync)?;
        let renderer = SceneRenderer::new(&gpu, &self.system, &self.config.render)?;

        self.apply_size(self.surface_wrapper.physical_size());
        self.renderer = Some(renderer);
        self.gpu = Some(gpu);
        self.window = Some(window);
        Ok(())
    }

    /// Propagate a new physical size to the camera, surface and depth buffer.
    fn apply_size(&mut self, size: PhysicalSize) {
        self.camera
            .set_aspect_ratio(size.width as f32, size.height as f32);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(size.width, size.height);
            if let Some(renderer) = &mut self.renderer {
                renderer.resize(&gpu.device, size.width, size.height);
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let axis = self.keyboard.movement_axis();
        let camera = &mut self.camera;
        let mut scene_time = 0.0;
        let frame_time = self.game_loop.tick(
            |dt, _| camera.translate(axis, dt as f32),
            |_, t| scene_time = t,
        );

        if self.config.debug.show_fps
            && let Some(fps) = self.fps.record(frame_time)
        {
            info!("{fps:.1} FPS");
        }

        if !self.surface_wrapper.is_minimized()
            && let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer)
        {
            let view_proj = self.camera.view_projection_matrix();
            match renderer.render(gpu, &self.system, view_proj, scene_time as f32) {
                Ok(()) => {}
                Err(SurfaceError::Lost) => {
                    let size = self.surface_wrapper.physical_size();
                    self.apply_size(size);
                }
                Err(SurfaceError::OutOfMemory) => {
                    self.fail(event_loop, AppError::OutOfMemory);
                    return;
                }
                Err(SurfaceError::Timeout) => {
                    warn!("Surface timeout, skipping frame");
                }
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            self.fail(event_loop, err);
            return;
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(size) = self
                    .surface_wrapper
                    .handle_resize(new_size.width, new_size.height)
                {
                    self.apply_size(size);
                    info!("Window resized to {}x{}", size.width, size.height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(window) = &self.window {
                    let inner = window.inner_size();
                    if let Some(size) = self.surface_wrapper.handle_scale_factor_changed(
                        scale_factor,
                        inner.width,
                        inner.height,
                    ) {
                        self.apply_size(size);
                        info!(
                            "Scale factor changed to {:.2}, resized to {}x{}",
                            scale_factor, size.width, size.height
                        );
                    }
                }
            }
            WindowEvent::Focused(false) => self.keyboard.release_all(),
            WindowEvent::KeyboardInput { event, .. } => {
                match self.keyboard.process_event(&event) {
                    Some(Hotkey::Quit) => {
                        info!("Escape pressed, shutting down");
                        event_loop.exit();
                    }
                    Some(Hotkey::ReloadShaders) => {
                        if let (Some(gpu), Some(renderer)) = (&self.gpu, &mut self.renderer) {
                            renderer.reload_shaders(gpu);
                        }
                    }
                    None => {}
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Build the solar system, open the window and run until it closes.
///
/// # Errors
///
/// Returns the first fatal error: an invalid scene, a failed window or GPU
/// initialization, or an event loop failure.
#[instrument(skip_all)]
pub fn run(config: Config) -> Result<(), AppError> {
    let system = SolarSystem::new(&config.scene)?;
    let event_loop = EventLoop::new()?;
    let mut app = AppState::new(config, system);
    event_loop.run_app(&mut app)?;
    app.take_fatal_error().map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn state(config: Config) -> AppState {
        let system = SolarSystem::new(&config.scene).unwrap();
        AppState::new(config, system)
    }

    fn small_config() -> Config {
        let mut config = Config::default();
        config.scene.star_count = 10;
        config.scene.asteroid_count = 10;
        config
    }

    #[test]
    fn test_initial_size_from_config() {
        let mut config = small_config();
        config.window.width = 800;
        config.window.height = 600;
        let state = state(config);
        assert_eq!(state.physical_size().width, 800);
        assert_eq!(state.physical_size().height, 600);
        assert!(state.window.is_none());
    }

    #[test]
    fn test_camera_starts_at_configured_position() {
        let state = state(small_config());
        assert_eq!(state.camera().position, Vec3::new(0.0, 35.0, 120.0));
        assert!((state.camera().aspect_ratio - 1280.0 / 720.0).abs() < 1e-6);
    }

    #[test]
    fn test_resize_updates_camera_aspect() {
        let mut state = state(small_config());
        let size = state.surface_wrapper.handle_resize(1000, 500).unwrap();
        state.apply_size(size);
        assert!((state.camera().aspect_ratio - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_game_loop_uses_configured_time_scale() {
        let mut config = small_config();
        config.scene.time_scale = 3.0;
        let state = state(config);
        assert_eq!(state.game_loop.time_scale(), 3.0);
    }

    #[test]
    fn test_window_attributes_from_config() {
        let mut config = small_config();
        config.window.title = "Test Orrery".to_string();
        let attrs = window_attributes_from_config(&config);
        assert_eq!(attrs.title, "Test Orrery");
        assert!(attrs.fullscreen.is_none());

        config.window.fullscreen = true;
        let attrs = window_attributes_from_config(&config);
        assert!(attrs.fullscreen.is_some());
    }

    #[test]
    fn test_no_fatal_error_initially() {
        let mut state = state(small_config());
        assert!(state.take_fatal_error().is_none());
    }
}
