//! Orrery application: platform directories, the fixed-timestep loop,
//! keyboard input and the winit event loop that renders the solar system.

pub mod error;
pub mod game_loop;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod window;

pub use error::AppError;
pub use game_loop::{FIXED_DT, FpsCounter, GameLoop, MAX_FRAME_TIME};
pub use input::{Hotkey, KeyboardState, MOVEMENT_BINDINGS};
pub use platform::{APP_NAME, PlatformDirs, PlatformError};
pub use renderer::SceneRenderer;
pub use window::{AppState, run};
