//! Application systems
//!
//! Window, animation clock and rendering, kept apart from the event loop in main.rs.

mod animation;
mod render;
mod window;

pub use animation::AnimationSystem;
pub use render::{frame_uniforms, projection_matrix, RenderError, RenderSystem};
pub use window::{WindowError, WindowSystem};
