//! Two lit tetrahedra, animated and drawn with wgpu
//!
//! The binary in main.rs owns the event loop; everything it drives lives here
//! so the scene and configuration can be tested without a window.

pub mod config;
pub mod scene;
pub mod systems;
