//! Matrix math for the tetrahedra scene
//!
//! Column-major 4x4 matrices stored as `[[f32; 4]; 4]`, the layout wgpu
//! uniforms expect, with the closed-form constructors the scene needs.

pub mod mat4;

pub use mat4::Mat4;
