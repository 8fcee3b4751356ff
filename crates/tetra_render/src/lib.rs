//! Lit rasterization for the tetrahedra scene
//!
//! This crate provides the wgpu side of the program: context creation, the
//! fixed lit shader pair and its pipeline, and static vertex buffers.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`pipeline::LitPipeline`] - Ambient/diffuse/specular pipeline with per-object transforms
//! - [`pipeline::compile_shader`] - WGSL compilation that logs errors instead of aborting
//! - [`mesh::StaticMesh`] - Vertex buffer uploaded once

pub mod context;
pub mod mesh;
pub mod pipeline;

pub use context::{ContextError, RenderContext};
pub use mesh::StaticMesh;
pub use pipeline::{DrawRange, FrameUniforms, LitPipeline, ModelUniforms, Vertex};
