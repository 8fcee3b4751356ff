//! Rendering pipeline components
//!
//! The fixed shader pair, its GPU data types and the pipeline that draws
//! vertex ranges with per-object transforms.

pub mod lit_pipeline;
pub mod shader;
pub mod types;

pub use lit_pipeline::{LitPipeline, DEPTH_FORMAT};
pub use shader::{compile_shader, create_pipeline_checked, ShaderReport};
pub use types::{DrawRange, FrameUniforms, ModelUniforms, Vertex};
