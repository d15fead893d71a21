//! Rendering pipeline components
//!
//! GPU data layouts and the textured mesh pipeline.

pub mod types;
pub mod textured_pipeline;

pub use types::{GpuVertex, ObjectUniforms};
pub use textured_pipeline::{TexturedPipeline, ObjectBinding, DrawCall, DEPTH_FORMAT};
