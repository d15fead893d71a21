//! 3D Rendering Library
//!
//! This crate provides the wgpu-based pipeline that draws the bodies of an
//! orbital system as textured, flat-tinted meshes.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] - Camera orbiting the origin at a fixed distance
//! - [`texture::Texture`] - Diffuse textures with CPU-built mip chains
//! - [`mesh_buffer::GpuMesh`] - Vertex buffer for one mesh
//! - [`pipeline::TexturedPipeline`] - Depth-tested textured rendering
//! - [`shader`] - WGSL source loading

pub mod context;
pub mod camera;
pub mod shader;
pub mod texture;
pub mod mesh_buffer;
pub mod pipeline;

pub use context::{RenderContext, RenderContextError};
pub use camera::Camera;
pub use shader::ShaderError;
pub use texture::{Texture, TextureError};
pub use mesh_buffer::GpuMesh;

// Re-export core types for convenience
pub use sol3d_core::{Mesh, MeshSource, OrbitalSystem, Body};
