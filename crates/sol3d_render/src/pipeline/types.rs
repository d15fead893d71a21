//! GPU-compatible data types for the textured pipeline
//!
//! These types are designed to match the shader layouts exactly.
//! All types derive Pod and Zeroable for safe GPU buffer operations.

use bytemuck::{Pod, Zeroable};
use sol3d_core::MeshVertex;
use sol3d_math::mat4;

/// A mesh vertex as laid out in the vertex buffer
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    /// Position in model space
    pub position: [f32; 3],
    /// Surface normal
    pub normal: [f32; 3],
    /// Texture coordinate
    pub uv: [f32; 2],
}

impl From<&MeshVertex> for GpuVertex {
    fn from(v: &MeshVertex) -> Self {
        Self {
            position: v.position.to_array(),
            normal: v.normal.to_array(),
            uv: v.uv,
        }
    }
}

/// Per-object uniforms
/// Layout: 208 bytes total (must match textured.wgsl ObjectUniforms)
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    /// Model matrix (64 bytes)
    pub model: [[f32; 4]; 4],
    /// View matrix (64 bytes)
    pub view: [[f32; 4]; 4],
    /// Projection matrix (64 bytes)
    pub projection: [[f32; 4]; 4],
    /// RGB tint + padding (16 bytes)
    pub object_color: [f32; 4],
}

impl Default for ObjectUniforms {
    fn default() -> Self {
        Self {
            model: mat4::IDENTITY,
            view: mat4::IDENTITY,
            projection: mat4::IDENTITY,
            object_color: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

impl ObjectUniforms {
    pub fn new(model: [[f32; 4]; 4], view: [[f32; 4]; 4], projection: [[f32; 4]; 4], color: [f32; 3]) -> Self {
        Self {
            model,
            view,
            projection,
            object_color: [color[0], color[1], color[2], 1.0],
        }
    }
}
