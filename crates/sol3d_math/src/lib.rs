//! 3D Mathematics Library
//!
//! This crate provides the small vector and matrix toolkit used by sol3d.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Mat4`] - column-major 4x4 matrix (see [`mat4`] for constructors)
//! - [`wrap_angle`] - keeps accumulated angles in `[0, 2π)`

mod angle;
mod vec3;
pub mod mat4;

pub use angle::wrap_angle;
pub use vec3::Vec3;
pub use mat4::Mat4;
