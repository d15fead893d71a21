//! Core types for sol3d
//!
//! This crate provides everything about the simulated system that does not
//! touch the GPU:
//!
//! - [`Transform`] - Position, rotation, and scale in 3D space
//! - [`Mesh`] - CPU triangle list, with cube/sphere generators and an OBJ loader
//! - [`Body`] / [`Orbit`] - A drawable body and its circular orbit
//! - [`OrbitalSystem`] - Ordered bodies, advanced one step at a time
//! - [`Scene`] - Loadable/saveable description of a system
//! - [`SceneValidator`] - Checks a scene before it is built

mod transform;
mod mesh;
mod obj;
mod body;
mod system;
mod scene;
mod scene_validator;

pub use transform::Transform;
pub use mesh::{Mesh, MeshVertex, MeshSource, MeshError};
pub use obj::{load_obj, parse_obj};
pub use body::{Body, Orbit};
pub use system::{OrbitalSystem, SystemError};
pub use scene::{Scene, BodyTemplate, OrbitTemplate, SceneLoadError, SceneSaveError};
pub use scene_validator::{SceneValidator, ValidationError};

// Re-export commonly used math types for convenience
pub use sol3d_math::{Mat4, Vec3};
