//! 3D Transform (position, rotation, scale)
//!
//! A Transform represents where a body sits, how it is turned, and how big it
//! is. Its model matrix is the scale → rotate → translate chain every body is
//! drawn with.

use sol3d_math::{mat4, Mat4, Vec3};
use serde::{Serialize, Deserialize};

/// A 3D transform with position, Euler rotation, and per-axis scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position in world space
    pub position: Vec3,
    /// Rotation angles in radians about X, Y and Z, applied in that order
    pub rotation: Vec3,
    /// Scale factor per axis
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Builder: set the rotation angles
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Builder: set a per-axis scale
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder: set a uniform scale
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Rotation part only: `Rz * Ry * Rx`
    pub fn rotation_matrix(&self) -> Mat4 {
        mat4::mul_all(&[
            mat4::rotation_z(self.rotation.z),
            mat4::rotation_y(self.rotation.y),
            mat4::rotation_x(self.rotation.x),
        ])
    }

    /// Model matrix: `T * R * S`
    ///
    /// Applies scale, then rotation, then translation.
    pub fn model_matrix(&self) -> Mat4 {
        mat4::mul_all(&[
            mat4::translation(self.position),
            self.rotation_matrix(),
            mat4::scale(self.scale),
        ])
    }

    /// Transform a point from local space to world space
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        mat4::transform_point(self.model_matrix(), p)
    }
}
