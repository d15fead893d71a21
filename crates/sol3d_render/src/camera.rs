//! Orbiting view camera
//!
//! The camera sits `distance` units out along +Z looking at the origin. Two
//! accumulated angles turn the whole system in front of it, about the X axis
//! (tumbling towards the viewer) and the Z axis (rolling in the view plane).
//! Each angle advances at its own constant rate and can be switched on and off.

use sol3d_input::{CameraAxis, CameraSpinControl};
use sol3d_math::{mat4, wrap_angle, Mat4, Vec3};

/// Camera looking at the origin from a fixed distance
#[derive(Clone, Debug)]
pub struct Camera {
    /// Distance from the eye to the origin
    pub distance: f32,
    /// Radians per reference frame about the X axis
    pub x_rotation_speed: f32,
    /// Radians per reference frame about the Z axis
    pub z_rotation_speed: f32,

    x_angle: f32,
    z_angle: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(15.0)
    }
}

impl Camera {
    /// Create a still camera `distance` units from the origin
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            x_rotation_speed: 0.0,
            z_rotation_speed: 0.0,
            x_angle: 0.0,
            z_angle: 0.0,
        }
    }

    /// Advance both rotations by `step` reference frames
    pub fn update(&mut self, step: f32) {
        self.x_angle = wrap_angle(self.x_angle + self.x_rotation_speed * step);
        self.z_angle = wrap_angle(self.z_angle + self.z_rotation_speed * step);
    }

    /// Return to the initial view and stop rotating
    pub fn reset(&mut self) {
        self.x_angle = 0.0;
        self.z_angle = 0.0;
        self.x_rotation_speed = 0.0;
        self.z_rotation_speed = 0.0;
    }

    pub fn x_angle(&self) -> f32 {
        self.x_angle
    }

    pub fn z_angle(&self) -> f32 {
        self.z_angle
    }

    /// World to view transform
    pub fn view_matrix(&self) -> Mat4 {
        let look = mat4::look_at(Vec3::new(0.0, 0.0, self.distance), Vec3::ZERO, Vec3::Y);
        mat4::mul_all(&[look, mat4::rotation_x(self.x_angle), mat4::rotation_z(self.z_angle)])
    }

    /// Eye position in world space
    pub fn eye_position(&self) -> Vec3 {
        let inverse = mat4::mul(mat4::rotation_z(-self.z_angle), mat4::rotation_x(-self.x_angle));
        mat4::transform_point(inverse, Vec3::new(0.0, 0.0, self.distance))
    }
}

impl CameraSpinControl for Camera {
    fn rotation_speed(&self, axis: CameraAxis) -> f32 {
        match axis {
            CameraAxis::X => self.x_rotation_speed,
            CameraAxis::Z => self.z_rotation_speed,
        }
    }

    fn set_rotation_speed(&mut self, axis: CameraAxis, speed: f32) {
        match axis {
            CameraAxis::X => self.x_rotation_speed = speed,
            CameraAxis::Z => self.z_rotation_speed = speed,
        }
    }
}
