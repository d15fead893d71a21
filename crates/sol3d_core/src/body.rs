//! Celestial bodies
//!
//! A Body is one drawable object in the system: its mesh and texture, a flat
//! tint color, a size, a spin about its own axis, and optionally a circular
//! orbit around an earlier body.

use sol3d_math::{wrap_angle, Mat4, Vec3};

use crate::mesh::MeshSource;
use crate::Transform;

/// Circular orbit around a parent body in the XZ plane
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orbit {
    /// Index of the body being orbited (always lower than the orbiter's own index)
    pub parent: usize,
    /// Distance from the parent's center
    pub radius: f32,
    /// Angle advanced per reference frame, in radians
    pub speed: f32,
    /// Accumulated orbit angle in radians, kept in `[0, 2π)`
    pub angle: f32,
}

impl Orbit {
    pub fn new(parent: usize, radius: f32, speed: f32) -> Self {
        Self { parent, radius, speed, angle: 0.0 }
    }

    /// Builder: set the starting angle
    pub fn with_angle(mut self, angle: f32) -> Self {
        self.angle = wrap_angle(angle);
        self
    }

    /// Offset from the parent's center at the current angle
    #[inline]
    pub fn offset(&self) -> Vec3 {
        Vec3::new(self.angle.cos() * self.radius, 0.0, self.angle.sin() * self.radius)
    }

    /// Advance the orbit angle by `step` reference frames
    pub fn advance(&mut self, step: f32) {
        self.angle = wrap_angle(self.angle + self.speed * step);
    }
}

/// A body in the orbital system
#[derive(Clone, Debug)]
pub struct Body {
    pub name: String,
    pub mesh: MeshSource,
    /// Diffuse texture path; `None` draws the flat color only
    pub texture: Option<String>,
    /// RGB tint multiplied with the texture
    pub color: [f32; 3],
    /// Uniform scale applied to the mesh
    pub scale: f32,
    /// Self-rotation about the local Y axis, radians per reference frame
    pub spin_speed: f32,
    /// Accumulated self-rotation angle in radians
    pub spin_angle: f32,
    /// Axial tilt about Z in radians
    pub tilt: f32,
    /// Fixed position for bodies that do not orbit anything
    pub anchor: Vec3,
    pub orbit: Option<Orbit>,
    /// World position as of the last update
    pub position: Vec3,
}

impl Body {
    /// Create a stationary, unspun body at the origin
    pub fn new(name: impl Into<String>, mesh: MeshSource) -> Self {
        Self {
            name: name.into(),
            mesh,
            texture: None,
            color: [1.0, 1.0, 1.0],
            scale: 1.0,
            spin_speed: 0.0,
            spin_angle: 0.0,
            tilt: 0.0,
            anchor: Vec3::ZERO,
            orbit: None,
            position: Vec3::ZERO,
        }
    }

    pub fn with_texture(mut self, path: impl Into<String>) -> Self {
        self.texture = Some(path.into());
        self
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_spin(mut self, spin_speed: f32) -> Self {
        self.spin_speed = spin_speed;
        self
    }

    pub fn with_tilt(mut self, tilt: f32) -> Self {
        self.tilt = tilt;
        self
    }

    pub fn with_anchor(mut self, anchor: Vec3) -> Self {
        self.anchor = anchor;
        self.position = anchor;
        self
    }

    pub fn with_orbit(mut self, orbit: Orbit) -> Self {
        self.orbit = Some(orbit);
        self
    }

    /// Current orbit speed, if the body orbits anything
    pub fn orbit_speed(&self) -> Option<f32> {
        self.orbit.map(|o| o.speed)
    }

    /// Transform at the current position and spin
    ///
    /// Spin happens about the local Y axis before the tilt leans that axis
    /// over, so a tilted planet still turns about its own pole.
    pub fn transform(&self) -> Transform {
        Transform::from_position(self.position)
            .with_rotation(Vec3::new(0.0, self.spin_angle, self.tilt))
            .with_uniform_scale(self.scale)
    }

    /// Model matrix for drawing
    pub fn model_matrix(&self) -> Mat4 {
        self.transform().model_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI, TAU};

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_slow_reverse_orbit_stays_below_full_turn() {
        let mut orbit = Orbit::new(0, 1.0, -1e-8);
        orbit.advance(1.0);
        assert!(orbit.angle >= 0.0 && orbit.angle < TAU, "angle {}", orbit.angle);

        let start = Orbit::new(0, 1.0, 0.0).with_angle(-1e-8);
        assert!(start.angle < TAU);
    }

    #[test]
    fn test_orbit_offset_follows_angle() {
        let orbit = Orbit::new(0, 2.0, 0.1).with_angle(FRAC_PI_2);
        let offset = orbit.offset();
        assert!(offset.x.abs() < EPSILON);
        assert!((offset.z - 2.0).abs() < EPSILON);
        assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn test_orbit_advance_wraps() {
        let mut orbit = Orbit::new(0, 1.0, PI).with_angle(PI);
        orbit.advance(1.5);
        // PI + 1.5 * PI = 2.5 PI -> 0.5 PI
        assert!((orbit.angle - FRAC_PI_2).abs() < EPSILON, "got {}", orbit.angle);
    }

    #[test]
    fn test_orbit_advance_scales_with_step() {
        let mut a = Orbit::new(0, 1.0, 0.02);
        let mut b = a;
        a.advance(2.0);
        b.advance(1.0);
        b.advance(1.0);
        assert!((a.angle - b.angle).abs() < EPSILON);
    }

    #[test]
    fn test_body_model_matrix_translates_and_scales() {
        let mut body = Body::new("Earth", MeshSource::default_sphere()).with_scale(0.5);
        body.position = Vec3::new(3.0, 0.0, 0.0);

        let m = body.model_matrix();
        let p = sol3d_math::mat4::transform_point(m, Vec3::Y);
        assert!((p - Vec3::new(3.0, 0.5, 0.0)).length() < EPSILON, "got {:?}", p);
    }

    #[test]
    fn test_tilt_leans_the_pole() {
        let body = Body::new("Earth", MeshSource::default_sphere()).with_tilt(FRAC_PI_2);
        let p = body.transform().transform_point(Vec3::Y);
        // Z rotation takes the pole from +Y towards -X
        assert!((p - Vec3::new(-1.0, 0.0, 0.0)).length() < EPSILON, "got {:?}", p);
    }

    #[test]
    fn test_with_anchor_sets_position() {
        let body = Body::new("Sun", MeshSource::default_sphere()).with_anchor(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(body.orbit_speed(), None);
    }
}
