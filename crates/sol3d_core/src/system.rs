//! The orbital system
//!
//! Holds every body in parent-first order and advances spins and orbits.
//! Because a parent always sits at a lower index than anything orbiting it,
//! a single forward pass over the bodies leaves every position consistent.

use std::collections::HashMap;

use sol3d_input::{OrbitControl, OrbitTarget};
use sol3d_math::{wrap_angle, Mat4, Vec3};

use crate::body::{Body, Orbit};
use crate::scene::Scene;

/// Error building an orbital system
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SystemError {
    /// Orbit names a body that does not exist
    #[error("body '{body}' orbits unknown body '{parent}'")]
    UnknownParent { body: String, parent: String },
    /// Orbit names a body that comes later in the list (or the body itself)
    #[error("body '{body}' orbits '{parent}', which is not declared before it")]
    ParentAfterChild { body: String, parent: String },
    /// Two bodies share a name
    #[error("duplicate body name '{0}'")]
    DuplicateName(String),
    /// An orbit parent index does not point at an earlier body
    #[error("body '{body}' has invalid parent index {parent}")]
    InvalidParentIndex { body: String, parent: usize },
}

/// All bodies of the system, in parent-first order
#[derive(Clone, Debug, Default)]
pub struct OrbitalSystem {
    bodies: Vec<Body>,
    names: HashMap<String, usize>,
    /// Body driven by the primary orbit keys
    primary: Option<usize>,
    /// Body driven by the secondary orbit keys
    secondary: Option<usize>,
}

impl OrbitalSystem {
    /// Create an empty system
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a system from a scene, resolving orbit parents by name
    pub fn from_scene(scene: &Scene) -> Result<Self, SystemError> {
        let mut system = Self::new();

        for template in &scene.bodies {
            let mut body = Body::new(template.name.clone(), template.mesh.clone())
                .with_color(template.color)
                .with_scale(template.scale)
                .with_spin(template.spin_speed)
                .with_tilt(template.tilt)
                .with_anchor(Vec3::from(template.position));

            if let Some(texture) = &template.texture {
                body = body.with_texture(texture.clone());
            }

            if let Some(orbit) = &template.orbit {
                let parent = match system.index_of(&orbit.parent) {
                    Some(index) => index,
                    None if scene.body(&orbit.parent).is_some() => {
                        return Err(SystemError::ParentAfterChild {
                            body: template.name.clone(),
                            parent: orbit.parent.clone(),
                        });
                    }
                    None => {
                        return Err(SystemError::UnknownParent {
                            body: template.name.clone(),
                            parent: orbit.parent.clone(),
                        });
                    }
                };
                body = body.with_orbit(
                    Orbit::new(parent, orbit.radius, orbit.speed).with_angle(orbit.start_angle),
                );
            }

            system.add_body(body)?;
        }

        log::info!("Built orbital system '{}' with {} bodies", scene.name, system.len());
        Ok(system)
    }

    /// Append a body, returning its index
    ///
    /// The body's orbit parent (if any) must already be in the system. The
    /// new body's position is computed immediately.
    pub fn add_body(&mut self, body: Body) -> Result<usize, SystemError> {
        if self.names.contains_key(&body.name) {
            return Err(SystemError::DuplicateName(body.name));
        }

        let index = self.bodies.len();
        if let Some(orbit) = &body.orbit {
            if orbit.parent >= index {
                return Err(SystemError::InvalidParentIndex {
                    body: body.name,
                    parent: orbit.parent,
                });
            }
        }

        self.names.insert(body.name.clone(), index);
        self.bodies.push(body);
        self.refresh_position(index);
        Ok(index)
    }

    /// Bind the primary and secondary orbit keys to bodies by name
    ///
    /// Names that don't match an orbiting body leave that target unbound.
    pub fn with_speed_targets(mut self, primary: &str, secondary: &str) -> Self {
        self.set_speed_target(OrbitTarget::Primary, primary);
        self.set_speed_target(OrbitTarget::Secondary, secondary);
        self
    }

    /// Bind one speed target to a body by name, returning whether it was bound
    ///
    /// A body already bound to the other target is not bound twice, so the
    /// pause key never toggles the same orbit back and forth.
    pub fn set_speed_target(&mut self, target: OrbitTarget, name: &str) -> bool {
        let other = match target {
            OrbitTarget::Primary => self.secondary,
            OrbitTarget::Secondary => self.primary,
        };
        let mut index = self.index_of(name).filter(|&i| self.bodies[i].orbit.is_some());
        if index.is_none() {
            log::warn!("No orbiting body named '{}' for {:?} speed keys", name, target);
        } else if index == other {
            log::warn!("'{}' is already bound to the other speed keys; {:?} keys left unbound", name, target);
            index = None;
        }
        match target {
            OrbitTarget::Primary => self.primary = index,
            OrbitTarget::Secondary => self.secondary = index,
        }
        index.is_some()
    }

    /// Body bound to a speed target
    pub fn speed_target(&self, target: OrbitTarget) -> Option<&Body> {
        let index = match target {
            OrbitTarget::Primary => self.primary,
            OrbitTarget::Secondary => self.secondary,
        };
        index.map(|i| &self.bodies[i])
    }

    /// Advance every spin and orbit by `step` reference frames
    pub fn update(&mut self, step: f32) {
        for i in 0..self.bodies.len() {
            let body = &mut self.bodies[i];
            body.spin_angle = wrap_angle(body.spin_angle + body.spin_speed * step);
            if let Some(orbit) = &mut body.orbit {
                orbit.advance(step);
            }
            self.refresh_position(i);
        }
    }

    /// Recompute a body's position from its parent (or anchor)
    fn refresh_position(&mut self, index: usize) {
        let position = match self.bodies[index].orbit {
            Some(orbit) => self.bodies[orbit.parent].position + orbit.offset(),
            None => self.bodies[index].anchor,
        };
        self.bodies[index].position = position;
    }

    /// Model matrix of the body at `index`
    pub fn model_matrix(&self, index: usize) -> Option<Mat4> {
        self.bodies.get(index).map(Body::model_matrix)
    }

    /// All bodies in draw order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    pub fn body_by_name(&self, name: &str) -> Option<&Body> {
        self.index_of(name).map(|i| &self.bodies[i])
    }

    /// Orbit speed of the named body, if it exists and orbits something
    pub fn orbit_speed(&self, name: &str) -> Option<f32> {
        self.body_by_name(name).and_then(Body::orbit_speed)
    }

    /// Set the orbit speed of the named body, returning whether it orbits anything
    pub fn set_orbit_speed(&mut self, name: &str, speed: f32) -> bool {
        let Some(index) = self.index_of(name) else {
            return false;
        };
        match &mut self.bodies[index].orbit {
            Some(orbit) => {
                orbit.speed = speed;
                true
            }
            None => false,
        }
    }
}

impl OrbitControl for OrbitalSystem {
    fn orbit_speed(&self, target: OrbitTarget) -> Option<f32> {
        self.speed_target(target).and_then(Body::orbit_speed)
    }

    fn set_orbit_speed(&mut self, target: OrbitTarget, speed: f32) {
        let index = match target {
            OrbitTarget::Primary => self.primary,
            OrbitTarget::Secondary => self.secondary,
        };
        if let Some(orbit) = index.and_then(|i| self.bodies[i].orbit.as_mut()) {
            orbit.speed = speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshSource;
    use crate::scene::{BodyTemplate, OrbitTemplate};
    use std::f32::consts::{FRAC_PI_2, TAU};

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_reverse_spin_stays_below_full_turn() {
        let scene = Scene::new("spin")
            .with_body(BodyTemplate::new("Sun", MeshSource::default_sphere()).with_spin(-1e-8));
        let mut system = OrbitalSystem::from_scene(&scene).unwrap();
        system.update(1.0);
        let spin = system.body_by_name("Sun").unwrap().spin_angle;
        assert!(spin >= 0.0 && spin < TAU, "spin {}", spin);
    }

    #[test]
    fn test_same_body_not_bound_to_both_targets() {
        let mut system = OrbitalSystem::from_scene(&solar_scene())
            .unwrap()
            .with_speed_targets("Earth", "Earth");
        assert_eq!(system.speed_target(OrbitTarget::Primary).map(|b| b.name.as_str()), Some("Earth"));
        assert!(system.speed_target(OrbitTarget::Secondary).is_none());

        // Pausing the shared body must actually pause it
        let mut camera = NoCamera;
        let mut controller = sol3d_input::OrbitController::new();
        controller.process_keyboard(winit::keyboard::KeyCode::Space, winit::event::ElementState::Pressed);
        controller.update(&mut system, &mut camera);
        assert_eq!(system.orbit_speed("Earth"), Some(0.0));
    }

    struct NoCamera;

    impl sol3d_input::CameraSpinControl for NoCamera {
        fn rotation_speed(&self, _axis: sol3d_input::CameraAxis) -> f32 {
            0.0
        }

        fn set_rotation_speed(&mut self, _axis: sol3d_input::CameraAxis, _speed: f32) {}
    }

    fn solar_scene() -> Scene {
        Scene::new("test")
            .with_body(BodyTemplate::new("Sun", MeshSource::default_sphere()))
            .with_body(
                BodyTemplate::new("Earth", MeshSource::default_sphere())
                    .with_orbit(OrbitTemplate::new("Sun", 4.0, 0.02)),
            )
            .with_body(
                BodyTemplate::new("Moon", MeshSource::default_sphere())
                    .with_orbit(OrbitTemplate::new("Earth", 1.0, 0.05)),
            )
    }

    #[test]
    fn test_from_scene_places_bodies() {
        let system = OrbitalSystem::from_scene(&solar_scene()).unwrap();
        assert_eq!(system.len(), 3);
        assert!(approx_eq(system.body_by_name("Sun").unwrap().position, Vec3::ZERO));
        assert!(approx_eq(system.body_by_name("Earth").unwrap().position, Vec3::new(4.0, 0.0, 0.0)));
        assert!(approx_eq(system.body_by_name("Moon").unwrap().position, Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_unknown_parent() {
        let scene = Scene::new("bad").with_body(
            BodyTemplate::new("Moon", MeshSource::default_sphere())
                .with_orbit(OrbitTemplate::new("Earth", 1.0, 0.05)),
        );
        let err = OrbitalSystem::from_scene(&scene).unwrap_err();
        assert!(matches!(err, SystemError::UnknownParent { .. }));
    }

    #[test]
    fn test_parent_after_child() {
        let scene = Scene::new("bad")
            .with_body(
                BodyTemplate::new("Moon", MeshSource::default_sphere())
                    .with_orbit(OrbitTemplate::new("Earth", 1.0, 0.05)),
            )
            .with_body(BodyTemplate::new("Earth", MeshSource::default_sphere()));
        let err = OrbitalSystem::from_scene(&scene).unwrap_err();
        assert_eq!(
            err,
            SystemError::ParentAfterChild { body: "Moon".to_string(), parent: "Earth".to_string() }
        );
    }

    #[test]
    fn test_duplicate_name() {
        let scene = Scene::new("bad")
            .with_body(BodyTemplate::new("Sun", MeshSource::default_sphere()))
            .with_body(BodyTemplate::new("Sun", MeshSource::default_sphere()));
        let err = OrbitalSystem::from_scene(&scene).unwrap_err();
        assert_eq!(err, SystemError::DuplicateName("Sun".to_string()));
    }

    #[test]
    fn test_add_body_rejects_forward_parent() {
        let mut system = OrbitalSystem::new();
        let body = Body::new("Moon", MeshSource::default_sphere()).with_orbit(Orbit::new(0, 1.0, 0.1));
        assert!(matches!(system.add_body(body), Err(SystemError::InvalidParentIndex { .. })));
    }

    #[test]
    fn test_update_moves_moon_with_earth() {
        let mut system = OrbitalSystem::from_scene(&solar_scene()).unwrap();
        // Earth moves a quarter turn, Moon has zero speed so keeps its offset
        system.set_orbit_speed("Earth", FRAC_PI_2);
        system.set_orbit_speed("Moon", 0.0);
        system.update(1.0);

        let earth = system.body_by_name("Earth").unwrap().position;
        let moon = system.body_by_name("Moon").unwrap().position;
        assert!(approx_eq(earth, Vec3::new(0.0, 0.0, 4.0)), "earth at {:?}", earth);
        assert!(approx_eq(moon, Vec3::new(1.0, 0.0, 4.0)), "moon at {:?}", moon);
    }

    #[test]
    fn test_update_is_proportional_to_step() {
        let mut a = OrbitalSystem::from_scene(&solar_scene()).unwrap();
        let mut b = a.clone();
        a.update(3.0);
        for _ in 0..3 {
            b.update(1.0);
        }
        for (x, y) in a.iter().zip(b.iter()) {
            assert!(approx_eq(x.position, y.position));
        }
    }

    #[test]
    fn test_spin_accumulates() {
        let scene = Scene::new("spin")
            .with_body(BodyTemplate::new("Cube", MeshSource::Cube { size: 1.0 }).with_spin(0.5));
        let mut system = OrbitalSystem::from_scene(&scene).unwrap();
        system.update(2.0);
        assert!((system.bodies()[0].spin_angle - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_static_body_uses_scene_position() {
        let scene = Scene::new("static")
            .with_body(BodyTemplate::new("Cube", MeshSource::Cube { size: 1.0 }).with_position(1.0, 2.0, 3.0));
        let mut system = OrbitalSystem::from_scene(&scene).unwrap();
        system.update(10.0);
        assert_eq!(system.bodies()[0].position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_orbit_speed_by_name() {
        let mut system = OrbitalSystem::from_scene(&solar_scene()).unwrap();
        assert_eq!(system.orbit_speed("Earth"), Some(0.02));
        assert_eq!(system.orbit_speed("Sun"), None);
        assert_eq!(system.orbit_speed("Pluto"), None);
        assert!(system.set_orbit_speed("Moon", 0.07));
        assert!(!system.set_orbit_speed("Sun", 0.07));
        assert_eq!(system.orbit_speed("Moon"), Some(0.07));
    }

    #[test]
    fn test_orbit_control_targets() {
        let mut system = OrbitalSystem::from_scene(&solar_scene())
            .unwrap()
            .with_speed_targets("Earth", "Moon");

        assert_eq!(OrbitControl::orbit_speed(&system, OrbitTarget::Primary), Some(0.02));
        OrbitControl::set_orbit_speed(&mut system, OrbitTarget::Secondary, 0.09);
        assert_eq!(system.orbit_speed("Moon"), Some(0.09));
    }

    #[test]
    fn test_non_orbiting_target_is_unbound() {
        let mut system = OrbitalSystem::from_scene(&solar_scene()).unwrap();
        assert!(!system.set_speed_target(OrbitTarget::Primary, "Sun"));
        assert_eq!(OrbitControl::orbit_speed(&system, OrbitTarget::Primary), None);
    }

    #[test]
    fn test_model_matrix_follows_position() {
        let system = OrbitalSystem::from_scene(&solar_scene()).unwrap();
        let m = system.model_matrix(1).unwrap();
        assert!((m[3][0] - 4.0).abs() < EPSILON);
        assert!(system.model_matrix(7).is_none());
    }
}
