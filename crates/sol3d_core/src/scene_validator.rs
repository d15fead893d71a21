//! Scene validation
//!
//! Validates scenes for common errors before they are turned into an
//! [`OrbitalSystem`](crate::OrbitalSystem): empty scenes, duplicate names,
//! orbits around missing or later bodies, and nonsensical sizes.

use std::collections::HashSet;

use crate::scene::Scene;

/// Validation error found in a scene
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Scene has no bodies
    #[error("Scene has no bodies")]
    EmptyScene,
    /// Duplicate body name found
    #[error("Duplicate body name: '{0}'")]
    DuplicateName(String),
    /// Orbit names a parent that is not in the scene
    #[error("Body '{body}' orbits unknown body '{parent}'")]
    UnknownParent { body: String, parent: String },
    /// Orbit names a parent listed after the orbiting body
    #[error("Body '{body}' orbits '{parent}', which must be listed before it")]
    ParentAfterChild { body: String, parent: String },
    /// Scale is zero, negative or not a number
    #[error("Body '{0}' has a non-positive scale")]
    InvalidScale(String),
    /// Orbit radius is negative or not a number
    #[error("Body '{0}' has a negative orbit radius")]
    InvalidRadius(String),
}

/// Scene validator that checks for common errors
pub struct SceneValidator;

impl SceneValidator {
    /// Validate a scene, returning all errors found
    ///
    /// Returns an empty vector if no validation errors are detected.
    pub fn validate(scene: &Scene) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if scene.bodies.is_empty() {
            errors.push(ValidationError::EmptyScene);
        }

        let all_names: HashSet<&str> = scene.bodies.iter().map(|b| b.name.as_str()).collect();
        let mut seen_names = HashSet::new();

        for body in &scene.bodies {
            if let Some(orbit) = &body.orbit {
                if !all_names.contains(orbit.parent.as_str()) {
                    errors.push(ValidationError::UnknownParent {
                        body: body.name.clone(),
                        parent: orbit.parent.clone(),
                    });
                } else if !seen_names.contains(orbit.parent.as_str()) {
                    errors.push(ValidationError::ParentAfterChild {
                        body: body.name.clone(),
                        parent: orbit.parent.clone(),
                    });
                }

                if !(orbit.radius >= 0.0) {
                    errors.push(ValidationError::InvalidRadius(body.name.clone()));
                }
            }

            if !(body.scale > 0.0) {
                errors.push(ValidationError::InvalidScale(body.name.clone()));
            }

            if !seen_names.insert(body.name.as_str()) {
                errors.push(ValidationError::DuplicateName(body.name.clone()));
            }
        }

        errors
    }

    /// Validate and return Result (Ok if no errors, Err with all errors)
    pub fn validate_or_error(scene: &Scene) -> Result<(), Vec<ValidationError>> {
        let errors = Self::validate(scene);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshSource;
    use crate::scene::{BodyTemplate, OrbitTemplate};

    fn sphere(name: &str) -> BodyTemplate {
        BodyTemplate::new(name, MeshSource::default_sphere())
    }

    #[test]
    fn test_valid_scene() {
        let scene = Scene::new("ok")
            .with_body(sphere("Sun"))
            .with_body(sphere("Earth").with_orbit(OrbitTemplate::new("Sun", 6.0, 0.02)))
            .with_body(sphere("Moon").with_orbit(OrbitTemplate::new("Earth", 1.5, 0.05)));
        assert!(SceneValidator::validate_or_error(&scene).is_ok());
    }

    #[test]
    fn test_empty_scene() {
        let errors = SceneValidator::validate(&Scene::new("empty"));
        assert_eq!(errors, vec![ValidationError::EmptyScene]);
    }

    #[test]
    fn test_duplicate_name() {
        let scene = Scene::new("dup").with_body(sphere("Sun")).with_body(sphere("Sun"));
        let errors = SceneValidator::validate(&scene);
        assert_eq!(errors, vec![ValidationError::DuplicateName("Sun".to_string())]);
    }

    #[test]
    fn test_unknown_parent() {
        let scene = Scene::new("orphan")
            .with_body(sphere("Moon").with_orbit(OrbitTemplate::new("Earth", 1.5, 0.05)));
        let errors = SceneValidator::validate(&scene);
        assert!(matches!(&errors[0], ValidationError::UnknownParent { parent, .. } if parent == "Earth"));
    }

    #[test]
    fn test_parent_after_child() {
        let scene = Scene::new("order")
            .with_body(sphere("Moon").with_orbit(OrbitTemplate::new("Earth", 1.5, 0.05)))
            .with_body(sphere("Earth"));
        let errors = SceneValidator::validate(&scene);
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ValidationError::ParentAfterChild { .. }));
    }

    #[test]
    fn test_self_orbit_is_rejected() {
        let scene = Scene::new("self")
            .with_body(sphere("Loop").with_orbit(OrbitTemplate::new("Loop", 1.0, 0.01)));
        let errors = SceneValidator::validate(&scene);
        assert!(matches!(errors[0], ValidationError::ParentAfterChild { .. }));
    }

    #[test]
    fn test_bad_scale_and_radius() {
        let scene = Scene::new("bad")
            .with_body(sphere("Sun").with_scale(0.0))
            .with_body(sphere("Earth").with_orbit(OrbitTemplate::new("Sun", -1.0, 0.02)));
        let errors = SceneValidator::validate(&scene);
        assert!(errors.contains(&ValidationError::InvalidScale("Sun".to_string())));
        assert!(errors.contains(&ValidationError::InvalidRadius("Earth".to_string())));
    }

    #[test]
    fn test_error_display() {
        let err = ValidationError::ParentAfterChild {
            body: "Moon".to_string(),
            parent: "Earth".to_string(),
        };
        assert_eq!(err.to_string(), "Body 'Moon' orbits 'Earth', which must be listed before it");
    }
}
