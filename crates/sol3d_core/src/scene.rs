//! Scene serialization
//!
//! Provides the Scene struct for loading/saving body layouts from RON files.
//! A scene lists bodies in draw order; orbiting bodies name their parent.

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use std::io;

use crate::mesh::MeshSource;

fn default_color() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn default_scale() -> f32 {
    1.0
}

/// Circular orbit description, resolved against earlier bodies by name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitTemplate {
    /// Name of the body being orbited
    pub parent: String,
    /// Orbit radius
    pub radius: f32,
    /// Radians per reference frame
    pub speed: f32,
    /// Starting angle in radians
    #[serde(default)]
    pub start_angle: f32,
}

impl OrbitTemplate {
    pub fn new(parent: impl Into<String>, radius: f32, speed: f32) -> Self {
        Self {
            parent: parent.into(),
            radius,
            speed,
            start_angle: 0.0,
        }
    }

    pub fn with_start_angle(mut self, angle: f32) -> Self {
        self.start_angle = angle;
        self
    }
}

/// Serializable body description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyTemplate {
    pub name: String,
    pub mesh: MeshSource,
    #[serde(default)]
    pub texture: Option<String>,
    #[serde(default = "default_color")]
    pub color: [f32; 3],
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub spin_speed: f32,
    #[serde(default)]
    pub tilt: f32,
    /// Fixed position [x, y, z], used when the body has no orbit
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default)]
    pub orbit: Option<OrbitTemplate>,
}

impl BodyTemplate {
    pub fn new(name: impl Into<String>, mesh: MeshSource) -> Self {
        Self {
            name: name.into(),
            mesh,
            texture: None,
            color: default_color(),
            scale: default_scale(),
            spin_speed: 0.0,
            tilt: 0.0,
            position: [0.0; 3],
            orbit: None,
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

    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = [x, y, z];
        self
    }

    pub fn with_orbit(mut self, orbit: OrbitTemplate) -> Self {
        self.orbit = Some(orbit);
        self
    }
}

/// A serializable scene containing body templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Bodies in this scene; parents must come before the bodies orbiting them
    pub bodies: Vec<BodyTemplate>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bodies: Vec::new(),
        }
    }

    /// Load a scene from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Add a body template to this scene
    pub fn add_body(&mut self, body: BodyTemplate) {
        self.bodies.push(body);
    }

    /// Builder form of [`add_body`](Scene::add_body)
    pub fn with_body(mut self, body: BodyTemplate) -> Self {
        self.bodies.push(body);
        self
    }

    /// Look up a body template by name
    pub fn body(&self, name: &str) -> Option<&BodyTemplate> {
        self.bodies.iter().find(|b| b.name == name)
    }
}

/// Error loading a scene
#[derive(Debug, thiserror::Error)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Parse error (invalid RON syntax)
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Error saving a scene
#[derive(Debug, thiserror::Error)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Serialization error
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLAR_RON: &str = r#"
Scene(
    name: "Test System",
    bodies: [
        BodyTemplate(
            name: "Sun",
            mesh: Sphere(radius: 1.0, stacks: 16, slices: 32),
            texture: Some("resources/sun/diffuse.jpg"),
            scale: 2.0,
        ),
        BodyTemplate(
            name: "Earth",
            mesh: Sphere(radius: 1.0, stacks: 16, slices: 32),
            color: (0.9, 0.9, 1.0),
            orbit: Some(OrbitTemplate(parent: "Sun", radius: 6.0, speed: 0.02)),
        ),
    ],
)
"#;

    #[test]
    fn test_parse_ron_with_defaults() {
        let scene: Scene = ron::from_str(SOLAR_RON).unwrap();
        assert_eq!(scene.name, "Test System");
        assert_eq!(scene.bodies.len(), 2);

        let sun = scene.body("Sun").unwrap();
        assert_eq!(sun.scale, 2.0);
        assert_eq!(sun.color, [1.0, 1.0, 1.0]);
        assert!(sun.orbit.is_none());

        let earth = scene.body("Earth").unwrap();
        assert_eq!(earth.scale, 1.0);
        assert_eq!(earth.texture, None);
        let orbit = earth.orbit.as_ref().unwrap();
        assert_eq!(orbit.parent, "Sun");
        assert_eq!(orbit.start_angle, 0.0);
    }

    #[test]
    fn test_save_and_load() {
        let scene = Scene::new("Saved")
            .with_body(BodyTemplate::new("Cube", MeshSource::Cube { size: 1.0 }).with_spin(0.01))
            .with_body(
                BodyTemplate::new("Moon", MeshSource::default_sphere())
                    .with_orbit(OrbitTemplate::new("Cube", 2.0, 0.05).with_start_angle(1.0)),
            );

        let path = std::env::temp_dir().join("sol3d_scene_save_test.ron");
        scene.save(&path).unwrap();
        let loaded = Scene::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.name, "Saved");
        assert_eq!(loaded.bodies, scene.bodies);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Scene::load("no/such/scene.ron").unwrap_err();
        assert!(matches!(err, SceneLoadError::Io(_)));
        assert!(err.to_string().starts_with("IO error"));
    }

    #[test]
    fn test_load_invalid_ron() {
        let path = std::env::temp_dir().join("sol3d_scene_invalid_test.ron");
        fs::write(&path, "Scene(name: ").unwrap();
        let err = Scene::load(&path).unwrap_err();
        let _ = fs::remove_file(&path);
        assert!(matches!(err, SceneLoadError::Parse(_)));
    }
}
