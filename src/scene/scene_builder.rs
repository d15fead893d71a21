//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building orrery scenes.

use sol3d_core::{BodyTemplate, MeshSource, OrbitTemplate, Scene};

pub const SUN_TEXTURE: &str = "resources/sun/diffuse.jpg";
pub const EARTH_TEXTURE: &str = "resources/earth/diffuse.png";
pub const MOON_TEXTURE: &str = "resources/moon/diffuse.png";
pub const CUBE_OBJ: &str = "resources/cube.obj";

/// Builder for constructing scenes
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new("two bodies")
///     .add_star("Sun", 2.0, Some("sun.jpg"))
///     .add_satellite("Earth", "Sun", 7.0, 0.02, 0.8, Some("earth.png"))
///     .build();
/// ```
pub struct SceneBuilder {
    scene: Scene,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            scene: Scene::new(name),
        }
    }

    /// Add a sphere that sits still at the origin
    pub fn add_star(self, name: &str, scale: f32, texture: Option<&str>) -> Self {
        let mut body = BodyTemplate::new(name, MeshSource::default_sphere()).with_scale(scale);
        if let Some(texture) = texture {
            body = body.with_texture(texture);
        }
        self.add_body(body)
    }

    /// Add a sphere circling `parent` at `radius`
    pub fn add_satellite(
        self,
        name: &str,
        parent: &str,
        radius: f32,
        speed: f32,
        scale: f32,
        texture: Option<&str>,
    ) -> Self {
        let mut body = BodyTemplate::new(name, MeshSource::default_sphere())
            .with_scale(scale)
            .with_orbit(OrbitTemplate::new(parent, radius, speed));
        if let Some(texture) = texture {
            body = body.with_texture(texture);
        }
        self.add_body(body)
    }

    /// Add a custom body
    pub fn add_body(mut self, body: BodyTemplate) -> Self {
        self.scene.add_body(body);
        self
    }

    /// Build and return the scene
    pub fn build(self) -> Scene {
        self.scene
    }

    /// The built-in Sun/Earth/Moon system
    pub fn solar_system() -> Scene {
        Self::new("Solar System")
            .add_body(
                BodyTemplate::new("Sun", MeshSource::default_sphere())
                    .with_texture(SUN_TEXTURE)
                    .with_scale(2.0)
                    .with_spin(0.005),
            )
            .add_body(
                BodyTemplate::new("Earth", MeshSource::default_sphere())
                    .with_texture(EARTH_TEXTURE)
                    .with_scale(0.8)
                    .with_spin(0.05)
                    .with_tilt(0.41)
                    .with_orbit(OrbitTemplate::new("Sun", 7.0, 0.02)),
            )
            .add_satellite("Moon", "Earth", 2.0, 0.05, 0.3, Some(MOON_TEXTURE))
            .build()
    }

    /// A single spinning textured cube
    pub fn cube() -> Scene {
        Self::new("Cube")
            .add_body(
                BodyTemplate::new("Cube", MeshSource::Obj { path: CUBE_OBJ.to_string() })
                    .with_texture(EARTH_TEXTURE)
                    .with_scale(2.0)
                    .with_spin(0.01)
                    .with_tilt(0.3),
            )
            .build()
    }
}
