//! Loading the configured scene

use sol3d_core::{Scene, SceneValidator};
use super::SceneBuilder;

/// Load the scene at `path`, or the built-in solar system
///
/// Falls back when no path is set, the file cannot be read or parsed, or the
/// scene fails validation.
pub fn load_scene(path: Option<&str>) -> Scene {
    let Some(path) = path else {
        log::info!("No scene file configured, using the built-in solar system");
        return SceneBuilder::solar_system();
    };

    let scene = match Scene::load(path) {
        Ok(scene) => scene,
        Err(e) => {
            log::warn!("Failed to load scene '{}': {}. Using the built-in solar system.", path, e);
            return SceneBuilder::solar_system();
        }
    };

    if let Err(errors) = SceneValidator::validate_or_error(&scene) {
        for error in &errors {
            log::warn!("Scene '{}': {}", path, error);
        }
        log::warn!("Scene '{}' is invalid. Using the built-in solar system.", path);
        return SceneBuilder::solar_system();
    }

    log::info!("Loaded scene '{}' with {} bodies", scene.name, scene.bodies.len());
    scene
}
