//! Scene construction utilities
//!
//! Built-in scenes, and loading the configured scene file with a fallback
//! to the built-in solar system.

mod scene_builder;
mod scene_loader;

pub use scene_builder::SceneBuilder;
pub use scene_loader::load_scene;
