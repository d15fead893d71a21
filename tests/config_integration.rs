//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use sol3d::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SOL_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("SOL_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("SOL_ORBIT__MAX_SPEED", "0.2");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.orbit.max_speed, 0.2);
    assert_eq!(config.orbit.limits().max, 0.2);
    std::env::remove_var("SOL_ORBIT__MAX_SPEED");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("SOL_WINDOW__TITLE");
    std::env::remove_var("SOL_ORBIT__MAX_SPEED");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load().unwrap();
    assert_eq!(config.orbit.primary_body, "Earth");
    assert_eq!(config.orbit.secondary_body, "Moon");
    assert_eq!(config.scene.path.as_deref(), Some("scenes/solar_system.ron"));
}

#[test]
#[serial]
fn test_missing_directory_uses_defaults() {
    let config = AppConfig::load_from("no/such/config/dir").unwrap();
    assert_eq!(config.window.width, 640);
    assert_eq!(config.camera.fov, 45.0);
}

#[test]
#[serial]
fn test_bad_env_value_is_an_error() {
    std::env::set_var("SOL_WINDOW__WIDTH", "wide");
    let result = AppConfig::load_from("no/such/config/dir");
    std::env::remove_var("SOL_WINDOW__WIDTH");

    let err = result.unwrap_err();
    assert!(err.to_string().starts_with("Configuration error:"));
}

#[test]
#[serial]
fn test_bundled_scenes_load() {
    for path in ["scenes/solar_system.ron", "scenes/cube.ron"] {
        let scene = sol3d_core::Scene::load(path).unwrap();
        assert!(sol3d_core::SceneValidator::validate(&scene).is_empty(), "{} is invalid", path);
        sol3d_core::OrbitalSystem::from_scene(&scene).unwrap();
    }
}
