//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`SOL_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use serde::{Serialize, Deserialize};
use sol3d_input::{SpeedLimits, CAMERA_ROTATION_SPEED, MAX_ROTATION_SPEED, MIN_ROTATION_SPEED, SPEED_STEP};
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Orbit speed configuration
    #[serde(default)]
    pub orbit: OrbitConfig,
    /// Scene configuration
    #[serde(default)]
    pub scene: SceneConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`SOL_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // SOL_ORBIT__MAX_SPEED=0.2 -> orbit.max_speed = 0.2
        figment = figment.merge(Env::prefixed("SOL_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "sol3d".to_string(),
            width: 640,
            height: 480,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance from the eye to the origin
    pub distance: f32,
    /// Field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Rotation speed an axis is switched to by J/K/L, radians per reference frame
    pub rotation_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            distance: 15.0,
            fov: 45.0,
            near: 0.1,
            far: 100.0,
            rotation_speed: CAMERA_ROTATION_SPEED,
        }
    }
}

/// Orbit speed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Slowest speed the decrease keys reach
    pub min_speed: f32,
    /// Fastest speed the increase keys reach
    pub max_speed: f32,
    /// Change per key press
    pub speed_step: f32,
    /// Frames per second that speeds are expressed against
    pub reference_rate: f32,
    /// Body driven by A/S
    pub primary_body: String,
    /// Body driven by Z/X
    pub secondary_body: String,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            min_speed: MIN_ROTATION_SPEED,
            max_speed: MAX_ROTATION_SPEED,
            speed_step: SPEED_STEP,
            reference_rate: 60.0,
            primary_body: "Earth".to_string(),
            secondary_body: "Moon".to_string(),
        }
    }
}

impl OrbitConfig {
    /// Speed bounds for the orbit controller
    pub fn limits(&self) -> SpeedLimits {
        SpeedLimits {
            min: self.min_speed,
            max: self.max_speed,
            step: self.speed_step,
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// RON scene file; the built-in solar system is used when unset or unreadable
    pub path: Option<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: Some("scenes/solar_system.ron".to_string()),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
    /// WGSL file to use instead of the built-in shader
    pub shader_path: Option<String>,
    /// Skip triangles facing away from the camera
    pub cull_back_faces: bool,
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.0, 0.0, 0.0, 1.0],
            shader_path: None,
            cull_back_faces: false,
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
#[error("Configuration error: {message}")]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}
