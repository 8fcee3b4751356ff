//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`TETRA_SECTION__KEY`)
//!
//! Every field has a default, so a missing file or section is never an error.

use figment::{Figment, providers::{Env, Format, Serialized, Toml}};
use serde::{Serialize, Deserialize};
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
    /// Lighting configuration
    #[serde(default)]
    pub lighting: LightingConfig,
    /// Object motion configuration
    #[serde(default)]
    pub animation: AnimationConfig,
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
    /// 3. Environment variables (`TETRA_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        // Built-in defaults sit underneath every file
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // TETRA_WINDOW__TITLE=Test -> window.title = "Test"
        figment = figment.merge(Env::prefixed("TETRA_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
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
            title: "Volumetric Tetrahedra".to_string(),
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Eye position [x, y, z]; the camera looks down -Z
    pub eye: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 1.0, 20.0],
            fov: 45.0,
            near: 0.1,
            far: 200.0,
        }
    }
}

/// Lighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightingConfig {
    /// Point light position [x, y, z]
    pub position: [f32; 3],
    /// Ambient light strength
    pub ambient_strength: f32,
    /// Specular highlight strength
    pub specular_strength: f32,
    /// Specular exponent
    pub shininess: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 3.0, 2.0],
            ambient_strength: 0.3,
            specular_strength: 0.5,
            shininess: 32.0,
        }
    }
}

/// Motion of the two tetrahedra
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    /// Fixed position of the spinning tetrahedron
    pub spin_offset: [f32; 3],
    /// Spin rate of the first tetrahedron (radians per second)
    pub spin_rate: f32,
    /// Orbit radius of the second tetrahedron
    pub orbit_radius: f32,
    /// Spin rate of the orbiting tetrahedron (radians per second)
    pub orbit_spin_rate: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            spin_offset: [0.0, 0.0, -5.0],
            spin_rate: 1.0,
            orbit_radius: 4.0,
            orbit_spin_rate: 1.5,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderingConfig {
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            background_color: [0.2, 0.3, 0.3, 1.0],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace), used when RUST_LOG is unset
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
#[derive(Debug)]
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

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
