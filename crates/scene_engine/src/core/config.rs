//! # Application Configuration
//!
//! Settings for the window, the fly camera, resource locations and
//! logging. Every section has defaults matching the stock scene, so a
//! missing config file still yields a working viewer.
//!
//! ```toml
//! [window]
//! title = "Saturn"
//! width = 1024
//! height = 768
//!
//! [camera]
//! movement_speed = 5.0
//! ```

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use crate::config::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// Window creation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    /// Window title
    pub title: String,
    /// Initial client width in pixels
    pub width: u32,
    /// Initial client height in pixels
    pub height: u32,
    /// Wait for vertical sync on buffer swap
    pub vsync: bool,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Saturn Scene".to_string(),
            width: 800,
            height: 600,
            vsync: true,
        }
    }
}

impl WindowSettings {
    /// Width divided by height
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Fly camera tuning and projection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Start position when no state file is present
    pub start_position: Vec3,
    /// Initial yaw in degrees (-90 faces -Z)
    pub yaw: f32,
    /// Initial pitch in degrees
    pub pitch: f32,
    /// Units per second for keyboard motion
    pub movement_speed: f32,
    /// Degrees per pixel of cursor motion
    pub mouse_sensitivity: f32,
    /// Initial vertical field of view in degrees
    pub zoom: f32,
    /// Narrowest field of view reachable by scrolling
    pub min_zoom: f32,
    /// Widest field of view reachable by scrolling
    pub max_zoom: f32,
    /// Absolute pitch limit in degrees
    pub pitch_limit: f32,
    /// Near clipping plane distance
    pub near: f32,
    /// Far clipping plane distance
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            start_position: Vec3::new(0.0, 0.0, 3.0),
            yaw: -90.0,
            pitch: 0.0,
            movement_speed: 2.5,
            mouse_sensitivity: 0.1,
            zoom: 45.0,
            min_zoom: 1.0,
            max_zoom: 45.0,
            pitch_limit: 89.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Where resources live on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePaths {
    /// Root directory models and textures are resolved against
    pub assets_root: PathBuf,
    /// Directory containing `<name>.vs` / `<name>.fs` shader pairs
    pub shader_dir: PathBuf,
    /// Persisted program state file
    pub state_file: PathBuf,
    /// Skybox faces in +X, -X, +Y, -Y, +Z, -Z order
    pub skybox_faces: [PathBuf; 6],
}

impl Default for ResourcePaths {
    fn default() -> Self {
        let skybox = PathBuf::from("resources/textures/skybox");
        Self {
            assets_root: PathBuf::from("resources"),
            shader_dir: PathBuf::from("resources/shaders"),
            state_file: PathBuf::from("resources/program_state.txt"),
            skybox_faces: [
                skybox.join("right.png"),
                skybox.join("left.png"),
                skybox.join("top.png"),
                skybox.join("bottom.png"),
                skybox.join("front.png"),
                skybox.join("back.png"),
            ],
        }
    }
}

/// Logging defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { level: "info".to_string() }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration that encompasses all engine subsystems.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Window creation parameters
    pub window: WindowSettings,
    /// Camera tuning
    pub camera: CameraSettings,
    /// Resource locations
    pub paths: ResourcePaths,
    /// Logging defaults
    pub logging: LoggingSettings,
}

impl ApplicationConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid("window size must be non-zero".to_string()));
        }

        let camera = &self.camera;
        if camera.min_zoom <= 0.0 || camera.min_zoom > camera.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "zoom range [{}, {}] is empty or non-positive",
                camera.min_zoom, camera.max_zoom
            )));
        }
        if camera.near <= 0.0 || camera.far <= camera.near {
            return Err(ConfigError::Invalid(format!(
                "clip planes near={} far={} are invalid",
                camera.near, camera.far
            )));
        }
        if camera.pitch_limit <= 0.0 || camera.pitch_limit >= 90.0 {
            return Err(ConfigError::Invalid(format!(
                "pitch limit {} must lie in (0, 90)",
                camera.pitch_limit
            )));
        }

        Ok(())
    }
}

impl Config for ApplicationConfig {}
