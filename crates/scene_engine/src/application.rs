//! Application trait
//!
//! An application describes *what* to draw; the engine owns the window,
//! the backend and the frame loop.

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::ApplicationConfig;
use crate::engine::EngineError;
use crate::render::api::ShadingBackend;
use crate::render::RenderError;
use crate::scene::Scene;

/// Application lifecycle trait
pub trait Application {
    /// Load shaders, models and the skybox through `backend` and assemble
    /// the scene
    ///
    /// Called once during engine initialization, after the graphics
    /// context exists.
    fn build_scene(
        &mut self,
        backend: &mut dyn ShadingBackend,
        config: &ApplicationConfig,
    ) -> Result<Scene, AppError>;
}

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Engine error propagated to application level
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Shader, model or skybox creation failed
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Scene could not be assembled
    #[error("Scene setup failed: {0}")]
    Scene(String),
}
