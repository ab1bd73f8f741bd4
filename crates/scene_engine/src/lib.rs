//! # Scene Engine
//!
//! An interactive OpenGL scene viewer: a fly camera, directional and spot
//! lighting, a scene graph with animated spins, a cubemap skybox and a
//! small debug overlay, driven by a single-threaded frame loop.
//!
//! ## Features
//!
//! - **Fly Camera**: WASD/QE motion, mouse-look and scroll zoom
//! - **Lighting**: directional sun plus a tracked spot light, bound per shader group
//! - **Assets**: Wavefront OBJ/MTL models and image textures
//! - **Skybox**: cubemap background drawn at the far plane
//! - **Persistence**: camera, clear color and overlay state survive restarts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use scene_engine::prelude::*;
//!
//! struct MyScene;
//!
//! impl Application for MyScene {
//!     fn build_scene(
//!         &mut self,
//!         backend: &mut dyn ShadingBackend,
//!         config: &ApplicationConfig,
//!     ) -> Result<Scene, AppError> {
//!         // Load shaders and models through `backend`
//!         let sun = DirectionalLight {
//!             direction: Vec3::new(-1.0, -1.0, 0.0),
//!             ambient: Vec3::new(0.2, 0.2, 0.2),
//!             diffuse: Vec3::new(0.6, 0.6, 0.6),
//!             specular: Vec3::new(1.0, 1.0, 1.0),
//!         };
//!         let lighting = SceneLighting { directional: sun, spot: None };
//!         Ok(Scene::new(SceneGraph::new(), lighting))
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApplicationConfig::default();
//!     let mut window = GlfwWindow::new(&config.window)?;
//!     let backend = GlBackend::new(&mut window)?;
//!     let overlay = TitleBarOverlay::new(config.window.title.clone());
//!     let mut engine = Engine::new(window, backend, overlay, &mut MyScene, config)?;
//!     engine.run()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core engine modules
pub mod core;
pub mod config;

pub mod foundation;
pub mod assets;
pub mod render;
pub mod input;
pub mod state;
pub mod scene;
pub mod ui;

mod application;
mod engine;

#[cfg(test)]
mod test_support;

pub use application::{Application, AppError};
pub use engine::{Engine, EngineError, LoopPhase};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError,
        Engine, EngineError, LoopPhase,
        foundation::{
            math::{Vec3, Mat4, Mat4Ext},
            time::Timer,
        },
        assets::{ObjLoader, ModelData, ImageData},
        render::{
            FlyCamera, ShadingBackend, SkyboxPass,
            lighting::{DirectionalLight, SpotLight, SceneLighting, GroupLighting, MaterialParams},
            backends::GlBackend,
            window::GlfwWindow,
        },
        scene::{Scene, SceneGraph, SceneObject, ShaderGroup, LocalTransform, Rotation},
        input::{InputEvent, KeyCode, CursorMode},
        ui::{DebugOverlay, TitleBarOverlay},
        core::config::ApplicationConfig,
        config::Config,
    };
}
