//! # Rendering System
//!
//! Scene-level rendering on top of a small shading-backend trait.
//!
//! ## Architecture
//!
//! - **Primitives**: CPU-side meshes and the fly camera
//! - **Lighting**: directional/spot light data and the uniform contract the
//!   shaders expect
//! - **Skybox**: the cube geometry and the far-plane background pass
//! - **API**: the [`ShadingBackend`] trait plus opaque resource handles
//! - **Backends**: the OpenGL implementation
//! - **Window**: the window-system abstraction and its GLFW implementation
//!
//! Nothing above `backends` and `window::glfw_window` touches OpenGL or GLFW
//! directly, which is what lets the frame loop run against a recording
//! backend in tests.

pub mod api;
pub mod backends;
pub mod lighting;
pub mod primitives;
pub mod skybox;
pub mod window;

pub use api::{
    BackendResult, DepthFunc, DepthState, ModelHandle, ShaderHandle, ShadingBackend,
    SkyboxHandle, UniformSink,
};
pub use lighting::{DirectionalLight, MaterialParams, SpotLight};
pub use primitives::{CameraMovement, FlyCamera, Mesh, SubMesh, Vertex};
pub use skybox::SkyboxPass;
pub use window::{WindowBackend, WindowError};

use std::path::PathBuf;

use thiserror::Error;

use crate::assets::AssetError;

/// High-level rendering error types
///
/// Backend specifics (GL info logs, driver messages) are carried as strings
/// so callers never depend on a graphics API.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The graphics context or its function pointers are unusable
    #[error("Graphics context unavailable: {0}")]
    Context(String),

    /// A shader stage failed to compile
    #[error("Shader compilation failed for {path:?}:\n{log}")]
    ShaderCompilation {
        /// Source file of the failing stage
        path: PathBuf,
        /// Driver info log
        log: String,
    },

    /// A shader program failed to link
    #[error("Shader program '{name}' failed to link:\n{log}")]
    ShaderLink {
        /// Program name (file stem shared by the stages)
        name: String,
        /// Driver info log
        log: String,
    },

    /// A handle does not refer to a live resource
    #[error("Invalid {0} handle")]
    InvalidHandle(&'static str),

    /// Loading a resource from disk failed
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Result type for rendering operations
pub type RenderResult<T> = Result<T, RenderError>;
