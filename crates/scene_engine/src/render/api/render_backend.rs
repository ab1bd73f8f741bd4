//! Backend abstraction traits for the rendering system
//!
//! This module defines the traits a shading backend must implement so the
//! scene renderer can drive it without knowing the graphics API. Uniforms
//! are addressed by name, mirroring how GLSL programs expose them.

use std::path::{Path, PathBuf};

use slotmap::new_key_type;

use crate::foundation::math::{Mat4, Vec3};
use crate::render::RenderError;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, RenderError>;

new_key_type! {
    /// Handle to a linked shader program
    pub struct ShaderHandle;

    /// Handle to an uploaded model (meshes plus their textures)
    pub struct ModelHandle;

    /// Handle to an uploaded skybox (cube geometry plus cubemap)
    pub struct SkyboxHandle;
}

/// Depth comparison used for the depth test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
    /// Pass when closer than the stored depth
    Less,
    /// Pass when closer or equal; lets geometry at the far plane through
    LessEqual,
}

/// Depth buffer state for subsequent draws
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthState {
    /// Whether passing fragments write depth
    pub write: bool,
    /// Depth comparison
    pub func: DepthFunc,
}

impl DepthState {
    /// Regular opaque geometry
    pub const OPAQUE: Self = Self { write: true, func: DepthFunc::Less };

    /// Background drawn at the far plane without touching the depth buffer
    pub const BACKGROUND: Self = Self { write: false, func: DepthFunc::LessEqual };
}

impl Default for DepthState {
    fn default() -> Self {
        Self::OPAQUE
    }
}

/// Uniform upload to the currently used shader
///
/// Setting a uniform the active program does not declare is not an error;
/// GLSL compilers strip unused uniforms and the upload is simply ignored.
pub trait UniformSink {
    /// Upload a 4x4 matrix (column-major)
    fn set_mat4(&mut self, name: &str, value: &Mat4);

    /// Upload a 3-component vector
    fn set_vec3(&mut self, name: &str, value: &Vec3);

    /// Upload a float
    fn set_float(&mut self, name: &str, value: f32);

    /// Upload an integer (also used for sampler units)
    fn set_int(&mut self, name: &str, value: i32);
}

/// Main shading backend trait
///
/// Resource creation lives here too, so a scene can be assembled against
/// any backend. Handles are only meaningful to the backend that issued them.
pub trait ShadingBackend: UniformSink {
    /// Compile and link `<dir>/<name>.vs` + `<dir>/<name>.fs`
    fn create_shader(&mut self, dir: &Path, name: &str) -> BackendResult<ShaderHandle>;

    /// Load a model file and upload its meshes and textures
    ///
    /// `texture_prefix` is prepended to sampler uniform names when the model
    /// binds its textures (e.g. `material.` gives `material.texture_diffuse1`).
    fn create_model(&mut self, path: &Path, texture_prefix: &str) -> BackendResult<ModelHandle>;

    /// Upload the skybox cube and a cubemap from six faces (+X,-X,+Y,-Y,+Z,-Z)
    ///
    /// A face that fails to load is logged and left empty; this only fails
    /// when the cubemap itself cannot be created.
    fn create_skybox(&mut self, faces: &[PathBuf; 6]) -> BackendResult<SkyboxHandle>;

    /// Resize the drawable area (pixels)
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear color and depth buffers; alpha is always 1
    fn clear(&mut self, color: Vec3);

    /// Make a shader current for the uniform uploads and draws that follow
    fn use_shader(&mut self, shader: ShaderHandle) -> BackendResult<()>;

    /// Bind the model's textures and draw all of its meshes
    fn draw_model(&mut self, model: ModelHandle) -> BackendResult<()>;

    /// Change depth write/test state
    fn set_depth_state(&mut self, state: DepthState);

    /// Bind the cubemap to texture unit 0 and draw the skybox cube
    fn draw_skybox(&mut self, skybox: SkyboxHandle) -> BackendResult<()>;
}
