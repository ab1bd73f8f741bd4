//! Skybox geometry and background pass
//!
//! The skybox is drawn after all opaque geometry. Its vertex shader writes
//! `z = w` so every fragment sits on the far plane; with depth writes off
//! and a less-or-equal test it fills exactly the pixels nothing else
//! covered.

use crate::foundation::math::{Mat4, Mat4Ext};
use crate::render::api::{BackendResult, DepthState, ShaderHandle, ShadingBackend, SkyboxHandle};
use crate::render::lighting::uniforms;

/// Positions of the unit cube, 36 vertices (12 triangles), 3 floats each
#[rustfmt::skip]
pub const SKYBOX_VERTICES: [f32; 108] = [
    -1.0,  1.0, -1.0,
    -1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,

    -1.0, -1.0,  1.0,
    -1.0, -1.0, -1.0,
    -1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,
    -1.0,  1.0,  1.0,
    -1.0, -1.0,  1.0,

     1.0, -1.0, -1.0,
     1.0, -1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0, -1.0,
     1.0, -1.0, -1.0,

    -1.0, -1.0,  1.0,
    -1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0, -1.0,  1.0,
    -1.0, -1.0,  1.0,

    -1.0,  1.0, -1.0,
     1.0,  1.0, -1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
    -1.0,  1.0,  1.0,
    -1.0,  1.0, -1.0,

    -1.0, -1.0, -1.0,
    -1.0, -1.0,  1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
    -1.0, -1.0,  1.0,
     1.0, -1.0,  1.0,
];

/// Number of vertices in [`SKYBOX_VERTICES`]
pub const SKYBOX_VERTEX_COUNT: usize = SKYBOX_VERTICES.len() / 3;

/// Sampler uniform the skybox shader reads the cubemap from
pub const SKYBOX_SAMPLER: &str = "skybox";

/// Shader and cubemap for the background pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkyboxPass {
    /// Skybox shader program
    pub shader: ShaderHandle,
    /// Cube geometry plus cubemap texture
    pub skybox: SkyboxHandle,
}

impl SkyboxPass {
    /// Draw the skybox and restore opaque depth state afterwards
    ///
    /// Only the rotational part of `view` is used, so the box never moves
    /// relative to the camera.
    pub fn render(
        &self,
        backend: &mut dyn ShadingBackend,
        view: &Mat4,
        projection: &Mat4,
    ) -> BackendResult<()> {
        backend.set_depth_state(DepthState::BACKGROUND);

        let result = self.draw(backend, view, projection);

        // Restore even if the draw failed, later frames depend on it
        backend.set_depth_state(DepthState::OPAQUE);
        result
    }

    fn draw(
        &self,
        backend: &mut dyn ShadingBackend,
        view: &Mat4,
        projection: &Mat4,
    ) -> BackendResult<()> {
        backend.use_shader(self.shader)?;
        backend.set_mat4(uniforms::VIEW, &view.without_translation());
        backend.set_mat4(uniforms::PROJECTION, projection);
        backend.set_int(SKYBOX_SAMPLER, 0);
        backend.draw_skybox(self.skybox)
    }
}
