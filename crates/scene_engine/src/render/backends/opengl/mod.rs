//! OpenGL 3.3 core shading backend
//!
//! Owns every GL object the scene uses. Resources are addressed through
//! slotmap handles so the rest of the engine never sees raw GL names, and
//! they are released (in reverse creation order per kind) when the backend
//! is dropped.

pub mod model;
pub mod shader;
pub mod texture;

use std::path::{Path, PathBuf};

use gl::types::GLsizei;
use slotmap::SlotMap;

use crate::assets::ObjLoader;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::api::{
    BackendResult, DepthFunc, DepthState, ModelHandle, ShaderHandle, ShadingBackend, SkyboxHandle,
    UniformSink,
};
use crate::render::window::GlfwWindow;
use crate::render::{RenderError, RenderResult, WindowBackend};

use model::{FallbackTextures, GlModel, GlSkybox, TextureCache};
use shader::GlShader;
use texture::GlTexture;

/// OpenGL implementation of [`ShadingBackend`]
pub struct GlBackend {
    // Field order is drop order: models and skyboxes before the textures
    // they share through the cache, shaders last.
    models: SlotMap<ModelHandle, GlModel>,
    skyboxes: SlotMap<SkyboxHandle, GlSkybox>,
    texture_cache: TextureCache,
    fallback_textures: FallbackTextures,
    shaders: SlotMap<ShaderHandle, GlShader>,
    current_shader: Option<ShaderHandle>,
}

impl GlBackend {
    /// Load GL function pointers from the window's context and set the
    /// global pipeline state
    ///
    /// Fails when the loader cannot resolve core entry points, which means
    /// the context is unusable.
    pub fn new(window: &mut GlfwWindow) -> RenderResult<Self> {
        gl::load_with(|symbol| window.get_proc_address(symbol));

        if !gl::Clear::is_loaded() || !gl::CreateProgram::is_loaded() {
            return Err(RenderError::Context(
                "failed to load OpenGL function pointers".to_string(),
            ));
        }

        unsafe {
            gl::Enable(gl::DEPTH_TEST);
            gl::DepthFunc(gl::LESS);
            gl::Enable(gl::BLEND);
            gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            gl::Enable(gl::CULL_FACE);
            gl::CullFace(gl::BACK);
        }

        let mut backend = Self {
            models: SlotMap::with_key(),
            skyboxes: SlotMap::with_key(),
            texture_cache: TextureCache::new(),
            fallback_textures: FallbackTextures::new(),
            shaders: SlotMap::with_key(),
            current_shader: None,
        };
        let (width, height) = window.framebuffer_size();
        backend.set_viewport(width, height);

        log::info!("OpenGL backend initialized");
        Ok(backend)
    }

    fn current(&mut self) -> Option<&mut GlShader> {
        let handle = self.current_shader?;
        self.shaders.get_mut(handle)
    }
}

impl UniformSink for GlBackend {
    fn set_mat4(&mut self, name: &str, value: &Mat4) {
        if let Some(shader) = self.current() {
            shader.set_mat4(name, value);
        }
    }

    fn set_vec3(&mut self, name: &str, value: &Vec3) {
        if let Some(shader) = self.current() {
            shader.set_vec3(name, value);
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        if let Some(shader) = self.current() {
            shader.set_float(name, value);
        }
    }

    fn set_int(&mut self, name: &str, value: i32) {
        if let Some(shader) = self.current() {
            shader.set_int(name, value);
        }
    }
}

impl ShadingBackend for GlBackend {
    fn create_shader(&mut self, dir: &Path, name: &str) -> BackendResult<ShaderHandle> {
        let shader = GlShader::from_files(dir, name)?;
        Ok(self.shaders.insert(shader))
    }

    fn create_model(&mut self, path: &Path, texture_prefix: &str) -> BackendResult<ModelHandle> {
        let data = ObjLoader::load_model(path)?;
        let model = GlModel::upload(&data, texture_prefix, &mut self.texture_cache);
        Ok(self.models.insert(model))
    }

    fn create_skybox(&mut self, faces: &[PathBuf; 6]) -> BackendResult<SkyboxHandle> {
        let cubemap = GlTexture::load_cubemap(faces);
        Ok(self.skyboxes.insert(GlSkybox::new(cubemap)))
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        unsafe { gl::Viewport(0, 0, width as GLsizei, height as GLsizei) };
    }

    fn clear(&mut self, color: Vec3) {
        unsafe {
            gl::ClearColor(color.x, color.y, color.z, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    fn use_shader(&mut self, shader: ShaderHandle) -> BackendResult<()> {
        let program = self.shaders.get(shader).ok_or(RenderError::InvalidHandle("shader"))?;
        program.activate();
        self.current_shader = Some(shader);
        Ok(())
    }

    fn draw_model(&mut self, model: ModelHandle) -> BackendResult<()> {
        let model = self.models.get(model).ok_or(RenderError::InvalidHandle("model"))?;
        let shader = self
            .current_shader
            .and_then(|handle| self.shaders.get_mut(handle))
            .ok_or(RenderError::InvalidHandle("shader"))?;
        model.draw(shader, &self.fallback_textures);
        Ok(())
    }

    fn set_depth_state(&mut self, state: DepthState) {
        let func = match state.func {
            DepthFunc::Less => gl::LESS,
            DepthFunc::LessEqual => gl::LEQUAL,
        };
        unsafe {
            gl::DepthMask(if state.write { gl::TRUE } else { gl::FALSE });
            gl::DepthFunc(func);
        }
    }

    fn draw_skybox(&mut self, skybox: SkyboxHandle) -> BackendResult<()> {
        let skybox = self.skyboxes.get(skybox).ok_or(RenderError::InvalidHandle("skybox"))?;
        skybox.draw();
        Ok(())
    }
}
