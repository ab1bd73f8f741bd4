//! GPU-side meshes, models and the skybox cube

use std::collections::HashMap;
use std::ffi::c_void;
use std::mem::size_of;
use std::path::PathBuf;
use std::rc::Rc;

use gl::types::{GLsizei, GLsizeiptr, GLuint};

use crate::assets::ModelData;
use crate::render::backends::opengl::shader::GlShader;
use crate::render::backends::opengl::texture::GlTexture;
use crate::render::primitives::mesh::{
    missing_sampler_uniforms, texture_uniform_names, SubMesh, TextureKind, Vertex,
};
use crate::render::skybox::{SKYBOX_VERTEX_COUNT, SKYBOX_VERTICES};

/// Textures already uploaded, keyed by file; `None` marks a failed load
pub type TextureCache = HashMap<PathBuf, Option<Rc<GlTexture>>>;

/// Textures bound to samplers a mesh has no map for
pub struct FallbackTextures {
    diffuse: GlTexture,
    specular: GlTexture,
}

impl FallbackTextures {
    /// White diffuse and black specular, so an untextured mesh shows the
    /// light color without highlights
    pub fn new() -> Self {
        Self {
            diffuse: GlTexture::solid([255, 255, 255, 255]),
            specular: GlTexture::solid([0, 0, 0, 255]),
        }
    }

    fn for_kind(&self, kind: TextureKind) -> &GlTexture {
        match kind {
            TextureKind::Diffuse => &self.diffuse,
            TextureKind::Specular => &self.specular,
        }
    }
}

/// Vertex array plus its buffers
struct VertexArray {
    vao: GLuint,
    vbo: GLuint,
    ebo: Option<GLuint>,
}

impl VertexArray {
    fn generate(indexed: bool) -> Self {
        let (mut vao, mut vbo, mut ebo) = (0, 0, 0);
        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::GenBuffers(1, &mut vbo);
            if indexed {
                gl::GenBuffers(1, &mut ebo);
            }
        }
        Self { vao, vbo, ebo: indexed.then_some(ebo) }
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        unsafe {
            if let Some(ebo) = self.ebo {
                gl::DeleteBuffers(1, &ebo);
            }
            gl::DeleteBuffers(1, &self.vbo);
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

/// One material group on the GPU
struct GlMesh {
    buffers: VertexArray,
    index_count: GLsizei,
    textures: Vec<(String, Rc<GlTexture>)>,
    unbound: Vec<(String, TextureKind)>,
}

impl GlMesh {
    fn upload(sub_mesh: &SubMesh, texture_prefix: &str, cache: &mut TextureCache) -> Self {
        let buffers = VertexArray::generate(true);
        let mesh = &sub_mesh.mesh;
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&mesh.indices);

        unsafe {
            gl::BindVertexArray(buffers.vao);

            gl::BindBuffer(gl::ARRAY_BUFFER, buffers.vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                vertex_bytes.len() as GLsizeiptr,
                vertex_bytes.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );

            if let Some(ebo) = buffers.ebo {
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    index_bytes.len() as GLsizeiptr,
                    index_bytes.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
            }

            // location 0: position, 1: normal, 2: texture coordinates
            let stride = Vertex::STRIDE as GLsizei;
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, stride, std::ptr::null());
            gl::EnableVertexAttribArray(1);
            gl::VertexAttribPointer(1, 3, gl::FLOAT, gl::FALSE, stride, (3 * size_of::<f32>()) as *const c_void);
            gl::EnableVertexAttribArray(2);
            gl::VertexAttribPointer(2, 2, gl::FLOAT, gl::FALSE, stride, (6 * size_of::<f32>()) as *const c_void);

            gl::BindVertexArray(0);
        }

        let names = texture_uniform_names(&sub_mesh.textures, texture_prefix);
        let textures: Vec<(String, Rc<GlTexture>)> = sub_mesh
            .textures
            .iter()
            .zip(names)
            .filter_map(|(texture, uniform)| {
                let loaded = cache
                    .entry(texture.path.clone())
                    .or_insert_with(|| GlTexture::load_2d(&texture.path).map(Rc::new));
                loaded.clone().map(|gl_texture| (uniform, gl_texture))
            })
            .collect();
        let bound: Vec<String> = textures.iter().map(|(uniform, _)| uniform.clone()).collect();
        let unbound = missing_sampler_uniforms(&bound, texture_prefix);

        Self {
            buffers,
            index_count: mesh.indices.len() as GLsizei,
            textures,
            unbound,
        }
    }

    fn draw(&self, shader: &mut GlShader, fallbacks: &FallbackTextures) {
        let loaded = self.textures.iter().map(|(uniform, texture)| (uniform, texture.as_ref()));
        let filled = self.unbound.iter().map(|(uniform, kind)| (uniform, fallbacks.for_kind(*kind)));
        for (unit, (uniform, texture)) in loaded.chain(filled).enumerate() {
            shader.set_int(uniform, unit as i32);
            unsafe {
                gl::ActiveTexture(gl::TEXTURE0 + unit as GLuint);
                gl::BindTexture(gl::TEXTURE_2D, texture.id());
            }
        }

        unsafe {
            gl::BindVertexArray(self.buffers.vao);
            gl::DrawElements(gl::TRIANGLES, self.index_count, gl::UNSIGNED_INT, std::ptr::null());
            gl::BindVertexArray(0);
            gl::ActiveTexture(gl::TEXTURE0);
        }
    }
}

/// Uploaded model: every material group of one file
pub struct GlModel {
    meshes: Vec<GlMesh>,
}

impl GlModel {
    /// Upload model data, loading each referenced texture once per cache
    pub fn upload(model: &ModelData, texture_prefix: &str, cache: &mut TextureCache) -> Self {
        let meshes = model
            .sub_meshes
            .iter()
            .map(|sub_mesh| GlMesh::upload(sub_mesh, texture_prefix, cache))
            .collect();
        Self { meshes }
    }

    /// Draw every mesh with `shader`, which must already be current
    ///
    /// Samplers a mesh has no map for read from `fallbacks`.
    pub fn draw(&self, shader: &mut GlShader, fallbacks: &FallbackTextures) {
        for mesh in &self.meshes {
            mesh.draw(shader, fallbacks);
        }
    }
}

/// Skybox cube and its cubemap
pub struct GlSkybox {
    buffers: VertexArray,
    cubemap: GlTexture,
}

impl GlSkybox {
    /// Upload the cube geometry and take ownership of the cubemap
    pub fn new(cubemap: GlTexture) -> Self {
        let buffers = VertexArray::generate(false);
        let bytes: &[u8] = bytemuck::cast_slice(&SKYBOX_VERTICES);

        unsafe {
            gl::BindVertexArray(buffers.vao);
            gl::BindBuffer(gl::ARRAY_BUFFER, buffers.vbo);
            gl::BufferData(
                gl::ARRAY_BUFFER,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr() as *const c_void,
                gl::STATIC_DRAW,
            );
            gl::EnableVertexAttribArray(0);
            gl::VertexAttribPointer(0, 3, gl::FLOAT, gl::FALSE, (3 * size_of::<f32>()) as GLsizei, std::ptr::null());
            gl::BindVertexArray(0);
        }

        Self { buffers, cubemap }
    }

    /// Draw with the cubemap on texture unit 0
    pub fn draw(&self) {
        unsafe {
            gl::BindVertexArray(self.buffers.vao);
            gl::ActiveTexture(gl::TEXTURE0);
            gl::BindTexture(gl::TEXTURE_CUBE_MAP, self.cubemap.id());
            gl::DrawArrays(gl::TRIANGLES, 0, SKYBOX_VERTEX_COUNT as GLsizei);
            gl::BindVertexArray(0);
        }
    }
}
