//! Shader program compilation and uniform upload

use std::collections::HashMap;
use std::ffi::CString;
use std::fs;
use std::path::{Path, PathBuf};

use gl::types::{GLchar, GLenum, GLint, GLuint};

use crate::assets::AssetError;
use crate::foundation::math::{Mat4, Vec3};
use crate::render::{RenderError, RenderResult};

/// Linked vertex + fragment program
pub struct GlShader {
    id: GLuint,
    name: String,
    locations: HashMap<String, GLint>,
}

impl GlShader {
    /// Compile `<dir>/<name>.vs` and `<dir>/<name>.fs` and link them
    pub fn from_files(dir: &Path, name: &str) -> RenderResult<Self> {
        let vertex_path = dir.join(format!("{name}.vs"));
        let fragment_path = dir.join(format!("{name}.fs"));

        let vertex = compile_stage(gl::VERTEX_SHADER, &read_source(&vertex_path)?, &vertex_path)?;
        let fragment = match compile_stage(gl::FRAGMENT_SHADER, &read_source(&fragment_path)?, &fragment_path) {
            Ok(fragment) => fragment,
            Err(e) => {
                unsafe { gl::DeleteShader(vertex) };
                return Err(e);
            }
        };

        let id = unsafe {
            let program = gl::CreateProgram();
            gl::AttachShader(program, vertex);
            gl::AttachShader(program, fragment);
            gl::LinkProgram(program);
            // Stages are owned by the program from here on
            gl::DeleteShader(vertex);
            gl::DeleteShader(fragment);
            program
        };

        let mut success = GLint::from(gl::FALSE);
        unsafe { gl::GetProgramiv(id, gl::LINK_STATUS, &mut success) };
        if success != GLint::from(gl::TRUE) {
            let log = program_info_log(id);
            unsafe { gl::DeleteProgram(id) };
            return Err(RenderError::ShaderLink { name: name.to_string(), log });
        }

        log::info!("Linked shader program '{}'", name);
        Ok(Self {
            id,
            name: name.to_string(),
            locations: HashMap::new(),
        })
    }

    /// Program name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Make this program current
    pub fn activate(&self) {
        unsafe { gl::UseProgram(self.id) };
    }

    /// Cached uniform location; -1 when the program has no such uniform
    fn location(&mut self, uniform: &str) -> GLint {
        if let Some(&location) = self.locations.get(uniform) {
            return location;
        }

        let location = match CString::new(uniform) {
            Ok(c_name) => unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) },
            Err(_) => -1,
        };
        if location < 0 {
            log::trace!("Shader '{}' has no active uniform '{}'", self.name, uniform);
        }
        self.locations.insert(uniform.to_string(), location);
        location
    }

    /// Upload a column-major 4x4 matrix
    pub fn set_mat4(&mut self, uniform: &str, value: &Mat4) {
        let location = self.location(uniform);
        unsafe { gl::UniformMatrix4fv(location, 1, gl::FALSE, value.as_ptr()) };
    }

    /// Upload a vec3
    pub fn set_vec3(&mut self, uniform: &str, value: &Vec3) {
        let location = self.location(uniform);
        unsafe { gl::Uniform3f(location, value.x, value.y, value.z) };
    }

    /// Upload a float
    pub fn set_float(&mut self, uniform: &str, value: f32) {
        let location = self.location(uniform);
        unsafe { gl::Uniform1f(location, value) };
    }

    /// Upload an int or sampler unit
    pub fn set_int(&mut self, uniform: &str, value: i32) {
        let location = self.location(uniform);
        unsafe { gl::Uniform1i(location, value) };
    }
}

impl Drop for GlShader {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) };
    }
}

fn read_source(path: &Path) -> RenderResult<CString> {
    let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    CString::new(text).map_err(|_| {
        RenderError::Asset(AssetError::InvalidData(format!("{:?} contains a NUL byte", path)))
    })
}

fn compile_stage(kind: GLenum, source: &CString, path: &Path) -> RenderResult<GLuint> {
    unsafe {
        let shader = gl::CreateShader(kind);
        gl::ShaderSource(shader, 1, &source.as_ptr(), std::ptr::null());
        gl::CompileShader(shader);

        let mut success = GLint::from(gl::FALSE);
        gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);
        if success != GLint::from(gl::TRUE) {
            let mut len = 0;
            gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);
            let mut buffer = vec![0u8; len.max(1) as usize];
            gl::GetShaderInfoLog(shader, len, std::ptr::null_mut(), buffer.as_mut_ptr() as *mut GLchar);
            gl::DeleteShader(shader);
            return Err(RenderError::ShaderCompilation {
                path: PathBuf::from(path),
                log: trim_log(buffer),
            });
        }
        Ok(shader)
    }
}

fn program_info_log(program: GLuint) -> String {
    unsafe {
        let mut len = 0;
        gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);
        let mut buffer = vec![0u8; len.max(1) as usize];
        gl::GetProgramInfoLog(program, len, std::ptr::null_mut(), buffer.as_mut_ptr() as *mut GLchar);
        trim_log(buffer)
    }
}

fn trim_log(mut buffer: Vec<u8>) -> String {
    while buffer.last() == Some(&0) {
        buffer.pop();
    }
    String::from_utf8_lossy(&buffer).trim_end().to_string()
}
