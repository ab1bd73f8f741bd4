//! 2D texture and cubemap upload
//!
//! Decoding failures are never fatal here: the texture is logged and
//! either skipped (2D) or left with an empty face (cubemap).

use std::ffi::c_void;
use std::path::{Path, PathBuf};

use gl::types::{GLenum, GLint, GLuint};

use crate::assets::ImageData;

/// Owned GL texture object
#[derive(Debug)]
pub struct GlTexture {
    id: GLuint,
}

impl GlTexture {
    /// Raw texture name
    pub fn id(&self) -> GLuint {
        self.id
    }

    /// Load an image file into a mipmapped, repeating 2D texture
    ///
    /// Returns `None` (after logging) when the image cannot be decoded.
    pub fn load_2d(path: &Path) -> Option<Self> {
        let image = match ImageData::from_file(path) {
            Ok(image) => image,
            Err(e) => {
                log::warn!("Texture failed to load at path {:?}: {}", path, e);
                return None;
            }
        };

        let texture = Self::generate();
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, texture.id);
            upload(gl::TEXTURE_2D, &image);
            gl::GenerateMipmap(gl::TEXTURE_2D);

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, gl::REPEAT as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, gl::REPEAT as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::LINEAR_MIPMAP_LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
            gl::BindTexture(gl::TEXTURE_2D, 0);
        }

        log::debug!("Uploaded texture {:?} ({}x{})", path, image.width, image.height);
        Some(texture)
    }

    /// 1x1 texture of a single color, used where a mesh has no map
    pub fn solid(color: [u8; 4]) -> Self {
        let image = ImageData::solid_color(1, 1, color);
        let texture = Self::generate();
        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, texture.id);
            upload(gl::TEXTURE_2D, &image);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as GLint);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as GLint);
            gl::BindTexture(gl::TEXTURE_2D, 0);
        }
        texture
    }

    /// Build a cubemap from faces in +X, -X, +Y, -Y, +Z, -Z order
    ///
    /// Bilinear filtering, edge-clamped on S, T and R.
    pub fn load_cubemap(faces: &[PathBuf; 6]) -> Self {
        let texture = Self::generate();
        unsafe {
            gl::BindTexture(gl::TEXTURE_CUBE_MAP, texture.id);
        }

        let mut loaded = 0;
        for (target, path) in cube_face_targets().into_iter().zip(faces.iter()) {
            match ImageData::from_file(path) {
                Ok(image) => {
                    unsafe { upload(target, &image) };
                    loaded += 1;
                }
                Err(e) => log::warn!("Cubemap face failed to load at path {:?}: {}", path, e),
            }
        }

        unsafe {
            gl::TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint);
            gl::TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as GLint);
            gl::TexParameteri(gl::TEXTURE_CUBE_MAP, gl::TEXTURE_WRAP_R, gl::CLAMP_TO_EDGE as GLint);
            gl::BindTexture(gl::TEXTURE_CUBE_MAP, 0);
        }

        log::info!("Loaded cubemap with {}/6 faces", loaded);
        texture
    }

    fn generate() -> Self {
        let mut id = 0;
        unsafe { gl::GenTextures(1, &mut id) };
        Self { id }
    }
}

impl Drop for GlTexture {
    fn drop(&mut self) {
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}

/// Cubemap face targets in the order faces are supplied
pub fn cube_face_targets() -> [GLenum; 6] {
    std::array::from_fn(|i| gl::TEXTURE_CUBE_MAP_POSITIVE_X + i as GLenum)
}

unsafe fn upload(target: GLenum, image: &ImageData) {
    gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
    gl::TexImage2D(
        target,
        0,
        gl::RGBA as GLint,
        image.width as GLint,
        image.height as GLint,
        0,
        gl::RGBA,
        gl::UNSIGNED_BYTE,
        image.data.as_ptr() as *const c_void,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_face_targets_follow_gl_order() {
        assert_eq!(
            cube_face_targets(),
            [
                gl::TEXTURE_CUBE_MAP_POSITIVE_X,
                gl::TEXTURE_CUBE_MAP_NEGATIVE_X,
                gl::TEXTURE_CUBE_MAP_POSITIVE_Y,
                gl::TEXTURE_CUBE_MAP_NEGATIVE_Y,
                gl::TEXTURE_CUBE_MAP_POSITIVE_Z,
                gl::TEXTURE_CUBE_MAP_NEGATIVE_Z,
            ]
        );
    }
}
