//! Mesh representation for 3D models
//!
//! Pure CPU-side geometry. GPU upload lives in the OpenGL backend; nothing
//! here depends on a graphics API.

use bytemuck::{Pod, Zeroable};
use std::path::PathBuf;

/// 3D vertex data structure for rendering
///
/// `#[repr(C)]` keeps the layout stable for GPU buffer uploads:
/// position at offset 0, normal at 12, texture coordinates at 24.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }

    /// Size of one vertex in bytes
    pub const STRIDE: usize = std::mem::size_of::<Self>();
}

/// Indexed triangle list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,
    /// Triangle indices into `vertices`
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a mesh from vertices and indices
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Role a texture plays in the material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Diffuse/albedo map (`map_Kd`)
    Diffuse,
    /// Specular map (`map_Ks`)
    Specular,
}

impl TextureKind {
    /// Sampler name stem used by the shaders, e.g. `texture_diffuse`
    pub fn uniform_stem(self) -> &'static str {
        match self {
            Self::Diffuse => "texture_diffuse",
            Self::Specular => "texture_specular",
        }
    }
}

/// Texture reference resolved against the model's directory
#[derive(Debug, Clone, PartialEq)]
pub struct TextureRef {
    /// What the texture is used for
    pub kind: TextureKind,
    /// File on disk
    pub path: PathBuf,
}

/// One material group of a model
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubMesh {
    /// Geometry drawn with this material
    pub mesh: Mesh,
    /// Name from `usemtl`, empty when the OBJ has no materials
    pub material_name: String,
    /// Textures to bind before drawing
    pub textures: Vec<TextureRef>,
}

/// Sampler uniform names for a texture list, numbered per kind from 1
///
/// `[Diffuse, Diffuse, Specular]` with prefix `material.` yields
/// `material.texture_diffuse1`, `material.texture_diffuse2`,
/// `material.texture_specular1`.
pub fn texture_uniform_names(textures: &[TextureRef], prefix: &str) -> Vec<String> {
    let mut diffuse = 0;
    let mut specular = 0;
    textures
        .iter()
        .map(|texture| {
            let number = match texture.kind {
                TextureKind::Diffuse => {
                    diffuse += 1;
                    diffuse
                }
                TextureKind::Specular => {
                    specular += 1;
                    specular
                }
            };
            format!("{}{}{}", prefix, texture.kind.uniform_stem(), number)
        })
        .collect()
}

/// Samplers the lit shader always reads that none of `bound` covers
///
/// Each comes back with the kind whose fallback should fill it, so a mesh
/// without a specular map never samples whatever the previous draw left on
/// that unit.
pub fn missing_sampler_uniforms(bound: &[String], prefix: &str) -> Vec<(String, TextureKind)> {
    [TextureKind::Diffuse, TextureKind::Specular]
        .into_iter()
        .map(|kind| (format!("{}{}1", prefix, kind.uniform_stem()), kind))
        .filter(|(name, _)| !bound.contains(name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout() {
        assert_eq!(Vertex::STRIDE, 32);
        let vertex = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5]);
        let bytes: &[u8] = bytemuck::bytes_of(&vertex);
        assert_eq!(bytes.len(), 32);
    }

    #[test]
    fn test_texture_uniform_names_number_per_kind() {
        let textures = vec![
            TextureRef { kind: TextureKind::Diffuse, path: "a.png".into() },
            TextureRef { kind: TextureKind::Specular, path: "b.png".into() },
            TextureRef { kind: TextureKind::Diffuse, path: "c.png".into() },
        ];
        assert_eq!(
            texture_uniform_names(&textures, "material."),
            vec![
                "material.texture_diffuse1".to_string(),
                "material.texture_specular1".to_string(),
                "material.texture_diffuse2".to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_samplers_cover_absent_kinds() {
        let diffuse_only = vec![TextureRef { kind: TextureKind::Diffuse, path: "a.png".into() }];
        let bound = texture_uniform_names(&diffuse_only, "material.");
        assert_eq!(
            missing_sampler_uniforms(&bound, "material."),
            vec![("material.texture_specular1".to_string(), TextureKind::Specular)]
        );

        assert_eq!(
            missing_sampler_uniforms(&[], ""),
            vec![
                ("texture_diffuse1".to_string(), TextureKind::Diffuse),
                ("texture_specular1".to_string(), TextureKind::Specular),
            ]
        );

        let both = vec![
            "material.texture_diffuse1".to_string(),
            "material.texture_specular1".to_string(),
        ];
        assert!(missing_sampler_uniforms(&both, "material.").is_empty());
    }
}
