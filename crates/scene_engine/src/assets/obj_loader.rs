//! OBJ file loader for 3D models
//!
//! Faces are split into one [`SubMesh`] per `usemtl` material. Materials come
//! from the `mtllib` files next to the OBJ; their `map_Kd`/`map_Ks` entries
//! become texture references resolved against the model's directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::assets::{AssetError, MtlData, MtlParser};
use crate::render::primitives::mesh::{Mesh, SubMesh, TextureKind, TextureRef, Vertex};

/// A loaded model: every material group of one OBJ file
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    /// Directory the model was loaded from
    pub directory: PathBuf,
    /// One entry per material group, in first-use order
    pub sub_meshes: Vec<SubMesh>,
}

impl ModelData {
    /// Total triangles across all groups
    pub fn triangle_count(&self) -> usize {
        self.sub_meshes.iter().map(|s| s.mesh.triangle_count()).sum()
    }
}

/// Wavefront OBJ model loader
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file together with its material libraries
    pub fn load_model<P: AsRef<Path>>(path: P) -> Result<ModelData, AssetError> {
        let path = path.as_ref();
        let source = read_to_string(path)?;
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();

        let mut materials = HashMap::new();
        for library in Self::material_libraries(&source) {
            let library_path = directory.join(&library);
            // A model without its .mtl still renders, just untextured
            match read_to_string(&library_path).and_then(|text| MtlParser::parse(&text)) {
                Ok(parsed) => materials.extend(parsed),
                Err(e) => log::warn!("Skipping material library {:?}: {}", library_path, e),
            }
        }

        let sub_meshes = Self::parse(&source, &materials, &directory)?;
        let model = ModelData { directory, sub_meshes };
        log::info!(
            "Loaded model {:?}: {} groups, {} triangles",
            path,
            model.sub_meshes.len(),
            model.triangle_count()
        );
        Ok(model)
    }

    /// Names of every `mtllib` referenced by an OBJ source
    pub fn material_libraries(source: &str) -> Vec<String> {
        source
            .lines()
            .filter_map(|line| line.trim().strip_prefix("mtllib "))
            .map(|rest| rest.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Parse OBJ text into material groups
    ///
    /// Faces are fan-triangulated. Missing normals default to +Y and missing
    /// texture coordinates to (0, 0). Negative (relative) indices are accepted.
    pub fn parse(
        source: &str,
        materials: &HashMap<String, MtlData>,
        directory: &Path,
    ) -> Result<Vec<SubMesh>, AssetError> {
        let mut positions: Vec<[f32; 3]> = Vec::new();
        let mut normals: Vec<[f32; 3]> = Vec::new();
        let mut tex_coords: Vec<[f32; 2]> = Vec::new();

        let mut groups: Vec<SubMesh> = vec![SubMesh::default()];
        let mut current = 0;

        for (line_num, line) in source.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let parts: Vec<&str> = line.split_whitespace().collect();
            match parts[0] {
                "v" => positions.push(parse_floats::<3>(&parts, line_num)?),
                "vn" => normals.push(parse_floats::<3>(&parts, line_num)?),
                "vt" => tex_coords.push(parse_floats::<2>(&parts, line_num)?),
                "usemtl" => {
                    let name = parts[1..].join(" ");
                    current = match groups.iter().position(|g| g.material_name == name) {
                        Some(index) => index,
                        None => {
                            groups.push(Self::new_group(&name, materials, directory));
                            groups.len() - 1
                        }
                    };
                }
                "f" => {
                    if parts.len() < 4 {
                        return Err(parse_error(line_num, "face needs at least three vertices"));
                    }

                    let mesh = &mut groups[current].mesh;
                    let first = mesh.vertices.len() as u32;
                    for corner in &parts[1..] {
                        let vertex = Self::face_vertex(corner, &positions, &tex_coords, &normals, line_num)?;
                        mesh.vertices.push(vertex);
                    }

                    let corners = (parts.len() - 1) as u32;
                    for i in 1..corners - 1 {
                        mesh.indices.extend_from_slice(&[first, first + i, first + i + 1]);
                    }
                }
                _ => {
                    // Ignore other commands
                }
            }
        }

        groups.retain(|g| !g.mesh.is_empty());
        if groups.is_empty() {
            return Err(AssetError::InvalidData("No faces found in OBJ file".to_string()));
        }
        Ok(groups)
    }

    fn new_group(name: &str, materials: &HashMap<String, MtlData>, directory: &Path) -> SubMesh {
        let mut textures = Vec::new();
        match materials.get(name) {
            Some(material) => {
                let maps = [
                    (TextureKind::Diffuse, &material.diffuse_map),
                    (TextureKind::Specular, &material.specular_map),
                ];
                for (kind, map) in maps {
                    if let Some(file) = map {
                        textures.push(TextureRef {
                            kind,
                            path: directory.join(file.replace('\\', "/")),
                        });
                    }
                }
            }
            None => log::debug!("usemtl '{}' has no matching material", name),
        }

        SubMesh {
            mesh: Mesh::default(),
            material_name: name.to_string(),
            textures,
        }
    }

    fn face_vertex(
        corner: &str,
        positions: &[[f32; 3]],
        tex_coords: &[[f32; 2]],
        normals: &[[f32; 3]],
        line_num: usize,
    ) -> Result<Vertex, AssetError> {
        let mut fields = corner.split('/');

        let position = fields
            .next()
            .and_then(|field| resolve_index(field, positions.len()))
            .and_then(|index| positions.get(index))
            .ok_or_else(|| parse_error(line_num, &format!("bad position index in '{}'", corner)))?;

        let tex_coord = fields
            .next()
            .and_then(|field| resolve_index(field, tex_coords.len()))
            .and_then(|index| tex_coords.get(index))
            .copied()
            .unwrap_or([0.0, 0.0]);

        let normal = fields
            .next()
            .and_then(|field| resolve_index(field, normals.len()))
            .and_then(|index| normals.get(index))
            .copied()
            .unwrap_or([0.0, 1.0, 0.0]);

        Ok(Vertex::new(*position, normal, tex_coord))
    }
}

fn read_to_string(path: &Path) -> Result<String, AssetError> {
    fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn parse_error(line_num: usize, message: &str) -> AssetError {
    AssetError::Parse(format!("OBJ line {}: {}", line_num + 1, message))
}

/// OBJ indices are 1-based; negative values count back from the end
fn resolve_index(field: &str, len: usize) -> Option<usize> {
    let raw: i64 = field.parse().ok()?;
    match raw {
        0 => None,
        n if n > 0 => Some(n as usize - 1),
        n => (len as i64 + n).try_into().ok(),
    }
}

fn parse_floats<const N: usize>(parts: &[&str], line_num: usize) -> Result<[f32; N], AssetError> {
    let mut out = [0.0; N];
    for (i, slot) in out.iter_mut().enumerate() {
        let token = parts
            .get(i + 1)
            .ok_or_else(|| parse_error(line_num, &format!("'{}' needs {} values", parts[0], N)))?;
        *slot = token
            .parse()
            .map_err(|_| parse_error(line_num, &format!("invalid number '{}'", token)))?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "
mtllib quad.mtl
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 1
vn 0 0 1
usemtl Painted
f 1/1/1 2/1/1 3/2/1 4/2/1
usemtl Bare
f 1 2 3
";

    fn painted_material() -> HashMap<String, MtlData> {
        let mtl = "newmtl Painted\nmap_Kd tex\\paint.png\nmap_Ks spec.png\n";
        MtlParser::parse(mtl).unwrap()
    }

    #[test]
    fn test_quad_is_fan_triangulated() {
        let groups = ObjLoader::parse(QUAD, &painted_material(), Path::new("models")).unwrap();
        assert_eq!(groups.len(), 2);

        let painted = &groups[0];
        assert_eq!(painted.material_name, "Painted");
        assert_eq!(painted.mesh.vertices.len(), 4);
        assert_eq!(painted.mesh.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(painted.mesh.vertices[2].tex_coord, [1.0, 1.0]);
        assert_eq!(painted.mesh.vertices[0].normal, [0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_textures_resolve_against_model_directory() {
        let groups = ObjLoader::parse(QUAD, &painted_material(), Path::new("models")).unwrap();
        let textures = &groups[0].textures;
        assert_eq!(textures.len(), 2);
        assert_eq!(textures[0].kind, TextureKind::Diffuse);
        assert_eq!(textures[0].path, Path::new("models").join("tex/paint.png"));
        assert_eq!(textures[1].kind, TextureKind::Specular);

        // Unknown material: geometry kept, no textures, default normal
        assert!(groups[1].textures.is_empty());
        assert_eq!(groups[1].mesh.vertices[0].normal, [0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_reused_material_appends_to_group() {
        let source = "v 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl A\nf 1 2 3\nusemtl B\nf 1 2 3\nusemtl A\nf -3 -2 -1\n";
        let groups = ObjLoader::parse(source, &HashMap::new(), Path::new("")).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].mesh.triangle_count(), 2);
        assert_eq!(groups[0].mesh.indices[3..], [3, 4, 5]);
    }

    #[test]
    fn test_bad_index_reports_line() {
        let err = ObjLoader::parse("v 0 0 0\nf 1 2 3\n", &HashMap::new(), Path::new("")).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }

    #[test]
    fn test_no_faces_is_invalid() {
        let err = ObjLoader::parse("v 0 0 0\n", &HashMap::new(), Path::new("")).unwrap_err();
        assert!(matches!(err, AssetError::InvalidData(_)));
    }

    #[test]
    fn test_material_libraries_listed() {
        assert_eq!(ObjLoader::material_libraries(QUAD), vec!["quad.mtl".to_string()]);
    }

    #[test]
    fn test_load_model_from_disk() {
        let dir = std::env::temp_dir().join("scene_engine_obj_test");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("quad.obj"), QUAD).unwrap();
        fs::write(dir.join("quad.mtl"), "newmtl Painted\nmap_Kd paint.png\n").unwrap();

        let model = ObjLoader::load_model(dir.join("quad.obj")).unwrap();
        assert_eq!(model.directory, dir);
        assert_eq!(model.triangle_count(), 3);
        assert_eq!(model.sub_meshes[0].textures[0].path, dir.join("paint.png"));
    }
}
