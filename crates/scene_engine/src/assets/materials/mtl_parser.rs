//! MTL (Material Template Library) file parser
//!
//! Parses Wavefront .mtl files into structured data for material creation.
//! Only the Phong terms and the texture maps the shaders sample are kept.

use std::collections::HashMap;

use crate::assets::AssetError;
use crate::foundation::math::Vec3;

/// Parsed MTL material data (Wavefront Phong model)
#[derive(Debug, Clone, PartialEq)]
pub struct MtlData {
    /// Material name
    pub name: String,
    /// Ambient color (Ka)
    pub ambient: Vec3,
    /// Diffuse color (Kd)
    pub diffuse: Vec3,
    /// Specular color (Ks)
    pub specular: Vec3,
    /// Specular exponent (Ns)
    pub specular_exponent: f32,
    /// Dissolve/opacity (d) - 0.0 = transparent, 1.0 = opaque
    pub dissolve: f32,
    /// Diffuse texture map (map_Kd)
    pub diffuse_map: Option<String>,
    /// Specular texture map (map_Ks)
    pub specular_map: Option<String>,
    /// Bump/normal map (map_Bump or bump)
    pub normal_map: Option<String>,
}

impl Default for MtlData {
    fn default() -> Self {
        Self {
            name: String::new(),
            ambient: Vec3::new(1.0, 1.0, 1.0),
            diffuse: Vec3::new(0.8, 0.8, 0.8),
            specular: Vec3::new(0.5, 0.5, 0.5),
            specular_exponent: 32.0,
            dissolve: 1.0,
            diffuse_map: None,
            specular_map: None,
            normal_map: None,
        }
    }
}

/// MTL file parser
pub struct MtlParser;

impl MtlParser {
    /// Parse MTL file contents into a map of material name -> MtlData
    pub fn parse(contents: &str) -> Result<HashMap<String, MtlData>, AssetError> {
        let mut materials = HashMap::new();
        let mut current_material: Option<MtlData> = None;

        for (line_num, line) in contents.lines().enumerate() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            let Some(command) = tokens.next() else {
                continue;
            };

            if command == "newmtl" {
                if let Some(mat) = current_material.take() {
                    materials.insert(mat.name.clone(), mat);
                }

                let name = tokens.collect::<Vec<_>>().join(" ");
                if name.is_empty() {
                    return Err(Self::error(line_num, "newmtl missing material name"));
                }
                current_material = Some(MtlData {
                    name,
                    ..Default::default()
                });
                continue;
            }

            // Statements before the first newmtl have nothing to attach to
            let Some(mat) = current_material.as_mut() else {
                continue;
            };

            match command {
                "Ka" => mat.ambient = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Kd" => mat.diffuse = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Ks" => mat.specular = Self::parse_vec3(&mut tokens, line_num, command)?,
                "Ns" => mat.specular_exponent = Self::parse_f32(&mut tokens, line_num, command)?,
                "d" => mat.dissolve = Self::parse_f32(&mut tokens, line_num, command)?,
                "Tr" => {
                    // Transparency (inverted dissolve): Tr = 1.0 - d
                    mat.dissolve = 1.0 - Self::parse_f32(&mut tokens, line_num, command)?;
                }
                "map_Kd" => mat.diffuse_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?),
                "map_Ks" => mat.specular_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?),
                "map_Bump" | "bump" => {
                    mat.normal_map = Some(Self::parse_texture_path(&mut tokens, line_num, command)?);
                }
                // Ignore unknown commands silently
                _ => {}
            }
        }

        if let Some(mat) = current_material {
            materials.insert(mat.name.clone(), mat);
        }

        Ok(materials)
    }

    fn error(line_num: usize, message: &str) -> AssetError {
        AssetError::Parse(format!("MTL line {}: {}", line_num + 1, message))
    }

    /// Parse a Vec3 color from RGB tokens
    fn parse_vec3<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<Vec3, AssetError>
    where
        I: Iterator<Item = &'a str>
    {
        let r = Self::parse_f32(tokens, line_num, command)?;
        let g = Self::parse_f32(tokens, line_num, command)?;
        let b = Self::parse_f32(tokens, line_num, command)?;
        Ok(Vec3::new(r, g, b))
    }

    /// Parse a single f32 value
    fn parse_f32<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<f32, AssetError>
    where
        I: Iterator<Item = &'a str>
    {
        let token = tokens.next()
            .ok_or_else(|| Self::error(line_num, &format!("{} missing value", command)))?;
        token.parse::<f32>()
            .map_err(|_| Self::error(line_num, &format!("{} invalid float value '{}'", command, token)))
    }

    /// Parse texture file path, skipping option flags such as `-bm 1.0`
    fn parse_texture_path<'a, I>(tokens: &mut I, line_num: usize, command: &str) -> Result<String, AssetError>
    where
        I: Iterator<Item = &'a str>
    {
        let tokens: Vec<&str> = tokens.collect();
        let mut start = 0;
        while start < tokens.len() && tokens[start].starts_with('-') {
            // Every option used by exporters here takes exactly one argument
            start += 2;
        }
        let path = tokens.get(start..).unwrap_or_default();
        if path.is_empty() {
            return Err(Self::error(line_num, &format!("{} missing texture path", command)));
        }
        Ok(path.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_material() {
        let mtl_content = r#"
# Simple material
newmtl TestMaterial
Ka 1.0 1.0 1.0
Kd 0.8 0.2 0.2
Ks 0.5 0.5 0.5
Ns 250.0
d 1.0
illum 2
"#;

        let materials = MtlParser::parse(mtl_content).unwrap();
        assert_eq!(materials.len(), 1);

        let mat = materials.get("TestMaterial").unwrap();
        assert_eq!(mat.name, "TestMaterial");
        assert_eq!(mat.diffuse, Vec3::new(0.8, 0.2, 0.2));
        assert_eq!(mat.specular_exponent, 250.0);
        assert_eq!(mat.dissolve, 1.0);
    }

    #[test]
    fn test_parse_material_with_textures() {
        let mtl_content = r#"
newmtl Planet Surface
map_Kd textures/planet diffuse.png
map_Ks -bm 0.5 textures/spec.png
bump textures/normal.png
"#;

        let materials = MtlParser::parse(mtl_content).unwrap();
        let mat = materials.get("Planet Surface").unwrap();

        assert_eq!(mat.diffuse_map.as_deref(), Some("textures/planet diffuse.png"));
        assert_eq!(mat.specular_map.as_deref(), Some("textures/spec.png"));
        assert_eq!(mat.normal_map.as_deref(), Some("textures/normal.png"));
    }

    #[test]
    fn test_parse_multiple_materials() {
        let mtl_content = r#"
newmtl Material1
Kd 1.0 0.0 0.0

newmtl Material2
Kd 0.0 1.0 0.0
"#;

        let materials = MtlParser::parse(mtl_content).unwrap();
        assert_eq!(materials.len(), 2);

        assert_eq!(materials.get("Material1").unwrap().diffuse, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(materials.get("Material2").unwrap().diffuse, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_parse_transparency() {
        let materials = MtlParser::parse("newmtl TransparentMat\nTr 0.3\n").unwrap();
        let mat = materials.get("TransparentMat").unwrap();

        // Tr = 1.0 - d, so Tr 0.3 means d = 0.7
        assert!((mat.dissolve - 0.7).abs() < 0.001);
    }

    #[test]
    fn test_invalid_float_reports_line() {
        let err = MtlParser::parse("newmtl Broken\nKd 1.0 oops 0.0\n").unwrap_err();
        assert!(err.to_string().contains("line 2"), "{}", err);
    }
}
