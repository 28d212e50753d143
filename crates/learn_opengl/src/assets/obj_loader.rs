//! OBJ scene loader
//!
//! Imports an OBJ/MTL pair through `tobj` into a tree of CPU-side meshes. OBJ
//! has no node hierarchy, so the tree is a root with one child per object;
//! the model renderer walks it the same way it would walk a deeper scene.

use std::io::BufRead;
use std::path::{Path, PathBuf};

use crate::assets::AssetError;
use crate::render::mesh::Vertex;

/// Node of an imported scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode<T> {
    /// Name of the object this node came from
    pub name: String,
    /// Meshes owned by this node
    pub meshes: Vec<T>,
    /// Child nodes, drawn after this node's meshes
    pub children: Vec<SceneNode<T>>,
}

impl<T> SceneNode<T> {
    /// Create an empty node
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            meshes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Convert every mesh in the tree, stopping at the first failure
    pub fn try_map<U, E, F>(self, f: &mut F) -> Result<SceneNode<U>, E>
    where
        F: FnMut(T) -> Result<U, E>,
    {
        let mut meshes = Vec::with_capacity(self.meshes.len());
        for mesh in self.meshes {
            meshes.push(f(mesh)?);
        }
        let mut children = Vec::with_capacity(self.children.len());
        for child in self.children {
            children.push(child.try_map(&mut *f)?);
        }
        Ok(SceneNode {
            name: self.name,
            meshes,
            children,
        })
    }

    /// Visit every mesh depth-first, stopping at the first failure
    pub fn try_for_each<E, F>(&self, f: &mut F) -> Result<(), E>
    where
        F: FnMut(&T) -> Result<(), E>,
    {
        for mesh in &self.meshes {
            f(mesh)?;
        }
        for child in &self.children {
            child.try_for_each(&mut *f)?;
        }
        Ok(())
    }

    /// Total number of meshes in this subtree
    pub fn mesh_count(&self) -> usize {
        self.meshes.len() + self.children.iter().map(Self::mesh_count).sum::<usize>()
    }
}

/// Vertex and index data for one mesh
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    /// Interleaved vertices
    pub vertices: Vec<Vertex>,
    /// Triangle list indices
    pub indices: Vec<u32>,
    /// Index into [`SceneData::materials`]
    pub material: Option<usize>,
}

/// Texture files referenced by one material
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TexturePaths {
    /// Diffuse maps, resolved against the model directory
    pub diffuse: Vec<PathBuf>,
    /// Specular maps, resolved against the model directory
    pub specular: Vec<PathBuf>,
}

/// Imported scene
#[derive(Debug, Clone, PartialEq)]
pub struct SceneData {
    /// Root of the mesh tree
    pub root: SceneNode<MeshData>,
    /// Materials referenced by [`MeshData::material`]
    pub materials: Vec<TexturePaths>,
}

/// OBJ loader backed by `tobj`
pub struct ObjLoader;

impl ObjLoader {
    fn load_options() -> tobj::LoadOptions {
        tobj::LoadOptions {
            single_index: true,
            triangulate: true,
            ..Default::default()
        }
    }

    /// Load an OBJ file and the MTL libraries it references
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SceneData, AssetError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }
        log::info!("Importing model {}", path.display());

        let (models, materials) = tobj::load_obj(path, &Self::load_options())
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self::build_scene(path, models, materials, base_dir))
    }

    /// Load OBJ text from a reader, resolving MTL libraries through `material_loader`
    pub fn load_from_reader<R, F>(reader: &mut R, base_dir: &Path, material_loader: F) -> Result<SceneData, AssetError>
    where
        R: BufRead,
        F: Fn(&Path) -> tobj::MTLLoadResult,
    {
        let (models, materials) = tobj::load_obj_buf(reader, &Self::load_options(), material_loader)
            .map_err(|e| AssetError::LoadFailed(e.to_string()))?;
        Ok(Self::build_scene(base_dir, models, materials, base_dir))
    }

    fn build_scene(
        source: &Path,
        models: Vec<tobj::Model>,
        materials: Result<Vec<tobj::Material>, tobj::LoadError>,
        base_dir: &Path,
    ) -> SceneData {
        let materials = match materials {
            Ok(materials) => materials,
            Err(e) => {
                log::warn!("No materials for {}: {}", source.display(), e);
                Vec::new()
            }
        };

        let mut root = SceneNode::new(source.display().to_string());
        for model in models {
            let mut node = SceneNode::new(model.name.clone());
            node.meshes.push(convert_mesh(&model.mesh));
            root.children.push(node);
        }
        log::debug!("Imported {} meshes from {}", root.mesh_count(), source.display());

        SceneData {
            root,
            materials: materials.iter().map(|m| texture_paths(m, base_dir)).collect(),
        }
    }
}

/// Interleave a `tobj` mesh into [`Vertex`] data
///
/// Texture coordinates are flipped vertically; missing normals and texture
/// coordinates become zero.
pub fn convert_mesh(mesh: &tobj::Mesh) -> MeshData {
    let vertex_count = mesh.positions.len() / 3;
    let has_normals = mesh.normals.len() >= vertex_count * 3;
    let has_tex_coords = mesh.texcoords.len() >= vertex_count * 2;

    let vertices = (0..vertex_count)
        .map(|i| {
            let position = [mesh.positions[3 * i], mesh.positions[3 * i + 1], mesh.positions[3 * i + 2]];
            let normal = if has_normals {
                [mesh.normals[3 * i], mesh.normals[3 * i + 1], mesh.normals[3 * i + 2]]
            } else {
                [0.0; 3]
            };
            let tex_coord = if has_tex_coords {
                [mesh.texcoords[2 * i], 1.0 - mesh.texcoords[2 * i + 1]]
            } else {
                [0.0; 2]
            };
            Vertex::new(position, normal, tex_coord)
        })
        .collect();

    MeshData {
        vertices,
        indices: mesh.indices.clone(),
        material: mesh.material_id,
    }
}

fn texture_paths(material: &tobj::Material, base_dir: &Path) -> TexturePaths {
    let resolve = |name: &Option<String>| name.iter().map(|n| base_dir.join(n)).collect::<Vec<_>>();
    TexturePaths {
        diffuse: resolve(&material.diffuse_texture),
        specular: resolve(&material.specular_texture),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const QUAD_OBJ: &str = "\
mtllib quad.mtl
o Quad
v -1.0 -1.0 0.0
v 1.0 -1.0 0.0
v 1.0 1.0 0.0
v -1.0 1.0 0.0
vt 0.0 0.0
vt 1.0 0.0
vt 1.0 1.0
vt 0.0 1.0
vn 0.0 0.0 1.0
usemtl panel
f 1/1/1 2/2/1 3/3/1 4/4/1
o Tri
v 0.0 0.0 1.0
v 1.0 0.0 1.0
v 0.0 1.0 1.0
f 5 6 7
";

    const QUAD_MTL: &str = "\
newmtl panel
map_Kd panel_diffuse.png
map_Ks panel_specular.png
";

    fn load_quad() -> SceneData {
        ObjLoader::load_from_reader(&mut Cursor::new(QUAD_OBJ), Path::new("models/quad"), |_| {
            tobj::load_mtl_buf(&mut Cursor::new(QUAD_MTL))
        })
        .unwrap()
    }

    #[test]
    fn test_objects_become_children_of_root() {
        let scene = load_quad();
        assert!(scene.root.meshes.is_empty());
        assert_eq!(scene.root.children.len(), 2);
        assert_eq!(scene.root.children[0].name, "Quad");
        assert_eq!(scene.root.mesh_count(), 2);
    }

    #[test]
    fn test_quad_is_triangulated_with_flipped_uvs() {
        let scene = load_quad();
        let quad = &scene.root.children[0].meshes[0];
        assert_eq!(quad.vertices.len(), 4);
        assert_eq!(quad.indices.len(), 6);
        assert_eq!(quad.vertices[0].tex_coord, [0.0, 1.0]);
        assert_eq!(quad.vertices[2].tex_coord, [1.0, 0.0]);
        assert_eq!(quad.vertices[1].normal, [0.0, 0.0, 1.0]);
        assert_eq!(quad.material, Some(0));
    }

    #[test]
    fn test_missing_attributes_default_to_zero() {
        let scene = load_quad();
        let tri = &scene.root.children[1].meshes[0];
        assert_eq!(tri.vertices.len(), 3);
        assert!(tri.vertices.iter().all(|v| v.normal == [0.0; 3] && v.tex_coord == [0.0; 2]));
    }

    #[test]
    fn test_material_textures_resolve_against_model_dir() {
        let scene = load_quad();
        assert_eq!(scene.materials.len(), 1);
        assert_eq!(scene.materials[0].diffuse, vec![PathBuf::from("models/quad/panel_diffuse.png")]);
        assert_eq!(scene.materials[0].specular, vec![PathBuf::from("models/quad/panel_specular.png")]);
    }

    #[test]
    fn test_try_map_stops_at_first_error() {
        let scene = load_quad();
        let mut seen = 0;
        let result: Result<SceneNode<usize>, String> = scene.root.try_map(&mut |mesh: MeshData| {
            seen += 1;
            if mesh.vertices.len() == 4 {
                Err("quad".to_string())
            } else {
                Ok(mesh.vertices.len())
            }
        });
        assert_eq!(result.unwrap_err(), "quad");
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        assert!(matches!(ObjLoader::load("resource/none.obj"), Err(AssetError::NotFound(_))));
    }
}
