//! Models imported from OBJ files
//!
//! A [`Model`] turns the [`SceneData`] produced by the OBJ loader into a tree
//! of GPU meshes. Textures are shared across meshes through a per-model cache
//! keyed by file path, and each newly loaded file takes the next texture unit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::assets::{MeshData, ObjLoader, SceneData, SceneNode, TexturePaths};
use crate::render::error::GlResult;
use crate::render::mesh::{Mesh, MeshTextures, TextureVariables};
use crate::render::program::Program;
use crate::render::texture::{Texture, TextureKind, TextureTarget, TextureUnit};

/// Path-keyed cache that hands out sequential texture units
#[derive(Debug)]
pub struct TextureCache<T> {
    loaded: HashMap<PathBuf, Rc<T>>,
    next_unit: TextureUnit,
}

impl<T> Default for TextureCache<T> {
    fn default() -> Self {
        Self {
            loaded: HashMap::new(),
            next_unit: TextureUnit(0),
        }
    }
}

impl<T> TextureCache<T> {
    /// Cached value for `path`, or `load` it on the next free unit
    pub fn get_or_load<F>(&mut self, path: &Path, load: F) -> GlResult<Rc<T>>
    where
        F: FnOnce(&Path, TextureUnit) -> GlResult<T>,
    {
        if let Some(value) = self.loaded.get(path) {
            return Ok(Rc::clone(value));
        }
        let value = Rc::new(load(path, self.next_unit)?);
        self.next_unit = self.next_unit.next();
        self.loaded.insert(path.to_path_buf(), Rc::clone(&value));
        Ok(value)
    }

    /// Number of distinct files loaded
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    /// Whether nothing was loaded
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }

    /// Unit the next new file will be given
    pub const fn next_unit(&self) -> TextureUnit {
        self.next_unit
    }
}

/// Load the textures named by `paths` through `cache`
pub fn load_material<T, F>(cache: &mut TextureCache<T>, paths: &TexturePaths, mut load: F) -> GlResult<Vec<(TextureKind, Rc<T>)>>
where
    F: FnMut(&Path, TextureUnit) -> GlResult<T>,
{
    let mut textures = Vec::with_capacity(paths.diffuse.len() + paths.specular.len());
    for (kind, files) in [(TextureKind::Diffuse, &paths.diffuse), (TextureKind::Specular, &paths.specular)] {
        for file in files {
            textures.push((kind, cache.get_or_load(file, &mut load)?));
        }
    }
    Ok(textures)
}

/// Drawable tree of meshes
#[derive(Debug)]
pub struct Model {
    root: SceneNode<Mesh>,
}

impl Model {
    /// Import `path` and upload every mesh and texture it references
    pub fn load<P: AsRef<Path>>(path: P) -> GlResult<Self> {
        let path = path.as_ref();
        let SceneData { root, materials } = ObjLoader::load(path).map_err(|e| {
            log::error!("load model failed:{}", path.display());
            e
        })?;

        let mut cache = TextureCache::default();
        let mut material_textures = Vec::with_capacity(materials.len());
        for material in &materials {
            let loaded = load_material(&mut cache, material, |file, unit| {
                Texture::from_file(TextureTarget::Texture2D, unit, file)
            })?;
            let mut textures = MeshTextures::new();
            for (kind, texture) in loaded {
                textures.entry(kind).or_default().push(texture);
            }
            material_textures.push(textures);
        }

        let root = root.try_map(&mut |data: MeshData| {
            let textures = data
                .material
                .and_then(|index| material_textures.get(index))
                .cloned()
                .unwrap_or_default();
            Mesh::new(&data.vertices, &data.indices, textures)
        })?;

        log::info!(
            "Loaded model {} with {} meshes and {} textures",
            path.display(),
            root.mesh_count(),
            cache.len()
        );
        Ok(Self { root })
    }

    /// Draw every mesh depth-first, stopping at the first failure
    pub fn draw(&self, program: &mut Program, names: &TextureVariables) -> GlResult<()> {
        self.root.try_for_each(&mut |mesh: &Mesh| mesh.draw(program, names))
    }

    /// Total number of meshes
    pub fn mesh_count(&self) -> usize {
        self.root.mesh_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(path: &Path, unit: TextureUnit) -> GlResult<(PathBuf, TextureUnit)> {
        Ok((path.to_path_buf(), unit))
    }

    #[test]
    fn test_new_paths_take_sequential_units() {
        let mut cache = TextureCache::default();
        let a = cache.get_or_load(Path::new("nanosuit/body_dif.png"), record).unwrap();
        let b = cache.get_or_load(Path::new("nanosuit/body_spec.png"), record).unwrap();
        assert_eq!(a.1, TextureUnit(0));
        assert_eq!(b.1, TextureUnit(1));
        assert_eq!(cache.next_unit(), TextureUnit(2));
    }

    #[test]
    fn test_repeated_path_is_shared() {
        let mut cache = TextureCache::default();
        let first = cache.get_or_load(Path::new("arm_dif.png"), record).unwrap();
        let again = cache
            .get_or_load(Path::new("arm_dif.png"), |_, _| panic!("cached path reloaded"))
            .unwrap();
        assert!(Rc::ptr_eq(&first, &again));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_load_does_not_consume_unit() {
        let mut cache: TextureCache<(PathBuf, TextureUnit)> = TextureCache::default();
        let result = cache.get_or_load(Path::new("missing.png"), |_, _| Err(crate::render::error::GlError::EmptyData));
        assert!(result.is_err());
        assert!(cache.is_empty());
        assert_eq!(cache.next_unit(), TextureUnit(0));
    }

    #[test]
    fn test_material_loads_diffuse_then_specular() {
        let mut cache = TextureCache::default();
        let paths = TexturePaths {
            diffuse: vec![PathBuf::from("glass_dif.png")],
            specular: vec![PathBuf::from("glass_spec.png"), PathBuf::from("glass_dif.png")],
        };
        let textures = load_material(&mut cache, &paths, record).unwrap();
        let kinds: Vec<_> = textures.iter().map(|(kind, t)| (*kind, t.1)).collect();
        assert_eq!(
            kinds,
            vec![
                (TextureKind::Diffuse, TextureUnit(0)),
                (TextureKind::Specular, TextureUnit(1)),
                (TextureKind::Specular, TextureUnit(0)),
            ]
        );
        assert_eq!(cache.len(), 2);
    }
}
