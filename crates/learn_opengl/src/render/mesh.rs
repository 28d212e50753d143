//! Indexed meshes with typed textures

use std::collections::BTreeMap;
use std::mem::{offset_of, size_of};
use std::rc::Rc;

use bytemuck::{Pod, Zeroable};
use gl::types::{GLint, GLsizei};

use crate::render::buffer::{ArrayBuffer, ElementBuffer};
use crate::render::error::{GlError, GlResult};
use crate::render::program::Program;
use crate::render::state::{self, Primitive};
use crate::render::texture::{Texture, TextureKind};
use crate::render::vertex_array::VertexArray;

/// Interleaved vertex: position, normal, texture coordinate
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    /// Object-space position, attribute 0
    pub position: [f32; 3],
    /// Normal, attribute 1
    pub normal: [f32; 3],
    /// Texture coordinate, attribute 2
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a vertex
    pub const fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            tex_coord,
        }
    }
}

/// Sampler uniform names per texture kind, paired in order with a mesh's textures
pub type TextureVariables = BTreeMap<TextureKind, Vec<String>>;

/// Textures of a mesh by kind
pub type MeshTextures = BTreeMap<TextureKind, Vec<Rc<Texture>>>;

/// Pair each sampler name with the texture of the same kind at the same position
///
/// A requested kind the mesh has no textures for, or more names than
/// textures, is an error. Fewer names than textures leaves the extra
/// textures unused.
pub fn pair_texture_variables<'a, T>(
    names: &'a TextureVariables,
    textures: &'a BTreeMap<TextureKind, Vec<T>>,
) -> GlResult<Vec<(&'a str, &'a T)>> {
    let mut pairs = Vec::new();
    for (kind, variables) in names {
        let Some(available) = textures.get(kind) else {
            log::error!("no texture for type {}", kind);
            return Err(GlError::MissingTextures(kind.to_string()));
        };
        if variables.len() > available.len() {
            log::error!("more variable then texture:{} {}", variables.len(), available.len());
            return Err(GlError::TooManyTextureVariables {
                kind: kind.to_string(),
                variables: variables.len(),
                textures: available.len(),
            });
        }
        if variables.len() < available.len() {
            log::warn!("less variable then texture:{} {}", variables.len(), available.len());
        }
        pairs.extend(variables.iter().map(String::as_str).zip(available));
    }
    Ok(pairs)
}

/// GPU mesh: vertex array, vertex and index buffers, and its textures
#[derive(Debug)]
pub struct Mesh {
    vertex_array: Rc<VertexArray>,
    _vertex_buffer: ArrayBuffer<f32>,
    _index_buffer: ElementBuffer,
    index_count: usize,
    textures: MeshTextures,
}

impl Mesh {
    /// Upload `vertices` and `indices` and record the attribute layout
    pub fn new(vertices: &[Vertex], indices: &[u32], textures: MeshTextures) -> GlResult<Self> {
        let vertex_array = VertexArray::new(true)?;
        let index_buffer = ElementBuffer::new()?;
        index_buffer.write(indices)?;

        let vertex_buffer = ArrayBuffer::<f32>::new()?;
        vertex_buffer.write_slice(vertices)?;

        let stride = size_of::<Vertex>() as GLsizei;
        let layout: [(u32, GLint, usize); 3] = [
            (0, 3, offset_of!(Vertex, position)),
            (1, 3, offset_of!(Vertex, normal)),
            (2, 2, offset_of!(Vertex, tex_coord)),
        ];
        for (index, size, offset) in layout {
            vertex_buffer.vertex_attribute_pointer(index, size, stride, offset)?;
        }
        vertex_array.unbind()?;

        log::trace!(
            "Mesh uploaded: {} vertices, {} indices, {} texture kinds",
            vertices.len(),
            indices.len(),
            textures.len()
        );
        Ok(Self {
            vertex_array: Rc::new(vertex_array),
            _vertex_buffer: vertex_buffer,
            _index_buffer: index_buffer,
            index_count: indices.len(),
            textures,
        })
    }

    /// Number of indices drawn
    pub const fn index_count(&self) -> usize {
        self.index_count
    }

    /// Textures by kind
    pub const fn textures(&self) -> &MeshTextures {
        &self.textures
    }

    /// Bind textures to the sampler names in `names` and draw with `program`
    pub fn draw(&self, program: &mut Program, names: &TextureVariables) -> GlResult<()> {
        program.set_vertex_array(Rc::clone(&self.vertex_array));
        for (name, texture) in pair_texture_variables(names, &self.textures)? {
            program.set_texture(name, Rc::clone(texture))?;
        }
        program.use_program()?;
        state::draw_elements(Primitive::Triangles, self.index_count as GLsizei)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(diffuse: &[&str], specular: &[&str]) -> TextureVariables {
        let mut names = TextureVariables::new();
        if !diffuse.is_empty() {
            names.insert(TextureKind::Diffuse, diffuse.iter().map(ToString::to_string).collect());
        }
        if !specular.is_empty() {
            names.insert(TextureKind::Specular, specular.iter().map(ToString::to_string).collect());
        }
        names
    }

    fn textures(diffuse: usize, specular: usize) -> BTreeMap<TextureKind, Vec<u32>> {
        let mut textures = BTreeMap::new();
        textures.insert(TextureKind::Diffuse, (0..diffuse as u32).collect());
        textures.insert(TextureKind::Specular, (10..10 + specular as u32).collect());
        textures
    }

    #[test]
    fn test_vertex_layout_matches_attribute_offsets() {
        assert_eq!(size_of::<Vertex>(), 32);
        assert_eq!(offset_of!(Vertex, position), 0);
        assert_eq!(offset_of!(Vertex, normal), 12);
        assert_eq!(offset_of!(Vertex, tex_coord), 24);
    }

    #[test]
    fn test_pairs_names_in_order_by_kind() {
        let names = names(&["texture_diffuse1", "texture_diffuse2"], &["texture_specular1"]);
        let textures = textures(2, 1);
        let pairs = pair_texture_variables(&names, &textures).unwrap();
        assert_eq!(
            pairs,
            vec![("texture_diffuse1", &0), ("texture_diffuse2", &1), ("texture_specular1", &10)]
        );
    }

    #[test]
    fn test_fewer_names_than_textures_is_allowed() {
        let names = names(&["texture_diffuse1"], &[]);
        let textures = textures(3, 0);
        let pairs = pair_texture_variables(&names, &textures).unwrap();
        assert_eq!(pairs, vec![("texture_diffuse1", &0)]);
    }

    #[test]
    fn test_more_names_than_textures_fails() {
        let names = names(&["a", "b"], &[]);
        let textures = textures(1, 0);
        assert!(matches!(
            pair_texture_variables(&names, &textures),
            Err(GlError::TooManyTextureVariables { variables: 2, textures: 1, .. })
        ));
    }

    #[test]
    fn test_missing_kind_fails() {
        let names = names(&[], &["texture_specular1"]);
        let mut textures = textures(1, 0);
        textures.remove(&TextureKind::Specular);
        assert!(matches!(
            pair_texture_variables(&names, &textures),
            Err(GlError::MissingTextures(kind)) if kind == "specular"
        ));
    }

    #[test]
    fn test_empty_names_pair_nothing() {
        let names = TextureVariables::new();
        let textures = textures(0, 0);
        let pairs = pair_texture_variables(&names, &textures).unwrap();
        assert!(pairs.is_empty());
    }
}
