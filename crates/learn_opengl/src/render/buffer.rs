//! Buffer management for vertex, index and uniform data
//!
//! A [`Buffer`] owns exactly one GL buffer object. The bind target is part of
//! the type, so vertex attribute setup only exists on array buffers and
//! sub-range writes only on uniform buffers.

use std::marker::PhantomData;
use std::mem;

use bytemuck::Pod;
use gl::types::{GLenum, GLint, GLintptr, GLsizei, GLsizeiptr, GLuint};

use crate::render::error::{checked, GlError, GlResult};

/// Compile-time buffer bind target
pub trait BufferTarget {
    /// GL bind target
    const TARGET: GLenum;
    /// Target name for log messages
    const NAME: &'static str;
}

/// `GL_ARRAY_BUFFER`
#[derive(Debug)]
pub enum Array {}

/// `GL_ELEMENT_ARRAY_BUFFER`
#[derive(Debug)]
pub enum ElementArray {}

/// `GL_UNIFORM_BUFFER`
#[derive(Debug)]
pub enum Uniform {}

impl BufferTarget for Array {
    const TARGET: GLenum = gl::ARRAY_BUFFER;
    const NAME: &'static str = "GL_ARRAY_BUFFER";
}

impl BufferTarget for ElementArray {
    const TARGET: GLenum = gl::ELEMENT_ARRAY_BUFFER;
    const NAME: &'static str = "GL_ELEMENT_ARRAY_BUFFER";
}

impl BufferTarget for Uniform {
    const TARGET: GLenum = gl::UNIFORM_BUFFER;
    const NAME: &'static str = "GL_UNIFORM_BUFFER";
}

/// Element types that can feed a vertex attribute
pub trait AttributeType: Pod {
    /// Component type passed to `glVertexAttribPointer`
    const GL_TYPE: GLenum;
}

impl AttributeType for f32 {
    const GL_TYPE: GLenum = gl::FLOAT;
}

impl AttributeType for i32 {
    const GL_TYPE: GLenum = gl::INT;
}

/// Vertex data buffer
pub type ArrayBuffer<T> = Buffer<Array, T>;

/// Index buffer of `u32` triangle indices
pub type ElementBuffer = Buffer<ElementArray, u32>;

/// Raw byte buffer backing a uniform block
pub type UniformBuffer = Buffer<Uniform, u8>;

/// Byte size of `count` elements of `T`
pub const fn element_bytes<T>(count: usize) -> usize {
    count * mem::size_of::<T>()
}

/// Owned GL buffer object
#[derive(Debug)]
pub struct Buffer<K: BufferTarget, T: Pod> {
    id: GLuint,
    _marker: PhantomData<(fn() -> K, T, *const ())>,
}

impl<K: BufferTarget, T: Pod> Buffer<K, T> {
    /// Generate a new buffer object
    pub fn new() -> GlResult<Self> {
        let mut id: GLuint = 0;
        // SAFETY: writes exactly one name into `id`.
        unsafe { gl::GenBuffers(1, &mut id) };
        checked("glGenBuffers")?;
        if id == 0 {
            return Err(GlError::CreateFailed("glGenBuffers"));
        }
        log::trace!("Created {} buffer {}", K::NAME, id);
        Ok(Self {
            id,
            _marker: PhantomData,
        })
    }

    /// GL object name
    pub const fn id(&self) -> GLuint {
        self.id
    }

    /// Upload `data` with `GL_STATIC_DRAW`, replacing the previous contents
    pub fn write(&self, data: &[T]) -> GlResult<()> {
        self.write_slice(data)
    }

    /// Upload a slice of any plain-old-data type
    ///
    /// Used to store interleaved vertex structs in a float buffer.
    pub fn write_slice<U: Pod>(&self, data: &[U]) -> GlResult<()> {
        if data.is_empty() {
            log::error!("can't write empty data");
            return Err(GlError::EmptyData);
        }
        let bytes: &[u8] = bytemuck::cast_slice(data);

        self.bind()?;
        // SAFETY: `bytes` is valid for `bytes.len()` bytes for the duration of the call.
        unsafe {
            gl::BufferData(K::TARGET, bytes.len() as GLsizeiptr, bytes.as_ptr().cast(), gl::STATIC_DRAW);
        }
        checked("glBufferData")
    }

    /// Bind to this buffer's target
    pub fn bind(&self) -> GlResult<()> {
        // SAFETY: `id` is a live buffer name owned by self.
        unsafe { gl::BindBuffer(K::TARGET, self.id) };
        checked("glBindBuffer")
    }
}

impl<T: AttributeType> Buffer<Array, T> {
    /// Describe attribute `index` with offsets counted in elements of `T`
    pub fn vertex_attribute_pointer_simple_offset(
        &self,
        index: GLuint,
        size: GLint,
        stride: GLsizei,
        offset: usize,
    ) -> GlResult<()> {
        self.vertex_attribute_pointer(
            index,
            size,
            element_bytes::<T>(stride as usize) as GLsizei,
            element_bytes::<T>(offset),
        )
    }

    /// Describe attribute `index` with byte stride and offset, then enable it
    pub fn vertex_attribute_pointer(&self, index: GLuint, size: GLint, stride: GLsizei, offset: usize) -> GlResult<()> {
        self.bind()?;

        // SAFETY: with an array buffer bound the pointer argument is a byte offset.
        unsafe { gl::VertexAttribPointer(index, size, T::GL_TYPE, gl::FALSE, stride, offset as *const _) };
        checked("glVertexAttribPointer")?;

        // SAFETY: plain state setter.
        unsafe { gl::EnableVertexAttribArray(index) };
        checked("glEnableVertexAttribArray")
    }
}

impl Buffer<Uniform, u8> {
    /// Reserve `size` bytes of uninitialised storage
    pub fn allocate(&self, size: usize) -> GlResult<()> {
        self.bind()?;
        // SAFETY: a null data pointer only allocates.
        unsafe { gl::BufferData(gl::UNIFORM_BUFFER, size as GLsizeiptr, std::ptr::null(), gl::DYNAMIC_DRAW) };
        checked("glBufferData")
    }

    /// Overwrite `bytes.len()` bytes starting at `offset`
    pub fn write_at(&self, offset: usize, bytes: &[u8]) -> GlResult<()> {
        if bytes.is_empty() {
            log::error!("can't write empty data");
            return Err(GlError::EmptyData);
        }
        self.bind()?;
        // SAFETY: GL validates the range against the allocated size.
        unsafe {
            gl::BufferSubData(
                gl::UNIFORM_BUFFER,
                offset as GLintptr,
                bytes.len() as GLsizeiptr,
                bytes.as_ptr().cast(),
            );
        }
        checked("glBufferSubData")
    }

    /// Attach the whole buffer to uniform binding point `binding`
    pub fn bind_base(&self, binding: GLuint) -> GlResult<()> {
        // SAFETY: `id` is a live buffer name owned by self.
        unsafe { gl::BindBufferBase(gl::UNIFORM_BUFFER, binding, self.id) };
        checked("glBindBufferBase")
    }
}

impl<K: BufferTarget, T: Pod> Drop for Buffer<K, T> {
    fn drop(&mut self) {
        // SAFETY: `id` was generated by glGenBuffers and is deleted once.
        unsafe { gl::DeleteBuffers(1, &self.id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_offsets_scale_by_element_size() {
        // position (3) + tex coord (2) interleaved floats
        assert_eq!(element_bytes::<f32>(5), 20);
        assert_eq!(element_bytes::<f32>(3), 12);
        assert_eq!(element_bytes::<i32>(4), 16);
    }

    #[test]
    fn test_targets() {
        assert_eq!(Array::TARGET, gl::ARRAY_BUFFER);
        assert_eq!(ElementArray::TARGET, gl::ELEMENT_ARRAY_BUFFER);
        assert_eq!(Uniform::TARGET, gl::UNIFORM_BUFFER);
        assert_eq!(<f32 as AttributeType>::GL_TYPE, gl::FLOAT);
        assert_eq!(<i32 as AttributeType>::GL_TYPE, gl::INT);
    }
}
