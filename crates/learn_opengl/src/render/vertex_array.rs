//! Vertex array objects

use std::marker::PhantomData;

use gl::types::GLuint;

use crate::render::error::{checked, GlError, GlResult};

/// Owned vertex array object
///
/// Records attribute layout and the element buffer binding while bound.
/// Programs hold VAOs through `Rc` so one layout can be drawn by several
/// programs.
#[derive(Debug)]
pub struct VertexArray {
    id: GLuint,
    _not_send: PhantomData<*const ()>,
}

impl VertexArray {
    /// Generate a vertex array, optionally binding it straight away
    pub fn new(bind_after_create: bool) -> GlResult<Self> {
        let mut id: GLuint = 0;
        // SAFETY: writes exactly one name into `id`.
        unsafe { gl::GenVertexArrays(1, &mut id) };
        checked("glGenVertexArrays")?;
        if id == 0 {
            return Err(GlError::CreateFailed("glGenVertexArrays"));
        }

        let array = Self {
            id,
            _not_send: PhantomData,
        };
        if bind_after_create {
            array.bind()?;
        }
        Ok(array)
    }

    /// GL object name
    pub const fn id(&self) -> GLuint {
        self.id
    }

    /// Make this the current vertex array
    pub fn bind(&self) -> GlResult<()> {
        // SAFETY: `id` is a live VAO owned by self.
        unsafe { gl::BindVertexArray(self.id) };
        checked("glBindVertexArray")
    }

    /// Bind vertex array 0 so later buffer binds do not touch this one
    pub fn unbind(&self) -> GlResult<()> {
        // SAFETY: 0 is always a valid VAO binding.
        unsafe { gl::BindVertexArray(0) };
        checked("glBindVertexArray")
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        // SAFETY: `id` was generated by glGenVertexArrays and is deleted once.
        unsafe { gl::DeleteVertexArrays(1, &self.id) };
    }
}
