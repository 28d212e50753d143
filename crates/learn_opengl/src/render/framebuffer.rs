//! Off-screen render targets

use std::marker::PhantomData;
use std::rc::Rc;

use gl::types::{GLenum, GLsizei, GLuint};

use crate::render::error::{checked, GlError, GlResult};
use crate::render::texture::Texture;

/// Name of a `glCheckFramebufferStatus` result
pub const fn status_name(status: GLenum) -> &'static str {
    match status {
        gl::FRAMEBUFFER_COMPLETE => "GL_FRAMEBUFFER_COMPLETE",
        gl::FRAMEBUFFER_UNDEFINED => "GL_FRAMEBUFFER_UNDEFINED",
        gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => "GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT",
        gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => "GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT",
        gl::FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER => "GL_FRAMEBUFFER_INCOMPLETE_DRAW_BUFFER",
        gl::FRAMEBUFFER_INCOMPLETE_READ_BUFFER => "GL_FRAMEBUFFER_INCOMPLETE_READ_BUFFER",
        gl::FRAMEBUFFER_UNSUPPORTED => "GL_FRAMEBUFFER_UNSUPPORTED",
        gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => "GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE",
        gl::FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS => "GL_FRAMEBUFFER_INCOMPLETE_LAYER_TARGETS",
        _ => "unknown framebuffer status",
    }
}

/// Owned renderbuffer object
#[derive(Debug)]
pub struct RenderBuffer {
    id: GLuint,
    _not_send: PhantomData<*const ()>,
}

impl RenderBuffer {
    /// Allocate a `GL_DEPTH24_STENCIL8` renderbuffer
    pub fn depth_stencil(width: u32, height: u32) -> GlResult<Self> {
        let mut id: GLuint = 0;
        // SAFETY: writes exactly one name into `id`.
        unsafe { gl::GenRenderbuffers(1, &mut id) };
        checked("glGenRenderbuffers")?;
        if id == 0 {
            return Err(GlError::CreateFailed("glGenRenderbuffers"));
        }
        let buffer = Self {
            id,
            _not_send: PhantomData,
        };

        // SAFETY: `id` is live; storage size is validated by GL.
        unsafe { gl::BindRenderbuffer(gl::RENDERBUFFER, buffer.id) };
        checked("glBindRenderbuffer")?;
        // SAFETY: the renderbuffer was bound above.
        unsafe {
            gl::RenderbufferStorage(gl::RENDERBUFFER, gl::DEPTH24_STENCIL8, width as GLsizei, height as GLsizei);
        }
        checked("glRenderbufferStorage")?;
        Ok(buffer)
    }

    /// GL object name
    pub const fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for RenderBuffer {
    fn drop(&mut self) {
        // SAFETY: `id` came from glGenRenderbuffers and is deleted once.
        unsafe { gl::DeleteRenderbuffers(1, &self.id) };
    }
}

/// Owned framebuffer object
///
/// Attachments are kept alive for as long as the framebuffer.
#[derive(Debug)]
pub struct FrameBuffer {
    id: GLuint,
    color: Option<Rc<Texture>>,
    depth_stencil: Option<Rc<RenderBuffer>>,
    _not_send: PhantomData<*const ()>,
}

impl FrameBuffer {
    /// Generate a framebuffer with no attachments
    pub fn new() -> GlResult<Self> {
        let mut id: GLuint = 0;
        // SAFETY: writes exactly one name into `id`.
        unsafe { gl::GenFramebuffers(1, &mut id) };
        checked("glGenFramebuffers")?;
        if id == 0 {
            return Err(GlError::CreateFailed("glGenFramebuffers"));
        }
        Ok(Self {
            id,
            color: None,
            depth_stencil: None,
            _not_send: PhantomData,
        })
    }

    fn bind_unchecked(&self) -> GlResult<()> {
        // SAFETY: `id` is a live framebuffer.
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, self.id) };
        checked("glBindFramebuffer")
    }

    /// Attach `texture` as `GL_COLOR_ATTACHMENT0`
    pub fn add_color_attachment(&mut self, texture: Rc<Texture>) -> GlResult<()> {
        self.bind_unchecked()?;
        // SAFETY: the texture is a live 2D texture.
        unsafe {
            gl::FramebufferTexture2D(gl::FRAMEBUFFER, gl::COLOR_ATTACHMENT0, texture.target().gl_enum(), texture.id(), 0);
        }
        checked("glFramebufferTexture2D")?;
        self.color = Some(texture);
        Self::bind_default()
    }

    /// Attach `render_buffer` as `GL_DEPTH_STENCIL_ATTACHMENT`
    pub fn add_depth_and_stencil_attachment(&mut self, render_buffer: Rc<RenderBuffer>) -> GlResult<()> {
        self.bind_unchecked()?;
        // SAFETY: the renderbuffer is live.
        unsafe {
            gl::FramebufferRenderbuffer(
                gl::FRAMEBUFFER,
                gl::DEPTH_STENCIL_ATTACHMENT,
                gl::RENDERBUFFER,
                render_buffer.id(),
            );
        }
        checked("glFramebufferRenderbuffer")?;
        self.depth_stencil = Some(render_buffer);
        Self::bind_default()
    }

    /// Render into this framebuffer, failing unless it is complete
    pub fn bind(&self) -> GlResult<()> {
        self.bind_unchecked()?;
        // SAFETY: queries the framebuffer bound above.
        let status = unsafe { gl::CheckFramebufferStatus(gl::FRAMEBUFFER) };
        if status != gl::FRAMEBUFFER_COMPLETE {
            let name = status_name(status);
            log::error!("framebuffer is not complete: {}", name);
            return Err(GlError::FramebufferIncomplete(name));
        }
        Ok(())
    }

    /// Render into the window again
    pub fn bind_default() -> GlResult<()> {
        // SAFETY: 0 is always a valid framebuffer binding.
        unsafe { gl::BindFramebuffer(gl::FRAMEBUFFER, 0) };
        checked("glBindFramebuffer")
    }

    /// GL object name
    pub const fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        // SAFETY: `id` came from glGenFramebuffers and is deleted once.
        unsafe { gl::DeleteFramebuffers(1, &self.id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_names() {
        assert_eq!(status_name(gl::FRAMEBUFFER_COMPLETE), "GL_FRAMEBUFFER_COMPLETE");
        assert_eq!(
            status_name(gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT),
            "GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT"
        );
        assert_eq!(status_name(0), "unknown framebuffer status");
    }
}
