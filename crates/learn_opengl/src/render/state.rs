//! Fixed-function state and draw calls
//!
//! Checked one-to-one wrappers for the global toggles the sections flip
//! between passes (depth, stencil, blending, culling) and for the draw calls.

use bitflags::bitflags;
use gl::types::{GLbitfield, GLenum, GLint, GLsizei, GLuint};

use crate::render::error::{checked, GlResult};

/// Server-side capability toggled with `glEnable`/`glDisable`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `GL_DEPTH_TEST`
    DepthTest,
    /// `GL_STENCIL_TEST`
    StencilTest,
    /// `GL_BLEND`
    Blend,
    /// `GL_CULL_FACE`
    CullFace,
}

impl Capability {
    /// GL enum value
    pub const fn gl_enum(self) -> GLenum {
        match self {
            Self::DepthTest => gl::DEPTH_TEST,
            Self::StencilTest => gl::STENCIL_TEST,
            Self::Blend => gl::BLEND,
            Self::CullFace => gl::CULL_FACE,
        }
    }
}

bitflags! {
    /// Buffers cleared by [`clear`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClearFlags: GLbitfield {
        /// `GL_COLOR_BUFFER_BIT`
        const COLOR = gl::COLOR_BUFFER_BIT;
        /// `GL_DEPTH_BUFFER_BIT`
        const DEPTH = gl::DEPTH_BUFFER_BIT;
        /// `GL_STENCIL_BUFFER_BIT`
        const STENCIL = gl::STENCIL_BUFFER_BIT;
    }
}

/// Comparison used by depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareFunc {
    /// `GL_NEVER`
    Never,
    /// `GL_LESS`
    Less,
    /// `GL_EQUAL`
    Equal,
    /// `GL_LEQUAL`
    LessEqual,
    /// `GL_GREATER`
    Greater,
    /// `GL_NOTEQUAL`
    NotEqual,
    /// `GL_GEQUAL`
    GreaterEqual,
    /// `GL_ALWAYS`
    Always,
}

impl CompareFunc {
    /// GL enum value
    pub const fn gl_enum(self) -> GLenum {
        match self {
            Self::Never => gl::NEVER,
            Self::Less => gl::LESS,
            Self::Equal => gl::EQUAL,
            Self::LessEqual => gl::LEQUAL,
            Self::Greater => gl::GREATER,
            Self::NotEqual => gl::NOTEQUAL,
            Self::GreaterEqual => gl::GEQUAL,
            Self::Always => gl::ALWAYS,
        }
    }
}

/// Stencil buffer update applied by [`stencil_op`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StencilAction {
    /// `GL_KEEP`
    Keep,
    /// `GL_ZERO`
    Zero,
    /// `GL_REPLACE`
    Replace,
    /// `GL_INCR`
    Increment,
    /// `GL_DECR`
    Decrement,
    /// `GL_INVERT`
    Invert,
}

impl StencilAction {
    /// GL enum value
    pub const fn gl_enum(self) -> GLenum {
        match self {
            Self::Keep => gl::KEEP,
            Self::Zero => gl::ZERO,
            Self::Replace => gl::REPLACE,
            Self::Increment => gl::INCR,
            Self::Decrement => gl::DECR,
            Self::Invert => gl::INVERT,
        }
    }
}

/// Blend factor for [`blend_func`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    /// `GL_ZERO`
    Zero,
    /// `GL_ONE`
    One,
    /// `GL_SRC_ALPHA`
    SrcAlpha,
    /// `GL_ONE_MINUS_SRC_ALPHA`
    OneMinusSrcAlpha,
}

impl BlendFactor {
    /// GL enum value
    pub const fn gl_enum(self) -> GLenum {
        match self {
            Self::Zero => gl::ZERO,
            Self::One => gl::ONE,
            Self::SrcAlpha => gl::SRC_ALPHA,
            Self::OneMinusSrcAlpha => gl::ONE_MINUS_SRC_ALPHA,
        }
    }
}

/// Faces discarded by [`cull_face`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// `GL_FRONT`
    Front,
    /// `GL_BACK`
    Back,
}

/// Winding that counts as front-facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winding {
    /// `GL_CW`
    Clockwise,
    /// `GL_CCW`
    CounterClockwise,
}

/// Primitive assembled by the draw calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `GL_TRIANGLES`
    Triangles,
    /// `GL_TRIANGLE_STRIP`
    TriangleStrip,
    /// `GL_LINES`
    Lines,
    /// `GL_POINTS`
    Points,
}

impl Primitive {
    /// GL enum value
    pub const fn gl_enum(self) -> GLenum {
        match self {
            Self::Triangles => gl::TRIANGLES,
            Self::TriangleStrip => gl::TRIANGLE_STRIP,
            Self::Lines => gl::LINES,
            Self::Points => gl::POINTS,
        }
    }
}

/// `glEnable`
#[track_caller]
pub fn enable(capability: Capability) -> GlResult<()> {
    // SAFETY: capability is a valid enum by construction.
    unsafe { gl::Enable(capability.gl_enum()) };
    checked("glEnable")
}

/// `glDisable`
#[track_caller]
pub fn disable(capability: Capability) -> GlResult<()> {
    // SAFETY: capability is a valid enum by construction.
    unsafe { gl::Disable(capability.gl_enum()) };
    checked("glDisable")
}

/// `glDepthFunc`
#[track_caller]
pub fn depth_func(func: CompareFunc) -> GlResult<()> {
    // SAFETY: plain state setter.
    unsafe { gl::DepthFunc(func.gl_enum()) };
    checked("glDepthFunc")
}

/// `glDepthMask`
#[track_caller]
pub fn depth_mask(write: bool) -> GlResult<()> {
    // SAFETY: plain state setter.
    unsafe { gl::DepthMask(if write { gl::TRUE } else { gl::FALSE }) };
    checked("glDepthMask")
}

/// `glStencilOp`
#[track_caller]
pub fn stencil_op(stencil_fail: StencilAction, depth_fail: StencilAction, pass: StencilAction) -> GlResult<()> {
    // SAFETY: plain state setter.
    unsafe { gl::StencilOp(stencil_fail.gl_enum(), depth_fail.gl_enum(), pass.gl_enum()) };
    checked("glStencilOp")
}

/// `glStencilFunc`
#[track_caller]
pub fn stencil_func(func: CompareFunc, reference: GLint, mask: GLuint) -> GlResult<()> {
    // SAFETY: plain state setter.
    unsafe { gl::StencilFunc(func.gl_enum(), reference, mask) };
    checked("glStencilFunc")
}

/// `glStencilMask`
#[track_caller]
pub fn stencil_mask(mask: GLuint) -> GlResult<()> {
    // SAFETY: plain state setter.
    unsafe { gl::StencilMask(mask) };
    checked("glStencilMask")
}

/// `glBlendFunc`
#[track_caller]
pub fn blend_func(source: BlendFactor, destination: BlendFactor) -> GlResult<()> {
    // SAFETY: plain state setter.
    unsafe { gl::BlendFunc(source.gl_enum(), destination.gl_enum()) };
    checked("glBlendFunc")
}

/// `glCullFace`
#[track_caller]
pub fn cull_face(face: Face) -> GlResult<()> {
    let mode = match face {
        Face::Front => gl::FRONT,
        Face::Back => gl::BACK,
    };
    // SAFETY: plain state setter.
    unsafe { gl::CullFace(mode) };
    checked("glCullFace")
}

/// `glFrontFace`
#[track_caller]
pub fn front_face(winding: Winding) -> GlResult<()> {
    let mode = match winding {
        Winding::Clockwise => gl::CW,
        Winding::CounterClockwise => gl::CCW,
    };
    // SAFETY: plain state setter.
    unsafe { gl::FrontFace(mode) };
    checked("glFrontFace")
}

/// `glClearColor`
#[track_caller]
pub fn clear_color(red: f32, green: f32, blue: f32, alpha: f32) -> GlResult<()> {
    // SAFETY: plain state setter.
    unsafe { gl::ClearColor(red, green, blue, alpha) };
    checked("glClearColor")
}

/// `glClear`
#[track_caller]
pub fn clear(flags: ClearFlags) -> GlResult<()> {
    // SAFETY: flags only carries valid buffer bits.
    unsafe { gl::Clear(flags.bits()) };
    checked("glClear")
}

/// `glViewport`
#[track_caller]
pub fn viewport(x: GLint, y: GLint, width: GLsizei, height: GLsizei) -> GlResult<()> {
    // SAFETY: plain state setter; negative sizes raise GL_INVALID_VALUE.
    unsafe { gl::Viewport(x, y, width, height) };
    checked("glViewport")
}

/// `glDrawArrays`
#[track_caller]
pub fn draw_arrays(primitive: Primitive, first: GLint, count: GLsizei) -> GlResult<()> {
    // SAFETY: the bound VAO describes the vertex data; GL validates the range.
    unsafe { gl::DrawArrays(primitive.gl_enum(), first, count) };
    checked("glDrawArrays")
}

/// `glDrawElements` with `u32` indices from the bound element buffer
#[track_caller]
pub fn draw_elements(primitive: Primitive, count: GLsizei) -> GlResult<()> {
    // SAFETY: a null offset reads from the element buffer bound to the VAO.
    unsafe { gl::DrawElements(primitive.gl_enum(), count, gl::UNSIGNED_INT, std::ptr::null()) };
    checked("glDrawElements")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_flags_combine_gl_bits() {
        let flags = ClearFlags::COLOR | ClearFlags::DEPTH;
        assert_eq!(flags.bits(), gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        assert!(!flags.contains(ClearFlags::STENCIL));
    }

    #[test]
    fn test_enum_values() {
        assert_eq!(CompareFunc::LessEqual.gl_enum(), gl::LEQUAL);
        assert_eq!(CompareFunc::NotEqual.gl_enum(), gl::NOTEQUAL);
        assert_eq!(StencilAction::Replace.gl_enum(), gl::REPLACE);
        assert_eq!(BlendFactor::OneMinusSrcAlpha.gl_enum(), gl::ONE_MINUS_SRC_ALPHA);
        assert_eq!(Capability::StencilTest.gl_enum(), gl::STENCIL_TEST);
        assert_eq!(Primitive::Triangles.gl_enum(), gl::TRIANGLES);
    }
}
