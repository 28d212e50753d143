//! # Learn OpenGL
//!
//! RAII wrappers over raw OpenGL object handles, plus the small amount of
//! scaffolding (window/context, camera, mesh and model loading) the
//! LearnOpenGL sections are built from.
//!
//! ## Features
//!
//! - **Owned handles**: buffers, vertex arrays, textures, programs, framebuffers
//!   and renderbuffers release their GL object on drop
//! - **Checked calls**: every GL entry point is followed by an error-flag check
//!   that reports the caller location
//! - **Lazy linking**: programs link on first use after a shader is attached
//! - **Uniform bookkeeping**: `use_program` refuses to draw while an active
//!   uniform is still unassigned
//! - **Texture units**: textures carry their unit and are rebound on use
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use learn_opengl::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     learn_opengl::foundation::logging::init();
//!     let mut context = Context::create(&ContextConfig::default())?;
//!
//!     let vertices: [f32; 9] = [-0.5, -0.5, 0.0, 0.5, -0.5, 0.0, 0.0, 0.5, 0.0];
//!     let vao = std::rc::Rc::new(VertexArray::new(true)?);
//!     let vbo = ArrayBuffer::<f32>::new()?;
//!     vbo.write(&vertices)?;
//!     vbo.vertex_attribute_pointer_simple_offset(0, 3, 3, 0)?;
//!
//!     let mut program = Program::new()?;
//!     program.attach_shader_file(ShaderStage::Vertex, "shaders/triangle.vs")?;
//!     program.attach_shader_file(ShaderStage::Fragment, "shaders/triangle.fs")?;
//!     program.set_vertex_array(vao);
//!
//!     while !context.should_close() {
//!         state::clear(ClearFlags::COLOR)?;
//!         program.use_program()?;
//!         state::draw_arrays(Primitive::Triangles, 0, 3)?;
//!         context.swap_buffers();
//!         context.poll_events();
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod render;

/// Common imports for section programs
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ContextConfig},
        foundation::{
            math::{self, Mat3, Mat4, Vec2, Vec3, Vec4},
            time::FrameTimer,
        },
        render::{
            buffer::{ArrayBuffer, ElementBuffer},
            camera::{Camera, CursorTracker, Movement},
            context::Context,
            error::{GlError, GlResult},
            framebuffer::{FrameBuffer, RenderBuffer},
            mesh::{Mesh, TextureVariables, Vertex},
            model::Model,
            program::{Program, ShaderStage},
            state::{self, BlendFactor, Capability, ClearFlags, CompareFunc, Primitive, StencilAction},
            texture::{BindOptions, Texture, TextureKind, TextureTarget, TextureUnit},
            vertex_array::VertexArray,
        },
    };
}
