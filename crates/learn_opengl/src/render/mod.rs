//! OpenGL resource wrappers
//!
//! Every type here owns exactly one GL object and deletes it on drop. None of
//! them are `Clone` or `Send`; resources used from several places are shared
//! through `Rc`. All operations return [`GlResult`](error::GlResult) and check
//! the GL error flag after each native call.

pub mod buffer;
pub mod camera;
pub mod context;
pub mod error;
pub mod framebuffer;
pub mod mesh;
pub mod model;
pub mod program;
pub mod state;
pub mod texture;
pub mod uniform_block;
pub mod vertex_array;

pub use camera::{Camera, CursorTracker, Movement};
pub use context::Context;
pub use error::{GlError, GlResult};
pub use mesh::{Mesh, Vertex};
pub use model::Model;
pub use program::{Program, ShaderStage};
pub use texture::{Texture, TextureKind, TextureUnit};
pub use vertex_array::VertexArray;
