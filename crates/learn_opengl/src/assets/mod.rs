//! CPU-side asset loading
//!
//! Decoding of images and OBJ scenes happens here, without touching GL, so the
//! render wrappers only ever see plain pixel and vertex data.

pub mod image_loader;
pub mod obj_loader;

pub use image_loader::ImageData;
pub use obj_loader::{MeshData, ObjLoader, SceneData, SceneNode, TexturePaths};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The file does not exist
    #[error("No such asset: {0}")]
    NotFound(String),

    /// The decoder rejected the file
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Only 3 (RGB) and 4 (RGBA) channel images can be uploaded
    #[error("Unsupported channel count {channels} in {source_name}")]
    UnsupportedChannels {
        /// Image the channels were read from
        source_name: String,
        /// Channel count found
        channels: u8,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
