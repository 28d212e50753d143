//! Textures and texture units
//!
//! A [`Texture`] owns its GL name and remembers the unit it is bound on.
//! Programs keep textures keyed by unit and rebind them on every use, so two
//! textures sharing a unit replace each other.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use gl::types::{GLenum, GLint, GLsizei, GLuint};

use crate::assets::{AssetError, ImageData};
use crate::render::error::{checked, GlError, GlResult};

/// Texture bind target
///
/// Images are uploaded with a single `glTexImage2D`, so only 2D targets exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    /// `GL_TEXTURE_2D`
    Texture2D,
}

impl TextureTarget {
    /// GL enum value
    pub const fn gl_enum(self) -> GLenum {
        match self {
            Self::Texture2D => gl::TEXTURE_2D,
        }
    }
}

/// Texture image unit, counted from `GL_TEXTURE0`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextureUnit(pub u32);

impl TextureUnit {
    /// Value passed to `glActiveTexture`
    pub const fn gl_enum(self) -> GLenum {
        gl::TEXTURE0 + self.0
    }

    /// Value a sampler uniform is set to
    pub const fn index(self) -> GLint {
        self.0 as GLint
    }

    /// The unit after this one
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Role of a texture within a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextureKind {
    /// Base color map
    Diffuse,
    /// Specular intensity map
    Specular,
}

impl fmt::Display for TextureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Diffuse => f.write_str("diffuse"),
            Self::Specular => f.write_str("specular"),
        }
    }
}

/// Options for [`Texture::bind`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOptions {
    /// Regenerate the mipmap chain after binding
    pub generate_mipmap: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self { generate_mipmap: true }
    }
}

impl BindOptions {
    /// Bind without touching mipmaps
    pub const NO_MIPMAP: Self = Self { generate_mipmap: false };
}

/// Values accepted by [`Texture::set_parameter`]
pub trait TextureParamValue: Copy {
    /// Call the matching `glTexParameter*` variant
    ///
    /// # Safety
    /// Requires a current context with a texture bound to `target`.
    unsafe fn apply(self, target: GLenum, pname: GLenum);
}

impl TextureParamValue for GLint {
    unsafe fn apply(self, target: GLenum, pname: GLenum) {
        gl::TexParameteri(target, pname, self);
    }
}

impl TextureParamValue for f32 {
    unsafe fn apply(self, target: GLenum, pname: GLenum) {
        gl::TexParameterf(target, pname, self);
    }
}

/// Pixel format for an image with `channels` 8-bit channels
pub fn pixel_format(channels: u8, source_name: &str) -> Result<GLenum, AssetError> {
    match channels {
        3 => Ok(gl::RGB),
        4 => Ok(gl::RGBA),
        _ => Err(AssetError::UnsupportedChannels {
            source_name: source_name.to_string(),
            channels,
        }),
    }
}

/// Owned GL texture bound on a fixed unit
#[derive(Debug)]
pub struct Texture {
    id: GLuint,
    target: TextureTarget,
    unit: TextureUnit,
    _not_send: PhantomData<*const ()>,
}

impl Texture {
    fn generate(target: TextureTarget, unit: TextureUnit) -> GlResult<Self> {
        let mut id: GLuint = 0;
        // SAFETY: writes exactly one name into `id`.
        unsafe { gl::GenTextures(1, &mut id) };
        checked("glGenTextures")?;
        if id == 0 {
            return Err(GlError::CreateFailed("glGenTextures"));
        }
        // From here on a failure drops `texture` and deletes the name.
        let texture = Self {
            id,
            target,
            unit,
            _not_send: PhantomData,
        };
        texture.bind(&BindOptions::NO_MIPMAP)?;
        Ok(texture)
    }

    /// Load an image file into a new texture on `unit`
    ///
    /// PNG files are flipped vertically while decoding. Only RGB and RGBA
    /// images are accepted.
    pub fn from_file<P: AsRef<Path>>(target: TextureTarget, unit: TextureUnit, path: P) -> GlResult<Self> {
        let path = path.as_ref();
        let texture = Self::generate(target, unit)?;

        let image = ImageData::from_file(path).map_err(|e| {
            log::error!("Failed to load image {}: {}", path.display(), e);
            e
        })?;
        let format = pixel_format(image.channels, &path.display().to_string())?;

        // SAFETY: `image.data` holds width * height * channels tightly packed bytes.
        unsafe {
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexImage2D(
                target.gl_enum(),
                0,
                format as GLint,
                image.width as GLsizei,
                image.height as GLsizei,
                0,
                format,
                gl::UNSIGNED_BYTE,
                image.data.as_ptr().cast(),
            );
        }
        checked("glTexImage2D")?;

        log::debug!(
            "Loaded texture {} ({}x{}, {} channels) on unit {}",
            path.display(),
            image.width,
            image.height,
            image.channels,
            unit.0
        );
        Ok(texture)
    }

    /// Load a 2D texture on `unit`
    pub fn from_file_2d<P: AsRef<Path>>(unit: TextureUnit, path: P) -> GlResult<Self> {
        Self::from_file(TextureTarget::Texture2D, unit, path)
    }

    /// Allocate an empty RGB texture for use as a render target
    pub fn empty(width: u32, height: u32, unit: TextureUnit) -> GlResult<Self> {
        let texture = Self::generate(TextureTarget::Texture2D, unit)?;
        // SAFETY: a null pixel pointer only allocates storage.
        unsafe {
            gl::TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::RGB as GLint,
                width as GLsizei,
                height as GLsizei,
                0,
                gl::RGB,
                gl::UNSIGNED_BYTE,
                std::ptr::null(),
            );
        }
        checked("glTexImage2D")?;
        texture.set_parameter(gl::TEXTURE_MIN_FILTER, gl::LINEAR as GLint)?;
        texture.set_parameter(gl::TEXTURE_MAG_FILTER, gl::LINEAR as GLint)?;
        Ok(texture)
    }

    /// Activate this texture's unit and bind it there
    pub fn bind(&self, options: &BindOptions) -> GlResult<()> {
        // SAFETY: unit and target are valid enums, `id` is owned by self.
        unsafe { gl::ActiveTexture(self.unit.gl_enum()) };
        checked("glActiveTexture")?;
        // SAFETY: `id` is a live texture created for `target`.
        unsafe { gl::BindTexture(self.target.gl_enum(), self.id) };
        checked("glBindTexture")?;

        if options.generate_mipmap {
            // SAFETY: the texture is bound to `target`.
            unsafe { gl::GenerateMipmap(self.target.gl_enum()) };
            checked("glGenerateMipmap")?;
        }
        Ok(())
    }

    /// Set a sampling parameter such as `GL_TEXTURE_WRAP_S`
    pub fn set_parameter<V: TextureParamValue>(&self, pname: GLenum, value: V) -> GlResult<()> {
        self.bind(&BindOptions::NO_MIPMAP)?;
        // SAFETY: the texture was just bound to `target`.
        unsafe { value.apply(self.target.gl_enum(), pname) };
        checked("glTexParameter")
    }

    /// Unit the texture binds to
    pub const fn unit(&self) -> TextureUnit {
        self.unit
    }

    /// Bind target
    pub const fn target(&self) -> TextureTarget {
        self.target
    }

    /// GL object name
    pub const fn id(&self) -> GLuint {
        self.id
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        // SAFETY: `id` was generated by glGenTextures and is deleted once.
        unsafe { gl::DeleteTextures(1, &self.id) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_offsets_from_texture0() {
        assert_eq!(TextureUnit(0).gl_enum(), gl::TEXTURE0);
        assert_eq!(TextureUnit(3).gl_enum(), gl::TEXTURE3);
        assert_eq!(TextureUnit(1).index(), 1);
        assert_eq!(TextureUnit(1).next(), TextureUnit(2));
    }

    #[test]
    fn test_pixel_format_by_channels() {
        assert_eq!(pixel_format(3, "a.jpg").unwrap(), gl::RGB);
        assert_eq!(pixel_format(4, "a.png").unwrap(), gl::RGBA);
        assert!(matches!(
            pixel_format(1, "mask.png"),
            Err(AssetError::UnsupportedChannels { channels: 1, .. })
        ));
    }

    #[test]
    fn test_target_is_2d() {
        assert_eq!(TextureTarget::Texture2D.gl_enum(), gl::TEXTURE_2D);
    }

    #[test]
    fn test_mipmaps_on_by_default() {
        assert!(BindOptions::default().generate_mipmap);
        assert!(!BindOptions::NO_MIPMAP.generate_mipmap);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(TextureKind::Diffuse.to_string(), "diffuse");
        assert_eq!(TextureKind::Specular.to_string(), "specular");
    }
}
