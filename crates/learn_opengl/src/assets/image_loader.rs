//! Image loading utilities for texture data
//!
//! Decodes PNG and JPEG files into tightly packed 8-bit RGB or RGBA rows ready
//! for `glTexImage2D`.

use std::path::Path;

use image::DynamicImage;

use crate::assets::AssetError;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw pixel rows, bottom row first when flipped
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (3 or 4)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    ///
    /// PNG files are flipped vertically so their first row lands at the bottom
    /// of texture space; other formats are uploaded as stored.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            log::error!("no image {}", path_ref.display());
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e)))?;

        let image = Self::from_dynamic(img, flips_on_load(path_ref), &path_ref.display().to_string())?;
        log::info!("Loaded image {}x{} ({} channels) from {:?}", image.width, image.height, image.channels, path_ref);
        Ok(image)
    }

    /// Convert a decoded image, keeping its native channel count
    pub fn from_dynamic(img: DynamicImage, flip_vertically: bool, source_name: &str) -> Result<Self, AssetError> {
        let img = if flip_vertically { img.flipv() } else { img };
        let (width, height) = (img.width(), img.height());

        let channels = img.color().channel_count();
        let data = match channels {
            3 => img.into_rgb8().into_raw(),
            4 => img.into_rgba8().into_raw(),
            other => {
                log::error!("unsupported channels {} in {}", other, source_name);
                return Err(AssetError::UnsupportedChannels {
                    source_name: source_name.to_string(),
                    channels: other,
                });
            }
        };

        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }
}

/// Whether an image file is flipped vertically on load
pub fn flips_on_load(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Rgb, RgbImage, Rgba, RgbaImage};

    #[test]
    fn test_rgb_keeps_three_channels() {
        let img = RgbImage::from_pixel(4, 2, Rgb([10, 20, 30]));
        let data = ImageData::from_dynamic(DynamicImage::ImageRgb8(img), false, "rgb").unwrap();
        assert_eq!(data.channels, 3);
        assert_eq!((data.width, data.height), (4, 2));
        assert_eq!(data.data.len(), 4 * 2 * 3);
        assert_eq!(&data.data[0..3], &[10, 20, 30]);
    }

    #[test]
    fn test_flip_moves_last_row_first() {
        let mut img = RgbaImage::from_pixel(1, 2, Rgba([0, 0, 0, 255]));
        img.put_pixel(0, 1, Rgba([255, 0, 0, 255]));
        let data = ImageData::from_dynamic(DynamicImage::ImageRgba8(img), true, "rgba").unwrap();
        assert_eq!(data.channels, 4);
        assert_eq!(&data.data[0..4], &[255, 0, 0, 255]);
        assert_eq!(&data.data[4..8], &[0, 0, 0, 255]);
    }

    #[test]
    fn test_grayscale_is_rejected() {
        let img = GrayImage::new(2, 2);
        let err = ImageData::from_dynamic(DynamicImage::ImageLuma8(img), false, "gray").unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedChannels { channels: 1, .. }));
    }

    #[test]
    fn test_only_png_flips() {
        assert!(flips_on_load(Path::new("resource/awesomeface.png")));
        assert!(flips_on_load(Path::new("resource/GRASS.PNG")));
        assert!(!flips_on_load(Path::new("resource/container.jpg")));
        assert!(!flips_on_load(Path::new("resource/noext")));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ImageData::from_file("resource/missing.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
