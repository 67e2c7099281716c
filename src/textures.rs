//! Texture loading and sampling configuration.
//!
//! Textures are decoded on the CPU into RGBA8 and uploaded by
//! [`crate::gpu::GpuTexture`]. A texture that fails to load is not fatal:
//! [`TextureConfig::load_or_placeholder`] logs the failure and hands back a
//! 1x1 white texture so rendering can carry on.
//!
//! # Supported Formats
//!
//! - PNG
//! - JPEG

use std::path::Path;

use crate::error::TextureError;

/// Filter mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Smooth linear filtering (default).
    #[default]
    Linear,
    /// Sharp nearest-neighbor filtering.
    Nearest,
}

/// Address mode for texture wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// Clamp to edge color (default). Coordinates outside 0-1 use edge pixels.
    #[default]
    ClampToEdge,
    /// Repeat/tile the texture. Coordinates wrap around.
    Repeat,
}

/// Decoded texture plus how it should be sampled.
#[derive(Debug, Clone)]
pub struct TextureConfig {
    /// Raw RGBA pixel data (width * height * 4 bytes).
    pub data: Vec<u8>,
    /// Texture width in pixels.
    pub width: u32,
    /// Texture height in pixels.
    pub height: u32,
    /// Filter mode for magnification/minification.
    pub filter: FilterMode,
    /// Address mode for UV coordinates outside 0-1.
    pub address_mode: AddressMode,
    /// Whether this is the stand-in for a texture that failed to load.
    pub placeholder: bool,
}

impl TextureConfig {
    /// Create a texture configuration from raw RGBA data.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            filter: FilterMode::Linear,
            address_mode: AddressMode::ClampToEdge,
            placeholder: false,
        })
    }

    /// Decode an image file into RGBA8.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|source| TextureError::ImageLoad {
                path: path.to_path_buf(),
                source,
            })?
            .into_rgba8();
        let (width, height) = img.dimensions();
        log::info!("texture loaded: {} ({}x{})", path.display(), width, height);

        Self::from_rgba(img.into_raw(), width, height)
    }

    /// Decode an image file, or fall back to a white placeholder.
    ///
    /// The failure is logged at warn level; callers get something bindable
    /// either way.
    pub fn load_or_placeholder<P: AsRef<Path>>(path: P) -> Self {
        match Self::from_file(path.as_ref()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("{e}; using placeholder texture");
                Self::placeholder()
            }
        }
    }

    /// 1x1 opaque white texture marking a failed load.
    pub fn placeholder() -> Self {
        Self {
            placeholder: true,
            ..Self::solid(255, 255, 255, 255)
        }
    }

    /// Create a solid color texture (1x1 pixel).
    pub fn solid(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            data: vec![r, g, b, a],
            width: 1,
            height: 1,
            filter: FilterMode::Nearest,
            address_mode: AddressMode::ClampToEdge,
            placeholder: false,
        }
    }

    /// Set the filter mode.
    pub fn with_filter(mut self, filter: FilterMode) -> Self {
        self.filter = filter;
        self
    }

    /// Set the address mode for UV wrapping.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let tex = TextureConfig::load_or_placeholder("texture/metal.png")
    ///     .with_address_mode(AddressMode::Repeat);
    /// ```
    pub fn with_address_mode(mut self, mode: AddressMode) -> Self {
        self.address_mode = mode;
        self
    }

    /// Whether both sides are non-zero and at most `max_dimension` texels.
    pub fn fits(&self, max_dimension: u32) -> bool {
        (1..=max_dimension).contains(&self.width) && (1..=max_dimension).contains(&self.height)
    }

    /// Bytes per row of the pixel data.
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits_device_limit() {
        let tex = TextureConfig::from_rgba(vec![0; 8 * 4 * 4], 8, 4).unwrap();
        assert!(tex.fits(8));
        assert!(!tex.fits(7));
        assert!(TextureConfig::placeholder().fits(1));

        let empty = TextureConfig::from_rgba(Vec::new(), 0, 0).unwrap();
        assert!(!empty.fits(8192));
    }

    #[test]
    fn test_from_rgba_size_check() {
        assert!(TextureConfig::from_rgba(vec![0; 16], 2, 2).is_ok());
        let err = TextureConfig::from_rgba(vec![0; 15], 2, 2).unwrap_err();
        assert!(matches!(
            err,
            TextureError::SizeMismatch {
                expected: 16,
                actual: 15
            }
        ));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let tex = TextureConfig::load_or_placeholder("does/not/exist.png");
        assert!(tex.placeholder);
        assert_eq!(tex.width, 1);
        assert_eq!(tex.height, 1);
        assert_eq!(tex.data, vec![255, 255, 255, 255]);
    }

    #[test]
    fn test_from_file_error() {
        let err = TextureConfig::from_file("does/not/exist.png").unwrap_err();
        assert!(matches!(err, TextureError::ImageLoad { .. }));
    }

    #[test]
    fn test_builders() {
        let tex = TextureConfig::solid(1, 2, 3, 4)
            .with_filter(FilterMode::Linear)
            .with_address_mode(AddressMode::Repeat);
        assert_eq!(tex.filter, FilterMode::Linear);
        assert_eq!(tex.address_mode, AddressMode::Repeat);
        assert_eq!(tex.bytes_per_row(), 4);
    }
}
