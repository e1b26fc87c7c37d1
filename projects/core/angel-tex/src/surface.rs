//! Bulk pixel exchange with host bitmaps.

use crate::color::Color8888;
use crate::error::{TextureError, TextureResult};
use crate::pixel::{decode_pixel, encode_pixel};
use crate::settings::CodecSettings;
use crate::texture::Texture;
use alloc::vec;
use alloc::vec::Vec;

/// A 2D RGBA8888 pixel buffer owned by the host application.
///
/// Accessors may panic if the coordinates are outside of `width() x height()`.
pub trait Surface {
    /// Width in pixels.
    fn width(&self) -> u32;

    /// Height in pixels.
    fn height(&self) -> u32;

    /// Reads a pixel.
    fn get_pixel(&self, x: u32, y: u32) -> Color8888;

    /// Writes a pixel.
    fn set_pixel(&mut self, x: u32, y: u32, color: Color8888);
}

/// Row major RGBA8888 buffer without padding between rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaSurface {
    /// Creates a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Wraps existing RGBA8888 bytes.
    ///
    /// Returns [`None`] if `data` is not exactly `width * height * 4` bytes long.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// The raw RGBA8888 bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8888 bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the surface, returning its bytes.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel out of bounds");
        (y as usize * self.width as usize + x as usize) * 4
    }
}

impl Surface for RgbaSurface {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn get_pixel(&self, x: u32, y: u32) -> Color8888 {
        let offset = self.offset(x, y);
        Color8888::from_rgba_bytes([
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ])
    }

    #[inline]
    fn set_pixel(&mut self, x: u32, y: u32, color: Color8888) {
        let offset = self.offset(x, y);
        self.data[offset..offset + 4].copy_from_slice(&color.to_rgba_bytes());
    }
}

impl Texture {
    /// Decodes a whole mip level into an [`RgbaSurface`].
    ///
    /// When `use_alpha` is false every exported pixel is opaque.
    ///
    /// # Errors
    ///
    /// - [`TextureError::CompressedPixelAccess`] if the texture is block compressed.
    /// - [`TextureError::MipIndexOutOfRange`] if `mip` does not exist.
    pub fn to_surface(&self, mip: usize, use_alpha: bool) -> TextureResult<RgbaSurface> {
        if self.format.is_compressed() {
            return Err(TextureError::CompressedPixelAccess(self.format));
        }
        self.check_mip_index(mip)?;

        let (width, height) = self.mip_dimensions(mip);
        let mut surface = RgbaSurface::new(width, height);
        let data = &self.mipmaps[mip];
        for (pixel, out) in surface.data.chunks_exact_mut(4).enumerate() {
            let mut color = decode_pixel(self.format, &self.palette, data, pixel)?;
            if !use_alpha {
                color = color.opaque();
            }
            out.copy_from_slice(&color.to_rgba_bytes());
        }
        Ok(surface)
    }

    /// Encodes a host surface into mip level 0.
    ///
    /// Paletted formats need their palette set up first, see [`Texture::set_pixel`].
    ///
    /// # Errors
    ///
    /// - [`TextureError::CompressedPixelAccess`] if the texture is block compressed.
    /// - [`TextureError::SurfaceSizeMismatch`] if the surface is not `width x height`.
    /// - [`TextureError::MipIndexOutOfRange`] if the texture has no mip levels.
    pub fn copy_from_surface<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
        settings: &CodecSettings,
    ) -> TextureResult<()> {
        if self.format.is_compressed() {
            return Err(TextureError::CompressedPixelAccess(self.format));
        }

        let (width, height) = (self.width as u32, self.height as u32);
        if surface.width() != width || surface.height() != height {
            return Err(TextureError::SurfaceSizeMismatch {
                width,
                height,
                actual_width: surface.width(),
                actual_height: surface.height(),
            });
        }
        self.check_mip_index(0)?;

        let data = &mut self.mipmaps[0];
        for y in 0..height {
            for x in 0..width {
                let pixel = y as usize * width as usize + x as usize;
                let color = surface.get_pixel(x, y);
                encode_pixel(self.format, &self.palette, data, pixel, color, settings)?;
            }
        }
        Ok(())
    }
}
