//! # Mipmap generation
//!
//! Every level below the base is rebuilt from mip 0. The policy depends on the format:
//!
//! - Paletted formats copy raw storage units (bytes, or nibbles for 4 bit formats) from mip 0 at
//!   `(x << i, y << i)`. Palette indices are never decoded, so no palette lookup can miss.
//! - Other formats either go through a [`Resampler`] applied to the full resolution image, or
//!   with [`MipmapFilter::Nearest`] decode and re-encode the nearest source pixel. The resampler
//!   filters the caller's source image when one is given, mip 0 otherwise.
//!
//! The chain length itself is fixed at construction; see [`Texture::allocate_mipmaps`].

use crate::error::{TextureError, TextureResult};
use crate::format::Stride;
use crate::pixel::{decode_pixel, encode_pixel, read_nibble, write_nibble};
use crate::settings::CodecSettings;
use crate::surface::{RgbaSurface, Surface};
use crate::texture::Texture;

/// Filter used when downscaling true colour mip levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResampleFilter {
    /// Nearest neighbour.
    Nearest,
    /// Linear (tent) filter.
    Triangle,
    /// Cubic filter.
    CatmullRom,
    /// Gaussian filter.
    Gaussian,
    /// Lanczos with window 3.
    #[default]
    Lanczos3,
}

/// Downscales images. Implemented outside of the core, for example on top of an image library.
pub trait Resampler {
    /// Resamples `source` to exactly `width` x `height` pixels.
    fn resample(
        &self,
        source: &RgbaSurface,
        width: u32,
        height: u32,
        filter: ResampleFilter,
    ) -> RgbaSurface;
}

/// How true colour mip levels are produced.
#[derive(Clone, Copy, Default)]
pub enum MipmapFilter<'a> {
    /// Sample the nearest base level pixel without filtering.
    #[default]
    Nearest,
    /// Filter the full resolution image with a resampler.
    Resampled {
        /// Downscaler applied once per level.
        resampler: &'a dyn Resampler,
        /// Filter passed to the resampler.
        filter: ResampleFilter,
        /// Image mip 0 was built from. Mip 0 itself is decoded and filtered when `None`.
        source: Option<&'a RgbaSurface>,
    },
}

impl core::fmt::Debug for MipmapFilter<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Nearest => f.write_str("Nearest"),
            Self::Resampled { filter, .. } => f
                .debug_struct("Resampled")
                .field("filter", filter)
                .finish_non_exhaustive(),
        }
    }
}

impl Texture {
    /// Regenerates mip levels `1..mipmap_count()` from mip 0.
    ///
    /// Does nothing when a base dimension is odd or the texture has fewer than two levels.
    ///
    /// # Errors
    ///
    /// - [`TextureError::CompressedPixelAccess`] if the texture is block compressed.
    /// - [`TextureError::SurfaceSizeMismatch`] if a resampling source or a resampler output has
    ///   the wrong size.
    pub fn generate_mipmaps(
        &mut self,
        filter: MipmapFilter<'_>,
        settings: &CodecSettings,
    ) -> TextureResult<()> {
        if self.format.is_compressed() {
            return Err(TextureError::CompressedPixelAccess(self.format));
        }
        if !self.can_generate_mipmaps() || self.mipmaps.len() < 2 {
            return Ok(());
        }

        if self.format.is_paletted() {
            self.copy_paletted_mipmaps();
            return Ok(());
        }

        match filter {
            MipmapFilter::Nearest => self.sample_nearest_mipmaps(settings),
            MipmapFilter::Resampled {
                resampler,
                filter,
                source,
            } => self.resample_mipmaps(resampler, filter, source, settings),
        }
    }

    /// Drops every level from the first one whose width and height are both below the minimum.
    ///
    /// A level is kept while either dimension still reaches the minimum. The base level is
    /// never removed.
    pub fn remove_mipmaps_below_size(&mut self, min_width: u32, min_height: u32) {
        let first_too_small = (1..self.mipmaps.len()).find(|&index| {
            let (width, height) = self.mip_dimensions(index);
            width < min_width && height < min_height
        });

        if let Some(index) = first_too_small {
            self.mipmaps.truncate(index);
        }
    }

    fn copy_paletted_mipmaps(&mut self) {
        let base_width = self.width as usize;
        let stride = self.format.stride();
        let (base, levels) = self.mipmaps.split_at_mut(1);
        let base = &base[0];

        for (offset, level) in levels.iter_mut().enumerate() {
            let shift = offset + 1;
            let width = base_width >> shift;
            let height = (self.height as usize) >> shift;

            for y in 0..height {
                for x in 0..width {
                    let source = (y << shift) * base_width + (x << shift);
                    let destination = y * width + x;
                    match stride {
                        Stride::TwoPixelsPerByte => {
                            write_nibble(level, destination, read_nibble(base, source))
                        }
                        Stride::Bytes(bytes) => {
                            let bytes = bytes as usize;
                            level[destination * bytes..(destination + 1) * bytes]
                                .copy_from_slice(&base[source * bytes..(source + 1) * bytes]);
                        }
                        Stride::Block(_) => unreachable!("paletted formats are never compressed"),
                    }
                }
            }
        }
    }

    fn sample_nearest_mipmaps(&mut self, settings: &CodecSettings) -> TextureResult<()> {
        let base_width = self.width as usize;
        let (base, levels) = self.mipmaps.split_at_mut(1);
        let base = &base[0];

        for (offset, level) in levels.iter_mut().enumerate() {
            let shift = offset + 1;
            let width = base_width >> shift;
            let height = (self.height as usize) >> shift;

            for y in 0..height {
                for x in 0..width {
                    let source = (y << shift) * base_width + (x << shift);
                    let color = decode_pixel(self.format, &self.palette, base, source)?;
                    encode_pixel(
                        self.format,
                        &self.palette,
                        level,
                        y * width + x,
                        color,
                        settings,
                    )?;
                }
            }
        }
        Ok(())
    }

    fn resample_mipmaps(
        &mut self,
        resampler: &dyn Resampler,
        filter: ResampleFilter,
        source: Option<&RgbaSurface>,
        settings: &CodecSettings,
    ) -> TextureResult<()> {
        let decoded;
        let source = match source {
            Some(source) => {
                let (width, height) = self.mip_dimensions(0);
                if source.width() != width || source.height() != height {
                    return Err(TextureError::SurfaceSizeMismatch {
                        width,
                        height,
                        actual_width: source.width(),
                        actual_height: source.height(),
                    });
                }
                source
            }
            None => {
                decoded = self.to_surface(0, true)?;
                &decoded
            }
        };

        for mip in 1..self.mipmaps.len() {
            let (width, height) = self.mip_dimensions(mip);
            let resized = resampler.resample(source, width, height, filter);
            if resized.width() != width || resized.height() != height {
                return Err(TextureError::SurfaceSizeMismatch {
                    width,
                    height,
                    actual_width: resized.width(),
                    actual_height: resized.height(),
                });
            }

            let level = &mut self.mipmaps[mip];
            for y in 0..height {
                for x in 0..width {
                    let pixel = y as usize * width as usize + x as usize;
                    let color = resized.get_pixel(x, y);
                    encode_pixel(self.format, &self.palette, level, pixel, color, settings)?;
                }
            }
        }
        Ok(())
    }
}
