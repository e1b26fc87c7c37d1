//! # Pixel codec
//!
//! Per pixel encode and decode for every uncompressed [`TextureFormat`].
//!
//! ## Paletted formats
//!
//! Encoding looks up the exact colour in the palette. There is no nearest colour fallback: a
//! colour missing from the palette is written as index 255, which becomes 15 for the 4 bit
//! formats. Callers are expected to quantize to palette entries first.
//!
//! [`TextureFormat::P8A8`] looks up the colour with alpha forced to 255 and stores the alpha
//! separately; [`TextureFormat::P8`] and [`TextureFormat::PA8`] match including alpha.
//!
//! ## Sub byte packing
//!
//! [`TextureFormat::P4`] and [`TextureFormat::PA4`] store two pixels per byte. The pixel with the
//! even linear index (`y * width + x`) lives in the low nibble.

use crate::color::Color8888;
use crate::error::{TextureError, TextureResult};
use crate::format::TextureFormat;
use crate::settings::CodecSettings;
use crate::texture::Texture;

/// Palette index written for colours which are not in the palette.
pub const PALETTE_MISS_INDEX: u8 = 0xFF;

/// Index of the first palette entry equal to `color`, or [`PALETTE_MISS_INDEX`].
#[inline]
pub fn palette_index_of(palette: &[Color8888], color: Color8888) -> u8 {
    palette
        .iter()
        .position(|entry| *entry == color)
        .map_or(PALETTE_MISS_INDEX, |index| index as u8)
}

/// Scales an 8 bit value to `0..=maximum`, truncating.
#[inline]
pub(crate) fn remap_color_range(value: u8, maximum: u8) -> u8 {
    ((value as f32 / 255.0) * maximum as f32) as u8
}

/// Expands a 5 bit channel placed in the top bits of a byte back to 8 bits.
#[inline]
fn expand_5bit(value: u8) -> u8 {
    if value & 0x08 != 0 {
        value | 0x0F
    } else {
        value
    }
}

/// Packs a colour into an `A1R5G5B5` value.
///
/// Each colour channel keeps its top 5 bits. The alpha bit is set when `color.a >= alpha_ref`.
#[inline]
pub fn pack_a1r5g5b5(color: Color8888, alpha_ref: u8) -> u16 {
    let a1 = (color.a >= alpha_ref) as u16;
    let r5 = (color.r >> 3) as u16;
    let g5 = (color.g >> 3) as u16;
    let b5 = (color.b >> 3) as u16;
    (a1 << 15) | (r5 << 10) | (g5 << 5) | b5
}

/// Unpacks an `A1R5G5B5` value. Alpha is either 0 or 255.
#[inline]
pub fn unpack_a1r5g5b5(value: u16) -> Color8888 {
    let a = if value & 0x8000 != 0 { 255 } else { 0 };
    let r = ((value & 0x7C00) >> 7) as u8;
    let g = ((value & 0x03E0) >> 2) as u8;
    let b = ((value & 0x001F) << 3) as u8;
    Color8888::new(expand_5bit(r), expand_5bit(g), expand_5bit(b), a)
}

/// Decodes the pixel with linear index `pixel` from a mip level buffer.
pub(crate) fn decode_pixel(
    format: TextureFormat,
    palette: &[Color8888],
    data: &[u8],
    pixel: usize,
) -> TextureResult<Color8888> {
    Ok(match format {
        TextureFormat::P4 | TextureFormat::PA4 => {
            let nibbles = data[pixel / 2];
            let index = if pixel % 2 == 1 {
                nibbles >> 4
            } else {
                nibbles & 0x0F
            };
            palette[index as usize]
        }
        TextureFormat::P8 | TextureFormat::PA8 => palette[data[pixel] as usize],
        TextureFormat::P8A8 => {
            let offset = pixel * 2;
            palette[data[offset] as usize].with_alpha(data[offset + 1])
        }
        TextureFormat::A4I4 => {
            let nibbles = data[pixel];
            Color8888::grey((nibbles & 0x0F) * 17, (nibbles >> 4) * 17)
        }
        TextureFormat::A8I8 => {
            let offset = pixel * 2;
            Color8888::grey(data[offset + 1], data[offset])
        }
        TextureFormat::I8 => Color8888::grey(data[pixel], 255),
        TextureFormat::A8 => Color8888::WHITE.with_alpha(data[pixel]),
        TextureFormat::RGB888 => {
            let offset = pixel * 3;
            Color8888::new(data[offset], data[offset + 1], data[offset + 2], 255)
        }
        TextureFormat::RGB8888 => {
            let offset = pixel * 4;
            Color8888::new(
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            )
        }
        TextureFormat::A1R5G5B5 => {
            let offset = pixel * 2;
            unpack_a1r5g5b5(u16::from_le_bytes([data[offset], data[offset + 1]]))
        }
        TextureFormat::DXT1 | TextureFormat::DXT3 | TextureFormat::DXT5 => {
            return Err(TextureError::CompressedPixelAccess(format))
        }
    })
}

/// Encodes `color` into the pixel with linear index `pixel` of a mip level buffer.
pub(crate) fn encode_pixel(
    format: TextureFormat,
    palette: &[Color8888],
    data: &mut [u8],
    pixel: usize,
    color: Color8888,
    settings: &CodecSettings,
) -> TextureResult<()> {
    match format {
        TextureFormat::P4 | TextureFormat::PA4 => {
            let index = palette_index_of(palette, color) & 0x0F;
            write_nibble(data, pixel, index);
        }
        TextureFormat::P8 | TextureFormat::PA8 => {
            data[pixel] = palette_index_of(palette, color);
        }
        TextureFormat::P8A8 => {
            let offset = pixel * 2;
            data[offset] = palette_index_of(palette, color.opaque());
            data[offset + 1] = color.a;
        }
        TextureFormat::A4I4 => {
            let grey = remap_color_range(color.average(), 15);
            let alpha = remap_color_range(color.a, 15);
            data[pixel] = ((alpha & 0x0F) << 4) | (grey & 0x0F);
        }
        TextureFormat::A8I8 => {
            let offset = pixel * 2;
            data[offset] = color.a;
            data[offset + 1] = color.average();
        }
        TextureFormat::I8 => data[pixel] = color.average(),
        TextureFormat::A8 => data[pixel] = color.a,
        TextureFormat::RGB888 => {
            let offset = pixel * 3;
            data[offset..offset + 3].copy_from_slice(&[color.r, color.g, color.b]);
        }
        TextureFormat::RGB8888 => {
            let offset = pixel * 4;
            data[offset..offset + 4].copy_from_slice(&color.to_rgba_bytes());
        }
        TextureFormat::A1R5G5B5 => {
            let offset = pixel * 2;
            let packed = pack_a1r5g5b5(color, settings.alpha_ref);
            data[offset..offset + 2].copy_from_slice(&packed.to_le_bytes());
        }
        TextureFormat::DXT1 | TextureFormat::DXT3 | TextureFormat::DXT5 => {
            return Err(TextureError::CompressedPixelAccess(format))
        }
    }
    Ok(())
}

/// Reads the 4 bit value of pixel `pixel` from a two pixels per byte buffer.
#[inline]
pub(crate) fn read_nibble(data: &[u8], pixel: usize) -> u8 {
    let byte = data[pixel / 2];
    if pixel % 2 == 1 {
        byte >> 4
    } else {
        byte & 0x0F
    }
}

/// Writes the 4 bit value of pixel `pixel` into a two pixels per byte buffer, keeping the
/// neighbouring pixel.
#[inline]
pub(crate) fn write_nibble(data: &mut [u8], pixel: usize, value: u8) {
    let byte = &mut data[pixel / 2];
    if pixel % 2 == 1 {
        *byte = (value << 4) | (*byte & 0x0F);
    } else {
        *byte = (*byte & 0xF0) | (value & 0x0F);
    }
}

impl Texture {
    /// Gets a pixel color from the specified mip level.
    ///
    /// Coordinates are in the mip level's own space; the caller scales them for smaller levels.
    ///
    /// # Errors
    ///
    /// - [`TextureError::CompressedPixelAccess`] if the texture is block compressed.
    /// - [`TextureError::MipIndexOutOfRange`] or [`TextureError::PixelOutOfBounds`] for bad
    ///   coordinates.
    pub fn get_pixel(&self, x: u32, y: u32, mip: usize) -> TextureResult<Color8888> {
        let pixel = self.pixel_index(x, y, mip)?;
        decode_pixel(self.format, &self.palette, &self.mipmaps[mip], pixel)
    }

    /// Sets a pixel color on the specified mip level.
    ///
    /// For paletted formats the color must already be a palette entry, see the
    /// [module documentation](crate::pixel).
    ///
    /// # Errors
    ///
    /// Same as [`Texture::get_pixel`].
    pub fn set_pixel(
        &mut self,
        x: u32,
        y: u32,
        mip: usize,
        color: Color8888,
        settings: &CodecSettings,
    ) -> TextureResult<()> {
        let pixel = self.pixel_index(x, y, mip)?;
        encode_pixel(
            self.format,
            &self.palette,
            &mut self.mipmaps[mip],
            pixel,
            color,
            settings,
        )
    }

    /// Validates a pixel address and returns its linear index within the mip level.
    fn pixel_index(&self, x: u32, y: u32, mip: usize) -> TextureResult<usize> {
        if self.format.is_compressed() {
            return Err(TextureError::CompressedPixelAccess(self.format));
        }
        self.check_mip_index(mip)?;

        let (width, height) = self.mip_dimensions(mip);
        if x >= width || y >= height {
            return Err(TextureError::PixelOutOfBounds {
                x,
                y,
                width,
                height,
            });
        }
        Ok(y as usize * width as usize + x as usize)
    }
}
