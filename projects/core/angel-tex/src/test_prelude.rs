//! Common test imports and utilities for texture tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Core functionality from this crate
pub use crate::{
    BlockCodec, BlockCodecError, BlockFormat, CodecSettings, Color8888, CompressionQuality,
    ErrorKind, MipmapFilter, ResampleFilter, Resampler, RgbaSurface, Surface, Texture,
    TextureError, TextureFlags, TextureFormat,
};

pub use alloc::vec;
pub use alloc::vec::Vec;

/// A block codec which stores the top left pixel of each block and decodes it as a flat block.
///
/// Images made of one colour survive a round trip exactly.
pub struct FlatBlockCodec;

impl BlockCodec for FlatBlockCodec {
    fn encode(
        &self,
        format: BlockFormat,
        width: u32,
        height: u32,
        rgba: &[u8],
        _quality: CompressionQuality,
    ) -> Result<Vec<u8>, BlockCodecError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(BlockCodecError::InvalidLength {
                format,
                expected,
                actual: rgba.len(),
            });
        }

        let blocks_x = (width as usize).div_ceil(4);
        let mut output = vec![0; format.compressed_size(width, height)];
        for (index, block) in output.chunks_exact_mut(format.block_size()).enumerate() {
            let x = (index % blocks_x) * 4;
            let y = (index / blocks_x) * 4;
            let offset = (y * width as usize + x) * 4;
            block[..4].copy_from_slice(&rgba[offset..offset + 4]);
        }
        Ok(output)
    }

    fn decode(
        &self,
        format: BlockFormat,
        data: &[u8],
        width: u32,
        height: u32,
        output: &mut [u8],
    ) -> Result<(), BlockCodecError> {
        let expected = format.compressed_size(width, height);
        if data.len() != expected {
            return Err(BlockCodecError::InvalidLength {
                format,
                expected,
                actual: data.len(),
            });
        }

        let blocks_x = (width as usize).div_ceil(4);
        for y in 0..height as usize {
            for x in 0..width as usize {
                let block = ((y / 4) * blocks_x + x / 4) * format.block_size();
                let offset = (y * width as usize + x) * 4;
                output[offset..offset + 4].copy_from_slice(&data[block..block + 4]);
            }
        }
        Ok(())
    }
}

/// A block codec whose encoder returns one byte too few.
pub struct ShortBlockCodec;

impl BlockCodec for ShortBlockCodec {
    fn encode(
        &self,
        format: BlockFormat,
        width: u32,
        height: u32,
        _rgba: &[u8],
        _quality: CompressionQuality,
    ) -> Result<Vec<u8>, BlockCodecError> {
        Ok(vec![0; format.compressed_size(width, height) - 1])
    }

    fn decode(
        &self,
        format: BlockFormat,
        _data: &[u8],
        _width: u32,
        _height: u32,
        _output: &mut [u8],
    ) -> Result<(), BlockCodecError> {
        Err(BlockCodecError::UnsupportedFormat(format))
    }
}

/// Averages the source pixels covered by each destination pixel. Ignores the filter.
pub struct BoxResampler;

impl Resampler for BoxResampler {
    fn resample(
        &self,
        source: &RgbaSurface,
        width: u32,
        height: u32,
        _filter: ResampleFilter,
    ) -> RgbaSurface {
        let mut output = RgbaSurface::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let (x0, x1) = (x * source.width() / width, (x + 1) * source.width() / width);
                let (y0, y1) = (y * source.height() / height, (y + 1) * source.height() / height);

                let mut sum = [0u32; 4];
                let mut count = 0;
                for sy in y0..y1.max(y0 + 1) {
                    for sx in x0..x1.max(x0 + 1) {
                        let color = source.get_pixel(sx, sy);
                        sum[0] += color.r as u32;
                        sum[1] += color.g as u32;
                        sum[2] += color.b as u32;
                        sum[3] += color.a as u32;
                        count += 1;
                    }
                }
                output.set_pixel(
                    x,
                    y,
                    Color8888::new(
                        (sum[0] / count) as u8,
                        (sum[1] / count) as u8,
                        (sum[2] / count) as u8,
                        (sum[3] / count) as u8,
                    ),
                );
            }
        }
        output
    }
}

/// `count` distinct opaque greys from black to white.
pub(crate) fn grey_palette(count: usize) -> Vec<Color8888> {
    let steps = count.saturating_sub(1).max(1);
    (0..count)
        .map(|i| Color8888::grey((i * 255 / steps) as u8, 255))
        .collect()
}

/// `count` distinct colours with varying alpha.
pub(crate) fn pattern_palette(count: usize) -> Vec<Color8888> {
    (0..count)
        .map(|i| {
            Color8888::new(
                i as u8,
                (i * 7) as u8,
                255 - i as u8,
                (i * 3 + 1) as u8,
            )
        })
        .collect()
}

/// `count` distinct opaque colours.
pub(crate) fn opaque_pattern_palette(count: usize) -> Vec<Color8888> {
    pattern_palette(count).into_iter().map(Color8888::opaque).collect()
}

/// A palette which is stored unchanged by `format`.
///
/// Opaque formats lose palette alpha on load and [`TextureFormat::P8A8`] looks colours up
/// without alpha, so those get opaque entries.
pub(crate) fn pattern_palette_for(format: TextureFormat) -> Vec<Color8888> {
    if format.supports_alpha() && format != TextureFormat::P8A8 {
        pattern_palette(format.palette_size())
    } else {
        opaque_pattern_palette(format.palette_size())
    }
}

/// Deterministic colour for pixel `(x, y)`. Paletted formats pick palette entries.
pub(crate) fn pattern_color(
    format: TextureFormat,
    palette: &[Color8888],
    x: u32,
    y: u32,
) -> Color8888 {
    if format.is_paletted() {
        let entry = palette[((x * 7 + y * 3) as usize) % palette.len()];
        if format == TextureFormat::P8A8 {
            return entry.with_alpha((x * 37 + y * 11) as u8);
        }
        return entry;
    }

    Color8888::new(
        (x * 29 + y * 3) as u8,
        (x * 5 + y * 41) as u8,
        ((x * 13) ^ (y * 7)) as u8,
        (x * 17 + y * 23) as u8,
    )
}

/// What reading back a pixel written as `color` yields, written out per format.
pub(crate) fn expected_decode(
    format: TextureFormat,
    color: Color8888,
    settings: &CodecSettings,
) -> Color8888 {
    let grey = ((color.r as u32 + color.g as u32 + color.b as u32) / 3) as u8;
    let four_bit = |value: u8| ((value as f32 / 255.0) * 15.0) as u8 * 17;
    let five_bit = |value: u8| {
        let top = value & 0xF8;
        if top & 0x08 != 0 {
            top | 0x0F
        } else {
            top
        }
    };

    match format {
        TextureFormat::A1R5G5B5 => Color8888::new(
            five_bit(color.r),
            five_bit(color.g),
            five_bit(color.b),
            if color.a >= settings.alpha_ref { 255 } else { 0 },
        ),
        TextureFormat::A4I4 => Color8888::grey(four_bit(grey), four_bit(color.a)),
        TextureFormat::A8I8 => Color8888::grey(grey, color.a),
        TextureFormat::I8 => Color8888::grey(grey, 255),
        TextureFormat::A8 => Color8888::new(255, 255, 255, color.a),
        TextureFormat::RGB888 => color.opaque(),
        _ => color,
    }
}

/// A surface where every pixel differs from its neighbours.
pub(crate) fn gradient_surface(width: u32, height: u32) -> RgbaSurface {
    let mut surface = RgbaSurface::new(width, height);
    for y in 0..height {
        for x in 0..width {
            surface.set_pixel(
                x,
                y,
                Color8888::new(
                    (x * 31 + y) as u8,
                    (y * 29 + x) as u8,
                    (x * y * 3) as u8,
                    (200 + x + y) as u8,
                ),
            );
        }
    }
    surface
}

/// A surface filled with one colour.
pub(crate) fn solid_surface(width: u32, height: u32, color: Color8888) -> RgbaSurface {
    let mut surface = RgbaSurface::new(width, height);
    for y in 0..height {
        for x in 0..width {
            surface.set_pixel(x, y, color);
        }
    }
    surface
}
