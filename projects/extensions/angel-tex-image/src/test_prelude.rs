//! Common test imports and utilities for image pipeline tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use angel_tex::{
    Color8888, CompressionQuality, ResampleFilter, Resampler, RgbaSurface, Surface, Texture,
    TextureError, TextureFlags, TextureFormat,
};
pub use angel_tex_bcn::DxtBlockCodec;
pub use image::RgbaImage;
pub use rstest::rstest;

// Core functionality from this crate
pub use crate::{
    encode_image, ImageError, ImageResampler, QuantizedImage, Quantizer, SaveOptions,
};

/// A quantizer which assigns every distinct colour its own palette entry.
///
/// Once the palette is full, remaining colours map to the closest entry.
pub struct ExactQuantizer;

impl Quantizer for ExactQuantizer {
    fn quantize(&self, argb: &[u8], _width: u32, _height: u32, max_colors: usize) -> QuantizedImage {
        let mut palette: Vec<Color8888> = Vec::new();
        let mut indices = Vec::with_capacity(argb.len() / 4);

        for pixel in argb.chunks_exact(4) {
            let color = Color8888::new(pixel[1], pixel[2], pixel[3], pixel[0]);
            let index = match palette.iter().position(|entry| *entry == color) {
                Some(index) => index,
                None if palette.len() < max_colors => {
                    palette.push(color);
                    palette.len() - 1
                }
                None => closest(&palette, color),
            };
            indices.push(index as u8);
        }

        QuantizedImage { palette, indices }
    }
}

fn closest(palette: &[Color8888], color: Color8888) -> usize {
    let distance = |entry: &Color8888| {
        let d = |a: u8, b: u8| (a as i32 - b as i32).pow(2);
        d(entry.r, color.r) + d(entry.g, color.g) + d(entry.b, color.b) + d(entry.a, color.a)
    };
    palette
        .iter()
        .enumerate()
        .min_by_key(|(_, entry)| distance(entry))
        .map_or(0, |(index, _)| index)
}

/// A quantizer which returns a single white entry and a fixed index `len` times.
pub struct BrokenQuantizer {
    pub index: u8,
    pub len: usize,
}

impl Quantizer for BrokenQuantizer {
    fn quantize(&self, _argb: &[u8], _width: u32, _height: u32, _max_colors: usize) -> QuantizedImage {
        QuantizedImage {
            palette: vec![Color8888::WHITE],
            indices: vec![self.index; self.len],
        }
    }
}

/// Runs [`encode_image`] with the test quantizer and the DXT codec.
pub fn encode(image: &RgbaImage, options: &SaveOptions) -> Texture {
    encode_image(image, options, &ExactQuantizer, &ImageResampler, &DxtBlockCodec).unwrap()
}

/// An image where every pixel differs from its neighbours.
pub fn gradient_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        image::Rgba([
            (x * 31 + y) as u8,
            (y * 29 + x) as u8,
            (x * y * 3) as u8,
            (200 + x + y) as u8,
        ])
    })
}

/// An image filled with one colour.
pub fn solid_image(width: u32, height: u32, color: Color8888) -> RgbaImage {
    RgbaImage::from_pixel(width, height, image::Rgba(color.to_rgba_bytes()))
}

/// An image split into four quadrants: top left, top right, bottom left, bottom right.
pub fn quadrant_image(width: u32, height: u32, colors: [Color8888; 4]) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let right = (x >= width / 2) as usize;
        let bottom = (y >= height / 2) as usize;
        image::Rgba(colors[bottom * 2 + right].to_rgba_bytes())
    })
}
