//! # Palette quantization
//!
//! Paletted targets need their colours reduced to at most 16 or 256 entries before the pixels
//! can be written. The [`Quantizer`] trait takes the image as packed ARGB bytes and returns a
//! palette plus one palette index per pixel.
//!
//! [`NeuQuantizer`] implements it with the NeuQuant neural network from `color_quant`.

use angel_tex::Color8888;
use color_quant::NeuQuant;
use image::RgbaImage;

/// Default NeuQuant sampling factor. 1 trains on every pixel, 30 on every 30th.
pub const DEFAULT_SAMPLE_FACTOR: i32 = 10;

/// A palette and one palette index per pixel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuantizedImage {
    /// At most `max_colors` palette entries.
    pub palette: Vec<Color8888>,
    /// Row-major palette indices, one per pixel.
    pub indices: Vec<u8>,
}

/// Reduces an image to a limited palette.
pub trait Quantizer {
    /// Quantizes `width * height` pixels stored as A, R, G, B bytes to at most `max_colors`
    /// colours.
    fn quantize(&self, argb: &[u8], width: u32, height: u32, max_colors: usize) -> QuantizedImage;
}

/// [`Quantizer`] built on [`color_quant::NeuQuant`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeuQuantizer {
    /// Sampling factor in `1..=30`. Lower is slower and more accurate.
    pub sample_factor: i32,
}

impl Default for NeuQuantizer {
    fn default() -> Self {
        Self {
            sample_factor: DEFAULT_SAMPLE_FACTOR,
        }
    }
}

impl NeuQuantizer {
    /// Creates a quantizer with the given sampling factor, clamped to `1..=30`.
    pub fn new(sample_factor: i32) -> Self {
        Self {
            sample_factor: sample_factor.clamp(1, 30),
        }
    }
}

impl Quantizer for NeuQuantizer {
    fn quantize(&self, argb: &[u8], _width: u32, _height: u32, max_colors: usize) -> QuantizedImage {
        let rgba: Vec<u8> = argb
            .chunks_exact(4)
            .flat_map(|pixel| [pixel[1], pixel[2], pixel[3], pixel[0]])
            .collect();

        let quantizer = NeuQuant::new(self.sample_factor, max_colors.clamp(1, 256), &rgba);
        let palette = quantizer
            .color_map_rgba()
            .chunks_exact(4)
            .map(|entry| Color8888::new(entry[0], entry[1], entry[2], entry[3]))
            .collect();
        let indices = rgba
            .chunks_exact(4)
            .map(|pixel| quantizer.index_of(pixel) as u8)
            .collect();

        QuantizedImage { palette, indices }
    }
}

/// Packs an image as A, R, G, B bytes. Without `keep_alpha` every pixel is made opaque.
pub fn argb_from_image(image: &RgbaImage, keep_alpha: bool) -> Vec<u8> {
    image
        .pixels()
        .flat_map(|pixel| {
            let [r, g, b, a] = pixel.0;
            [if keep_alpha { a } else { 255 }, r, g, b]
        })
        .collect()
}
