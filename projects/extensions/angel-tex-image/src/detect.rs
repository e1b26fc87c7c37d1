//! Picks a storage format from image content.
//!
//! Not used by [`encode_image`](crate::encode_image); a game usually only accepts a subset of
//! formats, so the caller decides whether to trust the suggestion.

use image::RgbaImage;
use std::collections::HashSet;

use angel_tex::TextureFormat;

/// Suggests the smallest format which represents `image` reasonably well.
///
/// - White pixels with varying alpha: [`TextureFormat::A8`].
/// - Opaque greyscale: [`TextureFormat::I8`].
/// - Up to 16 distinct colours: [`TextureFormat::P4`], or [`TextureFormat::PA4`] with alpha.
/// - Up to 256 distinct colours: [`TextureFormat::P8`], or [`TextureFormat::PA8`] with alpha.
/// - Anything else: [`TextureFormat::RGB888`], or [`TextureFormat::RGB8888`] with alpha.
///
/// Colours are counted without their alpha.
pub fn suggest_format(image: &RgbaImage) -> TextureFormat {
    let mut colors = HashSet::new();
    let mut has_alpha = false;
    let mut is_greyscale = true;

    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        colors.insert([r, g, b]);
        has_alpha |= a < 255;
        is_greyscale &= r == g && r == b;
    }

    let only_white = colors.len() == 1 && colors.contains(&[255, 255, 255]);
    match colors.len() {
        _ if only_white && has_alpha => TextureFormat::A8,
        _ if is_greyscale && !has_alpha => TextureFormat::I8,
        0..=16 if has_alpha => TextureFormat::PA4,
        0..=16 => TextureFormat::P4,
        17..=256 if has_alpha => TextureFormat::PA8,
        17..=256 => TextureFormat::P8,
        _ if has_alpha => TextureFormat::RGB8888,
        _ => TextureFormat::RGB888,
    }
}
