//! Conversions between [`RgbaImage`] and [`RgbaSurface`].
//!
//! Both store tightly packed, row-major RGBA8888, so the conversions are plain copies.

use angel_tex::{RgbaSurface, Surface};
use image::RgbaImage;

/// Copies an [`RgbaImage`] into a new [`RgbaSurface`].
pub fn surface_from_image(image: &RgbaImage) -> RgbaSurface {
    let mut surface = RgbaSurface::new(image.width(), image.height());
    surface.as_bytes_mut().copy_from_slice(image.as_raw());
    surface
}

/// Copies an [`RgbaSurface`] into a new [`RgbaImage`].
pub fn image_from_surface(surface: &RgbaSurface) -> RgbaImage {
    let mut image = RgbaImage::new(surface.width(), surface.height());
    image.copy_from_slice(surface.as_bytes());
    image
}
