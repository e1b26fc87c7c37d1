//! [`Resampler`] backed by [`image::imageops::resize`].

use crate::surface::{image_from_surface, surface_from_image};
use angel_tex::{ResampleFilter, Resampler, RgbaSurface};
use image::imageops::{self, FilterType};

/// Resamples mip levels with the filters of the `image` crate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageResampler;

/// Maps a texture resample filter onto the matching `image` filter.
pub fn filter_type(filter: ResampleFilter) -> FilterType {
    match filter {
        ResampleFilter::Nearest => FilterType::Nearest,
        ResampleFilter::Triangle => FilterType::Triangle,
        ResampleFilter::CatmullRom => FilterType::CatmullRom,
        ResampleFilter::Gaussian => FilterType::Gaussian,
        ResampleFilter::Lanczos3 => FilterType::Lanczos3,
    }
}

impl Resampler for ImageResampler {
    fn resample(
        &self,
        source: &RgbaSurface,
        width: u32,
        height: u32,
        filter: ResampleFilter,
    ) -> RgbaSurface {
        let image = image_from_surface(source);
        let resized = imageops::resize(&image, width, height, filter_type(filter));
        surface_from_image(&resized)
    }
}
