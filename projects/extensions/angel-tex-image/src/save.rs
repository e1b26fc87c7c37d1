//! # Image to texture pipeline
//!
//! [`encode_image`] builds a texture from an [`RgbaImage`] the way it is meant to be saved:
//!
//! 1. Block compressed targets are first built as [`TextureFormat::RGB8888`].
//! 2. Paletted targets are quantized. Only [`TextureFormat::PA4`] and [`TextureFormat::PA8`]
//!    hand alpha to the quantizer; [`TextureFormat::P8A8`] keeps the source alpha per pixel
//!    next to the palette index instead.
//! 3. The mip chain is generated with a [`Resampler`], then levels smaller than
//!    [`SaveOptions::min_mip_size`] in both dimensions are dropped.
//! 4. Block compressed targets are compressed with the supplied [`BlockCodec`].

use crate::error::{ImageError, ImageResult};
use crate::quantize::{argb_from_image, Quantizer};
use crate::surface::surface_from_image;
use angel_tex::{
    BlockCodec, CodecSettings, CompressionQuality, MipmapFilter, ResampleFilter,
    Resampler, Texture, TextureFlags, TextureFormat, DEFAULT_ALPHA_REF,
};
use image::RgbaImage;

/// Default number of mip levels below the base level.
pub const DEFAULT_ADDITIONAL_MIPMAPS: u8 = 8;

/// Largest number of mip levels below the base level that can be requested.
pub const MAX_ADDITIONAL_MIPMAPS: u8 = 12;

/// Levels smaller than this in both dimensions are dropped.
pub const DEFAULT_MIN_MIP_SIZE: (u32, u32) = (8, 8);

/// Options for [`encode_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Format of the saved texture.
    pub format: TextureFormat,
    /// Clamp texture coordinates on the U axis.
    pub clamp_u: bool,
    /// Clamp texture coordinates on the V axis.
    pub clamp_v: bool,
    /// Cast low cloud shadows.
    pub cloud_shadows_low: bool,
    /// Cast high cloud shadows.
    pub cloud_shadows_high: bool,
    /// 1 bit alpha threshold, only used by [`TextureFormat::A1R5G5B5`].
    pub alpha_cutoff: u8,
    /// Whether to generate mip levels at all.
    pub generate_mipmaps: bool,
    /// Mip levels requested below the base level, in `1..=12`.
    pub additional_mipmaps: u8,
    /// Levels below this size in both dimensions are dropped.
    pub min_mip_size: (u32, u32),
    /// Block compression quality.
    pub quality: CompressionQuality,
    /// Filter used for true colour mip levels.
    pub filter: ResampleFilter,
}

impl Default for SaveOptions {
    fn default() -> Self {
        SaveOptionsBuilder::new().build()
    }
}

impl SaveOptions {
    /// Create an options builder.
    pub fn builder() -> SaveOptionsBuilder {
        SaveOptionsBuilder::new()
    }

    /// Header flags described by these options.
    pub fn flags(&self) -> TextureFlags {
        let mut flags = TextureFlags::default();
        flags.set_clamp_u(self.clamp_u);
        flags.set_clamp_v(self.clamp_v);
        flags.set_cloud_shadows_low(self.cloud_shadows_low);
        flags.set_cloud_shadows_high(self.cloud_shadows_high);
        flags
    }

    /// Number of mip levels requested, base level included.
    pub fn mipmap_count(&self) -> usize {
        if self.generate_mipmaps {
            1 + self.additional_mipmaps as usize
        } else {
            1
        }
    }

    /// Pixel codec settings used while writing pixels.
    pub fn codec_settings(&self) -> CodecSettings {
        CodecSettings::builder().alpha_ref(self.alpha_cutoff).build()
    }
}

/// Builder for [`SaveOptions`] with convenient configuration methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct SaveOptionsBuilder {
    format: Option<TextureFormat>,
    clamp_u: Option<bool>,
    clamp_v: Option<bool>,
    cloud_shadows_low: Option<bool>,
    cloud_shadows_high: Option<bool>,
    alpha_cutoff: Option<u8>,
    generate_mipmaps: Option<bool>,
    additional_mipmaps: Option<u8>,
    min_mip_size: Option<(u32, u32)>,
    quality: Option<CompressionQuality>,
    filter: Option<ResampleFilter>,
}

impl SaveOptionsBuilder {
    /// Create a new options builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the output format. Defaults to [`TextureFormat::RGB8888`].
    pub fn format(mut self, format: TextureFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the clamp U flag.
    pub fn clamp_u(mut self, clamp: bool) -> Self {
        self.clamp_u = Some(clamp);
        self
    }

    /// Set the clamp V flag.
    pub fn clamp_v(mut self, clamp: bool) -> Self {
        self.clamp_v = Some(clamp);
        self
    }

    /// Set the low cloud shadows flag.
    pub fn cloud_shadows_low(mut self, enabled: bool) -> Self {
        self.cloud_shadows_low = Some(enabled);
        self
    }

    /// Set the high cloud shadows flag.
    pub fn cloud_shadows_high(mut self, enabled: bool) -> Self {
        self.cloud_shadows_high = Some(enabled);
        self
    }

    /// Set the 1 bit alpha threshold.
    pub fn alpha_cutoff(mut self, cutoff: u8) -> Self {
        self.alpha_cutoff = Some(cutoff);
        self
    }

    /// Enable or disable mip generation.
    pub fn generate_mipmaps(mut self, generate: bool) -> Self {
        self.generate_mipmaps = Some(generate);
        self
    }

    /// Set how many levels below the base level to request. Clamped to `1..=12`.
    pub fn additional_mipmaps(mut self, count: u8) -> Self {
        self.additional_mipmaps = Some(count.clamp(1, MAX_ADDITIONAL_MIPMAPS));
        self
    }

    /// Set the size below which mip levels are dropped.
    pub fn min_mip_size(mut self, width: u32, height: u32) -> Self {
        self.min_mip_size = Some((width, height));
        self
    }

    /// Set the block compression quality.
    pub fn quality(mut self, quality: CompressionQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    /// Set the mip resampling filter.
    pub fn filter(mut self, filter: ResampleFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Build the options using the configured values.
    pub fn build(self) -> SaveOptions {
        SaveOptions {
            format: self.format.unwrap_or(TextureFormat::RGB8888),
            clamp_u: self.clamp_u.unwrap_or(false),
            clamp_v: self.clamp_v.unwrap_or(false),
            cloud_shadows_low: self.cloud_shadows_low.unwrap_or(false),
            cloud_shadows_high: self.cloud_shadows_high.unwrap_or(false),
            alpha_cutoff: self.alpha_cutoff.unwrap_or(DEFAULT_ALPHA_REF),
            generate_mipmaps: self.generate_mipmaps.unwrap_or(true),
            additional_mipmaps: self.additional_mipmaps.unwrap_or(DEFAULT_ADDITIONAL_MIPMAPS),
            min_mip_size: self.min_mip_size.unwrap_or(DEFAULT_MIN_MIP_SIZE),
            quality: self.quality.unwrap_or_default(),
            filter: self.filter.unwrap_or_default(),
        }
    }
}

/// Builds a texture from `image` in the format described by `options`.
///
/// `quantizer` is only used for paletted formats and `codec` only for block compressed ones.
///
/// # Errors
///
/// - [`ImageError::ImageTooLarge`] if a dimension does not fit in 16 bits.
/// - [`ImageError::QuantizedLengthMismatch`] and [`ImageError::PaletteIndexOutOfRange`] if the
///   quantizer output is inconsistent.
/// - [`ImageError::Texture`] for an empty image or a failing block codec.
pub fn encode_image<Q, C>(
    image: &RgbaImage,
    options: &SaveOptions,
    quantizer: &Q,
    resampler: &dyn Resampler,
    codec: &C,
) -> ImageResult<Texture>
where
    Q: Quantizer + ?Sized,
    C: BlockCodec + ?Sized,
{
    let (width, height) = image.dimensions();
    let (Ok(tex_width), Ok(tex_height)) = (u16::try_from(width), u16::try_from(height)) else {
        return Err(ImageError::ImageTooLarge { width, height });
    };

    let target = options.format;
    let storage = if target.is_compressed() {
        TextureFormat::RGB8888
    } else {
        target
    };

    let settings = options.codec_settings();
    let mut texture = Texture::new(tex_width, tex_height, storage, options.mipmap_count())?;
    texture.set_flags(options.flags());

    let source = (!storage.is_paletted()).then(|| surface_from_image(image));
    match &source {
        Some(source) => texture.copy_from_surface(source, &settings)?,
        None => write_quantized(&mut texture, image, quantizer, &settings)?,
    }

    let filter = MipmapFilter::Resampled {
        resampler,
        filter: options.filter,
        source: source.as_ref(),
    };
    texture.generate_mipmaps(filter, &settings)?;
    texture.remove_mipmaps_below_size(options.min_mip_size.0, options.min_mip_size.1);

    if target.is_compressed() {
        texture.compress(target, codec, options.quality)?;
    }
    Ok(texture)
}

fn write_quantized<Q: Quantizer + ?Sized>(
    texture: &mut Texture,
    image: &RgbaImage,
    quantizer: &Q,
    settings: &CodecSettings,
) -> ImageResult<()> {
    let format = texture.format();
    let keep_alpha = format.supports_alpha() && format != TextureFormat::P8A8;
    let (width, height) = image.dimensions();

    let argb = argb_from_image(image, keep_alpha);
    let quantized = quantizer.quantize(&argb, width, height, format.palette_size());

    let pixel_count = width as usize * height as usize;
    if quantized.indices.len() != pixel_count {
        return Err(ImageError::QuantizedLengthMismatch {
            expected: pixel_count,
            actual: quantized.indices.len(),
        });
    }

    let used = quantized.palette.len().min(format.palette_size());
    let palette = &quantized.palette[..used];
    texture.set_palette(palette)?;

    for (pixel, (source, &index)) in image.pixels().zip(&quantized.indices).enumerate() {
        let mut color = *palette
            .get(index as usize)
            .ok_or(ImageError::PaletteIndexOutOfRange { index, len: used })?;
        if format == TextureFormat::P8A8 {
            color = color.with_alpha(source.0[3]);
        }

        let x = (pixel % width as usize) as u32;
        let y = (pixel / width as usize) as u32;
        texture.set_pixel(x, y, 0, color, settings)?;
    }
    Ok(())
}
