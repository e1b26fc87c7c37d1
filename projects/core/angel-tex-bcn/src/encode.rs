//! Block encoding through `texpresso`.

use angel_tex::{BlockCodecError, BlockFormat, CompressionQuality};

/// Encoder parameters used for [`CompressionQuality::High`].
pub const HIGH_QUALITY_PARAMS: texpresso::Params = texpresso::Params {
    algorithm: texpresso::Algorithm::IterativeClusterFit,
    weights: texpresso::COLOUR_WEIGHTS_PERCEPTUAL,
    weigh_colour_by_alpha: true,
};

/// Encoder parameters used for [`CompressionQuality::Fast`].
pub const FAST_PARAMS: texpresso::Params = texpresso::Params {
    algorithm: texpresso::Algorithm::RangeFit,
    weights: texpresso::COLOUR_WEIGHTS_PERCEPTUAL,
    weigh_colour_by_alpha: false,
};

/// The `texpresso` format matching a [`BlockFormat`].
#[inline]
pub fn texpresso_format(format: BlockFormat) -> texpresso::Format {
    match format {
        BlockFormat::Bc1 => texpresso::Format::Bc1,
        BlockFormat::Bc2 => texpresso::Format::Bc2,
        BlockFormat::Bc3 => texpresso::Format::Bc3,
    }
}

/// The `texpresso` parameters for a quality level.
#[inline]
pub fn params_for(quality: CompressionQuality) -> texpresso::Params {
    match quality {
        CompressionQuality::Fast => FAST_PARAMS,
        CompressionQuality::High => HIGH_QUALITY_PARAMS,
    }
}

/// Compresses a row-major RGBA8888 image.
///
/// # Errors
///
/// [`BlockCodecError::InvalidLength`] if `rgba` is not `width * height * 4` bytes.
pub fn encode_image(
    format: BlockFormat,
    width: u32,
    height: u32,
    rgba: &[u8],
    quality: CompressionQuality,
) -> Result<Vec<u8>, BlockCodecError> {
    let (width, height) = (width as usize, height as usize);
    let expected = width * height * 4;
    if rgba.len() != expected {
        return Err(BlockCodecError::InvalidLength {
            format,
            expected,
            actual: rgba.len(),
        });
    }

    let texpresso_format = texpresso_format(format);
    let mut output = vec![0u8; texpresso_format.compressed_size(width, height)];
    texpresso_format.compress(rgba, width, height, params_for(quality), &mut output);
    Ok(output)
}
