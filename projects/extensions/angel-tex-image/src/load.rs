//! Texture to image pipeline.

use crate::error::ImageResult;
use crate::surface::image_from_surface;
use angel_tex::{BlockCodec, Texture};
use image::RgbaImage;

/// Exports mip level `mip` of `texture` as an [`RgbaImage`].
///
/// Block compressed textures are decompressed on a copy, `texture` itself is left as is.
/// Formats without an alpha channel (DXT1 included) are exported fully opaque.
///
/// # Errors
///
/// Fails if `mip` does not exist or the codec cannot decompress the texture.
pub fn decode_texture<C: BlockCodec + ?Sized>(
    texture: &Texture,
    mip: usize,
    codec: &C,
) -> ImageResult<RgbaImage> {
    let use_alpha = texture.format().supports_alpha();

    let surface = if texture.format().is_compressed() {
        let mut decompressed = texture.clone();
        decompressed.decompress(codec)?;
        decompressed.to_surface(mip, use_alpha)?
    } else {
        texture.to_surface(mip, use_alpha)?
    };
    Ok(image_from_surface(&surface))
}
