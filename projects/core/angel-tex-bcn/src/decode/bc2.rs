//! BC2 (DXT2/DXT3) block decoding.
//!
//! The first 8 bytes hold a 4 bit alpha per pixel, low nibble first. The colour half is a BC1
//! block which always uses the four colour mode.

use crate::decode::bc1::decode_color_block;
use crate::decoded_4x4_block::Decoded4x4Block;

/// Size of a BC2 block in bytes.
pub const BC2_BLOCK_SIZE: usize = 16;

/// Decodes a BC2 block into RGBA8888 pixels.
#[inline]
pub fn decode_bc2_block(block: &[u8; BC2_BLOCK_SIZE]) -> Decoded4x4Block {
    let mut color = [0u8; 8];
    color.copy_from_slice(&block[8..16]);
    let mut result = decode_color_block(&color, false);

    for (pixel_index, pixel) in result.pixels.iter_mut().enumerate() {
        let shift = (pixel_index & 0x1) * 4;
        let alpha = (block[pixel_index >> 1] >> shift) & 0x0F;
        // Scale 4-bit alpha (0-15) to 8-bit (0-255)
        pixel.a = alpha * 17;
    }
    result
}
