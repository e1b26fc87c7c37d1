//! BC3 (DXT4/DXT5) block decoding.
//!
//! The first 8 bytes hold two alpha endpoints and 3 bit indices into an interpolated alpha
//! table. The colour half is a BC1 block which always uses the four colour mode.

use crate::decode::bc1::decode_color_block;
use crate::decoded_4x4_block::Decoded4x4Block;

/// Size of a BC3 block in bytes.
pub const BC3_BLOCK_SIZE: usize = 16;

/// Builds the 8 entry alpha table from the two endpoints.
#[inline]
#[allow(clippy::identity_op)]
pub(crate) fn alpha_table(alpha0: u8, alpha1: u8) -> [u8; 8] {
    let a0 = alpha0 as u16;
    let a1 = alpha1 as u16;

    if alpha0 > alpha1 {
        [
            alpha0,
            alpha1,
            ((6 * a0 + 1 * a1) / 7) as u8,
            ((5 * a0 + 2 * a1) / 7) as u8,
            ((4 * a0 + 3 * a1) / 7) as u8,
            ((3 * a0 + 4 * a1) / 7) as u8,
            ((2 * a0 + 5 * a1) / 7) as u8,
            ((1 * a0 + 6 * a1) / 7) as u8,
        ]
    } else {
        [
            alpha0,
            alpha1,
            ((4 * a0 + 1 * a1) / 5) as u8,
            ((3 * a0 + 2 * a1) / 5) as u8,
            ((2 * a0 + 3 * a1) / 5) as u8,
            ((1 * a0 + 4 * a1) / 5) as u8,
            0,
            255,
        ]
    }
}

/// Decodes a BC3 block into RGBA8888 pixels.
#[inline]
pub fn decode_bc3_block(block: &[u8; BC3_BLOCK_SIZE]) -> Decoded4x4Block {
    let mut color = [0u8; 8];
    color.copy_from_slice(&block[8..16]);
    let mut result = decode_color_block(&color, false);

    let table = alpha_table(block[0], block[1]);
    // 16 indices of 3 bits each, little endian.
    let indices = u64::from_le_bytes([
        block[2], block[3], block[4], block[5], block[6], block[7], 0, 0,
    ]);

    for (pixel_index, pixel) in result.pixels.iter_mut().enumerate() {
        let index = (indices >> (pixel_index * 3)) & 0b111;
        pixel.a = table[index as usize];
    }
    result
}
