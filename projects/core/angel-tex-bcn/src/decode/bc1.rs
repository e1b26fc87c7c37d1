//! BC1 (DXT1) block decoding.
//!
//! Follows the DX9 rounding rules. A block whose first endpoint is not greater than the second
//! uses three colours plus transparent black.

use crate::color_565::{blend, Color565};
use crate::decoded_4x4_block::Decoded4x4Block;
use angel_tex::Color8888;

/// Size of a BC1 block in bytes.
pub const BC1_BLOCK_SIZE: usize = 8;

/// Builds the four entry colour table of a BC1 style colour block.
///
/// `allow_transparent` enables the three colour mode; BC2 and BC3 always use four colours.
#[inline]
pub(crate) fn color_table(c0: Color565, c1: Color565, allow_transparent: bool) -> [Color8888; 4] {
    let first = c0.to_color_8888();
    let second = c1.to_color_8888();

    if !allow_transparent || c0.greater_than(&c1) {
        [
            first,
            second,
            blend(first, second, 2, 1),
            blend(first, second, 1, 2),
        ]
    } else {
        [
            first,
            second,
            blend(first, second, 1, 1),
            Color8888::TRANSPARENT_BLACK,
        ]
    }
}

/// Decodes the 8 byte colour half of a block with the given table mode.
#[inline]
pub(crate) fn decode_color_block(block: &[u8; 8], allow_transparent: bool) -> Decoded4x4Block {
    let c0 = Color565::from_le_bytes([block[0], block[1]]);
    let c1 = Color565::from_le_bytes([block[2], block[3]]);
    let indices = u32::from_le_bytes([block[4], block[5], block[6], block[7]]);
    let table = color_table(c0, c1, allow_transparent);

    let mut result = Decoded4x4Block::new(Color8888::TRANSPARENT_BLACK);
    for (pixel_index, pixel) in result.pixels.iter_mut().enumerate() {
        let index = (indices >> (pixel_index * 2)) & 0x3;
        *pixel = table[index as usize];
    }
    result
}

/// Decodes a BC1 block into RGBA8888 pixels.
///
/// ```
/// use angel_tex::Color8888;
/// use angel_tex_bcn::decode::decode_bc1_block;
///
/// // c0 = c1 = pure red, every pixel uses index 0.
/// let block = [0x00, 0xF8, 0x00, 0xF8, 0x00, 0x00, 0x00, 0x00];
/// let decoded = decode_bc1_block(&block);
/// assert!(decoded.pixels.iter().all(|p| *p == Color8888::new(255, 0, 0, 255)));
/// ```
#[inline]
pub fn decode_bc1_block(block: &[u8; BC1_BLOCK_SIZE]) -> Decoded4x4Block {
    decode_color_block(block, true)
}
