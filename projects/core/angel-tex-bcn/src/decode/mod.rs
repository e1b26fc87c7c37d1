//! Block decoding for BC1, BC2 and BC3.

mod bc1;
mod bc2;
mod bc3;

pub use bc1::{decode_bc1_block, BC1_BLOCK_SIZE};
pub use bc2::{decode_bc2_block, BC2_BLOCK_SIZE};
pub use bc3::{decode_bc3_block, BC3_BLOCK_SIZE};

use crate::decoded_4x4_block::Decoded4x4Block;
use angel_tex::{BlockCodecError, BlockFormat};

/// Decodes a single block of `format`. `block` must be exactly one block long.
#[inline]
pub fn decode_block(format: BlockFormat, block: &[u8]) -> Result<Decoded4x4Block, BlockCodecError> {
    let invalid_length = || BlockCodecError::InvalidLength {
        format,
        expected: format.block_size(),
        actual: block.len(),
    };

    Ok(match format {
        BlockFormat::Bc1 => decode_bc1_block(block.try_into().map_err(|_| invalid_length())?),
        BlockFormat::Bc2 => decode_bc2_block(block.try_into().map_err(|_| invalid_length())?),
        BlockFormat::Bc3 => decode_bc3_block(block.try_into().map_err(|_| invalid_length())?),
    })
}

/// Decodes a whole image into row-major RGBA8888 `output`.
///
/// # Errors
///
/// [`BlockCodecError::InvalidLength`] if `data` is not [`BlockFormat::compressed_size`] bytes or
/// `output` is not `width * height * 4` bytes.
pub fn decode_image(
    format: BlockFormat,
    data: &[u8],
    width: u32,
    height: u32,
    output: &mut [u8],
) -> Result<(), BlockCodecError> {
    let expected = format.compressed_size(width, height);
    if data.len() != expected {
        return Err(BlockCodecError::InvalidLength {
            format,
            expected,
            actual: data.len(),
        });
    }

    let (width, height) = (width as usize, height as usize);
    let expected = width * height * 4;
    if output.len() != expected {
        return Err(BlockCodecError::InvalidLength {
            format,
            expected,
            actual: output.len(),
        });
    }

    let blocks_x = width.div_ceil(4);
    for (index, block) in data.chunks_exact(format.block_size()).enumerate() {
        let decoded = decode_block(format, block)?;
        decoded.write_clipped(output, width, height, index % blocks_x, index / blocks_x);
    }
    Ok(())
}
