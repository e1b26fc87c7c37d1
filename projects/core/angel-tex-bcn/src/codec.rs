//! [`BlockCodec`] implementation for the DXT formats.

use crate::decode::decode_image;
use crate::encode::encode_image;
use angel_tex::{BlockCodec, BlockCodecError, BlockFormat, CompressionQuality};

/// Encodes with `texpresso` and decodes with this crate's block decoders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DxtBlockCodec;

impl BlockCodec for DxtBlockCodec {
    fn encode(
        &self,
        format: BlockFormat,
        width: u32,
        height: u32,
        rgba: &[u8],
        quality: CompressionQuality,
    ) -> Result<Vec<u8>, BlockCodecError> {
        encode_image(format, width, height, rgba, quality)
    }

    fn decode(
        &self,
        format: BlockFormat,
        data: &[u8],
        width: u32,
        height: u32,
        output: &mut [u8],
    ) -> Result<(), BlockCodecError> {
        decode_image(format, data, width, height, output)
    }
}
