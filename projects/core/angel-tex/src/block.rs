//! # Block compression
//!
//! The texture core does not implement BC1/BC2/BC3 itself. It drives an external [`BlockCodec`]
//! one mip level at a time and owns the state machine around it:
//!
//! ```text
//! RGB8888 --compress(DXTn)--> DXTn --decompress()--> RGB8888
//! ```
//!
//! No other format transition exists. Both transitions replace every mip level at once; if the
//! codec fails on any level the texture is left exactly as it was.

use crate::error::{TextureError, TextureResult};
use crate::format::TextureFormat;
use crate::texture::Texture;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use thiserror::Error;

/// A block compression scheme understood by a [`BlockCodec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockFormat {
    /// BC1, stored as [`TextureFormat::DXT1`].
    Bc1,
    /// BC2, stored as [`TextureFormat::DXT3`].
    Bc2,
    /// BC3, stored as [`TextureFormat::DXT5`].
    Bc3,
}

impl BlockFormat {
    /// The block format a compressed [`TextureFormat`] is stored in.
    pub const fn from_texture_format(format: TextureFormat) -> Option<Self> {
        match format {
            TextureFormat::DXT1 => Some(Self::Bc1),
            TextureFormat::DXT3 => Some(Self::Bc2),
            TextureFormat::DXT5 => Some(Self::Bc3),
            _ => None,
        }
    }

    /// The texture format which stores this block format.
    pub const fn texture_format(self) -> TextureFormat {
        match self {
            Self::Bc1 => TextureFormat::DXT1,
            Self::Bc2 => TextureFormat::DXT3,
            Self::Bc3 => TextureFormat::DXT5,
        }
    }

    /// Size of a single 4x4 block in bytes.
    #[inline]
    pub const fn block_size(self) -> usize {
        match self {
            Self::Bc1 => 8,
            Self::Bc2 | Self::Bc3 => 16,
        }
    }

    /// Size of an image of the given dimensions once compressed.
    #[inline]
    pub const fn compressed_size(self, width: u32, height: u32) -> usize {
        (width as usize).div_ceil(4) * (height as usize).div_ceil(4) * self.block_size()
    }
}

impl fmt::Display for BlockFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bc1 => "BC1",
            Self::Bc2 => "BC2",
            Self::Bc3 => "BC3",
        })
    }
}

/// Speed/quality trade-off requested from the block encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionQuality {
    /// Fast endpoint selection.
    Fast,
    /// Slower, higher quality endpoint selection.
    #[default]
    High,
}

/// Errors reported by a [`BlockCodec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockCodecError {
    /// The codec does not implement this block format.
    #[error("Block format {0} is not supported by this codec")]
    UnsupportedFormat(BlockFormat),

    /// A buffer passed to or produced by the codec has the wrong length.
    #[error("Invalid {format} buffer length: expected {expected} bytes, got {actual} bytes")]
    InvalidLength {
        /// Block format being processed
        format: BlockFormat,
        /// Required length in bytes
        expected: usize,
        /// The actual length in bytes
        actual: usize,
    },
}

/// Converts single mip levels between RGBA8888 and a block compressed format.
///
/// Implementations are pure functions of their input. The RGBA8888 buffers are tightly packed,
/// row major, `width * height * 4` bytes. Compressed buffers hold
/// [`BlockFormat::compressed_size`] bytes; blocks overhanging the right or bottom edge are
/// stored in full.
pub trait BlockCodec {
    /// Compresses an RGBA8888 image.
    fn encode(
        &self,
        format: BlockFormat,
        width: u32,
        height: u32,
        rgba: &[u8],
        quality: CompressionQuality,
    ) -> Result<Vec<u8>, BlockCodecError>;

    /// Decompresses an image into `output`, which holds `width * height * 4` bytes.
    fn decode(
        &self,
        format: BlockFormat,
        data: &[u8],
        width: u32,
        height: u32,
        output: &mut [u8],
    ) -> Result<(), BlockCodecError>;
}

impl Texture {
    /// Compresses every mip level of an [`TextureFormat::RGB8888`] texture into `target`.
    ///
    /// # Errors
    ///
    /// - [`TextureError::AlreadyCompressed`] if the texture is already block compressed.
    /// - [`TextureError::NotACompressedFormat`] if `target` is not DXT1, DXT3 or DXT5.
    /// - [`TextureError::UnsupportedCompressionSource`] if the texture is not RGB8888.
    /// - [`TextureError::BlockCodec`] if the codec fails or returns a buffer of the wrong size.
    pub fn compress<C: BlockCodec + ?Sized>(
        &mut self,
        target: TextureFormat,
        codec: &C,
        quality: CompressionQuality,
    ) -> TextureResult<()> {
        if self.format.is_compressed() {
            return Err(TextureError::AlreadyCompressed(self.format));
        }

        let block_format = BlockFormat::from_texture_format(target)
            .ok_or(TextureError::NotACompressedFormat(target))?;

        if self.format != TextureFormat::RGB8888 {
            return Err(TextureError::UnsupportedCompressionSource(self.format));
        }

        let mut compressed = Vec::with_capacity(self.mipmaps.len());
        for (index, level) in self.mipmaps.iter().enumerate() {
            let (width, height) = self.mip_dimensions(index);
            let encoded = codec.encode(block_format, width, height, level, quality)?;

            let expected = target.mip_data_size(width, height);
            if encoded.len() != expected {
                return Err(TextureError::block_format_mismatch(
                    block_format,
                    expected,
                    encoded.len(),
                ));
            }
            compressed.push(encoded);
        }

        self.mipmaps = compressed;
        self.format = target;
        Ok(())
    }

    /// Decompresses every mip level into [`TextureFormat::RGB8888`].
    ///
    /// # Errors
    ///
    /// - [`TextureError::NotCompressed`] if the texture is not block compressed.
    /// - [`TextureError::BlockCodec`] if the codec fails on any level.
    pub fn decompress<C: BlockCodec + ?Sized>(&mut self, codec: &C) -> TextureResult<()> {
        let block_format = BlockFormat::from_texture_format(self.format)
            .ok_or(TextureError::NotCompressed(self.format))?;

        let mut decompressed = Vec::with_capacity(self.mipmaps.len());
        for (index, level) in self.mipmaps.iter().enumerate() {
            let (width, height) = self.mip_dimensions(index);
            let mut output = vec![0; TextureFormat::RGB8888.mip_data_size(width, height)];
            codec.decode(block_format, level, width, height, &mut output)?;
            decompressed.push(output);
        }

        self.mipmaps = decompressed;
        self.format = TextureFormat::RGB8888;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn filled_rgb8888(width: u16, height: u16, mipmaps: usize, color: Color8888) -> Texture {
        let mut texture = Texture::new(width, height, TextureFormat::RGB8888, mipmaps).unwrap();
        for mip in 0..texture.mipmap_count() {
            for chunk in texture.mip_data_mut(mip).unwrap().chunks_exact_mut(4) {
                chunk.copy_from_slice(&color.to_rgba_bytes());
            }
        }
        texture
    }

    #[rstest]
    #[case(TextureFormat::DXT1)]
    #[case(TextureFormat::DXT3)]
    #[case(TextureFormat::DXT5)]
    fn compress_then_decompress_keeps_layout(#[case] target: TextureFormat) {
        let color = Color8888::new(10, 200, 30, 255);
        let mut texture = filled_rgb8888(32, 16, 4, color);

        texture
            .compress(target, &FlatBlockCodec, CompressionQuality::High)
            .unwrap();
        assert_eq!(texture.format(), target);
        assert_eq!(texture.mipmap_count(), 4);
        for mip in 0..4 {
            let (width, height) = texture.mip_dimensions(mip);
            assert_eq!(
                texture.mip_data(mip).unwrap().len(),
                target.mip_data_size(width, height)
            );
        }

        texture.decompress(&FlatBlockCodec).unwrap();
        assert_eq!(texture.format(), TextureFormat::RGB8888);
        assert_eq!((texture.width(), texture.height()), (32, 16));
        for mip in 0..4 {
            let (width, height) = texture.mip_dimensions(mip);
            let data = texture.mip_data(mip).unwrap();
            assert_eq!(data.len(), (width * height * 4) as usize);
            assert!(data.chunks_exact(4).all(|px| px == color.to_rgba_bytes()));
        }
    }

    #[test]
    fn compressing_twice_is_a_format_violation() {
        let mut texture = filled_rgb8888(8, 8, 1, Color8888::WHITE);
        texture
            .compress(TextureFormat::DXT1, &FlatBlockCodec, CompressionQuality::Fast)
            .unwrap();

        let err = texture
            .compress(TextureFormat::DXT5, &FlatBlockCodec, CompressionQuality::Fast)
            .unwrap_err();
        assert!(matches!(err, TextureError::AlreadyCompressed(TextureFormat::DXT1)));
        assert_eq!(err.kind(), ErrorKind::FormatViolation);
    }

    #[test]
    fn compress_target_must_be_compressed() {
        let mut texture = filled_rgb8888(8, 8, 1, Color8888::WHITE);
        let err = texture
            .compress(TextureFormat::P8, &FlatBlockCodec, CompressionQuality::Fast)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        assert_eq!(texture.format(), TextureFormat::RGB8888);
    }

    #[rstest]
    #[case(TextureFormat::RGB888)]
    #[case(TextureFormat::P8)]
    #[case(TextureFormat::A1R5G5B5)]
    fn only_rgb8888_can_be_compressed(#[case] source: TextureFormat) {
        let mut texture = Texture::new(8, 8, source, 1).unwrap();
        let err = texture
            .compress(TextureFormat::DXT3, &FlatBlockCodec, CompressionQuality::Fast)
            .unwrap_err();
        assert!(matches!(err, TextureError::UnsupportedCompressionSource(f) if f == source));
        assert_eq!(err.kind(), ErrorKind::FormatViolation);
    }

    #[test]
    fn decompressing_uncompressed_is_a_format_violation() {
        let mut texture = filled_rgb8888(8, 8, 1, Color8888::WHITE);
        let err = texture.decompress(&FlatBlockCodec).unwrap_err();
        assert!(matches!(err, TextureError::NotCompressed(TextureFormat::RGB8888)));
        assert_eq!(err.kind(), ErrorKind::FormatViolation);
    }

    #[test]
    fn codec_failure_leaves_texture_untouched() {
        let original = filled_rgb8888(16, 16, 3, Color8888::new(1, 2, 3, 4));
        let mut texture = original.clone();

        let err = texture
            .compress(TextureFormat::DXT5, &ShortBlockCodec, CompressionQuality::High)
            .unwrap_err();
        assert!(matches!(
            err,
            TextureError::BlockCodec(BlockCodecError::InvalidLength {
                format: BlockFormat::Bc3,
                ..
            })
        ));
        assert_eq!(texture, original);
    }

    #[test]
    fn unaligned_sizes_round_up_to_whole_blocks() {
        let mut texture = filled_rgb8888(6, 10, 1, Color8888::WHITE);
        texture
            .compress(TextureFormat::DXT1, &FlatBlockCodec, CompressionQuality::Fast)
            .unwrap();
        assert_eq!(texture.mip_data(0).unwrap().len(), 2 * 3 * 8);

        texture.decompress(&FlatBlockCodec).unwrap();
        assert_eq!(texture.mip_data(0).unwrap().len(), 6 * 10 * 4);
    }

    #[rstest]
    #[case(BlockFormat::Bc1, TextureFormat::DXT1, 8)]
    #[case(BlockFormat::Bc2, TextureFormat::DXT3, 16)]
    #[case(BlockFormat::Bc3, TextureFormat::DXT5, 16)]
    fn block_format_mapping(
        #[case] block: BlockFormat,
        #[case] format: TextureFormat,
        #[case] size: usize,
    ) {
        assert_eq!(BlockFormat::from_texture_format(format), Some(block));
        assert_eq!(block.texture_format(), format);
        assert_eq!(block.block_size(), size);
        assert_eq!(block.compressed_size(4, 4), size);
    }
}
