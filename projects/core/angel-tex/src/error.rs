//! Error types for texture operations.

use crate::block::{BlockCodecError, BlockFormat};
use crate::TextureFormat;
use thiserror::Error;

/// Result type for texture operations
pub type TextureResult<T> = Result<T, TextureError>;

/// Broad classification of a [`TextureError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The operation is not valid for the texture's current format.
    FormatViolation,
    /// Serialized texture data could not be understood.
    MalformedInput,
    /// A caller supplied argument is out of range.
    InvalidArgument,
    /// The underlying reader or writer failed.
    Io,
}

/// Errors that can occur while building, converting or (de)serializing a texture.
#[derive(Debug, Error)]
pub enum TextureError {
    /// Pixel access was attempted on a block compressed texture.
    #[error("Cannot access pixels of a {0} texture. Decompress it first.")]
    CompressedPixelAccess(TextureFormat),

    /// The texture is already block compressed.
    #[error("Texture is already compressed ({0})")]
    AlreadyCompressed(TextureFormat),

    /// The texture is not block compressed.
    #[error("Texture is not compressed ({0})")]
    NotCompressed(TextureFormat),

    /// Only RGB8888 textures can be compressed.
    #[error("Only RGB8888 textures can be compressed, got {0}")]
    UnsupportedCompressionSource(TextureFormat),

    /// The requested compression target is not a block compressed format.
    #[error("{0} is not a compressed format")]
    NotACompressedFormat(TextureFormat),

    /// The format code in a texture header is not part of the known enumeration.
    #[error("Unsupported TEX format code: {0}")]
    UnknownFormatCode(u16),

    /// Serialized texture data ended before a required section was complete.
    #[error("Texture data too short: required at least {required} bytes, got {actual} bytes")]
    InputTooShort {
        /// Bytes needed to read the incomplete section
        required: usize,
        /// Bytes available
        actual: usize,
    },

    /// A texture header declares a width or height of zero.
    #[error("Texture header declares an empty {width}x{height} image")]
    EmptyImage {
        /// Declared width
        width: u16,
        /// Declared height
        height: u16,
    },

    /// A width or height of zero was requested.
    #[error("Invalid texture dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
    },

    /// A texture must have at least one mip level.
    #[error("Must have at least one mipmap level, got {0}")]
    InvalidMipmapCount(usize),

    /// A mip index beyond the allocated chain was used.
    #[error("Mip level {index} does not exist, texture has {count} levels")]
    MipIndexOutOfRange {
        /// The requested mip level
        index: usize,
        /// Number of allocated levels
        count: usize,
    },

    /// Pixel coordinates outside the addressed mip level.
    #[error("Pixel ({x}, {y}) is outside of a {width}x{height} mip level")]
    PixelOutOfBounds {
        /// Requested column
        x: u32,
        /// Requested row
        y: u32,
        /// Width of the mip level
        width: u32,
        /// Height of the mip level
        height: u32,
    },

    /// More palette entries were supplied than the format stores.
    #[error("Palette of {len} entries does not fit {format}, which stores {capacity}")]
    PaletteTooLarge {
        /// Format of the texture
        format: TextureFormat,
        /// Number of supplied entries
        len: usize,
        /// Number of entries the format stores
        capacity: usize,
    },

    /// A surface used for import does not match the texture dimensions.
    #[error("Surface is {actual_width}x{actual_height}, expected {width}x{height}")]
    SurfaceSizeMismatch {
        /// Expected width
        width: u32,
        /// Expected height
        height: u32,
        /// Width of the supplied surface
        actual_width: u32,
        /// Height of the supplied surface
        actual_height: u32,
    },

    /// The block codec failed to process a mip level.
    #[error("Block codec error: {0}")]
    BlockCodec(#[from] BlockCodecError),

    /// Reading or writing the underlying stream failed.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TextureError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::CompressedPixelAccess(_)
            | Self::AlreadyCompressed(_)
            | Self::NotCompressed(_)
            | Self::UnsupportedCompressionSource(_)
            | Self::BlockCodec(_) => ErrorKind::FormatViolation,
            Self::UnknownFormatCode(_) | Self::InputTooShort { .. } | Self::EmptyImage { .. } => {
                ErrorKind::MalformedInput
            }
            Self::NotACompressedFormat(_)
            | Self::InvalidDimensions { .. }
            | Self::InvalidMipmapCount(_)
            | Self::MipIndexOutOfRange { .. }
            | Self::PixelOutOfBounds { .. }
            | Self::PaletteTooLarge { .. }
            | Self::SurfaceSizeMismatch { .. } => ErrorKind::InvalidArgument,
            #[cfg(feature = "std")]
            Self::Io(_) => ErrorKind::Io,
        }
    }

    pub(crate) fn block_format_mismatch(format: BlockFormat, expected: usize, actual: usize) -> Self {
        Self::BlockCodec(BlockCodecError::InvalidLength {
            format,
            expected,
            actual,
        })
    }
}
