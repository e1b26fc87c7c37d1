//! Error types for the image pipelines.

use angel_tex::TextureError;
use thiserror::Error;

/// Errors that can occur while converting between images and textures.
#[derive(Debug, Error)]
pub enum ImageError {
    /// The texture layer rejected an operation.
    #[error(transparent)]
    Texture(#[from] TextureError),

    /// TEX stores dimensions as 16 bit values.
    #[error("Image of {width}x{height} exceeds the maximum texture size of 65535x65535")]
    ImageTooLarge {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
    },

    /// The quantizer produced a different number of indices than there are pixels.
    #[error("Quantizer returned {actual} indices for {expected} pixels")]
    QuantizedLengthMismatch {
        /// Number of pixels in the image
        expected: usize,
        /// Number of indices returned
        actual: usize,
    },

    /// The quantizer produced an index outside of its own palette.
    #[error("Quantizer returned palette index {index} for a palette of {len} entries")]
    PaletteIndexOutOfRange {
        /// The offending index
        index: u8,
        /// Number of palette entries returned
        len: usize,
    },
}

/// Result type for the image pipelines
pub type ImageResult<T> = Result<T, ImageError>;
