#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod block;
pub mod color;
pub mod error;
pub mod flags;
pub mod format;
pub mod mipmap;
pub mod pixel;
pub mod serialize;
pub mod settings;
pub mod surface;
pub mod texture;

pub use block::{BlockCodec, BlockCodecError, BlockFormat, CompressionQuality};
pub use color::Color8888;
pub use error::{ErrorKind, TextureError, TextureResult};
pub use flags::TextureFlags;
pub use format::{FormatInfo, ParseFormatError, Stride, TextureFormat};
pub use mipmap::{MipmapFilter, ResampleFilter, Resampler};
pub use serialize::{TexHeader, HEADER_SIZE};
pub use settings::{CodecSettings, CodecSettingsBuilder, DEFAULT_ALPHA_REF};
pub use surface::{RgbaSurface, Surface};
pub use texture::{max_mipmap_count, Texture, MAX_MIPMAPS};

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
