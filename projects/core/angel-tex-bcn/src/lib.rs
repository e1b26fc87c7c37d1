#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod codec;
pub mod color_565;
pub mod decode;
pub mod decoded_4x4_block;
pub mod encode;

pub use codec::DxtBlockCodec;
pub use decoded_4x4_block::Decoded4x4Block;

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
