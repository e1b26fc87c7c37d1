#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![warn(missing_docs)]

pub mod detect;
pub mod error;
pub mod load;
pub mod quantize;
pub mod resample;
pub mod save;
pub mod surface;

pub use detect::suggest_format;
pub use error::{ImageError, ImageResult};
pub use load::decode_texture;
pub use quantize::{NeuQuantizer, QuantizedImage, Quantizer};
pub use resample::ImageResampler;
pub use save::{encode_image, SaveOptions, SaveOptionsBuilder};
pub use surface::{image_from_surface, surface_from_image};

/// Common test prelude for avoiding duplicate imports in test modules
#[cfg(test)]
pub(crate) mod test_prelude;
