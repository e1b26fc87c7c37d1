//! Common test imports and utilities for block codec tests
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.

// External crates commonly used in tests
pub use rstest::rstest;

// Types from the texture core
pub use angel_tex::{BlockCodec, BlockCodecError, BlockFormat, Color8888, CompressionQuality};

// Core functionality from this crate
pub use crate::{Decoded4x4Block, DxtBlockCodec};
