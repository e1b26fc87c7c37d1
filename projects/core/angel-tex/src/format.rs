//! # Texture formats
//!
//! Every pixel encoding a TEX file can carry is a variant of [`TextureFormat`]. The derived
//! properties of each format (palette size, alpha support, storage stride, block compression)
//! live in a single static [`FormatInfo`] table which every other part of the codec consults.
//!
//! ## On-disk codes
//!
//! | Format     | Code | Stride          | Palette | Alpha |
//! |------------|------|-----------------|---------|-------|
//! | `P8`       | 1    | 1 byte          | 256     | no    |
//! | `P8A8`     | 2    | 2 bytes         | 256     | yes   |
//! | `A1R5G5B5` | 6    | 2 bytes         | -       | yes   |
//! | `I8`       | 8    | 1 byte          | -       | no    |
//! | `A4I4`     | 9    | 1 byte          | -       | yes   |
//! | `A8I8`     | 10   | 2 bytes         | -       | yes   |
//! | `A8`       | 11   | 1 byte          | -       | yes   |
//! | `PA8`      | 14   | 1 byte          | 256     | yes   |
//! | `P4`       | 15   | 2 pixels / byte | 16      | no    |
//! | `PA4`      | 16   | 2 pixels / byte | 16      | yes   |
//! | `RGB888`   | 17   | 3 bytes         | -       | no    |
//! | `RGB8888`  | 18   | 4 bytes         | -       | yes   |
//! | `DXT1`     | 22   | 8 byte blocks   | -       | no    |
//! | `DXT3`     | 24   | 16 byte blocks  | -       | yes   |
//! | `DXT5`     | 26   | 16 byte blocks  | -       | yes   |

use core::fmt;
use core::str::FromStr;
use derive_enum_all_values::AllValues;

/// A pixel encoding supported by the TEX container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AllValues)]
#[repr(u16)]
pub enum TextureFormat {
    /// 8 bit palette index, opaque palette.
    P8 = 1,
    /// 8 bit palette index followed by an explicit 8 bit alpha.
    P8A8 = 2,
    /// 16 bit little endian, 1 bit alpha and 5 bits per colour channel.
    A1R5G5B5 = 6,
    /// 8 bit greyscale.
    I8 = 8,
    /// 4 bits alpha, 4 bits greyscale.
    A4I4 = 9,
    /// 8 bits alpha, 8 bits greyscale.
    A8I8 = 10,
    /// Alpha channel only.
    A8 = 11,
    /// 8 bit palette index, palette with alpha.
    PA8 = 14,
    /// 4 bit palette index, opaque palette.
    P4 = 15,
    /// 4 bit palette index, palette with alpha.
    PA4 = 16,
    /// 24 bit RGB.
    RGB888 = 17,
    /// 32 bit RGBA.
    RGB8888 = 18,
    /// BC1 block compression.
    DXT1 = 22,
    /// BC2 block compression.
    DXT3 = 24,
    /// BC3 block compression.
    DXT5 = 26,
}

/// How pixels of a format are laid out in a mip level buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stride {
    /// Each pixel occupies this many whole bytes.
    Bytes(u8),
    /// Two pixels share one byte. Even pixel indices use the low nibble.
    TwoPixelsPerByte,
    /// Pixels are grouped in 4x4 blocks of this many bytes.
    Block(u8),
}

/// Properties derived from a [`TextureFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FormatInfo {
    /// Number of palette entries stored with the texture. 0 if the format is not paletted.
    pub palette_size: u16,
    /// Whether the format can represent anything other than fully opaque pixels.
    pub supports_alpha: bool,
    /// Storage layout of a single pixel.
    pub stride: Stride,
}

impl FormatInfo {
    const fn new(palette_size: u16, supports_alpha: bool, stride: Stride) -> Self {
        Self {
            palette_size,
            supports_alpha,
            stride,
        }
    }

    /// Whether pixels are stored as palette indices.
    #[inline]
    pub const fn has_palette(&self) -> bool {
        self.palette_size > 0
    }

    /// Whether pixels are stored as compressed 4x4 blocks.
    #[inline]
    pub const fn is_compressed(&self) -> bool {
        matches!(self.stride, Stride::Block(_))
    }
}

impl TextureFormat {
    /// Converts an on-disk format code into a [`TextureFormat`].
    ///
    /// Returns [`None`] for codes outside the fixed enumeration.
    pub const fn from_code(code: u16) -> Option<Self> {
        Some(match code {
            1 => Self::P8,
            2 => Self::P8A8,
            6 => Self::A1R5G5B5,
            8 => Self::I8,
            9 => Self::A4I4,
            10 => Self::A8I8,
            11 => Self::A8,
            14 => Self::PA8,
            15 => Self::P4,
            16 => Self::PA4,
            17 => Self::RGB888,
            18 => Self::RGB8888,
            22 => Self::DXT1,
            24 => Self::DXT3,
            26 => Self::DXT5,
            _ => return None,
        })
    }

    /// The on-disk format code.
    #[inline]
    pub const fn code(self) -> u16 {
        self as u16
    }

    /// The static property table entry for this format.
    pub const fn info(self) -> FormatInfo {
        match self {
            Self::P4 => FormatInfo::new(16, false, Stride::TwoPixelsPerByte),
            Self::PA4 => FormatInfo::new(16, true, Stride::TwoPixelsPerByte),
            Self::P8 => FormatInfo::new(256, false, Stride::Bytes(1)),
            Self::PA8 => FormatInfo::new(256, true, Stride::Bytes(1)),
            Self::P8A8 => FormatInfo::new(256, true, Stride::Bytes(2)),
            Self::A1R5G5B5 => FormatInfo::new(0, true, Stride::Bytes(2)),
            Self::A8I8 => FormatInfo::new(0, true, Stride::Bytes(2)),
            Self::A4I4 => FormatInfo::new(0, true, Stride::Bytes(1)),
            Self::A8 => FormatInfo::new(0, true, Stride::Bytes(1)),
            Self::I8 => FormatInfo::new(0, false, Stride::Bytes(1)),
            Self::RGB888 => FormatInfo::new(0, false, Stride::Bytes(3)),
            Self::RGB8888 => FormatInfo::new(0, true, Stride::Bytes(4)),
            Self::DXT1 => FormatInfo::new(0, false, Stride::Block(8)),
            Self::DXT3 => FormatInfo::new(0, true, Stride::Block(16)),
            Self::DXT5 => FormatInfo::new(0, true, Stride::Block(16)),
        }
    }

    /// Whether pixels are stored as palette indices.
    #[inline]
    pub const fn is_paletted(self) -> bool {
        self.info().has_palette()
    }

    /// Whether the format carries an alpha channel.
    #[inline]
    pub const fn supports_alpha(self) -> bool {
        self.info().supports_alpha
    }

    /// Whether the format is block compressed.
    #[inline]
    pub const fn is_compressed(self) -> bool {
        self.info().is_compressed()
    }

    /// Number of palette entries the format stores (16, 256 or 0).
    #[inline]
    pub const fn palette_size(self) -> usize {
        self.info().palette_size as usize
    }

    /// Storage layout of a single pixel.
    #[inline]
    pub const fn stride(self) -> Stride {
        self.info().stride
    }

    /// Size in bytes of a mip level with the given dimensions.
    ///
    /// ```
    /// use angel_tex::TextureFormat;
    ///
    /// assert_eq!(TextureFormat::RGB888.mip_data_size(4, 2), 24);
    /// assert_eq!(TextureFormat::P4.mip_data_size(3, 3), 5);
    /// assert_eq!(TextureFormat::DXT1.mip_data_size(6, 4), 16);
    /// ```
    pub const fn mip_data_size(self, width: u32, height: u32) -> usize {
        let pixel_count = width as usize * height as usize;
        match self.stride() {
            Stride::Bytes(bytes) => pixel_count * bytes as usize,
            Stride::TwoPixelsPerByte => pixel_count.div_ceil(2),
            Stride::Block(bytes) => {
                (width as usize).div_ceil(4) * (height as usize).div_ceil(4) * bytes as usize
            }
        }
    }

    /// Human readable name, also accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            Self::P8 => "P8",
            Self::P8A8 => "P8A8",
            Self::A1R5G5B5 => "A1R5G5B5",
            Self::I8 => "I8",
            Self::A4I4 => "A4I4",
            Self::A8I8 => "A8I8",
            Self::A8 => "A8",
            Self::PA8 => "PA8",
            Self::P4 => "P4",
            Self::PA4 => "PA4",
            Self::RGB888 => "RGB888",
            Self::RGB8888 => "RGB8888",
            Self::DXT1 => "DXT1",
            Self::DXT3 => "DXT3",
            Self::DXT5 => "DXT5",
        }
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown format name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown texture format name")]
pub struct ParseFormatError;

impl FromStr for TextureFormat {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all_values()
            .iter()
            .copied()
            .find(|format| format.name().eq_ignore_ascii_case(s))
            .ok_or(ParseFormatError)
    }
}
