//! # TEX binary layout
//!
//! All values are little endian.
//!
//! | Offset | Size               | Field                                  |
//! |--------|--------------------|----------------------------------------|
//! | 0x00   | 2                  | Width                                  |
//! | 0x02   | 2                  | Height                                 |
//! | 0x04   | 2                  | Format code                            |
//! | 0x06   | 2                  | Mip level count                        |
//! | 0x08   | 2                  | Reserved, written as 1                 |
//! | 0x0A   | 4                  | Flags (signed)                         |
//! | 0x0E   | 4 * palette size   | Palette, B G R A per entry. Paletted formats only. |
//! | ...    | sum of level sizes | Mip levels, largest first              |
//!
//! ## Loading
//!
//! - Unknown format codes and short headers or palettes fail the load.
//! - Palette alpha is discarded for formats without alpha, unless
//!   [`CodecSettings::remove_palette_alpha`] is turned off.
//! - Mip levels are read until the data runs out. A level that is only partially present is
//!   dropped together with everything after it.

use crate::color::Color8888;
use crate::error::{TextureError, TextureResult};
use crate::flags::TextureFlags;
use crate::format::TextureFormat;
use crate::settings::CodecSettings;
use crate::texture::{Texture, MAX_MIPMAPS};
use alloc::vec;
use alloc::vec::Vec;
use endian_writer::{EndianReader, EndianWriter, LittleEndianReader, LittleEndianWriter};

/// Size of the fixed TEX header in bytes.
pub const HEADER_SIZE: usize = 14;

/// Size of a single serialized palette entry.
pub const PALETTE_ENTRY_SIZE: usize = 4;

/// Value written into the reserved header field.
pub const RESERVED_HEADER_VALUE: u16 = 1;

const WIDTH_OFFSET: isize = 0x00;
const HEIGHT_OFFSET: isize = 0x02;
const FORMAT_OFFSET: isize = 0x04;
const MIPMAP_COUNT_OFFSET: isize = 0x06;
const RESERVED_OFFSET: isize = 0x08;
const FLAGS_OFFSET: isize = 0x0A;

/// The fixed size TEX header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexHeader {
    /// Width of the base level.
    pub width: u16,
    /// Height of the base level.
    pub height: u16,
    /// Raw format code, see [`TextureFormat::code`].
    pub format_code: u16,
    /// Number of stored mip levels.
    pub mipmap_count: u16,
    /// Rendering hints.
    pub flags: TextureFlags,
}

impl TexHeader {
    /// Parses the header at the start of `data`.
    ///
    /// The format code is not validated.
    ///
    /// # Errors
    ///
    /// [`TextureError::InputTooShort`] if `data` is shorter than [`HEADER_SIZE`].
    pub fn read(data: &[u8]) -> TextureResult<Self> {
        if data.len() < HEADER_SIZE {
            return Err(TextureError::InputTooShort {
                required: HEADER_SIZE,
                actual: data.len(),
            });
        }

        // SAFETY: We checked data.len() >= HEADER_SIZE, every field lies within the header.
        unsafe {
            let mut reader = LittleEndianReader::new(data.as_ptr());
            Ok(Self {
                width: reader.read_u16_at(WIDTH_OFFSET),
                height: reader.read_u16_at(HEIGHT_OFFSET),
                format_code: reader.read_u16_at(FORMAT_OFFSET),
                mipmap_count: reader.read_u16_at(MIPMAP_COUNT_OFFSET),
                flags: TextureFlags::from_bits(reader.read_i32_at(FLAGS_OFFSET)),
            })
        }
    }

    /// Writes the header into the first [`HEADER_SIZE`] bytes of `out`.
    ///
    /// # Panics
    ///
    /// If `out` is shorter than [`HEADER_SIZE`].
    pub fn write(&self, out: &mut [u8]) {
        assert!(out.len() >= HEADER_SIZE, "header buffer too small");

        // SAFETY: out.len() >= HEADER_SIZE was asserted above.
        unsafe {
            let mut writer = LittleEndianWriter::new(out.as_mut_ptr());
            writer.write_u16_at(self.width, WIDTH_OFFSET);
            writer.write_u16_at(self.height, HEIGHT_OFFSET);
            writer.write_u16_at(self.format_code, FORMAT_OFFSET);
            writer.write_u16_at(self.mipmap_count, MIPMAP_COUNT_OFFSET);
            writer.write_u16_at(RESERVED_HEADER_VALUE, RESERVED_OFFSET);
            writer.write_i32_at(self.flags.bits(), FLAGS_OFFSET);
        }
    }
}

impl Texture {
    /// Number of bytes [`Texture::to_bytes`] produces.
    pub fn serialized_size(&self) -> usize {
        let palette = if self.format.is_paletted() {
            self.palette.len() * PALETTE_ENTRY_SIZE
        } else {
            0
        };
        HEADER_SIZE + palette + self.mipmaps.iter().map(Vec::len).sum::<usize>()
    }

    /// The header describing this texture.
    pub fn header(&self) -> TexHeader {
        TexHeader {
            width: self.width,
            height: self.height,
            format_code: self.format.code(),
            mipmap_count: self.mipmaps.len() as u16,
            flags: self.flags,
        }
    }

    /// Serializes the texture into the TEX layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.serialized_size()];
        self.header().write(&mut bytes);

        let mut offset = HEADER_SIZE;
        if self.format.is_paletted() {
            for entry in &self.palette {
                bytes[offset..offset + PALETTE_ENTRY_SIZE].copy_from_slice(&entry.to_bgra_bytes());
                offset += PALETTE_ENTRY_SIZE;
            }
        }

        for level in &self.mipmaps {
            bytes[offset..offset + level.len()].copy_from_slice(level);
            offset += level.len();
        }
        bytes
    }

    /// Parses a texture from the TEX layout.
    ///
    /// Every level the header declares is read while it is fully present, even past an odd
    /// dimension, so files with longer chains than [`max_mipmap_count`](crate::max_mipmap_count) allows survive a round
    /// trip. Reading stops at the first truncated level or once a dimension reaches zero.
    /// Trailing bytes after the last level are ignored.
    ///
    /// # Errors
    ///
    /// - [`TextureError::InputTooShort`] if the header, the palette or mip 0 is incomplete,
    ///   including a header declaring no levels at all.
    /// - [`TextureError::UnknownFormatCode`] if the format code is not a known format.
    /// - [`TextureError::EmptyImage`] if the header declares a zero width or height.
    pub fn from_bytes(data: &[u8], settings: &CodecSettings) -> TextureResult<Self> {
        let header = TexHeader::read(data)?;
        let format = TextureFormat::from_code(header.format_code)
            .ok_or(TextureError::UnknownFormatCode(header.format_code))?;

        if header.width == 0 || header.height == 0 {
            return Err(TextureError::EmptyImage {
                width: header.width,
                height: header.height,
            });
        }

        let mut texture = Texture::empty(header.width, header.height, format);
        texture.flags = header.flags;

        let mut offset = HEADER_SIZE;
        if format.is_paletted() {
            let palette_end = offset + format.palette_size() * PALETTE_ENTRY_SIZE;
            if data.len() < palette_end {
                return Err(TextureError::InputTooShort {
                    required: palette_end,
                    actual: data.len(),
                });
            }

            for (entry, bytes) in texture
                .palette
                .iter_mut()
                .zip(data[offset..palette_end].chunks_exact(PALETTE_ENTRY_SIZE))
            {
                *entry = Color8888::from_bgra_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            }
            offset = palette_end;

            if !format.supports_alpha() {
                texture.clear_palette_alpha(settings);
            }
        }

        let level_count = (header.mipmap_count as usize).min(MAX_MIPMAPS);
        for index in 0..level_count {
            let (width, height) = texture.mip_dimensions(index);
            if width == 0 || height == 0 {
                break;
            }

            let size = texture.mip_data_size(index);
            let Some(level) = data.get(offset..offset + size) else {
                break;
            };
            texture.mipmaps.push(level.to_vec());
            offset += size;
        }

        if texture.mipmaps.is_empty() {
            return Err(TextureError::InputTooShort {
                required: offset + texture.mip_data_size(0),
                actual: data.len(),
            });
        }

        Ok(texture)
    }

    /// Writes the TEX layout to `writer`.
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write + ?Sized>(&self, writer: &mut W) -> TextureResult<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Reads `reader` to the end and parses the TEX layout.
    ///
    /// # Errors
    ///
    /// Same as [`Texture::from_bytes`], plus [`TextureError::Io`] if reading fails.
    #[cfg(feature = "std")]
    pub fn read_from<R: std::io::Read + ?Sized>(
        reader: &mut R,
        settings: &CodecSettings,
    ) -> TextureResult<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data, settings)
    }
}
