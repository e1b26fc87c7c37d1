//! # Texture
//!
//! The [`Texture`] owns everything a TEX file describes: dimensions, format, flags, the palette
//! and the chain of mip level buffers.
//!
//! ## Mip chain
//!
//! Mip `i` has dimensions `width >> i` by `height >> i`. The chain can only be extended while
//! both dimensions of the previous level are even, so an odd base dimension means a single
//! level. The byte size of each level is [`TextureFormat::mip_data_size`] of its dimensions.
//!
//! Files written by other tools may carry levels past an odd dimension. Those are kept on load
//! (see [`Texture::from_bytes`]) but never allocated here.

use crate::color::Color8888;
use crate::error::{TextureError, TextureResult};
use crate::flags::TextureFlags;
use crate::format::TextureFormat;
use alloc::vec;
use alloc::vec::Vec;

/// Upper bound on the number of mip levels a texture can hold.
pub const MAX_MIPMAPS: usize = 17;

/// A TEX texture: a possibly paletted or block compressed bitmap with a mip chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) format: TextureFormat,
    pub(crate) flags: TextureFlags,
    pub(crate) palette: Vec<Color8888>,
    pub(crate) mipmaps: Vec<Vec<u8>>,
}

/// Number of mip levels (base level included) a texture of the given size can hold.
///
/// ```
/// use angel_tex::max_mipmap_count;
///
/// assert_eq!(max_mipmap_count(64, 64), 7);
/// assert_eq!(max_mipmap_count(12, 12), 3);
/// assert_eq!(max_mipmap_count(65, 64), 1);
/// ```
pub fn max_mipmap_count(width: u32, height: u32) -> usize {
    let (mut width, mut height) = (width, height);
    let mut count = 1;
    while width > 0 && height > 0 && width % 2 == 0 && height % 2 == 0 {
        count += 1;
        width /= 2;
        height /= 2;
    }
    count
}

impl Texture {
    /// Creates a texture with `mipmap_count` zero filled mip levels.
    ///
    /// The chain is clamped to what the dimensions allow (see [`max_mipmap_count`]); a texture
    /// with an odd dimension always gets exactly one level. Paletted formats start with a palette
    /// of transparent black entries.
    ///
    /// # Errors
    ///
    /// - [`TextureError::InvalidDimensions`] if `width` or `height` is zero.
    /// - [`TextureError::InvalidMipmapCount`] if `mipmap_count` is zero.
    pub fn new(
        width: u16,
        height: u16,
        format: TextureFormat,
        mipmap_count: usize,
    ) -> TextureResult<Self> {
        if width == 0 || height == 0 {
            return Err(TextureError::InvalidDimensions {
                width: width as u32,
                height: height as u32,
            });
        }

        if mipmap_count < 1 {
            return Err(TextureError::InvalidMipmapCount(mipmap_count));
        }

        let mut texture = Self::empty(width, height, format);
        texture.allocate_mipmaps(mipmap_count);
        Ok(texture)
    }

    /// Creates a texture with either the full mip chain or only the base level.
    pub fn with_mipmaps(
        width: u16,
        height: u16,
        format: TextureFormat,
        mipmaps: bool,
    ) -> TextureResult<Self> {
        let count = if mipmaps {
            max_mipmap_count(width as u32, height as u32)
        } else {
            1
        };
        Self::new(width, height, format, count)
    }

    /// A texture with a correctly sized palette but no mip levels.
    pub(crate) fn empty(width: u16, height: u16, format: TextureFormat) -> Self {
        Self {
            width,
            height,
            format,
            flags: TextureFlags::default(),
            palette: vec![Color8888::TRANSPARENT_BLACK; format.palette_size()],
            mipmaps: Vec::new(),
        }
    }

    /// Grows the mip chain to `count` levels, as far as the dimensions allow.
    ///
    /// New levels are zero filled. Existing levels are never removed or modified.
    pub fn allocate_mipmaps(&mut self, count: usize) {
        let count = count
            .min(MAX_MIPMAPS)
            .min(max_mipmap_count(self.width as u32, self.height as u32));

        while self.mipmaps.len() < count {
            let size = self.mip_data_size(self.mipmaps.len());
            self.mipmaps.push(vec![0; size]);
        }
    }

    /// Width of the base level.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height of the base level.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Pixel format of every mip level.
    #[inline]
    pub fn format(&self) -> TextureFormat {
        self.format
    }

    /// Rendering hints stored with the texture.
    #[inline]
    pub fn flags(&self) -> TextureFlags {
        self.flags
    }

    /// Replaces the rendering hints.
    #[inline]
    pub fn set_flags(&mut self, flags: TextureFlags) {
        self.flags = flags;
    }

    /// Mutable access to the rendering hints.
    #[inline]
    pub fn flags_mut(&mut self) -> &mut TextureFlags {
        &mut self.flags
    }

    /// The palette. Empty unless the format is paletted.
    #[inline]
    pub fn palette(&self) -> &[Color8888] {
        &self.palette
    }

    /// Mutable access to the palette entries. The palette length is fixed by the format.
    #[inline]
    pub fn palette_mut(&mut self) -> &mut [Color8888] {
        &mut self.palette
    }

    /// Copies `colors` into the start of the palette and fills the rest with transparent black.
    ///
    /// # Errors
    ///
    /// [`TextureError::PaletteTooLarge`] if more colors are given than the format stores.
    pub fn set_palette(&mut self, colors: &[Color8888]) -> TextureResult<()> {
        let capacity = self.palette.len();
        if colors.len() > capacity {
            return Err(TextureError::PaletteTooLarge {
                format: self.format,
                len: colors.len(),
                capacity,
            });
        }

        self.palette[..colors.len()].copy_from_slice(colors);
        self.palette[colors.len()..].fill(Color8888::TRANSPARENT_BLACK);
        Ok(())
    }

    /// Number of mip levels, base level included.
    #[inline]
    pub fn mipmap_count(&self) -> usize {
        self.mipmaps.len()
    }

    /// Whether the base dimensions allow a mip chain at all.
    #[inline]
    pub fn can_generate_mipmaps(&self) -> bool {
        self.width % 2 == 0 && self.height % 2 == 0
    }

    /// Dimensions of mip level `index`.
    ///
    /// This is defined for any index, allocated or not; levels past the smallest possible
    /// size report a zero dimension.
    #[inline]
    pub fn mip_dimensions(&self, index: usize) -> (u32, u32) {
        let shift = index.min(31) as u32;
        ((self.width as u32) >> shift, (self.height as u32) >> shift)
    }

    /// Byte size of mip level `index` in the current format.
    #[inline]
    pub fn mip_data_size(&self, index: usize) -> usize {
        let (width, height) = self.mip_dimensions(index);
        self.format.mip_data_size(width, height)
    }

    /// Raw storage of mip level `index`.
    pub fn mip_data(&self, index: usize) -> TextureResult<&[u8]> {
        self.check_mip_index(index)?;
        Ok(&self.mipmaps[index])
    }

    /// Mutable raw storage of mip level `index`. The buffer length is fixed by the format.
    pub fn mip_data_mut(&mut self, index: usize) -> TextureResult<&mut [u8]> {
        self.check_mip_index(index)?;
        Ok(&mut self.mipmaps[index])
    }

    /// Forces every palette entry to be opaque, if `settings` ask for it.
    pub fn clear_palette_alpha(&mut self, settings: &crate::CodecSettings) {
        if !settings.remove_palette_alpha {
            return;
        }

        for entry in self.palette.iter_mut() {
            *entry = entry.opaque();
        }
    }

    #[inline]
    pub(crate) fn check_mip_index(&self, index: usize) -> TextureResult<()> {
        if index >= self.mipmaps.len() {
            return Err(TextureError::MipIndexOutOfRange {
                index,
                count: self.mipmaps.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn chain_of_64x64_with_4_levels() {
        let texture = Texture::new(64, 64, TextureFormat::RGB8888, 4).unwrap();
        assert_eq!(texture.mipmap_count(), 4);

        let sizes: Vec<_> = (0..4).map(|i| texture.mip_dimensions(i)).collect();
        assert_eq!(sizes, vec![(64, 64), (32, 32), (16, 16), (8, 8)]);

        for i in 0..4 {
            assert_eq!(
                texture.mip_data(i).unwrap().len(),
                TextureFormat::RGB8888.mip_data_size(sizes[i].0, sizes[i].1)
            );
        }
    }

    #[rstest]
    #[case(65, 64)]
    #[case(64, 65)]
    #[case(1, 1)]
    #[case(33, 17)]
    fn odd_dimension_allocates_single_level(#[case] width: u16, #[case] height: u16) {
        let texture = Texture::new(width, height, TextureFormat::P8, 8).unwrap();
        assert_eq!(texture.mipmap_count(), 1);
    }

    #[test]
    fn chain_stops_once_a_dimension_turns_odd() {
        // 12 -> 6 -> 3, no level may follow the 3x3 one.
        let texture = Texture::new(12, 12, TextureFormat::I8, 8).unwrap();
        assert_eq!(texture.mipmap_count(), 3);
        assert_eq!(texture.mip_dimensions(2), (3, 3));
    }

    #[test]
    fn full_chain_reaches_1x1() {
        let texture = Texture::with_mipmaps(16, 4, TextureFormat::A8, true).unwrap();
        assert_eq!(texture.mipmap_count(), 3);
        assert_eq!(texture.mip_dimensions(2), (4, 1));

        let texture = Texture::with_mipmaps(16, 16, TextureFormat::A8, true).unwrap();
        assert_eq!(texture.mipmap_count(), 5);
        assert_eq!(texture.mip_dimensions(4), (1, 1));
    }

    #[test]
    fn zero_mip_count_is_rejected() {
        let err = Texture::new(8, 8, TextureFormat::RGB888, 0).unwrap_err();
        assert!(matches!(err, TextureError::InvalidMipmapCount(0)));
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[rstest]
    #[case(0, 8)]
    #[case(8, 0)]
    fn zero_dimensions_are_rejected(#[case] width: u16, #[case] height: u16) {
        let err = Texture::new(width, height, TextureFormat::RGB888, 1).unwrap_err();
        assert!(matches!(err, TextureError::InvalidDimensions { .. }));
    }

    #[rstest]
    #[case(TextureFormat::P4, 16)]
    #[case(TextureFormat::PA8, 256)]
    #[case(TextureFormat::P8A8, 256)]
    #[case(TextureFormat::A8I8, 0)]
    #[case(TextureFormat::DXT1, 0)]
    fn palette_length_follows_format(#[case] format: TextureFormat, #[case] expected: usize) {
        let texture = Texture::new(4, 4, format, 1).unwrap();
        assert_eq!(texture.palette().len(), expected);
    }

    #[test]
    fn set_palette_pads_and_rejects_overflow() {
        let mut texture = Texture::new(4, 4, TextureFormat::P4, 1).unwrap();
        let colors = grey_palette(4);
        texture.set_palette(&colors).unwrap();
        assert_eq!(&texture.palette()[..4], &colors[..]);
        assert!(texture.palette()[4..]
            .iter()
            .all(|c| *c == Color8888::TRANSPARENT_BLACK));
        assert_eq!(texture.palette().len(), 16);

        let err = texture.set_palette(&grey_palette(17)).unwrap_err();
        assert!(matches!(
            err,
            TextureError::PaletteTooLarge {
                len: 17,
                capacity: 16,
                ..
            }
        ));
    }

    #[test]
    fn allocate_mipmaps_only_grows() {
        let mut texture = Texture::new(32, 32, TextureFormat::RGB888, 1).unwrap();
        texture.mip_data_mut(0).unwrap()[0] = 7;

        texture.allocate_mipmaps(3);
        assert_eq!(texture.mipmap_count(), 3);
        assert_eq!(texture.mip_data(0).unwrap()[0], 7);

        texture.allocate_mipmaps(2);
        assert_eq!(texture.mipmap_count(), 3);

        texture.allocate_mipmaps(100);
        assert_eq!(texture.mipmap_count(), 6);
    }

    #[test]
    fn mip_index_out_of_range() {
        let texture = Texture::new(8, 8, TextureFormat::RGB888, 2).unwrap();
        let err = texture.mip_data(2).unwrap_err();
        assert!(matches!(
            err,
            TextureError::MipIndexOutOfRange { index: 2, count: 2 }
        ));
    }

    #[rstest]
    #[case(true, 255)]
    #[case(false, 10)]
    fn clear_palette_alpha_honours_settings(#[case] remove: bool, #[case] expected: u8) {
        let mut texture = Texture::new(4, 4, TextureFormat::P8, 1).unwrap();
        texture.palette_mut()[0] = Color8888::new(1, 2, 3, 10);

        let settings = CodecSettings::builder().remove_palette_alpha(remove).build();
        texture.clear_palette_alpha(&settings);
        assert_eq!(texture.palette()[0].a, expected);
    }
}
