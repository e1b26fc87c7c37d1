//! Texture flags stored in the TEX header.

use bitfield::bitfield;

bitfield! {
    /// Rendering hints stored as a signed 32 bit value in the TEX header.
    ///
    /// Bit layout:
    /// - Bit 0: Clamp U
    /// - Bit 1: Cloud shadows (high)
    /// - Bit 2: Cloud shadows (low)
    /// - Bit 16: Clamp V
    /// - Bit 17: Transparent
    ///
    /// Every other bit is unknown to the codec and is carried through load and save untouched.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TextureFlags(u32);
    impl Debug;

    /// Clamp texture coordinates on the U axis.
    pub clamp_u, set_clamp_u: 0;
    /// Cast high cloud shadows.
    pub cloud_shadows_high, set_cloud_shadows_high: 1;
    /// Cast low cloud shadows.
    pub cloud_shadows_low, set_cloud_shadows_low: 2;
    /// Clamp texture coordinates on the V axis.
    pub clamp_v, set_clamp_v: 16;
    /// The texture has transparent pixels.
    pub transparent, set_transparent: 17;
}

impl TextureFlags {
    /// Bit of [`TextureFlags::clamp_u`].
    pub const CLAMP_U: u32 = 0x01;
    /// Bit of [`TextureFlags::cloud_shadows_high`].
    pub const CLOUD_SHADOWS_HIGH: u32 = 0x02;
    /// Bit of [`TextureFlags::cloud_shadows_low`].
    pub const CLOUD_SHADOWS_LOW: u32 = 0x04;
    /// Bit of [`TextureFlags::clamp_v`].
    pub const CLAMP_V: u32 = 0x1_0000;
    /// Bit of [`TextureFlags::transparent`].
    pub const TRANSPARENT: u32 = 0x2_0000;

    /// Bits with a known meaning.
    pub const KNOWN_BITS: u32 = Self::CLAMP_U
        | Self::CLOUD_SHADOWS_HIGH
        | Self::CLOUD_SHADOWS_LOW
        | Self::CLAMP_V
        | Self::TRANSPARENT;

    /// Creates flags from the raw header value.
    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits as u32)
    }

    /// Raw header value.
    #[inline]
    pub const fn bits(&self) -> i32 {
        self.0 as i32
    }

    /// Bits set in the header that have no known meaning.
    #[inline]
    pub const fn unknown_bits(&self) -> u32 {
        self.0 & !Self::KNOWN_BITS
    }
}
