//! RGB565 endpoint colours of BC1/BC2/BC3 blocks.

use angel_tex::Color8888;

/// Represents a 16-bit RGB565 color (5 bits red, 6 bits green, 5 bits blue)
/// as stored in the colour half of every DXT block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color565 {
    value: u16,
}

impl Color565 {
    /// Creates a new [`Color565`] from the raw 16-bit value
    #[inline]
    pub const fn from_raw(value: u16) -> Self {
        Self { value }
    }

    /// Reads a little endian [`Color565`] from the first two bytes of `bytes`.
    #[inline]
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self::from_raw(u16::from_le_bytes(bytes))
    }

    /// Creates a [`Color565`] by truncating 8 bit channels.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            value: ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3),
        }
    }

    /// Returns the raw 16-bit value
    #[inline]
    pub const fn raw_value(&self) -> u16 {
        self.value
    }

    // Endpoints expand to 8 bits by replicating their top bits.

    /// Extracts the expanded 8-bit red component
    #[inline]
    pub const fn red(&self) -> u8 {
        let r = (self.value & 0b11111000_00000000) >> 11;
        ((r << 3) | (r >> 2)) as u8
    }

    /// Extracts the expanded 8-bit green component
    #[inline]
    pub const fn green(&self) -> u8 {
        let g = (self.value & 0b00000111_11100000) >> 5;
        ((g << 2) | (g >> 4)) as u8
    }

    /// Extracts the expanded 8-bit blue component
    #[inline]
    pub const fn blue(&self) -> u8 {
        let b = self.value & 0b00000000_00011111;
        ((b << 3) | (b >> 2)) as u8
    }

    /// Whether the raw value of `self` is greater than `other`.
    ///
    /// For BC1 this selects between the four colour and the three colour plus transparent mode.
    #[inline]
    pub const fn greater_than(&self, other: &Self) -> bool {
        self.value > other.value
    }

    /// Converts this [`Color565`] to an opaque [`Color8888`].
    ///
    /// ```
    /// use angel_tex_bcn::color_565::Color565;
    ///
    /// let rgba = Color565::from_rgb(255, 0, 0).to_color_8888();
    /// assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (255, 0, 0, 255));
    /// ```
    #[inline]
    pub const fn to_color_8888(&self) -> Color8888 {
        Color8888::new(self.red(), self.green(), self.blue(), 255)
    }
}

/// Blends two opaque colours as `(a * weight_a + b * weight_b) / (weight_a + weight_b)`,
/// truncating each channel.
#[inline]
pub(crate) const fn blend(a: Color8888, b: Color8888, weight_a: u32, weight_b: u32) -> Color8888 {
    let total = weight_a + weight_b;
    Color8888::new(
        ((a.r as u32 * weight_a + b.r as u32 * weight_b) / total) as u8,
        ((a.g as u32 * weight_a + b.g as u32 * weight_b) / total) as u8,
        ((a.b as u32 * weight_a + b.b as u32 * weight_b) / total) as u8,
        255,
    )
}
