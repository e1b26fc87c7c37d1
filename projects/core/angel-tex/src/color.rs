//! # RGBA8888 colour
//!
//! [`Color8888`] is the decoded form of every pixel the codec reads or writes, no matter which
//! [`TextureFormat`] stores it. It is also the entry type of texture palettes.
//!
//! [`TextureFormat`]: crate::TextureFormat

/// Represents a single RGBA8888 pixel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color8888 {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255)
    pub a: u8,
}

impl Color8888 {
    /// Fully transparent black; the value unused palette slots are filled with.
    pub const TRANSPARENT_BLACK: Self = Self::new(0, 0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);

    /// Constructs a new [`Color8888`] from the specified red, green, blue, and alpha components.
    ///
    /// Each parameter represents the intensity of its corresponding colour channel (0–255).
    ///
    /// # Examples
    ///
    /// ```
    /// use angel_tex::Color8888;
    ///
    /// let pixel = Color8888::new(255, 0, 0, 255);
    /// assert_eq!(pixel.r, 255);
    /// assert_eq!(pixel.g, 0);
    /// assert_eq!(pixel.b, 0);
    /// assert_eq!(pixel.a, 255);
    /// ```
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Constructs an opaque grey with all three colour channels set to `value`.
    #[inline]
    pub const fn grey(value: u8, alpha: u8) -> Self {
        Self::new(value, value, value, alpha)
    }

    /// Returns the same colour with alpha forced to 255.
    #[inline]
    pub const fn opaque(self) -> Self {
        self.with_alpha(255)
    }

    /// Returns the same colour with the alpha channel replaced.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Integer average of the three colour channels, rounded down.
    ///
    /// ```
    /// use angel_tex::Color8888;
    ///
    /// assert_eq!(Color8888::new(10, 20, 31, 0).average(), 20);
    /// ```
    #[inline]
    pub const fn average(&self) -> u8 {
        ((self.r as u16 + self.g as u16 + self.b as u16) / 3) as u8
    }

    /// Reads a colour from 4 bytes in R, G, B, A order.
    #[inline]
    pub const fn from_rgba_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Returns the colour as 4 bytes in R, G, B, A order.
    #[inline]
    pub const fn to_rgba_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Reads a colour from 4 bytes in B, G, R, A order, as stored in TEX palettes.
    #[inline]
    pub const fn from_bgra_bytes(bytes: [u8; 4]) -> Self {
        Self::new(bytes[2], bytes[1], bytes[0], bytes[3])
    }

    /// Returns the colour as 4 bytes in B, G, R, A order, as stored in TEX palettes.
    #[inline]
    pub const fn to_bgra_bytes(self) -> [u8; 4] {
        [self.b, self.g, self.r, self.a]
    }
}
