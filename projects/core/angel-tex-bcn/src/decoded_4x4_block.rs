//! # Decoded 4x4 Block
//!
//! [`Decoded4x4Block`] is the decompressed form of a single DXT block. The pixels are stored in
//! row-major order:
//!
//! ```text
//! [ 0] [ 1] [ 2] [ 3]
//! [ 4] [ 5] [ 6] [ 7]
//! [ 8] [ 9] [10] [11]
//! [12] [13] [14] [15]
//! ```

use angel_tex::Color8888;

/// Represents a decoded 4x4 block of BC pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded4x4Block {
    /// The 16 pixels in the block (row-major order)
    /// (i.e. `pixels[0]` is top-left, `pixels[3]` is top-right, etc.)
    pub pixels: [Color8888; 16],
}

impl Decoded4x4Block {
    /// Constructs a block where every pixel is `pixel`.
    #[inline]
    pub const fn new(pixel: Color8888) -> Self {
        Self {
            pixels: [pixel; 16],
        }
    }

    /// Pixel at `(x, y)`, both in `0..4`.
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color8888 {
        self.pixels[y * 4 + x]
    }

    /// Replaces the pixel at `(x, y)`, both in `0..4`.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Color8888) {
        self.pixels[y * 4 + x] = pixel;
    }

    /// Whether all 16 pixels are equal.
    pub fn has_identical_pixels(&self) -> bool {
        self.pixels.iter().all(|pixel| *pixel == self.pixels[0])
    }

    /// Copies the block into a row-major RGBA8888 image at block coordinates
    /// `(block_x, block_y)`.
    ///
    /// Pixels falling outside of `width x height` are dropped, so the right and bottom edge
    /// blocks of images whose size is not a multiple of 4 are clipped.
    pub fn write_clipped(
        &self,
        output: &mut [u8],
        width: usize,
        height: usize,
        block_x: usize,
        block_y: usize,
    ) {
        let origin_x = block_x * 4;
        let origin_y = block_y * 4;
        let columns = width.saturating_sub(origin_x).min(4);
        let rows = height.saturating_sub(origin_y).min(4);

        for y in 0..rows {
            let row_start = ((origin_y + y) * width + origin_x) * 4;
            for x in 0..columns {
                let offset = row_start + x * 4;
                output[offset..offset + 4].copy_from_slice(&self.get_pixel(x, y).to_rgba_bytes());
            }
        }
    }
}
