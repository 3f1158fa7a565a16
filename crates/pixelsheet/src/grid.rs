//! Pixel grid to hex color grid.

use std::collections::HashSet;
use std::ops::Index;

use image::{Rgb, RgbImage};

/// Format a pixel as a lowercase `#rrggbb` string.
#[inline]
pub fn rgb_to_hex(Rgb([r, g, b]): Rgb<u8>) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

/// Parse a `#rrggbb` string (either case). Returns `None` for anything else.
pub fn hex_to_rgb(hex: &str) -> Option<Rgb<u8>> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(Rgb([(value >> 16) as u8, (value >> 8) as u8, value as u8]))
}

/// Row-major grid of `#rrggbb` cell colors, indexed as `grid[y][x]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexGrid {
    width: usize,
    height: usize,
    cells: Vec<String>,
}

impl HexGrid {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Color of the cell at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> Option<&str> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(&self.cells[y * self.width + x])
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[String]> + '_ {
        self.cells.chunks(self.width.max(1))
    }

    pub fn distinct_colors(&self) -> usize {
        self.cells.iter().collect::<HashSet<_>>().len()
    }
}

impl Index<usize> for HexGrid {
    type Output = [String];

    fn index(&self, y: usize) -> &[String] {
        assert!(y < self.height, "row {y} out of range for height {}", self.height);
        &self.cells[y * self.width..(y + 1) * self.width]
    }
}

/// Map every pixel of `image` to its hex color, keeping pixel coordinates.
pub fn encode(image: &RgbImage) -> HexGrid {
    HexGrid {
        width: image.width() as usize,
        height: image.height() as usize,
        cells: image.pixels().map(|p| rgb_to_hex(*p)).collect(),
    }
}
