//! Surface: The drawable the text box renders onto.
//!
//! A surface is a fixed-size pixel grid that can be filled, drawn on with
//! a font, and probed pixel by pixel. [`measure_width`] is built purely on
//! those three operations, so it works for any backend: it rasterizes the
//! text off-screen and looks for the rightmost inked column.

use crate::buffer::Rgb;
use serde::{Deserialize, Serialize};

/// A font: family name plus size in surface pixels.
///
/// The size doubles as the line height of the text box.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Font {
    /// Font family name.
    pub family: String,
    /// Font size in pixels.
    pub size: u16,
}

impl Font {
    /// Create a new font.
    pub fn new(family: impl Into<String>, size: u16) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

/// A drawable pixel grid.
pub trait Surface {
    /// Create a blank, ink-free surface of the given size.
    fn blank(width: u16, height: u16) -> Self
    where
        Self: Sized;

    /// Surface width in pixels.
    fn width(&self) -> u16;

    /// Surface height in pixels.
    fn height(&self) -> u16;

    /// Paint the whole surface with `color`, erasing any ink.
    fn fill(&mut self, color: Rgb);

    /// Draw `text` with its left edge at `x` and its baseline at `baseline`.
    fn draw_string(&mut self, text: &str, x: u16, baseline: u16, font: &Font, color: Rgb);

    /// Ink colour at (x, y), or `None` where no glyph covers the pixel.
    fn pixel(&self, x: u16, y: u16) -> Option<Rgb>;
}

/// Measure the rendered width of `text` in `font`, in pixels.
///
/// Brute force: the text is drawn onto a scratch surface wide enough for
/// `max(font.size, 2)` pixels per character, then columns are scanned
/// right to left, sampling every `font.size / 4` rows upward from the
/// baseline, until one holds ink. Expensive; call it at setup time or for
/// centering, not in tight loops.
pub fn measure_width<S: Surface>(font: &Font, text: &str) -> u16 {
    if text.is_empty() || font.size == 0 {
        return 0;
    }

    let per_char = usize::from(font.size.max(2));
    let max_width = text.chars().count().saturating_mul(per_char);
    let max_width = u16::try_from(max_width).unwrap_or(u16::MAX);

    let mut scratch = S::blank(max_width, font.size);
    scratch.draw_string(text, 0, font.size, font, Rgb::WHITE);

    let stride = usize::from((font.size / 4).max(1));
    (0..max_width)
        .rev()
        .find(|&x| {
            (0..font.size)
                .rev()
                .step_by(stride)
                .any(|y| scratch.pixel(x, y).is_some())
        })
        .map_or(0, |x| x + 1)
}


#[cfg(test)]
mod tests {
    use super::testing::BlockSurface;
    use super::*;
    use crate::buffer::Buffer;

    #[test]
    fn test_measure_empty_is_zero() {
        let font = Font::new("Times New Roman", 25);
        assert_eq!(measure_width::<BlockSurface>(&font, ""), 0);
        assert_eq!(measure_width::<Buffer>(&font, ""), 0);
    }

    #[test]
    fn test_measure_block_font() {
        let font = Font::new("Times New Roman", 25);
        assert_eq!(measure_width::<BlockSurface>(&font, "hi"), 30);
        assert_eq!(measure_width::<BlockSurface>(&font, "door"), 60);
    }

    #[test]
    fn test_measure_ignores_trailing_spaces() {
        let font = Font::new("Times New Roman", 25);
        assert_eq!(measure_width::<BlockSurface>(&font, "hi  "), 30);
        assert_eq!(measure_width::<BlockSurface>(&font, "   "), 0);
    }

    #[test]
    fn test_measure_cell_grid() {
        let font = Font::new("Mono", 1);
        assert_eq!(measure_width::<Buffer>(&font, "hello"), 5);
        assert_eq!(measure_width::<Buffer>(&font, "日本"), 4);
    }

    #[test]
    fn test_measure_cell_grid_tall_font() {
        // Glyphs sit on the baseline row; sampling starts there.
        let font = Font::new("Mono", 8);
        assert_eq!(measure_width::<Buffer>(&font, "abc"), 3);
    }

    #[test]
    fn test_measure_zero_size_font() {
        let font = Font::new("Mono", 0);
        assert_eq!(measure_width::<Buffer>(&font, "abc"), 0);
    }
}
