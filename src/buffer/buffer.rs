//! Buffer: A grid of cells representing a terminal surface.
//!
//! The buffer uses contiguous memory allocation for cache efficiency.
//! Cells are stored in row-major order.

use super::cell::{Cell, Rgb};
use crate::surface::{Font, Surface};
use unicode_segmentation::UnicodeSegmentation;

/// A grid of cells.
///
/// The buffer stores cells in a contiguous `Vec` for cache efficiency.
/// Access is in row-major order: `index = y * width + x`.
///
/// As a [`Surface`], one cell is one pixel and every glyph is one row tall,
/// sitting on the row directly above the baseline it is drawn at.
#[derive(Clone, PartialEq, Eq)]
pub struct Buffer {
    /// Contiguous cell storage (row-major order).
    cells: Vec<Cell>,
    /// Width in columns.
    width: u16,
    /// Height in rows.
    height: u16,
}

impl Buffer {
    /// Create a new buffer with the given dimensions.
    ///
    /// All cells are initialized to [`Cell::EMPTY`].
    ///
    /// # Panics
    /// Panics if width or height is 0.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "Buffer dimensions must be non-zero");
        let size = (width as usize) * (height as usize);
        Self {
            cells: vec![Cell::EMPTY; size],
            width,
            height,
        }
    }

    /// Get the buffer width.
    #[inline]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the buffer height.
    #[inline]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Get a reference to the underlying cell slice.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Convert (x, y) coordinates to a linear index.
    ///
    /// Returns `None` if coordinates are out of bounds.
    #[inline]
    pub fn index_of(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize) * (self.width as usize) + (x as usize))
        } else {
            None
        }
    }

    /// Get a reference to a cell at (x, y).
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index_of(x, y).map(|i| &self.cells[i])
    }

    /// Set a cell at (x, y).
    ///
    /// Returns `false` if coordinates are out of bounds.
    #[inline]
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) -> bool {
        if let Some(idx) = self.index_of(x, y) {
            self.cells[idx] = cell;
            true
        } else {
            false
        }
    }

    /// Paint every cell blank with the given background.
    pub fn fill(&mut self, bg: Rgb) {
        self.cells.fill(Cell::blank(bg));
    }

    /// Draw text on row `y` starting at column `x`.
    ///
    /// Each cell keeps the background already painted under it. Text past
    /// the right edge is clipped. Returns the number of columns advanced.
    pub fn draw_text(&mut self, x: u16, y: u16, text: &str, fg: Rgb) -> u16 {
        if y >= self.height {
            return 0;
        }

        let mut col = x;
        for grapheme in text.graphemes(true) {
            if col >= self.width {
                break;
            }
            let Some(idx) = self.index_of(col, y) else {
                break;
            };
            let bg = self.cells[idx].bg();
            let cell = Cell::from_grapheme(grapheme).with_fg(fg).with_bg(bg);
            let width = cell.display_width();
            self.cells[idx] = cell;

            if width == 2 {
                if let Some(next) = self.index_of(col + 1, y) {
                    let bg = self.cells[next].bg();
                    self.cells[next] = Cell::wide_continuation().with_fg(fg).with_bg(bg);
                }
            }

            col = col.saturating_add(u16::from(width));
        }
        col - x
    }

    /// Collect the graphemes of row `y` into a string.
    ///
    /// Continuation cells contribute nothing, so wide glyphs appear once.
    pub fn row_text(&self, y: u16) -> String {
        self.rows()
            .nth(y as usize)
            .map(|row| row.iter().map(Cell::grapheme).collect())
            .unwrap_or_default()
    }

    /// Get an iterator over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width as usize)
    }
}

impl Surface for Buffer {
    fn blank(width: u16, height: u16) -> Self {
        Self::new(width.max(1), height.max(1))
    }

    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn fill(&mut self, color: Rgb) {
        Self::fill(self, color);
    }

    fn draw_string(&mut self, text: &str, x: u16, baseline: u16, _font: &Font, color: Rgb) {
        if let Some(row) = baseline.checked_sub(1) {
            self.draw_text(x, row, text, color);
        }
    }

    fn pixel(&self, x: u16, y: u16) -> Option<Rgb> {
        self.get(x, y).filter(|cell| cell.has_ink()).map(Cell::fg)
    }
}

impl std::fmt::Debug for Buffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_new() {
        let buffer = Buffer::new(80, 24);
        assert_eq!(buffer.width(), 80);
        assert_eq!(buffer.height(), 24);
        assert_eq!(buffer.cells().len(), 80 * 24);
    }

    #[test]
    #[should_panic]
    fn test_buffer_zero_width() {
        Buffer::new(0, 24);
    }

    #[test]
    fn test_buffer_bounds() {
        let mut buffer = Buffer::new(80, 24);
        assert!(buffer.get(79, 23).is_some());
        assert!(buffer.get(80, 23).is_none());
        assert!(!buffer.set(0, 24, Cell::EMPTY));
    }

    #[test]
    fn test_draw_text_keeps_background() {
        let mut buffer = Buffer::new(10, 2);
        let bg = Rgb::new(0, 0, 128);
        buffer.fill(bg);

        let used = buffer.draw_text(2, 1, "hi", Rgb::WHITE);
        assert_eq!(used, 2);
        let cell = buffer.get(2, 1).unwrap();
        assert_eq!(cell.grapheme(), "h");
        assert_eq!(cell.bg(), bg);
        assert_eq!(buffer.row_text(1), "  hi      ");
    }

    #[test]
    fn test_draw_text_clips_at_edge() {
        let mut buffer = Buffer::new(4, 1);
        let used = buffer.draw_text(2, 0, "hello", Rgb::WHITE);
        assert_eq!(used, 2);
        assert_eq!(buffer.row_text(0), "  he");
    }

    #[test]
    fn test_draw_text_wide_glyph() {
        let mut buffer = Buffer::new(6, 1);
        let used = buffer.draw_text(0, 0, "日本", Rgb::WHITE);
        assert_eq!(used, 4);
        assert!(buffer.get(1, 0).unwrap().is_wide_continuation());
        assert_eq!(buffer.row_text(0), "日本  ");
    }

    #[test]
    fn test_surface_draws_above_baseline() {
        let mut buffer = Buffer::new(10, 3);
        let font = Font::new("Mono", 1);
        buffer.draw_string("ab", 0, 2, &font, Rgb::new(1, 2, 3));

        assert_eq!(buffer.pixel(0, 1), Some(Rgb::new(1, 2, 3)));
        assert_eq!(buffer.pixel(0, 2), None);
        assert_eq!(buffer.pixel(2, 1), None);

        // Baseline 0 has no row above it.
        buffer.draw_string("zz", 0, 0, &font, Rgb::WHITE);
        assert_eq!(buffer.row_text(0), "          ");
    }

    #[test]
    fn test_fill_clears_ink() {
        let mut buffer = Buffer::new(5, 1);
        buffer.draw_text(0, 0, "abc", Rgb::WHITE);
        Surface::fill(&mut buffer, Rgb::BLACK);
        assert!((0..5).all(|x| buffer.pixel(x, 0).is_none()));
    }
}
