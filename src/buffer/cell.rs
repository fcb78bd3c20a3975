//! Cell: One character-sized pixel of a terminal surface.
//!
//! A cell stores a single grapheme inline (up to 4 UTF-8 bytes), its
//! display width, and a foreground/background colour pair. Graphemes that
//! do not fit inline are replaced by U+FFFD rather than spilled to side
//! storage; the text box never needs more than that.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// True-color RGB representation.
#[derive(Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel (0-255)
    pub r: u8,
    /// Green channel (0-255)
    pub g: u8,
    /// Blue channel (0-255)
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black (0, 0, 0)
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White (255, 255, 255)
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create from a 24-bit hex color (e.g., 0xFF5500).
    #[inline]
    pub const fn from_u32(hex: u32) -> Self {
        Self::new(
            ((hex >> 16) & 0xFF) as u8,
            ((hex >> 8) & 0xFF) as u8,
            (hex & 0xFF) as u8,
        )
    }
}

impl std::fmt::Debug for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    #[inline]
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

bitflags! {
    /// Cell-level flags.
    #[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        /// A visible glyph was drawn here (whitespace never sets this).
        const INK = 0b0000_0001;
        /// This cell is the right half of a wide character.
        const WIDE_CONTINUATION = 0b0000_0010;
    }
}

impl std::fmt::Debug for CellFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single terminal cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// Inline grapheme storage (UTF-8 bytes).
    grapheme: [u8; 4],
    /// Byte length of the grapheme.
    grapheme_len: u8,
    /// Display width (0 = continuation, 1 = normal, 2 = wide).
    display_width: u8,
    /// Foreground color.
    fg: Rgb,
    /// Background color.
    bg: Rgb,
    /// Cell flags.
    flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Cell {
    /// An empty cell: a space, white on black, no ink.
    pub const EMPTY: Self = Self {
        grapheme: [b' ', 0, 0, 0],
        grapheme_len: 1,
        display_width: 1,
        fg: Rgb::WHITE,
        bg: Rgb::BLACK,
        flags: CellFlags::empty(),
    };

    /// Create a blank cell painted with the given background.
    #[inline]
    pub const fn blank(bg: Rgb) -> Self {
        let mut cell = Self::EMPTY;
        cell.bg = bg;
        cell
    }

    /// Create a cell from a grapheme cluster.
    ///
    /// Clusters longer than 4 bytes are stored as U+FFFD. Non-whitespace
    /// graphemes are marked with [`CellFlags::INK`].
    pub fn from_grapheme(s: &str) -> Self {
        let s = if s.len() > 4 { "\u{FFFD}" } else { s };
        let bytes = s.as_bytes();
        let mut grapheme = [0u8; 4];
        grapheme[..bytes.len()].copy_from_slice(bytes);

        let width = u8::try_from(unicode_width::UnicodeWidthStr::width(s)).unwrap_or(2);
        let flags = if s.chars().all(char::is_whitespace) {
            CellFlags::empty()
        } else {
            CellFlags::INK
        };

        Self {
            grapheme,
            // at most 4 after the substitution above
            grapheme_len: u8::try_from(bytes.len()).unwrap_or(4),
            display_width: width,
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            flags,
        }
    }

    /// Create a wide-character continuation cell.
    #[inline]
    pub const fn wide_continuation() -> Self {
        Self {
            grapheme: [0, 0, 0, 0],
            grapheme_len: 0,
            display_width: 0,
            fg: Rgb::WHITE,
            bg: Rgb::BLACK,
            flags: CellFlags::WIDE_CONTINUATION.union(CellFlags::INK),
        }
    }

    /// Get the grapheme as a string slice.
    ///
    /// Continuation cells yield an empty string.
    #[inline]
    pub fn grapheme(&self) -> &str {
        std::str::from_utf8(&self.grapheme[..self.grapheme_len as usize]).unwrap_or("\u{FFFD}")
    }

    /// Check whether a visible glyph covers this cell.
    #[inline]
    pub const fn has_ink(&self) -> bool {
        self.flags.contains(CellFlags::INK)
    }

    /// Check if this is a wide-character continuation.
    #[inline]
    pub const fn is_wide_continuation(&self) -> bool {
        self.flags.contains(CellFlags::WIDE_CONTINUATION)
    }

    /// Get the display width (0, 1, or 2).
    #[inline]
    pub const fn display_width(&self) -> u8 {
        self.display_width
    }

    /// Get the foreground color.
    #[inline]
    pub const fn fg(&self) -> Rgb {
        self.fg
    }

    /// Get the background color.
    #[inline]
    pub const fn bg(&self) -> Rgb {
        self.bg
    }

    /// Get the flags.
    #[inline]
    pub const fn flags(&self) -> CellFlags {
        self.flags
    }

    /// Set the foreground color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_fg(mut self, fg: Rgb) -> Self {
        self.fg = fg;
        self
    }

    /// Set the background color (builder pattern).
    #[inline]
    #[must_use]
    pub const fn with_bg(mut self, bg: Rgb) -> Self {
        self.bg = bg;
        self
    }
}

impl std::fmt::Debug for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cell")
            .field("grapheme", &self.grapheme())
            .field("width", &self.display_width)
            .field("fg", &self.fg)
            .field("bg", &self.bg)
            .field("flags", &self.flags)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_from_tuple() {
        let rgb: Rgb = (255, 128, 0).into();
        assert_eq!(rgb, Rgb::from_u32(0xFF8000));
    }

    #[test]
    fn test_cell_ascii_has_ink() {
        let cell = Cell::from_grapheme("A");
        assert_eq!(cell.grapheme(), "A");
        assert_eq!(cell.display_width(), 1);
        assert!(cell.has_ink());
    }

    #[test]
    fn test_cell_space_has_no_ink() {
        assert!(!Cell::from_grapheme(" ").has_ink());
        assert!(!Cell::EMPTY.has_ink());
        assert!(!Cell::blank(Rgb::WHITE).has_ink());
    }

    #[test]
    fn test_cell_cjk_is_wide() {
        let cell = Cell::from_grapheme("日");
        assert_eq!(cell.display_width(), 2);
    }

    #[test]
    fn test_cell_long_cluster_is_replaced() {
        let cell = Cell::from_grapheme("👨‍👩‍👧");
        assert_eq!(cell.grapheme(), "\u{FFFD}");
        assert!(cell.has_ink());
    }

    #[test]
    fn test_wide_continuation() {
        let cont = Cell::wide_continuation();
        assert!(cont.is_wide_continuation());
        assert!(cont.has_ink());
        assert_eq!(cont.display_width(), 0);
        assert_eq!(cont.grapheme(), "");
    }

    #[test]
    fn test_cell_builder_pattern() {
        let cell = Cell::from_grapheme("X")
            .with_fg(Rgb::new(255, 0, 0))
            .with_bg(Rgb::new(0, 0, 255));
        assert_eq!(cell.fg(), Rgb::new(255, 0, 0));
        assert_eq!(cell.bg(), Rgb::new(0, 0, 255));
    }
}
