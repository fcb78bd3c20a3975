//! Text Box Widget: Wrapped lines with a typewriter reveal and line input.
//!
//! The box owns a [`LineBuffer`] for its text and a [`Surface`] to draw
//! on. Scripted output goes in through [`TextBox::append`] and is shown
//! either at once ([`TextBox::reveal_all`]) or a few characters per frame
//! ([`TextBox::advance_reveal`]). Interactive input goes in through
//! [`TextBox::handle_key`] and is always shown at once.
//!
//! # Example
//!
//! ```
//! use typebox::{KeyCode, KeyPress, TextBox, TextBoxConfig};
//!
//! let mut text_box: TextBox = TextBox::new(TextBoxConfig::terminal(40, 4)).unwrap();
//! text_box.append("Name? ");
//! while !text_box.is_reveal_complete() {
//!     text_box.advance_reveal(1);
//! }
//!
//! text_box.begin_capture();
//! for key in [KeyPress::char('B'), KeyPress::char('o'), KeyPress::new(KeyCode::Enter)] {
//!     text_box.handle_key(Some(&key), KeyCode::Enter);
//! }
//! assert!(!text_box.is_awaiting_delimiter());
//! assert_eq!(text_box.get_last_line(), "Name? Bo");
//! ```

use super::lines::LineBuffer;
use crate::actor::{KeyCode, KeyPress};
use crate::buffer::Buffer;
use crate::config::TextBoxConfig;
use crate::error::TextBoxError;
use crate::surface::{measure_width, Font, Surface};
use tracing::{debug, trace};

/// A bounded-height text display with typewriter reveal and line input.
///
/// Generic over the surface it draws on; the default is the terminal
/// [`Buffer`].
#[derive(Debug)]
pub struct TextBox<S: Surface = Buffer> {
    /// Configuration the box was built from.
    config: TextBoxConfig,
    /// Font derived from the config.
    font: Font,
    /// Full, revealed, and committed text.
    lines: LineBuffer,
    /// Set by the driver before capture, cleared on the delimiter key.
    awaiting_delimiter: bool,
    /// Backing surface, exclusively owned.
    surface: S,
    /// Needs redraw flag.
    dirty: bool,
}

impl<S: Surface> TextBox<S> {
    /// Create a text box from a configuration.
    ///
    /// Fails with [`TextBoxError::InvalidConfig`] when the geometry cannot
    /// hold a line of text.
    pub fn new(config: TextBoxConfig) -> Result<Self, TextBoxError> {
        let max_lines = config.max_lines()?;
        let mut lines = LineBuffer::new(max_lines);
        lines.commit(&config.initial_text);
        lines.reveal_all();

        debug!(
            width = config.width,
            height = config.height,
            font_size = config.font_size,
            max_lines,
            centered = config.centered,
            "text box created"
        );

        let mut surface = S::blank(config.width, config.height);
        surface.fill(config.background);

        Ok(Self {
            font: config.font(),
            surface,
            config,
            lines,
            awaiting_delimiter: false,
            dirty: true,
        })
    }

    /// Replace geometry, colours, and font.
    ///
    /// The backing surface is replaced wholesale and the text is trimmed
    /// to the new capacity. `initial_text` is ignored; the current text
    /// stays. On error the box is left unchanged.
    pub fn reconfigure(&mut self, config: TextBoxConfig) -> Result<(), TextBoxError> {
        let max_lines = config.max_lines()?;
        let dropped = self.lines.set_max_lines(max_lines);
        self.surface = S::blank(config.width, config.height);
        self.surface.fill(config.background);
        self.font = config.font();
        self.config = config;
        self.dirty = true;
        debug!(max_lines, dropped, "text box reconfigured");
        Ok(())
    }

    /// The configuration in use.
    pub const fn config(&self) -> &TextBoxConfig {
        &self.config
    }

    /// The font in use.
    pub const fn font(&self) -> &Font {
        &self.font
    }

    /// Maximum number of lines the box displays.
    pub const fn max_lines(&self) -> usize {
        self.lines.max_lines()
    }

    /// The backing surface, as of the last [`render`](Self::render).
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Append scripted output and commit it.
    ///
    /// The new text is not revealed; call [`reveal_all`](Self::reveal_all)
    /// or [`advance_reveal`](Self::advance_reveal).
    pub fn append(&mut self, text: &str) {
        let dropped = self.lines.commit(text);
        if dropped > 0 {
            debug!(dropped, "trimmed head lines on append");
        }
        self.dirty = true;
    }

    /// Replace the whole text and commit it.
    pub fn set_output(&mut self, text: &str) {
        self.lines.replace(text);
        self.dirty = true;
    }

    /// The full text, revealed or not.
    pub fn output(&self) -> String {
        self.lines.full_text()
    }

    /// The revealed text.
    pub fn revealed(&self) -> String {
        self.lines.revealed_text()
    }

    /// Reveal the whole text at once.
    pub fn reveal_all(&mut self) {
        if !self.lines.is_fully_revealed() {
            self.lines.reveal_all();
            self.dirty = true;
        }
    }

    /// Reveal up to `count` more characters.
    ///
    /// Returns how many were revealed; 0 once typing is complete.
    pub fn advance_reveal(&mut self, count: usize) -> usize {
        let revealed = self.lines.reveal(count);
        if revealed > 0 {
            self.dirty = true;
        }
        revealed
    }

    /// Check whether the revealed text matches the full text.
    pub const fn is_reveal_complete(&self) -> bool {
        self.lines.is_fully_revealed()
    }

    /// Start a keyboard capture phase.
    pub const fn begin_capture(&mut self) {
        self.awaiting_delimiter = true;
    }

    /// Check whether the delimiter key is still awaited.
    pub const fn is_awaiting_delimiter(&self) -> bool {
        self.awaiting_delimiter
    }

    /// Apply one polled key, or nothing, for this frame.
    ///
    /// Printable characters, Enter, and Backspace edit the text; Backspace
    /// only erases input typed since the last commit. A key equal to
    /// `delimiter` then ends the capture phase, whether or not it also
    /// edited the text. The text is always fully revealed afterwards.
    pub fn handle_key(&mut self, key: Option<&KeyPress>, delimiter: KeyCode) {
        if let Some(key) = key {
            trace!(?key, "key");
            match key.code {
                KeyCode::Char(c) if !key.modifiers.control && !key.modifiers.alt => {
                    // Shift arrives already applied to `c`.
                    self.type_char(c);
                }
                KeyCode::Enter => self.type_char('\n'),
                KeyCode::Backspace => {
                    if self.lines.erase_typed().is_some() {
                        self.dirty = true;
                    }
                }
                _ => {}
            }

            if key.code == delimiter && self.awaiting_delimiter {
                debug!(?delimiter, "delimiter received");
                self.awaiting_delimiter = false;
            }
        }

        self.reveal_all();
    }

    fn type_char(&mut self, c: char) {
        let dropped = self.lines.type_char(c);
        if dropped > 0 {
            debug!(dropped, "trimmed head lines on input");
        }
        self.dirty = true;
    }

    /// Lines of the full text.
    pub fn full_lines(&self) -> Vec<&str> {
        self.lines.full_lines()
    }

    /// Lines of the revealed text.
    pub fn lines(&self) -> Vec<&str> {
        self.lines.revealed_lines()
    }

    /// Revealed lines `start..=end`.
    pub fn get_lines(&self, start: usize, end: usize) -> Result<Vec<&str>, TextBoxError> {
        let lines = self.lines();
        if end >= lines.len() {
            return Err(TextBoxError::IndexOutOfRange {
                start,
                end,
                available: lines.len(),
            });
        }
        if start > end {
            return Ok(Vec::new());
        }
        Ok(lines[start..=end].to_vec())
    }

    /// The last `n` revealed lines.
    pub fn get_last_lines(&self, n: usize) -> Result<Vec<&str>, TextBoxError> {
        let lines = self.lines();
        let available = lines.len();
        if n > available {
            return Err(TextBoxError::IndexOutOfRange {
                start: 0,
                end: n - 1,
                available,
            });
        }
        Ok(lines[available - n..].to_vec())
    }

    /// The last revealed line; `""` when nothing is revealed.
    pub fn get_last_line(&self) -> &str {
        self.lines().last().copied().unwrap_or_default()
    }

    /// Check if the box needs to be rendered again.
    pub const fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Draw the revealed lines onto the surface.
    ///
    /// Centered mode measures every line on every call.
    pub fn render(&mut self) {
        let Self {
            config,
            font,
            lines,
            surface,
            ..
        } = self;

        surface.fill(config.background);

        let half_width = config.width / 2;
        let mut baseline = 0u16;
        for line in lines.revealed_lines() {
            baseline = baseline.saturating_add(font.size);
            let x = if config.centered {
                half_width.saturating_sub(measure_width::<S>(font, line) / 2)
            } else {
                0
            };
            surface.draw_string(line, x, baseline, font, config.text_color);
        }

        self.dirty = false;
    }
}
