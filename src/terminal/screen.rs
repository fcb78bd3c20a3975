//! Screen: Raw-mode terminal session and single-write frame output.

use crate::buffer::{Buffer, Rgb};
use crossterm::{
    cursor, execute,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io::{self, Write};
use tracing::debug;

/// A terminal in raw mode on the alternate screen.
///
/// The terminal is restored when the screen is dropped.
pub struct Screen {
    stdout: io::Stdout,
    /// Reused frame buffer, flushed in one write per frame.
    frame: Vec<u8>,
}

impl Screen {
    /// Enter raw mode and the alternate screen, hiding the cursor.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        debug!("terminal entered raw mode");

        Ok(Self {
            stdout,
            frame: Vec::with_capacity(16 * 1024),
        })
    }

    /// Current terminal size in columns and rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the size cannot be queried.
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }

    /// Erase the whole screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, Clear(ClearType::All))
    }

    /// Draw `buffer` with its top-left corner at column `x`, row `y`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn present(&mut self, buffer: &Buffer, x: u16, y: u16) -> io::Result<()> {
        self.frame.clear();
        encode_frame(buffer, x, y, &mut self.frame);
        self.stdout.write_all(&self.frame)?;
        self.stdout.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Encode a full redraw of `buffer` placed at (`x`, `y`).
///
/// Every row starts with an absolute cursor move. Colour sequences are
/// only emitted when they differ from the previous cell, and attributes
/// are reset at the end.
pub fn encode_frame(buffer: &Buffer, x: u16, y: u16, output: &mut Vec<u8>) {
    let mut last_fg: Option<Rgb> = None;
    let mut last_bg: Option<Rgb> = None;

    for (row, cells) in (0u16..).zip(buffer.rows()) {
        emit_cursor_move(output, x, y.saturating_add(row));

        for cell in cells {
            if cell.is_wide_continuation() {
                continue;
            }
            if last_fg != Some(cell.fg()) {
                emit_fg_color(output, cell.fg());
                last_fg = Some(cell.fg());
            }
            if last_bg != Some(cell.bg()) {
                emit_bg_color(output, cell.bg());
                last_bg = Some(cell.bg());
            }
            output.extend_from_slice(cell.grapheme().as_bytes());
        }
    }

    output.extend_from_slice(b"\x1b[0m");
}

#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    // ANSI uses 1-indexed positions
    let row = u32::from(y) + 1;
    let col = u32::from(x) + 1;

    if row == 1 && col == 1 {
        output.extend_from_slice(b"\x1b[H");
    } else if col == 1 {
        let _ = write!(output, "\x1b[{row}H");
    } else {
        let _ = write!(output, "\x1b[{row};{col}H");
    }
}

#[inline]
fn emit_fg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
}

#[inline]
fn emit_bg_color(output: &mut Vec<u8>, color: Rgb) {
    let _ = write!(output, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_blank_frame() {
        let buffer = Buffer::new(3, 2);
        let mut output = Vec::new();
        encode_frame(&buffer, 0, 0, &mut output);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "\x1b[H\x1b[38;2;255;255;255m\x1b[48;2;0;0;0m   \x1b[2H   \x1b[0m"
        );
    }

    #[test]
    fn test_encode_offsets_and_colour_changes() {
        let mut buffer = Buffer::new(2, 1);
        buffer.draw_text(0, 0, "a", Rgb::new(255, 0, 0));
        let mut output = Vec::new();
        encode_frame(&buffer, 4, 2, &mut output);

        let text = String::from_utf8(output).unwrap();
        assert_eq!(
            text,
            "\x1b[3;5H\x1b[38;2;255;0;0m\x1b[48;2;0;0;0ma\x1b[38;2;255;255;255m \x1b[0m"
        );
    }

    #[test]
    fn test_encode_skips_wide_continuation() {
        let mut buffer = Buffer::new(3, 1);
        buffer.draw_text(0, 0, "日", Rgb::WHITE);
        let mut output = Vec::new();
        encode_frame(&buffer, 0, 0, &mut output);

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("日 "));
        assert_eq!(text.matches('日').count(), 1);
    }
}
