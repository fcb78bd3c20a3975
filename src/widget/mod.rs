//! Text Box Widget: Typewriter-style text display with line input.
//!
//! The widget has two layers:
//!
//! 1. [`LineBuffer`] keeps the text as logical lines with a revealed
//!    prefix and a committed mark, and trims the oldest lines once the
//!    box is full.
//! 2. [`TextBox`] adds geometry, key handling, and rendering onto a
//!    [`Surface`](crate::surface::Surface).

mod lines;
mod text_box;

pub use lines::LineBuffer;
pub use text_box::TextBox;
