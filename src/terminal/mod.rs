//! Terminal output: Raw-mode session management and frame encoding.
//!
//! Frames are encoded into one byte buffer and written in a single call,
//! so the terminal never shows a half-drawn box.

mod screen;

pub use screen::{encode_frame, Screen};
