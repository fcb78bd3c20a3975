//! # Typebox
//!
//! A bounded-height text box with a typewriter reveal and line input.
//!
//! Typebox shows scripted output a few characters per frame, captures a
//! line of keyboard input until a chosen delimiter key, and keeps only as
//! many lines as fit, dropping the oldest first.
//!
//! ## Core Concepts
//!
//! - **Full vs. revealed text**: appended text is held back until the
//!   driver reveals it, all at once or per frame
//! - **Committed mark**: Backspace can erase typed input but never
//!   scripted output
//! - **Surfaces**: rendering goes through the [`Surface`] trait; the
//!   terminal [`Buffer`] is one implementation
//! - **Frame-driven**: nothing blocks; the driver calls into the box once
//!   per frame from a single thread
//!
//! ## Example
//!
//! ```rust
//! use typebox::{TextBox, TextBoxConfig};
//!
//! let mut text_box: TextBox = TextBox::new(TextBoxConfig::terminal(40, 3)).unwrap();
//! text_box.append("one\ntwo\nthree\nfour");
//! text_box.reveal_all();
//! assert_eq!(text_box.lines(), vec!["two", "three", "four"]);
//!
//! text_box.render();
//! assert_eq!(text_box.surface().row_text(0).trim_end(), "two");
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod actor;
pub mod adventure;
pub mod buffer;
pub mod config;
pub mod error;
pub mod surface;
pub mod telemetry;
pub mod terminal;
pub mod widget;

// Re-exports for convenience
pub use actor::{InputActor, InputEvent, KeyCode, KeyModifiers, KeyPress};
pub use adventure::{Adventure, Outcome, Stage, TypingPace};
pub use buffer::{Buffer, Cell, CellFlags, Rgb};
pub use config::TextBoxConfig;
pub use error::{ConfigError, TextBoxError};
pub use surface::{measure_width, Font, Surface};
pub use widget::{LineBuffer, TextBox};
