//! Actor Model: Keyboard input on its own thread.
//!
//! The input actor polls the terminal and forwards key presses to the
//! frame loop over a crossbeam channel. The frame loop owns the text box
//! and is the only thread that touches it.
//!
//! ```text
//! ┌──────────────┐     InputEvent      ┌──────────────┐
//! │ Input Thread │ ─────────────────▶  │  Frame Loop  │ ◀── tick
//! └──────────────┘                     └──────────────┘
//! ```

mod messages;
mod input;

pub use messages::{InputEvent, KeyCode, KeyModifiers, KeyPress};
pub use input::InputActor;
