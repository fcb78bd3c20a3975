//! Buffer module: The terminal cell grid the text box draws onto.
//!
//! This module contains:
//! - [`Cell`]: One character-sized pixel
//! - [`Buffer`]: A grid of cells, implementing [`Surface`](crate::surface::Surface)
//! - [`Rgb`]: True-color representation

mod cell;
#[allow(clippy::module_inception)]
mod buffer;

pub use cell::{Cell, CellFlags, Rgb};
pub use buffer::Buffer;
