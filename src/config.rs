//! Text box configuration.
//!
//! A [`TextBoxConfig`] fixes the geometry, colours, font, and alignment of
//! a text box. It can be built in code or loaded from TOML; every field is
//! optional in the file and falls back to the default shown below.
//!
//! ```toml
//! width = 800
//! height = 560
//! font_family = "Times New Roman"
//! font_size = 25
//! centered = false
//! initial_text = ""
//! background = { r = 0, g = 0, b = 0 }
//! text_color = { r = 255, g = 255, b = 255 }
//! ```

use crate::buffer::Rgb;
use crate::error::{ConfigError, TextBoxError};
use crate::surface::Font;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Geometry, colours, font, and alignment of a text box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextBoxConfig {
    /// Width in surface pixels.
    pub width: u16,
    /// Height in surface pixels.
    pub height: u16,
    /// Background colour.
    pub background: Rgb,
    /// Text colour.
    pub text_color: Rgb,
    /// Font family name.
    pub font_family: String,
    /// Font size in pixels; also the line height.
    pub font_size: u16,
    /// Center each line horizontally instead of left-aligning.
    ///
    /// Centering measures every line on every render, so it is slow.
    pub centered: bool,
    /// Text shown (and committed) at construction.
    pub initial_text: String,
}

impl Default for TextBoxConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 560,
            background: Rgb::BLACK,
            text_color: Rgb::WHITE,
            font_family: String::from("Times New Roman"),
            font_size: 25,
            centered: false,
            initial_text: String::new(),
        }
    }
}

impl TextBoxConfig {
    /// A box filling a terminal of `cols` x `rows` cells, one line per row.
    pub fn terminal(cols: u16, rows: u16) -> Self {
        Self {
            width: cols,
            height: rows,
            font_family: String::from("Monospace"),
            font_size: 1,
            ..Self::default()
        }
    }

    /// Set the width and height.
    #[must_use]
    pub const fn with_size(mut self, width: u16, height: u16) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background and text colours.
    #[must_use]
    pub const fn with_colors(mut self, background: Rgb, text_color: Rgb) -> Self {
        self.background = background;
        self.text_color = text_color;
        self
    }

    /// Set the font family and size.
    #[must_use]
    pub fn with_font(mut self, family: impl Into<String>, size: u16) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    /// Set center or left alignment.
    #[must_use]
    pub const fn centered(mut self, centered: bool) -> Self {
        self.centered = centered;
        self
    }

    /// Set the initial text.
    #[must_use]
    pub fn with_initial_text(mut self, text: impl Into<String>) -> Self {
        self.initial_text = text.into();
        self
    }

    /// The font described by this config.
    pub fn font(&self) -> Font {
        Font::new(self.font_family.clone(), self.font_size)
    }

    /// Check the geometry and return the line capacity,
    /// `floor(height / font_size)`.
    pub fn max_lines(&self) -> Result<usize, TextBoxError> {
        if self.font_size == 0 {
            return Err(TextBoxError::InvalidConfig(
                "font size must be positive".into(),
            ));
        }
        if self.width == 0 || self.height == 0 {
            return Err(TextBoxError::InvalidConfig(format!(
                "size {}x{} has no area",
                self.width, self.height
            )));
        }
        let lines = usize::from(self.height / self.font_size);
        if lines == 0 {
            return Err(TextBoxError::InvalidConfig(format!(
                "height {} cannot fit one line of font size {}",
                self.height, self.font_size
            )));
        }
        Ok(lines)
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.max_lines()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}
