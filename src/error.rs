//! Error types for the text box and its configuration.

use thiserror::Error;

/// Errors raised by [`TextBox`](crate::widget::TextBox) operations.
///
/// Interactive paths (typing, backspace, unknown keys) never fail; only
/// construction and line-range queries do.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextBoxError {
    /// The geometry cannot hold a single line of text.
    #[error("invalid text box configuration: {0}")]
    InvalidConfig(String),

    /// A line query reached past the last available line.
    #[error("line range {start}..={end} out of range ({available} lines available)")]
    IndexOutOfRange {
        /// First requested line.
        start: usize,
        /// Last requested line (inclusive).
        end: usize,
        /// Number of lines currently available.
        available: usize,
    },
}

impl TextBoxError {
    /// Returns whether the error stems from configuration rather than use.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::InvalidConfig(_))
    }
}

/// Errors raised while loading a [`TextBoxConfig`](crate::config::TextBoxConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML for a text box.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The file parsed but describes an unusable text box.
    #[error(transparent)]
    Invalid(#[from] TextBoxError),
}
