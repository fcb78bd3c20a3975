//! Line buffer: Incrementally maintained text with a revealed prefix.
//!
//! The full text is kept as a list of logical lines (split on `'\n'`), so
//! appends, backspaces, and head trims touch only the ends of the list.
//! The revealed text is a character count into the full text, and the
//! committed mark is another; trimming the head shifts both down, which
//! keeps the revealed text a prefix of the full text at all times.
//!
//! Line views drop trailing empty lines, and an empty view is `[""]`.

use std::collections::VecDeque;

/// Logical lines of text plus reveal and commit marks.
#[derive(Debug, Clone)]
pub struct LineBuffer {
    /// Logical lines; never empty. The last one has no trailing `'\n'`.
    lines: VecDeque<String>,
    /// Total characters in the full text, line breaks included.
    len: usize,
    /// Characters of the full text currently revealed.
    revealed: usize,
    /// Length of the full text at the last commit.
    committed: usize,
    /// Maximum number of visible lines.
    max_lines: usize,
}

impl LineBuffer {
    /// Create an empty buffer holding at most `max_lines` visible lines.
    pub fn new(max_lines: usize) -> Self {
        let mut lines = VecDeque::with_capacity(max_lines + 1);
        lines.push_back(String::new());

        Self {
            lines,
            len: 0,
            revealed: 0,
            committed: 0,
            max_lines: max_lines.max(1),
        }
    }

    /// Total characters in the full text.
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Check if the full text is empty.
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Characters currently revealed.
    pub const fn revealed_len(&self) -> usize {
        self.revealed
    }

    /// Length of the full text at the last commit.
    pub const fn committed_len(&self) -> usize {
        self.committed
    }

    /// Maximum number of visible lines.
    pub const fn max_lines(&self) -> usize {
        self.max_lines
    }

    /// Check whether the whole text is revealed.
    pub const fn is_fully_revealed(&self) -> bool {
        self.revealed == self.len
    }

    /// Check whether the full text ends with a line break.
    pub fn ends_with_newline(&self) -> bool {
        self.lines.len() > 1 && self.lines.back().is_some_and(String::is_empty)
    }

    /// Append text and mark the result as committed.
    ///
    /// Returns the number of lines trimmed from the head.
    pub fn commit(&mut self, text: &str) -> usize {
        self.push_str(text);
        self.committed = self.len;
        self.trim()
    }

    /// Append one typed character and reveal everything.
    ///
    /// Returns the number of lines trimmed from the head.
    pub fn type_char(&mut self, ch: char) -> usize {
        self.push_char(ch);
        self.reveal_all();
        self.trim()
    }

    /// Erase the last typed character, if any was typed since the last
    /// commit. Reveals everything either way.
    ///
    /// Returns the erased character.
    pub fn erase_typed(&mut self) -> Option<char> {
        let erased = if self.len > self.committed {
            self.pop_char()
        } else {
            None
        };
        self.reveal_all();
        erased
    }

    /// Replace the whole text and commit it.
    ///
    /// The revealed prefix survives only as far as it matches the new text.
    pub fn replace(&mut self, text: &str) -> usize {
        let kept = self
            .revealed_text()
            .chars()
            .zip(text.chars())
            .take_while(|(a, b)| a == b)
            .count();

        self.lines.clear();
        self.lines.push_back(String::new());
        self.len = 0;
        self.push_str(text);
        self.committed = self.len;
        self.revealed = kept;
        self.trim()
    }

    /// Reveal the whole text.
    pub const fn reveal_all(&mut self) {
        self.revealed = self.len;
    }

    /// Reveal up to `count` more characters.
    ///
    /// Returns how many were actually revealed.
    pub fn reveal(&mut self, count: usize) -> usize {
        let before = self.revealed;
        self.revealed = self.revealed.saturating_add(count).min(self.len);
        self.revealed - before
    }

    /// Change the line capacity and trim to it.
    pub fn set_max_lines(&mut self, max_lines: usize) -> usize {
        self.max_lines = max_lines.max(1);
        self.trim()
    }

    /// The full text.
    pub fn full_text(&self) -> String {
        let mut text = String::with_capacity(self.len);
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(line);
        }
        text
    }

    /// The revealed prefix of the full text.
    pub fn revealed_text(&self) -> String {
        self.revealed_slices().join("\n")
    }

    /// Line view of the full text.
    pub fn full_lines(&self) -> Vec<&str> {
        visible(self.lines.iter().map(String::as_str).collect())
    }

    /// Line view of the revealed text.
    pub fn revealed_lines(&self) -> Vec<&str> {
        visible(self.revealed_slices())
    }

    /// Number of lines in the full-text view.
    pub fn visible_count(&self) -> usize {
        let trailing = self.lines.iter().rev().take_while(|l| l.is_empty()).count();
        (self.lines.len() - trailing).max(1)
    }

    /// Raw slices of the revealed text, one per logical line reached.
    fn revealed_slices(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut remaining = self.revealed;

        for line in &self.lines {
            let chars = line.chars().count();
            if remaining <= chars {
                let end = line.char_indices().nth(remaining).map_or(line.len(), |(i, _)| i);
                out.push(&line[..end]);
                break;
            }
            out.push(line.as_str());
            // the line and its break
            remaining -= chars + 1;
        }
        out
    }

    fn push_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.push_char(ch);
        }
    }

    fn push_char(&mut self, ch: char) {
        if ch == '\n' {
            self.lines.push_back(String::new());
        } else if let Some(last) = self.lines.back_mut() {
            last.push(ch);
        }
        self.len += 1;
    }

    fn pop_char(&mut self) -> Option<char> {
        let last = self.lines.back_mut()?;
        let popped = match last.pop() {
            Some(ch) => ch,
            None if self.lines.len() > 1 => {
                self.lines.pop_back();
                '\n'
            }
            None => return None,
        };
        self.len -= 1;
        self.revealed = self.revealed.min(self.len);
        self.committed = self.committed.min(self.len);
        Some(popped)
    }

    /// Drop head lines while over capacity, or at capacity with a pending
    /// empty line.
    fn trim(&mut self) -> usize {
        let mut dropped = 0;
        while self.lines.len() > 1 {
            let visible = self.visible_count();
            let over = visible > self.max_lines
                || (visible == self.max_lines && self.ends_with_newline());
            if !over {
                break;
            }
            let Some(head) = self.lines.pop_front() else {
                break;
            };
            let removed = head.chars().count() + 1;
            self.len -= removed;
            self.revealed = self.revealed.saturating_sub(removed);
            self.committed = self.committed.saturating_sub(removed);
            dropped += 1;
        }
        dropped
    }
}

/// Drop trailing empty lines; an empty result becomes `[""]`.
fn visible(mut lines: Vec<&str>) -> Vec<&str> {
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    if lines.is_empty() {
        lines.push("");
    }
    lines
}
