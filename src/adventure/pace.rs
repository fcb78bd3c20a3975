//! Typing pace: How fast scripted output is typed out.

use crate::surface::Surface;
use crate::widget::TextBox;

/// Reveals `chars_per_step` characters, then waits `frames_between`
/// frames before the next step.
///
/// The first tick after creation types immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingPace {
    frames_between: u32,
    chars_per_step: usize,
    countdown: u32,
}

impl Default for TypingPace {
    fn default() -> Self {
        Self::new(6, 1)
    }
}

impl TypingPace {
    /// Create a pace that types `chars_per_step` characters every
    /// `frames_between + 1` frames.
    pub const fn new(frames_between: u32, chars_per_step: usize) -> Self {
        Self {
            frames_between,
            chars_per_step,
            countdown: 0,
        }
    }

    /// Frames skipped between typing steps.
    pub const fn frames_between(&self) -> u32 {
        self.frames_between
    }

    /// Characters revealed per typing step.
    pub const fn chars_per_step(&self) -> usize {
        self.chars_per_step
    }

    /// Advance one frame. Returns the number of characters revealed.
    pub fn tick<S: Surface>(&mut self, text_box: &mut TextBox<S>) -> usize {
        if self.countdown > 0 {
            self.countdown -= 1;
            return 0;
        }
        self.countdown = self.frames_between;
        text_box.advance_reveal(self.chars_per_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextBoxConfig;

    #[test]
    fn test_default_pace() {
        let pace = TypingPace::default();
        assert_eq!(pace.frames_between(), 6);
        assert_eq!(pace.chars_per_step(), 1);
    }

    #[test]
    fn test_types_then_waits() {
        let mut text_box: TextBox = TextBox::new(TextBoxConfig::terminal(20, 2)).unwrap();
        text_box.append("abc");

        let mut pace = TypingPace::new(2, 1);
        let revealed: Vec<usize> = (0..7).map(|_| pace.tick(&mut text_box)).collect();
        assert_eq!(revealed, vec![1, 0, 0, 1, 0, 0, 1]);
        assert!(text_box.is_reveal_complete());
    }

    #[test]
    fn test_several_chars_per_step() {
        let mut text_box: TextBox = TextBox::new(TextBoxConfig::terminal(20, 2)).unwrap();
        text_box.append("hello");

        let mut pace = TypingPace::new(0, 2);
        assert_eq!(pace.tick(&mut text_box), 2);
        assert_eq!(pace.tick(&mut text_box), 2);
        assert_eq!(pace.tick(&mut text_box), 1);
        assert_eq!(pace.tick(&mut text_box), 0);
        assert_eq!(text_box.revealed(), "hello");
    }
}
