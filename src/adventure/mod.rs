//! Door RPG: A tiny text adventure driven one frame at a time.
//!
//! The script alternates between typing out narration and capturing a
//! line of keyboard input:
//!
//! ```text
//! Intro ─▶ AwaitName ─▶ Greet ─▶ AwaitReaction ─▶ Resolve ─┬─▶ Narrate ─▶ AwaitAnswer ─▶ Verdict ─▶ Narrate ─▶ Done
//!                                                          └─▶ Narrate ─▶ Done (refused)
//! ```
//!
//! [`Greet`](Stage::Greet), [`Resolve`](Stage::Resolve), and
//! [`Verdict`](Stage::Verdict) complete within the frame that reaches them.

mod pace;

pub use pace::TypingPace;

use crate::actor::{KeyCode, KeyPress};
use crate::surface::Surface;
use crate::widget::TextBox;
use rand::Rng;
use tracing::{debug, info};

const WELCOME: &str = "Welcome to the Door RPG!\n Type your name and press Enter to begin:\n";
const ROOM: &str = "!\n You enter a room with a door.\n A man in front of it.\nWhat do you say? Press Tab to finish.\n";
const STEP_ASIDE: &str = "The man moves aside,\n but tells you to be careful.\n Do you enter the room (Type yes/no)?\n";
const REFUSED: &str = "The man refuses to move.\n You lose!";
const EATEN: &str = "You enter the room and get eaten by a lion. \nYou lose!";
const SURVIVED: &str = "You took the advice and survived. \nYou win!";

/// Key that ends the name and answer prompts.
pub const LINE_DELIMITER: KeyCode = KeyCode::Enter;

/// Key that ends the free-form reaction, which may span several lines.
pub const REACTION_DELIMITER: KeyCode = KeyCode::Tab;

/// How a finished adventure ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The man at the door would not move.
    Refused,
    /// The player entered the room.
    Eaten,
    /// The player heeded the warning.
    Survived,
}

impl Outcome {
    /// Check whether the player won.
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Survived)
    }
}

/// What follows a narration once it is fully typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum After {
    /// Ask whether to enter the room.
    AwaitAnswer,
    /// End the adventure.
    Finish(Outcome),
}

/// Position in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Typing out the welcome text.
    Intro,
    /// Capturing the player's name until Enter.
    AwaitName,
    /// Greeting the player by name.
    Greet,
    /// Capturing what the player says until Tab.
    AwaitReaction,
    /// Deciding whether the man steps aside.
    Resolve,
    /// Typing out scripted text.
    Narrate(After),
    /// Capturing yes or no until Enter.
    AwaitAnswer,
    /// Judging the answer.
    Verdict,
    /// The adventure is over.
    Done(Outcome),
}

impl Stage {
    /// Check whether this stage completes within the frame that reaches it.
    const fn is_instant(self) -> bool {
        matches!(self, Self::Greet | Self::Resolve | Self::Verdict)
    }
}

/// The Door RPG script, advanced once per frame.
#[derive(Debug)]
pub struct Adventure<R: Rng> {
    rng: R,
    pace: TypingPace,
    stage: Stage,
}

impl<R: Rng> Adventure<R> {
    /// Create an adventure that flips its coin with `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            pace: TypingPace::default(),
            stage: Stage::Intro,
        }
    }

    /// Use a different typing pace.
    #[must_use]
    pub const fn with_pace(mut self, pace: TypingPace) -> Self {
        self.pace = pace;
        self
    }

    /// Current stage.
    pub const fn stage(&self) -> Stage {
        self.stage
    }

    /// Check whether the current stage consumes key presses.
    pub const fn wants_input(&self) -> bool {
        matches!(
            self.stage,
            Stage::AwaitName | Stage::AwaitReaction | Stage::AwaitAnswer
        )
    }

    /// The outcome, once the adventure is over.
    pub const fn outcome(&self) -> Option<Outcome> {
        match self.stage {
            Stage::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Queue the welcome text.
    pub fn start<S: Surface>(&mut self, text_box: &mut TextBox<S>) {
        info!("door rpg started");
        text_box.append(WELCOME);
    }

    /// Advance one frame, feeding at most one key press.
    ///
    /// Keys are ignored unless [`wants_input`](Self::wants_input) holds.
    pub fn step<S: Surface>(&mut self, text_box: &mut TextBox<S>, key: Option<&KeyPress>) -> Stage {
        let next = self.advance(text_box, key);
        self.transition(next);

        while self.stage.is_instant() {
            let next = self.advance(text_box, None);
            self.transition(next);
        }
        self.stage
    }

    fn transition(&mut self, next: Stage) {
        if next != self.stage {
            info!(from = ?self.stage, to = ?next, "stage");
            self.stage = next;
        }
    }

    fn advance<S: Surface>(&mut self, text_box: &mut TextBox<S>, key: Option<&KeyPress>) -> Stage {
        match self.stage {
            Stage::Intro => self.narrate(text_box, Stage::AwaitName),
            Stage::AwaitName if Self::capture(text_box, key, LINE_DELIMITER) => Stage::Greet,
            Stage::Greet => {
                let greeting = format!("Hey {}{ROOM}", text_box.get_last_line());
                text_box.append(&greeting);
                text_box.reveal_all();
                text_box.begin_capture();
                Stage::AwaitReaction
            }
            Stage::AwaitReaction if Self::capture(text_box, key, REACTION_DELIMITER) => {
                Stage::Resolve
            }
            Stage::Resolve => {
                if !text_box.output().ends_with('\n') {
                    text_box.append("\n");
                }
                if self.rng.gen_bool(0.5) {
                    text_box.append(STEP_ASIDE);
                    Stage::Narrate(After::AwaitAnswer)
                } else {
                    text_box.append(REFUSED);
                    Stage::Narrate(After::Finish(Outcome::Refused))
                }
            }
            Stage::Narrate(After::AwaitAnswer) => self.narrate(text_box, Stage::AwaitAnswer),
            Stage::Narrate(After::Finish(outcome)) => {
                self.narrate(text_box, Stage::Done(outcome))
            }
            Stage::AwaitAnswer if Self::capture(text_box, key, LINE_DELIMITER) => Stage::Verdict,
            Stage::Verdict => {
                let answer = text_box.get_last_line().to_lowercase();
                debug!(%answer, "verdict");
                if answer.contains("yes") {
                    text_box.append(EATEN);
                    Stage::Narrate(After::Finish(Outcome::Eaten))
                } else {
                    text_box.append(SURVIVED);
                    Stage::Narrate(After::Finish(Outcome::Survived))
                }
            }
            Stage::AwaitName | Stage::AwaitReaction | Stage::AwaitAnswer | Stage::Done(_) => {
                self.stage
            }
        }
    }

    /// Type out pending text; once it is all shown, move on to `next`.
    fn narrate<S: Surface>(&mut self, text_box: &mut TextBox<S>, next: Stage) -> Stage {
        if !text_box.is_reveal_complete() {
            self.pace.tick(text_box);
            return self.stage;
        }
        if matches!(next, Stage::AwaitName | Stage::AwaitAnswer) {
            text_box.begin_capture();
        }
        next
    }

    /// Feed one key to the capture; true once the delimiter arrived.
    fn capture<S: Surface>(
        text_box: &mut TextBox<S>,
        key: Option<&KeyPress>,
        delimiter: KeyCode,
    ) -> bool {
        text_box.handle_key(key, delimiter);
        !text_box.is_awaiting_delimiter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TextBoxConfig;
    use rand::rngs::mock::StepRng;

    fn text_box() -> TextBox {
        TextBox::new(TextBoxConfig::terminal(60, 30)).unwrap()
    }

    /// Coin flips that always let the player pass.
    fn passing() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Coin flips that always block the player.
    fn blocking() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn fast<R: Rng>(rng: R) -> Adventure<R> {
        Adventure::new(rng).with_pace(TypingPace::new(0, 1000))
    }

    fn type_line<R: Rng>(adventure: &mut Adventure<R>, text_box: &mut TextBox, text: &str, end: KeyCode) {
        for c in text.chars() {
            adventure.step(text_box, Some(&KeyPress::char(c)));
        }
        adventure.step(text_box, Some(&KeyPress::new(end)));
    }

    fn finish_narration<R: Rng>(adventure: &mut Adventure<R>, text_box: &mut TextBox) -> Stage {
        adventure.step(text_box, None);
        adventure.step(text_box, None)
    }

    #[test]
    fn test_intro_is_typed_out() {
        let mut text_box = text_box();
        let mut adventure = Adventure::new(passing()).with_pace(TypingPace::new(0, 1));
        adventure.start(&mut text_box);
        assert_eq!(adventure.stage(), Stage::Intro);
        assert!(!adventure.wants_input());

        adventure.step(&mut text_box, None);
        assert_eq!(text_box.revealed(), "W");

        // Keys pressed while narrating are ignored.
        adventure.step(&mut text_box, Some(&KeyPress::char('x')));
        assert_eq!(text_box.revealed(), "We");
        assert!(!text_box.output().contains('x'));
    }

    #[test]
    fn test_intro_then_name_capture() {
        let mut text_box = text_box();
        let mut adventure = fast(passing());
        adventure.start(&mut text_box);

        assert_eq!(finish_narration(&mut adventure, &mut text_box), Stage::AwaitName);
        assert!(adventure.wants_input());
        assert!(text_box.is_awaiting_delimiter());
        assert_eq!(
            text_box.get_last_line(),
            " Type your name and press Enter to begin:"
        );
    }

    #[test]
    fn test_greets_by_name() {
        let mut text_box = text_box();
        let mut adventure = fast(passing());
        adventure.start(&mut text_box);
        finish_narration(&mut adventure, &mut text_box);

        type_line(&mut adventure, &mut text_box, "Bob", KeyCode::Enter);
        assert_eq!(adventure.stage(), Stage::AwaitReaction);
        assert!(text_box.is_reveal_complete());
        assert!(text_box.output().contains("Hey Bob!\n You enter a room with a door."));
        assert_eq!(
            text_box.get_last_line(),
            "What do you say? Press Tab to finish."
        );
    }

    #[test]
    fn test_backspace_while_naming() {
        let mut text_box = text_box();
        let mut adventure = fast(passing());
        adventure.start(&mut text_box);
        finish_narration(&mut adventure, &mut text_box);

        adventure.step(&mut text_box, Some(&KeyPress::new(KeyCode::Backspace)));
        assert!(text_box.output().ends_with("begin:\n"));

        adventure.step(&mut text_box, Some(&KeyPress::char('A')));
        adventure.step(&mut text_box, Some(&KeyPress::new(KeyCode::Backspace)));
        type_line(&mut adventure, &mut text_box, "Zed", KeyCode::Enter);
        assert!(text_box.output().contains("Hey Zed!"));
    }

    #[test]
    fn test_reaction_may_span_lines() {
        let mut text_box = text_box();
        let mut adventure = fast(passing());
        adventure.start(&mut text_box);
        finish_narration(&mut adventure, &mut text_box);
        type_line(&mut adventure, &mut text_box, "Bob", KeyCode::Enter);

        type_line(&mut adventure, &mut text_box, "hello", KeyCode::Enter);
        assert_eq!(adventure.stage(), Stage::AwaitReaction);
        type_line(&mut adventure, &mut text_box, "sir", KeyCode::Tab);
        assert_eq!(adventure.stage(), Stage::Narrate(After::AwaitAnswer));
        assert!(text_box.output().contains("hello\nsir\nThe man moves aside,"));
    }

    #[test]
    fn test_pass_then_enter_room_loses() {
        let mut text_box = text_box();
        let mut adventure = fast(passing());
        adventure.start(&mut text_box);
        finish_narration(&mut adventure, &mut text_box);
        type_line(&mut adventure, &mut text_box, "Bob", KeyCode::Enter);
        type_line(&mut adventure, &mut text_box, "please", KeyCode::Tab);

        assert!(!text_box.is_reveal_complete());
        assert_eq!(finish_narration(&mut adventure, &mut text_box), Stage::AwaitAnswer);
        assert_eq!(text_box.get_last_line(), " Do you enter the room (Type yes/no)?");

        type_line(&mut adventure, &mut text_box, "YES", KeyCode::Enter);
        assert_eq!(
            finish_narration(&mut adventure, &mut text_box),
            Stage::Done(Outcome::Eaten)
        );
        assert_eq!(adventure.outcome(), Some(Outcome::Eaten));
        assert_eq!(text_box.get_last_line(), "You lose!");
    }

    #[test]
    fn test_pass_then_decline_wins() {
        let mut text_box = text_box();
        let mut adventure = fast(passing());
        adventure.start(&mut text_box);
        finish_narration(&mut adventure, &mut text_box);
        type_line(&mut adventure, &mut text_box, "Bob", KeyCode::Enter);
        type_line(&mut adventure, &mut text_box, "hi", KeyCode::Tab);
        finish_narration(&mut adventure, &mut text_box);

        type_line(&mut adventure, &mut text_box, "no", KeyCode::Enter);
        finish_narration(&mut adventure, &mut text_box);
        let outcome = adventure.outcome().unwrap();
        assert_eq!(outcome, Outcome::Survived);
        assert!(outcome.is_win());
        assert_eq!(text_box.get_last_line(), "You win!");
    }

    #[test]
    fn test_refused() {
        let mut text_box = text_box();
        let mut adventure = fast(blocking());
        adventure.start(&mut text_box);
        finish_narration(&mut adventure, &mut text_box);
        type_line(&mut adventure, &mut text_box, "Bob", KeyCode::Enter);
        type_line(&mut adventure, &mut text_box, "move", KeyCode::Tab);

        assert_eq!(adventure.stage(), Stage::Narrate(After::Finish(Outcome::Refused)));
        assert_eq!(
            finish_narration(&mut adventure, &mut text_box),
            Stage::Done(Outcome::Refused)
        );
        assert!(!Outcome::Refused.is_win());
        assert!(text_box.output().ends_with("move\nThe man refuses to move.\n You lose!"));

        // Done is terminal.
        assert_eq!(
            adventure.step(&mut text_box, Some(&KeyPress::char('y'))),
            Stage::Done(Outcome::Refused)
        );
        assert!(!adventure.wants_input());
    }

    #[test]
    fn test_resolve_skips_extra_break() {
        let mut text_box = text_box();
        let mut adventure = fast(blocking());
        adventure.start(&mut text_box);
        finish_narration(&mut adventure, &mut text_box);
        type_line(&mut adventure, &mut text_box, "Bob", KeyCode::Enter);

        // Tab with nothing typed: the prompt already ends the line.
        adventure.step(&mut text_box, Some(&KeyPress::new(KeyCode::Tab)));
        assert!(text_box
            .output()
            .ends_with("Press Tab to finish.\nThe man refuses to move.\n You lose!"));
    }
}
