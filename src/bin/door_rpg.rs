//! Door RPG: A text adventure played inside a typebox text box.

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{bounded, select, tick, Receiver};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use typebox::telemetry::init_tracing;
use typebox::terminal::Screen;
use typebox::{
    Adventure, InputActor, InputEvent, KeyCode, KeyPress, Outcome, TextBox, TextBoxConfig,
};

/// How often the input thread checks for shutdown.
const INPUT_POLL: Duration = Duration::from_millis(10);

/// Play the Door RPG in the terminal
#[derive(Parser, Debug)]
#[command(name = "door_rpg")]
#[command(about = "A tiny text adventure in a typewriter text box", long_about = None)]
#[command(version)]
struct Args {
    /// TOML file describing the text box; defaults to filling the terminal
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Center each line instead of left-aligning
    #[arg(long)]
    centered: bool,

    /// Font size, in terminal rows per line
    #[arg(long, value_name = "ROWS")]
    font_size: Option<u16>,

    /// Milliseconds per frame
    #[arg(long, value_name = "MS", default_value_t = 16)]
    frame_ms: u64,

    /// Seed for the coin flip
    #[arg(long)]
    seed: Option<u64>,

    /// Write diagnostics to this file
    #[arg(long, value_name = "PATH", env = "TYPEBOX_LOG_FILE")]
    log_file: Option<PathBuf>,

    /// Default log level when TYPEBOX_LOG is unset
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Args {
    /// Build the text box config for a terminal of `cols` x `rows`.
    fn text_box_config(&self, cols: u16, rows: u16) -> Result<TextBoxConfig> {
        let mut config = match &self.config {
            Some(path) => TextBoxConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => TextBoxConfig::terminal(cols, rows),
        };
        if self.centered {
            config.centered = true;
        }
        if let Some(size) = self.font_size {
            config.font_size = size;
        }
        config.max_lines()?;
        Ok(config)
    }
}

/// Where a `width` x `height` box sits when centered in the terminal.
const fn origin(width: u16, height: u16, cols: u16, rows: u16) -> (u16, u16) {
    (cols.saturating_sub(width) / 2, rows.saturating_sub(height) / 2)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _telemetry = init_tracing(args.log_file.as_deref(), &args.log_level)
        .context("failed to open log file")?;

    let (cols, rows) = Screen::size().context("failed to query terminal size")?;
    let config = args.text_box_config(cols, rows)?;
    let mut text_box: TextBox = TextBox::new(config)?;

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut adventure = Adventure::new(rng);
    adventure.start(&mut text_box);

    let mut screen = Screen::enter().context("failed to set up terminal")?;
    let (input_tx, input_rx) = bounded::<InputEvent>(64);
    let input = InputActor::spawn(input_tx, INPUT_POLL).context("failed to spawn input thread")?;

    let mut game = Game {
        text_box,
        adventure,
        follow_terminal: args.config.is_none(),
        origin: (0, 0),
        pending: VecDeque::new(),
        force_redraw: true,
    };
    game.origin = origin(
        game.text_box.config().width,
        game.text_box.config().height,
        cols,
        rows,
    );

    let frame = Duration::from_millis(args.frame_ms.max(1));
    let result = game.run(&mut screen, &input_rx, frame);

    input.join();
    drop(screen);

    let outcome = game.adventure.outcome();
    info!(?outcome, "door rpg finished");
    match outcome {
        Some(outcome) if outcome.is_win() => println!("You won the Door RPG."),
        Some(Outcome::Refused | Outcome::Eaten) => println!("You lost the Door RPG."),
        _ => {}
    }
    result
}

/// The frame loop's state.
struct Game {
    text_box: TextBox,
    adventure: Adventure<StdRng>,
    /// Resize the box with the terminal when no config file fixed its size.
    follow_terminal: bool,
    origin: (u16, u16),
    /// Keys waiting for a stage that wants input.
    pending: VecDeque<KeyPress>,
    force_redraw: bool,
}

impl Game {
    /// Run until the player quits or presses a key after the ending.
    fn run(
        &mut self,
        screen: &mut Screen,
        input_rx: &Receiver<InputEvent>,
        frame: Duration,
    ) -> Result<()> {
        let ticker = tick(frame);
        let mut frames: u64 = 0;
        let started = Instant::now();

        loop {
            select! {
                recv(input_rx) -> event => match event {
                    Ok(InputEvent::Key(key)) => {
                        if key.code == KeyCode::Esc || key.is_interrupt() {
                            info!("quit requested");
                            break;
                        }
                        if self.adventure.outcome().is_some() && self.text_box.is_reveal_complete() {
                            break;
                        }
                        self.pending.push_back(key);
                    }
                    Ok(InputEvent::Resize { width, height }) => self.resize(screen, width, height)?,
                    Ok(InputEvent::Error(message)) => warn!(%message, "input error"),
                    Ok(InputEvent::Shutdown) | Err(_) => break,
                },
                recv(ticker) -> _ => {
                    frames += 1;
                    self.frame(screen)?;
                }
            }
        }

        debug!(frames, elapsed = ?started.elapsed(), "frame loop stopped");
        Ok(())
    }

    /// Advance the script one frame and redraw if anything changed.
    fn frame(&mut self, screen: &mut Screen) -> Result<()> {
        let key = if self.adventure.wants_input() {
            self.pending.pop_front()
        } else {
            None
        };
        self.adventure.step(&mut self.text_box, key.as_ref());

        if self.text_box.needs_redraw() || self.force_redraw {
            self.text_box.render();
            let (x, y) = self.origin;
            screen
                .present(self.text_box.surface(), x, y)
                .context("failed to draw frame")?;
            self.force_redraw = false;
        }
        Ok(())
    }

    fn resize(&mut self, screen: &mut Screen, cols: u16, rows: u16) -> Result<()> {
        debug!(cols, rows, "terminal resized");
        if self.follow_terminal {
            let config = self.text_box.config().clone().with_size(cols, rows);
            if let Err(e) = self.text_box.reconfigure(config) {
                warn!(error = %e, "keeping previous size");
            }
        }
        let config = self.text_box.config();
        self.origin = origin(config.width, config.height, cols, rows);
        screen.clear().context("failed to clear screen")?;
        self.force_redraw = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_centers_box() {
        assert_eq!(origin(40, 10, 80, 24), (20, 7));
        assert_eq!(origin(80, 24, 80, 24), (0, 0));
        assert_eq!(origin(100, 30, 80, 24), (0, 0));
    }

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from(["door_rpg", "--centered", "--font-size", "2"]);
        let config = args.text_box_config(80, 24).unwrap();
        assert!(config.centered);
        assert_eq!(config.font_size, 2);
        assert_eq!(config.max_lines().unwrap(), 12);
    }

    #[test]
    fn test_args_reject_oversized_font() {
        let args = Args::parse_from(["door_rpg", "--font-size", "30"]);
        assert!(args.text_box_config(80, 24).is_err());
    }
}
