use crate::difficulty::Difficulty;
use crate::game::{Bounds, Game, GameState};
use crate::game_loop;
use crate::input::TerminalInput;
use crate::render::Screen;
use std::io::{self, BufRead, Write};
use std::time::Duration;

/// Answer to the replay prompt that starts another game; compared
/// case-insensitively
const REPLAY_ANSWER: &str = "s";

/// The outer loop: pick a difficulty, play, offer another round
#[derive(Debug)]
pub(crate) struct App<I, O> {
    input: I,
    output: O,
    bounds: Bounds,
}

impl<I: BufRead, O: Write> App<I, O> {
    pub(crate) fn new(input: I, output: O, bounds: Bounds) -> App<I, O> {
        App {
            input,
            output,
            bounds,
        }
    }

    /// Run sessions on `console` until the player declines another round or
    /// input runs out
    pub(crate) fn run<C: Console>(mut self, console: &mut C) -> io::Result<()> {
        loop {
            let Some(difficulty) = prompt_difficulty(&mut self.input, &mut self.output)? else {
                break;
            };
            tracing::info!(
                %difficulty,
                width = self.bounds.width(),
                height = self.bounds.height(),
                "Starting game"
            );
            self.output.flush()?;
            let mut game = Game::new(self.bounds);
            console.play(&mut game, difficulty.tick_delay())?;
            report(&mut self.output, &game)?;
            if !prompt_replay(&mut self.input, &mut self.output)? {
                writeln!(self.output, "See you next time!")?;
                break;
            }
        }
        Ok(())
    }
}

/// Somewhere a game can be played to completion
pub(crate) trait Console {
    /// Play `game` until it ends, moving the snake every `delay`
    fn play(&mut self, game: &mut Game, delay: Duration) -> io::Result<()>;
}

/// The real terminal: each game is drawn in an inline viewport and steered by
/// the keyboard
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct TerminalConsole;

impl Console for TerminalConsole {
    /// The terminal is restored before returning, even if the game failed.
    fn play(&mut self, game: &mut Game, delay: Duration) -> io::Result<()> {
        let mut screen = Screen::enter(game.bounds())?;
        let r = game_loop::play(game, &mut screen, TerminalInput::new(), delay);
        let left = screen.leave();
        r.and(left)
    }
}

/// Show the difficulty menu and read choices until a valid one is entered.
/// Returns `None` at end of input.
pub(crate) fn prompt_difficulty<I: BufRead, O: Write>(
    input: &mut I,
    output: &mut O,
) -> io::Result<Option<Difficulty>> {
    writeln!(output, "Choose a difficulty:")?;
    for d in Difficulty::iter() {
        writeln!(output, "{} - {}", d.choice(), d)?;
    }
    loop {
        write!(output, "Option: ")?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        if let Some(d) = Difficulty::from_choice(&line) {
            return Ok(Some(d));
        }
        writeln!(output, "Invalid option.")?;
    }
}

/// Ask whether to play again.  Anything but the yes answer, including end of
/// input, means no.
pub(crate) fn prompt_replay<I: BufRead, O: Write>(input: &mut I, output: &mut O) -> io::Result<bool> {
    write!(output, "\nPlay again? ({REPLAY_ANSWER} = yes, anything else = no): ")?;
    output.flush()?;
    Ok(read_line(input)?.is_some_and(|line| line.trim().eq_ignore_ascii_case(REPLAY_ANSWER)))
}

fn report<O: Write, R>(output: &mut O, game: &Game<R>) -> io::Result<()> {
    writeln!(output)?;
    if let GameState::Over(reason) = game.state() {
        writeln!(output, "{}", reason.message())?;
    }
    writeln!(output, "Game over! Final score: {}", game.score())
}

fn read_line<I: BufRead>(input: &mut I) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
