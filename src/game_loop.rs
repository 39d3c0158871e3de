use crate::command::Command;
use crate::game::{EndReason, Game};
use crate::input::{InputEvent, InputSource, InputTask};
use crate::render::Renderer;
use rand::Rng;
use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Play `game` to completion, reading keys from `source` on a background
/// thread and moving the snake every `delay`
pub(crate) fn play<R, D, S>(
    game: &mut Game<R>,
    renderer: &mut D,
    source: S,
    delay: Duration,
) -> io::Result<()>
where
    R: Rng,
    D: Renderer,
    S: InputSource + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();
    let input = InputTask::spawn(source, sender)?;
    let r = run(game, renderer, &receiver, delay);
    input.stop();
    r
}

/// Tick `game` until it ends: draw, advance, then spend the rest of the
/// tick applying whatever commands arrive on `events`.  The final state is
/// drawn once more before returning.
///
/// If the input thread reports an error, the game is ended, the final frame
/// is drawn, and the error is returned.
pub(crate) fn run<R, D>(
    game: &mut Game<R>,
    renderer: &mut D,
    events: &Receiver<InputEvent>,
    delay: Duration,
) -> io::Result<()>
where
    R: Rng,
    D: Renderer,
{
    while game.running() {
        renderer.draw_game(game)?;
        game.advance();
        let deadline = Instant::now() + delay;
        while game.running() {
            let wait = deadline.saturating_duration_since(Instant::now());
            match events.recv_timeout(wait) {
                Ok(InputEvent::Command(cmd)) => apply(game, cmd),
                Ok(InputEvent::Failed(e)) => {
                    game.end(EndReason::InputFailed);
                    renderer.draw_game(game)?;
                    return Err(e);
                }
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    thread::sleep(wait);
                    break;
                }
            }
        }
    }
    renderer.draw_game(game)
}

fn apply<R>(game: &mut Game<R>, cmd: Command) {
    match cmd {
        Command::Turn(direction) => game.change_direction(direction),
        Command::Quit => game.end(EndReason::Quit),
    }
}
