use crate::consts;
use crate::game::{Bounds, Game};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    crossterm::terminal::enable_raw_mode,
    layout::Position,
    Terminal, TerminalOptions, Viewport,
};
use std::io::{self, Stdout};
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};

/// Something a game can be drawn on
pub(crate) trait Renderer {
    /// Replace whatever was drawn last with the current state of `game`
    fn draw_game<R>(&mut self, game: &Game<R>) -> io::Result<()>;
}

/// Draws frames on a ratatui terminal
#[derive(Debug)]
pub(crate) struct Screen<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> Screen<B> {
    pub(crate) fn new(terminal: Terminal<B>) -> Screen<B> {
        Screen { terminal }
    }

    #[cfg(test)]
    pub(crate) fn backend(&self) -> &B {
        self.terminal.backend()
    }
}

impl Screen<CrosstermBackend<Stdout>> {
    /// Put the terminal in raw mode and reserve enough lines below the cursor
    /// for a frame of a `bounds`-sized grid.  Raw mode is turned off again if
    /// the viewport cannot be set up.
    pub(crate) fn enter(bounds: Bounds) -> io::Result<Self> {
        if install_panic_hook() {
            tracing::debug!("Installed terminal-restoring panic hook");
        }
        enable_raw_mode()?;
        let height = bounds.height().saturating_add(consts::FRAME_EXTRA_LINES);
        let backend = CrosstermBackend::new(io::stdout());
        let terminal = inline_terminal(backend, height, ratatui::try_restore)?;
        Ok(Screen::new(terminal))
    }

    /// Leave raw mode, with the cursor on the last line of the final frame so
    /// that later output appears beneath it
    pub(crate) fn leave(mut self) -> io::Result<()> {
        let area = self.terminal.get_frame().area();
        let r = self
            .terminal
            .set_cursor_position(Position::new(0, area.bottom().saturating_sub(1)))
            .and_then(|()| self.terminal.show_cursor());
        ratatui::try_restore()?;
        r
    }
}

/// Create a terminal drawing into the `height` lines below the cursor.  On
/// failure, `restore` is called before the error is returned.
fn inline_terminal<B, F>(backend: B, height: u16, restore: F) -> io::Result<Terminal<B>>
where
    B: Backend,
    F: FnOnce() -> io::Result<()>,
{
    let options = TerminalOptions {
        viewport: Viewport::Inline(height),
    };
    Terminal::with_options(backend, options).or_else(|e| {
        if let Err(re) = restore() {
            tracing::warn!(error = %re, "Failed to restore terminal");
        }
        Err(e)
    })
}

/// Make panics restore the terminal before the panic message is printed.
/// Only the first call installs the hook; returns whether this call did.
fn install_panic_hook() -> bool {
    if PANIC_HOOK_INSTALLED.swap(true, Ordering::AcqRel) {
        return false;
    }
    let hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        ratatui::restore();
        hook(info);
    }));
    true
}

static PANIC_HOOK_INSTALLED: AtomicBool = AtomicBool::new(false);

impl<B: Backend> Renderer for Screen<B> {
    fn draw_game<R>(&mut self, game: &Game<R>) -> io::Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(game, frame.area()))?;
        Ok(())
    }
}
