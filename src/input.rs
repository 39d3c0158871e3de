use crate::command::Command;
use crate::consts;
use crossterm::event::{poll, read, KeyEvent};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// A source of key presses that never blocks for long
pub(crate) trait InputSource {
    /// Return the next pending key press, waiting a short while for one to
    /// arrive.  Returns `Ok(None)` if no key was pressed in that time.
    fn try_read_key(&mut self) -> io::Result<Option<KeyEvent>>;
}

/// Key presses read from the terminal via crossterm
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TerminalInput {
    timeout: Duration,
}

impl TerminalInput {
    pub(crate) fn new() -> TerminalInput {
        TerminalInput {
            timeout: consts::KEY_POLL_TIMEOUT,
        }
    }
}

impl InputSource for TerminalInput {
    fn try_read_key(&mut self) -> io::Result<Option<KeyEvent>> {
        if !poll(self.timeout)? {
            return Ok(None);
        }
        Ok(read()?.as_key_press_event())
    }
}

/// Messages sent from the input thread to the game loop
#[derive(Debug)]
pub(crate) enum InputEvent {
    Command(Command),
    Failed(io::Error),
}

/// A background thread that feeds commands from an [`InputSource`] into a
/// channel until told to stop
#[derive(Debug)]
pub(crate) struct InputTask {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl InputTask {
    pub(crate) fn spawn<S>(source: S, sender: Sender<InputEvent>) -> io::Result<InputTask>
    where
        S: InputSource + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name(String::from("input"))
            .spawn(move || forward_keys(source, &sender, &flag))?;
        Ok(InputTask {
            stop,
            handle: Some(handle),
        })
    }

    /// Tell the thread to stop and wait for it to do so
    pub(crate) fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("Input thread panicked");
            }
        }
    }
}

impl Drop for InputTask {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn forward_keys<S: InputSource>(mut source: S, sender: &Sender<InputEvent>, stop: &AtomicBool) {
    tracing::debug!("Input thread started");
    while !stop.load(Ordering::Acquire) {
        match source.try_read_key() {
            Ok(Some(key)) => {
                let Some(cmd) = Command::from_key_event(key) else {
                    continue;
                };
                if sender.send(InputEvent::Command(cmd)).is_err() || cmd == Command::Quit {
                    break;
                }
            }
            Ok(None) => (),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read from terminal");
                let _ = sender.send(InputEvent::Failed(e));
                break;
            }
        }
    }
    tracing::debug!("Input thread stopped");
}
