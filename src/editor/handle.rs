//! Thread-backed handle that serializes commands to a window.
//!
//! Each open window runs a command loop on its own thread. Commands are queued
//! through an unbounded channel and applied one at a time under the window
//! lock; after each command the loop sends a redraw notice. Snapshot reads and
//! writes from other threads take the same lock, so they always observe a
//! state between two commands.
//!
//! Dropping (or closing) the handle drops the command sender, which ends the
//! loop once the queued commands have been applied.

use super::command::Command;
use super::error::WindowError;
use super::position::Range;
use super::snapshot::WindowState;
use super::window::Window;
use crate::buffer::Source;
use crate::config::WindowOptions;
use std::io::Write;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use tracing::{debug, error, warn};

/// Owner's end of a window running on its command thread.
pub struct WindowHandle {
    name: String,
    window: Arc<Mutex<Window>>,
    sender: Option<Sender<Command>>,
    worker: Option<JoinHandle<Result<(), WindowError>>>,
}

impl WindowHandle {
    /// Opens a window over `source` and starts its command loop.
    pub fn open<S: Source + 'static>(
        source: S,
        name: impl Into<String>,
        options: WindowOptions,
        redraw: Sender<()>,
    ) -> Result<Self, WindowError> {
        let window = Window::new(source, name, options)?;
        Self::spawn(window, redraw)
    }

    /// Starts the command loop for an already constructed window.
    pub fn spawn(window: Window, redraw: Sender<()>) -> Result<Self, WindowError> {
        let name = window.name().to_string();
        let window = Arc::new(Mutex::new(window));
        let (sender, receiver) = mpsc::channel();
        let shared = Arc::clone(&window);
        let worker = thread::Builder::new()
            .name(format!("window-{name}"))
            .spawn(move || run(shared, receiver, redraw))?;
        debug!(window = %name, "window opened");
        Ok(Self {
            name,
            window,
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Queues a command. Fails only if the command loop has stopped.
    pub fn send(&self, command: Command) -> Result<(), WindowError> {
        self.sender
            .as_ref()
            .ok_or(WindowError::Closed)?
            .send(command)
            .map_err(|_| WindowError::Closed)
    }

    /// Takes a snapshot for rendering.
    pub fn state(&self) -> Result<WindowState, WindowError> {
        self.lock()?.state()
    }

    /// Copies the content (or the bytes spanned by `range`) into `dst`.
    pub fn write_to<W: Write + ?Sized>(
        &self,
        range: Option<&Range>,
        dst: &mut W,
    ) -> Result<u64, WindowError> {
        self.lock()?.write_to(range, dst)
    }

    /// Resizes the viewport.
    pub fn set_size(&self, width: i64, height: i64) -> Result<(), WindowError> {
        self.lock()?.set_size(width, height);
        Ok(())
    }

    /// Stops the command loop after the queued commands and reports how it ended.
    pub fn close(mut self) -> Result<(), WindowError> {
        self.shutdown()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Window>, WindowError> {
        self.window
            .lock()
            .map_err(|_| WindowError::Internal("window lock poisoned"))
    }

    fn shutdown(&mut self) -> Result<(), WindowError> {
        self.sender.take();
        match self.worker.take() {
            Some(worker) => worker
                .join()
                .map_err(|_| WindowError::Internal("window thread panicked"))?,
            None => Ok(()),
        }
    }
}

impl Drop for WindowHandle {
    fn drop(&mut self) {
        if let Err(err) = self.shutdown() {
            warn!(window = %self.name, "window stopped with error: {}", err);
        }
    }
}

/// Applies commands until the sender is dropped or a fatal error occurs.
fn run(
    window: Arc<Mutex<Window>>,
    commands: Receiver<Command>,
    redraw: Sender<()>,
) -> Result<(), WindowError> {
    for command in commands {
        let result = {
            let mut window = window
                .lock()
                .map_err(|_| WindowError::Internal("window lock poisoned"))?;
            window.apply(&command)
        };
        match result {
            Ok(()) => {}
            Err(err) if err.is_fatal() => {
                error!(action = ?command.action, "window command loop stopped: {}", err);
                return Err(err);
            }
            Err(WindowError::NoSelection) => {
                debug!(action = ?command.action, "command needs a visual selection");
            }
            Err(err) => {
                warn!(action = ?command.action, "command failed: {}", err);
            }
        }
        if redraw.send(()).is_err() {
            debug!("redraw receiver is gone");
        }
    }
    Ok(())
}
