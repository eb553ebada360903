//! Copying section links to the system clipboard without blocking input.
//!
//! Clipboard access can stall (X11 and Wayland both round-trip to another process), so each
//! write runs on its own thread and reports back over a channel that the event loop drains.

use crate::error::{Error, Result};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

/// Somewhere text can be written for the user to paste.
pub trait Clipboard: Send + Sync {
    /// Replace the clipboard contents with `text`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Clipboard` if the platform clipboard is unavailable or refuses the write.
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The platform clipboard.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

#[derive(Debug)]
/// Result of one finished write.
pub struct CopyOutcome {
    /// The text that was written.
    pub text: String,
    /// Whether the write succeeded.
    pub result: Result<()>,
}

/// Runs clipboard writes off the UI thread.
pub struct CopyLink {
    clipboard: Arc<dyn Clipboard>,
    tx: Sender<CopyOutcome>,
    rx: Receiver<CopyOutcome>,
}

impl CopyLink {
    #[must_use]
    /// Copier writing through `clipboard`.
    pub fn new(clipboard: Arc<dyn Clipboard>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { clipboard, tx, rx }
    }

    /// Starts writing `text`; the outcome shows up in a later `drain`.
    pub fn copy(&self, text: String) {
        let clipboard = Arc::clone(&self.clipboard);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = clipboard.write_text(&text);
            // The receiver only goes away at shutdown, when nobody cares about the outcome.
            let _ = tx.send(CopyOutcome { text, result });
        });
    }

    /// Outcomes of writes that have finished since the last call.
    #[must_use]
    pub fn drain(&self) -> Vec<CopyOutcome> {
        self.rx.try_iter().collect()
    }
}
