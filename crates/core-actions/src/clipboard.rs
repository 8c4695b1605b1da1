//! Clipboard bridge.
//!
//! `SystemClipboard` talks to the OS clipboard through arboard and connects
//! lazily on first use, so a headless session only fails when the clipboard is
//! actually needed. `MemoryClipboard` is a process-local stand-in used by tests
//! and as the fallback when no system clipboard can be reached.

use core_state::EditorError;

pub trait Clipboard {
    fn get_text(&mut self) -> Result<String, EditorError>;
    fn set_text(&mut self, text: &str) -> Result<(), EditorError>;
}

#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a connection to the system clipboard can be established.
    pub fn probe(&mut self) -> bool {
        self.connection().is_ok()
    }

    fn connection(&mut self) -> Result<&mut arboard::Clipboard, EditorError> {
        if self.inner.is_none() {
            let cb = arboard::Clipboard::new().map_err(|e| {
                tracing::warn!(target: "clipboard", error = %e, "system_clipboard_connect_failed");
                EditorError::ClipboardUnavailable(e.to_string())
            })?;
            self.inner = Some(cb);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| EditorError::ClipboardUnavailable("not connected".into()))
    }
}

fn map_arboard(e: arboard::Error) -> EditorError {
    match e {
        arboard::Error::ContentNotAvailable => EditorError::ClipboardDataUnavailable,
        other => EditorError::ClipboardUnavailable(other.to_string()),
    }
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> Result<String, EditorError> {
        let text = self.connection()?.get_text().map_err(map_arboard)?;
        tracing::debug!(target: "clipboard", len = text.len(), "get_text");
        Ok(text)
    }

    fn set_text(&mut self, text: &str) -> Result<(), EditorError> {
        self.connection()?.set_text(text).map_err(map_arboard)?;
        tracing::debug!(target: "clipboard", len = text.len(), "set_text");
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn get_text(&mut self) -> Result<String, EditorError> {
        self.text.clone().ok_or(EditorError::ClipboardDataUnavailable)
    }

    fn set_text(&mut self, text: &str) -> Result<(), EditorError> {
        self.text = Some(text.to_string());
        Ok(())
    }
}
