//! Recoverable editor errors.
//!
//! Every variant is handled where it occurs and surfaced to the user as a
//! status-line notice. None of them ends the session.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Cannot read {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Cannot write {}: {source}", path.display())]
    FileUnwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Clipboard unavailable: {0}")]
    ClipboardUnavailable(String),
    #[error("Clipboard holds no text")]
    ClipboardDataUnavailable,
    #[error("Nothing selected")]
    NothingSelected,
    #[error("Nothing to undo")]
    UndoUnavailable,
    #[error("Nothing to redo")]
    RedoUnavailable,
}

impl EditorError {
    /// Stable identifier used as a structured logging field.
    pub fn kind(&self) -> &'static str {
        match self {
            EditorError::FileNotFound(_) => "file_not_found",
            EditorError::FileUnreadable { .. } => "file_unreadable",
            EditorError::FileUnwritable { .. } => "file_unwritable",
            EditorError::ClipboardUnavailable(_) => "clipboard_unavailable",
            EditorError::ClipboardDataUnavailable => "clipboard_data_unavailable",
            EditorError::NothingSelected => "nothing_selected",
            EditorError::UndoUnavailable => "undo_unavailable",
            EditorError::RedoUnavailable => "redo_unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let e = EditorError::FileNotFound(PathBuf::from("/tmp/missing.txt"));
        assert_eq!(e.to_string(), "File not found: /tmp/missing.txt");
        let e = EditorError::FileUnwritable {
            path: PathBuf::from("out.txt"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().starts_with("Cannot write out.txt"));
        assert_eq!(e.kind(), "file_unwritable");
    }
}
