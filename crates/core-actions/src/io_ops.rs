//! File IO helpers used by the dispatcher.
//!
//! Synchronous and whole-file: read everything, normalize line endings to
//! `\n`, remember the original style; on write, re-expand and overwrite. A
//! failed write leaves the editor state untouched.

use core_state::{
    EditorError, EditorState, LineEnding, expand_line_endings, normalize_line_endings,
};
use std::io;
use std::path::{Path, PathBuf};

/// A successfully read file, ready to become the document.
pub struct OpenedFile {
    pub content: String,
    pub path: PathBuf,
    pub original_line_ending: LineEnding,
    pub mixed_line_endings: bool,
}

impl std::fmt::Debug for OpenedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenedFile")
            .field("path", &self.path)
            .field("bytes", &self.content.len())
            .field("original_line_ending", &self.original_line_ending)
            .field("mixed_line_endings", &self.mixed_line_endings)
            .finish()
    }
}

/// Read `path` as UTF-8 text and normalize its line endings.
pub fn open_file(path: &Path) -> Result<OpenedFile, EditorError> {
    let bytes = std::fs::read(path).map_err(|e| {
        tracing::error!(target: "io", path = %path.display(), ?e, "file_open_error");
        if e.kind() == io::ErrorKind::NotFound {
            EditorError::FileNotFound(path.to_path_buf())
        } else {
            EditorError::FileUnreadable {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let content = String::from_utf8(bytes).map_err(|e| {
        tracing::error!(target: "io", path = %path.display(), valid_up_to = e.utf8_error().valid_up_to(), "file_not_utf8");
        EditorError::FileUnreadable {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidData, e.utf8_error()),
        }
    })?;
    let norm = normalize_line_endings(&content);
    if norm.mixed {
        tracing::warn!(target: "io", path = %path.display(), normalized_to = norm.original.label(), "mixed_line_endings");
    }
    tracing::info!(target: "io", path = %path.display(), bytes = content.len(), "file_opened");
    Ok(OpenedFile {
        content: norm.normalized,
        path: path.to_path_buf(),
        original_line_ending: norm.original,
        mixed_line_endings: norm.mixed,
    })
}

/// Open `path` and make it the document: fresh history, clean flag.
pub fn load_into(state: &mut EditorState, path: &Path) -> Result<(), EditorError> {
    let opened = open_file(path)?;
    state.replace_document(
        &opened.content,
        Some(opened.path),
        opened.original_line_ending,
    );
    Ok(())
}

/// Write the document to `target`, re-expanding line endings to the style the
/// file was loaded with. On success the state records the path and is clean.
pub fn write_file(state: &mut EditorState, target: &Path) -> Result<(), EditorError> {
    let content = expand_line_endings(state.document().text(), state.original_line_ending);
    match std::fs::write(target, content.as_bytes()) {
        Ok(()) => {
            tracing::info!(target: "io", path = %target.display(), bytes = content.len(), "file_written");
            state.mark_saved(target);
            Ok(())
        }
        Err(e) => {
            tracing::error!(target: "io", path = %target.display(), ?e, "file_write_error");
            Err(EditorError::FileUnwritable {
                path: target.to_path_buf(),
                source: e,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_text::Document;

    #[test]
    fn open_file_normalizes_and_sets_metadata() {
        use std::io::Write;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.txt");
        {
            let mut f = std::fs::File::create(&path).unwrap();
            write!(f, "line1\r\nline2\nline3\r\n").unwrap();
        }
        let opened = open_file(&path).expect("open");
        assert_eq!(opened.content, "line1\nline2\nline3\n");
        assert!(opened.mixed_line_endings, "should detect mixed endings");
        assert_eq!(opened.original_line_ending, LineEnding::Crlf);
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = open_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, EditorError::FileNotFound(_)));
    }

    #[test]
    fn invalid_utf8_and_directories_are_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bin.dat");
        std::fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();
        assert!(matches!(
            open_file(&path),
            Err(EditorError::FileUnreadable { .. })
        ));
        assert!(matches!(
            open_file(dir.path()),
            Err(EditorError::FileUnreadable { .. })
        ));
    }

    #[test]
    fn write_file_preserves_original_style() {
        let mut state = EditorState::new(Document::from_str("a\nb\n"));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.txt");
        state.original_line_ending = LineEnding::Crlf;
        state.modified = true;
        write_file(&mut state, &path).expect("write");
        assert!(!state.modified, "modified cleared after write");
        assert_eq!(state.file_name.as_deref(), Some(path.as_path()));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "a\r\nb\r\n");
    }

    #[test]
    fn write_failure_leaves_state_untouched() {
        let mut state = EditorState::new(Document::from_str("keep"));
        state.modified = true;
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing_dir").join("out.txt");
        let err = write_file(&mut state, &target).unwrap_err();
        assert!(matches!(err, EditorError::FileUnwritable { .. }));
        assert!(state.modified);
        assert_eq!(state.file_name, None);
        assert_eq!(state.document().text(), "keep");
    }

    #[test]
    fn load_into_resets_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.txt");
        std::fs::write(&path, "fresh").unwrap();
        let mut state = EditorState::new(Document::new());
        state.edit(|d| d.replace_selection("draft"));
        load_into(&mut state, &path).expect("load");
        assert_eq!(state.document().text(), "fresh");
        assert!(!state.modified);
        assert!(!state.undo());
    }
}
