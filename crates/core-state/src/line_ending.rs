//! Line ending detection and normalization.
//!
//! The document only ever holds `\n`. On load the dominant terminator of the
//! file is remembered so save can write it back; a uniformly CRLF file
//! therefore round-trips byte for byte. Mixed files are normalized to the
//! majority style (ties resolved CRLF > LF > CR).

use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    #[default]
    Lf,
    Cr,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
            LineEnding::Crlf => "\r\n",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LineEnding::Lf => "LF",
            LineEnding::Cr => "CR",
            LineEnding::Crlf => "CRLF",
        }
    }
}

/// Result of normalizing line endings.
#[derive(Debug)]
pub struct NormalizedText {
    /// LF-only content.
    pub normalized: String,
    /// Majority style observed in the input.
    pub original: LineEnding,
    /// More than one style was present.
    pub mixed: bool,
}

#[derive(Default)]
struct Counts {
    crlf: usize,
    lf: usize,
    cr: usize,
}

fn count_terminators(bytes: &[u8]) -> Counts {
    let mut counts = Counts::default();
    let mut i = 0usize;
    while i < bytes.len() {
        match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => {
                counts.crlf += 1;
                i += 2;
            }
            b'\r' => {
                counts.cr += 1;
                i += 1;
            }
            b'\n' => {
                counts.lf += 1;
                i += 1;
            }
            _ => i += 1,
        }
    }
    counts
}

/// Detect and normalize line endings of `input` to LF-only content.
pub fn normalize_line_endings(input: &str) -> NormalizedText {
    let counts = count_terminators(input.as_bytes());
    let mut original = LineEnding::Lf;
    let mut max = 0usize;
    for (style, count) in [
        (LineEnding::Crlf, counts.crlf),
        (LineEnding::Lf, counts.lf),
        (LineEnding::Cr, counts.cr),
    ] {
        if count > max {
            max = count;
            original = style;
        }
    }
    let mixed = [counts.crlf, counts.lf, counts.cr]
        .iter()
        .filter(|c| **c > 0)
        .count()
        > 1;
    if counts.crlf == 0 && counts.cr == 0 {
        return NormalizedText {
            normalized: input.to_string(),
            original,
            mixed,
        };
    }
    // Only '\r' positions are rewritten, so multi-byte UTF-8 sequences stay intact.
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(idx) = rest.find('\r') {
        out.push_str(&rest[..idx]);
        out.push('\n');
        let skip = if rest[idx + 1..].starts_with('\n') { 2 } else { 1 };
        rest = &rest[idx + skip..];
    }
    out.push_str(rest);
    debug_assert!(!out.contains('\r'));
    NormalizedText {
        normalized: out,
        original,
        mixed,
    }
}

/// Re-expand LF-only content to the requested style.
pub fn expand_line_endings(content: &str, ending: LineEnding) -> Cow<'_, str> {
    match ending {
        LineEnding::Lf => Cow::Borrowed(content),
        other => Cow::Owned(content.replace('\n', other.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lf_input_is_untouched() {
        let n = normalize_line_endings("a\nb\n");
        assert_eq!(n.normalized, "a\nb\n");
        assert_eq!(n.original, LineEnding::Lf);
        assert!(!n.mixed);
    }

    #[test]
    fn crlf_detected_and_normalized() {
        let n = normalize_line_endings("a\r\nb\r\n");
        assert_eq!(n.normalized, "a\nb\n");
        assert_eq!(n.original, LineEnding::Crlf);
        assert!(!n.mixed);
        assert_eq!(expand_line_endings(&n.normalized, n.original), "a\r\nb\r\n");
    }

    #[test]
    fn lone_cr_becomes_lf() {
        let n = normalize_line_endings("a\rb");
        assert_eq!(n.normalized, "a\nb");
        assert_eq!(n.original, LineEnding::Cr);
    }

    #[test]
    fn mixed_prefers_majority() {
        let n = normalize_line_endings("line1\r\nline2\nline3\r\n");
        assert_eq!(n.normalized, "line1\nline2\nline3\n");
        assert_eq!(n.original, LineEnding::Crlf);
        assert!(n.mixed);
    }

    #[test]
    fn multibyte_text_survives() {
        let n = normalize_line_endings("ünï\r\ncødé");
        assert_eq!(n.normalized, "ünï\ncødé");
    }
}
