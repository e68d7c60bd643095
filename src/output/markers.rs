//! # Region markers and chunk segmentation.
//!
//! Progress renderers bracket their redraw sequence with "hide cursor" and
//! "show cursor" escapes and prefix each redraw with `\r` plus an erase-line
//! escape. [`segments`] turns a raw chunk into the pieces the line buffer
//! cares about:
//!
//! ```text
//! "\x1b[?25l\r\x1b[KProgress 1/10"  →  [Begin, Fragment("Progress 1/10")]
//! "done\nbye\n"                     →  [Fragment("done"), Fragment("bye")]
//! "   \n"                           →  []
//! ```
//!
//! Markers are never rendered. Fragments are trimmed; empty ones are dropped.

use std::borrow::Cow;

/// Hide-cursor escape, emitted before a progress redraw sequence.
pub const HIDE_CURSOR: &str = "\x1b[?25l";
/// Show-cursor escape, emitted after a progress redraw sequence.
pub const SHOW_CURSOR: &str = "\x1b[?25h";
/// Erase-to-end-of-line escape, stripped from fragments.
pub const ERASE_LINE: &str = "\x1b[K";

/// Begin/end sentinels of a redrawable region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Markers {
    begin: Cow<'static, str>,
    end: Cow<'static, str>,
}

impl Markers {
    /// Custom sentinels. An empty sentinel never matches.
    pub fn new(begin: impl Into<Cow<'static, str>>, end: impl Into<Cow<'static, str>>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Sentinel opening a region.
    pub fn begin(&self) -> &str {
        &self.begin
    }

    /// Sentinel closing a region.
    pub fn end(&self) -> &str {
        &self.end
    }
}

impl Default for Markers {
    fn default() -> Self {
        Self::new(HIDE_CURSOR, SHOW_CURSOR)
    }
}

/// One meaningful piece of a raw output chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Printable, trimmed, non-empty text.
    Fragment(String),
    /// A redrawable region opens.
    Begin,
    /// The redrawable region closes.
    End,
}

/// Splits a raw chunk into markers and printable fragments, in order.
pub fn segments(chunk: &str, markers: &Markers) -> Vec<Segment> {
    let mut out = Vec::new();
    let mut rest = chunk;

    loop {
        let begin = find(rest, markers.begin()).map(|at| (at, markers.begin().len(), Segment::Begin));
        let end = find(rest, markers.end()).map(|at| (at, markers.end().len(), Segment::End));

        let next = match (begin, end) {
            (Some(b), Some(e)) => Some(if b.0 <= e.0 { b } else { e }),
            (b, e) => b.or(e),
        };

        let Some((at, len, marker)) = next else {
            push_fragments(rest, &mut out);
            break;
        };
        push_fragments(&rest[..at], &mut out);
        out.push(marker);
        rest = &rest[at + len..];
    }
    out
}

fn find(haystack: &str, needle: &str) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    haystack.find(needle)
}

fn push_fragments(text: &str, out: &mut Vec<Segment>) {
    for piece in text.split(['\n', '\r']) {
        let cleaned = piece.replace(ERASE_LINE, "");
        let trimmed = cleaned.trim();
        if !trimmed.is_empty() {
            out.push(Segment::Fragment(trimmed.to_string()));
        }
    }
}
