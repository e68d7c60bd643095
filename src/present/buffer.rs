//! # Redraw-aware line buffer.
//!
//! Rules, per applied [`Segment`]:
//!
//! | segment    | outside a region          | inside a region        |
//! |------------|---------------------------|------------------------|
//! | `Fragment` | append a new line         | replace the last line  |
//! | `Begin`    | open; append a placeholder| ignored                |
//! | `End`      | ignored                   | close                  |
//!
//! The placeholder gives every region its own line, so earlier lines are
//! never overwritten and a region always yields exactly one line.
//!
//! A region left open by a task that stopped mid-redraw is closed with
//! [`LineBuffer::close_region`] before anything else is rendered.

use crate::output::Segment;

/// Render step for the presentation surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOp {
    /// Add `text` as a new last line.
    Append(String),
    /// Overwrite the last line with `text`.
    ReplaceLast(String),
}

/// Ordered rendered lines plus the in-region flag.
#[derive(Clone, Debug, Default)]
pub struct LineBuffer {
    lines: Vec<String>,
    in_region: bool,
}

impl LineBuffer {
    /// Empty buffer, outside any region.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one segment and returns the render step it causes, if any.
    pub fn apply(&mut self, seg: Segment) -> Option<RenderOp> {
        match seg {
            Segment::Begin if self.in_region => None,
            Segment::Begin => {
                self.in_region = true;
                self.lines.push(String::new());
                Some(RenderOp::Append(String::new()))
            }
            Segment::End => {
                self.in_region = false;
                None
            }
            Segment::Fragment(text) if self.in_region => {
                match self.lines.last_mut() {
                    Some(last) => last.clone_from(&text),
                    None => self.lines.push(text.clone()),
                }
                Some(RenderOp::ReplaceLast(text))
            }
            Segment::Fragment(text) => {
                self.lines.push(text.clone());
                Some(RenderOp::Append(text))
            }
        }
    }

    /// Rendered lines, oldest first.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// True between a `Begin` and its `End`.
    pub fn in_region(&self) -> bool {
        self.in_region
    }

    /// Leaves the current region, keeping its last line. Returns whether a
    /// region was open.
    pub fn close_region(&mut self) -> bool {
        std::mem::take(&mut self.in_region)
    }
}
