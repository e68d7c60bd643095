//! # Redrawable progress bar.
//!
//! [`Progress`] writes through a [`Console`] the way terminal progress bars
//! do: the begin marker once, then `\r` + erase-line + the redrawn line per
//! step, then a newline and the end marker. Captured by the line sink, the
//! whole bar occupies a single rendered line.
//!
//! ```text
//! Progress |￭￭￭￭￭￭￭￭￭￭￭￭￭￮￮￮...| 4/10
//! ```

use std::borrow::Cow;

use crate::output::{Console, ERASE_LINE, Markers};

/// Number of cells in the bar.
pub const BAR_WIDTH: usize = 32;
/// Filled cell (U+FFED, halfwidth black square).
pub const FILL: char = '\u{FFED}';
/// Empty cell (U+FFEE, halfwidth white circle).
pub const EMPTY: char = '\u{FFEE}';

/// Bar drawn between the region markers.
#[derive(Debug)]
pub struct Progress {
    out: Console,
    markers: Markers,
    label: Cow<'static, str>,
    index: usize,
    max: usize,
    open: bool,
}

impl Progress {
    /// Opens a region with the default markers and draws `0/max`.
    pub fn new(out: &Console, label: impl Into<Cow<'static, str>>, max: usize) -> Self {
        Self::with_markers(out, Markers::default(), label, max)
    }

    /// Same as [`Progress::new`] with custom region markers.
    pub fn with_markers(
        out: &Console,
        markers: Markers,
        label: impl Into<Cow<'static, str>>,
        max: usize,
    ) -> Self {
        let bar = Self {
            out: out.clone(),
            markers,
            label: label.into(),
            index: 0,
            max,
            open: true,
        };
        bar.out.write_str(bar.markers.begin());
        bar.redraw();
        bar
    }

    /// Advances one step (never past `max`) and redraws.
    pub fn tick(&mut self) {
        if self.index < self.max {
            self.index += 1;
        }
        self.redraw();
    }

    /// Completed steps.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current line, without control sequences.
    pub fn line(&self) -> String {
        let filled = filled(self.index, self.max);
        let mut bar = String::with_capacity(BAR_WIDTH * FILL.len_utf8());
        bar.extend(std::iter::repeat_n(FILL, filled));
        bar.extend(std::iter::repeat_n(EMPTY, BAR_WIDTH - filled));
        format!("{} |{bar}| {}/{}", self.label, self.index, self.max)
    }

    /// Closes the region. Also done on drop.
    pub fn finish(mut self) {
        self.close();
    }

    fn redraw(&self) {
        self.out.write_str(&format!("\r{ERASE_LINE}{}", self.line()));
    }

    fn close(&mut self) {
        if self.open {
            self.open = false;
            self.out.write_str(&format!("\n{}", self.markers.end()));
        }
    }
}

/// Filled cells for `index` of `max`, widened so large counts cannot overflow.
fn filled(index: usize, max: usize) -> usize {
    if max == 0 {
        return BAR_WIDTH;
    }
    (BAR_WIDTH as u128 * index as u128 / max as u128) as usize
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.close();
    }
}
