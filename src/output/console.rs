//! # Default output channel.
//!
//! [`Console`] is an explicitly owned handle to the process-wide default
//! text-output destination. Tasks write through it; a [`RedirectGuard`]
//! temporarily swaps the destination for the duration of one task.
//!
//! The slot mutex is held only to read or swap the destination, never while a
//! destination is writing.
//!
//! [`RedirectGuard`]: crate::RedirectGuard

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::error::RedirectError;
use crate::sync::lock;

/// Something that accepts raw text chunks.
pub trait Destination: Send + Sync + 'static {
    /// Consumes one chunk. Must not block on a presentation context.
    fn write_chunk(&self, chunk: &str);
}

/// The process standard output.
#[derive(Clone, Copy, Debug, Default)]
pub struct Stdout;

impl Destination for Stdout {
    fn write_chunk(&self, chunk: &str) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(chunk.as_bytes());
        let _ = out.flush();
    }
}

struct Slot {
    current: Arc<dyn Destination>,
    redirected: bool,
}

/// Clonable handle to the default output destination.
#[derive(Clone)]
pub struct Console {
    slot: Arc<Mutex<Slot>>,
}

impl Console {
    /// Creates a console writing to `default` until redirected.
    pub fn new(default: Arc<dyn Destination>) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot {
                current: default,
                redirected: false,
            })),
        }
    }

    /// Creates a console writing to the process standard output.
    pub fn stdout() -> Self {
        Self::new(Arc::new(Stdout))
    }

    /// Writes one chunk to the current destination.
    pub fn write_str(&self, chunk: &str) {
        let dest = Arc::clone(&lock(&self.slot).current);
        dest.write_chunk(chunk);
    }

    /// True while a redirect guard is outstanding.
    pub fn is_redirected(&self) -> bool {
        lock(&self.slot).redirected
    }

    /// Installs `dest` and returns the destination it replaced.
    pub(crate) fn swap_in(
        &self,
        dest: Arc<dyn Destination>,
    ) -> Result<Arc<dyn Destination>, RedirectError> {
        let mut slot = lock(&self.slot);
        if slot.redirected {
            return Err(RedirectError::AlreadyRedirected);
        }
        slot.redirected = true;
        Ok(std::mem::replace(&mut slot.current, dest))
    }

    /// Puts `previous` back and clears the redirected mark.
    pub(crate) fn restore(&self, previous: Arc<dyn Destination>) {
        let mut slot = lock(&self.slot);
        slot.current = previous;
        slot.redirected = false;
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Console")
            .field("redirected", &self.is_redirected())
            .finish()
    }
}

/// Each `write` call is forwarded as one chunk.
///
/// `write!` may split a formatted line into several calls; prefer
/// [`TaskContext::println`](crate::TaskContext::println) for whole lines.
impl Write for Console {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_str(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
