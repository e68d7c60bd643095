//! # Presentation-side drain loop.
//!
//! ```text
//! Inbox ──► Message::Chunk(segs) ──► LineBuffer::apply ──► Surface::{append_line, replace_last_line}
//!      └──► Message::Signal     ──────────────────────► Surface::{on_result, on_error, on_finished}
//! ```
//!
//! The presenter is the only owner of the [`LineBuffer`]; it runs wherever the
//! caller drives it, which makes that context the presentation context.

use tokio_util::sync::CancellationToken;

use crate::present::{Inbox, LineBuffer, Message, RenderOp, Signal, Surface};
use crate::tasks::TaskOutcome;

/// Applies queued output and signals to a [`Surface`].
pub struct Presenter {
    inbox: Inbox,
    buffer: LineBuffer,
    surface: Box<dyn Surface>,
}

impl Presenter {
    /// Creates a presenter draining `inbox` into `surface`.
    pub fn new(inbox: Inbox, surface: Box<dyn Surface>) -> Self {
        Self {
            inbox,
            buffer: LineBuffer::new(),
            surface,
        }
    }

    /// Renders everything queued so far without waiting. Returns the number of
    /// messages handled.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Some(msg) = self.inbox.try_recv() {
            self.dispatch(msg);
            handled += 1;
        }
        handled
    }

    /// Waits for one message and renders it. Returns `false` once the
    /// channel is closed.
    pub async fn step(&mut self) -> bool {
        match self.inbox.recv().await {
            Some(msg) => {
                self.dispatch(msg);
                true
            }
            None => false,
        }
    }

    /// Renders until `token` is cancelled or the channel closes, then drains
    /// whatever is still queued.
    pub async fn run(&mut self, token: &CancellationToken) {
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                alive = self.step() => if !alive { break },
            }
        }
        self.drain();
    }

    /// Lines rendered so far.
    pub fn lines(&self) -> &[String] {
        self.buffer.lines()
    }

    fn dispatch(&mut self, msg: Message) {
        match msg {
            Message::Chunk(segs) => {
                for seg in segs {
                    match self.buffer.apply(seg) {
                        Some(RenderOp::Append(text)) => self.surface.append_line(&text),
                        Some(RenderOp::ReplaceLast(text)) => self.surface.replace_last_line(&text),
                        None => {}
                    }
                }
            }
            Message::Signal(Signal::Result { task, outcome }) => match outcome {
                TaskOutcome::Ok(value) => self.surface.on_result(&task, &value),
                TaskOutcome::Failed(description) => self.surface.on_error(&task, &description),
            },
            Message::Signal(Signal::Finished { task }) => {
                self.buffer.close_region();
                self.surface.on_finished(&task);
            }
        }
    }
}

impl std::fmt::Debug for Presenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenter")
            .field("buffer", &self.buffer)
            .finish_non_exhaustive()
    }
}
