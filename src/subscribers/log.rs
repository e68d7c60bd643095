//! # LogWriter: events to `tracing`
//!
//! Maps every [`Event`] to a `tracing` record at a level matching its weight:
//! failures and subscriber faults at `error`, refusals at `warn`, task
//! lifecycle at `info`/`debug`, output plumbing at `trace`.

use async_trait::async_trait;
use tracing::{debug, error, info, trace, warn};

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[inline]
fn message_for(kind: EventKind) -> &'static str {
    match kind {
        EventKind::SubscriberOverflow => "event dropped for a subscriber (queue full or worker closed)",
        EventKind::SubscriberPanicked => "subscriber panicked while processing an event",

        EventKind::TaskStarting => "task is starting",
        EventKind::TaskSucceeded => "task returned a value",
        EventKind::TaskInterrupted => "task stopped at a cancellation check",
        EventKind::TaskFailed => "task failed",
        EventKind::TaskFinished => "task finished",

        EventKind::StopRequested => "stop requested",
        EventKind::StopIgnored => "stop requested after finish; ignored",
        EventKind::OutputRedirected => "default output redirected to line sink",
        EventKind::OutputRestored => "default output restored",
        EventKind::ShutdownRefused => "shutdown refused while a task is active",
    }
}

/// Writes one event through `tracing`.
pub fn log_event(e: &Event) {
    let msg = message_for(e.kind);
    let task = e.task.as_deref().unwrap_or("unknown");
    let reason = e.reason.as_deref().unwrap_or("");

    match e.kind {
        EventKind::SubscriberOverflow | EventKind::SubscriberPanicked => {
            error!(subscriber = task, reason, "{msg}")
        }
        EventKind::TaskFailed => error!(task, reason, "{msg}"),
        EventKind::ShutdownRefused => warn!(reason, "{msg}"),
        EventKind::TaskStarting | EventKind::TaskFinished => info!(task, "{msg}"),
        EventKind::TaskSucceeded => info!(task, value = reason, "{msg}"),
        EventKind::TaskInterrupted | EventKind::StopRequested => info!(task, "{msg}"),
        EventKind::StopIgnored => debug!(task, "{msg}"),
        EventKind::OutputRedirected | EventKind::OutputRestored => trace!(task, "{msg}"),
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        log_event(e);
    }

    fn name(&self) -> &'static str {
        "log"
    }

    fn queue_capacity(&self) -> usize {
        2048
    }
}
