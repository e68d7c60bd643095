//! # Runtime events emitted by the executor and the task runner.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Lifecycle events**: task execution flow (starting, succeeded, interrupted, failed, finished)
//! - **Control events**: cancel and shutdown requests, output redirection
//! - **Subscriber events**: overflow and panic reports from subscriber workers
//!
//! Events are observability data. The lifecycle *signals* consumed by the
//! presentation side travel separately through the mailbox, so a lagging
//! subscriber never loses a `Result` or `Finished` signal.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use taskline::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::TaskFailed)
//!     .with_task("import")
//!     .with_reason("boom");
//!
//! assert_eq!(ev.kind, EventKind::TaskFailed);
//! assert_eq!(ev.task.as_deref(), Some("import"));
//! assert_eq!(ev.reason.as_deref(), Some("boom"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `task`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,

    // === Task lifecycle events ===
    /// Task was accepted and its function is about to run.
    ///
    /// Sets:
    /// - `task`: task name
    TaskStarting,

    /// Task function returned a value.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `reason`: returned value
    TaskSucceeded,

    /// Task function observed the stop flag and returned the interrupted result.
    ///
    /// Sets:
    /// - `task`: task name
    TaskInterrupted,

    /// Task function returned an error or panicked.
    ///
    /// Sets:
    /// - `task`: task name
    /// - `reason`: fault description
    TaskFailed,

    /// Task reached its terminal state; always follows exactly one of
    /// `TaskSucceeded`, `TaskInterrupted` or `TaskFailed`.
    ///
    /// Sets:
    /// - `task`: task name
    TaskFinished,

    // === Control events ===
    /// Cancellation was requested for a running task.
    ///
    /// Sets:
    /// - `task`: task name
    StopRequested,

    /// Cancellation was requested after the task finished (harmless no-op).
    ///
    /// Sets:
    /// - `task`: task name
    StopIgnored,

    /// The default output was handed to the line sink.
    ///
    /// Sets:
    /// - `task`: task name
    OutputRedirected,

    /// The default output was restored after the task.
    ///
    /// Sets:
    /// - `task`: task name
    OutputRestored,

    /// A shutdown request was refused because a task is active.
    ///
    /// Sets:
    /// - `reason`: user-visible notice
    ShutdownRefused,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the task (or subscriber), if applicable.
    pub task: Option<Arc<str>>,
    /// Human-readable reason (values, errors, overflow details, etc.).
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            reason: None,
        }
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a task name.
    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_task(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_task(subscriber)
            .with_reason(info)
    }
}
