//! # Executor configuration.
//!
//! Provides [`Config`] centralized settings for the executor, the output
//! capture and the presentation-side notices.
//!
//! ## Sentinel values
//! - `start_notice = None` / `stop_notice = None` → nothing is written
//! - `bus_capacity = 0` → clamped to 1

use crate::output::Markers;

/// Maximum number of tasks running at once. The executor is a single slot.
pub const MAX_CONCURRENT: usize = 1;

/// Configuration for the executor runtime.
///
/// ## Field semantics
/// - `bus_capacity`: Event bus ring buffer size (min 1; clamped by Bus)
/// - `markers`: Sentinels bracketing a redrawable output region
/// - `start_notice`: Line written into the captured output when a task is accepted
/// - `stop_notice`: Line written into the captured output when cancel is requested
/// - `busy_notice`: Message returned when shutdown is refused during a task
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the event bus broadcast channel ring buffer.
    ///
    /// Subscribers lagging more than `bus_capacity` events skip older items.
    pub bus_capacity: usize,

    /// Begin/end sentinels recognised by the line sink.
    pub markers: Markers,

    /// Optional notice written (after the redirect) when a task is started.
    pub start_notice: Option<String>,

    /// Optional notice written when a cancel request reaches a running task.
    pub stop_notice: Option<String>,

    /// User-visible reason a shutdown request is refused.
    pub busy_notice: String,
}

impl Config {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Sets the notice written when a task starts.
    pub fn with_start_notice(mut self, notice: impl Into<String>) -> Self {
        self.start_notice = Some(notice.into());
        self
    }

    /// Sets the notice written when cancellation is requested.
    pub fn with_stop_notice(mut self, notice: impl Into<String>) -> Self {
        self.stop_notice = Some(notice.into());
        self
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `bus_capacity = 1024`
    /// - `markers = Markers::default()` (hide/show cursor sequences)
    /// - no start/stop notices
    /// - `busy_notice = "Processing is in progress"`
    fn default() -> Self {
        Self {
            bus_capacity: 1024,
            markers: Markers::default(),
            start_notice: None,
            stop_notice: None,
            busy_notice: "Processing is in progress".to_string(),
        }
    }
}
