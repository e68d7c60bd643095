use std::fmt::Display;
use std::sync::Arc;

use crate::output::Console;
use crate::tasks::StopFlag;

/// Handle passed to a running task function.
///
/// Exposes the stop flag (poll it at safe points) and the default output
/// channel. Whatever the task writes through [`TaskContext::out`] is captured
/// by the current destination; the task must not assume which one that is.
#[derive(Clone, Debug)]
pub struct TaskContext {
    name: Arc<str>,
    stop: StopFlag,
    out: Console,
}

impl TaskContext {
    pub(crate) fn new(name: Arc<str>, stop: StopFlag, out: Console) -> Self {
        Self { name, stop, out }
    }

    /// Name of the running task.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True once the controller asked this task to stop.
    pub fn is_stop_requested(&self) -> bool {
        self.stop.is_stopped()
    }

    /// The default output channel.
    pub fn out(&self) -> &Console {
        &self.out
    }

    /// Writes `text` as a single chunk.
    pub fn print(&self, text: impl Display) {
        self.out.write_str(&text.to_string());
    }

    /// Writes `text` followed by a newline as a single chunk.
    pub fn println(&self, text: impl Display) {
        self.out.write_str(&format!("{text}\n"));
    }
}
