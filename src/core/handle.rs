use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::error::RuntimeError;
use crate::events::{Bus, Event, EventKind};
use crate::tasks::{StateCell, StopFlag, TaskOutcome, TaskState};

/// Handle to one submitted task.
///
/// Dropping the handle detaches it; the task still runs to `Finished`.
#[derive(Debug)]
pub struct TaskHandle {
    name: Arc<str>,
    stop: StopFlag,
    state: StateCell,
    bus: Bus,
    join: JoinHandle<TaskOutcome>,
}

impl TaskHandle {
    pub(crate) fn new(
        name: Arc<str>,
        stop: StopFlag,
        state: StateCell,
        bus: Bus,
        join: JoinHandle<TaskOutcome>,
    ) -> Self {
        Self {
            name,
            stop,
            state,
            bus,
            join,
        }
    }

    /// Task name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current lifecycle state.
    pub fn state(&self) -> TaskState {
        self.state.get()
    }

    /// Asks the task to stop at its next check point.
    ///
    /// Returns `false` (and changes nothing) once the task is finished.
    pub fn stop(&self) -> bool {
        request_stop(&self.name, &self.stop, &self.state, &self.bus)
    }

    /// Waits for the task and returns its outcome.
    pub async fn join(self) -> Result<TaskOutcome, RuntimeError> {
        self.join.await.map_err(|e| RuntimeError::Join {
            task: self.name.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Sets the stop flag unless the task already reached `Finished`.
pub(crate) fn request_stop(name: &Arc<str>, stop: &StopFlag, state: &StateCell, bus: &Bus) -> bool {
    if state.get() == TaskState::Finished {
        bus.publish(Event::new(EventKind::StopIgnored).with_task(Arc::clone(name)));
        return false;
    }
    stop.stop();
    bus.publish(Event::new(EventKind::StopRequested).with_task(Arc::clone(name)));
    true
}
