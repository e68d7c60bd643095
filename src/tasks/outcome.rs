use std::fmt;
use std::sync::{Arc, Mutex};

use crate::sync::lock;

/// Value returned by a task function that did not fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// The function ran to its natural end and produced a value.
    Done(String),
    /// The function observed the stop flag at a check point and bailed out.
    Interrupted,
}

impl Completion {
    /// Shorthand for [`Completion::Done`].
    pub fn done(value: impl Into<String>) -> Self {
        Completion::Done(value.into())
    }

    /// True for [`Completion::Interrupted`].
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Completion::Interrupted)
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Done(value) => f.write_str(value),
            Completion::Interrupted => f.write_str("interrupted"),
        }
    }
}

/// What a finished task reports through its result signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Function returned normally (including the interrupted result).
    Ok(Completion),
    /// Function returned an error or panicked; the description is verbatim.
    Failed(String),
}

impl TaskOutcome {
    /// Lifecycle state this outcome settles into before `Finished`.
    pub fn state(&self) -> TaskState {
        match self {
            TaskOutcome::Ok(Completion::Done(_)) => TaskState::Succeeded,
            TaskOutcome::Ok(Completion::Interrupted) => TaskState::Aborted,
            TaskOutcome::Failed(_) => TaskState::Failed,
        }
    }
}

/// Task lifecycle.
///
/// ```text
/// Idle → Running → { Succeeded | Failed | Aborted } → Finished
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Running,
    Succeeded,
    Failed,
    Aborted,
    Finished,
}

/// Shared, mutex-guarded [`TaskState`].
#[derive(Clone, Debug)]
pub(crate) struct StateCell(Arc<Mutex<TaskState>>);

impl StateCell {
    pub(crate) fn new() -> Self {
        Self(Arc::new(Mutex::new(TaskState::Idle)))
    }

    pub(crate) fn get(&self) -> TaskState {
        *lock(&self.0)
    }

    pub(crate) fn set(&self, state: TaskState) {
        *lock(&self.0) = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_maps_to_terminal_state() {
        assert_eq!(
            TaskOutcome::Ok(Completion::done("ok")).state(),
            TaskState::Succeeded
        );
        assert_eq!(
            TaskOutcome::Ok(Completion::Interrupted).state(),
            TaskState::Aborted
        );
        assert_eq!(TaskOutcome::Failed("x".into()).state(), TaskState::Failed);
    }

    #[test]
    fn completion_display() {
        assert_eq!(Completion::done("Successful completion").to_string(), "Successful completion");
        assert_eq!(Completion::Interrupted.to_string(), "interrupted");
    }
}
