//! Error types used by the executor, the output redirection and tasks.
//!
//! - [`TaskError`]: faults raised by a user task function.
//! - [`SubmitError`]: a submission that was not started.
//! - [`RedirectError`]: misuse of the output redirection contract.
//! - [`RuntimeError`]: failures of the runtime plumbing itself.
//!
//! [`TaskError`] provides helper methods (`as_label`, `as_message`) for logs.

use thiserror::Error;

/// # Errors produced by task execution.
///
/// A task function returns one of these to report a fault. Panics inside a
/// task are captured by the runner and converted into [`TaskError::Panicked`].
/// Either way the fault description travels through the error signal and the
/// task still reaches `Finished`.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    /// Task function failed.
    #[error("execution failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Task function panicked; the payload is kept as text.
    #[error("task panicked: {error}")]
    Panicked {
        /// Panic payload rendered as a string.
        error: String,
    },
}

impl TaskError {
    /// Shorthand for [`TaskError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        TaskError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use taskline::TaskError;
    ///
    /// let err = TaskError::fail("disk full");
    /// assert_eq!(err.as_label(), "task_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Panicked { .. } => "task_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            TaskError::Fail { error } => format!("error: {error}"),
            TaskError::Panicked { error } => format!("panic: {error}"),
        }
    }
}

impl From<std::io::Error> for TaskError {
    fn from(e: std::io::Error) -> Self {
        TaskError::Fail {
            error: e.to_string(),
        }
    }
}

/// Errors from [`RedirectGuard::acquire`](crate::RedirectGuard::acquire).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectError {
    /// The console is already redirected; acquire/release must not nest.
    #[error("default output is already redirected")]
    AlreadyRedirected,
}

/// Reason a submission was not started.
///
/// A rejected submission has no side effects: the active count is unchanged
/// and no lifecycle signal is emitted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// A task is already running; the executor does not queue.
    #[error("a task is already running")]
    Busy,

    /// The default output could not be taken over for the new task.
    #[error("output redirect failed: {0}")]
    Redirect(#[from] RedirectError),
}

/// # Errors produced by the runtime plumbing.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The worker running a task could not be joined.
    #[error("failed to join task '{task}': {reason}")]
    Join {
        /// Task name.
        task: String,
        /// Join failure description.
        reason: String,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Join { .. } => "runtime_join_failed",
        }
    }
}
