//! # Task abstractions.
//!
//! - [`Task`] - trait for async, cooperatively cancelable work
//! - [`TaskFn`] / [`BlockingTaskFn`] - closure-backed implementations
//! - [`TaskContext`] - handle given to the running function
//! - [`StopFlag`] - the mutex-guarded cancellation flag
//! - [`Completion`], [`TaskOutcome`], [`TaskState`] - results and lifecycle

mod context;
mod outcome;
mod stop;
mod task;
mod task_fn;

pub use context::TaskContext;
pub(crate) use outcome::StateCell;
pub use outcome::{Completion, TaskOutcome, TaskState};
pub use stop::StopFlag;
pub use task::{Task, TaskRef, TaskResult};
pub use task_fn::{BlockingTaskFn, TaskFn};
