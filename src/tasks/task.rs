//! # Task abstraction.
//!
//! This module defines the [`Task`] trait (async, cooperatively cancelable).
//! The common handle type is [`TaskRef`], an `Arc<dyn Task>` suitable for
//! handing to the executor.
//!
//! A task receives a [`TaskContext`] and should periodically check
//! [`TaskContext::is_stop_requested`] to stop cooperatively. The executor never
//! terminates a running task by force.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TaskError;
use crate::tasks::{Completion, TaskContext};

/// Result of one task run.
pub type TaskResult = Result<Completion, TaskError>;

/// Shared handle to a task.
pub type TaskRef = Arc<dyn Task>;

/// # Asynchronous, cooperatively cancelable unit of work.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use taskline::{Completion, Task, TaskContext, TaskResult};
///
/// struct Count { to: u32 }
///
/// #[async_trait]
/// impl Task for Count {
///     fn name(&self) -> &str { "count" }
///
///     async fn run(&self, ctx: TaskContext) -> TaskResult {
///         for i in 0..self.to {
///             if ctx.is_stop_requested() {
///                 return Ok(Completion::Interrupted);
///             }
///             ctx.println(i);
///         }
///         Ok(Completion::done("counted"))
///     }
/// }
/// ```
#[async_trait]
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    fn name(&self) -> &str;

    /// Executes the task until completion or until it observes the stop flag.
    ///
    /// Return `Ok(Completion::Interrupted)` when bailing out on a stop request.
    async fn run(&self, ctx: TaskContext) -> TaskResult;
}
