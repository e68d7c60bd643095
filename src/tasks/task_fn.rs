//! # Function-backed tasks
//!
//! [`TaskFn`] wraps an async closure `F: Fn(TaskContext) -> Fut`, producing a
//! fresh future per run. [`BlockingTaskFn`] wraps a synchronous closure and
//! runs it on tokio's blocking pool, so the function may sleep or block
//! between stop-flag checks without stalling the runtime.
//!
//! Task arguments are whatever the closure captures.
//!
//! ## Example
//! ```rust
//! use taskline::{Completion, TaskContext, TaskError, TaskFn, TaskRef};
//!
//! let input = vec![1, 2, 3];
//! let t: TaskRef = TaskFn::arc("sum", move |ctx: TaskContext| {
//!     let input = input.clone();
//!     async move {
//!         ctx.println(format!("args: {input:?}"));
//!         Ok::<_, TaskError>(Completion::done(input.iter().sum::<i32>().to_string()))
//!     }
//! });
//!
//! assert_eq!(t.name(), "sum");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::panic_message;
use crate::error::TaskError;
use crate::tasks::task::{Task, TaskResult};
use crate::tasks::TaskContext;

/// Async function-backed task.
#[derive(Debug)]
pub struct TaskFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> TaskFn<F> {
    /// Creates a new function-backed task.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self { name: name.into(), f }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Task for TaskFn<F>
where
    F: Fn(TaskContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = TaskResult> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: TaskContext) -> TaskResult {
        (self.f)(ctx).await
    }
}

/// Synchronous function-backed task, executed via `spawn_blocking`.
#[derive(Debug)]
pub struct BlockingTaskFn<F> {
    name: Cow<'static, str>,
    f: Arc<F>,
}

impl<F> BlockingTaskFn<F> {
    /// Creates a new blocking task.
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f: Arc::new(f),
        }
    }

    /// Creates the task and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F> Task for BlockingTaskFn<F>
where
    F: Fn(TaskContext) -> TaskResult + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn run(&self, ctx: TaskContext) -> TaskResult {
        let f = Arc::clone(&self.f);
        match tokio::task::spawn_blocking(move || f(ctx)).await {
            Ok(res) => res,
            Err(e) if e.is_panic() => Err(TaskError::Panicked {
                error: panic_message(e.into_panic().as_ref()),
            }),
            Err(e) => Err(TaskError::fail(e.to_string())),
        }
    }
}
