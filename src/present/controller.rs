//! # Presentation-side request handling.
//!
//! Translates the surface's three requests (start, cancel, shutdown) into
//! executor calls, gated on [`Executor::is_task_active`].
//!
//! ```text
//! start_requested(task)  ── active? ── yes ──► ignored (None)
//!                                  └── no  ──► submit → Some(handle)
//! cancel_requested()     ── active? ── yes ──► stop notice, request_cancel
//! shutdown_requested()   ── active? ── yes ──► Refuse { notice }, ShutdownRefused
//!                                  └── no  ──► Accept
//! ```

use std::sync::Arc;

use crate::core::{Executor, TaskHandle};
use crate::events::{Event, EventKind};
use crate::tasks::TaskRef;

/// Answer to a shutdown request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ShutdownDecision {
    /// Nothing is running; the surface may close.
    Accept,
    /// A task is active; show `notice` and keep running. Never queued.
    Refuse {
        /// User-visible reason.
        notice: String,
    },
}

/// Handles start / cancel / shutdown requests coming from a surface.
#[derive(Clone, Debug)]
pub struct Controller {
    exec: Arc<Executor>,
}

impl Controller {
    /// Wraps a shared executor.
    pub fn new(exec: Arc<Executor>) -> Self {
        Self { exec }
    }

    /// The wrapped executor.
    pub fn executor(&self) -> &Arc<Executor> {
        &self.exec
    }

    /// Starts `task` unless one is already active.
    pub fn start_requested(&self, task: TaskRef) -> Option<TaskHandle> {
        if self.exec.is_task_active() {
            tracing::debug!(task = task.name(), "start ignored while a task is active");
            return None;
        }
        self.exec.submit(task).ok()
    }

    /// Asks the active task to stop. Returns `false` if nothing was running.
    /// The stop notice is written only when a stop was actually delivered.
    pub fn cancel_requested(&self) -> bool {
        if !self.exec.request_cancel() {
            return false;
        }
        if let Some(notice) = &self.exec.config().stop_notice {
            self.exec.console().write_str(&format!("{notice}\n"));
        }
        true
    }

    /// Decides whether the surface may shut down now.
    pub fn shutdown_requested(&self) -> ShutdownDecision {
        if !self.exec.is_task_active() {
            return ShutdownDecision::Accept;
        }
        let notice = self.exec.config().busy_notice.clone();
        self.exec
            .bus()
            .publish(Event::new(EventKind::ShutdownRefused).with_reason(notice.as_str()));
        ShutdownDecision::Refuse { notice }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Notify;

    use super::*;
    use crate::config::Config;
    use crate::core::ExecutorBuilder;
    use crate::error::TaskError;
    use crate::output::Console;
    use crate::output::console::tests::Capture;
    use crate::present::surface::tests::Recording;
    use crate::tasks::{Completion, TaskContext, TaskFn};

    fn gated(gate: &Arc<Notify>) -> TaskRef {
        let gate = Arc::clone(gate);
        TaskFn::arc("gated", move |ctx: TaskContext| {
            let gate = Arc::clone(&gate);
            async move {
                gate.notified().await;
                if ctx.is_stop_requested() {
                    return Ok(Completion::Interrupted);
                }
                Ok::<_, TaskError>(Completion::done("done"))
            }
        })
    }

    #[tokio::test]
    async fn requests_are_gated_on_activity() {
        let cfg = Config::default().with_stop_notice("Stopping...");
        let (exec, mut presenter) = ExecutorBuilder::new(cfg)
            .with_console(Console::new(Arc::new(Capture::default())))
            .build(Recording::default());
        let ctl = Controller::new(Arc::new(exec));

        assert_eq!(ctl.shutdown_requested(), ShutdownDecision::Accept);
        assert!(!ctl.cancel_requested());

        let gate = Arc::new(Notify::new());
        let handle = ctl.start_requested(gated(&gate)).expect("started");
        assert!(ctl.start_requested(gated(&gate)).is_none());
        assert_eq!(
            ctl.shutdown_requested(),
            ShutdownDecision::Refuse {
                notice: "Processing is in progress".into()
            }
        );

        assert!(ctl.cancel_requested());
        gate.notify_one();
        assert_eq!(
            handle.join().await.unwrap(),
            crate::TaskOutcome::Ok(Completion::Interrupted)
        );
        ctl.executor().await_idle().await;
        assert_eq!(ctl.shutdown_requested(), ShutdownDecision::Accept);

        presenter.drain();
        assert_eq!(presenter.lines(), ["Stopping..."]);
    }

    #[tokio::test]
    async fn no_stop_notice_once_the_task_is_done() {
        let cfg = Config::default().with_stop_notice("Stopping...");
        let original = Arc::new(Capture::default());
        let (exec, mut presenter) = ExecutorBuilder::new(cfg)
            .with_console(Console::new(original.clone()))
            .build(Recording::default());
        let ctl = Controller::new(Arc::new(exec));

        let handle = ctl
            .start_requested(TaskFn::arc("short", |ctx: TaskContext| async move {
                ctx.println("ran");
                Ok::<_, TaskError>(Completion::done("ok"))
            }))
            .expect("started");
        handle.join().await.unwrap();
        ctl.executor().await_idle().await;

        assert!(!ctl.cancel_requested());
        presenter.drain();
        assert_eq!(presenter.lines(), ["ran"]);
        assert!(original.chunks().iter().all(|c| !c.contains("Stopping")));
    }
}
