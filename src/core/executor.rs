//! # Bounded executor.
//!
//! Runs at most [`MAX_CONCURRENT`] (one) task at a time and never queues.
//!
//! ## Architecture
//! ```text
//! submit(task)
//!   ├─ ActiveCount::try_enter ── full ──► Err(Busy)   (no event, no signal)
//!   ├─ RedirectGuard::acquire(console → LineSink)
//!   ├─ start notice (optional)
//!   └─ tokio::spawn ──► runner::run_task ──► Result, Finished
//!                         └─ Lease::drop: restore output, clear slot, leave
//! ```
//!
//! ## Rules
//! - The output destination is restored before the active count drops, so a
//!   submit accepted afterwards always finds the console free
//! - The lease is released on every exit path of the worker, including a panic
//!   that escapes the runner
//! - `request_cancel` only sets the stop flag; the task decides when to stop

use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::config::{Config, MAX_CONCURRENT};
use crate::core::active::ActiveCount;
use crate::core::handle::{TaskHandle, request_stop};
use crate::core::runner;
use crate::error::SubmitError;
use crate::events::{Bus, Event, EventKind};
use crate::output::{Console, LineSink, RedirectGuard};
use crate::present::Mailbox;
use crate::sync::lock;
use crate::tasks::{StateCell, StopFlag, TaskContext, TaskRef};

/// The task currently holding the slot.
struct Running {
    name: Arc<str>,
    stop: StopFlag,
    state: StateCell,
}

struct Shared {
    cfg: Config,
    bus: Bus,
    console: Console,
    sink: Arc<LineSink>,
    active: ActiveCount,
    current: Mutex<Option<Running>>,
}

/// Single-slot task executor.
///
/// Created by [`ExecutorBuilder`](crate::ExecutorBuilder). Must be used inside
/// a tokio runtime.
pub struct Executor {
    shared: Arc<Shared>,
    listener: CancellationToken,
}

impl Executor {
    pub(crate) fn new_internal(
        cfg: Config,
        bus: Bus,
        console: Console,
        mailbox: Mailbox,
        listener: CancellationToken,
    ) -> Self {
        let sink = Arc::new(LineSink::new(cfg.markers.clone(), mailbox));
        Self {
            shared: Arc::new(Shared {
                cfg,
                bus,
                console,
                sink,
                active: ActiveCount::new(MAX_CONCURRENT),
                current: Mutex::new(None),
            }),
            listener,
        }
    }

    /// Starts `task` if the slot is free.
    ///
    /// Returns [`SubmitError::Busy`] without side effects while another task
    /// is active.
    pub fn submit(&self, task: TaskRef) -> Result<TaskHandle, SubmitError> {
        let sh = &self.shared;
        if !sh.active.try_enter() {
            tracing::debug!(task = task.name(), "submit rejected: a task is already running");
            return Err(SubmitError::Busy);
        }

        let guard = match RedirectGuard::acquire(&sh.console, sh.sink.clone()) {
            Ok(guard) => guard,
            Err(e) => {
                sh.active.leave();
                return Err(e.into());
            }
        };

        let name: Arc<str> = Arc::from(task.name());
        sh.bus
            .publish(Event::new(EventKind::OutputRedirected).with_task(Arc::clone(&name)));
        if let Some(notice) = &sh.cfg.start_notice {
            sh.console.write_str(&format!("{notice}\n"));
        }

        let stop = StopFlag::new();
        let state = StateCell::new();
        *lock(&sh.current) = Some(Running {
            name: Arc::clone(&name),
            stop: stop.clone(),
            state: state.clone(),
        });

        let ctx = TaskContext::new(Arc::clone(&name), stop.clone(), sh.console.clone());
        let lease = Lease {
            shared: Arc::clone(sh),
            guard: Some(guard),
            task: Arc::clone(&name),
        };
        let (run_name, run_state) = (Arc::clone(&name), state.clone());
        let join = tokio::spawn(async move {
            let outcome = runner::run_task(
                task,
                run_name,
                ctx,
                &run_state,
                &lease.shared.bus,
                lease.shared.sink.mailbox(),
            )
            .await;
            drop(lease);
            outcome
        });

        Ok(TaskHandle::new(name, stop, state, sh.bus.clone(), join))
    }

    /// Sets the active task's stop flag.
    ///
    /// Returns `false` when no task is active or it already finished.
    pub fn request_cancel(&self) -> bool {
        let running = lock(&self.shared.current)
            .as_ref()
            .map(|r| (Arc::clone(&r.name), r.stop.clone(), r.state.clone()));

        match running {
            Some((name, stop, state)) => request_stop(&name, &stop, &state, &self.shared.bus),
            None => {
                tracing::debug!("cancel requested with no active task");
                false
            }
        }
    }

    /// True at capacity; a submit now would be rejected.
    pub fn is_busy(&self) -> bool {
        self.shared.active.get() >= MAX_CONCURRENT
    }

    /// True while a task holds the slot.
    pub fn is_task_active(&self) -> bool {
        self.shared.active.get() > 0
    }

    /// Number of running tasks (0 or 1).
    pub fn active_count(&self) -> usize {
        self.shared.active.get()
    }

    /// Name of the task holding the slot, if any.
    pub fn current_task(&self) -> Option<String> {
        lock(&self.shared.current)
            .as_ref()
            .map(|r| r.name.to_string())
    }

    /// Resolves once no task is active.
    ///
    /// Call after a `Finished` signal before re-enabling start.
    pub async fn await_idle(&self) {
        self.shared.active.wait_idle().await;
    }

    /// The default output channel tasks write through.
    pub fn console(&self) -> &Console {
        &self.shared.console
    }

    /// The runtime event bus.
    pub fn bus(&self) -> &Bus {
        &self.shared.bus
    }

    /// The configuration this executor was built with.
    pub fn config(&self) -> &Config {
        &self.shared.cfg
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        self.listener.cancel();
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("active", &self.active_count())
            .field("current", &self.current_task())
            .finish_non_exhaustive()
    }
}

/// Slot ownership of one run; released on drop.
struct Lease {
    shared: Arc<Shared>,
    guard: Option<RedirectGuard>,
    task: Arc<str>,
}

impl Drop for Lease {
    fn drop(&mut self) {
        if let Some(guard) = self.guard.take() {
            guard.release();
            self.shared
                .bus
                .publish(Event::new(EventKind::OutputRestored).with_task(Arc::clone(&self.task)));
        }
        lock(&self.shared.current).take();
        self.shared.active.leave();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc as std_mpsc;
    use std::time::Duration;

    use tokio::sync::{Notify, mpsc};

    use super::*;
    use crate::ExecutorBuilder;
    use crate::error::TaskError;
    use crate::output::console::tests::Capture;
    use crate::present::Presenter;
    use crate::present::surface::tests::{Call, Recording};
    use crate::tasks::{BlockingTaskFn, Completion, TaskFn, TaskOutcome, TaskState};

    struct Fixture {
        exec: Executor,
        presenter: Presenter,
        original: Arc<Capture>,
        rec: Recording,
    }

    fn fixture(cfg: Config) -> Fixture {
        let original = Arc::new(Capture::default());
        let rec = Recording::default();
        let (exec, presenter) = ExecutorBuilder::new(cfg)
            .with_console(Console::new(original.clone()))
            .build(rec.clone());
        Fixture {
            exec,
            presenter,
            original,
            rec,
        }
    }

    fn assert_restored(f: &Fixture) {
        assert_eq!(f.exec.active_count(), 0);
        assert!(!f.exec.console().is_redirected());
        f.exec.console().write_str("after");
        assert_eq!(f.original.chunks().last().map(String::as_str), Some("after"));
    }

    fn signal_calls(calls: &[Call]) -> Vec<Call> {
        calls
            .iter()
            .filter(|c| matches!(c, Call::Result(_) | Call::Error(_) | Call::Finished))
            .cloned()
            .collect()
    }

    #[tokio::test]
    async fn busy_submit_changes_nothing() {
        let mut f = fixture(Config::default());
        let mut events = f.exec.bus().subscribe();

        let gate = Arc::new(Notify::new());
        let g = Arc::clone(&gate);
        let first = f
            .exec
            .submit(TaskFn::arc("first", move |_ctx: TaskContext| {
                let g = Arc::clone(&g);
                async move {
                    g.notified().await;
                    Ok::<_, TaskError>(Completion::done("first"))
                }
            }))
            .unwrap();

        assert!(f.exec.is_busy());
        let rejected = f.exec.submit(TaskFn::arc("second", |_ctx: TaskContext| async {
            Ok::<_, TaskError>(Completion::done("second"))
        }));
        assert_eq!(rejected.unwrap_err(), SubmitError::Busy);
        assert_eq!(f.exec.active_count(), 1);
        assert_eq!(f.exec.current_task().as_deref(), Some("first"));

        gate.notify_one();
        first.join().await.unwrap();
        f.presenter.drain();

        assert_eq!(
            signal_calls(&f.rec.calls()),
            vec![Call::Result("first".into()), Call::Finished]
        );
        let mut starts = 0;
        while let Ok(ev) = events.try_recv() {
            if ev.kind == EventKind::TaskStarting {
                assert_eq!(ev.task.as_deref(), Some("first"));
                starts += 1;
            }
        }
        assert_eq!(starts, 1);
        assert_restored(&f);
    }

    #[tokio::test]
    async fn one_result_then_one_finished_per_task() {
        let mut f = fixture(Config::default());

        let tasks: [TaskRef; 3] = [
            TaskFn::arc("ok", |_ctx: TaskContext| async { Ok::<_, TaskError>(Completion::done("v")) }),
            TaskFn::arc("int", |_ctx: TaskContext| async { Ok::<_, TaskError>(Completion::Interrupted) }),
            TaskFn::arc("bad", |_ctx: TaskContext| async { Err::<Completion, _>(TaskError::fail("x")) }),
        ];
        for task in tasks {
            let h = f.exec.submit(task).unwrap();
            h.join().await.unwrap();
            f.exec.await_idle().await;
        }
        f.presenter.drain();

        assert_eq!(
            signal_calls(&f.rec.calls()),
            vec![
                Call::Result("v".into()),
                Call::Finished,
                Call::Result("interrupted".into()),
                Call::Finished,
                Call::Error("execution failed: x".into()),
                Call::Finished,
            ]
        );
    }

    #[tokio::test]
    async fn unchecked_flag_still_succeeds() {
        let f = fixture(Config::default());
        let h = f
            .exec
            .submit(TaskFn::arc("deaf", |_ctx: TaskContext| async {
                tokio::time::sleep(Duration::from_millis(20)).await;
                Ok::<_, TaskError>(Completion::done("finished anyway"))
            }))
            .unwrap();

        assert!(f.exec.request_cancel());
        assert!(h.stop());
        let outcome = h.join().await.unwrap();
        assert_eq!(outcome, TaskOutcome::Ok(Completion::done("finished anyway")));
        assert_eq!(outcome.state(), TaskState::Succeeded);
        assert_restored(&f);
    }

    #[tokio::test]
    async fn stop_after_third_unit_interrupts() {
        let mut f = fixture(Config::default());
        let (ack_tx, mut ack_rx) = mpsc::unbounded_channel::<()>();
        let (go_tx, go_rx) = std_mpsc::channel::<()>();
        let go_rx = Mutex::new(go_rx);

        let h = f
            .exec
            .submit(BlockingTaskFn::arc("units", move |ctx: TaskContext| -> crate::TaskResult {
                for i in 1..=10 {
                    if ctx.is_stop_requested() {
                        return Ok(Completion::Interrupted);
                    }
                    ctx.println(format!("unit {i}"));
                    if i == 3 {
                        let _ = ack_tx.send(());
                        let _ = go_rx.lock().unwrap().recv();
                    }
                }
                Ok(Completion::done("all units"))
            }))
            .unwrap();

        ack_rx.recv().await.unwrap();
        assert!(f.exec.request_cancel());
        go_tx.send(()).unwrap();

        let outcome = h.join().await.unwrap();
        assert_eq!(outcome, TaskOutcome::Ok(Completion::Interrupted));
        assert_restored(&f);

        f.presenter.drain();
        assert_eq!(f.presenter.lines(), ["unit 1", "unit 2", "unit 3"]);
        assert_eq!(
            signal_calls(&f.rec.calls()),
            vec![Call::Result("interrupted".into()), Call::Finished]
        );
        assert!(!f.exec.request_cancel());
    }

    #[tokio::test]
    async fn fault_after_two_lines_adds_error_line() {
        let mut f = fixture(Config::default());
        let h = f
            .exec
            .submit(TaskFn::arc("faulty", |ctx: TaskContext| async move {
                ctx.println("one");
                ctx.println("two");
                Err::<Completion, _>(TaskError::fail("boom"))
            }))
            .unwrap();

        let outcome = h.join().await.unwrap();
        assert_eq!(outcome, TaskOutcome::Failed("execution failed: boom".into()));
        assert_restored(&f);

        f.presenter.drain();
        assert_eq!(f.presenter.lines(), ["one", "two", "execution failed: boom"]);
        assert_eq!(
            signal_calls(&f.rec.calls()),
            vec![Call::Error("execution failed: boom".into()), Call::Finished]
        );
    }

    #[tokio::test]
    async fn fault_mid_progress_starts_fresh_lines() {
        let mut f = fixture(Config::default());
        let h = f
            .exec
            .submit(TaskFn::arc("broken-bar", |ctx: TaskContext| async move {
                ctx.println("header");
                ctx.out().write_str("\x1b[?25l\r\x1b[KProgress 1/10");
                Err::<Completion, _>(TaskError::fail("boom"))
            }))
            .unwrap();
        h.join().await.unwrap();
        f.exec.await_idle().await;

        let h = f
            .exec
            .submit(TaskFn::arc("after", |ctx: TaskContext| async move {
                ctx.println("second task line A");
                ctx.println("second task line B");
                Ok::<_, TaskError>(Completion::done("ok"))
            }))
            .unwrap();
        h.join().await.unwrap();
        f.exec.await_idle().await;

        f.presenter.drain();
        assert_eq!(
            f.presenter.lines(),
            [
                "header",
                "Progress 1/10",
                "execution failed: boom",
                "second task line A",
                "second task line B",
            ]
        );
    }

    #[tokio::test]
    async fn panics_become_faults() {
        let mut f = fixture(Config::default());

        let h = f
            .exec
            .submit(BlockingTaskFn::arc("sync-panic", |_ctx: TaskContext| -> crate::TaskResult {
                panic!("kaboom")
            }))
            .unwrap();
        assert_eq!(
            h.join().await.unwrap(),
            TaskOutcome::Failed("task panicked: kaboom".into())
        );
        f.exec.await_idle().await;

        let h = f
            .exec
            .submit(TaskFn::arc("async-panic", |_ctx: TaskContext| async {
                if true {
                    panic!("async kaboom");
                }
                Ok::<_, TaskError>(Completion::done("unreachable"))
            }))
            .unwrap();
        assert_eq!(
            h.join().await.unwrap(),
            TaskOutcome::Failed("task panicked: async kaboom".into())
        );
        assert_restored(&f);

        f.presenter.drain();
        assert_eq!(
            f.presenter.lines(),
            ["task panicked: kaboom", "task panicked: async kaboom"]
        );
    }

    #[tokio::test]
    async fn interleaved_writers_keep_submission_order() {
        let mut f = fixture(Config::default());
        let (to_test, mut from_task) = mpsc::unbounded_channel::<()>();
        let (to_task, from_test) = std_mpsc::channel::<()>();
        let from_test = Mutex::new(from_test);

        let h = f
            .exec
            .submit(BlockingTaskFn::arc("ping", move |ctx: TaskContext| -> crate::TaskResult {
                for i in 0..3 {
                    ctx.println(format!("worker {i}"));
                    let _ = to_test.send(());
                    let _ = from_test.lock().unwrap().recv();
                }
                Ok(Completion::done("pong"))
            }))
            .unwrap();

        let console = f.exec.console().clone();
        for i in 0..3 {
            from_task.recv().await.unwrap();
            console.write_str(&format!("other {i}\n"));
            to_task.send(()).unwrap();
        }
        h.join().await.unwrap();

        f.presenter.drain();
        assert_eq!(
            f.presenter.lines(),
            ["worker 0", "other 0", "worker 1", "other 1", "worker 2", "other 2"]
        );
    }

    #[tokio::test]
    async fn start_notice_and_handle_state() {
        let mut f = fixture(Config::default().with_start_notice("Started"));
        let h = f
            .exec
            .submit(TaskFn::arc("quick", |ctx: TaskContext| async move {
                ctx.println("work");
                Ok::<_, TaskError>(Completion::done("ok"))
            }))
            .unwrap();
        assert_eq!(h.name(), "quick");

        f.exec.await_idle().await;
        assert_eq!(h.state(), TaskState::Finished);
        assert!(h.join().await.is_ok());

        f.presenter.drain();
        assert_eq!(f.presenter.lines(), ["Started", "work"]);
    }

    #[tokio::test]
    async fn stop_after_finish_is_noop() {
        let f = fixture(Config::default());
        let h = f
            .exec
            .submit(TaskFn::arc("done", |_ctx: TaskContext| async {
                Ok::<_, TaskError>(Completion::done("ok"))
            }))
            .unwrap();

        f.exec.await_idle().await;
        assert_eq!(h.state(), TaskState::Finished);
        assert!(!h.stop());
        assert!(!f.exec.request_cancel());
    }
}
