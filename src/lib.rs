//! # taskline
//!
//! **Taskline** runs one long-lived background task at a time with
//! cooperative cancellation, and streams the task's text output (including
//! redrawn progress lines) to a presentation surface that renders on a
//! different context than the one producing the output.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  Surface requests                       worker context
//!  ────────────────                       ──────────────
//!  start/cancel/shutdown                  task.run(ctx)
//!        │                                   │ ctx.println / Progress
//!        ▼                                   ▼
//! ┌─────────────┐  submit   ┌──────────┐  Console ─(redirected)─► LineSink
//! │ Controller  ├──────────►│ Executor │                              │ segments
//! └─────────────┘  cancel   │ (1 slot) │──► runner ── Result/Finished │
//!                           └────┬─────┘            │                 │
//!                                │ events           ▼                 ▼
//!                                ▼            ┌───────────────────────────┐
//!                               Bus           │  Mailbox (one FIFO queue) │
//!                                │            └─────────────┬─────────────┘
//!                                ▼                          ▼
//!                          SubscriberSet            Presenter ── LineBuffer
//!                          (LogWriter, ...)             │
//!                                                       ▼
//!                                             Surface::{append_line, replace_last_line,
//!                                                       on_result, on_error, on_finished}
//! ```
//!
//! ### Lifecycle
//! ```text
//! submit ──► slot taken ──► output redirected ──► TaskStarting
//!   run(ctx) ─┬─ Ok(Done(v))       → Result(Ok)      state Succeeded
//!             ├─ Ok(Interrupted)   → Result(Ok)      state Aborted
//!             └─ Err / panic       → Result(Failed)  state Failed
//!   ──► Finished ──► output restored ──► slot released (await_idle wakes)
//! ```
//!
//! ## Features
//! | Area              | Description                                                       | Key types / traits                          |
//! |-------------------|-------------------------------------------------------------------|---------------------------------------------|
//! | **Execution**     | Single-slot executor, cooperative stop, idle waiting.             | [`Executor`], [`TaskHandle`], [`StopFlag`]  |
//! | **Tasks**         | Tasks as trait objects or closures (async or blocking).           | [`Task`], [`TaskFn`], [`BlockingTaskFn`]    |
//! | **Output**        | Scoped redirect of the default output into a redraw-aware sink.   | [`Console`], [`RedirectGuard`], [`LineSink`]|
//! | **Presentation**  | Ordered rendering on the presenter's context.                     | [`Presenter`], [`Surface`], [`Controller`]  |
//! | **Observability** | Runtime events fanned out to subscribers.                         | [`Event`], [`Subscribe`], [`LogWriter`]     |
//! | **Errors**        | Typed errors for tasks, submission and plumbing.                  | [`TaskError`], [`SubmitError`]              |
//! | **Configuration** | Markers, notices, bus capacity.                                   | [`Config`]                                  |
//!
//! ## Optional features
//! - `logging`: exports [`logger_init`] to install a text/JSON `tracing` subscriber.
//!
//! ## Example
//! ```rust
//! use taskline::{
//!     Completion, Config, ExecutorBuilder, NullSurface, Progress, TaskContext, TaskError,
//!     TaskFn, TaskOutcome,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (exec, mut presenter) = ExecutorBuilder::new(Config::default()).build(NullSurface);
//!
//!     let job = TaskFn::arc("count", |ctx: TaskContext| async move {
//!         ctx.println("counting");
//!         let mut bar = Progress::new(ctx.out(), "Progress", 3);
//!         for _ in 0..3 {
//!             if ctx.is_stop_requested() {
//!                 return Ok(Completion::Interrupted);
//!             }
//!             bar.tick();
//!         }
//!         bar.finish();
//!         Ok::<_, TaskError>(Completion::done("counted"))
//!     });
//!
//!     let handle = exec.submit(job)?;
//!     assert_eq!(handle.join().await?, TaskOutcome::Ok(Completion::done("counted")));
//!
//!     presenter.drain();
//!     assert_eq!(presenter.lines().len(), 2);
//!     Ok(())
//! }
//! ```
mod config;
mod core;
mod error;
mod events;
mod output;
mod present;
mod progress;
mod subscribers;
mod sync;
mod tasks;

// ---- Public re-exports ----

pub use config::{Config, MAX_CONCURRENT};
pub use core::{Executor, ExecutorBuilder, TaskHandle};
pub use error::{RedirectError, RuntimeError, SubmitError, TaskError};
pub use events::{Bus, Event, EventKind};
pub use output::{
    Console, Destination, ERASE_LINE, HIDE_CURSOR, LineSink, Markers, RedirectGuard, SHOW_CURSOR,
    Segment, Stdout, segments,
};
pub use present::{
    Controller, Inbox, LineBuffer, Mailbox, Message, NullSurface, Presenter, RenderOp,
    ShutdownDecision, Signal, Surface, mailbox,
};
pub use progress::Progress;
pub use subscribers::{LogWriter, Subscribe, SubscriberSet, log_event};
pub use tasks::{
    BlockingTaskFn, Completion, StopFlag, Task, TaskContext, TaskFn, TaskOutcome, TaskRef,
    TaskResult, TaskState,
};

// Optional: `tracing-subscriber` setup for binaries.
// Enable with: `--features logging`
#[cfg(feature = "logging")]
mod logger;
#[cfg(feature = "logging")]
pub use logger::{LoggerConfig, LoggerError, LoggerFormat, LoggerOutput, logger_init};
