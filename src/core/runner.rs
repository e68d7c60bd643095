//! # Run one task to its terminal state.
//!
//! ## Signal and event flow
//! ```text
//! publish TaskStarting, state = Running
//!   task.run(ctx)  (catch_unwind)
//!   close any redraw region the task left open
//!     ├─ Ok(Done(v))      → TaskSucceeded,  state = Succeeded
//!     ├─ Ok(Interrupted)  → TaskInterrupted, state = Aborted
//!     └─ Err(e) / panic   → fault text written to the console,
//!                           TaskFailed,     state = Failed
//!   post Signal::Result
//!   post Signal::Finished, publish TaskFinished, state = Finished
//! ```
//!
//! ## Rules
//! - Exactly one `Result` then exactly one `Finished` per run
//! - A fault never escapes the worker; panics become [`TaskError::Panicked`]
//! - Output and signals share the mailbox, so every line the task wrote is
//!   rendered before its `Result`
//! - The fault text is always its own line, even if the task stopped inside
//!   a progress redraw
//! - Faults are logged once, by whichever subscriber handles `TaskFailed`

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::core::panic_message;
use crate::error::TaskError;
use crate::events::{Bus, Event, EventKind};
use crate::output::Segment;
use crate::present::{Mailbox, Message, Signal};
use crate::tasks::{Completion, StateCell, TaskContext, TaskOutcome, TaskRef, TaskState};

/// Executes `task` once and delivers its signals.
pub(crate) async fn run_task(
    task: TaskRef,
    name: Arc<str>,
    ctx: TaskContext,
    state: &StateCell,
    bus: &Bus,
    mailbox: &Mailbox,
) -> TaskOutcome {
    state.set(TaskState::Running);
    bus.publish(Event::new(EventKind::TaskStarting).with_task(Arc::clone(&name)));

    let out = ctx.out().clone();
    let outcome = match AssertUnwindSafe(task.run(ctx)).catch_unwind().await {
        Ok(Ok(value)) => TaskOutcome::Ok(value),
        Ok(Err(e)) => TaskOutcome::Failed(e.to_string()),
        Err(panic) => TaskOutcome::Failed(
            TaskError::Panicked {
                error: panic_message(panic.as_ref()),
            }
            .to_string(),
        ),
    };

    mailbox.post(Message::Chunk(vec![Segment::End]));
    if let TaskOutcome::Failed(description) = &outcome {
        out.write_str(&format!("{description}\n"));
    }

    mailbox.post(Message::Signal(Signal::Result {
        task: Arc::clone(&name),
        outcome: outcome.clone(),
    }));
    bus.publish(outcome_event(&name, &outcome));
    state.set(outcome.state());

    mailbox.post(Message::Signal(Signal::Finished {
        task: Arc::clone(&name),
    }));
    bus.publish(Event::new(EventKind::TaskFinished).with_task(name));
    state.set(TaskState::Finished);

    outcome
}

fn outcome_event(name: &Arc<str>, outcome: &TaskOutcome) -> Event {
    let ev = match outcome {
        TaskOutcome::Ok(Completion::Done(value)) => {
            Event::new(EventKind::TaskSucceeded).with_reason(value.as_str())
        }
        TaskOutcome::Ok(Completion::Interrupted) => Event::new(EventKind::TaskInterrupted),
        TaskOutcome::Failed(description) => {
            Event::new(EventKind::TaskFailed).with_reason(description.as_str())
        }
    };
    ev.with_task(Arc::clone(name))
}
