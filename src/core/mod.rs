//! Runtime core: the bounded executor and the task runner.
//!
//! - [`executor`]: single-slot admission, cancel requests, idle waiting;
//! - [`runner`]: runs one task, converts faults, delivers `Result`/`Finished`;
//! - [`handle`]: per-task stop and join;
//! - [`builder`]: wires bus, subscribers, mailbox, sink and presenter;
//! - [`active`]: the mutex-guarded active count.

mod active;
mod builder;
mod executor;
mod handle;
mod runner;

use std::any::Any;

pub use builder::ExecutorBuilder;
pub use executor::Executor;
pub use handle::TaskHandle;

/// Renders a panic payload as text.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
