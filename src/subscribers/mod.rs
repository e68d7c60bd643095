//! # Event subscribers.
//!
//! ```text
//! Runner ── publish(Event) ──► Bus ──► listener ──► SubscriberSet
//!                                                     ├──► LogWriter
//!                                                     └──► custom ...
//! ```
//!
//! - [`Subscribe`] extension trait
//! - [`SubscriberSet`] per-subscriber queues and workers
//! - [`LogWriter`] built-in `tracing` writer

mod log;
mod set;
mod subscriber;

pub use log::{LogWriter, log_event};
pub use set::SubscriberSet;
pub use subscriber::Subscribe;
