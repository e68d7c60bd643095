//! # Output capture.
//!
//! ```text
//! task ── ctx.println ──► Console ──► (redirected?) ──► LineSink ── Message::Chunk ──► Mailbox
//!                                          └─────────► Stdout (default)
//! ```
//!
//! - [`Console`] explicit handle to the default output destination
//! - [`RedirectGuard`] scoped swap of that destination
//! - [`LineSink`] destination parsing chunks into [`Segment`]s
//! - [`Markers`] sentinels of a redrawable region

pub(crate) mod console;
mod markers;
mod redirect;
mod sink;

pub use console::{Console, Destination, Stdout};
pub use markers::{ERASE_LINE, HIDE_CURSOR, Markers, SHOW_CURSOR, Segment, segments};
pub use redirect::RedirectGuard;
pub use sink::LineSink;
