//! # Presentation side.
//!
//! Everything here runs on the context that drives the [`Presenter`]:
//!
//! ```text
//! worker ── LineSink / runner ── Mailbox ═══► Inbox ── Presenter ──► LineBuffer
//!                                                         └──────► Surface
//! surface requests ──► Controller ──► Executor
//! ```
//!
//! - [`mailbox`] the single FIFO from the worker to the presenter
//! - [`LineBuffer`] lines plus region state; only the last line is replaced
//! - [`Surface`] presentation collaborator callbacks
//! - [`Controller`] start / cancel / shutdown request handling

mod buffer;
mod controller;
pub mod mailbox;
mod presenter;
pub(crate) mod surface;

pub use buffer::{LineBuffer, RenderOp};
pub use controller::{Controller, ShutdownDecision};
pub use mailbox::{Inbox, Mailbox, Message, Signal};
pub use presenter::Presenter;
pub use surface::{NullSurface, Surface};
