//! # Optional `tracing` subscriber setup (feature `logging`).
//!
//! The library itself only emits `tracing` records; binaries call
//! [`logger_init`] once to install a text or JSON formatter on stderr (or
//! stdout, see [`LoggerOutput`]).

mod config;
mod error;
mod format;
mod log;

pub use config::LoggerConfig;
pub use error::LoggerError;
pub use format::{LoggerFormat, LoggerOutput};

/// Installs the global subscriber described by `cfg`.
pub fn logger_init(cfg: &LoggerConfig) -> Result<(), LoggerError> {
    log::Logger::init(cfg)
}
