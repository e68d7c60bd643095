//! # Cooperative stop flag.
//!
//! [`StopFlag`] is the only state written by two execution contexts: the
//! controller sets it, the running task polls it. Every read and write happens
//! under the mutex; the guard never lives across an `.await` or a sleep.

use std::sync::{Arc, Mutex};

use crate::sync::lock;

/// Mutex-guarded boolean shared by a task and its controller.
///
/// Cloning is cheap; all clones observe the same flag.
#[derive(Clone, Debug, Default)]
pub struct StopFlag {
    stopped: Arc<Mutex<bool>>,
}

impl StopFlag {
    /// Creates a flag in the "not stopped" state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop. Idempotent.
    pub fn stop(&self) {
        *lock(&self.stopped) = true;
    }

    /// Returns `true` once a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        *lock(&self.stopped)
    }
}
