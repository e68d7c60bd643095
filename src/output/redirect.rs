//! # Scoped output redirection.
//!
//! [`RedirectGuard`] swaps the console destination on acquire and puts the
//! previous one back when released or dropped, on every exit path of the task
//! that owns it (normal return, error, panic).
//!
//! Acquire/release pairs do not nest: a second acquire while the first guard is
//! alive fails with [`RedirectError::AlreadyRedirected`].

use std::sync::Arc;

use crate::error::RedirectError;
use crate::output::{Console, Destination};

/// Holds the console redirected until dropped.
#[must_use = "dropping the guard restores the previous destination immediately"]
pub struct RedirectGuard {
    console: Console,
    previous: Option<Arc<dyn Destination>>,
}

impl RedirectGuard {
    /// Routes `console` to `dest`, remembering the current destination.
    pub fn acquire(console: &Console, dest: Arc<dyn Destination>) -> Result<Self, RedirectError> {
        let previous = console.swap_in(dest)?;
        Ok(Self {
            console: console.clone(),
            previous: Some(previous),
        })
    }

    /// Restores the previous destination now.
    pub fn release(self) {}
}

impl Drop for RedirectGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.console.restore(previous);
        }
    }
}

impl std::fmt::Debug for RedirectGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedirectGuard")
            .field("active", &self.previous.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::console::tests::Capture;

    #[test]
    fn release_restores_previous() {
        let original = Arc::new(Capture::default());
        let captured = Arc::new(Capture::default());
        let console = Console::new(original.clone());

        let guard = RedirectGuard::acquire(&console, captured.clone()).unwrap();
        assert!(console.is_redirected());
        console.write_str("inside");
        guard.release();

        console.write_str("outside");
        assert!(!console.is_redirected());
        assert_eq!(captured.chunks(), vec!["inside"]);
        assert_eq!(original.chunks(), vec!["outside"]);
    }

    #[test]
    fn nested_acquire_is_rejected() {
        let console = Console::new(Arc::new(Capture::default()));
        let _guard = RedirectGuard::acquire(&console, Arc::new(Capture::default())).unwrap();
        let err = RedirectGuard::acquire(&console, Arc::new(Capture::default())).unwrap_err();
        assert_eq!(err, RedirectError::AlreadyRedirected);
    }

    #[test]
    fn restored_on_panic() {
        let original = Arc::new(Capture::default());
        let console = Console::new(original.clone());

        let c = console.clone();
        let res = std::panic::catch_unwind(move || {
            let _guard = RedirectGuard::acquire(&c, Arc::new(Capture::default())).unwrap();
            panic!("boom");
        });
        assert!(res.is_err());
        assert!(!console.is_redirected());
        console.write_str("after");
        assert_eq!(original.chunks(), vec!["after"]);
    }
}
