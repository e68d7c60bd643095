//! # Active-task counter.
//!
//! A mutex-guarded count bounded by [`MAX_CONCURRENT`](crate::MAX_CONCURRENT)
//! plus a [`Notify`] that wakes [`ActiveCount::wait_idle`] callers when the
//! count returns to zero.

use std::sync::Mutex;

use tokio::sync::Notify;

use crate::sync::lock;

pub(crate) struct ActiveCount {
    count: Mutex<usize>,
    max: usize,
    idle: Notify,
}

impl ActiveCount {
    pub(crate) fn new(max: usize) -> Self {
        Self {
            count: Mutex::new(0),
            max: max.max(1),
            idle: Notify::new(),
        }
    }

    /// Takes a slot if one is free. Never queues.
    pub(crate) fn try_enter(&self) -> bool {
        let mut count = lock(&self.count);
        if *count >= self.max {
            return false;
        }
        *count += 1;
        true
    }

    /// Returns a slot and wakes idle waiters when none is taken.
    pub(crate) fn leave(&self) {
        let idle = {
            let mut count = lock(&self.count);
            *count = count.saturating_sub(1);
            *count == 0
        };
        if idle {
            self.idle.notify_waiters();
        }
    }

    pub(crate) fn get(&self) -> usize {
        *lock(&self.count)
    }

    /// Resolves once the count is zero.
    pub(crate) async fn wait_idle(&self) {
        loop {
            let notified = self.idle.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            if self.get() == 0 {
                return;
            }
            notified.await;
        }
    }
}
