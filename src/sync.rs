use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks `m`, recovering the data if a previous holder panicked.
///
/// Every mutex in this crate guards plain values (flags, counters, slots) that
/// stay consistent across a panic.
#[inline]
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
