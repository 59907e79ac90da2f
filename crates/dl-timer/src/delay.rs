//! The delay-scheduler seam.

use std::fmt;
use std::time::Duration;

/// Cancellation token returned by [`DelayScheduler::schedule`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct TimerHandle(pub u64);

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TimerHandle({})", self.0)
    }
}

/// Anything that can deliver a payload after a delay.
///
/// Payloads are plain data (e.g. "expire offer X") rather than closures, so
/// the owner of the scheduler decides what firing means with full `&mut`
/// access to its own state.
///
/// # Contract
///
/// - A payload is delivered at most once, no earlier than `delay` after it
///   was scheduled.
/// - After a successful [`cancel`][Self::cancel] it is never delivered.
/// - Must not block.
pub trait DelayScheduler<T> {
    /// Schedule `payload` for delivery `delay` from now.
    fn schedule(&mut self, delay: Duration, payload: T) -> TimerHandle;

    /// Cancel a pending payload.  Returns `false` if it already fired, was
    /// already cancelled, or never existed.
    fn cancel(&mut self, handle: TimerHandle) -> bool;
}
