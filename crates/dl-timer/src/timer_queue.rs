//! `TimerQueue`: deadline-ordered delayed payloads on a virtual clock.
//!
//! # Layout
//!
//! Deadlines live in a `BTreeMap<SimTime, Vec<TimerHandle>>`; payloads live
//! in a `HashMap<TimerHandle, T>`.  Cancelling only removes the payload: the
//! handle stays in its deadline bucket and is skipped when the bucket is
//! drained.  That keeps `cancel` O(1) at the price of a few dead handles that
//! disappear once their deadline passes.
//!
//! Payloads sharing a deadline fire in the order they were scheduled.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use dl_core::SimTime;
use tracing::trace;

use crate::{DelayScheduler, TimerHandle};

/// A virtual-clock timer queue.
pub struct TimerQueue<T> {
    now:       SimTime,
    deadlines: BTreeMap<SimTime, Vec<TimerHandle>>,
    pending:   HashMap<TimerHandle, T>,
    next:      u64,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self {
            now:       SimTime::ZERO,
            deadlines: BTreeMap::new(),
            pending:   HashMap::new(),
            next:      0,
        }
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The queue's current instant.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Move the clock forward by `dt` and return every payload whose deadline
    /// is now due, earliest first.
    pub fn advance(&mut self, dt: Duration) -> Vec<T> {
        let target = self.now + dt;
        self.advance_to(target)
    }

    /// Move the clock to `target` (never backwards) and return due payloads.
    pub fn advance_to(&mut self, target: SimTime) -> Vec<T> {
        let mut due = Vec::new();
        while let Some((_, payload)) = self.pop_due(target) {
            due.push(payload);
        }
        if target > self.now {
            self.now = target;
        }
        due
    }

    /// Fire the earliest live payload due at or before `limit`, moving the
    /// clock to its deadline.  `None` (clock untouched) when nothing is due.
    ///
    /// Anything scheduled after this returns is measured from the fired
    /// deadline, so a caller that loops on `pop_due` sees every timer at its
    /// own instant however coarse its steps are.
    pub fn pop_due(&mut self, limit: SimTime) -> Option<(SimTime, T)> {
        loop {
            let mut entry = self.deadlines.first_entry()?;
            let deadline = *entry.key();
            if deadline > limit {
                return None;
            }
            let handle = entry.get_mut().remove(0);
            if entry.get().is_empty() {
                entry.remove();
            }
            if let Some(payload) = self.pending.remove(&handle) {
                if deadline > self.now {
                    self.now = deadline;
                }
                return Some((deadline, payload));
            }
        }
    }

    /// `true` while `handle` has neither fired nor been cancelled.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle)
    }

    /// The earliest deadline that still has a live payload.
    pub fn next_deadline(&self) -> Option<SimTime> {
        self.deadlines
            .iter()
            .find(|(_, handles)| handles.iter().any(|h| self.pending.contains_key(h)))
            .map(|(&t, _)| t)
    }

    /// Number of live (not yet fired, not cancelled) payloads.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> DelayScheduler<T> for TimerQueue<T> {
    fn schedule(&mut self, delay: Duration, payload: T) -> TimerHandle {
        let handle = TimerHandle(self.next);
        self.next += 1;
        let deadline = self.now + delay;
        self.deadlines.entry(deadline).or_default().push(handle);
        self.pending.insert(handle, payload);
        trace!(%handle, %deadline, "timer scheduled");
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let cancelled = self.pending.remove(&handle).is_some();
        if cancelled {
            trace!(%handle, "timer cancelled");
        }
        cancelled
    }
}

impl<T> std::fmt::Debug for TimerQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerQueue")
            .field("now", &self.now)
            .field("pending", &self.pending.len())
            .finish()
    }
}
