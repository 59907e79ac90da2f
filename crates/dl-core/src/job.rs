//! The `DeliveryJob` entity and its forward-only state machine.
//!
//! # Transition table
//!
//! ```text
//!                 pickup()                deliver()
//! PendingPickup ───────────▶ PendingDropoff ──────────▶ Completed
//!       │                          │
//!       │ advance_timer → 0        │ advance_timer → 0
//!       ▼                          ▼
//!    Expired                    Expired
//! ```
//!
//! Every operation is total: calling it in a state where the table has no
//! edge is a silent no-op.  Stale or duplicate calls (a late timer, a second
//! trigger for the same zone) are therefore always safe.

use std::time::Duration;

use crate::{JobId, ZonePair, ZoneRef};

/// Lifecycle state of a [`DeliveryJob`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum JobState {
    PendingPickup,
    PendingDropoff,
    Completed,
    Expired,
}

impl JobState {
    /// `true` while the countdown is running.
    #[inline]
    pub fn is_pending(self) -> bool {
        matches!(self, JobState::PendingPickup | JobState::PendingDropoff)
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.is_pending()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobState::PendingPickup  => "pending_pickup",
            JobState::PendingDropoff => "pending_dropoff",
            JobState::Completed      => "completed",
            JobState::Expired        => "expired",
        }
    }
}

/// One delivery: pick something up in one zone, drop it off in another,
/// before the countdown runs out.
///
/// An *offer* is simply a `DeliveryJob` that has not been accepted yet.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryJob {
    id:             JobId,
    pickup_zone:    ZoneRef,
    dropoff_zone:   ZoneRef,
    time_limit:     Duration,
    time_remaining: Duration,
    state:          JobState,
}

impl DeliveryJob {
    /// Create a job in `PendingPickup` with a full countdown.
    ///
    /// The caller (the job registry) is responsible for rejecting a
    /// degenerate pair or a zero time limit before calling this.
    pub fn new(id: JobId, pickup_zone: ZoneRef, dropoff_zone: ZoneRef, time_limit: Duration) -> Self {
        debug_assert!(pickup_zone.id != dropoff_zone.id, "degenerate job pair");
        Self {
            id,
            pickup_zone,
            dropoff_zone,
            time_limit,
            time_remaining: time_limit,
            state: JobState::PendingPickup,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn pickup_zone(&self) -> &ZoneRef {
        &self.pickup_zone
    }

    pub fn dropoff_zone(&self) -> &ZoneRef {
        &self.dropoff_zone
    }

    #[inline]
    pub fn pair(&self) -> ZonePair {
        ZonePair::new(self.pickup_zone.id, self.dropoff_zone.id)
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    #[inline]
    pub fn time_remaining(&self) -> Duration {
        self.time_remaining
    }

    #[inline]
    pub fn state(&self) -> JobState {
        self.state
    }

    /// The zone the courier has to reach next: the pickup zone while
    /// `PendingPickup`, the dropoff zone while `PendingDropoff`, else `None`.
    pub fn relevant_zone(&self) -> Option<&ZoneRef> {
        match self.state {
            JobState::PendingPickup  => Some(&self.pickup_zone),
            JobState::PendingDropoff => Some(&self.dropoff_zone),
            JobState::Completed | JobState::Expired => None,
        }
    }

    /// `"<pickup> → <dropoff>"`, as shown on a job card.
    pub fn route_label(&self) -> String {
        format!("{} → {}", self.pickup_zone.display_name, self.dropoff_zone.display_name)
    }

    /// Whole seconds left on the countdown, rounded up.
    pub fn seconds_left(&self) -> u64 {
        let r = self.time_remaining;
        r.as_secs() + u64::from(r.subsec_nanos() > 0)
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// `PendingPickup → PendingDropoff`.  Returns whether the transition fired.
    pub fn pickup(&mut self) -> bool {
        if self.state != JobState::PendingPickup {
            return false;
        }
        self.state = JobState::PendingDropoff;
        true
    }

    /// `PendingDropoff → Completed`.  Returns whether the transition fired.
    pub fn deliver(&mut self) -> bool {
        if self.state != JobState::PendingDropoff {
            return false;
        }
        self.state = JobState::Completed;
        true
    }

    /// Burn `dt` off the countdown.  Reaching zero moves the job to
    /// `Expired`; returns `true` exactly when that happens.
    ///
    /// No-op for a zero `dt` or a terminal job, so `time_remaining` is frozen
    /// from the moment the job completes or expires.
    pub fn advance_timer(&mut self, dt: Duration) -> bool {
        if !self.state.is_pending() || dt.is_zero() {
            return false;
        }
        self.time_remaining = self.time_remaining.saturating_sub(dt);
        if self.time_remaining.is_zero() {
            self.state = JobState::Expired;
            return true;
        }
        false
    }
}
