//! Session observer trait for progress reporting and data collection.

use dl_core::SimTime;

/// What one call to [`Session::advance`][crate::Session::advance] did.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct TickSummary {
    /// Spawn cycles that created an offer.
    pub offers_spawned: usize,
    /// Spawn cycles that found no valid pair.
    pub spawn_skipped:  usize,
    /// Offers withdrawn because their accept window closed.
    pub offers_expired: usize,
    /// Expiry timers that fired for offers already accepted or denied.
    pub stale_timers:   usize,
    /// Active jobs whose delivery countdown reached zero.
    pub jobs_expired:   usize,
}

impl TickSummary {
    /// `true` if nothing happened.
    pub fn is_idle(&self) -> bool {
        *self == TickSummary::default()
    }

    pub(crate) fn merge(&mut self, other: TickSummary) {
        self.offers_spawned += other.offers_spawned;
        self.spawn_skipped  += other.spawn_skipped;
        self.offers_expired += other.offers_expired;
        self.stale_timers   += other.stale_timers;
        self.jobs_expired   += other.jobs_expired;
    }
}

/// Callbacks invoked by [`Session::run_ticks`][crate::Session::run_ticks] and
/// [`Session::run_for`][crate::Session::run_for].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: expiry counter
///
/// ```rust,ignore
/// struct ExpiryCounter(usize);
///
/// impl SessionObserver for ExpiryCounter {
///     fn on_tick_end(&mut self, _now: SimTime, summary: &TickSummary) {
///         self.0 += summary.jobs_expired;
///     }
/// }
/// ```
pub trait SessionObserver {
    /// Called before the clock moves, with the time the step starts at.
    fn on_tick_start(&mut self, _now: SimTime) {}

    /// Called after timers and countdowns for the step have run.
    fn on_tick_end(&mut self, _now: SimTime, _summary: &TickSummary) {}

    /// Called once after the last step of a run.
    fn on_session_end(&mut self, _now: SimTime) {}
}

/// A [`SessionObserver`] that does nothing.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
