//! The `Session` struct and its advance loop.

use std::sync::Arc;
use std::time::Duration;

use dl_core::{DeliveryJob, JobConfig, JobId, SimClock, SimRng, SimTime, ZoneCatalog, ZoneId};
use dl_events::EventBus;
use dl_jobs::{JobRegistry, JobResult, OfferScheduler, OfferTimer, TimerOutcome};
use dl_timer::TimerQueue;
use tracing::{debug, trace};

use crate::{SessionError, SessionObserver, SessionResult, TickSummary};

/// One running instance of the job subsystem.
///
/// Owns every piece of mutable state: the virtual clock, the registry, the
/// offer scheduler and its timer queue, and the RNG.  Because all mutation
/// goes through `&mut Session`, the registry has exactly one writer.
///
/// Timers fire only inside [`advance`][Self::advance], each at its own
/// deadline, so coarse and fine steps over the same span produce the same
/// history.
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].
pub struct Session {
    pub(crate) config:   JobConfig,
    pub(crate) clock:    SimClock,
    pub(crate) catalog:  ZoneCatalog,
    pub(crate) registry: JobRegistry,
    pub(crate) offers:   OfferScheduler,
    pub(crate) timers:   TimerQueue<OfferTimer>,
    pub(crate) rng:      SimRng,
}

impl Session {
    // ── Control ───────────────────────────────────────────────────────────

    /// Begin periodic offer generation.  Idempotent.
    pub fn start(&mut self) {
        self.offers.start(&mut self.timers, &mut self.rng);
    }

    /// Stop generating offers.  Open offers still expire on schedule.
    pub fn stop(&mut self) {
        self.offers.stop(&mut self.timers);
    }

    pub fn is_running(&self) -> bool {
        self.offers.is_running()
    }

    /// Move the clock forward by `dt`.
    ///
    /// Time is walked deadline by deadline: job countdowns run up to each due
    /// timer, the timer fires at its own instant (so anything it schedules is
    /// measured from there), and the countdowns then run on to the end of the
    /// step.  The outcome does not depend on how `dt` is sliced.
    pub fn advance(&mut self, dt: Duration) -> TickSummary {
        let mut summary = TickSummary::default();
        let target = self.clock.now() + dt;
        let mut elapsed_to = self.clock.now();

        while let Some((deadline, timer)) = self.timers.pop_due(target) {
            summary.jobs_expired += self.registry.tick(deadline.since(elapsed_to));
            elapsed_to = elapsed_to.max(deadline);

            let outcome = self.offers.on_timer(
                timer,
                &self.catalog,
                &mut self.registry,
                &mut self.rng,
                &mut self.timers,
            );
            trace!(?outcome, at = %deadline, "timer fired");
            match outcome {
                TimerOutcome::Spawned(_)      => summary.offers_spawned += 1,
                TimerOutcome::SpawnSkipped    => summary.spawn_skipped += 1,
                TimerOutcome::OfferExpired(_) => summary.offers_expired += 1,
                TimerOutcome::Stale(_)        => summary.stale_timers += 1,
            }
        }

        self.timers.advance_to(target);
        summary.jobs_expired += self.registry.tick(target.since(elapsed_to));
        self.clock.advance(dt);
        summary
    }

    /// Run exactly `n` steps of `dt`.  Returns the merged summary.
    pub fn run_ticks<O: SessionObserver>(
        &mut self,
        n:        u64,
        dt:       Duration,
        observer: &mut O,
    ) -> SessionResult<TickSummary> {
        if dt.is_zero() {
            return Err(SessionError::ZeroTick);
        }
        let mut total = TickSummary::default();
        for _ in 0..n {
            total.merge(self.step(dt, observer));
        }
        observer.on_session_end(self.now());
        Ok(total)
    }

    /// Run until `duration` has elapsed, in steps of `dt`.  The last step is
    /// shortened so the clock lands exactly on the end.
    pub fn run_for<O: SessionObserver>(
        &mut self,
        duration: Duration,
        dt:       Duration,
        observer: &mut O,
    ) -> SessionResult<TickSummary> {
        if dt.is_zero() {
            return Err(SessionError::ZeroTick);
        }
        let end = self.now() + duration;
        let mut total = TickSummary::default();
        while self.now() < end {
            let step = dt.min(end - self.now());
            total.merge(self.step(step, observer));
        }
        observer.on_session_end(self.now());
        Ok(total)
    }

    fn step<O: SessionObserver>(&mut self, dt: Duration, observer: &mut O) -> TickSummary {
        observer.on_tick_start(self.now());
        let summary = self.advance(dt);
        observer.on_tick_end(self.now(), &summary);
        summary
    }

    // ── Player input ──────────────────────────────────────────────────────

    /// Accept an open offer.  Its accept-window timer is cancelled.
    pub fn accept_offer(&mut self, id: JobId) -> JobResult<()> {
        self.registry.accept_offer(id)?;
        self.offers.cancel_expiry(id, &mut self.timers);
        Ok(())
    }

    /// Decline an open offer.  Its accept-window timer is cancelled.
    pub fn deny_offer(&mut self, id: JobId) -> JobResult<()> {
        self.registry.deny_offer(id)?;
        self.offers.cancel_expiry(id, &mut self.timers);
        Ok(())
    }

    /// The courier entered `zone`.  Returns how many jobs reacted.
    pub fn on_zone_entered(&mut self, zone: ZoneId) -> usize {
        let n = self.registry.route_zone_trigger(zone);
        debug!(%zone, jobs = n, now = %self.now(), "zone entered");
        n
    }

    /// Run one spawn cycle immediately, outside the periodic schedule.
    pub fn spawn_offer_now(&mut self) -> JobResult<JobId> {
        self.offers
            .spawn_offer(&self.catalog, &mut self.registry, &mut self.rng, &mut self.timers)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn config(&self) -> &JobConfig {
        &self.config
    }

    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    pub fn registry(&self) -> &JobRegistry {
        &self.registry
    }

    pub fn offers(&self) -> &OfferScheduler {
        &self.offers
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        self.registry.bus()
    }

    pub fn active_jobs(&self) -> &[DeliveryJob] {
        self.registry.active_jobs()
    }

    pub fn available_offers(&self) -> &[DeliveryJob] {
        self.registry.available_offers()
    }

    /// Timers still waiting to fire (spawn cycle plus open accept windows).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// When the next timer is due, if any.
    pub fn next_deadline(&self) -> Option<SimTime> {
        self.timers.next_deadline()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("now", &self.clock.now())
            .field("registry", &self.registry)
            .field("running", &self.offers.is_running())
            .field("pending_timers", &self.timers.len())
            .finish()
    }
}
