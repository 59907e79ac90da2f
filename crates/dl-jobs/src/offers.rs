//! The `OfferScheduler`: periodic offer generation and auto-expiry.
//!
//! # Timers
//!
//! The scheduler drives two kinds of delayed work through one
//! [`DelayScheduler`]:
//!
//! ```text
//! OfferTimer::Spawn          every U[min_spawn, max_spawn]  → spawn_offer, reschedule
//! OfferTimer::Expire(job)    accept_duration after creation → expire_offer
//! ```
//!
//! # Accept vs. expire
//!
//! When an offer is accepted or denied its expiry timer is cancelled, but
//! that is only an optimisation.  `expire_offer` re-checks that the job is
//! still an offer before touching it, so an expiry that fires late (or whose
//! cancellation was never attempted) is a silent no-op.

use std::collections::HashMap;

use dl_core::{JobId, OfferTiming, SimRng, ZoneCatalog, ZonePair, ZoneRef};
use dl_timer::{DelayScheduler, TimerHandle};
use tracing::{debug, trace, warn};

use crate::{JobError, JobRegistry, JobResult};

/// Payload the offer scheduler puts on the delay scheduler.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum OfferTimer {
    /// Run one spawn cycle.
    Spawn,
    /// The accept window of this offer has closed.
    Expire(JobId),
}

/// What handling one fired [`OfferTimer`] did.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TimerOutcome {
    /// A spawn cycle created this offer.
    Spawned(JobId),
    /// A spawn cycle found nothing to offer.
    SpawnSkipped,
    /// The offer was still open and has been withdrawn.
    OfferExpired(JobId),
    /// The expiry fired for an offer that was already accepted or withdrawn.
    Stale(JobId),
}

/// Proposes offers from the zone catalog and closes them when their accept
/// window runs out.
#[derive(Debug)]
pub struct OfferScheduler {
    timing:         OfferTiming,
    pending_expiry: HashMap<JobId, TimerHandle>,
    spawn_timer:    Option<TimerHandle>,
}

impl OfferScheduler {
    pub fn new(timing: OfferTiming) -> Self {
        Self {
            timing,
            pending_expiry: HashMap::new(),
            spawn_timer:    None,
        }
    }

    pub fn timing(&self) -> &OfferTiming {
        &self.timing
    }

    /// `true` once [`start`][Self::start] has scheduled a spawn cycle and
    /// [`stop`][Self::stop] has not cancelled it.
    pub fn is_running(&self) -> bool {
        self.spawn_timer.is_some()
    }

    /// Schedule the first spawn cycle.  Does nothing if already running.
    pub fn start<S: DelayScheduler<OfferTimer>>(&mut self, timers: &mut S, rng: &mut SimRng) {
        if self.spawn_timer.is_none() {
            self.schedule_spawn(timers, rng);
        }
    }

    /// Cancel the pending spawn cycle.  Open offers keep their expiry timers.
    pub fn stop<S: DelayScheduler<OfferTimer>>(&mut self, timers: &mut S) {
        if let Some(handle) = self.spawn_timer.take() {
            timers.cancel(handle);
        }
    }

    /// Every `(pickup, dropoff)` combination from the catalog that may be
    /// offered right now: not the same zone on both ends, not already offered
    /// or active.  Returned in `pickups × dropoffs` order.
    pub fn candidate_pairs<'c>(
        catalog:  &'c ZoneCatalog,
        registry: &JobRegistry,
    ) -> Vec<(&'c ZoneRef, &'c ZoneRef)> {
        catalog
            .pickups()
            .iter()
            .flat_map(|p| catalog.dropoffs().iter().map(move |d| (p, d)))
            .filter(|(p, d)| {
                let pair = ZonePair::new(p.id, d.id);
                !pair.is_degenerate() && !registry.contains_pair(pair)
            })
            .collect()
    }

    /// Run one spawn cycle now: pick a candidate pair uniformly, draw a time
    /// limit, create the offer, and schedule its expiry.
    ///
    /// [`JobError::NoValidOffers`] when every pair is taken.
    pub fn spawn_offer<S: DelayScheduler<OfferTimer>>(
        &mut self,
        catalog:  &ZoneCatalog,
        registry: &mut JobRegistry,
        rng:      &mut SimRng,
        timers:   &mut S,
    ) -> JobResult<JobId> {
        let (pickup, dropoff) = {
            let candidates = Self::candidate_pairs(catalog, registry);
            let Some(&(p, d)) = rng.choose(&candidates) else {
                return Err(JobError::NoValidOffers);
            };
            (p.clone(), d.clone())
        };
        let time_limit = self.timing.delivery_time.sample(rng);
        let id = JobId::from_random_bytes(rng.random());

        registry.create_offer_with_id(id, pickup, dropoff, time_limit)?;
        let handle = timers.schedule(self.timing.accept_duration, OfferTimer::Expire(id));
        self.pending_expiry.insert(id, handle);
        Ok(id)
    }

    /// Handle a fired accept-window timer.
    ///
    /// Withdraws the offer if it is still open and returns `true`; otherwise
    /// changes nothing and returns `false`.
    pub fn expire_offer(&mut self, id: JobId, registry: &mut JobRegistry) -> bool {
        self.pending_expiry.remove(&id);
        if !registry.has_offer(id) {
            debug!(job = %id, "expiry fired for an offer that is no longer open");
            return false;
        }
        registry.deny_offer(id).is_ok()
    }

    /// Cancel the accept-window timer of `id`, if one is pending.  Call after
    /// a successful accept or deny.
    pub fn cancel_expiry<S: DelayScheduler<OfferTimer>>(&mut self, id: JobId, timers: &mut S) -> bool {
        match self.pending_expiry.remove(&id) {
            Some(handle) => timers.cancel(handle),
            None => false,
        }
    }

    /// Dispatch one fired timer.  A spawn cycle always schedules the next
    /// one, whether or not it produced an offer.
    pub fn on_timer<S: DelayScheduler<OfferTimer>>(
        &mut self,
        timer:    OfferTimer,
        catalog:  &ZoneCatalog,
        registry: &mut JobRegistry,
        rng:      &mut SimRng,
        timers:   &mut S,
    ) -> TimerOutcome {
        match timer {
            OfferTimer::Spawn => {
                self.spawn_timer = None;
                let outcome = match self.spawn_offer(catalog, registry, rng, timers) {
                    Ok(id) => TimerOutcome::Spawned(id),
                    Err(JobError::NoValidOffers) => {
                        debug!("spawn cycle skipped: no valid pair");
                        TimerOutcome::SpawnSkipped
                    }
                    Err(e) => {
                        warn!(error = %e, "spawn cycle failed");
                        TimerOutcome::SpawnSkipped
                    }
                };
                self.schedule_spawn(timers, rng);
                outcome
            }
            OfferTimer::Expire(id) => {
                if self.expire_offer(id, registry) {
                    TimerOutcome::OfferExpired(id)
                } else {
                    TimerOutcome::Stale(id)
                }
            }
        }
    }

    /// Number of offers whose accept-window timer has not fired yet.
    pub fn pending_expiries(&self) -> usize {
        self.pending_expiry.len()
    }

    fn schedule_spawn<S: DelayScheduler<OfferTimer>>(&mut self, timers: &mut S, rng: &mut SimRng) {
        let delay = self.timing.spawn_interval.sample(rng);
        trace!(delay_secs = delay.as_secs_f64(), "next spawn cycle scheduled");
        self.spawn_timer = Some(timers.schedule(delay, OfferTimer::Spawn));
    }
}
