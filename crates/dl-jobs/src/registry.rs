//! The `JobRegistry`: owner of every offered and active job.
//!
//! # Collections
//!
//! ```text
//!  create_offer ──▶ available_offers ──accept_offer──▶ active_jobs ──▶ (dropped)
//!                        │                               │   delivered / expired
//!                        └── deny_offer / lapse ─────────┘
//!                              (dropped)
//! ```
//!
//! Both collections are `Vec`s in insertion order, which is the order `tick`
//! and `route_zone_trigger` process jobs and publish events in.  A job is in
//! at most one of them.  A hash set of `ZonePair`s mirrors the union of the
//! two so the uniqueness check is O(1); every insert or removal below keeps
//! it in step.

use std::sync::Arc;
use std::time::Duration;

use dl_core::{CountdownStart, DeliveryJob, JobId, JobState, ZoneId, ZonePair, ZoneRef};
use dl_events::{EventBus, EventKind, JobEvent};
use tracing::{debug, info, warn};

use crate::{JobError, JobResult};

#[cfg(feature = "fx-hash")]
type PairSet = rustc_hash::FxHashSet<ZonePair>;
#[cfg(not(feature = "fx-hash"))]
type PairSet = std::collections::HashSet<ZonePair>;

/// Single mutator of job state and sole publisher of lifecycle events.
///
/// Every mutating method takes `&mut self`, so within one process the borrow
/// checker already serialises them.  A multi-threaded host shares the
/// registry (or the `dl_sim::Session` that owns it) behind one mutex.
pub struct JobRegistry {
    bus:              Arc<EventBus>,
    available_offers: Vec<DeliveryJob>,
    active_jobs:      Vec<DeliveryJob>,
    pairs:            PairSet,
    countdown_start:  CountdownStart,
}

impl JobRegistry {
    pub fn new(bus: Arc<EventBus>, countdown_start: CountdownStart) -> Self {
        Self {
            bus,
            available_offers: Vec::new(),
            active_jobs:      Vec::new(),
            pairs:            PairSet::default(),
            countdown_start,
        }
    }

    // ── Offers ────────────────────────────────────────────────────────────

    /// Create an offer with a freshly minted id.  See
    /// [`create_offer_with_id`][Self::create_offer_with_id].
    pub fn create_offer(
        &mut self,
        pickup:     ZoneRef,
        dropoff:    ZoneRef,
        time_limit: Duration,
    ) -> JobResult<JobId> {
        self.create_offer_with_id(JobId::new_v4(), pickup, dropoff, time_limit)
    }

    /// Create an offer and publish `OfferCreated`.
    ///
    /// Fails with [`JobError::DuplicateId`] when `id` is already offered or
    /// active, with [`JobError::InvalidPair`] when both zones are the same or
    /// the pair is already offered or active, and with
    /// [`JobError::InvalidTimeLimit`] for a zero limit.  A rejected offer
    /// never enters either collection.
    pub fn create_offer_with_id(
        &mut self,
        id:         JobId,
        pickup:     ZoneRef,
        dropoff:    ZoneRef,
        time_limit: Duration,
    ) -> JobResult<JobId> {
        if self.offer(id).is_some() || self.active_job(id).is_some() {
            warn!(job = %id, "rejected offer with an id already in use");
            return Err(JobError::DuplicateId(id));
        }
        let pair = ZonePair::new(pickup.id, dropoff.id);
        if pair.is_degenerate() || self.pairs.contains(&pair) {
            warn!(pickup = %pair.pickup, dropoff = %pair.dropoff, "rejected offer for invalid or duplicate pair");
            return Err(JobError::InvalidPair { pickup: pair.pickup, dropoff: pair.dropoff });
        }
        if time_limit.is_zero() {
            return Err(JobError::InvalidTimeLimit);
        }

        let job = DeliveryJob::new(id, pickup, dropoff, time_limit);
        info!(job = %id, route = %job.route_label(), limit_secs = time_limit.as_secs_f64(), "offer created");
        self.pairs.insert(pair);
        self.available_offers.push(job.clone());
        self.publish(EventKind::OfferCreated, job);
        Ok(id)
    }

    /// Move an offer into the active set and publish `JobAccepted`.
    ///
    /// [`JobError::NotFound`] if `id` is not currently offered (already
    /// accepted, denied, or expired).
    pub fn accept_offer(&mut self, id: JobId) -> JobResult<()> {
        let job = self.take_offer(id)?;
        info!(job = %id, route = %job.route_label(), "offer accepted");
        self.active_jobs.push(job.clone());
        self.publish(EventKind::JobAccepted, job);
        Ok(())
    }

    /// Withdraw an offer and publish `OfferExpired`.
    ///
    /// Denial and auto-expiry are reported with the same event; subscribers
    /// treat it as "offer withdrawn".
    pub fn deny_offer(&mut self, id: JobId) -> JobResult<()> {
        let job = self.take_offer(id)?;
        self.pairs.remove(&job.pair());
        info!(job = %id, "offer withdrawn");
        self.publish(EventKind::OfferExpired, job);
        Ok(())
    }

    // ── Active jobs ───────────────────────────────────────────────────────

    /// React to the courier entering `zone`.
    ///
    /// Every active job is checked, in insertion order: a job waiting for
    /// pickup at `zone` is picked up (`JobPickedUp`); otherwise a job waiting
    /// for dropoff at `zone` is delivered (`JobDelivered`) and dropped.
    /// Several jobs may react to the same trigger.  Returns how many did.
    pub fn route_zone_trigger(&mut self, zone: ZoneId) -> usize {
        let mut fired: Vec<(EventKind, DeliveryJob)> = Vec::new();
        for job in &mut self.active_jobs {
            match job.state() {
                JobState::PendingPickup if job.pickup_zone().id == zone => {
                    job.pickup();
                    fired.push((EventKind::JobPickedUp, job.clone()));
                }
                JobState::PendingDropoff if job.dropoff_zone().id == zone => {
                    job.deliver();
                    fired.push((EventKind::JobDelivered, job.clone()));
                }
                _ => {}
            }
        }
        if fired.is_empty() {
            debug!(%zone, "zone trigger matched no active job");
            return 0;
        }

        for job in take_where(&mut self.active_jobs, |j| j.state() == JobState::Completed) {
            self.pairs.remove(&job.pair());
        }
        let n = fired.len();
        for (kind, job) in fired {
            info!(job = %job.id(), %zone, event = %kind, "zone trigger");
            self.publish(kind, job);
        }
        n
    }

    /// Advance every running countdown by `dt`.
    ///
    /// Active jobs whose countdown reaches zero are dropped and reported with
    /// `JobExpired`, in insertion order.  With
    /// [`CountdownStart::OnCreation`] offers count down too, and an offer
    /// that lapses is withdrawn with `OfferExpired`.  Returns the number of
    /// active jobs that expired.
    pub fn tick(&mut self, dt: Duration) -> usize {
        if dt.is_zero() {
            return 0;
        }

        for job in &mut self.active_jobs {
            job.advance_timer(dt);
        }
        let expired = take_where(&mut self.active_jobs, |j| j.state() == JobState::Expired);

        let lapsed = match self.countdown_start {
            CountdownStart::OnAcceptance => Vec::new(),
            CountdownStart::OnCreation => {
                for offer in &mut self.available_offers {
                    offer.advance_timer(dt);
                }
                take_where(&mut self.available_offers, |j| j.state() == JobState::Expired)
            }
        };

        for job in &expired {
            self.pairs.remove(&job.pair());
        }
        for offer in &lapsed {
            self.pairs.remove(&offer.pair());
        }

        let n = expired.len();
        for job in expired {
            info!(job = %job.id(), route = %job.route_label(), "job expired");
            self.publish(EventKind::JobExpired, job);
        }
        for offer in lapsed {
            info!(job = %offer.id(), "offer countdown lapsed before acceptance");
            self.publish(EventKind::OfferExpired, offer);
        }
        n
    }

    // ── Read-only views ───────────────────────────────────────────────────

    /// Accepted jobs, in acceptance order.
    pub fn active_jobs(&self) -> &[DeliveryJob] {
        &self.active_jobs
    }

    /// Offers not yet accepted, in creation order.
    pub fn available_offers(&self) -> &[DeliveryJob] {
        &self.available_offers
    }

    pub fn offer(&self, id: JobId) -> Option<&DeliveryJob> {
        self.available_offers.iter().find(|j| j.id() == id)
    }

    pub fn active_job(&self, id: JobId) -> Option<&DeliveryJob> {
        self.active_jobs.iter().find(|j| j.id() == id)
    }

    #[inline]
    pub fn has_offer(&self, id: JobId) -> bool {
        self.offer(id).is_some()
    }

    /// `true` if `pair` is currently offered or active.
    #[inline]
    pub fn contains_pair(&self, pair: ZonePair) -> bool {
        self.pairs.contains(&pair)
    }

    /// Offers plus active jobs.
    pub fn job_count(&self) -> usize {
        self.available_offers.len() + self.active_jobs.len()
    }

    pub fn countdown_start(&self) -> CountdownStart {
        self.countdown_start
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn take_offer(&mut self, id: JobId) -> JobResult<DeliveryJob> {
        let pos = self
            .available_offers
            .iter()
            .position(|j| j.id() == id)
            .ok_or(JobError::NotFound(id))?;
        Ok(self.available_offers.remove(pos))
    }

    /// Callers update the collections and the pair index first, so a
    /// handler (or a panic inside one) never sees a half-applied change.
    fn publish(&self, kind: EventKind, job: DeliveryJob) {
        self.bus.publish(&JobEvent::new(kind, job));
    }
}

impl std::fmt::Debug for JobRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JobRegistry")
            .field("available_offers", &self.available_offers.len())
            .field("active_jobs", &self.active_jobs.len())
            .field("countdown_start", &self.countdown_start)
            .finish()
    }
}

/// Remove every job matching `pred`, keeping both halves in their original
/// order.
fn take_where(jobs: &mut Vec<DeliveryJob>, pred: impl Fn(&DeliveryJob) -> bool) -> Vec<DeliveryJob> {
    let (taken, kept): (Vec<_>, Vec<_>) = std::mem::take(jobs).into_iter().partition(|j| pred(j));
    *jobs = kept;
    taken
}
