//! Zone indicator state, derived from the active jobs.
//!
//! A zone shows a marker iff some active job has it as its next waypoint.
//! The registry does not store this; [`ZoneIndicators`] rebuilds it from the
//! job snapshots the bus delivers, and [`relevant_zones`] computes the same
//! set directly from `JobRegistry::active_jobs()`.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use dl_core::{DeliveryJob, JobId, ZoneId};
use dl_events::{EventBus, EventKind, JobEvent, SubscriptionId};
use parking_lot::Mutex;

/// The set of zones that should show a marker for `jobs`.
pub fn relevant_zones(jobs: &[DeliveryJob]) -> BTreeSet<ZoneId> {
    jobs.iter()
        .filter_map(|j| j.relevant_zone().map(|z| z.id))
        .collect()
}

/// Bus subscriber that tracks which zones should show a marker.
///
/// Cloning yields another handle onto the same state.
#[derive(Clone, Debug, Default)]
pub struct ZoneIndicators {
    /// Active job → zone it is waiting on.
    waypoints: Arc<Mutex<HashMap<JobId, ZoneId>>>,
}

impl ZoneIndicators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an indicator set and subscribe it to every event on `bus`.
    pub fn attach(bus: &EventBus) -> (Self, SubscriptionId) {
        let indicators = Self::new();
        let handle = indicators.clone();
        let id = bus.subscribe_all(move |e| handle.apply(e));
        (indicators, id)
    }

    /// Fold one event into the indicator state.
    ///
    /// Offer events are ignored: an offer is not an active job and never
    /// marks a zone.
    pub fn apply(&self, event: &JobEvent) {
        let job = &event.job;
        let mut waypoints = self.waypoints.lock();
        match event.kind {
            EventKind::JobAccepted | EventKind::JobPickedUp => match job.relevant_zone() {
                Some(zone) => {
                    waypoints.insert(job.id(), zone.id);
                }
                None => {
                    waypoints.remove(&job.id());
                }
            },
            EventKind::JobDelivered | EventKind::JobExpired => {
                waypoints.remove(&job.id());
            }
            EventKind::OfferCreated | EventKind::OfferExpired => {}
        }
    }

    /// Replace the tracked state with the waypoints of `jobs`.
    pub fn resync(&self, jobs: &[DeliveryJob]) {
        let mut waypoints = self.waypoints.lock();
        waypoints.clear();
        waypoints.extend(jobs.iter().filter_map(|j| j.relevant_zone().map(|z| (j.id(), z.id))));
    }

    pub fn is_marked(&self, zone: ZoneId) -> bool {
        self.waypoints.lock().values().any(|&z| z == zone)
    }

    pub fn marked_zones(&self) -> BTreeSet<ZoneId> {
        self.waypoints.lock().values().copied().collect()
    }
}
