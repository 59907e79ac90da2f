//! A scripted courier that works through its accepted jobs.
//!
//! The courier stands in for a player: it decides on each new offer, then
//! travels towards the next waypoint of its oldest active job and reports
//! arrival to the session.  Travel takes a random 4–18 s.

use std::collections::HashSet;
use std::time::Duration;

use dl_core::{JobId, SimRng, ZoneId};
use dl_sim::Session;
use tracing::{debug, info};

/// Accepted jobs beyond this are declined.
const CAPACITY: usize = 3;

#[derive(Default, Debug, Clone, Copy)]
pub struct Tally {
    pub accepted: usize,
    pub denied:   usize,
    pub ignored:  usize,
    pub visits:   usize,
}

struct Trip {
    zone:      ZoneId,
    remaining: Duration,
}

pub struct Courier {
    rng:   SimRng,
    seen:  HashSet<JobId>,
    trip:  Option<Trip>,
    tally: Tally,
}

impl Courier {
    pub fn new(rng: SimRng) -> Self {
        Self { rng, seen: HashSet::new(), trip: None, tally: Tally::default() }
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    /// Run the courier for one step of `dt` after the session advanced.
    pub fn step(&mut self, session: &mut Session, dt: Duration) {
        self.review_offers(session);
        self.travel(session, dt);
    }

    /// Offers left to lapse that are still listed.
    pub(crate) fn tracked_offers(&self) -> usize {
        self.seen.len()
    }

    fn review_offers(&mut self, session: &mut Session) {
        let listed: Vec<JobId> = session.available_offers().iter().map(|j| j.id()).collect();
        // Lapsed offers leave the list; forget them.
        self.seen.retain(|id| listed.contains(id));
        let fresh: Vec<JobId> = listed.into_iter().filter(|id| !self.seen.contains(id)).collect();

        for id in fresh {
            let roll: f64 = self.rng.random();
            if session.active_jobs().len() >= CAPACITY || roll < 0.15 {
                if session.deny_offer(id).is_ok() {
                    self.tally.denied += 1;
                }
            } else if roll < 0.75 {
                if session.accept_offer(id).is_ok() {
                    self.tally.accepted += 1;
                }
            } else {
                // Left to lapse.
                self.seen.insert(id);
                self.tally.ignored += 1;
            }
        }
    }

    fn travel(&mut self, session: &mut Session, dt: Duration) {
        if self.trip.is_none() {
            let next = session.active_jobs().first().and_then(|j| j.relevant_zone()).map(|z| z.id);
            if let Some(zone) = next {
                let secs = self.rng.gen_range(4..=18);
                debug!(%zone, secs, "courier sets off");
                self.trip = Some(Trip { zone, remaining: Duration::from_secs(secs) });
            }
        }

        let Some(trip) = self.trip.as_mut() else {
            return;
        };
        trip.remaining = trip.remaining.saturating_sub(dt);
        if !trip.remaining.is_zero() {
            return;
        }

        let zone = trip.zone;
        self.trip = None;
        self.tally.visits += 1;
        let reacted = session.on_zone_entered(zone);
        info!(%zone, reacted, now = %session.now(), "courier arrived");
    }
}
