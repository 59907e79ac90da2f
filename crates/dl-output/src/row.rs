//! Plain data row types written by log backends.

use dl_core::SimTime;
use dl_events::JobEvent;
use dl_sim::TickSummary;

/// One published job event, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRow {
    /// Position in the log, starting at 0.
    pub seq:                 u64,
    /// Session time of the most recent step boundary seen by the log.
    pub time_secs:           f64,
    pub event:               &'static str,
    pub job_id:              String,
    pub pickup_zone:         u32,
    pub dropoff_zone:        u32,
    pub route:               String,
    /// Job state in the snapshot carried by the event.
    pub state:               &'static str,
    pub time_remaining_secs: f64,
}

impl EventRow {
    pub fn from_event(seq: u64, now: SimTime, event: &JobEvent) -> Self {
        let job = &event.job;
        Self {
            seq,
            time_secs:           now.as_secs_f64(),
            event:               event.kind.as_str(),
            job_id:              job.id().to_string(),
            pickup_zone:         job.pickup_zone().id.0,
            dropoff_zone:        job.dropoff_zone().id.0,
            route:               job.route_label(),
            state:               job.state().as_str(),
            time_remaining_secs: job.time_remaining().as_secs_f64(),
        }
    }
}

/// Counts for one session step that did something.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSummaryRow {
    pub tick:           u64,
    pub time_millis:    u64,
    pub offers_spawned: u64,
    pub spawn_skipped:  u64,
    pub offers_expired: u64,
    pub stale_timers:   u64,
    pub jobs_expired:   u64,
}

impl TickSummaryRow {
    pub fn new(tick: u64, now: SimTime, summary: &TickSummary) -> Self {
        Self {
            tick,
            time_millis:    now.0.as_millis() as u64,
            offers_spawned: summary.offers_spawned as u64,
            spawn_skipped:  summary.spawn_skipped as u64,
            offers_expired: summary.offers_expired as u64,
            stale_timers:   summary.stale_timers as u64,
            jobs_expired:   summary.jobs_expired as u64,
        }
    }
}
