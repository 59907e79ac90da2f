//! Lifecycle event types.

use std::fmt;

use dl_core::DeliveryJob;

/// Which lifecycle step an event reports.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum EventKind {
    /// A new offer entered the available list.
    OfferCreated,
    /// An offer left the available list without being accepted: it timed
    /// out, or it was denied.
    OfferExpired,
    JobAccepted,
    JobPickedUp,
    JobDelivered,
    /// An active job's countdown ran out.
    JobExpired,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::OfferCreated,
        EventKind::OfferExpired,
        EventKind::JobAccepted,
        EventKind::JobPickedUp,
        EventKind::JobDelivered,
        EventKind::JobExpired,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::OfferCreated => "offer_created",
            EventKind::OfferExpired => "offer_expired",
            EventKind::JobAccepted  => "job_accepted",
            EventKind::JobPickedUp  => "job_picked_up",
            EventKind::JobDelivered => "job_delivered",
            EventKind::JobExpired   => "job_expired",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One published event: its kind plus a snapshot of the job taken right
/// after the transition.
#[derive(Clone, Debug, PartialEq)]
pub struct JobEvent {
    pub kind: EventKind,
    pub job:  DeliveryJob,
}

impl JobEvent {
    pub fn new(kind: EventKind, job: DeliveryJob) -> Self {
        Self { kind, job }
    }
}
