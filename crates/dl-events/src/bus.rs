//! `EventBus`: owned subscriber list with snapshot dispatch.
//!
//! # Re-entrancy
//!
//! Handlers may subscribe, unsubscribe, or even publish while a dispatch is
//! running.  `publish` copies the matching subscribers out of the list and
//! releases the lock before calling anyone, so list mutation never touches
//! the in-flight iteration:
//!
//! - a subscriber added during a dispatch first hears the *next* event;
//! - a subscriber removed during a dispatch is skipped for the rest of it,
//!   because every entry carries a `live` flag that `unsubscribe` clears and
//!   dispatch checks right before each call.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::trace;

use crate::{EventKind, JobEvent};

/// Token returned by [`EventBus::subscribe`]; pass it to
/// [`EventBus::unsubscribe`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn Fn(&JobEvent) + Send + Sync>;

struct Subscriber {
    id:      SubscriptionId,
    /// `None` listens to every kind.
    filter:  Option<EventKind>,
    live:    AtomicBool,
    handler: Handler,
}

impl Subscriber {
    fn wants(&self, kind: EventKind) -> bool {
        self.filter.is_none_or(|k| k == kind)
    }
}

/// In-process publish/subscribe channel for [`JobEvent`]s.
///
/// Share it as `Arc<EventBus>`: the job registry publishes through one
/// clone, subscribers register through others.
#[derive(Default)]
pub struct EventBus {
    subscribers: Mutex<Vec<Arc<Subscriber>>>,
    next_id:     AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` for every published event of `kind`.
    pub fn subscribe<F>(&self, kind: EventKind, handler: F) -> SubscriptionId
    where
        F: Fn(&JobEvent) + Send + Sync + 'static,
    {
        self.add(Some(kind), Box::new(handler))
    }

    /// Call `handler` for every published event, whatever its kind.
    pub fn subscribe_all<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&JobEvent) + Send + Sync + 'static,
    {
        self.add(None, Box::new(handler))
    }

    /// Remove a subscription.  Returns `false` if it was already removed.
    ///
    /// Safe to call from inside a handler; see the module docs.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subs = self.subscribers.lock();
        match subs.iter().position(|s| s.id == id) {
            Some(pos) => {
                let sub = subs.remove(pos);
                sub.live.store(false, Ordering::Release);
                true
            }
            None => false,
        }
    }

    /// Deliver `event` to every matching subscriber, in subscription order.
    /// Returns how many handlers ran.
    pub fn publish(&self, event: &JobEvent) -> usize {
        let snapshot: Vec<Arc<Subscriber>> = self
            .subscribers
            .lock()
            .iter()
            .filter(|s| s.wants(event.kind))
            .cloned()
            .collect();

        let mut delivered = 0;
        for sub in snapshot {
            if sub.live.load(Ordering::Acquire) {
                (sub.handler)(event);
                delivered += 1;
            }
        }
        trace!(kind = %event.kind, job = %event.job.id(), delivered, "event published");
        delivered
    }

    /// Number of current subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }

    fn add(&self, filter: Option<EventKind>, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.lock().push(Arc::new(Subscriber {
            id,
            filter,
            live: AtomicBool::new(true),
            handler,
        }));
        id
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
