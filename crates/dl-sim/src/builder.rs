//! Fluent builder for constructing a [`Session`].

use std::sync::Arc;

use dl_core::{JobConfig, SimClock, SimRng, ZoneCatalog};
use dl_events::EventBus;
use dl_jobs::{JobRegistry, OfferScheduler};
use dl_timer::TimerQueue;
use tracing::{info, warn};

use crate::{Session, SessionResult};

/// Fluent builder for [`Session`].
///
/// # Required inputs
///
/// - [`JobConfig`]: timing bounds, countdown mode, seed
/// - [`ZoneCatalog`]: the pickup and dropoff zones offers are drawn from
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default                          |
/// |--------------|----------------------------------|
/// | `.bus(b)`    | A fresh `EventBus`               |
/// | `.rng(r)`    | `SimRng::new(config.seed)`       |
///
/// Supply `.bus(..)` when subscribers must be attached before the first
/// event, or when several components share one bus.
pub struct SessionBuilder {
    config:  JobConfig,
    catalog: ZoneCatalog,
    bus:     Option<Arc<EventBus>>,
    rng:     Option<SimRng>,
}

impl SessionBuilder {
    pub fn new(config: JobConfig, catalog: ZoneCatalog) -> Self {
        Self { config, catalog, bus: None, rng: None }
    }

    pub fn bus(mut self, bus: Arc<EventBus>) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Override the seeded RNG, e.g. with [`SimRng::from_entropy`].
    pub fn rng(mut self, rng: SimRng) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Validate the configuration and return a session that has not started
    /// spawning yet.
    ///
    /// An empty pickup or dropoff list is allowed (every spawn cycle will
    /// simply come up empty) but logged.
    pub fn build(self) -> SessionResult<Session> {
        let timing = self.config.timing()?;

        if self.catalog.pickups().is_empty() || self.catalog.dropoffs().is_empty() {
            warn!(
                pickups = self.catalog.pickups().len(),
                dropoffs = self.catalog.dropoffs().len(),
                "zone catalog cannot produce any offer"
            );
        }
        info!(
            zones = self.catalog.len(),
            seed = self.config.seed,
            countdown = ?timing.countdown_start,
            "session built"
        );

        let bus = self.bus.unwrap_or_else(|| Arc::new(EventBus::new()));
        let rng = self.rng.unwrap_or_else(|| SimRng::new(self.config.seed));

        Ok(Session {
            clock:    SimClock::new(),
            registry: JobRegistry::new(bus, timing.countdown_start),
            offers:   OfferScheduler::new(timing),
            timers:   TimerQueue::new(),
            catalog:  self.catalog,
            config:   self.config,
            rng,
        })
    }
}
